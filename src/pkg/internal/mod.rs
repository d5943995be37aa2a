pub mod adaptors;
pub mod sql;
