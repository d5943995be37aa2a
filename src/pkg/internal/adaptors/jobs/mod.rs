pub mod mutators;
pub mod search;
pub mod selectors;
pub mod spec;
