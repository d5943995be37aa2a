use std::str::FromStr;

use sqlx::{postgres::PgPoolOptions, types::BigDecimal, Postgres, Transaction};

use crate::{pkg::server::state::MIGRATOR, prelude::Result};

pub fn decimal(s: &str) -> BigDecimal {
    BigDecimal::from_str(s).expect("valid decimal literal")
}

/// Opens a transaction on `DATABASE_URL` seeded with companies c1..c3 and
/// jobs Job1..Job4, returning it with the job ids in title order.
///
/// Callers roll the transaction back, so the database should be a scratch
/// one with no committed rows. Tests using it are `#[ignore]`d; run them with
/// `cargo test -- --ignored`.
pub async fn seeded_txn() -> Result<(Transaction<'static, Postgres>, Vec<i32>)> {
    let url = std::env::var("DATABASE_URL")
        .expect("DATABASE_URL must point at a scratch postgres database");
    let pool = PgPoolOptions::new().max_connections(1).connect(&url).await?;
    MIGRATOR.run(&pool).await?;

    let mut tx = pool.begin().await?;
    sqlx::query(
        "INSERT INTO companies (handle, name, num_employees, description, logo_url)
         VALUES ('c1', 'C1', 1, 'Desc1', 'http://c1.img'),
                ('c2', 'C2', 2, 'Desc2', 'http://c2.img'),
                ('c3', 'C3', 3, 'Desc3', 'http://c3.img')",
    )
    .execute(&mut *tx)
    .await?;
    let job_ids = sqlx::query_scalar::<_, i32>(
        "INSERT INTO jobs (title, salary, equity, company_handle)
         VALUES ('Job1', 100, '0.1', 'c1'),
                ('Job2', 200, '0.2', 'c1'),
                ('Job3', 300, '0', 'c1'),
                ('Job4', NULL, NULL, 'c1')
         RETURNING id",
    )
    .fetch_all(&mut *tx)
    .await?;

    Ok((tx, job_ids))
}
