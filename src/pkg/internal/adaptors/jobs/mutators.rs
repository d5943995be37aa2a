use sqlx::PgConnection;

use crate::{
    pkg::internal::{
        adaptors::jobs::spec::{JobEntry, JobUpdate, NewJob, UPDATABLE_COLUMNS},
        sql::{build_set_clause, ColumnMap, SqlValue, Statement},
    },
    prelude::{Error, Result},
};

pub struct JobMutator<'a> {
    pool: &'a mut PgConnection,
}

impl<'a> JobMutator<'a> {
    pub fn new(pool: &'a mut PgConnection) -> Self {
        JobMutator { pool }
    }

    pub async fn create(&mut self, job: &NewJob) -> Result<JobEntry> {
        let row = sqlx::query_as::<_, JobEntry>(
            r#"
            INSERT INTO jobs (title, salary, equity, company_handle)
            VALUES ($1, $2, $3, $4)
            RETURNING id, title, salary, equity, company_handle
            "#,
        )
        .bind(&job.title)
        .bind(job.salary)
        .bind(&job.equity)
        .bind(&job.company_handle)
        .fetch_one(&mut *self.pool)
        .await?;
        Ok(row)
    }

    /// `UPDATE` for the given fields; the job id is always the last placeholder.
    pub fn update_statement(id: i32, job: &JobUpdate) -> Result<Statement> {
        let (set_cols, mut values) =
            build_set_clause(job.fields(), &ColumnMap::identity(UPDATABLE_COLUMNS))?;
        let id_idx = values.len() + 1;
        values.push(SqlValue::from(id));
        let sql = format!(
            "UPDATE jobs SET {} WHERE id = ${} \
             RETURNING id, title, salary, equity, company_handle",
            set_cols, id_idx
        );
        Ok(Statement { sql, values })
    }

    pub async fn update(&mut self, id: i32, job: &JobUpdate) -> Result<JobEntry> {
        let statement = Self::update_statement(id, job)?;
        tracing::debug!(sql = %statement.sql, "updating job {}", id);
        statement
            .query_as::<JobEntry>()
            .fetch_optional(&mut *self.pool)
            .await?
            .ok_or_else(|| Error::NotFound(format!("No job: {}", id)))
    }

    pub async fn remove(&mut self, id: i32) -> Result<()> {
        let deleted = sqlx::query_scalar::<_, i32>("DELETE FROM jobs WHERE id = $1 RETURNING id")
            .bind(id)
            .fetch_optional(&mut *self.pool)
            .await?;

        match deleted {
            Some(_) => Ok(()),
            None => Err(Error::NotFound(format!("No job: {}", id))),
        }
    }
}
