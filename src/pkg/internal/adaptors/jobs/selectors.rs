use sqlx::PgConnection;

use crate::{
    pkg::internal::adaptors::{
        companies::selectors::CompanySelector,
        jobs::spec::{JobDetail, JobEntry, JobSearch, JobSummary},
    },
    prelude::{Error, Result},
};

pub struct JobSelector<'a> {
    pool: &'a mut PgConnection,
}

impl<'a> JobSelector<'a> {
    pub fn new(pool: &'a mut PgConnection) -> Self {
        JobSelector { pool }
    }

    pub async fn find_all(&mut self, search: &JobSearch) -> Result<Vec<JobSummary>> {
        let statement = search.statement();
        tracing::debug!(sql = %statement.sql, values = statement.values.len(), "searching jobs");
        let rows = statement
            .query_as::<JobSummary>()
            .fetch_all(&mut *self.pool)
            .await?;

        Ok(rows)
    }

    pub async fn get_by_id(&mut self, id: i32) -> Result<Option<JobEntry>> {
        let row = sqlx::query_as::<_, JobEntry>(
            "SELECT id, title, salary, equity, company_handle
             FROM jobs WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&mut *self.pool)
        .await?;

        Ok(row)
    }

    pub async fn get(&mut self, id: i32) -> Result<JobDetail> {
        let job = match self.get_by_id(id).await? {
            Some(job) => job,
            None => {
                tracing::warn!("job {} not found", id);
                return Err(Error::NotFound(format!("No job: {}", id)));
            }
        };
        let company = CompanySelector::new(&mut *self.pool)
            .get_by_handle(&job.company_handle)
            .await?;
        Ok(JobDetail::new(job, company))
    }
}

#[cfg(test)]
mod tests {
    use tracing_test::traced_test;

    use super::*;
    use crate::pkg::internal::adaptors::testing::{decimal, seeded_txn};

    fn summary(id: i32, title: &str, salary: Option<i32>, equity: Option<&str>) -> JobSummary {
        JobSummary {
            id,
            title: title.into(),
            salary,
            equity: equity.map(decimal),
            company_handle: "c1".into(),
            company_name: Some("C1".into()),
        }
    }

    #[tokio::test]
    #[traced_test]
    #[ignore = "needs DATABASE_URL"]
    async fn test_find_all_without_filters() -> Result<()> {
        let (mut tx, ids) = seeded_txn().await?;
        let jobs = JobSelector::new(&mut *tx)
            .find_all(&JobSearch::default())
            .await?;
        assert_eq!(
            jobs,
            vec![
                summary(ids[0], "Job1", Some(100), Some("0.1")),
                summary(ids[1], "Job2", Some(200), Some("0.2")),
                summary(ids[2], "Job3", Some(300), Some("0")),
                summary(ids[3], "Job4", None, None),
            ]
        );
        tx.rollback().await?;
        Ok(())
    }

    #[tokio::test]
    #[traced_test]
    #[ignore = "needs DATABASE_URL"]
    async fn test_find_all_by_min_salary() -> Result<()> {
        let (mut tx, ids) = seeded_txn().await?;
        let search = JobSearch {
            min_salary: Some(250),
            ..Default::default()
        };
        let jobs = JobSelector::new(&mut *tx).find_all(&search).await?;
        assert_eq!(jobs, vec![summary(ids[2], "Job3", Some(300), Some("0"))]);
        tx.rollback().await?;
        Ok(())
    }

    #[tokio::test]
    #[traced_test]
    #[ignore = "needs DATABASE_URL"]
    async fn test_find_all_by_has_equity() -> Result<()> {
        let (mut tx, ids) = seeded_txn().await?;
        let search = JobSearch {
            has_equity: Some(true),
            ..Default::default()
        };
        let jobs = JobSelector::new(&mut *tx).find_all(&search).await?;
        assert_eq!(
            jobs,
            vec![
                summary(ids[0], "Job1", Some(100), Some("0.1")),
                summary(ids[1], "Job2", Some(200), Some("0.2")),
            ]
        );

        let search = JobSearch {
            has_equity: Some(false),
            ..Default::default()
        };
        assert_eq!(JobSelector::new(&mut *tx).find_all(&search).await?.len(), 4);
        tx.rollback().await?;
        Ok(())
    }

    #[tokio::test]
    #[traced_test]
    #[ignore = "needs DATABASE_URL"]
    async fn test_find_all_by_title() -> Result<()> {
        let (mut tx, ids) = seeded_txn().await?;
        let search = JobSearch {
            title: Some("Job1".into()),
            ..Default::default()
        };
        let jobs = JobSelector::new(&mut *tx).find_all(&search).await?;
        assert_eq!(jobs, vec![summary(ids[0], "Job1", Some(100), Some("0.1"))]);

        let search = JobSearch {
            title: Some("job".into()),
            ..Default::default()
        };
        let jobs = JobSelector::new(&mut *tx).find_all(&search).await?;
        assert_eq!(
            jobs,
            vec![
                summary(ids[0], "Job1", Some(100), Some("0.1")),
                summary(ids[1], "Job2", Some(200), Some("0.2")),
                summary(ids[2], "Job3", Some(300), Some("0")),
                summary(ids[3], "Job4", None, None),
            ]
        );

        let search = JobSearch {
            title: Some("job".into()),
            min_salary: Some(1),
            ..Default::default()
        };
        let titles: Vec<String> = JobSelector::new(&mut *tx)
            .find_all(&search)
            .await?
            .into_iter()
            .map(|job| job.title)
            .collect();
        assert_eq!(titles, vec!["Job1", "Job2", "Job3"]);
        tx.rollback().await?;
        Ok(())
    }

    #[tokio::test]
    #[traced_test]
    #[ignore = "needs DATABASE_URL"]
    async fn test_find_all_by_min_salary_and_equity() -> Result<()> {
        let (mut tx, ids) = seeded_txn().await?;
        let search = JobSearch {
            min_salary: Some(150),
            has_equity: Some(true),
            ..Default::default()
        };
        let jobs = JobSelector::new(&mut *tx).find_all(&search).await?;
        assert_eq!(jobs, vec![summary(ids[1], "Job2", Some(200), Some("0.2"))]);

        let search = JobSearch {
            title: Some("nothing like this".into()),
            ..Default::default()
        };
        assert!(JobSelector::new(&mut *tx).find_all(&search).await?.is_empty());
        tx.rollback().await?;
        Ok(())
    }

    #[tokio::test]
    #[traced_test]
    #[ignore = "needs DATABASE_URL"]
    async fn test_get() -> Result<()> {
        let (mut tx, ids) = seeded_txn().await?;
        let job = JobSelector::new(&mut *tx).get(ids[0]).await?;
        assert_eq!(job.title, "Job1");
        assert_eq!(job.salary, Some(100));
        assert_eq!(job.equity, Some(decimal("0.1")));
        let company = job.company.expect("company is nested");
        assert_eq!(company.handle, "c1");
        assert_eq!(company.num_employees, Some(1));
        assert_eq!(company.logo_url.as_deref(), Some("http://c1.img"));

        let res = JobSelector::new(&mut *tx).get(0).await;
        assert!(matches!(res, Err(Error::NotFound(_))));
        tx.rollback().await?;
        Ok(())
    }
}
