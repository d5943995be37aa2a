use serde::{Deserialize, Deserializer, Serialize};
use sqlx::{types::BigDecimal, FromRow};
use validator::Validate;

use crate::{
    pkg::internal::{adaptors::companies::spec::CompanyEntry, sql::SqlValue},
    prelude::{Error, Result},
};

/// Columns a partial update may touch. `company_handle` is fixed at creation.
pub const UPDATABLE_COLUMNS: [&str; 3] = ["title", "salary", "equity"];

#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct JobEntry {
    pub id: i32,
    pub title: String,
    pub salary: Option<i32>,
    pub equity: Option<BigDecimal>,
    pub company_handle: String,
}

/// A search result row, carrying the joined company name.
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct JobSummary {
    pub id: i32,
    pub title: String,
    pub salary: Option<i32>,
    pub equity: Option<BigDecimal>,
    pub company_handle: String,
    pub company_name: Option<String>,
}

/// A single job with its company nested in place of the handle.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JobDetail {
    pub id: i32,
    pub title: String,
    pub salary: Option<i32>,
    pub equity: Option<BigDecimal>,
    pub company: Option<CompanyEntry>,
}

impl JobDetail {
    pub fn new(job: JobEntry, company: Option<CompanyEntry>) -> Self {
        JobDetail {
            id: job.id,
            title: job.title,
            salary: job.salary,
            equity: job.equity,
            company,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct NewJob {
    #[validate(length(min = 1, message = "Field cannot be empty"))]
    pub title: String,
    #[validate(range(min = 0, message = "Salary cannot be negative"))]
    pub salary: Option<i32>,
    pub equity: Option<BigDecimal>,
    #[serde(alias = "company_handle")]
    #[validate(length(min = 1, max = 25, message = "Invalid company handle"))]
    pub company_handle: String,
}

impl NewJob {
    pub fn check(&self) -> Result<()> {
        self.validate()?;
        check_equity(self.equity.as_ref())
    }
}

/// Partial update payload. An absent field is left untouched; an explicit
/// `null` clears a nullable column.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct JobUpdate {
    #[serde(default, deserialize_with = "deserialize_nullable")]
    pub title: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_nullable")]
    pub salary: Option<Option<i32>>,
    #[serde(default, deserialize_with = "deserialize_nullable")]
    pub equity: Option<Option<BigDecimal>>,
}

impl JobUpdate {
    pub fn check(&self) -> Result<()> {
        match &self.title {
            Some(None) => return Err(Error::InvalidInput("title cannot be null".into())),
            Some(Some(title)) if title.is_empty() => {
                return Err(Error::InvalidInput("title: Field cannot be empty".into()))
            }
            _ => {}
        }
        if let Some(Some(salary)) = self.salary {
            if salary < 0 {
                return Err(Error::InvalidInput("salary: Salary cannot be negative".into()));
            }
        }
        check_equity(self.equity.as_ref().and_then(Option::as_ref))
    }

    pub fn fields(&self) -> Vec<(&'static str, SqlValue)> {
        let mut fields = Vec::new();
        if let Some(title) = &self.title {
            fields.push(("title", SqlValue::Text(title.clone())));
        }
        if let Some(salary) = self.salary {
            fields.push(("salary", SqlValue::Integer(salary)));
        }
        if let Some(equity) = &self.equity {
            fields.push(("equity", SqlValue::Decimal(equity.clone())));
        }
        fields
    }
}

/// Keeps a present `null` apart from a missing key: `Some(None)` vs `None`.
fn deserialize_nullable<'de, D, T>(
    deserializer: D,
) -> core::result::Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct JobSearch {
    #[validate(length(min = 1, message = "Field cannot be empty"))]
    pub title: Option<String>,
    #[validate(range(min = 0, message = "Salary cannot be negative"))]
    pub min_salary: Option<i32>,
    /// Only `true` narrows the search; anything else is ignored.
    #[serde(default, deserialize_with = "deserialize_flag")]
    pub has_equity: Option<bool>,
}

fn deserialize_flag<'de, D>(deserializer: D) -> core::result::Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flag {
        Bool(bool),
        Text(String),
    }

    Ok(match Option::<Flag>::deserialize(deserializer)? {
        Some(Flag::Bool(b)) => Some(b),
        Some(Flag::Text(s)) => Some(s == "true"),
        None => None,
    })
}

fn check_equity(equity: Option<&BigDecimal>) -> Result<()> {
    match equity {
        Some(e) if *e < BigDecimal::from(0) || *e > BigDecimal::from(1) => Err(
            Error::InvalidInput(format!("Equity must be between 0 and 1, got {}", e)),
        ),
        _ => Ok(()),
    }
}
