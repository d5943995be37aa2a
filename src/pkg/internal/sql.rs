use std::collections::{HashMap, HashSet};

use sqlx::{
    postgres::{PgArguments, PgRow},
    query::QueryAs,
    types::BigDecimal,
    FromRow, Postgres,
};

use crate::prelude::{Error, Result};

/// A value bound to a `$n` placeholder.
///
/// Nulls keep their type so Postgres can match the parameter against the
/// column it is compared with or assigned to.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Integer(Option<i32>),
    Text(Option<String>),
    Decimal(Option<BigDecimal>),
}

impl SqlValue {
    fn bind<'q, O>(
        &self,
        query: QueryAs<'q, Postgres, O, PgArguments>,
    ) -> QueryAs<'q, Postgres, O, PgArguments> {
        match self {
            SqlValue::Integer(v) => query.bind(*v),
            SqlValue::Text(v) => query.bind(v.clone()),
            SqlValue::Decimal(v) => query.bind(v.clone()),
        }
    }
}

impl From<i32> for SqlValue {
    fn from(v: i32) -> Self {
        SqlValue::Integer(Some(v))
    }
}

impl From<String> for SqlValue {
    fn from(v: String) -> Self {
        SqlValue::Text(Some(v))
    }
}

impl From<&str> for SqlValue {
    fn from(v: &str) -> Self {
        SqlValue::Text(Some(v.to_string()))
    }
}

impl From<BigDecimal> for SqlValue {
    fn from(v: BigDecimal) -> Self {
        SqlValue::Decimal(Some(v))
    }
}

/// Statement text plus the values for its placeholders, in `$1..$n` order.
#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    pub sql: String,
    pub values: Vec<SqlValue>,
}

impl Statement {
    pub fn query_as<O>(&self) -> QueryAs<'_, Postgres, O, PgArguments>
    where
        O: for<'r> FromRow<'r, PgRow>,
    {
        self.values
            .iter()
            .fold(sqlx::query_as::<Postgres, O>(&self.sql), |q, v| v.bind(q))
    }
}

/// Translation from application field names to storage columns.
///
/// Only columns in the allow-list may end up in statement text; a field with
/// no rename is taken as the column name itself.
#[derive(Debug, Clone, Default)]
pub struct ColumnMap {
    renames: HashMap<String, String>,
    allowed: HashSet<String>,
}

impl ColumnMap {
    pub fn identity<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ColumnMap {
            renames: HashMap::new(),
            allowed: columns.into_iter().map(Into::into).collect(),
        }
    }

    pub fn rename(mut self, field: impl Into<String>, column: impl Into<String>) -> Self {
        let column = column.into();
        self.allowed.insert(column.clone());
        self.renames.insert(field.into(), column);
        self
    }

    pub fn resolve<'a>(&'a self, field: &'a str) -> Result<&'a str> {
        let column = self.renames.get(field).map(String::as_str).unwrap_or(field);
        if self.allowed.contains(column) {
            Ok(column)
        } else {
            Err(Error::InvalidInput(format!("Unknown field: {}", field)))
        }
    }
}

/// Builds the body of a partial `UPDATE ... SET`.
///
/// `{title: "x", salary: 5}` becomes `"title"=$1, "salary"=$2` with values
/// `["x", 5]`. Fields keep their input order.
pub fn build_set_clause<K: AsRef<str>>(
    fields: Vec<(K, SqlValue)>,
    columns: &ColumnMap,
) -> Result<(String, Vec<SqlValue>)> {
    if fields.is_empty() {
        return Err(Error::InvalidInput("No data".into()));
    }
    let mut cols = Vec::with_capacity(fields.len());
    let mut values = Vec::with_capacity(fields.len());
    for (idx, (field, value)) in fields.into_iter().enumerate() {
        let column = columns.resolve(field.as_ref())?;
        cols.push(format!("\"{}\"=${}", column, idx + 1));
        values.push(value);
    }
    Ok((cols.join(", "), values))
}

/// Accumulates `WHERE` expressions and their bound values side by side.
#[derive(Debug, Default)]
pub struct FilterBuilder {
    expressions: Vec<String>,
    values: Vec<SqlValue>,
}

impl FilterBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds `value` and adds the expression rendered with its placeholder index.
    pub fn bound(
        &mut self,
        value: impl Into<SqlValue>,
        render: impl FnOnce(usize) -> String,
    ) -> &mut Self {
        self.values.push(value.into());
        self.expressions.push(render(self.values.len()));
        self
    }

    pub fn raw(&mut self, expression: impl Into<String>) -> &mut Self {
        self.expressions.push(expression.into());
        self
    }

    pub fn finish(self, base: &str, order_by: &str) -> Statement {
        let mut sql = base.to_string();
        if !self.expressions.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&self.expressions.join(" AND "));
        }
        sql.push_str(" ORDER BY ");
        sql.push_str(order_by);
        Statement {
            sql,
            values: self.values,
        }
    }
}
