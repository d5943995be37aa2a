use crate::pkg::internal::{
    adaptors::jobs::spec::JobSearch,
    sql::{FilterBuilder, Statement},
};

const BASE_QUERY: &str = "SELECT j.id, j.title, j.salary, j.equity, j.company_handle, \
     c.name AS company_name \
     FROM jobs j LEFT JOIN companies AS c ON c.handle = j.company_handle";

impl JobSearch {
    /// Search statement over jobs joined with their company name, sorted by title.
    pub fn statement(&self) -> Statement {
        let mut filters = FilterBuilder::new();
        if let Some(min_salary) = self.min_salary {
            filters.bound(min_salary, |n| format!("salary >= ${}", n));
        }
        if self.has_equity == Some(true) {
            filters.raw("equity > 0");
        }
        if let Some(title) = &self.title {
            filters.bound(format!("%{}%", title), |n| format!("title ILIKE ${}", n));
        }
        filters.finish(BASE_QUERY, "title")
    }
}
