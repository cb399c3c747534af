/// Read-side filters over the roster.
#[derive(Debug, Clone, PartialEq)]
pub enum EmployeeQuery {
    All,
    Active,
    /// Case-insensitive exact match on department.
    Department(String),
    /// Case-insensitive substring match on first, last or full name.
    Name(String),
    /// Inclusive on both ends; empty when `min > max`.
    SalaryRange { min: f64, max: f64 },
}

/// Headline numbers used by the statistics report and the export trailer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RosterSummary {
    pub total: usize,
    pub active: usize,
    pub average_salary: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DepartmentStats {
    pub department: String,
    pub count: usize,
    pub average_salary: f64,
}
