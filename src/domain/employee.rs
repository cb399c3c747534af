use std::fmt;
use std::hash::{Hash, Hasher};

use chrono::{Datelike, Local, NaiveDate};
use serde::{Deserialize, Serialize};

/// Represents one employee on the roster.
///
/// Setters never fail: an invalid value (blank text, an email without `@`,
/// a negative or non-finite salary) is dropped and the field keeps its previous value.
/// Equality and hashing only look at `id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Employee {
    id: u32,
    first_name: String,
    last_name: String,
    email: String,
    department: String,
    position: String,
    salary: f64,
    hire_date: NaiveDate,
    phone_number: String,
    address: String,
    active: bool,
}

/// Payload for creating a new employee. The id is assigned by the store.
#[derive(Debug, Clone)]
pub struct EmployeeCreate {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub department: String,
    pub position: String,
    pub salary: f64,
    pub hire_date: NaiveDate,
    pub phone_number: String,
    pub address: String,
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

impl Employee {
    /// Builds an active employee from a creation payload.
    pub fn from_create(id: u32, params: EmployeeCreate) -> Self {
        Self {
            id,
            first_name: params.first_name,
            last_name: params.last_name,
            email: params.email,
            department: params.department,
            position: params.position,
            salary: params.salary,
            hire_date: params.hire_date,
            phone_number: params.phone_number,
            address: params.address,
            active: true,
        }
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn department(&self) -> &str {
        &self.department
    }

    pub fn position(&self) -> &str {
        &self.position
    }

    pub fn salary(&self) -> f64 {
        self.salary
    }

    pub fn hire_date(&self) -> NaiveDate {
        self.hire_date
    }

    pub fn phone_number(&self) -> &str {
        &self.phone_number
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn set_first_name(&mut self, value: impl Into<String>) {
        let value = value.into();
        if !is_blank(&value) {
            self.first_name = value;
        }
    }

    pub fn set_last_name(&mut self, value: impl Into<String>) {
        let value = value.into();
        if !is_blank(&value) {
            self.last_name = value;
        }
    }

    pub fn set_email(&mut self, value: impl Into<String>) {
        let value = value.into();
        if value.contains('@') {
            self.email = value;
        }
    }

    pub fn set_department(&mut self, value: impl Into<String>) {
        let value = value.into();
        if !is_blank(&value) {
            self.department = value;
        }
    }

    pub fn set_position(&mut self, value: impl Into<String>) {
        let value = value.into();
        if !is_blank(&value) {
            self.position = value;
        }
    }

    pub fn set_salary(&mut self, salary: f64) {
        if salary.is_finite() && salary >= 0.0 {
            self.salary = salary;
        }
    }

    pub fn set_phone_number(&mut self, value: impl Into<String>) {
        let value = value.into();
        if !is_blank(&value) {
            self.phone_number = value;
        }
    }

    pub fn set_address(&mut self, value: impl Into<String>) {
        let value = value.into();
        if !is_blank(&value) {
            self.address = value;
        }
    }

    pub fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    /// Store-only: replaces an unassigned id.
    pub(crate) fn assign_id(&mut self, id: u32) {
        self.id = id;
    }

    /// Raises the salary by `percentage` percent. Non-positive percentages are a no-op,
    /// and so is a raise that would overflow to infinity.
    pub fn apply_raise(&mut self, percentage: f64) {
        if percentage > 0.0 {
            let raised = self.salary * (1.0 + percentage / 100.0);
            if raised.is_finite() {
                self.salary = raised;
            }
        }
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Whole years between the hire date and today.
    pub fn years_of_service(&self) -> u32 {
        self.years_of_service_at(Local::now().date_naive())
    }

    /// Whole years between the hire date and `today`; zero for future hire dates.
    pub fn years_of_service_at(&self, today: NaiveDate) -> u32 {
        let hired = self.hire_date;
        let mut years = today.year() - hired.year();
        if (today.month(), today.day()) < (hired.month(), hired.day()) {
            years -= 1;
        }
        years.max(0) as u32
    }

    pub fn status_label(&self) -> &'static str {
        if self.active { "Active" } else { "Inactive" }
    }
}

impl PartialEq for Employee {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Employee {}

impl Hash for Employee {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for Employee {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ID: {} | Name: {} {} | Dept: {:<15} | Position: {:<15} | Salary: ${} | Status: {}",
            self.id,
            self.first_name,
            self.last_name,
            self.department,
            self.position,
            group_thousands(self.salary),
            self.status_label()
        )
    }
}

/// Formats `amount` with two decimals and comma-separated thousands.
pub fn group_thousands(amount: f64) -> String {
    let fixed = format!("{:.2}", amount.abs());
    let (whole, fraction) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if amount < 0.0 { "-" } else { "" };
    format!("{sign}{grouped}.{fraction}")
}

#[cfg(test)]
pub(crate) fn sample(first: &str, last: &str, department: &str, salary: f64) -> EmployeeCreate {
    EmployeeCreate {
        first_name: first.to_string(),
        last_name: last.to_string(),
        email: format!("{}@example.com", first.to_lowercase()),
        department: department.to_string(),
        position: "Engineer".to_string(),
        salary,
        hire_date: NaiveDate::from_ymd_opt(2020, 3, 15).unwrap(),
        phone_number: "555-0100".to_string(),
        address: "1 Main St".to_string(),
    }
}
