//! Fixed-width text rendering of employees and aggregates.

use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use chrono::{Local, NaiveDate, NaiveDateTime};
use tracing::info;

use crate::domain::{DepartmentStats, Employee, RosterSummary};
use crate::error::Result;

const WIDE_RULE: usize = 80;

fn table_header() -> String {
    format!(
        "{:<5} {:<20} {:<15} {:<15} {:<10} {:<12}",
        "ID", "Name", "Department", "Position", "Salary", "Status"
    )
}

fn table_row(employee: &Employee) -> String {
    format!(
        "{:<5} {:<20} {:<15} {:<15} ${:<9.2} {:<12}",
        employee.id(),
        employee.full_name(),
        employee.department(),
        employee.position(),
        employee.salary(),
        employee.status_label()
    )
}

/// Full listing: header, an 82-dash rule, one row per employee.
pub fn employee_table(employees: &[Employee]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", table_header());
    let _ = writeln!(out, "{}", "-".repeat(82));
    for employee in employees {
        let _ = writeln!(out, "{}", table_row(employee));
    }
    out
}

/// Search listing without the status column.
pub fn search_table(employees: &[Employee]) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<5} {:<20} {:<15} {:<15} {:<10}",
        "ID", "Name", "Department", "Position", "Salary"
    );
    let _ = writeln!(out, "{}", "-".repeat(70));
    for e in employees {
        let _ = writeln!(
            out,
            "{:<5} {:<20} {:<15} {:<15} ${:<9.2}",
            e.id(),
            e.full_name(),
            e.department(),
            e.position(),
            e.salary()
        );
    }
    out
}

pub fn employee_details(employee: &Employee, today: NaiveDate) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "ID: {}", employee.id());
    let _ = writeln!(out, "Name: {}", employee.full_name());
    let _ = writeln!(out, "Email: {}", employee.email());
    let _ = writeln!(out, "Department: {}", employee.department());
    let _ = writeln!(out, "Position: {}", employee.position());
    let _ = writeln!(out, "Salary: ${:.2}", employee.salary());
    let _ = writeln!(out, "Hire Date: {}", employee.hire_date());
    let _ = writeln!(out, "Years of Service: {}", employee.years_of_service_at(today));
    let _ = writeln!(out, "Phone: {}", employee.phone_number());
    let _ = writeln!(out, "Address: {}", employee.address());
    let _ = writeln!(out, "Status: {}", employee.status_label());
    out
}

pub fn department_statistics(departments: &[DepartmentStats]) -> String {
    let mut out = String::new();
    for stats in departments {
        let _ = writeln!(
            out,
            "{:<20}: {} employees (Avg Salary: ${:.2})",
            stats.department, stats.count, stats.average_salary
        );
    }
    out
}

/// The export document: timestamped header, full table, summary trailer.
pub fn export_report(
    employees: &[Employee],
    summary: &RosterSummary,
    generated_at: NaiveDateTime,
) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Employee Report - Generated on: {}",
        generated_at.format("%Y-%m-%dT%H:%M:%S")
    );
    let _ = writeln!(out, "{}", "=".repeat(WIDE_RULE));
    let _ = writeln!(out, "{}", table_header());
    let _ = writeln!(out, "{}", "-".repeat(WIDE_RULE));
    for employee in employees {
        let _ = writeln!(out, "{}", table_row(employee));
    }
    let _ = writeln!(out, "{}", "=".repeat(WIDE_RULE));
    let _ = writeln!(
        out,
        "Total Employees: {} | Active: {} | Average Salary: ${:.2}",
        summary.total, summary.active, summary.average_salary
    );
    out
}

pub fn write_export(path: &Path, employees: &[Employee], summary: &RosterSummary) -> Result<()> {
    let report = export_report(employees, summary, Local::now().naive_local());
    fs::write(path, report)?;
    info!(path = %path.display(), count = employees.len(), "Report exported");
    Ok(())
}
