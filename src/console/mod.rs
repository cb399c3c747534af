//! Line-oriented menu front end over a `RosterClient`.
//!
//! The console keeps no roster state of its own: every choice becomes one or
//! more client requests, and results are rendered through `report`.
//! End of input behaves like choosing Exit.

use std::path::PathBuf;
use std::str::FromStr;

use chrono::Local;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, instrument};

use crate::clients::RosterClient;
use crate::domain::{Employee, EmployeeCreate, EmployeeQuery};
use crate::error::{Result, RosterError};
use crate::report;

/// Whether the main loop keeps going after a handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Exit,
}

/// Unwraps a read, leaving the handler with `Flow::Exit` when input has ended.
macro_rules! or_exit {
    ($read:expr) => {
        match $read {
            Some(value) => value,
            None => return Ok(Flow::Exit),
        }
    };
}

pub struct Console<R, W> {
    client: RosterClient,
    input: R,
    output: W,
}

impl<R, W> Console<R, W>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    pub fn new(client: RosterClient, input: R, output: W) -> Self {
        Self { client, input, output }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Runs the menu loop until Exit or end of input. The roster is saved on the way out.
    #[instrument(name = "console", skip(self))]
    pub async fn run(&mut self) -> Result<()> {
        self.say("=== EMPLOYEE MANAGEMENT SYSTEM ===").await?;

        loop {
            self.display_menu().await?;
            let Some(choice) = self.read_number::<i64>("Enter your choice: ").await? else {
                break;
            };
            debug!(choice, "Menu choice");

            let flow = match choice {
                1 => self.add_employee().await?,
                2 => self.view_all_employees().await?,
                3 => self.view_employee().await?,
                4 => self.update_employee().await?,
                5 => self.delete_employee().await?,
                6 => self.search_employees().await?,
                7 => self.generate_reports().await?,
                8 => self.export_data().await?,
                9 => Flow::Exit,
                _ => {
                    self.say("Invalid choice! Please try again.").await?;
                    Flow::Continue
                }
            };
            if flow == Flow::Exit {
                break;
            }

            self.say("\nPress Enter to continue...").await?;
            if self.read_line().await?.is_none() {
                break;
            }
        }

        self.exit().await
    }

    async fn display_menu(&mut self) -> Result<()> {
        self.write_block(
            "\n=== MAIN MENU ===\n\
             1. Add New Employee\n\
             2. View All Employees\n\
             3. View Employee Details\n\
             4. Update Employee\n\
             5. Delete Employee\n\
             6. Search Employees\n\
             7. Generate Reports\n\
             8. Export Data\n\
             9. Exit\n\
             =================\n",
        )
        .await
    }

    async fn exit(&mut self) -> Result<()> {
        self.say("Saving data and exiting...").await?;
        if let Err(e) = self.client.save().await {
            if let RosterError::ActorCommunication(_) = e {
                return Err(e);
            }
            self.say(&format!("Error saving employee data: {}", e)).await?;
        }
        self.say("Thank you for using Employee Management System!").await
    }

    // --- Menu handlers ---

    async fn add_employee(&mut self) -> Result<Flow> {
        self.say("\n=== ADD NEW EMPLOYEE ===").await?;
        let first_name = or_exit!(self.read_string("First Name: ").await?);
        let last_name = or_exit!(self.read_string("Last Name: ").await?);
        let email = or_exit!(self.read_string("Email: ").await?);
        let department = or_exit!(self.read_string("Department: ").await?);
        let position = or_exit!(self.read_string("Position: ").await?);
        let salary = or_exit!(self.read_amount("Salary: ").await?);
        let phone_number = or_exit!(self.read_string("Phone Number: ").await?);
        let address = or_exit!(self.read_string("Address: ").await?);

        let employee = EmployeeCreate {
            first_name,
            last_name,
            email,
            department,
            position,
            salary,
            hire_date: Local::now().date_naive(),
            phone_number,
            address,
        };

        let created = self.client.create_employee(employee).await.map(|_| ());
        if succeeded(created)? {
            self.say("Employee added successfully!").await?;
        } else {
            self.say("Failed to add employee. Employee ID might already exist.").await?;
        }
        Ok(Flow::Continue)
    }

    async fn view_all_employees(&mut self) -> Result<Flow> {
        self.say("\n=== ALL EMPLOYEES ===").await?;
        let employees = self.client.list_all().await?;
        if employees.is_empty() {
            self.say("No employees found.").await?;
            return Ok(Flow::Continue);
        }

        self.write_block(&report::employee_table(&employees)).await?;
        self.say(&format!("\nTotal employees: {}", employees.len())).await?;
        Ok(Flow::Continue)
    }

    async fn view_employee(&mut self) -> Result<Flow> {
        let raw = or_exit!(self.read_number::<i64>("Enter Employee ID: ").await?);
        match self.lookup(raw).await? {
            Some(employee) => {
                self.say("\n=== EMPLOYEE DETAILS ===").await?;
                let details = report::employee_details(&employee, Local::now().date_naive());
                self.write_block(&details).await?;
            }
            None => self.say(&format!("Employee not found with ID: {}", raw)).await?,
        }
        Ok(Flow::Continue)
    }

    async fn update_employee(&mut self) -> Result<Flow> {
        let raw = or_exit!(self.read_number::<i64>("Enter Employee ID to update: ").await?);
        let Some(mut employee) = self.lookup(raw).await? else {
            self.say(&format!("Employee not found with ID: {}", raw)).await?;
            return Ok(Flow::Continue);
        };

        self.say("\nCurrent details:").await?;
        self.say(&employee.to_string()).await?;
        self.say("\nEnter new details (press Enter to keep current value):").await?;

        // Blank answers keep the current value; setters drop invalid ones.
        let value = or_exit!(self.ask_field("First Name", employee.first_name()).await?);
        if !value.is_empty() {
            employee.set_first_name(value);
        }
        let value = or_exit!(self.ask_field("Last Name", employee.last_name()).await?);
        if !value.is_empty() {
            employee.set_last_name(value);
        }
        let value = or_exit!(self.ask_field("Email", employee.email()).await?);
        if !value.is_empty() {
            employee.set_email(value);
        }
        let value = or_exit!(self.ask_field("Department", employee.department()).await?);
        if !value.is_empty() {
            employee.set_department(value);
        }
        let value = or_exit!(self.ask_field("Position", employee.position()).await?);
        if !value.is_empty() {
            employee.set_position(value);
        }
        let current_salary = format!("{:?}", employee.salary());
        let value = or_exit!(self.ask_field("Salary", &current_salary).await?);
        if let Ok(salary) = value.parse::<f64>() {
            employee.set_salary(salary);
        }
        let value = or_exit!(self.ask_field("Phone", employee.phone_number()).await?);
        if !value.is_empty() {
            employee.set_phone_number(value);
        }
        let value = or_exit!(self.ask_field("Address", employee.address()).await?);
        if !value.is_empty() {
            employee.set_address(value);
        }

        if succeeded(self.client.update_employee(employee).await)? {
            self.say("Employee updated successfully!").await?;
        } else {
            self.say("Failed to update employee.").await?;
        }
        Ok(Flow::Continue)
    }

    async fn delete_employee(&mut self) -> Result<Flow> {
        self.write_block(
            "\n=== DELETE EMPLOYEE ===\n\
             1. Deactivate Employee (Soft Delete)\n\
             2. Permanently Delete Employee\n\
             3. Activate Employee\n",
        )
        .await?;
        let choice = or_exit!(self.read_number::<i64>("Enter choice: ").await?);
        let raw = or_exit!(self.read_number::<i64>("Enter Employee ID: ").await?);

        let result = match (choice, to_id(raw)) {
            (1..=3, None) => Err(RosterError::NotFound(0)),
            (1, Some(id)) => self.client.deactivate_employee(id).await,
            (2, Some(id)) => self.client.delete_employee(id).await,
            (3, Some(id)) => self.client.activate_employee(id).await,
            _ => {
                self.say("Invalid choice!").await?;
                return Ok(Flow::Continue);
            }
        };

        if succeeded(result)? {
            self.say("Operation completed successfully!").await?;
        } else {
            self.say("Operation failed. Employee might not exist.").await?;
        }
        Ok(Flow::Continue)
    }

    async fn search_employees(&mut self) -> Result<Flow> {
        self.write_block(
            "\n=== SEARCH EMPLOYEES ===\n\
             1. Search by Name\n\
             2. Search by Department\n\
             3. Search by Salary Range\n",
        )
        .await?;
        let choice = or_exit!(self.read_number::<i64>("Enter choice: ").await?);

        let query = match choice {
            1 => EmployeeQuery::Name(or_exit!(self.read_string("Enter name to search: ").await?)),
            2 => EmployeeQuery::Department(or_exit!(self.read_string("Enter department: ").await?)),
            3 => {
                let min = or_exit!(self.read_number::<f64>("Enter minimum salary: ").await?);
                let max = or_exit!(self.read_number::<f64>("Enter maximum salary: ").await?);
                EmployeeQuery::SalaryRange { min, max }
            }
            _ => {
                self.say("Invalid choice!").await?;
                return Ok(Flow::Continue);
            }
        };

        let results = self.client.list_employees(query).await?;
        if results.is_empty() {
            self.say("No employees found.").await?;
            return Ok(Flow::Continue);
        }

        self.say("\nSearch Results:").await?;
        self.write_block(&report::search_table(&results)).await?;
        self.say(&format!("Found {} employee(s).", results.len())).await?;
        Ok(Flow::Continue)
    }

    async fn generate_reports(&mut self) -> Result<Flow> {
        self.write_block(
            "\n=== REPORTS ===\n\
             1. Department Statistics\n\
             2. Salary Report\n\
             3. Employee Statistics\n",
        )
        .await?;
        let choice = or_exit!(self.read_number::<i64>("Enter choice: ").await?);

        match choice {
            1 => {
                self.say("\n=== DEPARTMENT STATISTICS ===").await?;
                let departments = self.client.department_report().await?;
                self.write_block(&report::department_statistics(&departments)).await?;
            }
            2 => {
                self.say("\n=== SALARY REPORT ===").await?;
                if let Some(top) = self.client.highest_paid().await? {
                    let line = format!("Highest Paid: {} - ${:.2}", top.full_name(), top.salary());
                    self.say(&line).await?;
                }
                let summary = self.client.summary().await?;
                self.say(&format!("Average Salary: ${:.2}", summary.average_salary)).await?;
            }
            3 => {
                self.say("\n=== EMPLOYEE STATISTICS ===").await?;
                let summary = self.client.summary().await?;
                self.say(&format!("Total Employees: {}", summary.total)).await?;
                self.say(&format!("Active Employees: {}", summary.active)).await?;
                self.say(&format!("Average Salary: ${:.2}", summary.average_salary)).await?;
                if let Some(veteran) = self.client.longest_serving().await? {
                    let line = format!(
                        "Longest Serving: {} - {} years",
                        veteran.full_name(),
                        veteran.years_of_service()
                    );
                    self.say(&line).await?;
                }
            }
            _ => self.say("Invalid choice!").await?,
        }
        Ok(Flow::Continue)
    }

    async fn export_data(&mut self) -> Result<Flow> {
        let filename = or_exit!(
            self.read_string("Enter filename for export (e.g., employees.txt): ").await?
        );

        match self.client.export(PathBuf::from(&filename)).await {
            Ok(()) => self.say(&format!("Data exported to {} successfully.", filename)).await?,
            Err(e @ RosterError::ActorCommunication(_)) => return Err(e),
            Err(e) => self.say(&format!("Error exporting data: {}", e)).await?,
        }
        Ok(Flow::Continue)
    }

    /// A number that can be stored as a salary: infinities and NaN are re-prompted.
    async fn read_amount(&mut self, prompt: &str) -> Result<Option<f64>> {
        loop {
            let Some(amount) = self.read_number::<f64>(prompt).await? else {
                return Ok(None);
            };
            if amount.is_finite() {
                return Ok(Some(amount));
            }
            self.say("Please enter a valid number.").await?;
        }
    }

    // --- Lookups ---

    async fn lookup(&mut self, raw: i64) -> Result<Option<Employee>> {
        match to_id(raw) {
            Some(id) => self.client.get_employee(id).await,
            None => Ok(None),
        }
    }

    // --- Input and output ---

    async fn write_block(&mut self, text: &str) -> Result<()> {
        self.output.write_all(text.as_bytes()).await?;
        self.output.flush().await?;
        Ok(())
    }

    async fn say(&mut self, line: &str) -> Result<()> {
        self.output.write_all(line.as_bytes()).await?;
        self.output.write_all(b"\n").await?;
        self.output.flush().await?;
        Ok(())
    }

    /// One trimmed line, or `None` at end of input.
    async fn read_line(&mut self) -> Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line).await? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    async fn read_string(&mut self, prompt: &str) -> Result<Option<String>> {
        self.write_block(prompt).await?;
        self.read_line().await
    }

    async fn ask_field(&mut self, label: &str, current: &str) -> Result<Option<String>> {
        self.read_string(&format!("{} [{}]: ", label, current)).await
    }

    /// Re-prompts until the line parses; `None` only at end of input.
    async fn read_number<T: FromStr>(&mut self, prompt: &str) -> Result<Option<T>> {
        loop {
            let Some(line) = self.read_string(prompt).await? else {
                return Ok(None);
            };
            match line.parse::<T>() {
                Ok(value) => return Ok(Some(value)),
                Err(_) => self.say("Please enter a valid number.").await?,
            }
        }
    }
}

/// Ids are positive; anything else can never match a record.
fn to_id(raw: i64) -> Option<u32> {
    u32::try_from(raw).ok().filter(|id| *id > 0)
}

/// Collapses "not found" and "already exists" into a plain failure.
/// Losing the service itself is still an error.
fn succeeded(result: Result<()>) -> Result<bool> {
    match result {
        Ok(()) => Ok(true),
        Err(e @ RosterError::ActorCommunication(_)) => Err(e),
        Err(e) => {
            debug!(error = %e, "Operation rejected");
            Ok(false)
        }
    }
}
