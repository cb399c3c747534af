use std::collections::BTreeMap;
use std::path::PathBuf;

use tokio::sync::{mpsc, oneshot};
use tracing::{debug, instrument};

use crate::domain::{DepartmentStats, Employee, EmployeeCreate, EmployeeQuery, RosterSummary};
use crate::error::RosterError;
use crate::messages::RosterRequest;

/// Generate client methods with oneshot channel boilerplate and automatic tracing.
macro_rules! client_method {
    ($client:ty => fn $method:ident($($param:ident: $param_type:ty),*) -> $return_type:ty as $request:ident::$variant:ident) => {
        impl $client {
            #[instrument(skip(self))]
            pub async fn $method(&self, $($param: $param_type),*) -> Result<$return_type, RosterError> {
                debug!("Sending request");
                let (respond_to, response) = oneshot::channel();
                self.sender.send($request::$variant {
                    $($param,)*
                    respond_to,
                }).await.map_err(|_| RosterError::ActorCommunication("Actor closed".to_string()))?;

                response.await.map_err(|_| RosterError::ActorCommunication("Actor dropped".to_string()))?
            }
        }
    };
}

/// Client for the roster service. Thin wrapper around the mailbox sender.
#[derive(Clone)]
pub struct RosterClient {
    sender: mpsc::Sender<RosterRequest>,
}

impl RosterClient {
    pub fn new(sender: mpsc::Sender<RosterRequest>) -> Self {
        Self { sender }
    }

    /// No response needed; the service exits its loop.
    #[instrument(skip(self))]
    pub async fn shutdown(&self) -> Result<(), RosterError> {
        debug!("Sending shutdown request");
        self.sender
            .send(RosterRequest::Shutdown)
            .await
            .map_err(|_| RosterError::ActorCommunication("Actor closed".to_string()))
    }

    pub async fn list_all(&self) -> Result<Vec<Employee>, RosterError> {
        self.list_employees(EmployeeQuery::All).await
    }
}

client_method!(RosterClient => fn create_employee(employee: EmployeeCreate) -> u32 as RosterRequest::CreateEmployee);
client_method!(RosterClient => fn insert_employee(employee: Employee) -> u32 as RosterRequest::InsertEmployee);
client_method!(RosterClient => fn get_employee(id: u32) -> Option<Employee> as RosterRequest::GetEmployee);
client_method!(RosterClient => fn list_employees(query: EmployeeQuery) -> Vec<Employee> as RosterRequest::ListEmployees);
client_method!(RosterClient => fn update_employee(employee: Employee) -> () as RosterRequest::UpdateEmployee);
client_method!(RosterClient => fn update_salary(id: u32, salary: f64) -> () as RosterRequest::UpdateSalary);
client_method!(RosterClient => fn update_department(id: u32, department: String) -> () as RosterRequest::UpdateDepartment);
client_method!(RosterClient => fn update_position(id: u32, position: String) -> () as RosterRequest::UpdatePosition);
client_method!(RosterClient => fn apply_raise(id: u32, percentage: f64) -> () as RosterRequest::ApplyRaise);
client_method!(RosterClient => fn delete_employee(id: u32) -> () as RosterRequest::DeleteEmployee);
client_method!(RosterClient => fn deactivate_employee(id: u32) -> () as RosterRequest::DeactivateEmployee);
client_method!(RosterClient => fn activate_employee(id: u32) -> () as RosterRequest::ActivateEmployee);
client_method!(RosterClient => fn department_counts() -> BTreeMap<String, usize> as RosterRequest::DepartmentCounts);
client_method!(RosterClient => fn department_report() -> Vec<DepartmentStats> as RosterRequest::DepartmentReport);
client_method!(RosterClient => fn average_salary_by_department(department: String) -> f64 as RosterRequest::AverageSalaryByDepartment);
client_method!(RosterClient => fn summary() -> RosterSummary as RosterRequest::Summary);
client_method!(RosterClient => fn highest_paid() -> Option<Employee> as RosterRequest::HighestPaid);
client_method!(RosterClient => fn longest_serving() -> Option<Employee> as RosterRequest::LongestServing);
client_method!(RosterClient => fn export(path: PathBuf) -> () as RosterRequest::Export);
client_method!(RosterClient => fn save() -> () as RosterRequest::Save);
