use tokio::sync::mpsc;
use tracing::{debug, error, info, instrument};

use crate::clients::RosterClient;
use crate::domain::{Employee, EmployeeCreate, EmployeeQuery};
use crate::error::{Result, RosterError};
use crate::messages::{RosterRequest, ServiceResponse};
use crate::report;
use crate::store::EmployeeStore;

/// Owns the `EmployeeStore`. Requests are handled one at a time, so each
/// store operation, including its snapshot write, runs without interleaving.
pub struct RosterService {
    receiver: mpsc::Receiver<RosterRequest>,
    store: EmployeeStore,
}

impl RosterService {
    pub fn new(buffer_size: usize, store: EmployeeStore) -> (Self, RosterClient) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let service = Self { receiver, store };
        let client = RosterClient::new(sender);
        (service, client)
    }

    #[instrument(name = "roster_service", skip(self))]
    pub async fn run(mut self) {
        info!(employee_count = self.store.count(), "RosterService starting");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                RosterRequest::CreateEmployee { employee, respond_to } => {
                    self.handle_create_employee(employee, respond_to);
                }
                RosterRequest::InsertEmployee { employee, respond_to } => {
                    self.handle_insert_employee(employee, respond_to);
                }
                RosterRequest::GetEmployee { id, respond_to } => {
                    self.handle_get_employee(id, respond_to);
                }
                RosterRequest::ListEmployees { query, respond_to } => {
                    self.handle_list_employees(query, respond_to);
                }
                RosterRequest::UpdateEmployee { employee, respond_to } => {
                    self.handle_update_employee(employee, respond_to);
                }
                RosterRequest::UpdateSalary { id, salary, respond_to } => {
                    let _ = respond_to.send(self.store.update_salary(id, salary));
                }
                RosterRequest::UpdateDepartment { id, department, respond_to } => {
                    let _ = respond_to.send(self.store.update_department(id, &department));
                }
                RosterRequest::UpdatePosition { id, position, respond_to } => {
                    let _ = respond_to.send(self.store.update_position(id, &position));
                }
                RosterRequest::ApplyRaise { id, percentage, respond_to } => {
                    self.handle_apply_raise(id, percentage, respond_to);
                }
                RosterRequest::DeleteEmployee { id, respond_to } => {
                    let _ = respond_to.send(self.store.delete(id));
                }
                RosterRequest::DeactivateEmployee { id, respond_to } => {
                    let _ = respond_to.send(self.store.deactivate(id));
                }
                RosterRequest::ActivateEmployee { id, respond_to } => {
                    let _ = respond_to.send(self.store.activate(id));
                }
                RosterRequest::DepartmentCounts { respond_to } => {
                    let _ = respond_to.send(Ok(self.store.department_counts()));
                }
                RosterRequest::DepartmentReport { respond_to } => {
                    let _ = respond_to.send(Ok(self.store.department_report()));
                }
                RosterRequest::AverageSalaryByDepartment { department, respond_to } => {
                    let _ = respond_to.send(Ok(self.store.average_salary_by_department(&department)));
                }
                RosterRequest::Summary { respond_to } => {
                    let _ = respond_to.send(Ok(self.store.summary()));
                }
                RosterRequest::HighestPaid { respond_to } => {
                    let _ = respond_to.send(Ok(self.store.highest_paid()));
                }
                RosterRequest::LongestServing { respond_to } => {
                    let _ = respond_to.send(Ok(self.store.longest_serving()));
                }
                RosterRequest::Export { path, respond_to } => {
                    let result = report::write_export(&path, &self.store.get_all(), &self.store.summary());
                    if let Err(e) = &result {
                        error!(path = %path.display(), error = %e, "Error exporting data");
                    }
                    let _ = respond_to.send(result);
                }
                RosterRequest::Save { respond_to } => {
                    self.handle_save(respond_to);
                }
                RosterRequest::Shutdown => {
                    info!("RosterService shutting down");
                    break;
                }
            }
        }

        info!("RosterService stopped");
    }

    #[instrument(
        fields(first_name = %employee.first_name, department = %employee.department),
        skip(self, employee, respond_to)
    )]
    fn handle_create_employee(&mut self, employee: EmployeeCreate, respond_to: ServiceResponse<u32, RosterError>) {
        debug!("Processing create_employee request");
        let _ = respond_to.send(self.store.create(employee));
    }

    #[instrument(fields(employee_id = employee.id()), skip(self, employee, respond_to))]
    fn handle_insert_employee(&mut self, employee: Employee, respond_to: ServiceResponse<u32, RosterError>) {
        debug!("Processing insert_employee request");
        let result = self.store.create_with_id(employee);
        if let Err(e) = &result {
            error!(error = %e, "Insert rejected");
        }
        let _ = respond_to.send(result);
    }

    #[instrument(fields(employee_id = id), skip(self, respond_to))]
    fn handle_get_employee(&self, id: u32, respond_to: ServiceResponse<Option<Employee>, RosterError>) {
        debug!("Processing get_employee request");

        let employee = self.store.get(id);
        match &employee {
            Some(employee) => debug!(employee_name = %employee.full_name(), "Employee found"),
            None => debug!("Employee not found"),
        }

        let _ = respond_to.send(Ok(employee));
    }

    #[instrument(skip(self, respond_to))]
    fn handle_list_employees(&self, query: EmployeeQuery, respond_to: ServiceResponse<Vec<Employee>, RosterError>) {
        let employees = self.store.query(&query);
        debug!(employee_count = employees.len(), "Listed employees");
        let _ = respond_to.send(Ok(employees));
    }

    #[instrument(fields(employee_id = employee.id()), skip(self, employee, respond_to))]
    fn handle_update_employee(&mut self, employee: Employee, respond_to: ServiceResponse<(), RosterError>) {
        debug!("Processing update_employee request");
        let result = self.store.update(employee);
        if result.is_err() {
            error!("Employee not found for update");
        }
        let _ = respond_to.send(result);
    }

    #[instrument(fields(employee_id = id), skip(self, respond_to))]
    fn handle_apply_raise(&mut self, id: u32, percentage: f64, respond_to: ServiceResponse<(), RosterError>) {
        debug!("Processing apply_raise request");
        let _ = respond_to.send(self.store.apply_raise(id, percentage));
    }

    fn handle_save(&self, respond_to: ServiceResponse<(), RosterError>) {
        let result: Result<()> = self.store.save();
        if let Err(e) = &result {
            error!(error = %e, "Error saving employee data");
        }
        let _ = respond_to.send(result);
    }
}
