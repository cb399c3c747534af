use std::collections::BTreeMap;
use std::path::PathBuf;

use tokio::sync::oneshot;

use crate::domain::{DepartmentStats, Employee, EmployeeCreate, EmployeeQuery, RosterSummary};
use crate::error::RosterError;

/// Generic type aliases for service communication
pub type ServiceResult<T, E> = std::result::Result<T, E>;
pub type ServiceResponse<T, E> = oneshot::Sender<ServiceResult<T, E>>;

type Reply<T> = ServiceResponse<T, RosterError>;

/// Typed messages for the roster service. Each variant carries its parameters
/// and a oneshot channel for the response.
#[derive(Debug)]
pub enum RosterRequest {
    CreateEmployee {
        employee: EmployeeCreate,
        respond_to: Reply<u32>,
    },
    InsertEmployee {
        employee: Employee,
        respond_to: Reply<u32>,
    },
    GetEmployee {
        id: u32,
        respond_to: Reply<Option<Employee>>,
    },
    ListEmployees {
        query: EmployeeQuery,
        respond_to: Reply<Vec<Employee>>,
    },
    UpdateEmployee {
        employee: Employee,
        respond_to: Reply<()>,
    },
    UpdateSalary {
        id: u32,
        salary: f64,
        respond_to: Reply<()>,
    },
    UpdateDepartment {
        id: u32,
        department: String,
        respond_to: Reply<()>,
    },
    UpdatePosition {
        id: u32,
        position: String,
        respond_to: Reply<()>,
    },
    ApplyRaise {
        id: u32,
        percentage: f64,
        respond_to: Reply<()>,
    },
    DeleteEmployee {
        id: u32,
        respond_to: Reply<()>,
    },
    DeactivateEmployee {
        id: u32,
        respond_to: Reply<()>,
    },
    ActivateEmployee {
        id: u32,
        respond_to: Reply<()>,
    },
    DepartmentCounts {
        respond_to: Reply<BTreeMap<String, usize>>,
    },
    DepartmentReport {
        respond_to: Reply<Vec<DepartmentStats>>,
    },
    AverageSalaryByDepartment {
        department: String,
        respond_to: Reply<f64>,
    },
    Summary {
        respond_to: Reply<RosterSummary>,
    },
    HighestPaid {
        respond_to: Reply<Option<Employee>>,
    },
    LongestServing {
        respond_to: Reply<Option<Employee>>,
    },
    Export {
        path: PathBuf,
        respond_to: Reply<()>,
    },
    Save {
        respond_to: Reply<()>,
    },
    Shutdown,
}
