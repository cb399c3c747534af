//! The authoritative in-memory roster and its snapshot persistence.
//!
//! Every successful mutation rewrites the full snapshot before returning. A failed
//! write is logged and the in-memory change is kept, so memory and disk can diverge
//! until the next successful save.

mod snapshot;

use std::collections::BTreeMap;
use std::path::PathBuf;

use chrono::{Local, NaiveDate};
use tracing::{debug, error, info, warn};

use crate::domain::{DepartmentStats, Employee, EmployeeCreate, EmployeeQuery, RosterSummary};
use crate::error::{Result, RosterError};

use snapshot::{LoadedSnapshot, Snapshot};

pub struct EmployeeStore {
    employees: BTreeMap<u32, Employee>,
    /// Strictly greater than every id handed out so far; never reused.
    next_id: u32,
    snapshot: Snapshot,
}

impl EmployeeStore {
    /// Opens the store backed by `path`.
    ///
    /// A missing snapshot starts an empty roster. An unreadable or corrupt one is
    /// logged and also starts empty; its contents are not recovered.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let mut store = Self {
            employees: BTreeMap::new(),
            next_id: 1,
            snapshot: Snapshot::new(path),
        };

        match store.snapshot.load() {
            Ok(Some(loaded)) => {
                store.restore(loaded);
                info!(count = store.employees.len(), "Employee data loaded successfully");
            }
            Ok(None) => info!(
                path = %store.snapshot.path().display(),
                "No existing data file found, starting with an empty roster"
            ),
            Err(e) => warn!(
                path = %store.snapshot.path().display(),
                error = %e,
                "Error loading employee data, starting with an empty roster"
            ),
        }

        store
    }

    fn restore(&mut self, loaded: LoadedSnapshot) {
        for employee in loaded.employees {
            self.employees.insert(employee.id(), employee);
        }
        let after_max = self
            .employees
            .keys()
            .next_back()
            .map_or(1, |id| id.saturating_add(1));
        self.next_id = loaded.next_id.max(after_max).max(1);
    }

    /// Hands out `next_id`. The last `u32` is never assigned since no counter could follow it.
    fn allocate_id(&mut self) -> Result<u32> {
        let id = self.next_id;
        self.next_id = id.checked_add(1).ok_or(RosterError::IdsExhausted)?;
        Ok(id)
    }

    /// Best-effort snapshot write after a mutation.
    fn persist(&self) {
        match self.snapshot.save(self.employees.values(), self.next_id) {
            Ok(()) => debug!(count = self.employees.len(), "Employee data saved successfully"),
            Err(e) => error!(error = %e, "Error saving employee data"),
        }
    }

    /// Writes the snapshot and reports failure to the caller.
    pub fn save(&self) -> Result<()> {
        self.snapshot.save(self.employees.values(), self.next_id)?;
        info!(count = self.employees.len(), "Employee data saved successfully");
        Ok(())
    }

    pub fn next_id(&self) -> u32 {
        self.next_id
    }

    // --- Create ---

    pub fn create(&mut self, params: EmployeeCreate) -> Result<u32> {
        check_salary(params.salary)?;
        let id = self.allocate_id()?;
        self.employees.insert(id, Employee::from_create(id, params));
        self.persist();
        info!(employee_id = id, "Employee created");
        Ok(id)
    }

    /// Inserts a prepared record. An id of zero is replaced with a fresh one.
    pub fn create_with_id(&mut self, mut employee: Employee) -> Result<u32> {
        check_salary(employee.salary())?;
        if employee.id() == 0 {
            employee.assign_id(self.allocate_id()?);
        } else if self.employees.contains_key(&employee.id()) {
            return Err(RosterError::AlreadyExists(employee.id()));
        }

        let id = employee.id();
        let after = id.checked_add(1).ok_or(RosterError::IdsExhausted)?;
        self.next_id = self.next_id.max(after);
        self.employees.insert(id, employee);
        self.persist();
        info!(employee_id = id, "Employee created");
        Ok(id)
    }

    // --- Read ---

    pub fn get(&self, id: u32) -> Option<Employee> {
        self.employees.get(&id).cloned()
    }

    fn collect_where(&self, keep: impl Fn(&Employee) -> bool) -> Vec<Employee> {
        self.employees.values().filter(|e| keep(*e)).cloned().collect()
    }

    pub fn get_all(&self) -> Vec<Employee> {
        self.employees.values().cloned().collect()
    }

    pub fn get_active(&self) -> Vec<Employee> {
        self.collect_where(Employee::is_active)
    }

    pub fn get_by_department(&self, department: &str) -> Vec<Employee> {
        self.collect_where(|e| same_text(e.department(), department))
    }

    pub fn search_by_name(&self, term: &str) -> Vec<Employee> {
        let term = term.to_lowercase();
        self.collect_where(|e| {
            e.first_name().to_lowercase().contains(&term)
                || e.last_name().to_lowercase().contains(&term)
                || e.full_name().to_lowercase().contains(&term)
        })
    }

    pub fn get_by_salary_range(&self, min: f64, max: f64) -> Vec<Employee> {
        if min > max {
            return Vec::new();
        }
        self.collect_where(|e| e.salary() >= min && e.salary() <= max)
    }

    pub fn query(&self, query: &EmployeeQuery) -> Vec<Employee> {
        match query {
            EmployeeQuery::All => self.get_all(),
            EmployeeQuery::Active => self.get_active(),
            EmployeeQuery::Department(name) => self.get_by_department(name),
            EmployeeQuery::Name(term) => self.search_by_name(term),
            EmployeeQuery::SalaryRange { min, max } => self.get_by_salary_range(*min, *max),
        }
    }

    // --- Update ---

    pub fn update(&mut self, employee: Employee) -> Result<()> {
        check_salary(employee.salary())?;
        let id = employee.id();
        if !self.employees.contains_key(&id) {
            return Err(RosterError::NotFound(id));
        }
        self.employees.insert(id, employee);
        self.persist();
        debug!(employee_id = id, "Employee updated");
        Ok(())
    }

    /// Fetch a copy, mutate it, write it back through `update`.
    fn modify(&mut self, id: u32, change: impl FnOnce(&mut Employee)) -> Result<()> {
        let mut employee = self.get(id).ok_or(RosterError::NotFound(id))?;
        change(&mut employee);
        self.update(employee)
    }

    pub fn update_salary(&mut self, id: u32, salary: f64) -> Result<()> {
        self.modify(id, |e| e.set_salary(salary))
    }

    pub fn update_department(&mut self, id: u32, department: &str) -> Result<()> {
        self.modify(id, |e| e.set_department(department))
    }

    pub fn update_position(&mut self, id: u32, position: &str) -> Result<()> {
        self.modify(id, |e| e.set_position(position))
    }

    /// Persists even when the percentage is non-positive and the salary is unchanged.
    pub fn apply_raise(&mut self, id: u32, percentage: f64) -> Result<()> {
        self.modify(id, |e| e.apply_raise(percentage))
    }

    // --- Delete ---

    pub fn delete(&mut self, id: u32) -> Result<()> {
        if self.employees.remove(&id).is_none() {
            return Err(RosterError::NotFound(id));
        }
        self.persist();
        info!(employee_id = id, "Employee deleted");
        Ok(())
    }

    pub fn deactivate(&mut self, id: u32) -> Result<()> {
        self.modify(id, |e| e.set_active(false))
    }

    pub fn activate(&mut self, id: u32) -> Result<()> {
        self.modify(id, |e| e.set_active(true))
    }

    // --- Aggregates ---

    pub fn count(&self) -> usize {
        self.employees.len()
    }

    pub fn active_count(&self) -> usize {
        self.employees.values().filter(|e| e.is_active()).count()
    }

    /// Grouped as stored; "Sales" and "sales" are separate entries.
    pub fn department_counts(&self) -> BTreeMap<String, usize> {
        let mut counts = BTreeMap::new();
        for employee in self.employees.values() {
            *counts.entry(employee.department().to_string()).or_insert(0) += 1;
        }
        counts
    }

    pub fn average_salary(&self) -> f64 {
        mean(self.employees.values().map(Employee::salary))
    }

    pub fn average_salary_by_department(&self, department: &str) -> f64 {
        mean(
            self.employees
                .values()
                .filter(|e| same_text(e.department(), department))
                .map(Employee::salary),
        )
    }

    /// Ties go to the lowest id.
    pub fn highest_paid(&self) -> Option<Employee> {
        first_max_by_key(self.employees.values(), Employee::salary)
    }

    /// Ties go to the lowest id.
    pub fn longest_serving(&self) -> Option<Employee> {
        self.longest_serving_at(Local::now().date_naive())
    }

    pub fn longest_serving_at(&self, today: NaiveDate) -> Option<Employee> {
        first_max_by_key(self.employees.values(), |e| {
            f64::from(e.years_of_service_at(today))
        })
    }

    pub fn summary(&self) -> RosterSummary {
        RosterSummary {
            total: self.count(),
            active: self.active_count(),
            average_salary: self.average_salary(),
        }
    }

    pub fn department_report(&self) -> Vec<DepartmentStats> {
        self.department_counts()
            .into_iter()
            .map(|(department, count)| DepartmentStats {
                average_salary: self.average_salary_by_department(&department),
                department,
                count,
            })
            .collect()
    }
}

fn same_text(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}

fn mean(values: impl Iterator<Item = f64>) -> f64 {
    let (sum, n) = values.fold((0.0, 0usize), |(sum, n), v| (sum + v, n + 1));
    if n == 0 { 0.0 } else { sum / n as f64 }
}

/// JSON has no representation for infinities or NaN, so they never reach the snapshot.
fn check_salary(salary: f64) -> Result<()> {
    if salary.is_finite() {
        Ok(())
    } else {
        Err(RosterError::InvalidSalary(salary))
    }
}

/// Like `Iterator::max_by` but keeps the first of equal elements.
fn first_max_by_key<'a>(
    employees: impl Iterator<Item = &'a Employee>,
    key: impl Fn(&Employee) -> f64,
) -> Option<Employee> {
    let mut best: Option<(&Employee, f64)> = None;
    for employee in employees {
        let value = key(employee);
        match best {
            Some((_, top)) if top >= value => {}
            _ => best = Some((employee, value)),
        }
    }
    best.map(|(employee, _)| employee.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::sample;
    use std::fs;
    use tempfile::TempDir;

    fn open_store() -> (TempDir, EmployeeStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = EmployeeStore::open(dir.path().join("employees.json"));
        (dir, store)
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_create_assigns_increasing_ids() {
        let (_dir, mut store) = open_store();
        let a = store.create(sample("Anna", "Lee", "Sales", 1.0)).unwrap();
        let b = store.create(sample("Dan", "Fox", "Eng", 2.0)).unwrap();
        assert!(b > a);

        let fetched = store.get(a).unwrap();
        assert_eq!(fetched.id(), a);
        assert!(fetched.is_active());
        assert!(store.next_id() > b);
    }

    #[test]
    fn test_ids_are_not_reused_after_delete() {
        let (_dir, mut store) = open_store();
        let a = store.create(sample("Anna", "Lee", "Sales", 1.0)).unwrap();
        store.delete(a).unwrap();
        let b = store.create(sample("Dan", "Fox", "Eng", 2.0)).unwrap();
        assert!(b > a);
    }

    #[test]
    fn test_delete() {
        let (_dir, mut store) = open_store();
        let id = store.create(sample("Anna", "Lee", "Sales", 1.0)).unwrap();

        store.delete(id).unwrap();
        assert!(store.get(id).is_none());

        let err = store.delete(id).unwrap_err();
        assert!(matches!(err, RosterError::NotFound(missing) if missing == id));
        assert_eq!(store.count(), 0);
    }

    #[test]
    fn test_deactivate_and_activate() {
        let (_dir, mut store) = open_store();
        let id = store.create(sample("Anna", "Lee", "Sales", 1.0)).unwrap();

        store.deactivate(id).unwrap();
        assert!(store.get_active().is_empty());
        assert_eq!(store.active_count(), 0);

        store.activate(id).unwrap();
        store.activate(id).unwrap();
        assert!(store.get(id).unwrap().is_active());
        assert_eq!(store.get_active().len(), 1);

        assert!(store.deactivate(999).is_err());
    }

    #[test]
    fn test_apply_raise() {
        let (_dir, mut store) = open_store();
        let id = store.create(sample("Anna", "Lee", "Sales", 50_000.0)).unwrap();

        store.apply_raise(id, 10.0).unwrap();
        assert_eq!(store.get(id).unwrap().salary(), 50_000.0 * (1.0 + 10.0 / 100.0));

        let before = store.get(id).unwrap().salary();
        store.apply_raise(id, 0.0).unwrap();
        store.apply_raise(id, -3.0).unwrap();
        assert_eq!(store.get(id).unwrap().salary().to_bits(), before.to_bits());

        assert!(store.apply_raise(42, 5.0).is_err());
    }

    #[test]
    fn test_noop_raise_still_persists() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("employees.json");
        let mut store = EmployeeStore::open(&path);
        let id = store.create(sample("Anna", "Lee", "Sales", 1.0)).unwrap();

        fs::remove_file(&path).unwrap();
        store.apply_raise(id, 0.0).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_field_updates_ignore_invalid_values() {
        let (_dir, mut store) = open_store();
        let id = store.create(sample("Anna", "Lee", "Sales", 100.0)).unwrap();

        store.update_salary(id, -5.0).unwrap();
        store.update_department(id, "  ").unwrap();
        store.update_position(id, "").unwrap();
        let emp = store.get(id).unwrap();
        assert_eq!(emp.salary(), 100.0);
        assert_eq!(emp.department(), "Sales");
        assert_eq!(emp.position(), "Engineer");

        store.update_salary(id, 200.0).unwrap();
        store.update_department(id, "Eng").unwrap();
        store.update_position(id, "Lead").unwrap();
        let emp = store.get(id).unwrap();
        assert_eq!(emp.salary(), 200.0);
        assert_eq!(emp.department(), "Eng");
        assert_eq!(emp.position(), "Lead");

        assert!(store.update_salary(99, 1.0).is_err());
    }

    #[test]
    fn test_update_requires_existing_id() {
        let (_dir, mut store) = open_store();
        let stranger = Employee::from_create(77, sample("Dan", "Fox", "Eng", 1.0));
        assert!(matches!(store.update(stranger), Err(RosterError::NotFound(77))));
        assert_eq!(store.count(), 0);
    }

    #[test]
    fn test_returned_records_are_copies() {
        let (_dir, mut store) = open_store();
        let id = store.create(sample("Anna", "Lee", "Sales", 100.0)).unwrap();

        let mut copy = store.get(id).unwrap();
        copy.set_salary(1.0);
        for mut emp in store.get_all() {
            emp.set_active(false);
        }

        let stored = store.get(id).unwrap();
        assert_eq!(stored.salary(), 100.0);
        assert!(stored.is_active());
    }

    #[test]
    fn test_create_with_id() {
        let (_dir, mut store) = open_store();
        let explicit = Employee::from_create(10, sample("Anna", "Lee", "Sales", 1.0));
        assert_eq!(store.create_with_id(explicit.clone()).unwrap(), 10);

        let err = store.create_with_id(explicit).unwrap_err();
        assert!(matches!(err, RosterError::AlreadyExists(10)));

        let unassigned = Employee::from_create(0, sample("Dan", "Fox", "Eng", 1.0));
        let id = store.create_with_id(unassigned).unwrap();
        assert!(id > 10);
        assert_eq!(store.get(id).unwrap().first_name(), "Dan");
    }

    #[test]
    fn test_high_explicit_id_moves_counter_past_it() {
        let (_dir, mut store) = open_store();
        store.create(sample("Anna", "Lee", "Sales", 1.0)).unwrap();
        let high = Employee::from_create(5_000, sample("Dan", "Fox", "Eng", 1.0));
        store.create_with_id(high).unwrap();
        assert!(store.next_id() > 5_000);

        let next = store.create(sample("Eve", "Ng", "Eng", 1.0)).unwrap();
        assert_eq!(next, 5_001);
        assert_eq!(store.count(), 3);
        assert!(store.get_all().iter().all(|e| e.id() < store.next_id()));
    }

    #[test]
    fn test_last_id_is_never_assigned() {
        let (_dir, mut store) = open_store();
        let last = Employee::from_create(u32::MAX, sample("Anna", "Lee", "Sales", 1.0));
        assert!(matches!(store.create_with_id(last), Err(RosterError::IdsExhausted)));
        assert_eq!(store.count(), 0);

        let edge = Employee::from_create(u32::MAX - 1, sample("Dan", "Fox", "Eng", 1.0));
        assert_eq!(store.create_with_id(edge).unwrap(), u32::MAX - 1);
        assert_eq!(store.next_id(), u32::MAX);

        let err = store.create(sample("Eve", "Ng", "Eng", 1.0)).unwrap_err();
        assert!(matches!(err, RosterError::IdsExhausted));
        assert_eq!(store.count(), 1);
        assert_eq!(store.next_id(), u32::MAX);
        assert_eq!(store.get(u32::MAX - 1).unwrap().first_name(), "Dan");
    }

    #[test]
    fn test_reload_with_last_id_refuses_new_ids() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("employees.json");
        let last = Employee::from_create(u32::MAX, sample("Anna", "Lee", "Sales", 1.0));
        Snapshot::new(&path).save([&last], u32::MAX).unwrap();

        let mut store = EmployeeStore::open(&path);
        let err = store.create(sample("Dan", "Fox", "Eng", 1.0)).unwrap_err();
        assert!(matches!(err, RosterError::IdsExhausted));
        assert_eq!(store.count(), 1);
        assert_eq!(store.get(u32::MAX).unwrap().first_name(), "Anna");
    }

    #[test]
    fn test_non_finite_salary_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("employees.json");
        let mut store = EmployeeStore::open(&path);
        let a = store.create(sample("Anna", "Lee", "Sales", 1.0)).unwrap();
        store.create(sample("Dan", "Fox", "Eng", 2.0)).unwrap();

        for bad in [f64::INFINITY, f64::NEG_INFINITY, f64::NAN] {
            let err = store.create(sample("Bad", "Pay", "Ops", bad)).unwrap_err();
            assert!(matches!(err, RosterError::InvalidSalary(_)));
        }
        let explicit = Employee::from_create(50, sample("Bad", "Pay", "Ops", f64::INFINITY));
        assert!(matches!(store.create_with_id(explicit), Err(RosterError::InvalidSalary(_))));
        let replacement = Employee::from_create(a, sample("Anna", "Lee", "Sales", f64::NAN));
        assert!(matches!(store.update(replacement), Err(RosterError::InvalidSalary(_))));
        assert_eq!(store.count(), 2);

        let reloaded = EmployeeStore::open(&path);
        assert_eq!(reloaded.count(), 2);
        assert_eq!(reloaded.get(a).unwrap().salary(), 1.0);
    }

    #[test]
    fn test_overflowing_raise_keeps_salary_across_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("employees.json");
        let mut store = EmployeeStore::open(&path);
        let a = store.create(sample("Anna", "Lee", "Sales", 50_000.0)).unwrap();
        store.create(sample("Dan", "Fox", "Eng", 60_000.0)).unwrap();

        store.apply_raise(a, 1e307).unwrap();
        store.update_salary(a, f64::INFINITY).unwrap();
        assert_eq!(store.get(a).unwrap().salary(), 50_000.0);

        let reloaded = EmployeeStore::open(&path);
        assert_eq!(reloaded.count(), 2);
        assert_eq!(reloaded.get(a).unwrap().salary(), 50_000.0);
    }

    #[test]
    fn test_average_salary() {
        let (_dir, mut store) = open_store();
        assert_eq!(store.average_salary(), 0.0);

        store.create(sample("Anna", "Lee", "Sales", 100.0)).unwrap();
        store.create(sample("Dan", "Fox", "Eng", 200.0)).unwrap();
        assert_eq!(store.average_salary(), 150.0);
    }

    #[test]
    fn test_salary_range() {
        let (_dir, mut store) = open_store();
        store.create(sample("Anna", "Lee", "Sales", 100.0)).unwrap();
        store.create(sample("Dan", "Fox", "Eng", 200.0)).unwrap();
        store.create(sample("Eve", "Ng", "Eng", 300.0)).unwrap();

        assert_eq!(store.get_by_salary_range(100.0, 200.0).len(), 2);
        assert_eq!(store.get_by_salary_range(200.0, 200.0).len(), 1);
        assert!(store.get_by_salary_range(300.0, 100.0).is_empty());
    }

    #[test]
    fn test_department_scenario() {
        let (_dir, mut store) = open_store();
        store.create(sample("Ann", "A", "Sales", 50_000.0)).unwrap();
        store.create(sample("Bob", "B", "Sales", 70_000.0)).unwrap();
        let c = store.create(sample("Cat", "C", "Eng", 90_000.0)).unwrap();

        let counts = store.department_counts();
        assert_eq!(counts.len(), 2);
        assert_eq!(counts["Sales"], 2);
        assert_eq!(counts["Eng"], 1);

        assert_eq!(store.average_salary_by_department("sales"), 60_000.0);
        assert_eq!(store.average_salary_by_department("Ops"), 0.0);
        assert_eq!(store.get_by_department("SALES").len(), 2);
        assert_eq!(store.highest_paid().unwrap().id(), c);

        let report = store.department_report();
        assert_eq!(report[0].department, "Eng");
        assert_eq!(report[1].count, 2);
        assert_eq!(report[1].average_salary, 60_000.0);
    }

    #[test]
    fn test_department_counts_are_case_sensitive() {
        let (_dir, mut store) = open_store();
        store.create(sample("Ann", "A", "Sales", 1.0)).unwrap();
        store.create(sample("Bob", "B", "sales", 1.0)).unwrap();
        assert_eq!(store.department_counts().len(), 2);
    }

    #[test]
    fn test_search_by_name() {
        let (_dir, mut store) = open_store();
        store.create(sample("Anna", "Lee", "Sales", 1.0)).unwrap();
        store.create(sample("Dan", "Fox", "Eng", 1.0)).unwrap();
        store.create(sample("Bob", "Stone", "Eng", 1.0)).unwrap();

        assert_eq!(store.search_by_name("an").len(), 2);
        assert_eq!(store.search_by_name("a l").len(), 1);
        assert_eq!(store.search_by_name("FOX").len(), 1);
        assert!(store.search_by_name("zed").is_empty());
    }

    #[test]
    fn test_query_dispatch() {
        let (_dir, mut store) = open_store();
        let a = store.create(sample("Anna", "Lee", "Sales", 1.0)).unwrap();
        store.create(sample("Dan", "Fox", "Eng", 5.0)).unwrap();
        store.deactivate(a).unwrap();

        assert_eq!(store.query(&EmployeeQuery::All).len(), 2);
        assert_eq!(store.query(&EmployeeQuery::Active).len(), 1);
        assert_eq!(store.query(&EmployeeQuery::Department("eng".into())).len(), 1);
        assert_eq!(store.query(&EmployeeQuery::Name("ann".into())).len(), 1);
        assert_eq!(store.query(&EmployeeQuery::SalaryRange { min: 2.0, max: 9.0 }).len(), 1);
    }

    #[test]
    fn test_extremes_on_empty_store() {
        let (_dir, store) = open_store();
        assert!(store.highest_paid().is_none());
        assert!(store.longest_serving().is_none());
    }

    #[test]
    fn test_ties_go_to_lowest_id() {
        let (_dir, mut store) = open_store();
        let a = store.create(sample("Anna", "Lee", "Sales", 500.0)).unwrap();
        store.create(sample("Dan", "Fox", "Eng", 500.0)).unwrap();

        assert_eq!(store.highest_paid().unwrap().id(), a);
        assert_eq!(store.longest_serving_at(date(2030, 1, 1)).unwrap().id(), a);
    }

    #[test]
    fn test_longest_serving() {
        let (_dir, mut store) = open_store();
        store.create(sample("Anna", "Lee", "Sales", 1.0)).unwrap();
        let mut veteran = sample("Dan", "Fox", "Eng", 1.0);
        veteran.hire_date = date(2001, 6, 1);
        let v = store.create(veteran).unwrap();

        let found = store.longest_serving_at(date(2024, 1, 1)).unwrap();
        assert_eq!(found.id(), v);
        assert_eq!(found.years_of_service_at(date(2024, 1, 1)), 22);
    }

    #[test]
    fn test_summary() {
        let (_dir, mut store) = open_store();
        let a = store.create(sample("Anna", "Lee", "Sales", 100.0)).unwrap();
        store.create(sample("Dan", "Fox", "Eng", 300.0)).unwrap();
        store.deactivate(a).unwrap();

        let summary = store.summary();
        assert_eq!(summary.total, 2);
        assert_eq!(summary.active, 1);
        assert_eq!(summary.average_salary, 200.0);
    }

    #[test]
    fn test_round_trip_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("employees.json");

        let mut store = EmployeeStore::open(&path);
        let a = store.create(sample("Anna", "Lee", "Sales", 50_000.5)).unwrap();
        let mut hired = sample("Dan", "Fox", "Eng", 70_000.0);
        hired.hire_date = date(2011, 2, 28);
        let b = store.create(hired).unwrap();
        store.deactivate(b).unwrap();
        let originals = store.get_all();

        let reloaded = EmployeeStore::open(&path);
        assert_eq!(reloaded.count(), originals.len());
        for original in &originals {
            let copy = reloaded.get(original.id()).unwrap();
            assert_eq!(copy.first_name(), original.first_name());
            assert_eq!(copy.last_name(), original.last_name());
            assert_eq!(copy.email(), original.email());
            assert_eq!(copy.department(), original.department());
            assert_eq!(copy.position(), original.position());
            assert_eq!(copy.salary().to_bits(), original.salary().to_bits());
            assert_eq!(copy.hire_date(), original.hire_date());
            assert_eq!(copy.phone_number(), original.phone_number());
            assert_eq!(copy.address(), original.address());
            assert_eq!(copy.is_active(), original.is_active());
        }
        assert!(reloaded.next_id() > a.max(b));
    }

    #[test]
    fn test_reload_keeps_counter_after_deleting_highest_id() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("employees.json");

        let mut store = EmployeeStore::open(&path);
        store.create(sample("Anna", "Lee", "Sales", 1.0)).unwrap();
        let b = store.create(sample("Dan", "Fox", "Eng", 1.0)).unwrap();
        store.delete(b).unwrap();

        let mut reloaded = EmployeeStore::open(&path);
        let c = reloaded.create(sample("Eve", "Ng", "Eng", 1.0)).unwrap();
        assert!(c > b);
    }

    #[test]
    fn test_corrupt_snapshot_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("employees.json");
        fs::write(&path, "garbage").unwrap();

        let mut store = EmployeeStore::open(&path);
        assert_eq!(store.count(), 0);
        assert_eq!(store.create(sample("Anna", "Lee", "Sales", 1.0)).unwrap(), 1);
    }

    #[test]
    fn test_save_failure_keeps_memory_change() {
        let dir = tempfile::tempdir().unwrap();
        // A directory where the snapshot file should be makes every write fail.
        let path = dir.path().join("employees.json");
        fs::create_dir(&path).unwrap();

        let mut store = EmployeeStore::open(&path);
        let id = store.create(sample("Anna", "Lee", "Sales", 1.0)).unwrap();
        assert!(store.get(id).is_some());
        assert!(store.save().is_err());
    }
}
