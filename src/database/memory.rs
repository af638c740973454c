use async_trait::async_trait;
use std::collections::BTreeMap;
use tokio::sync::RwLock;

use crate::database::manager::DatabaseError;
use crate::database::models::{Department, Employee, Timecard};
use crate::database::repository::CompanyRepository;

#[derive(Debug, Default)]
struct Tables {
    departments: BTreeMap<i32, Department>,
    employees: BTreeMap<i32, Employee>,
    timecards: BTreeMap<i32, Timecard>,
    last_dept_id: i32,
    last_emp_id: i32,
    last_timecard_id: i32,
}

impl Tables {
    fn dept_no_taken(&self, dept_no: &str, except: Option<i32>) -> bool {
        self.departments
            .values()
            .any(|d| d.dept_no == dept_no && Some(d.dept_id) != except)
    }

    fn emp_no_taken(&self, emp_no: &str, except: Option<i32>) -> bool {
        self.employees
            .values()
            .any(|e| e.emp_no == emp_no && Some(e.emp_id) != except)
    }

    fn company_dept_ids(&self, company: &str) -> Vec<i32> {
        self.departments
            .values()
            .filter(|d| d.company == company)
            .map(|d| d.dept_id)
            .collect()
    }
}

/// Process-local repository with the same unique constraints and cascades
/// as the Postgres schema. Backs `--storage memory` and the test-suite.
#[derive(Debug, Default)]
pub struct MemoryCompanyRepository {
    tables: RwLock<Tables>,
}

impl MemoryCompanyRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CompanyRepository for MemoryCompanyRepository {
    async fn ping(&self) -> Result<(), DatabaseError> {
        Ok(())
    }

    async fn get_department(&self, company: &str, dept_id: i32) -> Result<Option<Department>, DatabaseError> {
        let tables = self.tables.read().await;
        Ok(tables
            .departments
            .get(&dept_id)
            .filter(|d| d.company == company)
            .cloned())
    }

    async fn get_all_departments(&self, company: &str) -> Result<Vec<Department>, DatabaseError> {
        let tables = self.tables.read().await;
        Ok(tables
            .departments
            .values()
            .filter(|d| d.company == company)
            .cloned()
            .collect())
    }

    async fn insert_department(&self, mut department: Department) -> Result<Department, DatabaseError> {
        let mut tables = self.tables.write().await;
        if tables.dept_no_taken(&department.dept_no, None) {
            return Err(DatabaseError::DuplicateKey("departments_dept_no_key".to_string()));
        }
        tables.last_dept_id += 1;
        department.dept_id = tables.last_dept_id;
        tables.departments.insert(department.dept_id, department.clone());
        Ok(department)
    }

    async fn update_department(&self, department: Department) -> Result<Option<Department>, DatabaseError> {
        let mut tables = self.tables.write().await;
        let exists = tables
            .departments
            .get(&department.dept_id)
            .is_some_and(|d| d.company == department.company);
        if !exists {
            return Ok(None);
        }
        if tables.dept_no_taken(&department.dept_no, Some(department.dept_id)) {
            return Err(DatabaseError::DuplicateKey("departments_dept_no_key".to_string()));
        }
        tables.departments.insert(department.dept_id, department.clone());
        Ok(Some(department))
    }

    async fn delete_department(&self, company: &str, dept_id: i32) -> Result<u64, DatabaseError> {
        let mut tables = self.tables.write().await;
        let matches = tables
            .departments
            .get(&dept_id)
            .is_some_and(|d| d.company == company);
        if matches {
            tables.departments.remove(&dept_id);
            Ok(1)
        } else {
            Ok(0)
        }
    }

    async fn delete_company(&self, company: &str) -> Result<(), DatabaseError> {
        let mut tables = self.tables.write().await;
        let dept_ids = tables.company_dept_ids(company);
        let emp_ids: Vec<i32> = tables
            .employees
            .values()
            .filter(|e| dept_ids.contains(&e.dept_id))
            .map(|e| e.emp_id)
            .collect();

        tables.timecards.retain(|_, t| !emp_ids.contains(&t.emp_id));
        tables.employees.retain(|id, _| !emp_ids.contains(id));
        tables.departments.retain(|id, _| !dept_ids.contains(id));
        Ok(())
    }

    async fn get_employee(&self, emp_id: i32) -> Result<Option<Employee>, DatabaseError> {
        let tables = self.tables.read().await;
        Ok(tables.employees.get(&emp_id).cloned())
    }

    async fn get_all_employees(&self, company: &str) -> Result<Vec<Employee>, DatabaseError> {
        let tables = self.tables.read().await;
        let dept_ids = tables.company_dept_ids(company);
        Ok(tables
            .employees
            .values()
            .filter(|e| dept_ids.contains(&e.dept_id))
            .cloned()
            .collect())
    }

    async fn insert_employee(&self, mut employee: Employee) -> Result<Employee, DatabaseError> {
        let mut tables = self.tables.write().await;
        if tables.emp_no_taken(&employee.emp_no, None) {
            return Err(DatabaseError::DuplicateKey("employees_emp_no_key".to_string()));
        }
        tables.last_emp_id += 1;
        employee.emp_id = tables.last_emp_id;
        tables.employees.insert(employee.emp_id, employee.clone());
        Ok(employee)
    }

    async fn update_employee(&self, employee: Employee) -> Result<Option<Employee>, DatabaseError> {
        let mut tables = self.tables.write().await;
        if !tables.employees.contains_key(&employee.emp_id) {
            return Ok(None);
        }
        if tables.emp_no_taken(&employee.emp_no, Some(employee.emp_id)) {
            return Err(DatabaseError::DuplicateKey("employees_emp_no_key".to_string()));
        }
        tables.employees.insert(employee.emp_id, employee.clone());
        Ok(Some(employee))
    }

    async fn delete_employee(&self, emp_id: i32) -> Result<(), DatabaseError> {
        let mut tables = self.tables.write().await;
        tables.employees.remove(&emp_id);
        // ON DELETE CASCADE
        tables.timecards.retain(|_, t| t.emp_id != emp_id);
        Ok(())
    }

    async fn get_timecard(&self, timecard_id: i32) -> Result<Option<Timecard>, DatabaseError> {
        let tables = self.tables.read().await;
        Ok(tables.timecards.get(&timecard_id).cloned())
    }

    async fn get_all_timecards(&self, emp_id: i32) -> Result<Vec<Timecard>, DatabaseError> {
        let tables = self.tables.read().await;
        let mut timecards: Vec<Timecard> = tables
            .timecards
            .values()
            .filter(|t| t.emp_id == emp_id)
            .cloned()
            .collect();
        timecards.sort_by_key(|t| t.start_time);
        Ok(timecards)
    }

    async fn insert_timecard(&self, mut timecard: Timecard) -> Result<Timecard, DatabaseError> {
        let mut tables = self.tables.write().await;
        if !tables.employees.contains_key(&timecard.emp_id) {
            return Err(DatabaseError::QueryError(format!(
                "timecards_emp_id_fkey: employee {} does not exist",
                timecard.emp_id
            )));
        }
        tables.last_timecard_id += 1;
        timecard.timecard_id = tables.last_timecard_id;
        tables.timecards.insert(timecard.timecard_id, timecard.clone());
        Ok(timecard)
    }

    async fn update_timecard(&self, timecard: Timecard) -> Result<Option<Timecard>, DatabaseError> {
        let mut tables = self.tables.write().await;
        if !tables.timecards.contains_key(&timecard.timecard_id) {
            return Ok(None);
        }
        if !tables.employees.contains_key(&timecard.emp_id) {
            return Err(DatabaseError::QueryError(format!(
                "timecards_emp_id_fkey: employee {} does not exist",
                timecard.emp_id
            )));
        }
        tables.timecards.insert(timecard.timecard_id, timecard.clone());
        Ok(Some(timecard))
    }

    async fn delete_timecard(&self, timecard_id: i32) -> Result<(), DatabaseError> {
        let mut tables = self.tables.write().await;
        tables.timecards.remove(&timecard_id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone, Utc};

    fn employee(emp_no: &str, dept_id: i32) -> Employee {
        Employee {
            emp_id: 0,
            emp_name: "Ada".to_string(),
            emp_no: emp_no.to_string(),
            hire_date: NaiveDate::from_ymd_opt(2020, 3, 2).unwrap(),
            job: "Engineer".to_string(),
            salary: 90000.0,
            dept_id,
            mng_id: 0,
        }
    }

    #[tokio::test]
    async fn department_round_trip() {
        let repo = MemoryCompanyRepository::new();
        let stored = repo
            .insert_department(Department::new("ab1234", "Eng", "10", "NY"))
            .await
            .unwrap();
        assert_eq!(stored.dept_id, 1);

        let fetched = repo.get_department("ab1234", stored.dept_id).await.unwrap();
        assert_eq!(fetched, Some(stored.clone()));

        // Scoped by company
        assert_eq!(repo.get_department("cd5678", stored.dept_id).await.unwrap(), None);
    }

    #[tokio::test]
    async fn dept_no_is_unique_across_companies() {
        let repo = MemoryCompanyRepository::new();
        repo.insert_department(Department::new("ab1234", "Eng", "10", "NY"))
            .await
            .unwrap();
        let err = repo
            .insert_department(Department::new("cd5678", "Ops", "10", "LA"))
            .await
            .unwrap_err();
        assert!(matches!(err, DatabaseError::DuplicateKey(_)));
    }

    #[tokio::test]
    async fn update_department_is_idempotent() {
        let repo = MemoryCompanyRepository::new();
        let mut stored = repo
            .insert_department(Department::new("ab1234", "Eng", "10", "NY"))
            .await
            .unwrap();
        stored.location = "Boston".to_string();

        let first = repo.update_department(stored.clone()).await.unwrap();
        let second = repo.update_department(stored.clone()).await.unwrap();
        assert_eq!(first, Some(stored.clone()));
        assert_eq!(first, second);
        assert_eq!(repo.get_department("ab1234", stored.dept_id).await.unwrap(), Some(stored));
    }

    #[tokio::test]
    async fn delete_department_reports_count() {
        let repo = MemoryCompanyRepository::new();
        let stored = repo
            .insert_department(Department::new("ab1234", "Eng", "10", "NY"))
            .await
            .unwrap();
        assert_eq!(repo.delete_department("cd5678", stored.dept_id).await.unwrap(), 0);
        assert_eq!(repo.delete_department("ab1234", stored.dept_id).await.unwrap(), 1);
        assert_eq!(repo.delete_department("ab1234", stored.dept_id).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn delete_company_cascades() {
        let repo = MemoryCompanyRepository::new();
        let ours = repo
            .insert_department(Department::new("ab1234", "Eng", "10", "NY"))
            .await
            .unwrap();
        let theirs = repo
            .insert_department(Department::new("cd5678", "Ops", "20", "LA"))
            .await
            .unwrap();
        let emp = repo.insert_employee(employee("e-1", ours.dept_id)).await.unwrap();
        let other = repo.insert_employee(employee("e-2", theirs.dept_id)).await.unwrap();
        let start = Utc.with_ymd_and_hms(2024, 3, 4, 14, 0, 0).unwrap();
        let card = repo
            .insert_timecard(Timecard {
                timecard_id: 0,
                start_time: start,
                end_time: start + chrono::Duration::hours(2),
                emp_id: emp.emp_id,
            })
            .await
            .unwrap();

        repo.delete_company("ab1234").await.unwrap();

        assert!(repo.get_all_departments("ab1234").await.unwrap().is_empty());
        assert!(repo.get_all_employees("ab1234").await.unwrap().is_empty());
        assert_eq!(repo.get_employee(emp.emp_id).await.unwrap(), None);
        assert_eq!(repo.get_timecard(card.timecard_id).await.unwrap(), None);
        assert_eq!(repo.get_employee(other.emp_id).await.unwrap(), Some(other));
        assert_eq!(repo.get_all_departments("cd5678").await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn emp_no_is_unique_on_update() {
        let repo = MemoryCompanyRepository::new();
        repo.insert_employee(employee("e-1", 1)).await.unwrap();
        let mut second = repo.insert_employee(employee("e-2", 1)).await.unwrap();
        second.emp_no = "e-1".to_string();
        assert!(matches!(
            repo.update_employee(second).await,
            Err(DatabaseError::DuplicateKey(_))
        ));
    }

    #[tokio::test]
    async fn update_missing_rows_returns_none() {
        let repo = MemoryCompanyRepository::new();
        let mut ghost = employee("e-9", 1);
        ghost.emp_id = 42;
        assert_eq!(repo.update_employee(ghost).await.unwrap(), None);
        assert_eq!(
            repo.update_department(Department { dept_id: 7, ..Department::new("ab1234", "x", "1", "y") })
                .await
                .unwrap(),
            None
        );
    }
}
