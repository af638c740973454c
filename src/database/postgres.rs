use async_trait::async_trait;
use sqlx::PgPool;

use crate::database::manager::DatabaseError;
use crate::database::models::{Department, Employee, Timecard};
use crate::database::repository::CompanyRepository;

const DEPARTMENT_COLUMNS: &str = "company, dept_id, dept_name, dept_no, location";
const EMPLOYEE_COLUMNS: &str = "emp_id, emp_name, emp_no, hire_date, job, salary, dept_id, mng_id";
const TIMECARD_COLUMNS: &str = "timecard_id, start_time, end_time, emp_id";

/// Postgres-backed repository over the shared pool
#[derive(Clone)]
pub struct PgCompanyRepository {
    pool: PgPool,
}

impl PgCompanyRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CompanyRepository for PgCompanyRepository {
    async fn ping(&self) -> Result<(), DatabaseError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn get_department(&self, company: &str, dept_id: i32) -> Result<Option<Department>, DatabaseError> {
        let sql = format!(
            "SELECT {} FROM departments WHERE company = $1 AND dept_id = $2",
            DEPARTMENT_COLUMNS
        );
        let department = sqlx::query_as::<_, Department>(&sql)
            .bind(company)
            .bind(dept_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(department)
    }

    async fn get_all_departments(&self, company: &str) -> Result<Vec<Department>, DatabaseError> {
        let sql = format!(
            "SELECT {} FROM departments WHERE company = $1 ORDER BY dept_id",
            DEPARTMENT_COLUMNS
        );
        let departments = sqlx::query_as::<_, Department>(&sql)
            .bind(company)
            .fetch_all(&self.pool)
            .await?;
        Ok(departments)
    }

    async fn insert_department(&self, department: Department) -> Result<Department, DatabaseError> {
        let sql = format!(
            "INSERT INTO departments (company, dept_name, dept_no, location) VALUES ($1, $2, $3, $4) RETURNING {}",
            DEPARTMENT_COLUMNS
        );
        let stored = sqlx::query_as::<_, Department>(&sql)
            .bind(&department.company)
            .bind(&department.dept_name)
            .bind(&department.dept_no)
            .bind(&department.location)
            .fetch_one(&self.pool)
            .await?;
        Ok(stored)
    }

    async fn update_department(&self, department: Department) -> Result<Option<Department>, DatabaseError> {
        let sql = format!(
            "UPDATE departments SET dept_name = $1, dept_no = $2, location = $3 \
             WHERE company = $4 AND dept_id = $5 RETURNING {}",
            DEPARTMENT_COLUMNS
        );
        let stored = sqlx::query_as::<_, Department>(&sql)
            .bind(&department.dept_name)
            .bind(&department.dept_no)
            .bind(&department.location)
            .bind(&department.company)
            .bind(department.dept_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(stored)
    }

    async fn delete_department(&self, company: &str, dept_id: i32) -> Result<u64, DatabaseError> {
        let result = sqlx::query("DELETE FROM departments WHERE company = $1 AND dept_id = $2")
            .bind(company)
            .bind(dept_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    async fn delete_company(&self, company: &str) -> Result<(), DatabaseError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            "DELETE FROM timecards WHERE emp_id IN (\
                SELECT e.emp_id FROM employees e JOIN departments d ON d.dept_id = e.dept_id \
                WHERE d.company = $1)",
        )
        .bind(company)
        .execute(&mut *tx)
        .await?;

        sqlx::query("DELETE FROM employees WHERE dept_id IN (SELECT dept_id FROM departments WHERE company = $1)")
            .bind(company)
            .execute(&mut *tx)
            .await?;

        let removed = sqlx::query("DELETE FROM departments WHERE company = $1")
            .bind(company)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        tracing::info!("Deleted company {} ({} departments)", company, removed.rows_affected());
        Ok(())
    }

    async fn get_employee(&self, emp_id: i32) -> Result<Option<Employee>, DatabaseError> {
        let sql = format!("SELECT {} FROM employees WHERE emp_id = $1", EMPLOYEE_COLUMNS);
        let employee = sqlx::query_as::<_, Employee>(&sql)
            .bind(emp_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(employee)
    }

    async fn get_all_employees(&self, company: &str) -> Result<Vec<Employee>, DatabaseError> {
        let employees = sqlx::query_as::<_, Employee>(
            "SELECT e.emp_id, e.emp_name, e.emp_no, e.hire_date, e.job, e.salary, e.dept_id, e.mng_id \
             FROM employees e JOIN departments d ON d.dept_id = e.dept_id \
             WHERE d.company = $1 ORDER BY e.emp_id",
        )
        .bind(company)
        .fetch_all(&self.pool)
        .await?;
        Ok(employees)
    }

    async fn insert_employee(&self, employee: Employee) -> Result<Employee, DatabaseError> {
        let sql = format!(
            "INSERT INTO employees (emp_name, emp_no, hire_date, job, salary, dept_id, mng_id) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) RETURNING {}",
            EMPLOYEE_COLUMNS
        );
        let stored = sqlx::query_as::<_, Employee>(&sql)
            .bind(&employee.emp_name)
            .bind(&employee.emp_no)
            .bind(employee.hire_date)
            .bind(&employee.job)
            .bind(employee.salary)
            .bind(employee.dept_id)
            .bind(employee.mng_id)
            .fetch_one(&self.pool)
            .await?;
        Ok(stored)
    }

    async fn update_employee(&self, employee: Employee) -> Result<Option<Employee>, DatabaseError> {
        let sql = format!(
            "UPDATE employees SET emp_name = $1, emp_no = $2, hire_date = $3, job = $4, \
             salary = $5, dept_id = $6, mng_id = $7 WHERE emp_id = $8 RETURNING {}",
            EMPLOYEE_COLUMNS
        );
        let stored = sqlx::query_as::<_, Employee>(&sql)
            .bind(&employee.emp_name)
            .bind(&employee.emp_no)
            .bind(employee.hire_date)
            .bind(&employee.job)
            .bind(employee.salary)
            .bind(employee.dept_id)
            .bind(employee.mng_id)
            .bind(employee.emp_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(stored)
    }

    async fn delete_employee(&self, emp_id: i32) -> Result<(), DatabaseError> {
        sqlx::query("DELETE FROM employees WHERE emp_id = $1")
            .bind(emp_id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn get_timecard(&self, timecard_id: i32) -> Result<Option<Timecard>, DatabaseError> {
        let sql = format!("SELECT {} FROM timecards WHERE timecard_id = $1", TIMECARD_COLUMNS);
        let timecard = sqlx::query_as::<_, Timecard>(&sql)
            .bind(timecard_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(timecard)
    }

    async fn get_all_timecards(&self, emp_id: i32) -> Result<Vec<Timecard>, DatabaseError> {
        let sql = format!(
            "SELECT {} FROM timecards WHERE emp_id = $1 ORDER BY start_time",
            TIMECARD_COLUMNS
        );
        let timecards = sqlx::query_as::<_, Timecard>(&sql)
            .bind(emp_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(timecards)
    }

    async fn insert_timecard(&self, timecard: Timecard) -> Result<Timecard, DatabaseError> {
        let sql = format!(
            "INSERT INTO timecards (start_time, end_time, emp_id) VALUES ($1, $2, $3) RETURNING {}",
            TIMECARD_COLUMNS
        );
        let stored = sqlx::query_as::<_, Timecard>(&sql)
            .bind(timecard.start_time)
            .bind(timecard.end_time)
            .bind(timecard.emp_id)
            .fetch_one(&self.pool)
            .await?;
        Ok(stored)
    }

    async fn update_timecard(&self, timecard: Timecard) -> Result<Option<Timecard>, DatabaseError> {
        let sql = format!(
            "UPDATE timecards SET start_time = $1, end_time = $2, emp_id = $3 WHERE timecard_id = $4 RETURNING {}",
            TIMECARD_COLUMNS
        );
        let stored = sqlx::query_as::<_, Timecard>(&sql)
            .bind(timecard.start_time)
            .bind(timecard.end_time)
            .bind(timecard.emp_id)
            .bind(timecard.timecard_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(stored)
    }

    async fn delete_timecard(&self, timecard_id: i32) -> Result<(), DatabaseError> {
        sqlx::query("DELETE FROM timecards WHERE timecard_id = $1")
            .bind(timecard_id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
