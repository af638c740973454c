use chrono::NaiveDate;

use crate::api::EmployeeParams;
use crate::database::models::{Employee, NO_MANAGER};
use crate::database::repository::CompanyRepository;
use crate::error::ApiError;

use super::clock::Clock;
use super::fields::{check_company, is_no_manager, parse_id, parse_salary, require_all, supplied};
use super::temporal::BusinessCalendar;

/// Employee rules. Checks run in a fixed order and the first failure wins.
pub struct EmployeeValidator<'a> {
    repository: &'a dyn CompanyRepository,
    calendar: &'a BusinessCalendar,
    clock: &'a dyn Clock,
}

impl<'a> EmployeeValidator<'a> {
    pub fn new(repository: &'a dyn CompanyRepository, calendar: &'a BusinessCalendar, clock: &'a dyn Clock) -> Self {
        Self {
            repository,
            calendar,
            clock,
        }
    }

    /// Validate a new employee and coerce its numeric fields.
    /// The returned record has `emp_id == 0` until it is stored.
    pub async fn validate_create(&self, params: &EmployeeParams) -> Result<Employee, ApiError> {
        require_all(
            &[
                &params.company,
                &params.emp_name,
                &params.emp_no,
                &params.hire_date,
                &params.job,
                &params.salary,
                &params.dept_id,
            ],
            "All required fields must be provided",
        )?;
        let company = value(&params.company);
        check_company(company)?;

        let dept_id = self.check_department(company, value(&params.dept_id)).await?;
        let hire_date = self.check_hire_date(value(&params.hire_date))?;
        let mng_id = match supplied(&params.mng_id) {
            Some(raw) => self.check_manager(raw).await?,
            None => NO_MANAGER,
        };

        Ok(Employee {
            emp_id: 0,
            emp_name: value(&params.emp_name).to_string(),
            emp_no: value(&params.emp_no).to_string(),
            hire_date,
            job: value(&params.job).to_string(),
            salary: parse_salary(value(&params.salary))?,
            dept_id,
            mng_id,
        })
    }

    /// Validate an update and merge unsupplied fields from the stored employee.
    pub async fn validate_update(&self, params: &EmployeeParams) -> Result<Employee, ApiError> {
        require_all(&[&params.company, &params.emp_id], "Company and employee ID are required")?;
        let emp_id = parse_id("emp_id", value(&params.emp_id))?;

        let existing = self
            .repository
            .get_employee(emp_id)
            .await?
            .ok_or_else(|| ApiError::not_found("Employee not found"))?;

        let company = value(&params.company);
        check_company(company)?;

        let dept_id = match supplied(&params.dept_id) {
            Some(raw) => self.check_department(company, raw).await?,
            None => existing.dept_id,
        };
        let hire_date = match supplied(&params.hire_date) {
            Some(raw) => self.check_hire_date(raw)?,
            None => existing.hire_date,
        };
        let mng_id = match supplied(&params.mng_id) {
            Some(raw) => self.check_manager(raw).await?,
            None => existing.mng_id,
        };
        let salary = match supplied(&params.salary) {
            Some(raw) => parse_salary(raw)?,
            None => existing.salary,
        };

        Ok(Employee {
            emp_id,
            emp_name: supplied(&params.emp_name).map_or(existing.emp_name, str::to_string),
            emp_no: supplied(&params.emp_no).map_or(existing.emp_no, str::to_string),
            hire_date,
            job: supplied(&params.job).map_or(existing.job, str::to_string),
            salary,
            dept_id,
            mng_id,
        })
    }

    /// `emp_id` for reads and deletes
    pub fn validate_lookup(params: &EmployeeParams) -> Result<i32, ApiError> {
        require_all(
            &[&params.company, &params.emp_id],
            "Both company name and employee ID are required",
        )?;
        parse_id("emp_id", value(&params.emp_id))
    }

    async fn check_department(&self, company: &str, raw: &str) -> Result<i32, ApiError> {
        let dept_id = parse_id("dept_id", raw)?;
        match self.repository.get_department(company, dept_id).await? {
            Some(_) => Ok(dept_id),
            None => Err(ApiError::not_found("Department does not exist in your company")),
        }
    }

    /// Parses, then rejects future dates and weekend dates. The stored date
    /// is the one the client wrote; the checks use the parsed instant.
    fn check_hire_date(&self, raw: &str) -> Result<NaiveDate, ApiError> {
        let (hired, written) = self
            .calendar
            .parse_written(raw)
            .ok_or_else(|| ApiError::invalid_date("Invalid hire date format"))?;

        if hired > self.clock.now() {
            return Err(ApiError::invalid_date("Hire date cannot be in the future"));
        }
        if !self.calendar.is_weekday(&hired) {
            return Err(ApiError::invalid_time_window("Hire date must be a weekday"));
        }

        Ok(written)
    }

    /// Returns NO_MANAGER for the "0" sentinel without a lookup
    async fn check_manager(&self, raw: &str) -> Result<i32, ApiError> {
        if is_no_manager(raw) {
            return Ok(NO_MANAGER);
        }
        let mng_id = parse_id("mng_id", raw)?;
        match self.repository.get_employee(mng_id).await? {
            Some(_) => Ok(mng_id),
            None => Err(ApiError::not_found("Manager does not exist")),
        }
    }
}

fn value(field: &Option<String>) -> &str {
    supplied(field).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::memory::MemoryCompanyRepository;
    use crate::database::models::Department;
    use crate::validation::clock::FixedClock;
    use chrono::{TimeZone, Utc};

    struct Fixture {
        repo: MemoryCompanyRepository,
        calendar: BusinessCalendar,
        clock: FixedClock,
        dept_id: i32,
    }

    impl Fixture {
        async fn new() -> Self {
            let repo = MemoryCompanyRepository::new();
            let dept = repo
                .insert_department(Department::new("ab1234", "Eng", "10", "NY"))
                .await
                .unwrap();
            Self {
                repo,
                calendar: BusinessCalendar::default(),
                clock: FixedClock(Utc.with_ymd_and_hms(2024, 6, 3, 12, 0, 0).unwrap()),
                dept_id: dept.dept_id,
            }
        }

        fn validator(&self) -> EmployeeValidator<'_> {
            EmployeeValidator::new(&self.repo, &self.calendar, &self.clock)
        }

        fn params(&self) -> EmployeeParams {
            EmployeeParams {
                company: Some("ab1234".to_string()),
                emp_id: None,
                emp_name: Some("Ada".to_string()),
                emp_no: Some("e-100".to_string()),
                hire_date: Some("2024-03-04".to_string()),
                job: Some("Engineer".to_string()),
                salary: Some("85000.5".to_string()),
                dept_id: Some(self.dept_id.to_string()),
                mng_id: None,
            }
        }
    }

    #[tokio::test]
    async fn create_coerces_fields_and_defaults_manager() {
        let fx = Fixture::new().await;
        let employee = fx.validator().validate_create(&fx.params()).await.unwrap();
        assert_eq!(employee.salary, 85000.5);
        assert_eq!(employee.dept_id, fx.dept_id);
        assert_eq!(employee.mng_id, NO_MANAGER);
        assert!(!employee.has_manager());
        assert_eq!(employee.hire_date, NaiveDate::from_ymd_opt(2024, 3, 4).unwrap());
    }

    #[tokio::test]
    async fn zero_salary_counts_as_supplied() {
        let fx = Fixture::new().await;
        let mut p = fx.params();
        p.salary = Some("0".to_string());
        let employee = fx.validator().validate_create(&p).await.unwrap();
        assert_eq!(employee.salary, 0.0);
    }

    #[tokio::test]
    async fn missing_field_short_circuits() {
        let fx = Fixture::new().await;
        let mut p = fx.params();
        p.job = None;
        p.company = Some("BAD".to_string());
        assert_eq!(
            fx.validator().validate_create(&p).await,
            Err(ApiError::missing_field("All required fields must be provided"))
        );
    }

    #[tokio::test]
    async fn rejects_bad_company() {
        let fx = Fixture::new().await;
        let mut p = fx.params();
        p.company = Some("abcd12".to_string());
        assert_eq!(
            fx.validator().validate_create(&p).await,
            Err(ApiError::invalid_format("Company must be a valid RIT username"))
        );
    }

    #[tokio::test]
    async fn department_must_belong_to_company() {
        let fx = Fixture::new().await;
        let mut p = fx.params();
        p.company = Some("cd5678".to_string());
        assert_eq!(
            fx.validator().validate_create(&p).await,
            Err(ApiError::not_found("Department does not exist in your company"))
        );
    }

    #[tokio::test]
    async fn saturday_hire_date_is_rejected() {
        let fx = Fixture::new().await;
        let mut p = fx.params();
        p.hire_date = Some("2024-03-02".to_string());
        assert_eq!(
            fx.validator().validate_create(&p).await,
            Err(ApiError::invalid_time_window("Hire date must be a weekday"))
        );
        assert!(fx.repo.get_all_employees("ab1234").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn future_and_garbage_hire_dates() {
        let fx = Fixture::new().await;
        let mut p = fx.params();
        p.hire_date = Some("2024-06-04".to_string());
        assert_eq!(
            fx.validator().validate_create(&p).await,
            Err(ApiError::invalid_date("Hire date cannot be in the future"))
        );

        p.hire_date = Some("yesterday".to_string());
        assert_eq!(
            fx.validator().validate_create(&p).await,
            Err(ApiError::invalid_date("Invalid hire date format"))
        );
    }

    #[tokio::test]
    async fn manager_must_exist_unless_zero() {
        let fx = Fixture::new().await;
        let mut p = fx.params();
        p.mng_id = Some("0".to_string());
        assert_eq!(fx.validator().validate_create(&p).await.unwrap().mng_id, NO_MANAGER);

        p.mng_id = Some("77".to_string());
        assert_eq!(
            fx.validator().validate_create(&p).await,
            Err(ApiError::not_found("Manager does not exist"))
        );

        let boss = fx.repo.insert_employee(fx.validator().validate_create(&fx.params()).await.unwrap()).await.unwrap();
        p.mng_id = Some(boss.emp_id.to_string());
        p.emp_no = Some("e-101".to_string());
        let employee = fx.validator().validate_create(&p).await.unwrap();
        assert_eq!(employee.mng_id, boss.emp_id);
        assert!(employee.has_manager());
    }

    #[tokio::test]
    async fn update_merges_unsupplied_fields() {
        let fx = Fixture::new().await;
        let stored = fx
            .repo
            .insert_employee(fx.validator().validate_create(&fx.params()).await.unwrap())
            .await
            .unwrap();

        let update = EmployeeParams {
            company: Some("ab1234".to_string()),
            emp_id: Some(stored.emp_id.to_string()),
            job: Some("Manager".to_string()),
            ..Default::default()
        };
        let merged = fx.validator().validate_update(&update).await.unwrap();
        assert_eq!(merged, Employee { job: "Manager".to_string(), ..stored });
    }

    #[tokio::test]
    async fn update_rechecks_supplied_fields() {
        let fx = Fixture::new().await;
        let stored = fx
            .repo
            .insert_employee(fx.validator().validate_create(&fx.params()).await.unwrap())
            .await
            .unwrap();

        let mut update = EmployeeParams {
            company: Some("ab1234".to_string()),
            emp_id: Some(stored.emp_id.to_string()),
            hire_date: Some("2024-03-09".to_string()),
            ..Default::default()
        };
        assert_eq!(
            fx.validator().validate_update(&update).await,
            Err(ApiError::invalid_time_window("Hire date must be a weekday"))
        );

        update.hire_date = None;
        update.dept_id = Some("999".to_string());
        assert_eq!(
            fx.validator().validate_update(&update).await,
            Err(ApiError::not_found("Department does not exist in your company"))
        );
    }

    #[tokio::test]
    async fn update_requires_existing_employee() {
        let fx = Fixture::new().await;
        let update = EmployeeParams {
            company: Some("ab1234".to_string()),
            emp_id: Some("404".to_string()),
            ..Default::default()
        };
        assert_eq!(
            fx.validator().validate_update(&update).await,
            Err(ApiError::not_found("Employee not found"))
        );
        assert_eq!(
            fx.validator().validate_update(&EmployeeParams::default()).await,
            Err(ApiError::missing_field("Company and employee ID are required"))
        );
    }
}
