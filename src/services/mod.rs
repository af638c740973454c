pub mod company_service;
pub mod department_service;
pub mod employee_service;
pub mod keyed_lock;
pub mod timecard_service;

pub use company_service::CompanyService;
pub use department_service::DepartmentService;
pub use employee_service::EmployeeService;
pub use keyed_lock::KeyedLocks;
pub use timecard_service::TimecardService;
