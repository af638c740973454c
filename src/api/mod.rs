pub mod extract;
pub mod format;
pub mod params;

pub use extract::Params;
pub use format::TimecardView;
pub use params::{CompanyParams, DepartmentParams, EmployeeParams, TimecardParams};
