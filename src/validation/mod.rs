pub mod clock;
pub mod department;
pub mod employee;
pub mod fields;
pub mod temporal;
pub mod timecard;

pub use clock::{Clock, FixedClock, SharedClock, SystemClock};
pub use department::DepartmentValidator;
pub use employee::EmployeeValidator;
pub use temporal::BusinessCalendar;
pub use timecard::TimecardValidator;
