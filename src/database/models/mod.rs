pub mod department;
pub mod employee;
pub mod timecard;

pub use department::Department;
pub use employee::{Employee, NO_MANAGER};
pub use timecard::Timecard;
