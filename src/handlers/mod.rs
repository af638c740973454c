// One module per resource. Handlers stay thin: extract parameters, call the
// service, wrap the result.
pub mod company;
pub mod department;
pub mod employee;
pub mod system;
pub mod timecard;
