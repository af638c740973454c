pub mod manager;
pub mod memory;
pub mod models;
pub mod postgres;
pub mod repository;

pub use manager::{DatabaseError, DatabaseManager};
pub use memory::MemoryCompanyRepository;
pub use postgres::PgCompanyRepository;
pub use repository::{CompanyRepository, SharedRepository};
