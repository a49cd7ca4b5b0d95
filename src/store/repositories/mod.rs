pub mod audit_repository;
pub mod user_repository;

pub use audit_repository::AuditRepository;
pub use user_repository::UserRepository;
