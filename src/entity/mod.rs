pub mod audit_logs;
pub mod members;
pub mod products;
pub mod wishes;

pub use audit_logs::Entity as AuditLogs;
pub use members::Entity as Members;
pub use products::Entity as Products;
pub use wishes::Entity as Wishes;
