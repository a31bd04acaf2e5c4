pub mod audit;

pub use audit::{AuditEntryDto, AuditHistoryDto};
