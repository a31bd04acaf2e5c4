pub mod entity;

pub use entity::{actions, AuditEntry, Session, ShareGrant};
