use std::sync::Arc;

use crate::infrastructure::repositories::AuditRepository;

pub struct AuditQueryService {
    pub(super) repository: Arc<AuditRepository>,
    pub(super) default_page_size: i64,
    pub(super) max_page_size: i64,
}

impl AuditQueryService {
    pub fn new(repository: Arc<AuditRepository>, default_page_size: i64, max_page_size: i64) -> Self {
        Self {
            repository,
            default_page_size,
            max_page_size,
        }
    }
}
