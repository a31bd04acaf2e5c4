use super::AuditQueryService;
use crate::application::{
    dto::{AuditEntryDto, AuditHistoryDto},
    error::{ApplicationError, ApplicationResult},
};
use crate::domain::{credential::Credential, errors::DomainError, pagination::Pagination};

pub struct GetHistoryQuery {
    pub session_id: String,
    pub pagination: Pagination,
}

impl AuditQueryService {
    /// Fetch one page of audit history for a session.
    ///
    /// Bearer credentials must own the session; a share credential already
    /// proved session-scoped access when it was issued, so no ownership
    /// lookup happens on that path.
    pub async fn get_history(
        &self,
        credential: &Credential,
        query: GetHistoryQuery,
    ) -> ApplicationResult<AuditHistoryDto> {
        let pagination = query
            .pagination
            .normalized(self.default_page_size, self.max_page_size);

        if let Credential::Bearer { user_id, .. } = credential {
            self.ensure_ownership(&query.session_id, user_id).await?;
        }

        let (entries, total_count) = self
            .repository
            .find_by_session_id(&query.session_id, pagination.limit, pagination.offset)
            .await
            .map_err(promote_session_not_found)?;

        tracing::info!(
            session_id = %query.session_id,
            count = entries.len(),
            total = total_count,
            share_token = credential.is_share(),
            "audit history retrieved"
        );

        Ok(AuditHistoryDto {
            total_count,
            items: entries.into_iter().map(AuditEntryDto::from).collect(),
        })
    }

    async fn ensure_ownership(&self, session_id: &str, user_id: &str) -> ApplicationResult<()> {
        let session = self
            .repository
            .get_session(session_id)
            .await
            .map_err(promote_session_not_found)?;

        if session.user_id != user_id {
            tracing::warn!(
                session_id,
                requesting_user_id = %user_id,
                owner_user_id = %session.user_id,
                "unauthorized access attempt"
            );
            return Err(ApplicationError::forbidden("not the session owner"));
        }

        Ok(())
    }
}

fn promote_session_not_found(err: DomainError) -> ApplicationError {
    match err {
        DomainError::SessionNotFound => ApplicationError::not_found("session not found"),
        other => ApplicationError::from(other),
    }
}
