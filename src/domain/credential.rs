// src/domain/credential.rs
use chrono::{DateTime, Utc};

/// A validated identity assertion, good for the lifetime of one request.
///
/// `Bearer` is produced from a verified signed token and carries the subject;
/// `Share` is produced from a matching share grant and carries no user
/// identity at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Credential {
    Bearer {
        user_id: String,
        expires_at: Option<DateTime<Utc>>,
    },
    Share {
        session_id: String,
        expires_at: Option<DateTime<Utc>>,
    },
}

impl Credential {
    pub fn is_share(&self) -> bool {
        matches!(self, Credential::Share { .. })
    }

    /// Subject of the credential, present only on the bearer variant.
    pub fn user_id(&self) -> Option<&str> {
        match self {
            Credential::Bearer { user_id, .. } => Some(user_id),
            Credential::Share { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn share_credential_has_no_user_identity() {
        let cred = Credential::Share {
            session_id: "sess".into(),
            expires_at: None,
        };
        assert!(cred.is_share());
        assert_eq!(cred.user_id(), None);
    }

    #[test]
    fn bearer_credential_exposes_subject() {
        let cred = Credential::Bearer {
            user_id: "user-1".into(),
            expires_at: None,
        };
        assert!(!cred.is_share());
        assert_eq!(cred.user_id(), Some("user-1"));
    }
}
