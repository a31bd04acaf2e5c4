// src/infrastructure/security/token.rs
use crate::application::error::{ApplicationError, ApplicationResult};
use crate::application::ports::security::{TokenClaims, TokenVerifier};
use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use jsonwebtoken::{decode, decode_header, Algorithm, DecodingKey, Validation};
use serde::Deserialize;

const RSA_ALGORITHMS: &[Algorithm] = &[Algorithm::RS256, Algorithm::RS384, Algorithm::RS512];
const HMAC_ALGORITHMS: &[Algorithm] = &[Algorithm::HS256, Algorithm::HS384, Algorithm::HS512];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum VerifyMode {
    Rsa,
    Hmac,
}

/// JWS verifier over a single configured key.
///
/// The mode is fixed at construction: verification material that parses as
/// an RSA public key in PEM form selects RSA, anything else is used as a
/// raw HMAC secret. A token whose declared algorithm family disagrees with
/// the mode is rejected before any signature work.
pub struct JwtVerifier {
    key: DecodingKey,
    mode: VerifyMode,
}

#[derive(Debug, Deserialize)]
struct RawClaims {
    #[serde(default)]
    sub: Option<String>,
    #[serde(default)]
    exp: Option<i64>,
    #[serde(default)]
    iat: Option<i64>,
    #[serde(default)]
    iss: Option<String>,
}

impl JwtVerifier {
    pub fn new(secret: &str) -> Self {
        match DecodingKey::from_rsa_pem(secret.as_bytes()) {
            Ok(key) => Self {
                key,
                mode: VerifyMode::Rsa,
            },
            Err(_) => Self {
                key: DecodingKey::from_secret(secret.as_bytes()),
                mode: VerifyMode::Hmac,
            },
        }
    }

    pub fn is_rsa(&self) -> bool {
        self.mode == VerifyMode::Rsa
    }

    fn algorithms(&self) -> &'static [Algorithm] {
        match self.mode {
            VerifyMode::Rsa => RSA_ALGORITHMS,
            VerifyMode::Hmac => HMAC_ALGORITHMS,
        }
    }

    fn validate(&self, token: &str) -> ApplicationResult<TokenClaims> {
        let header = decode_header(token)
            .map_err(|err| ApplicationError::unauthorized(format!("failed to parse token: {err}")))?;

        if !self.algorithms().contains(&header.alg) {
            return Err(ApplicationError::unauthorized(format!(
                "unexpected signing method: {:?}",
                header.alg
            )));
        }

        // exp and iat are checked by hand below: the token may omit both,
        // and exp must be strictly in the future with no leeway.
        let mut validation = Validation::new(header.alg);
        validation.validate_exp = false;
        validation.validate_aud = false;
        validation.required_spec_claims = Default::default();

        let data = decode::<RawClaims>(token, &self.key, &validation)
            .map_err(|err| ApplicationError::unauthorized(format!("failed to parse token: {err}")))?;

        let now = Utc::now().timestamp();
        if let Some(exp) = data.claims.exp {
            if exp <= now {
                return Err(ApplicationError::unauthorized("token expired"));
            }
        }
        if let Some(iat) = data.claims.iat {
            if iat > now {
                return Err(ApplicationError::unauthorized("token used before issued"));
            }
        }

        Ok(TokenClaims {
            subject: data.claims.sub.unwrap_or_default(),
            expires_at: data.claims.exp.and_then(timestamp_to_datetime),
            issued_at: data.claims.iat.and_then(timestamp_to_datetime),
            issuer: data.claims.iss,
        })
    }
}

#[async_trait]
impl TokenVerifier for JwtVerifier {
    async fn verify(&self, token: &str) -> ApplicationResult<TokenClaims> {
        self.validate(token)
    }

    async fn extract_subject(&self, token: &str) -> ApplicationResult<String> {
        let claims = self.validate(token)?;
        if claims.subject.is_empty() {
            return Err(ApplicationError::unauthorized("no subject in token"));
        }
        Ok(claims.subject)
    }
}

fn timestamp_to_datetime(secs: i64) -> Option<DateTime<Utc>> {
    Utc.timestamp_opt(secs, 0).single()
}
