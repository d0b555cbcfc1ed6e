// Identity boundary. Verifies the bearer token once and hands a typed principal
// to the inbound adapters. Use cases never see tokens or roles.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::shell::error::ApiError;
use crate::shell::state::AppState;

pub const ADMIN_ROLE: &str = "ADMIN";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AuthError {
    #[error("missing authorization header")]
    MissingToken,

    #[error("invalid authorization header format")]
    MalformedHeader,

    #[error("invalid token: {0}")]
    InvalidToken(String),

    #[error("{0} role required")]
    MissingRole(&'static str),
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::MissingRole(_) => ApiError::forbidden(err.to_string()),
            _ => ApiError::unauthorized(err.to_string()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    #[serde(default)]
    pub roles: Vec<String>,
    pub exp: i64,
}

/// A caller whose token verified. Roles are stored without the `ROLE_` prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedPrincipal {
    pub subject: String,
    pub roles: Vec<String>,
}

impl AuthenticatedPrincipal {
    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|granted| granted == role)
    }
}

/// A principal holding the ADMIN role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminPrincipal(pub AuthenticatedPrincipal);

impl TryFrom<AuthenticatedPrincipal> for AdminPrincipal {
    type Error = AuthError;

    fn try_from(principal: AuthenticatedPrincipal) -> Result<Self, Self::Error> {
        if principal.has_role(ADMIN_ROLE) {
            Ok(Self(principal))
        } else {
            Err(AuthError::MissingRole(ADMIN_ROLE))
        }
    }
}

/// HS256 verifier for tokens carrying a `roles` claim.
#[derive(Clone)]
pub struct JwtVerifier {
    decoding_key: DecodingKey,
    encoding_key: EncodingKey,
    validation: Validation,
}

impl JwtVerifier {
    pub fn new(secret: &str) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        Self {
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }

    pub fn verify(&self, token: &str) -> Result<AuthenticatedPrincipal, AuthError> {
        let data = decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|err| {
            tracing::warn!(error = %err, "token rejected");
            AuthError::InvalidToken(err.to_string())
        })?;
        let roles = data
            .claims
            .roles
            .into_iter()
            .map(|role| role.strip_prefix("ROLE_").map(str::to_string).unwrap_or(role))
            .collect();
        Ok(AuthenticatedPrincipal {
            subject: data.claims.sub,
            roles,
        })
    }

    /// Mints a token for the given subject. Used by tests and local tooling.
    pub fn issue(&self, subject: &str, roles: &[&str], ttl: chrono::Duration) -> Result<String, AuthError> {
        let claims = Claims {
            sub: subject.to_string(),
            roles: roles.iter().map(|r| r.to_string()).collect(),
            exp: (chrono::Utc::now() + ttl).timestamp(),
        };
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|err| AuthError::InvalidToken(err.to_string()))
    }
}

fn bearer_token(parts: &Parts) -> Result<&str, AuthError> {
    let header = parts
        .headers
        .get(AUTHORIZATION)
        .ok_or(AuthError::MissingToken)?
        .to_str()
        .map_err(|_| AuthError::MalformedHeader)?;
    header
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or(AuthError::MalformedHeader)
}

impl FromRequestParts<AppState> for AuthenticatedPrincipal {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let path = parts.uri.path().to_string();
        bearer_token(parts)
            .and_then(|token| state.auth.verify(token))
            .map_err(|err| ApiError::from(err).at(path))
    }
}

impl FromRequestParts<AppState> for AdminPrincipal {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let principal = AuthenticatedPrincipal::from_request_parts(parts, state).await?;
        AdminPrincipal::try_from(principal).map_err(|err| {
            tracing::warn!(path = %parts.uri.path(), "admin route refused");
            ApiError::from(err).at(parts.uri.path())
        })
    }
}
