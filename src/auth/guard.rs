//! Request guard for back-office routes.
//!
//! The token comes from `Authorization: Bearer <jwt>` or the `admin_token`
//! cookie set at login. Missing or invalid tokens are rejected with 401;
//! permission checks against the role table yield 403.

use super::{Claims, Permission};
use crate::error::{AppError, AppResult};
use crate::SharedState;
use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::header::{AUTHORIZATION, COOKIE};
use axum::http::request::Parts;
use axum::http::HeaderMap;
use uuid::Uuid;

/// Cookie carrying the admin token
pub const AUTH_COOKIE: &str = "admin_token";

/// An authenticated admin, extracted from the request
#[derive(Debug, Clone)]
pub struct AdminSession {
    pub claims: Claims,
}

impl AdminSession {
    pub fn user_id(&self) -> Uuid {
        self.claims.sub
    }

    /// Allow when the caller's role grants `permission`
    pub fn require(&self, permission: Permission) -> AppResult<()> {
        if self.claims.role.has(permission) {
            Ok(())
        } else {
            Err(AppError::Forbidden(format!(
                "Missing permission: {}",
                permission.as_str()
            )))
        }
    }

    /// Allow when the role grants at least one of `permissions`
    pub fn require_any(&self, permissions: &[Permission]) -> AppResult<()> {
        match permissions.iter().find(|p| self.claims.role.has(**p)) {
            Some(_) => Ok(()),
            None => Err(AppError::Forbidden(format!(
                "Missing permission: {}",
                permissions
                    .iter()
                    .map(|p| p.as_str())
                    .collect::<Vec<_>>()
                    .join(" or ")
            ))),
        }
    }
}

fn bearer_token(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    let token = token.trim();
    (!token.is_empty()).then(|| token.to_string())
}

fn cookie_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, value)| *name == AUTH_COOKIE && !value.is_empty())
        .map(|(_, value)| value.to_string())
}

/// Extract the raw token from either transport; the header wins
pub fn extract_token(headers: &HeaderMap) -> Option<String> {
    bearer_token(headers).or_else(|| cookie_token(headers))
}

#[async_trait]
impl FromRequestParts<SharedState> for AdminSession {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &SharedState) -> Result<Self, Self::Rejection> {
        let token = extract_token(&parts.headers)
            .ok_or_else(|| AppError::Unauthorized("Authentication required".into()))?;

        let claims = state.tokens.verify(&token)?;
        Ok(Self { claims })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::Role;
    use axum::http::HeaderValue;

    #[test]
    fn test_bearer_token_extraction() {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer abc.def.ghi"));
        assert_eq!(extract_token(&headers).as_deref(), Some("abc.def.ghi"));

        headers.insert(AUTHORIZATION, HeaderValue::from_static("Basic dXNlcjpwYXNz"));
        assert_eq!(extract_token(&headers), None);
    }

    #[test]
    fn test_cookie_token_extraction() {
        let mut headers = HeaderMap::new();
        headers.insert(
            COOKIE,
            HeaderValue::from_static("theme=dark; admin_token=abc.def.ghi; lang=en"),
        );
        assert_eq!(extract_token(&headers).as_deref(), Some("abc.def.ghi"));
    }

    #[test]
    fn test_header_wins_over_cookie() {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_static("bearer from-header"));
        headers.insert(COOKIE, HeaderValue::from_static("admin_token=from-cookie"));
        assert_eq!(extract_token(&headers).as_deref(), Some("from-header"));
    }

    #[test]
    fn test_require_permission() {
        let session = AdminSession {
            claims: Claims {
                sub: Uuid::new_v4(),
                email: "sales@tourdesk.test".into(),
                role: Role::Sales,
                permissions: Role::Sales.permission_names(),
                iat: 0,
                exp: 0,
            },
        };

        assert!(session.require(Permission::ManageLeads).is_ok());
        assert!(matches!(
            session.require(Permission::ManageTrips),
            Err(AppError::Forbidden(_))
        ));
        assert!(session
            .require_any(&[Permission::ApproveListings, Permission::ManageDistribution])
            .is_ok());
    }
}
