use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use std::convert::Infallible;

pub const USER_ID_HEADER: &str = "x-user-id";

/// Caller id taken from the optional `X-User-ID` header.
///
/// The header is informational: it records who created a resource and is
/// never used to authorize a request.
#[derive(Debug, Clone)]
pub struct OptionalUserId(pub Option<String>);

#[async_trait]
impl<S> FromRequestParts<S> for OptionalUserId
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user_id = parts
            .headers
            .get(USER_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(str::to_string);

        if let Some(id) = &user_id {
            tracing::Span::current().record("user_id", id.as_str());
        }

        Ok(OptionalUserId(user_id))
    }
}
