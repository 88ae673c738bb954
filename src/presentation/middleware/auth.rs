//! Authentication Middleware
//!
//! Bearer token verification for protected routes.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use axum_extra::headers::{authorization::Bearer, Authorization, HeaderMapExt};

use crate::shared::error::AppError;
use crate::startup::AppState;

/// Verify the bearer token and expose its claims to the handler.
///
/// Handlers read the verified [`ClaimSet`](crate::domain::ClaimSet) through
/// `Extension` and hand it to their command; resolving it into a principal
/// happens in the application layer.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let Authorization(bearer) = request
        .headers()
        .typed_get::<Authorization<Bearer>>()
        .ok_or_else(|| AppError::Unauthorized("Missing authorization header".into()))?;

    let claims = state.jwt.verify(bearer.token())?;

    request.extensions_mut().insert(claims);

    Ok(next.run(request).await)
}
