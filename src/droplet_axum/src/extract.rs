use axum::http::{HeaderMap, header::AUTHORIZATION};
use droplet_application::VerifyTokenUseCase;
use droplet_core::{AppError, ErrorCode, TokenAuthority, TokenPrincipal};
use tokio_util::sync::CancellationToken;

use crate::error::ApiError;

/// Resolves the authenticated principal from the `Authorization` header.
///
/// A missing header is the same failure as a bad token.
pub fn bearer_principal<T>(
    headers: &HeaderMap,
    tokens: &T,
    cancel: &CancellationToken,
) -> Result<TokenPrincipal, ApiError>
where
    T: TokenAuthority,
{
    let Some(raw) = headers.get(AUTHORIZATION).and_then(|v| v.to_str().ok()) else {
        tracing::info!("missing authorization header");
        return Err(ApiError::App(AppError::business(ErrorCode::InvalidToken)));
    };

    let use_case = VerifyTokenUseCase::new(tokens);
    let principal = use_case.execute(cancel, raw)?;
    Ok(principal)
}
