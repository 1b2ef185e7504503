use droplet_core::{AppError, ErrorCode, TokenAuthority, TokenPrincipal};
use tokio_util::sync::CancellationToken;

use crate::cancel::Cancelled;

/// Token verification use case.
///
/// Accepts both a raw compact token and the `Bearer <token>` header form.
/// Every rejection cause collapses to `invalid_token`; the parse cause is
/// logged by the authority and never surfaced to callers.
pub struct VerifyTokenUseCase<'a, T>
where
    T: TokenAuthority,
{
    tokens: &'a T,
}

impl<'a, T> VerifyTokenUseCase<'a, T>
where
    T: TokenAuthority,
{
    pub fn new(tokens: &'a T) -> Self {
        Self { tokens }
    }

    #[tracing::instrument(name = "VerifyTokenUseCase::execute", skip_all)]
    pub fn execute(
        &self,
        cancel: &CancellationToken,
        access_token: &str,
    ) -> Result<TokenPrincipal, AppError> {
        if cancel.is_cancelled() {
            return Err(AppError::unexpected("verify token aborted", Cancelled));
        }

        let token = strip_bearer(access_token);
        if token.is_empty() {
            tracing::info!("empty auth token");
            return Err(AppError::business(ErrorCode::InvalidToken));
        }

        self.tokens.verify(token).map_err(|e| {
            tracing::info!(error = %e, "token rejected");
            AppError::business(ErrorCode::InvalidToken)
        })
    }
}

/// Strips an optional `Bearer` prefix; the transport may or may not have
/// done so already.
fn strip_bearer(raw: &str) -> &str {
    let raw = raw.trim();
    match raw.strip_prefix("Bearer ") {
        Some(rest) => rest.trim(),
        None => raw,
    }
}
