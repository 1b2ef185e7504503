use droplet_core::{
    Account, AccountStore, AccountUpdate, AppError, ErrorCode, GetAccountFilter, TokenPrincipal,
};
use tokio_util::sync::CancellationToken;

use crate::cancel::cancellable;

/// Update-account use case: applies a change set with full-aggregate
/// semantics. Default-valued fields in the change set overwrite stored
/// values; they are never skipped.
pub struct UpdateAccountUseCase<'a, S>
where
    S: AccountStore,
{
    accounts: &'a S,
}

impl<'a, S> UpdateAccountUseCase<'a, S>
where
    S: AccountStore,
{
    pub fn new(accounts: &'a S) -> Self {
        Self { accounts }
    }

    #[tracing::instrument(
        name = "UpdateAccountUseCase::execute",
        skip_all,
        fields(account_id = %update.id)
    )]
    pub async fn execute(
        &self,
        cancel: &CancellationToken,
        principal: &TokenPrincipal,
        update: AccountUpdate,
    ) -> Result<Account, AppError> {
        // Ownership transfer is not a thing; the change set must keep the
        // account under its authenticated owner.
        if update.user_id != principal.user_id {
            tracing::info!("account not owned by authenticated principal");
            return Err(AppError::business(ErrorCode::AccountNotFound));
        }

        let filter = GetAccountFilter::owned_by(update.id, principal.user_id);
        let existing = cancellable(cancel, self.accounts.get_account(&filter))
            .await
            .map_err(|e| AppError::unexpected("update account aborted", e))?
            .map_err(|e| AppError::unexpected("failed to get account", e))?;
        if existing.is_none() {
            tracing::info!("account not found");
            return Err(AppError::business(ErrorCode::AccountNotFound));
        }

        let updated = cancellable(cancel, self.accounts.update_account(update))
            .await
            .map_err(|e| AppError::unexpected("update account aborted", e))?
            .map_err(|e| AppError::unexpected("failed to update account", e))?;
        let Some(updated) = updated else {
            tracing::info!("account not found");
            return Err(AppError::business(ErrorCode::AccountNotFound));
        };

        tracing::info!("account successfully updated");
        Ok(updated)
    }
}
