use droplet_core::{Account, AccountStore, AppError, ErrorCode, GetAccountFilter};
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use crate::cancel::cancellable;

#[derive(Debug)]
pub struct GetAccountOptions {
    pub account_id: Uuid,
    /// Owner scope, taken from the authenticated principal.
    pub user_id: Uuid,
}

/// Get-account use case: loads the full aggregate scoped to its owner.
pub struct GetAccountUseCase<'a, S>
where
    S: AccountStore,
{
    accounts: &'a S,
}

impl<'a, S> GetAccountUseCase<'a, S>
where
    S: AccountStore,
{
    pub fn new(accounts: &'a S) -> Self {
        Self { accounts }
    }

    #[tracing::instrument(
        name = "GetAccountUseCase::execute",
        skip_all,
        fields(account_id = %options.account_id)
    )]
    pub async fn execute(
        &self,
        cancel: &CancellationToken,
        options: GetAccountOptions,
    ) -> Result<Account, AppError> {
        let filter = GetAccountFilter::owned_by(options.account_id, options.user_id);
        let account = cancellable(cancel, self.accounts.get_account(&filter))
            .await
            .map_err(|e| AppError::unexpected("get account aborted", e))?
            .map_err(|e| AppError::unexpected("failed to get account", e))?;
        let Some(account) = account else {
            tracing::info!("account not found");
            return Err(AppError::business(ErrorCode::AccountNotFound));
        };

        tracing::info!("successfully got account");
        Ok(account)
    }
}
