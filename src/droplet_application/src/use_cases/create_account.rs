use droplet_core::{
    AccountDraft, AccountStore, AppError, DeviceDraft, ErrorCode, GetUserFilter, SettingsDraft,
    TokenPrincipal, UserStore,
};
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use crate::cancel::cancellable;

#[derive(Debug)]
pub struct CreateAccountOptions {
    pub user_id: Uuid,
    pub device_name: String,
    pub device_os: String,
    pub device_mac_address: String,
    pub active: bool,
    pub account_language: String,
}

#[derive(Debug)]
pub struct CreateAccountOutput {
    pub id: Uuid,
    pub user_id: Uuid,
}

/// Create-account use case: builds the aggregate with one initial device and
/// a settings record, and persists it atomically.
pub struct CreateAccountUseCase<'a, U, S>
where
    U: UserStore,
    S: AccountStore,
{
    users: &'a U,
    accounts: &'a S,
}

impl<'a, U, S> CreateAccountUseCase<'a, U, S>
where
    U: UserStore,
    S: AccountStore,
{
    pub fn new(users: &'a U, accounts: &'a S) -> Self {
        Self { users, accounts }
    }

    #[tracing::instrument(
        name = "CreateAccountUseCase::execute",
        skip_all,
        fields(user_id = %options.user_id)
    )]
    pub async fn execute(
        &self,
        cancel: &CancellationToken,
        principal: &TokenPrincipal,
        options: CreateAccountOptions,
    ) -> Result<CreateAccountOutput, AppError> {
        // A caller may only create accounts for itself. A mismatched target
        // reads as absent rather than disclosing other users.
        if options.user_id != principal.user_id {
            tracing::info!("target user does not match authenticated principal");
            return Err(AppError::business(ErrorCode::UserNotFound));
        }

        let filter = GetUserFilter::by_id(options.user_id);
        let user = cancellable(cancel, self.users.get_user(&filter))
            .await
            .map_err(|e| AppError::unexpected("create account aborted", e))?
            .map_err(|e| AppError::unexpected("failed to get user", e))?;
        let Some(user) = user else {
            tracing::info!("user not found");
            return Err(AppError::business(ErrorCode::UserNotFound));
        };

        // Settings are created even when the language is empty.
        let draft = AccountDraft {
            user_id: user.id,
            devices: vec![DeviceDraft {
                name: options.device_name,
                os: options.device_os,
                mac_address: options.device_mac_address,
                active: options.active,
            }],
            settings: Some(SettingsDraft {
                language: options.account_language,
            }),
        };

        let created = cancellable(cancel, self.accounts.create_account(draft))
            .await
            .map_err(|e| AppError::unexpected("create account aborted", e))?
            .map_err(|e| AppError::unexpected("failed to create account", e))?;

        tracing::info!(account_id = %created.id, "account successfully created");
        Ok(CreateAccountOutput {
            id: created.id,
            user_id: created.user_id,
        })
    }
}
