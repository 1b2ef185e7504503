use droplet_core::{
    AppError, Email, ErrorCode, GetUserFilter, NewUser, Password, PasswordHasher, TokenAuthority,
    UserStore, UserStoreError,
};
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use crate::cancel::cancellable;

#[derive(Debug)]
pub struct SignUpOptions {
    pub email: Email,
    pub username: String,
    pub password: Password,
    pub mac_address: Option<String>,
}

#[derive(Debug)]
pub struct SignUpOutput {
    pub id: Uuid,
    pub username: String,
    pub email: Email,
    pub access_token: String,
}

/// Sign-up use case: registers a user and mints its first access token.
pub struct SignUpUseCase<'a, U, H, T>
where
    U: UserStore,
    H: PasswordHasher,
    T: TokenAuthority,
{
    users: &'a U,
    hasher: &'a H,
    tokens: &'a T,
}

impl<'a, U, H, T> SignUpUseCase<'a, U, H, T>
where
    U: UserStore,
    H: PasswordHasher,
    T: TokenAuthority,
{
    pub fn new(users: &'a U, hasher: &'a H, tokens: &'a T) -> Self {
        Self {
            users,
            hasher,
            tokens,
        }
    }

    /// Registers a new user.
    ///
    /// Fails with `user_already_created` when the email is taken, either by
    /// the pre-check or by the store's uniqueness constraint when two
    /// sign-ups race.
    #[tracing::instrument(
        name = "SignUpUseCase::execute",
        skip_all,
        fields(email = %options.email)
    )]
    pub async fn execute(
        &self,
        cancel: &CancellationToken,
        options: SignUpOptions,
    ) -> Result<SignUpOutput, AppError> {
        let filter = GetUserFilter::by_email(options.email.clone());
        let existing = cancellable(cancel, self.users.get_user(&filter))
            .await
            .map_err(|e| AppError::unexpected("sign up aborted", e))?
            .map_err(|e| AppError::unexpected("failed to get user", e))?;
        if existing.is_some() {
            tracing::info!("user already created");
            return Err(AppError::business(ErrorCode::UserAlreadyCreated));
        }

        // CPU-bound and uninterruptible within a single call.
        let password_digest = self
            .hasher
            .hash(&options.password)
            .await
            .map_err(|e| AppError::unexpected("failed to hash user password", e))?;

        let new_user = NewUser {
            username: options.username,
            email: options.email,
            password_digest,
            mac_address: options.mac_address,
        };
        let created = cancellable(cancel, self.users.create_user(new_user))
            .await
            .map_err(|e| AppError::unexpected("sign up aborted", e))?
            .map_err(|e| match e {
                UserStoreError::EmailTaken => AppError::business(ErrorCode::UserAlreadyCreated),
                other => AppError::unexpected("failed to create user", other),
            })?;

        let access_token = self
            .tokens
            .mint(created.id, &created.username)
            .map_err(|e| AppError::unexpected("failed to generate token for user", e))?;

        tracing::info!(user_id = %created.id, "successfully handled sign up");
        Ok(SignUpOutput {
            id: created.id,
            username: created.username,
            email: created.email,
            access_token,
        })
    }
}
