use droplet_core::{
    AppError, Email, ErrorCode, GetUserFilter, Password, PasswordHashError, PasswordHasher,
    TokenAuthority, UserStore,
};
use tokio_util::sync::CancellationToken;

use crate::cancel::cancellable;

#[derive(Debug)]
pub struct SignInOptions {
    pub email: Email,
    pub password: Password,
}

#[derive(Debug)]
pub struct SignInOutput {
    pub access_token: String,
}

/// Sign-in use case: verifies credentials and mints an access token.
///
/// `user_not_found` and `wrong_password` are deliberately distinguishable;
/// the check order below is fixed.
pub struct SignInUseCase<'a, U, H, T>
where
    U: UserStore,
    H: PasswordHasher,
    T: TokenAuthority,
{
    users: &'a U,
    hasher: &'a H,
    tokens: &'a T,
}

impl<'a, U, H, T> SignInUseCase<'a, U, H, T>
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

    #[tracing::instrument(
        name = "SignInUseCase::execute",
        skip_all,
        fields(email = %options.email)
    )]
    pub async fn execute(
        &self,
        cancel: &CancellationToken,
        options: SignInOptions,
    ) -> Result<SignInOutput, AppError> {
        let filter = GetUserFilter::by_email(options.email.clone());
        let user = cancellable(cancel, self.users.get_user(&filter))
            .await
            .map_err(|e| AppError::unexpected("sign in aborted", e))?
            .map_err(|e| AppError::unexpected("failed to get user", e))?;
        let Some(user) = user else {
            tracing::info!("user not found");
            return Err(AppError::business(ErrorCode::UserNotFound));
        };

        match self
            .hasher
            .verify(&user.password_digest, &options.password)
            .await
        {
            Ok(()) => {}
            Err(PasswordHashError::Mismatch) => {
                tracing::info!("wrong password");
                return Err(AppError::business(ErrorCode::WrongPassword));
            }
            Err(e) => return Err(AppError::unexpected("failed to compare password hash", e)),
        }

        let access_token = self
            .tokens
            .mint(user.id, &user.username)
            .map_err(|e| AppError::unexpected("failed to generate token for user", e))?;

        tracing::info!(user_id = %user.id, "successfully signed user");
        Ok(SignInOutput { access_token })
    }
}
