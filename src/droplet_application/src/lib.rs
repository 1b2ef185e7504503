pub mod cancel;
pub mod use_cases;

pub use cancel::Cancelled;
pub use use_cases::{
    create_account::{CreateAccountOptions, CreateAccountOutput, CreateAccountUseCase},
    get_account::{GetAccountOptions, GetAccountUseCase},
    sign_in::{SignInOptions, SignInOutput, SignInUseCase},
    sign_up::{SignUpOptions, SignUpOutput, SignUpUseCase},
    update_account::UpdateAccountUseCase,
    verify_token::VerifyTokenUseCase,
};

#[cfg(test)]
pub(crate) mod testing;
