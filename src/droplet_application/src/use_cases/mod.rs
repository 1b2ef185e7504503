pub mod create_account;
pub mod get_account;
pub mod sign_in;
pub mod sign_up;
pub mod update_account;
pub mod verify_token;
