use uuid::Uuid;

use super::{email::Email, password::PasswordDigest};

/// A registered user and its credential material.
///
/// Users are created at sign-up and never deleted by this core. The password
/// digest is the only mutable credential field.
#[derive(Debug, Clone)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: Email,
    pub password_digest: PasswordDigest,
    /// MAC address captured at registration, if the client supplied one.
    pub mac_address: Option<String>,
}

/// A user as handed to the store for creation; the store assigns the id.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: Email,
    pub password_digest: PasswordDigest,
    pub mac_address: Option<String>,
}
