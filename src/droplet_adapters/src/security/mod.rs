pub mod argon2_hasher;
pub mod clock;
pub mod jwt;

pub use argon2_hasher::Argon2PasswordHasher;
pub use clock::SystemClock;
pub use jwt::{JwtTokenAuthority, SigningKeyError};
