pub mod security;
pub mod stores;
