//! Login: form rules, the login call, and the persisted session token.

pub mod client;
pub mod flow;
pub mod form;
pub mod token_store;

pub use client::{AuthClient, LoginResponse};
pub use flow::{LoginFlow, LOGIN_SUCCESS};
pub use form::{LoginErrors, LoginForm};
pub use token_store::{FileTokenStore, MemoryTokenStore, TokenStore, TokenStoreError};
