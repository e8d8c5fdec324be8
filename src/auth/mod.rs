pub mod credentials;
pub mod session;

pub use credentials::CredentialStore;
pub use session::SessionKey;
