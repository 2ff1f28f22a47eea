use std::fmt;

pub mod console;
pub mod credentials;
pub mod federation;

/// AWS temporary credentials structure
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub access_key_id: String,
    pub secret_access_key: String,
    pub session_token: String,
}

// Keep secrets out of logs and panic messages
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &"** redacted **")
            .field("session_token", &"** redacted **")
            .finish()
    }
}

// Re-export commonly used types (functions should be accessed via module path)
pub use console::LoginFlow;
pub use credentials::{CredentialSource, ProviderChain};
pub use federation::{FederationTransport, HttpTransport, SessionDescriptor};
