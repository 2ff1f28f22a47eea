use tracing::{debug, info};
use url::Url;

use super::{
    CredentialSource, Credentials,
    federation::{self, FederationTransport},
};
use crate::{
    constants::{ACTION_LOGIN, DEFAULT_CONSOLE_URL, DEFAULT_FEDERATION_URL},
    deadline::Deadline,
    error::{CredentialError, LoginError},
};

/// Turns the ambient AWS credentials into a one-time console login URL
#[derive(Debug, Clone)]
pub struct LoginFlow<C, T> {
    credentials: C,
    transport: T,
    federation_url: String,
    console_url: String,
}

impl<C, T> LoginFlow<C, T>
where
    C: CredentialSource,
    T: FederationTransport,
{
    pub fn new(credentials: C, transport: T) -> Self {
        Self {
            credentials,
            transport,
            federation_url: DEFAULT_FEDERATION_URL.to_string(),
            console_url: DEFAULT_CONSOLE_URL.to_string(),
        }
    }

    pub fn federation_url(mut self, url: impl Into<String>) -> Self {
        self.federation_url = url.into();
        self
    }

    pub fn console_url(mut self, url: impl Into<String>) -> Self {
        self.console_url = url.into();
        self
    }

    /// Resolve credentials, exchange them for a sign-in token and build the login URL
    pub async fn login_url(&self, deadline: Deadline) -> Result<Url, LoginError> {
        let creds = self.resolve_credentials(deadline).await?;

        let signin_token =
            federation::get_signin_token(&self.transport, &self.federation_url, &creds, deadline)
                .await?;
        info!("Obtained signin token from {}", self.federation_url);

        self.prepare_login_request(&signin_token)
    }

    async fn resolve_credentials(&self, deadline: Deadline) -> Result<Credentials, LoginError> {
        debug!(
            "Resolving AWS credentials ({:?} of {:?} left)",
            deadline.remaining(),
            deadline.budget()
        );
        let creds = deadline
            .run(self.credentials.resolve())
            .await
            .map_err(|expired| CredentialError::DeadlineExceeded(expired.0))??;
        Ok(creds)
    }

    fn prepare_login_request(&self, signin_token: &str) -> Result<Url, LoginError> {
        federation::prepare_request(
            &self.federation_url,
            &[
                ("Action", ACTION_LOGIN),
                ("Destination", &self.console_url),
                ("SigninToken", signin_token),
            ],
        )
    }
}
