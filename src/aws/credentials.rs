use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_credential_types::provider::ProvideCredentials;
use tracing::{debug, info};

use super::Credentials;
use crate::error::CredentialError;

/// Somewhere the login flow can get credentials from
#[async_trait]
pub trait CredentialSource: Send + Sync {
    async fn resolve(&self) -> Result<Credentials, CredentialError>;
}

/// The standard AWS credential provider chain
/// (environment, shared config/credentials files, SSO, container and instance metadata)
#[derive(Debug, Clone, Default)]
pub struct ProviderChain {
    profile: Option<String>,
}

impl ProviderChain {
    pub fn new(profile: Option<String>) -> Self {
        Self { profile }
    }
}

#[async_trait]
impl CredentialSource for ProviderChain {
    async fn resolve(&self) -> Result<Credentials, CredentialError> {
        let mut loader = aws_config::defaults(BehaviorVersion::latest());
        if let Some(profile) = &self.profile {
            debug!("Profile: {}", profile);
            loader = loader.profile_name(profile);
        }
        let config = loader.load().await;

        let provider = config
            .credentials_provider()
            .ok_or(CredentialError::NoProvider)?;

        let creds = provider
            .provide_credentials()
            .await
            .map_err(|e| CredentialError::Provider(Box::new(e)))?;

        let credentials = Credentials::try_from(&creds)?;

        info!("Resolved AWS credentials for {}", credentials.access_key_id);
        Ok(credentials)
    }
}

impl TryFrom<&aws_credential_types::Credentials> for Credentials {
    type Error = CredentialError;

    fn try_from(creds: &aws_credential_types::Credentials) -> Result<Self, Self::Error> {
        let session_token = creds
            .session_token()
            .filter(|token| !token.is_empty())
            .ok_or(CredentialError::MissingSessionToken)?;

        Ok(Self {
            access_key_id: creds.access_key_id().to_string(),
            secret_access_key: creds.secret_access_key().to_string(),
            session_token: session_token.to_string(),
        })
    }
}
