use std::time::Duration;

use thiserror::Error;

use crate::browser::BrowserError;

pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Every way the console login can fail. None of these are retried.
#[derive(Debug, Error)]
pub enum LoginError {
    #[error("failed to resolve AWS credentials")]
    Credential(#[from] CredentialError),

    #[error("failed to encode session descriptor")]
    Encoding(#[source] serde_json::Error),

    #[error("sign-in token request failed")]
    Network(#[from] NetworkError),

    #[error("federation endpoint returned HTTP {status}")]
    Http { status: u16, body: String },

    #[error("invalid sign-in token response")]
    Parse(#[from] ParseError),

    #[error("invalid federation URL '{url}'")]
    Url {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("failed to open browser")]
    BrowserLaunch(#[from] BrowserError),
}

#[derive(Debug, Error)]
pub enum CredentialError {
    #[error("no credentials provider found in the default chain")]
    NoProvider,

    #[error("credentials provider chain returned an error")]
    Provider(#[source] BoxError),

    #[error("credentials have no session token; console sign-in requires temporary credentials")]
    MissingSessionToken,

    #[error("credential resolution exceeded the {0:?} deadline")]
    DeadlineExceeded(Duration),
}

#[derive(Debug, Error)]
pub enum NetworkError {
    #[error("request exceeded the {0:?} deadline")]
    DeadlineExceeded(Duration),

    #[error("request timed out")]
    TimedOut(#[source] BoxError),

    #[error("transport failure")]
    Transport(#[source] BoxError),
}

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("response body is not valid JSON")]
    Json(#[source] serde_json::Error),

    #[error("response has no SigninToken field")]
    MissingSigninToken,
}

impl LoginError {
    /// Whether the failure came from the deadline or a transport timeout
    pub fn is_timeout(&self) -> bool {
        match self {
            Self::Credential(e) => e.is_timeout(),
            Self::Network(e) => e.is_timeout(),
            _ => false,
        }
    }
}

impl CredentialError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::DeadlineExceeded(_))
    }
}

impl NetworkError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::DeadlineExceeded(_) | Self::TimedOut(_))
    }
}

impl From<reqwest::Error> for NetworkError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            Self::TimedOut(Box::new(e))
        } else {
            Self::Transport(Box::new(e))
        }
    }
}
