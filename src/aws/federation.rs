//! Wire-level pieces of the AWS federation endpoint: the session descriptor
//! sent to `getSigninToken`, the token response, query construction and the
//! HTTP transport used to reach it.

use std::{collections::BTreeMap, time::Duration};

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;
use url::Url;

use super::Credentials;
use crate::{
    constants::{
        ACTION_GET_SIGNIN_TOKEN, FEDERATION_CONNECT_TIMEOUT_SECS, FEDERATION_REQUEST_TIMEOUT_SECS,
    },
    deadline::Deadline,
    error::{LoginError, NetworkError, ParseError},
};

/// Session credentials format for AWS federation getSigninToken API
#[derive(Debug, Serialize)]
pub struct SessionDescriptor<'a> {
    #[serde(rename = "sessionId")]
    session_id: &'a str,
    #[serde(rename = "sessionKey")]
    session_key: &'a str,
    #[serde(rename = "sessionToken")]
    session_token: &'a str,
}

impl<'a> From<&'a Credentials> for SessionDescriptor<'a> {
    fn from(creds: &'a Credentials) -> Self {
        Self {
            session_id: &creds.access_key_id,
            session_key: &creds.secret_access_key,
            session_token: &creds.session_token,
        }
    }
}

impl SessionDescriptor<'_> {
    pub fn to_json(&self) -> Result<String, LoginError> {
        serde_json::to_string(self).map_err(LoginError::Encoding)
    }
}

/// Response from AWS federation getSigninToken API
#[derive(Debug, Deserialize)]
struct SigninTokenResponse {
    #[serde(rename = "SigninToken")]
    signin_token: Option<String>,
}

/// Extract the sign-in token from a `getSigninToken` response body
pub fn parse_signin_token(body: &str) -> Result<String, ParseError> {
    let response: SigninTokenResponse = serde_json::from_str(body).map_err(ParseError::Json)?;
    response
        .signin_token
        .ok_or(ParseError::MissingSigninToken)
}

/// Set `params` on the query of `base`.
///
/// Parameters already present on `base` are kept unless one of `params`
/// uses the same key, in which case every existing value for it is
/// replaced. Keys come out sorted.
pub fn prepare_request(base: &str, params: &[(&str, &str)]) -> Result<Url, LoginError> {
    let mut url = Url::parse(base).map_err(|source| LoginError::Url {
        url: base.to_string(),
        source,
    })?;

    let mut query: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for (key, value) in url.query_pairs() {
        query
            .entry(key.into_owned())
            .or_default()
            .push(value.into_owned());
    }
    for (key, value) in params {
        query.insert((*key).to_string(), vec![(*value).to_string()]);
    }

    {
        let mut pairs = url.query_pairs_mut();
        pairs.clear();
        for (key, values) in &query {
            for value in values {
                pairs.append_pair(key, value);
            }
        }
    }
    if url.query() == Some("") {
        url.set_query(None);
    }

    Ok(url)
}

/// Status and body of a federation endpoint reply
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    pub status: u16,
    pub body: String,
}

impl TransportResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Issues GET requests to the federation endpoint
#[async_trait]
pub trait FederationTransport: Send + Sync {
    async fn get(&self, url: &Url) -> Result<TransportResponse, NetworkError>;
}

/// [`FederationTransport`] backed by a reqwest client
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new() -> Result<Self, reqwest::Error> {
        Self::with_timeout(Duration::from_secs(FEDERATION_REQUEST_TIMEOUT_SECS))
    }

    /// Client whose individual requests give up after `timeout`
    pub fn with_timeout(timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .connect_timeout(timeout.min(Duration::from_secs(FEDERATION_CONNECT_TIMEOUT_SECS)))
            .timeout(timeout)
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl FederationTransport for HttpTransport {
    async fn get(&self, url: &Url) -> Result<TransportResponse, NetworkError> {
        let response = self.client.get(url.as_str()).send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        Ok(TransportResponse { status, body })
    }
}

/// Get signin token from AWS federation endpoint
pub async fn get_signin_token<T: FederationTransport + ?Sized>(
    transport: &T,
    federation_url: &str,
    creds: &Credentials,
    deadline: Deadline,
) -> Result<String, LoginError> {
    let session = SessionDescriptor::from(creds).to_json()?;

    let url = prepare_request(
        federation_url,
        &[
            ("Action", ACTION_GET_SIGNIN_TOKEN),
            ("SessionType", "json"),
            ("Session", &session),
        ],
    )?;

    debug!("Requesting signin token from {}", federation_url);
    let response = deadline
        .run(transport.get(&url))
        .await
        .map_err(|expired| NetworkError::DeadlineExceeded(expired.0))??;

    if !response.is_success() {
        debug!("Federation endpoint replied {}: {}", response.status, response.body);
        return Err(LoginError::Http {
            status: response.status,
            body: response.body,
        });
    }

    Ok(parse_signin_token(&response.body)?)
}
