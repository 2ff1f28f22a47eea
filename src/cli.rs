use std::time::Duration;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use tracing::info;

use crate::{
    aws::{CredentialSource, FederationTransport, HttpTransport, LoginFlow, ProviderChain},
    browser::{BrowserLauncher, SystemBrowser},
    constants::{self, DEFAULT_TIMEOUT_SECS},
    deadline::Deadline,
    error::LoginError,
};

#[derive(Debug, Clone, Parser)]
#[command(name = "aws-login", version, about = "Open the AWS Management Console with your current AWS credentials", long_about = None)]
pub struct Cli {
    #[arg(short = 'p', long, help = "AWS profile name (defaults to the provider chain's choice)")]
    pub profile: Option<String>,

    #[arg(
        short = 'r',
        long,
        help = "AWS region, selects the partition's sign-in and console domains"
    )]
    pub region: Option<String>,

    #[arg(
        short = 't',
        long,
        default_value_t = DEFAULT_TIMEOUT_SECS,
        help = "Seconds allowed for credential resolution and the token request"
    )]
    pub timeout: u64,

    #[arg(long, env = "AWS_LOGIN_DESTINATION", help = "Console URL to land on after login")]
    pub destination: Option<String>,

    #[arg(long, env = "AWS_LOGIN_FEDERATION_URL", help = "AWS federation endpoint")]
    pub federation_url: Option<String>,

    #[arg(
        long,
        help = "Command used to open the login URL ('%s' is replaced by the URL, otherwise it is appended)"
    )]
    pub browser: Option<String>,

    #[arg(long, help = "Print the login URL instead of opening a browser")]
    pub print_url: bool,

    #[arg(short = 'v', long, action = ArgAction::Count, help = "Increase verbosity (-v info, -vv debug, -vvv trace)")]
    pub verbose: u8,
}

/// Endpoints and deadline for one login, resolved from flags and environment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginConfig {
    pub federation_url: String,
    pub console_url: String,
    pub timeout: Duration,
}

impl Cli {
    pub fn login_config(&self) -> LoginConfig {
        let region = self.region.as_deref().filter(|r| !r.is_empty());
        LoginConfig {
            federation_url: self
                .federation_url
                .clone()
                .unwrap_or_else(|| constants::federation_url_for(region)),
            console_url: self
                .destination
                .clone()
                .unwrap_or_else(|| constants::console_url_for(region)),
            timeout: Duration::from_secs(self.timeout),
        }
    }

    fn browser(&self) -> Result<SystemBrowser, LoginError> {
        match self.browser.as_deref() {
            Some(command) => Ok(SystemBrowser::with_command(command)?),
            None => Ok(SystemBrowser::default()),
        }
    }

    pub async fn execute(self) -> Result<()> {
        let transport = HttpTransport::new().context("Failed to build HTTP client")?;
        let credentials = ProviderChain::new(self.profile.clone());
        let browser = match self.print_url {
            true => None,
            false => Some(self.browser().context("Invalid --browser command")?),
        };

        run(&self.login_config(), credentials, transport, browser.as_ref()).await
    }
}

/// Produce the login URL and either open it or print it
pub async fn run<C, T, B>(
    config: &LoginConfig,
    credentials: C,
    transport: T,
    browser: Option<&B>,
) -> Result<()>
where
    C: CredentialSource,
    T: FederationTransport,
    B: BrowserLauncher,
{
    let flow = LoginFlow::new(credentials, transport)
        .federation_url(&config.federation_url)
        .console_url(&config.console_url);

    let url = flow
        .login_url(Deadline::after(config.timeout))
        .await
        .context("Failed to create AWS console login URL")?;

    match browser {
        Some(browser) => {
            browser
                .open(&url)
                .map_err(LoginError::from)
                .context("Failed to open login URL")?;
            info!("Opened AWS Management Console in browser");
        }
        None => println!("{url}"),
    }

    Ok(())
}
