use std::{
    io,
    process::{Command, ExitStatus},
};

use thiserror::Error;
use tracing::debug;
use url::Url;

/// Placeholder replaced by the URL in a custom browser command
const URL_PLACEHOLDER: &str = "%s";

#[derive(Debug, Error)]
pub enum BrowserError {
    #[error("invalid browser command '{0}'")]
    InvalidCommand(String),

    #[error("failed to open the default browser")]
    Default(#[source] io::Error),

    #[error("failed to execute browser command '{program}'")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("browser command '{program}' returned error: {status}")]
    ExitStatus { program: String, status: ExitStatus },
}

/// Hands a URL to something that can show it to the user
pub trait BrowserLauncher {
    fn open(&self, url: &Url) -> Result<(), BrowserError>;
}

/// Opens URLs with the operating system's default browser,
/// or with an explicit browser command when one is configured
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SystemBrowser {
    #[default]
    Default,
    Command { program: String, args: Vec<String> },
}

impl SystemBrowser {
    /// Parse a shell-style command line such as `firefox --new-window`.
    ///
    /// Arguments containing `%s` get the URL substituted in; without any
    /// placeholder the URL is appended as the last argument.
    pub fn with_command(command: &str) -> Result<Self, BrowserError> {
        let mut words = shlex::split(command)
            .filter(|words| !words.is_empty())
            .ok_or_else(|| BrowserError::InvalidCommand(command.to_string()))?;
        let program = words.remove(0);
        Ok(Self::Command {
            program,
            args: words,
        })
    }
}

fn command_args(args: &[String], url: &str) -> Vec<String> {
    if args.iter().any(|arg| arg.contains(URL_PLACEHOLDER)) {
        args.iter()
            .map(|arg| arg.replace(URL_PLACEHOLDER, url))
            .collect()
    } else {
        args.iter()
            .cloned()
            .chain(std::iter::once(url.to_string()))
            .collect()
    }
}

impl BrowserLauncher for SystemBrowser {
    fn open(&self, url: &Url) -> Result<(), BrowserError> {
        let (program, args) = match self {
            Self::Default => {
                debug!("Launching default browser");
                return webbrowser::open(url.as_str()).map_err(BrowserError::Default);
            }
            Self::Command { program, args } => (program, args),
        };
        debug!("Launching browser with '{}'", program);

        let status = Command::new(program)
            .args(command_args(args, url.as_str()))
            .status()
            .map_err(|source| BrowserError::Spawn {
                program: program.clone(),
                source,
            })?;

        status
            .success()
            .then_some(())
            .ok_or_else(|| BrowserError::ExitStatus {
                program: program.clone(),
                status,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LOGIN_URL: &str = "https://signin.aws.amazon.com/federation?Action=login&Destination=https%3A%2F%2Fconsole.aws.amazon.com%2F&SigninToken=abc123";

    fn url() -> Url {
        Url::parse(LOGIN_URL).unwrap()
    }

    #[test]
    fn test_with_command_splits_arguments() {
        let browser = SystemBrowser::with_command("firefox --new-window").unwrap();
        assert_eq!(
            browser,
            SystemBrowser::Command {
                program: "firefox".to_string(),
                args: vec!["--new-window".to_string()],
            }
        );

        let browser =
            SystemBrowser::with_command(r#""/Applications/My Browser" --profile 'work'"#).unwrap();
        assert_eq!(
            browser,
            SystemBrowser::Command {
                program: "/Applications/My Browser".to_string(),
                args: vec!["--profile".to_string(), "work".to_string()],
            }
        );
    }

    #[test]
    fn test_with_command_rejects_empty_or_unbalanced() {
        assert!(matches!(
            SystemBrowser::with_command("   "),
            Err(BrowserError::InvalidCommand(_))
        ));
        assert!(matches!(
            SystemBrowser::with_command("firefox 'unterminated"),
            Err(BrowserError::InvalidCommand(_))
        ));
    }

    #[test]
    fn test_command_args_appends_url() {
        let args = command_args(&["--new-window".to_string()], LOGIN_URL);
        assert_eq!(args, vec!["--new-window".to_string(), LOGIN_URL.to_string()]);
    }

    #[test]
    fn test_command_args_substitutes_placeholder() {
        let args = command_args(
            &["--url=%s".to_string(), "--incognito".to_string()],
            LOGIN_URL,
        );
        assert_eq!(
            args,
            vec![format!("--url={LOGIN_URL}"), "--incognito".to_string()]
        );
    }

    #[test]
    #[cfg(unix)]
    fn test_command_with_arguments_receives_full_url() {
        // `test %s = <url>` only succeeds if the URL arrives intact, `&`s included
        let browser = SystemBrowser::with_command(&format!("test %s = '{LOGIN_URL}'")).unwrap();
        assert!(browser.open(&url()).is_ok());
    }

    #[test]
    #[cfg(unix)]
    fn test_failing_command() {
        let browser = SystemBrowser::with_command("false --new-window").unwrap();
        let err = browser.open(&url()).unwrap_err();
        assert!(matches!(err, BrowserError::ExitStatus { .. }));
    }

    #[test]
    fn test_missing_command() {
        let browser = SystemBrowser::with_command("aws-login-no-such-browser --flag").unwrap();
        let err = browser.open(&url()).unwrap_err();
        match err {
            BrowserError::Spawn { program, source } => {
                assert_eq!(program, "aws-login-no-such-browser");
                assert_eq!(source.kind(), io::ErrorKind::NotFound);
            }
            other => panic!("Expected spawn error, got {other:?}"),
        }
    }

    #[test]
    fn test_default_uses_system_browser() {
        assert_eq!(SystemBrowser::default(), SystemBrowser::Default);
    }
}
