/// Federation endpoint of the standard AWS partition
pub const DEFAULT_FEDERATION_URL: &str = "https://signin.aws.amazon.com/federation";

/// Console page the login URL lands on in the standard AWS partition
pub const DEFAULT_CONSOLE_URL: &str = "https://console.aws.amazon.com/";

/// Overall deadline for credential resolution plus the token request
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Upper bound on a single federation request
pub const FEDERATION_REQUEST_TIMEOUT_SECS: u64 = 10;

/// Upper bound on establishing the federation connection
pub const FEDERATION_CONNECT_TIMEOUT_SECS: u64 = 5;

/// Domain of the standard AWS partition
pub const AWS_DOMAIN: &str = "aws.amazon.com";

/// Domain of the AWS GovCloud (US) partition
pub const AWS_US_GOV_DOMAIN: &str = "amazonaws-us-gov.com";

/// Domain of the AWS China partition
pub const AWS_CN_DOMAIN: &str = "amazonaws.cn";

/// Federation `Action` requesting a sign-in token
pub const ACTION_GET_SIGNIN_TOKEN: &str = "getSigninToken";

/// Federation `Action` performing the console login
pub const ACTION_LOGIN: &str = "login";

/// Get the sign-in/console domain for a region
pub fn console_domain(region: &str) -> &'static str {
    match region {
        r if r.starts_with("us-gov-") => AWS_US_GOV_DOMAIN,
        r if r.starts_with("cn-") => AWS_CN_DOMAIN,
        _ => AWS_DOMAIN,
    }
}

/// Federation endpoint for the partition the region belongs to
pub fn federation_url_for(region: Option<&str>) -> String {
    match region.map(console_domain) {
        None | Some(AWS_DOMAIN) => DEFAULT_FEDERATION_URL.to_string(),
        Some(domain) => format!("https://signin.{domain}/federation"),
    }
}

/// Console destination for the partition the region belongs to
pub fn console_url_for(region: Option<&str>) -> String {
    match region {
        None => DEFAULT_CONSOLE_URL.to_string(),
        Some(region) => {
            let domain = console_domain(region);
            format!("https://console.{domain}/console/home?region={region}")
        }
    }
}
