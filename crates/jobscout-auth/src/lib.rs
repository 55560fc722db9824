//! Jobscout Authentication Layer
//!
//! Handles signing in to the job site before any scraping happens.
//!
//! # Credential Sources
//!
//! 1. **Credential file**: two lines, username/email first, password second
//! 2. **Manual entry**: the binary prompts and hands the values to [`Credentials::new`]
//!
//! Passwords live in [`Zeroizing`] buffers and are redacted from `Debug` output.
//!
//! # Login Flow
//!
//! [`login`] drives any [`BrowserActions`] implementation: open the login page,
//! fill both fields, submit, then poll for a marker that only exists once
//! signed in. Landing on the site's verification checkpoint instead is
//! reported separately, since it needs a human.

use jobscout_browser::{BrowserActions, BrowserError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;
use zeroize::Zeroizing;

/// Authentication errors
#[derive(Debug, Error)]
pub enum AuthError {
    /// Credential file is missing
    #[error(
        "could not find credential file {path}; put your username on line 1 and password on line 2, or use --manual-login"
    )]
    CredentialsNotFound {
        /// Where the file was expected
        path: String,
    },

    /// Credential file exists but is unusable
    #[error("malformed credentials: {0}")]
    MalformedCredentials(String),

    /// The site did not accept the sign-in
    #[error("login failed: {0}")]
    LoginFailed(String),

    /// The site wants a human to pass a verification challenge
    #[error("login requires manual verification at {url}")]
    VerificationRequired {
        /// Challenge page URL
        url: String,
    },

    /// Browser failure during the flow
    #[error("browser error during login: {0}")]
    Browser(#[from] BrowserError),

    /// I/O error reading the credential file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for authentication operations
pub type Result<T> = std::result::Result<T, AuthError>;

/// Username and password for the job site
#[derive(Clone)]
pub struct Credentials {
    username: String,
    password: Zeroizing<String>,
}

impl Credentials {
    /// Create credentials from already-collected values.
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Result<Self> {
        let username = username.into().trim().to_string();
        let password = Zeroizing::new(password.into());

        if username.is_empty() {
            return Err(AuthError::MalformedCredentials(
                "username is empty".to_string(),
            ));
        }
        if password.is_empty() {
            return Err(AuthError::MalformedCredentials(
                "password is empty".to_string(),
            ));
        }

        Ok(Self { username, password })
    }

    /// Read credentials from a two-line file.
    ///
    /// Only the first two lines are used, each trimmed.
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = match std::fs::read_to_string(path) {
            Ok(contents) => Zeroizing::new(contents),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(AuthError::CredentialsNotFound {
                    path: path.display().to_string(),
                });
            }
            Err(e) => return Err(e.into()),
        };

        let mut lines = contents.lines().map(str::trim);
        let (Some(username), Some(password)) = (lines.next(), lines.next()) else {
            return Err(AuthError::MalformedCredentials(format!(
                "{} must contain a username line and a password line",
                path.display()
            )));
        };

        Self::new(username, password)
    }

    /// Username or email
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Password, only for handing to the login form
    pub fn password(&self) -> &str {
        &self.password
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// CSS selectors and markers of the site's login page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoginForm {
    /// Selector for the username/email input
    pub username_input: String,
    /// Selector for the password input
    pub password_input: String,
    /// Selector for the submit button
    pub submit_button: String,
    /// Selector that only matches once signed in
    pub success_indicator: String,
    /// URL fragment of the verification checkpoint page
    pub challenge_marker: String,
}

impl Default for LoginForm {
    fn default() -> Self {
        Self {
            username_input: "#username".to_string(),
            password_input: "#password".to_string(),
            submit_button: "button[type='submit']".to_string(),
            success_indicator: "#global-nav".to_string(),
            challenge_marker: "/checkpoint/challenge".to_string(),
        }
    }
}

/// Sign in through the browser session.
///
/// The session keeps its cookies afterwards, so this runs once per run.
pub async fn login<B>(
    browser: &B,
    credentials: &Credentials,
    login_url: &str,
    form: &LoginForm,
    timeout: Duration,
) -> Result<()>
where
    B: BrowserActions + ?Sized,
{
    let timeout_ms = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX);

    tracing::info!(username = %credentials.username(), "Logging in");
    browser.navigate(login_url).await?;
    browser
        .wait_for_selector(&form.username_input, timeout_ms)
        .await?;

    browser
        .fill_field(&form.username_input, credentials.username())
        .await?;
    browser
        .fill_field(&form.password_input, credentials.password())
        .await?;
    browser.click(&form.submit_button).await?;

    match browser
        .wait_for_selector(&form.success_indicator, timeout_ms)
        .await
    {
        Ok(()) => {
            tracing::info!("Login successful");
            Ok(())
        }
        Err(BrowserError::Timeout(_)) => {
            let url = browser.current_url().await?;
            if url.contains(&form.challenge_marker) {
                Err(AuthError::VerificationRequired { url })
            } else {
                Err(AuthError::LoginFailed(format!(
                    "still not signed in after {timeout:?} (ended on {url}); check the username and password"
                )))
            }
        }
        Err(e) => Err(e.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use tempfile::TempDir;

    /// Scripted login page: records every fill, and decides where the
    /// submit button leads.
    struct ScriptedLoginPage {
        after_submit_url: String,
        signed_in: bool,
        submitted: Mutex<bool>,
        filled: Mutex<Vec<(String, String)>>,
    }

    impl ScriptedLoginPage {
        fn new(after_submit_url: &str, signed_in: bool) -> Self {
            Self {
                after_submit_url: after_submit_url.to_string(),
                signed_in,
                submitted: Mutex::new(false),
                filled: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait::async_trait]
    impl BrowserActions for ScriptedLoginPage {
        async fn navigate(&self, _url: &str) -> jobscout_browser::Result<()> {
            Ok(())
        }

        async fn fill_field(&self, selector: &str, value: &str) -> jobscout_browser::Result<()> {
            self.filled
                .lock()
                .unwrap()
                .push((selector.to_string(), value.to_string()));
            Ok(())
        }

        async fn click(&self, _selector: &str) -> jobscout_browser::Result<()> {
            *self.submitted.lock().unwrap() = true;
            Ok(())
        }

        async fn wait_for_selector(
            &self,
            selector: &str,
            _timeout_ms: u64,
        ) -> jobscout_browser::Result<()> {
            let submitted = *self.submitted.lock().unwrap();
            if !submitted || self.signed_in {
                Ok(())
            } else {
                Err(BrowserError::Timeout(selector.to_string()))
            }
        }

        async fn page_html(&self) -> jobscout_browser::Result<String> {
            Ok(String::new())
        }

        async fn current_url(&self) -> jobscout_browser::Result<String> {
            Ok(self.after_submit_url.clone())
        }
    }

    fn creds() -> Credentials {
        Credentials::new("me@example.com", "hunter2").expect("valid credentials")
    }

    #[test]
    fn test_credentials_from_file() {
        let tmp = TempDir::new().expect("create temp dir");
        let path = tmp.path().join("login.txt");
        std::fs::write(&path, "  me@example.com \nhunter2\nignored third line\n")
            .expect("write credential file");

        let creds = Credentials::from_file(&path).expect("read credentials");
        assert_eq!(creds.username(), "me@example.com");
        assert_eq!(creds.password(), "hunter2");
    }

    #[test]
    fn test_credentials_missing_file() {
        let tmp = TempDir::new().expect("create temp dir");
        let err = Credentials::from_file(&tmp.path().join("login.txt"))
            .expect_err("missing file should fail");
        assert!(matches!(err, AuthError::CredentialsNotFound { .. }));
        assert!(err.to_string().contains("--manual-login"));
    }

    #[test]
    fn test_credentials_single_line() {
        let tmp = TempDir::new().expect("create temp dir");
        let path = tmp.path().join("login.txt");
        std::fs::write(&path, "me@example.com\n").expect("write credential file");

        let err = Credentials::from_file(&path).expect_err("one line should fail");
        assert!(matches!(err, AuthError::MalformedCredentials(_)));
    }

    #[test]
    fn test_debug_redacts_password() {
        let rendered = format!("{:?}", creds());
        assert!(rendered.contains("me@example.com"));
        assert!(!rendered.contains("hunter2"));
    }

    #[tokio::test]
    async fn test_login_success_fills_both_fields() {
        let page = ScriptedLoginPage::new("https://site.test/feed/", true);
        let form = LoginForm::default();

        login(
            &page,
            &creds(),
            "https://site.test/login",
            &form,
            Duration::from_secs(1),
        )
        .await
        .expect("login should succeed");

        let filled = page.filled.lock().unwrap().clone();
        assert_eq!(
            filled,
            vec![
                (form.username_input.clone(), "me@example.com".to_string()),
                (form.password_input.clone(), "hunter2".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn test_login_challenge_detected() {
        let page = ScriptedLoginPage::new("https://site.test/checkpoint/challenge/abc", false);

        let err = login(
            &page,
            &creds(),
            "https://site.test/login",
            &LoginForm::default(),
            Duration::from_secs(1),
        )
        .await
        .expect_err("challenge should fail the login");

        assert!(matches!(err, AuthError::VerificationRequired { .. }));
    }

    #[tokio::test]
    async fn test_login_rejected() {
        let page = ScriptedLoginPage::new("https://site.test/login?error=1", false);

        let err = login(
            &page,
            &creds(),
            "https://site.test/login",
            &LoginForm::default(),
            Duration::from_secs(1),
        )
        .await
        .expect_err("wrong password should fail the login");

        assert!(matches!(err, AuthError::LoginFailed(_)));
        assert!(!err.to_string().contains("hunter2"));
    }
}
