use crate::driver::UiDriver;
use crate::{Result, ui_map};
use std::time::Duration;

/// Upper bound on the navigations inside the login form itself. Challenge
/// completion (2FA) is waited for separately and is unbounded by default.
const LOGIN_NAV_TIMEOUT: Duration = Duration::from_secs(30);

/// Owns the credentials for the one authenticated browser session.
pub struct SessionController {
    email: String,
    password: String,
    challenge_timeout: Option<Duration>,
}

impl SessionController {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
            challenge_timeout: None,
        }
    }

    /// Bound the wait for out-of-band sign-in challenges. Without a bound the
    /// wait blocks until a human resolves the challenge in the browser.
    pub fn with_challenge_timeout(mut self, timeout: Duration) -> Self {
        self.challenge_timeout = Some(timeout);
        self
    }

    /// Sign in unless the session already carries the authenticated cookie.
    ///
    /// Idempotent: checking the cookie is the only work on an already
    /// authenticated session.
    pub async fn ensure_signed_in(&self, driver: &mut dyn UiDriver) -> Result<()> {
        if driver.has_cookie(ui_map::AUTH_COOKIE).await? {
            tracing::debug!("Session already authenticated");
            return Ok(());
        }

        tracing::debug!("Signing in as {}", self.email);
        let sign_in = ui_map::sign_in_link();
        driver.wait_for(&sign_in, Some(LOGIN_NAV_TIMEOUT)).await?;
        driver.click(&sign_in).await?;

        let email_input = ui_map::email_input();
        driver.wait_for(&email_input, Some(LOGIN_NAV_TIMEOUT)).await?;
        driver.type_text(&email_input, &self.email).await?;
        driver
            .press_enter_and_wait(&email_input, Some(LOGIN_NAV_TIMEOUT))
            .await?;

        let password_input = ui_map::password_input();
        driver
            .wait_for(&password_input, Some(LOGIN_NAV_TIMEOUT))
            .await?;
        driver.type_text(&password_input, &self.password).await?;
        driver
            .press_enter_and_wait(&password_input, Some(LOGIN_NAV_TIMEOUT))
            .await?;

        tracing::debug!("Waiting for any additional sign-in challenge");
        driver.wait_for_navigation(self.challenge_timeout).await?;

        Ok(())
    }
}
