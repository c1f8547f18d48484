use crate::Result;
use async_trait::async_trait;
use std::fmt;
use std::time::Duration;
use url::Url;

/// Form inputs the save pipeline needs to fill.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    Email,
    Password,
    Multiline,
}

/// Names a UI element by what a user would perceive, not by markup.
///
/// The save pipeline only ever refers to elements through locators; the
/// translation to concrete selectors happens inside the driver, so markup
/// changes stay contained there.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Locator {
    /// Element whose rendered text equals the string.
    Text(String),
    /// Element whose accessible label equals the string.
    Label(String),
    /// Element whose accessible label contains the substring.
    LabelContains(String),
    /// Element with the given ARIA role.
    Role(&'static str),
    /// Form input of the given kind.
    Input(InputKind),
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Locator::Text(t) => write!(f, "text \"{t}\""),
            Locator::Label(l) => write!(f, "label \"{l}\""),
            Locator::LabelContains(l) => write!(f, "label containing \"{l}\""),
            Locator::Role(r) => write!(f, "role \"{r}\""),
            Locator::Input(InputKind::Email) => write!(f, "email input"),
            Locator::Input(InputKind::Password) => write!(f, "password input"),
            Locator::Input(InputKind::Multiline) => write!(f, "text area"),
        }
    }
}

/// HTTP status of the main document response of a navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageStatus(pub u16);

impl PageStatus {
    pub fn code(&self) -> u16 {
        self.0
    }

    pub fn success(&self) -> bool {
        (200..300).contains(&self.0)
    }
}

/// Capability interface over one browser page.
///
/// The session controller, list resolution engine and save sequencer depend
/// only on this trait; the chromiumoxide driver implements it for a real
/// browser and tests script it.
///
/// All waits are I/O suspension points. A `None` timeout waits without bound.
#[async_trait]
pub trait UiDriver: Send {
    /// Navigate to a URL and report the main document's HTTP status.
    async fn navigate(&mut self, url: &Url) -> Result<PageStatus>;

    /// Reload the current page.
    async fn reload(&mut self) -> Result<()>;

    /// Whether the session currently carries a cookie with this name.
    async fn has_cookie(&mut self, name: &str) -> Result<bool>;

    /// Wait until an element matching the locator exists.
    async fn wait_for(&mut self, locator: &Locator, timeout: Option<Duration>) -> Result<()>;

    /// Whether an element matching the locator exists right now.
    async fn is_present(&mut self, locator: &Locator) -> Result<bool>;

    /// Click the first element matching the locator.
    async fn click(&mut self, locator: &Locator) -> Result<()>;

    /// Focus the element and type text into it.
    async fn type_text(&mut self, locator: &Locator, text: &str) -> Result<()>;

    /// Press Enter on the element and wait for the navigation it triggers.
    ///
    /// The navigation watch must be armed before the keypress so a fast
    /// navigation cannot slip past between the two steps.
    async fn press_enter_and_wait(
        &mut self,
        locator: &Locator,
        timeout: Option<Duration>,
    ) -> Result<()>;

    /// Wait for the next navigation. Only navigations that start after this
    /// call resolve the wait; an idle page keeps it pending.
    async fn wait_for_navigation(&mut self, timeout: Option<Duration>) -> Result<()>;
}
