use crate::driver::{InputKind, Locator, PageStatus, UiDriver};
use crate::{Error, Result};
use async_trait::async_trait;
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::cdp::browser_protocol::network::{
    EventResponseReceived, Headers, ResourceType, SetExtraHttpHeadersParams,
};
use chromiumoxide::cdp::browser_protocol::page::EventFrameNavigated;
use chromiumoxide::{Element, Page};
use futures::StreamExt;
use std::path::Path;
use std::time::{Duration, Instant};
use tokio::task::JoinHandle;
use url::Url;

/// How often element waits re-query the page.
const POLL_INTERVAL: Duration = Duration::from_millis(250);

/// How long to wait for the main document response after navigation settles.
const RESPONSE_TIMEOUT: Duration = Duration::from_secs(10);

/// `UiDriver` backed by one Chrome page over the DevTools Protocol.
///
/// The browser is launched headful so a human can supervise sign-in
/// challenges, and the UI locale is pinned so the affordance map's text
/// lookups hold.
pub struct CdpDriver {
    browser: Browser,
    page: Page,
    handler_task: JoinHandle<()>,
}

impl CdpDriver {
    /// Launch Chrome and open the single page reused for the whole run.
    pub async fn launch(chrome_path: &Path) -> Result<Self> {
        tracing::debug!("Launching Chrome from {}", chrome_path.display());
        let config = BrowserConfig::builder()
            .chrome_executable(chrome_path)
            .with_head()
            .arg("--disable-blink-features=AutomationControlled")
            .build()
            .map_err(Error::Browser)?;

        let (browser, mut handler) = Browser::launch(config).await?;

        // The handler task must run for any page command to make progress.
        let handler_task = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(e) = event {
                    tracing::debug!("CDP handler event error (continuing): {e}");
                }
            }
        });

        let page = browser.new_page("about:blank").await?;
        page.execute(SetExtraHttpHeadersParams::new(Headers::new(
            serde_json::json!({ "accept-language": "en" }),
        )))
        .await?;

        Ok(Self {
            browser,
            page,
            handler_task,
        })
    }

    /// Close the browser and stop the CDP handler.
    pub async fn close(mut self) -> Result<()> {
        self.browser.close().await?;
        self.browser.wait().await?;
        self.handler_task.abort();
        Ok(())
    }

    async fn find(&self, locator: &Locator) -> Result<Element> {
        self.page
            .find_xpath(to_xpath(locator))
            .await
            .map_err(|_| Error::ElementMissing(locator.to_string()))
    }
}

#[async_trait]
impl UiDriver for CdpDriver {
    async fn navigate(&mut self, url: &Url) -> Result<PageStatus> {
        // Subscribe before navigating so the document response is not missed.
        let mut responses = self.page.event_listener::<EventResponseReceived>().await?;

        self.page.goto(url.as_str()).await?;
        self.page.wait_for_navigation().await?;

        let document_status = async {
            while let Some(event) = responses.next().await {
                if event.r#type == ResourceType::Document {
                    return Some(event.response.status as u16);
                }
            }
            None
        };
        match tokio::time::timeout(RESPONSE_TIMEOUT, document_status).await {
            Ok(Some(status)) => Ok(PageStatus(status)),
            _ => Err(Error::Navigation(
                "no document response observed for navigation".into(),
            )),
        }
    }

    async fn reload(&mut self) -> Result<()> {
        self.page.reload().await?;
        Ok(())
    }

    async fn has_cookie(&mut self, name: &str) -> Result<bool> {
        let cookies = self.page.get_cookies().await?;
        Ok(cookies.iter().any(|c| c.name == name))
    }

    async fn wait_for(&mut self, locator: &Locator, timeout: Option<Duration>) -> Result<()> {
        let deadline = timeout.map(|t| Instant::now() + t);
        loop {
            if self.find(locator).await.is_ok() {
                return Ok(());
            }
            if let Some(deadline) = deadline {
                if Instant::now() >= deadline {
                    return Err(Error::ElementTimeout {
                        what: locator.to_string(),
                        // deadline implies the timeout was set
                        timeout: timeout.unwrap_or_default(),
                    });
                }
            }
            tokio::time::sleep(POLL_INTERVAL).await;
        }
    }

    async fn is_present(&mut self, locator: &Locator) -> Result<bool> {
        Ok(self.find(locator).await.is_ok())
    }

    async fn click(&mut self, locator: &Locator) -> Result<()> {
        let element = self.find(locator).await?;
        element.click().await?;
        Ok(())
    }

    async fn type_text(&mut self, locator: &Locator, text: &str) -> Result<()> {
        let element = self.find(locator).await?;
        element.focus().await?;
        element.type_str(text).await?;
        Ok(())
    }

    async fn press_enter_and_wait(
        &mut self,
        locator: &Locator,
        timeout: Option<Duration>,
    ) -> Result<()> {
        let element = self.find(locator).await?;
        // Subscribe before the keypress; a navigation that completes before
        // the wait is polled is buffered in the stream, not lost.
        let mut navigations = self.page.event_listener::<EventFrameNavigated>().await?;
        element.press_key("Enter").await?;
        await_navigation_event(&mut navigations, timeout).await
    }

    async fn wait_for_navigation(&mut self, timeout: Option<Duration>) -> Result<()> {
        // A fresh subscription only sees navigations that start from now on,
        // so an already-idle page keeps this pending instead of resolving it.
        let mut navigations = self.page.event_listener::<EventFrameNavigated>().await?;
        await_navigation_event(&mut navigations, timeout).await
    }
}

/// Resolve once the armed navigation subscription yields an event.
async fn await_navigation_event<S>(navigations: &mut S, timeout: Option<Duration>) -> Result<()>
where
    S: futures::Stream<Item = std::sync::Arc<EventFrameNavigated>> + Unpin + Send,
{
    match timeout {
        Some(timeout) => {
            tokio::time::timeout(timeout, navigations.next())
                .await
                .map_err(|_| {
                    Error::Navigation(format!("navigation did not complete in {timeout:?}"))
                })?;
        }
        None => {
            navigations.next().await;
        }
    }
    Ok(())
}

/// Translate a semantic locator into an XPath query.
fn to_xpath(locator: &Locator) -> String {
    match locator {
        Locator::Text(text) => {
            format!("//*[normalize-space(text())={}]", xpath_literal(text))
        }
        Locator::Label(label) => format!("//*[@aria-label={}]", xpath_literal(label)),
        Locator::LabelContains(label) => {
            format!("//*[contains(@aria-label,{})]", xpath_literal(label))
        }
        Locator::Role(role) => format!("//*[@role='{role}']"),
        Locator::Input(InputKind::Email) => "//input[@type='email']".to_string(),
        Locator::Input(InputKind::Password) => "//input[@type='password']".to_string(),
        Locator::Input(InputKind::Multiline) => "//textarea[@aria-label]".to_string(),
    }
}

/// Quote a string as an XPath literal, even when it mixes quote characters.
fn xpath_literal(s: &str) -> String {
    if !s.contains('\'') {
        format!("'{s}'")
    } else if !s.contains('"') {
        format!("\"{s}\"")
    } else {
        let parts: Vec<String> = s.split('\'').map(|p| format!("'{p}'")).collect();
        format!("concat({})", parts.join(",\"'\","))
    }
}
