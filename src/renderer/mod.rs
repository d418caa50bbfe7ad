//! Rendered-page fallback.
//!
//! Drives a headless Chrome instance through `chromiumoxide` for sites whose
//! contact data only exists after script execution. The browser is launched
//! lazily on the first render request; when Chrome is unavailable the
//! renderer degrades to "no content" with a single warning instead of
//! failing the run.
//!
//! A render returns both the rendered DOM and the page's collected script
//! text (inline scripts, `data-*` attribute values, `onclick` handlers), so
//! the matcher also sees addresses assembled in JavaScript.

use std::sync::Arc;
use std::time::Duration;

use chromiumoxide::browser::{Browser, BrowserConfig};
use futures::StreamExt;
use log::{debug, warn};
use tokio::sync::Mutex;

use crate::config::RENDER_TIMEOUT;
use crate::error_handling::{ErrorType, ProcessingStats};

// Clicks the first visible consent button. Cookie walls otherwise hide the
// page content we want to scan, particularly on EU sites.
const DISMISS_CONSENT_JS: &str = r#"
(() => {
    const labels = [
        'accept', 'accept all', 'i accept', 'ok', 'agree', 'got it',
        'akzeptieren', 'accepter', 'aceptar', 'accetto'
    ];
    const buttons = Array.from(document.querySelectorAll(
        'button, [role="button"], input[type="button"], input[type="submit"]'
    ));
    for (const button of buttons) {
        const text = (button.innerText || button.value || '').trim().toLowerCase();
        if (labels.some(label => text === label || text.startsWith(label + ' '))) {
            button.click();
            return true;
        }
    }
    const containers = [
        '.cookie-banner button', '.cookie-consent button',
        '#cookie-notice button', '#gdpr-consent button', '.consent-banner button'
    ];
    for (const selector of containers) {
        const el = document.querySelector(selector);
        if (el) { el.click(); return true; }
    }
    return false;
})()
"#;

// Scrolls through the page in viewport increments to trigger lazy-loaded
// content, then returns to the top.
const SCROLL_PAGE_JS: &str = r#"
(async () => {
    const height = document.body.scrollHeight;
    const step = window.innerHeight || 600;
    for (let y = 0; y < height; y += step) {
        window.scrollTo(0, y);
        await new Promise(resolve => setTimeout(resolve, 250));
    }
    window.scrollTo(0, 0);
    return true;
})()
"#;

const COLLECT_SCRIPT_TEXT_JS: &str = r#"
(() => {
    const parts = Array.from(document.querySelectorAll('script'))
        .map(script => script.textContent || '');
    for (const el of document.querySelectorAll('*')) {
        for (const attr of el.attributes) {
            if (attr.name.startsWith('data-') || attr.name === 'onclick') {
                parts.push(attr.value);
            }
        }
    }
    return parts.join('\n');
})()
"#;

/// Result of rendering a page.
pub struct RenderedPage {
    /// Fully rendered DOM serialized back to HTML.
    pub html: String,
    /// Inline script text plus data-attribute and onclick handler values.
    pub script_text: String,
}

enum BrowserSlot {
    Unstarted,
    Ready(Arc<Browser>),
    Failed,
}

/// Lazily launched headless-browser renderer.
pub struct Renderer {
    enabled: bool,
    timeout: Duration,
    stats: Arc<ProcessingStats>,
    browser: Mutex<BrowserSlot>,
}

impl Renderer {
    pub fn new(enabled: bool, stats: Arc<ProcessingStats>) -> Self {
        Renderer {
            enabled,
            timeout: RENDER_TIMEOUT,
            stats,
            browser: Mutex::new(BrowserSlot::Unstarted),
        }
    }

    /// Renders a page and returns its DOM and script text.
    ///
    /// Returns `None` on any failure: renderer disabled, browser
    /// unavailable, navigation timeout, or script evaluation failure. None
    /// of these abort the run.
    pub async fn render(&self, url: &str) -> Option<RenderedPage> {
        if !self.enabled {
            return None;
        }
        let browser = self.browser().await?;

        match tokio::time::timeout(self.timeout, self.render_on(&browser, url)).await {
            Ok(Ok(page)) => Some(page),
            Ok(Err(e)) => {
                self.stats.increment_error(ErrorType::RenderFailed);
                warn!("Error rendering {url}: {e}");
                None
            }
            Err(_) => {
                self.stats.increment_error(ErrorType::RenderFailed);
                warn!("Timeout rendering {url}");
                None
            }
        }
    }

    async fn render_on(&self, browser: &Browser, url: &str) -> anyhow::Result<RenderedPage> {
        let page = browser.new_page("about:blank").await?;

        let result = async {
            page.goto(url).await?;
            page.wait_for_navigation().await?;

            // Give late resources a moment; the consent dialog often mounts
            // after the navigation settles.
            tokio::time::sleep(Duration::from_millis(1000)).await;

            if let Err(e) = page.evaluate(DISMISS_CONSENT_JS).await {
                debug!("Consent dismissal failed on {url}: {e}");
            }
            if let Err(e) = page.evaluate(SCROLL_PAGE_JS).await {
                debug!("Scroll failed on {url}: {e}");
            }

            let html = page.content().await?;
            let script_text = page
                .evaluate(COLLECT_SCRIPT_TEXT_JS)
                .await
                .ok()
                .and_then(|value| value.into_value::<String>().ok())
                .unwrap_or_default();

            Ok(RenderedPage { html, script_text })
        }
        .await;

        // chromiumoxide pages have no Drop cleanup; close explicitly so a
        // long run does not accumulate tabs.
        let _ = page.close().await;

        result
    }

    /// Returns the shared browser, launching it on first use.
    async fn browser(&self) -> Option<Arc<Browser>> {
        let mut slot = self.browser.lock().await;
        match &*slot {
            BrowserSlot::Ready(browser) => Some(Arc::clone(browser)),
            BrowserSlot::Failed => None,
            BrowserSlot::Unstarted => match Self::launch().await {
                Ok(browser) => {
                    let browser = Arc::new(browser);
                    *slot = BrowserSlot::Ready(Arc::clone(&browser));
                    Some(browser)
                }
                Err(e) => {
                    self.stats.increment_error(ErrorType::RenderUnavailable);
                    warn!("Headless browser unavailable, rendered-page fallback disabled: {e}");
                    *slot = BrowserSlot::Failed;
                    None
                }
            },
        }
    }

    async fn launch() -> anyhow::Result<Browser> {
        let config = BrowserConfig::builder()
            .no_sandbox()
            .build()
            .map_err(|e| anyhow::anyhow!("{e}"))?;

        let (browser, mut handler) = Browser::launch(config).await?;

        // The handler stream must be drained for the browser to make
        // progress; it ends when the browser process exits.
        tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                let _ = event;
            }
        });

        Ok(browser)
    }

    /// Shuts the browser down. The process exits with the last `Arc`.
    pub async fn close(&self) {
        let mut slot = self.browser.lock().await;
        *slot = BrowserSlot::Unstarted;
    }
}
