//! Browser control for UI checks.
//!
//! [`BrowserSettings`] is always available. With the `browser` feature,
//! [`CdpDriver`] drives a real Chromium over the Chrome `DevTools` Protocol
//! via chromiumoxide.

use std::time::Duration;

/// Browser launch settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrowserSettings {
    /// Run in headless mode
    pub headless: bool,
    /// Window width
    pub window_width: u32,
    /// Window height
    pub window_height: u32,
    /// Path to chromium binary (None = auto-detect)
    pub chromium_path: Option<String>,
    /// Timeout for a single CDP command
    pub command_timeout: Duration,
    /// Sandbox mode (disable for containers)
    pub sandbox: bool,
}

impl Default for BrowserSettings {
    fn default() -> Self {
        Self {
            headless: true,
            window_width: 1920,
            window_height: 1080,
            chromium_path: None,
            command_timeout: Duration::from_secs(30),
            sandbox: true,
        }
    }
}

impl BrowserSettings {
    /// Set window dimensions
    #[must_use]
    pub const fn with_window(mut self, width: u32, height: u32) -> Self {
        self.window_width = width;
        self.window_height = height;
        self
    }

    /// Set headless mode
    #[must_use]
    pub const fn with_headless(mut self, headless: bool) -> Self {
        self.headless = headless;
        self
    }

    /// Set chromium path
    #[must_use]
    pub fn with_chromium_path(mut self, path: impl Into<String>) -> Self {
        self.chromium_path = Some(path.into());
        self
    }

    /// Disable sandbox (for containers/CI)
    #[must_use]
    pub const fn with_no_sandbox(mut self) -> Self {
        self.sandbox = false;
        self
    }
}

// ============================================================================
// Real CDP Implementation (when `browser` feature is enabled)
// ============================================================================

#[cfg(feature = "browser")]
#[allow(clippy::significant_drop_tightening, clippy::items_after_statements)]
mod cdp {
    use super::BrowserSettings;
    use crate::driver::{BrowserDriver, ElementHandle, ElementSnapshot};
    use crate::locator::Locator;
    use crate::result::{ShopError, ShopResult};
    use async_trait::async_trait;
    use chromiumoxide::browser::{Browser, BrowserConfig};
    use chromiumoxide::element::Element;
    use chromiumoxide::page::Page;
    use futures::StreamExt;
    use serde::de::DeserializeOwned;
    use serde::Deserialize;
    use tokio::sync::Mutex;
    use tokio::task::JoinHandle;

    const SNAPSHOT_JS: &str = r"
        Array.from(document.querySelectorAll(__SELECTOR__)).map(el => {
            const style = window.getComputedStyle(el);
            const rect = el.getBoundingClientRect();
            const attributes = {};
            for (const a of el.attributes) { attributes[a.name] = a.value; }
            return {
                text: (el.innerText || el.textContent || '').trim(),
                attributes,
                displayed: style.display !== 'none'
                    && style.visibility !== 'hidden'
                    && (rect.width > 0 || rect.height > 0),
                enabled: !el.disabled,
            };
        })";

    const ATTRIBUTE_JS: &str = r"
        (() => {
            const el = document.querySelectorAll(__SELECTOR__)[__INDEX__];
            if (!el) { return { stale: true }; }
            const name = __NAME__;
            const prop = el[name];
            if (typeof prop === 'boolean') { return { value: prop ? 'true' : null }; }
            if (prop !== undefined && prop !== null && typeof prop !== 'object' && typeof prop !== 'function') {
                return { value: String(prop) };
            }
            return { value: el.getAttribute(name) };
        })()";

    const CLEAR_JS: &str = r"
        (() => {
            const el = document.querySelectorAll(__SELECTOR__)[__INDEX__];
            if (!el) { return false; }
            el.value = '';
            el.dispatchEvent(new Event('input', { bubbles: true }));
            return true;
        })()";

    #[derive(Debug, Deserialize)]
    struct AttributeRead {
        #[serde(default)]
        stale: bool,
        value: Option<String>,
    }

    /// Chromium session driven over CDP
    #[derive(Debug)]
    pub struct CdpDriver {
        browser: Mutex<Option<Browser>>,
        page: Page,
        handler: JoinHandle<()>,
    }

    impl CdpDriver {
        /// Launch a browser and open one blank page
        pub async fn launch(settings: &BrowserSettings) -> ShopResult<Self> {
            let mut builder = BrowserConfig::builder()
                .window_size(settings.window_width, settings.window_height)
                .request_timeout(settings.command_timeout);

            if !settings.headless {
                builder = builder.with_head();
            }

            if !settings.sandbox {
                builder = builder.no_sandbox();
            }

            if let Some(ref path) = settings.chromium_path {
                builder = builder.chrome_executable(path);
            }

            let config = builder
                .build()
                .map_err(|e| ShopError::BrowserLaunch { message: e })?;

            let (browser, mut handler) =
                Browser::launch(config)
                    .await
                    .map_err(|e| ShopError::BrowserLaunch {
                        message: e.to_string(),
                    })?;

            let handler = tokio::spawn(async move {
                while let Some(event) = handler.next().await {
                    if event.is_err() {
                        break;
                    }
                }
            });

            let page = browser
                .new_page("about:blank")
                .await
                .map_err(|e| ShopError::BrowserLaunch {
                    message: e.to_string(),
                })?;

            tracing::info!(headless = settings.headless, "browser launched");
            Ok(Self {
                browser: Mutex::new(Some(browser)),
                page,
                handler,
            })
        }

        async fn eval<T: DeserializeOwned>(&self, script: &str) -> ShopResult<T> {
            self.page
                .evaluate(script)
                .await
                .map_err(|e| ShopError::driver(e.to_string()))?
                .into_value()
                .map_err(|e| ShopError::driver(e.to_string()))
        }

        async fn element(&self, handle: &ElementHandle) -> ShopResult<Element> {
            self.page
                .find_elements(handle.locator.to_css())
                .await
                .map_err(|e| ShopError::driver(e.to_string()))?
                .into_iter()
                .nth(handle.index)
                .ok_or_else(|| ShopError::driver(format!("stale element {handle}")))
        }
    }

    fn bind(script: &str, handle: &ElementHandle) -> ShopResult<String> {
        Ok(script
            .replace("__SELECTOR__", &serde_json::to_string(&handle.locator.to_css())?)
            .replace("__INDEX__", &handle.index.to_string()))
    }

    #[async_trait]
    impl BrowserDriver for CdpDriver {
        async fn navigate(&self, url: &str) -> ShopResult<()> {
            self.page
                .goto(url)
                .await
                .map_err(|e| ShopError::driver(format!("navigate to {url}: {e}")))?;
            Ok(())
        }

        async fn current_url(&self) -> ShopResult<String> {
            let url = self
                .page
                .url()
                .await
                .map_err(|e| ShopError::driver(e.to_string()))?;
            Ok(url.unwrap_or_default())
        }

        async fn query(&self, locator: &Locator) -> ShopResult<Vec<ElementHandle>> {
            let script =
                SNAPSHOT_JS.replace("__SELECTOR__", &serde_json::to_string(&locator.to_css())?);
            let snapshots: Vec<ElementSnapshot> = self.eval(&script).await?;
            Ok(snapshots
                .into_iter()
                .enumerate()
                .map(|(index, snapshot)| ElementHandle::new(locator.clone(), index, snapshot))
                .collect())
        }

        async fn click(&self, element: &ElementHandle) -> ShopResult<()> {
            self.element(element)
                .await?
                .click()
                .await
                .map_err(|e| ShopError::driver(format!("click {element}: {e}")))?;
            Ok(())
        }

        async fn clear(&self, element: &ElementHandle) -> ShopResult<()> {
            let cleared: bool = self.eval(&bind(CLEAR_JS, element)?).await?;
            if cleared {
                Ok(())
            } else {
                Err(ShopError::driver(format!("stale element {element}")))
            }
        }

        async fn send_keys(&self, element: &ElementHandle, text: &str) -> ShopResult<()> {
            let target = self.element(element).await?;
            target
                .focus()
                .await
                .map_err(|e| ShopError::driver(e.to_string()))?;
            target
                .type_str(text)
                .await
                .map_err(|e| ShopError::driver(format!("type into {element}: {e}")))?;
            Ok(())
        }

        async fn attribute(
            &self,
            element: &ElementHandle,
            name: &str,
        ) -> ShopResult<Option<String>> {
            let script = bind(ATTRIBUTE_JS, element)?
                .replace("__NAME__", &serde_json::to_string(name)?);
            let read: AttributeRead = self.eval(&script).await?;
            if read.stale {
                return Err(ShopError::driver(format!("stale element {element}")));
            }
            Ok(read.value)
        }

        async fn quit(&self) -> ShopResult<()> {
            let Some(mut browser) = self.browser.lock().await.take() else {
                return Ok(());
            };
            let closed = browser
                .close()
                .await
                .map_err(|e| ShopError::driver(e.to_string()));
            if let Err(e) = browser.wait().await {
                tracing::debug!(error = %e, "browser process wait failed");
            }
            self.handler.abort();
            tracing::info!("browser closed");
            closed.map(|_| ())
        }
    }
}

#[cfg(feature = "browser")]
pub use cdp::CdpDriver;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_default() {
        let settings = BrowserSettings::default();
        assert!(settings.headless);
        assert!(settings.sandbox);
        assert_eq!((settings.window_width, settings.window_height), (1920, 1080));
    }

    #[test]
    fn test_settings_builder() {
        let settings = BrowserSettings::default()
            .with_window(1280, 720)
            .with_headless(false)
            .with_chromium_path("/usr/bin/chromium")
            .with_no_sandbox();
        assert!(!settings.headless);
        assert!(!settings.sandbox);
        assert_eq!(settings.window_width, 1280);
        assert_eq!(settings.chromium_path.as_deref(), Some("/usr/bin/chromium"));
    }

    #[cfg(feature = "browser")]
    mod cdp_tests {
        use super::*;
        use crate::driver::BrowserDriver;
        use crate::locator::Locator;

        #[tokio::test]
        #[ignore = "requires a local chromium"]
        async fn test_launch_query_quit() {
            let driver = CdpDriver::launch(&BrowserSettings::default().with_no_sandbox())
                .await
                .unwrap();
            driver
                .navigate("data:text/html,<button class='go'>Go</button>")
                .await
                .unwrap();
            let found = driver.query(&Locator::class_name("go")).await.unwrap();
            assert_eq!(found.len(), 1);
            assert_eq!(found[0].text(), "Go");
            driver.quit().await.unwrap();
        }
    }
}
