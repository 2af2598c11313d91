//! Real browser control over the Chrome DevTools Protocol.
//!
//! Compiled only with the `browser` feature. [`Browser::launch`] spawns a
//! chromium instance through chromiumoxide and drives pages exclusively via
//! script evaluation: resolved elements are parked in a page-side registry
//! (`window.__cafetera_handles`) and addressed by numeric id, which keeps
//! the whole [`Driver`] surface on the one CDP call that every backend
//! supports. Navigation starts a new registry generation; handles from an
//! earlier generation, and registry entries whose node left the document,
//! resolve as stale.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use chromiumoxide::browser::{Browser as CdpBrowser, BrowserConfig as CdpConfig};
use chromiumoxide::cdp::browser_protocol::page::{
    CaptureScreenshotFormat, CaptureScreenshotParams,
};
use chromiumoxide::page::Page as CdpPage;
use futures::StreamExt;
use serde_json::Value;
use tokio::sync::Mutex;
use tracing::debug;

use crate::config::Config;
use crate::driver::{not_found, stale, Driver, ElementId};
use crate::locator::Locator;
use crate::result::{CafeteraError, CafeteraResult};
use crate::scope::Session;

/// Browser launch configuration
#[derive(Debug, Clone)]
pub struct BrowserConfig {
    /// Run in headless mode
    pub headless: bool,
    /// Viewport width
    pub viewport_width: u32,
    /// Viewport height
    pub viewport_height: u32,
    /// Path to chromium binary (None = auto-detect)
    pub chromium_path: Option<String>,
    /// Sandbox mode (disable for containers)
    pub sandbox: bool,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            headless: true,
            viewport_width: 1280,
            viewport_height: 800,
            chromium_path: None,
            sandbox: true,
        }
    }
}

impl BrowserConfig {
    /// Set headless mode
    #[must_use]
    pub const fn with_headless(mut self, headless: bool) -> Self {
        self.headless = headless;
        self
    }

    /// Set viewport dimensions
    #[must_use]
    pub const fn with_viewport(mut self, width: u32, height: u32) -> Self {
        self.viewport_width = width;
        self.viewport_height = height;
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

/// A launched browser instance
#[derive(Debug)]
pub struct Browser {
    config: BrowserConfig,
    inner: Arc<Mutex<CdpBrowser>>,
    #[allow(dead_code)]
    handle: tokio::task::JoinHandle<()>,
}

impl Browser {
    /// Launch a chromium instance
    pub async fn launch(config: BrowserConfig) -> CafeteraResult<Self> {
        let mut builder = CdpConfig::builder()
            .window_size(config.viewport_width, config.viewport_height);

        if !config.headless {
            builder = builder.with_head();
        }

        if !config.sandbox {
            builder = builder.no_sandbox();
        }

        if let Some(ref path) = config.chromium_path {
            builder = builder.chrome_executable(path);
        }

        let cdp_config = builder
            .build()
            .map_err(|e| CafeteraError::BrowserLaunch { message: e })?;

        let (browser, mut handler) =
            CdpBrowser::launch(cdp_config)
                .await
                .map_err(|e| CafeteraError::BrowserLaunch {
                    message: e.to_string(),
                })?;

        let handle = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if event.is_err() {
                    break;
                }
            }
        });

        debug!("browser launched");
        Ok(Self {
            config,
            inner: Arc::new(Mutex::new(browser)),
            handle,
        })
    }

    /// The launch configuration
    #[must_use]
    pub const fn config(&self) -> &BrowserConfig {
        &self.config
    }

    /// Open a fresh page and wrap it as a [`Session`]
    pub async fn new_session(&self, config: Config) -> CafeteraResult<Session> {
        let browser = self.inner.lock().await;
        let page = browser
            .new_page("about:blank")
            .await
            .map_err(|e| CafeteraError::BrowserLaunch {
                message: e.to_string(),
            })?;
        Ok(Session::new(Arc::new(CdpDriver::new(page)), config))
    }

    /// Close the browser
    pub async fn close(self) -> CafeteraResult<()> {
        let mut browser = self.inner.lock().await;
        browser
            .close()
            .await
            .map_err(|e| CafeteraError::BrowserLaunch {
                message: e.to_string(),
            })?;
        Ok(())
    }
}

/// [`Driver`] implementation over one CDP page.
#[derive(Debug)]
pub struct CdpDriver {
    page: Arc<Mutex<CdpPage>>,
    generation: AtomicU64,
}

impl CdpDriver {
    fn new(page: CdpPage) -> Self {
        Self {
            page: Arc::new(Mutex::new(page)),
            generation: AtomicU64::new(1),
        }
    }

    fn generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    fn encode(&self, js_id: u64) -> ElementId {
        ElementId((self.generation() << 32) | js_id)
    }

    /// Split a handle into its page-side id, rejecting handles minted
    /// before the last navigation.
    fn js_id(&self, element: ElementId) -> CafeteraResult<u64> {
        if element.raw() >> 32 != self.generation() {
            return Err(stale(element));
        }
        Ok(element.raw() & 0xFFFF_FFFF)
    }

    async fn eval(&self, script: &str) -> CafeteraResult<Value> {
        let page = self.page.lock().await;
        let result = page
            .evaluate(script)
            .await
            .map_err(|e| CafeteraError::Script {
                message: e.to_string(),
            })?;
        result
            .into_value::<Value>()
            .map_err(|e| CafeteraError::Script {
                message: e.to_string(),
            })
    }

    /// Run an element-scoped script body; `el` is bound and checked for
    /// connectedness before `body` executes.
    async fn eval_on(&self, element: ElementId, body: &str) -> CafeteraResult<Value> {
        let js_id = self.js_id(element)?;
        let script = format!(
            "(() => {{ \
               const reg = window.__cafetera_handles; \
               const el = reg && reg.nodes[{js_id}]; \
               if (!el || !el.isConnected) return {{ error: 'stale' }}; \
               {body} \
             }})()"
        );
        let value = self.eval(&script).await?;
        if value.get("error").and_then(Value::as_str) == Some("stale") {
            return Err(stale(element));
        }
        Ok(value)
    }

    fn scope_expr(&self, scope: Option<ElementId>) -> CafeteraResult<String> {
        match scope {
            None => Ok("document".to_string()),
            Some(element) => {
                let js_id = self.js_id(element)?;
                Ok(format!("reg.nodes[{js_id}]"))
            }
        }
    }
}

#[async_trait]
impl Driver for CdpDriver {
    async fn navigate(&self, url: &str) -> CafeteraResult<()> {
        debug!(url, "cdp: navigate");
        {
            let page = self.page.lock().await;
            page.goto(url).await.map_err(|e| CafeteraError::Navigation {
                url: url.to_string(),
                message: e.to_string(),
            })?;
            page.wait_for_navigation()
                .await
                .map_err(|e| CafeteraError::Navigation {
                    url: url.to_string(),
                    message: e.to_string(),
                })?;
        }
        self.generation.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn title(&self) -> CafeteraResult<String> {
        let page = self.page.lock().await;
        let title = page.get_title().await.map_err(|e| CafeteraError::Script {
            message: e.to_string(),
        })?;
        Ok(title.unwrap_or_default())
    }

    async fn current_url(&self) -> CafeteraResult<String> {
        let page = self.page.lock().await;
        let url = page.url().await.map_err(|e| CafeteraError::Script {
            message: e.to_string(),
        })?;
        Ok(url.unwrap_or_else(|| "about:blank".to_string()))
    }

    async fn find(
        &self,
        scope: Option<ElementId>,
        locator: &Locator,
    ) -> CafeteraResult<ElementId> {
        let scope_expr = self.scope_expr(scope)?;
        let query = locator.to_query("__scope");
        let script = format!(
            "(() => {{ \
               const reg = window.__cafetera_handles ??= {{ next: 1, nodes: {{}} }}; \
               const __scope = {scope_expr}; \
               if (!__scope) return {{ error: 'stale' }}; \
               if (__scope !== document && !__scope.isConnected) return {{ error: 'stale' }}; \
               const el = {query}; \
               if (!el) return {{ found: false }}; \
               const id = reg.next++; \
               reg.nodes[id] = el; \
               return {{ found: true, id }}; \
             }})()"
        );
        let value = self.eval(&script).await?;
        if value.get("error").and_then(Value::as_str) == Some("stale") {
            return Err(stale(scope.unwrap_or(ElementId(0))));
        }
        if value.get("found").and_then(Value::as_bool) != Some(true) {
            return Err(not_found(locator));
        }
        let js_id = value
            .get("id")
            .and_then(Value::as_u64)
            .ok_or_else(|| CafeteraError::Script {
                message: "element registry returned no id".to_string(),
            })?;
        Ok(self.encode(js_id))
    }

    async fn find_all(
        &self,
        scope: Option<ElementId>,
        locator: &Locator,
    ) -> CafeteraResult<Vec<ElementId>> {
        let scope_expr = self.scope_expr(scope)?;
        let query = locator.to_query_all("__scope");
        let script = format!(
            "(() => {{ \
               const reg = window.__cafetera_handles ??= {{ next: 1, nodes: {{}} }}; \
               const __scope = {scope_expr}; \
               if (!__scope) return {{ error: 'stale' }}; \
               if (__scope !== document && !__scope.isConnected) return {{ error: 'stale' }}; \
               const ids = {query}.map(el => {{ \
                 const id = reg.next++; \
                 reg.nodes[id] = el; \
                 return id; \
               }}); \
               return {{ ids }}; \
             }})()"
        );
        let value = self.eval(&script).await?;
        if value.get("error").and_then(Value::as_str) == Some("stale") {
            return Err(stale(scope.unwrap_or(ElementId(0))));
        }
        let ids = value
            .get("ids")
            .and_then(Value::as_array)
            .ok_or_else(|| CafeteraError::Script {
                message: "element registry returned no id list".to_string(),
            })?;
        Ok(ids
            .iter()
            .filter_map(Value::as_u64)
            .map(|js_id| self.encode(js_id))
            .collect())
    }

    async fn text(&self, element: ElementId) -> CafeteraResult<String> {
        let value = self
            .eval_on(
                element,
                "return { value: (el.innerText ?? el.textContent ?? '').trim() };",
            )
            .await?;
        Ok(value
            .get("value")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string())
    }

    async fn attribute(
        &self,
        element: ElementId,
        name: &str,
    ) -> CafeteraResult<Option<String>> {
        let body = format!("return {{ value: el.getAttribute({name:?}) }};");
        let value = self.eval_on(element, &body).await?;
        Ok(value
            .get("value")
            .and_then(Value::as_str)
            .map(ToString::to_string))
    }

    async fn is_displayed(&self, element: ElementId) -> CafeteraResult<bool> {
        let value = self
            .eval_on(
                element,
                "const rect = el.getBoundingClientRect(); \
                 const style = window.getComputedStyle(el); \
                 return { value: rect.width > 0 && rect.height > 0 \
                   && style.visibility !== 'hidden' && style.display !== 'none' };",
            )
            .await?;
        Ok(value.get("value").and_then(Value::as_bool).unwrap_or(false))
    }

    async fn click(&self, element: ElementId) -> CafeteraResult<()> {
        self.eval_on(element, "el.click(); return { value: true };")
            .await?;
        Ok(())
    }

    async fn context_click(&self, element: ElementId) -> CafeteraResult<()> {
        self.eval_on(
            element,
            "el.dispatchEvent(new MouseEvent('contextmenu', \
               { bubbles: true, cancelable: true })); \
             return { value: true };",
        )
        .await?;
        Ok(())
    }

    async fn double_click(&self, element: ElementId) -> CafeteraResult<()> {
        self.eval_on(
            element,
            "el.dispatchEvent(new MouseEvent('dblclick', \
               { bubbles: true, cancelable: true })); \
             return { value: true };",
        )
        .await?;
        Ok(())
    }

    async fn hover(&self, element: ElementId) -> CafeteraResult<()> {
        self.eval_on(
            element,
            "el.dispatchEvent(new MouseEvent('mouseenter', { bubbles: false })); \
             el.dispatchEvent(new MouseEvent('mouseover', { bubbles: true })); \
             return { value: true };",
        )
        .await?;
        Ok(())
    }

    async fn fill(&self, element: ElementId, text: &str) -> CafeteraResult<()> {
        // Clear-then-type through the native value setter so framework
        // bindings observe a single input event with the final value.
        let body = format!(
            "el.focus(); \
             const proto = Object.getPrototypeOf(el); \
             const desc = Object.getOwnPropertyDescriptor(proto, 'value'); \
             if (desc && desc.set) {{ desc.set.call(el, {text:?}); }} \
             else {{ el.value = {text:?}; }} \
             el.dispatchEvent(new Event('input', {{ bubbles: true }})); \
             el.dispatchEvent(new Event('change', {{ bubbles: true }})); \
             return {{ value: true }};"
        );
        self.eval_on(element, &body).await?;
        Ok(())
    }

    async fn computed_style(
        &self,
        element: ElementId,
        property: &str,
    ) -> CafeteraResult<String> {
        let body = format!(
            "return {{ value: window.getComputedStyle(el)[{property:?}] ?? '' }};"
        );
        let value = self.eval_on(element, &body).await?;
        Ok(value
            .get("value")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string())
    }

    async fn execute_script(&self, script: &str) -> CafeteraResult<Value> {
        self.eval(script).await
    }

    async fn screenshot(&self) -> CafeteraResult<Vec<u8>> {
        let page = self.page.lock().await;
        let params = CaptureScreenshotParams::builder()
            .format(CaptureScreenshotFormat::Png)
            .build();
        let screenshot = page
            .execute(params)
            .await
            .map_err(|e| CafeteraError::Screenshot {
                message: e.to_string(),
            })?;

        use base64::Engine;
        base64::engine::general_purpose::STANDARD
            .decode(&screenshot.data)
            .map_err(|e| CafeteraError::Screenshot {
                message: e.to_string(),
            })
    }
}
