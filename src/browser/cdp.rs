//! Chrome DevTools Protocol calls tunnelled through chromedriver.
//!
//! chromedriver exposes `POST /session/{id}/goog/cdp/execute`, which runs a
//! single CDP method against the current page target. WebDriver has no
//! standard command for viewport emulation, init scripts or extra headers, so
//! those go through here.

use fantoccini::wd::WebDriverCompatibleCommand;
use serde_json::{Value, json};

/// A single CDP method call
#[derive(Debug, Clone)]
pub struct CdpCommand {
    method: &'static str,
    params: Value,
}

impl CdpCommand {
    pub fn new(method: &'static str, params: Value) -> Self {
        Self { method, params }
    }

    pub fn method(&self) -> &'static str {
        self.method
    }

    /// Emulation.setDeviceMetricsOverride
    pub fn set_device_metrics(width: u32, height: u32) -> Self {
        Self::new(
            "Emulation.setDeviceMetricsOverride",
            json!({
                "width": width,
                "height": height,
                "deviceScaleFactor": 1,
                "mobile": false,
            }),
        )
    }

    /// Network.setUserAgentOverride
    pub fn set_user_agent(user_agent: &str) -> Self {
        Self::new(
            "Network.setUserAgentOverride",
            json!({ "userAgent": user_agent }),
        )
    }

    /// Page.addScriptToEvaluateOnNewDocument
    pub fn add_init_script(source: &str) -> Self {
        Self::new(
            "Page.addScriptToEvaluateOnNewDocument",
            json!({ "source": source }),
        )
    }

    /// Network.enable, required before extra headers take effect
    pub fn enable_network() -> Self {
        Self::new("Network.enable", json!({}))
    }

    /// Network.setExtraHTTPHeaders
    pub fn set_extra_headers(headers: &[(String, String)]) -> Self {
        let headers: serde_json::Map<String, Value> = headers
            .iter()
            .map(|(name, value)| (name.clone(), Value::String(value.clone())))
            .collect();
        Self::new("Network.setExtraHTTPHeaders", json!({ "headers": headers }))
    }

    fn body(&self) -> Value {
        json!({ "cmd": self.method, "params": self.params })
    }
}

impl WebDriverCompatibleCommand for CdpCommand {
    fn endpoint(
        &self,
        base_url: &url::Url,
        session_id: Option<&str>,
    ) -> Result<url::Url, url::ParseError> {
        base_url.join(&format!(
            "session/{}/goog/cdp/execute",
            session_id.unwrap_or_default()
        ))
    }

    fn method_and_body(&self, _request_url: &url::Url) -> (http::Method, Option<String>) {
        (http::Method::POST, Some(self.body().to_string()))
    }
}
