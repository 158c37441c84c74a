use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

pub const DEFAULT_API_BASE_URL: &str = "http://127.0.0.1:8000/api";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RuntimeConfig {
    pub api_base_url: Option<String>,
    #[serde(default)]
    pub google_client_id: Option<String>,
}

static API_BASE_URL: OnceLock<String> = OnceLock::new();

#[cfg(target_arch = "wasm32")]
mod globals {
    use super::RuntimeConfig;

    fn read_global(global: &str, keys: [&str; 2]) -> Option<String> {
        let w = web_sys::window()?;
        let any = js_sys::Reflect::get(&w, &global.into()).ok()?;
        if any.is_undefined() || any.is_null() {
            return None;
        }
        let obj = js_sys::Object::from(any);
        let val = js_sys::Reflect::get(&obj, &keys[0].into())
            .ok()
            .filter(|v| !v.is_undefined() && !v.is_null())
            .or_else(|| js_sys::Reflect::get(&obj, &keys[1].into()).ok());
        val.and_then(|v| v.as_string())
    }

    // window.__HAPPYPETS_ENV = { API_BASE_URL: "..." } (env.js) wins over
    // window.__HAPPYPETS_CONFIG = { api_base_url: "..." }.
    pub fn snapshot() -> Option<String> {
        read_global("__HAPPYPETS_ENV", ["API_BASE_URL", "api_base_url"])
            .or_else(|| read_global("__HAPPYPETS_CONFIG", ["api_base_url", "API_BASE_URL"]))
    }

    pub fn google_client_id() -> Option<String> {
        read_global("__HAPPYPETS_ENV", ["GOOGLE_CLIENT_ID", "google_client_id"]).or_else(|| {
            read_global("__HAPPYPETS_CONFIG", ["google_client_id", "GOOGLE_CLIENT_ID"])
        })
    }

    pub fn write_window_config(cfg: &RuntimeConfig) {
        let Some(w) = web_sys::window() else {
            return;
        };
        let obj = js_sys::Object::new();
        let fields = [
            ("api_base_url", &cfg.api_base_url),
            ("google_client_id", &cfg.google_client_id),
        ];
        for (key, value) in fields {
            if let Some(value) = value {
                let _ = js_sys::Reflect::set(
                    &obj,
                    &key.into(),
                    &wasm_bindgen::JsValue::from_str(value),
                );
            }
        }
        let _ = js_sys::Reflect::set(&w, &"__HAPPYPETS_CONFIG".into(), &obj);
    }

    pub async fn fetch_runtime_config() -> Option<RuntimeConfig> {
        let origin = web_sys::window()?.location().origin().ok()?;
        let resp = reqwest::get(format!("{}/config.json", origin)).await.ok()?;
        if !resp.status().is_success() {
            return None;
        }
        resp.json::<RuntimeConfig>().await.ok()
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod globals {
    use super::RuntimeConfig;

    pub fn snapshot() -> Option<String> {
        None
    }

    pub fn google_client_id() -> Option<String> {
        None
    }

    pub fn write_window_config(_cfg: &RuntimeConfig) {}

    pub async fn fetch_runtime_config() -> Option<RuntimeConfig> {
        None
    }
}

fn cache_base_url(value: &str) -> String {
    let _ = API_BASE_URL.set(value.to_string());
    API_BASE_URL.get().cloned().unwrap_or_else(|| value.to_string())
}

/// Resolved API base URL without touching the network. Before `init` has
/// run this may return the globals or the default without caching them.
pub fn api_base_url() -> String {
    if let Some(cached) = API_BASE_URL.get() {
        return cached.clone();
    }
    if let Some(existing) = globals::snapshot() {
        return cache_base_url(&existing);
    }
    DEFAULT_API_BASE_URL.to_string()
}

pub async fn await_api_base_url() -> String {
    if let Some(cached) = API_BASE_URL.get() {
        return cached.clone();
    }
    if let Some(existing) = globals::snapshot() {
        return cache_base_url(&existing);
    }
    if let Some(cfg) = globals::fetch_runtime_config().await {
        globals::write_window_config(&cfg);
        if let Some(url) = cfg.api_base_url {
            return cache_base_url(&url);
        }
    }
    cache_base_url(DEFAULT_API_BASE_URL)
}

pub async fn init() {
    let _ = await_api_base_url().await;
}

/// OAuth client id for the Google sign-in button. Google sign-in is hidden
/// when none is configured.
pub fn google_client_id() -> Option<String> {
    globals::google_client_id().filter(|id| !id.trim().is_empty())
}

/// Origin that serves media for `api_base`: trailing `/` dropped, then one
/// trailing `/api` segment stripped.
pub fn backend_origin(api_base: &str) -> String {
    let trimmed = api_base.trim_end_matches('/');
    trimmed.strip_suffix("/api").unwrap_or(trimmed).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backend_origin_strips_api_suffix() {
        assert_eq!(backend_origin("http://host/api"), "http://host");
        assert_eq!(backend_origin("http://host/api/"), "http://host");
        assert_eq!(backend_origin("http://127.0.0.1:8000/api"), "http://127.0.0.1:8000");
    }

    #[test]
    fn backend_origin_keeps_other_paths() {
        assert_eq!(backend_origin("http://host"), "http://host");
        assert_eq!(backend_origin("http://host/v2/"), "http://host/v2");
        assert_eq!(backend_origin("http://host/apis"), "http://host/apis");
    }

    #[test]
    fn runtime_config_parses_optional_base_url() {
        let cfg: RuntimeConfig =
            serde_json::from_str(r#"{"api_base_url":"https://pets.example.com/api"}"#).unwrap();
        assert_eq!(cfg.api_base_url.as_deref(), Some("https://pets.example.com/api"));
        let empty: RuntimeConfig = serde_json::from_str("{}").unwrap();
        assert!(empty.api_base_url.is_none());
        assert!(empty.google_client_id.is_none());
    }
}
