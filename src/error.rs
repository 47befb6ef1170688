//! Error types shared by the browser-facing pieces of the crate.
//!
//! Gameplay itself has no error states: answering with no active question or
//! spinning during a spin are silently ignored. What can fail is the platform
//! around it (storage, audio, DOM), and those failures are logged and swallowed
//! by the callers.

use wasm_bindgen::JsValue;

#[derive(Debug, thiserror::Error)]
pub enum PlatformError {
    #[error("no window")]
    NoWindow,
    #[error("no document")]
    NoDocument,
    #[error("local storage unavailable")]
    StorageUnavailable,
    #[error("audio unavailable: {0}")]
    AudioUnavailable(String),
    #[error("javascript error: {0}")]
    Js(String),
}

impl From<JsValue> for PlatformError {
    fn from(value: JsValue) -> Self {
        PlatformError::Js(format!("{:?}", value))
    }
}

impl From<PlatformError> for JsValue {
    fn from(err: PlatformError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid config value for `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
    #[cfg(feature = "serde_json")]
    #[error("could not parse config: {0}")]
    Parse(#[from] serde_json::Error),
}

impl From<ConfigError> for JsValue {
    fn from(err: ConfigError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}
