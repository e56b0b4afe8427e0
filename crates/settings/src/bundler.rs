use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

/// Reserved name of the configuration file every project carries.
/// 每個專案必備的設定檔名稱。
pub const CONFIG_FILE_NAME: &str = "esbuild.config.json";

const DEFAULT_CDN_URL: &str = "https://cdn.skypack.dev";

/// Errors raised while validating configuration file content.
/// 驗證設定檔內容時可能發生的錯誤。
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("configuration is not valid JSON: {0}")]
    Syntax(#[source] serde_json::Error),
    #[error("configuration must be a JSON object, found {0}")]
    NotAnObject(&'static str),
    #[error("invalid configuration value: {0}")]
    Schema(#[source] serde_json::Error),
    #[error("`cdnUrl` must be an absolute http(s) URL, got {0:?}")]
    InvalidCdnUrl(String),
    #[error("`jsxImportSource` must not be empty")]
    EmptyJsxImportSource,
    #[error("failed to serialize configuration: {0}")]
    Serialize(#[source] serde_json::Error),
}

/// Output module format requested from the bundler.
/// 要求打包器輸出的模組格式。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Iife,
    Cjs,
    Esm,
}

impl OutputFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            OutputFormat::Iife => "iife",
            OutputFormat::Cjs => "cjs",
            OutputFormat::Esm => "esm",
        }
    }
}

/// JSX transform strategy.
/// JSX 轉換策略。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JsxMode {
    Automatic,
    Classic,
}

impl JsxMode {
    pub fn as_str(self) -> &'static str {
        match self {
            JsxMode::Automatic => "automatic",
            JsxMode::Classic => "classic",
        }
    }
}

/// Parsed content of the configuration file.
/// 設定檔內容的解析結果。
///
/// Every recognized option is optional; absent keys stay absent when the value is
/// serialized again. Keys the schema does not know about are kept in `extra` in
/// their authored order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BundlerConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<OutputFormat>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minify: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cdn_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jsx: Option<JsxMode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jsx_import_source: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl BundlerConfig {
    /// Configuration seeded into a fresh playground project.
    /// 新遊樂場專案的預設設定。
    pub fn playground_default() -> Self {
        Self {
            format: Some(OutputFormat::Cjs),
            minify: Some(true),
            cdn_url: Some(DEFAULT_CDN_URL.to_string()),
            ..Self::default()
        }
    }

    /// Parses and validates configuration file text.
    /// 解析並驗證設定檔文字。
    pub fn parse(text: &str) -> Result<Self, ConfigError> {
        let value: Value = serde_json::from_str(text).map_err(ConfigError::Syntax)?;
        Self::from_value(value)
    }

    /// Validates an already-parsed JSON value.
    /// 驗證已解析的 JSON 值。
    pub fn from_value(value: Value) -> Result<Self, ConfigError> {
        if !value.is_object() {
            return Err(ConfigError::NotAnObject(json_type_name(&value)));
        }
        let config: Self = serde_json::from_value(value).map_err(ConfigError::Schema)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks constraints serde cannot express on its own.
    /// 檢查 serde 無法表達的限制。
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(url) = &self.cdn_url {
            if !is_http_url(url) {
                return Err(ConfigError::InvalidCdnUrl(url.clone()));
            }
        }
        if let Some(source) = &self.jsx_import_source {
            if source.trim().is_empty() {
                return Err(ConfigError::EmptyJsxImportSource);
            }
        }
        if self.jsx == Some(JsxMode::Classic) && self.jsx_import_source.is_some() {
            log::warn!("`jsxImportSource` has no effect while `jsx` is \"classic\"");
        }
        Ok(())
    }

    /// Serializes with two-space indentation, as written into the project.
    /// 以兩格縮排序列化，作為寫入專案的內容。
    pub fn to_pretty_json(&self) -> Result<String, ConfigError> {
        serde_json::to_string_pretty(self).map_err(ConfigError::Serialize)
    }

    /// CDN base URL without a trailing slash.
    pub fn cdn_base(&self) -> Option<&str> {
        self.cdn_url
            .as_deref()
            .map(|url| url.trim_end_matches('/'))
    }

    /// Import source for JSX helpers, only meaningful for the automatic runtime.
    /// 僅在 automatic 模式下才有意義的 JSX 輔助函式來源。
    pub fn effective_jsx_import_source(&self) -> Option<&str> {
        match self.jsx {
            Some(JsxMode::Automatic) => self.jsx_import_source.as_deref(),
            _ => None,
        }
    }
}

fn is_http_url(raw: &str) -> bool {
    let rest = raw
        .strip_prefix("https://")
        .or_else(|| raw.strip_prefix("http://"));
    match rest {
        Some(rest) => {
            let host = rest.split(['/', '?', '#']).next().unwrap_or_default();
            !host.is_empty() && !host.contains(char::is_whitespace)
        }
        None => false,
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_recognized_options() {
        let config = BundlerConfig::parse(
            r#"{
                "format": "esm",
                "minify": false,
                "cdnUrl": "https://esm.sh/",
                "jsx": "automatic",
                "jsxImportSource": "preact"
            }"#,
        )
        .unwrap();
        assert_eq!(config.format, Some(OutputFormat::Esm));
        assert_eq!(config.minify, Some(false));
        assert_eq!(config.cdn_base(), Some("https://esm.sh"));
        assert_eq!(config.effective_jsx_import_source(), Some("preact"));
        assert!(config.extra.is_empty());
    }

    #[test]
    fn empty_object_is_valid_and_stays_empty() {
        let config = BundlerConfig::parse("{}").unwrap();
        assert_eq!(config, BundlerConfig::default());
        assert_eq!(config.to_pretty_json().unwrap(), "{}");
    }

    #[test]
    fn unknown_keys_are_preserved_in_order() {
        let config =
            BundlerConfig::parse(r#"{"zeta": 1, "format": "cjs", "alpha": {"nested": [true]}}"#)
                .unwrap();
        let keys: Vec<_> = config.extra.keys().cloned().collect();
        assert_eq!(keys, vec!["zeta".to_string(), "alpha".to_string()]);

        let reparsed: Value = serde_json::from_str(&config.to_pretty_json().unwrap()).unwrap();
        assert_eq!(
            reparsed,
            json!({"format": "cjs", "zeta": 1, "alpha": {"nested": [true]}})
        );
    }

    #[test]
    fn rejects_malformed_text() {
        assert!(matches!(
            BundlerConfig::parse("{not json"),
            Err(ConfigError::Syntax(_))
        ));
    }

    #[test]
    fn rejects_non_objects() {
        assert!(matches!(
            BundlerConfig::parse("[1, 2]"),
            Err(ConfigError::NotAnObject("array"))
        ));
        assert!(matches!(
            BundlerConfig::parse("\"cjs\""),
            Err(ConfigError::NotAnObject("string"))
        ));
    }

    #[test]
    fn rejects_wrongly_typed_options() {
        assert!(matches!(
            BundlerConfig::parse(r#"{"minify": "yes"}"#),
            Err(ConfigError::Schema(_))
        ));
        assert!(matches!(
            BundlerConfig::parse(r#"{"format": "umd"}"#),
            Err(ConfigError::Schema(_))
        ));
        assert!(matches!(
            BundlerConfig::parse(r#"{"jsx": "preserve"}"#),
            Err(ConfigError::Schema(_))
        ));
    }

    #[test]
    fn rejects_bad_cdn_urls() {
        for raw in ["cdn.skypack.dev", "ftp://cdn", "https://", "https:// spaced"] {
            let text = json!({ "cdnUrl": raw }).to_string();
            assert!(
                matches!(BundlerConfig::parse(&text), Err(ConfigError::InvalidCdnUrl(_))),
                "{raw} should be rejected"
            );
        }
    }

    #[test]
    fn rejects_blank_import_source() {
        assert!(matches!(
            BundlerConfig::parse(r#"{"jsx": "automatic", "jsxImportSource": "  "}"#),
            Err(ConfigError::EmptyJsxImportSource)
        ));
    }

    #[test]
    fn null_options_are_treated_as_absent() {
        let config = BundlerConfig::parse(r#"{"minify": null, "format": null}"#).unwrap();
        assert_eq!(config.minify, None);
        assert_eq!(config.format, None);
    }

    #[test]
    fn classic_jsx_ignores_import_source() {
        let config =
            BundlerConfig::parse(r#"{"jsx": "classic", "jsxImportSource": "react"}"#).unwrap();
        assert_eq!(config.effective_jsx_import_source(), None);
    }

    #[test]
    fn playground_default_serializes_without_injected_keys() {
        let text = BundlerConfig::playground_default().to_pretty_json().unwrap();
        let value: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(
            value,
            json!({"format": "cjs", "minify": true, "cdnUrl": "https://cdn.skypack.dev"})
        );
    }
}
