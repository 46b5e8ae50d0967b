use thiserror::Error;

#[derive(Debug, Error)]
pub enum SiteError {
    #[error("no browser window available")]
    NoWindow,
    #[error("window has no document")]
    NoDocument,
    #[error("no element matches `{0}`")]
    MissingElement(String),
    #[error("`{selector}` is not {expected}")]
    UnexpectedElement {
        selector: String,
        expected: &'static str,
    },
    #[error("typing animation needs at least one non-empty phrase")]
    EmptyPhrases,
    #[error("invalid site config: {0}")]
    Config(#[from] serde_json::Error),
    #[error("browser call failed: {0}")]
    Js(String),
}

#[cfg(target_arch = "wasm32")]
impl From<wasm_bindgen::JsValue> for SiteError {
    fn from(value: wasm_bindgen::JsValue) -> Self {
        Self::Js(value.as_string().unwrap_or_else(|| format!("{value:?}")))
    }
}
