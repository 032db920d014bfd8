use thiserror::Error;
use wasm_bindgen::JsValue;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{field} must be positive, got {value}")]
    NotPositive { field: &'static str, value: f64 },
    #[error("{field} range is empty: min {min} is not below max {max}")]
    EmptyRange {
        field: &'static str,
        min: f64,
        max: f64,
    },
    #[error("{field} must lie in (0, 1], got {value}")]
    NotAnOpacity { field: &'static str, value: f64 },
    #[error("particle count must be at least one")]
    NoParticles,
    #[error("invalid config object: {0}")]
    Decode(String),
}

#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("request failed: {0}")]
    Network(String),
    #[error("unreadable response: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("submission rejected: {}", .0.as_deref().unwrap_or("no reason given"))]
    Rejected(Option<String>),
}

impl SubmitError {
    /// Message shown to the visitor in an alert.
    pub fn user_message(&self) -> &'static str {
        match self {
            SubmitError::Rejected(_) => {
                "Une erreur est survenue. Veuillez réessayer ou me contacter directement par email."
            }
            SubmitError::Network(_) | SubmitError::Decode(_) => {
                "Erreur de connexion. Veuillez réessayer ou me contacter directement par email."
            }
        }
    }
}

impl From<gloo_net::Error> for SubmitError {
    fn from(err: gloo_net::Error) -> Self {
        SubmitError::Network(err.to_string())
    }
}

impl From<ConfigError> for JsValue {
    fn from(err: ConfigError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}

impl From<SubmitError> for JsValue {
    fn from(err: SubmitError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}
