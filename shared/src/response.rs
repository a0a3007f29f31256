//! API response envelope
//!
//! Every backend response is a JSON object with a `success` flag and the
//! payload stored under a resource-named key:
//!
//! ```json
//! { "success": true, "orders": [ ... ] }
//! ```
//!
//! Error responses carry an `error` message and a non-2xx status:
//!
//! ```json
//! { "success": false, "error": "Order not found" }
//! ```

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

/// Errors raised while unpacking an [`Envelope`]
#[derive(Debug, Error)]
pub enum EnvelopeError {
    /// `success` was false on a 2xx response
    #[error("{0}")]
    Unsuccessful(String),

    /// The resource key was absent
    #[error("response is missing field `{0}`")]
    MissingField(String),

    /// The resource payload did not match the expected shape
    #[error("failed to decode `{field}`: {source}")]
    Decode {
        field: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Generic response envelope: `success` plus resource-named payloads
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(flatten)]
    pub payload: Map<String, Value>,
}

impl Envelope {
    /// Successful envelope with a single resource field
    pub fn ok(field: impl Into<String>, value: impl Serialize) -> Self {
        let mut payload = Map::new();
        payload.insert(
            field.into(),
            serde_json::to_value(value).unwrap_or(Value::Null),
        );
        Self {
            success: true,
            error: None,
            message: None,
            payload,
        }
    }

    /// Successful envelope without payload
    pub fn empty() -> Self {
        Self {
            success: true,
            error: None,
            message: None,
            payload: Map::new(),
        }
    }

    /// Failed envelope
    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(error.into()),
            message: None,
            payload: Map::new(),
        }
    }

    /// Fail if `success` is false
    pub fn ensure_success(&self) -> Result<(), EnvelopeError> {
        if self.success {
            return Ok(());
        }
        Err(EnvelopeError::Unsuccessful(
            self.error
                .clone()
                .or_else(|| self.message.clone())
                .unwrap_or_else(|| "request failed".to_string()),
        ))
    }

    /// Take the payload stored under `field`, decoded as `T`
    pub fn take<T: DeserializeOwned>(mut self, field: &str) -> Result<T, EnvelopeError> {
        self.ensure_success()?;
        let value = self
            .payload
            .remove(field)
            .ok_or_else(|| EnvelopeError::MissingField(field.to_string()))?;
        serde_json::from_value(value).map_err(|source| EnvelopeError::Decode {
            field: field.to_string(),
            source,
        })
    }

    /// Like [`Envelope::take`] but an explicit `null` decodes as
    /// `T::default()`. An absent field is still [`EnvelopeError::MissingField`].
    pub fn take_or_default<T: DeserializeOwned + Default>(
        mut self,
        field: &str,
    ) -> Result<T, EnvelopeError> {
        self.ensure_success()?;
        match self.payload.remove(field) {
            None => Err(EnvelopeError::MissingField(field.to_string())),
            Some(Value::Null) => Ok(T::default()),
            Some(value) => serde_json::from_value(value).map_err(|source| EnvelopeError::Decode {
                field: field.to_string(),
                source,
            }),
        }
    }
}

impl Envelope {
    /// Decode every payload field together as one `T`, for responses whose
    /// resource is spread over several top-level keys (`token` + `user`)
    pub fn into_payload<T: DeserializeOwned>(self) -> Result<T, EnvelopeError> {
        self.ensure_success()?;
        serde_json::from_value(Value::Object(self.payload)).map_err(|source| {
            EnvelopeError::Decode {
                field: "<payload>".to_string(),
                source,
            }
        })
    }
}

/// Body of a non-2xx response
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub code: Option<u16>,
}

impl ErrorBody {
    /// Server-supplied message, preferring `error` over `message`
    pub fn text(&self) -> Option<&str> {
        self.error.as_deref().or(self.message.as_deref())
    }
}
