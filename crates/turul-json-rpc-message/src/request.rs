use std::fmt;

use serde::Serialize;
use serde_json::Value;

use crate::error::JsonRpcErrorObject;
use crate::response::JsonRpcMessage;
use crate::types::{RequestId, State};

/// A validated JSON-RPC request.
///
/// Instances come either from the [`Decoder`](crate::Decoder), after the
/// `jsonrpc` and `method` members have been checked, or from
/// [`Request::new`] for outbound requests. Fields are read-only once
/// constructed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Request {
    #[serde(rename = "jsonrpc")]
    version: String,
    method: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    params: Option<Value>,
    id: Option<RequestId>,
    #[serde(skip)]
    state: State,
}

impl Request {
    /// Build a request directly, bypassing decode.
    pub fn new(
        version: impl Into<String>,
        id: Option<RequestId>,
        method: impl Into<String>,
        params: Option<Value>,
    ) -> Self {
        Self::with_state(version, id, method, params, State::default())
    }

    /// Build a request carrying caller-supplied state.
    pub fn with_state(
        version: impl Into<String>,
        id: Option<RequestId>,
        method: impl Into<String>,
        params: Option<Value>,
        state: State,
    ) -> Self {
        Self {
            version: version.into(),
            method: method.into(),
            params,
            id,
            state,
        }
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn method(&self) -> &str {
        &self.method
    }

    pub fn params(&self) -> Option<&Value> {
        self.params.as_ref()
    }

    /// The id exactly as received; `None` when the member was absent
    pub fn id(&self) -> Option<&RequestId> {
        self.id.as_ref()
    }

    /// Requests without an id expect no response
    pub fn is_notification(&self) -> bool {
        self.id.is_none()
    }

    /// State value for `key`, `None` when missing
    pub fn state(&self, key: &str) -> Option<&Value> {
        self.state.get(key)
    }

    pub fn state_map(&self) -> &State {
        &self.state
    }

    /// Success response echoing this request's id
    pub fn success_response(&self, result: impl Into<Value>) -> JsonRpcMessage {
        JsonRpcMessage::success(self.id.clone(), result.into())
    }

    /// Error response from an explicit `(code, message)` pair
    pub fn error_response(&self, code: i64, message: impl Into<String>) -> JsonRpcMessage {
        JsonRpcMessage::error(self.id.clone(), JsonRpcErrorObject::from_parts(code, message))
    }

    /// Generic server error response for an internal failure.
    pub fn server_error_response<E>(&self, err: &E) -> JsonRpcMessage
    where
        E: std::error::Error + ?Sized,
    {
        JsonRpcMessage::error(self.id.clone(), JsonRpcErrorObject::server_error(err))
    }

    /// Canonical wire encoding.
    ///
    /// Returns the encoding error instead of degrading; see
    /// [`Request::to_bytes`] for the infallible form.
    pub fn try_to_bytes(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec(self)
    }

    /// Canonical wire encoding: `jsonrpc`, `method`, `params` (omitted when
    /// absent) and `id`. An empty vector signals an encoding failure.
    pub fn to_bytes(&self) -> Vec<u8> {
        self.try_to_bytes().unwrap_or_else(|err| {
            tracing::warn!(
                method = %self.method,
                error = %err,
                "Failed to encode JSON-RPC request"
            );
            Vec::new()
        })
    }
}

impl fmt::Display for Request {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&String::from_utf8_lossy(&self.to_bytes()))
    }
}
