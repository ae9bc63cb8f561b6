use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use thiserror::Error;

use crate::types::RequestId;

/// JSON-RPC error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JsonRpcErrorCode {
    /// No error
    Success,
    ParseError,
    InvalidRequest,
    MethodNotFound,
    InvalidParams,
    InternalError,
    ServerError(i64), // -32099 to -32000
}

impl JsonRpcErrorCode {
    pub fn code(&self) -> i64 {
        match self {
            JsonRpcErrorCode::Success => crate::error_codes::SUCCESS,
            JsonRpcErrorCode::ParseError => crate::error_codes::PARSE_ERROR,
            JsonRpcErrorCode::InvalidRequest => crate::error_codes::INVALID_REQUEST,
            JsonRpcErrorCode::MethodNotFound => crate::error_codes::METHOD_NOT_FOUND,
            JsonRpcErrorCode::InvalidParams => crate::error_codes::INVALID_PARAMS,
            JsonRpcErrorCode::InternalError => crate::error_codes::INTERNAL_ERROR,
            JsonRpcErrorCode::ServerError(code) => *code,
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            JsonRpcErrorCode::Success => "Success",
            JsonRpcErrorCode::ParseError => "Parse error",
            JsonRpcErrorCode::InvalidRequest => "Invalid Request",
            JsonRpcErrorCode::MethodNotFound => "Method not found",
            JsonRpcErrorCode::InvalidParams => "Invalid params",
            JsonRpcErrorCode::InternalError => "Internal error",
            JsonRpcErrorCode::ServerError(_) => "Server error",
        }
    }

    /// Maps a numeric code back onto the vocabulary.
    ///
    /// Codes outside the reserved ranges yield `None`.
    pub fn from_code(code: i64) -> Option<Self> {
        use crate::error_codes::*;
        match code {
            SUCCESS => Some(JsonRpcErrorCode::Success),
            PARSE_ERROR => Some(JsonRpcErrorCode::ParseError),
            INVALID_REQUEST => Some(JsonRpcErrorCode::InvalidRequest),
            METHOD_NOT_FOUND => Some(JsonRpcErrorCode::MethodNotFound),
            INVALID_PARAMS => Some(JsonRpcErrorCode::InvalidParams),
            INTERNAL_ERROR => Some(JsonRpcErrorCode::InternalError),
            SERVER_ERROR_START..=SERVER_ERROR_END => Some(JsonRpcErrorCode::ServerError(code)),
            _ => None,
        }
    }
}

impl fmt::Display for JsonRpcErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code(), self.message())
    }
}

/// JSON-RPC Error object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonRpcErrorObject {
    pub code: i64,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl JsonRpcErrorObject {
    pub fn new(code: JsonRpcErrorCode, message: Option<String>, data: Option<Value>) -> Self {
        Self {
            code: code.code(),
            message: message.unwrap_or_else(|| code.message().to_string()),
            data,
        }
    }

    /// Error object from a raw `(code, message)` pair, as supplied by a
    /// dispatch layer.
    pub fn from_parts(code: i64, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            data: None,
        }
    }

    pub fn parse_error(data: Option<Value>) -> Self {
        Self::new(JsonRpcErrorCode::ParseError, None, data)
    }

    pub fn invalid_request(data: Option<Value>) -> Self {
        Self::new(JsonRpcErrorCode::InvalidRequest, None, data)
    }

    /// Generic server error wrapping an arbitrary failure.
    ///
    /// The failure's display text is carried in `data`; the code and
    /// message are always the generic `-32000` / `"Server error"` pair.
    pub fn server_error<E>(err: &E) -> Self
    where
        E: fmt::Display + ?Sized,
    {
        Self::new(
            JsonRpcErrorCode::ServerError(crate::error_codes::SERVER_ERROR_END),
            None,
            Some(Value::String(err.to_string())),
        )
    }

    /// Known code for this object, if it falls within the vocabulary
    pub fn error_code(&self) -> Option<JsonRpcErrorCode> {
        JsonRpcErrorCode::from_code(self.code)
    }
}

/// JSON-RPC Error response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonRpcError {
    #[serde(rename = "jsonrpc")]
    pub version: String,
    pub id: Option<RequestId>,
    pub error: JsonRpcErrorObject,
}

impl JsonRpcError {
    pub fn new(id: Option<RequestId>, error: JsonRpcErrorObject) -> Self {
        Self {
            version: crate::JSONRPC_VERSION.to_string(),
            id,
            error,
        }
    }

    pub fn parse_error() -> Self {
        Self::new(None, JsonRpcErrorObject::parse_error(None))
    }

    pub fn invalid_request(id: Option<RequestId>) -> Self {
        Self::new(id, JsonRpcErrorObject::invalid_request(None))
    }
}

impl fmt::Display for JsonRpcError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "JSON-RPC Error {}: {}", self.error.code, self.error.message)
    }
}

impl std::error::Error for JsonRpcError {}

/// A protocol-level rejection of one request object.
///
/// Carries the code, a human-readable message and the request id when it
/// could be recovered from the payload.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{message}")]
pub struct DecodeFailure {
    pub id: Option<RequestId>,
    pub code: JsonRpcErrorCode,
    pub message: String,
}

impl DecodeFailure {
    pub fn new(id: Option<RequestId>, code: JsonRpcErrorCode, message: impl Into<String>) -> Self {
        Self {
            id,
            code,
            message: message.into(),
        }
    }

    /// Failure using the canonical message for `code`
    pub fn canonical(id: Option<RequestId>, code: JsonRpcErrorCode) -> Self {
        Self::new(id, code, code.message())
    }

    /// Wire error response echoing the recovered id
    pub fn to_error_response(&self) -> JsonRpcError {
        JsonRpcError::new(
            self.id.clone(),
            JsonRpcErrorObject::new(self.code, Some(self.message.clone()), None),
        )
    }
}

/// Errors produced while decoding raw bytes into requests
#[derive(Debug, Error)]
pub enum DecodeError {
    /// Nothing to parse; this never maps onto a protocol code
    #[error("Empty input")]
    EmptyInput,

    #[error(transparent)]
    Invalid(#[from] DecodeFailure),

    #[error("Batch element {index}: {failure}")]
    BatchMember {
        index: usize,
        #[source]
        failure: DecodeFailure,
    },

    /// Structural failure of the batch envelope
    #[error("Malformed batch: {0}")]
    Batch(#[source] serde_json::Error),

    #[error("Batch must contain at least one request.")]
    EmptyBatch,

    #[error("Batch of {len} requests exceeds the limit of {max}.")]
    BatchTooLarge { len: usize, max: usize },
}

impl DecodeError {
    /// Protocol code for this error; `None` for local failures
    pub fn code(&self) -> Option<JsonRpcErrorCode> {
        match self {
            DecodeError::EmptyInput => None,
            DecodeError::Invalid(failure) => Some(failure.code),
            DecodeError::BatchMember { failure, .. } => Some(failure.code),
            DecodeError::Batch(_) => Some(JsonRpcErrorCode::ParseError),
            DecodeError::EmptyBatch | DecodeError::BatchTooLarge { .. } => {
                Some(JsonRpcErrorCode::InvalidRequest)
            }
        }
    }

    /// Echoed request id, when one was recovered
    pub fn id(&self) -> Option<&RequestId> {
        match self {
            DecodeError::Invalid(failure) | DecodeError::BatchMember { failure, .. } => {
                failure.id.as_ref()
            }
            _ => None,
        }
    }

    /// Wire error response for protocol failures; `None` for local ones
    pub fn to_error_response(&self) -> Option<JsonRpcError> {
        match self {
            DecodeError::EmptyInput => None,
            DecodeError::Invalid(failure) | DecodeError::BatchMember { failure, .. } => {
                Some(failure.to_error_response())
            }
            DecodeError::Batch(_) => Some(JsonRpcError::parse_error()),
            DecodeError::EmptyBatch => Some(JsonRpcError::invalid_request(None)),
            DecodeError::BatchTooLarge { .. } => Some(JsonRpcError::new(
                None,
                JsonRpcErrorObject::new(
                    JsonRpcErrorCode::InvalidRequest,
                    Some(self.to_string()),
                    None,
                ),
            )),
        }
    }
}
