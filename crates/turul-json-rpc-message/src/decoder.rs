//! Decoding of raw payloads into validated requests.
//!
//! A payload whose first significant byte is `[` is a batch; anything else
//! is decoded as a single request object. Objects are decoded into an
//! untyped JSON map first so that a missing or mistyped `jsonrpc` or
//! `method` member can be reported by name before a [`Request`] exists.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, trace};

use crate::error::{DecodeError, DecodeFailure, JsonRpcErrorCode};
use crate::request::Request;
use crate::types::{JsonRpcVersion, RequestId, State};

pub const VERSION_NOT_STRING: &str = "Version (jsonrpc) must be a string.";
pub const VERSION_MISMATCH: &str = "Version (jsonrpc) must be \"2.0\".";
pub const METHOD_NOT_STRING: &str = "Method must be a string.";

/// Decoder settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecoderConfig {
    /// Require `jsonrpc` to equal `"2.0"` rather than just be a string
    pub strict_version: bool,

    /// Upper bound on the number of elements in a batch
    pub max_batch_size: Option<usize>,
}

impl DecoderConfig {
    pub fn with_strict_version(mut self, strict: bool) -> Self {
        self.strict_version = strict;
        self
    }

    pub fn with_max_batch_size(mut self, max: usize) -> Self {
        self.max_batch_size = Some(max);
        self
    }
}

/// Stateless JSON-RPC request decoder.
///
/// Holds only its configuration, so a single instance can be shared
/// freely across threads.
#[derive(Debug, Clone, Default)]
pub struct Decoder {
    config: DecoderConfig,
}

impl Decoder {
    pub fn new(config: DecoderConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &DecoderConfig {
        &self.config
    }

    /// Decode exactly one request object.
    pub fn decode_one(&self, data: &[u8], state: State) -> Result<Request, DecodeError> {
        if data.is_empty() {
            return Err(DecodeError::EmptyInput);
        }

        Ok(self.decode_object(data, false, state)?)
    }

    /// Decode a single request or a batch.
    ///
    /// Every batch element is validated the same way a standalone request
    /// is; the first invalid element fails the whole call. Use
    /// [`Decoder::decode_batch`] to get one outcome per element instead.
    pub fn decode_many(&self, data: &[u8], state: State) -> Result<Vec<Request>, DecodeError> {
        if data.is_empty() {
            return Err(DecodeError::EmptyInput);
        }

        if !is_batch(data) {
            return self.decode_one(data, state).map(|request| vec![request]);
        }

        self.batch_elements(data)?
            .into_iter()
            .enumerate()
            .map(|(index, element)| {
                self.decode_value(element, true, state.clone())
                    .map_err(|failure| DecodeError::BatchMember { index, failure })
            })
            .collect()
    }

    /// Decode a payload into one outcome per request, in input order.
    ///
    /// Only failures of the payload as a whole (empty input, malformed
    /// batch envelope, empty or oversized batch) are returned as `Err`.
    pub fn decode_batch(
        &self,
        data: &[u8],
        state: State,
    ) -> Result<Vec<Result<Request, DecodeFailure>>, DecodeError> {
        if data.is_empty() {
            return Err(DecodeError::EmptyInput);
        }

        if !is_batch(data) {
            return Ok(vec![self.decode_object(data, false, state)]);
        }

        Ok(self
            .batch_elements(data)?
            .into_iter()
            .map(|element| self.decode_value(element, true, state.clone()))
            .collect())
    }

    /// Decode one encoded request object.
    ///
    /// `in_batch` selects the code for structurally malformed input:
    /// `ParseError` for a standalone message, `InvalidRequest` for a batch
    /// element.
    pub fn decode_object(
        &self,
        data: &[u8],
        in_batch: bool,
        state: State,
    ) -> Result<Request, DecodeFailure> {
        match serde_json::from_slice::<Value>(data) {
            Ok(value) => self.decode_value(value, in_batch, state),
            Err(err) => {
                let failure = DecodeFailure::canonical(None, structural_code(in_batch));
                debug!(
                    error = %err,
                    code = failure.code.code(),
                    "Rejected malformed JSON-RPC payload"
                );
                Err(failure)
            }
        }
    }

    fn decode_value(
        &self,
        value: Value,
        in_batch: bool,
        state: State,
    ) -> Result<Request, DecodeFailure> {
        match value {
            Value::Object(map) => self.validate(map, state),
            // `null` decodes to a request with no members
            Value::Null => self.validate(Map::new(), state),
            // Valid JSON but not an object; there is no id to recover
            _ => {
                let failure = DecodeFailure::canonical(None, structural_code(in_batch));
                debug!(code = failure.code.code(), "Rejected non-object JSON-RPC payload");
                Err(failure)
            }
        }
    }

    fn validate(
        &self,
        mut map: Map<String, Value>,
        state: State,
    ) -> Result<Request, DecodeFailure> {
        // `"id": null` and a missing id both mean "no id"; either way the
        // wire form carries `null`, so they must decode alike
        let id = map
            .remove("id")
            .filter(|id| !id.is_null())
            .map(RequestId::from);

        let version = match map.remove("jsonrpc") {
            Some(Value::String(version)) => version,
            _ => return Err(reject(id, VERSION_NOT_STRING)),
        };

        if self.config.strict_version && JsonRpcVersion::parse(&version).is_none() {
            return Err(reject(id, VERSION_MISMATCH));
        }

        let method = match map.remove("method") {
            Some(Value::String(method)) => method,
            _ => return Err(reject(id, METHOD_NOT_STRING)),
        };

        // An explicit `null` is indistinguishable from absent params on the wire
        let params = map.remove("params").filter(|params| !params.is_null());

        trace!(method = %method, id = ?id, "Decoded JSON-RPC request");
        Ok(Request::with_state(version, id, method, params, state))
    }

    fn batch_elements(&self, data: &[u8]) -> Result<Vec<Value>, DecodeError> {
        let elements: Vec<Value> = serde_json::from_slice(data).map_err(|err| {
            debug!(error = %err, "Rejected malformed JSON-RPC batch");
            DecodeError::Batch(err)
        })?;

        if elements.is_empty() {
            return Err(DecodeError::EmptyBatch);
        }

        if let Some(max) = self.config.max_batch_size {
            if elements.len() > max {
                return Err(DecodeError::BatchTooLarge {
                    len: elements.len(),
                    max,
                });
            }
        }

        Ok(elements)
    }
}

/// Whether the first significant byte of `data` opens a JSON array
pub fn is_batch(data: &[u8]) -> bool {
    data.iter()
        .find(|byte| !matches!(**byte, b' ' | b'\t' | b'\n' | b'\r'))
        .is_some_and(|byte| *byte == b'[')
}

/// Decode exactly one request with the default configuration.
pub fn decode_one(data: &[u8]) -> Result<Request, DecodeError> {
    Decoder::default().decode_one(data, State::default())
}

/// Decode a single request or a batch with the default configuration.
pub fn decode_many(data: &[u8]) -> Result<Vec<Request>, DecodeError> {
    Decoder::default().decode_many(data, State::default())
}

fn structural_code(in_batch: bool) -> JsonRpcErrorCode {
    if in_batch {
        JsonRpcErrorCode::InvalidRequest
    } else {
        JsonRpcErrorCode::ParseError
    }
}

fn reject(id: Option<RequestId>, message: &str) -> DecodeFailure {
    debug!(id = ?id, reason = message, "Rejected invalid JSON-RPC request");
    DecodeFailure::new(id, JsonRpcErrorCode::InvalidRequest, message)
}
