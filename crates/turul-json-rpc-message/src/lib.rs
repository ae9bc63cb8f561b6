//! # JSON-RPC 2.0 Request Model
//!
//! Transport-agnostic request side of a JSON-RPC 2.0 message layer. Raw
//! payloads are decoded into validated [`Request`] values, and responses
//! are built from a request so they always echo its id.
//!
//! ## Features
//! - Single vs batch detection from the first significant byte
//! - Named field validation (`jsonrpc`, `method`) before a request exists
//! - Opaque ids carried end-to-end, including `null` and absent
//! - Per-request caller state that never reaches the wire
//!
//! ```rust
//! use turul_json_rpc_message::{decode_many, RequestId};
//!
//! let requests = decode_many(br#"[{"jsonrpc":"2.0","method":"a","id":1}]"#).unwrap();
//! assert_eq!(requests[0].method(), "a");
//! assert_eq!(requests[0].id(), Some(&RequestId::from(1i64)));
//! ```

pub mod decoder;
pub mod error;
pub mod id;
pub mod prelude;
pub mod request;
pub mod response;
pub mod types;

// Re-export main types
pub use decoder::{Decoder, DecoderConfig, decode_many, decode_one, is_batch};
pub use error::{DecodeError, DecodeFailure, JsonRpcError, JsonRpcErrorCode, JsonRpcErrorObject};
pub use id::generate_id;
pub use request::Request;
pub use response::{JsonRpcMessage, JsonRpcResponse};
pub use types::{JsonRpcVersion, RequestId, State};

/// JSON-RPC 2.0 version constant
pub const JSONRPC_VERSION: &str = "2.0";

/// Standard JSON-RPC 2.0 error codes
pub mod error_codes {
    pub const SUCCESS: i64 = 0;
    pub const PARSE_ERROR: i64 = -32700;
    pub const INVALID_REQUEST: i64 = -32600;
    pub const METHOD_NOT_FOUND: i64 = -32601;
    pub const INVALID_PARAMS: i64 = -32602;
    pub const INTERNAL_ERROR: i64 = -32603;

    // Server error range: -32099 to -32000
    pub const SERVER_ERROR_START: i64 = -32099;
    pub const SERVER_ERROR_END: i64 = -32000;
}
