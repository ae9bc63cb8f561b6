//! # JSON-RPC Message Prelude
//!
//! Convenient re-exports of the most commonly used types.
//!
//! ```rust
//! use turul_json_rpc_message::prelude::*;
//! ```

pub use crate::decoder::{Decoder, DecoderConfig, decode_many, decode_one};
pub use crate::error::{
    DecodeError, DecodeFailure, JsonRpcError, JsonRpcErrorCode, JsonRpcErrorObject,
};
pub use crate::id::generate_id;
pub use crate::request::Request;
pub use crate::response::{JsonRpcMessage, JsonRpcResponse};
pub use crate::types::{JsonRpcVersion, RequestId, State};

// Standard error codes
pub use crate::error_codes::*;
