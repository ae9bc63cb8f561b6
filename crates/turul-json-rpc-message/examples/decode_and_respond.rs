//! Decode and Respond Example
//!
//! Feeds a few raw payloads through the decoder and answers each request
//! the way a transport layer would, without any method dispatch.

use serde_json::{Value, json};
use turul_json_rpc_message::{Decoder, DecoderConfig, JsonRpcMessage, Request, State};

fn answer(request: &Request) -> Option<JsonRpcMessage> {
    if request.is_notification() {
        return None;
    }

    let caller = request.state("caller").cloned().unwrap_or(Value::Null);
    Some(match request.method() {
        "echo" => request.success_response(json!({
            "params": request.params().cloned().unwrap_or(Value::Null),
            "caller": caller,
        })),
        "fail" => request.server_error_response(&std::io::Error::other("backend unavailable")),
        other => request.error_response(-32601, format!("Method '{}' not found", other)),
    })
}

fn main() {
    let decoder = Decoder::new(DecoderConfig::default().with_max_batch_size(16));
    let state = State::new().with("caller", "example");

    let payloads: [&[u8]; 4] = [
        br#"{"jsonrpc":"2.0","method":"echo","params":[1,2],"id":1}"#,
        br#"[{"jsonrpc":"2.0","method":"fail","id":"b1"},{"jsonrpc":"2.0","method":"log"}]"#,
        br#"{"jsonrpc":"2.0","id":3}"#,
        br#"{"jsonrpc":"2.0","method":"#,
    ];

    for payload in payloads {
        println!(">> {}", String::from_utf8_lossy(payload));
        match decoder.decode_many(payload, state.clone()) {
            Ok(requests) => {
                for response in requests.iter().filter_map(answer) {
                    println!("<< {}", String::from_utf8_lossy(&response.to_bytes()));
                }
            }
            Err(err) => match err.to_error_response() {
                Some(error) => {
                    let message = JsonRpcMessage::from(error);
                    println!("<< {}", String::from_utf8_lossy(&message.to_bytes()));
                }
                None => println!("!! {}", err),
            },
        }
    }
}
