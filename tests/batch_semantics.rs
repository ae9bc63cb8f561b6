//! Batch Semantics Tests
//!
//! Single vs batch disambiguation, ordering, per-element validation and
//! batch envelope failures.

use std::thread;

use turul_json_rpc_message::{
    DecodeError, Decoder, DecoderConfig, JsonRpcErrorCode, RequestId, State, decode_many,
};

#[test]
fn test_batch_preserves_input_order() {
    let requests = decode_many(
        br#"[{"jsonrpc":"2.0","method":"a","id":1},{"jsonrpc":"2.0","method":"b","id":2}]"#,
    )
    .unwrap();

    let methods: Vec<&str> = requests.iter().map(|r| r.method()).collect();
    assert_eq!(methods, vec!["a", "b"]);
    assert_eq!(requests[1].id(), Some(&RequestId::from(2i64)));
}

#[test]
fn test_leading_whitespace_before_batch() {
    let requests = decode_many(b"\n  [{\"jsonrpc\":\"2.0\",\"method\":\"a\"}]").unwrap();

    assert_eq!(requests.len(), 1);
    assert!(requests[0].is_notification());
}

#[test]
fn test_batch_members_are_validated() {
    let err = decode_many(
        br#"[{"jsonrpc":"2.0","method":"a","id":1},{"method":"b","id":"second"}]"#,
    )
    .unwrap_err();

    assert_eq!(err.code(), Some(JsonRpcErrorCode::InvalidRequest));
    assert_eq!(err.id(), Some(&RequestId::from("second")));
    assert!(matches!(err, DecodeError::BatchMember { index: 1, .. }));
}

#[test]
fn test_malformed_batch_envelope() {
    let err = decode_many(br#"[{"jsonrpc":"2.0","method":"a"},"#).unwrap_err();

    assert!(matches!(err, DecodeError::Batch(_)));
    let response = err.to_error_response().unwrap();
    assert_eq!(response.error.code, -32700);
    assert_eq!(response.id, None);
}

#[test]
fn test_empty_batch_is_invalid_request() {
    let err = decode_many(b"[]").unwrap_err();

    assert!(matches!(err, DecodeError::EmptyBatch));
    assert_eq!(err.to_error_response().unwrap().error.code, -32600);
}

#[test]
fn test_decode_batch_reports_each_element() {
    let decoder = Decoder::default();
    let outcomes = decoder
        .decode_batch(
            br#"[
                {"jsonrpc":"2.0","method":"sum","params":[1,2,4],"id":"1"},
                {"jsonrpc":"2.0","method":"notify_hello","params":[7]},
                {"jsonrpc":"2.0","method":"subtract","params":[42,23],"id":"2"},
                {"foo":"boo"},
                "not an object",
                {"jsonrpc":"2.0","method":1,"id":"5"}
            ]"#,
            State::new(),
        )
        .unwrap();

    assert_eq!(outcomes.len(), 6);
    assert_eq!(outcomes[0].as_ref().unwrap().method(), "sum");
    assert!(outcomes[1].as_ref().unwrap().is_notification());
    assert_eq!(outcomes[2].as_ref().unwrap().method(), "subtract");

    for failed in &outcomes[3..] {
        assert_eq!(failed.as_ref().unwrap_err().code, JsonRpcErrorCode::InvalidRequest);
    }
    assert_eq!(outcomes[5].as_ref().unwrap_err().id, Some(RequestId::from("5")));
}

#[test]
fn test_batch_elements_share_caller_state() {
    let state = State::new().with("tenant", "acme");
    let requests = Decoder::default()
        .decode_many(
            br#"[{"jsonrpc":"2.0","method":"a","id":1},{"jsonrpc":"2.0","method":"b","id":2}]"#,
            state,
        )
        .unwrap();

    for request in &requests {
        assert_eq!(request.state("tenant"), Some(&serde_json::json!("acme")));
    }
}

#[test]
fn test_batch_size_limit() {
    let decoder = Decoder::new(DecoderConfig::default().with_max_batch_size(2));
    let payload = br#"[{"jsonrpc":"2.0","method":"a"},{"jsonrpc":"2.0","method":"b"},{"jsonrpc":"2.0","method":"c"}]"#;

    let err = decoder.decode_many(payload, State::new()).unwrap_err();
    assert!(matches!(err, DecodeError::BatchTooLarge { len: 3, max: 2 }));
    assert_eq!(err.code(), Some(JsonRpcErrorCode::InvalidRequest));
}

#[test]
fn test_decoder_shared_across_threads() {
    let decoder = Decoder::default();

    thread::scope(|scope| {
        for i in 0..8i64 {
            let decoder = &decoder;
            scope.spawn(move || {
                let payload = format!(r#"{{"jsonrpc":"2.0","method":"m{}","id":{}}}"#, i, i);
                let request = decoder.decode_one(payload.as_bytes(), State::new()).unwrap();
                assert_eq!(request.method(), format!("m{}", i));
                assert_eq!(request.id(), Some(&RequestId::from(i)));
            });
        }
    });
}
