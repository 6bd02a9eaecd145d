//! JSON-RPC envelope codec
//!
//! Version 1.0 envelopes for maximum compatibility, with the 1.1/2.0
//! error object shape for the parts 1.0 left unspecified. The codec only
//! encodes and decodes; it knows nothing about the methods themselves.
//!
//! Struct field order fixes the serialized key order, so encoding the
//! same values always yields byte-identical output.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

pub const RPC_INVALID_REQUEST: i64 = -32600;
pub const RPC_METHOD_NOT_FOUND: i64 = -32601;
pub const RPC_INVALID_PARAMS: i64 = -32602;
pub const RPC_INTERNAL_ERROR: i64 = -32603;
pub const RPC_PARSE_ERROR: i64 = -32700;

/// A JSON-RPC request envelope: `{"method", "params", "id"}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Request {
    pub method: String,
    pub params: Vec<Value>,
    pub id: Value,
}

/// A JSON-RPC reply envelope: `{"result", "error", "id"}`.
///
/// `result` and `error` are mutually exclusive; build replies through
/// [`reply_obj`] to keep that invariant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reply {
    pub result: Value,
    #[serde(default)]
    pub error: Value,
    pub id: Value,
}

/// Encode a request envelope, newline-terminated.
pub fn encode_request(method: &str, params: &[Value], id: &Value) -> String {
    let request = Request {
        method: method.to_string(),
        params: params.to_vec(),
        id: id.clone(),
    };
    let mut text = serde_json::to_string(&request).expect("envelope is always serializable");
    text.push('\n');
    text
}

/// Build a reply envelope. A non-null `error` forces `result` to null
/// whatever the caller computed; `error` and `id` pass through unchanged.
pub fn reply_obj(result: Value, error: Value, id: Value) -> Reply {
    let result = if error.is_null() { result } else { Value::Null };
    Reply { result, error, id }
}

/// Encode a reply envelope, newline-terminated.
pub fn encode_reply(result: Value, error: Value, id: Value) -> String {
    let reply = reply_obj(result, error, id);
    let mut text = serde_json::to_string(&reply).expect("envelope is always serializable");
    text.push('\n');
    text
}

/// Build an error object: `{"code", "message"}` and nothing else. The
/// code value is passed through unvalidated.
pub fn make_error(code: i64, message: &str) -> Value {
    json!({
        "code": code,
        "message": message,
    })
}

/// Decode a request envelope, checking that `method`, `params` and `id`
/// are present with the right shapes.
pub fn decode_request(text: &str) -> serde_json::Result<Request> {
    serde_json::from_str(text)
}

/// Decode a reply envelope. A missing `error` key reads as null.
pub fn decode_reply(text: &str) -> serde_json::Result<Reply> {
    serde_json::from_str(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_request_key_order() {
        let text = encode_request("getinfo", &[], &json!(1));
        assert_eq!(text, "{\"method\":\"getinfo\",\"params\":[],\"id\":1}\n");
    }

    #[test]
    fn test_encode_request_with_params() {
        let params = [json!("addr"), json!(true), json!({"nested": [1, 2]})];
        let text = encode_request("validate", &params, &json!("req-7"));
        assert_eq!(
            text,
            "{\"method\":\"validate\",\"params\":[\"addr\",true,{\"nested\":[1,2]}],\"id\":\"req-7\"}\n"
        );
    }

    #[test]
    fn test_encode_request_idempotent() {
        let params = [json!(3.5), json!(null)];
        let a = encode_request("move", &params, &json!(42));
        let b = encode_request("move", &params, &json!(42));
        assert_eq!(a, b);
    }

    #[test]
    fn test_encode_request_newline_terminated() {
        assert!(encode_request("m", &[], &Value::Null).ends_with('\n'));
        assert!(encode_reply(json!(1), Value::Null, json!(1)).ends_with('\n'));
    }

    #[test]
    fn test_reply_key_order() {
        let text = encode_reply(json!("ok"), Value::Null, json!(1));
        assert_eq!(text, "{\"result\":\"ok\",\"error\":null,\"id\":1}\n");
    }

    #[test]
    fn test_error_forces_null_result() {
        let reply = reply_obj(
            json!({"computed": "anyway"}),
            make_error(RPC_INVALID_PARAMS, "bad params"),
            json!(9),
        );
        assert_eq!(reply.result, Value::Null);
        assert_eq!(reply.error["code"], json!(RPC_INVALID_PARAMS));
        assert_eq!(reply.id, json!(9));
    }

    #[test]
    fn test_null_error_keeps_result() {
        let reply = reply_obj(json!([1, 2, 3]), Value::Null, json!("x"));
        assert_eq!(reply.result, json!([1, 2, 3]));
        assert!(reply.error.is_null());
    }

    #[test]
    fn test_reply_round_trip() {
        let text = encode_reply(json!({"balance": 12.5}), Value::Null, json!("abc"));
        let reply = decode_reply(&text).unwrap();
        assert_eq!(reply.id, json!("abc"));
        assert_eq!(reply.result, json!({"balance": 12.5}));

        // With an error set, the round-tripped result is null whatever was
        // passed in.
        let text = encode_reply(json!("dropped"), make_error(-1, "boom"), json!(2));
        let reply = decode_reply(&text).unwrap();
        assert_eq!(reply.id, json!(2));
        assert!(reply.result.is_null());
        assert_eq!(reply.error["message"], json!("boom"));
    }

    #[test]
    fn test_make_error_shape() {
        let err = make_error(RPC_METHOD_NOT_FOUND, "no such method");
        let obj = err.as_object().unwrap();
        assert_eq!(obj.len(), 2);
        assert_eq!(obj["code"], json!(-32601));
        assert_eq!(obj["message"], json!("no such method"));
    }

    #[test]
    fn test_decode_request_shape_check() {
        let req = decode_request("{\"method\":\"m\",\"params\":[1],\"id\":null}").unwrap();
        assert_eq!(req.method, "m");
        assert_eq!(req.params, vec![json!(1)]);
        assert!(req.id.is_null());

        // Missing keys and non-array params are rejected.
        assert!(decode_request("{\"params\":[],\"id\":1}").is_err());
        assert!(decode_request("{\"method\":\"m\",\"params\":{},\"id\":1}").is_err());
        assert!(decode_request("not json").is_err());
    }

    #[test]
    fn test_decode_reply_missing_error_reads_as_null() {
        let reply = decode_reply("{\"result\":true,\"id\":1}").unwrap();
        assert!(reply.error.is_null());
        assert_eq!(reply.result, json!(true));
    }
}
