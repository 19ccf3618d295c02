//! JSON wire format
//!
//! Requests: `{"handler_id": 1, "body": "<base64>"}`
//!
//! Responses: `{"sender_id": "<uuid>", "handler_id": 1, "cast_type": 1,
//! "cast_for": [], "body": "<base64>"}`
//!
//! Bodies are opaque bytes and travel base64-encoded. Decoding also accepts
//! the capitalized field names (`HandlerID`, `SenderID`, `CastType`,
//! `CastFor`, `Body`) sent by older clients; encoding always uses snake case.

use broadcaster_core::{Cast, CastType, HandlerId, OutboundMessage, RequestFrame, SessionId, TransportError};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
struct WireRequest {
    #[serde(alias = "HandlerID")]
    handler_id: HandlerId,
    #[serde(default, alias = "Body", with = "base64_body")]
    body: Vec<u8>,
}

#[derive(Debug, Serialize, Deserialize)]
struct WireResponse {
    #[serde(alias = "SenderID")]
    sender_id: SessionId,
    #[serde(alias = "HandlerID")]
    handler_id: HandlerId,
    #[serde(alias = "CastType")]
    cast_type: CastType,
    #[serde(default, alias = "CastFor")]
    cast_for: Vec<SessionId>,
    #[serde(default, alias = "Body", with = "base64_body")]
    body: Vec<u8>,
}

/// Decode a client request
pub fn decode_request(data: &[u8]) -> Result<RequestFrame, TransportError> {
    let wire: WireRequest = serde_json::from_slice(data).map_err(TransportError::decode)?;
    Ok(RequestFrame {
        handler_id: wire.handler_id,
        body: wire.body,
    })
}

/// Encode a client request
pub fn encode_request(frame: &RequestFrame) -> Result<String, TransportError> {
    let wire = WireRequest {
        handler_id: frame.handler_id,
        body: frame.body.clone(),
    };
    serde_json::to_string(&wire).map_err(|e| TransportError::Encode(e.to_string()))
}

/// Encode a response for the wire
pub fn encode_response(msg: &OutboundMessage) -> Result<String, TransportError> {
    let wire = WireResponse {
        sender_id: msg.sender_id,
        handler_id: msg.handler_id,
        cast_type: msg.cast.cast_type(),
        cast_for: msg.cast.targets().to_vec(),
        body: msg.body.clone(),
    };
    serde_json::to_string(&wire).map_err(|e| TransportError::Encode(e.to_string()))
}

/// Decode a response as a client sees it
pub fn decode_response(data: &[u8]) -> Result<OutboundMessage, TransportError> {
    let wire: WireResponse = serde_json::from_slice(data).map_err(TransportError::decode)?;
    Ok(OutboundMessage {
        sender_id: wire.sender_id,
        handler_id: wire.handler_id,
        cast: Cast::from_parts(wire.cast_type, wire.cast_for),
        body: wire.body,
    })
}

mod base64_body {
    use base64::{engine::general_purpose::STANDARD, Engine as _};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S, T>(body: &T, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
        T: AsRef<[u8]>,
    {
        serializer.serialize_str(&STANDARD.encode(body))
    }

    /// A missing or `null` body is empty
    pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<u8>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<String>::deserialize(deserializer)? {
            None => Ok(Vec::new()),
            Some(encoded) => STANDARD.decode(encoded).map_err(serde::de::Error::custom),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_request() {
        // "aGVsbG8=" is base64 for "hello"
        let frame = decode_request(br#"{"handler_id": 1, "body": "aGVsbG8="}"#).unwrap();
        assert_eq!(frame.handler_id, HandlerId::new(1));
        assert_eq!(frame.body, b"hello");
    }

    #[test]
    fn test_decode_request_without_body() {
        let frame = decode_request(br#"{"handler_id": 2}"#).unwrap();
        assert!(frame.body.is_empty());

        let frame = decode_request(br#"{"handler_id": 2, "body": null}"#).unwrap();
        assert!(frame.body.is_empty());
    }

    #[test]
    fn test_decode_capitalized_fields() {
        let frame = decode_request(br#"{"HandlerID": 3, "Body": "aGVsbG8="}"#).unwrap();
        assert_eq!(frame.handler_id, HandlerId::new(3));
        assert_eq!(frame.body, b"hello");

        let sender = SessionId::generate();
        let target = SessionId::generate();
        let raw = format!(
            r#"{{"SenderID": "{sender}", "HandlerID": 2, "CastType": 3, "CastFor": ["{target}"], "Body": "aGk="}}"#
        );
        let msg = decode_response(raw.as_bytes()).unwrap();
        assert_eq!(msg.sender_id, sender);
        assert_eq!(msg.handler_id, HandlerId::new(2));
        assert_eq!(msg.cast, Cast::Exclusive(vec![target]));
        assert_eq!(msg.body, b"hi");
    }

    #[test]
    fn test_decode_request_errors_are_not_terminal() {
        let inputs: [&[u8]; 3] = [
            b"not json",
            br#"{"body": "aGVsbG8="}"#,
            br#"{"handler_id": 1, "body": "***"}"#,
        ];
        for input in inputs {
            let err = decode_request(input).unwrap_err();
            assert!(matches!(err, TransportError::Decode(_)));
            assert!(!err.is_terminal());
        }
    }

    #[test]
    fn test_encode_response_shape() {
        let sender = SessionId::generate();
        let target = SessionId::generate();
        let msg = OutboundMessage::to_sessions([target], "hi").stamped(sender, HandlerId::new(4));

        let json: serde_json::Value = serde_json::from_str(&encode_response(&msg).unwrap()).unwrap();
        assert_eq!(json["sender_id"], sender.to_string());
        assert_eq!(json["handler_id"], 4);
        assert_eq!(json["cast_type"], 3);
        assert_eq!(json["cast_for"][0], target.to_string());
        assert_eq!(json["body"], "aGk=");
    }

    #[test]
    fn test_response_decodes_back() {
        let sender = SessionId::generate();
        let msg = OutboundMessage::to_all(vec![0u8, 159, 146, 150]).stamped(sender, HandlerId::new(1));

        let decoded = decode_response(encode_response(&msg).unwrap().as_bytes()).unwrap();
        assert_eq!(decoded, msg);
    }

    #[test]
    fn test_unknown_cast_type_rejected() {
        let raw = format!(
            r#"{{"sender_id": "{}", "handler_id": 1, "cast_type": 9, "body": ""}}"#,
            SessionId::generate()
        );
        assert!(decode_response(raw.as_bytes()).is_err());
    }
}
