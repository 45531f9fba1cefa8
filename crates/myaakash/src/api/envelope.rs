//! The `{ "message": ..., "data": ... }` envelope every service replies with.

use reqwest::StatusCode;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{ApiError, Error, LoginError, TransportError};

const OK: &str = "OK";

#[derive(Debug, Deserialize)]
struct Envelope {
    message: String,
    #[serde(default)]
    data: Value,
}

/// A decoded service reply: the payload on "OK", the server's message otherwise.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Reply {
    Accepted(Value),
    Rejected(String),
}

impl Reply {
    /// Decode a response body.
    ///
    /// Services answer rejections with JSON even on error statuses, so the
    /// status only matters when the body is not an envelope.
    pub(crate) fn decode(status: StatusCode, body: &[u8]) -> Result<Self, Error> {
        match serde_json::from_slice::<Envelope>(body) {
            Ok(envelope) if envelope.message == OK => Ok(Reply::Accepted(envelope.data)),
            Ok(envelope) => Ok(Reply::Rejected(envelope.message)),
            Err(_) if !status.is_success() => Err(TransportError::Status {
                status: status.as_u16(),
            }
            .into()),
            Err(e) => Err(TransportError::Body {
                message: e.to_string(),
            }
            .into()),
        }
    }

    /// Payload of an authenticated call; a rejection becomes [`ApiError`].
    pub(crate) fn into_api(self) -> Result<Value, Error> {
        match self {
            Reply::Accepted(data) => Ok(data),
            Reply::Rejected(message) => Err(ApiError::new(message).into()),
        }
    }

    /// Payload of a login-type call; a rejection becomes [`LoginError`].
    pub(crate) fn into_login(self) -> Result<Value, Error> {
        match self {
            Reply::Accepted(data) => Ok(data),
            Reply::Rejected(message) => Err(LoginError::new(message).into()),
        }
    }
}

/// Deserialize a payload into a typed value.
pub(crate) fn decode<T: DeserializeOwned>(data: Value) -> Result<T, Error> {
    serde_json::from_value(data).map_err(|e| Error::decode(e.to_string()))
}

/// Take the field at a JSON pointer (e.g. `/pagination/next_page`) out of a payload.
pub(crate) fn field<T: DeserializeOwned>(mut data: Value, pointer: &str) -> Result<T, Error> {
    let value = data
        .pointer_mut(pointer)
        .map(Value::take)
        .ok_or_else(|| Error::decode(format!("missing field '{}'", pointer)))?;
    decode(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn body(value: Value) -> Vec<u8> {
        serde_json::to_vec(&value).unwrap()
    }

    #[test]
    fn ok_message_yields_data() {
        let reply = Reply::decode(
            StatusCode::OK,
            &body(json!({"message": "OK", "data": {"user_id": "u-1"}})),
        )
        .unwrap();
        assert_eq!(reply, Reply::Accepted(json!({"user_id": "u-1"})));
    }

    #[test]
    fn other_message_is_rejected_even_on_error_status() {
        let reply = Reply::decode(
            StatusCode::UNAUTHORIZED,
            &body(json!({"message": "Invalid Session ID"})),
        )
        .unwrap();
        assert_eq!(reply, Reply::Rejected("Invalid Session ID".to_string()));
    }

    #[test]
    fn rejection_maps_to_the_right_error_kind() {
        let rejected = Reply::Rejected("Incorrect password".to_string());
        assert!(matches!(rejected.clone().into_login(), Err(Error::Login(ref e)) if e.message == "Incorrect password"));
        assert!(matches!(rejected.into_api(), Err(Error::Api(ref e)) if e.message == "Incorrect password"));
    }

    #[test]
    fn non_json_body_is_a_transport_error() {
        let err = Reply::decode(StatusCode::OK, b"<html>maintenance</html>").unwrap_err();
        assert!(matches!(err, Error::Transport(TransportError::Body { .. })));

        let err = Reply::decode(StatusCode::BAD_GATEWAY, b"Bad Gateway").unwrap_err();
        assert!(matches!(err, Error::Transport(TransportError::Status { status: 502 })));
    }

    #[test]
    fn json_without_message_is_a_transport_error() {
        let err = Reply::decode(StatusCode::OK, &body(json!({"data": []}))).unwrap_err();
        assert!(matches!(err, Error::Transport(TransportError::Body { .. })));
    }

    #[test]
    fn field_follows_pointer() {
        let data = json!({"pagination": {"next_page": -1}, "answer-key": [1, 2]});
        let next: i64 = field(data.clone(), "/pagination/next_page").unwrap();
        assert_eq!(next, -1);

        let answers: Vec<u8> = field(data, "/answer-key").unwrap();
        assert_eq!(answers, vec![1, 2]);
    }

    #[test]
    fn missing_field_is_a_decode_error() {
        let err = field::<Value>(json!({}), "/tests").unwrap_err();
        assert!(matches!(err, Error::Decode { .. }));
    }
}
