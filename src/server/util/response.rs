//! JSON envelope responses.
//!
//! Every ajax endpoint answers with the same `{success, errormsg, info, result, data}`
//! document. The HTTP status is sent alongside so both styles of client can detect errors.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::model::api::JsonEnvelope;

/// Builder for a `JsonEnvelope` response.
#[derive(Debug, Clone)]
pub struct JsonResponse {
    status: StatusCode,
    envelope: JsonEnvelope,
}

impl JsonResponse {
    /// Successful envelope with status 200 and no payload.
    pub fn success() -> Self {
        Self {
            status: StatusCode::OK,
            envelope: JsonEnvelope {
                success: 1,
                errormsg: String::new(),
                info: String::new(),
                result: None,
                data: None,
            },
        }
    }

    /// Failed envelope with the given status and message.
    pub fn error(status: StatusCode, errormsg: impl Into<String>) -> Self {
        Self {
            status,
            envelope: JsonEnvelope {
                success: 0,
                errormsg: errormsg.into(),
                info: String::new(),
                result: None,
                data: None,
            },
        }
    }

    pub fn with_data<T: Serialize>(mut self, data: T) -> Self {
        self.envelope.data = Some(to_value(data));
        self
    }

    pub fn with_result<T: Serialize>(mut self, result: T) -> Self {
        self.envelope.result = Some(to_value(result));
        self
    }

    pub fn with_info(mut self, info: impl Into<String>) -> Self {
        self.envelope.info = info.into();
        self
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn envelope(&self) -> &JsonEnvelope {
        &self.envelope
    }
}

fn to_value<T: Serialize>(value: T) -> serde_json::Value {
    serde_json::to_value(value).unwrap_or_else(|e| {
        tracing::error!("Failed to serialize response payload: {}", e);
        serde_json::Value::Null
    })
}

impl IntoResponse for JsonResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.envelope)).into_response()
    }
}
