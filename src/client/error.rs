use thiserror::Error;

/// The single error shape every client call resolves to. Server-side
/// failures carry the HTTP status, the server's message, and the raw body;
/// transport failures carry the reqwest error.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("api error {status}: {message}")]
    Api {
        status: u16,
        message: String,
        payload: Option<serde_json::Value>,
    },

    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
}

impl ApiError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Api { status, .. } => Some(*status),
            ApiError::Transport(error) => error.status().map(|s| s.as_u16()),
        }
    }

    pub(super) fn from_response(status: u16, body: &str) -> Self {
        let payload = serde_json::from_str::<serde_json::Value>(body).ok();
        let message = payload
            .as_ref()
            .and_then(|value| value.get("message"))
            .and_then(|message| message.as_str())
            .map(str::to_string)
            .unwrap_or_else(|| {
                if body.is_empty() {
                    "request failed".to_string()
                } else {
                    body.to_string()
                }
            });

        ApiError::Api {
            status,
            message,
            payload,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_body_message_is_extracted() {
        let error = ApiError::from_response(
            400,
            r#"{"error":"Validation error","message":"title is required","code":"VALIDATION_ERROR"}"#,
        );

        match error {
            ApiError::Api {
                status,
                message,
                payload,
            } => {
                assert_eq!(status, 400);
                assert_eq!(message, "title is required");
                assert!(payload.is_some());
            }
            ApiError::Transport(_) => panic!("expected Api variant"),
        }
    }

    #[test]
    fn non_json_body_is_kept_verbatim() {
        let error = ApiError::from_response(502, "Bad Gateway");
        match error {
            ApiError::Api {
                status,
                message,
                payload,
            } => {
                assert_eq!(status, 502);
                assert_eq!(message, "Bad Gateway");
                assert!(payload.is_none());
            }
            ApiError::Transport(_) => panic!("expected Api variant"),
        }
    }

    #[test]
    fn empty_body_gets_a_fallback_message() {
        let error = ApiError::from_response(500, "");
        match error {
            ApiError::Api { message, .. } => assert_eq!(message, "request failed"),
            ApiError::Transport(_) => panic!("expected Api variant"),
        }
    }

    #[test]
    fn status_is_reported_for_api_errors() {
        assert_eq!(ApiError::from_response(404, "{}").status(), Some(404));
    }
}
