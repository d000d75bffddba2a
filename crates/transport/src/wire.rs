//! Shared wire envelopes.
//!
//! Both tool servers and the client use these types, so the envelopes cannot
//! drift between the two sides of the protocol.

use serde::{Deserialize, Serialize};

/// Body carried on every non-2xx tool response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub detail: String,
}

impl ErrorBody {
    pub fn new(detail: impl Into<String>) -> Self {
        Self {
            detail: detail.into(),
        }
    }
}

/// Body of the `/health` liveness probe.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Health {
    pub status: String,
}

impl Health {
    /// The one healthy answer a live server gives.
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
        }
    }

    pub fn is_healthy(&self) -> bool {
        self.status == "healthy"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_body_round_trip() {
        let body = ErrorBody::new("table missing");
        let json = serde_json::to_string(&body).unwrap();
        assert_eq!(json, r#"{"detail":"table missing"}"#);
    }

    #[test]
    fn health_shape() {
        let json = serde_json::to_string(&Health::healthy()).unwrap();
        assert_eq!(json, r#"{"status":"healthy"}"#);
        let parsed: Health = serde_json::from_str(&json).unwrap();
        assert!(parsed.is_healthy());
    }
}
