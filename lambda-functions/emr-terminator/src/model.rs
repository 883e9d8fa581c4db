use crate::error::TerminatorError;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
pub struct Request {
    #[serde(rename = "ClusterId", default)]
    pub cluster_id: Option<String>,
}

impl Request {
    pub fn new(cluster_id: impl Into<String>) -> Self {
        Self {
            cluster_id: Some(cluster_id.into()),
        }
    }
}

pub fn resolve_cluster_id(request: &Request) -> Result<&str, TerminatorError> {
    request
        .cluster_id
        .as_deref()
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .ok_or(TerminatorError::MissingClusterId)
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ResultStatus {
    Success,
    Info,
    Failed,
}

impl fmt::Display for ResultStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Success => write!(f, "success"),
            Self::Info => write!(f, "info"),
            Self::Failed => write!(f, "failed"),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Response {
    pub status: ResultStatus,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub response: Option<TerminationReceipt>,
}

impl Response {
    pub fn success(message: impl Into<String>, receipt: TerminationReceipt) -> Self {
        Self {
            status: ResultStatus::Success,
            message: message.into(),
            response: Some(receipt),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self {
            status: ResultStatus::Info,
            message: message.into(),
            response: None,
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            status: ResultStatus::Failed,
            message: message.into(),
            response: None,
        }
    }
}

impl From<TerminatorError> for Response {
    fn from(err: TerminatorError) -> Self {
        Self::failed(err.to_string())
    }
}

/// What EMR handed back for an accepted `TerminateJobFlows` call.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct TerminationReceipt {
    #[serde(rename = "ResponseMetadata")]
    pub metadata: ResponseMetadata,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ResponseMetadata {
    #[serde(rename = "RequestId")]
    pub request_id: Option<String>,
    #[serde(rename = "HTTPStatusCode")]
    pub http_status_code: u16,
}

impl TerminationReceipt {
    pub fn new(request_id: Option<String>, http_status_code: u16) -> Self {
        Self {
            metadata: ResponseMetadata {
                request_id,
                http_status_code,
            },
        }
    }

    pub fn is_accepted(&self) -> bool {
        (200..300).contains(&self.metadata.http_status_code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_deserialization() {
        let request: Request = serde_json::from_str(r#"{"ClusterId": "j-20GHZDIRHGQX8"}"#).unwrap();
        assert_eq!(request.cluster_id, Some("j-20GHZDIRHGQX8".to_string()));

        let request_empty: Request = serde_json::from_str("{}").unwrap();
        assert_eq!(request_empty.cluster_id, None);

        let request_null: Request = serde_json::from_str(r#"{"ClusterId": null}"#).unwrap();
        assert_eq!(request_null.cluster_id, None);
    }

    #[test]
    fn test_request_ignores_unknown_fields() {
        let request: Request =
            serde_json::from_str(r#"{"ClusterId": "j-1", "source": "scheduler"}"#).unwrap();
        assert_eq!(request.cluster_id.as_deref(), Some("j-1"));
    }

    #[test]
    fn test_resolve_cluster_id() {
        assert_eq!(resolve_cluster_id(&Request::new("j-1")), Ok("j-1"));
        assert_eq!(resolve_cluster_id(&Request::new("  j-1 ")), Ok("j-1"));
        assert_eq!(
            resolve_cluster_id(&Request::new("")),
            Err(TerminatorError::MissingClusterId)
        );
        assert_eq!(
            resolve_cluster_id(&Request::new("   ")),
            Err(TerminatorError::MissingClusterId)
        );
        assert_eq!(
            resolve_cluster_id(&Request::default()),
            Err(TerminatorError::MissingClusterId)
        );
    }

    #[test]
    fn test_response_serialization() {
        let response = Response::success(
            "EMR Cluster j-1 termination initiated in us-east-1",
            TerminationReceipt::new(Some("req-123".to_string()), 200),
        );

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["status"], "success");
        assert_eq!(json["message"], "EMR Cluster j-1 termination initiated in us-east-1");
        assert_eq!(json["response"]["ResponseMetadata"]["RequestId"], "req-123");
        assert_eq!(json["response"]["ResponseMetadata"]["HTTPStatusCode"], 200);
    }

    #[test]
    fn test_response_omits_empty_payload() {
        let json = serde_json::to_string(&Response::info("already gone")).unwrap();
        assert_eq!(json, r#"{"status":"info","message":"already gone"}"#);
    }

    #[test]
    fn test_failed_from_error() {
        let response = Response::from(TerminatorError::MissingClusterId);
        assert_eq!(response.status, ResultStatus::Failed);
        assert_eq!(response.message, "ClusterId is required.");
        assert_eq!(response.response, None);
    }

    #[test]
    fn test_receipt_accepted() {
        assert!(TerminationReceipt::new(None, 200).is_accepted());
        assert!(!TerminationReceipt::new(None, 403).is_accepted());
    }
}
