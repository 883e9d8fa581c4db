use crate::error::ProviderError;
use crate::model::TerminationReceipt;
use async_trait::async_trait;
use aws_config::{BehaviorVersion, Region, SdkConfig};
use aws_sdk_emr::error::{ProvideErrorMetadata, SdkError};
use aws_sdk_emr::operation::describe_cluster::DescribeClusterError;
use aws_sdk_emr::operation::RequestId;
use aws_sdk_emr::Client as EmrClient;
use std::fmt;
use tracing::debug;

/// Lifecycle state reported by EMR for a cluster.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClusterState {
    Starting,
    Bootstrapping,
    Running,
    Waiting,
    Terminating,
    Terminated,
    TerminatedWithErrors,
    Unknown(String),
}

impl ClusterState {
    /// Only a cleanly `TERMINATED` cluster is left alone; everything else
    /// gets a termination request.
    pub fn is_terminated(&self) -> bool {
        matches!(self, Self::Terminated)
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Starting => "STARTING",
            Self::Bootstrapping => "BOOTSTRAPPING",
            Self::Running => "RUNNING",
            Self::Waiting => "WAITING",
            Self::Terminating => "TERMINATING",
            Self::Terminated => "TERMINATED",
            Self::TerminatedWithErrors => "TERMINATED_WITH_ERRORS",
            Self::Unknown(state) => state,
        }
    }
}

impl From<&str> for ClusterState {
    fn from(state: &str) -> Self {
        match state {
            "STARTING" => Self::Starting,
            "BOOTSTRAPPING" => Self::Bootstrapping,
            "RUNNING" => Self::Running,
            "WAITING" => Self::Waiting,
            "TERMINATING" => Self::Terminating,
            "TERMINATED" => Self::Terminated,
            "TERMINATED_WITH_ERRORS" => Self::TerminatedWithErrors,
            other => Self::Unknown(other.to_string()),
        }
    }
}

impl fmt::Display for ClusterState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Outcome of a describe call that reached EMR.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClusterLookup {
    Found(ClusterState),
    NotFound,
}

#[async_trait]
pub trait EmrApi: Send + Sync {
    async fn describe_cluster_state(
        &self,
        cluster_id: &str,
        region: &str,
    ) -> Result<ClusterLookup, ProviderError>;

    async fn terminate_job_flow(
        &self,
        cluster_id: &str,
        region: &str,
    ) -> Result<TerminationReceipt, ProviderError>;
}

/// `EmrApi` backed by the AWS SDK. Credentials come from the execution role.
pub struct SdkEmrApi {
    sdk_config: SdkConfig,
}

impl SdkEmrApi {
    pub async fn new() -> Self {
        let sdk_config = aws_config::defaults(BehaviorVersion::latest()).load().await;
        Self::from_sdk_config(sdk_config)
    }

    pub fn from_sdk_config(sdk_config: SdkConfig) -> Self {
        Self { sdk_config }
    }

    fn client(&self, region: &str) -> EmrClient {
        let config = aws_sdk_emr::config::Builder::from(&self.sdk_config)
            .region(Region::new(region.to_string()))
            .build();

        EmrClient::from_conf(config)
    }
}

#[async_trait]
impl EmrApi for SdkEmrApi {
    async fn describe_cluster_state(
        &self,
        cluster_id: &str,
        region: &str,
    ) -> Result<ClusterLookup, ProviderError> {
        let result = self
            .client(region)
            .describe_cluster()
            .cluster_id(cluster_id)
            .send()
            .await;

        match result {
            Ok(output) => Ok(match output.cluster() {
                Some(cluster) => {
                    let state = cluster
                        .status()
                        .and_then(|status| status.state())
                        .map(|state| ClusterState::from(state.as_str()))
                        .unwrap_or_else(|| ClusterState::Unknown(String::new()));
                    ClusterLookup::Found(state)
                }
                None => ClusterLookup::NotFound,
            }),
            Err(err) if is_cluster_not_found(&err) => {
                debug!("Cluster {} not found in {}: {:?}", cluster_id, region, err);
                Ok(ClusterLookup::NotFound)
            }
            Err(err) => Err(ProviderError::from_sdk(&err)),
        }
    }

    async fn terminate_job_flow(
        &self,
        cluster_id: &str,
        region: &str,
    ) -> Result<TerminationReceipt, ProviderError> {
        let output = self
            .client(region)
            .terminate_job_flows()
            .job_flow_ids(cluster_id)
            .send()
            .await
            .map_err(|err| ProviderError::from_sdk(&err))?;

        Ok(TerminationReceipt::new(
            output.request_id().map(str::to_string),
            200,
        ))
    }
}

/// EMR answers `DescribeCluster` for an id it doesn't know in that region
/// with `InvalidRequestException` ("Cluster id '<id>' is not valid.").
/// Any other invalid request is a real failure.
fn is_cluster_not_found<R>(err: &SdkError<DescribeClusterError, R>) -> bool {
    match err.as_service_error() {
        Some(DescribeClusterError::InvalidRequestException(e)) => {
            e.message().is_some_and(describes_unknown_cluster)
                || e.error_code().is_some_and(is_not_found_code)
        }
        Some(other) => other.code().is_some_and(is_not_found_code),
        None => false,
    }
}

fn describes_unknown_cluster(message: &str) -> bool {
    let message = message.to_ascii_lowercase();
    (message.contains("cluster id") && message.contains("is not valid"))
        || message.contains("not found")
        || message.contains("does not exist")
}

fn is_not_found_code(code: &str) -> bool {
    code.contains("NotFound")
}
