use crate::config::HandlerConfig;
use crate::emr::{ClusterLookup, ClusterState, EmrApi};
use crate::error::{ProviderError, TerminatorError};
use crate::model::{resolve_cluster_id, Request, Response};
use tracing::{error, info, warn};

/// Where a cluster was found and what state it was in.
#[derive(Debug, Clone, PartialEq)]
pub struct LocatedCluster {
    pub region: String,
    pub state: ClusterState,
}

pub struct TerminationService<E> {
    api: E,
    config: HandlerConfig,
}

impl<E: EmrApi> TerminationService<E> {
    pub fn new(api: E, config: HandlerConfig) -> Self {
        Self { api, config }
    }

    pub fn config(&self) -> &HandlerConfig {
        &self.config
    }

    pub async fn fetch_status(
        &self,
        cluster_id: &str,
        region: &str,
    ) -> Result<ClusterLookup, ProviderError> {
        info!("Describing cluster {} in {}", cluster_id, region);
        self.api.describe_cluster_state(cluster_id, region).await
    }

    /// Scans `regions` in order and stops at the first one that knows the
    /// cluster. A provider error aborts the scan.
    pub async fn locate_cluster(
        &self,
        cluster_id: &str,
        regions: &[String],
    ) -> Result<Option<LocatedCluster>, ProviderError> {
        for region in regions {
            match self.fetch_status(cluster_id, region).await? {
                ClusterLookup::Found(state) => {
                    info!("Cluster {} found in {} with state {}", cluster_id, region, state);
                    return Ok(Some(LocatedCluster {
                        region: region.clone(),
                        state,
                    }));
                }
                ClusterLookup::NotFound => {
                    info!("Cluster {} not found in {}", cluster_id, region);
                }
            }
        }

        Ok(None)
    }

    pub async fn terminate(&self, cluster_id: &str, region: &str) -> Response {
        info!("Requesting termination of cluster {} in {}", cluster_id, region);

        match self.api.terminate_job_flow(cluster_id, region).await {
            Ok(receipt) if receipt.is_accepted() => Response::success(
                format!(
                    "EMR Cluster {} termination initiated in {}",
                    cluster_id, region
                ),
                receipt,
            ),
            // SdkEmrApi only yields 2xx receipts; other EmrApi implementations may not
            Ok(receipt) => {
                warn!(
                    "Termination of {} in {} returned status {}",
                    cluster_id, region, receipt.metadata.http_status_code
                );
                Response::failed(format!(
                    "Termination of EMR Cluster {} in {} returned HTTP status {}",
                    cluster_id, region, receipt.metadata.http_status_code
                ))
            }
            Err(e) => {
                error!(
                    "Failed to terminate cluster {} in {} ({}): {}",
                    cluster_id,
                    region,
                    e.code.as_deref().unwrap_or("no error code"),
                    e
                );
                Response::failed(e.to_string())
            }
        }
    }

    /// Runs one invocation end to end. Never fails: every error becomes a
    /// `failed` response.
    pub async fn handle(&self, request: &Request) -> Response {
        match self.run(request).await {
            Ok(response) => response,
            Err(TerminatorError::Provider(e)) => {
                error!(
                    "Invocation failed ({}): {}",
                    e.code.as_deref().unwrap_or("no error code"),
                    e
                );
                Response::failed(e.to_string())
            }
            Err(e) => {
                error!("Invocation failed: {}", e);
                Response::from(e)
            }
        }
    }

    async fn run(&self, request: &Request) -> Result<Response, TerminatorError> {
        let cluster_id = resolve_cluster_id(request)?;
        let regions = self.config.regions();
        info!("Searching for cluster {} in {:?}", cluster_id, regions);

        let located = self
            .locate_cluster(cluster_id, regions)
            .await?
            .ok_or_else(|| TerminatorError::ClusterNotFound {
                cluster_id: cluster_id.to_string(),
            })?;

        if located.state.is_terminated() {
            info!("Cluster {} is already terminated.", cluster_id);
            return Ok(Response::info(format!(
                "EMR Cluster {} is already terminated in {}.",
                cluster_id, located.region
            )));
        }

        Ok(self.terminate(cluster_id, &located.region).await)
    }
}
