pub mod config;
pub mod emr;
pub mod error;
pub mod model;
pub mod service;

pub use config::{resolve_regions, HandlerConfig, DEFAULT_REGION};
pub use emr::{ClusterLookup, ClusterState, EmrApi, SdkEmrApi};
pub use error::{ProviderError, TerminatorError};
pub use model::{
    resolve_cluster_id, Request, Response, ResponseMetadata, ResultStatus, TerminationReceipt,
};
pub use service::{LocatedCluster, TerminationService};
