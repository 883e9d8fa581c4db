use bon::bon;
use tracing::warn;

pub const DEFAULT_REGION: &str = "us-east-1";
pub const REGIONS_ENV: &str = "EMR_REGIONS";
/// Singular spelling found in older deployment docs. Not honoured.
pub const LEGACY_REGION_ENV: &str = "EMR_REGION";

/// Per-cold-start configuration for the handler.
#[derive(Debug, Clone, PartialEq)]
pub struct HandlerConfig {
    regions: Vec<String>,
}

#[bon]
impl HandlerConfig {
    /// `regions` is the raw comma-separated list, exactly as it would appear
    /// in `EMR_REGIONS`.
    #[builder]
    pub fn new(#[builder(into)] regions: Option<String>) -> Self {
        Self {
            regions: resolve_regions(regions.as_deref()),
        }
    }
}

impl HandlerConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any variable source; `from_env` passes the
    /// process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let regions = lookup(REGIONS_ENV);

        if regions.is_none() {
            if let Some(legacy) = lookup(LEGACY_REGION_ENV) {
                warn!(
                    "{} is set to {:?} but ignored; use {} instead",
                    LEGACY_REGION_ENV, legacy, REGIONS_ENV
                );
            }
        }

        Self::builder().maybe_regions(regions).build()
    }

    /// Regions in search order. Never empty.
    pub fn regions(&self) -> &[String] {
        &self.regions
    }
}

impl Default for HandlerConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

pub fn resolve_regions(raw: Option<&str>) -> Vec<String> {
    let regions: Vec<String> = raw
        .unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|region| !region.is_empty())
        .map(str::to_string)
        .collect();

    if regions.is_empty() {
        vec![DEFAULT_REGION.to_string()]
    } else {
        regions
    }
}
