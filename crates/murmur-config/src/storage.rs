use serde::Deserialize;

/// Object storage configuration for pre-uploaded audio
///
/// Audio referenced by an `r2_key` form field is fetched from
/// `{base_url}/{key}`.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StorageConfig {
    /// Base URL of the bucket (e.g. an R2 public bucket endpoint)
    pub base_url: String,
}
