//! store::resources
//!
//! Per-region resources an application has provisioned for pipelines
//! (artifact bucket, encryption key).

use serde::{Deserialize, Serialize};

use super::file_store::{read_toml, FileConfigStore};
use super::traits::{Application, StoreError};
use crate::core::types::Region;

/// Pipeline support resources in one region.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RegionalResources {
    pub region: Region,
    pub s3_bucket: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kms_key_arn: Option<String>,
}

/// Looks up an application's regional resources.
pub trait AppResourcesGetter {
    fn get_regional_app_resources(
        &self,
        app: &Application,
    ) -> Result<Vec<RegionalResources>, StoreError>;
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ResourcesFile {
    #[serde(default)]
    regions: Vec<RegionalResources>,
}

/// Reads `<root>/applications/<app>/resources.toml`:
///
/// ```toml
/// [[regions]]
/// region = "us-west-2"
/// s3_bucket = "badgoose-pipeline-us-west-2"
/// kms_key_arn = "arn:aws:kms:us-west-2:123456789012:key/abcd"
/// ```
///
/// A missing file means no regional resources yet.
#[derive(Debug, Clone)]
pub struct FileResourcesGetter {
    store: FileConfigStore,
}

impl FileResourcesGetter {
    pub fn new(store: FileConfigStore) -> Self {
        Self { store }
    }
}

impl AppResourcesGetter for FileResourcesGetter {
    fn get_regional_app_resources(
        &self,
        app: &Application,
    ) -> Result<Vec<RegionalResources>, StoreError> {
        let path = self.store.app_dir(&app.name)?.join("resources.toml");
        if !path.exists() {
            return Ok(Vec::new());
        }
        let file: ResourcesFile = read_toml(&path)?;
        Ok(file.regions)
    }
}
