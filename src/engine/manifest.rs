//! engine::manifest
//!
//! The pipeline manifest written to `convoy/pipeline.yml`.
//!
//! ```yaml
//! name: pipeline-badgoose-goose
//! version: 1
//! source:
//!   provider: GitHub
//!   properties:
//!     repository: https://github.com/badgoose/goose
//!     branch: main
//!     access_token_secret: github-token-badgoose-goose
//! stages:
//!   - name: test
//!   - name: prod
//!     requires_approval: true
//! ```

use serde::Serialize;

use crate::core::types::PipelineName;
use crate::provider::ProviderKind;
use crate::store::Environment;

/// Current manifest schema version.
pub const MANIFEST_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PipelineManifest {
    pub name: PipelineName,
    pub version: u32,
    pub source: Source,
    pub stages: Vec<Stage>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Source {
    pub provider: ProviderKind,
    pub properties: SourceProperties,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SourceProperties {
    pub repository: String,
    pub branch: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access_token_secret: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Stage {
    pub name: String,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub requires_approval: bool,
}

impl PipelineManifest {
    /// One stage per environment, in order; production stages need approval.
    pub fn new(
        name: PipelineName,
        provider: ProviderKind,
        properties: SourceProperties,
        environments: &[Environment],
    ) -> Self {
        Self {
            name,
            version: MANIFEST_VERSION,
            source: Source {
                provider,
                properties,
            },
            stages: environments
                .iter()
                .map(|env| Stage {
                    name: env.name.clone(),
                    requires_approval: env.prod,
                })
                .collect(),
        }
    }

    pub fn to_yaml(&self) -> Result<String, serde_yaml::Error> {
        serde_yaml::to_string(self)
    }
}
