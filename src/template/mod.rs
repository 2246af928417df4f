//! template
//!
//! Rendering of pipeline artifacts from embedded templates.
//!
//! # Templates
//!
//! | Id | Source |
//! |----|--------|
//! | `cicd/buildspec.yml` | `templates/cicd/buildspec.yml` |
//!
//! Templates are compiled into the binary and registered with a [`tera`]
//! engine when the renderer is built.
//!
//! # Example
//!
//! ```
//! use convoy::template::{Parser, TemplateRenderer, BUILDSPEC_TEMPLATE};
//! use serde_json::json;
//!
//! let renderer = TemplateRenderer::new().unwrap();
//! let out = renderer
//!     .parse(
//!         BUILDSPEC_TEMPLATE,
//!         &json!({
//!             "pipeline_name": "pipeline-badgoose-goose",
//!             "app_name": "badgoose",
//!             "branch": "main",
//!             "provider": "GitHub",
//!             "repository": "https://github.com/badgoose/goose",
//!             "environments": [{"name": "test", "region": "us-west-2", "prod": false}],
//!             "artifact_buckets": [],
//!             "version": "0.1.0",
//!         }),
//!     )
//!     .unwrap();
//! assert!(out.contains("pipeline-badgoose-goose"));
//! ```

pub mod mock;

use std::error::Error as _;

use tera::{Context, Tera};
use thiserror::Error;

/// Id of the buildspec template.
pub const BUILDSPEC_TEMPLATE: &str = "cicd/buildspec.yml";

const EMBEDDED: &[(&str, &str)] = &[(
    BUILDSPEC_TEMPLATE,
    include_str!("../../templates/cicd/buildspec.yml"),
)];

/// Errors from template rendering.
#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("template {id} not found")]
    NotFound { id: String },

    #[error("load template {id}: {message}")]
    Load { id: String, message: String },

    #[error("render template {id}: {message}")]
    Render { id: String, message: String },
}

/// Renders a template id against JSON-shaped data.
pub trait Parser {
    fn parse(&self, id: &str, data: &serde_json::Value) -> Result<String, TemplateError>;
}

/// [`Parser`] over the embedded templates.
#[derive(Debug)]
pub struct TemplateRenderer {
    tera: Tera,
}

impl TemplateRenderer {
    /// Build a renderer with every embedded template registered.
    ///
    /// # Errors
    ///
    /// [`TemplateError::Load`] if an embedded template fails to compile.
    pub fn new() -> Result<Self, TemplateError> {
        let mut tera = Tera::default();
        for (id, source) in EMBEDDED {
            tera.add_raw_template(id, source)
                .map_err(|e| TemplateError::Load {
                    id: id.to_string(),
                    message: chain(&e),
                })?;
        }
        Ok(Self { tera })
    }
}

impl Parser for TemplateRenderer {
    fn parse(&self, id: &str, data: &serde_json::Value) -> Result<String, TemplateError> {
        if !self.tera.get_template_names().any(|name| name == id) {
            return Err(TemplateError::NotFound { id: id.to_string() });
        }
        let context = Context::from_value(data.clone()).map_err(|e| TemplateError::Render {
            id: id.to_string(),
            message: chain(&e),
        })?;
        self.tera
            .render(id, &context)
            .map_err(|e| TemplateError::Render {
                id: id.to_string(),
                message: chain(&e),
            })
    }
}

/// Tera keeps the useful part of an error in its source chain.
fn chain(err: &tera::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn context() -> serde_json::Value {
        json!({
            "pipeline_name": "pipeline-badgoose-goose",
            "app_name": "badgoose",
            "branch": "main",
            "provider": "GitHub",
            "repository": "https://github.com/badgoose/goose",
            "environments": [
                {"name": "test", "region": "us-west-2", "prod": false},
                {"name": "prod", "region": "us-east-1", "prod": true},
            ],
            "artifact_buckets": [{"region": "us-west-2", "bucket": "bucket-west"}],
            "version": "0.1.0",
        })
    }

    #[test]
    fn renders_buildspec() {
        let renderer = TemplateRenderer::new().unwrap();
        let out = renderer.parse(BUILDSPEC_TEMPLATE, &context()).unwrap();

        assert!(out.contains("PIPELINE_NAME: \"pipeline-badgoose-goose\""));
        assert!(out.contains("Packaging for test in us-west-2\""));
        assert!(out.contains("Packaging for prod in us-east-1 (production)"));
        assert!(out.contains("us-west-2: bucket-west"));
        assert!(out.contains("version: 0.2"));
    }

    #[test]
    fn names_stay_strings_in_yaml() {
        let mut ctx = context();
        ctx["app_name"] = json!("yes");
        ctx["pipeline_name"] = json!("1e3");

        let renderer = TemplateRenderer::new().unwrap();
        let out = renderer.parse(BUILDSPEC_TEMPLATE, &ctx).unwrap();
        let doc: serde_yaml::Value = serde_yaml::from_str(&out).unwrap();

        let vars = &doc["env"]["variables"];
        assert_eq!(vars["APP_NAME"].as_str(), Some("yes"));
        assert_eq!(vars["PIPELINE_NAME"].as_str(), Some("1e3"));
    }

    #[test]
    fn environments_in_order() {
        let renderer = TemplateRenderer::new().unwrap();
        let out = renderer.parse(BUILDSPEC_TEMPLATE, &context()).unwrap();
        let test = out.find("infrastructure/test").unwrap();
        let prod = out.find("infrastructure/prod").unwrap();
        assert!(test < prod);
    }

    #[test]
    fn unknown_template() {
        let renderer = TemplateRenderer::new().unwrap();
        let err = renderer.parse("cicd/nope.yml", &context()).unwrap_err();
        assert_eq!(err.to_string(), "template cicd/nope.yml not found");
    }

    #[test]
    fn missing_variable_is_render_error() {
        let renderer = TemplateRenderer::new().unwrap();
        let err = renderer
            .parse(BUILDSPEC_TEMPLATE, &json!({"app_name": "badgoose"}))
            .unwrap_err();
        assert!(matches!(err, TemplateError::Render { .. }));
    }

    #[test]
    fn non_object_context_is_render_error() {
        let renderer = TemplateRenderer::new().unwrap();
        let err = renderer.parse(BUILDSPEC_TEMPLATE, &json!([1, 2])).unwrap_err();
        assert!(matches!(err, TemplateError::Render { .. }));
    }
}
