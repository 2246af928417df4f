//! engine::environments
//!
//! Resolve requested environment names against the configuration store.

use thiserror::Error;

use crate::store::{ConfigStore, Environment, StoreError};

/// The first environment that could not be resolved.
#[derive(Debug, Error)]
#[error("get config of environment {name}: {cause}")]
pub struct EnvironmentLookupError {
    pub name: String,
    pub cause: StoreError,
}

/// Resolve `names` in order, stopping at the first failure.
///
/// The result keeps the caller's order and any duplicates. An empty request
/// resolves to an empty list.
pub fn resolve_environments(
    store: &dyn ConfigStore,
    app: &str,
    names: &[String],
) -> Result<Vec<Environment>, EnvironmentLookupError> {
    names
        .iter()
        .map(|name| {
            tracing::debug!(app, env = %name, "resolving environment");
            store
                .get_environment(app, name)
                .map_err(|cause| EnvironmentLookupError {
                    name: name.clone(),
                    cause,
                })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::mock::MockConfigStore;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn resolves_in_order() {
        let store = MockConfigStore::new()
            .with_env("badgoose", "test", "us-west-2", false)
            .with_env("badgoose", "prod", "us-east-1", true);

        let envs = resolve_environments(&store, "badgoose", &names(&["prod", "test"])).unwrap();
        let got: Vec<_> = envs.iter().map(|e| (e.name.as_str(), e.prod)).collect();
        assert_eq!(got, vec![("prod", true), ("test", false)]);
    }

    #[test]
    fn keeps_duplicates() {
        let store = MockConfigStore::new().with_env("badgoose", "test", "us-west-2", false);
        let envs = resolve_environments(&store, "badgoose", &names(&["test", "test"])).unwrap();
        assert_eq!(envs.len(), 2);
    }

    #[test]
    fn empty_request() {
        let store = MockConfigStore::new();
        assert!(resolve_environments(&store, "badgoose", &[]).unwrap().is_empty());
        assert!(store.lookups().is_empty());
    }

    #[test]
    fn stops_at_first_failure() {
        let store = MockConfigStore::new()
            .with_env("badgoose", "test", "us-west-2", false)
            .with_env("badgoose", "staging", "us-west-2", false);

        let err = resolve_environments(&store, "badgoose", &names(&["test", "prod", "staging"]))
            .unwrap_err();

        assert_eq!(
            err.to_string(),
            "get config of environment prod: couldn't find environment prod in the application badgoose"
        );
        assert_eq!(
            store.lookups(),
            vec!["env:badgoose/test".to_string(), "env:badgoose/prod".to_string()]
        );
    }
}
