//! Engine registry

use std::collections::BTreeMap;
use std::sync::Arc;

use cmet_core::{Error, Result};

use crate::{CompressionEngine, FirstLastEngine, NoCompressionEngine, PipelineEngine};

type EngineFactory = Arc<dyn Fn() -> Box<dyn CompressionEngine> + Send + Sync>;

/// Enumerable set of engine ids, each constructible on demand
#[derive(Clone)]
pub struct EngineRegistry {
    factories: BTreeMap<String, EngineFactory>,
}

impl EngineRegistry {
    /// Registry with the built-in engines
    ///
    /// `pipeline` is registered without stages; callers wire its stages.
    pub fn new() -> Self {
        let mut registry = Self::empty();
        registry.register(NoCompressionEngine::ID, || Box::new(NoCompressionEngine));
        registry.register(FirstLastEngine::ID, || Box::new(FirstLastEngine));
        registry.register(PipelineEngine::ID, || Box::new(PipelineEngine::new(Vec::new())));
        registry
    }

    pub fn empty() -> Self {
        Self {
            factories: BTreeMap::new(),
        }
    }

    /// Register (or replace) an engine constructor
    pub fn register<F>(&mut self, id: impl Into<String>, factory: F)
    where
        F: Fn() -> Box<dyn CompressionEngine> + Send + Sync + 'static,
    {
        self.factories.insert(id.into(), Arc::new(factory));
    }

    /// Registered ids in sorted order
    pub fn ids(&self) -> Vec<String> {
        self.factories.keys().cloned().collect()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.factories.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.factories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }

    pub fn create(&self, id: &str) -> Result<Box<dyn CompressionEngine>> {
        self.factories
            .get(id)
            .map(|factory| factory())
            .ok_or_else(|| Error::UnknownEngine(id.to_string()))
    }
}

impl Default for EngineRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_engines() {
        let registry = EngineRegistry::new();
        assert_eq!(registry.ids(), vec!["first_last", "none", "pipeline"]);
        assert_eq!(registry.create("none").unwrap().id(), "none");
    }

    #[test]
    fn test_unknown_engine() {
        let registry = EngineRegistry::new();
        assert!(matches!(
            registry.create("zstd"),
            Err(Error::UnknownEngine(id)) if id == "zstd"
        ));
    }

    #[test]
    fn test_register_custom_engine() {
        let mut registry = EngineRegistry::empty();
        registry.register("baseline", || Box::new(NoCompressionEngine));
        assert!(registry.contains("baseline"));
        assert_eq!(registry.len(), 1);
    }
}
