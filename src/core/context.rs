use std::borrow::Cow;
use std::path::Path;

use bevy_ecs::prelude::*;

use crate::config::EngineConfig;
use crate::data::catalog::{CatalogError, EventCatalog, EventDefinition};
use crate::data::chains::ChainRegistry;
use crate::simulation::state::GameState;

/// Everything the engine reads but never mutates during play: tunables,
/// the validated catalog and the chain registry. Passed explicitly to every
/// entry point.
#[derive(Resource, Debug, Clone)]
pub struct EngineContext {
    pub config: EngineConfig,
    pub catalog: EventCatalog,
    pub chains: ChainRegistry,
}

impl EngineContext {
    pub fn new(config: EngineConfig, catalog: EventCatalog, chains: ChainRegistry) -> Self {
        Self {
            config,
            catalog,
            chains,
        }
    }

    pub fn builtin() -> Result<Self, CatalogError> {
        Self::with_config(EngineConfig::builtin())
    }

    pub fn with_config(config: EngineConfig) -> Result<Self, CatalogError> {
        let chains = ChainRegistry::builtin()?;
        let catalog = EventCatalog::builtin(&chains)?;
        Ok(Self::new(config, catalog, chains))
    }

    /// Merge extra events from a JSON catalog file.
    pub fn merge_catalog_file(&mut self, path: impl AsRef<Path>) -> Result<usize, CatalogError> {
        self.catalog.merge_file(path, &self.chains)
    }

    /// Look an event up by id: the catalog first, then whatever follow-ups
    /// the active chains would generate from this state.
    pub fn find_event(&self, state: &GameState, id: &str) -> Option<Cow<'_, EventDefinition>> {
        if let Some(event) = self.catalog.get(id) {
            return Some(Cow::Borrowed(event));
        }
        state
            .active_chains
            .iter()
            .filter_map(|(chain_id, active)| self.chains.consequence(chain_id, state, active))
            .find(|event| event.id == id)
            .map(Cow::Owned)
    }
}
