pub mod absurd;
pub mod catalog;
pub mod chains;
pub mod consequences;
pub mod equipment;
pub mod financial;
pub mod interventions;
pub mod safety;
pub mod social;
pub mod training;
pub mod weather;

pub use catalog::{
    CatalogError, EventCatalog, EventCategory, EventDefinition, EventOption, EventSummary, Frequency,
    Impact, ImpactError, Outcome,
};
pub use chains::{ChainDefinition, ChainRegistry};

/// Every builtin event, in catalog order.
pub fn builtin_events() -> Vec<catalog::EventDefinition> {
    let mut events = Vec::new();
    events.extend(financial::events());
    events.extend(social::events());
    events.extend(training::events());
    events.extend(safety::events());
    events.extend(weather::events());
    events.extend(equipment::events());
    events.extend(absurd::events());
    events.extend(consequences::events());
    events.extend(interventions::events());
    events
}
