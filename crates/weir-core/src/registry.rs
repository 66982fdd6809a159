//! Name-keyed ownership of every observation in a run.

use indexmap::IndexMap;

use crate::error::RegistryError;
use crate::observation::Observation;

/// Owns all observations for one simulation run, keyed by name.
///
/// Names must be unique within a run; insertion order is preserved so
/// iteration is deterministic. Processes refer to observations by name
/// and borrow them from here for the duration of one resumption, which
/// keeps a single mutable owner even when several processes touch the
/// same observation across ticks.
#[derive(Clone, Debug, Default)]
pub struct ObservationRegistry {
    observations: IndexMap<String, Observation>,
}

impl ObservationRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an observation.
    ///
    /// # Errors
    ///
    /// [`RegistryError::DuplicateName`] if an observation with the
    /// same name is already registered; the registry is unchanged.
    pub fn insert(&mut self, observation: Observation) -> Result<(), RegistryError> {
        if self.observations.contains_key(&observation.name) {
            return Err(RegistryError::DuplicateName {
                name: observation.name,
            });
        }
        self.observations
            .insert(observation.name.clone(), observation);
        Ok(())
    }

    /// Look up an observation by name.
    pub fn get(&self, name: &str) -> Option<&Observation> {
        self.observations.get(name)
    }

    /// Look up an observation by name, mutably.
    pub fn get_mut(&mut self, name: &str) -> Option<&mut Observation> {
        self.observations.get_mut(name)
    }

    /// Whether an observation with this name is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.observations.contains_key(name)
    }

    /// Number of registered observations.
    pub fn len(&self) -> usize {
        self.observations.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    /// Iterate observations in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Observation> {
        self.observations.values()
    }
}
