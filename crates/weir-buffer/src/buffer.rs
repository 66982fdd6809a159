//! The two-tier buffer aggregate.

use std::path::Path;

use weir_core::ConfigError;

use crate::config::BufferConfig;
use crate::pool::CapacityPool;
use crate::queue::ProcessingQueue;

/// The staging buffer between telescope and compute facility.
///
/// Owns the hot tier (absorbs live ingest), the cold tier (longer-term
/// staging), and the processing queue of observations whose data has
/// fully migrated to cold and whose workflow has been planned.
///
/// The buffer itself is passive bookkeeping; the simulated ingest and
/// transfer processes drive it tick by tick. It is constructed before
/// the simulation starts, so configuration failures surface before any
/// simulated time has passed.
#[derive(Clone, Debug)]
pub struct Buffer {
    hot: CapacityPool,
    cold: CapacityPool,
    observations_for_processing: ProcessingQueue,
}

impl Buffer {
    /// Build a buffer from validated configuration.
    pub fn new(config: BufferConfig) -> Self {
        Self {
            hot: CapacityPool::new("hot", config.hot.total_capacity, config.hot.rate_cap),
            cold: CapacityPool::new("cold", config.cold.total_capacity, config.cold.rate_cap),
            observations_for_processing: ProcessingQueue::new(),
        }
    }

    /// Build a buffer straight from a configuration file.
    ///
    /// # Errors
    ///
    /// The [`BufferConfig::from_file`] errors: absent file, unreadable
    /// file, malformed JSON, missing or wrongly-typed field.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Ok(Self::new(BufferConfig::from_file(path)?))
    }

    /// The hot tier.
    pub fn hot(&self) -> &CapacityPool {
        &self.hot
    }

    /// The hot tier, mutably.
    pub fn hot_mut(&mut self) -> &mut CapacityPool {
        &mut self.hot
    }

    /// The cold tier.
    pub fn cold(&self) -> &CapacityPool {
        &self.cold
    }

    /// The cold tier, mutably.
    pub fn cold_mut(&mut self) -> &mut CapacityPool {
        &mut self.cold
    }

    /// The planner→scheduler hand-off queue.
    pub fn observations_for_processing(&self) -> &ProcessingQueue {
        &self.observations_for_processing
    }

    /// The hand-off queue, mutably. The planning process enqueues
    /// here; the dispatch process dequeues.
    pub fn observations_for_processing_mut(&mut self) -> &mut ProcessingQueue {
        &mut self.observations_for_processing
    }
}
