//! Planning errors.

use std::error::Error;
use std::fmt;

use weir_core::ConfigError;

/// Errors from loading or planning a workflow.
#[derive(Debug)]
pub enum PlanError {
    /// The workflow document could not be loaded.
    Config(ConfigError),
    /// No execution order covers every task. The named task never
    /// becomes ready, either through a dependency cycle or (for a
    /// workflow built in code, bypassing the loader) a dep naming an
    /// undeclared task.
    Unschedulable {
        /// First stuck task, in declaration order.
        task: String,
    },
    /// The cluster has no machines to schedule onto.
    NoMachines,
}

impl fmt::Display for PlanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(e) => write!(f, "workflow load failed: {e}"),
            Self::Unschedulable { task } => write!(
                f,
                "workflow has no valid execution order: task '{task}' never becomes ready"
            ),
            Self::NoMachines => write!(f, "cluster has no machines to schedule onto"),
        }
    }
}

impl Error for PlanError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Config(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ConfigError> for PlanError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}
