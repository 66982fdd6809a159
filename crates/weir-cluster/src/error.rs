//! Cluster bookkeeping errors.

use std::error::Error;
use std::fmt;

/// Errors from cluster inventory operations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ClusterError {
    /// Two machines in the inventory share a name.
    DuplicateMachine {
        /// The colliding name.
        name: String,
    },
    /// The named machine is not in the inventory.
    UnknownMachine {
        /// The unknown name.
        name: String,
    },
    /// `provision` was called for a machine already provisioned.
    AlreadyProvisioned {
        /// The occupied machine.
        name: String,
    },
    /// `release` was called for a machine that was not provisioned.
    NotProvisioned {
        /// The idle machine.
        name: String,
    },
}

impl fmt::Display for ClusterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateMachine { name } => {
                write!(f, "machine '{name}' appears twice in the inventory")
            }
            Self::UnknownMachine { name } => write!(f, "machine '{name}' is not in the inventory"),
            Self::AlreadyProvisioned { name } => {
                write!(f, "machine '{name}' is already provisioned")
            }
            Self::NotProvisioned { name } => write!(f, "machine '{name}' is not provisioned"),
        }
    }
}

impl Error for ClusterError {}
