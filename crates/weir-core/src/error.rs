//! Error types for the Weir staging simulator.
//!
//! One enum per subsystem: configuration loading, capacity pools,
//! simulated processes, the simulation step loop, and the observation
//! registry. Every failure in the pipeline is fatal to the run — the
//! simulator is a correctness-evaluation tool, so a misused pipeline
//! halts loudly instead of being papered over.

use std::error::Error;
use std::fmt;
use std::io;
use std::path::PathBuf;

use crate::observation::RunStatus;
use crate::time::Tick;

/// Errors raised while loading a configuration document.
///
/// All variants are raised at construction time, before any simulated
/// time advances. Each failure mode is its own variant so a harness
/// can tell a missing file from a malformed one from an incomplete
/// one.
#[derive(Debug)]
pub enum ConfigError {
    /// The configuration file does not exist.
    NotFound {
        /// Path that was requested.
        path: PathBuf,
    },
    /// The file exists but could not be read.
    Io(io::Error),
    /// The file was read but is not valid JSON.
    Parse {
        /// Parser description of the malformation.
        detail: String,
    },
    /// The document parsed but a required field is absent.
    MissingField {
        /// Dotted path of the absent field, e.g. `buffer.hot`.
        field: String,
    },
    /// A field is present but holds the wrong kind of value.
    InvalidField {
        /// Dotted path of the offending field.
        field: String,
        /// What the loader expected to find there.
        expected: &'static str,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound { path } => {
                write!(f, "configuration file not found: {}", path.display())
            }
            Self::Io(e) => write!(f, "configuration file unreadable: {e}"),
            Self::Parse { detail } => write!(f, "configuration is not valid JSON: {detail}"),
            Self::MissingField { field } => {
                write!(f, "configuration field '{field}' is missing")
            }
            Self::InvalidField { field, expected } => {
                write!(f, "configuration field '{field}' is not {expected}")
            }
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for ConfigError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

/// Errors from a single capacity-pool operation.
///
/// Pool operations are all-or-nothing: a rejected operation leaves
/// `current_capacity` and the resident table untouched.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PoolError {
    /// `reserve` asked for more than the pool currently holds.
    CapacityExhausted {
        /// Name of the pool (`hot` or `cold`).
        pool: String,
        /// Amount requested this tick.
        requested: u64,
        /// Capacity actually available.
        available: u64,
    },
    /// `reserve` asked for more than the pool admits in one tick.
    RateExceeded {
        /// Name of the pool.
        pool: String,
        /// Amount requested this tick.
        requested: u64,
        /// The pool's per-tick rate cap.
        rate_cap: u64,
    },
    /// The named observation has no resident data in this pool.
    NotResident {
        /// Name of the pool.
        pool: String,
        /// Observation that was expected to be resident.
        observation: String,
    },
}

impl fmt::Display for PoolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CapacityExhausted {
                pool,
                requested,
                available,
            } => write!(
                f,
                "pool '{pool}': requested {requested} units, {available} available"
            ),
            Self::RateExceeded {
                pool,
                requested,
                rate_cap,
            } => write!(
                f,
                "pool '{pool}' rate cap is {rate_cap}/tick, {requested} requested"
            ),
            Self::NotResident { pool, observation } => write!(
                f,
                "observation '{observation}' is not resident in pool '{pool}'"
            ),
        }
    }
}

impl Error for PoolError {}

/// Errors from a simulated process resumption.
///
/// Returned by `Process::resume` implementations and wrapped in
/// [`StepError::ProcessFailed`] by the simulation kernel. Precondition
/// variants are raised at the process's first resumption, not at
/// creation: creating a process only schedules it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ProcessError {
    /// Ingest was started for an observation that is not running.
    NotRunning {
        /// The offending observation.
        observation: String,
        /// The status it actually had.
        status: RunStatus,
    },
    /// Transfer was started for an observation with nothing staged
    /// in the hot store.
    NothingStaged {
        /// The offending observation.
        observation: String,
    },
    /// A process referenced an observation the registry has never
    /// seen.
    UnknownObservation {
        /// The unregistered name.
        observation: String,
    },
    /// A capacity-pool operation failed mid-process.
    Pool(PoolError),
    /// Workflow planning failed for a staged observation.
    PlanningFailed {
        /// Observation whose workflow was being planned.
        observation: String,
        /// Description of the planning failure.
        reason: String,
    },
    /// A placement decision named a machine the cluster refused.
    PlacementFailed {
        /// Observation being dispatched.
        observation: String,
        /// Description of the cluster's refusal.
        reason: String,
    },
}

impl fmt::Display for ProcessError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotRunning {
                observation,
                status,
            } => write!(
                f,
                "observation '{observation}' is {status}, not running"
            ),
            Self::NothingStaged { observation } => write!(
                f,
                "observation '{observation}' has no data staged in the hot store"
            ),
            Self::UnknownObservation { observation } => {
                write!(f, "observation '{observation}' is not registered")
            }
            Self::Pool(e) => write!(f, "pool operation failed: {e}"),
            Self::PlanningFailed {
                observation,
                reason,
            } => write!(f, "planning for observation '{observation}' failed: {reason}"),
            Self::PlacementFailed {
                observation,
                reason,
            } => write!(
                f,
                "placement of observation '{observation}' failed: {reason}"
            ),
        }
    }
}

impl Error for ProcessError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Pool(e) => Some(e),
            _ => None,
        }
    }
}

impl From<PoolError> for ProcessError {
    fn from(e: PoolError) -> Self {
        Self::Pool(e)
    }
}

/// Errors from the simulation kernel during `step()` or a run driver.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StepError {
    /// A process returned an error during resumption. Fatal: the
    /// clock does not advance past the failed step and the process is
    /// removed from the schedule.
    ProcessFailed {
        /// Name of the failing process.
        name: String,
        /// The underlying process error.
        reason: ProcessError,
    },
    /// `run_to_idle` hit its safety bound with processes still live.
    IdleLimit {
        /// The bound that was hit.
        limit: Tick,
        /// Processes still scheduled when it was hit.
        live: usize,
    },
}

impl fmt::Display for StepError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ProcessFailed { name, reason } => {
                write!(f, "process '{name}' failed: {reason}")
            }
            Self::IdleLimit { limit, live } => write!(
                f,
                "{live} processes still live at safety bound (tick {limit})"
            ),
        }
    }
}

impl Error for StepError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::ProcessFailed { reason, .. } => Some(reason),
            Self::IdleLimit { .. } => None,
        }
    }
}

/// Errors from the observation registry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RegistryError {
    /// An observation with this name is already registered.
    DuplicateName {
        /// The colliding name.
        name: String,
    },
}

impl fmt::Display for RegistryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateName { name } => {
                write!(f, "observation '{name}' is already registered")
            }
        }
    }
}

impl Error for RegistryError {}
