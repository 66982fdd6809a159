//! Machine inventory and provisioning state.

use std::path::Path;

use indexmap::{IndexMap, IndexSet};
use serde_json::Value;

use weir_core::config;
use weir_core::ConfigError;

use crate::error::ClusterError;

/// One compute machine in the facility.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Machine {
    /// Unique name within the cluster.
    pub name: String,
    /// Core count.
    pub cpu: u64,
    /// Memory in harness units.
    pub memory: u64,
    /// Link bandwidth in capacity units per tick.
    pub bandwidth: u64,
}

/// The compute facility's machine inventory.
///
/// Tracks which machines are provisioned to observations. The staging
/// pipeline never touches this directly; only the dispatch side of
/// the scheduler provisions and releases machines. Inventory order is
/// the configuration order, which makes first-fit placement
/// deterministic.
#[derive(Clone, Debug)]
pub struct Cluster {
    machines: IndexMap<String, Machine>,
    provisioned: IndexSet<String>,
}

impl Cluster {
    /// Build a cluster from a machine list.
    ///
    /// # Errors
    ///
    /// [`ClusterError::DuplicateMachine`] if two machines share a
    /// name.
    pub fn new(machines: Vec<Machine>) -> Result<Self, ClusterError> {
        let mut inventory = IndexMap::with_capacity(machines.len());
        for machine in machines {
            if inventory.contains_key(&machine.name) {
                return Err(ClusterError::DuplicateMachine {
                    name: machine.name,
                });
            }
            inventory.insert(machine.name.clone(), machine);
        }
        Ok(Self {
            machines: inventory,
            provisioned: IndexSet::new(),
        })
    }

    /// Load a cluster from a configuration file.
    ///
    /// The document shape is:
    ///
    /// ```json
    /// {
    ///   "cluster": {
    ///     "machines": [
    ///       { "name": "arc-0", "cpu": 84, "memory": 64, "bandwidth": 10 }
    ///     ]
    ///   }
    /// }
    /// ```
    ///
    /// # Errors
    ///
    /// [`ConfigError::NotFound`] / [`ConfigError::Io`] for the file,
    /// plus the [`from_json`](Self::from_json) errors for its content.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::from_json(&config::read_text(path.as_ref())?)
    }

    /// Parse a cluster from configuration text.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Parse`] for malformed JSON,
    /// [`ConfigError::MissingField`] / [`ConfigError::InvalidField`]
    /// for a bad machine list, including duplicate machine names.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let doc = config::parse_document(text)?;
        let entries = config::require_array(&doc, "cluster.machines")?;
        let mut machines = Vec::with_capacity(entries.len());
        for entry in entries {
            machines.push(machine_from(entry)?);
        }
        Self::new(machines).map_err(|_| ConfigError::InvalidField {
            field: "cluster.machines".to_string(),
            expected: "a list of uniquely-named machines",
        })
    }

    /// Mark a machine as provisioned to an observation.
    ///
    /// # Errors
    ///
    /// [`ClusterError::UnknownMachine`] for a name outside the
    /// inventory; [`ClusterError::AlreadyProvisioned`] if it is
    /// occupied. The cluster is unchanged on either.
    pub fn provision(&mut self, name: &str) -> Result<(), ClusterError> {
        if !self.machines.contains_key(name) {
            return Err(ClusterError::UnknownMachine {
                name: name.to_string(),
            });
        }
        if !self.provisioned.insert(name.to_string()) {
            return Err(ClusterError::AlreadyProvisioned {
                name: name.to_string(),
            });
        }
        Ok(())
    }

    /// Return a provisioned machine to the idle inventory.
    ///
    /// # Errors
    ///
    /// [`ClusterError::UnknownMachine`] for a name outside the
    /// inventory; [`ClusterError::NotProvisioned`] if it was idle.
    pub fn release(&mut self, name: &str) -> Result<(), ClusterError> {
        if !self.machines.contains_key(name) {
            return Err(ClusterError::UnknownMachine {
                name: name.to_string(),
            });
        }
        if !self.provisioned.shift_remove(name) {
            return Err(ClusterError::NotProvisioned {
                name: name.to_string(),
            });
        }
        Ok(())
    }

    /// Look up a machine by name.
    pub fn get(&self, name: &str) -> Option<&Machine> {
        self.machines.get(name)
    }

    /// Whether the named machine is currently provisioned.
    pub fn is_provisioned(&self, name: &str) -> bool {
        self.provisioned.contains(name)
    }

    /// All machines, in configuration order.
    pub fn machines(&self) -> impl Iterator<Item = &Machine> {
        self.machines.values()
    }

    /// Idle machines, in configuration order.
    pub fn available_machines(&self) -> impl Iterator<Item = &Machine> {
        self.machines
            .values()
            .filter(|m| !self.provisioned.contains(&m.name))
    }

    /// Size of the inventory.
    pub fn total_machines(&self) -> usize {
        self.machines.len()
    }

    /// Number of idle machines.
    pub fn available_count(&self) -> usize {
        self.machines.len() - self.provisioned.len()
    }
}

fn machine_from(entry: &Value) -> Result<Machine, ConfigError> {
    Ok(Machine {
        name: config::require_str(entry, "name")?.to_string(),
        cpu: config::require_u64(entry, "cpu")?,
        memory: config::require_u64(entry, "memory")?,
        bandwidth: config::require_u64(entry, "bandwidth")?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn fixture(name: &str) -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join("tests/data")
            .join(name)
    }

    fn machine(name: &str) -> Machine {
        Machine {
            name: name.to_string(),
            cpu: 84,
            memory: 64,
            bandwidth: 10,
        }
    }

    fn three_machines() -> Cluster {
        Cluster::new(vec![machine("a"), machine("b"), machine("c")]).unwrap()
    }

    #[test]
    fn loads_inventory_fixture() {
        let cluster = Cluster::from_file(fixture("cluster.json")).unwrap();
        assert_eq!(cluster.total_machines(), 3);
        assert_eq!(cluster.available_count(), 3);
        let first = cluster.machines().next().unwrap();
        assert_eq!(first.name, "arc-0");
        assert_eq!(first.cpu, 84);
    }

    #[test]
    fn missing_machines_is_missing_field() {
        match Cluster::from_json(r#"{ "cluster": {} }"#) {
            Err(ConfigError::MissingField { field }) => {
                assert_eq!(field, "cluster.machines");
            }
            other => panic!("expected MissingField, got {other:?}"),
        }
    }

    #[test]
    fn duplicate_names_rejected_at_load() {
        let text = r#"{ "cluster": { "machines": [
            { "name": "a", "cpu": 1, "memory": 1, "bandwidth": 1 },
            { "name": "a", "cpu": 2, "memory": 2, "bandwidth": 2 }
        ] } }"#;
        match Cluster::from_json(text) {
            Err(ConfigError::InvalidField { field, .. }) => {
                assert_eq!(field, "cluster.machines");
            }
            other => panic!("expected InvalidField, got {other:?}"),
        }
    }

    #[test]
    fn duplicate_names_rejected_in_new() {
        match Cluster::new(vec![machine("a"), machine("a")]) {
            Err(ClusterError::DuplicateMachine { name }) => assert_eq!(name, "a"),
            other => panic!("expected DuplicateMachine, got {other:?}"),
        }
    }

    #[test]
    fn provision_and_release_round_trip() {
        let mut cluster = three_machines();
        cluster.provision("b").unwrap();
        assert!(cluster.is_provisioned("b"));
        assert_eq!(cluster.available_count(), 2);
        let idle: Vec<&str> = cluster
            .available_machines()
            .map(|m| m.name.as_str())
            .collect();
        assert_eq!(idle, ["a", "c"]);

        cluster.release("b").unwrap();
        assert!(!cluster.is_provisioned("b"));
        assert_eq!(cluster.available_count(), 3);
    }

    #[test]
    fn double_provision_rejected() {
        let mut cluster = three_machines();
        cluster.provision("a").unwrap();
        match cluster.provision("a") {
            Err(ClusterError::AlreadyProvisioned { name }) => assert_eq!(name, "a"),
            other => panic!("expected AlreadyProvisioned, got {other:?}"),
        }
    }

    #[test]
    fn release_idle_rejected() {
        let mut cluster = three_machines();
        match cluster.release("a") {
            Err(ClusterError::NotProvisioned { name }) => assert_eq!(name, "a"),
            other => panic!("expected NotProvisioned, got {other:?}"),
        }
    }

    #[test]
    fn unknown_machine_rejected() {
        let mut cluster = three_machines();
        match cluster.provision("ghost") {
            Err(ClusterError::UnknownMachine { name }) => assert_eq!(name, "ghost"),
            other => panic!("expected UnknownMachine, got {other:?}"),
        }
        match cluster.release("ghost") {
            Err(ClusterError::UnknownMachine { .. }) => {}
            other => panic!("expected UnknownMachine, got {other:?}"),
        }
    }
}
