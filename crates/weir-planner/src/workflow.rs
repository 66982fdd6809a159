//! Workflow task graphs and their JSON loader.

use std::path::Path;

use serde_json::Value;
use smallvec::SmallVec;

use weir_core::config;
use weir_core::ConfigError;

/// One task in a workflow graph.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WorkflowTask {
    /// Unique id within the workflow.
    pub id: String,
    /// Execution time in ticks.
    pub runtime: u64,
    /// Ids of tasks that must finish before this one starts. Most
    /// tasks have a handful of parents, so the list stays inline.
    pub deps: SmallVec<[String; 4]>,
}

/// A workflow: the task graph an observation's data is processed
/// with once staged.
///
/// The document shape is:
///
/// ```json
/// {
///   "workflow": {
///     "tasks": [
///       { "id": "grid", "runtime": 10, "deps": [] },
///       { "id": "clean", "runtime": 20, "deps": ["grid"] }
///     ]
///   }
/// }
/// ```
///
/// The loader checks shape only: ids unique, every dep declared.
/// Cycle detection happens at planning time, since a workflow can
/// also be built in code.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Workflow {
    /// Tasks in declaration order. Declaration order is the
    /// tie-break every deterministic planning decision falls back
    /// to.
    pub tasks: Vec<WorkflowTask>,
}

impl Workflow {
    /// Load a workflow file.
    ///
    /// # Errors
    ///
    /// [`ConfigError::NotFound`] / [`ConfigError::Io`] for the file,
    /// plus the [`from_json`](Self::from_json) errors for its
    /// content.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::from_json(&config::read_text(path.as_ref())?)
    }

    /// Parse workflow text.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Parse`] for malformed JSON;
    /// [`ConfigError::MissingField`] / [`ConfigError::InvalidField`]
    /// for a bad task list, duplicate task ids, or a dep naming an
    /// undeclared task.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let doc = config::parse_document(text)?;
        let entries = config::require_array(&doc, "workflow.tasks")?;
        let mut tasks = Vec::with_capacity(entries.len());
        for entry in entries {
            tasks.push(task_from(entry)?);
        }

        for (i, task) in tasks.iter().enumerate() {
            if tasks[..i].iter().any(|t| t.id == task.id) {
                return Err(ConfigError::InvalidField {
                    field: "workflow.tasks".to_string(),
                    expected: "a list of uniquely-identified tasks",
                });
            }
        }
        for task in &tasks {
            for dep in &task.deps {
                if !tasks.iter().any(|t| &t.id == dep) {
                    return Err(ConfigError::InvalidField {
                        field: "workflow.tasks.deps".to_string(),
                        expected: "a list of declared task ids",
                    });
                }
            }
        }

        Ok(Self { tasks })
    }

    /// Number of tasks.
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Whether the workflow has no tasks.
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}

fn task_from(entry: &Value) -> Result<WorkflowTask, ConfigError> {
    let deps = config::require_array(entry, "deps")?
        .iter()
        .map(|d| {
            d.as_str()
                .map(str::to_string)
                .ok_or_else(|| ConfigError::InvalidField {
                    field: "workflow.tasks.deps".to_string(),
                    expected: "a list of declared task ids",
                })
        })
        .collect::<Result<SmallVec<[String; 4]>, ConfigError>>()?;
    Ok(WorkflowTask {
        id: config::require_str(entry, "id")?.to_string(),
        runtime: config::require_u64(entry, "runtime")?,
        deps,
    })
}
