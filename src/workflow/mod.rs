pub mod parser;
pub mod walker;

use thiserror::Error;

pub use parser::parse_workflow;
pub use walker::collect_replacements;

#[derive(Error, Debug)]
pub enum WorkflowError {
    #[error("malformed YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("jobs not found in workflow")]
    MissingJobs,
    #[error("steps not found or not a list in job {job}")]
    MissingSteps { job: String },
    #[error("step {index} is not a map in job {job}")]
    StepNotMapping { job: String, index: usize },
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Workflow {
    pub jobs: Vec<Job>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Job {
    pub id: String,
    pub steps: Vec<Step>,
}

/// A step's `name` and `uses`; either is empty when absent or not a string.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Step {
    pub name: String,
    pub uses: String,
}

impl Step {
    /// Display label: the step name, falling back to the action reference.
    pub fn label(&self) -> &str {
        if self.name.is_empty() {
            &self.uses
        } else {
            &self.name
        }
    }
}
