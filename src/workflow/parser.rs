use crate::workflow::{Job, Step, Workflow, WorkflowError};
use serde_yaml::Value;

/// Parse workflow YAML and check the `jobs` → `steps` shape.
pub fn parse_workflow(content: &str) -> Result<Workflow, WorkflowError> {
    if content.trim().is_empty() {
        return Err(WorkflowError::MissingJobs);
    }
    let mut root: Value = serde_yaml::from_str(content)?;
    // `<<: *anchor` stays a literal key until merged
    root.apply_merge()?;

    let jobs = root
        .get("jobs")
        .and_then(Value::as_mapping)
        .ok_or(WorkflowError::MissingJobs)?;

    let mut workflow = Workflow {
        jobs: Vec::with_capacity(jobs.len()),
    };

    for (key, job) in jobs {
        let id = job_id(key);

        let steps = job
            .get("steps")
            .and_then(Value::as_sequence)
            .ok_or_else(|| WorkflowError::MissingSteps { job: id.clone() })?;

        let mut parsed = Vec::with_capacity(steps.len());
        for (index, step) in steps.iter().enumerate() {
            if !step.is_mapping() {
                return Err(WorkflowError::StepNotMapping {
                    job: id.clone(),
                    index,
                });
            }
            parsed.push(Step {
                name: string_field(step, "name").unwrap_or_default(),
                uses: string_field(step, "uses").unwrap_or_default(),
            });
        }

        workflow.jobs.push(Job { id, steps: parsed });
    }

    Ok(workflow)
}

fn string_field(value: &Value, key: &str) -> Option<String> {
    value.get(key).and_then(Value::as_str).map(str::to_string)
}

fn job_id(key: &Value) -> String {
    match key {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        other => format!("{:?}", other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BUILD: &str = r#"
name: build
on: [push]
jobs:
  test:
    runs-on: ubuntu-latest
    steps:
      - uses: actions/checkout@v3
      - name: Setup Go
        uses: actions/setup-go@v4
        with:
          go-version: "1.22"
      - name: Test
        run: go test ./...
  lint:
    runs-on: ubuntu-latest
    steps:
      - uses: golangci/golangci-lint-action@v3
"#;

    #[test]
    fn test_parse_jobs_and_steps_in_order() {
        let wf = parse_workflow(BUILD).unwrap();
        assert_eq!(wf.jobs.len(), 2);
        assert_eq!(wf.jobs[0].id, "test");
        assert_eq!(wf.jobs[1].id, "lint");

        let steps = &wf.jobs[0].steps;
        assert_eq!(steps.len(), 3);
        assert_eq!(steps[0].uses, "actions/checkout@v3");
        assert_eq!(steps[0].label(), "actions/checkout@v3");
        assert_eq!(steps[1].label(), "Setup Go");
        assert_eq!(steps[2].uses, "");
        assert_eq!(steps[2].label(), "Test");
    }

    #[test]
    fn test_merge_keys_inherit_steps() {
        let yaml = r#"
jobs:
  build: &base
    runs-on: ubuntu-latest
    steps:
      - uses: actions/checkout@v3
  test:
    <<: *base
    name: test
"#;
        let wf = parse_workflow(yaml).unwrap();
        assert_eq!(wf.jobs.len(), 2);
        assert_eq!(wf.jobs[1].id, "test");
        assert_eq!(wf.jobs[1].steps.len(), 1);
        assert_eq!(wf.jobs[1].steps[0].uses, "actions/checkout@v3");
    }

    #[test]
    fn test_wrong_typed_fields_are_empty() {
        let yaml = "jobs:\n  a:\n    steps:\n      - name: [1, 2]\n        uses: 42\n";
        let wf = parse_workflow(yaml).unwrap();
        assert_eq!(wf.jobs[0].steps[0], Step::default());
    }

    #[test]
    fn test_missing_jobs() {
        assert!(matches!(
            parse_workflow("name: x\non: push\n"),
            Err(WorkflowError::MissingJobs)
        ));
        assert!(matches!(
            parse_workflow("jobs: [a, b]\n"),
            Err(WorkflowError::MissingJobs)
        ));
        assert!(matches!(parse_workflow(""), Err(WorkflowError::MissingJobs)));
        assert!(matches!(
            parse_workflow("- just\n- a list\n"),
            Err(WorkflowError::MissingJobs)
        ));
    }

    #[test]
    fn test_missing_steps() {
        let err = parse_workflow("jobs:\n  build:\n    runs-on: ubuntu-latest\n").unwrap_err();
        assert!(matches!(err, WorkflowError::MissingSteps { ref job } if job == "build"));

        let err = parse_workflow("jobs:\n  build:\n    steps: nope\n").unwrap_err();
        assert!(matches!(err, WorkflowError::MissingSteps { .. }));

        let err = parse_workflow("jobs:\n  build: 3\n").unwrap_err();
        assert!(matches!(err, WorkflowError::MissingSteps { .. }));
    }

    #[test]
    fn test_step_not_mapping() {
        let yaml = "jobs:\n  build:\n    steps:\n      - uses: actions/checkout@v4\n      - echo hi\n";
        let err = parse_workflow(yaml).unwrap_err();
        assert!(matches!(
            err,
            WorkflowError::StepNotMapping { ref job, index: 1 } if job == "build"
        ));
    }

    #[test]
    fn test_malformed_yaml() {
        assert!(matches!(
            parse_workflow("jobs: [unclosed\n"),
            Err(WorkflowError::Yaml(_))
        ));
    }
}
