use crate::resolver::{suggest_major_upgrade, ReleaseLookup, ResolveError};
use crate::rewrite::Replacements;
use crate::workflow::Workflow;
use std::collections::HashSet;

/// Resolve every step's `uses` and collect the references that have a newer
/// major release, keyed by the full original reference.
///
/// Each distinct reference is looked up once, however many steps use it.
pub async fn collect_replacements(
    workflow: &Workflow,
    lookup: &dyn ReleaseLookup,
    verbose: bool,
) -> Result<Replacements, ResolveError> {
    let mut resolved: HashSet<&str> = HashSet::new();
    let mut replacements = Replacements::new();

    for job in &workflow.jobs {
        for step in &job.steps {
            if verbose {
                if step.uses.is_empty() {
                    println!("  {}", step.label());
                } else {
                    println!("  {}: {}", step.label(), step.uses);
                }
            }

            if step.uses.is_empty() || !resolved.insert(step.uses.as_str()) {
                continue;
            }

            let suggestion = suggest_major_upgrade(lookup, &step.uses).await?;
            if let Some(tag) = suggestion {
                tracing::debug!(job = %job.id, uses = %step.uses, new = %tag, "Newer major available");
                replacements.insert(step.uses.clone(), tag);
            }
        }
    }

    Ok(replacements)
}
