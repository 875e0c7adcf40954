// src/resolver/dependencies.rs

//! Dependency clause table evaluation

use super::plan::DependencySpec;
use crate::error::{Error, Result};
use crate::package::DependencyClause;
use crate::variant::Selection;
use crate::version::Version;
use tracing::debug;

/// Resolve a clause table to the dependencies whose conditions hold
///
/// The result preserves clause declaration order, so plans are
/// reproducible run to run. Two fired clauses naming the same dependency
/// with the same spec collapse into one entry at the first clause's
/// position; with differing specs they are a declaration-authoring error
/// and the whole call fails with `ConflictingDependencyConstraints` —
/// the engine never silently picks one.
pub fn resolve_dependencies(
    clauses: &[DependencyClause],
    version: &Version,
    selection: &Selection,
) -> Result<Vec<DependencySpec>> {
    let mut resolved: Vec<DependencySpec> = Vec::new();

    for clause in clauses {
        if !clause.condition.evaluate(version, selection)? {
            continue;
        }
        debug!(dependency = %clause.name, spec = %clause.spec, "dependency clause fired");

        match resolved.iter().find(|d| d.name == clause.name) {
            Some(existing) if existing.spec == clause.spec => {}
            Some(existing) => {
                return Err(Error::ConflictingDependencyConstraints {
                    dependency: clause.name.clone(),
                    first: existing.spec.clone(),
                    second: clause.spec.clone(),
                });
            }
            None => resolved.push(DependencySpec {
                name: clause.name.clone(),
                spec: clause.spec.clone(),
            }),
        }
    }

    Ok(resolved)
}
