// src/resolver/mod.rs

//! Configuration resolution
//!
//! This module turns a package's static declaration tables plus a chosen
//! version and variant request into a concrete build plan: the dependency
//! set whose conditions hold and the ordered toolchain argument sequence.
//!
//! Resolution is purely functional per call: all inputs are immutable for
//! the duration of the call, nothing is cached between calls, and the
//! same inputs always produce the same plan.

mod arguments;
mod dependencies;
mod plan;

pub use arguments::resolve_arguments;
pub use dependencies::resolve_dependencies;
pub use plan::{DependencySpec, ResolvedPlan};

use crate::error::Result;
use crate::package::PackageDefinition;
use crate::variant::SelectionRequest;
use crate::version::Version;
use tracing::debug;

/// Resolve a concrete build plan for one package
///
/// Validates the request into a complete selection, evaluates the
/// dependency clause table, and generates the argument sequence. Any
/// failure aborts the whole call; no partial plan is produced.
pub fn resolve(
    package: &PackageDefinition,
    version: &Version,
    request: &SelectionRequest,
) -> Result<ResolvedPlan> {
    let selection = package.variants.resolve_selection(request)?;
    debug!(package = %package.name, %version, %selection, "resolving build plan");

    let dependencies = resolve_dependencies(&package.dependencies, version, &selection)?;
    let arguments =
        resolve_arguments(package.profile.as_ref(), &package.arguments, version, &selection)?;

    debug!(
        package = %package.name,
        dependencies = dependencies.len(),
        arguments = arguments.len(),
        "build plan resolved"
    );

    Ok(ResolvedPlan {
        dependencies,
        arguments,
    })
}
