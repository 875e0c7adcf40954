// src/resolver/arguments.rs

//! Build argument generation
//!
//! Two phases. Phase one checks the optional version-gated profile: when
//! the chosen version satisfies its constraint, the profile's fixed list
//! is the entire output and the rule table is skipped. Phase two is a
//! pure in-order fold over the rule table; order is semantically
//! meaningful (later rules may assume earlier appends), and duplicate
//! flags for one underlying switch are the downstream toolchain's
//! "last one wins" business, not this engine's.

use crate::error::Result;
use crate::package::{ArgumentRule, ProfileRule};
use crate::variant::Selection;
use crate::version::Version;
use tracing::debug;

/// Resolve the ordered argument sequence for a version and selection
pub fn resolve_arguments(
    profile: Option<&ProfileRule>,
    rules: &[ArgumentRule],
    version: &Version,
    selection: &Selection,
) -> Result<Vec<String>> {
    if let Some(profile) = profile {
        if profile.constraint.satisfies(version) {
            debug!(%version, "fixed profile matched, skipping rule table");
            return Ok(profile.arguments.clone());
        }
    }

    let mut arguments = Vec::new();
    for rule in rules {
        if rule.condition.evaluate(version, selection)? {
            if !rule.value.is_empty() {
                arguments.push(rule.value.clone());
            }
        } else if let Some(otherwise) = &rule.otherwise {
            if !otherwise.is_empty() {
                arguments.push(otherwise.clone());
            }
        }
    }
    Ok(arguments)
}
