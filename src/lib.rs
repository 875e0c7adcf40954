// src/lib.rs

//! Confit: declarative build-configuration resolution
//!
//! Given a package's declared configuration space (versions, variants,
//! conditional dependency clauses, and an ordered argument rule table),
//! confit deterministically resolves a concrete build plan — the
//! dependency set plus the toolchain argument sequence — for any valid
//! selection of options.
//!
//! # Architecture
//!
//! - Declarations-first: a package's whole configuration space is static
//!   data, built once and never mutated
//! - Variants: boolean and enumerated build options with defaults and
//!   closed legal-value sets
//! - Conditions: conjunctions of version and variant predicates gating
//!   dependency clauses and argument rules
//! - One interpreter: what triggers a flag is data in the rule table; how
//!   rules are applied is a single fixed algorithm
//! - No partial plans: every resolution error aborts the call wholesale
//!
//! The hosting package manager supplies definitions (or definition files,
//! see [`definition`]) and consumes [`ResolvedPlan`]s; fetching sources
//! and invoking the configure tool stay on its side of the fence.

pub mod condition;
pub mod definition;
mod error;
pub mod package;
pub mod resolver;
pub mod variant;
pub mod version;

pub use condition::{Atom, Condition};
pub use definition::{parse_definition, parse_definition_file};
pub use error::{Error, Result};
pub use package::{
    ArgumentRule, DeclaredVersion, DependencyClause, PackageDefinition, ProfileRule,
};
pub use resolver::{resolve, DependencySpec, ResolvedPlan};
pub use variant::{Selection, SelectionRequest, Variant, VariantKind, VariantSet, VariantValue};
pub use version::{Component, Version, VersionConstraint};
