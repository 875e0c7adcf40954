// src/package/mod.rs

//! Package definitions: the static declaration tables
//!
//! A `PackageDefinition` collects everything a package declares about its
//! configuration space: known versions, variants, conditional dependency
//! clauses, an optional version-gated argument profile, and the ordered
//! argument rule table. It is constructed once at registration time and
//! read-only afterwards; every resolution call receives it by reference
//! and leaves it untouched.

use crate::condition::Condition;
use crate::error::Result;
use crate::resolver::{self, ResolvedPlan};
use crate::variant::{SelectionRequest, Variant, VariantSet};
use crate::version::{Version, VersionConstraint};

/// A version a package declares as buildable
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeclaredVersion {
    pub version: Version,
    /// Preferred versions win `default_version` over earlier declarations
    pub preferred: bool,
}

/// A conditional dependency declaration
///
/// The spec string is opaque pass-through data for the hosting layer; it
/// may carry a downstream constraint like "@ctrl-rep-2 +shared +mpi".
/// Two fired clauses for the same name must agree on it (see
/// `resolver::resolve_dependencies`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencyClause {
    pub name: String,
    pub spec: String,
    pub condition: Condition,
}

/// A conditional build-argument declaration; order is significant
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArgumentRule {
    pub condition: Condition,
    /// Appended when the condition holds (skipped if empty)
    pub value: String,
    /// Appended when the condition does not hold (skipped if absent or empty)
    pub otherwise: Option<String>,
}

/// A version-gated fixed argument profile
///
/// Evaluated before the general rule table: when the chosen version
/// satisfies the constraint, the fixed list is the whole argument output
/// and ordinary rules are skipped entirely.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileRule {
    pub constraint: VersionConstraint,
    pub arguments: Vec<String>,
}

/// A package's complete declaration table
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PackageDefinition {
    pub name: String,
    pub description: String,
    pub versions: Vec<DeclaredVersion>,
    pub variants: VariantSet,
    pub dependencies: Vec<DependencyClause>,
    pub profile: Option<ProfileRule>,
    pub arguments: Vec<ArgumentRule>,
}

impl PackageDefinition {
    /// Start an empty definition for the named package
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Set the package description, builder style
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Declare a buildable version
    pub fn with_version(mut self, version: Version, preferred: bool) -> Self {
        self.versions.push(DeclaredVersion { version, preferred });
        self
    }

    /// Declare a variant
    ///
    /// Fails with `InvalidVariantDeclaration` when the name is already
    /// declared.
    pub fn with_variant(mut self, variant: Variant) -> Result<Self> {
        let mut variants: Vec<Variant> = self.variants.iter().cloned().collect();
        variants.push(variant);
        self.variants = VariantSet::new(variants)?;
        Ok(self)
    }

    /// Declare an unconditional dependency
    pub fn depends_on(self, name: impl Into<String>, spec: impl Into<String>) -> Self {
        self.depends_on_when(name, spec, Condition::always())
    }

    /// Declare a conditional dependency
    pub fn depends_on_when(
        mut self,
        name: impl Into<String>,
        spec: impl Into<String>,
        condition: Condition,
    ) -> Self {
        self.dependencies.push(DependencyClause {
            name: name.into(),
            spec: spec.into(),
            condition,
        });
        self
    }

    /// Declare the version-gated fixed argument profile
    pub fn with_profile(mut self, constraint: VersionConstraint, arguments: Vec<String>) -> Self {
        self.profile = Some(ProfileRule {
            constraint,
            arguments,
        });
        self
    }

    /// Append an unconditional argument rule
    pub fn with_argument(self, value: impl Into<String>) -> Self {
        self.with_argument_when(Condition::always(), value)
    }

    /// Append a conditional argument rule with no else branch
    pub fn with_argument_when(mut self, condition: Condition, value: impl Into<String>) -> Self {
        self.arguments.push(ArgumentRule {
            condition,
            value: value.into(),
            otherwise: None,
        });
        self
    }

    /// Append a conditional argument rule with an else branch
    pub fn with_argument_else(
        mut self,
        condition: Condition,
        value: impl Into<String>,
        otherwise: impl Into<String>,
    ) -> Self {
        self.arguments.push(ArgumentRule {
            condition,
            value: value.into(),
            otherwise: Some(otherwise.into()),
        });
        self
    }

    /// The version a build defaults to: the first preferred declaration,
    /// else the first declaration
    pub fn default_version(&self) -> Option<&Version> {
        self.versions
            .iter()
            .find(|d| d.preferred)
            .or_else(|| self.versions.first())
            .map(|d| &d.version)
    }

    /// Parse an arbitrary version string on behalf of the hosting layer
    pub fn resolve_version(&self, raw: &str) -> Result<Version> {
        Version::parse(raw)
    }

    /// Resolve a concrete build plan for a chosen version and selection
    ///
    /// Validates the request against the variant table, evaluates the
    /// dependency clause table, and generates the argument sequence. Any
    /// failure aborts the call wholesale; there is no partial plan.
    pub fn resolve(&self, version: &Version, request: &SelectionRequest) -> Result<ResolvedPlan> {
        resolver::resolve(self, version, request)
    }
}
