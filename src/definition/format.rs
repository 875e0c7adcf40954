// src/definition/format.rs

//! Definition file format
//!
//! Package definitions are TOML files describing a package's configuration
//! space: versions, variants, conditional dependencies, and argument rules.
//! These structs mirror the file one to one and keep constraint and
//! condition text as raw strings; `parser::parse_definition` compiles them
//! into the typed declaration tables.

use crate::variant::VariantValue;
use serde::{Deserialize, Serialize};

/// A complete package definition file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefinitionFile {
    /// Package metadata
    pub package: PackageSection,

    /// Buildable versions (optional)
    #[serde(default)]
    pub version: Vec<VersionEntry>,

    /// Variant declarations (optional)
    #[serde(default)]
    pub variant: Vec<VariantEntry>,

    /// Conditional dependency clauses (optional)
    #[serde(default)]
    pub depends: Vec<DependsEntry>,

    /// Version-gated fixed argument profile (optional)
    #[serde(default)]
    pub profile: Option<ProfileSection>,

    /// Ordered argument rules (optional)
    #[serde(default)]
    pub argument: Vec<ArgumentEntry>,
}

/// Package metadata section
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PackageSection {
    /// Package name
    pub name: String,

    /// Short description
    #[serde(default)]
    pub description: String,
}

/// One buildable version declaration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VersionEntry {
    /// Version string: a dotted release or a branch name
    pub version: String,

    /// Preferred versions win the default over earlier declarations
    #[serde(default)]
    pub preferred: bool,
}

/// One variant declaration
///
/// A `values` list makes the variant enumerated and its default must be
/// one of the listed strings; without `values` the variant is boolean and
/// its default must be `true` or `false`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VariantEntry {
    /// Variant name, unique within the package
    pub name: String,

    /// Legal values of an enumerated variant
    #[serde(default)]
    pub values: Option<Vec<String>>,

    /// Default value, a member of the legal set
    pub default: VariantValue,

    /// Human description
    #[serde(default)]
    pub description: String,
}

/// One conditional dependency clause
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DependsEntry {
    /// Dependency name
    pub name: String,

    /// Opaque spec string handed through to the hosting layer
    #[serde(default = "default_spec")]
    pub spec: String,

    /// Condition text; empty means unconditional
    #[serde(default)]
    pub when: String,
}

fn default_spec() -> String {
    "*".to_string()
}

/// The version-gated fixed argument profile
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileSection {
    /// Version constraint gating the profile
    pub when: String,

    /// The fixed argument list emitted when the constraint holds
    pub arguments: Vec<String>,
}

/// One ordered argument rule
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArgumentEntry {
    /// Condition text; empty means unconditional
    #[serde(default)]
    pub when: String,

    /// Argument appended when the condition holds
    #[serde(default)]
    pub value: Option<String>,

    /// Argument appended when the condition does not hold
    #[serde(default, rename = "else")]
    pub otherwise: Option<String>,
}
