// src/definition/parser.rs

//! Definition file parsing
//!
//! Two steps: TOML deserialization into the raw format structs, then
//! compilation of the raw strings (versions, constraints, conditions)
//! into the typed declaration tables, surfacing the same error kinds a
//! hand-built `PackageDefinition` would.

use crate::condition::Condition;
use crate::definition::format::{DefinitionFile, VariantEntry};
use crate::error::{Error, Result};
use crate::package::{
    ArgumentRule, DeclaredVersion, DependencyClause, PackageDefinition, ProfileRule,
};
use crate::variant::{Variant, VariantSet, VariantValue};
use crate::version::{Version, VersionConstraint};
use std::path::Path;

/// Parse a package definition from a TOML string
pub fn parse_definition(content: &str) -> Result<PackageDefinition> {
    let file: DefinitionFile = toml::from_str(content)
        .map_err(|e| Error::ParseError(format!("Invalid definition: {}", e)))?;

    compile(file)
}

/// Parse a package definition from a file
pub fn parse_definition_file(path: &Path) -> Result<PackageDefinition> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| Error::IoError(format!("Failed to read definition file: {}", e)))?;

    parse_definition(&content)
}

/// Compile the raw file structs into typed declaration tables
fn compile(file: DefinitionFile) -> Result<PackageDefinition> {
    if file.package.name.is_empty() {
        return Err(Error::ParseError(
            "Definition package name cannot be empty".to_string(),
        ));
    }

    let mut versions = Vec::new();
    for entry in &file.version {
        versions.push(DeclaredVersion {
            version: Version::parse(&entry.version)?,
            preferred: entry.preferred,
        });
    }

    let variants = VariantSet::new(
        file.variant
            .iter()
            .map(compile_variant)
            .collect::<Result<Vec<_>>>()?,
    )?;

    let mut dependencies = Vec::new();
    for entry in &file.depends {
        dependencies.push(DependencyClause {
            name: entry.name.clone(),
            spec: entry.spec.clone(),
            condition: Condition::parse(&entry.when)?,
        });
    }

    let profile = match &file.profile {
        Some(section) => {
            if section.when.trim().is_empty() {
                return Err(Error::ParseError(
                    "Profile requires a version constraint".to_string(),
                ));
            }
            Some(ProfileRule {
                constraint: VersionConstraint::parse(&section.when)?,
                arguments: section.arguments.clone(),
            })
        }
        None => None,
    };

    let mut arguments = Vec::new();
    for entry in &file.argument {
        if entry.value.is_none() && entry.otherwise.is_none() {
            return Err(Error::ParseError(
                "Argument rule needs a value or an else branch".to_string(),
            ));
        }
        arguments.push(ArgumentRule {
            condition: Condition::parse(&entry.when)?,
            value: entry.value.clone().unwrap_or_default(),
            otherwise: entry.otherwise.clone(),
        });
    }

    Ok(PackageDefinition {
        name: file.package.name,
        description: file.package.description,
        versions,
        variants,
        dependencies,
        profile,
        arguments,
    })
}

/// Compile one variant entry
fn compile_variant(entry: &VariantEntry) -> Result<Variant> {
    match (&entry.values, &entry.default) {
        (Some(values), VariantValue::Choice(default)) => Variant::enumerated(
            entry.name.clone(),
            values.clone(),
            default.clone(),
            entry.description.clone(),
        ),
        (Some(_), VariantValue::Bool(_)) => Err(Error::InvalidVariantDeclaration {
            variant: entry.name.clone(),
            reason: "enumerated variant default must be one of its values".to_string(),
        }),
        (None, VariantValue::Bool(default)) => Ok(Variant::boolean(
            entry.name.clone(),
            *default,
            entry.description.clone(),
        )),
        (None, VariantValue::Choice(_)) => Err(Error::InvalidVariantDeclaration {
            variant: entry.name.clone(),
            reason: "boolean variant default must be true or false".to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FLECSI: &str = r#"
[package]
name = "flecsi"
description = "Multi-physics application framework"

[[version]]
version = "develop"
preferred = true

[[version]]
version = "flecsph"

[[variant]]
name = "backend"
values = ["hpx", "mpi", "legion"]
default = "mpi"
description = "Backend to use for distributed memory"

[[variant]]
name = "hdf5"
default = false
description = "Enable HDF5 support"

[[depends]]
name = "cmake"
spec = ">= 3.12.4"

[[depends]]
name = "mpi"
when = "backend=mpi|legion"

[[depends]]
name = "legion"
spec = "@ctrl-rep-2 +shared +mpi +hdf5"
when = "backend=legion +hdf5"

[profile]
when = ">= flecsph"
arguments = ["-DENABLE_MPI=ON", "-DFLECSI_RUNTIME_MODEL=mpi"]

[[argument]]
value = "-DCMAKE_BUILD_TYPE=debug"

[[argument]]
when = "backend=legion"
value = "-DFLECSI_RUNTIME_MODEL=legion"

[[argument]]
when = "+hdf5"
value = "-DENABLE_HDF5=ON"
else = "-DENABLE_HDF5=OFF"
"#;

    #[test]
    fn test_parse_valid_definition() {
        let package = parse_definition(FLECSI).unwrap();
        assert_eq!(package.name, "flecsi");
        assert_eq!(package.versions.len(), 2);
        assert!(package.versions[0].preferred);
        assert_eq!(package.variants.len(), 2);
        assert_eq!(package.dependencies.len(), 3);
        assert!(package.profile.is_some());
        assert_eq!(package.arguments.len(), 3);
    }

    #[test]
    fn test_parse_compiles_conditions() {
        let package = parse_definition(FLECSI).unwrap();
        assert!(package.dependencies[0].condition.is_unconditional());
        assert!(!package.dependencies[1].condition.is_unconditional());
        assert_eq!(package.dependencies[2].spec, "@ctrl-rep-2 +shared +mpi +hdf5");
    }

    #[test]
    fn test_parse_invalid_toml() {
        assert!(matches!(
            parse_definition("this is not valid toml at all {}"),
            Err(Error::ParseError(_))
        ));
    }

    #[test]
    fn test_parse_empty_name_rejected() {
        let content = r#"
[package]
name = ""
"#;
        assert!(matches!(
            parse_definition(content),
            Err(Error::ParseError(_))
        ));
    }

    #[test]
    fn test_parse_enum_variant_bool_default_rejected() {
        let content = r#"
[package]
name = "p"

[[variant]]
name = "backend"
values = ["mpi"]
default = true
"#;
        assert!(matches!(
            parse_definition(content),
            Err(Error::InvalidVariantDeclaration { .. })
        ));
    }

    #[test]
    fn test_parse_bool_variant_string_default_rejected() {
        let content = r#"
[package]
name = "p"

[[variant]]
name = "hdf5"
default = "on"
"#;
        assert!(matches!(
            parse_definition(content),
            Err(Error::InvalidVariantDeclaration { .. })
        ));
    }

    #[test]
    fn test_parse_enum_default_outside_values_rejected() {
        let content = r#"
[package]
name = "p"

[[variant]]
name = "backend"
values = ["mpi", "legion"]
default = "serial"
"#;
        assert!(matches!(
            parse_definition(content),
            Err(Error::InvalidVariantDeclaration { .. })
        ));
    }

    #[test]
    fn test_parse_argument_without_branches_rejected() {
        let content = r#"
[package]
name = "p"

[[argument]]
when = "+hdf5"
"#;
        assert!(matches!(
            parse_definition(content),
            Err(Error::ParseError(_))
        ));
    }

    #[test]
    fn test_parse_profile_without_constraint_rejected() {
        let content = r#"
[package]
name = "p"

[profile]
when = ""
arguments = ["-DX=1"]
"#;
        assert!(matches!(
            parse_definition(content),
            Err(Error::ParseError(_))
        ));
    }

    #[test]
    fn test_parse_malformed_version_rejected() {
        let content = r#"
[package]
name = "p"

[[version]]
version = "1..0"
"#;
        assert!(matches!(
            parse_definition(content),
            Err(Error::MalformedVersion { .. })
        ));
    }
}
