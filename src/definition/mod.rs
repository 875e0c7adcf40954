// src/definition/mod.rs

//! Declarative package definition files
//!
//! A definition file is the static-data form of a `PackageDefinition`:
//! the hosting package manager ships one per package, parses it at
//! registration time, and hands the resulting declaration tables to the
//! resolver for every build.
//!
//! # Example Definition
//!
//! ```toml
//! [package]
//! name = "flecsi"
//! description = "Multi-physics application framework"
//!
//! [[version]]
//! version = "develop"
//! preferred = true
//!
//! [[variant]]
//! name = "backend"
//! values = ["hpx", "mpi", "legion"]
//! default = "mpi"
//! description = "Backend to use for distributed memory"
//!
//! [[depends]]
//! name = "mpi"
//! when = "backend=mpi|legion"
//!
//! [[argument]]
//! when = "backend=legion"
//! value = "-DFLECSI_RUNTIME_MODEL=legion"
//! ```

mod format;
pub mod parser;

pub use format::{
    ArgumentEntry, DefinitionFile, DependsEntry, PackageSection, ProfileSection, VariantEntry,
    VersionEntry,
};
pub use parser::{parse_definition, parse_definition_file};
