// src/condition/mod.rs

//! Condition predicates over a version and a variant selection
//!
//! A condition is a conjunction of atoms gating whether a dependency
//! clause or argument rule fires. Atoms test either the chosen version
//! against a constraint or one variant's value against an expected value
//! (or set of values). An empty conjunction is vacuously true.
//!
//! Conditions have a compact textual form used by definition files:
//!
//! - `+hdf5` — boolean variant is true
//! - `~hdf5` — boolean variant is false
//! - `backend=legion` — variant equals a value
//! - `backend=mpi|legion` — variant is one of the listed values
//! - `@>=1.2` / `@=develop` / `@1.2.3` — version satisfies a constraint
//!
//! Items are whitespace-separated and all must hold:
//! `"backend=legion +hdf5"` fires only for a legion build with HDF5 on.

use crate::error::{Error, Result};
use crate::variant::{Selection, VariantValue};
use crate::version::{Version, VersionConstraint};
use std::fmt;
use std::str::FromStr;

/// One testable unit of a condition
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Atom {
    /// The chosen version satisfies the constraint
    Version(VersionConstraint),
    /// The named variant's value equals the given value
    VariantEquals { variant: String, value: VariantValue },
    /// The named variant's value is one of the given values
    VariantIn {
        variant: String,
        values: Vec<VariantValue>,
    },
}

impl Atom {
    /// Evaluate this atom against a concrete version and selection
    ///
    /// A variant atom naming a variant absent from the selection is a
    /// malformed clause: raised as `UnknownVariant`, never swallowed.
    fn evaluate(&self, version: &Version, selection: &Selection) -> Result<bool> {
        match self {
            Atom::Version(constraint) => Ok(constraint.satisfies(version)),
            Atom::VariantEquals { variant, value } => {
                Ok(selection.value(variant)? == value)
            }
            Atom::VariantIn { variant, values } => {
                let actual = selection.value(variant)?;
                Ok(values.contains(actual))
            }
        }
    }

    /// Parse a single condition item
    fn parse(s: &str) -> Result<Self> {
        if let Some(rest) = s.strip_prefix('@') {
            let constraint = VersionConstraint::parse(rest)?;
            return Ok(Atom::Version(constraint));
        }

        if let Some(rest) = s.strip_prefix('+') {
            if rest.is_empty() {
                return Err(Error::ParseError(
                    "Missing variant name after + in condition".to_string(),
                ));
            }
            return Ok(Atom::VariantEquals {
                variant: rest.to_string(),
                value: VariantValue::Bool(true),
            });
        }

        if let Some(rest) = s.strip_prefix('~') {
            if rest.is_empty() {
                return Err(Error::ParseError(
                    "Missing variant name after ~ in condition".to_string(),
                ));
            }
            return Ok(Atom::VariantEquals {
                variant: rest.to_string(),
                value: VariantValue::Bool(false),
            });
        }

        if let Some((name, value)) = s.split_once('=') {
            if name.is_empty() || value.is_empty() {
                return Err(Error::ParseError(format!(
                    "Malformed condition item '{}'",
                    s
                )));
            }
            if value.contains('|') {
                let values: Vec<VariantValue> = value
                    .split('|')
                    .map(|v| v.trim())
                    .filter(|v| !v.is_empty())
                    .map(VariantValue::from)
                    .collect();
                if values.is_empty() {
                    return Err(Error::ParseError(format!(
                        "Empty value list in condition item '{}'",
                        s
                    )));
                }
                return Ok(Atom::VariantIn {
                    variant: name.to_string(),
                    values,
                });
            }
            return Ok(Atom::VariantEquals {
                variant: name.to_string(),
                value: VariantValue::choice(value),
            });
        }

        Err(Error::ParseError(format!(
            "Unrecognized condition item '{}'",
            s
        )))
    }
}

impl fmt::Display for Atom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Atom::Version(constraint) => {
                // Items are whitespace-separated, so the constraint is
                // rendered without its usual spacing.
                let compact: String = constraint.to_string().split_whitespace().collect();
                write!(f, "@{}", compact)
            }
            Atom::VariantEquals {
                variant,
                value: VariantValue::Bool(true),
            } => write!(f, "+{}", variant),
            Atom::VariantEquals {
                variant,
                value: VariantValue::Bool(false),
            } => write!(f, "~{}", variant),
            Atom::VariantEquals { variant, value } => write!(f, "{}={}", variant, value),
            Atom::VariantIn { variant, values } => {
                let joined: Vec<String> = values.iter().map(|v| v.to_string()).collect();
                write!(f, "{}={}", variant, joined.join("|"))
            }
        }
    }
}

/// A conjunction of atoms; empty means unconditional
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Condition {
    atoms: Vec<Atom>,
}

impl Condition {
    /// The unconditional (vacuously true) condition
    pub fn always() -> Self {
        Self::default()
    }

    /// Build a condition from atoms
    pub fn new(atoms: Vec<Atom>) -> Self {
        Self { atoms }
    }

    /// Add a version-constraint atom, builder style
    pub fn when_version(mut self, constraint: VersionConstraint) -> Self {
        self.atoms.push(Atom::Version(constraint));
        self
    }

    /// Add a variant-equality atom, builder style
    pub fn when_variant(
        mut self,
        variant: impl Into<String>,
        value: impl Into<VariantValue>,
    ) -> Self {
        self.atoms.push(Atom::VariantEquals {
            variant: variant.into(),
            value: value.into(),
        });
        self
    }

    /// Add a variant-membership atom, builder style
    pub fn when_variant_in(
        mut self,
        variant: impl Into<String>,
        values: Vec<VariantValue>,
    ) -> Self {
        self.atoms.push(Atom::VariantIn {
            variant: variant.into(),
            values,
        });
        self
    }

    /// Whether this condition has no atoms
    pub fn is_unconditional(&self) -> bool {
        self.atoms.is_empty()
    }

    /// The atoms of this conjunction
    pub fn atoms(&self) -> &[Atom] {
        &self.atoms
    }

    /// Parse a condition string (see module doc for the item syntax)
    ///
    /// An empty or all-whitespace string is the unconditional condition.
    pub fn parse(s: &str) -> Result<Self> {
        let atoms = s
            .split_whitespace()
            .map(Atom::parse)
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { atoms })
    }

    /// Evaluate the conjunction against a concrete version and selection
    ///
    /// True iff every atom is true; the empty conjunction is true. Atoms
    /// are side-effect-free, so evaluation order is unobservable.
    pub fn evaluate(&self, version: &Version, selection: &Selection) -> Result<bool> {
        for atom in &self.atoms {
            if !atom.evaluate(version, selection)? {
                return Ok(false);
            }
        }
        Ok(true)
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.atoms.iter().map(|a| a.to_string()).collect();
        write!(f, "{}", parts.join(" "))
    }
}

impl FromStr for Condition {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Condition::parse(s)
    }
}
