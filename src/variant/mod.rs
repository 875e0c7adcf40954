// src/variant/mod.rs

//! Variant declarations and selections
//!
//! Variants represent a package's build-time options: boolean switches
//! ("hdf5", "tutorial") and enumerated choices ("backend=mpi"). Each
//! variant carries a default and a closed legal-value set; a resolution
//! call turns a caller's partial request into a complete selection with
//! every declared variant assigned a legal value.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// A concrete value assigned to a variant
///
/// Untagged so definition files can write `default = false` and
/// `default = "mpi"` naturally.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum VariantValue {
    /// Boolean switch value
    Bool(bool),
    /// Enumerated choice value
    Choice(String),
}

impl VariantValue {
    /// Shorthand for a choice value
    pub fn choice(s: impl Into<String>) -> Self {
        VariantValue::Choice(s.into())
    }
}

impl fmt::Display for VariantValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VariantValue::Bool(b) => write!(f, "{}", b),
            VariantValue::Choice(s) => write!(f, "{}", s),
        }
    }
}

impl From<bool> for VariantValue {
    fn from(b: bool) -> Self {
        VariantValue::Bool(b)
    }
}

impl From<&str> for VariantValue {
    fn from(s: &str) -> Self {
        VariantValue::Choice(s.to_string())
    }
}

/// The shape of a variant's legal value set
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VariantKind {
    /// True or false
    Bool,
    /// One of a closed, non-empty list of named values
    Enum(Vec<String>),
}

/// A declared build-time option
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Variant {
    pub name: String,
    pub kind: VariantKind,
    pub default: VariantValue,
    pub description: String,
}

impl Variant {
    /// Declare a boolean variant
    pub fn boolean(name: impl Into<String>, default: bool, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: VariantKind::Bool,
            default: VariantValue::Bool(default),
            description: description.into(),
        }
    }

    /// Declare an enumerated variant
    ///
    /// Fails with `InvalidVariantDeclaration` when the value list is empty
    /// or the default is not a member of it.
    pub fn enumerated(
        name: impl Into<String>,
        values: Vec<String>,
        default: impl Into<String>,
        description: impl Into<String>,
    ) -> Result<Self> {
        let name = name.into();
        let default = default.into();

        if values.is_empty() {
            return Err(Error::InvalidVariantDeclaration {
                variant: name,
                reason: "enumerated variant has no legal values".to_string(),
            });
        }
        if !values.contains(&default) {
            return Err(Error::InvalidVariantDeclaration {
                variant: name,
                reason: format!(
                    "default '{}' is not among legal values [{}]",
                    default,
                    values.join(", ")
                ),
            });
        }

        Ok(Self {
            name,
            kind: VariantKind::Enum(values),
            default: VariantValue::Choice(default),
            description: description.into(),
        })
    }

    /// Check whether a value is a member of this variant's legal set
    pub fn is_legal(&self, value: &VariantValue) -> bool {
        match (&self.kind, value) {
            (VariantKind::Bool, VariantValue::Bool(_)) => true,
            (VariantKind::Enum(values), VariantValue::Choice(s)) => values.contains(s),
            _ => false,
        }
    }

    /// Human-readable legal set, for error messages
    fn allowed(&self) -> String {
        match &self.kind {
            VariantKind::Bool => "true, false".to_string(),
            VariantKind::Enum(values) => values.join(", "),
        }
    }
}

/// The complete variant declaration table of one package
///
/// Declaration order is preserved; it is not semantically meaningful for
/// variants but keeps error messages and displays stable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VariantSet {
    variants: Vec<Variant>,
}

impl VariantSet {
    /// Build a declaration table, rejecting duplicate names
    pub fn new(variants: Vec<Variant>) -> Result<Self> {
        for (i, variant) in variants.iter().enumerate() {
            if variants[..i].iter().any(|v| v.name == variant.name) {
                return Err(Error::InvalidVariantDeclaration {
                    variant: variant.name.clone(),
                    reason: "variant declared twice".to_string(),
                });
            }
        }
        Ok(Self { variants })
    }

    /// Look up a declared variant by name
    pub fn get(&self, name: &str) -> Option<&Variant> {
        self.variants.iter().find(|v| v.name == name)
    }

    /// Iterate declared variants in declaration order
    pub fn iter(&self) -> impl Iterator<Item = &Variant> {
        self.variants.iter()
    }

    /// Number of declared variants
    pub fn len(&self) -> usize {
        self.variants.len()
    }

    /// Whether the table declares no variants
    pub fn is_empty(&self) -> bool {
        self.variants.is_empty()
    }

    /// Resolve a caller's partial request into a complete selection
    ///
    /// Every requested entry must name a declared variant (`UnknownVariant`
    /// otherwise) and supply a legal value (`IllegalVariantValue`
    /// otherwise); every variant the request leaves unset takes its
    /// declared default. Pure function, no side effects.
    pub fn resolve_selection(&self, request: &SelectionRequest) -> Result<Selection> {
        for (name, value) in request.entries() {
            let variant = self
                .get(name)
                .ok_or_else(|| Error::UnknownVariant(name.to_string()))?;
            if !variant.is_legal(value) {
                return Err(Error::IllegalVariantValue {
                    variant: name.to_string(),
                    value: value.to_string(),
                    allowed: variant.allowed(),
                });
            }
        }

        let mut values = BTreeMap::new();
        for variant in &self.variants {
            let value = request
                .value(&variant.name)
                .cloned()
                .unwrap_or_else(|| variant.default.clone());
            values.insert(variant.name.clone(), value);
        }

        Ok(Selection { values })
    }
}

/// A partial variant assignment supplied by the caller
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionRequest {
    entries: Vec<(String, VariantValue)>,
}

impl SelectionRequest {
    /// Empty request: every variant takes its default
    pub fn new() -> Self {
        Self::default()
    }

    /// Set one variant, builder style
    ///
    /// A later entry for the same name replaces the earlier one.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<VariantValue>) -> Self {
        let name = name.into();
        self.entries.retain(|(n, _)| *n != name);
        self.entries.push((name, value.into()));
        self
    }

    /// Requested value for a variant, if any
    pub fn value(&self, name: &str) -> Option<&VariantValue> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
    }

    fn entries(&self) -> impl Iterator<Item = (&str, &VariantValue)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v))
    }
}

/// A complete assignment of values to every declared variant
///
/// Only produced by `VariantSet::resolve_selection`, so every value is a
/// member of its variant's legal set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    values: BTreeMap<String, VariantValue>,
}

impl Selection {
    /// Value of a variant, if present
    pub fn get(&self, name: &str) -> Option<&VariantValue> {
        self.values.get(name)
    }

    /// Value of a variant, raising `UnknownVariant` when absent
    ///
    /// Used by condition evaluation, where a missing name means a
    /// malformed clause rather than a user error.
    pub fn value(&self, name: &str) -> Result<&VariantValue> {
        self.values
            .get(name)
            .ok_or_else(|| Error::UnknownVariant(name.to_string()))
    }

    /// Iterate assignments in name order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &VariantValue)> {
        self.values.iter().map(|(n, v)| (n.as_str(), v))
    }

    /// Number of assigned variants
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the selection assigns no variants
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .values
            .iter()
            .map(|(name, value)| match value {
                VariantValue::Bool(true) => format!("+{}", name),
                VariantValue::Bool(false) => format!("~{}", name),
                VariantValue::Choice(s) => format!("{}={}", name, s),
            })
            .collect();
        write!(f, "{}", parts.join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn backend() -> Variant {
        Variant::enumerated(
            "backend",
            vec!["hpx".to_string(), "mpi".to_string(), "legion".to_string()],
            "mpi",
            "Backend to use for distributed memory",
        )
        .unwrap()
    }

    #[test]
    fn test_boolean_declaration() {
        let v = Variant::boolean("hdf5", false, "Enable HDF5 support");
        assert_eq!(v.default, VariantValue::Bool(false));
        assert!(v.is_legal(&VariantValue::Bool(true)));
        assert!(!v.is_legal(&VariantValue::choice("maybe")));
    }

    #[test]
    fn test_enumerated_declaration() {
        let v = backend();
        assert_eq!(v.default, VariantValue::choice("mpi"));
        assert!(v.is_legal(&VariantValue::choice("legion")));
        assert!(!v.is_legal(&VariantValue::choice("serial")));
        assert!(!v.is_legal(&VariantValue::Bool(true)));
    }

    #[test]
    fn test_enumerated_empty_values_rejected() {
        let err = Variant::enumerated("backend", vec![], "mpi", "").unwrap_err();
        assert!(matches!(err, Error::InvalidVariantDeclaration { .. }));
    }

    #[test]
    fn test_enumerated_default_outside_values_rejected() {
        let err = Variant::enumerated(
            "backend",
            vec!["mpi".to_string()],
            "serial",
            "",
        )
        .unwrap_err();
        assert!(matches!(err, Error::InvalidVariantDeclaration { .. }));
    }

    #[test]
    fn test_variant_set_rejects_duplicates() {
        let err = VariantSet::new(vec![
            Variant::boolean("hdf5", false, ""),
            Variant::boolean("hdf5", true, ""),
        ])
        .unwrap_err();
        assert!(matches!(err, Error::InvalidVariantDeclaration { .. }));
    }

    #[test]
    fn test_resolve_selection_fills_defaults() {
        let set = VariantSet::new(vec![backend(), Variant::boolean("hdf5", false, "")]).unwrap();

        let selection = set.resolve_selection(&SelectionRequest::new()).unwrap();
        assert_eq!(selection.get("backend"), Some(&VariantValue::choice("mpi")));
        assert_eq!(selection.get("hdf5"), Some(&VariantValue::Bool(false)));
        assert_eq!(selection.len(), 2);
    }

    #[test]
    fn test_resolve_selection_explicit_default_equivalent() {
        let set = VariantSet::new(vec![backend()]).unwrap();

        let defaulted = set.resolve_selection(&SelectionRequest::new()).unwrap();
        let explicit = set
            .resolve_selection(&SelectionRequest::new().with("backend", "mpi"))
            .unwrap();
        assert_eq!(defaulted, explicit);
    }

    #[test]
    fn test_resolve_selection_override() {
        let set = VariantSet::new(vec![backend()]).unwrap();

        let selection = set
            .resolve_selection(&SelectionRequest::new().with("backend", "legion"))
            .unwrap();
        assert_eq!(
            selection.get("backend"),
            Some(&VariantValue::choice("legion"))
        );
    }

    #[test]
    fn test_resolve_selection_unknown_variant() {
        let set = VariantSet::new(vec![backend()]).unwrap();

        let err = set
            .resolve_selection(&SelectionRequest::new().with("graphviz", true))
            .unwrap_err();
        assert_eq!(err, Error::UnknownVariant("graphviz".to_string()));
    }

    #[test]
    fn test_resolve_selection_illegal_value() {
        let set = VariantSet::new(vec![backend()]).unwrap();

        let err = set
            .resolve_selection(&SelectionRequest::new().with("backend", "serial"))
            .unwrap_err();
        assert!(matches!(err, Error::IllegalVariantValue { .. }));
    }

    #[test]
    fn test_resolve_selection_bool_value_for_enum_illegal() {
        let set = VariantSet::new(vec![backend()]).unwrap();

        let err = set
            .resolve_selection(&SelectionRequest::new().with("backend", true))
            .unwrap_err();
        assert!(matches!(err, Error::IllegalVariantValue { .. }));
    }

    #[test]
    fn test_selection_request_later_entry_wins() {
        let set = VariantSet::new(vec![backend()]).unwrap();

        let request = SelectionRequest::new()
            .with("backend", "hpx")
            .with("backend", "legion");
        let selection = set.resolve_selection(&request).unwrap();
        assert_eq!(
            selection.get("backend"),
            Some(&VariantValue::choice("legion"))
        );
    }

    #[test]
    fn test_selection_value_unknown_is_error() {
        let set = VariantSet::new(vec![backend()]).unwrap();
        let selection = set.resolve_selection(&SelectionRequest::new()).unwrap();

        assert!(selection.value("backend").is_ok());
        assert_eq!(
            selection.value("missing").unwrap_err(),
            Error::UnknownVariant("missing".to_string())
        );
    }

    #[test]
    fn test_selection_display() {
        let set = VariantSet::new(vec![
            backend(),
            Variant::boolean("hdf5", true, ""),
            Variant::boolean("tutorial", false, ""),
        ])
        .unwrap();
        let selection = set.resolve_selection(&SelectionRequest::new()).unwrap();
        // Name order: backend, hdf5, tutorial
        assert_eq!(selection.to_string(), "backend=mpi +hdf5 ~tutorial");
    }
}
