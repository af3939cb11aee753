// Language-neutral type model for codegen. No schema nodes here.

use std::collections::BTreeMap;

use serde::Serialize;

/// Named, field-bearing type derived from one object-kind schema node.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecordType {
    /// Pointer path within the schema, e.g. `#/definitions/address`.
    pub id: String,
    /// Derived identifier, e.g. `Address`.
    pub name: String,
    /// Keyed by derived field identifier; stable order for deterministic codegen.
    pub fields: BTreeMap<String, FieldSpec>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FieldSpec {
    /// Derived identifier, e.g. `Address1`.
    pub name: String,
    /// Property key as written in the schema, e.g. `address1`.
    pub json_name: String,
    /// Target type: a primitive, `*Record` for an object reference, or
    /// `[]Elem` for arrays.
    #[serde(rename = "type")]
    pub ty: String,
    pub required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub constraint: Option<Constraint>,
}

/// At most one block per field; which one is decided by the resolved type.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Constraint {
    Slice(SliceInfo),
    String(StringInfo),
    Number(NumberInfo),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SliceInfo {
    pub elem_type: String,
    pub min_items: u64,
    pub max_items: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StringInfo {
    pub min_length: u64,
    pub max_length: u64,
    pub pattern: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct NumberInfo {
    pub multiple_of: f64,
    pub minimum: Option<f64>,
    pub exclusive_minimum: bool,
    pub maximum: Option<f64>,
    pub exclusive_maximum: bool,
}

impl StringInfo {
    pub fn is_default(&self) -> bool {
        self.min_length == 0 && self.max_length == 0 && self.pattern.is_empty()
    }
}

impl NumberInfo {
    pub fn is_default(&self) -> bool {
        self.multiple_of == 0.0
            && self.minimum.is_none()
            && !self.exclusive_minimum
            && self.maximum.is_none()
            && !self.exclusive_maximum
    }
}

impl FieldSpec {
    pub fn slice(&self) -> Option<&SliceInfo> {
        match &self.constraint {
            Some(Constraint::Slice(s)) => Some(s),
            _ => None,
        }
    }

    pub fn string(&self) -> Option<&StringInfo> {
        match &self.constraint {
            Some(Constraint::String(s)) => Some(s),
            _ => None,
        }
    }

    pub fn number(&self) -> Option<&NumberInfo> {
        match &self.constraint {
            Some(Constraint::Number(n)) => Some(n),
            _ => None,
        }
    }
}

/// Everything one extraction run produces.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TypeModel {
    /// Keyed by derived record name; a later node deriving the same name
    /// replaces the earlier one.
    pub types: BTreeMap<String, RecordType>,
    /// Every array constraint seen, in record-then-field order.
    pub slices: Vec<SliceInfo>,
}
