//! Record-type extraction.
//!
//! Walk the flattened schema in sorted pointer-path order, build one
//! [`RecordType`] per object-bearing node, and resolve each property into a
//! [`FieldSpec`]. Failures are collected, never propagated early: the caller
//! gets the full (partial) model plus one joined error.
//!
//! Design goals:
//! - Output depends only on the input's content, never on map iteration order.
//! - Records and fields hold copied values, no references into the schema.
//! - A failing field still yields a placeholder entry.
pub mod field;
pub mod naming;
pub mod primitive;

use std::collections::BTreeMap;

use tracing::{debug, info, warn};

use crate::error::{ErrorList, FieldError, RecordError};
use crate::ir::{FieldSpec, RecordType, SliceInfo, TypeModel};
use crate::schema::{SchemaNode, TypeIndex};

// ------------------------------- Front API -------------------------------- //

pub struct Extractor<'a> {
    schema: &'a SchemaNode,
}

impl<'a> Extractor<'a> {
    pub fn new(schema: &'a SchemaNode) -> Self {
        Self { schema }
    }

    /// Flatten the schema and extract its record types, keyed by derived name.
    pub fn create_records(&self) -> (TypeModel, Option<ErrorList<RecordError>>) {
        let types = self.schema.extract_types();
        create_records(&types)
    }
}

// ------------------------------ Orchestrator ------------------------------ //

pub fn create_records(types: &TypeIndex<'_>) -> (TypeModel, Option<ErrorList<RecordError>>) {
    let mut model = TypeModel::default();
    let mut errs = ErrorList::new();

    for type_key in sorted_keys(types) {
        let node = types[type_key];

        let (fields, slices, err) = fields_of(type_key, node, types);
        model.slices.extend(slices);
        if let Some(err) = err {
            warn!(id = %type_key, fields = ?err.fields.len(), "record.incomplete");
            errs.push(err);
        }

        let name = naming::type_name(type_key, node, 1);
        debug!(id = %type_key, name = %name, fields = fields.len(), "record.extracted");

        let record = RecordType { id: type_key.clone(), name: name.clone(), fields };
        if let Some(prev) = model.types.insert(name.clone(), record) {
            warn!(name = %name, replaced = %prev.id, by = %type_key, "record.name_collision");
        }
    }

    info!(records = model.types.len(), slices = model.slices.len(), errors = errs.len(), "extraction.done");
    (model, errs.into_option())
}

/// Resolve every property of one record. Returns the fields keyed by derived
/// identifier, the slice constraints found, and an error naming each field
/// that fell back to a placeholder type.
fn fields_of(
    type_key: &str,
    node: &SchemaNode,
    types: &TypeIndex<'_>,
) -> (BTreeMap<String, FieldSpec>, Vec<SliceInfo>, Option<RecordError>) {
    let mut fields = BTreeMap::new();
    let mut slices = Vec::new();
    let mut errs = ErrorList::<FieldError>::new();

    for field_name in sorted_keys(&node.properties) {
        let prop = &node.properties[field_name];
        let ident = naming::identifier(field_name);

        let (mut spec, err) = field::resolve(type_key, field_name, &ident, prop, types, true);
        if let Some(err) = err {
            errs.push(err);
        }
        spec.json_name = field_name.clone();
        spec.name = ident;
        spec.required = node.required.iter().any(|r| r == field_name);

        if let Some(slice) = spec.slice() {
            slices.push(slice.clone());
        }
        if let Some(prev) = fields.insert(spec.name.clone(), spec) {
            warn!(id = %type_key, field = %prev.name, replaced = %prev.json_name, "field.name_collision");
        }
    }

    let err = (!errs.is_empty()).then(|| RecordError { id: type_key.to_string(), fields: errs });
    (fields, slices, err)
}

fn sorted_keys<V>(map: &indexmap::IndexMap<String, V>) -> Vec<&String> {
    let mut keys: Vec<&String> = map.keys().collect();
    keys.sort();
    keys
}

// ------------------------------- Tests ------------------------------------ //
