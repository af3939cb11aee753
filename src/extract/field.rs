use tracing::trace;

use super::{naming, primitive};
use crate::error::{FieldError, TypeError};
use crate::ir::{Constraint, FieldSpec, NumberInfo, SliceInfo, StringInfo};
use crate::schema::{self, SchemaNode, TypeIndex};

/// Resolve the type and constraint block of one property of `parent`.
///
/// On failure the returned spec still carries a placeholder type so the
/// caller can keep it. `name`, `json_name` and `required` are left for the
/// caller to fill in.
pub fn resolve(
    parent: &str,
    field_name: &str,
    field_ident: &str,
    node: &SchemaNode,
    types: &TypeIndex<'_>,
    pointer: bool,
) -> (FieldSpec, Option<FieldError>) {
    let mut spec = FieldSpec::default();
    let mut kind = node.kind.as_str();
    let mut subtype = String::new();
    let mut dangling = None;

    // 1) named reference
    if !node.reference.is_empty() {
        match types.get(&node.reference) {
            Some(target) => {
                kind = "object";
                subtype = naming::type_name(&node.reference, target, 1);
            }
            None => dangling = Some(node.reference.clone()),
        }
    }

    // 2) embedded object, flattened under the parent
    if subtype.is_empty() && kind == "object" {
        let embedded = schema::child_path(parent, "properties", field_name);
        if let Some(target) = types.get(&embedded) {
            subtype = naming::type_name(&embedded, target, 1);
        }
    }

    // 3) array: element type comes from `items`, size limits from the array
    let mut slice = None;
    if kind == "array" {
        let elem_type = match node.items.as_deref() {
            Some(items) => {
                let (elem, err) = resolve(parent, field_name, field_ident, items, types, false);
                if err.is_none() { elem.ty } else { String::new() }
            }
            None => String::new(),
        };
        if !elem_type.is_empty() {
            slice = Some(SliceInfo {
                elem_type: elem_type.clone(),
                min_items: node.min_items,
                max_items: node.max_items,
            });
        }
        subtype = elem_type;
    }

    // 4) primitive mapping
    match primitive::type_name(kind, &subtype, pointer) {
        Ok(ty) => spec.ty = ty,
        Err(err) => {
            // A dangling `$ref` is the real cause of an otherwise kindless node.
            let err = match dangling {
                Some(reference)
                    if matches!(err, TypeError::EmptyObject | TypeError::UndefinedType { .. }) =>
                {
                    TypeError::DanglingReference(reference)
                }
                _ => err,
            };
            trace!(parent, field = field_ident, error = %err, "field.unresolved");
            spec.ty = err.placeholder().to_string();
            return (spec, Some(FieldError { field: field_ident.to_string(), source: err }));
        }
    }

    spec.constraint = match slice {
        Some(slice) => Some(Constraint::Slice(slice)),
        None => constraint_for(&spec.ty, node),
    };

    (spec, None)
}

/// Numeric or string constraints, keyed off the resolved type rather than
/// the raw schema kind, and only when something is actually set.
fn constraint_for(ty: &str, node: &SchemaNode) -> Option<Constraint> {
    if primitive::is_numeric(ty) {
        let number = NumberInfo {
            multiple_of: node.multiple_of,
            minimum: node.minimum,
            exclusive_minimum: node.exclusive_minimum,
            maximum: node.maximum,
            exclusive_maximum: node.exclusive_maximum,
        };
        return (!number.is_default()).then_some(Constraint::Number(number));
    }
    if ty == primitive::STRING {
        let string = StringInfo {
            min_length: node.min_length,
            max_length: node.max_length,
            pattern: node.pattern.clone(),
        };
        return (!string.is_default()).then_some(Constraint::String(string));
    }
    None
}
