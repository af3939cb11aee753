use crate::error::TypeError;

pub const INT: &str = "int";
pub const FLOAT: &str = "float64";
pub const STRING: &str = "string";
pub const BOOL: &str = "bool";
pub const NIL: &str = "nil";

/// Target type name for a schema kind.
///
/// `subtype` is the record name for objects and the element type for arrays.
/// Object references are wrapped as `*Subtype` when `pointer` is set; array
/// elements are resolved with `pointer` off because they are stored by value.
pub fn type_name(kind: &str, subtype: &str, pointer: bool) -> Result<String, TypeError> {
    match kind {
        "array" => {
            if subtype.is_empty() {
                return Err(TypeError::EmptyArrayElement);
            }
            Ok(format!("[]{subtype}"))
        }
        "boolean" => Ok(BOOL.to_string()),
        "integer" => Ok(INT.to_string()),
        "number" => Ok(FLOAT.to_string()),
        "null" => Ok(NIL.to_string()),
        "object" => {
            if subtype.is_empty() {
                return Err(TypeError::EmptyObject);
            }
            if pointer { Ok(format!("*{subtype}")) } else { Ok(subtype.to_string()) }
        }
        "string" => Ok(STRING.to_string()),
        _ => Err(TypeError::UndefinedType {
            kind: kind.to_string(),
            subtype: subtype.to_string(),
        }),
    }
}

pub fn is_numeric(ty: &str) -> bool {
    ty == INT || ty == FLOAT
}
