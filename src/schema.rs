use serde::Deserialize;
use serde_json::Value;

/// Maximum number of LIST / NON_NULL wrappers accepted around a named type.
///
/// Real schemas rarely go past three or four; anything deeper is treated as a
/// malformed document rather than recursed into.
pub const MAX_TYPE_REF_DEPTH: usize = 32;

#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    #[error("schema is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("document has no `data.__schema` (or top-level `__schema`) object")]
    MissingSchema,
    #[error("unexpected introspection shape at `{path}`: {source}")]
    Decode {
        path: String,
        source: serde_json::Error,
    },
    #[error("type reference nests more than {max} LIST/NON_NULL wrappers")]
    TypeRefTooDeep { max: usize },
    #[error("SDL parse error: {0}")]
    Sdl(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TypeKind {
    Scalar,
    Object,
    Interface,
    Union,
    Enum,
    InputObject,
    List,
    NonNull,
    #[serde(other)]
    Unknown,
}

/// A possibly wrapped reference to a named type, as found in `field.type`
/// and `possibleTypes`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "RawTypeRef")]
pub enum TypeRef {
    Named { kind: TypeKind, name: String },
    List(Box<TypeRef>),
    NonNull(Box<TypeRef>),
}

impl TypeRef {
    pub fn named(kind: TypeKind, name: impl Into<String>) -> Self {
        Self::Named {
            kind,
            name: name.into(),
        }
    }

    pub fn list(inner: TypeRef) -> Self {
        Self::List(Box::new(inner))
    }

    pub fn non_null(inner: TypeRef) -> Self {
        Self::NonNull(Box::new(inner))
    }

    pub fn is_non_null(&self) -> bool {
        matches!(self, Self::NonNull(_))
    }

    /// Name of this reference when it is not a wrapper.
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Named { name, .. } => Some(name),
            Self::List(_) | Self::NonNull(_) => None,
        }
    }
}

// The wire shape: `{ "kind": "...", "name": "...", "ofType": { ... } }`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawTypeRef {
    kind: TypeKind,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    of_type: Option<Box<RawTypeRef>>,
}

impl TryFrom<RawTypeRef> for TypeRef {
    type Error = SchemaError;

    fn try_from(raw: RawTypeRef) -> Result<Self, Self::Error> {
        let mut wrappers = Vec::new();
        let mut current = raw;
        loop {
            match (current.kind, current.of_type.take()) {
                (kind @ (TypeKind::List | TypeKind::NonNull), Some(inner)) => {
                    if wrappers.len() == MAX_TYPE_REF_DEPTH {
                        return Err(SchemaError::TypeRefTooDeep {
                            max: MAX_TYPE_REF_DEPTH,
                        });
                    }
                    wrappers.push(kind);
                    current = *inner;
                }
                // A wrapper without `ofType` terminates the chain like any named type.
                (kind, _) => {
                    let kind = match kind {
                        TypeKind::List | TypeKind::NonNull => TypeKind::Unknown,
                        other => other,
                    };
                    let mut ty = TypeRef::named(kind, current.name.unwrap_or_default());
                    for wrapper in wrappers.into_iter().rev() {
                        ty = match wrapper {
                            TypeKind::List => TypeRef::list(ty),
                            _ => TypeRef::non_null(ty),
                        };
                    }
                    return Ok(ty);
                }
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Field {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: TypeRef,
}

impl Field {
    pub fn new(name: impl Into<String>, ty: TypeRef) -> Self {
        Self {
            name: name.into(),
            ty,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct EnumValue {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FullType {
    pub kind: TypeKind,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub fields: Option<Vec<Field>>,
    #[serde(default)]
    pub input_fields: Option<Vec<Field>>,
    #[serde(default)]
    pub enum_values: Option<Vec<EnumValue>>,
    #[serde(default)]
    pub possible_types: Option<Vec<TypeRef>>,
}

impl FullType {
    pub fn new(kind: TypeKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
            description: None,
            fields: None,
            input_fields: None,
            enum_values: None,
            possible_types: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RootType {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Schema {
    #[serde(default)]
    pub query_type: Option<RootType>,
    #[serde(default)]
    pub mutation_type: Option<RootType>,
    pub types: Vec<FullType>,
}

impl Schema {
    /// Loads the `__schema` object of an introspection query response.
    ///
    /// Both the full response (`{"data": {"__schema": ...}}`) and a bare
    /// `{"__schema": ...}` document are accepted.
    pub fn from_introspection_json(src: &str) -> Result<Self, SchemaError> {
        let doc: Value = serde_json::from_str(src)?;
        let schema = doc
            .pointer("/data/__schema")
            .or_else(|| doc.get("__schema"))
            .cloned()
            .ok_or(SchemaError::MissingSchema)?;

        let schema: Schema =
            serde_path_to_error::deserialize(schema).map_err(|e| SchemaError::Decode {
                path: e.path().to_string(),
                source: e.into_inner(),
            })?;
        tracing::debug!(types = schema.types.len(), "loaded introspection schema");
        Ok(schema)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn wrap(kind: &str, inner: Value) -> Value {
        json!({ "kind": kind, "name": null, "ofType": inner })
    }

    #[test]
    fn loads_wrapped_and_bare_documents() {
        let schema = json!({
            "queryType": { "name": "Query" },
            "mutationType": null,
            "types": [
                { "kind": "OBJECT", "name": "Query", "description": null, "fields": [
                    { "name": "id", "type": wrap("NON_NULL", json!({ "kind": "SCALAR", "name": "ID", "ofType": null })) }
                ] }
            ]
        });

        let wrapped = json!({ "data": { "__schema": schema.clone() } }).to_string();
        let bare = json!({ "__schema": schema }).to_string();

        let a = Schema::from_introspection_json(&wrapped).unwrap();
        let b = Schema::from_introspection_json(&bare).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.query_type.unwrap().name, "Query");
        assert!(a.mutation_type.is_none());

        let fields = a.types[0].fields.as_ref().unwrap();
        assert_eq!(
            fields[0].ty,
            TypeRef::non_null(TypeRef::named(TypeKind::Scalar, "ID"))
        );
    }

    #[test]
    fn missing_schema_is_reported() {
        let err = Schema::from_introspection_json(r#"{"data": {}}"#).unwrap_err();
        assert!(matches!(err, SchemaError::MissingSchema));
    }

    #[test]
    fn invalid_json_is_reported() {
        let err = Schema::from_introspection_json("not json").unwrap_err();
        assert!(matches!(err, SchemaError::Json(_)));
    }

    #[test]
    fn decode_errors_carry_the_json_path() {
        let doc = json!({ "__schema": { "types": [ { "kind": "OBJECT" } ] } }).to_string();
        let err = Schema::from_introspection_json(&doc).unwrap_err();
        match err {
            SchemaError::Decode { path, .. } => assert_eq!(path, "types[0]"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn unknown_kinds_deserialize_as_unknown() {
        let ty: TypeRef =
            serde_json::from_value(json!({ "kind": "SOMETHING_NEW", "name": "X" })).unwrap();
        assert_eq!(ty, TypeRef::named(TypeKind::Unknown, "X"));
    }

    #[test]
    fn wrapper_without_of_type_terminates_the_chain() {
        let ty: TypeRef = serde_json::from_value(json!({ "kind": "LIST", "name": null })).unwrap();
        assert_eq!(ty, TypeRef::named(TypeKind::Unknown, ""));
    }

    #[test]
    fn nesting_beyond_the_cap_is_rejected() {
        let mut value = json!({ "kind": "SCALAR", "name": "Int" });
        for _ in 0..=MAX_TYPE_REF_DEPTH {
            value = wrap("LIST", value);
        }
        let err = serde_json::from_value::<TypeRef>(value).unwrap_err();
        assert!(err.to_string().contains("more than 32"));

        let mut value = json!({ "kind": "SCALAR", "name": "Int" });
        for _ in 0..MAX_TYPE_REF_DEPTH {
            value = wrap("LIST", value);
        }
        assert!(serde_json::from_value::<TypeRef>(value).is_ok());
    }
}
