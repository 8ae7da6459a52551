use std::collections::HashMap;

use graphql_parser::schema::{
    Definition, Document, EnumType, InputObjectType, InputValue, InterfaceType, ObjectType,
    ScalarType, Type, TypeDefinition, UnionType,
};

use crate::schema::{
    EnumValue, Field, FullType, MAX_TYPE_REF_DEPTH, RootType, Schema, SchemaError, TypeKind,
    TypeRef,
};

/// Builds a [`Schema`] from GraphQL SDL, shaped like the one an introspection
/// query would return for the same service.
pub fn parse_sdl(src: &str) -> Result<Schema, SchemaError> {
    let doc: Document<'_, String> =
        graphql_parser::parse_schema(src).map_err(|e| SchemaError::Sdl(e.to_string()))?;

    let kinds = kind_table(&doc);
    let implemented_by = implementors(&doc);

    let mut query_type = None;
    let mut mutation_type = None;
    let mut types = Vec::new();
    for def in &doc.definitions {
        match def {
            Definition::SchemaDefinition(schema) => {
                query_type = schema.query.clone();
                mutation_type = schema.mutation.clone();
            }
            Definition::TypeDefinition(def) => {
                types.push(full_type(def, &kinds, &implemented_by)?);
            }
            Definition::TypeExtension(_) | Definition::DirectiveDefinition(_) => {
                tracing::debug!("ignoring SDL extension/directive definition");
            }
        }
    }

    // Without a `schema { ... }` block, GraphQL falls back to the conventional names.
    let default_root = |name: &str| {
        (kinds.get(name) == Some(&TypeKind::Object)).then(|| name.to_string())
    };
    let query_type = query_type.or_else(|| default_root("Query"));
    let mutation_type = mutation_type.or_else(|| default_root("Mutation"));

    tracing::debug!(types = types.len(), "loaded SDL schema");
    Ok(Schema {
        query_type: query_type.map(|name| RootType { name }),
        mutation_type: mutation_type.map(|name| RootType { name }),
        types,
    })
}

fn is_builtin_scalar(name: &str) -> bool {
    matches!(name, "String" | "Int" | "Float" | "Boolean" | "ID")
}

fn kind_table<'d>(doc: &'d Document<'_, String>) -> HashMap<&'d str, TypeKind> {
    let mut kinds = HashMap::new();
    for def in &doc.definitions {
        if let Definition::TypeDefinition(def) = def {
            let (name, kind) = match def {
                TypeDefinition::Scalar(t) => (&t.name, TypeKind::Scalar),
                TypeDefinition::Object(t) => (&t.name, TypeKind::Object),
                TypeDefinition::Interface(t) => (&t.name, TypeKind::Interface),
                TypeDefinition::Union(t) => (&t.name, TypeKind::Union),
                TypeDefinition::Enum(t) => (&t.name, TypeKind::Enum),
                TypeDefinition::InputObject(t) => (&t.name, TypeKind::InputObject),
            };
            kinds.insert(name.as_str(), kind);
        }
    }
    kinds
}

/// Interface name -> implementing object names, in declaration order.
fn implementors<'d>(doc: &'d Document<'_, String>) -> HashMap<&'d str, Vec<&'d str>> {
    let mut out: HashMap<&str, Vec<&str>> = HashMap::new();
    for def in &doc.definitions {
        if let Definition::TypeDefinition(TypeDefinition::Object(obj)) = def {
            for iface in &obj.implements_interfaces {
                out.entry(iface.as_str()).or_default().push(obj.name.as_str());
            }
        }
    }
    out
}

fn full_type(
    def: &TypeDefinition<'_, String>,
    kinds: &HashMap<&str, TypeKind>,
    implementors: &HashMap<&str, Vec<&str>>,
) -> Result<FullType, SchemaError> {
    let ty = match def {
        TypeDefinition::Scalar(ScalarType {
            name, description, ..
        }) => FullType {
            description: description.clone(),
            ..FullType::new(TypeKind::Scalar, name.as_str())
        },
        TypeDefinition::Object(ObjectType {
            name,
            description,
            fields,
            ..
        }) => FullType {
            description: description.clone(),
            fields: Some(output_fields(fields, kinds)?),
            ..FullType::new(TypeKind::Object, name.as_str())
        },
        TypeDefinition::Interface(InterfaceType {
            name,
            description,
            fields,
            ..
        }) => {
            let possible_types = implementors
                .get(name.as_str())
                .into_iter()
                .flatten()
                .map(|obj| TypeRef::named(TypeKind::Object, *obj))
                .collect();
            FullType {
                description: description.clone(),
                fields: Some(output_fields(fields, kinds)?),
                possible_types: Some(possible_types),
                ..FullType::new(TypeKind::Interface, name.as_str())
            }
        }
        TypeDefinition::Union(UnionType {
            name,
            description,
            types,
            ..
        }) => FullType {
            description: description.clone(),
            possible_types: Some(
                types
                    .iter()
                    .map(|member| named_ref(member, kinds))
                    .collect(),
            ),
            ..FullType::new(TypeKind::Union, name.as_str())
        },
        TypeDefinition::Enum(EnumType {
            name,
            description,
            values,
            ..
        }) => FullType {
            description: description.clone(),
            enum_values: Some(
                values
                    .iter()
                    .map(|v| EnumValue {
                        name: v.name.clone(),
                    })
                    .collect(),
            ),
            ..FullType::new(TypeKind::Enum, name.as_str())
        },
        TypeDefinition::InputObject(InputObjectType {
            name,
            description,
            fields,
            ..
        }) => FullType {
            description: description.clone(),
            input_fields: Some(input_fields(fields, kinds)?),
            ..FullType::new(TypeKind::InputObject, name.as_str())
        },
    };
    Ok(ty)
}

fn output_fields(
    fields: &[graphql_parser::schema::Field<'_, String>],
    kinds: &HashMap<&str, TypeKind>,
) -> Result<Vec<Field>, SchemaError> {
    fields
        .iter()
        .map(|f| Ok(Field::new(f.name.as_str(), type_ref(&f.field_type, kinds, 0)?)))
        .collect()
}

fn input_fields(
    fields: &[InputValue<'_, String>],
    kinds: &HashMap<&str, TypeKind>,
) -> Result<Vec<Field>, SchemaError> {
    fields
        .iter()
        .map(|f| Ok(Field::new(f.name.as_str(), type_ref(&f.value_type, kinds, 0)?)))
        .collect()
}

fn named_ref(name: &str, kinds: &HashMap<&str, TypeKind>) -> TypeRef {
    let kind = match kinds.get(name) {
        Some(kind) => *kind,
        None if is_builtin_scalar(name) => TypeKind::Scalar,
        None => {
            tracing::warn!(name, "reference to undefined type");
            TypeKind::Unknown
        }
    };
    TypeRef::named(kind, name)
}

fn type_ref(
    ty: &Type<'_, String>,
    kinds: &HashMap<&str, TypeKind>,
    depth: usize,
) -> Result<TypeRef, SchemaError> {
    if depth > MAX_TYPE_REF_DEPTH {
        return Err(SchemaError::TypeRefTooDeep {
            max: MAX_TYPE_REF_DEPTH,
        });
    }
    Ok(match ty {
        Type::NamedType(name) => named_ref(name, kinds),
        Type::ListType(inner) => TypeRef::list(type_ref(inner, kinds, depth + 1)?),
        Type::NonNullType(inner) => TypeRef::non_null(type_ref(inner, kinds, depth + 1)?),
    })
}
