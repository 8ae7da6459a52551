use crate::options::GenerateOptions;
use crate::schema::{TypeKind, TypeRef};

/// Renders a type reference as a declaration type expression.
///
/// LIST becomes `Array<T>`. NON_NULL is transparent here: nullability is
/// encoded by the field line (`name:` vs `name?:`), not by the expression.
pub fn type_expression(ty: &TypeRef, options: &GenerateOptions) -> String {
    match ty {
        TypeRef::List(inner) => format!("Array<{}>", type_expression(inner, options)),
        TypeRef::NonNull(inner) => type_expression(inner, options),
        TypeRef::Named { kind, name } => named_expression(*kind, name, options),
    }
}

fn named_expression(kind: TypeKind, name: &str, options: &GenerateOptions) -> String {
    match kind {
        TypeKind::Scalar => scalar_expression(name).to_string(),
        TypeKind::Enum => options.enum_name(name),
        TypeKind::Object
        | TypeKind::Interface
        | TypeKind::Union
        | TypeKind::InputObject
        | TypeKind::List
        | TypeKind::NonNull
        | TypeKind::Unknown => options.type_name(name),
    }
}

/// Built-in scalar table. Custom scalars degrade to `any`.
pub fn scalar_expression(name: &str) -> &'static str {
    match name {
        "ID" | "String" => "string",
        "Boolean" => "boolean",
        "Float" | "Int" => "number",
        _ => "any",
    }
}

/// Strips every LIST / NON_NULL wrapper and returns the named type underneath.
pub fn unwrap_to_root(ty: &TypeRef) -> &TypeRef {
    match ty {
        TypeRef::List(inner) | TypeRef::NonNull(inner) => unwrap_to_root(inner),
        named @ TypeRef::Named { .. } => named,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scalar(name: &str) -> TypeRef {
        TypeRef::named(TypeKind::Scalar, name)
    }

    #[test]
    fn scalars_map_to_builtin_types() {
        let opts = GenerateOptions::default();
        for (name, expected) in [
            ("ID", "string"),
            ("String", "string"),
            ("Boolean", "boolean"),
            ("Int", "number"),
            ("Float", "number"),
            ("DateTime", "any"),
            ("", "any"),
        ] {
            assert_eq!(type_expression(&scalar(name), &opts), expected, "{name}");
        }
    }

    #[test]
    fn list_depth_is_preserved_and_non_null_is_transparent() {
        let opts = GenerateOptions::default();
        let ty = TypeRef::list(TypeRef::list(TypeRef::non_null(scalar("Int"))));
        assert_eq!(type_expression(&ty, &opts), "Array<Array<number>>");

        let ty = TypeRef::non_null(TypeRef::list(TypeRef::non_null(scalar("String"))));
        assert_eq!(type_expression(&ty, &opts), "Array<string>");
    }

    #[test]
    fn named_types_use_the_naming_policy() {
        let opts = GenerateOptions {
            post_fix: "X".to_string(),
            ..Default::default()
        };
        let cases = [
            (TypeKind::Object, "User", "UserX"),
            (TypeKind::Interface, "Node", "NodeX"),
            (TypeKind::Union, "SearchResult", "SearchResultX"),
            (TypeKind::InputObject, "UserInput", "UserInputX"),
            (TypeKind::Enum, "Role", "RoleEnumX"),
            (TypeKind::Unknown, "Mystery", "MysteryX"),
        ];
        for (kind, name, expected) in cases {
            assert_eq!(
                type_expression(&TypeRef::named(kind, name), &opts),
                expected
            );
        }
    }

    #[test]
    fn unwrap_finds_the_named_root() {
        let root = TypeRef::named(TypeKind::Object, "User");
        let ty = TypeRef::non_null(TypeRef::list(TypeRef::non_null(root.clone())));
        assert_eq!(unwrap_to_root(&ty), &root);
        assert_eq!(unwrap_to_root(&root), &root);
        assert_eq!(unwrap_to_root(&ty).name(), Some("User"));
    }
}
