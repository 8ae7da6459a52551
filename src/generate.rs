use crate::options::GenerateOptions;
use crate::resolve::{type_expression, unwrap_to_root};
use crate::schema::{Field, FullType, Schema, TypeKind};

/// Member injected at the top of every output (non-input) object type.
pub const TYPENAME_MEMBER: &str = "__typename: string;";

/// Renders one field as a member line, or `None` when its root type is ignored.
pub fn field_line(field: &Field, options: &GenerateOptions) -> Option<String> {
    if let Some(root) = unwrap_to_root(&field.ty).name()
        && options.is_ignored(root)
    {
        tracing::trace!(field = %field.name, root, "dropping field of ignored type");
        return None;
    }

    let expr = type_expression(&field.ty, options);
    let optional = if field.ty.is_non_null() { "" } else { "?" };
    Some(format!("{}{optional}: {expr};", field.name))
}

/// Filtered member lines, sorted by their rendered text (not by field name).
pub fn field_lines(fields: &[Field], options: &GenerateOptions) -> Vec<String> {
    let mut lines: Vec<String> = fields
        .iter()
        .filter_map(|field| field_line(field, options))
        .collect();
    lines.sort();
    lines
}

/// The declaration for one schema type. Scalars produce nothing.
pub fn declaration(ty: &FullType, options: &GenerateOptions) -> Option<String> {
    match ty.kind {
        TypeKind::Scalar => None,
        TypeKind::Enum => Some(enum_declaration(ty, options)),
        TypeKind::Interface | TypeKind::Union => {
            let members = possible_type_names(ty, options);
            if members.is_empty() {
                let fields = fields_of(ty.fields.as_deref());
                Some(structural_declaration(ty, fields, false, options))
            } else {
                Some(format!(
                    "{}{}type {} = {};",
                    description_block(ty.description.as_deref()),
                    options.export_prefix(),
                    options.type_name(&ty.name),
                    members.join(" | ")
                ))
            }
        }
        TypeKind::InputObject => Some(structural_declaration(
            ty,
            fields_of(ty.input_fields.as_deref()),
            true,
            options,
        )),
        // LIST / NON_NULL / unrecognised kinds render like objects.
        TypeKind::Object | TypeKind::List | TypeKind::NonNull | TypeKind::Unknown => Some(
            structural_declaration(ty, fields_of(ty.fields.as_deref()), false, options),
        ),
    }
}

fn fields_of(fields: Option<&[Field]>) -> &[Field] {
    fields.unwrap_or_default()
}

fn possible_type_names(ty: &FullType, options: &GenerateOptions) -> Vec<String> {
    ty.possible_types
        .iter()
        .flatten()
        .filter_map(|possible| unwrap_to_root(possible).name())
        .filter(|name| !options.is_ignored(name))
        .map(|name| options.type_name(name))
        .collect()
}

fn enum_declaration(ty: &FullType, options: &GenerateOptions) -> String {
    let values = ty
        .enum_values
        .iter()
        .flatten()
        .map(|value| format!("\"{}{}\"", value.name, options.post_fix))
        .collect::<Vec<_>>()
        .join(" | ");

    format!(
        "{}{}type {} = {values};",
        description_block(ty.description.as_deref()),
        options.export_prefix(),
        options.enum_name(&ty.name),
    )
}

fn structural_declaration(
    ty: &FullType,
    fields: &[Field],
    is_input: bool,
    options: &GenerateOptions,
) -> String {
    let mut members = Vec::with_capacity(fields.len() + 1);
    if !is_input {
        members.push(TYPENAME_MEMBER.to_string());
    }
    members.extend(field_lines(fields, options));

    format!(
        "{}{}",
        description_block(ty.description.as_deref()),
        object_declaration(&options.type_name(&ty.name), &members, options)
    )
}

fn object_declaration(name: &str, members: &[String], options: &GenerateOptions) -> String {
    let body = if members.is_empty() {
        "{}".to_string()
    } else {
        let lines = members
            .iter()
            .map(|m| format!("  {m}"))
            .collect::<Vec<_>>()
            .join("\n");
        format!("{{\n{lines}\n}}")
    };
    format!("{}type {name} = {body};", options.export_prefix())
}

fn description_block(description: Option<&str>) -> String {
    match description {
        Some(text) if !text.is_empty() => {
            format!("/*\n  description: {}\n*/\n", text.replace("*/", "*\\/"))
        }
        _ => String::new(),
    }
}

/// `Query | Mutation` (post-fixed). Empty when the schema declares neither.
fn root_data_union(schema: &Schema, options: &GenerateOptions) -> String {
    [&schema.query_type, &schema.mutation_type]
        .into_iter()
        .flatten()
        .map(|root| options.type_name(&root.name))
        .collect::<Vec<_>>()
        .join(" | ")
}

/// The three fixed response envelope declarations: root, error, error location.
pub fn envelope(schema: &Schema, options: &GenerateOptions) -> Vec<String> {
    let root = options.type_name("GraphQLResponseRoot");
    let error = options.type_name("GraphQLResponseError");
    let location = options.type_name("GraphQLResponseErrorLocation");

    vec![
        object_declaration(
            &root,
            &[
                format!("data?: {};", root_data_union(schema, options)),
                format!("errors?: Array<{error}>;"),
            ],
            options,
        ),
        object_declaration(
            &error,
            &[
                "message: string;".to_string(),
                format!("locations?: Array<{location}>;"),
                "[propName: string]: any;".to_string(),
            ],
            options,
        ),
        object_declaration(
            &location,
            &["line: number;".to_string(), "column: number;".to_string()],
            options,
        ),
    ]
}

/// Envelope declarations followed by one declaration per emitted type, in
/// schema order.
pub fn declarations(schema: &Schema, options: &GenerateOptions) -> Vec<String> {
    let mut out = envelope(schema, options);
    for ty in &schema.types {
        if !options.emits_type(&ty.name) {
            tracing::debug!(name = %ty.name, "skipping type");
            continue;
        }
        out.extend(declaration(ty, options));
    }
    out
}

/// All declarations separated by a blank line.
pub fn render(schema: &Schema, options: &GenerateOptions) -> String {
    let decls = declarations(schema, options);
    tracing::info!(declarations = decls.len(), "generated declarations");
    decls.join("\n\n")
}
