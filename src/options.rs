use std::collections::BTreeSet;

/// Prefix GraphQL reserves for introspection types (`__Schema`, `__Type`, ...).
pub const INTROSPECTION_PREFIX: &str = "__";

/// Naming and filtering policy shared by every generator call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerateOptions {
    /// Types left out entirely: no declaration, no fields referencing them,
    /// no mention in union/interface members.
    pub ignored_types: BTreeSet<String>,
    /// Prefix every declaration with `export`.
    pub export: bool,
    /// Appended to every generated type and enum name.
    pub post_fix: String,
}

impl GenerateOptions {
    pub fn type_name(&self, name: &str) -> String {
        format!("{name}{}", self.post_fix)
    }

    pub fn enum_name(&self, name: &str) -> String {
        format!("{name}Enum{}", self.post_fix)
    }

    pub fn export_prefix(&self) -> &'static str {
        if self.export { "export " } else { "" }
    }

    pub fn is_ignored(&self, name: &str) -> bool {
        self.ignored_types.contains(name)
    }

    /// Whether a schema type gets a declaration of its own.
    pub fn emits_type(&self, name: &str) -> bool {
        !name.starts_with(INTROSPECTION_PREFIX) && !self.is_ignored(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_post_fix(post_fix: &str) -> GenerateOptions {
        GenerateOptions {
            post_fix: post_fix.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn naming_appends_post_fix() {
        let opts = with_post_fix("Gql");
        assert_eq!(opts.type_name("User"), "UserGql");
        assert_eq!(opts.enum_name("Role"), "RoleEnumGql");
        assert_eq!(opts.type_name("User"), opts.type_name("User"));
    }

    #[test]
    fn empty_post_fix_keeps_names() {
        let opts = GenerateOptions::default();
        assert_eq!(opts.type_name("User"), "User");
        assert_eq!(opts.enum_name("Role"), "RoleEnum");
        assert_eq!(opts.export_prefix(), "");
    }

    #[test]
    fn introspection_and_ignored_types_are_not_emitted() {
        let opts = GenerateOptions {
            ignored_types: BTreeSet::from(["Secret".to_string()]),
            export: true,
            ..Default::default()
        };
        assert!(!opts.emits_type("__Schema"));
        assert!(!opts.emits_type("Secret"));
        assert!(opts.emits_type("User"));
        assert_eq!(opts.export_prefix(), "export ");
    }
}
