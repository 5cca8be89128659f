//! Render policy
//!
//! The configuration tables the core pipeline consumes, resolved once from the
//! layered [`ApiViewConfig`] and passed explicitly to each build.

use std::collections::HashSet;

use crate::models::config::ApiViewConfig;
use crate::models::symbol::AttributeData;

#[derive(Debug, Clone)]
pub struct RenderPolicy {
    pub indent_width: usize,
    pub stub_body: String,
    pub accessor_bodies: bool,
    pub include_documentation: bool,
    pub include_assembly_header: bool,
    skipped_attributes: HashSet<String>,
    deprecated_attributes: HashSet<String>,
    skip_diff_constants: HashSet<String>,
}

impl Default for RenderPolicy {
    fn default() -> Self {
        Self::from(&ApiViewConfig::default())
    }
}

impl From<&ApiViewConfig> for RenderPolicy {
    fn from(config: &ApiViewConfig) -> Self {
        Self {
            indent_width: config.render.indent_width,
            stub_body: config.render.stub_body.clone(),
            accessor_bodies: config.render.accessor_bodies,
            include_documentation: config.render.include_documentation,
            include_assembly_header: config.render.include_assembly_header,
            skipped_attributes: config.attributes.skip.iter().cloned().collect(),
            deprecated_attributes: config.attributes.deprecated.iter().cloned().collect(),
            skip_diff_constants: config.diff.skip_constants.iter().cloned().collect(),
        }
    }
}

impl RenderPolicy {
    pub fn is_skipped_attribute(&self, attribute: &AttributeData) -> bool {
        Self::matches_any(&self.skipped_attributes, attribute)
    }

    pub fn is_deprecation_attribute(&self, attribute: &AttributeData) -> bool {
        Self::matches_any(&self.deprecated_attributes, attribute)
    }

    pub fn is_deprecated(&self, attributes: &[AttributeData]) -> bool {
        attributes.iter().any(|a| self.is_deprecation_attribute(a))
    }

    pub fn is_skip_diff_constant(&self, name: &str) -> bool {
        self.skip_diff_constants.contains(name)
    }

    fn matches_any(table: &HashSet<String>, attribute: &AttributeData) -> bool {
        table.contains(&attribute.attribute_type.name)
            || table.contains(attribute.short_name())
            || table.contains(&attribute.attribute_type.metadata_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::symbol::TypeRef;

    #[test]
    fn test_default_policy() {
        let policy = RenderPolicy::default();
        assert_eq!(policy.indent_width, 4);
        assert!(!policy.include_assembly_header);
        assert_eq!(policy.stub_body, "throw null;");
    }

    #[test]
    fn test_attribute_tables() {
        let policy = RenderPolicy::default();
        let state_machine = AttributeData::new(
            TypeRef::new("AsyncStateMachineAttribute")
                .in_namespace("System.Runtime.CompilerServices"),
        );
        let obsolete = AttributeData::new(TypeRef::new("ObsoleteAttribute").in_namespace("System"));
        let serializable = AttributeData::new(TypeRef::new("SerializableAttribute"));

        assert!(policy.is_skipped_attribute(&state_machine));
        assert!(!policy.is_skipped_attribute(&obsolete));
        assert!(policy.is_deprecation_attribute(&obsolete));
        assert!(!policy.is_deprecated(std::slice::from_ref(&serializable)));
    }

    #[test]
    fn test_policy_from_config() {
        let mut config = ApiViewConfig::default();
        config.render.indent_width = 2;
        config.diff.skip_constants.push("BuildNumber".to_string());
        config.attributes.skip.push("Serializable".to_string());

        let policy = RenderPolicy::from(&config);
        assert_eq!(policy.indent_width, 2);
        assert!(policy.is_skip_diff_constant("BuildNumber"));
        assert!(!policy.is_skip_diff_constant("Version"));
        assert!(policy.is_skipped_attribute(&AttributeData::new(TypeRef::new(
            "SerializableAttribute"
        ))));
    }
}
