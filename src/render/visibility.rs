//! Visibility filter
//!
//! Decides which declarations belong to the public surface, and which attached
//! attributes are worth showing.

use std::collections::HashSet;

use super::ids;
use crate::config::RenderPolicy;
use crate::models::symbol::{
    AttributeData, MemberSymbol, NamespaceSymbol, Symbol, TypeRef, TypeSymbol,
};

#[derive(Debug, Clone)]
pub struct VisibilityFilter<'p> {
    policy: &'p RenderPolicy,
    /// Qualified metadata names of types declared in this document that are
    /// not part of the public surface
    hidden_types: HashSet<String>,
}

impl<'p> VisibilityFilter<'p> {
    pub fn new(policy: &'p RenderPolicy) -> Self {
        Self {
            policy,
            hidden_types: HashSet::new(),
        }
    }

    /// Filter aware of the document's own non-public types, so references to
    /// them are hidden even when the reference carries no accessibility
    pub fn for_document(policy: &'p RenderPolicy, namespaces: &[NamespaceSymbol]) -> Self {
        let mut filter = Self::new(policy);
        for ns in namespaces {
            filter.collect_hidden(&ns.members, &ns.name);
        }
        tracing::debug!("{} declared types are hidden", filter.hidden_types.len());
        filter
    }

    fn collect_hidden(&mut self, members: &[Symbol], prefix: &str) {
        for member in members {
            match member {
                Symbol::Namespace(inner) => {
                    self.collect_hidden(&inner.members, &ids::qualify(prefix, &inner.name))
                }
                Symbol::Type(ty) => self.collect_hidden_type(ty, prefix, false),
                _ => {}
            }
        }
    }

    fn collect_hidden_type(&mut self, ty: &TypeSymbol, prefix: &str, container_hidden: bool) {
        let key = ids::qualify(prefix, &ty.metadata_name());
        let hidden = container_hidden || !self.is_type_visible(ty);
        for member in &ty.members {
            if let Symbol::Type(nested) = member {
                self.collect_hidden_type(nested, &key, hidden);
            }
        }
        if hidden {
            self.hidden_types.insert(key);
        }
    }

    pub fn is_visible(&self, symbol: &Symbol) -> bool {
        match symbol {
            Symbol::Namespace(ns) => self.has_visible_types(ns),
            Symbol::Type(ty) => self.is_type_visible(ty),
            Symbol::Member(member) => self.is_member_visible(member),
            Symbol::Attribute(attr) => self.is_attribute_visible(attr),
            Symbol::Unknown => true,
        }
    }

    pub fn is_type_visible(&self, ty: &TypeSymbol) -> bool {
        ty.accessibility.is_public_surface()
    }

    pub fn is_member_visible(&self, member: &MemberSymbol) -> bool {
        if member.accessor || member.implicit {
            return false;
        }
        if member.accessibility.is_public_surface() {
            return true;
        }
        member
            .explicit_interface
            .as_ref()
            .is_some_and(|iface| self.is_reference_visible(iface))
    }

    /// References to this document's own non-public types are hidden. Other
    /// references without accessibility information come from other
    /// assemblies and are assumed public.
    pub fn is_reference_visible(&self, reference: &TypeRef) -> bool {
        if self.hidden_types.contains(&reference.metadata_name()) {
            return false;
        }
        reference
            .accessibility
            .is_none_or(|a| a.is_public_surface())
    }

    pub fn is_attribute_visible(&self, attribute: &AttributeData) -> bool {
        !self.policy.is_skipped_attribute(attribute)
            && self.is_reference_visible(&attribute.attribute_type)
    }

    pub fn visible_attributes<'a>(&self, attributes: &'a [AttributeData]) -> Vec<&'a AttributeData> {
        attributes
            .iter()
            .filter(|a| self.is_attribute_visible(a))
            .collect()
    }

    /// A namespace is rendered only if some type below it is visible
    pub fn has_visible_types(&self, ns: &NamespaceSymbol) -> bool {
        ns.members.iter().any(|member| match member {
            Symbol::Type(ty) => self.is_type_visible(ty),
            Symbol::Namespace(inner) => self.has_visible_types(inner),
            _ => false,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::symbol::{Accessibility, MemberKind, TypeKind};

    fn member(accessibility: Accessibility) -> MemberSymbol {
        MemberSymbol::new("M", MemberKind::Method).with_accessibility(accessibility)
    }

    #[test]
    fn test_accessibility_levels() {
        let policy = RenderPolicy::default();
        let filter = VisibilityFilter::new(&policy);
        assert!(filter.is_member_visible(&member(Accessibility::Public)));
        assert!(filter.is_member_visible(&member(Accessibility::Protected)));
        assert!(filter.is_member_visible(&member(Accessibility::ProtectedOrInternal)));
        assert!(!filter.is_member_visible(&member(Accessibility::Internal)));
        assert!(!filter.is_member_visible(&member(Accessibility::Private)));
        assert!(!filter.is_member_visible(&member(Accessibility::ProtectedAndInternal)));
    }

    #[test]
    fn test_explicit_implementation_of_visible_contract() {
        let policy = RenderPolicy::default();
        let filter = VisibilityFilter::new(&policy);

        let mut explicit = member(Accessibility::Private);
        explicit.explicit_interface = Some(TypeRef::new("IDisposable").in_namespace("System"));
        assert!(filter.is_member_visible(&explicit));

        let mut hidden_contract = member(Accessibility::Private);
        let mut iface = TypeRef::new("IInternal");
        iface.accessibility = Some(Accessibility::Internal);
        hidden_contract.explicit_interface = Some(iface);
        assert!(!filter.is_member_visible(&hidden_contract));
    }

    #[test]
    fn test_document_types_hide_their_references() {
        let policy = RenderPolicy::default();
        let namespaces = vec![NamespaceSymbol::new("N")
            .with_member(Symbol::Type(
                TypeSymbol::new("IHidden", TypeKind::Interface)
                    .with_accessibility(Accessibility::Internal),
            ))
            .with_member(Symbol::Type(
                TypeSymbol::new("Impl", TypeKind::Class)
                    .with_accessibility(Accessibility::Internal)
                    .with_member(Symbol::Type(TypeSymbol::new("Inner", TypeKind::Class))),
            ))
            .with_member(Symbol::Type(TypeSymbol::new("IShown", TypeKind::Interface)))];
        let filter = VisibilityFilter::for_document(&policy, &namespaces);

        assert!(!filter.is_reference_visible(&TypeRef::new("IHidden").in_namespace("N")));
        assert!(filter.is_reference_visible(&TypeRef::new("IShown").in_namespace("N")));
        let mut inner = TypeRef::new("Inner").in_namespace("N");
        inner.containing_types.push("Impl".to_string());
        assert!(!filter.is_reference_visible(&inner));
        assert!(filter.is_reference_visible(&TypeRef::new("IHidden").in_namespace("Other")));

        let mut explicit = member(Accessibility::Private);
        explicit.explicit_interface = Some(TypeRef::new("IHidden").in_namespace("N"));
        assert!(!filter.is_member_visible(&explicit));
    }

    #[test]
    fn test_synthesized_members_excluded() {
        let policy = RenderPolicy::default();
        let filter = VisibilityFilter::new(&policy);

        let mut getter = member(Accessibility::Public);
        getter.accessor = true;
        assert!(!filter.is_member_visible(&getter));

        let mut default_ctor = MemberSymbol::new(".ctor", MemberKind::Constructor);
        default_ctor.implicit = true;
        assert!(!filter.is_member_visible(&default_ctor));
    }

    #[test]
    fn test_attribute_filter() {
        let policy = RenderPolicy::default();
        let filter = VisibilityFilter::new(&policy);
        let attributes = vec![
            AttributeData::new(TypeRef::new("DebuggerStepThroughAttribute")),
            AttributeData::new(TypeRef::new("ObsoleteAttribute")),
            AttributeData::new(TypeRef {
                accessibility: Some(Accessibility::Internal),
                ..TypeRef::new("InternalMarkerAttribute")
            }),
        ];
        let visible = filter.visible_attributes(&attributes);
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].short_name(), "Obsolete");
    }

    #[test]
    fn test_namespace_visibility() {
        let policy = RenderPolicy::default();
        let filter = VisibilityFilter::new(&policy);

        let internal_only = NamespaceSymbol::new("Hidden").with_member(Symbol::Type(
            TypeSymbol::new("Impl", TypeKind::Class).with_accessibility(Accessibility::Internal),
        ));
        assert!(!filter.has_visible_types(&internal_only));

        let nested = NamespaceSymbol::new("Outer").with_member(Symbol::Namespace(
            NamespaceSymbol::new("Inner")
                .with_member(Symbol::Type(TypeSymbol::new("Api", TypeKind::Class))),
        ));
        assert!(filter.is_visible(&Symbol::Namespace(nested)));
    }
}
