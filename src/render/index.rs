//! Document index
//!
//! Pre-pass over the symbol tree recording every type that will be defined in
//! the output, so references can be linked and enum constants decomposed.

use std::collections::HashMap;

use super::ids;
use super::ordering::OrderingPolicy;
use super::visibility::VisibilityFilter;
use crate::models::symbol::{
    MemberKind, NamespaceSymbol, Symbol, TypeKind, TypeRef, TypeSymbol,
};

#[derive(Debug, Clone)]
pub struct IndexedType {
    pub id: String,
    pub kind: TypeKind,
    /// Enum members in rendering order, with their values
    pub enum_members: Vec<(String, i128)>,
}

#[derive(Debug, Default)]
pub struct DocumentIndex {
    types: HashMap<String, IndexedType>,
}

impl DocumentIndex {
    /// Index over namespaces already merged so each qualified name occurs once
    pub fn build(
        namespaces: &[NamespaceSymbol],
        filter: &VisibilityFilter<'_>,
        ordering: &dyn OrderingPolicy,
    ) -> Self {
        let mut index = Self::default();
        for ns in namespaces {
            index.add_namespace(ns, "", filter, ordering);
        }
        tracing::debug!("Indexed {} visible types", index.types.len());
        index
    }

    fn add_namespace(
        &mut self,
        ns: &NamespaceSymbol,
        parent: &str,
        filter: &VisibilityFilter<'_>,
        ordering: &dyn OrderingPolicy,
    ) {
        let qualified = ids::qualify(parent, &ns.name);
        for member in &ns.members {
            match member {
                Symbol::Namespace(inner) => self.add_namespace(inner, &qualified, filter, ordering),
                Symbol::Type(ty) => self.add_type(ty, &qualified, filter, ordering),
                _ => {}
            }
        }
    }

    fn add_type(
        &mut self,
        ty: &TypeSymbol,
        prefix: &str,
        filter: &VisibilityFilter<'_>,
        ordering: &dyn OrderingPolicy,
    ) {
        if !filter.is_type_visible(ty) {
            return;
        }
        let key = ids::qualify(prefix, &ty.metadata_name());

        let enum_members = if ty.type_kind == TypeKind::Enum {
            ordering
                .order_enum_members(&ty.members)
                .into_iter()
                .filter_map(Symbol::as_member)
                .filter(|m| m.member_kind == MemberKind::Field && filter.is_member_visible(m))
                .filter_map(|m| {
                    let value = m.constant.as_ref()?.as_i128()?;
                    Some((m.name.clone(), value))
                })
                .collect()
        } else {
            Vec::new()
        };

        for member in &ty.members {
            if let Symbol::Type(nested) = member {
                self.add_type(nested, &key, filter, ordering);
            }
        }

        self.types.insert(
            key.clone(),
            IndexedType {
                id: ids::type_id(&key),
                kind: ty.type_kind,
                enum_members,
            },
        );
    }

    pub fn resolve(&self, reference: &TypeRef) -> Option<&IndexedType> {
        self.types.get(&reference.metadata_name())
    }

    /// Id to link a reference to, unless it points at the type being defined
    pub fn navigate_to(&self, reference: &TypeRef, defining: Option<&str>) -> Option<String> {
        let target = self.resolve(reference)?;
        if defining == Some(target.id.as_str()) {
            return None;
        }
        Some(target.id.clone())
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}
