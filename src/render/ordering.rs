//! Ordering policy
//!
//! Imposes a deterministic total order over sibling symbols so that two renders
//! of the same tree are byte-identical no matter how the provider enumerated it.

use std::cmp::Ordering;
use std::fmt;

use crate::models::symbol::{MemberKind, MemberSymbol, NamespaceSymbol, Symbol};

pub trait OrderingPolicy: Send + Sync {
    /// Order the children of a namespace or type
    fn order<'a>(&self, symbols: &'a [Symbol]) -> Vec<&'a Symbol>;

    /// Order the top-level namespaces of an assembly
    fn order_namespaces<'a>(&self, namespaces: &'a [NamespaceSymbol]) -> Vec<&'a NamespaceSymbol>;

    /// Order the members of an enum; defaults to the general member order
    fn order_enum_members<'a>(&self, symbols: &'a [Symbol]) -> Vec<&'a Symbol> {
        self.order(symbols)
    }
}

/// Namespaces and types by ordinal name; members grouped by kind, then name,
/// then arity and parameter count so overload sets stay adjacent.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultOrdering;

#[derive(Debug, PartialEq, Eq, PartialOrd, Ord)]
struct SortKey {
    group: u8,
    name: String,
    arity: usize,
    parameter_count: usize,
    signature: String,
}

impl SortKey {
    fn of(symbol: &Symbol) -> Self {
        match symbol {
            Symbol::Namespace(ns) => Self::named(0, &ns.name),
            Symbol::Member(member) => Self {
                group: member_group(member.member_kind),
                name: member.name.clone(),
                arity: member.type_parameters.len(),
                parameter_count: member.parameters.len(),
                signature: signature(member),
            },
            Symbol::Type(ty) => Self {
                group: 9,
                name: ty.name.clone(),
                arity: ty.type_parameters.len(),
                parameter_count: 0,
                signature: String::new(),
            },
            Symbol::Attribute(attr) => Self {
                group: 10,
                name: attr.attribute_type.metadata_name(),
                arity: 0,
                parameter_count: attr.arguments.len(),
                signature: format!("{:?}", attr.arguments),
            },
            Symbol::Unknown => Self::named(11, ""),
        }
    }

    fn named(group: u8, name: &str) -> Self {
        Self {
            group,
            name: name.to_string(),
            arity: 0,
            parameter_count: 0,
            signature: String::new(),
        }
    }
}

fn member_group(kind: MemberKind) -> u8 {
    match kind {
        MemberKind::Field => 1,
        MemberKind::Constructor => 2,
        MemberKind::Property => 3,
        MemberKind::Indexer => 4,
        MemberKind::Event => 5,
        MemberKind::Method => 6,
        MemberKind::Operator => 7,
        MemberKind::Conversion => 8,
        MemberKind::Unknown => 11,
    }
}

/// Tie-breaker between overloads with the same name and parameter count
fn signature(member: &MemberSymbol) -> String {
    let mut parts: Vec<String> = member
        .parameters
        .iter()
        .map(|p| {
            let mut s = p.ty.id_name();
            if let Some(kw) = p.ref_kind.keyword() {
                s = format!("{} {}", kw, s);
            }
            s
        })
        .collect();
    if let Some(ret) = &member.return_type {
        parts.push(format!("->{}", ret.id_name()));
    }
    if let Some(iface) = &member.explicit_interface {
        parts.push(format!("@{}", iface.metadata_name()));
    }
    parts.join(",")
}

/// Last resort between siblings whose keys tie; only symbols with identical
/// content still compare equal, and those render identically in either order.
fn content_cmp<T: fmt::Debug>(a: &T, b: &T) -> Ordering {
    format!("{:?}", a).cmp(&format!("{:?}", b))
}

fn enum_value_cmp(a: &Symbol, b: &Symbol) -> Ordering {
    let value = |s: &Symbol| {
        s.as_member()
            .and_then(|m| m.constant.as_ref())
            .and_then(|c| c.as_i128())
    };
    // members without a value sort after valued ones
    match (value(a), value(b)) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

impl OrderingPolicy for DefaultOrdering {
    fn order<'a>(&self, symbols: &'a [Symbol]) -> Vec<&'a Symbol> {
        let mut keyed: Vec<(SortKey, &Symbol)> =
            symbols.iter().map(|s| (SortKey::of(s), s)).collect();
        keyed.sort_by(|a, b| a.0.cmp(&b.0).then_with(|| content_cmp(a.1, b.1)));
        keyed.into_iter().map(|(_, s)| s).collect()
    }

    fn order_namespaces<'a>(&self, namespaces: &'a [NamespaceSymbol]) -> Vec<&'a NamespaceSymbol> {
        let mut ordered: Vec<&NamespaceSymbol> = namespaces.iter().collect();
        ordered.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| content_cmp(a, b)));
        ordered
    }

    fn order_enum_members<'a>(&self, symbols: &'a [Symbol]) -> Vec<&'a Symbol> {
        let mut ordered = self.order(symbols);
        ordered.sort_by(|a, b| enum_value_cmp(a, b));
        ordered
    }
}
