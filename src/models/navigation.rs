//! Navigation tree model
//!
//! Outline of namespaces and types, built alongside the token stream.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::symbol::TypeKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NavigationKind {
    Assembly,
    Namespace,
    Class,
    Struct,
    Interface,
    Enum,
    Delegate,
    Unknown,
}

impl From<TypeKind> for NavigationKind {
    fn from(kind: TypeKind) -> Self {
        match kind {
            TypeKind::Class => Self::Class,
            TypeKind::Struct => Self::Struct,
            TypeKind::Interface => Self::Interface,
            TypeKind::Enum => Self::Enum,
            TypeKind::Delegate => Self::Delegate,
            TypeKind::Unknown => Self::Unknown,
        }
    }
}

impl fmt::Display for NavigationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Assembly => "assembly",
            Self::Namespace => "namespace",
            Self::Class => "class",
            Self::Struct => "struct",
            Self::Interface => "interface",
            Self::Enum => "enum",
            Self::Delegate => "delegate",
            Self::Unknown => "unknown",
        };
        write!(f, "{}", s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationItem {
    pub id: String,
    pub text: String,
    pub kind: NavigationKind,
    #[serde(default)]
    pub children: Vec<NavigationItem>,
}

impl NavigationItem {
    pub fn new(id: impl Into<String>, text: impl Into<String>, kind: NavigationKind) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            kind,
            children: Vec::new(),
        }
    }

    /// Depth-first iterator over this item and its descendants
    pub fn walk(&self) -> Vec<&NavigationItem> {
        let mut out = Vec::new();
        self.collect(&mut out);
        out
    }

    fn collect<'a>(&'a self, out: &mut Vec<&'a NavigationItem>) {
        out.push(self);
        for child in &self.children {
            child.collect(out);
        }
    }

    pub fn find(&self, id: &str) -> Option<&NavigationItem> {
        if self.id == id {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> NavigationItem {
        let mut root = NavigationItem::new("Lib", "Lib", NavigationKind::Assembly);
        let mut ns = NavigationItem::new("N:N", "N", NavigationKind::Namespace);
        ns.children
            .push(NavigationItem::new("T:N.C", "C", NavigationKind::Class));
        root.children.push(ns);
        root
    }

    #[test]
    fn test_walk_is_depth_first() {
        let root = sample();
        let ids: Vec<&str> = root.walk().iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["Lib", "N:N", "T:N.C"]);
    }

    #[test]
    fn test_find() {
        let root = sample();
        assert_eq!(root.find("T:N.C").map(|i| i.kind), Some(NavigationKind::Class));
        assert!(root.find("T:N.D").is_none());
    }

    #[test]
    fn test_kind_from_type_kind() {
        assert_eq!(NavigationKind::from(TypeKind::Enum), NavigationKind::Enum);
        assert_eq!(NavigationKind::Delegate.to_string(), "delegate");
    }
}
