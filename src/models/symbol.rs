//! Symbol tree definitions
//!
//! The abstract model of a compiled library's declarations. A symbol provider
//! produces one [`Assembly`] per artifact; the renderer only ever reads it.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Root of a symbol tree
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Assembly {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attributes: Vec<AttributeData>,
    #[serde(default)]
    pub namespaces: Vec<NamespaceSymbol>,
}

impl Assembly {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: None,
            attributes: Vec::new(),
            namespaces: Vec::new(),
        }
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    pub fn with_namespace(mut self, namespace: NamespaceSymbol) -> Self {
        self.namespaces.push(namespace);
        self
    }

    /// Display name used for the navigation root
    pub fn display_name(&self) -> String {
        match &self.version {
            Some(version) => format!("{} ({})", self.name, version),
            None => self.name.clone(),
        }
    }

    /// Namespaces with every qualified name declared exactly once.
    ///
    /// Dotted names are split into nested namespaces and repeated
    /// declarations are folded together, first declaration first. Members of
    /// the global namespace end up in a single unnamed entry.
    pub fn merged_namespaces(&self) -> Vec<NamespaceSymbol> {
        let mut root = NamespaceTree::default();
        for ns in &self.namespaces {
            root.insert(ns);
        }

        let mut merged = Vec::new();
        if !root.members.is_empty() {
            merged.push(NamespaceSymbol {
                name: String::new(),
                members: root.members,
            });
        }
        merged.extend(
            root.children
                .into_iter()
                .map(|(name, tree)| tree.into_namespace(name)),
        );
        merged
    }
}

#[derive(Default)]
struct NamespaceTree {
    members: Vec<Symbol>,
    children: Vec<(String, NamespaceTree)>,
}

impl NamespaceTree {
    fn child(&mut self, name: &str) -> &mut NamespaceTree {
        let pos = match self.children.iter().position(|(n, _)| n == name) {
            Some(pos) => pos,
            None => {
                self.children.push((name.to_string(), NamespaceTree::default()));
                self.children.len() - 1
            }
        };
        &mut self.children[pos].1
    }

    fn insert(&mut self, ns: &NamespaceSymbol) {
        let mut target = self;
        for segment in ns.name.split('.').filter(|s| !s.is_empty()) {
            target = target.child(segment);
        }
        for member in &ns.members {
            match member {
                Symbol::Namespace(inner) => target.insert(inner),
                other => target.members.push(other.clone()),
            }
        }
    }

    fn into_namespace(self, name: String) -> NamespaceSymbol {
        let mut members = self.members;
        members.extend(
            self.children
                .into_iter()
                .map(|(child, tree)| Symbol::Namespace(tree.into_namespace(child))),
        );
        NamespaceSymbol { name, members }
    }
}

/// A node in the symbol tree
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Symbol {
    Namespace(NamespaceSymbol),
    Type(TypeSymbol),
    Member(MemberSymbol),
    Attribute(AttributeData),
    /// Anything the provider emitted that this model does not describe
    #[serde(other)]
    Unknown,
}

impl Symbol {
    pub fn name(&self) -> &str {
        match self {
            Self::Namespace(ns) => &ns.name,
            Self::Type(ty) => &ty.name,
            Self::Member(member) => &member.name,
            Self::Attribute(attr) => &attr.attribute_type.name,
            Self::Unknown => "",
        }
    }

    pub fn as_member(&self) -> Option<&MemberSymbol> {
        match self {
            Self::Member(member) => Some(member),
            _ => None,
        }
    }
}

/// Namespace declaration; `name` is relative to the parent namespace
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NamespaceSymbol {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub members: Vec<Symbol>,
}

impl NamespaceSymbol {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            members: Vec::new(),
        }
    }

    pub fn with_member(mut self, member: Symbol) -> Self {
        self.members.push(member);
        self
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TypeSymbol {
    pub name: String,
    #[serde(default)]
    pub accessibility: Accessibility,
    pub type_kind: TypeKind,
    #[serde(default)]
    pub modifiers: Modifiers,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub type_parameters: Vec<TypeParameter>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_type: Option<TypeRef>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub interfaces: Vec<TypeRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enum_underlying_type: Option<TypeRef>,
    /// Signature of a delegate's invoke method
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delegate_invoke: Option<Box<MemberSymbol>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attributes: Vec<AttributeData>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub documentation: Option<String>,
    #[serde(default)]
    pub members: Vec<Symbol>,
}

impl TypeSymbol {
    pub fn new(name: impl Into<String>, type_kind: TypeKind) -> Self {
        Self {
            name: name.into(),
            accessibility: Accessibility::Public,
            type_kind,
            modifiers: Modifiers::default(),
            type_parameters: Vec::new(),
            base_type: None,
            interfaces: Vec::new(),
            enum_underlying_type: None,
            delegate_invoke: None,
            attributes: Vec::new(),
            documentation: None,
            members: Vec::new(),
        }
    }

    pub fn with_accessibility(mut self, accessibility: Accessibility) -> Self {
        self.accessibility = accessibility;
        self
    }

    pub fn with_member(mut self, member: Symbol) -> Self {
        self.members.push(member);
        self
    }

    pub fn with_attribute(mut self, attribute: AttributeData) -> Self {
        self.attributes.push(attribute);
        self
    }

    /// Metadata name including the generic arity suffix
    pub fn metadata_name(&self) -> String {
        if self.type_parameters.is_empty() {
            self.name.clone()
        } else {
            format!("{}`{}", self.name, self.type_parameters.len())
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeKind {
    Class,
    Struct,
    Interface,
    Enum,
    Delegate,
    #[serde(other)]
    Unknown,
}

impl TypeKind {
    pub fn keyword(&self) -> Option<&'static str> {
        match self {
            Self::Class => Some("class"),
            Self::Struct => Some("struct"),
            Self::Interface => Some("interface"),
            Self::Enum => Some("enum"),
            Self::Delegate => Some("delegate"),
            Self::Unknown => None,
        }
    }

    /// Metadata name of the base type every type of this kind derives from
    pub fn implicit_base(&self) -> Option<&'static str> {
        match self {
            Self::Class => Some("System.Object"),
            Self::Struct => Some("System.ValueType"),
            Self::Enum => Some("System.Enum"),
            Self::Delegate => Some("System.MulticastDelegate"),
            Self::Interface | Self::Unknown => None,
        }
    }
}

impl fmt::Display for TypeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.keyword().unwrap_or("unknown"))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemberSymbol {
    pub name: String,
    #[serde(default)]
    pub accessibility: Accessibility,
    pub member_kind: MemberKind,
    #[serde(default)]
    pub modifiers: Modifiers,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub type_parameters: Vec<TypeParameter>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<Parameter>,
    /// Return type for methods, declared type for fields/properties/events
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub return_type: Option<TypeRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub constant: Option<Constant>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accessors: Option<Accessors>,
    /// Interface this member explicitly implements
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explicit_interface: Option<TypeRef>,
    /// Compiler-synthesized property/event accessor method
    #[serde(default)]
    pub accessor: bool,
    /// Implicitly declared by the compiler (default constructors, record members)
    #[serde(default)]
    pub implicit: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attributes: Vec<AttributeData>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub documentation: Option<String>,
}

impl MemberSymbol {
    pub fn new(name: impl Into<String>, member_kind: MemberKind) -> Self {
        Self {
            name: name.into(),
            accessibility: Accessibility::Public,
            member_kind,
            modifiers: Modifiers::default(),
            type_parameters: Vec::new(),
            parameters: Vec::new(),
            return_type: None,
            constant: None,
            accessors: None,
            explicit_interface: None,
            accessor: false,
            implicit: false,
            attributes: Vec::new(),
            documentation: None,
        }
    }

    pub fn with_accessibility(mut self, accessibility: Accessibility) -> Self {
        self.accessibility = accessibility;
        self
    }

    pub fn with_return_type(mut self, return_type: TypeRef) -> Self {
        self.return_type = Some(return_type);
        self
    }

    pub fn with_parameter(mut self, parameter: Parameter) -> Self {
        self.parameters.push(parameter);
        self
    }

    pub fn with_constant(mut self, constant: Constant) -> Self {
        self.constant = Some(constant);
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MemberKind {
    Field,
    Constructor,
    Property,
    Indexer,
    Event,
    Method,
    Operator,
    Conversion,
    #[serde(other)]
    Unknown,
}

impl MemberKind {
    /// Documentation-id prefix for this kind of member
    pub fn id_prefix(&self) -> &'static str {
        match self {
            Self::Field => "F",
            Self::Property | Self::Indexer => "P",
            Self::Event => "E",
            Self::Constructor
            | Self::Method
            | Self::Operator
            | Self::Conversion
            | Self::Unknown => "M",
        }
    }
}

impl fmt::Display for MemberKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Field => "field",
            Self::Constructor => "constructor",
            Self::Property => "property",
            Self::Indexer => "indexer",
            Self::Event => "event",
            Self::Method => "method",
            Self::Operator => "operator",
            Self::Conversion => "conversion",
            Self::Unknown => "unknown",
        };
        write!(f, "{}", s)
    }
}

/// Declared accessibility of a type or member
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Accessibility {
    Public,
    Protected,
    ProtectedOrInternal,
    ProtectedAndInternal,
    Internal,
    Private,
    #[default]
    NotApplicable,
}

impl Accessibility {
    /// Whether a consumer of the compiled library can reach this symbol
    pub fn is_public_surface(&self) -> bool {
        matches!(
            self,
            Self::Public | Self::Protected | Self::ProtectedOrInternal
        )
    }

    pub fn keyword(&self) -> Option<&'static str> {
        match self {
            Self::Public => Some("public"),
            Self::Protected => Some("protected"),
            Self::ProtectedOrInternal => Some("protected internal"),
            Self::ProtectedAndInternal => Some("private protected"),
            Self::Internal => Some("internal"),
            Self::Private => Some("private"),
            Self::NotApplicable => None,
        }
    }
}

impl FromStr for Accessibility {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace(['-', ' '], "_").as_str() {
            "public" => Ok(Self::Public),
            "protected" => Ok(Self::Protected),
            "protected_or_internal" | "protected_internal" => Ok(Self::ProtectedOrInternal),
            "protected_and_internal" | "private_protected" => Ok(Self::ProtectedAndInternal),
            "internal" => Ok(Self::Internal),
            "private" => Ok(Self::Private),
            "not_applicable" => Ok(Self::NotApplicable),
            _ => Err(format!("Unknown accessibility: {}", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Modifiers {
    #[serde(rename = "abstract")]
    pub is_abstract: bool,
    #[serde(rename = "static")]
    pub is_static: bool,
    #[serde(rename = "sealed")]
    pub is_sealed: bool,
    #[serde(rename = "readonly")]
    pub is_readonly: bool,
    #[serde(rename = "override")]
    pub is_override: bool,
    #[serde(rename = "virtual")]
    pub is_virtual: bool,
    #[serde(rename = "const")]
    pub is_const: bool,
    #[serde(rename = "partial")]
    pub is_partial: bool,
    #[serde(rename = "extern")]
    pub is_extern: bool,
    #[serde(rename = "new")]
    pub is_new: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Variance {
    #[default]
    None,
    In,
    Out,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TypeParameter {
    pub name: String,
    #[serde(default)]
    pub variance: Variance,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub constraints: Vec<TypeRef>,
    /// `class` constraint
    #[serde(default)]
    pub reference_type: bool,
    /// `struct` constraint
    #[serde(default)]
    pub value_type: bool,
    /// `new()` constraint
    #[serde(default)]
    pub constructor: bool,
}

impl TypeParameter {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            variance: Variance::None,
            constraints: Vec::new(),
            reference_type: false,
            value_type: false,
            constructor: false,
        }
    }

    pub fn has_constraints(&self) -> bool {
        self.reference_type || self.value_type || self.constructor || !self.constraints.is_empty()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RefKind {
    #[default]
    None,
    Ref,
    Out,
    In,
}

impl RefKind {
    pub fn keyword(&self) -> Option<&'static str> {
        match self {
            Self::None => None,
            Self::Ref => Some("ref"),
            Self::Out => Some("out"),
            Self::In => Some("in"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Parameter {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: TypeRef,
    #[serde(default)]
    pub ref_kind: RefKind,
    #[serde(default)]
    pub params: bool,
    /// First parameter of an extension method
    #[serde(default)]
    pub this: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Constant>,
}

impl Parameter {
    pub fn new(name: impl Into<String>, ty: TypeRef) -> Self {
        Self {
            name: name.into(),
            ty,
            ref_kind: RefKind::None,
            params: false,
            this: false,
            default: None,
        }
    }
}

/// Property, indexer or event accessors
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Accessors {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub get: Option<Accessibility>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub set: Option<Accessibility>,
    #[serde(default)]
    pub init_only: bool,
}

/// Reference to a type by name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeRef {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
    /// Outer types, outermost first, for references to nested types
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub containing_types: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub type_arguments: Vec<TypeRef>,
    #[serde(default)]
    pub array_rank: u32,
    #[serde(default)]
    pub nullable: bool,
    /// Accessibility of the referenced type, when the provider knows it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accessibility: Option<Accessibility>,
}

impl TypeRef {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            namespace: None,
            containing_types: Vec::new(),
            type_arguments: Vec::new(),
            array_rank: 0,
            nullable: false,
            accessibility: None,
        }
    }

    pub fn in_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    pub fn with_type_argument(mut self, argument: TypeRef) -> Self {
        self.type_arguments.push(argument);
        self
    }

    pub fn array(mut self, rank: u32) -> Self {
        self.array_rank = rank;
        self
    }

    /// Fully qualified metadata name, e.g. `System.Collections.Generic.List`1`
    pub fn metadata_name(&self) -> String {
        let mut parts: Vec<String> = Vec::new();
        if let Some(ns) = self.namespace.as_deref().filter(|ns| !ns.is_empty()) {
            parts.push(ns.to_string());
        }
        parts.extend(self.containing_types.iter().cloned());
        if self.type_arguments.is_empty() {
            parts.push(self.name.clone());
        } else {
            parts.push(format!("{}`{}", self.name, self.type_arguments.len()));
        }
        parts.join(".")
    }

    /// Short display form used inside documentation ids
    pub fn id_name(&self) -> String {
        let mut name = match PRIMITIVE_NAMES.iter().find(|p| p.0 == self.name) {
            Some((keyword, _)) if self.namespace.is_none() => keyword.to_string(),
            _ => {
                let mut base = self.metadata_name();
                if !self.type_arguments.is_empty() {
                    if let Some(pos) = base.rfind('`') {
                        base.truncate(pos);
                    }
                    let args: Vec<String> =
                        self.type_arguments.iter().map(TypeRef::id_name).collect();
                    base = format!("{}{{{}}}", base, args.join(","));
                }
                base
            }
        };
        if self.nullable {
            name.push('?');
        }
        for _ in 0..self.array_rank {
            name.push_str("[]");
        }
        name
    }

    /// Whether this is a language keyword type such as `int` or `string`
    pub fn is_keyword(&self) -> bool {
        self.namespace.is_none()
            && self.containing_types.is_empty()
            && self.type_arguments.is_empty()
            && is_primitive_keyword(&self.name)
    }

    /// Whether this refers to the given fully qualified metadata name
    pub fn is(&self, metadata_name: &str) -> bool {
        if self.metadata_name() == metadata_name {
            return true;
        }
        // keyword aliases: `object` == System.Object
        PRIMITIVE_NAMES
            .iter()
            .any(|(keyword, full)| *keyword == self.name && *full == metadata_name)
    }
}

const PRIMITIVE_NAMES: &[(&str, &str)] = &[
    ("bool", "System.Boolean"),
    ("byte", "System.Byte"),
    ("sbyte", "System.SByte"),
    ("char", "System.Char"),
    ("decimal", "System.Decimal"),
    ("double", "System.Double"),
    ("float", "System.Single"),
    ("int", "System.Int32"),
    ("uint", "System.UInt32"),
    ("long", "System.Int64"),
    ("ulong", "System.UInt64"),
    ("short", "System.Int16"),
    ("ushort", "System.UInt16"),
    ("nint", "System.IntPtr"),
    ("nuint", "System.UIntPtr"),
    ("object", "System.Object"),
    ("string", "System.String"),
    ("void", "System.Void"),
    ("dynamic", "System.Object"),
];

pub fn is_primitive_keyword(name: &str) -> bool {
    PRIMITIVE_NAMES.iter().any(|(keyword, _)| *keyword == name)
}

/// Attribute applied to a declaration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttributeData {
    pub attribute_type: TypeRef,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub arguments: Vec<Constant>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub named_arguments: Vec<NamedArgument>,
}

impl AttributeData {
    pub fn new(attribute_type: TypeRef) -> Self {
        Self {
            attribute_type,
            arguments: Vec::new(),
            named_arguments: Vec::new(),
        }
    }

    pub fn with_argument(mut self, argument: Constant) -> Self {
        self.arguments.push(argument);
        self
    }

    pub fn with_named_argument(mut self, name: impl Into<String>, value: Constant) -> Self {
        self.named_arguments.push(NamedArgument {
            name: name.into(),
            value,
        });
        self
    }

    /// Attribute type name as written in source (`Obsolete` for `ObsoleteAttribute`)
    pub fn short_name(&self) -> &str {
        let name = self.attribute_type.name.as_str();
        name.strip_suffix("Attribute")
            .filter(|s| !s.is_empty())
            .unwrap_or(name)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NamedArgument {
    pub name: String,
    pub value: Constant,
}

/// Typed constant value from metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Constant {
    Null,
    Bool(bool),
    Int(i64),
    #[serde(rename = "uint")]
    UInt(u64),
    Float(f64),
    Char(char),
    String(String),
    /// Value of an enum-typed constant; unsigned enums keep their full 64 bits
    Enum {
        enum_type: TypeRef,
        #[serde(with = "enum_value")]
        value: i128,
    },
    Type(TypeRef),
    Array {
        element_type: TypeRef,
        items: Vec<Constant>,
    },
}

impl Constant {
    /// Integral value, used for enum member ordering
    pub fn as_i128(&self) -> Option<i128> {
        match self {
            Self::Int(v) => Some(i128::from(*v)),
            Self::UInt(v) => Some(i128::from(*v)),
            Self::Enum { value, .. } => Some(*value),
            Self::Char(c) => Some(i128::from(u32::from(*c))),
            Self::Bool(b) => Some(i128::from(*b)),
            _ => None,
        }
    }
}

/// Enum constants arrive as either a signed or an unsigned 64-bit integer
mod enum_value {
    use serde::de::{self, Visitor};
    use serde::{Deserializer, Serializer, ser};
    use std::fmt;

    pub fn serialize<S: Serializer>(value: &i128, serializer: S) -> Result<S::Ok, S::Error> {
        if let Ok(v) = i64::try_from(*value) {
            serializer.serialize_i64(v)
        } else if let Ok(v) = u64::try_from(*value) {
            serializer.serialize_u64(v)
        } else {
            Err(ser::Error::custom(format!("enum value {} out of range", value)))
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i128, D::Error> {
        struct EnumValueVisitor;

        impl Visitor<'_> for EnumValueVisitor {
            type Value = i128;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a 64-bit integer")
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<i128, E> {
                Ok(i128::from(v))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<i128, E> {
                Ok(i128::from(v))
            }
        }

        deserializer.deserialize_any(EnumValueVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symbol_kind_tag_deserialization() {
        let json = r#"[
            {"kind": "type", "name": "C", "type_kind": "class", "accessibility": "public"},
            {"kind": "member", "name": "M", "member_kind": "method"},
            {"kind": "widget", "name": "W"}
        ]"#;
        let symbols: Vec<Symbol> = serde_json::from_str(json).unwrap();
        assert!(matches!(&symbols[0], Symbol::Type(t) if t.type_kind == TypeKind::Class));
        assert!(matches!(&symbols[1], Symbol::Member(m) if m.accessibility == Accessibility::NotApplicable));
        assert!(matches!(symbols[2], Symbol::Unknown));
    }

    #[test]
    fn test_merged_namespaces() {
        let class = |name: &str| Symbol::Type(TypeSymbol::new(name, TypeKind::Class));
        let assembly = Assembly::new("Lib")
            .with_namespace(NamespaceSymbol::new("N").with_member(class("A")))
            .with_namespace(NamespaceSymbol::new("").with_member(class("G")).with_member(
                Symbol::Namespace(NamespaceSymbol::new("N").with_member(class("B"))),
            ))
            .with_namespace(NamespaceSymbol::new("N.Inner").with_member(class("C")))
            .with_namespace(NamespaceSymbol::new("N").with_member(Symbol::Namespace(
                NamespaceSymbol::new("Inner").with_member(class("D")),
            )));

        let merged = assembly.merged_namespaces();
        let names: Vec<&str> = merged.iter().map(|ns| ns.name.as_str()).collect();
        assert_eq!(names, vec!["", "N"]);
        assert_eq!(merged[0].members.len(), 1);

        let n = &merged[1];
        let direct: Vec<&str> = n.members.iter().map(Symbol::name).collect();
        assert_eq!(direct, vec!["A", "B", "Inner"]);
        let Symbol::Namespace(inner) = &n.members[2] else {
            panic!("expected nested namespace");
        };
        let nested: Vec<&str> = inner.members.iter().map(Symbol::name).collect();
        assert_eq!(nested, vec!["C", "D"]);
    }

    #[test]
    fn test_unknown_type_kind_degrades() {
        let json = r#"{"name": "X", "type_kind": "record_thing"}"#;
        let ty: TypeSymbol = serde_json::from_str(json).unwrap();
        assert_eq!(ty.type_kind, TypeKind::Unknown);
        assert_eq!(ty.type_kind.keyword(), None);
    }

    #[test]
    fn test_constant_deserialization() {
        let json = r#"[
            {"type": "null"},
            {"type": "int", "value": 3},
            {"type": "enum", "value": {"enum_type": {"name": "E"}, "value": 3}},
            {"type": "array", "value": {"element_type": {"name": "int"}, "items": [{"type": "int", "value": 1}]}}
        ]"#;
        let constants: Vec<Constant> = serde_json::from_str(json).unwrap();
        assert_eq!(constants[0], Constant::Null);
        assert_eq!(constants[1], Constant::Int(3));
        assert_eq!(constants[2].as_i128(), Some(3));
        assert!(matches!(&constants[3], Constant::Array { items, .. } if items.len() == 1));
    }

    #[test]
    fn test_unsigned_enum_constant_keeps_high_bit() {
        let json = r#"{"type": "enum", "value": {"enum_type": {"name": "Bits"}, "value": 9223372036854775808}}"#;
        let constant: Constant = serde_json::from_str(json).unwrap();
        assert_eq!(constant.as_i128(), Some(1i128 << 63));

        let negative = r#"{"type": "enum", "value": {"enum_type": {"name": "Sign"}, "value": -1}}"#;
        let constant: Constant = serde_json::from_str(negative).unwrap();
        assert_eq!(constant.as_i128(), Some(-1));

        let written = serde_json::to_string(&Constant::Enum {
            enum_type: TypeRef::new("Bits"),
            value: 1i128 << 63,
        })
        .unwrap();
        assert!(written.contains("9223372036854775808"));
    }

    #[test]
    fn test_accessibility_surface() {
        assert!(Accessibility::Public.is_public_surface());
        assert!(Accessibility::Protected.is_public_surface());
        assert!(Accessibility::ProtectedOrInternal.is_public_surface());
        assert!(!Accessibility::ProtectedAndInternal.is_public_surface());
        assert!(!Accessibility::Internal.is_public_surface());
        assert!(!Accessibility::Private.is_public_surface());
    }

    #[test]
    fn test_accessibility_from_str() {
        assert_eq!(
            "protected internal".parse::<Accessibility>().unwrap(),
            Accessibility::ProtectedOrInternal
        );
        assert_eq!(
            "private-protected".parse::<Accessibility>().unwrap(),
            Accessibility::ProtectedAndInternal
        );
        assert!("friend".parse::<Accessibility>().is_err());
    }

    #[test]
    fn test_type_ref_names() {
        let list = TypeRef::new("List")
            .in_namespace("System.Collections.Generic")
            .with_type_argument(TypeRef::new("int"));
        assert_eq!(list.metadata_name(), "System.Collections.Generic.List`1");
        assert_eq!(list.id_name(), "System.Collections.Generic.List{int}");
        assert!(!list.is_keyword());
        assert!(TypeRef::new("int").is_keyword());
        assert!(TypeRef::new("object").is("System.Object"));
        assert_eq!(TypeRef::new("byte").array(1).id_name(), "byte[]");
    }

    #[test]
    fn test_attribute_names() {
        let attr = AttributeData::new(TypeRef::new("ObsoleteAttribute").in_namespace("System"));
        assert_eq!(attr.short_name(), "Obsolete");
        assert_eq!(attr.attribute_type.metadata_name(), "System.ObsoleteAttribute");

        let bare = AttributeData::new(TypeRef::new("Attribute"));
        assert_eq!(bare.short_name(), "Attribute");
    }
}
