//! Definition ids
//!
//! Ids follow documentation-comment-id conventions: a one-letter kind prefix,
//! the fully qualified metadata name, and for members the parameter types.

use crate::models::symbol::{MemberKind, MemberSymbol, RefKind};

/// Join a qualified prefix and a simple name
pub fn qualify(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        name.to_string()
    } else if name.is_empty() {
        prefix.to_string()
    } else {
        format!("{}.{}", prefix, name)
    }
}

pub fn namespace_id(qualified: &str) -> String {
    format!("N:{}", qualified)
}

pub fn type_id(key: &str) -> String {
    format!("T:{}", key)
}

pub fn member_id(container_key: &str, member: &MemberSymbol) -> String {
    let mut id = format!(
        "{}:{}.{}",
        member.member_kind.id_prefix(),
        container_key,
        member.name.replace('.', "#")
    );

    if !member.type_parameters.is_empty() {
        id.push_str(&format!("``{}", member.type_parameters.len()));
    }

    if !member.parameters.is_empty() {
        let params: Vec<String> = member
            .parameters
            .iter()
            .map(|p| match p.ref_kind {
                RefKind::None => p.ty.id_name(),
                _ => format!("{}@", p.ty.id_name()),
            })
            .collect();
        id.push_str(&format!("({})", params.join(",")));
    }

    // implicit/explicit overloads differ only by return type
    if member.member_kind == MemberKind::Conversion
        && let Some(ret) = &member.return_type
    {
        id.push_str(&format!("~{}", ret.id_name()));
    }

    id
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::symbol::{Parameter, TypeParameter, TypeRef};

    #[test]
    fn test_qualify() {
        assert_eq!(qualify("", "C"), "C");
        assert_eq!(qualify("N", ""), "N");
        assert_eq!(qualify("N.Sub", "C`1"), "N.Sub.C`1");
    }

    #[test]
    fn test_method_ids() {
        let plain = MemberSymbol::new("M", MemberKind::Method);
        assert_eq!(member_id("N.C", &plain), "M:N.C.M");

        let mut generic = MemberSymbol::new("Map", MemberKind::Method)
            .with_parameter(Parameter::new("value", TypeRef::new("int")));
        generic.type_parameters.push(TypeParameter::new("T"));
        let mut out = Parameter::new("result", TypeRef::new("string"));
        out.ref_kind = RefKind::Out;
        generic.parameters.push(out);
        assert_eq!(member_id("N.C", &generic), "M:N.C.Map``1(int,string@)");
    }

    #[test]
    fn test_special_names() {
        let ctor = MemberSymbol::new(".ctor", MemberKind::Constructor);
        assert_eq!(member_id("N.C", &ctor), "M:N.C.#ctor");

        let explicit = MemberSymbol::new("System.IDisposable.Dispose", MemberKind::Method);
        assert_eq!(
            member_id("N.C", &explicit),
            "M:N.C.System#IDisposable#Dispose"
        );

        let prop = MemberSymbol::new("Count", MemberKind::Property);
        assert_eq!(member_id("N.C", &prop), "P:N.C.Count");
    }

    #[test]
    fn test_conversion_ids_include_return_type() {
        let to_int = MemberSymbol::new("op_Explicit", MemberKind::Conversion)
            .with_parameter(Parameter::new("value", TypeRef::new("Money").in_namespace("N")))
            .with_return_type(TypeRef::new("int"));
        let to_long = MemberSymbol::new("op_Explicit", MemberKind::Conversion)
            .with_parameter(Parameter::new("value", TypeRef::new("Money").in_namespace("N")))
            .with_return_type(TypeRef::new("long"));
        assert_eq!(member_id("N.Money", &to_int), "M:N.Money.op_Explicit(N.Money)~int");
        assert_ne!(member_id("N.Money", &to_int), member_id("N.Money", &to_long));
    }
}
