//! Constant formatting
//!
//! Renders typed metadata constants (attribute arguments, const initializers,
//! parameter defaults) as source-like literal tokens.

use super::writer::TokenWriter;
use crate::models::symbol::{Constant, TypeRef};

pub fn write_constant(w: &mut TokenWriter<'_>, value: &Constant, defining: Option<&str>) {
    match value {
        Constant::Null => w.keyword("null"),
        Constant::Bool(b) => w.keyword(if *b { "true" } else { "false" }),
        Constant::Int(v) => w.literal(&v.to_string()),
        Constant::UInt(v) => w.literal(&v.to_string()),
        Constant::Float(v) => w.literal(&format_float(*v)),
        Constant::Char(c) => w.string_literal(&format!("'{}'", escape_char(*c))),
        Constant::String(s) => w.string_literal(&format!("\"{}\"", escape_string(s))),
        Constant::Enum { enum_type, value } => write_enum(w, enum_type, *value, defining),
        Constant::Type(ty) => {
            w.keyword("typeof");
            w.punct("(");
            w.type_ref(ty, defining);
            w.punct(")");
        }
        Constant::Array {
            element_type,
            items,
        } => {
            w.keyword_sp("new");
            w.type_ref(element_type, defining);
            w.punct("[]");
            w.space();
            w.punct("{");
            w.space();
            if !items.is_empty() {
                w.separated(items, ",", |w, item| write_constant(w, item, defining));
                w.space();
            }
            w.punct("}");
        }
    }
}

/// Raw numeric form, used for enum member initializers
pub fn write_numeric(w: &mut TokenWriter<'_>, value: &Constant, defining: Option<&str>) {
    match value.as_i128() {
        Some(v) if !matches!(value, Constant::Char(_) | Constant::Bool(_)) => {
            w.literal(&v.to_string())
        }
        _ => write_constant(w, value, defining),
    }
}

fn write_enum(w: &mut TokenWriter<'_>, enum_type: &TypeRef, value: i128, defining: Option<&str>) {
    let members = w
        .index()
        .resolve(enum_type)
        .map(|t| t.enum_members.as_slice())
        .unwrap_or_default();

    match decompose_flags(members, value) {
        Some(names) => {
            for (i, name) in names.into_iter().enumerate() {
                if i > 0 {
                    w.space();
                    w.punct("|");
                    w.space();
                }
                w.type_ref(enum_type, defining);
                w.punct(".");
                w.member_name(name);
            }
        }
        None => w.literal(&value.to_string()),
    }
}

/// Names of the enum members reproducing `value`, in member order.
///
/// An exact member match wins. Otherwise every member whose bits all lie in
/// `value` is a candidate, and the candidates must OR back to `value`.
/// Candidates covered by the rest are then dropped, smallest first, so
/// composite members win over their parts. `None` if no combination of
/// members reproduces the value.
pub fn decompose_flags(members: &[(String, i128)], value: i128) -> Option<Vec<&str>> {
    if let Some((name, _)) = members.iter().find(|(_, v)| *v == value) {
        return Some(vec![name.as_str()]);
    }
    if value == 0 {
        return None;
    }

    let mut picked: Vec<usize> = members
        .iter()
        .enumerate()
        .filter(|(_, (_, v))| *v != 0 && (value & *v) == *v)
        .map(|(i, _)| i)
        .collect();
    let union = |indices: &[usize]| indices.iter().fold(0, |acc, &i| acc | members[i].1);
    if union(&picked) != value {
        return None;
    }

    let mut by_value = picked.clone();
    by_value.sort_by(|&a, &b| members[a].1.cmp(&members[b].1).then(a.cmp(&b)));
    for i in by_value {
        let rest: Vec<usize> = picked.iter().copied().filter(|&j| j != i).collect();
        if union(&rest) == value {
            picked = rest;
        }
    }

    Some(picked.into_iter().map(|i| members[i].0.as_str()).collect())
}

pub fn format_float(value: f64) -> String {
    if value.is_nan() {
        "double.NaN".to_string()
    } else if value.is_infinite() {
        if value > 0.0 {
            "double.PositiveInfinity".to_string()
        } else {
            "double.NegativeInfinity".to_string()
        }
    } else {
        format!("{}", value)
    }
}

pub fn escape_string(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            _ => push_escaped(&mut out, c),
        }
    }
    out
}

pub fn escape_char(c: char) -> String {
    let mut out = String::new();
    match c {
        '\'' => out.push_str("\\'"),
        _ => push_escaped(&mut out, c),
    }
    out
}

fn push_escaped(out: &mut String, c: char) {
    match c {
        '\\' => out.push_str("\\\\"),
        '\0' => out.push_str("\\0"),
        '\n' => out.push_str("\\n"),
        '\r' => out.push_str("\\r"),
        '\t' => out.push_str("\\t"),
        c if c.is_control() || is_invisible(c) => {
            let mut buf = [0u16; 2];
            for unit in c.encode_utf16(&mut buf) {
                out.push_str(&format!("\\u{:04X}", unit));
            }
        }
        c => out.push(c),
    }
}

/// Format and separator characters that would be invisible in output
fn is_invisible(c: char) -> bool {
    matches!(
        c,
        '\u{00AD}' | '\u{200B}'..='\u{200F}' | '\u{2028}'..='\u{202E}' | '\u{2060}'..='\u{2064}' | '\u{FEFF}'
    )
}
