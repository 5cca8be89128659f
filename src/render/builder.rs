//! Token stream builder
//!
//! Walks the symbol tree depth-first (namespace, type, nested type or member),
//! applying the ordering policy and visibility filter at every level, and
//! emits a flat token sequence plus a parallel navigation tree.

use super::constants::{write_constant, write_numeric};
use super::ids;
use super::index::DocumentIndex;
use super::ordering::OrderingPolicy;
use super::visibility::VisibilityFilter;
use super::writer::TokenWriter;
use crate::config::RenderPolicy;
use crate::error::BuildError;
use crate::models::navigation::{NavigationItem, NavigationKind};
use crate::models::symbol::{
    Accessibility, Accessors, Assembly, AttributeData, MemberKind, MemberSymbol,
    NamespaceSymbol, Parameter, Symbol, TypeKind, TypeParameter, TypeRef, TypeSymbol, Variance,
};
use crate::models::token::{Token, TokenKind};

/// Output of one build pass
#[derive(Debug, Clone)]
pub struct CodeFile {
    pub tokens: Vec<Token>,
    pub navigation: NavigationItem,
}

/// Immutable per-call context threaded through the traversal
#[derive(Debug, Clone, Copy)]
struct Scope<'s> {
    depth: usize,
    namespace: &'s str,
    container: Option<Container<'s>>,
    deprecated: bool,
}

/// The type whose body is being emitted
#[derive(Debug, Clone, Copy)]
struct Container<'s> {
    key: &'s str,
    id: &'s str,
    name: &'s str,
    kind: TypeKind,
}

impl<'s> Scope<'s> {
    fn root() -> Self {
        Self {
            depth: 0,
            namespace: "",
            container: None,
            deprecated: false,
        }
    }

    fn prefix(&self) -> &'s str {
        self.container.map(|c| c.key).unwrap_or(self.namespace)
    }

    fn defining(&self) -> Option<&'s str> {
        self.container.map(|c| c.id)
    }
}

pub struct TokenStreamBuilder<'a> {
    policy: &'a RenderPolicy,
    ordering: &'a dyn OrderingPolicy,
}

impl<'a> TokenStreamBuilder<'a> {
    pub fn new(policy: &'a RenderPolicy, ordering: &'a dyn OrderingPolicy) -> Self {
        Self { policy, ordering }
    }

    pub fn build(&self, assembly: &Assembly) -> Result<CodeFile, BuildError> {
        if assembly.name.trim().is_empty() {
            return Err(BuildError::UnnamedAssembly);
        }

        let namespaces = assembly.merged_namespaces();
        let filter = VisibilityFilter::for_document(self.policy, &namespaces);
        let index = DocumentIndex::build(&namespaces, &filter, self.ordering);
        let mut w = TokenWriter::new(&index, self.policy.indent_width);
        let mut root = NavigationItem::new(
            assembly.name.clone(),
            assembly.display_name(),
            NavigationKind::Assembly,
        );

        if self.policy.include_assembly_header {
            self.emit_assembly_header(&mut w, assembly, &filter);
        }

        let scope = Scope::root();
        for ns in self.ordering.order_namespaces(&namespaces) {
            self.emit_namespace(&mut w, ns, scope, &filter, &mut root.children)?;
        }

        debug_assert!(w.is_balanced(), "unbalanced block emission");
        tracing::debug!(
            "Built {} definitions for assembly {}",
            w.defined_count(),
            assembly.name
        );

        Ok(CodeFile {
            tokens: w.finish(),
            navigation: root,
        })
    }

    fn emit_assembly_header(
        &self,
        w: &mut TokenWriter<'_>,
        assembly: &Assembly,
        filter: &VisibilityFilter<'_>,
    ) {
        let mut header = format!("// Assembly: {}", assembly.name);
        if let Some(version) = &assembly.version {
            header.push_str(&format!(", Version={}", version));
        }
        w.marker(TokenKind::SkipDiffRangeStart);
        w.text(&header);
        w.marker(TokenKind::SkipDiffRangeEnd);
        w.newline();

        for attribute in filter.visible_attributes(&assembly.attributes) {
            w.punct("[");
            w.keyword("assembly");
            w.punct(":");
            w.space();
            self.emit_attribute_body(w, attribute, None);
            w.punct("]");
            w.newline();
        }
        w.newline();
    }

    /// Single dispatch point over the symbol variants
    fn emit_symbol(
        &self,
        w: &mut TokenWriter<'_>,
        symbol: &Symbol,
        scope: Scope<'_>,
        filter: &VisibilityFilter<'_>,
        nav: &mut Vec<NavigationItem>,
    ) -> Result<(), BuildError> {
        match symbol {
            Symbol::Namespace(ns) => self.emit_namespace(w, ns, scope, filter, nav),
            Symbol::Type(ty) => self.emit_type(w, ty, scope, filter, nav),
            Symbol::Member(member) => self.emit_member(w, member, scope, filter),
            Symbol::Attribute(attribute) => {
                if filter.is_attribute_visible(attribute) {
                    w.indent(scope.depth);
                    self.emit_attribute(w, attribute, scope.defining());
                }
                Ok(())
            }
            Symbol::Unknown => {
                tracing::warn!("Unsupported symbol under '{}', rendered as text", scope.prefix());
                self.emit_degraded(w, scope, "unsupported symbol");
                Ok(())
            }
        }
    }

    fn emit_degraded(&self, w: &mut TokenWriter<'_>, scope: Scope<'_>, what: &str) {
        w.indent(scope.depth);
        w.text(&format!("/* {} */", what));
        w.newline();
    }

    /// Namespaces are flattened: each one holding visible types gets its own
    /// top-level block, nested namespaces follow as siblings.
    fn emit_namespace(
        &self,
        w: &mut TokenWriter<'_>,
        ns: &NamespaceSymbol,
        scope: Scope<'_>,
        filter: &VisibilityFilter<'_>,
        nav: &mut Vec<NavigationItem>,
    ) -> Result<(), BuildError> {
        let qualified = ids::qualify(scope.namespace, &ns.name);
        if !filter.has_visible_types(ns) {
            tracing::trace!("Skipping namespace '{}' without visible types", qualified);
            return Ok(());
        }

        let ordered = self.ordering.order(&ns.members);
        let (namespaces, contents): (Vec<&Symbol>, Vec<&Symbol>) = ordered
            .into_iter()
            .partition(|s| matches!(s, Symbol::Namespace(_)));
        let contents: Vec<&Symbol> = contents
            .into_iter()
            .filter(|s| filter.is_visible(s))
            .collect();

        if !contents.is_empty() {
            if qualified.is_empty() {
                for symbol in contents {
                    self.emit_symbol(w, symbol, Scope::root(), filter, nav)?;
                }
            } else {
                let id = ids::namespace_id(&qualified);
                let mut item = NavigationItem::new(id, qualified.clone(), NavigationKind::Namespace);

                // namespace lines carry no definition id; only the outline links to them
                w.keyword_sp("namespace");
                w.type_name(&qualified, None);
                w.open_block();

                let inner = Scope {
                    depth: 1,
                    namespace: &qualified,
                    container: None,
                    deprecated: false,
                };
                for symbol in contents {
                    self.emit_symbol(w, symbol, inner, filter, &mut item.children)?;
                }
                w.close_block(0);
                nav.push(item);
            }
        }

        let sibling = Scope {
            namespace: &qualified,
            ..Scope::root()
        };
        for symbol in namespaces {
            self.emit_symbol(w, symbol, sibling, filter, nav)?;
        }
        Ok(())
    }

    fn emit_type(
        &self,
        w: &mut TokenWriter<'_>,
        ty: &TypeSymbol,
        scope: Scope<'_>,
        filter: &VisibilityFilter<'_>,
        nav: &mut Vec<NavigationItem>,
    ) -> Result<(), BuildError> {
        if !filter.is_type_visible(ty) {
            tracing::trace!("Skipping non-public type {}", ty.name);
            return Ok(());
        }

        let key = ids::qualify(scope.prefix(), &ty.metadata_name());
        let id = ids::type_id(&key);
        let mut item = NavigationItem::new(
            id.clone(),
            display_type_name(ty),
            NavigationKind::from(ty.type_kind),
        );

        let deprecated = !scope.deprecated && self.policy.is_deprecated(&ty.attributes);
        self.emit_documentation(w, ty.documentation.as_deref(), scope.depth);
        if deprecated {
            w.marker(TokenKind::DeprecatedRangeStart);
        }
        let defining = Some(id.as_str());
        self.emit_attributes(w, &ty.attributes, scope.depth, filter, defining);

        w.indent(scope.depth);
        if let Some(keyword) = ty.accessibility.keyword() {
            w.keyword_sp(keyword);
        }
        self.emit_type_modifiers(w, ty);
        match ty.type_kind.keyword() {
            Some(keyword) => w.keyword_sp(keyword),
            None => {
                tracing::warn!("Type {} has an unsupported kind, rendered as text", key);
                w.text("type");
                w.space();
            }
        }

        if ty.type_kind == TypeKind::Delegate {
            self.emit_delegate(w, ty, &id)?;
        } else {
            w.define(&id)?;
            w.type_name(&ty.name, None);
            self.emit_type_parameters(w, &ty.type_parameters);
            self.emit_base_list(w, ty, filter, defining);
            self.emit_constraints(w, &ty.type_parameters, defining);
            w.open_block();

            let inner = Scope {
                depth: scope.depth + 1,
                namespace: scope.namespace,
                container: Some(Container {
                    key: &key,
                    id: &id,
                    name: &ty.name,
                    kind: ty.type_kind,
                }),
                deprecated: scope.deprecated || deprecated,
            };
            let members = if ty.type_kind == TypeKind::Enum {
                self.ordering.order_enum_members(&ty.members)
            } else {
                self.ordering.order(&ty.members)
            };
            for member in members {
                self.emit_symbol(w, member, inner, filter, &mut item.children)?;
            }
            w.close_block(scope.depth);
        }

        if deprecated {
            w.marker(TokenKind::DeprecatedRangeEnd);
        }
        nav.push(item);
        Ok(())
    }

    fn emit_type_modifiers(&self, w: &mut TokenWriter<'_>, ty: &TypeSymbol) {
        let m = &ty.modifiers;
        match ty.type_kind {
            TypeKind::Class => {
                if m.is_static {
                    w.keyword_sp("static");
                } else if m.is_abstract {
                    w.keyword_sp("abstract");
                } else if m.is_sealed {
                    w.keyword_sp("sealed");
                }
            }
            TypeKind::Struct if m.is_readonly => w.keyword_sp("readonly"),
            _ => {}
        }
        if m.is_partial && matches!(ty.type_kind, TypeKind::Class | TypeKind::Struct) {
            w.keyword_sp("partial");
        }
    }

    fn emit_delegate(
        &self,
        w: &mut TokenWriter<'_>,
        ty: &TypeSymbol,
        id: &str,
    ) -> Result<(), BuildError> {
        let defining = Some(id);
        let invoke = ty.delegate_invoke.as_deref();
        match invoke.and_then(|m| m.return_type.as_ref()) {
            Some(ret) => w.type_ref(ret, defining),
            None => w.keyword("void"),
        }
        w.space();
        w.define(id)?;
        w.type_name(&ty.name, None);
        self.emit_type_parameters(w, &ty.type_parameters);
        w.punct("(");
        if let Some(invoke) = invoke {
            self.emit_parameters(w, &invoke.parameters, defining);
        }
        w.punct(")");
        self.emit_constraints(w, &ty.type_parameters, defining);
        w.punct(";");
        w.newline();
        Ok(())
    }

    fn emit_base_list(
        &self,
        w: &mut TokenWriter<'_>,
        ty: &TypeSymbol,
        filter: &VisibilityFilter<'_>,
        defining: Option<&str>,
    ) {
        let mut bases = Vec::new();
        if ty.type_kind == TypeKind::Enum {
            if let Some(underlying) = &ty.enum_underlying_type
                && !underlying.is("System.Int32")
            {
                bases.push(underlying);
            }
        } else {
            if let Some(base) = &ty.base_type {
                let implicit = ty
                    .type_kind
                    .implicit_base()
                    .is_some_and(|root| base.is(root));
                if !implicit && filter.is_reference_visible(base) {
                    bases.push(base);
                }
            }
            bases.extend(
                ty.interfaces
                    .iter()
                    .filter(|iface| filter.is_reference_visible(iface)),
            );
        }

        if bases.is_empty() {
            return;
        }
        w.space();
        w.punct(":");
        w.space();
        w.separated(bases, ",", |w, base| w.type_ref(base, defining));
    }

    fn emit_type_parameters(&self, w: &mut TokenWriter<'_>, parameters: &[TypeParameter]) {
        if parameters.is_empty() {
            return;
        }
        w.punct("<");
        w.separated(parameters, ",", |w, tp| {
            match tp.variance {
                Variance::In => w.keyword_sp("in"),
                Variance::Out => w.keyword_sp("out"),
                Variance::None => {}
            }
            w.type_name(&tp.name, None);
        });
        w.punct(">");
    }

    fn emit_constraints(
        &self,
        w: &mut TokenWriter<'_>,
        parameters: &[TypeParameter],
        defining: Option<&str>,
    ) {
        /// One entry of a `where` clause
        enum Constraint<'c> {
            Keyword(&'static str),
            Type(&'c TypeRef),
            Constructor,
        }

        for tp in parameters.iter().filter(|tp| tp.has_constraints()) {
            w.space();
            w.keyword_sp("where");
            w.type_name(&tp.name, None);
            w.space();
            w.punct(":");
            w.space();

            let mut items: Vec<Constraint<'_>> = Vec::new();
            if tp.reference_type {
                items.push(Constraint::Keyword("class"));
            }
            if tp.value_type {
                items.push(Constraint::Keyword("struct"));
            }
            items.extend(tp.constraints.iter().map(Constraint::Type));
            if tp.constructor && !tp.value_type {
                items.push(Constraint::Constructor);
            }
            w.separated(items, ",", |w, item| match item {
                Constraint::Keyword(keyword) => w.keyword(keyword),
                Constraint::Type(ty) => w.type_ref(ty, defining),
                Constraint::Constructor => {
                    w.keyword("new");
                    w.punct("(");
                    w.punct(")");
                }
            });
        }
    }

    fn emit_member(
        &self,
        w: &mut TokenWriter<'_>,
        member: &MemberSymbol,
        scope: Scope<'_>,
        filter: &VisibilityFilter<'_>,
    ) -> Result<(), BuildError> {
        if !filter.is_member_visible(member) {
            tracing::trace!("Skipping non-public member {}", member.name);
            return Ok(());
        }
        let Some(container) = scope.container else {
            tracing::warn!("Member {} declared outside a type, rendered as text", member.name);
            self.emit_degraded(w, scope, &member.name);
            return Ok(());
        };

        let id = ids::member_id(container.key, member);
        let defining = scope.defining();
        let deprecated = !scope.deprecated && self.policy.is_deprecated(&member.attributes);

        self.emit_documentation(w, member.documentation.as_deref(), scope.depth);
        if deprecated {
            w.marker(TokenKind::DeprecatedRangeStart);
        }
        self.emit_attributes(w, &member.attributes, scope.depth, filter, defining);
        w.indent(scope.depth);

        if container.kind == TypeKind::Enum && member.member_kind == MemberKind::Field {
            w.define(&id)?;
            w.member_name(&member.name);
            if let Some(value) = &member.constant {
                w.space();
                w.punct("=");
                w.space();
                write_numeric(w, value, defining);
            }
            w.punct(",");
            w.newline();
        } else {
            self.emit_member_modifiers(w, member, container.kind);
            match member.member_kind {
                MemberKind::Field => self.emit_field(w, member, &id, defining)?,
                MemberKind::Event => {
                    w.keyword_sp("event");
                    self.emit_typed_name(w, member, &id, defining)?;
                    w.punct(";");
                    w.newline();
                }
                MemberKind::Property | MemberKind::Indexer => {
                    self.emit_property(w, member, &id, container.kind, defining)?
                }
                MemberKind::Constructor => {
                    w.define(&id)?;
                    w.member_name(container.name);
                    self.emit_parameter_list(w, member, defining);
                    self.emit_body(w, member, container.kind);
                }
                MemberKind::Method => {
                    self.emit_return_type(w, member, defining);
                    w.space();
                    self.emit_member_name(w, member, &id, defining)?;
                    self.emit_type_parameters(w, &member.type_parameters);
                    self.emit_parameter_list(w, member, defining);
                    self.emit_constraints(w, &member.type_parameters, defining);
                    self.emit_body(w, member, container.kind);
                }
                MemberKind::Operator => {
                    self.emit_return_type(w, member, defining);
                    w.space();
                    w.keyword_sp("operator");
                    w.define(&id)?;
                    match operator_token(&member.name) {
                        Some(op) => w.member_name(op),
                        None => w.text(&member.name),
                    }
                    self.emit_parameter_list(w, member, defining);
                    self.emit_body(w, member, container.kind);
                }
                MemberKind::Conversion => {
                    let direction = if member.name == "op_Explicit" {
                        "explicit"
                    } else {
                        "implicit"
                    };
                    w.keyword_sp(direction);
                    w.keyword_sp("operator");
                    w.define(&id)?;
                    self.emit_return_type(w, member, defining);
                    self.emit_parameter_list(w, member, defining);
                    self.emit_body(w, member, container.kind);
                }
                MemberKind::Unknown => {
                    tracing::warn!("Member {} has an unsupported kind, rendered as text", id);
                    w.define(&id)?;
                    w.text(&member.name);
                    w.punct(";");
                    w.newline();
                }
            }
        }

        if deprecated {
            w.marker(TokenKind::DeprecatedRangeEnd);
        }
        Ok(())
    }

    fn effective_accessibility(
        &self,
        member: &MemberSymbol,
        container: TypeKind,
    ) -> Option<&'static str> {
        if matches!(container, TypeKind::Interface | TypeKind::Enum)
            || member.explicit_interface.is_some()
        {
            return None;
        }
        match member.accessibility {
            Accessibility::ProtectedOrInternal if member.modifiers.is_override => {
                Accessibility::Protected.keyword()
            }
            other => other.keyword(),
        }
    }

    fn emit_member_modifiers(&self, w: &mut TokenWriter<'_>, member: &MemberSymbol, container: TypeKind) {
        if let Some(keyword) = self.effective_accessibility(member, container) {
            w.keyword_sp(keyword);
        }
        let m = &member.modifiers;
        let in_interface = container == TypeKind::Interface;
        if m.is_new {
            w.keyword_sp("new");
        }
        if m.is_const {
            w.keyword_sp("const");
            return;
        }
        if m.is_static {
            w.keyword_sp("static");
        }
        if m.is_abstract && !in_interface {
            w.keyword_sp("abstract");
        } else if m.is_override {
            if m.is_sealed {
                w.keyword_sp("sealed");
            }
            w.keyword_sp("override");
        } else if m.is_virtual && !in_interface {
            w.keyword_sp("virtual");
        }
        if m.is_readonly {
            w.keyword_sp("readonly");
        }
        if m.is_extern {
            w.keyword_sp("extern");
        }
    }

    fn emit_return_type(&self, w: &mut TokenWriter<'_>, member: &MemberSymbol, defining: Option<&str>) {
        match &member.return_type {
            Some(ret) => w.type_ref(ret, defining),
            None => w.keyword("void"),
        }
    }

    /// Name at the declaration point, qualified for explicit implementations
    fn emit_member_name(
        &self,
        w: &mut TokenWriter<'_>,
        member: &MemberSymbol,
        id: &str,
        defining: Option<&str>,
    ) -> Result<(), BuildError> {
        w.define(id)?;
        match &member.explicit_interface {
            Some(iface) => {
                w.type_ref(iface, defining);
                w.punct(".");
                let simple = member.name.rsplit('.').next().unwrap_or(&member.name);
                w.member_name(simple);
            }
            None => w.member_name(&member.name),
        }
        Ok(())
    }

    fn emit_typed_name(
        &self,
        w: &mut TokenWriter<'_>,
        member: &MemberSymbol,
        id: &str,
        defining: Option<&str>,
    ) -> Result<(), BuildError> {
        match &member.return_type {
            Some(ty) => w.type_ref(ty, defining),
            None => w.keyword("object"),
        }
        w.space();
        self.emit_member_name(w, member, id, defining)
    }

    fn emit_field(
        &self,
        w: &mut TokenWriter<'_>,
        member: &MemberSymbol,
        id: &str,
        defining: Option<&str>,
    ) -> Result<(), BuildError> {
        self.emit_typed_name(w, member, id, defining)?;
        if member.modifiers.is_const
            && let Some(value) = &member.constant
        {
            w.space();
            w.punct("=");
            w.space();
            let skip_diff = self.policy.is_skip_diff_constant(&member.name);
            if skip_diff {
                w.marker(TokenKind::SkipDiffRangeStart);
            }
            write_constant(w, value, defining);
            if skip_diff {
                w.marker(TokenKind::SkipDiffRangeEnd);
            }
        }
        w.punct(";");
        w.newline();
        Ok(())
    }

    fn emit_property(
        &self,
        w: &mut TokenWriter<'_>,
        member: &MemberSymbol,
        id: &str,
        container: TypeKind,
        defining: Option<&str>,
    ) -> Result<(), BuildError> {
        match &member.return_type {
            Some(ty) => w.type_ref(ty, defining),
            None => w.keyword("object"),
        }
        w.space();
        if member.member_kind == MemberKind::Indexer {
            w.define(id)?;
            if let Some(iface) = &member.explicit_interface {
                w.type_ref(iface, defining);
                w.punct(".");
            }
            w.keyword("this");
            w.punct("[");
            self.emit_parameters(w, &member.parameters, defining);
            w.punct("]");
        } else {
            self.emit_member_name(w, member, id, defining)?;
        }

        let default_accessors = Accessors {
            get: Some(member.accessibility),
            ..Accessors::default()
        };
        let accessors = member.accessors.as_ref().unwrap_or(&default_accessors);
        let bodies = self.policy.accessor_bodies
            && !member.modifiers.is_abstract
            && container != TypeKind::Interface;

        w.space();
        w.punct("{");
        if let Some(get) = accessors.get.filter(|a| self.accessor_visible(member, *a)) {
            w.space();
            self.emit_accessor_keyword(w, member, get);
            w.keyword("get");
            if bodies {
                self.emit_stub(w);
            } else {
                w.punct(";");
            }
        }
        if let Some(set) = accessors.set.filter(|a| self.accessor_visible(member, *a)) {
            w.space();
            self.emit_accessor_keyword(w, member, set);
            w.keyword(if accessors.init_only { "init" } else { "set" });
            if bodies {
                w.space();
                w.punct("{");
                w.space();
                w.punct("}");
            } else {
                w.punct(";");
            }
        }
        w.space();
        w.punct("}");
        w.newline();
        Ok(())
    }

    fn accessor_visible(&self, member: &MemberSymbol, accessor: Accessibility) -> bool {
        accessor.is_public_surface()
            || accessor == Accessibility::NotApplicable
            || member.explicit_interface.is_some()
    }

    fn emit_accessor_keyword(&self, w: &mut TokenWriter<'_>, member: &MemberSymbol, accessor: Accessibility) {
        if accessor != member.accessibility
            && member.explicit_interface.is_none()
            && let Some(keyword) = accessor.keyword()
        {
            w.keyword_sp(keyword);
        }
    }

    fn emit_parameter_list(&self, w: &mut TokenWriter<'_>, member: &MemberSymbol, defining: Option<&str>) {
        w.punct("(");
        self.emit_parameters(w, &member.parameters, defining);
        w.punct(")");
    }

    fn emit_parameters(&self, w: &mut TokenWriter<'_>, parameters: &[Parameter], defining: Option<&str>) {
        w.separated(parameters, ",", |w, p| {
            if p.this {
                w.keyword_sp("this");
            }
            if p.params {
                w.keyword_sp("params");
            }
            if let Some(keyword) = p.ref_kind.keyword() {
                w.keyword_sp(keyword);
            }
            w.type_ref(&p.ty, defining);
            w.space();
            w.text(&p.name);
            if let Some(default) = &p.default {
                w.space();
                w.punct("=");
                w.space();
                write_constant(w, default, defining);
            }
        });
    }

    /// `;` for members without an implementation, the stub body otherwise
    fn emit_body(&self, w: &mut TokenWriter<'_>, member: &MemberSymbol, container: TypeKind) {
        let m = &member.modifiers;
        let bodiless = m.is_abstract
            || m.is_extern
            || (container == TypeKind::Interface && !m.is_static && !m.is_virtual);
        if bodiless {
            w.punct(";");
        } else {
            self.emit_stub(w);
        }
        w.newline();
    }

    fn emit_stub(&self, w: &mut TokenWriter<'_>) {
        w.space();
        w.punct("{");
        w.space();
        if !self.policy.stub_body.is_empty() {
            w.text(&self.policy.stub_body);
            w.space();
        }
        w.punct("}");
    }

    fn emit_documentation(&self, w: &mut TokenWriter<'_>, documentation: Option<&str>, depth: usize) {
        let Some(doc) = documentation.filter(|d| !d.trim().is_empty()) else {
            return;
        };
        if !self.policy.include_documentation {
            return;
        }
        w.marker(TokenKind::DocumentationRangeStart);
        for line in doc.trim().lines() {
            w.indent(depth);
            let line = line.trim_end();
            if line.is_empty() {
                w.text("///");
            } else {
                w.text(&format!("/// {}", line));
            }
            w.newline();
        }
        w.marker(TokenKind::DocumentationRangeEnd);
    }

    fn emit_attributes(
        &self,
        w: &mut TokenWriter<'_>,
        attributes: &[AttributeData],
        depth: usize,
        filter: &VisibilityFilter<'_>,
        defining: Option<&str>,
    ) {
        for attribute in filter.visible_attributes(attributes) {
            w.indent(depth);
            self.emit_attribute(w, attribute, defining);
        }
    }

    fn emit_attribute(&self, w: &mut TokenWriter<'_>, attribute: &AttributeData, defining: Option<&str>) {
        w.punct("[");
        self.emit_attribute_body(w, attribute, defining);
        w.punct("]");
        w.newline();
    }

    fn emit_attribute_body(&self, w: &mut TokenWriter<'_>, attribute: &AttributeData, defining: Option<&str>) {
        let navigate_to = w.index().navigate_to(&attribute.attribute_type, defining);
        w.type_name(attribute.short_name(), navigate_to);

        if attribute.arguments.is_empty() && attribute.named_arguments.is_empty() {
            return;
        }
        w.punct("(");
        w.separated(&attribute.arguments, ",", |w, arg| write_constant(w, arg, defining));
        if !attribute.arguments.is_empty() && !attribute.named_arguments.is_empty() {
            w.punct(",");
            w.space();
        }
        w.separated(&attribute.named_arguments, ",", |w, named| {
            w.text(&named.name);
            w.space();
            w.punct("=");
            w.space();
            write_constant(w, &named.value, defining);
        });
        w.punct(")");
    }
}

fn display_type_name(ty: &TypeSymbol) -> String {
    if ty.type_parameters.is_empty() {
        ty.name.clone()
    } else {
        let params: Vec<&str> = ty.type_parameters.iter().map(|t| t.name.as_str()).collect();
        format!("{}<{}>", ty.name, params.join(", "))
    }
}

/// Source operator for an operator method's metadata name
fn operator_token(name: &str) -> Option<&'static str> {
    let token = match name {
        "op_Addition" | "op_UnaryPlus" => "+",
        "op_Subtraction" | "op_UnaryNegation" => "-",
        "op_Multiply" => "*",
        "op_Division" => "/",
        "op_Modulus" => "%",
        "op_Equality" => "==",
        "op_Inequality" => "!=",
        "op_LessThan" => "<",
        "op_GreaterThan" => ">",
        "op_LessThanOrEqual" => "<=",
        "op_GreaterThanOrEqual" => ">=",
        "op_BitwiseAnd" => "&",
        "op_BitwiseOr" => "|",
        "op_ExclusiveOr" => "^",
        "op_LeftShift" => "<<",
        "op_RightShift" => ">>",
        "op_UnsignedRightShift" => ">>>",
        "op_LogicalNot" => "!",
        "op_OnesComplement" => "~",
        "op_Increment" => "++",
        "op_Decrement" => "--",
        "op_True" => "true",
        "op_False" => "false",
        _ => return None,
    };
    Some(token)
}
