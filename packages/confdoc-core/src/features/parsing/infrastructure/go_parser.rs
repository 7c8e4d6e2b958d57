//! Go declaration parser
//!
//! This is where the tree-sitter dependency lives. It walks one file's syntax
//! tree and collects imports, type declarations, methods and string constants
//! into a `SourceUnit`.

use tree_sitter::{Node as TSNode, Parser as TSParser};

use super::comments::{doc_from_comments, CommentGroup, DocComment};
use crate::features::parsing::domain::{
    ConstExpr, Import, MethodSig, RawField, RawMethod, RawTypeDecl, ReceiverKind, SourceUnit,
    TypeExpr,
};
use crate::features::parsing::ports::DeclarationParser;
use crate::shared::models::{ConfdocError, Result, Span};
use crate::shared::utils::{collapse_whitespace, unquote};

/// Convert tree-sitter positions into `Span`
pub trait SpanExt {
    fn to_span(&self) -> Span;
}

impl SpanExt for TSNode<'_> {
    fn to_span(&self) -> Span {
        Span::new(
            self.start_position().row as u32 + 1,
            self.start_position().column as u32,
            self.end_position().row as u32 + 1,
            self.end_position().column as u32,
        )
    }
}

/// Tree-sitter based Go parser
pub struct GoDeclarationParser;

impl GoDeclarationParser {
    pub fn new() -> Self {
        Self
    }
}

impl Default for GoDeclarationParser {
    fn default() -> Self {
        Self::new()
    }
}

impl DeclarationParser for GoDeclarationParser {
    fn parse_unit(&self, source: &str, file_path: &str) -> Result<SourceUnit> {
        let mut parser = TSParser::new();
        parser
            .set_language(&tree_sitter_go::language())
            .map_err(|e| ConfdocError::internal(format!("Failed to set language: {}", e)))?;

        let tree = parser
            .parse(source, None)
            .ok_or_else(|| ConfdocError::load("Failed to parse source code").with_file(file_path))?;

        let root = tree.root_node();
        if root.has_error() {
            let (kind, span) = first_error(&root)
                .map(|n| (n.kind().to_string(), n.to_span()))
                .unwrap_or_else(|| (root.kind().to_string(), root.to_span()));
            return Err(ConfdocError::load(format!("Syntax error at {:?}", kind))
                .with_file(file_path)
                .with_line(span.start_line));
        }

        let mut extractor = UnitExtractor::new(source, file_path);
        extractor.extract(&root);
        Ok(extractor.unit)
    }

    fn supports_extension(&self, ext: &str) -> bool {
        ext == "go"
    }

    fn language_name(&self) -> &'static str {
        "go"
    }
}

fn first_error<'t>(node: &TSNode<'t>) -> Option<TSNode<'t>> {
    if node.is_error() || node.is_missing() {
        return Some(*node);
    }
    if !node.has_error() {
        return None;
    }
    let mut cursor = node.walk();
    let children: Vec<TSNode<'t>> = node.children(&mut cursor).collect();
    children.iter().find_map(first_error)
}

fn named_children<'t>(node: &TSNode<'t>) -> Vec<TSNode<'t>> {
    let mut cursor = node.walk();
    let children = node.named_children(&mut cursor).collect();
    children
}

/// Walks one file and fills a `SourceUnit`
struct UnitExtractor<'s> {
    source: &'s str,
    unit: SourceUnit,
}

impl<'s> UnitExtractor<'s> {
    fn new(source: &'s str, file_path: &str) -> Self {
        Self {
            source,
            unit: SourceUnit::new(file_path),
        }
    }

    fn text(&self, node: &TSNode) -> &'s str {
        self.source.get(node.byte_range()).unwrap_or("")
    }

    fn field_text(&self, node: &TSNode, field: &str) -> Option<&'s str> {
        node.child_by_field_name(field).map(|n| self.text(&n))
    }

    fn extract(&mut self, root: &TSNode) {
        let mut comments = CommentGroup::new();

        for child in named_children(root) {
            match child.kind() {
                "comment" => comments.push(self.text(&child), child.to_span()),
                "package_clause" => {
                    if let Some(name) = named_children(&child)
                        .iter()
                        .find(|n| n.kind() == "package_identifier")
                    {
                        self.unit.package_name = self.text(name).to_string();
                    }
                    comments.clear();
                }
                "import_declaration" => {
                    self.extract_imports(&child);
                    comments.clear();
                }
                "type_declaration" => {
                    let doc = comments.take_above(&child.to_span());
                    self.extract_type_declaration(&child, doc);
                }
                "method_declaration" => {
                    self.extract_method(&child);
                    comments.clear();
                }
                "const_declaration" => {
                    self.extract_consts(&child);
                    comments.clear();
                }
                _ => comments.clear(),
            }
        }
    }

    // ═══════════════════════════════════════════════════════════════════
    // Imports
    // ═══════════════════════════════════════════════════════════════════

    fn extract_imports(&mut self, node: &TSNode) {
        for child in named_children(node) {
            match child.kind() {
                "import_spec" => self.extract_import_spec(&child),
                "import_spec_list" => {
                    for spec in named_children(&child) {
                        if spec.kind() == "import_spec" {
                            self.extract_import_spec(&spec);
                        }
                    }
                }
                _ => {}
            }
        }
    }

    fn extract_import_spec(&mut self, node: &TSNode) {
        let Some(path) = self.field_text(node, "path").and_then(unquote) else {
            return;
        };

        let alias = match node.child_by_field_name("name") {
            None => None,
            Some(name) if name.kind() == "package_identifier" => Some(self.text(&name).to_string()),
            // Dot and blank imports never qualify a type name
            Some(_) => return,
        };

        self.unit.imports.push(Import { alias, path });
    }

    // ═══════════════════════════════════════════════════════════════════
    // Types
    // ═══════════════════════════════════════════════════════════════════

    fn extract_type_declaration(&mut self, node: &TSNode, outer_doc: Option<DocComment>) {
        let children = named_children(node);
        let spec_count = children
            .iter()
            .filter(|c| matches!(c.kind(), "type_spec" | "type_alias"))
            .count();

        let mut comments = CommentGroup::new();
        for child in children {
            match child.kind() {
                "comment" => comments.push(self.text(&child), child.to_span()),
                "type_spec" | "type_alias" => {
                    let own = comments.take_above(&child.to_span());
                    let doc = own.or_else(|| {
                        if spec_count == 1 {
                            outer_doc.clone()
                        } else {
                            None
                        }
                    });
                    self.extract_type_spec(&child, doc.unwrap_or_default());
                }
                _ => comments.clear(),
            }
        }
    }

    fn extract_type_spec(&mut self, node: &TSNode, doc: DocComment) {
        let name = self.field_text(node, "name").unwrap_or_default().to_string();
        let Some(type_node) = node.child_by_field_name("type") else {
            return;
        };
        if name.is_empty() {
            return;
        }

        let ty = self.type_expr(&type_node);
        self.unit.types.push(RawTypeDecl {
            name,
            doc: doc.text,
            description: doc.description,
            ty,
            is_alias: node.kind() == "type_alias",
            span: node.to_span(),
        });
    }

    fn type_expr(&self, node: &TSNode) -> TypeExpr {
        match node.kind() {
            "type_identifier" => TypeExpr::Ident(self.text(node).to_string()),
            "qualified_type" => match (
                self.field_text(node, "package"),
                self.field_text(node, "name"),
            ) {
                (Some(qualifier), Some(name)) => TypeExpr::Qualified {
                    qualifier: qualifier.to_string(),
                    name: name.to_string(),
                },
                _ => TypeExpr::Opaque(self.type_text(node)),
            },
            "pointer_type" => match first_type_child(node) {
                Some(inner) => TypeExpr::Pointer(Box::new(self.type_expr(&inner))),
                None => TypeExpr::Opaque(self.type_text(node)),
            },
            "slice_type" | "array_type" | "implicit_length_array_type" => {
                match node.child_by_field_name("element") {
                    Some(element) => TypeExpr::Sequence(Box::new(self.type_expr(&element))),
                    None => TypeExpr::Opaque(self.type_text(node)),
                }
            }
            "parenthesized_type" => match first_type_child(node) {
                Some(inner) => self.type_expr(&inner),
                None => TypeExpr::Opaque(self.type_text(node)),
            },
            "struct_type" => TypeExpr::Struct(self.struct_fields(node)),
            "interface_type" => self.interface_expr(node),
            // map, chan, func, generic instantiations
            _ => TypeExpr::Opaque(self.type_text(node)),
        }
    }

    fn type_text(&self, node: &TSNode) -> String {
        collapse_whitespace(self.text(node))
    }

    fn struct_fields(&self, node: &TSNode) -> Vec<RawField> {
        let mut fields: Vec<RawField> = Vec::new();
        let Some(list) = named_children(node)
            .into_iter()
            .find(|c| c.kind() == "field_declaration_list")
        else {
            return fields;
        };

        let mut comments = CommentGroup::new();
        for child in named_children(&list) {
            match child.kind() {
                "comment" => {
                    let span = child.to_span();
                    match fields.last_mut() {
                        // Trailing comment on the previous field's line
                        Some(last) if last.span.end_line == span.start_line => {
                            if last.doc.is_empty() {
                                last.doc = doc_from_comments(&[self.text(&child)]).text;
                            }
                        }
                        _ => comments.push(self.text(&child), span),
                    }
                }
                "field_declaration" => {
                    let doc = comments
                        .take_above(&child.to_span())
                        .map(|d| d.text)
                        .unwrap_or_default();
                    if let Some(field) = self.field(&child, doc) {
                        fields.push(field);
                    }
                }
                _ => comments.clear(),
            }
        }

        fields
    }

    fn field(&self, node: &TSNode, doc: String) -> Option<RawField> {
        let type_node = node.child_by_field_name("type")?;

        let mut cursor = node.walk();
        let names: Vec<String> = node
            .children_by_field_name("name", &mut cursor)
            .map(|n| self.text(&n).to_string())
            .collect();

        let mut ty = self.type_expr(&type_node);
        if names.is_empty() {
            // Embedded `*T` carries the star as a bare token of the declaration
            let mut cursor = node.walk();
            let starred = node.children(&mut cursor).any(|c| c.kind() == "*");
            if starred {
                ty = TypeExpr::Pointer(Box::new(ty));
            }
        }

        let tag = node
            .child_by_field_name("tag")
            .and_then(|t| unquote(self.text(&t)));

        Some(RawField {
            names,
            doc,
            tag,
            ty,
            span: node.to_span(),
        })
    }

    fn interface_expr(&self, node: &TSNode) -> TypeExpr {
        let mut methods = Vec::new();
        let mut embedded = Vec::new();

        let mut elems = Vec::new();
        for child in named_children(node) {
            // Older grammars wrap the body in a `method_spec_list`
            if child.kind().ends_with("_list") {
                elems.extend(named_children(&child));
            } else {
                elems.push(child);
            }
        }

        for elem in elems {
            match elem.kind() {
                "method_spec" | "method_elem" => {
                    let name = self.field_text(&elem, "name").unwrap_or_default();
                    if !name.is_empty() {
                        methods.push(self.signature(name, &elem));
                    }
                }
                "type_identifier" | "qualified_type" => embedded.push(self.type_expr(&elem)),
                "type_elem" | "interface_type_name" | "constraint_elem" => {
                    for inner in named_children(&elem) {
                        if matches!(inner.kind(), "type_identifier" | "qualified_type") {
                            embedded.push(self.type_expr(&inner));
                        }
                    }
                }
                _ => {}
            }
        }

        TypeExpr::Interface { methods, embedded }
    }

    // ═══════════════════════════════════════════════════════════════════
    // Methods
    // ═══════════════════════════════════════════════════════════════════

    /// Signature of a method declaration or interface method element
    fn signature(&self, name: &str, node: &TSNode) -> MethodSig {
        let params = node
            .child_by_field_name("parameters")
            .map(|p| self.parameter_types(&p))
            .unwrap_or_default();

        let results = match node.child_by_field_name("result") {
            None => Vec::new(),
            Some(result) if result.kind() == "parameter_list" => self.parameter_types(&result),
            Some(result) => vec![self.type_text(&result)],
        };

        MethodSig::new(name, params, results)
    }

    fn parameter_types(&self, list: &TSNode) -> Vec<String> {
        let mut types = Vec::new();
        for param in named_children(list) {
            let Some(type_node) = param.child_by_field_name("type") else {
                continue;
            };
            let ty = self.type_text(&type_node);
            match param.kind() {
                "parameter_declaration" => {
                    let mut cursor = param.walk();
                    let names = param.children_by_field_name("name", &mut cursor).count();
                    for _ in 0..names.max(1) {
                        types.push(ty.clone());
                    }
                }
                "variadic_parameter_declaration" => types.push(format!("...{}", ty)),
                _ => {}
            }
        }
        types
    }

    fn extract_method(&mut self, node: &TSNode) {
        let Some(name) = self.field_text(node, "name") else {
            return;
        };
        let Some((receiver, receiver_kind)) = node
            .child_by_field_name("receiver")
            .and_then(|r| self.receiver(&r))
        else {
            return;
        };

        let signature = self.signature(name, node);
        let returned = node
            .child_by_field_name("body")
            .and_then(|body| self.single_return(&body));

        self.unit.methods.push(RawMethod {
            receiver,
            receiver_kind,
            signature,
            returned,
            span: node.to_span(),
        });
    }

    /// Base type name and form of a receiver list such as `(c *Conf)`
    fn receiver(&self, list: &TSNode) -> Option<(String, ReceiverKind)> {
        let param = named_children(list)
            .into_iter()
            .find(|p| p.kind() == "parameter_declaration")?;
        let mut type_node = param.child_by_field_name("type")?;

        let mut kind = ReceiverKind::Value;
        if type_node.kind() == "pointer_type" {
            kind = ReceiverKind::Pointer;
            type_node = first_type_child(&type_node)?;
        }
        if type_node.kind() == "generic_type" {
            type_node = type_node.child_by_field_name("type")?;
        }

        match type_node.kind() {
            "type_identifier" => Some((self.text(&type_node).to_string(), kind)),
            _ => None,
        }
    }

    /// Expression of a body made of exactly one `return <expr>`
    fn single_return(&self, block: &TSNode) -> Option<ConstExpr> {
        let mut statements = Vec::new();
        for child in named_children(block) {
            match child.kind() {
                "comment" => {}
                "statement_list" => statements.extend(
                    named_children(&child)
                        .into_iter()
                        .filter(|s| s.kind() != "comment"),
                ),
                _ => statements.push(child),
            }
        }

        let [statement] = statements.as_slice() else {
            return None;
        };
        if statement.kind() != "return_statement" {
            return None;
        }

        let list = named_children(statement)
            .into_iter()
            .find(|c| c.kind() == "expression_list")?;
        match named_children(&list).as_slice() {
            [expr] => Some(self.const_expr(expr)),
            _ => None,
        }
    }

    // ═══════════════════════════════════════════════════════════════════
    // Constants
    // ═══════════════════════════════════════════════════════════════════

    fn extract_consts(&mut self, node: &TSNode) {
        let mut specs = Vec::new();
        for child in named_children(node) {
            match child.kind() {
                "const_spec" => specs.push(child),
                "const_spec_list" => specs.extend(
                    named_children(&child)
                        .into_iter()
                        .filter(|c| c.kind() == "const_spec"),
                ),
                _ => {}
            }
        }

        for spec in specs {
            let mut cursor = spec.walk();
            let names: Vec<String> = spec
                .children_by_field_name("name", &mut cursor)
                .map(|n| self.text(&n).to_string())
                .collect();
            let values = spec
                .child_by_field_name("value")
                .map(|v| named_children(&v))
                .unwrap_or_default();

            if names.len() != values.len() {
                continue;
            }
            for (name, value) in names.into_iter().zip(values.iter()) {
                let expr = self.const_expr(value);
                self.unit.consts.push((name, expr));
            }
        }
    }

    fn const_expr(&self, node: &TSNode) -> ConstExpr {
        match node.kind() {
            "interpreted_string_literal" | "raw_string_literal" => match unquote(self.text(node)) {
                Some(value) => ConstExpr::Literal(value),
                None => ConstExpr::Unknown(self.text(node).to_string()),
            },
            "identifier" => ConstExpr::Local(self.text(node).to_string()),
            "selector_expression" => {
                let operand = node.child_by_field_name("operand");
                match (operand, self.field_text(node, "field")) {
                    (Some(operand), Some(field)) if operand.kind() == "identifier" => {
                        ConstExpr::Qualified {
                            package: self.text(&operand).to_string(),
                            name: field.to_string(),
                        }
                    }
                    _ => ConstExpr::Unknown(self.text(node).to_string()),
                }
            }
            "binary_expression" if self.field_text(node, "operator") == Some("+") => {
                match (
                    node.child_by_field_name("left"),
                    node.child_by_field_name("right"),
                ) {
                    (Some(left), Some(right)) => ConstExpr::Concat(
                        Box::new(self.const_expr(&left)),
                        Box::new(self.const_expr(&right)),
                    ),
                    _ => ConstExpr::Unknown(self.text(node).to_string()),
                }
            }
            "parenthesized_expression" => match named_children(node).first() {
                Some(inner) => self.const_expr(inner),
                None => ConstExpr::Unknown(self.text(node).to_string()),
            },
            _ => ConstExpr::Unknown(self.text(node).to_string()),
        }
    }
}

/// First named child that is not a comment
fn first_type_child<'t>(node: &TSNode<'t>) -> Option<TSNode<'t>> {
    named_children(node)
        .into_iter()
        .find(|c| c.kind() != "comment")
}
