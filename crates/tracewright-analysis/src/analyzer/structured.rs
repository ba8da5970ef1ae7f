//! Structured (tree-sitter) Source Analyzer strategy. spec.md §4.C1: "a
//! structured strategy using tree-sitter for languages it has a grammar
//! for". The oracle-JSON fallback lives in `super::oracle_strategy`.

use rustc_hash::FxHashMap;
use tracewright_core::{Anchor, FunctionId, FunctionRecord, ParseError, ProbeKind, ProbeSite};
use tree_sitter::{Node, Parser};

use super::line_index::{point_to_line_col, LineIndex};
use super::visitor;
use crate::grammar::LanguageGrammar;

pub struct StructuredAnalysis {
    pub functions: Vec<FunctionRecord>,
    pub raw_sites: FxHashMap<FunctionId, Vec<ProbeSite>>,
}

/// Walk the tree enumerating functions in post-order (children pushed
/// before their enclosing parent) so the caller can fold nested sites
/// upward with a single forward pass (spec.md §4.C1 nested policy).
struct Walker<'a> {
    grammar: &'a dyn LanguageGrammar,
    source: &'a [u8],
    line_index: &'a LineIndex,
    next_id: u32,
    functions: Vec<FunctionRecord>,
    raw_sites: FxHashMap<FunctionId, Vec<ProbeSite>>,
}

impl<'a> Walker<'a> {
    fn fresh_id(&mut self) -> FunctionId {
        let id = FunctionId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Recurse looking for function nodes. `enclosing` is the id of the
    /// nearest function ancestor already pushed, if any.
    fn visit(&mut self, node: Node, enclosing: Option<FunctionId>) {
        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            if self.grammar.function_kinds().contains(&child.kind()) {
                self.visit_function(child, enclosing);
            } else {
                self.visit(child, enclosing);
            }
        }
    }

    fn visit_function(&mut self, func_node: Node, parent: Option<FunctionId>) {
        let id = self.fresh_id();

        // Descend first so nested function records are pushed before this one.
        let body = func_node.child_by_field_name("body");
        if let Some(body) = body {
            self.visit(body, Some(id));
        }

        let mut own_sites = Vec::new();
        if let Some(body) = body {
            visitor::collect_sites(self.grammar, self.source, self.line_index, body, &mut own_sites);
        }

        let name = func_node
            .child_by_field_name("name")
            .map(|n| n.utf8_text(self.source).unwrap_or("").to_string())
            .unwrap_or_else(|| format!("<anonymous@{}>", func_node.start_byte()));

        let param_names = func_node
            .child_by_field_name("parameters")
            .map(|params| collect_identifiers(params, self.source))
            .unwrap_or_default();

        let signature_end = body.map(|b| b.start_byte()).unwrap_or(func_node.end_byte());
        let signature_text = String::from_utf8_lossy(&self.source[func_node.start_byte()..signature_end])
            .trim_end()
            .to_string();

        let (start_line, _) = point_to_line_col(func_node.start_position());
        let (end_line, _) = point_to_line_col(func_node.end_position());
        let span_bytes = self.source[func_node.start_byte()..func_node.end_byte()].to_vec();
        let indent_prefix = self.line_index.indent_prefix(self.source, func_node.start_byte());

        let entry_token = format!("func-{}", func_node.start_byte());
        if let Some(body) = body {
            let first = visitor_first_or(body);

            // One-line function (spec.md §4.C1's one-line case, scenario S1):
            // the first body statement shares the signature's own line, so
            // anchoring Before it would place the probe above the signature,
            // outside the function. Anchor after the signature's colon/brace
            // instead.
            let (entry_line, entry_column, entry_anchor) = if first.start_position().row == func_node.start_position().row {
                let (line, column) = point_to_line_col(body.start_position());
                (line, column, Anchor::After)
            } else {
                let (line, column) = point_to_line_col(first.start_position());
                (line, column, Anchor::Before)
            };

            own_sites.push(ProbeSite {
                kind: ProbeKind::FuncEntry { param_names: param_names.clone() },
                line: entry_line,
                column: entry_column,
                anchor: entry_anchor,
                correlation_token: format!("{entry_token}:{}", first.start_byte()),
            });

            // Fall-through exit: guarantees a func_exit is reachable even
            // when the body has no explicit return statement.
            if !own_sites.iter().any(|s| matches!(s.kind, ProbeKind::FuncExit)) {
                own_sites.push(ProbeSite {
                    kind: ProbeKind::FuncExit,
                    line: point_to_line_col(body.end_position()).0,
                    column: point_to_line_col(body.end_position()).1,
                    anchor: Anchor::After,
                    correlation_token: format!("{entry_token}:fallthrough"),
                });
            }
        }

        let record = FunctionRecord {
            id,
            name,
            signature_text,
            param_names,
            start_offset: func_node.start_byte(),
            end_offset: func_node.end_byte(),
            start_line,
            end_line,
            indent_prefix,
            span_bytes,
            nested_in: parent,
        };

        self.raw_sites.insert(id, own_sites);
        self.functions.push(record);
    }
}

fn visitor_first_or(body: Node) -> Node {
    let mut cursor = body.walk();
    let result = body.named_children(&mut cursor).find(|c| c.kind() != "comment").unwrap_or(body);
    result
}

fn collect_identifiers(params: Node, source: &[u8]) -> Vec<String> {
    let mut names = Vec::new();
    let mut stack = vec![params];
    while let Some(node) = stack.pop() {
        let mut cursor = node.walk();
        for child in node.named_children(&mut cursor) {
            match child.kind() {
                "identifier" => names.push(child.utf8_text(source).unwrap_or("").to_string()),
                "typed_parameter" | "default_parameter" | "required_parameter" | "optional_parameter" => {
                    stack.push(child);
                }
                _ => {}
            }
        }
    }
    names
}

/// Run the structured strategy over one source file, returning every
/// function record (top-level and nested) with nested raw sites already
/// folded up into their nearest top-level ancestor's site list.
pub fn analyze(grammar: &dyn LanguageGrammar, source: &[u8]) -> Result<StructuredAnalysis, ParseError> {
    let mut parser = Parser::new();
    parser
        .set_language(&grammar.ts_language())
        .map_err(|e| ParseError::SyntaxError { message: format!("grammar unavailable: {e}") })?;

    let tree = parser
        .parse(source, None)
        .ok_or_else(|| ParseError::SyntaxError { message: "tree-sitter produced no parse tree".to_string() })?;

    if tree.root_node().has_error() {
        return Err(ParseError::SyntaxError { message: first_error_description(tree.root_node()) });
    }

    let line_index = LineIndex::new(source);
    let mut walker = Walker {
        grammar,
        source,
        line_index: &line_index,
        next_id: 0,
        functions: Vec::new(),
        raw_sites: FxHashMap::default(),
    };
    walker.visit(tree.root_node(), None);

    let Walker { functions, mut raw_sites, .. } = walker;

    // Fold nested sites upward. `functions` is in post-order (children
    // pushed before parents) so one forward pass fully cascades multi-level
    // nesting: by the time a middle-level function is folded into its
    // parent, its own list already contains everything folded up from below.
    for record in &functions {
        if let Some(parent) = record.nested_in {
            let child_sites = raw_sites.get(&record.id).cloned().unwrap_or_default();
            raw_sites.entry(parent).or_default().extend(child_sites);
        }
    }

    Ok(StructuredAnalysis { functions, raw_sites })
}

fn first_error_description(node: Node) -> String {
    let mut cursor = node.walk();
    let mut stack = vec![node];
    while let Some(n) = stack.pop() {
        if n.is_error() || n.is_missing() {
            let (line, column) = point_to_line_col(n.start_position());
            return format!("unparseable construct at line {line}, column {column}");
        }
        stack.extend(n.children(&mut cursor));
    }
    "unparseable source".to_string()
}
