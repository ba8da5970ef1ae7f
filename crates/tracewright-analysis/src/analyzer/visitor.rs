//! Single-pass probe-site detection within one function's own body.
//!
//! Generalizes `drift-analysis`'s `DetectorHandler`/`VisitorRegistry`
//! pattern (one handler per construct family, each only caring about the
//! node kinds its language table names) but targets `ProbeSite` emission
//! instead of `PatternMatch` accumulation. Never descends into a nested
//! function's own body — nested sites are folded upward by the caller
//! (spec.md §4.C1 nested-function policy), not discovered twice here.

use tracewright_core::{Anchor, ProbeKind, ProbeSite};
use tree_sitter::Node;

use super::line_index::{point_to_line_col, LineIndex};
use crate::grammar::LanguageGrammar;

fn node_text<'a>(node: Node, source: &'a [u8]) -> &'a str {
    node.utf8_text(source).unwrap_or("")
}

fn site(kind: ProbeKind, anchor_node: Node, anchor: Anchor, token_seed: &str) -> ProbeSite {
    let (line, column) = point_to_line_col(match anchor {
        Anchor::Before => anchor_node.start_position(),
        Anchor::After => anchor_node.end_position(),
    });
    ProbeSite {
        kind,
        line,
        column,
        anchor,
        correlation_token: format!("{}:{}", token_seed, anchor_node.start_byte()),
    }
}

/// First non-comment child of a block-like node, used as the landing spot
/// for an "entry" probe (spec.md §3: func_entry/loop_entry/cond_entry all
/// anchor on the first statement of the block they guard).
fn first_statement(block: Node) -> Option<Node> {
    let mut cursor = block.walk();
    let result = block.named_children(&mut cursor).find(|c| c.kind() != "comment");
    result
}

/// Recursively collect every probe site reachable from `node` that belongs
/// to the function whose body `node` is a part of, stopping at (but not
/// entering) nested function definitions.
pub fn collect_sites(
    grammar: &dyn LanguageGrammar,
    source: &[u8],
    _line_index: &LineIndex,
    node: Node,
    out: &mut Vec<ProbeSite>,
) {
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        let kind = child.kind();

        if grammar.function_kinds().contains(&kind) {
            // Nested function: its own sites are collected separately by
            // the caller when it visits this child as its own function.
            continue;
        }

        if grammar.loop_kinds().contains(&kind) {
            handle_loop(grammar, source, child, out);
        } else if grammar.conditional_kinds().contains(&kind) {
            handle_conditional(grammar, source, child, out);
        } else if grammar.try_kinds().contains(&kind) {
            handle_try(grammar, source, child, out);
        } else if grammar.return_kinds().contains(&kind) {
            handle_return(source, child, out);
        } else if grammar.assignment_kinds().contains(&kind) {
            handle_assignment(grammar, source, child, out);
        } else if grammar.call_kinds().contains(&kind) {
            handle_call(source, child, out);
        }

        collect_sites(grammar, source, _line_index, child, out);
    }
}

fn handle_loop(grammar: &dyn LanguageGrammar, source: &[u8], loop_node: Node, out: &mut Vec<ProbeSite>) {
    let token = format!("loop-{}", loop_node.start_byte());
    let loop_var = loop_node
        .child_by_field_name("left")
        .or_else(|| loop_node.child_by_field_name("value"))
        .map(|n| node_text(n, source).to_string());

    let body = loop_node.child_by_field_name("body").unwrap_or(loop_node);
    if let Some(first) = first_statement(body) {
        out.push(site(ProbeKind::LoopEntry { loop_var }, first, Anchor::Before, &token));
    } else {
        out.push(site(ProbeKind::LoopEntry { loop_var }, body, Anchor::Before, &token));
    }
    out.push(site(ProbeKind::LoopExit, loop_node, Anchor::After, &token));

    let _ = grammar;
}

fn handle_conditional(grammar: &dyn LanguageGrammar, source: &[u8], if_node: Node, out: &mut Vec<ProbeSite>) {
    let mut current = Some(if_node);
    while let Some(branch) = current {
        let token = format!("cond-{}", branch.start_byte());
        let condition_text = branch
            .child_by_field_name("condition")
            .map(|n| node_text(n, source).trim().to_string())
            .unwrap_or_default();
        let consequence = branch
            .child_by_field_name("consequence")
            .or_else(|| branch.child_by_field_name("body"));

        if let Some(consequence) = consequence {
            let branch_id = format!("branch-{}", branch.start_byte());
            if let Some(first) = first_statement(consequence) {
                out.push(site(
                    ProbeKind::CondEntry { branch_id: branch_id.clone(), condition_text: condition_text.clone() },
                    first,
                    Anchor::Before,
                    &token,
                ));
            }
            out.push(site(ProbeKind::CondExit { branch_id: branch_id.clone() }, consequence, Anchor::After, &token));
        }

        let alternative = branch.child_by_field_name("alternative");
        match alternative {
            Some(alt) if grammar.conditional_kinds().contains(&alt.kind()) => {
                current = Some(alt);
            }
            Some(alt) if alt.kind() == "elif_clause" => {
                current = Some(alt);
            }
            Some(alt) => {
                let token = format!("cond-{}", alt.start_byte());
                let branch_id = format!("branch-{}", alt.start_byte());
                let body = alt.child_by_field_name("body").unwrap_or(alt);
                if let Some(first) = first_statement(body) {
                    out.push(site(
                        ProbeKind::CondEntry { branch_id: branch_id.clone(), condition_text: String::new() },
                        first,
                        Anchor::Before,
                        &token,
                    ));
                }
                out.push(site(ProbeKind::CondExit { branch_id }, body, Anchor::After, &token));
                current = None;
            }
            None => current = None,
        }
    }
}

fn handle_try(grammar: &dyn LanguageGrammar, source: &[u8], try_node: Node, out: &mut Vec<ProbeSite>) {
    let token = format!("try-{}", try_node.start_byte());
    let body = try_node.child_by_field_name("body").unwrap_or(try_node);
    if let Some(first) = first_statement(body) {
        out.push(site(ProbeKind::ExcEnter, first, Anchor::Before, &token));
    }

    let mut cursor = try_node.walk();
    for handler in try_node.children(&mut cursor) {
        if !grammar.except_kinds().contains(&handler.kind()) {
            continue;
        }
        let handler_token = format!("except-{}", handler.start_byte());
        let exception_var = handler
            .child_by_field_name("name")
            .or_else(|| handler.child_by_field_name("parameter"))
            .map(|n| node_text(n, source).to_string());
        let exception_type = handler
            .child_by_field_name("type")
            .or_else(|| handler.child_by_field_name("value"))
            .map(|n| node_text(n, source).to_string());
        let handler_body = handler.child_by_field_name("body").unwrap_or(handler);
        if let Some(first) = first_statement(handler_body) {
            out.push(site(
                ProbeKind::ExcCaught { exception_var, exception_type },
                first,
                Anchor::Before,
                &handler_token,
            ));
        }
    }

    out.push(site(ProbeKind::ExcExit, try_node, Anchor::After, &token));
}

fn handle_return(source: &[u8], return_node: Node, out: &mut Vec<ProbeSite>) {
    let token = format!("return-{}", return_node.start_byte());
    let full_text = node_text(return_node, source);
    let expr_text = full_text
        .trim()
        .strip_prefix("return")
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string);

    out.push(site(ProbeKind::ReturnValue { expr_text }, return_node, Anchor::Before, &token));
    out.push(site(ProbeKind::FuncExit, return_node, Anchor::Before, &token));
}

fn handle_assignment(grammar: &dyn LanguageGrammar, source: &[u8], assign_node: Node, out: &mut Vec<ProbeSite>) {
    let token = format!("assign-{}", assign_node.start_byte());
    let left = assign_node
        .child_by_field_name("left")
        .or_else(|| assign_node.child_by_field_name("name"))
        .or_else(|| assign_node.child_by_field_name("target"));
    let right = assign_node.child_by_field_name("right").or_else(|| assign_node.child_by_field_name("value"));

    let Some(left) = left else { return };

    if is_subscript(left.kind()) {
        if let Some(name) = left.child_by_field_name("object").or_else(|| left.child_by_field_name("operand")) {
            out.push(site(
                ProbeKind::ArrayModify { name: node_text(name, source).to_string(), operation: "index_set".to_string() },
                assign_node,
                Anchor::After,
                &token,
            ));
        }
        let _ = grammar;
        return;
    }

    if left.kind() != "identifier" {
        return;
    }
    let name = node_text(left, source).to_string();

    if let Some(right) = right {
        if is_array_literal(right.kind()) {
            out.push(site(ProbeKind::ArrayCreate { name: name.clone() }, assign_node, Anchor::After, &token));
            return;
        }
        if is_subscript(right.kind()) {
            out.push(site(ProbeKind::ArrayAccess { name: name.clone() }, assign_node, Anchor::After, &token));
        }
    }

    out.push(site(ProbeKind::VarChange { name }, assign_node, Anchor::After, &token));
}

fn handle_call(source: &[u8], call_node: Node, out: &mut Vec<ProbeSite>) {
    let Some(func) = call_node.child_by_field_name("function") else { return };
    if !is_member_access(func.kind()) {
        return;
    }
    let receiver = func
        .child_by_field_name("object")
        .or_else(|| func.child_by_field_name("operand"))
        .map(|n| node_text(n, source).to_string())
        .unwrap_or_default();
    let method = func
        .child_by_field_name("attribute")
        .or_else(|| func.child_by_field_name("property"))
        .or_else(|| func.child_by_field_name("field"))
        .map(|n| node_text(n, source).to_string())
        .unwrap_or_default();
    if receiver.is_empty() || method.is_empty() {
        return;
    }
    let token = format!("call-{}", call_node.start_byte());
    out.push(site(ProbeKind::CallTrace { receiver, method }, call_node, Anchor::Before, &token));
}

fn is_subscript(kind: &str) -> bool {
    matches!(kind, "subscript" | "subscript_expression" | "index_expression")
}

fn is_array_literal(kind: &str) -> bool {
    matches!(kind, "list" | "array" | "composite_literal")
}

fn is_member_access(kind: &str) -> bool {
    matches!(kind, "attribute" | "member_expression" | "selector_expression")
}
