//! Bespoke YAML renderer. Not a `serde_yaml` dump: the quoting and
//! block-scalar rules here are particular enough that the envelope is
//! walked into a small intermediate tree and rendered by hand rather than
//! through a generic serializer.

use crate::model::{
    FileChunk, FileEntry, GraphEntry, LanguageStat, LargestFile, MetaInfo, OutputEnvelope, ScanResult, StatsResult, SymbolEntry, Totals,
};

const INDENT_STEP: usize = 2;

enum Node {
    Str(String),
    Int(i64),
    Bool(bool),
    Map(Vec<(&'static str, Node)>),
    Seq(Vec<Node>),
}

fn str_node(value: impl Into<String>) -> Node {
    Node::Str(value.into())
}

#[must_use]
pub fn render(envelope: &OutputEnvelope) -> String {
    let node = envelope_to_node(envelope);
    let mut out = String::new();
    render_map_body(&mut out, as_map(&node), 0);
    out
}

fn as_map(node: &Node) -> &[(&'static str, Node)] {
    match node {
        Node::Map(entries) => entries,
        _ => &[],
    }
}

fn envelope_to_node(envelope: &OutputEnvelope) -> Node {
    let mut fields: Vec<(&'static str, Node)> = vec![("meta", meta_to_node(&envelope.meta))];
    if let Some(tree) = &envelope.tree {
        fields.push(("tree", scan_result_to_node(tree)));
    }
    if let Some(files) = &envelope.files {
        fields.push(("files", Node::Seq(files.iter().map(file_entry_to_node).collect())));
    }
    if let Some(counts) = &envelope.counts {
        fields.push(("counts", Node::Seq(counts.iter().map(file_entry_to_node).collect())));
    }
    if let Some(graph) = &envelope.graph {
        fields.push(("graph", Node::Seq(graph.iter().map(graph_entry_to_node).collect())));
    }
    if let Some(symbols) = &envelope.symbols {
        fields.push(("symbols", Node::Seq(symbols.iter().map(file_entry_to_node).collect())));
    }
    if let Some(stats) = &envelope.stats {
        fields.push(("stats", stats_to_node(stats)));
    }
    if let Some(error) = &envelope.error {
        fields.push(("error", str_node(error.clone())));
    }
    Node::Map(fields)
}

fn meta_to_node(meta: &MetaInfo) -> Node {
    let mut fields: Vec<(&'static str, Node)> = vec![("elapsedMs", Node::Int(meta.elapsed_ms as i64))];
    if meta.timeout {
        fields.push(("timeout", Node::Bool(true)));
    }
    if let Some(scanned) = meta.files_scanned {
        fields.push(("filesScanned", Node::Int(scanned as i64)));
    }
    if let Some(matched) = meta.files_matched {
        fields.push(("filesMatched", Node::Int(matched as i64)));
    }
    if let Some(total) = meta.total_matches {
        fields.push(("totalMatches", Node::Int(total as i64)));
    }
    Node::Map(fields)
}

fn scan_result_to_node(scan: &ScanResult) -> Node {
    let mut fields: Vec<(&'static str, Node)> = vec![("name", str_node(scan.name.clone()))];
    if let Some(children) = &scan.children {
        fields.push(("children", Node::Seq(children.iter().map(scan_result_to_node).collect())));
    }
    if let Some(files) = &scan.files {
        fields.push(("files", Node::Seq(files.iter().map(|f| str_node(f.clone())).collect())));
    }
    Node::Map(fields)
}

fn file_entry_to_node(entry: &FileEntry) -> Node {
    let mut fields: Vec<(&'static str, Node)> = vec![("path", str_node(entry.path.clone()))];
    if let Some(contents) = &entry.contents {
        fields.push(("contents", str_node(contents.clone())));
    }
    if let Some(chunks) = &entry.chunks {
        fields.push(("chunks", Node::Seq(chunks.iter().map(file_chunk_to_node).collect())));
    }
    if let Some(error) = &entry.error {
        fields.push(("error", str_node(error.clone())));
    }
    if let Some(count) = entry.count {
        fields.push(("count", Node::Int(count as i64)));
    }
    if let Some(symbols) = &entry.symbols {
        fields.push(("symbols", Node::Seq(symbols.iter().map(symbol_entry_to_node).collect())));
    }
    Node::Map(fields)
}

fn file_chunk_to_node(chunk: &FileChunk) -> Node {
    Node::Map(vec![
        ("startLine", Node::Int(chunk.start_line as i64)),
        ("endLine", Node::Int(chunk.end_line as i64)),
        ("content", str_node(chunk.content.clone())),
    ])
}

fn graph_entry_to_node(entry: &GraphEntry) -> Node {
    Node::Map(vec![
        ("file", str_node(entry.file.clone())),
        ("imports", Node::Seq(entry.imports.iter().map(|i| str_node(i.clone())).collect())),
    ])
}

fn symbol_entry_to_node(symbol: &SymbolEntry) -> Node {
    let mut fields: Vec<(&'static str, Node)> = vec![
        ("kind", str_node(symbol.kind.as_str())),
        ("name", str_node(symbol.name.clone())),
        ("line", Node::Int(symbol.line as i64)),
    ];
    if let Some(visibility) = symbol.visibility {
        fields.push(("visibility", str_node(visibility.as_str())));
    }
    if let Some(parent) = &symbol.parent {
        fields.push(("parent", str_node(parent.clone())));
    }
    fields.push(("signature", str_node(symbol.signature.clone())));
    Node::Map(fields)
}

fn stats_to_node(stats: &StatsResult) -> Node {
    Node::Map(vec![
        ("languages", Node::Seq(stats.languages.iter().map(language_stat_to_node).collect())),
        ("totals", totals_to_node(&stats.totals)),
        ("largest", Node::Seq(stats.largest.iter().map(largest_file_to_node).collect())),
    ])
}

fn language_stat_to_node(stat: &LanguageStat) -> Node {
    Node::Map(vec![
        ("extension", str_node(stat.extension.clone())),
        ("files", Node::Int(stat.files as i64)),
        ("lines", Node::Int(stat.lines as i64)),
        ("bytes", Node::Int(stat.bytes as i64)),
    ])
}

fn totals_to_node(totals: &Totals) -> Node {
    Node::Map(vec![
        ("files", Node::Int(totals.files as i64)),
        ("lines", Node::Int(totals.lines as i64)),
        ("bytes", Node::Int(totals.bytes as i64)),
    ])
}

fn largest_file_to_node(file: &LargestFile) -> Node {
    Node::Map(vec![("path", str_node(file.path.clone())), ("bytes", Node::Int(file.bytes as i64))])
}

fn render_map_body(out: &mut String, fields: &[(&'static str, Node)], indent: usize) {
    let pad = " ".repeat(indent);
    for (key, value) in fields {
        let key = quote_scalar(key);
        match value {
            Node::Map(nested) if !nested.is_empty() => {
                out.push_str(&format!("{pad}{key}:\n"));
                render_map_body(out, nested, indent + INDENT_STEP);
            }
            Node::Map(_) => out.push_str(&format!("{pad}{key}: {{}}\n")),
            Node::Seq(items) if !items.is_empty() => {
                out.push_str(&format!("{pad}{key}:\n"));
                render_seq_body(out, items, indent);
            }
            Node::Seq(_) => out.push_str(&format!("{pad}{key}: []\n")),
            Node::Str(text) if text.contains('\n') => {
                out.push_str(&format!("{pad}{key}: |\n"));
                render_block_scalar(out, text, indent + INDENT_STEP);
            }
            Node::Str(text) => out.push_str(&format!("{pad}{key}: {}\n", quote_scalar(text))),
            Node::Int(n) => out.push_str(&format!("{pad}{key}: {n}\n")),
            Node::Bool(b) => out.push_str(&format!("{pad}{key}: {b}\n")),
        }
    }
}

fn render_seq_body(out: &mut String, items: &[Node], indent: usize) {
    let pad = " ".repeat(indent);
    for item in items {
        match item {
            Node::Map(fields) => {
                out.push_str(&format!("{pad}-"));
                render_seq_map_item(out, fields, indent);
            }
            Node::Str(text) if text.contains('\n') => {
                out.push_str(&format!("{pad}- |\n"));
                render_block_scalar(out, text, indent + INDENT_STEP);
            }
            Node::Str(text) => out.push_str(&format!("{pad}- {}\n", quote_scalar(text))),
            Node::Int(n) => out.push_str(&format!("{pad}- {n}\n")),
            Node::Bool(b) => out.push_str(&format!("{pad}- {b}\n")),
            Node::Seq(nested) => {
                out.push_str(&format!("{pad}-\n"));
                render_seq_body(out, nested, indent + INDENT_STEP);
            }
        }
    }
}

/// Renders a mapping as a sequence item: the first key shares the `- `
/// marker's line, remaining keys align beneath it.
fn render_seq_map_item(out: &mut String, fields: &[(&'static str, Node)], indent: usize) {
    let inner_indent = indent + INDENT_STEP;
    let mut first = true;
    for (key, value) in fields {
        let key_str = quote_scalar(key);
        let prefix = if first {
            first = false;
            " ".to_string()
        } else {
            " ".repeat(inner_indent)
        };
        match value {
            Node::Map(nested) if !nested.is_empty() => {
                out.push_str(&format!("{prefix}{key_str}:\n"));
                render_map_body(out, nested, inner_indent + INDENT_STEP);
            }
            Node::Map(_) => out.push_str(&format!("{prefix}{key_str}: {{}}\n")),
            Node::Seq(items) if !items.is_empty() => {
                out.push_str(&format!("{prefix}{key_str}:\n"));
                render_seq_body(out, items, inner_indent);
            }
            Node::Seq(_) => out.push_str(&format!("{prefix}{key_str}: []\n")),
            Node::Str(text) if text.contains('\n') => {
                out.push_str(&format!("{prefix}{key_str}: |\n"));
                render_block_scalar(out, text, inner_indent + INDENT_STEP);
            }
            Node::Str(text) => out.push_str(&format!("{prefix}{key_str}: {}\n", quote_scalar(text))),
            Node::Int(n) => out.push_str(&format!("{prefix}{key_str}: {n}\n")),
            Node::Bool(b) => out.push_str(&format!("{prefix}{key_str}: {b}\n")),
        }
    }
}

fn render_block_scalar(out: &mut String, text: &str, indent: usize) {
    let pad = " ".repeat(indent);
    for line in text.split('\n') {
        out.push_str(&pad);
        out.push_str(line);
        out.push('\n');
    }
}

/// Quotes a scalar only when it would otherwise parse ambiguously
///: a leading `-`, `[`, `{`, `*`, `&`, `?`, `#`; a `:` or `#`
/// anywhere inside; or a case-insensitive match against `true/false/null`
/// or `yes/no`.
fn quote_scalar(value: &str) -> String {
    if needs_quoting(value) {
        format!("\"{}\"", value.replace('\\', "\\\\").replace('"', "\\\""))
    } else {
        value.to_string()
    }
}

fn needs_quoting(value: &str) -> bool {
    if value.is_empty() {
        return true;
    }
    let first = value.chars().next().unwrap();
    if matches!(first, '-' | '[' | '{' | '*' | '&' | '?' | '#') {
        return true;
    }
    if value.contains(':') || value.contains('#') {
        return true;
    }
    let lowered = value.to_lowercase();
    matches!(lowered.as_str(), "true" | "false" | "null" | "yes" | "no")
}

#[cfg(test)]
#[path = "yaml_tests.rs"]
mod tests;
