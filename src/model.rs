//! The single result shape emitted by every mode.
//!
//! Fields use `serde(rename_all = "camelCase")` so the JSON emitter
//! (`output::json`) gets camelCase keys for free; the YAML emitter
//! (`output::yaml`) walks these structs directly rather than going through
//! `serde`, since its block-scalar/quoting rules are bespoke.

use serde::Serialize;

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetaInfo {
    pub elapsed_ms: u64,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub timeout: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub files_scanned: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub files_matched: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_matches: Option<u64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ScanResult {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<ScanResult>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub files: Option<Vec<String>>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileChunk {
    pub start_line: usize,
    pub end_line: usize,
    pub content: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct FileEntry {
    pub path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contents: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chunks: Option<Vec<FileChunk>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub symbols: Option<Vec<SymbolEntry>>,
}

impl FileEntry {
    #[must_use]
    pub fn with_path(path: String) -> Self {
        Self {
            path,
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct GraphEntry {
    pub file: String,
    pub imports: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SymbolKind {
    Fn,
    Method,
    Struct,
    Class,
    Enum,
    Trait,
    Interface,
    Type,
    Const,
    Var,
    Mod,
    Namespace,
}

impl SymbolKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Fn => "fn",
            Self::Method => "method",
            Self::Struct => "struct",
            Self::Class => "class",
            Self::Enum => "enum",
            Self::Trait => "trait",
            Self::Interface => "interface",
            Self::Type => "type",
            Self::Const => "const",
            Self::Var => "var",
            Self::Mod => "mod",
            Self::Namespace => "namespace",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    Pub,
    Export,
    Public,
    Private,
    Protected,
    Internal,
}

impl Visibility {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pub => "pub",
            Self::Export => "export",
            Self::Public => "public",
            Self::Private => "private",
            Self::Protected => "protected",
            Self::Internal => "internal",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SymbolEntry {
    pub kind: SymbolKind,
    pub name: String,
    pub line: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visibility: Option<Visibility>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
    pub signature: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct LanguageStat {
    pub extension: String,
    pub files: u64,
    pub lines: u64,
    pub bytes: u64,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct Totals {
    pub files: u64,
    pub lines: u64,
    pub bytes: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct LargestFile {
    pub path: String,
    pub bytes: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct StatsResult {
    pub languages: Vec<LanguageStat>,
    pub totals: Totals,
    pub largest: Vec<LargestFile>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct OutputEnvelope {
    pub meta: MetaInfo,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tree: Option<ScanResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub files: Option<Vec<FileEntry>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub counts: Option<Vec<FileEntry>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub graph: Option<Vec<GraphEntry>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub symbols: Option<Vec<FileEntry>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stats: Option<StatsResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl OutputEnvelope {
    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            error: Some(message.into()),
            ..Self::default()
        }
    }
}
