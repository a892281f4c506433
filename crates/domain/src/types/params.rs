//! Request parameter enums and per-operation options
//!
//! Output shape and wire values are selected by enumerated options rather
//! than free-form strings. Every enum also parses from its string token;
//! the parse error enumerates the legal set, so string-typed callers get
//! the same validation behavior as the wire service documents.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::PermIdError;

// ============================================================================
// Lookup
// ============================================================================

/// Output selector for lookup.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LookupFormat {
    /// Tabular result reshaped from the json-ld payload.
    #[default]
    Dataframe,
    /// Raw json-ld text.
    JsonLd,
    /// Raw turtle text.
    Turtle,
}

impl LookupFormat {
    /// Value sent in the `format` query parameter.
    pub fn wire_value(self) -> &'static str {
        match self {
            Self::Dataframe | Self::JsonLd => "json-ld",
            Self::Turtle => "turtle",
        }
    }

    /// Accept header for this format.
    pub fn accept(self) -> &'static str {
        match self {
            Self::Dataframe | Self::JsonLd => "application/ld+json",
            Self::Turtle => "text/turtle",
        }
    }

    fn token(self) -> &'static str {
        match self {
            Self::Dataframe => "dataframe",
            Self::JsonLd => "json-ld",
            Self::Turtle => "turtle",
        }
    }
}

impl fmt::Display for LookupFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

impl FromStr for LookupFormat {
    type Err = PermIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "dataframe" => Ok(Self::Dataframe),
            "json-ld" => Ok(Self::JsonLd),
            "turtle" => Ok(Self::Turtle),
            other => Err(PermIdError::Validation(format!(
                "invalid lookup format '{other}': the valid formats are 'dataframe', 'json-ld', and 'turtle'"
            ))),
        }
    }
}

/// Row or column orientation for tabular lookup results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Orient {
    /// One row holding every field of the entity.
    #[default]
    Row,
    /// One column keyed by the identifier, one labeled row per field.
    Column,
}

impl Orient {
    fn token(self) -> &'static str {
        match self {
            Self::Row => "row",
            Self::Column => "column",
        }
    }
}

impl fmt::Display for Orient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

impl FromStr for Orient {
    type Err = PermIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "row" => Ok(Self::Row),
            "column" => Ok(Self::Column),
            other => Err(PermIdError::Validation(format!(
                "invalid orient '{other}': the valid orients for a tabular lookup are 'row' and 'column'"
            ))),
        }
    }
}

/// Options for lookup calls.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LookupOptions {
    pub format: LookupFormat,
    /// Only consulted when `format` is [`LookupFormat::Dataframe`].
    pub orient: Orient,
}

impl LookupOptions {
    pub fn with_format(mut self, format: LookupFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_orient(mut self, orient: Orient) -> Self {
        self.orient = orient;
        self
    }
}

// ============================================================================
// Search
// ============================================================================

/// Entity categories searchable on the search endpoint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityType {
    /// Server default: every category, one table per category.
    #[default]
    All,
    Organization,
    Instrument,
    Quote,
}

impl EntityType {
    /// Value for the `entityType` query parameter; `All` is the server
    /// default and is omitted from the query entirely.
    pub fn query_value(self) -> Option<&'static str> {
        match self {
            Self::All => None,
            Self::Organization => Some("organization"),
            Self::Instrument => Some("instrument"),
            Self::Quote => Some("quote"),
        }
    }

    fn token(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Organization => "organization",
            Self::Instrument => "instrument",
            Self::Quote => "quote",
        }
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

impl FromStr for EntityType {
    type Err = PermIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(Self::All),
            "organization" => Ok(Self::Organization),
            "instrument" => Ok(Self::Instrument),
            "quote" => Ok(Self::Quote),
            other => Err(PermIdError::Validation(format!(
                "invalid entity type '{other}': the valid entity types are 'all', 'organization', 'instrument', and 'quote'"
            ))),
        }
    }
}

/// Output selector for search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchFormat {
    /// Tabular result(s) reshaped from the json payload.
    #[default]
    Dataframe,
    /// Raw json text.
    Json,
    /// Raw xml text.
    Xml,
}

impl SearchFormat {
    /// Value sent in the `format` query parameter.
    pub fn wire_value(self) -> &'static str {
        match self {
            Self::Dataframe | Self::Json => "json",
            Self::Xml => "xml",
        }
    }

    fn token(self) -> &'static str {
        match self {
            Self::Dataframe => "dataframe",
            Self::Json => "json",
            Self::Xml => "xml",
        }
    }
}

impl fmt::Display for SearchFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

impl FromStr for SearchFormat {
    type Err = PermIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "dataframe" => Ok(Self::Dataframe),
            "json" => Ok(Self::Json),
            "xml" => Ok(Self::Xml),
            other => Err(PermIdError::Validation(format!(
                "invalid search format '{other}': the valid formats are 'dataframe', 'json', and 'xml'"
            ))),
        }
    }
}

/// Result ordering for search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchOrder {
    /// By relevance.
    #[default]
    Rel,
    /// Alphabetical, ascending.
    Az,
    /// Alphabetical, descending.
    Za,
}

impl SearchOrder {
    /// Value sent in the `order` query parameter.
    pub fn wire_value(self) -> &'static str {
        match self {
            Self::Rel => "rel",
            Self::Az => "az",
            Self::Za => "za",
        }
    }
}

impl fmt::Display for SearchOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_value())
    }
}

impl FromStr for SearchOrder {
    type Err = PermIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "rel" => Ok(Self::Rel),
            "az" => Ok(Self::Az),
            "za" => Ok(Self::Za),
            other => Err(PermIdError::Validation(format!(
                "invalid order '{other}': the valid orders are 'rel', 'az', and 'za'"
            ))),
        }
    }
}

/// A search request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    pub q: String,
    pub entity_type: EntityType,
    pub format: SearchFormat,
    /// 1-based index of the first result.
    pub start: u32,
    /// Number of results requested.
    pub num: u32,
    pub order: SearchOrder,
}

impl SearchQuery {
    /// A query with the service defaults: all entity types, tabular
    /// output, first page of five results, relevance order.
    pub fn new(q: impl Into<String>) -> Self {
        Self {
            q: q.into(),
            entity_type: EntityType::default(),
            format: SearchFormat::default(),
            start: 1,
            num: 5,
            order: SearchOrder::default(),
        }
    }

    pub fn with_entity_type(mut self, entity_type: EntityType) -> Self {
        self.entity_type = entity_type;
        self
    }

    pub fn with_format(mut self, format: SearchFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_page(mut self, start: u32, num: u32) -> Self {
        self.start = start;
        self.num = num;
        self
    }

    pub fn with_order(mut self, order: SearchOrder) -> Self {
        self.order = order;
        self
    }
}

// ============================================================================
// Match
// ============================================================================

/// Record categories accepted by the match endpoints.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchDataType {
    #[default]
    Organization,
    Person,
    Instrument,
    Quote,
}

impl MatchDataType {
    /// Value sent in the `x-openmatch-dataType` header.
    pub fn wire_value(self) -> &'static str {
        match self {
            Self::Organization => "Organization",
            Self::Person => "Person",
            Self::Instrument => "Instrument",
            Self::Quote => "Quote",
        }
    }
}

impl fmt::Display for MatchDataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_value())
    }
}

impl FromStr for MatchDataType {
    type Err = PermIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Organization" => Ok(Self::Organization),
            "Person" => Ok(Self::Person),
            "Instrument" => Ok(Self::Instrument),
            "Quote" => Ok(Self::Quote),
            other => Err(PermIdError::Validation(format!(
                "invalid data type '{other}': the valid data types are 'Organization', 'Person', 'Instrument', and 'Quote'"
            ))),
        }
    }
}

/// Options for the match operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchOptions {
    pub data_type: MatchDataType,
    /// Candidate matches returned per input record, within `1..=5`.
    pub matches_per_record: u8,
    /// Return the decoded response text unchanged instead of a table.
    pub raw_output: bool,
}

impl Default for MatchOptions {
    fn default() -> Self {
        Self { data_type: MatchDataType::default(), matches_per_record: 1, raw_output: false }
    }
}

impl MatchOptions {
    pub fn with_data_type(mut self, data_type: MatchDataType) -> Self {
        self.data_type = data_type;
        self
    }

    pub fn with_matches_per_record(mut self, matches_per_record: u8) -> Self {
        self.matches_per_record = matches_per_record;
        self
    }

    pub fn with_raw_output(mut self, raw_output: bool) -> Self {
        self.raw_output = raw_output;
        self
    }
}

// ============================================================================
// Tag
// ============================================================================

/// Content types accepted by the tagging endpoint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TagContentType {
    #[default]
    Raw,
    Html,
    Xml,
    Pdf,
}

impl TagContentType {
    /// Mime type sent in the `Content-Type` header.
    pub fn mime(self) -> &'static str {
        match self {
            Self::Raw => "text/raw",
            Self::Html => "text/html",
            Self::Xml => "text/xml",
            Self::Pdf => "application/pdf",
        }
    }

    fn token(self) -> &'static str {
        match self {
            Self::Raw => "raw",
            Self::Html => "html",
            Self::Xml => "xml",
            Self::Pdf => "pdf",
        }
    }
}

impl fmt::Display for TagContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

impl FromStr for TagContentType {
    type Err = PermIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "raw" => Ok(Self::Raw),
            "html" => Ok(Self::Html),
            "xml" => Ok(Self::Xml),
            "pdf" => Ok(Self::Pdf),
            other => Err(PermIdError::Validation(format!(
                "invalid content type '{other}': the valid content types are 'raw', 'html', 'xml', and 'pdf'"
            ))),
        }
    }
}

/// Output formats offered by the tagging endpoint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TagOutputFormat {
    #[default]
    Json,
    Rdf,
    N3,
}

impl TagOutputFormat {
    /// Value sent in the `outputFormat` header.
    pub fn wire_value(self) -> &'static str {
        match self {
            Self::Json => "application/json",
            Self::Rdf => "xml/rdf",
            Self::N3 => "text/n3",
        }
    }

    fn token(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Rdf => "rdf",
            Self::N3 => "n3",
        }
    }
}

impl fmt::Display for TagOutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

impl FromStr for TagOutputFormat {
    type Err = PermIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "json" => Ok(Self::Json),
            "rdf" => Ok(Self::Rdf),
            "n3" => Ok(Self::N3),
            other => Err(PermIdError::Validation(format!(
                "invalid output format '{other}': the valid output formats are 'json', 'rdf', and 'n3'"
            ))),
        }
    }
}

/// Languages the tagging endpoint documents.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Language {
    #[default]
    English,
    Chinese,
    French,
    German,
    Japanese,
    Spanish,
}

impl Language {
    /// Value sent in the `x-calais-language` header.
    pub fn wire_value(self) -> &'static str {
        match self {
            Self::English => "English",
            Self::Chinese => "Chinese",
            Self::French => "French",
            Self::German => "German",
            Self::Japanese => "Japanese",
            Self::Spanish => "Spanish",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_value())
    }
}

impl FromStr for Language {
    type Err = PermIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "English" => Ok(Self::English),
            "Chinese" => Ok(Self::Chinese),
            "French" => Ok(Self::French),
            "German" => Ok(Self::German),
            "Japanese" => Ok(Self::Japanese),
            "Spanish" => Ok(Self::Spanish),
            other => Err(PermIdError::Validation(format!(
                "invalid language '{other}': the valid languages are 'English', 'Chinese', 'French', 'German', 'Japanese', and 'Spanish'"
            ))),
        }
    }
}

/// Options for tagging calls.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TagOptions {
    pub language: Language,
    pub content_type: TagContentType,
    pub output_format: TagOutputFormat,
}

impl TagOptions {
    pub fn with_language(mut self, language: Language) -> Self {
        self.language = language;
        self
    }

    pub fn with_content_type(mut self, content_type: TagContentType) -> Self {
        self.content_type = content_type;
        self
    }

    pub fn with_output_format(mut self, output_format: TagOutputFormat) -> Self {
        self.output_format = output_format;
        self
    }
}
