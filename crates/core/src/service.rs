//! Operation façade for the PermID web services
//!
//! Validates per-operation parameters, assembles request specs from the
//! client configuration, delegates to the gateway, and reshapes raw
//! payloads into the requested output form. Validation failures return
//! before any transport call is made.

use std::path::Path;
use std::sync::Arc;

use permid_domain::constants::{
    HEADER_ACCESS_TOKEN, HEADER_MATCHES_PER_RECORD, HEADER_MATCH_DATA_TYPE, HEADER_TAG_LANGUAGE,
    HEADER_TAG_OUTPUT_FORMAT, PARAM_ACCESS_TOKEN,
};
use permid_domain::{
    ClientConfig, EntityType, LookupFormat, LookupOptions, LookupOutput, MatchInput, MatchOptions,
    MatchOutput, PermIdError, Result, SearchFormat, SearchOutput, SearchQuery, Table, TagOptions,
};
use tracing::{error, info};

use crate::gateway::RequestGateway;
use crate::normalize;
use crate::ports::{HttpTransport, Payload, RequestSpec};
use crate::usage::UsageLedger;

/// Inclusive bounds for the matches-per-record option.
const MATCHES_PER_RECORD_RANGE: std::ops::RangeInclusive<u8> = 1..=5;

/// Façade over the lookup, search, match, and tag endpoints.
///
/// Holds the client configuration and the quota ledger; the HTTP stack
/// is injected through the transport port.
pub struct PermIdService {
    config: ClientConfig,
    gateway: RequestGateway,
    ledger: Arc<UsageLedger>,
}

impl PermIdService {
    /// Create a service over the given transport and configuration.
    pub fn new(transport: Arc<dyn HttpTransport>, config: ClientConfig) -> Self {
        let ledger = Arc::new(UsageLedger::new());
        let gateway = RequestGateway::new(transport, Arc::clone(&ledger));
        Self { config, gateway, ledger }
    }

    /// The configuration this service was built with.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Usage report derived from quota response headers: columns `Time`,
    /// `Quota Daily`, `Quota Used`, one placeholder row when empty.
    pub fn usage(&self) -> Table {
        self.ledger.report()
    }

    /// Look up a single entity by identifier.
    pub async fn lookup(&self, id: &str, options: LookupOptions) -> Result<LookupOutput> {
        info!(id, format = %options.format, orient = %options.orient, "lookup");

        let mut spec = RequestSpec::get(join_path(&self.config.lookup_url, id))
            .header("Accept", options.format.accept())
            .query_param("format", options.format.wire_value());
        if let Some(token) = self.config.access_token.as_deref() {
            spec = spec.query_param(PARAM_ACCESS_TOKEN, token);
        }

        let body = self.gateway.send(spec).await?;
        match options.format {
            LookupFormat::Dataframe => {
                Ok(LookupOutput::Table(normalize::lookup_table(&body, id, options.orient)?))
            }
            LookupFormat::JsonLd | LookupFormat::Turtle => Ok(LookupOutput::Text(body)),
        }
    }

    /// Search entities by free-text query.
    pub async fn search(&self, query: SearchQuery) -> Result<SearchOutput> {
        info!(
            q = %query.q,
            entity_type = %query.entity_type,
            format = %query.format,
            start = query.start,
            num = query.num,
            order = %query.order,
            "search"
        );

        let mut spec = RequestSpec::get(self.config.search_url.clone())
            .query_param("format", query.format.wire_value());
        if let Some(token) = self.config.access_token.as_deref() {
            spec = spec.query_param(PARAM_ACCESS_TOKEN, token);
        }
        spec = spec.query_param("q", &query.q);
        if let Some(entity_type) = query.entity_type.query_value() {
            spec = spec.query_param("entityType", entity_type);
        }
        spec = spec
            .query_param("num", query.num.to_string())
            .query_param("order", query.order.wire_value())
            .query_param("start", query.start.to_string());

        let body = self.gateway.send(spec).await?;
        if query.format != SearchFormat::Dataframe {
            return Ok(SearchOutput::Text(body));
        }
        match query.entity_type {
            EntityType::All => Ok(SearchOutput::Categories(normalize::search_categories(&body)?)),
            _ => Ok(SearchOutput::Table(normalize::search_table(&body)?)),
        }
    }

    /// Match records against canonical entities, one request.
    pub async fn match_records(
        &self,
        input: impl Into<MatchInput>,
        options: &MatchOptions,
    ) -> Result<MatchOutput> {
        let input = input.into();
        info!(
            data_type = %options.data_type,
            matches_per_record = options.matches_per_record,
            "match"
        );

        check_matches_per_record(options.matches_per_record)?;
        let text = match_payload(&input)?;

        let spec = self
            .match_spec(&self.config.match_url, options)
            .header("Content-Type", "text/plain")
            .payload(Payload::Text(text));

        self.finish_match(spec, options).await
    }

    /// Match records from a delimited file, sent as a multipart upload.
    pub async fn match_file(
        &self,
        path: impl AsRef<Path>,
        options: &MatchOptions,
    ) -> Result<MatchOutput> {
        let path = path.as_ref();
        info!(
            path = %path.display(),
            data_type = %options.data_type,
            matches_per_record = options.matches_per_record,
            "match file"
        );

        if !path.exists() {
            error!(path = %path.display(), "match input file does not exist");
            return Err(PermIdError::Validation(format!("{} doesn't exist", path.display())));
        }
        check_matches_per_record(options.matches_per_record)?;

        let spec = self
            .match_spec(&self.config.match_file_url, options)
            .payload(Payload::File(path.to_path_buf()));

        self.finish_match(spec, options).await
    }

    /// Submit text for semantic tagging. The result is always the raw
    /// decoded text; this endpoint has no tabular form.
    pub async fn tag(&self, text: &str, options: &TagOptions) -> Result<String> {
        info!(
            language = %options.language,
            content_type = %options.content_type,
            output_format = %options.output_format,
            "tag"
        );

        let mut spec = RequestSpec::post(self.config.tag_url.clone());
        if let Some(token) = self.config.access_token.as_deref() {
            spec = spec.header(HEADER_ACCESS_TOKEN, token);
        }
        let spec = spec
            .header(HEADER_TAG_LANGUAGE, options.language.wire_value())
            .header(HEADER_TAG_OUTPUT_FORMAT, options.output_format.wire_value())
            .header("Content-Type", options.content_type.mime())
            .payload(Payload::Text(text.to_owned()));

        self.gateway.send(spec).await
    }

    /// Headers shared by both match operations.
    fn match_spec(&self, url: &str, options: &MatchOptions) -> RequestSpec {
        let mut spec = RequestSpec::post(url);
        if let Some(token) = self.config.access_token.as_deref() {
            spec = spec.header(HEADER_ACCESS_TOKEN, token);
        }
        spec.header("Accept", "application/json")
            .header(HEADER_MATCHES_PER_RECORD, options.matches_per_record.to_string())
            .header(HEADER_MATCH_DATA_TYPE, options.data_type.wire_value())
    }

    async fn finish_match(&self, spec: RequestSpec, options: &MatchOptions) -> Result<MatchOutput> {
        let body = self.gateway.send(spec).await?;
        if options.raw_output {
            Ok(MatchOutput::Text(body))
        } else {
            Ok(MatchOutput::Table(normalize::match_table(&body)?))
        }
    }
}

/// The identifier is appended to the lookup base URL's path.
fn join_path(base: &str, id: &str) -> String {
    if base.ends_with('/') {
        format!("{base}{id}")
    } else {
        format!("{base}/{id}")
    }
}

fn check_matches_per_record(matches_per_record: u8) -> Result<()> {
    if !MATCHES_PER_RECORD_RANGE.contains(&matches_per_record) {
        error!(matches_per_record, "invalid matches per record");
        return Err(PermIdError::Validation(
            "the valid numberOfMatchesPerRecord values are 1 - 5".to_string(),
        ));
    }
    Ok(())
}

/// Serialize the match input, rejecting empty data before any network
/// call.
fn match_payload(input: &MatchInput) -> Result<String> {
    match input {
        MatchInput::Text(text) if text.is_empty() => {
            error!("match data is empty");
            Err(PermIdError::Validation("data is required".to_string()))
        }
        MatchInput::Text(text) => Ok(text.clone()),
        MatchInput::Table(table) if table.is_empty() => {
            error!("match table has no rows");
            Err(PermIdError::Validation("the input table is empty".to_string()))
        }
        MatchInput::Table(table) => table.to_delimited(),
    }
}
