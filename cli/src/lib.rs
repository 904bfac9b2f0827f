//! Library half of the `tagmap` binary, kept separate so the mapping
//! pipeline can be driven without a process.

use anyhow::{Context, Result};
use tagmap_config::TagmapConfig;
use tagmap_core::map_with;
use tagmap_types::DynamicRecord;

/// One mapping invocation.
#[derive(Debug, Clone)]
pub struct MapRequest<'a> {
    /// Record schema the input is read as.
    pub from: &'a str,
    /// Record schema the output is built from.
    pub to: &'a str,
    /// Force strict mode regardless of `[mapping] strict`.
    pub strict: bool,
}

/// Read `input` as a `from` record, map it into a fresh `to` record, and
/// return the result as pretty-printed JSON.
pub fn run(config: &TagmapConfig, request: &MapRequest<'_>, input: &str) -> Result<String> {
    let registry = config.schemas().context("invalid record schemas in config")?;
    let source_schema = registry.require(request.from)?;
    let destination_schema = registry.require(request.to)?;

    let json: serde_json::Value = serde_json::from_str(input).context("input is not valid JSON")?;
    let source = DynamicRecord::from_json(source_schema, &json)
        .with_context(|| format!("input does not match record `{}`", request.from))?;

    let mut options = config.mapping.options();
    options.strict |= request.strict;
    tracing::debug!(
        from = request.from,
        to = request.to,
        strict = options.strict,
        "mapping input record"
    );

    let mut destination = DynamicRecord::new(destination_schema);
    map_with(&source, &mut destination, &options)
        .with_context(|| format!("failed to map `{}` into `{}`", request.from, request.to))?;

    serde_json::to_string_pretty(&destination.to_json()).context("failed to encode output")
}
