//! `fetch` and `normalize`: whole-record commands that write files.

use ndq_core::{
    normalize_symbol_data, read_json_file, write_json_file, Category, NasdaqClient,
    RawSymbolRecord, Symbol,
};
use serde_json::{json, Value};

use crate::cli::{FetchArgs, NormalizeArgs};
use crate::error::CliError;

pub async fn fetch(args: &FetchArgs, client: &NasdaqClient) -> Result<Value, CliError> {
    let symbol = Symbol::parse(&args.symbol)?;
    let raw = client.fetch_all_symbol_data(&symbol).await;

    if args.raw {
        write_json_file(&args.output, &raw)?;
    } else {
        write_json_file(&args.output, &normalize_symbol_data(&raw))?;
    }
    tracing::info!(symbol = %symbol, output = %args.output.display(), "wrote record");

    let kind = if args.raw { "raw" } else { "normalized" };
    let missing = raw
        .missing_categories()
        .into_iter()
        .map(Category::as_str)
        .collect::<Vec<_>>();
    Ok(json!({
        "symbol": symbol,
        "output": args.output.display().to_string(),
        "record": kind,
        "categories_fetched": raw.available_count(),
        "categories_missing": missing,
    }))
}

pub fn normalize(args: &NormalizeArgs) -> Result<Value, CliError> {
    let raw: RawSymbolRecord = read_json_file(&args.input)?;
    let normalized = normalize_symbol_data(&raw);
    write_json_file(&args.output, &normalized)?;

    Ok(json!({
        "symbol": raw.symbol(),
        "input": args.input.display().to_string(),
        "output": args.output.display().to_string(),
        "categories_available": raw.available_count(),
    }))
}
