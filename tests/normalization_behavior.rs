//! Behavior tests for turning raw vendor payloads into normalized records.

use ndq_core::parse::{number_value, parse_number, volume_value};
use ndq_core::{
    normalize_symbol_data, read_json_file, write_json_file, Category, Financials,
    NormalizedSymbolRecord, RawSymbolRecord, Symbol, UtcDateTime,
};
use ndq_tests::{info_payload, news_payload};
use serde_json::{json, Value};

fn raw_record() -> RawSymbolRecord {
    RawSymbolRecord::new(
        Symbol::parse("AAPL").expect("valid symbol"),
        UtcDateTime::parse("2024-05-01T12:00:00Z").expect("valid timestamp"),
    )
}

fn close_to(actual: Option<f64>, expected: f64) -> bool {
    actual.is_some_and(|value| (value - expected).abs() < 1e-9)
}

fn financials_payload() -> Value {
    json!({
        "incomeStatementTable": {
            "headers": {"value1": "Period Ending:", "value2": "9/30/2023", "value3": "9/24/2022"},
            "rows": [{"value1": "Total Revenue", "label": "Total Revenue", "value2": "$383,285,000", "value3": "$394,328,000"}]
        },
        "balanceSheetTable": {"rows": [{"label": "Cash", "value2": "$29,965,000"}]},
        "cashFlowTable": {"rows": []},
        "financialRatiosTable": {"rows": [{"value1": "Gross Margin", "value2": "44.13%"}]}
    })
}

#[test]
fn vendor_strings_become_typed_quote() {
    // Given: an info payload with currency, signed and percent strings
    let record = raw_record().with_payload(Category::Info, info_payload());

    // When: normalizing
    let normalized = normalize_symbol_data(&record);

    // Then: the quote is numeric and the percent is a fraction
    let quote = &normalized.quote;
    assert_eq!(quote.price, Some(150.25));
    assert_eq!(quote.change, Some(-1.10));
    assert!(close_to(quote.change_percent, -0.0073));
    assert_eq!(quote.volume, Some(48_123_456));
    assert_eq!(quote.ask_size, Some(1_200));
    assert_eq!(quote.previous_close, Some(151.35));
    assert_eq!(quote.is_realtime, Some(false));

    assert_eq!(normalized.metadata.symbol.as_deref(), Some("AAPL"));
    assert_eq!(
        normalized.metadata.company_name.as_deref(),
        Some("Apple Inc. Common Stock")
    );
    assert_eq!(normalized.metadata.is_nasdaq_100, Some(true));
    assert_eq!(normalized.key_metrics.week_52_low, Some(124.17));
    assert_eq!(normalized.key_metrics.week_52_high, Some(199.62));
    assert_eq!(normalized.key_metrics.day_high, Some(152.10));
}

#[test]
fn malformed_section_does_not_affect_others() {
    // Given: a valid info payload and a financials payload of the wrong shape
    let record = raw_record()
        .with_payload(Category::Info, info_payload())
        .with_payload(Category::NewsArticles, news_payload())
        .with_payload(
            Category::FinancialsAnnual,
            json!({"incomeStatementTable": {"rows": "not a table"}}),
        )
        .with_payload(Category::FinancialsQuarterly, financials_payload());

    // When: normalizing
    let normalized = normalize_symbol_data(&record);

    // Then: financials fall back to empty while quote, metadata and news survive
    assert_eq!(normalized.financials, Financials::default());
    assert_eq!(normalized.quote.price, Some(150.25));
    assert_eq!(normalized.quote.change, Some(-1.10));
    assert_eq!(normalized.quote.change_percent, Some(-0.0073));
    assert_eq!(
        normalized.metadata.company_name.as_deref(),
        Some("Apple Inc. Common Stock")
    );
    assert_eq!(normalized.news.articles[0].related_symbols, vec!["AAPL", "MSFT"]);
}

#[test]
fn unusable_financials_payloads_degrade_to_empty() {
    let shapes = [
        Value::Null,
        json!("garbage"),
        json!([1, 2]),
        json!({"balanceSheetTable": {"rows": [1]}}),
    ];

    for shape in shapes {
        let record = raw_record()
            .with_payload(Category::Info, info_payload())
            .with_payload(Category::FinancialsAnnual, shape.clone());

        let normalized = normalize_symbol_data(&record);

        assert_eq!(normalized.financials, Financials::default(), "payload {shape}");
        assert_eq!(normalized.quote.price, Some(150.25), "payload {shape}");
        assert_eq!(
            normalized.metadata.company_name.as_deref(),
            Some("Apple Inc. Common Stock"),
            "payload {shape}"
        );
    }
}

#[test]
fn every_section_is_present_for_an_empty_record() {
    let normalized = normalize_symbol_data(&raw_record());

    let json = serde_json::to_value(&normalized).expect("serializable");
    let object = json.as_object().expect("object");
    for section in NormalizedSymbolRecord::SECTIONS {
        assert!(object.contains_key(section), "missing section {section}");
    }
    assert_eq!(object.len(), NormalizedSymbolRecord::SECTIONS.len());

    assert_eq!(normalized.metadata.symbol.as_deref(), Some("AAPL"));
    assert!(normalized.metadata.fetched_at.is_some());
    assert_eq!(normalized.quote.price, None);
    assert!(normalized.sec_filings.is_empty());
}

#[test]
fn shares_outstanding_scale_from_millions() {
    let record = raw_record().with_payload(
        Category::InstitutionalHoldings,
        json!({"ownershipSummary": {
            "ShareoutstandingTotal": {"label": "Total Shares Outstanding (millions)", "value": "15,441"},
            "SharesOutstandingPCT": {"label": "Institutional Ownership", "value": "61.36%"},
            "TotalHoldingsValue": {"label": "Total Value of Holdings (millions)", "value": "$1,601,187"}
        }}),
    );

    let normalized = normalize_symbol_data(&record);

    assert_eq!(normalized.key_metrics.shares_outstanding_millions, Some(15_441));
    assert_eq!(
        normalized.key_metrics.shares_outstanding,
        Some(15_441_000_000)
    );
    let summary = &normalized.ownership.institutional.summary;
    assert_eq!(summary.shares_outstanding_millions, Some(15_441));
    assert!(close_to(summary.institutional_ownership_percent, 0.6136));
    assert_eq!(summary.total_value_millions, Some(1_601_187.0));
}

#[test]
fn numeric_input_normalizes_the_same_as_strings() {
    // Given: the same quote encoded once as vendor strings and once as numbers
    let strings = raw_record().with_payload(
        Category::Info,
        json!({"primaryData": {"lastSalePrice": "$150.25", "volume": "1,000"}}),
    );
    let numbers = raw_record().with_payload(
        Category::Info,
        json!({"primaryData": {"lastSalePrice": 150.25, "volume": 1000}}),
    );

    // When: normalizing both, twice
    let first = normalize_symbol_data(&numbers);
    let second = normalize_symbol_data(&numbers);

    // Then: the results agree and re-parsing a number is a no-op
    assert_eq!(first, second);
    assert_eq!(first.quote, normalize_symbol_data(&strings).quote);
    assert_eq!(number_value(Some(&json!(150.25))), Some(150.25));
    assert_eq!(volume_value(Some(&json!(1000))), Some(1000));
    assert_eq!(parse_number("150.25"), Some(150.25));
}

#[test]
fn related_symbols_are_upper_cased_tickers() {
    let record = raw_record().with_payload(Category::NewsArticles, news_payload());

    let normalized = normalize_symbol_data(&record);

    let article = normalized.news.articles.first().expect("one article");
    assert_eq!(article.related_symbols, vec!["AAPL", "MSFT"]);
    assert_eq!(article.publisher.as_deref(), Some("Zacks"));
    assert_eq!(article.date.as_deref(), Some("Apr 30, 2024"));
}

#[test]
fn financial_tables_keep_period_columns() {
    let record = raw_record().with_payload(Category::FinancialsAnnual, financials_payload());

    let annual = normalize_symbol_data(&record).financials.annual;

    assert_eq!(
        annual.period_headers.get("value2").map(String::as_str),
        Some("9/30/2023")
    );
    let revenue = annual.income_statement.first().expect("revenue row");
    assert_eq!(revenue.line_item.as_deref(), Some("Total Revenue"));
    assert_eq!(revenue.values.get("value2"), Some(&Some(383_285_000.0)));
    assert_eq!(annual.balance_sheet.len(), 1);

    let margin = annual.financial_ratios.first().expect("ratio row");
    assert_eq!(margin.ratio_name.as_deref(), Some("Gross Margin"));
    assert!(close_to(margin.values.get("value2").copied().flatten(), 0.4413));
}

#[test]
fn raw_file_round_trip_normalizes_identically() {
    // Given: a raw record written to disk
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("AAPL_raw.json");
    let record = raw_record()
        .with_payload(Category::Info, info_payload())
        .with_payload(Category::NewsArticles, news_payload());
    write_json_file(&path, &record).expect("written");

    // When: reading it back and normalizing
    let restored: RawSymbolRecord = read_json_file(&path).expect("read back");

    // Then: absent categories stay absent and the output is unchanged
    assert_eq!(restored, record);
    assert!(!restored.is_available(Category::Dividends));
    assert_eq!(normalize_symbol_data(&restored), normalize_symbol_data(&record));

    let on_disk: Value =
        serde_json::from_str(&std::fs::read_to_string(&path).expect("readable")).expect("json");
    assert!(on_disk["dividends"].is_null());
    assert_eq!(on_disk["symbol"], "AAPL");
}
