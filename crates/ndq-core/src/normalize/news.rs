use serde_json::Value;

use crate::error::NormalizeError;
use crate::parse::text_value;
use crate::{Category, News, NewsArticle, PressRelease, RawSymbolRecord, SecFiling};

use super::json::Node;

/// Filings from `sec_filings.rows`, or `sec_filings.data.rows` when the
/// table is nested one level deeper.
pub fn normalize_sec_filings(record: &RawSymbolRecord) -> Result<Vec<SecFiling>, NormalizeError> {
    let payload = Node::category(record, Category::SecFilings);
    let mut rows = payload.get("rows")?;
    if !rows.is_present() {
        rows = payload.at(&["data", "rows"])?;
    }

    let mut filings = Vec::new();
    for row in rows.items()? {
        filings.push(SecFiling {
            date_filed: text_value(row.field("filed")?),
            form_type: text_value(row.field("formType")?),
            description: text_value(row.field("description")?),
            url: text_value(row.field("url")?),
        });
    }
    Ok(filings)
}

pub fn normalize_news(record: &RawSymbolRecord) -> Result<News, NormalizeError> {
    let mut press_releases = Vec::new();
    for row in Node::category(record, Category::PressReleases)
        .get("rows")?
        .items()?
    {
        press_releases.push(PressRelease {
            date: text_value(row.field("created")?),
            title: text_value(row.field("title")?),
            url: text_value(row.field("url")?),
            publisher: text_value(row.field("publisher")?),
        });
    }

    let mut articles = Vec::new();
    for row in Node::category(record, Category::NewsArticles)
        .get("rows")?
        .items()?
    {
        let tags = row
            .get("related_symbols")?
            .items()?
            .iter()
            .filter_map(|tag| tag.value().and_then(Value::as_str))
            .collect::<Vec<_>>();

        articles.push(NewsArticle {
            date: text_value(row.field("created")?),
            title: text_value(row.field("title")?),
            url: text_value(row.field("url")?),
            publisher: text_value(row.field("publisher")?),
            related_symbols: related_symbols(tags),
        });
    }

    Ok(News {
        press_releases,
        articles,
    })
}

/// `"aapl|stocks"` tags to upper-cased symbols, dropping the suffix.
pub fn related_symbols<'a>(tags: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    tags.into_iter()
        .map(|tag| {
            tag.split_once('|')
                .map_or(tag, |(symbol, _)| symbol)
                .to_uppercase()
        })
        .collect()
}
