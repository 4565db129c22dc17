use std::collections::BTreeMap;

use crate::error::NormalizeError;
use crate::parse::{number_value, percentage_value, text_value};
use crate::{Category, FinancialStatements, Financials, RatioRow, RawSymbolRecord, StatementRow};

use super::json::Node;

pub fn normalize_financials(record: &RawSymbolRecord) -> Result<Financials, NormalizeError> {
    Ok(Financials {
        annual: statements(&Node::category(record, Category::FinancialsAnnual))?,
        quarterly: statements(&Node::category(record, Category::FinancialsQuarterly))?,
    })
}

fn statements(payload: &Node<'_>) -> Result<FinancialStatements, NormalizeError> {
    let income = payload.get("incomeStatementTable")?;

    let period_headers = income
        .get("headers")?
        .entries()?
        .into_iter()
        .filter_map(|(column, label)| Some((column.to_string(), label.as_str()?.to_string())))
        .collect::<BTreeMap<_, _>>();

    Ok(FinancialStatements {
        period_headers,
        income_statement: statement_rows(&income)?,
        balance_sheet: statement_rows(&payload.get("balanceSheetTable")?)?,
        cash_flow: statement_rows(&payload.get("cashFlowTable")?)?,
        financial_ratios: ratio_rows(&payload.get("financialRatiosTable")?)?,
    })
}

/// `label` names the line item; every other column is a period value.
fn statement_rows(table: &Node<'_>) -> Result<Vec<StatementRow>, NormalizeError> {
    let mut rows = Vec::new();
    for row in table.get("rows")?.items()? {
        let mut statement = StatementRow::default();
        for (column, value) in row.entries()? {
            if column == "label" {
                statement.line_item = text_value(Some(value));
            } else {
                statement
                    .values
                    .insert(column.to_string(), number_value(Some(value)));
            }
        }
        rows.push(statement);
    }
    Ok(rows)
}

/// `value1` names the ratio; the other columns are percentages.
fn ratio_rows(table: &Node<'_>) -> Result<Vec<RatioRow>, NormalizeError> {
    let mut rows = Vec::new();
    for row in table.get("rows")?.items()? {
        let mut ratio = RatioRow::default();
        for (column, value) in row.entries()? {
            if column == "value1" {
                ratio.ratio_name = text_value(Some(value));
            } else {
                ratio
                    .values
                    .insert(column.to_string(), percentage_value(Some(value)));
            }
        }
        rows.push(ratio);
    }
    Ok(rows)
}
