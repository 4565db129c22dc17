use crate::error::NormalizeError;
use crate::parse::{number_value, percentage_value, text_value, volume_value};
use crate::{
    Category, InsiderTrade, Institutional, InstitutionalHolder, InstitutionalSummary, Ownership,
    RawSymbolRecord,
};

use super::json::Node;

pub const MAX_TOP_HOLDERS: usize = 10;
pub const MAX_INSIDER_TRADES: usize = 20;

pub fn normalize_ownership(record: &RawSymbolRecord) -> Result<Ownership, NormalizeError> {
    let holdings = Node::category(record, Category::InstitutionalHoldings);
    let summary = holdings.get("ownershipSummary")?;
    let transactions = holdings.get("holdingsTransactions")?;

    let summary = InstitutionalSummary {
        shares_outstanding_millions: volume_value(
            summary.at(&["ShareoutstandingTotal", "value"])?.value(),
        ),
        institutional_ownership_percent: percentage_value(
            summary.at(&["SharesOutstandingPCT", "value"])?.value(),
        ),
        total_value_millions: number_value(summary.at(&["TotalHoldingsValue", "value"])?.value()),
        total_institutional_holders: volume_value(transactions.field("totalRecords")?),
        total_shares_held: volume_value(transactions.field("sharesHeld")?),
    };

    let mut top_holders = Vec::new();
    for row in transactions
        .at(&["table", "rows"])?
        .items()?
        .into_iter()
        .take(MAX_TOP_HOLDERS)
    {
        top_holders.push(InstitutionalHolder {
            institution: text_value(row.field("ownerName")?),
            shares: volume_value(row.field("sharesHeld")?),
            change: volume_value(row.field("sharesChange")?),
            change_percent: percentage_value(row.field("sharesChangePCT")?),
            value_thousands: number_value(row.field("marketValue")?),
            date: text_value(row.field("date")?),
        });
    }

    let mut insider_trades = Vec::new();
    for row in Node::category(record, Category::InsiderTrades)
        .at(&["transactionTable", "rows"])?
        .items()?
        .into_iter()
        .take(MAX_INSIDER_TRADES)
    {
        insider_trades.push(InsiderTrade {
            date: text_value(row.field("lastDate")?),
            insider: text_value(row.field("insider")?),
            title: text_value(row.field("position")?),
            transaction: text_value(row.field("transactionType")?),
            shares: volume_value(row.field("sharesTraded")?),
            price: number_value(row.field("lastPrice")?),
            shares_held: volume_value(row.field("sharesHeld")?),
        });
    }

    Ok(Ownership {
        institutional: Institutional {
            summary,
            top_holders,
        },
        insider_trades,
    })
}
