use serde::Serialize;

/// 行情快照, the normalized quote returned by the `/api/quote` endpoint.
///
/// Field names mirror the JSON contract of the existing dashboard endpoint,
/// so renames are fixed and must not change.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct StockQuote {
    /// Timestamp of extraction, set by the server, not read from the page.
    #[serde(rename = "dateRetrieved")]
    pub date_retrieved: String,
    /// Free-text company name; empty when the node is absent from the page.
    #[serde(rename = "companyName")]
    pub company_name: String,
    /// Short display name token taken from the composite label field.
    pub name: Option<String>,
    /// Ticker/code token from the same label, enclosing characters stripped.
    pub ticker: Option<String>,
    /// Last-traded price as rendered by the page, kept as text.
    #[serde(rename = "stockPrice")]
    pub stock_price: String,
    pub change: PriceChange,
}

/// Daily change split from a single `"<amount> (<percentage>)"` string.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct PriceChange {
    pub amount: Option<String>,
    pub percentage: String,
}
