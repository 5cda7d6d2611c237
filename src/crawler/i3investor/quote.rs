use anyhow::{anyhow, Result};
use async_trait::async_trait;
use chrono::{SecondsFormat, Utc};
use concat_string::concat_string;
use reqwest::header;
use scraper::Html;

use crate::{
    crawler::{i3investor::I3Investor, StockInfo},
    declare::{PriceChange, StockQuote},
    util::{self, http::element},
};

/// Last-traded price cell of the quote header table.
const PRICE_SELECTOR: &str = "table#stockhdr > tbody > tr:last-child > td:first-child";

/// Composite label of the form `"<name>: <SHORT> (<code>)"`.
const LABEL_SELECTOR: &str = "#content > table:nth-child(2) > tbody > tr > td:nth-child(1) \
     > div.margint10 > table:nth-child(2) > tbody > tr > td:nth-child(1) > span";

const COMPANY_NAME_SELECTOR: &str = "#content > table:nth-child(2) > tbody > tr > td:nth-child(1) \
     > div.margint10 > table:nth-child(2) > tbody > tr > td:nth-child(3) > span";

/// Daily change, a two-token string such as `"+0.05 (4.20%)"`.
const CHANGE_SELECTOR: &str = "#stockhdr > tbody > tr:nth-child(2) > td:nth-child(2) > span";

const ACCEPT: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8";

#[async_trait]
impl StockInfo for I3Investor {
    async fn get_stock_quote(&self, stock_symbol: &str) -> Result<StockQuote> {
        fetch_quote(&self.host, stock_symbol).await
    }
}

/// Fetches the quote page for `stock_symbol` from `host` and extracts it.
///
/// One best-effort GET, no retry; the identifier is URL-encoded before being
/// interpolated into the path.
async fn fetch_quote(host: &str, stock_symbol: &str) -> Result<StockQuote> {
    let url = concat_string!(
        "https://",
        host,
        "/servlets/stk/",
        urlencoding::encode(stock_symbol),
        ".jsp"
    );

    let mut headers = header::HeaderMap::new();
    headers.insert(header::ACCEPT, header::HeaderValue::from_static(ACCEPT));

    let text = util::http::get(&url, Some(headers)).await?;

    extract(&text)
}

/// Pulls the quote fields out of the fetched page.
///
/// Every field is scraped independently and its absence is tolerated: the
/// upstream markup carries no stability guarantee, so a partially populated
/// quote is preferred over a hard failure. Only a body that cannot be read as
/// a page at all is an error.
fn extract(html: &str) -> Result<StockQuote> {
    if html.trim().is_empty() {
        return Err(anyhow!("Failed to parse quote page: response body is empty"));
    }

    let document = Html::parse_document(html);
    let stock_price = element::select_to_string(&document, PRICE_SELECTOR);
    let label = element::select_to_string(&document, LABEL_SELECTOR);
    let company_name = element::select_to_string(&document, COMPANY_NAME_SELECTOR);
    let change_text = element::select_to_string(&document, CHANGE_SELECTOR);

    let (name, ticker) = split_label(&label);

    Ok(StockQuote {
        date_retrieved: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        company_name,
        name,
        ticker,
        stock_price,
        change: split_change(&change_text),
    })
}

/// Splits the composite label `"<name>: <SHORT> (<code>)"` into the short
/// display name and the code with its enclosing parentheses stripped.
/// Missing tokens yield `None`; this is a positional heuristic, not a grammar.
fn split_label(label: &str) -> (Option<String>, Option<String>) {
    let rhs = match label.split(':').nth(1) {
        Some(rhs) => rhs.trim(),
        None => return (None, None),
    };

    let mut tokens = rhs.split(' ');
    let name = tokens
        .next()
        .filter(|t| !t.is_empty())
        .map(str::to_string);
    let ticker = tokens
        .next()
        .map(strip_enclosing)
        .filter(|t| !t.is_empty());

    (name, ticker)
}

/// Splits the daily-change string into its amount and percentage parts.
///
/// The percentage is rebuilt as the sign character of the amount token plus
/// the second token with its enclosing parentheses stripped. This odd
/// recombination matches the endpoint's established output and is kept
/// verbatim for compatibility.
fn split_change(change: &str) -> PriceChange {
    let mut tokens = change.trim().split(' ');
    let first = tokens.next().unwrap_or_default();
    let second = tokens.next().unwrap_or_default();

    let sign = first.chars().next().map(String::from).unwrap_or_default();
    let percentage = concat_string!(sign, strip_enclosing(second));

    PriceChange {
        amount: (!first.is_empty()).then(|| first.to_string()),
        percentage,
    }
}

/// Drops the first and last character of a token, e.g. `"(1234)"` -> `"1234"`.
/// Tokens of two characters or fewer collapse to an empty string.
fn strip_enclosing(token: &str) -> String {
    let chars: Vec<char> = token.chars().collect();
    if chars.len() <= 2 {
        return String::new();
    }

    chars[1..chars.len() - 1].iter().collect()
}
