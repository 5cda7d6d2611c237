use anyhow::Result;
use async_trait::async_trait;

use crate::declare::StockQuote;

/// KLSE 行情網站
pub mod i3investor;

#[async_trait]
pub trait StockInfo {
    /// 取得股票目前的報價含漲跌、漲幅
    async fn get_stock_quote(&self, stock_symbol: &str) -> Result<StockQuote>;
}
