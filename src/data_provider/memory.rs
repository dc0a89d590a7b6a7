use async_trait::async_trait;
use chrono::NaiveDate;
use std::collections::HashMap;

use super::provider::{restrict_to_range, MarketDataProvider, ProviderError, ProviderResult};
use crate::domain_types::PriceTable;

/// 記憶體內的行情資料提供者，每個代碼保存一份完整價格表
#[derive(Debug, Default, Clone)]
pub struct InMemoryDataProvider {
    tables: HashMap<String, PriceTable>,
}

impl InMemoryDataProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// 註冊價格表，代碼取自價格表本身
    pub fn with_table(mut self, table: PriceTable) -> Self {
        self.insert(table);
        self
    }

    pub fn insert(&mut self, table: PriceTable) {
        self.tables.insert(table.ticker().to_uppercase(), table);
    }
}

#[async_trait]
impl MarketDataProvider for InMemoryDataProvider {
    fn name(&self) -> &str {
        "memory"
    }

    async fn fetch(
        &self,
        ticker: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> ProviderResult<PriceTable> {
        let table = self
            .tables
            .get(&ticker.to_uppercase())
            .ok_or_else(|| ProviderError::UnknownTicker(ticker.to_string()))?;

        Ok(restrict_to_range(table, start, end))
    }
}
