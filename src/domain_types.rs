pub mod trading_row;
pub mod price_table;
pub mod request;
pub mod enriched_row;

pub use trading_row::TradingRow;
pub use price_table::{PriceTable, TableError};
pub use request::{
    BreakoutParams, WindowRequest, DEFAULT_HOLDING_PERIOD, DEFAULT_PRICE_CHANGE_THRESHOLD_PCT,
    DEFAULT_VOLUME_THRESHOLD_PCT,
};
pub use enriched_row::EnrichedRow;
