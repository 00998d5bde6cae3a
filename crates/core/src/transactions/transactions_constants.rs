/// Transaction types
///
/// The closed set of history entries the valuation engine understands.

/// Purchase of fund shares. Increases shares and cost basis.
pub const TRANSACTION_TYPE_BUY: &str = "BUY";

/// Sale of fund shares. Decreases shares and reduces cost basis proportionally.
pub const TRANSACTION_TYPE_SELL: &str = "SELL";

/// Dividend reinvestment recorded as a transaction. Counts toward dividend income;
/// its shares enter the holding through the linked dividend, not as a buy.
pub const TRANSACTION_TYPE_DIVIDEND: &str = "DIVIDEND";

/// Stand-alone fee. The amount is carried in `cost_per_share` and is added to cost basis.
pub const TRANSACTION_TYPE_FEE: &str = "FEE";
