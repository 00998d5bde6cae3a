use chrono::NaiveDate;

use super::{RealizedGainLossRecord, RealizedGainTotals};

/// Sums realized gain/loss, sale proceeds and cost basis over records dated on
/// or before `target_date`.
///
/// Records must be ascending by transaction date; the scan stops at the first
/// later record. An empty slice yields zero totals.
pub fn aggregate_realized_gains(
    records: &[RealizedGainLossRecord],
    target_date: NaiveDate,
) -> RealizedGainTotals {
    let mut totals = RealizedGainTotals::default();
    for record in records {
        if record.transaction_date > target_date {
            break;
        }
        totals.add(record);
    }
    totals
}

impl RealizedGainTotals {
    pub fn add(&mut self, record: &RealizedGainLossRecord) {
        self.realized_gain += record.realized_gain_loss;
        self.sale_proceeds += record.sale_proceeds;
        self.cost_basis += record.cost_basis;
    }
}
