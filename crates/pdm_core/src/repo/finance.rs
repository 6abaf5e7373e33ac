//! Read-only finance queries over the finance collection.

use super::collection::Collection;
use crate::model::finance::FinanceRecord;
use crate::service::finance::{
    filter_records, generate_report, FinanceQuery, FinanceQueryError, FinanceReport,
};

impl Collection<FinanceRecord> {
    /// Records matching `query`, in insertion order.
    pub fn filter(
        &self,
        query: &FinanceQuery,
    ) -> Result<Vec<&FinanceRecord>, FinanceQueryError> {
        filter_records(self.list(), query)
    }

    /// Income/expense totals over the records matching `query`.
    pub fn report(&self, query: &FinanceQuery) -> Result<FinanceReport, FinanceQueryError> {
        generate_report(self.list(), query)
    }
}
