use serde::Serialize;

use crate::aggregate;
use crate::filter::{self, FilterSelection};
use crate::models::{CertificationRecord, CountEntry, DeliverySummary, MonthBucket, RecordRow};

/// Every table the dashboard renders for one selection.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardView<'a> {
    pub selection: FilterSelection,
    #[serde(serialize_with = "serialize_rows")]
    pub records: Vec<&'a CertificationRecord>,
    pub summary: DeliverySummary,
    pub by_type: Vec<CountEntry>,
    pub by_delivery_model: Vec<CountEntry>,
    pub top_countries: Vec<CountEntry>,
    pub monthly_trend: Vec<MonthBucket>,
    pub by_year_month: Vec<CountEntry>,
}

impl<'a> DashboardView<'a> {
    pub fn compute(records: &'a [CertificationRecord], selection: &FilterSelection) -> Self {
        Self::compute_with_limit(records, selection, aggregate::TOP_COUNTRIES)
    }

    pub fn compute_with_limit(
        records: &'a [CertificationRecord],
        selection: &FilterSelection,
        country_limit: usize,
    ) -> Self {
        let view = filter::apply(records, selection);

        Self {
            selection: selection.clone(),
            summary: aggregate::delivery_summary(&view),
            by_type: aggregate::by_type(&view),
            by_delivery_model: aggregate::by_delivery_model(&view),
            top_countries: aggregate::top_countries(&view, country_limit),
            monthly_trend: aggregate::monthly_trend(&view),
            by_year_month: aggregate::by_year_month(&view),
            records: view,
        }
    }

    pub fn rows(&self) -> Vec<RecordRow> {
        self.records.iter().map(|record| RecordRow::from(*record)).collect()
    }
}

fn serialize_rows<S>(records: &[&CertificationRecord], serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.collect_seq(records.iter().map(|record| RecordRow::from(*record)))
}
