use std::collections::{BTreeMap, HashMap};

use crate::models::{
    CertificationRecord, CountEntry, DeliveryModel, DeliverySummary, MonthBucket, MONTH_LABELS,
};

pub const TOP_COUNTRIES: usize = 10;

/// Counts records per key in first-seen order. Blank keys are skipped.
pub fn group_by<'a, I, F>(records: I, key: F) -> Vec<CountEntry>
where
    I: IntoIterator<Item = &'a CertificationRecord>,
    F: Fn(&'a CertificationRecord) -> &'a str,
{
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut entries: Vec<CountEntry> = Vec::new();

    for record in records {
        let value = key(record).trim();
        if value.is_empty() {
            continue;
        }

        match index.get(value) {
            Some(&pos) => entries[pos].count += 1,
            None => {
                index.insert(value, entries.len());
                entries.push(CountEntry {
                    key: value.to_string(),
                    count: 1,
                });
            }
        }
    }

    entries
}

pub fn by_type(records: &[&CertificationRecord]) -> Vec<CountEntry> {
    group_by(records.iter().copied(), |r| r.certification_type.as_str())
}

pub fn by_delivery_model(records: &[&CertificationRecord]) -> Vec<CountEntry> {
    group_by(records.iter().copied(), |r| r.delivery_model.as_str())
}

pub fn by_country(records: &[&CertificationRecord]) -> Vec<CountEntry> {
    group_by(records.iter().copied(), |r| r.country.as_str())
}

/// Sorts by count descending, keeping grouping order on ties.
pub fn top_n(mut entries: Vec<CountEntry>, limit: usize) -> Vec<CountEntry> {
    entries.sort_by(|a, b| b.count.cmp(&a.count));
    entries.truncate(limit);
    entries
}

pub fn top_countries(records: &[&CertificationRecord], limit: usize) -> Vec<CountEntry> {
    top_n(by_country(records), limit)
}

pub fn monthly_trend(records: &[&CertificationRecord]) -> Vec<MonthBucket> {
    let mut buckets: Vec<MonthBucket> = MONTH_LABELS
        .into_iter()
        .zip(0u32..)
        .map(|(label, month)| MonthBucket {
            month,
            label,
            total: 0,
            onshore: 0,
            offshore: 0,
        })
        .collect();

    for record in records {
        let Some(month) = record.month0() else {
            continue;
        };
        let bucket = &mut buckets[month as usize];
        bucket.total += 1;
        match record.delivery() {
            DeliveryModel::Onshore => bucket.onshore += 1,
            DeliveryModel::Offshore => bucket.offshore += 1,
            DeliveryModel::Other => {}
        }
    }

    buckets
}

/// Counts per `YYYY-MM`, oldest first. Undated records are skipped.
pub fn by_year_month(records: &[&CertificationRecord]) -> Vec<CountEntry> {
    let mut counts: BTreeMap<String, usize> = BTreeMap::new();

    for record in records {
        if let Some(date) = record.certification_date {
            *counts.entry(date.format("%Y-%m").to_string()).or_insert(0) += 1;
        }
    }

    counts
        .into_iter()
        .map(|(key, count)| CountEntry { key, count })
        .collect()
}

pub fn delivery_summary(records: &[&CertificationRecord]) -> DeliverySummary {
    let total = records.len();
    let onshore = records
        .iter()
        .filter(|r| r.delivery() == DeliveryModel::Onshore)
        .count();
    let offshore = records
        .iter()
        .filter(|r| r.delivery() == DeliveryModel::Offshore)
        .count();

    DeliverySummary {
        total,
        onshore,
        offshore,
        onshore_pct: percentage(onshore, total),
        offshore_pct: percentage(offshore, total),
    }
}

pub fn percentage(count: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        count as f64 / total as f64 * 100.0
    }
}
