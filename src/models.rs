use chrono::{Datelike, NaiveDate};
use serde::Serialize;

pub const ONSHORE: &str = "Onshore";
pub const OFFSHORE: &str = "Offshore";

pub const MONTH_LABELS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CertificationRecord {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub organization: String,
    pub role: String,
    pub email: String,
    pub certification_type: String,
    /// Raw date text as received, kept for display.
    pub certification_date_raw: String,
    pub certification_date: Option<NaiveDate>,
    pub country: String,
    pub customer: String,
    pub delivery_model: String,
}

impl CertificationRecord {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }

    pub fn year(&self) -> Option<i32> {
        self.certification_date.map(|date| date.year())
    }

    /// Zero-based month index, January = 0.
    pub fn month0(&self) -> Option<u32> {
        self.certification_date.map(|date| date.month0())
    }

    pub fn delivery(&self) -> DeliveryModel {
        DeliveryModel::classify(&self.delivery_model)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum DeliveryModel {
    Onshore,
    Offshore,
    Other,
}

impl DeliveryModel {
    pub fn classify(value: &str) -> Self {
        match value {
            ONSHORE => Self::Onshore,
            OFFSHORE => Self::Offshore,
            _ => Self::Other,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CountEntry {
    pub key: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthBucket {
    pub month: u32,
    pub label: &'static str,
    pub total: usize,
    pub onshore: usize,
    pub offshore: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeliverySummary {
    pub total: usize,
    pub onshore: usize,
    pub offshore: usize,
    pub onshore_pct: f64,
    pub offshore_pct: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecordRow {
    pub id: String,
    pub name: String,
    pub certification_type: String,
    pub organization: String,
    pub country: String,
    pub delivery_model: String,
    pub date: String,
}

impl From<&CertificationRecord> for RecordRow {
    fn from(record: &CertificationRecord) -> Self {
        Self {
            id: record.id.clone(),
            name: record.full_name(),
            certification_type: record.certification_type.clone(),
            organization: record.organization.clone(),
            country: record.country.clone(),
            delivery_model: record.delivery_model.clone(),
            date: record.certification_date_raw.clone(),
        }
    }
}

#[cfg(test)]
pub(crate) fn sample_record(
    id: &str,
    certification_type: &str,
    country: &str,
    date: &str,
    delivery_model: &str,
) -> CertificationRecord {
    CertificationRecord {
        id: id.to_string(),
        first_name: "Avery".to_string(),
        last_name: "Lee".to_string(),
        organization: "Accenture".to_string(),
        role: "Engineer".to_string(),
        email: "avery.lee@example.com".to_string(),
        certification_type: certification_type.to_string(),
        certification_date_raw: date.to_string(),
        certification_date: NaiveDate::parse_from_str(date, "%Y-%m-%d").ok(),
        country: country.to_string(),
        customer: "Acme".to_string(),
        delivery_model: delivery_model.to_string(),
    }
}
