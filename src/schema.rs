use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::Deserialize;
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::error::SourceError;
use crate::models::CertificationRecord;

/// Source key for each record attribute.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FieldMap {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub organization: String,
    pub role: String,
    pub email: String,
    pub certification_type: String,
    pub certification_date: String,
    pub country: String,
    pub customer: String,
    pub delivery_model: String,
}

impl Default for FieldMap {
    fn default() -> Self {
        Self::english()
    }
}

impl FieldMap {
    pub fn english() -> Self {
        Self {
            id: "_id".to_string(),
            first_name: "FirstName".to_string(),
            last_name: "LastName".to_string(),
            organization: "Company".to_string(),
            role: "JobRole".to_string(),
            email: "Email".to_string(),
            certification_type: "CertificationType".to_string(),
            certification_date: "CertificationDate".to_string(),
            country: "Country".to_string(),
            customer: "Customer".to_string(),
            delivery_model: "DeliveryModel".to_string(),
        }
    }

    pub fn italian() -> Self {
        Self {
            id: "_id".to_string(),
            first_name: "nome".to_string(),
            last_name: "cognome".to_string(),
            organization: "azienda".to_string(),
            role: "jobRole".to_string(),
            email: "email".to_string(),
            certification_type: "tipoCertificazione".to_string(),
            certification_date: "dataCertificazione".to_string(),
            country: "country".to_string(),
            customer: "customer".to_string(),
            delivery_model: "deliveryModel".to_string(),
        }
    }

    pub fn from_json(raw: &str) -> Result<Self, SourceError> {
        Ok(serde_json::from_str(raw)?)
    }

    pub fn record_from_object(&self, object: &Map<String, Value>) -> CertificationRecord {
        let text = |key: &String| object.get(key).map(value_text).unwrap_or_default();
        let id = object
            .get(&self.id)
            .map(id_text)
            .filter(|id| !id.is_empty())
            .unwrap_or_else(|| format!("import-{}", Uuid::new_v4()));
        let raw_date = text(&self.certification_date);
        let certification_date = parse_date(&raw_date);

        if certification_date.is_none() {
            tracing::debug!(record = %id, date = %raw_date, "certification date not parsable");
        }

        CertificationRecord {
            id,
            first_name: text(&self.first_name),
            last_name: text(&self.last_name),
            organization: text(&self.organization),
            role: text(&self.role),
            email: text(&self.email),
            certification_type: text(&self.certification_type),
            certification_date_raw: raw_date,
            certification_date,
            country: text(&self.country),
            customer: text(&self.customer),
            delivery_model: text(&self.delivery_model),
        }
    }

    /// Maps a JSON array payload. Entries that are not objects are skipped.
    pub fn records_from_json(
        &self,
        payload: &Value,
    ) -> Result<Vec<CertificationRecord>, SourceError> {
        let Value::Array(items) = payload else {
            return Err(SourceError::UnexpectedShape(format!(
                "expected a JSON array of records, got {}",
                kind_of(payload)
            )));
        };

        let mut records = Vec::with_capacity(items.len());
        for (position, item) in items.iter().enumerate() {
            match item {
                Value::Object(object) => records.push(self.record_from_object(object)),
                other => {
                    tracing::debug!(position, kind = kind_of(other), "skipping non-object entry");
                }
            }
        }

        Ok(records)
    }
}

pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(stamp) = DateTime::parse_from_rfc3339(raw) {
        return Some(stamp.date_naive());
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(stamp) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(stamp.date());
        }
    }
    NaiveDate::parse_from_str(raw, "%Y/%m/%d").ok()
}

fn value_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(text) => text.trim().to_string(),
        Value::Bool(flag) => flag.to_string(),
        Value::Number(number) => number.to_string(),
        other => other.to_string(),
    }
}

fn id_text(value: &Value) -> String {
    match value.get("$oid") {
        Some(oid) => value_text(oid),
        None => value_text(value),
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
