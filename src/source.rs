use std::collections::HashMap;
use std::path::Path;

use serde_json::{Map, Value};

use crate::error::SourceError;
use crate::models::CertificationRecord;
use crate::schema::FieldMap;

pub fn endpoint_url(base_url: &str, endpoint: &str) -> Result<reqwest::Url, SourceError> {
    let joined = format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        endpoint.trim_start_matches('/')
    );
    reqwest::Url::parse(&joined).map_err(|e| SourceError::InvalidUrl {
        url: joined.clone(),
        reason: e.to_string(),
    })
}

pub async fn fetch_records(
    client: &reqwest::Client,
    base_url: &str,
    endpoint: &str,
    fields: &FieldMap,
) -> Result<Vec<CertificationRecord>, SourceError> {
    let url = endpoint_url(base_url, endpoint)?;
    tracing::info!(url = %url, "fetching certifications");

    let response = client.get(url.clone()).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(SourceError::Status {
            status,
            url: url.to_string(),
        });
    }

    let payload: Value = response.json().await?;
    let records = fields.records_from_json(&payload)?;
    tracing::info!(count = records.len(), "certifications received");
    Ok(records)
}

pub fn load_json(path: &Path, fields: &FieldMap) -> Result<Vec<CertificationRecord>, SourceError> {
    let raw = std::fs::read_to_string(path)?;
    let payload: Value = serde_json::from_str(&raw)?;
    let records = fields.records_from_json(&payload)?;
    tracing::info!(count = records.len(), path = %path.display(), "certifications loaded");
    Ok(records)
}

pub fn import_csv(path: &Path, fields: &FieldMap) -> Result<Vec<CertificationRecord>, SourceError> {
    let reader = csv::Reader::from_path(path)?;
    let records = read_csv(reader, fields)?;
    tracing::info!(count = records.len(), path = %path.display(), "certifications imported");
    Ok(records)
}

pub fn read_csv<R: std::io::Read>(
    mut reader: csv::Reader<R>,
    fields: &FieldMap,
) -> Result<Vec<CertificationRecord>, SourceError> {
    let mut records = Vec::new();

    for result in reader.deserialize::<HashMap<String, String>>() {
        let row = result?;
        let object: Map<String, Value> = row
            .into_iter()
            .map(|(key, value)| (key, Value::String(value)))
            .collect();
        records.push(fields.record_from_object(&object));
    }

    Ok(records)
}
