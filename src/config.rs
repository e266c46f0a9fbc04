use std::path::{Path, PathBuf};

use clap::ValueEnum;

use crate::error::SourceError;
use crate::filter::{CountryChoice, FilterSelection};
use crate::models::CertificationRecord;
use crate::schema::FieldMap;
use crate::source;

pub const DEFAULT_ENDPOINT: &str = "data";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum SchemaPreset {
    #[default]
    English,
    Italian,
}

impl SchemaPreset {
    pub fn field_map(self) -> FieldMap {
        match self {
            Self::English => FieldMap::english(),
            Self::Italian => FieldMap::italian(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceConfig {
    Api { base_url: String, endpoint: String },
    JsonFile(PathBuf),
    CsvFile(PathBuf),
}

impl SourceConfig {
    /// Local files win over the API when both are given.
    pub fn resolve(
        base_url: Option<String>,
        endpoint: Option<String>,
        file: Option<PathBuf>,
        csv: Option<PathBuf>,
    ) -> Option<Self> {
        if let Some(path) = csv {
            return Some(Self::CsvFile(path));
        }
        if let Some(path) = file {
            return Some(Self::JsonFile(path));
        }
        base_url.map(|base_url| Self::Api {
            base_url,
            endpoint: endpoint.unwrap_or_else(|| DEFAULT_ENDPOINT.to_string()),
        })
    }

    pub async fn load(&self, fields: &FieldMap) -> Result<Vec<CertificationRecord>, SourceError> {
        match self {
            Self::Api { base_url, endpoint } => {
                let client = reqwest::Client::new();
                source::fetch_records(&client, base_url, endpoint, fields).await
            }
            Self::JsonFile(path) => source::load_json(path, fields),
            Self::CsvFile(path) => source::import_csv(path, fields),
        }
    }
}

pub fn field_map(
    preset: SchemaPreset,
    override_path: Option<&Path>,
) -> Result<FieldMap, SourceError> {
    match override_path {
        Some(path) => FieldMap::from_json(&std::fs::read_to_string(path)?),
        None => Ok(preset.field_map()),
    }
}

/// Builds a selection by replaying the given countries as toggles, so a
/// repeated country cancels out. Years and months are plain allow-lists.
///
/// Months are taken 1-12 and stored zero-based; anything outside that range
/// is dropped.
pub fn selection_from_args(
    countries: &[String],
    years: &[i32],
    months: &[u32],
    universe: &[String],
) -> FilterSelection {
    let mut selection = FilterSelection::cleared();

    for country in countries {
        selection = selection.toggle_country(CountryChoice::from(country.as_str()), universe);
    }
    for year in years {
        if !selection.years.contains(year) {
            selection = selection.toggle_year(*year);
        }
    }
    for month in months {
        if (1..=12).contains(month) && !selection.months.contains(&(month - 1)) {
            selection = selection.toggle_month(month - 1);
        }
    }

    selection
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::CountrySelection;

    #[test]
    fn files_take_priority_over_api() {
        let source = SourceConfig::resolve(
            Some("http://localhost:4000".to_string()),
            None,
            Some(PathBuf::from("records.json")),
            Some(PathBuf::from("records.csv")),
        );
        assert_eq!(source, Some(SourceConfig::CsvFile(PathBuf::from("records.csv"))));
    }

    #[test]
    fn api_defaults_endpoint() {
        let source =
            SourceConfig::resolve(Some("http://localhost:4000".to_string()), None, None, None);
        assert_eq!(
            source,
            Some(SourceConfig::Api {
                base_url: "http://localhost:4000".to_string(),
                endpoint: "data".to_string(),
            })
        );
        assert_eq!(SourceConfig::resolve(None, None, None, None), None);
    }

    #[test]
    fn selection_replays_country_toggles() {
        let universe = vec!["France".to_string(), "Italy".to_string()];
        let selection = selection_from_args(
            &["All".to_string(), "Italy".to_string()],
            &[],
            &[],
            &universe,
        );
        assert_eq!(
            selection.countries,
            CountrySelection::Only(vec!["France".to_string()])
        );
    }

    #[test]
    fn unknown_country_after_all_is_added() {
        let universe = vec!["France".to_string(), "Italy".to_string()];
        let selection =
            selection_from_args(&["All".to_string(), "Peru".to_string()], &[], &[], &universe);
        assert_eq!(
            selection.countries,
            CountrySelection::Only(vec![
                "France".to_string(),
                "Italy".to_string(),
                "Peru".to_string(),
            ])
        );
    }

    #[test]
    fn repeated_country_cancels_out() {
        let universe = vec!["France".to_string(), "Italy".to_string()];
        let selection = selection_from_args(
            &["Italy".to_string(), "France".to_string(), "Italy".to_string()],
            &[],
            &[],
            &universe,
        );
        assert_eq!(
            selection.countries,
            CountrySelection::Only(vec!["France".to_string()])
        );
    }

    #[test]
    fn selection_converts_months_and_dedupes() {
        let selection = selection_from_args(&[], &[2024, 2024], &[1, 12, 13, 0, 1], &[]);
        assert_eq!(selection.years.into_iter().collect::<Vec<_>>(), vec![2024]);
        assert_eq!(selection.months.into_iter().collect::<Vec<_>>(), vec![0, 11]);
    }
}
