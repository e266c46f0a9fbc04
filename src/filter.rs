use std::collections::BTreeSet;

use serde::Serialize;

use crate::models::CertificationRecord;

pub const ALL_OPTION: &str = "All";

/// Country filter state.
///
/// `Any` is the untouched selection, `All` is the explicit "every country"
/// choice. Both let every record through; they differ only in how the next
/// toggle behaves.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(tag = "mode", content = "countries", rename_all = "snake_case")]
pub enum CountrySelection {
    #[default]
    Any,
    All,
    Only(Vec<String>),
}

impl CountrySelection {
    pub fn matches(&self, country: &str) -> bool {
        match self {
            Self::Any | Self::All => true,
            Self::Only(countries) => countries.iter().any(|c| c == country),
        }
    }

    pub fn is_checked(&self, country: &str) -> bool {
        match self {
            Self::Any => false,
            Self::All => true,
            Self::Only(countries) => countries.iter().any(|c| c == country),
        }
    }

    /// Checked countries as the option list shows them, `All` first when set.
    pub fn labels(&self, universe: &[String]) -> Vec<String> {
        match self {
            Self::Any => Vec::new(),
            Self::All => std::iter::once(ALL_OPTION.to_string())
                .chain(universe.iter().cloned())
                .collect(),
            Self::Only(countries) => countries.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CountryChoice {
    All,
    Country(String),
}

impl From<&str> for CountryChoice {
    fn from(value: &str) -> Self {
        if value == ALL_OPTION {
            Self::All
        } else {
            Self::Country(value.to_string())
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct FilterSelection {
    pub countries: CountrySelection,
    pub years: BTreeSet<i32>,
    /// Zero-based month indexes.
    pub months: BTreeSet<u32>,
}

impl FilterSelection {
    pub fn cleared() -> Self {
        Self::default()
    }

    pub fn with_countries(&self, countries: CountrySelection) -> Self {
        Self {
            countries,
            ..self.clone()
        }
    }

    pub fn with_years(&self, years: BTreeSet<i32>) -> Self {
        Self {
            years,
            ..self.clone()
        }
    }

    pub fn with_months(&self, months: BTreeSet<u32>) -> Self {
        Self {
            months,
            ..self.clone()
        }
    }

    pub fn toggle_country(&self, choice: CountryChoice, universe: &[String]) -> Self {
        self.with_countries(toggle_country(&self.countries, choice, universe))
    }

    pub fn toggle_year(&self, year: i32) -> Self {
        self.with_years(toggle_value(&self.years, year))
    }

    pub fn toggle_month(&self, month0: u32) -> Self {
        self.with_months(toggle_value(&self.months, month0))
    }
}

pub fn matches(record: &CertificationRecord, selection: &FilterSelection) -> bool {
    let country = selection.countries.matches(&record.country);
    let year = selection.years.is_empty()
        || record
            .year()
            .is_some_and(|year| selection.years.contains(&year));
    let month = selection.months.is_empty()
        || record
            .month0()
            .is_some_and(|month| selection.months.contains(&month));

    country && year && month
}

pub fn apply<'a>(
    records: &'a [CertificationRecord],
    selection: &FilterSelection,
) -> Vec<&'a CertificationRecord> {
    records
        .iter()
        .filter(|record| matches(record, selection))
        .collect()
}

pub fn toggle_country(
    current: &CountrySelection,
    choice: CountryChoice,
    universe: &[String],
) -> CountrySelection {
    match (choice, current) {
        (CountryChoice::All, CountrySelection::All) => CountrySelection::Any,
        (CountryChoice::All, _) => CountrySelection::All,
        // Countries outside the universe were never covered by `All`.
        (CountryChoice::Country(country), CountrySelection::All) => {
            flip_member(universe.to_vec(), country)
        }
        (CountryChoice::Country(country), CountrySelection::Any) => {
            CountrySelection::Only(vec![country])
        }
        (CountryChoice::Country(country), CountrySelection::Only(countries)) => {
            flip_member(countries.clone(), country)
        }
    }
}

pub fn toggle_value<T: Ord + Clone>(current: &BTreeSet<T>, value: T) -> BTreeSet<T> {
    let mut next = current.clone();
    if !next.remove(&value) {
        next.insert(value);
    }
    next
}

fn flip_member(mut countries: Vec<String>, country: String) -> CountrySelection {
    if let Some(pos) = countries.iter().position(|c| *c == country) {
        countries.remove(pos);
    } else {
        countries.push(country);
    }
    only(countries)
}

fn only(countries: Vec<String>) -> CountrySelection {
    if countries.is_empty() {
        CountrySelection::Any
    } else {
        CountrySelection::Only(countries)
    }
}
