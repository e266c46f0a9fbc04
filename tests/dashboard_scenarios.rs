use certdash::models::CountEntry;
use certdash::{CountryChoice, DashboardView, FieldMap, FilterSelection, RecordStore};
use serde_json::json;

fn store() -> RecordStore {
    let payload = json!([
        {
            "_id": "1",
            "CertificationType": "A",
            "Country": "Italy",
            "CertificationDate": "2024-01-15",
            "DeliveryModel": "Onshore"
        },
        {
            "_id": "2",
            "CertificationType": "B",
            "Country": "Italy",
            "CertificationDate": "2024-02-20",
            "DeliveryModel": "Offshore"
        },
        {
            "_id": "3",
            "CertificationType": "A",
            "Country": "France",
            "CertificationDate": "2024-01-05",
            "DeliveryModel": "Onshore"
        }
    ]);
    let records = FieldMap::english()
        .records_from_json(&payload)
        .expect("array payload");
    RecordStore::new(records)
}

fn entry(key: &str, count: usize) -> CountEntry {
    CountEntry {
        key: key.to_string(),
        count,
    }
}

#[test]
fn unfiltered_dashboard() {
    let store = store();
    let view = DashboardView::compute(store.records(), &FilterSelection::cleared());

    assert_eq!(view.summary.total, 3);
    assert_eq!(view.summary.onshore, 2);
    assert_eq!(view.summary.offshore, 1);
    assert_eq!(view.by_type, vec![entry("A", 2), entry("B", 1)]);
    assert_eq!(view.monthly_trend[0].total, 2);
    assert_eq!(view.monthly_trend[0].onshore, 2);
    assert_eq!(view.monthly_trend[0].offshore, 0);
    assert_eq!(view.monthly_trend[1].total, 1);
    assert_eq!(view.monthly_trend[1].offshore, 1);
    assert_eq!(view.top_countries, vec![entry("Italy", 2), entry("France", 1)]);
}

#[test]
fn single_country_selected() {
    let store = store();
    let selection =
        FilterSelection::cleared().toggle_country(CountryChoice::from("Italy"), &store.countries());
    let view = DashboardView::compute(store.records(), &selection);

    assert_eq!(view.records.len(), 2);
    assert_eq!(view.summary.total, 2);
    assert_eq!(view.by_type, vec![entry("A", 1), entry("B", 1)]);
}

#[test]
fn year_and_month_selected() {
    let store = store();
    let selection = FilterSelection::cleared().toggle_year(2024).toggle_month(0);
    let view = DashboardView::compute(store.records(), &selection);

    let ids: Vec<&str> = view.records.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["1", "3"]);
    assert_eq!(view.monthly_trend.len(), 12);
    assert_eq!(view.monthly_trend[0].total, 2);
    assert!(view.monthly_trend[1..].iter().all(|bucket| bucket.total == 0));
}

#[test]
fn all_selection_round_trip_restores_view() {
    let store = store();
    let universe = store.countries();
    let all = FilterSelection::cleared().toggle_country(CountryChoice::All, &universe);
    assert_eq!(
        DashboardView::compute(store.records(), &all).records.len(),
        3
    );

    let without_france = all.toggle_country(CountryChoice::from("France"), &universe);
    assert_eq!(
        DashboardView::compute(store.records(), &without_france)
            .records
            .len(),
        2
    );

    let cleared = all.toggle_country(CountryChoice::All, &universe);
    assert_eq!(cleared, FilterSelection::cleared());
}
