use std::fmt::Write;

use crate::dashboard::DashboardView;
use crate::filter::{CountrySelection, FilterSelection};
use crate::models::MONTH_LABELS;

pub fn describe_selection(selection: &FilterSelection) -> String {
    let countries = match &selection.countries {
        CountrySelection::Any | CountrySelection::All => "all countries".to_string(),
        CountrySelection::Only(countries) => countries.join(", "),
    };
    let years = if selection.years.is_empty() {
        "all years".to_string()
    } else {
        selection
            .years
            .iter()
            .map(i32::to_string)
            .collect::<Vec<_>>()
            .join(", ")
    };
    let months = if selection.months.is_empty() {
        "all months".to_string()
    } else {
        selection
            .months
            .iter()
            .filter_map(|month| MONTH_LABELS.get(*month as usize).copied())
            .collect::<Vec<_>>()
            .join(", ")
    };

    format!("{countries}; {years}; {months}")
}

pub fn build_report(title: &str, view: &DashboardView<'_>) -> String {
    let mut output = String::new();
    let summary = &view.summary;

    let _ = writeln!(output, "# {title}");
    let _ = writeln!(output, "Filters: {}", describe_selection(&view.selection));
    let _ = writeln!(output);
    let _ = writeln!(output, "## Totals");
    let _ = writeln!(output, "- Total certifications: {}", summary.total);
    let _ = writeln!(
        output,
        "- Onshore: {} ({:.1}%)",
        summary.onshore, summary.onshore_pct
    );
    let _ = writeln!(
        output,
        "- Offshore: {} ({:.1}%)",
        summary.offshore, summary.offshore_pct
    );

    let _ = writeln!(output);
    let _ = writeln!(output, "## Certifications by Type");
    if view.by_type.is_empty() {
        let _ = writeln!(output, "No certifications match these filters.");
    } else {
        for entry in &view.by_type {
            let _ = writeln!(output, "- {}: {}", entry.key, entry.count);
        }
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Delivery Models");
    if view.by_delivery_model.is_empty() {
        let _ = writeln!(output, "No delivery models recorded.");
    } else {
        for entry in &view.by_delivery_model {
            let _ = writeln!(output, "- {}: {}", entry.key, entry.count);
        }
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Top Countries");
    if view.top_countries.is_empty() {
        let _ = writeln!(output, "No countries recorded.");
    } else {
        for (rank, entry) in view.top_countries.iter().enumerate() {
            let _ = writeln!(output, "{}. {}: {}", rank + 1, entry.key, entry.count);
        }
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Monthly Trend");
    let _ = writeln!(output, "| Month | Total | Onshore | Offshore |");
    let _ = writeln!(output, "|---|---:|---:|---:|");
    for bucket in &view.monthly_trend {
        let _ = writeln!(
            output,
            "| {} | {} | {} | {} |",
            bucket.label, bucket.total, bucket.onshore, bucket.offshore
        );
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Certifications by Month");
    if view.by_year_month.is_empty() {
        let _ = writeln!(output, "No dated certifications.");
    } else {
        for entry in &view.by_year_month {
            let _ = writeln!(output, "- {}: {}", entry.key, entry.count);
        }
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Certification Records");
    let rows = view.rows();
    if rows.is_empty() {
        let _ = writeln!(output, "No certifications match these filters.");
    } else {
        let _ = writeln!(
            output,
            "| Name | Type | Company | Country | Delivery | Date |"
        );
        let _ = writeln!(output, "|---|---|---|---|---|---|");
        for row in rows {
            let _ = writeln!(
                output,
                "| {} | {} | {} | {} | {} | {} |",
                row.name,
                row.certification_type,
                row.organization,
                row.country,
                row.delivery_model,
                row.date
            );
        }
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::sample_record;

    #[test]
    fn describes_unrestricted_selection() {
        assert_eq!(
            describe_selection(&FilterSelection::cleared()),
            "all countries; all years; all months"
        );
    }

    #[test]
    fn describes_explicit_selection() {
        let selection = FilterSelection::cleared()
            .with_countries(CountrySelection::Only(vec![
                "Italy".to_string(),
                "France".to_string(),
            ]))
            .toggle_year(2024)
            .toggle_month(0)
            .toggle_month(11);
        assert_eq!(
            describe_selection(&selection),
            "Italy, France; 2024; January, December"
        );
    }

    #[test]
    fn report_lists_sections() {
        let records = vec![
            sample_record("r1", "A", "Italy", "2024-01-15", "Onshore"),
            sample_record("r2", "B", "Italy", "2024-02-20", "Offshore"),
        ];
        let view = DashboardView::compute(&records, &FilterSelection::cleared());
        let report = build_report("Certifications", &view);

        assert!(report.starts_with("# Certifications\n"));
        assert!(report.contains("- Onshore: 1 (50.0%)"));
        assert!(report.contains("1. Italy: 2"));
        assert!(report.contains("| January | 1 | 1 | 0 |"));
        assert!(report.contains("| December | 0 | 0 | 0 |"));
        assert!(report.contains("- 2024-02: 1"));
        assert!(report.contains("| Avery Lee | B | Accenture | Italy | Offshore | 2024-02-20 |"));
    }

    #[test]
    fn empty_report_has_placeholders() {
        let view = DashboardView::compute(&[], &FilterSelection::cleared());
        let report = build_report("Certifications", &view);
        assert!(report.contains("- Total certifications: 0"));
        assert!(report.contains("- Offshore: 0 (0.0%)"));
        assert!(report.contains("No countries recorded."));
    }
}
