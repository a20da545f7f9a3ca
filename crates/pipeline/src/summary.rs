//! Textual result summaries for the popup/sidebar surface.

use facilities::category::FacilityCategory;
use foundation::geo::GeoPoint;
use protocol::analyze::{AnalyzeResponse, FacilityMatch};

/// One summary line per facility category.
///
/// `found` mirrors the presence of the match's `feature`: a category the
/// backend knows but found nothing for must still appear, as an explicit
/// N/A rather than being silently dropped.
#[derive(Debug, Clone, PartialEq)]
pub struct CategorySummary {
    pub category: FacilityCategory,
    pub found: bool,
    pub name: Option<String>,
    pub distance_m: Option<f64>,
    pub walk_time_min: Option<f64>,
}

impl CategorySummary {
    pub fn absent(category: FacilityCategory) -> Self {
        Self {
            category,
            found: false,
            name: None,
            distance_m: None,
            walk_time_min: None,
        }
    }

    fn from_match(category: FacilityCategory, m: &FacilityMatch) -> Self {
        match &m.feature {
            None => Self::absent(category),
            Some(feature) => Self {
                category,
                found: true,
                name: feature.name.clone(),
                distance_m: m.distance,
                walk_time_min: m.walk_time,
            },
        }
    }

    /// Plain-text rendering, e.g. `Hospital: City Hospital, distance 450m,
    /// walk 6min` or `Pharmacy: N/A`.
    pub fn text_line(&self) -> String {
        if !self.found {
            return format!("{}: N/A", self.category.label());
        }
        format!(
            "{}: {}, distance {}m, walk {}min",
            self.category.label(),
            self.name.as_deref().unwrap_or("N/A"),
            fmt_opt_num(self.distance_m),
            fmt_opt_num(self.walk_time_min),
        )
    }
}

/// Everything the results panel shows for one analysis.
///
/// Entries are in the fixed category render order, one per category,
/// regardless of which keys the response carried.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisSummary {
    pub origin: GeoPoint,
    pub postcode: Option<String>,
    pub entries: Vec<CategorySummary>,
}

impl AnalysisSummary {
    pub fn from_response(origin: GeoPoint, response: &AnalyzeResponse) -> Self {
        let entries = FacilityCategory::ALL
            .into_iter()
            .map(|category| match response.nearest(category.response_key()) {
                Some(m) => CategorySummary::from_match(category, m),
                None => CategorySummary::absent(category),
            })
            .collect();

        Self {
            origin,
            postcode: response.postcode.clone(),
            entries,
        }
    }

    pub fn entry(&self, category: FacilityCategory) -> &CategorySummary {
        self.entries
            .iter()
            .find(|e| e.category == category)
            .expect("one entry per category")
    }

    /// Plain-text lines: origin header, optional postcode, one line per
    /// category.
    pub fn text_lines(&self) -> Vec<String> {
        let mut lines = vec![format!("Your location: {}", self.origin)];
        if let Some(postcode) = &self.postcode {
            lines.push(format!("Postcode: {postcode}"));
        }
        lines.extend(self.entries.iter().map(|e| e.text_line()));
        lines
    }

    /// Popup/sidebar HTML. Facility names come from remote data and are
    /// escaped.
    pub fn to_html(&self) -> String {
        let mut html = String::from("<div class=\"analysis-results\"><b>Analysis results</b><br>");
        html.push_str(&format!(
            "your location:<br><span class=\"origin\">{}</span><br>",
            self.origin
        ));
        if let Some(postcode) = &self.postcode {
            html.push_str(&format!(
                "<span class=\"postcode\">{}</span><br>",
                escape_html(postcode)
            ));
        }
        html.push_str("<hr>");
        for entry in &self.entries {
            let label = entry.category.label();
            if !entry.found {
                html.push_str(&format!(
                    "<b>{label}:</b> <span class=\"absent\">N/A</span><br>"
                ));
                continue;
            }
            let name = match &entry.name {
                Some(name) => escape_html(name),
                None => "N/A".to_string(),
            };
            html.push_str(&format!(
                "<b>{label}:</b> {name}<br>distance: {}m Approximate walk: {}min<br>",
                fmt_opt_num(entry.distance_m),
                fmt_opt_num(entry.walk_time_min),
            ));
        }
        html.push_str("</div>");
        html
    }
}

/// Absent numbers render as the `?` placeholder, never as an empty string.
fn fmt_opt_num(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{v}"),
        None => "?".to_string(),
    }
}

fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}
