use serde::Serialize;

use crate::model::groomed::GroomedFeature;

pub const FEATURE_HEADERS: &[&str] = &["ID", "Name", "Summary", "Category", "Priority", "Status"];

/// Machine-readable report: groomed features plus the summary, with the
/// tier that produced the summary text.
#[derive(Serialize)]
pub struct JsonReport<'a> {
    pub features: &'a [GroomedFeature],
    pub summary: SummaryReport,
}

#[derive(Serialize)]
pub struct SummaryReport {
    pub source: &'static str,
    pub text: String,
}

pub fn feature_rows(features: &[GroomedFeature]) -> Vec<Vec<String>> {
    features
        .iter()
        .map(|f| {
            vec![
                f.id.clone(),
                f.name.clone(),
                f.summary.clone(),
                f.category.to_string(),
                f.priority.to_string(),
                f.status.clone(),
            ]
        })
        .collect()
}

pub fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{json}");
    Ok(())
}

pub fn print_table(headers: &[&str], rows: &[Vec<String>]) {
    let widths = column_widths(headers, rows);

    let header_row: Vec<String> = headers
        .iter()
        .zip(&widths)
        .map(|(h, &w)| format!("{h:<w$}"))
        .collect();
    println!("{}", header_row.join("  "));

    let separator: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    println!("{}", separator.join("  "));

    for row in rows {
        let cells: Vec<String> = row
            .iter()
            .enumerate()
            .map(|(i, cell)| {
                let w = widths.get(i).copied().unwrap_or(0);
                format!("{cell:<w$}")
            })
            .collect();
        println!("{}", cells.join("  "));
    }
}

/// Widest content per column, counted in chars to line up with the char
/// padding `format!` does.
fn column_widths(headers: &[&str], rows: &[Vec<String>]) -> Vec<usize> {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            if i < widths.len() {
                widths[i] = widths[i].max(cell.chars().count());
            }
        }
    }
    widths
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::groomed::{Category, Priority};

    fn groomed(id: &str, name: &str) -> GroomedFeature {
        GroomedFeature {
            id: id.to_string(),
            name: name.to_string(),
            summary: "A summary".to_string(),
            category: Category::Bug,
            priority: Priority::High,
            status: "In development".to_string(),
        }
    }

    #[test]
    fn feature_rows_follow_header_order() {
        let rows = feature_rows(&[groomed("F-1", "Login fix")]);
        assert_eq!(
            rows,
            vec![vec![
                "F-1".to_string(),
                "Login fix".to_string(),
                "A summary".to_string(),
                "Bug".to_string(),
                "High".to_string(),
                "In development".to_string(),
            ]]
        );
        assert_eq!(rows[0].len(), FEATURE_HEADERS.len());
    }

    #[test]
    fn feature_rows_keep_input_order() {
        let rows = feature_rows(&[groomed("F-1", "first"), groomed("F-2", "second")]);
        assert_eq!(rows[0][0], "F-1");
        assert_eq!(rows[1][0], "F-2");
    }

    #[test]
    fn column_width_takes_the_wider_of_header_and_cells() {
        let rows = vec![vec!["x".to_string(), "a long cell".to_string()]];
        let widths = column_widths(&["Header", "B"], &rows);
        assert_eq!(widths, vec![6, 11]);
    }

    #[test]
    fn column_widths_count_chars_not_bytes() {
        let rows = vec![vec!["héllo".to_string()]];
        let widths = column_widths(&["ID"], &rows);
        assert_eq!(widths, vec![5]);
    }

    #[test]
    fn extra_cells_beyond_headers_are_ignored() {
        let rows = vec![vec!["a".to_string(), "b".to_string()]];
        let widths = column_widths(&["Only"], &rows);
        assert_eq!(widths, vec![4]);
    }
}
