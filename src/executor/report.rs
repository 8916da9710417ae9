use chrono::{DateTime, TimeZone};

use crate::executor::ResultSet;

/// Shortens `value` to `width` characters followed by `...` when it is longer.
pub fn truncate(value: &str, width: usize) -> String {
    if value.chars().count() > width {
        return format!("{}...", value.chars().take(width).collect::<String>());
    }

    value.to_string()
}

/// `query_{index}_{YYYYmmdd_HHMMSS}.csv`
pub fn export_file_name<Tz: TimeZone>(index: usize, at: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    format!("query_{}_{}.csv", index, at.format("%Y%m%d_%H%M%S"))
}

/// Renders the first (or last) `rows` rows as a plain text table, with every
/// cell truncated to `width` characters.
pub fn render_preview(result: &ResultSet, rows: usize, from_tail: bool, width: usize) -> String {
    let header: Vec<String> = result.columns().iter().map(|column| truncate(column, width)).collect();
    let body: Vec<Vec<String>> = result.preview(rows, from_tail).iter()
        .map(|row| row.iter().map(|cell| truncate(&ResultSet::cell_text(cell), width)).collect())
        .collect();

    let mut widths: Vec<usize> = header.iter().map(|cell| cell.chars().count()).collect();
    for row in &body {
        for (index, cell) in row.iter().enumerate() {
            widths[index] = widths[index].max(cell.chars().count());
        }
    }

    let render_line = |cells: &[String]| -> String {
        cells.iter()
            .zip(&widths)
            .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
            .collect::<Vec<String>>()
            .join(" | ")
            .trim_end()
            .to_string()
    };

    let mut lines = vec![
        render_line(header.as_slice()),
        widths.iter().map(|width| "-".repeat(*width)).collect::<Vec<String>>().join("-+-"),
    ];
    lines.extend(body.iter().map(|row| render_line(row.as_slice())));

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use serde_json::json;

    use crate::executor::{export_file_name, render_preview, truncate, ResultSet};

    #[test]
    pub fn test_truncate() {
        assert_eq!(truncate("Alice Johnson", 5), "Alice...");
        assert_eq!(truncate("Alice", 5), "Alice");
        assert_eq!(truncate("Guimarães", 8), "Guimarãe...");
    }

    #[test]
    pub fn test_export_file_name() {
        let at = Utc.with_ymd_and_hms(2025, 2, 3, 14, 5, 9).unwrap();

        assert_eq!(export_file_name(2, &at), "query_2_20250203_140509.csv");
    }

    #[test]
    pub fn test_render_preview() {
        let result = ResultSet::from_objects(vec![
            json!({ "id": 1, "city": "Porto" }),
            json!({ "id": 2, "city": "Matosinhos" }),
            json!({ "id": 3, "city": null }),
        ])
        .expect("Failed to build result set");

        let text = render_preview(&result, 2, false, 6);

        assert_eq!(text, "id | city\n---+----------\n1  | Porto\n2  | Matosi...");
    }

    #[test]
    pub fn test_render_preview_tail() {
        let result = ResultSet::from_objects(vec![json!({ "id": 1 }), json!({ "id": 2 })])
            .expect("Failed to build result set");

        let text = render_preview(&result, 1, true, 10);

        assert_eq!(text, "id\n--\n2");
    }
}
