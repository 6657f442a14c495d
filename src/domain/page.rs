// Page domain model - the elements the renderer writes into
use crate::domain::reading::{Indicator, INDICATOR_GLYPH};

pub const CURRENT_SPEED_ID: &str = "current-speed";
pub const CURRENT_GUST_ID: &str = "current-gust";
pub const HISTORY_BODY_SELECTOR: &str = "#past-table tbody";

/// The indicator slot of a display row or table row.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IndicatorSlot {
    pub glyph: String,
    pub classes: Vec<String>,
}

impl IndicatorSlot {
    /// Writes the glyph and adds the class; existing classes are kept.
    pub fn mark(&mut self, indicator: Indicator) {
        self.glyph = INDICATOR_GLYPH.to_string();
        let class = indicator.css_class();
        if !self.classes.iter().any(|c| c == class) {
            self.classes.push(class.to_string());
        }
    }

    #[cfg(test)]
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }
}

/// An element with a `.value` text slot and an `.indicator` slot.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayRow {
    pub id: String,
    pub label: String,
    pub value: String,
    pub indicator: IndicatorSlot,
}

impl DisplayRow {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            value: String::new(),
            indicator: IndicatorSlot::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TableRow {
    pub time: String,
    pub value: String,
    pub indicator: IndicatorSlot,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TableBody {
    pub selector: String,
    pub headers: Vec<String>,
    pub rows: Vec<TableRow>,
}

impl TableBody {
    pub fn new(selector: impl Into<String>, headers: &[&str]) -> Self {
        Self {
            selector: selector.into(),
            headers: headers.iter().map(|h| h.to_string()).collect(),
            rows: Vec::new(),
        }
    }

    /// Rows are only ever appended.
    pub fn append(&mut self, row: TableRow) {
        self.rows.push(row);
    }

    fn table_id(&self) -> &str {
        self.selector
            .trim_start_matches('#')
            .split_whitespace()
            .next()
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    pub title: String,
    pub displays: Vec<DisplayRow>,
    pub tables: Vec<TableBody>,
}

impl Page {
    /// The markup the wind page is served with before any data is written.
    pub fn wind_template(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            displays: vec![
                DisplayRow::new(CURRENT_SPEED_ID, "Wind speed (km/h)"),
                DisplayRow::new(CURRENT_GUST_ID, "Gust peak (km/h)"),
            ],
            tables: vec![TableBody::new(
                HISTORY_BODY_SELECTOR,
                &["Time", "Speed (km/h)", ""],
            )],
        }
    }

    #[cfg(test)]
    pub fn display(&self, id: &str) -> Option<&DisplayRow> {
        self.displays.iter().find(|d| d.id == id)
    }

    pub fn display_mut(&mut self, id: &str) -> Option<&mut DisplayRow> {
        self.displays.iter_mut().find(|d| d.id == id)
    }

    #[cfg(test)]
    pub fn table(&self, selector: &str) -> Option<&TableBody> {
        self.tables.iter().find(|t| t.selector == selector)
    }

    pub fn table_mut(&mut self, selector: &str) -> Option<&mut TableBody> {
        self.tables.iter_mut().find(|t| t.selector == selector)
    }

    pub fn to_html(&self) -> String {
        let mut html = String::new();
        html.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n");
        html.push_str(&format!("<title>{}</title>\n", escape(&self.title)));
        html.push_str(STYLE);
        html.push_str("</head>\n<body>\n");
        html.push_str(&format!("<h1>{}</h1>\n", escape(&self.title)));

        html.push_str("<table id=\"current-table\">\n<tbody>\n");
        for display in &self.displays {
            html.push_str(&format!(
                "<tr id=\"{}\"><th>{}</th><td class=\"value\">{}</td>{}</tr>\n",
                escape(&display.id),
                escape(&display.label),
                escape(&display.value),
                indicator_cell(&display.indicator),
            ));
        }
        html.push_str("</tbody>\n</table>\n");

        for table in &self.tables {
            html.push_str(&format!("<table id=\"{}\">\n<thead><tr>", escape(table.table_id())));
            for header in &table.headers {
                html.push_str(&format!("<th>{}</th>", escape(header)));
            }
            html.push_str("</tr></thead>\n<tbody>\n");
            for row in &table.rows {
                html.push_str(&format!(
                    "<tr><td>{}</td><td>{}</td>{}</tr>\n",
                    escape(&row.time),
                    escape(&row.value),
                    indicator_cell(&row.indicator),
                ));
            }
            html.push_str("</tbody>\n</table>\n");
        }

        html.push_str("</body>\n</html>\n");
        html
    }
}

const STYLE: &str = "<style>\n\
.indicator.strong { color: #c0392b; font-weight: bold; }\n\
.indicator.weak { color: #7f8c8d; }\n\
</style>\n";

fn indicator_cell(slot: &IndicatorSlot) -> String {
    let mut classes = String::from("indicator");
    for class in &slot.classes {
        classes.push(' ');
        classes.push_str(class);
    }
    format!("<td class=\"{}\">{}</td>", escape(&classes), escape(&slot.glyph))
}

pub fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
