//! Dashboard columns and text rendering for CLI output using outstanding

use console::Style;
use outstanding::Theme;
use profiledesklib::{Body, Client, Column, RenderedTable};
use serde::Serialize;

/// Include templates at compile time
const PROFILE_TABLE_TEMPLATE: &str = include_str!("../templates/profile_table.jinja");
const PROFILE_TEMPLATE: &str = include_str!("../templates/profile.jinja");

/// Widest a cell may get before it is truncated
const MAX_CELL_WIDTH: usize = 32;

/// Gap between columns
const COLUMN_GAP: &str = "  ";

/// Data context for the profile table template
#[derive(Debug, Serialize)]
struct TableContext {
    filterable: bool,
    filter: String,
    /// Pre-padded header line
    header: String,
    separator: String,
    /// Pre-padded data lines
    rows: Vec<String>,
    /// Message of an empty table, if any
    empty: Option<String>,
    showing: String,
    page: usize,
    total_pages: usize,
    page_size: usize,
    page_size_options: String,
    prev: String,
    next: String,
}

/// One labelled line of the profile template
#[derive(Debug, Serialize)]
struct ProfileField {
    label: String,
    value: String,
}

#[derive(Debug, Serialize)]
struct ProfileContext {
    name: String,
    fields: Vec<ProfileField>,
}

/// Columns of the admin dashboard's client table.
pub fn dashboard_columns() -> Vec<Column<Client>> {
    vec![
        Column::new("name", "Name").accessor(|c: &Client| c.user.name.clone()),
        Column::new("dateOfBirth", "DoB & Age")
            .accessor(|c: &Client| c.age)
            .render(|c: &Client| match c.age {
                Some(age) => format!("{} ({} yrs)", c.date_of_birth.format("%d %b %Y"), age),
                None => c.date_of_birth.format("%d %b %Y").to_string(),
            })
            .sort_key("age"),
        Column::new("religion", "Religion, Caste & Diet")
            .accessor(|c: &Client| c.religion.clone())
            .render(religion_line),
        Column::new("photo", "Photo")
            .render(|c: &Client| {
                if c.image_url.is_some() {
                    "Available".to_string()
                } else {
                    "No image".to_string()
                }
            })
            .sortable(false),
        Column::new("height", "Height & Weight")
            .accessor(|c: &Client| c.height_weight())
            .render(|c: &Client| or_not_available(c.height_weight())),
        Column::new("job", "Job/Profession")
            .accessor(|c: &Client| c.job())
            .render(|c: &Client| or_not_available(c.job()))
            .sort_key("employedIn"),
    ]
}

/// Display text for a missing value
fn or_not_available(value: Option<String>) -> String {
    value.unwrap_or_else(|| "N/A".to_string())
}

fn religion_line(client: &Client) -> String {
    let mut parts = vec![client.religion.as_str()];
    if let Some(caste) = client.caste.as_deref() {
        parts.push(caste);
    }
    parts.push(client.diet.as_str());
    parts.join(", ")
}

/// Create the theme with styles
fn create_theme() -> Theme {
    Theme::new()
        .add("header", Style::new().bold())
        .add("muted", Style::new().dim())
}

/// Shorten `text` to `max` characters, ending in "…" when cut
fn truncate_cell(text: &str, max: usize) -> String {
    if text.chars().count() > max {
        let kept: String = text.chars().take(max - 1).collect();
        format!("{}…", kept)
    } else {
        text.to_string()
    }
}

fn pad(text: &str, width: usize) -> String {
    let len = text.chars().count();
    format!("{}{}", text, " ".repeat(width.saturating_sub(len)))
}

fn join_padded(cells: &[String], widths: &[usize]) -> String {
    cells
        .iter()
        .zip(widths)
        .map(|(cell, &width)| pad(cell, width))
        .collect::<Vec<_>>()
        .join(COLUMN_GAP)
        .trim_end()
        .to_string()
}

/// Lay out a rendered table as text
pub fn render_table_text(table: &RenderedTable) -> anyhow::Result<String> {
    let headers = table.header_labels();
    let lines: Vec<Vec<String>> = match &table.body {
        Body::Rows { rows } => rows
            .iter()
            .map(|row| {
                let mut cells: Vec<String> = row
                    .cells
                    .iter()
                    .map(|c| truncate_cell(c, MAX_CELL_WIDTH))
                    .collect();
                if table.actions {
                    cells.push(row.actions.join(" | "));
                }
                cells
            })
            .collect(),
        Body::Empty { .. } => Vec::new(),
    };

    let widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(i, header)| {
            lines
                .iter()
                .filter_map(|cells| cells.get(i))
                .map(|c| c.chars().count())
                .chain(std::iter::once(header.chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();
    let total_width =
        widths.iter().sum::<usize>() + COLUMN_GAP.len() * widths.len().saturating_sub(1);

    let footer = &table.footer;
    let context = TableContext {
        filterable: table.filter.is_some(),
        filter: table.filter.clone().unwrap_or_default(),
        header: join_padded(&headers, &widths),
        separator: "-".repeat(total_width),
        rows: lines.iter().map(|cells| join_padded(cells, &widths)).collect(),
        empty: match &table.body {
            Body::Empty { message, .. } => Some(message.clone()),
            Body::Rows { .. } => None,
        },
        showing: footer.showing.clone(),
        page: footer.page,
        total_pages: footer.total_pages,
        page_size: footer.page_size,
        page_size_options: footer
            .page_size_options
            .iter()
            .map(|s| s.to_string())
            .collect::<Vec<_>>()
            .join(", "),
        prev: if footer.prev_enabled { "< Prev" } else { "" }.to_string(),
        next: if footer.next_enabled { "Next >" } else { "" }.to_string(),
    };

    outstanding::render(PROFILE_TABLE_TEMPLATE, &context, &create_theme())
        .map_err(|e| anyhow::anyhow!("{e}"))
}

/// Lay out one client profile as labelled lines
pub fn render_profile_text(client: &Client) -> anyhow::Result<String> {
    let optional = |value: &Option<String>| or_not_available(value.clone());
    let age = or_not_available(client.age.map(|a| a.to_string()));

    let fields = vec![
        ("ID", client.id.clone()),
        ("Email", client.user.email.clone()),
        ("Date of birth", client.date_of_birth.format("%d %b %Y").to_string()),
        ("Age", age),
        ("Gender", optional(&client.gender)),
        ("Religion", religion_line(client)),
        ("Mother tongue", optional(&client.mother_tongue)),
        ("Height & Weight", or_not_available(client.height_weight())),
        ("Education", optional(&client.education)),
        ("Job/Profession", or_not_available(client.job())),
        ("City", optional(&client.city)),
        ("Registered", client.user.created_at.format("%Y-%m-%d").to_string()),
    ];
    let width = fields.iter().map(|(label, _)| label.len()).max().unwrap_or(0);

    let context = ProfileContext {
        name: client.user.name.clone(),
        fields: fields
            .into_iter()
            .map(|(label, value)| ProfileField {
                label: format!("{:<width$}", label, width = width),
                value,
            })
            .collect(),
    };

    outstanding::render(PROFILE_TEMPLATE, &context, &create_theme())
        .map_err(|e| anyhow::anyhow!("{e}"))
}
