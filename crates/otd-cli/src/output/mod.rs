use otd_core::responses::{QueryReport, QueryState};
use serde::Serialize;
use serde_json::Value;

use crate::cli::OutputFormat;
use crate::ui;

pub mod table;

use table::{TableOptions, render_table};

/// Render a serializable response to a string in the requested format.
pub fn render<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(value)?),
        OutputFormat::Table => Ok(render_value_table(
            &serde_json::to_value(value)?,
            table_options(),
        )),
        OutputFormat::Raw => Ok(serde_json::to_string(value)?),
    }
}

/// Print a serializable response in the requested format.
pub fn output<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<()> {
    let rendered = render(value, format)?;
    println!("{rendered}");
    Ok(())
}

/// Render a query report; tables get a headed event listing.
pub fn render_report(report: &QueryReport, format: OutputFormat) -> anyhow::Result<String> {
    if format != OutputFormat::Table {
        return render(report, format);
    }
    Ok(report_table(report, table_options()))
}

/// Print a query report in the requested format.
pub fn output_report(report: &QueryReport, format: OutputFormat) -> anyhow::Result<()> {
    println!("{}", render_report(report, format)?);
    Ok(())
}

fn table_options() -> TableOptions {
    let prefs = ui::prefs();
    TableOptions {
        max_width: prefs.width,
        color: prefs.color,
    }
}

fn report_table(report: &QueryReport, options: TableOptions) -> String {
    let mut out = vec![report.title.clone(), String::new()];
    match &report.state {
        QueryState::Results { events } if !events.is_empty() => {
            let rows = events
                .iter()
                .map(|event| {
                    vec![
                        event.date.to_string(),
                        event.headline.clone(),
                        if event.match_info.is_empty() {
                            "-".to_string()
                        } else {
                            event.match_info.clone()
                        },
                        event.photo_count.to_string(),
                        event.source_url.clone(),
                    ]
                })
                .collect::<Vec<_>>();
            out.push(render_table(
                &["date", "headline", "match", "photos", "source"],
                &rows,
                options,
            ));
        }
        QueryState::Results { .. } => out.push("(no captioned events)".to_string()),
        QueryState::Idle | QueryState::Loading => out.push(report.state.phase().to_string()),
        QueryState::NoResults | QueryState::Error { .. } => {
            out.push(report.message.clone().unwrap_or_default());
        }
    }
    out.join("\n")
}

fn render_value_table(value: &Value, options: TableOptions) -> String {
    match value {
        Value::Array(items) if items.is_empty() => String::from("(no rows)"),
        Value::Array(items) if items.iter().all(Value::is_object) => {
            let mut headers = Vec::<&str>::new();
            for map in items.iter().filter_map(Value::as_object) {
                for key in map.keys() {
                    if !headers.contains(&key.as_str()) {
                        headers.push(key);
                    }
                }
            }
            let rows = items
                .iter()
                .filter_map(Value::as_object)
                .map(|map| {
                    headers
                        .iter()
                        .map(|header| map.get(*header).map_or_else(|| "-".to_string(), cell))
                        .collect()
                })
                .collect::<Vec<_>>();
            render_table(&headers, &rows, options)
        }
        Value::Array(items) => {
            let rows = items.iter().map(|item| vec![cell(item)]).collect::<Vec<_>>();
            render_table(&["value"], &rows, options)
        }
        Value::Object(map) => {
            let rows = map
                .iter()
                .map(|(key, value)| vec![key.clone(), cell(value)])
                .collect::<Vec<_>>();
            render_table(&["key", "value"], &rows, options)
        }
        scalar => render_table(&["value"], &[vec![cell(scalar)]], options),
    }
}

fn cell(value: &Value) -> String {
    match value {
        Value::Null => String::from("null"),
        Value::String(v) => v.clone(),
        Value::Array(items) if items.iter().all(|v| !v.is_object() && !v.is_array()) => items
            .iter()
            .map(cell)
            .collect::<Vec<_>>()
            .join(", "),
        other => other.to_string(),
    }
}
