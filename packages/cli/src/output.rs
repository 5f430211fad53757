use client::ClientError;
use common::models::Paginated;
use common::validation::FieldErrors;
use console::{Alignment, measure_text_width, pad_str, style};
use portal::FlowError;
use serde::Serialize;

pub fn success(message: impl AsRef<str>) {
    println!("{} {}", style("✔").green().bold(), message.as_ref());
}

pub fn info(message: impl AsRef<str>) {
    println!("{} {}", style("•").cyan(), message.as_ref());
}

pub fn warn(message: impl AsRef<str>) {
    eprintln!("{} {}", style("!").yellow().bold(), message.as_ref());
}

pub fn heading(text: impl AsRef<str>) {
    println!("\n{}", style(text.as_ref()).bold().underlined());
}

pub fn field_errors(errors: &FieldErrors) {
    for error in errors.iter() {
        eprintln!(
            "  {} {}",
            style(format!("{}:", error.field)).red(),
            error.message
        );
    }
}

/// Toast for a failed request. Cancelled requests print nothing.
pub fn client_error(err: &ClientError) {
    if let Some(errors) = err.field_errors() {
        field_errors(errors);
    }
    if let Some(message) = err.notification() {
        eprintln!("{} {}", style("✘").red().bold(), message);
    }
}

pub fn flow_error(err: &FlowError) {
    if let Some(errors) = err.field_errors() {
        field_errors(errors);
    }
    if let Some(message) = err.notification() {
        eprintln!("{} {}", style("✘").red().bold(), message);
    }
}

pub fn json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub fn table(headers: &[&str], rows: &[Vec<String>]) {
    let mut widths = headers.iter().map(|h| measure_text_width(h)).collect::<Vec<_>>();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            if let Some(width) = widths.get_mut(i) {
                *width = (*width).max(measure_text_width(cell));
            }
        }
    }

    let line = |cells: Vec<String>| {
        cells
            .iter()
            .zip(&widths)
            .map(|(cell, width)| pad_str(cell, *width, Alignment::Left, None).into_owned())
            .collect::<Vec<_>>()
            .join("  ")
    };
    println!(
        "{}",
        style(line(headers.iter().map(|h| h.to_string()).collect())).bold()
    );
    for row in rows {
        println!("{}", line(row.clone()));
    }
    if rows.is_empty() {
        println!("{}", style("(no records)").dim());
    }
}

pub fn page_footer<T>(page: &Paginated<T>, current: u64) {
    println!(
        "{}",
        style(format!(
            "Page {} of {} ({} total)",
            current,
            page.total_pages.max(1),
            page.total
        ))
        .dim()
    );
}

pub fn or_dash(value: Option<impl ToString>) -> String {
    value.map(|v| v.to_string()).unwrap_or_else(|| "-".to_string())
}
