use anyhow::Result;
use missinglink_lib::types::{CaseRecord, Metadata, ResponseEnvelope};
use missinglink_lib::{missinglink_api, MissingLinkError};
use serde::Serialize;
use tabled::settings::Style;
use tabled::{Table, Tabled};

#[derive(Clone, Debug)]
pub enum OutputFormat {
    Table,
    Json,
    Csv,
    Markdown,
}

impl OutputFormat {
    pub fn parse(raw: &str) -> Self {
        match raw {
            "json" => OutputFormat::Json,
            "csv" => OutputFormat::Csv,
            "md" | "markdown" => OutputFormat::Markdown,
            _ => OutputFormat::Table,
        }
    }
}

#[derive(Tabled, Serialize)]
struct CaseRow {
    #[tabled(rename = "Id")]
    #[serde(rename = "Id")]
    id: i64,
    #[tabled(rename = "Reference")]
    #[serde(rename = "Reference")]
    reference: String,
    #[tabled(rename = "Name")]
    #[serde(rename = "Name")]
    name: String,
    #[tabled(rename = "Description")]
    #[serde(rename = "Description")]
    description: String,
    #[tabled(rename = "Instructed")]
    #[serde(rename = "Instructed")]
    instructed: String,
    #[tabled(rename = "Folder")]
    #[serde(rename = "Folder")]
    folder: String,
}

fn build_case_rows(cases: &[CaseRecord]) -> Vec<CaseRow> {
    cases
        .iter()
        .map(|c| CaseRow {
            id: c.id,
            reference: c.reference.clone(),
            name: c.name.clone(),
            description: c.description.clone().unwrap_or_default(),
            instructed: c.instruction_date.format("%Y-%m-%d").to_string(),
            folder: c.folder.clone().unwrap_or_default(),
        })
        .collect()
}

pub fn print_cases(cases: &[CaseRecord], format: &OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Table => println!("{}", Table::new(build_case_rows(cases))),
        OutputFormat::Markdown => {
            let mut table = Table::new(build_case_rows(cases));
            table.with(Style::markdown());
            println!("{}", table);
        }
        OutputFormat::Csv => {
            let mut wtr = csv::Writer::from_writer(std::io::stdout());
            for row in build_case_rows(cases) {
                wtr.serialize(row)?;
            }
            wtr.flush()?;
        }
        OutputFormat::Json => print_json(&cases),
    }
    Ok(())
}

pub fn print_json<T: serde::Serialize>(data: &T) {
    match serde_json::to_string_pretty(data) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Failed to serialize to JSON: {}", e),
    }
}

/// One-line summary of the pagination metadata, if the server sent any.
pub fn pagination_summary(metadata: &Metadata) -> Option<String> {
    let current = metadata.get("currentPage").filter(|v| !v.is_empty())?;
    let total_pages = metadata
        .get("totalPages")
        .map(String::as_str)
        .filter(|v| !v.is_empty())
        .unwrap_or("?");
    let mut summary = format!("Page {}/{}", current, total_pages);
    if let Some(total) = metadata.get("totalCount").filter(|v| !v.is_empty()) {
        summary.push_str(&format!(" ({} total cases)", total));
    }
    Some(summary)
}

/// Text shown for a response the server answered with a failing status.
pub fn describe_failure<T>(env: &ResponseEnvelope<T>) -> String {
    format!(
        "Error calling API: {} {}",
        env.error_message().unwrap_or_default(),
        env.reason()
    )
}

/// Text shown for a call that produced no envelope at all. Rejected user
/// input is shown as its bare message. Diagnostic detail is only included
/// when `verbose` is set.
pub fn describe_error(err: &anyhow::Error, verbose: bool) -> String {
    let api = match err.downcast_ref::<MissingLinkError>() {
        Some(MissingLinkError::InvalidInput(message)) => return message.clone(),
        Some(MissingLinkError::Api(e)) => Some(e),
        _ => err.downcast_ref::<missinglink_api::Error>(),
    };
    match api {
        Some(e) => {
            let mut text = format!("Error loading cases: {}: {}", e.kind(), e);
            if verbose {
                if let Some(detail) = e.detail() {
                    text.push_str(&format!("\n{}", detail));
                }
            }
            text
        }
        None => format!("{:#}", err),
    }
}
