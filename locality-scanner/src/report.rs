// Report generation from scan results

use crate::error::Result;
use crate::result::{DocumentResult, LinkRecord, LocalityCounts};
use colored::Colorize;
use locality_core::ResourceKind;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReportFormat {
    Text,
    Json,
}

impl ReportFormat {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Some(ReportFormat::Text),
            "json" => Some(ReportFormat::Json),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportData {
    pub documents_scanned: usize,
    pub documents_failed: usize,
    pub summary: LocalityCounts,
    #[serde(default)]
    pub unclassified: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub only: Option<ResourceKind>,
    pub documents: Vec<DocumentResult>,
}

/// Summarize results, keeping only links of kind `only` when given.
/// Documents left with no links (and no error) are dropped from the listing
/// but still count as scanned.
pub fn build_report_data(results: &[DocumentResult], only: Option<ResourceKind>) -> ReportData {
    let mut summary = LocalityCounts::default();
    let mut unclassified = 0;
    let mut documents = Vec::new();

    for result in results {
        summary.merge(&result.counts());
        unclassified += result.unclassified.len();

        let mut document = result.clone();
        if let Some(kind) = only {
            document.links.retain(|link| link.kind == kind);
        }
        if !document.links.is_empty()
            || !document.unclassified.is_empty()
            || document.error.is_some()
        {
            documents.push(document);
        }
    }

    ReportData {
        documents_scanned: results.len(),
        documents_failed: results.iter().filter(|r| r.error.is_some()).count(),
        summary,
        unclassified,
        only,
        documents,
    }
}

pub fn generate_report(
    results: &[DocumentResult],
    format: ReportFormat,
    only: Option<ResourceKind>,
) -> Result<String> {
    let data = build_report_data(results, only);
    match format {
        ReportFormat::Text => Ok(generate_text_report(&data)),
        ReportFormat::Json => Ok(serde_json::to_string_pretty(&data)?),
    }
}

fn kind_label(kind: ResourceKind) -> String {
    let label = format!("{:<9}", kind.as_str());
    match kind {
        ResourceKind::Intrapage => label.cyan().to_string(),
        ResourceKind::Internal => label.green().to_string(),
        ResourceKind::External => label.yellow().to_string(),
    }
}

fn link_line(link: &LinkRecord) -> String {
    let mut line = format!("  {} {}", kind_label(link.kind), link.reference);
    match link.resolved {
        Some(ref resolved) if *resolved != link.reference => {
            line.push_str(&format!(" -> {}", resolved));
        }
        None => line.push_str(&format!(" {}", "(unresolvable)".dimmed())),
        _ => {}
    }
    line
}

fn generate_text_report(data: &ReportData) -> String {
    let mut report = String::new();
    report.push_str("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━\n\n");
    report.push_str("# Summary:\n");
    report.push_str(&format!("  Documents scanned: {}\n", data.documents_scanned));
    if data.documents_failed > 0 {
        report.push_str(&format!("  Documents failed: {}\n", data.documents_failed));
    }
    report.push_str(&format!("  References found: {}\n", data.summary.total()));
    for kind in ResourceKind::ALL {
        report.push_str(&format!("    {}: {}\n", kind, data.summary.get(kind)));
    }
    if data.unclassified > 0 {
        report.push_str(&format!("  Unclassified: {}\n", data.unclassified));
    }
    if let Some(kind) = data.only {
        report.push_str(&format!("  Showing only: {}\n", kind));
    }

    report.push_str("\n━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━\n\n");

    for document in &data.documents {
        report.push_str(&format!("## {}\n", document.path));
        if let Some(ref url) = document.url {
            report.push_str(&format!("  {}\n", url));
        }
        if let Some(ref error) = document.error {
            report.push_str(&format!("  {} {}\n", "error:".red().bold(), error));
        }
        report.push('\n');

        for link in &document.links {
            report.push_str(&link_line(link));
            report.push('\n');
        }
        for failed in &document.unclassified {
            report.push_str(&format!(
                "  {} {} ({})\n",
                format!("{:<9}", "error").red(),
                failed.reference,
                failed.error
            ));
        }
        report.push('\n');
    }

    report
}
