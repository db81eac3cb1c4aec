use anyhow::{Context, Result, anyhow, bail};
use clap::ArgMatches;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use locality_core::{LocalityClassifier, MatchMode, ResourceKind, SchemeDetection, SiteContext};
use locality_scanner::SiteScanner;
use locality_scanner::report::{ReportFormat, generate_report};
use serde_json::json;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;
use url::Url;

/// Exit status when at least one reference could not be classified
pub const EXIT_INVALID_ARGUMENT: i32 = 2;

/// Install the global fmt subscriber. `RUST_LOG` wins over `-v`.
pub fn init_logging(verbosity: u8, quiet: bool) {
    let default_level = match (quiet, verbosity) {
        (true, _) => "error",
        (false, 0) => "warn",
        (false, 1) => "debug",
        (false, _) => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    // A second init (e.g. from tests) is harmless
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Expand `~` in a user supplied path
pub fn expand_path(path: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(path).as_ref())
}

/// Parse a single line as a URL, trying to add http:// if needed.
/// Blank lines and `#` comments yield `None`.
pub fn parse_url_line(line: &str) -> Option<String> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return None;
    }

    if Url::parse(line).is_ok() {
        return Some(line.to_string());
    }

    let with_scheme = format!("http://{}", line);
    if Url::parse(&with_scheme).is_ok() {
        return Some(with_scheme);
    }

    warn!("Skipping invalid URL '{}'", line);
    None
}

/// Load and parse base URLs from a newline-delimited file
pub fn load_urls_from_file(path: &Path) -> Result<Vec<String>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read base URL file {}", path.display()))?;

    let urls: Vec<String> = content.lines().filter_map(parse_url_line).collect();

    if urls.is_empty() {
        bail!("No valid URLs found in {}", path.display());
    }

    Ok(urls)
}

/// Base URLs from repeated `--base-url` flags followed by `--base-urls-file`
pub fn load_base_urls(args: &ArgMatches) -> Result<Vec<String>> {
    let mut urls: Vec<String> = args
        .get_many::<String>("base-url")
        .map(|values| values.cloned().collect())
        .unwrap_or_default();

    if let Some(file) = args.get_one::<String>("base-urls-file") {
        urls.extend(load_urls_from_file(&expand_path(file))?);
    }

    debug!("Base site URLs: {:?}", urls);
    Ok(urls)
}

pub fn classifier_from_args(args: &ArgMatches) -> LocalityClassifier {
    let match_mode = args
        .get_one::<String>("match-mode")
        .and_then(|s| MatchMode::from_str(s))
        .unwrap_or_default();
    let scheme_detection = args
        .get_one::<String>("scheme-detection")
        .and_then(|s| SchemeDetection::from_str(s))
        .unwrap_or_default();

    LocalityClassifier::new()
        .with_match_mode(match_mode)
        .with_scheme_detection(scheme_detection)
}

fn report_format(args: &ArgMatches) -> ReportFormat {
    args.get_one::<String>("format")
        .and_then(|s| ReportFormat::from_str(s))
        .unwrap_or(ReportFormat::Text)
}

/// The result of classifying one reference from the command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub reference: String,
    pub outcome: std::result::Result<ResourceKind, String>,
}

pub fn classify_references<S: AsRef<str>>(
    classifier: &LocalityClassifier,
    context: &SiteContext,
    references: &[S],
) -> Vec<Classification> {
    references
        .iter()
        .map(|reference| {
            let reference = reference.as_ref();
            Classification {
                reference: reference.to_string(),
                outcome: classifier
                    .classify_locality(reference, context)
                    .map_err(|e| e.to_string()),
            }
        })
        .collect()
}

pub fn render_classifications(
    classifications: &[Classification],
    format: ReportFormat,
) -> Result<String> {
    match format {
        ReportFormat::Json => {
            let entries: Vec<_> = classifications
                .iter()
                .map(|c| match &c.outcome {
                    Ok(kind) => json!({ "reference": c.reference, "kind": kind }),
                    Err(error) => json!({ "reference": c.reference, "error": error }),
                })
                .collect();
            Ok(serde_json::to_string_pretty(&entries)?)
        }
        ReportFormat::Text => {
            let mut out = String::new();
            for c in classifications {
                if let Ok(kind) = c.outcome {
                    out.push_str(&format!("{:<9} {}\n", kind.as_str(), c.reference));
                }
            }
            Ok(out)
        }
    }
}

pub fn handle_classify(args: &ArgMatches) -> Result<i32> {
    let references: Vec<String> = args
        .get_many::<String>("REFERENCE")
        .map(|values| values.cloned().collect())
        .unwrap_or_default();

    let mut context = SiteContext::new().with_base_site_urls(load_base_urls(args)?);
    if let Some(dir) = args.get_one::<String>("base-dir") {
        context = context.with_base_directory(expand_path(dir).to_string_lossy());
    }
    if let Some(path) = args.get_one::<String>("source-path") {
        context = context.with_source_document_path(expand_path(path).to_string_lossy());
    }
    if let Some(url) = args.get_one::<String>("source-url") {
        context = context.with_source_document_url(url.as_str());
    }

    let classifier = classifier_from_args(args);
    let classifications = classify_references(&classifier, &context, &references);
    let format = report_format(args);

    print!("{}", render_classifications(&classifications, format)?);

    let mut failed = false;
    for c in &classifications {
        if let Err(ref error) = c.outcome {
            failed = true;
            eprintln!("{} {}: {}", "error:".red().bold(), c.reference, error);
        }
    }

    Ok(if failed { EXIT_INVALID_ARGUMENT } else { 0 })
}

pub fn handle_scan(args: &ArgMatches, quiet: bool) -> Result<()> {
    let site_dir = args
        .get_one::<String>("site-dir")
        .ok_or_else(|| anyhow!("--site-dir is required"))?;
    let site_dir = expand_path(site_dir);

    let base_urls = load_base_urls(args)?
        .iter()
        .map(|u| Url::parse(u).with_context(|| format!("Invalid base URL '{}'", u)))
        .collect::<Result<Vec<_>>>()?;
    if base_urls.is_empty() {
        bail!("Either --base-url or --base-urls-file must be provided");
    }

    let only = args
        .get_one::<String>("only")
        .map(|s| s.parse::<ResourceKind>())
        .transpose()?;
    let format = report_format(args);
    let output = args.get_one::<String>("output").map(|o| expand_path(o));

    // Reports written to a file carry no ANSI escapes
    if output.is_some() {
        colored::control::set_override(false);
    }

    let mut scanner = SiteScanner::new(&site_dir, base_urls)
        .with_context(|| format!("Cannot scan {}", site_dir.display()))?
        .with_classifier(classifier_from_args(args));

    if let Some(extensions) = args.get_many::<String>("extension") {
        scanner = scanner.with_extensions(
            extensions
                .map(|e| e.trim_start_matches('.').to_string())
                .collect(),
        );
    }

    let spinner = if quiet {
        None
    } else {
        let pb = ProgressBar::new_spinner();
        pb.set_style(ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}")?);
        pb.enable_steady_tick(Duration::from_millis(100));
        pb.set_message(format!("Scanning {}", site_dir.display()));
        Some(Arc::new(pb))
    };

    if let Some(ref pb) = spinner {
        let pb = pb.clone();
        scanner = scanner.with_progress_callback(Arc::new(move |idx: usize, path: String| {
            pb.set_message(format!("[{}] {}", idx + 1, path));
        }));
    }

    let results = scanner.scan_site()?;

    if let Some(ref pb) = spinner {
        pb.finish_with_message(format!("Scan complete! {} documents scanned", results.len()));
    }

    let report = generate_report(&results, format, only)?;

    match output {
        Some(output) => {
            fs::write(&output, report)
                .with_context(|| format!("Failed to write report to {}", output.display()))?;
            info!("Report written to {}", output.display());
            if !quiet {
                println!("{} Report saved to {}", "✓".green().bold(), output.display());
            }
        }
        None => print!("{}", report),
    }

    Ok(())
}
