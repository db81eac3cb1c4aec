// Locality classification of references found inside site documents

use crate::error::{LocalityError, Result};
use crate::kind::ResourceKind;
use crate::matching::{
    MatchMode, SchemeDetection, has_uri_scheme, is_drive_path, looks_like_url, path_has_prefix,
    url_has_prefix,
};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::path::Path;
use tracing::debug;
use url::Url;

/// Where the site lives and which document is being processed
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteContext {
    pub base_directory: Option<String>,
    pub base_site_urls: Vec<String>,
    pub source_document_path: Option<String>,
    pub source_document_url: Option<String>,
}

impl SiteContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_base_directory(mut self, directory: impl Into<String>) -> Self {
        self.base_directory = Some(directory.into());
        self
    }

    pub fn with_base_site_url(mut self, url: impl Into<String>) -> Self {
        self.base_site_urls.push(url.into());
        self
    }

    pub fn with_base_site_urls<I, S>(mut self, urls: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.base_site_urls.extend(urls.into_iter().map(Into::into));
        self
    }

    pub fn with_source_document_path(mut self, path: impl Into<String>) -> Self {
        self.source_document_path = Some(path.into());
        self
    }

    pub fn with_source_document_url(mut self, url: impl Into<String>) -> Self {
        self.source_document_url = Some(url.into());
        self
    }

    /// Same site, different source document
    pub fn for_document(&self, path: impl Into<String>, url: Option<String>) -> Self {
        Self {
            base_directory: self.base_directory.clone(),
            base_site_urls: self.base_site_urls.clone(),
            source_document_path: Some(path.into()),
            source_document_url: url,
        }
    }
}

/// Decides whether a reference is intrapage, internal or external.
///
/// The classifier is a plain value: it holds only its two matching options,
/// performs no I/O and can be shared freely between threads.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalityClassifier {
    match_mode: MatchMode,
    scheme_detection: SchemeDetection,
}

impl LocalityClassifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw string-prefix matching with the colon heuristic
    pub fn parity() -> Self {
        Self {
            match_mode: MatchMode::Prefix,
            scheme_detection: SchemeDetection::Heuristic,
        }
    }

    pub fn with_match_mode(mut self, mode: MatchMode) -> Self {
        self.match_mode = mode;
        self
    }

    pub fn with_scheme_detection(mut self, detection: SchemeDetection) -> Self {
        self.scheme_detection = detection;
        self
    }

    pub fn match_mode(&self) -> MatchMode {
        self.match_mode
    }

    pub fn scheme_detection(&self) -> SchemeDetection {
        self.scheme_detection
    }

    /// Should `reference` be classified as a URL rather than a path?
    pub fn is_network_reference(&self, reference: &str) -> bool {
        match self.scheme_detection {
            SchemeDetection::Strict => has_uri_scheme(reference),
            SchemeDetection::Heuristic => looks_like_url(reference),
        }
    }

    /// Classify a filesystem-style reference against the site's base directory.
    ///
    /// `reference` must be absolute, or a bare `#fragment` which resolves to
    /// the source document itself. Anything else has to be resolved by the
    /// caller first.
    pub fn classify_path_reference(
        &self,
        reference: &str,
        base_directory: &str,
        source_document_path: &str,
    ) -> Result<ResourceKind> {
        let reference = require("reference", reference)?;
        let base_directory = require("base directory", base_directory)?;
        let source_document_path = require("source document path", source_document_path)?;

        let absolute = resolve_absolute(reference, source_document_path)?;

        if !path_has_prefix(&absolute, base_directory, self.match_mode) {
            debug!("{} is outside {}", absolute, base_directory);
            return Ok(ResourceKind::External);
        }

        if path_has_prefix(&absolute, source_document_path, self.match_mode) {
            debug!("{} is within source document {}", absolute, source_document_path);
            return Ok(ResourceKind::Intrapage);
        }

        debug!("{} is inside {}", absolute, base_directory);
        Ok(ResourceKind::Internal)
    }

    /// Classify a network reference against the site's equivalent base URLs.
    ///
    /// The first base URL the reference falls under decides the site match;
    /// which one matched does not change the outcome.
    pub fn classify_url_reference<S: AsRef<str>>(
        &self,
        reference: &str,
        base_site_urls: &[S],
        source_document_url: &str,
    ) -> Result<ResourceKind> {
        let reference = require("reference", reference)?;
        let source_document_url = require("source document URL", source_document_url)?;

        if base_site_urls.is_empty() {
            return Err(LocalityError::InvalidArgument(
                "no base site URLs given".to_string(),
            ));
        }
        let base_site_urls = base_site_urls
            .iter()
            .map(|url| require("base site URL", url.as_ref()))
            .collect::<Result<Vec<_>>>()?;

        match self.match_mode {
            MatchMode::Prefix => {
                for &base in &base_site_urls {
                    if reference.starts_with(base) {
                        debug!("{} matched base site URL {}", reference, base);
                        return Ok(if reference.starts_with(source_document_url) {
                            ResourceKind::Intrapage
                        } else {
                            ResourceKind::Internal
                        });
                    }
                }
            }
            MatchMode::Segment => {
                let source_url = parse_context_url("source document URL", source_document_url)?;
                let bases = base_site_urls
                    .iter()
                    .map(|base| parse_context_url("base site URL", base))
                    .collect::<Result<Vec<_>>>()?;

                // Protocol-relative references take the source document's scheme
                let parsed = if reference.starts_with("//") {
                    source_url.join(reference)
                } else {
                    Url::parse(reference)
                };
                let Ok(reference_url) = parsed else {
                    debug!("{} does not parse as a URL, treating as external", reference);
                    return Ok(ResourceKind::External);
                };

                for base in &bases {
                    if url_has_prefix(&reference_url, base) {
                        debug!("{} matched base site URL {}", reference_url, base);
                        return Ok(if url_has_prefix(&reference_url, &source_url) {
                            ResourceKind::Intrapage
                        } else {
                            ResourceKind::Internal
                        });
                    }
                }
            }
        }

        debug!("{} matched no base site URL", reference);
        Ok(ResourceKind::External)
    }

    /// Dispatch to URL or path classification depending on the reference
    pub fn classify_locality(&self, reference: &str, context: &SiteContext) -> Result<ResourceKind> {
        if self.is_network_reference(reference) {
            self.classify_url_reference(
                reference,
                &context.base_site_urls,
                context.source_document_url.as_deref().unwrap_or_default(),
            )
        } else {
            self.classify_path_reference(
                reference,
                context.base_directory.as_deref().unwrap_or_default(),
                context.source_document_path.as_deref().unwrap_or_default(),
            )
        }
    }
}

/// `is_network_reference` with the default classifier
pub fn is_network_reference(reference: &str) -> bool {
    LocalityClassifier::default().is_network_reference(reference)
}

/// `classify_path_reference` with the default classifier
pub fn classify_path_reference(
    reference: &str,
    base_directory: &str,
    source_document_path: &str,
) -> Result<ResourceKind> {
    LocalityClassifier::default().classify_path_reference(
        reference,
        base_directory,
        source_document_path,
    )
}

/// `classify_url_reference` with the default classifier
pub fn classify_url_reference<S: AsRef<str>>(
    reference: &str,
    base_site_urls: &[S],
    source_document_url: &str,
) -> Result<ResourceKind> {
    LocalityClassifier::default().classify_url_reference(
        reference,
        base_site_urls,
        source_document_url,
    )
}

/// `classify_locality` with the default classifier
pub fn classify_locality(reference: &str, context: &SiteContext) -> Result<ResourceKind> {
    LocalityClassifier::default().classify_locality(reference, context)
}

fn require<'a>(name: &str, value: &'a str) -> Result<&'a str> {
    if value.trim().is_empty() {
        return Err(LocalityError::InvalidArgument(format!("{} is missing", name)));
    }
    Ok(value)
}

fn parse_context_url(name: &str, value: &str) -> Result<Url> {
    Url::parse(value)
        .map_err(|e| LocalityError::InvalidArgument(format!("{} '{}': {}", name, value, e)))
}

fn resolve_absolute<'a>(reference: &'a str, source_document_path: &str) -> Result<Cow<'a, str>> {
    if reference.starts_with('#') {
        return Ok(Cow::Owned(format!("{}{}", source_document_path, reference)));
    }

    if reference.starts_with(['/', '\\'])
        || is_drive_path(reference)
        || Path::new(reference).is_absolute()
    {
        return Ok(Cow::Borrowed(reference));
    }

    Err(LocalityError::InvalidArgument(format!(
        "reference '{}' is not absolute",
        reference
    )))
}
