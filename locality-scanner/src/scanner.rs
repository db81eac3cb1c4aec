use crate::error::{Result, ScanError};
use crate::extractor::{ExtractedReference, extract_references};
use crate::resolve::{
    document_url, path_string, resolve_path_reference, resolve_protocol_relative,
};
use crate::result::{DocumentResult, LinkRecord, UnclassifiedReference};
use crate::site::{DEFAULT_EXTENSIONS, discover_documents};
use locality_core::{LocalityClassifier, LocalityError, ResourceKind, SiteContext};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info, warn};
use url::Url;

pub type ProgressCallback = Arc<dyn Fn(usize, String) + Send + Sync>;

/// Walks a site directory and classifies every reference in every document
pub struct SiteScanner {
    classifier: LocalityClassifier,
    site_root: PathBuf,
    base_site_urls: Vec<Url>,
    extensions: Vec<String>,
    progress_callback: Option<ProgressCallback>,
}

impl SiteScanner {
    /// `site_root` must exist; it is canonicalized so that every document
    /// path is absolute. The first base URL is the one documents are
    /// published under.
    pub fn new(site_root: impl AsRef<Path>, base_site_urls: Vec<Url>) -> Result<Self> {
        if base_site_urls.is_empty() {
            return Err(ScanError::InvalidUrl(
                "At least one base site URL is required".to_string(),
            ));
        }

        let site_root = site_root.as_ref().canonicalize()?;

        Ok(Self {
            classifier: LocalityClassifier::default(),
            site_root,
            base_site_urls,
            extensions: DEFAULT_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
            progress_callback: None,
        })
    }

    pub fn with_classifier(mut self, classifier: LocalityClassifier) -> Self {
        self.classifier = classifier;
        self
    }

    pub fn with_extensions(mut self, extensions: Vec<String>) -> Self {
        self.extensions = extensions;
        self
    }

    pub fn with_progress_callback(mut self, callback: ProgressCallback) -> Self {
        self.progress_callback = Some(callback);
        self
    }

    pub fn site_root(&self) -> &Path {
        &self.site_root
    }

    /// Site-wide context, with no source document filled in
    pub fn context(&self) -> SiteContext {
        SiteContext::new()
            .with_base_directory(path_string(&self.site_root))
            .with_base_site_urls(self.base_site_urls.iter().map(|u| u.to_string()))
    }

    /// Scan every document of the site. A document that cannot be read is
    /// recorded with its error and does not stop the scan.
    pub fn scan_site(&self) -> Result<Vec<DocumentResult>> {
        info!("Scanning site at {}", self.site_root.display());

        let documents = discover_documents(&self.site_root, &self.extensions)?;
        let context = self.context();
        let mut results = Vec::with_capacity(documents.len());

        for (idx, document) in documents.iter().enumerate() {
            if let Some(ref callback) = self.progress_callback {
                callback(idx, document.display().to_string());
            }

            match self.scan_with_context(document, &context) {
                Ok(result) => results.push(result),
                Err(e) => {
                    warn!("Failed to scan {}: {}", document.display(), e);
                    results.push(DocumentResult::with_error(
                        path_string(document),
                        e.to_string(),
                    ));
                }
            }
        }

        info!("Scan complete. {} documents scanned", results.len());
        Ok(results)
    }

    /// Scan a single document. Relative paths are taken relative to the site root.
    pub fn scan_document(&self, document: &Path) -> Result<DocumentResult> {
        let document = if document.is_absolute() {
            document.to_path_buf()
        } else {
            self.site_root.join(document)
        };
        let document = document.canonicalize()?;
        self.scan_with_context(&document, &self.context())
    }

    fn scan_with_context(&self, document: &Path, site: &SiteContext) -> Result<DocumentResult> {
        debug!("Scanning {}", document.display());

        let html = fs::read_to_string(document)?;
        let references = extract_references(&html)?;

        let url = document_url(&self.site_root, &self.base_site_urls[0], document)
            .map(|u| u.to_string());
        let context = site.for_document(path_string(document), url.clone());

        let mut result = DocumentResult::new(path_string(document), url);
        for reference in references {
            match self.classify_reference(reference, document, &context) {
                Ok(link) => result.links.push(link),
                Err(unclassified) => {
                    warn!(
                        "Could not classify {} in {}: {}",
                        unclassified.reference,
                        document.display(),
                        unclassified.error
                    );
                    result.unclassified.push(unclassified);
                }
            }
        }

        Ok(result)
    }

    /// Resolve a reference against the document, then classify it
    fn classify_reference(
        &self,
        extracted: ExtractedReference,
        document: &Path,
        context: &SiteContext,
    ) -> std::result::Result<LinkRecord, UnclassifiedReference> {
        let source_url = context.source_document_url.as_deref().unwrap_or_default();

        let outcome = if extracted.reference.starts_with("//") {
            // Protocol-relative: the scheme comes from the document's own URL
            match resolve_protocol_relative(&extracted.reference, source_url) {
                Some(absolute) => self
                    .classifier
                    .classify_url_reference(&absolute, &context.base_site_urls, source_url)
                    .map(|kind| (Some(absolute), kind)),
                None => Err(LocalityError::InvalidArgument(format!(
                    "cannot resolve '{}' without a source document URL",
                    extracted.reference
                ))),
            }
        } else if self.classifier.is_network_reference(&extracted.reference) {
            self.classifier
                .classify_url_reference(&extracted.reference, &context.base_site_urls, source_url)
                .map(|kind| (Some(extracted.reference.clone()), kind))
        } else {
            match resolve_path_reference(&extracted.reference, &self.site_root, document) {
                Some(absolute) => self
                    .classifier
                    .classify_path_reference(
                        &absolute,
                        context.base_directory.as_deref().unwrap_or_default(),
                        context.source_document_path.as_deref().unwrap_or_default(),
                    )
                    .map(|kind| (Some(absolute), kind)),
                None => {
                    debug!("{} climbs above the filesystem root", extracted.reference);
                    Ok((None, ResourceKind::External))
                }
            }
        };

        let ExtractedReference {
            reference,
            tag,
            text,
        } = extracted;

        match outcome {
            Ok((resolved, kind)) => {
                debug!("{} -> {}", reference, kind);
                Ok(LinkRecord {
                    reference,
                    resolved,
                    tag,
                    text,
                    kind,
                })
            }
            Err(e) => Err(UnclassifiedReference {
                reference,
                tag,
                error: e.to_string(),
            }),
        }
    }
}
