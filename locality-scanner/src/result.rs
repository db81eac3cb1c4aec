use locality_core::ResourceKind;
use serde::{Deserialize, Serialize};

/// One reference found in a document, with its classification
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkRecord {
    pub reference: String,
    /// Absolute form the classifier saw. `None` when a relative path could
    /// not be resolved (it climbs above the filesystem root).
    pub resolved: Option<String>,
    pub tag: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    pub kind: ResourceKind,
}

/// A reference the classifier rejected, e.g. for lack of a source URL
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnclassifiedReference {
    pub reference: String,
    pub tag: String,
    pub error: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentResult {
    pub path: String,
    pub url: Option<String>,
    pub links: Vec<LinkRecord>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub unclassified: Vec<UnclassifiedReference>,
    pub error: Option<String>,
}

impl DocumentResult {
    pub fn new(path: String, url: Option<String>) -> Self {
        Self {
            path,
            url,
            links: Vec::new(),
            unclassified: Vec::new(),
            error: None,
        }
    }

    pub fn with_error(path: String, error: String) -> Self {
        Self {
            path,
            url: None,
            links: Vec::new(),
            unclassified: Vec::new(),
            error: Some(error),
        }
    }

    pub fn counts(&self) -> LocalityCounts {
        let mut counts = LocalityCounts::default();
        for link in &self.links {
            counts.add(link.kind);
        }
        counts
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalityCounts {
    pub intrapage: usize,
    pub internal: usize,
    pub external: usize,
}

impl LocalityCounts {
    pub fn add(&mut self, kind: ResourceKind) {
        match kind {
            ResourceKind::Intrapage => self.intrapage += 1,
            ResourceKind::Internal => self.internal += 1,
            ResourceKind::External => self.external += 1,
        }
    }

    pub fn merge(&mut self, other: &LocalityCounts) {
        self.intrapage += other.intrapage;
        self.internal += other.internal;
        self.external += other.external;
    }

    pub fn get(&self, kind: ResourceKind) -> usize {
        match kind {
            ResourceKind::Intrapage => self.intrapage,
            ResourceKind::Internal => self.internal,
            ResourceKind::External => self.external,
        }
    }

    pub fn total(&self) -> usize {
        self.intrapage + self.internal + self.external
    }
}
