use crate::error::Result;
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

pub const DEFAULT_EXTENSIONS: [&str; 3] = ["html", "htm", "xhtml"];

/// Find every document under `site_root` with one of `extensions`, sorted by path
pub fn discover_documents<S: AsRef<str>>(site_root: &Path, extensions: &[S]) -> Result<Vec<PathBuf>> {
    let mut documents = Vec::new();

    for entry in WalkDir::new(site_root).follow_links(false) {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }

        let matches = entry
            .path()
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| {
                extensions
                    .iter()
                    .any(|wanted| wanted.as_ref().eq_ignore_ascii_case(ext))
            })
            .unwrap_or(false);

        if matches {
            debug!("Discovered document {}", entry.path().display());
            documents.push(entry.into_path());
        }
    }

    documents.sort();
    Ok(documents)
}
