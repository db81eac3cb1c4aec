// Lexical resolution of document references. Nothing here touches the filesystem.

use std::path::Path;
use url::Url;

/// Split `reference` into its path and its `?query#fragment` suffix
fn split_suffix(reference: &str) -> (&str, &str) {
    match reference.find(['?', '#']) {
        Some(idx) => reference.split_at(idx),
        None => (reference, ""),
    }
}

/// Resolve a path-style reference to an absolute path.
///
/// `/x` is relative to the site root, `x` and `../x` to the directory of the
/// source document, and `#x` to the source document itself. Returns `None`
/// when `..` climbs above the filesystem root.
pub fn resolve_path_reference(
    reference: &str,
    site_root: &Path,
    source_document_path: &Path,
) -> Option<String> {
    let (path, suffix) = split_suffix(reference);

    if path.is_empty() {
        return Some(format!("{}{}", source_document_path.display(), suffix));
    }

    let (mut resolved, relative) = if let Some(rooted) = path.strip_prefix('/') {
        (site_root.to_path_buf(), rooted)
    } else {
        let directory = source_document_path.parent().unwrap_or(site_root);
        (directory.to_path_buf(), path)
    };

    for segment in relative.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                if !resolved.pop() {
                    return None;
                }
            }
            segment => resolved.push(segment),
        }
    }

    Some(format!("{}{}", resolved.display(), suffix))
}

/// Give a protocol-relative `//host/x` reference the scheme of the source
/// document URL. `None` when the source URL is missing or unparseable.
pub fn resolve_protocol_relative(reference: &str, source_document_url: &str) -> Option<String> {
    let source = Url::parse(source_document_url).ok()?;
    source.join(reference).ok().map(|url| url.to_string())
}

/// The URL a document of the site is published under. Each path segment is
/// percent-encoded, so `faq#1.html` stays part of the path.
pub fn document_url(site_root: &Path, base_url: &Url, document_path: &Path) -> Option<Url> {
    let relative = document_path.strip_prefix(site_root).ok()?;

    let mut url = base_url.clone();
    url.set_query(None);
    url.set_fragment(None);
    {
        let mut segments = url.path_segments_mut().ok()?;
        segments.pop_if_empty();
        segments.extend(
            relative
                .components()
                .map(|c| c.as_os_str().to_string_lossy().into_owned()),
        );
    }

    Some(url)
}

/// Turn a path into the string handed to the classifier
pub(crate) fn path_string(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}
