// Tests for locality classification

use locality_core::{
    LocalityClassifier, LocalityError, MatchMode, ResourceKind, SchemeDetection, SiteContext,
    classify_locality, classify_path_reference, classify_url_reference, is_network_reference,
};

fn site() -> SiteContext {
    SiteContext::new()
        .with_base_directory("/site")
        .with_base_site_url("https://example.com")
        .with_base_site_url("http://www.example.com")
        .with_source_document_path("/site/docs/page.html")
        .with_source_document_url("https://example.com/docs/page.html")
}

fn all_classifiers() -> Vec<LocalityClassifier> {
    let mut classifiers = Vec::new();
    for mode in [MatchMode::Segment, MatchMode::Prefix] {
        for detection in [SchemeDetection::Strict, SchemeDetection::Heuristic] {
            classifiers.push(
                LocalityClassifier::new()
                    .with_match_mode(mode)
                    .with_scheme_detection(detection),
            );
        }
    }
    classifiers
}

// ============================================================================
// Network Reference Detection Tests
// ============================================================================

#[test]
fn test_http_and_https_are_network_references() {
    for classifier in all_classifiers() {
        for reference in ["http://example.com", "https://example.com/a", "http://", "https://"] {
            assert!(
                classifier.is_network_reference(reference),
                "{:?} should treat {} as a network reference",
                classifier,
                reference
            );
        }
    }
}

#[test]
fn test_colon_free_paths_are_not_network_references() {
    for classifier in all_classifiers() {
        for reference in [
            "/site/docs/page.html",
            "docs/page.html",
            "#top",
            "../up.html",
            "//cdn.example.com/lib.js",
            "",
        ] {
            assert!(
                !classifier.is_network_reference(reference),
                "{:?} should treat {} as a path",
                classifier,
                reference
            );
        }
    }
}

#[test]
fn test_heuristic_matches_any_colon() {
    let classifier = LocalityClassifier::parity();
    assert!(classifier.is_network_reference("mailto:bob@example.com"));
    assert!(classifier.is_network_reference("C:\\site\\index.html"));
    assert!(classifier.is_network_reference("docs/time:12.html"));
}

#[test]
fn test_strict_ignores_drive_letters_and_late_colons() {
    assert!(is_network_reference("mailto:bob@example.com"));
    assert!(!is_network_reference("C:\\site\\index.html"));
    assert!(!is_network_reference("docs/time:12.html"));
}

// ============================================================================
// Path Mode Tests
// ============================================================================

#[test]
fn test_path_outside_base_is_external() {
    for classifier in all_classifiers() {
        let kind = classifier
            .classify_path_reference("/other/page.html", "/site", "/site/docs/page.html")
            .unwrap();
        assert_eq!(kind, ResourceKind::External);
    }
}

#[test]
fn test_path_same_document_is_intrapage() {
    for classifier in all_classifiers() {
        let kind = classifier
            .classify_path_reference("/site/docs/page.html", "/site", "/site/docs/page.html")
            .unwrap();
        assert_eq!(kind, ResourceKind::Intrapage);
    }
}

#[test]
fn test_path_other_document_is_internal() {
    for classifier in all_classifiers() {
        let kind = classifier
            .classify_path_reference("/site/docs/other.html", "/site", "/site/docs/page.html")
            .unwrap();
        assert_eq!(kind, ResourceKind::Internal);
    }
}

#[test]
fn test_path_anchor_is_intrapage() {
    let kind = classify_path_reference("#installation", "/site", "/site/docs/page.html").unwrap();
    assert_eq!(kind, ResourceKind::Intrapage);

    let kind =
        classify_path_reference("/site/docs/page.html#installation", "/site", "/site/docs/page.html")
            .unwrap();
    assert_eq!(kind, ResourceKind::Intrapage);
}

#[test]
fn test_path_sibling_directory_prefix() {
    // Raw prefix matching treats /site2 as part of /site
    let parity = LocalityClassifier::parity();
    let kind = parity
        .classify_path_reference("/site2/page.html", "/site", "/site/index.html")
        .unwrap();
    assert_eq!(kind, ResourceKind::Internal);

    let kind = classify_path_reference("/site2/page.html", "/site", "/site/index.html").unwrap();
    assert_eq!(kind, ResourceKind::External);
}

#[test]
fn test_path_trailing_slash_on_base() {
    let kind = classify_path_reference("/site/a.html", "/site/", "/site/index.html").unwrap();
    assert_eq!(kind, ResourceKind::Internal);
}

#[test]
fn test_path_windows_style() {
    let kind = classify_path_reference(
        "C:\\site\\docs\\other.html",
        "C:\\site",
        "C:\\site\\docs\\page.html",
    )
    .unwrap();
    assert_eq!(kind, ResourceKind::Internal);
}

#[test]
fn test_path_missing_base_directory() {
    let result = classify_path_reference("/site/a.html", "", "/site/index.html");
    assert!(matches!(result, Err(LocalityError::InvalidArgument(_))));
}

#[test]
fn test_path_missing_source_document() {
    let result = classify_path_reference("/site/a.html", "/site", "  ");
    assert!(matches!(result, Err(LocalityError::InvalidArgument(_))));
}

#[test]
fn test_path_relative_reference_is_rejected() {
    let result = classify_path_reference("docs/a.html", "/site", "/site/index.html");
    match result {
        Err(LocalityError::InvalidArgument(msg)) => assert!(msg.contains("not absolute")),
        other => panic!("expected InvalidArgument, got {:?}", other),
    }
}

// ============================================================================
// URL Mode Tests
// ============================================================================

#[test]
fn test_url_same_document_is_intrapage() {
    for classifier in all_classifiers() {
        let kind = classifier
            .classify_url_reference(
                "https://example.com/a",
                &["https://example.com"],
                "https://example.com/a",
            )
            .unwrap();
        assert_eq!(kind, ResourceKind::Intrapage);
    }
}

#[test]
fn test_url_other_document_is_internal() {
    for classifier in all_classifiers() {
        let kind = classifier
            .classify_url_reference(
                "https://example.com/b",
                &["https://example.com"],
                "https://example.com/a",
            )
            .unwrap();
        assert_eq!(kind, ResourceKind::Internal);
    }
}

#[test]
fn test_url_other_host_is_external() {
    for classifier in all_classifiers() {
        let kind = classifier
            .classify_url_reference(
                "https://other.com/x",
                &["https://example.com"],
                "https://example.com/a",
            )
            .unwrap();
        assert_eq!(kind, ResourceKind::External);
    }
}

#[test]
fn test_url_any_equivalent_base_matches() {
    let bases = vec![
        "https://example.com".to_string(),
        "http://www.example.com".to_string(),
    ];
    let kind =
        classify_url_reference("http://www.example.com/b", &bases, "https://example.com/a").unwrap();
    assert_eq!(kind, ResourceKind::Internal);

    let reversed: Vec<String> = bases.iter().rev().cloned().collect();
    let kind =
        classify_url_reference("http://www.example.com/b", &reversed, "https://example.com/a")
            .unwrap();
    assert_eq!(kind, ResourceKind::Internal);
}

#[test]
fn test_url_fragment_is_intrapage() {
    let kind = classify_url_reference(
        "https://example.com/a#section-2",
        &["https://example.com"],
        "https://example.com/a",
    )
    .unwrap();
    assert_eq!(kind, ResourceKind::Intrapage);
}

#[test]
fn test_url_lookalike_host() {
    // example.com.evil.net starts with the string "https://example.com"
    let parity = LocalityClassifier::parity();
    let kind = parity
        .classify_url_reference(
            "https://example.com.evil.net/x",
            &["https://example.com"],
            "https://example.com/a",
        )
        .unwrap();
    assert_eq!(kind, ResourceKind::Internal);

    let kind = classify_url_reference(
        "https://example.com.evil.net/x",
        &["https://example.com"],
        "https://example.com/a",
    )
    .unwrap();
    assert_eq!(kind, ResourceKind::External);
}

#[test]
fn test_url_non_http_scheme_is_external() {
    let kind = classify_url_reference(
        "mailto:webmaster@example.com",
        &["https://example.com"],
        "https://example.com/a",
    )
    .unwrap();
    assert_eq!(kind, ResourceKind::External);
}

#[test]
fn test_url_protocol_relative_uses_source_scheme() {
    let kind = classify_url_reference(
        "//example.com/b",
        &["https://example.com"],
        "https://example.com/a",
    )
    .unwrap();
    assert_eq!(kind, ResourceKind::Internal);
}

#[test]
fn test_url_empty_base_list_is_invalid() {
    let bases: Vec<String> = Vec::new();
    let result = classify_url_reference("https://example.com/a", &bases, "https://example.com/a");
    assert!(matches!(result, Err(LocalityError::InvalidArgument(_))));
}

#[test]
fn test_url_empty_base_entry_is_invalid() {
    let result = LocalityClassifier::parity().classify_url_reference(
        "https://example.com/a",
        &["https://example.com", ""],
        "https://example.com/a",
    );
    assert!(matches!(result, Err(LocalityError::InvalidArgument(_))));
}

#[test]
fn test_url_unparseable_base_is_invalid_in_segment_mode() {
    let result = classify_url_reference(
        "https://example.com/a",
        &["example.com"],
        "https://example.com/a",
    );
    assert!(matches!(result, Err(LocalityError::InvalidArgument(_))));
}

// ============================================================================
// Dispatch Tests
// ============================================================================

#[test]
fn test_classify_locality_dispatches_by_reference_style() {
    let context = site();

    assert_eq!(
        classify_locality("https://example.com/docs/page.html#a", &context).unwrap(),
        ResourceKind::Intrapage
    );
    assert_eq!(
        classify_locality("/site/docs/other.html", &context).unwrap(),
        ResourceKind::Internal
    );
    assert_eq!(
        classify_locality("https://github.com/trapdoorsec", &context).unwrap(),
        ResourceKind::External
    );
    assert_eq!(
        classify_locality("#top", &context).unwrap(),
        ResourceKind::Intrapage
    );
}

#[test]
fn test_classify_locality_missing_path_context() {
    let context = SiteContext::new()
        .with_base_site_url("https://example.com")
        .with_source_document_url("https://example.com/a");

    assert!(classify_locality("https://example.com/b", &context).is_ok());
    assert!(matches!(
        classify_locality("/site/b.html", &context),
        Err(LocalityError::InvalidArgument(_))
    ));
}

#[test]
fn test_classify_locality_missing_url_context() {
    let context = SiteContext::new()
        .with_base_directory("/site")
        .with_source_document_path("/site/a.html");

    assert!(classify_locality("/site/b.html", &context).is_ok());
    assert!(matches!(
        classify_locality("https://example.com/b", &context),
        Err(LocalityError::InvalidArgument(_))
    ));
}

#[test]
fn test_classify_locality_is_idempotent() {
    let context = site();
    for classifier in all_classifiers() {
        for reference in [
            "https://example.com/docs/page.html",
            "http://www.example.com/x",
            "https://other.com",
            "/site/docs/other.html",
            "/elsewhere",
            "#frag",
        ] {
            let first = classifier.classify_locality(reference, &context);
            let second = classifier.classify_locality(reference, &context);
            assert_eq!(first, second, "{} drifted under {:?}", reference, classifier);
        }
    }
}

#[test]
fn test_classify_locality_is_total() {
    let context = site();
    for classifier in all_classifiers() {
        for reference in [
            "https://example.com",
            "ftp://example.com/file",
            "javascript:void(0)",
            "/",
            "/site",
            "/site/",
            "#",
        ] {
            let kind = classifier.classify_locality(reference, &context).unwrap();
            assert!(ResourceKind::ALL.contains(&kind));
        }
    }
}

// ============================================================================
// Serialization Tests
// ============================================================================

#[test]
fn test_resource_kind_serializes_lowercase() {
    let json = serde_json::to_string(&ResourceKind::Intrapage).unwrap();
    assert_eq!(json, "\"intrapage\"");

    let kind: ResourceKind = serde_json::from_str("\"external\"").unwrap();
    assert_eq!(kind, ResourceKind::External);
}
