use crate::error::{LocalityError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Where a reference points, relative to the document that contains it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    /// Same document, e.g. an in-page anchor
    Intrapage,
    /// Same site, different document
    Internal,
    /// Outside the site
    External,
}

impl ResourceKind {
    pub const ALL: [ResourceKind; 3] = [
        ResourceKind::Intrapage,
        ResourceKind::Internal,
        ResourceKind::External,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceKind::Intrapage => "intrapage",
            ResourceKind::Internal => "internal",
            ResourceKind::External => "external",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResourceKind {
    type Err = LocalityError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "intrapage" | "page" => Ok(ResourceKind::Intrapage),
            "internal" | "site" => Ok(ResourceKind::Internal),
            "external" | "ext" => Ok(ResourceKind::External),
            other => Err(LocalityError::InvalidArgument(format!(
                "unknown resource kind '{}'",
                other
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_matches_from_str() {
        for kind in ResourceKind::ALL {
            assert_eq!(kind.to_string().parse::<ResourceKind>().unwrap(), kind);
        }
    }

    #[test]
    fn test_from_str_short_forms() {
        assert_eq!("PAGE".parse::<ResourceKind>().unwrap(), ResourceKind::Intrapage);
        assert_eq!("site".parse::<ResourceKind>().unwrap(), ResourceKind::Internal);
        assert_eq!(" ext ".parse::<ResourceKind>().unwrap(), ResourceKind::External);
    }

    #[test]
    fn test_from_str_rejects_unknown() {
        assert!(matches!(
            "nearby".parse::<ResourceKind>(),
            Err(LocalityError::InvalidArgument(_))
        ));
    }
}
