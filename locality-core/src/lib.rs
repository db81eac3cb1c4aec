pub mod classify;
pub mod error;
pub mod kind;
pub mod matching;

pub use classify::{
    LocalityClassifier, SiteContext, classify_locality, classify_path_reference,
    classify_url_reference, is_network_reference,
};
pub use error::{LocalityError, Result};
pub use kind::ResourceKind;
pub use matching::{MatchMode, SchemeDetection};
