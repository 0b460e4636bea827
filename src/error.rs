use std::time::Duration;

use crate::render::LayerKind;

/// Construction-time misuse.
///
/// Nothing the indicator does after construction can fail; these errors only surface while
/// wiring strategies, paint order and frame scheduling together.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("layer {0:?} appears more than once in the paint order")]
    DuplicateLayer(LayerKind),
    #[error("the {strategy} strategy requires an additional content strategy")]
    MissingAdditionalContent { strategy: &'static str },
    #[error("unknown visual strategy `{0}`")]
    UnknownStrategy(String),
    #[error("unknown additional content `{0}`")]
    UnknownContent(String),
    #[error("refresh interval {0:?} must be non-zero and shorter than one second")]
    InvalidRefreshInterval(Duration),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
