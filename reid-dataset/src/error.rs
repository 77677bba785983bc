use crate::common::*;

/// Errors raised while locating or scanning a dataset.
///
/// They are carried inside [anyhow::Error]. Use `downcast_ref::<DatasetError>()`
/// to tell them apart.
#[derive(Debug, Error)]
pub enum DatasetError {
    /// A required directory does not exist.
    #[error("missing path '{}'", .path.display())]
    MissingPath { path: PathBuf },
    /// The image file name does not carry an identity and a camera id.
    #[error(
        "malformed file name '{}': expect identity and camera matching '{}'",
        .path.display(),
        crate::scan::FILE_NAME_PATTERN
    )]
    MalformedFileName { path: PathBuf },
    /// The dataset name is not registered.
    #[error("unknown dataset '{name}'")]
    UnknownDataset { name: String },
}
