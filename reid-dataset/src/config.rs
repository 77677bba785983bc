//! Dataset configuration format.

use crate::{common::*, registry::DatasetKind, scan::LabelOrder};

/// Dataset options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetConfig {
    /// The data root holding the dataset folders.
    pub root: PathBuf,
    /// The registered dataset name.
    pub kind: DatasetKind,
    /// If set, images in the `images` folder are appended to the gallery.
    #[serde(default)]
    pub extra_gallery: bool,
    /// The order of dense training labels.
    #[serde(default)]
    pub label_order: LabelOrder,
}

impl DatasetConfig {
    pub fn new(root: impl Into<PathBuf>, kind: DatasetKind) -> Self {
        Self {
            root: root.into(),
            kind,
            extra_gallery: false,
            label_order: LabelOrder::default(),
        }
    }

    pub fn open<P>(path: P) -> Result<Self>
    where
        P: AsRef<Path>,
    {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read '{}'", path.display()))?;
        let config = json5::from_str(&text)
            .with_context(|| format!("failed to parse '{}'", path.display()))?;
        Ok(config)
    }
}
