//! Resolution of dataset folders under a data root.

use crate::{common::*, error::DatasetError, registry::DatasetKind};

pub const TRAIN_DIR_NAME: &str = "bounding_box_train";
pub const QUERY_DIR_NAME: &str = "query";
pub const GALLERY_DIR_NAME: &str = "bounding_box_test";
pub const EXTRA_GALLERY_DIR_NAME: &str = "images";

/// The resolved folders of a dataset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetLayout {
    /// `<root>/<dataset_dir>`
    pub dataset_dir: PathBuf,
    /// The folder holding the split folders. It is either
    /// `<root>/<dataset_dir>/<dataset_subdir>`, or the dataset dir itself for
    /// the legacy flat layout.
    pub data_dir: PathBuf,
    pub train_dir: PathBuf,
    pub query_dir: PathBuf,
    pub gallery_dir: PathBuf,
    pub extra_gallery_dir: PathBuf,
}

impl DatasetLayout {
    /// Locate the dataset folders under the data root.
    ///
    /// The nested layout is preferred. If the nested folder does not exist,
    /// it warns and falls back to the flat layout. No existence check is done
    /// here, see [DatasetLayout::check_before_run].
    pub fn resolve(root: impl AsRef<Path>, kind: DatasetKind) -> Result<Self> {
        let root = absolute_path(root.as_ref())?;
        let dataset_dir = root.join(kind.dataset_dir());

        let nested_dir = dataset_dir.join(kind.dataset_subdir());
        let data_dir = if nested_dir.is_dir() {
            nested_dir
        } else {
            warn!(
                "the flat data structure of '{}' is deprecated, please put data folders such as '{}' under '{}'",
                dataset_dir.display(),
                TRAIN_DIR_NAME,
                kind.dataset_subdir()
            );
            dataset_dir.clone()
        };

        Ok(Self {
            train_dir: data_dir.join(TRAIN_DIR_NAME),
            query_dir: data_dir.join(QUERY_DIR_NAME),
            gallery_dir: data_dir.join(GALLERY_DIR_NAME),
            extra_gallery_dir: data_dir.join(EXTRA_GALLERY_DIR_NAME),
            dataset_dir,
            data_dir,
        })
    }

    /// The directories that must exist before scanning, in checking order.
    pub fn required_dirs(&self, extra_gallery: bool) -> Vec<&Path> {
        let mut dirs = vec![
            self.data_dir.as_path(),
            self.train_dir.as_path(),
            self.query_dir.as_path(),
            self.gallery_dir.as_path(),
        ];
        if extra_gallery {
            dirs.push(self.extra_gallery_dir.as_path());
        }
        dirs
    }

    /// Fail with [DatasetError::MissingPath] on the first missing directory.
    pub fn check_before_run(&self, extra_gallery: bool) -> Result<()> {
        let missing = self
            .required_dirs(extra_gallery)
            .into_iter()
            .find(|dir| !dir.is_dir());

        if let Some(dir) = missing {
            return Err(DatasetError::MissingPath {
                path: dir.to_owned(),
            }
            .into());
        }

        Ok(())
    }
}

/// Expand a leading `~` to the home directory, make the path absolute against
/// the working directory and remove `.` and `..` components.
pub fn absolute_path(path: &Path) -> Result<PathBuf> {
    let path = match path.strip_prefix("~") {
        Ok(rest) => {
            let home = dirs::home_dir().ok_or_else(|| {
                format_err!("unable to expand '{}': no home directory", path.display())
            })?;
            home.join(rest)
        }
        Err(_) => path.to_owned(),
    };

    let path = if path.is_absolute() {
        path
    } else {
        let cwd = env::current_dir().context("failed to get the current working directory")?;
        cwd.join(path)
    };

    let normalized = path
        .components()
        .fold(PathBuf::new(), |mut normalized, component| {
            match component {
                Component::CurDir => {}
                Component::ParentDir => {
                    normalized.pop();
                }
                component => normalized.push(component),
            }
            normalized
        });
    Ok(normalized)
}
