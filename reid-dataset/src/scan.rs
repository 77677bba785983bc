//! Listing image folders and parsing identities from file names.

use crate::{
    common::*,
    error::DatasetError,
    sample::{SampleRecord, JUNK_PID},
};

/// The file name pattern of images in each split folder.
pub const IMAGE_GLOB: &str = "*.jpg";

/// The pattern searched in an image file name. The first group is the
/// identity and the second is the camera.
pub const FILE_NAME_PATTERN: &str = r"([-\d]+)_c(\d)";

static FILE_NAME_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(FILE_NAME_PATTERN).unwrap());

/// The order in which identities receive dense labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LabelOrder {
    /// Label identities by first appearance in the sorted file listing.
    FirstSeen,
    /// Label identities by ascending raw identity.
    Ascending,
}

impl Default for LabelOrder {
    fn default() -> Self {
        Self::FirstSeen
    }
}

/// Parse the identity and camera id from the file name of an image.
pub fn parse_file_name(path: &Path) -> Result<(i64, usize)> {
    let malformed = || {
        Error::from(DatasetError::MalformedFileName {
            path: path.to_owned(),
        })
    };

    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(malformed)?;
    let captures = FILE_NAME_REGEX.captures(file_name).ok_or_else(malformed)?;

    let pid: i64 = captures[1].parse().map_err(|_| malformed())?;
    let camid: usize = captures[2].parse().map_err(|_| malformed())?;
    Ok((pid, camid))
}

/// List the images in a folder in sorted order. Subfolders and hidden files
/// are not visited.
pub fn list_images(dir: &Path) -> Result<Vec<PathBuf>> {
    let dir_str = dir
        .to_str()
        .ok_or_else(|| format_err!("non-unicode path '{}'", dir.display()))?;
    let pattern = format!("{}/{}", glob::Pattern::escape(dir_str), IMAGE_GLOB);

    let options = glob::MatchOptions {
        require_literal_leading_dot: true,
        ..Default::default()
    };

    let mut paths: Vec<PathBuf> = glob::glob_with(&pattern, options)?
        .try_collect()
        .with_context(|| format!("failed to list images in '{}'", dir.display()))?;
    paths.sort();
    Ok(paths)
}

/// Scan a split folder into sample records.
///
/// Junk images with identity `-1` are dropped. If `relabel` is set, the
/// identities are replaced by dense labels in `0..num_pids` assigned in
/// `order`. Otherwise the raw identities are kept.
pub fn process_dir(
    dir: impl AsRef<Path>,
    relabel: bool,
    order: LabelOrder,
) -> Result<Vec<SampleRecord>> {
    let dir = dir.as_ref();

    let parsed: Vec<_> = list_images(dir)?
        .into_iter()
        .map(|path| -> Result<_> {
            let (pid, camid) = parse_file_name(&path)?;
            Ok((path, pid, camid))
        })
        .filter_ok(|&(_, pid, _)| pid != JUNK_PID)
        .try_collect()?;

    let pid2label = relabel.then(|| {
        let mut pids: IndexSet<i64> = parsed.iter().map(|&(_, pid, _)| pid).collect();
        if order == LabelOrder::Ascending {
            pids.sort();
        }
        pids
    });

    let samples: Vec<_> = parsed
        .into_iter()
        .map(|(path, pid, camid)| {
            let pid = match &pid2label {
                Some(pids) => pids.get_index_of(&pid).unwrap() as i64,
                None => pid,
            };
            SampleRecord { path, pid, camid }
        })
        .collect();

    debug!(
        "found {} samples in '{}' (relabel={})",
        samples.len(),
        dir.display(),
        relabel
    );

    Ok(samples)
}
