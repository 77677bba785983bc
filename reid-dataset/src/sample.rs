use crate::common::*;

/// Identity of unlabeled or junk images.
pub const JUNK_PID: i64 = -1;

/// An image file with its identity and camera.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SampleRecord {
    pub path: PathBuf,
    /// The raw identity, or the dense label if the split is relabeled.
    pub pid: i64,
    pub camid: usize,
}

/// The train, query and gallery sample lists.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Splits {
    pub train: Vec<SampleRecord>,
    pub query: Vec<SampleRecord>,
    pub gallery: Vec<SampleRecord>,
}

/// Counts of a split.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SplitStats {
    pub num_images: usize,
    pub num_pids: usize,
    pub num_cams: usize,
}

impl SplitStats {
    pub fn from_samples(samples: &[SampleRecord]) -> Self {
        let num_pids = samples.iter().map(|sample| sample.pid).unique().count();
        let num_cams = samples.iter().map(|sample| sample.camid).unique().count();

        Self {
            num_images: samples.len(),
            num_pids,
            num_cams,
        }
    }
}

impl Display for SplitStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} images, {} identities, {} cameras",
            self.num_images, self.num_pids, self.num_cams
        )
    }
}
