use crate::{
    common::*,
    config::DatasetConfig,
    layout::DatasetLayout,
    registry::DatasetKind,
    sample::{SampleRecord, SplitStats, Splits},
    scan::{process_dir, LabelOrder},
};

/// A scanned re-identification dataset.
#[derive(Debug, Clone)]
pub struct ReidDataset {
    pub kind: DatasetKind,
    pub layout: DatasetLayout,
    pub splits: Splits,
}

impl ReidDataset {
    /// Scan the dataset described by the configuration.
    pub fn load(config: &DatasetConfig) -> Result<Self> {
        let DatasetConfig {
            ref root,
            kind,
            extra_gallery,
            label_order,
        } = *config;

        let layout = DatasetLayout::resolve(root, kind)?;
        let splits = scan_layout(&layout, extra_gallery, label_order)?;

        let dataset = Self {
            kind,
            layout,
            splits,
        };
        dataset.log_summary();
        Ok(dataset)
    }

    /// Scan a registered dataset under the data root with default label order.
    pub fn scan(root: impl AsRef<Path>, kind: DatasetKind, extra_gallery: bool) -> Result<Self> {
        let config = DatasetConfig {
            extra_gallery,
            ..DatasetConfig::new(root.as_ref(), kind)
        };
        Self::load(&config)
    }

    pub fn train(&self) -> &[SampleRecord] {
        &self.splits.train
    }

    pub fn query(&self) -> &[SampleRecord] {
        &self.splits.query
    }

    pub fn gallery(&self) -> &[SampleRecord] {
        &self.splits.gallery
    }

    /// The number of training classes.
    pub fn num_train_pids(&self) -> usize {
        SplitStats::from_samples(&self.splits.train).num_pids
    }

    pub fn num_train_cams(&self) -> usize {
        SplitStats::from_samples(&self.splits.train).num_cams
    }

    /// Per-split statistics, in train, query, gallery order.
    pub fn summary(&self) -> [(&'static str, SplitStats); 3] {
        let Splits {
            train,
            query,
            gallery,
        } = &self.splits;

        [
            ("train", SplitStats::from_samples(train)),
            ("query", SplitStats::from_samples(query)),
            ("gallery", SplitStats::from_samples(gallery)),
        ]
    }

    pub fn log_summary(&self) {
        info!("dataset '{}' at '{}'", self.kind, self.layout.data_dir.display());
        self.summary().iter().for_each(|(name, stats)| {
            info!("- {}\t{}", name, stats);
        });
    }

    pub fn into_splits(self) -> Splits {
        self.splits
    }
}

/// Check and scan the split folders of a resolved layout.
///
/// The train split is relabeled, and the query and gallery splits keep raw
/// identities so they can be matched against each other.
pub fn scan_layout(
    layout: &DatasetLayout,
    extra_gallery: bool,
    label_order: LabelOrder,
) -> Result<Splits> {
    layout.check_before_run(extra_gallery)?;

    let train = process_dir(&layout.train_dir, true, label_order)?;
    let query = process_dir(&layout.query_dir, false, label_order)?;
    let mut gallery = process_dir(&layout.gallery_dir, false, label_order)?;
    if extra_gallery {
        gallery.extend(process_dir(
            &layout.extra_gallery_dir,
            false,
            label_order,
        )?);
    }

    Ok(Splits {
        train,
        query,
        gallery,
    })
}
