//! The registry of known datasets.

use crate::{common::*, error::DatasetError};

/// A registered dataset.
///
/// Every dataset shares the same folder convention and differs only by its
/// location under the data root, given by [DatasetKind::dataset_dir] and
/// [DatasetKind::dataset_subdir].
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    AsRefStr,
    IntoStaticStr,
    EnumString,
    EnumIter,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum DatasetKind {
    Globalme,
    InternalWildtrack,
    InternalAirport,
    InternalCameraTampering,
    InternalGlobalme,
    InternalMall,
    InternalPsvIndoor,
    InternalPsvOutdoor,
    InternalSsPlatform,
    InternalSsStreet,
    InternalSsTicket,
    MarketTrainOnly,
}

impl DatasetKind {
    /// Look up a dataset by its registered name.
    pub fn from_name(name: &str) -> Result<Self> {
        name.parse()
            .map_err(|_| DatasetError::UnknownDataset { name: name.into() }.into())
    }

    /// The registered name.
    pub fn name(&self) -> &'static str {
        self.into()
    }

    /// The top-level folder under the data root.
    pub fn dataset_dir(&self) -> &'static str {
        use DatasetKind as K;

        match self {
            K::Globalme => "globalme-reid",
            K::MarketTrainOnly => "market1501",
            _ => "internal",
        }
    }

    /// The nested folder holding the split folders.
    pub fn dataset_subdir(&self) -> &'static str {
        use DatasetKind as K;

        match self {
            K::Globalme => "GlobalMe-reID",
            K::InternalWildtrack => "wildtrack",
            K::InternalAirport => "airport",
            K::InternalCameraTampering => "camera_tampering",
            K::InternalGlobalme => "globalme",
            K::InternalMall => "mall",
            K::InternalPsvIndoor => "psv_indoor",
            K::InternalPsvOutdoor => "psv_outdoor",
            K::InternalSsPlatform => "ss_platform",
            K::InternalSsStreet => "ss_street",
            K::InternalSsTicket => "ss_ticket",
            K::MarketTrainOnly => "Train-only",
        }
    }

    /// Iterate over all registered datasets.
    pub fn all() -> impl Iterator<Item = Self> {
        Self::iter()
    }
}

impl Display for DatasetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
