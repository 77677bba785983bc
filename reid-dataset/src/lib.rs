//! Dataset adapters for person re-identification image folders.
//!
//! A dataset root follows the Market-1501 convention. The folders
//! `bounding_box_train`, `query` and `bounding_box_test` hold JPEG images
//! whose file names encode the identity and the camera, for example
//! `0002_c1s1_000451_03.jpg`. The [DatasetKind] registry maps each known
//! dataset name to its location under a common root.

mod common;
pub mod config;
pub mod dataset;
pub mod error;
pub mod layout;
pub mod registry;
pub mod sample;
pub mod scan;

pub use config::*;
pub use dataset::*;
pub use error::*;
pub use layout::*;
pub use registry::*;
pub use sample::*;
pub use scan::*;
