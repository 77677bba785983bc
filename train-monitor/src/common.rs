//! Common imports from external crates.

pub use anyhow::{bail, ensure, format_err, Context, Error, Result};
pub use indexmap::IndexMap;
pub use serde::{Deserialize, Serialize};
pub use std::{
    cell::Cell,
    fmt::Debug,
    fs::{self, File},
    io::BufWriter,
    path::{Path, PathBuf},
    rc::Rc,
    time::{Duration, Instant},
};
pub use tfrecord::{EventWriter, EventWriterInit};
pub use thiserror::Error;
pub use tracing::{debug, info};
