//! Common imports from external crates.

pub use anyhow::{bail, ensure, format_err, Context, Error, Result};
pub use indexmap::{IndexMap, IndexSet};
pub use itertools::Itertools;
pub use once_cell::sync::Lazy;
pub use regex::Regex;
pub use serde::{Deserialize, Serialize};
pub use std::{
    collections::HashSet,
    env,
    fmt::{self, Debug, Display},
    path::{Component, Path, PathBuf},
    str::FromStr,
};
pub use strum::{AsRefStr, EnumIter, EnumString, IntoEnumIterator, IntoStaticStr};
pub use thiserror::Error;
pub use tracing::{debug, info, warn};
