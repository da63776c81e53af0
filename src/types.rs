use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// How expanded input files are placed into the scratch directory before the
/// tool sees them.
///
/// - `Link`: symlink each file into the scratch directory (default). On
///   platforms without unix symlinks this falls back to `Copy`.
/// - `Copy`: copy each file into the scratch directory.
/// - `Direct`: no staging, the tool gets the resolved source paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StageMode {
    #[default]
    Link,
    Copy,
    Direct,
}

impl FromStr for StageMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "link" => Ok(StageMode::Link),
            "copy" => Ok(StageMode::Copy),
            "direct" => Ok(StageMode::Direct),
            other => Err(format!(
                "invalid stage mode: {other} (expected \"link\", \"copy\" or \"direct\")"
            )),
        }
    }
}

impl fmt::Display for StageMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            StageMode::Link => "link",
            StageMode::Copy => "copy",
            StageMode::Direct => "direct",
        };
        f.write_str(s)
    }
}
