//! Output formatting for allocations, ranges and watch reports.
//!
//! Every value the CLI prints implements both `Display` (the human form) and
//! `Serialize` (the machine-readable forms), so a single [`render`] call
//! covers all formats.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::Result;

/// Available output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Human-readable text.
    #[default]
    Human,
    /// Pretty-printed JSON.
    Json,
    /// YAML.
    Yaml,
}

impl OutputFormat {
    /// Names accepted by [`OutputFormat::from_str`].
    pub const NAMES: [&'static str; 3] = ["human", "json", "yaml"];
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "human" | "text" => Ok(Self::Human),
            "json" => Ok(Self::Json),
            "yaml" | "yml" => Ok(Self::Yaml),
            _ => Err(format!(
                "unknown output format '{s}' (expected one of: {})",
                Self::NAMES.join(", ")
            )),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Human => write!(f, "human"),
            Self::Json => write!(f, "json"),
            Self::Yaml => write!(f, "yaml"),
        }
    }
}

/// Renders `value` in the requested format.
///
/// The result never ends with a newline; callers add their own.
///
/// # Errors
///
/// Returns an error if the value cannot be serialized.
///
/// # Examples
///
/// ```
/// use portlane::output::{render, OutputFormat};
/// use portlane::PortRange;
///
/// let range = PortRange::from_bounds(11221, 18009).unwrap();
/// assert_eq!(render(&range, OutputFormat::Human).unwrap(), "11221-18009");
/// assert!(render(&range, OutputFormat::Json).unwrap().contains("\"min\": 11221"));
/// ```
pub fn render<T>(value: &T, format: OutputFormat) -> Result<String>
where
    T: Serialize + fmt::Display + ?Sized,
{
    let text = match format {
        OutputFormat::Human => value.to_string(),
        OutputFormat::Json => serde_json::to_string_pretty(value)?,
        OutputFormat::Yaml => serde_yaml::to_string(value)?,
    };
    Ok(text.trim_end().to_string())
}
