//! Configuration file loading.

use std::fs;
use std::path::Path;

use crate::config::schema::Config;
use crate::error::Result;

/// Loads YAML configuration files.
///
/// # Examples
///
/// ```no_run
/// use portlane::config::ConfigLoader;
/// use std::path::Path;
///
/// let config = ConfigLoader::load_file(Path::new("portlane.yaml")).unwrap();
/// println!("{config}");
/// ```
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load and parse a YAML configuration file.
    ///
    /// An empty file is the default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or the YAML is invalid.
    pub fn load_file(path: &Path) -> Result<Config> {
        let contents = fs::read_to_string(path)?;
        if contents.trim().is_empty() {
            return Ok(Config::default());
        }

        Ok(serde_yaml::from_str(&contents)?)
    }
}
