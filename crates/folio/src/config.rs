//! User configuration.
//!
//! The configuration lives in a TOML file, by default under the platform's configuration
//! directory:
//! - On Unix: `~/.config/folio/config.toml`
//! - On macOS: `~/Library/Application Support/folio/config.toml`
//! - On Windows: `%APPDATA%\folio\config.toml`
//!
//! ```toml
//! library_path = "/home/ada/Documents/papers"
//! info_name = "info.yaml"
//! allow_unicode = true
//! check_keys = ["title", "author", "year"]
//! ```

use std::fs;

use super::*;
use crate::{library::Library, yaml::YamlOptions};

/// Settings shared by every command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
  /// Root folder of the document library
  pub library_path:  PathBuf,
  /// File name of the metadata file inside each document folder
  pub info_name:     String,
  /// Write non-ASCII characters unescaped in metadata files
  pub allow_unicode: bool,
  /// Keys every document is expected to have
  pub check_keys:    Vec<String>,
}

impl Default for Config {
  fn default() -> Self {
    Self {
      library_path:  Self::default_library_path(),
      info_name:     "info.yaml".to_owned(),
      allow_unicode: true,
      check_keys:    Vec::new(),
    }
  }
}

impl Config {
  /// Returns the default path of the configuration file.
  ///
  /// Falls back to `./folio/config.toml` when the platform has no configuration directory.
  ///
  /// # Examples
  ///
  /// ```no_run
  /// let path = folio::config::Config::default_path();
  /// println!("Configuration is read from {}", path.display());
  /// ```
  pub fn default_path() -> PathBuf {
    dirs::config_dir().unwrap_or_else(|| PathBuf::from(".")).join("folio").join("config.toml")
  }

  /// Returns the default library location, `papers` in the user's documents folder.
  pub fn default_library_path() -> PathBuf {
    dirs::document_dir()
      .or_else(dirs::home_dir)
      .unwrap_or_else(|| PathBuf::from("."))
      .join("papers")
  }

  /// Loads a configuration file.
  ///
  /// Keys missing from the file take their default values.
  ///
  /// # Errors
  ///
  /// Returns [`FolioError::Io`] if the file cannot be read, [`FolioError::TomlDe`] if it is not
  /// valid TOML and [`FolioError::Config`] if the metadata file name is unusable.
  pub fn load(path: impl AsRef<Path>) -> Result<Self> {
    let path = path.as_ref();
    debug!("Loading configuration from {}", path.display());
    let config: Self = toml::from_str(&fs::read_to_string(path)?)?;
    config.validate()?;
    Ok(config)
  }

  /// Loads `path` if it exists, otherwise returns the defaults.
  pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self> {
    let path = path.as_ref();
    if path.exists() {
      Self::load(path)
    } else {
      debug!("No configuration at {}, using defaults", path.display());
      Ok(Self::default())
    }
  }

  /// Writes the configuration, creating parent directories as needed.
  pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    self.validate()?;
    if let Some(parent) = path.parent() {
      fs::create_dir_all(parent)?;
    }
    fs::write(path, toml::to_string_pretty(self)?)?;
    info!("Saved configuration to {}", path.display());
    Ok(())
  }

  fn validate(&self) -> Result<()> {
    let name = Path::new(&self.info_name);
    if self.info_name.is_empty() || name.components().count() != 1 || name.file_name().is_none() {
      return Err(FolioError::Config(format!("Invalid metadata file name '{}'", self.info_name)));
    }
    Ok(())
  }

  /// Sets the library root.
  pub fn with_library_path(mut self, path: impl AsRef<Path>) -> Self {
    self.library_path = path.as_ref().to_path_buf();
    self
  }

  /// Sets the metadata file name.
  pub fn with_info_name(mut self, name: impl Into<String>) -> Self {
    self.info_name = name.into();
    self
  }

  /// Sets whether metadata files keep non-ASCII characters unescaped.
  pub fn with_allow_unicode(mut self, allow_unicode: bool) -> Self {
    self.allow_unicode = allow_unicode;
    self
  }

  /// Sets the keys checked by default.
  pub fn with_check_keys<S: Into<String>>(mut self, keys: impl IntoIterator<Item = S>) -> Self {
    self.check_keys = keys.into_iter().map(Into::into).collect();
    self
  }

  /// Options for writing metadata files.
  pub fn yaml_options(&self) -> YamlOptions { YamlOptions { allow_unicode: self.allow_unicode } }

  /// The library this configuration points at.
  pub fn library(&self) -> Library { Library::new(&self.library_path, &self.info_name) }
}
