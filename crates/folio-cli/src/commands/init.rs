//! Module for setting up a [`folio`] library

use super::*;

/// Arguments for [`Commands::Init`]
#[derive(Args, Clone)]
pub struct InitArgs {
  /// Folder holding the document folders
  #[arg(long)]
  pub library: Option<PathBuf>,

  /// Escape non-ASCII characters when writing metadata files
  #[arg(long, action = ArgAction::SetTrue)]
  pub no_unicode: bool,
}

/// Function for the [`Commands::Init`] in the CLI.
pub fn init<I: UserInteraction>(interaction: &I, config_path: &Path, args: InitArgs) -> Result<()> {
  let InitArgs { library, no_unicode } = args;

  if config_path.exists()
    && !interaction.confirm(&format!(
      "A configuration already exists at {}, do you want to overwrite it?",
      config_path.display()
    ))?
  {
    interaction.reply(ResponseContent::Info("Keeping the existing configuration"))?;
    return Ok(());
  }

  let library = match library {
    Some(library) => library,
    None => {
      let default = Config::default_library_path();
      if !interaction.confirm(&format!(
        "Would you like to use the default path {} for the library?",
        default.display()
      ))? {
        interaction
          .reply(ResponseContent::Info("Please pass in your intended library path using --library"))?;
        return Ok(());
      }
      default
    },
  };

  let config = Config::default().with_library_path(library).with_allow_unicode(!no_unicode);
  config.save(config_path)?;
  fs::create_dir_all(&config.library_path)?;
  interaction.reply(ResponseContent::Success(&format!(
    "Created configuration at {}\nLibrary path: {}",
    config_path.display(),
    config.library_path.display(),
  )))
}
