//! Module for adding a single document to the [`folio`] library.

use super::*;

/// Arguments for [`Commands::Add`]
#[derive(Args, Clone)]
pub struct AddArgs {
  /// Path of a YAML metadata file or a publisher URL
  /// Examples: "paper/info.yaml", "https://dl.acm.org/doi/abs/10.1145/3456.7891"
  pub uri: String,
}

/// Function for the [`Commands::Add`] in the CLI.
pub fn add<I: UserInteraction>(interaction: &I, config: &Config, args: AddArgs) -> Result<()> {
  let AddArgs { uri } = args;

  let importer =
    Importers::default().matching(&uri).ok_or_else(|| FolioCliError::NoImporter(uri.clone()))?;
  interaction
    .reply(ResponseContent::Info(&format!("Importing '{uri}' with the {} importer", importer.name())))?;

  let mut ctx = importer.fetch(&HttpSession::new()?)?;
  let added = store(interaction, config, &ctx);
  ctx.remove_downloads()?;
  added
}

/// Shows what was fetched and adds it to the library once confirmed.
fn store<I: UserInteraction>(interaction: &I, config: &Config, ctx: &ImportContext) -> Result<()> {
  for message in &ctx.logs {
    interaction.reply(ResponseContent::Warning(message))?;
  }
  if ctx.is_empty() {
    interaction.reply(ResponseContent::Info("Nothing was imported"))?;
    return Ok(());
  }

  let data = ctx.data.clone().unwrap_or_default();
  interaction.reply(ResponseContent::Record(&data))?;
  for file in &ctx.files {
    interaction.reply(ResponseContent::Info(&format!("File: {}", file.display())))?;
  }

  if !interaction.confirm("Add this document to the library?")? {
    interaction.reply(ResponseContent::Info("Operation cancelled"))?;
    return Ok(());
  }

  let document = config.library().add(data, &ctx.files, &config.yaml_options())?;
  interaction.reply(ResponseContent::Success(&format!(
    "Added document at {}",
    document.folder.display()
  )))
}
