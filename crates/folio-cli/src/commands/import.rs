//! Module for bulk importing records into the [`folio`] library.

use super::*;

/// Arguments for [`Commands::Import`]
#[derive(Args, Clone)]
pub struct ImportArgs {
  /// YAML file holding one record per document
  pub path: PathBuf,
}

/// Function for the [`Commands::Import`] in the CLI.
///
/// Malformed YAML yields no records instead of an error; an unreadable file still fails.
pub fn import<I: UserInteraction>(interaction: &I, config: &Config, args: ImportArgs) -> Result<()> {
  let ImportArgs { path } = args;

  let records = bulk::load(&path, Strictness::Lenient)?;
  if records.is_empty() {
    return interaction
      .reply(ResponseContent::Info(&format!("No documents found in {}", path.display())));
  }

  let total = records.len();
  interaction.reply(ResponseContent::Info(&format!("Found {total} documents")))?;

  let library = config.library();
  let mut added = 0;
  for record in records {
    interaction.reply(ResponseContent::Record(&record))?;
    if interaction.confirm("Add this document?")? {
      library.add(record, &[], &config.yaml_options())?;
      added += 1;
    }
  }
  interaction.reply(ResponseContent::Success(&format!("Imported {added} of {total} documents")))
}
