//! Module for exporting metadata from the [`folio`] library.

use super::*;

/// Output formats of [`Commands::Export`]
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ExportFormat {
  /// One YAML document per record
  #[default]
  Yaml,
  /// A JSON array of records
  Json,
}

/// Arguments for [`Commands::Export`]
#[derive(Args, Clone)]
pub struct ExportArgs {
  /// Only export documents matching this query
  pub query: Option<String>,

  /// Output format
  #[arg(long, value_enum, default_value_t)]
  pub format: ExportFormat,

  /// Write to this file instead of stdout
  #[arg(long, short)]
  pub out: Option<PathBuf>,
}

/// Function for the [`Commands::Export`] in the CLI.
///
/// YAML is written with Unicode kept as is wherever it goes, whatever `allow_unicode` says for
/// metadata files.
pub fn export<I: UserInteraction>(interaction: &I, config: &Config, args: ExportArgs) -> Result<()> {
  let ExportArgs { query, format, out } = args;

  let documents = config.library().search(query.as_deref().unwrap_or("."))?;
  let records: Vec<Record> = documents.into_iter().map(|document| document.data).collect();

  let Some(out) = out else {
    match format {
      ExportFormat::Yaml => print!("{}", yaml::exporter(&records)?),
      ExportFormat::Json => println!("{}", serde_json::to_string_pretty(&records)?),
    }
    return Ok(());
  };

  match format {
    ExportFormat::Yaml => fs::write(&out, yaml::exporter(&records)?)?,
    ExportFormat::Json => fs::write(&out, serde_json::to_string_pretty(&records)?)?,
  }
  interaction.reply(ResponseContent::Success(&format!(
    "Exported {} documents to {}",
    records.len(),
    out.display()
  )))
}
