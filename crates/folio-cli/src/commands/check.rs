//! Module for checking documents in the [`folio`] library.

use super::*;

/// Arguments for [`Commands::Check`]
#[derive(Args, Clone)]
pub struct CheckArgs {
  /// Only check documents matching this query
  pub query: Option<String>,

  /// Keys every document must have, overriding `check_keys` from the configuration
  /// Example: "--keys title,author"
  #[arg(long, short, value_delimiter = ',')]
  pub keys: Vec<String>,
}

/// Function for the [`Commands::Check`] in the CLI.
pub fn run_checks<I: UserInteraction>(interaction: &I, config: &Config, args: CheckArgs) -> Result<()> {
  let CheckArgs { query, keys } = args;
  let keys = if keys.is_empty() { config.check_keys.clone() } else { keys };

  let documents = config.library().search(query.as_deref().unwrap_or("."))?;
  let failed: Vec<CheckReport> = documents
    .iter()
    .map(|document| check(document, keys.as_slice()))
    .filter(|report| !report.is_ok())
    .collect();

  if failed.is_empty() {
    return interaction.reply(ResponseContent::Success("No errors detected"));
  }
  for report in &failed {
    interaction.reply(ResponseContent::Report(report))?;
  }
  interaction.reply(ResponseContent::Warning("Errors were detected, please fix the info files"))?;
  Err(FolioCliError::ChecksFailed(failed.len()))
}
