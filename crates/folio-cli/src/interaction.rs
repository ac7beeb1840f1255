//! Printing results and asking for confirmation.

use dialoguer::Confirm;

use super::*;

/// Prefix for information messages
pub static INFO_PREFIX: &str = "ℹ ";
/// Prefix for success messages
pub static SUCCESS_PREFIX: &str = "✓ ";
/// Prefix for warning messages
pub static WARNING_PREFIX: &str = "! ";
/// Prefix for user prompts
pub static PROMPT_PREFIX: &str = "❯ ";
/// Branch character for tree structure
pub static TREE_BRANCH: &str = "├";
/// Leaf character for tree structure (end of branch)
pub static TREE_LEAF: &str = "└";

/// Something to show the user.
#[derive(Debug)]
pub enum ResponseContent<'a> {
  /// Metadata of a single document
  Record(&'a Record),
  /// A document in the library
  Document(&'a Document),
  /// Problems found by `check`
  Report(&'a CheckReport),
  /// A completed operation
  Success(&'a str),
  /// Progress or neutral information
  Info(&'a str),
  /// Something the user should look at
  Warning(&'a str),
}

/// How commands talk to the user.
pub trait UserInteraction {
  /// Asks a yes/no question.
  fn confirm(&self, message: &str) -> Result<bool>;
  /// Shows `content`.
  fn reply(&self, content: ResponseContent) -> Result<()>;
}

/// Interaction on the controlling terminal.
#[derive(Debug, Clone, Copy)]
pub struct Terminal {
  /// Answer every question with its default
  accept_defaults: bool,
}

impl Terminal {
  /// Creates a terminal interaction; `accept_defaults` skips all prompts.
  pub fn new(accept_defaults: bool) -> Self { Self { accept_defaults } }
}

impl UserInteraction for Terminal {
  fn confirm(&self, message: &str) -> Result<bool> {
    if self.accept_defaults {
      return Ok(true);
    }
    Ok(
      Confirm::new()
        .with_prompt(format!("{}{message}", style(PROMPT_PREFIX).cyan()))
        .default(true)
        .interact()?,
    )
  }

  fn reply(&self, content: ResponseContent) -> Result<()> {
    match content {
      ResponseContent::Record(record) => {
        let last = record.len().saturating_sub(1);
        for (i, (key, value)) in record.iter().enumerate() {
          let branch = if i == last { TREE_LEAF } else { TREE_BRANCH };
          println!("{} {}: {}", style(branch).dim(), style(key).bold(), display_value(value));
        }
      },
      ResponseContent::Document(document) => println!(
        "{} {} {}",
        style(INFO_PREFIX).blue(),
        style(document.title()).bold(),
        style(document.folder.display()).dim()
      ),
      ResponseContent::Report(report) => {
        println!("{}{}", style(WARNING_PREFIX).yellow(), style(report.folder.display()).yellow());
        let last = report.problems.len().saturating_sub(1);
        for (i, problem) in report.problems.iter().enumerate() {
          let branch = if i == last { TREE_LEAF } else { TREE_BRANCH };
          println!("{} {problem}", style(branch).dim());
        }
      },
      ResponseContent::Success(message) => println!("{}{message}", style(SUCCESS_PREFIX).green()),
      ResponseContent::Info(message) => println!("{}{message}", style(INFO_PREFIX).blue()),
      ResponseContent::Warning(message) => println!("{}{message}", style(WARNING_PREFIX).yellow()),
    }
    Ok(())
  }
}

/// Strings as they are, anything else as compact JSON.
fn display_value(value: &Value) -> String {
  match value.as_str() {
    Some(text) => text.to_owned(),
    None => serde_json::to_string(value).unwrap_or_else(|_| value.kind().to_owned()),
  }
}
