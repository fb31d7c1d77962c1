//! Resolved pipeline configuration
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::stage::{StageSet, DEFAULT_ANNOTATORS};

/// Default location of the collaborator resources
pub const DEFAULT_MODELS_DIR: &str = "models";

/// The textual output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
  /// one line per sentence, `word/POS/NER` units separated by spaces
  Inline,
  /// one tab-separated row per word
  Column,
}

impl Default for OutputFormat {
  fn default() -> OutputFormat {
    OutputFormat::Inline
  }
}

impl FromStr for OutputFormat {
  type Err = Error;
  fn from_str(s: &str) -> Result<Self> {
    match s.trim().to_lowercase().as_str() {
      "inline" => Ok(OutputFormat::Inline),
      "column" => Ok(OutputFormat::Column),
      other => Err(Error::invalid(format!("Format \"{}\" is invalid.", other))),
    }
  }
}

impl fmt::Display for OutputFormat {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(match self {
      OutputFormat::Inline => "inline",
      OutputFormat::Column => "column",
    })
  }
}

/// Settings for a `Pipeline`, validated up front so that a bad value never
/// costs a model load
#[derive(Debug, Clone)]
pub struct PipelineConfig {
  /// the stages the caller asked for, and whose output gets reported
  pub annotators: StageSet,
  /// serialization format
  pub format: OutputFormat,
  /// root directory read by the default `ModelDirLoader`
  pub models_dir: PathBuf,
}

impl Default for PipelineConfig {
  fn default() -> PipelineConfig {
    PipelineConfig {
      annotators: StageSet::all(),
      format: OutputFormat::default(),
      models_dir: PathBuf::from(DEFAULT_MODELS_DIR),
    }
  }
}

impl PipelineConfig {
  /// Builds a configuration from the raw command-line style strings.
  /// `annotators` is a comma-separated list, `None` meaning all of them.
  pub fn from_options(annotators: Option<&str>, format: Option<&str>) -> Result<Self> {
    Ok(PipelineConfig {
      annotators: StageSet::parse_list(annotators.unwrap_or(DEFAULT_ANNOTATORS))?,
      format: match format {
        Some(name) => name.parse()?,
        None => OutputFormat::default(),
      },
      ..PipelineConfig::default()
    })
  }

  /// Replaces the models directory
  pub fn with_models_dir(mut self, models_dir: impl Into<PathBuf>) -> Self {
    self.models_dir = models_dir.into();
    self
  }

  /// The stages that must actually execute, prerequisites included
  pub fn effective_stages(&self) -> StageSet {
    self.annotators.with_prerequisites()
  }
}
