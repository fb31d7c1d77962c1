//! Error taxonomy shared by every stage of the pipeline
use std::path::PathBuf;
use thiserror::Error;

use crate::stage::Stage;

/// Crate-wide result alias
pub type Result<T> = std::result::Result<T, Error>;

/// Everything that can go wrong while configuring or running a pipeline
#[derive(Debug, Error)]
pub enum Error {
  /// Unknown annotator, unsupported format, conflicting input selection.
  /// Raised before any stage is initialized or any file is touched.
  #[error("invalid configuration: {0}")]
  InvalidConfiguration(String),
  /// A collaborator returned output inconsistent with its length/index contract
  #[error("{stage} stage contract violated: {message}")]
  StageContractViolation {
    /// the stage whose collaborator misbehaved
    stage: Stage,
    /// what was wrong with its output
    message: String,
  },
  /// File or directory read/write failure, including UTF-8 decoding
  #[error("I/O error while {context}: {source}")]
  Io {
    /// what we were doing, usually naming the path
    context: String,
    /// underlying failure
    #[source]
    source: std::io::Error,
  },
  /// A directory walk finished with some files failing
  #[error("{} of {} files failed", .failures.len(), .attempted)]
  Batch {
    /// number of files the walk attempted
    attempted: usize,
    /// failed input paths with their error
    failures: Vec<(PathBuf, Error)>,
  },
}

impl Error {
  pub(crate) fn invalid(message: impl Into<String>) -> Self {
    Error::InvalidConfiguration(message.into())
  }

  pub(crate) fn contract(stage: Stage, message: impl Into<String>) -> Self {
    Error::StageContractViolation {
      stage,
      message: message.into(),
    }
  }

  pub(crate) fn io(context: impl Into<String>, source: std::io::Error) -> Self {
    Error::Io {
      context: context.into(),
      source,
    }
  }
}
