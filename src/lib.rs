//! # vncorenlp
//! An annotation pipeline for Vietnamese text: sentence splitting, word
//! segmentation, part-of-speech tagging, named-entity recognition and
//! dependency parsing, rendered in an `inline` or `column` text format, over
//! single documents, files or whole directory trees.
//!
//! The linguistic work of each stage is delegated to a collaborator behind a
//! trait in [`annotators`]; the crate ships lexicon-based baselines for all of
//! them.
//!
//! ```no_run
//! use vncorenlp::{format, Pipeline, PipelineConfig};
//!
//! let config = PipelineConfig::from_options(Some("wseg,pos"), Some("inline")).unwrap();
//! let mut pipeline = Pipeline::new(config).unwrap();
//! let annotation = pipeline.annotate("Ông Nguyễn đang làm việc.").unwrap();
//! print!("{}", format::render(&annotation, pipeline.format()));
//! ```

#![deny(
  missing_docs,
  trivial_casts,
  trivial_numeric_casts,
  unused_import_braces,
  unused_qualifications
)]

pub mod annotators;
pub mod batch;
pub mod config;
pub mod data;
pub mod error;
pub mod format;
pub mod pipeline;
pub mod stage;
pub mod tokenizer;

pub use crate::config::{OutputFormat, PipelineConfig};
pub use crate::data::{Annotation, Relation, Sentence};
pub use crate::error::{Error, Result};
pub use crate::pipeline::Pipeline;
pub use crate::stage::{Stage, StageSet};
