//! Collaborator contracts for each annotation stage, plus the baseline
//! implementations shipped with the crate.
//!
//! The pipeline only ever talks to these traits: a statistical model can be
//! plugged in by implementing the matching trait and handing it to
//! one of the `Pipeline::with_*` methods or returning it from a custom `StageLoader`.
//! Collaborators take `&mut self` and are not assumed to be thread-safe.

mod lexicon;
mod loader;
mod parser;
mod word_segmenter;

pub use self::lexicon::{LexiconTagger, TagRule};
pub use self::loader::{
  ModelDirLoader, StageLoader, NER_LEXICON_PATH, POS_LEXICON_PATH, VOCABULARY_PATH,
};
pub use self::parser::FlatParser;
pub use self::word_segmenter::DictionarySegmenter;

use crate::data::Relation;
use crate::error::Result;

/// Splits raw text into sentence strings, each made of space-separated tokens
pub trait SentenceSegmenter {
  /// The sentences of `text`, in order
  fn sentences(&mut self, text: &str) -> Vec<String>;
}

/// Merges the tokens of a sentence into words
pub trait WordSegmenter {
  /// Words of a space-tokenized sentence; multi-token words are joined with `_`
  fn segment(&mut self, sentence: &str) -> Result<Vec<String>>;
}

/// Assigns one part-of-speech tag per word
pub trait PosTagger {
  /// Tags aligned with `words`
  fn tag(&mut self, words: &[String]) -> Result<Vec<String>>;
}

/// Assigns one named-entity label per word
pub trait NerRecognizer {
  /// Labels aligned with `words`; `pos_tags` is aligned too
  fn recognize(&mut self, words: &[String], pos_tags: &[String]) -> Result<Vec<String>>;
}

/// Attaches every word to a head within the same sentence
pub trait DependencyParser {
  /// One relation per word, heads are 1-based with 0 for the root
  fn parse(&mut self, words: &[String], pos_tags: &[String]) -> Result<Vec<Relation>>;
}
