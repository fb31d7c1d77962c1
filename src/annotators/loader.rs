//! Construction of stage collaborators
use std::path::{Path, PathBuf};
use tracing::debug;

use super::{
  DependencyParser, DictionarySegmenter, FlatParser, LexiconTagger, NerRecognizer, PosTagger,
  WordSegmenter,
};
use crate::error::Result;

/// Vocabulary of the word segmenter, relative to the models directory
pub const VOCABULARY_PATH: &str = "wordsegmenter/vi-vocab";
/// Lexicon of the part-of-speech tagger, relative to the models directory
pub const POS_LEXICON_PATH: &str = "postagger/vi-lexicon.tsv";
/// Lexicon of the entity recognizer, relative to the models directory
pub const NER_LEXICON_PATH: &str = "ner/vi-lexicon.tsv";

/// Builds the collaborator of each stage. Loading is assumed to be
/// expensive: the pipeline calls each method at most once.
pub trait StageLoader {
  /// word segmentation collaborator
  fn word_segmenter(&self) -> Result<Box<dyn WordSegmenter>>;
  /// part-of-speech collaborator
  fn pos_tagger(&self) -> Result<Box<dyn PosTagger>>;
  /// named-entity collaborator
  fn ner_recognizer(&self) -> Result<Box<dyn NerRecognizer>>;
  /// dependency parsing collaborator
  fn dependency_parser(&self) -> Result<Box<dyn DependencyParser>>;
}

/// Loads the baseline collaborators from plain-text resources under a root directory:
///
/// - `wordsegmenter/vi-vocab`: one multi-syllable word per line
/// - `postagger/vi-lexicon.tsv`, `ner/vi-lexicon.tsv`: `word<TAB>tag` lines
#[derive(Debug, Clone)]
pub struct ModelDirLoader {
  root: PathBuf,
}

impl ModelDirLoader {
  /// Loader reading from `root`
  pub fn new(root: impl Into<PathBuf>) -> Self {
    ModelDirLoader { root: root.into() }
  }

  /// The models directory
  pub fn root(&self) -> &Path {
    &self.root
  }

  fn resource(&self, relative: &str) -> PathBuf {
    let path = self.root.join(relative);
    debug!("loading {}", path.display());
    path
  }
}

impl StageLoader for ModelDirLoader {
  fn word_segmenter(&self) -> Result<Box<dyn WordSegmenter>> {
    let segmenter = DictionarySegmenter::load(&self.resource(VOCABULARY_PATH))?;
    debug!("word segmenter vocabulary: {} entries", segmenter.len());
    Ok(Box::new(segmenter))
  }

  fn pos_tagger(&self) -> Result<Box<dyn PosTagger>> {
    let tagger = LexiconTagger::pos_baseline().load(&self.resource(POS_LEXICON_PATH))?;
    debug!("POS lexicon: {} entries", tagger.len());
    Ok(Box::new(tagger))
  }

  fn ner_recognizer(&self) -> Result<Box<dyn NerRecognizer>> {
    let tagger = LexiconTagger::ner_baseline().load(&self.resource(NER_LEXICON_PATH))?;
    debug!("NER lexicon: {} entries", tagger.len());
    Ok(Box::new(tagger))
  }

  fn dependency_parser(&self) -> Result<Box<dyn DependencyParser>> {
    Ok(Box::new(FlatParser))
  }
}
