//! Shared fixtures for the integration tests
#![allow(dead_code)]

use std::cell::RefCell;

use vncorenlp::annotators::{
  DependencyParser, DictionarySegmenter, FlatParser, LexiconTagger, NerRecognizer, PosTagger,
  StageLoader, WordSegmenter,
};
use vncorenlp::{PipelineConfig, Relation, Result, Stage};

/// The models directory shipped with the tests
pub const MODELS_DIR: &str = "tests/resources/models";

pub fn vocabulary() -> DictionarySegmenter {
  DictionarySegmenter::new(vec!["làm việc", "Hà Nội", "công ty", "sinh viên", "đại học"])
}

pub fn pos_tagger() -> LexiconTagger {
  let mut tagger = LexiconTagger::pos_baseline();
  for (word, tag) in &[
    ("Ông", "Nc"),
    ("đang", "R"),
    ("làm_việc", "V"),
    ("làm", "V"),
    ("việc", "N"),
    ("tại", "E"),
    ("công_ty", "N"),
  ] {
    tagger.insert(*word, *tag);
  }
  tagger
}

pub fn ner_tagger() -> LexiconTagger {
  let mut tagger = LexiconTagger::ner_baseline();
  tagger.insert("Nguyễn", "B-PER");
  tagger.insert("Hà_Nội", "B-LOC");
  tagger
}

pub fn config(annotators: &str, format: &str) -> PipelineConfig {
  PipelineConfig::from_options(Some(annotators), Some(format)).unwrap()
}

/// Hands out the in-memory baselines and records every load request
#[derive(Default)]
pub struct CountingLoader {
  pub calls: RefCell<Vec<Stage>>,
}

impl CountingLoader {
  pub fn calls(&self) -> Vec<Stage> {
    self.calls.borrow().clone()
  }
}

impl StageLoader for CountingLoader {
  fn word_segmenter(&self) -> Result<Box<dyn WordSegmenter>> {
    self.calls.borrow_mut().push(Stage::WordSegment);
    Ok(Box::new(vocabulary()))
  }
  fn pos_tagger(&self) -> Result<Box<dyn PosTagger>> {
    self.calls.borrow_mut().push(Stage::PosTag);
    Ok(Box::new(pos_tagger()))
  }
  fn ner_recognizer(&self) -> Result<Box<dyn NerRecognizer>> {
    self.calls.borrow_mut().push(Stage::Ner);
    Ok(Box::new(ner_tagger()))
  }
  fn dependency_parser(&self) -> Result<Box<dyn DependencyParser>> {
    self.calls.borrow_mut().push(Stage::DependencyParse);
    Ok(Box::new(FlatParser))
  }
}

/// Always returns the same tags, whatever the words
pub struct FixedTags(pub Vec<&'static str>);

impl FixedTags {
  fn tags(&self) -> Vec<String> {
    self.0.iter().map(|tag| tag.to_string()).collect()
  }
}

impl PosTagger for FixedTags {
  fn tag(&mut self, _words: &[String]) -> Result<Vec<String>> {
    Ok(self.tags())
  }
}

impl NerRecognizer for FixedTags {
  fn recognize(&mut self, _words: &[String], _pos_tags: &[String]) -> Result<Vec<String>> {
    Ok(self.tags())
  }
}

/// Always returns the same words, whatever the sentence
pub struct FixedWords(pub Vec<&'static str>);

impl WordSegmenter for FixedWords {
  fn segment(&mut self, _sentence: &str) -> Result<Vec<String>> {
    Ok(self.0.iter().map(|word| word.to_string()).collect())
  }
}

/// Always returns the same relations, whatever the words
pub struct FixedRelations(pub Vec<(usize, &'static str)>);

impl DependencyParser for FixedRelations {
  fn parse(&mut self, _words: &[String], _pos_tags: &[String]) -> Result<Vec<Relation>> {
    Ok(
      self
        .0
        .iter()
        .map(|(head, label)| Relation::new(*head, *label))
        .collect(),
    )
  }
}

/// Records the POS tags handed to the parser
#[derive(Default)]
pub struct RecordingParser {
  pub seen_tags: std::rc::Rc<RefCell<Vec<Vec<String>>>>,
}

impl DependencyParser for RecordingParser {
  fn parse(&mut self, words: &[String], pos_tags: &[String]) -> Result<Vec<Relation>> {
    self.seen_tags.borrow_mut().push(pos_tags.to_vec());
    FlatParser.parse(words, pos_tags)
  }
}
