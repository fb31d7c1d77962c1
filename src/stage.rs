//! The fixed vocabulary of annotation stages and the resolution of which of them run
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// One annotation step, backed by an external collaborator.
/// The declaration order is the dependency (and initialization) order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Stage {
  /// word segmentation, merges syllable tokens into words
  WordSegment,
  /// part-of-speech tagging
  PosTag,
  /// named-entity recognition
  Ner,
  /// dependency parsing
  DependencyParse,
}

/// The default annotator list, every stage enabled
pub const DEFAULT_ANNOTATORS: &str = "wseg,pos,ner,parse";

impl Stage {
  /// All stages, in dependency order
  pub const ALL: [Stage; 4] = [
    Stage::WordSegment,
    Stage::PosTag,
    Stage::Ner,
    Stage::DependencyParse,
  ];

  /// The annotator name used on the command line
  pub fn name(self) -> &'static str {
    match self {
      Stage::WordSegment => "wseg",
      Stage::PosTag => "pos",
      Stage::Ner => "ner",
      Stage::DependencyParse => "parse",
    }
  }

  /// Stages whose output this stage consumes.
  /// NER and parsing read POS tags; nothing strictly needs word segmentation,
  /// since unsegmented tokens are valid words.
  pub fn prerequisites(self) -> &'static [Stage] {
    match self {
      Stage::Ner | Stage::DependencyParse => &[Stage::PosTag],
      Stage::WordSegment | Stage::PosTag => &[],
    }
  }

  fn bit(self) -> u8 {
    1 << (self as u8)
  }
}

impl fmt::Display for Stage {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.name())
  }
}

impl FromStr for Stage {
  type Err = Error;
  fn from_str(s: &str) -> Result<Self> {
    let name = s.trim().to_lowercase();
    Stage::ALL
      .iter()
      .copied()
      .find(|stage| stage.name() == name)
      .ok_or_else(|| Error::invalid(format!("Annotator \"{}\" is invalid.", name)))
  }
}

/// A set of stages, always iterated in dependency order
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StageSet(u8);

impl StageSet {
  /// No stage at all (trivial segmentation only)
  pub fn empty() -> Self {
    StageSet(0)
  }

  /// Every stage
  pub fn all() -> Self {
    Stage::ALL.iter().copied().collect()
  }

  /// Parses a comma-separated annotator list such as `"wseg, POS,ner"`.
  /// Empty entries are ignored, duplicates collapse, and the first unknown
  /// name fails the whole list.
  pub fn parse_list(list: &str) -> Result<Self> {
    let mut set = StageSet::empty();
    for name in list.split(',') {
      if name.trim().is_empty() {
        continue;
      }
      set.insert(name.parse()?);
    }
    Ok(set)
  }

  /// Validates a list of individual annotator names
  pub fn from_names<I, S>(names: I) -> Result<Self>
  where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
  {
    let mut set = StageSet::empty();
    for name in names {
      let name = name.as_ref();
      if !name.trim().is_empty() {
        set.insert(name.parse()?);
      }
    }
    Ok(set)
  }

  /// Adds a stage
  pub fn insert(&mut self, stage: Stage) {
    self.0 |= stage.bit();
  }

  /// Is `stage` part of the set?
  pub fn contains(self, stage: Stage) -> bool {
    self.0 & stage.bit() != 0
  }

  /// True when no stage is selected
  pub fn is_empty(self) -> bool {
    self.0 == 0
  }

  /// The set closed under prerequisites: these are the stages that actually execute
  pub fn with_prerequisites(self) -> Self {
    let mut closed = self;
    for stage in self.iter() {
      for prerequisite in stage.prerequisites() {
        closed.insert(*prerequisite);
      }
    }
    closed
  }

  /// Iterates in dependency order, independently of insertion order
  pub fn iter(self) -> impl Iterator<Item = Stage> {
    Stage::ALL.iter().copied().filter(move |stage| self.contains(*stage))
  }
}

impl std::iter::FromIterator<Stage> for StageSet {
  fn from_iter<I: IntoIterator<Item = Stage>>(iter: I) -> Self {
    let mut set = StageSet::empty();
    for stage in iter {
      set.insert(stage);
    }
    set
  }
}

impl fmt::Display for StageSet {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let names: Vec<&str> = self.iter().map(Stage::name).collect();
    f.write_str(&names.join(","))
  }
}
