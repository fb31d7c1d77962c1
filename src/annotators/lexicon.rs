//! Lexicon lookup tagging, usable for both part-of-speech tags and entity labels
use lazy_static::lazy_static;
use regex::Regex;
use std::collections::HashMap;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use super::{NerRecognizer, PosTagger};
use crate::error::{Error, Result};

lazy_static! {
  static ref PUNCTUATION: Regex = Regex::new(r"^[^\p{L}\p{N}]+$").unwrap();
  static ref NUMBER: Regex = Regex::new(r"^[+-]?\d+(?:[.,:/-]\d+)*%?$").unwrap();
  static ref CAPITALIZED: Regex = Regex::new(r"^\p{Lu}").unwrap();
}

/// Fallback applied to words missing from the lexicon
#[derive(Debug, Clone)]
pub struct TagRule {
  /// matched against the word form
  pub pattern: Regex,
  /// tag assigned on a match
  pub tag: String,
}

/// Looks every word up in a word → tag table; unknown words go through the
/// ordered rules and finally get the default tag
#[derive(Debug, Clone)]
pub struct LexiconTagger {
  entries: HashMap<String, String>,
  rules: Vec<TagRule>,
  default_tag: String,
}

impl LexiconTagger {
  /// An empty lexicon tagging everything with `default_tag`
  pub fn new(default_tag: impl Into<String>) -> Self {
    LexiconTagger {
      entries: HashMap::new(),
      rules: Vec::new(),
      default_tag: default_tag.into(),
    }
  }

  /// Baseline part-of-speech fallbacks: punctuation `CH`, numbers `M`,
  /// capitalized words `Np`, anything else `N`
  pub fn pos_baseline() -> Self {
    let mut tagger = LexiconTagger::new("N");
    tagger.push_rule(PUNCTUATION.clone(), "CH");
    tagger.push_rule(NUMBER.clone(), "M");
    tagger.push_rule(CAPITALIZED.clone(), "Np");
    tagger
  }

  /// Baseline entity fallback: everything outside the lexicon is `O`
  pub fn ner_baseline() -> Self {
    LexiconTagger::new("O")
  }

  /// Adds a fallback rule from a regular expression, evaluated after earlier rules
  pub fn with_rule(mut self, pattern: &str, tag: impl Into<String>) -> Result<Self> {
    let pattern = Regex::new(pattern)
      .map_err(|e| Error::invalid(format!("bad tag rule {:?}: {}", pattern, e)))?;
    self.push_rule(pattern, tag);
    Ok(self)
  }

  fn push_rule(&mut self, pattern: Regex, tag: impl Into<String>) {
    self.rules.push(TagRule {
      pattern,
      tag: tag.into(),
    });
  }

  /// Adds or replaces a lexicon entry
  pub fn insert(&mut self, word: impl Into<String>, tag: impl Into<String>) {
    self.entries.insert(word.into(), tag.into());
  }

  /// Reads `word<TAB>tag` lines into the lexicon; blank and `#` lines are skipped
  pub fn load(mut self, path: &Path) -> Result<Self> {
    let context = || format!("reading lexicon {}", path.display());
    let file = File::open(path).map_err(|e| Error::io(context(), e))?;
    for (number, line) in BufReader::new(file).lines().enumerate() {
      let line = line.map_err(|e| Error::io(context(), e))?;
      let line = line.trim_end();
      if line.trim().is_empty() || line.starts_with('#') {
        continue;
      }
      match line.rsplit_once('\t') {
        Some((word, tag)) if !word.is_empty() && !tag.trim().is_empty() => {
          self.insert(word, tag.trim())
        },
        _ => {
          return Err(Error::io(
            context(),
            io::Error::new(
              io::ErrorKind::InvalidData,
              format!("line {}: expected word<TAB>tag", number + 1),
            ),
          ))
        },
      }
    }
    Ok(self)
  }

  /// Number of lexicon entries
  pub fn len(&self) -> usize {
    self.entries.len()
  }

  /// True when only rules and the default tag apply
  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }

  /// The tag of a single word: exact entry, lowercased entry, first matching rule, default
  pub fn tag_word(&self, word: &str) -> &str {
    if let Some(tag) = self.entries.get(word) {
      return tag;
    }
    if let Some(tag) = self.entries.get(&word.to_lowercase()) {
      return tag;
    }
    self
      .rules
      .iter()
      .find(|rule| rule.pattern.is_match(word))
      .map_or(self.default_tag.as_str(), |rule| rule.tag.as_str())
  }

  fn tag_all(&self, words: &[String]) -> Vec<String> {
    words.iter().map(|word| self.tag_word(word).to_string()).collect()
  }
}

impl PosTagger for LexiconTagger {
  fn tag(&mut self, words: &[String]) -> Result<Vec<String>> {
    Ok(self.tag_all(words))
  }
}

impl NerRecognizer for LexiconTagger {
  fn recognize(&mut self, words: &[String], _pos_tags: &[String]) -> Result<Vec<String>> {
    Ok(self.tag_all(words))
  }
}
