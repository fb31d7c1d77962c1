//! Longest-match word segmentation against a vocabulary of multi-syllable words
use std::collections::HashSet;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use super::WordSegmenter;
use crate::data::WORD_JOINER;
use crate::error::{Error, Result};

/// Greedily merges consecutive tokens into the longest vocabulary entry
/// starting at each position. Punctuation never takes part in a merge.
#[derive(Debug, Clone, Default)]
pub struct DictionarySegmenter {
  vocabulary: HashSet<String>,
  max_syllables: usize,
}

/// Lowercased syllables separated by single spaces
fn normalize(entry: &str) -> String {
  entry
    .split(|c: char| c.is_whitespace() || c == WORD_JOINER)
    .filter(|syllable| !syllable.is_empty())
    .map(str::to_lowercase)
    .collect::<Vec<_>>()
    .join(" ")
}

fn is_wordlike(token: &str) -> bool {
  token.chars().any(char::is_alphanumeric)
}

impl DictionarySegmenter {
  /// Builds a segmenter from vocabulary entries whose syllables are separated
  /// by spaces or underscores
  pub fn new<I, S>(entries: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
  {
    let mut segmenter = DictionarySegmenter::default();
    for entry in entries {
      let normalized = normalize(entry.as_ref());
      let syllables = normalized.split(' ').count();
      // single syllables never change the segmentation
      if syllables > 1 {
        segmenter.max_syllables = segmenter.max_syllables.max(syllables);
        segmenter.vocabulary.insert(normalized);
      }
    }
    segmenter
  }

  /// Loads a vocabulary file with one entry per line; `#` starts a comment line
  pub fn load(path: &Path) -> Result<Self> {
    let context = || format!("reading vocabulary {}", path.display());
    let file = File::open(path).map_err(|e| Error::io(context(), e))?;
    let mut entries = Vec::new();
    for line in BufReader::new(file).lines() {
      let line = line.map_err(|e| Error::io(context(), e))?;
      let line = line.trim();
      if !line.is_empty() && !line.starts_with('#') {
        entries.push(line.to_string());
      }
    }
    Ok(DictionarySegmenter::new(entries))
  }

  /// Number of multi-syllable entries
  pub fn len(&self) -> usize {
    self.vocabulary.len()
  }

  /// True when the vocabulary is empty, in which case words equal tokens
  pub fn is_empty(&self) -> bool {
    self.vocabulary.is_empty()
  }

  fn longest_match(&self, tokens: &[&str]) -> usize {
    let limit = self.max_syllables.min(tokens.len());
    for width in (2..=limit).rev() {
      let window = &tokens[..width];
      if window.iter().all(|token| is_wordlike(token))
        && self.vocabulary.contains(&normalize(&window.join(" ")))
      {
        return width;
      }
    }
    1
  }
}

impl WordSegmenter for DictionarySegmenter {
  fn segment(&mut self, sentence: &str) -> Result<Vec<String>> {
    let tokens: Vec<&str> = sentence.split_whitespace().collect();
    let mut words = Vec::with_capacity(tokens.len());
    let mut position = 0;
    while position < tokens.len() {
      let width = self.longest_match(&tokens[position..]);
      words.push(tokens[position..position + width].join(&WORD_JOINER.to_string()));
      position += width;
    }
    Ok(words)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn prefers_the_longest_entry() {
    let mut segmenter = DictionarySegmenter::new(vec!["làm việc", "làm_việc_nhà", "Hà Nội"]);
    let words = segmenter.segment("Tôi làm việc nhà ở hà nội .").unwrap();
    assert_eq!(words, vec!["Tôi", "làm_việc_nhà", "ở", "hà_nội", "."]);
  }

  #[test]
  fn single_syllables_are_ignored() {
    let segmenter = DictionarySegmenter::new(vec!["nhà", "  ", "công ty"]);
    assert_eq!(segmenter.len(), 1);
  }
}
