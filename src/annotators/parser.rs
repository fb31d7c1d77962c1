//! A flat baseline dependency parser
use super::DependencyParser;
use crate::data::Relation;
use crate::error::Result;

/// Attaches every word directly to a single root word.
///
/// The root is the first word whose POS tag starts with `V` (the first word
/// when there is no verb). Punctuation (`CH`) attaches as `punct`, everything
/// else as `dep`.
#[derive(Debug, Clone, Default)]
pub struct FlatParser;

impl FlatParser {
  fn root_index(pos_tags: &[String]) -> usize {
    pos_tags.iter().position(|tag| tag.starts_with('V')).unwrap_or(0)
  }
}

impl DependencyParser for FlatParser {
  fn parse(&mut self, words: &[String], pos_tags: &[String]) -> Result<Vec<Relation>> {
    let root = FlatParser::root_index(pos_tags);
    Ok(
      (0..words.len())
        .map(|index| {
          if index == root {
            Relation::new(0, "root")
          } else if pos_tags.get(index).map(String::as_str) == Some("CH") {
            Relation::new(root + 1, "punct")
          } else {
            Relation::new(root + 1, "dep")
          }
        })
        .collect(),
    )
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|item| item.to_string()).collect()
  }

  #[test]
  fn verb_becomes_root() {
    let words = strings(&["Ông", "Nguyễn", "làm_việc", "."]);
    let tags = strings(&["Nc", "Np", "V", "CH"]);
    let relations = FlatParser.parse(&words, &tags).unwrap();
    assert_eq!(
      relations,
      vec![
        Relation::new(3, "dep"),
        Relation::new(3, "dep"),
        Relation::new(0, "root"),
        Relation::new(3, "punct"),
      ]
    );
  }
}
