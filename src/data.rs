//! Annotation data structures: a document, its sentences, and their per-word layers
use serde::Serialize;

/// Separator joining the syllable tokens of a multi-token word
pub const WORD_JOINER: char = '_';

/// A dependency arc pointing from a word to its head
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Relation {
  /// 1-based index of the head word within the sentence, 0 for the root
  pub head: usize,
  /// dependency label, e.g. `nsubj`
  pub label: String,
}

impl Relation {
  /// Convenience constructor
  pub fn new(head: usize, label: impl Into<String>) -> Self {
    Relation {
      head,
      label: label.into(),
    }
  }
}

/// One annotated sentence. Every optional layer that is present holds exactly
/// one entry per word, in word order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Sentence {
  /// the raw, trimmed sentence string
  pub raw: String,
  /// raw lexical units, before word segmentation
  pub tokens: Vec<String>,
  /// word-segmented units, compounds joined with `WORD_JOINER`
  pub words: Vec<String>,
  /// part-of-speech tags, when reported
  pub pos_tags: Option<Vec<String>>,
  /// named-entity labels, when reported
  pub ner_labels: Option<Vec<String>>,
  /// dependency relations, when reported
  pub relations: Option<Vec<Relation>>,
}

impl Sentence {
  /// Number of words
  pub fn len(&self) -> usize {
    self.words.len()
  }

  /// True when the sentence has no words
  pub fn is_empty(&self) -> bool {
    self.words.is_empty()
  }

  /// The words joined by single spaces
  pub fn word_segmented(&self) -> String {
    self.words.join(" ")
  }

  /// POS tag of the word at `index` (0-based), if tags were reported
  pub fn pos(&self, index: usize) -> Option<&str> {
    layer_at(&self.pos_tags, index)
  }

  /// NER label of the word at `index` (0-based), if labels were reported
  pub fn ner(&self, index: usize) -> Option<&str> {
    layer_at(&self.ner_labels, index)
  }

  /// Dependency relation of the word at `index` (0-based), if parsed
  pub fn relation(&self, index: usize) -> Option<&Relation> {
    self.relations.as_ref().and_then(|relations| relations.get(index))
  }
}

fn layer_at(layer: &Option<Vec<String>>, index: usize) -> Option<&str> {
  layer
    .as_ref()
    .and_then(|values| values.get(index))
    .map(String::as_str)
}

/// A whole document: the ordered sentences plus flattened views over them
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Annotation {
  raw_text: String,
  sentences: Vec<Sentence>,
  tokens: Vec<String>,
  words: Vec<String>,
  word_segmented_text: String,
}

impl Annotation {
  /// An annotation with no sentences yet
  pub fn new(raw_text: impl Into<String>) -> Self {
    Annotation {
      raw_text: raw_text.into(),
      ..Annotation::default()
    }
  }

  /// Assembles a document from its sentences, in order
  pub fn assemble<I>(raw_text: impl Into<String>, sentences: I) -> Self
  where
    I: IntoIterator<Item = Sentence>,
  {
    let mut annotation = Annotation::new(raw_text);
    for sentence in sentences {
      annotation.push(sentence);
    }
    annotation
  }

  /// Appends a sentence, extending the flattened token/word views and the
  /// word-segmented text. Empty sentences are ignored.
  pub fn push(&mut self, sentence: Sentence) {
    if sentence.is_empty() && sentence.tokens.is_empty() {
      return;
    }
    self.tokens.extend(sentence.tokens.iter().cloned());
    self.words.extend(sentence.words.iter().cloned());
    let rendered = sentence.word_segmented();
    if !rendered.is_empty() {
      if !self.word_segmented_text.is_empty() {
        self.word_segmented_text.push(' ');
      }
      self.word_segmented_text.push_str(&rendered);
    }
    self.sentences.push(sentence);
  }

  /// The input text, as given
  pub fn raw_text(&self) -> &str {
    &self.raw_text
  }

  /// Sentences in document order
  pub fn sentences(&self) -> &[Sentence] {
    &self.sentences
  }

  /// All tokens, in document order
  pub fn tokens(&self) -> &[String] {
    &self.tokens
  }

  /// All words, in document order
  pub fn words(&self) -> &[String] {
    &self.words
  }

  /// The sentences' word-segmented renderings joined with single spaces
  pub fn word_segmented_text(&self) -> &str {
    self.word_segmented_text.trim()
  }
}
