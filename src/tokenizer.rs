//! Provides functionality for splitting raw text into tokens and sentences
use lazy_static::lazy_static;
use regex::Regex;
use std::collections::HashSet;

use crate::annotators::SentenceSegmenter;

lazy_static! {
  /// chunks that must survive tokenization intact
  static ref PROTECTED: Regex = Regex::new(
    r"(?x)^(?:
        (?:https?://|www\.)\S*[\w/]             # urls
      | [\w.+-]+@[\w-]+(?:\.[\w-]+)+            # e-mail addresses
      | [+-]?\d+(?:[.,:/-]\d+)*%?               # numbers, dates, times, ratios
      | \.{2,} | …                              # ellipses
      | \p{Lu}\p{L}{0,3}\.(?:\p{Lu}\p{L}{0,3}\.)*\p{Lu}\p{L}{0,3}  # dotted acronyms: TP.HCM, Th.S
      | \p{Lu}\.                                # initials
    )$"
  )
  .unwrap();
  /// paragraph breaks are always sentence breaks
  static ref PARAGRAPH_BREAK: Regex = Regex::new(r"\n\s*\n").unwrap();
}

/// Stores auxiliary resources required by the tokenizer so that they need to be initialized only
/// once
pub struct Tokenizer {
  /// abbreviations keeping their trailing dot
  pub abbreviations: HashSet<&'static str>,
}

impl Default for Tokenizer {
  fn default() -> Tokenizer {
    Tokenizer {
      abbreviations: [
        "TP.", "Tp.", "GS.", "PGS.", "TS.", "ThS.", "BS.", "KS.", "NXB.", "Mr.", "Mrs.", "Ms.",
        "Dr.", "St.", "Co.", "Ltd.", "Inc.", "Jr.", "v.v", "v.v.", "vs.", "e.g.", "i.e.",
        "etc.",
      ]
      .iter()
      .copied()
      .collect(),
    }
  }
}

impl SentenceSegmenter for Tokenizer {
  fn sentences(&mut self, text: &str) -> Vec<String> {
    Tokenizer::sentences(self, text)
  }
}

/// Characters that close a quotation or a bracket
fn is_closing(token: &str) -> bool {
  matches!(token, "\"" | "”" | "’" | "'" | ")" | "]" | "}" | "»")
}

/// Characters that open a quotation, a bracket or a dialogue line
fn is_opening(token: &str) -> bool {
  matches!(token, "\"" | "“" | "‘" | "'" | "(" | "[" | "{" | "«" | "-" | "–")
}

/// Tokens made solely of sentence-final punctuation
fn is_terminal(token: &str) -> bool {
  !token.is_empty() && token.chars().all(|c| matches!(c, '.' | '!' | '?' | '…'))
}

/// Characters kept inside a word: letters, digits, and joining marks
fn is_word_char(c: char) -> bool {
  c.is_alphanumeric() || matches!(c, '-' | '_' | '\'' | '’')
}

/// checks whether two tokens are matching brackets or quotation marks
fn is_bounded(left: Option<&String>, right: Option<&String>) -> bool {
  let pair = [left.map(String::as_str), right.map(String::as_str)];
  matches!(
    pair,
    [Some("["), Some("]")] | [Some("("), Some(")")] | [Some("{"), Some("}")] | [Some("\""), Some("\"")]
  )
}

impl Tokenizer {
  fn is_protected(&self, chunk: &str) -> bool {
    self.abbreviations.contains(chunk) || PROTECTED.is_match(chunk)
  }

  /// Splits raw text into tokens: punctuation is detached from words, while
  /// urls, numbers, abbreviations and similar chunks are kept whole
  pub fn tokenize(&self, text: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    for chunk in text.split_whitespace() {
      self.split_chunk(chunk, &mut tokens);
    }
    tokens
  }

  fn split_chunk(&self, chunk: &str, tokens: &mut Vec<String>) {
    if self.is_protected(chunk) {
      tokens.push(chunk.to_string());
      return;
    }
    let mut rest = chunk;
    // leading punctuation, one token per mark (ellipses stay whole)
    while let Some(c) = rest.chars().next() {
      if is_word_char(c) || self.is_protected(rest) {
        break;
      }
      let width = punctuation_run(rest, c);
      tokens.push(rest[..width].to_string());
      rest = &rest[width..];
    }
    // trailing punctuation, collected right-to-left
    let mut trailing = Vec::new();
    while let Some(c) = rest.chars().last() {
      if is_word_char(c) || self.is_protected(rest) {
        break;
      }
      let width = punctuation_run_back(rest, c);
      let split = rest.len() - width;
      trailing.push(rest[split..].to_string());
      rest = &rest[..split];
    }
    if !rest.is_empty() {
      if self.is_protected(rest) {
        tokens.push(rest.to_string());
      } else {
        self.split_inner(rest, tokens);
      }
    }
    tokens.extend(trailing.into_iter().rev());
  }

  /// Detaches punctuation glued between two words, e.g. `a,b` or `(x)y`
  fn split_inner(&self, core: &str, tokens: &mut Vec<String>) {
    let mut start = 0;
    for (offset, c) in core.char_indices() {
      if !is_word_char(c) {
        if start < offset {
          tokens.push(core[start..offset].to_string());
        }
        tokens.push(c.to_string());
        start = offset + c.len_utf8();
      }
    }
    if start < core.len() {
      tokens.push(core[start..].to_string());
    }
  }

  /// Groups tokens into sentences, each returned as its tokens joined by single spaces
  pub fn join_sentences(&self, tokens: &[String]) -> Vec<String> {
    let mut sentences = Vec::new();
    let mut current: Vec<&str> = Vec::new();
    let mut index = 0;
    while index < tokens.len() {
      let token = &tokens[index];
      current.push(token);
      index += 1;
      if !is_terminal(token) {
        continue;
      }
      let question_or_bang = token.contains('?') || token.contains('!');
      // a bracketed "(?)" or "(!)" is an aside, not a sentence end
      if question_or_bang && is_bounded(tokens.get(index.wrapping_sub(2)), tokens.get(index)) {
        continue;
      }
      // closing quotes and brackets stay with the sentence they finish
      while let Some(next) = tokens.get(index) {
        let unbalanced = current.iter().filter(|t| **t == next.as_str()).count() % 2 == 1;
        if !is_closing(next) || (is_opening(next) && !unbalanced) {
          break;
        }
        current.push(next);
        index += 1;
      }
      let breaks = match tokens.get(index) {
        None => true,
        Some(_) if question_or_bang => true,
        Some(next) => {
          next.chars().next().map_or(false, |c| c.is_uppercase() || c.is_numeric())
            || is_opening(next)
        },
      };
      if breaks {
        sentences.push(current.join(" "));
        current.clear();
      }
    }
    if !current.is_empty() {
      sentences.push(current.join(" "));
    }
    sentences
  }

  /// gets the sentences of a text; blank lines always separate sentences
  pub fn sentences(&self, text: &str) -> Vec<String> {
    PARAGRAPH_BREAK
      .split(text)
      .flat_map(|paragraph| self.join_sentences(&self.tokenize(paragraph)))
      .filter(|sentence| !sentence.trim().is_empty())
      .collect()
  }
}

/// Byte width of the punctuation token starting `text` with `c`
fn punctuation_run(text: &str, c: char) -> usize {
  if c == '.' {
    text.chars().take_while(|&d| d == '.').count()
  } else {
    c.len_utf8()
  }
}

/// Byte width of the punctuation token ending `text` with `c`; runs of
/// sentence-final marks such as `...` or `?!` stay together
fn punctuation_run_back(text: &str, c: char) -> usize {
  if matches!(c, '.' | '!' | '?') {
    text
      .chars()
      .rev()
      .take_while(|d| matches!(d, '.' | '!' | '?'))
      .map(char::len_utf8)
      .sum()
  } else {
    c.len_utf8()
  }
}
