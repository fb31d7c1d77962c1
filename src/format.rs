//! Rendering annotations as `inline` or `column` text
use std::fmt::Write as _;
use std::io::{self, Write};

use crate::config::OutputFormat;
use crate::data::{Annotation, Sentence};

/// Written in the column format for any layer that was not produced
pub const PLACEHOLDER: &str = "";

/// One line of `word/POS/NER` units, followed by a blank line
pub fn inline_sentence(sentence: &Sentence) -> String {
  let mut line = String::new();
  for (index, word) in sentence.words.iter().enumerate() {
    if index > 0 {
      line.push(' ');
    }
    line.push_str(word);
    if let Some(pos) = sentence.pos(index) {
      line.push('/');
      line.push_str(pos);
    }
    if let Some(ner) = sentence.ner(index) {
      line.push('/');
      line.push_str(ner);
    }
  }
  line.push_str("\n\n");
  line
}

/// One `index, form, POS, NER, head, relation` row per word, followed by a blank line
pub fn column_sentence(sentence: &Sentence) -> String {
  let mut block = String::new();
  for (index, word) in sentence.words.iter().enumerate() {
    let relation = sentence.relation(index);
    let head = relation.map(|relation| relation.head.to_string());
    // writing into a String cannot fail
    let _ = writeln!(
      block,
      "{}\t{}\t{}\t{}\t{}\t{}",
      index + 1,
      word,
      sentence.pos(index).unwrap_or(PLACEHOLDER),
      sentence.ner(index).unwrap_or(PLACEHOLDER),
      head.as_deref().unwrap_or(PLACEHOLDER),
      relation.map_or(PLACEHOLDER, |relation| relation.label.as_str()),
    );
  }
  block.push('\n');
  block
}

/// Renders one sentence
pub fn render_sentence(sentence: &Sentence, format: OutputFormat) -> String {
  match format {
    OutputFormat::Inline => inline_sentence(sentence),
    OutputFormat::Column => column_sentence(sentence),
  }
}

/// Renders every sentence of a document, in order
pub fn render(annotation: &Annotation, format: OutputFormat) -> String {
  annotation
    .sentences()
    .iter()
    .map(|sentence| render_sentence(sentence, format))
    .collect()
}

/// Streams the rendering of a document to `writer`
pub fn write_annotation<W: Write>(
  writer: &mut W,
  annotation: &Annotation,
  format: OutputFormat,
) -> io::Result<()> {
  for sentence in annotation.sentences() {
    writer.write_all(render_sentence(sentence, format).as_bytes())?;
  }
  Ok(())
}
