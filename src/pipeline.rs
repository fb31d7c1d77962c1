//! The annotation pipeline: a long-lived object holding one collaborator per
//! enabled stage, applied sentence by sentence in dependency order
use tracing::debug;

use crate::annotators::{
  DependencyParser, ModelDirLoader, NerRecognizer, PosTagger, SentenceSegmenter, StageLoader,
  WordSegmenter,
};
use crate::config::{OutputFormat, PipelineConfig};
use crate::data::{Annotation, Relation, Sentence, WORD_JOINER};
use crate::error::{Error, Result};
use crate::stage::{Stage, StageSet};
use crate::tokenizer::Tokenizer;

/// Runs the configured stages over documents.
///
/// Stages that are only needed as prerequisites of requested ones (POS
/// tagging for NER and parsing) run, but their output is not kept on the
/// resulting `Sentence`.
pub struct Pipeline {
  config: PipelineConfig,
  stages: StageSet,
  segmenter: Box<dyn SentenceSegmenter>,
  word_segmenter: Option<Box<dyn WordSegmenter>>,
  pos_tagger: Option<Box<dyn PosTagger>>,
  ner_recognizer: Option<Box<dyn NerRecognizer>>,
  dependency_parser: Option<Box<dyn DependencyParser>>,
}

impl Pipeline {
  /// A pipeline whose collaborators come from the baseline resources in `config.models_dir`
  pub fn new(config: PipelineConfig) -> Result<Self> {
    let loader = ModelDirLoader::new(config.models_dir.clone());
    Pipeline::with_loader(config, &loader)
  }

  /// A pipeline whose collaborators come from `loader`
  pub fn with_loader(config: PipelineConfig, loader: &dyn StageLoader) -> Result<Self> {
    let mut pipeline = Pipeline::uninitialized(config);
    pipeline.initialize(loader)?;
    Ok(pipeline)
  }

  /// A pipeline with empty stage slots: fill them with the `with_*` methods
  /// and/or `initialize` before annotating
  pub fn uninitialized(config: PipelineConfig) -> Self {
    Pipeline {
      stages: config.effective_stages(),
      config,
      segmenter: Box::new(Tokenizer::default()),
      word_segmenter: None,
      pos_tagger: None,
      ner_recognizer: None,
      dependency_parser: None,
    }
  }

  /// Replaces the sentence segmenter
  pub fn with_sentence_segmenter(mut self, segmenter: Box<dyn SentenceSegmenter>) -> Self {
    self.segmenter = segmenter;
    self
  }

  /// Supplies the word segmentation collaborator
  pub fn with_word_segmenter(mut self, collaborator: Box<dyn WordSegmenter>) -> Self {
    self.word_segmenter = Some(collaborator);
    self
  }

  /// Supplies the part-of-speech collaborator
  pub fn with_pos_tagger(mut self, collaborator: Box<dyn PosTagger>) -> Self {
    self.pos_tagger = Some(collaborator);
    self
  }

  /// Supplies the named-entity collaborator
  pub fn with_ner_recognizer(mut self, collaborator: Box<dyn NerRecognizer>) -> Self {
    self.ner_recognizer = Some(collaborator);
    self
  }

  /// Supplies the dependency parsing collaborator
  pub fn with_dependency_parser(mut self, collaborator: Box<dyn DependencyParser>) -> Self {
    self.dependency_parser = Some(collaborator);
    self
  }

  /// Loads every enabled stage whose slot is still empty, in dependency order.
  /// Filled slots are never reloaded, so calling this repeatedly is harmless.
  pub fn initialize(&mut self, loader: &dyn StageLoader) -> Result<()> {
    for stage in self.stages.iter() {
      if self.is_initialized(stage) {
        continue;
      }
      debug!("initializing {} stage", stage);
      match stage {
        Stage::WordSegment => self.word_segmenter = Some(loader.word_segmenter()?),
        Stage::PosTag => self.pos_tagger = Some(loader.pos_tagger()?),
        Stage::Ner => self.ner_recognizer = Some(loader.ner_recognizer()?),
        Stage::DependencyParse => self.dependency_parser = Some(loader.dependency_parser()?),
      }
    }
    Ok(())
  }

  /// Is the collaborator of `stage` in place?
  pub fn is_initialized(&self, stage: Stage) -> bool {
    match stage {
      Stage::WordSegment => self.word_segmenter.is_some(),
      Stage::PosTag => self.pos_tagger.is_some(),
      Stage::Ner => self.ner_recognizer.is_some(),
      Stage::DependencyParse => self.dependency_parser.is_some(),
    }
  }

  /// The configuration this pipeline was built with
  pub fn config(&self) -> &PipelineConfig {
    &self.config
  }

  /// The output format of this pipeline
  pub fn format(&self) -> OutputFormat {
    self.config.format
  }

  /// The stages that execute, prerequisites included
  pub fn stages(&self) -> StageSet {
    self.stages
  }

  /// Annotates a whole document: splits it into sentences and annotates
  /// each non-empty one, in order
  pub fn annotate(&mut self, text: &str) -> Result<Annotation> {
    let raw_sentences = self.segmenter.sentences(text);
    let mut annotation = Annotation::new(text);
    for raw_sentence in raw_sentences {
      if let Some(sentence) = self.annotate_sentence(&raw_sentence)? {
        annotation.push(sentence);
      }
    }
    Ok(annotation)
  }

  /// Annotates one raw sentence. Returns `None` when it is blank.
  pub fn annotate_sentence(&mut self, raw: &str) -> Result<Option<Sentence>> {
    let raw = raw.trim();
    if raw.is_empty() {
      return Ok(None);
    }
    let reported = self.config.annotators;
    let tokens: Vec<String> = raw.split_whitespace().map(str::to_string).collect();

    let words = if self.stages.contains(Stage::WordSegment) {
      let segmenter = self
        .word_segmenter
        .as_mut()
        .ok_or_else(|| uninitialized(Stage::WordSegment))?;
      let words = segmenter.segment(raw)?;
      check_covers_tokens(&tokens, &words)?;
      words
    } else {
      tokens.clone()
    };

    let pos_tags = if self.stages.contains(Stage::PosTag) {
      let tagger = self
        .pos_tagger
        .as_mut()
        .ok_or_else(|| uninitialized(Stage::PosTag))?;
      let tags = tagger.tag(&words)?;
      check_aligned(Stage::PosTag, words.len(), tags.len())?;
      Some(tags)
    } else {
      None
    };
    let tags_for_consumers: &[String] = pos_tags.as_deref().unwrap_or(&[]);

    let ner_labels = if self.stages.contains(Stage::Ner) {
      let recognizer = self
        .ner_recognizer
        .as_mut()
        .ok_or_else(|| uninitialized(Stage::Ner))?;
      let labels = recognizer.recognize(&words, tags_for_consumers)?;
      check_aligned(Stage::Ner, words.len(), labels.len())?;
      Some(labels)
    } else {
      None
    };

    let relations = if self.stages.contains(Stage::DependencyParse) {
      let parser = self
        .dependency_parser
        .as_mut()
        .ok_or_else(|| uninitialized(Stage::DependencyParse))?;
      let parsed = parser.parse(&words, tags_for_consumers)?;
      check_aligned(Stage::DependencyParse, words.len(), parsed.len())?;
      check_heads(words.len(), &parsed)?;
      Some(parsed)
    } else {
      None
    };

    Ok(Some(Sentence {
      raw: raw.to_string(),
      tokens,
      words,
      pos_tags: pos_tags.filter(|_| reported.contains(Stage::PosTag)),
      ner_labels,
      relations,
    }))
  }
}

fn uninitialized(stage: Stage) -> Error {
  Error::invalid(format!("the {} stage is enabled but was never initialized", stage))
}

/// Every word must be one or more consecutive tokens joined with `WORD_JOINER`,
/// and together the words must use up the tokens in order
fn check_covers_tokens(tokens: &[String], words: &[String]) -> Result<()> {
  let mut rest = tokens;
  for (index, word) in words.iter().enumerate() {
    let mut joined = String::new();
    let mut taken = 0;
    while taken < rest.len() && joined.len() < word.len() {
      if taken > 0 {
        joined.push(WORD_JOINER);
      }
      joined.push_str(&rest[taken]);
      taken += 1;
    }
    if taken == 0 || joined != *word {
      return Err(Error::contract(
        Stage::WordSegment,
        format!("word {} {:?} does not match the tokens in order", index + 1, word),
      ));
    }
    rest = &rest[taken..];
  }
  if rest.is_empty() {
    Ok(())
  } else {
    Err(Error::contract(
      Stage::WordSegment,
      format!("{} of {} tokens are not covered by any word", rest.len(), tokens.len()),
    ))
  }
}

fn check_aligned(stage: Stage, words: usize, produced: usize) -> Result<()> {
  if words == produced {
    Ok(())
  } else {
    Err(Error::contract(
      stage,
      format!("expected {} annotations, one per word, got {}", words, produced),
    ))
  }
}

fn check_heads(words: usize, relations: &[Relation]) -> Result<()> {
  match relations.iter().position(|relation| relation.head > words) {
    None => Ok(()),
    Some(index) => Err(Error::contract(
      Stage::DependencyParse,
      format!(
        "word {} points to head {} outside a sentence of {} words",
        index + 1,
        relations[index].head,
        words
      ),
    )),
  }
}
