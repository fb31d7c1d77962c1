mod common;

use common::*;
use vncorenlp::format;
use vncorenlp::{Error, Pipeline, PipelineConfig, Stage};

#[test]
fn annotates_the_reference_sentence() {
  let loader = CountingLoader::default();
  let mut pipeline = Pipeline::with_loader(config("wseg,pos", "inline"), &loader).unwrap();
  let annotation = pipeline.annotate("Ông Nguyễn đang làm việc.").unwrap();

  assert_eq!(annotation.sentences().len(), 1);
  let sentence = &annotation.sentences()[0];
  assert_eq!(sentence.tokens, vec!["Ông", "Nguyễn", "đang", "làm", "việc", "."]);
  assert_eq!(sentence.words, vec!["Ông", "Nguyễn", "đang", "làm_việc", "."]);
  assert!(sentence.ner_labels.is_none());
  assert!(sentence.relations.is_none());
  assert_eq!(
    format::render(&annotation, pipeline.format()),
    "Ông/Nc Nguyễn/Np đang/R làm_việc/V ./CH\n\n"
  );
}

#[test]
fn unknown_annotator_fails_before_initialization() {
  let loader = CountingLoader::default();
  let result =
    PipelineConfig::from_options(Some("wseg,foo"), None).and_then(|c| Pipeline::with_loader(c, &loader));
  assert!(matches!(result, Err(Error::InvalidConfiguration(_))));
  assert!(loader.calls().is_empty(), "no stage may be loaded");
}

#[test]
fn initialization_follows_dependency_order() {
  let loader = CountingLoader::default();
  let mut pipeline = Pipeline::with_loader(config("parse, NER ,pos,wseg", "column"), &loader).unwrap();
  assert_eq!(
    loader.calls(),
    vec![Stage::WordSegment, Stage::PosTag, Stage::Ner, Stage::DependencyParse]
  );
  // a second initialization finds every slot filled
  pipeline.initialize(&loader).unwrap();
  pipeline.initialize(&loader).unwrap();
  assert_eq!(loader.calls().len(), 4);
  for stage in Stage::ALL.iter() {
    assert!(pipeline.is_initialized(*stage));
  }
}

#[test]
fn prerequisites_run_but_are_not_reported() {
  let loader = CountingLoader::default();
  let mut pipeline = Pipeline::with_loader(config("ner", "inline"), &loader).unwrap();
  assert_eq!(loader.calls(), vec![Stage::PosTag, Stage::Ner]);

  let annotation = pipeline.annotate("Ông Nguyễn ở Hà Nội.").unwrap();
  let sentence = &annotation.sentences()[0];
  assert!(sentence.pos_tags.is_none());
  assert_eq!(
    sentence.ner_labels.as_ref().unwrap(),
    &vec!["O", "B-PER", "O", "O", "O", "O"]
  );
}

#[test]
fn parser_receives_internal_pos_tags() {
  let loader = CountingLoader::default();
  let parser = RecordingParser::default();
  let seen = parser.seen_tags.clone();
  let mut pipeline =
    Pipeline::uninitialized(config("parse", "column")).with_dependency_parser(Box::new(parser));
  pipeline.initialize(&loader).unwrap();
  assert_eq!(loader.calls(), vec![Stage::PosTag]);

  let annotation = pipeline.annotate("Ông đang làm việc.").unwrap();
  assert_eq!(
    seen.borrow().as_slice(),
    &[vec!["Nc", "R", "V", "N", "CH"]
      .into_iter()
      .map(String::from)
      .collect::<Vec<_>>()]
  );
  let relations = annotation.sentences()[0].relations.as_ref().unwrap();
  assert_eq!(relations[2].head, 0);
  assert_eq!(relations[2].label, "root");
}

#[test]
fn words_equal_tokens_without_segmentation() {
  let loader = CountingLoader::default();
  let mut pipeline = Pipeline::with_loader(config("pos,ner,parse", "inline"), &loader).unwrap();
  let annotation = pipeline
    .annotate("Ông Nguyễn đang làm việc tại công ty. Tôi là sinh viên đại học!")
    .unwrap();
  assert_eq!(annotation.sentences().len(), 2);
  for sentence in annotation.sentences() {
    assert_eq!(sentence.words, sentence.tokens);
  }
  assert_eq!(annotation.words(), annotation.tokens());
}

#[test]
fn every_layer_is_aligned_with_words() {
  let loader = CountingLoader::default();
  let mut pipeline = Pipeline::with_loader(PipelineConfig::default(), &loader).unwrap();
  let annotation = pipeline
    .annotate("Ông Nguyễn đang làm việc tại công ty ở Hà Nội. Tôi là sinh viên đại học (?) rồi!")
    .unwrap();
  assert_eq!(annotation.sentences().len(), 2);
  for sentence in annotation.sentences() {
    let words = sentence.len();
    assert_eq!(sentence.pos_tags.as_ref().map(Vec::len), Some(words));
    assert_eq!(sentence.ner_labels.as_ref().map(Vec::len), Some(words));
    assert_eq!(sentence.relations.as_ref().map(Vec::len), Some(words));
    let roots = sentence
      .relations
      .as_ref()
      .unwrap()
      .iter()
      .filter(|relation| relation.head == 0)
      .count();
    assert_eq!(roots, 1);
  }
}

#[test]
fn document_views_follow_sentence_order() {
  let loader = CountingLoader::default();
  let mut pipeline = Pipeline::with_loader(config("wseg", "inline"), &loader).unwrap();
  let annotation = pipeline.annotate("Tôi đi học. Anh ấy làm việc!").unwrap();
  let raws: Vec<&str> = annotation.sentences().iter().map(|s| s.raw.as_str()).collect();
  assert_eq!(raws, vec!["Tôi đi học .", "Anh ấy làm việc !"]);
  assert_eq!(annotation.word_segmented_text(), "Tôi đi học . Anh ấy làm_việc !");
  assert_eq!(annotation.tokens().len(), 9);
  assert_eq!(annotation.words().len(), 8);
  assert_eq!(annotation.raw_text(), "Tôi đi học. Anh ấy làm việc!");
}

#[test]
fn blank_input_has_no_sentences() {
  let loader = CountingLoader::default();
  let mut pipeline = Pipeline::with_loader(PipelineConfig::default(), &loader).unwrap();
  assert!(pipeline.annotate_sentence("  \t ").unwrap().is_none());
  let annotation = pipeline.annotate("   ").unwrap();
  assert!(annotation.sentences().is_empty());
  assert_eq!(annotation.word_segmented_text(), "");
}

#[test]
fn misaligned_tags_violate_the_stage_contract() {
  let mut pipeline =
    Pipeline::uninitialized(config("pos", "inline")).with_pos_tagger(Box::new(FixedTags(vec!["N"])));
  match pipeline.annotate("Tôi đi học.") {
    Err(Error::StageContractViolation { stage, .. }) => assert_eq!(stage, Stage::PosTag),
    other => panic!("expected a POS contract violation, got {:?}", other.map(|_| ())),
  }

  let mut pipeline = Pipeline::uninitialized(config("ner", "inline"))
    .with_pos_tagger(Box::new(pos_tagger()))
    .with_ner_recognizer(Box::new(FixedTags(vec!["O", "O", "O", "O", "O"])));
  match pipeline.annotate("Tôi đi học.") {
    Err(Error::StageContractViolation { stage, .. }) => assert_eq!(stage, Stage::Ner),
    other => panic!("expected a NER contract violation, got {:?}", other.map(|_| ())),
  }
}

#[test]
fn words_must_rebuild_the_tokens() {
  for words in vec![
    vec!["bogus"],
    vec!["Tôi", "đi", "học"],
    vec!["Tôi", "đi_học", ".", "!"],
    vec!["Tôi", "học_đi", "."],
    vec![],
  ] {
    let mut pipeline = Pipeline::uninitialized(config("wseg", "inline"))
      .with_word_segmenter(Box::new(FixedWords(words.clone())));
    match pipeline.annotate("Tôi đi học.") {
      Err(Error::StageContractViolation { stage, .. }) => assert_eq!(stage, Stage::WordSegment),
      other => panic!("{:?} accepted: {:?}", words, other.map(|_| ())),
    }
  }

  let mut pipeline = Pipeline::uninitialized(config("wseg", "inline"))
    .with_word_segmenter(Box::new(FixedWords(vec!["Tôi", "đi_học", "."])));
  let annotation = pipeline.annotate("Tôi đi học.").unwrap();
  assert_eq!(annotation.tokens(), ["Tôi", "đi", "học", "."]);
  assert_eq!(annotation.words(), ["Tôi", "đi_học", "."]);
}

#[test]
fn heads_must_stay_inside_the_sentence() {
  let mut pipeline = Pipeline::uninitialized(config("parse", "column"))
    .with_pos_tagger(Box::new(pos_tagger()))
    .with_dependency_parser(Box::new(FixedRelations(vec![(0, "root"), (3, "dep")])));
  match pipeline.annotate("Tôi đi") {
    Err(Error::StageContractViolation { stage, message }) => {
      assert_eq!(stage, Stage::DependencyParse);
      assert!(message.contains("head 3"), "unexpected message: {}", message);
    },
    other => panic!("expected a parse contract violation, got {:?}", other.map(|_| ())),
  }

  // the last word is a valid head
  let mut pipeline = Pipeline::uninitialized(config("parse", "column"))
    .with_pos_tagger(Box::new(pos_tagger()))
    .with_dependency_parser(Box::new(FixedRelations(vec![(2, "nsubj"), (0, "root")])));
  assert!(pipeline.annotate("Tôi đi").is_ok());
}

#[test]
fn missing_collaborator_is_a_configuration_error() {
  let mut pipeline = Pipeline::uninitialized(config("wseg", "inline"));
  assert!(!pipeline.is_initialized(Stage::WordSegment));
  assert!(matches!(
    pipeline.annotate("Tôi đi học."),
    Err(Error::InvalidConfiguration(_))
  ));
}

#[test]
fn annotations_serialize_to_json() {
  let loader = CountingLoader::default();
  let mut pipeline = Pipeline::with_loader(config("wseg,pos", "inline"), &loader).unwrap();
  let annotation = pipeline.annotate("Ông Nguyễn đang làm việc.").unwrap();
  let json = serde_json::to_value(&annotation).unwrap();
  assert_eq!(json["sentences"][0]["words"][3], "làm_việc");
  assert_eq!(json["sentences"][0]["pos_tags"][3], "V");
  assert!(json["sentences"][0]["ner_labels"].is_null());
  assert_eq!(json["word_segmented_text"], "Ông Nguyễn đang làm_việc .");
}
