//! Tests for the sentence and token splitting
use vncorenlp::annotators::SentenceSegmenter;
use vncorenlp::tokenizer::Tokenizer;

#[test]
/// Test sentence splitting of a simple paragraph
fn test_sentence_tokenization_simple() {
  let simple_text = "Ông Nguyễn đang làm việc tại TP.HCM. Ông ấy nói: \"Tôi rất vui.\" \
    Ngày 12/3/2020, GS. Trần đến thăm công ty... rồi về nhà! Bạn có khỏe không? \
    Tôi khỏe (!) cảm ơn.";
  let tokenizer = Tokenizer::default();
  let sentences = tokenizer.sentences(simple_text);
  assert_eq!(
    sentences,
    vec![
      "Ông Nguyễn đang làm việc tại TP.HCM .",
      "Ông ấy nói : \" Tôi rất vui . \"",
      "Ngày 12/3/2020 , GS. Trần đến thăm công ty ... rồi về nhà !",
      "Bạn có khỏe không ?",
      "Tôi khỏe ( ! ) cảm ơn .",
    ]
  );
}

#[test]
fn blank_lines_separate_sentences() {
  let mut tokenizer = Tokenizer::default();
  let sentences = SentenceSegmenter::sentences(&mut tokenizer, "Tiêu đề không dấu chấm\n\nnội dung tiếp theo");
  assert_eq!(sentences, vec!["Tiêu đề không dấu chấm", "nội dung tiếp theo"]);
}

#[test]
fn lowercase_continuation_does_not_split() {
  let tokenizer = Tokenizer::default();
  assert_eq!(
    tokenizer.sentences("Giá tăng 3.5% so với năm 2019. và còn tăng nữa"),
    vec!["Giá tăng 3.5% so với năm 2019 . và còn tăng nữa"]
  );
}

#[test]
fn urls_and_emails_stay_whole() {
  let tokenizer = Tokenizer::default();
  assert_eq!(
    tokenizer.tokenize("Xem https://vnexpress.net/tin-tuc, hoặc gửi thư tới ban.bien-tap@example.vn."),
    vec![
      "Xem",
      "https://vnexpress.net/tin-tuc",
      ",",
      "hoặc",
      "gửi",
      "thư",
      "tới",
      "ban.bien-tap@example.vn",
      ".",
    ]
  );
}

#[test]
fn empty_text_has_no_sentences() {
  let tokenizer = Tokenizer::default();
  assert!(tokenizer.sentences("").is_empty());
  assert!(tokenizer.sentences(" \n\n \t").is_empty());
}
