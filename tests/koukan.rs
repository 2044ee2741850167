use chrono::NaiveDate;
use kakomon::download::{Artifact, DirectorySink, FileSink};
use kakomon::kakidashi::{escape_field, to_csv};
use kakomon::tokenizer::tokenize;
use kakomon::yomikomi::from_csv;
use kakomon::{json, Choices, ImageAlignment, Question, NO_SUBJECT};

fn question(number: &str, text: &str, choices: [&str; 5]) -> Question {
    Question {
        id: 0,
        exam_year: "2023".to_string(),
        subject: "Networks".to_string(),
        question_number: number.to_string(),
        question_text: text.to_string(),
        choices: Choices::new(choices.map(str::to_string)),
        correct_answer: 3,
        explanation: "See RFC 4180.".to_string(),
        question_image: None,
        question_image_alignment: ImageAlignment::Center,
        is_verified: true,
    }
}

fn sample_set() -> Vec<Question> {
    let mut second = question("2", "Pick the odd one out", ["tcp", "udp", "ip", "", ""]);
    second.subject = NO_SUBJECT.to_string();
    second.question_image = Some("figures/q2.png".to_string());
    second.question_image_alignment = ImageAlignment::Left;
    second.is_verified = false;
    second.correct_answer = 1;

    let mut third = question("15", "Which layer?\nExplain briefly.", ["one", "two", "three", "four", "five"]);
    third.explanation = "Line one\nline two, with a comma".to_string();
    third.exam_year = String::new();

    vec![
        question("1", "What does CSV stand for?", ["Comma", "Colon", "Cell", "Column", ""]),
        second,
        third,
    ]
}

#[test]
fn csv_round_trip_keeps_everything_but_ids() {
    let original = sample_set();
    let imported = from_csv(&to_csv(&original));

    assert_eq!(imported.len(), original.len());
    for (before, after) in original.iter().zip(&imported) {
        assert!(before.same_content(after), "{:?} != {:?}", before, after);
    }
}

#[test]
fn imported_ids_are_fresh_and_distinct() {
    let imported = from_csv(&to_csv(&sample_set()));
    let mut ids: Vec<i64> = imported.iter().map(|q| q.id).collect();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), 3);
    assert!(ids.iter().all(|id| *id > 0));
}

#[test]
fn quoting_survives_tokenizing() {
    let value = "He said, \"hi\"\nline2";
    let escaped = escape_field(Some(value));
    assert_eq!(escaped, "\"He said, \"\"hi\"\"\nline2\"");
    assert_eq!(tokenize(&escaped), vec![vec![value.to_string()]]);
}

#[test]
fn n_data_rows_plus_header_give_n_questions() {
    let text = "whatever,is,here\n\n\"2020\",\"A\",\"1. a\"\r\n\"2021\",\"B\",\"2. b\"\n\n\"2022\",\"C\",\"3. c\"";
    assert_eq!(tokenize(text).len(), 4);
    assert_eq!(from_csv(text).len(), 3);
}

#[test]
fn numbering_round_trip() {
    let imported = from_csv("header\n\"2020\",\"S\",\"3. What is X?\"\n");
    assert_eq!(imported[0].question_number, "3");
    assert_eq!(imported[0].question_text, "What is X?");

    let csv = to_csv(&imported);
    assert!(csv.contains("\"3. What is X?\""));
}

#[test]
fn spreadsheet_edits_degrade_to_defaults() {
    let text = "\u{FEFF}header\n\
                \"2020\",\"S\",\"Q one\",\"1. a\",\"2. b\",\"3. c\",,,\"\",,,,\"false\"\n\
                \"2020\",\"\",\"Q two\",\"a\",\"b\",\"c\",,,\"x\",,,,\"no\"\n";
    let imported = from_csv(text);

    assert_eq!(imported.len(), 2);
    assert_eq!(imported[0].correct_answer, 1);
    assert!(!imported[0].is_verified);
    assert_eq!(imported[0].question_number, "1");
    assert_eq!(imported[0].question_text, "Q one");
    assert_eq!(imported[0].choices.get(3), Some("c"));
    assert_eq!(imported[0].choices.get(4), Some(""));
    assert_eq!(imported[0].choices.get(5), Some(""));

    assert_eq!(imported[1].correct_answer, 1);
    assert!(imported[1].is_verified);
    assert_eq!(imported[1].question_number, "2");
    assert_eq!(imported[1].subject, NO_SUBJECT);
}

#[test]
fn json_round_trip_keeps_ids() {
    let original = sample_set();
    let text = json::to_json(&original).unwrap();
    assert!(text.starts_with("[\n  {\n    \"id\": 0,"));
    assert_eq!(json::from_json(&text).unwrap(), original);
}

#[test]
fn directory_sink_writes_named_files() {
    let dir = tempfile::tempdir().unwrap();
    let mut sink = DirectorySink::new(dir.path());
    let date = NaiveDate::from_ymd_opt(2025, 1, 31).unwrap();
    let questions = sample_set();

    let csv_path = sink.deliver(&Artifact::csv(&questions, date)).unwrap();
    assert_eq!(
        csv_path.file_name().unwrap().to_str().unwrap(),
        "ExamAI_Networks_2025-01-31.csv"
    );
    let written = std::fs::read_to_string(&csv_path).unwrap();
    assert!(written.starts_with('\u{FEFF}'));
    assert_eq!(from_csv(&written).len(), questions.len());

    let json_path = sink
        .deliver(&Artifact::json(&questions, "midterm", date).unwrap())
        .unwrap();
    assert!(json_path.ends_with("ExamAI_Share_midterm_2025-01-31.json"));
    let shared = json::from_json(&std::fs::read_to_string(&json_path).unwrap()).unwrap();
    assert_eq!(shared, questions);
}
