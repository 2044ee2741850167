use crate::shitsumon::Question;
use crate::tokenizer::BOM;
use std::fmt::Display;

/// Header labels, in column order: exam year, subject, question, choices 1-5,
/// answer, explanation, image, image alignment, verified.
pub const HEADERS: [&str; 13] = [
    "기출년도",
    "과목",
    "문제",
    "보기1",
    "보기2",
    "보기3",
    "보기4",
    "보기5",
    "정답",
    "해설",
    "이미지",
    "이미지정렬",
    "검증됨",
];

/// Wraps a value in double quotes, doubling any quote inside it.
/// `None` becomes an empty quoted field.
pub fn escape_field<T: Display>(value: Option<T>) -> String {
    let value = value.map(|v| v.to_string()).unwrap_or_default();
    format!("\"{}\"", value.replace('"', "\"\""))
}

macro_rules! escaped {
    ($value:expr) => {
        escape_field(Some($value))
    };
}

fn to_csv_row(question: &Question) -> String {
    let mut fields = Vec::with_capacity(HEADERS.len());
    fields.push(escaped!(&question.exam_year));
    fields.push(escaped!(question.subject_or_default()));
    fields.push(escaped!(question.numbered_text()));
    fields.extend(question.choices.iter().map(|(key, text)| {
        if text.is_empty() {
            escaped!("")
        } else {
            escaped!(format!("{}. {}", key, text))
        }
    }));
    fields.push(escaped!(question.correct_answer));
    fields.push(escaped!(&question.explanation));
    fields.push(escaped!(question.question_image.as_deref().unwrap_or("")));
    fields.push(escaped!(question.question_image_alignment));
    fields.push(escaped!(question.is_verified));
    fields.join(",")
}

/// Renders questions as BOM-prefixed CSV: a header line, then one line per question.
pub fn to_csv(questions: &[Question]) -> String {
    let mut lines = Vec::with_capacity(questions.len() + 1);
    lines.push(HEADERS.join(","));
    lines.extend(questions.iter().map(to_csv_row));

    let mut csv = String::from(BOM);
    csv.push_str(&lines.join("\n"));
    csv
}
