use crate::shitsumon::{Choices, ImageAlignment, Question, CHOICE_COUNT, NO_SUBJECT};
use crate::tokenizer::tokenize;
use chrono::Utc;
use log::{debug, warn};
use rand::{rng, Rng};
use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

const YEAR: usize = 0;
const SUBJECT: usize = 1;
const QUESTION: usize = 2;
const FIRST_CHOICE: usize = 3;
const ANSWER: usize = 8;
const EXPLANATION: usize = 9;
const IMAGE: usize = 10;
const ALIGNMENT: usize = 11;
const VERIFIED: usize = 12;

const ID_JITTER: i64 = 1_000_000;

static QUESTION_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([0-9]+)[.\s]+((?s:.*))").unwrap());

static CHOICE_PREFIXES: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    (1..=CHOICE_COUNT)
        .map(|key| Regex::new(&format!(r"^{key}[.\s]+((?s:.*))")).unwrap())
        .collect()
});

/// Hands out question ids: import time in milliseconds plus the row index plus
/// a random offset. Ids are only unique among those issued by one generator.
pub struct IdGenerator {
    epoch_ms: i64,
    issued: HashSet<i64>,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self::starting_at(Utc::now().timestamp_millis())
    }

    pub fn starting_at(epoch_ms: i64) -> Self {
        IdGenerator {
            epoch_ms,
            issued: HashSet::new(),
        }
    }

    pub fn next_for(&mut self, index: usize) -> i64 {
        let mut id = self.epoch_ms + index as i64 + rng().random_range(0..ID_JITTER);
        while !self.issued.insert(id) {
            id += 1;
        }
        id
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

fn strip_choice_prefix(raw: &str, key: usize) -> String {
    if raw.is_empty() {
        return String::new();
    }
    let stripped = CHOICE_PREFIXES[key - 1]
        .captures(raw)
        .and_then(|caps| caps.get(1))
        .map_or(raw, |rest| rest.as_str());
    stripped.trim().to_string()
}

/// Leading integer of `raw`, `parseInt`-style: digits after optional
/// whitespace and `+`, anything after them ignored.
fn parse_answer(raw: &str) -> Option<u32> {
    let raw = raw.trim_start();
    let raw = raw.strip_prefix('+').unwrap_or(raw);
    let end = raw
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(raw.len());
    raw[..end].parse::<u32>().ok().filter(|answer| *answer > 0)
}

/// Builds a question from one data row. `position` is the 1-based index of the
/// row among data rows and numbers questions whose text carries no number.
///
/// Never fails: missing or malformed columns fall back to defaults.
pub fn reconstruct(row: &[String], position: usize, id: i64) -> Question {
    let field = |idx: usize| row.get(idx).map(String::as_str).unwrap_or("");

    let full_text = field(QUESTION);
    let (question_number, question_text) = match QUESTION_PREFIX.captures(full_text) {
        Some(caps) => (caps[1].to_string(), caps[2].trim().to_string()),
        None => (position.to_string(), full_text.trim().to_string()),
    };

    let choices = Choices::new(std::array::from_fn(|idx| {
        strip_choice_prefix(field(FIRST_CHOICE + idx), idx + 1)
    }));

    let correct_answer = parse_answer(field(ANSWER)).unwrap_or_else(|| {
        warn!(
            "[Import] Row {}: answer {:?} is not a positive number, using 1.",
            position,
            field(ANSWER)
        );
        1
    });

    let question_image_alignment = match field(ALIGNMENT) {
        "" => ImageAlignment::Center,
        raw => raw.parse().unwrap_or_else(|err| {
            warn!("[Import] Row {}: {}, using center.", position, err);
            ImageAlignment::Center
        }),
    };

    let question_image = Some(field(IMAGE))
        .filter(|image| !image.is_empty())
        .map(str::to_string);
    let subject = match field(SUBJECT) {
        "" => NO_SUBJECT,
        subject => subject,
    };

    let question = Question {
        id,
        exam_year: field(YEAR).to_string(),
        subject: subject.to_string(),
        question_number,
        question_text,
        choices,
        correct_answer,
        explanation: field(EXPLANATION).to_string(),
        question_image,
        question_image_alignment,
        is_verified: field(VERIFIED) != "false",
    };
    debug!(
        "[Import] Row {} -> question {} ({} choices)",
        position,
        question.question_number,
        question.choices.filled()
    );
    question
}

/// Parses CSV text into questions. The first row is always taken to be the
/// header and skipped, whatever it contains.
pub fn from_csv(text: &str) -> Vec<Question> {
    let rows = tokenize(text);
    let mut ids = IdGenerator::new();
    rows.iter()
        .skip(1)
        .enumerate()
        .map(|(index, row)| reconstruct(row, index + 1, ids.next_for(index)))
        .collect()
}
