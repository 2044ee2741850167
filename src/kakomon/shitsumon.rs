use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Subject written and read back when a question has none ("no subject").
pub const NO_SUBJECT: &str = "과목없음";
pub const CHOICE_COUNT: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageAlignment {
    Left,
    #[default]
    Center,
    Right,
}

impl ImageAlignment {
    pub fn as_str(&self) -> &'static str {
        match self {
            ImageAlignment::Left => "left",
            ImageAlignment::Center => "center",
            ImageAlignment::Right => "right",
        }
    }
}

impl fmt::Display for ImageAlignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ImageAlignment {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "left" => Ok(ImageAlignment::Left),
            "center" => Ok(ImageAlignment::Center),
            "right" => Ok(ImageAlignment::Right),
            other => Err(Error::UnknownAlignment(other.to_string())),
        }
    }
}

/// The five answer choices of a question, keyed 1 through 5.
///
/// Every key is always present; an unused choice is the empty string. In JSON
/// this is an object keyed `"1"`..`"5"`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "BTreeMap<u8, String>", into = "BTreeMap<u8, String>")]
pub struct Choices([String; CHOICE_COUNT]);

impl Choices {
    pub fn new(texts: [String; CHOICE_COUNT]) -> Self {
        Choices(texts)
    }

    /// Choice text for a 1-based key, `None` outside 1..=5.
    pub fn get(&self, key: usize) -> Option<&str> {
        key.checked_sub(1)
            .and_then(|idx| self.0.get(idx))
            .map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, &str)> {
        self.0
            .iter()
            .enumerate()
            .map(|(idx, text)| (idx + 1, text.as_str()))
    }

    pub fn filled(&self) -> usize {
        self.0.iter().filter(|text| !text.is_empty()).count()
    }
}

impl From<BTreeMap<u8, String>> for Choices {
    fn from(map: BTreeMap<u8, String>) -> Self {
        let mut texts: [String; CHOICE_COUNT] = Default::default();
        for (key, text) in map {
            if let Some(slot) = (key as usize)
                .checked_sub(1)
                .and_then(|idx| texts.get_mut(idx))
            {
                *slot = text;
            }
        }
        Choices(texts)
    }
}

impl From<Choices> for BTreeMap<u8, String> {
    fn from(choices: Choices) -> Self {
        choices
            .0
            .into_iter()
            .enumerate()
            .map(|(idx, text)| (idx as u8 + 1, text))
            .collect()
    }
}

fn default_subject() -> String {
    NO_SUBJECT.to_string()
}
fn default_correct_answer() -> u32 {
    1
}
fn default_verified() -> bool {
    true
}

/// One exam question as exchanged through CSV and JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: i64,
    #[serde(default)]
    pub exam_year: String,
    #[serde(default = "default_subject")]
    pub subject: String,
    #[serde(default)]
    pub question_number: String,
    #[serde(default)]
    pub question_text: String,
    #[serde(default)]
    pub choices: Choices,
    #[serde(default = "default_correct_answer")]
    pub correct_answer: u32,
    #[serde(default)]
    pub explanation: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub question_image: Option<String>,
    #[serde(default)]
    pub question_image_alignment: ImageAlignment,
    #[serde(default = "default_verified")]
    pub is_verified: bool,
}

impl Question {
    /// Subject to write out, falling back to [`NO_SUBJECT`].
    pub fn subject_or_default(&self) -> &str {
        if self.subject.is_empty() {
            NO_SUBJECT
        } else {
            &self.subject
        }
    }

    /// Number and text recombined the way the question column stores them.
    pub fn numbered_text(&self) -> String {
        format!("{}. {}", self.question_number, self.question_text)
    }

    /// Equal in everything but `id`, which is regenerated on every import.
    pub fn same_content(&self, other: &Question) -> bool {
        Question { id: other.id, ..self.clone() } == *other
    }
}
