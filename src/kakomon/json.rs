use crate::error::Error;
use crate::shitsumon::Question;

/// Pretty-printed JSON array of questions, two-space indented.
pub fn to_json(questions: &[Question]) -> Result<String, Error> {
    Ok(serde_json::to_string_pretty(questions)?)
}

/// Reads a JSON array of questions. Missing optional fields take the same
/// defaults a CSV import would give them.
pub fn from_json(text: &str) -> Result<Vec<Question>, Error> {
    Ok(serde_json::from_str(text)?)
}
