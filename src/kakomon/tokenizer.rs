use log::debug;
use std::mem;

pub const BOM: char = '\u{FEFF}';

/// One line of CSV with its fields already unescaped.
pub type Row = Vec<String>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Unquoted,
    Quoted,
}

/// Splits CSV text into rows of unescaped fields.
///
/// Quoted fields may contain commas, line breaks and doubled quotes. A line
/// made of a single empty field is dropped. Malformed quoting never fails:
/// an unterminated quote keeps accumulating until the input ends.
pub fn tokenize(text: &str) -> Vec<Row> {
    let text = text.strip_prefix(BOM).unwrap_or(text);
    let mut chars = text.chars().peekable();

    let mut rows: Vec<Row> = Vec::new();
    let mut row: Row = Vec::new();
    let mut field = String::new();
    let mut state = State::Unquoted;

    while let Some(c) = chars.next() {
        match state {
            State::Quoted => match c {
                '"' if chars.peek() == Some(&'"') => {
                    chars.next();
                    field.push('"');
                }
                '"' => state = State::Unquoted,
                _ => field.push(c),
            },
            State::Unquoted => match c {
                '"' => state = State::Quoted,
                ',' => row.push(mem::take(&mut field)),
                '\n' | '\r' => {
                    if c == '\r' && chars.peek() == Some(&'\n') {
                        chars.next();
                    }
                    row.push(mem::take(&mut field));
                    if row.len() == 1 && row[0].is_empty() {
                        row.clear();
                    } else {
                        rows.push(mem::take(&mut row));
                    }
                }
                _ => field.push(c),
            },
        }
    }

    if !field.is_empty() || !row.is_empty() {
        row.push(field);
        rows.push(row);
    }
    if state == State::Quoted {
        debug!("[Tokenizer] Input ended inside a quoted field.");
    }
    debug!("[Tokenizer] Produced {} rows.", rows.len());
    rows
}
