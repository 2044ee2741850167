//! 過去問交換 (Kakomonkōkan)
//!
//! Moves past-exam question sets in and out of an application:
//!
//! - CSV export ([`kakidashi`]) and import ([`yomikomi`]) that survive a trip
//!   through spreadsheet tools
//! - pretty JSON for sharing ([`json`])
//! - named file artifacts handed to a [`download::FileSink`]
//!
pub mod download;
pub mod error;
pub mod json;
pub mod kakidashi;
pub mod shitsumon;
pub mod tokenizer;
pub mod yomikomi;

pub use error::Error;
pub use shitsumon::{Choices, ImageAlignment, Question, NO_SUBJECT};
