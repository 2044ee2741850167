use crate::error::Error;
use crate::json::to_json;
use crate::kakidashi::to_csv;
use crate::shitsumon::Question;
use chrono::NaiveDate;
use log::info;
use std::fs;
use std::path::{Path, PathBuf};

pub const CSV_MIME: &str = "text/csv;charset=utf-8;";
pub const JSON_MIME: &str = "application/json";
/// Filename subject used when the export has no subject to name it after.
pub const FALLBACK_FILE_SUBJECT: &str = "기출문제";

/// Generated content ready to be offered to the user as a named file.
#[derive(Debug, Clone, PartialEq)]
pub struct Artifact {
    pub bytes: Vec<u8>,
    pub mime: &'static str,
    pub file_name: String,
}

impl Artifact {
    /// CSV export named `ExamAI_<subject>_<date>.csv` after the first question's subject.
    pub fn csv(questions: &[Question], date: NaiveDate) -> Artifact {
        let subject = questions
            .first()
            .map(|q| q.subject.as_str())
            .filter(|subject| !subject.is_empty())
            .unwrap_or(FALLBACK_FILE_SUBJECT);
        Artifact {
            bytes: to_csv(questions).into_bytes(),
            mime: CSV_MIME,
            file_name: format!("ExamAI_{}_{}.csv", subject, date.format("%Y-%m-%d")),
        }
    }

    /// JSON share file named `ExamAI_Share_<name>_<date>.json`.
    pub fn json(questions: &[Question], share_name: &str, date: NaiveDate) -> Result<Artifact, Error> {
        Ok(Artifact {
            bytes: to_json(questions)?.into_bytes(),
            mime: JSON_MIME,
            file_name: format!("ExamAI_Share_{}_{}.json", share_name, date.format("%Y-%m-%d")),
        })
    }
}

/// Somewhere an [`Artifact`] can be delivered to the user.
pub trait FileSink {
    fn deliver(&mut self, artifact: &Artifact) -> Result<PathBuf, Error>;
}

/// Writes artifacts as files into one directory.
pub struct DirectorySink {
    dir: PathBuf,
}

impl DirectorySink {
    pub fn new<P: AsRef<Path>>(dir: P) -> DirectorySink {
        DirectorySink {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    /// Target path; path separators in the name are replaced so the file
    /// always lands directly inside the directory.
    pub fn path_for(&self, artifact: &Artifact) -> PathBuf {
        let name: String = artifact
            .file_name
            .chars()
            .map(|c| if c == '/' || c == '\\' { '_' } else { c })
            .collect();
        self.dir.join(name)
    }
}

impl FileSink for DirectorySink {
    fn deliver(&mut self, artifact: &Artifact) -> Result<PathBuf, Error> {
        fs::create_dir_all(&self.dir)?;
        let path = self.path_for(artifact);
        fs::write(&path, &artifact.bytes)?;
        info!(
            "[Download] Wrote {} bytes of {} to {:?}",
            artifact.bytes.len(),
            artifact.mime,
            path
        );
        Ok(path)
    }
}
