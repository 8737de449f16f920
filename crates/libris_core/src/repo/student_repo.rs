//! Student roster adapter (`students.json`).
//!
//! # Responsibility
//! - Persist the roster as a pretty-printed JSON array of records.
//!
//! # Invariants
//! - Record order in the file is the store order.
//! - Ids are regenerated on load; identity does not survive a restart.

use crate::model::student::Student;
use crate::repo::paths::LibraryPaths;
use crate::repo::{read_if_present, write_atomic, RepoError, RepoResult};
use log::{error, info};
use std::path::PathBuf;

/// JSON-backed roster store.
#[derive(Debug)]
pub struct StudentRepository {
    path: PathBuf,
}

impl StudentRepository {
    pub fn new(paths: &LibraryPaths) -> Self {
        Self {
            path: paths.students_path(),
        }
    }

    /// Loads the roster; a missing file yields an empty roster.
    ///
    /// # Errors
    /// - I/O failures other than absence, and malformed JSON.
    pub fn load(&self) -> RepoResult<Vec<Student>> {
        let Some(contents) = read_if_present(&self.path)? else {
            return Ok(Vec::new());
        };
        serde_json::from_str(&contents)
            .map_err(|err| RepoError::malformed(&self.path, err.to_string()))
    }

    /// Loads the roster, substituting an empty roster on any failure.
    pub fn load_or_default(&self) -> Vec<Student> {
        match self.load() {
            Ok(students) => students,
            Err(err) => {
                error!("event=students_load module=repo status=error error={err}");
                Vec::new()
            }
        }
    }

    /// Overwrites the roster file atomically.
    pub fn save(&self, students: &[Student]) -> RepoResult<()> {
        let body = serde_json::to_string_pretty(students)
            .map_err(|err| RepoError::malformed(&self.path, err.to_string()))?;
        match write_atomic(&self.path, &body) {
            Ok(()) => {
                info!(
                    "event=students_save module=repo status=ok count={}",
                    students.len()
                );
                Ok(())
            }
            Err(err) => {
                error!("event=students_save module=repo status=error error={err}");
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::StudentRepository;
    use crate::model::student::Student;
    use crate::repo::paths::LibraryPaths;

    #[test]
    fn missing_file_yields_empty_roster() {
        let dir = tempfile::tempdir().unwrap();
        let repo = StudentRepository::new(&LibraryPaths::new(dir.path()));
        assert!(repo.load().unwrap().is_empty());
    }

    #[test]
    fn roster_round_trips_without_ids() {
        let dir = tempfile::tempdir().unwrap();
        let paths = LibraryPaths::new(dir.path());
        let repo = StudentRepository::new(&paths);

        let students = vec![
            Student::new(
                "Иванов",
                "Пётр",
                "Сергеевич",
                "5",
                "А",
                vec!["Дубровский - Пушкин".to_string()],
            ),
            Student::new("Сидорова", "Анна", "Павловна", "9", "Б", Vec::new()),
        ];
        repo.save(&students).unwrap();

        let loaded = repo.load().unwrap();
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded[0].last_name, "Иванов");
        assert_eq!(loaded[0].books, students[0].books);
        assert_eq!(loaded[1].class_label, "9");
        // Identity is process-lifetime only.
        assert_ne!(loaded[0].id, students[0].id);

        let raw = std::fs::read_to_string(paths.students_path()).unwrap();
        assert!(!raw.contains("\"id\""));
    }

    #[test]
    fn broken_json_falls_back_to_empty() {
        let dir = tempfile::tempdir().unwrap();
        let paths = LibraryPaths::new(dir.path());
        std::fs::write(paths.students_path(), "[{\"last_name\":").unwrap();

        let repo = StudentRepository::new(&paths);
        assert!(repo.load().is_err());
        assert!(repo.load_or_default().is_empty());
    }
}
