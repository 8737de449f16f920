//! Domain store for roster, catalog and taxonomy.
//!
//! # Responsibility
//! - Own the three in-memory collections for the process lifetime.
//! - Run every mutation through boundary validation, then persist.
//! - Resolve filtered-view rows back to store identities.
//!
//! # Invariants
//! - The store is an explicit handle; no process-wide mutable state.
//! - A stale row (filtered view raced a mutation) resolves to `None`/no-op,
//!   never to an out-of-range mutation.
//! - Persistence failure keeps the in-memory edit; the `Persistence` error
//!   variant means "applied but not yet durable".

use crate::model::book::{Book, BookId, BookValidationError};
use crate::model::config::LibraryConfig;
use crate::model::student::{Student, StudentId, StudentValidationError};
use crate::repo::book_repo::BookRepository;
use crate::repo::config_repo::ConfigRepository;
use crate::repo::paths::LibraryPaths;
use crate::repo::student_repo::StudentRepository;
use crate::repo::RepoError;
use crate::search::filter::{filter_books, filter_students, StudentFilter};
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type StoreResult<T> = Result<T, StoreError>;

/// Boundary error for domain-store operations.
#[derive(Debug)]
pub enum StoreError {
    Student(StudentValidationError),
    Book(BookValidationError),
    /// Update target vanished between row resolution and the mutation.
    StudentNotFound(StudentId),
    /// `replace_config` requires both label lists to be non-empty.
    EmptyConfigLists,
    /// The in-memory change is applied but not yet durable.
    Persistence(RepoError),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Student(err) => write!(f, "{err}"),
            Self::Book(err) => write!(f, "{err}"),
            Self::StudentNotFound(id) => write!(f, "student not found: {id}"),
            Self::EmptyConfigLists => {
                write!(f, "class and parallel lists must not be empty")
            }
            Self::Persistence(err) => write!(f, "{err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Student(err) => Some(err),
            Self::Book(err) => Some(err),
            Self::StudentNotFound(_) => None,
            Self::EmptyConfigLists => None,
            Self::Persistence(err) => Some(err),
        }
    }
}

impl From<StudentValidationError> for StoreError {
    fn from(value: StudentValidationError) -> Self {
        Self::Student(value)
    }
}

impl From<BookValidationError> for StoreError {
    fn from(value: BookValidationError) -> Self {
        Self::Book(value)
    }
}

impl From<RepoError> for StoreError {
    fn from(value: RepoError) -> Self {
        Self::Persistence(value)
    }
}

/// In-memory store plus its persistence adapters.
#[derive(Debug)]
pub struct Library {
    config_repo: ConfigRepository,
    book_repo: BookRepository,
    student_repo: StudentRepository,
    config: LibraryConfig,
    books: Vec<Book>,
    students: Vec<Student>,
}

impl Library {
    /// Loads all three stores from `paths`, substituting defaults for
    /// missing or unreadable files. Never fails.
    pub fn open(paths: LibraryPaths) -> Self {
        let config_repo = ConfigRepository::new(&paths);
        let book_repo = BookRepository::new(&paths);
        let student_repo = StudentRepository::new(&paths);

        let config = config_repo.load_or_default();
        let books = book_repo.load_or_default();
        let students = student_repo.load_or_default();
        info!(
            "event=library_open module=service status=ok students={} books={} base_dir={}",
            students.len(),
            books.len(),
            paths.base_dir().display()
        );

        Self {
            config_repo,
            book_repo,
            student_repo,
            config,
            books,
            students,
        }
    }

    pub fn config(&self) -> &LibraryConfig {
        &self.config
    }

    pub fn students(&self) -> &[Student] {
        &self.students
    }

    pub fn books(&self) -> &[Book] {
        &self.books
    }

    pub(crate) fn students_mut(&mut self) -> &mut Vec<Student> {
        &mut self.students
    }

    // --- persistence -----------------------------------------------------

    pub fn save_config(&self) -> StoreResult<()> {
        Ok(self.config_repo.save(&self.config)?)
    }

    pub fn save_books(&self) -> StoreResult<()> {
        Ok(self.book_repo.save(&self.books)?)
    }

    pub fn save_students(&self) -> StoreResult<()> {
        Ok(self.persist_students()?)
    }

    pub(crate) fn persist_students(&self) -> crate::repo::RepoResult<()> {
        self.student_repo.save(&self.students)
    }

    // --- views -----------------------------------------------------------

    /// Visible roster subset, store order preserved.
    pub fn list_students(&self, filter: &StudentFilter) -> Vec<&Student> {
        filter_students(&self.students, filter)
    }

    /// Visible catalog subset, store order preserved.
    pub fn list_books(&self, query: &str) -> Vec<&Book> {
        filter_books(&self.books, query)
    }

    /// Display labels for the whole catalog, offered by student editing.
    pub fn books_display_list(&self) -> Vec<String> {
        self.books.iter().map(Book::display_label).collect()
    }

    pub fn find_student(&self, id: StudentId) -> Option<&Student> {
        self.students.iter().find(|student| student.id == id)
    }

    /// Resolves row `row` of the view `filter` would produce right now.
    ///
    /// Recomputes the filtered view from current state, so a row reported
    /// against a stale view simply resolves to `None`.
    pub fn student_id_at(&self, filter: &StudentFilter, row: usize) -> Option<StudentId> {
        self.list_students(filter).get(row).map(|student| student.id)
    }

    /// Resolves row `row` of the catalog view `query` would produce now.
    pub fn book_id_at(&self, query: &str, row: usize) -> Option<BookId> {
        self.list_books(query).get(row).map(|book| book.id)
    }

    // --- roster mutations ------------------------------------------------

    /// Validates and appends a student, then persists the roster.
    ///
    /// On `Err(Persistence)` the student is in the store but not on disk.
    pub fn add_student(&mut self, student: Student) -> StoreResult<StudentId> {
        student.validate()?;
        let id = student.id;
        self.students.push(student);
        self.save_students()?;
        Ok(id)
    }

    /// Replaces every field of an existing student; the id is kept.
    pub fn update_student(&mut self, id: StudentId, replacement: Student) -> StoreResult<()> {
        replacement.validate()?;
        let Some(slot) = self.students.iter_mut().find(|student| student.id == id) else {
            return Err(StoreError::StudentNotFound(id));
        };
        *slot = Student { id, ..replacement };
        self.save_students()
    }

    /// Removes a student by identity; `Ok(false)` when already gone.
    pub fn delete_student(&mut self, id: StudentId) -> StoreResult<bool> {
        let before = self.students.len();
        self.students.retain(|student| student.id != id);
        if self.students.len() == before {
            return Ok(false);
        }
        self.save_students()?;
        Ok(true)
    }

    // --- catalog mutations -----------------------------------------------

    /// Validates and appends a book, then persists the catalog.
    pub fn add_book(&mut self, book: Book) -> StoreResult<BookId> {
        book.validate()?;
        let id = book.id;
        self.books.push(book);
        self.save_books()?;
        Ok(id)
    }

    /// Removes a book by identity; `Ok(false)` when already gone.
    pub fn delete_book(&mut self, id: BookId) -> StoreResult<bool> {
        let before = self.books.len();
        self.books.retain(|book| book.id != id);
        if self.books.len() == before {
            return Ok(false);
        }
        self.save_books()?;
        Ok(true)
    }

    // --- taxonomy mutations ----------------------------------------------

    /// Appends a class label; empty or duplicate labels are ignored.
    /// In-memory only until a config save.
    pub fn add_class(&mut self, label: &str) -> bool {
        push_unique(&mut self.config.classes, label)
    }

    pub fn remove_class(&mut self, label: &str) -> bool {
        remove_label(&mut self.config.classes, label)
    }

    /// Appends a parallel label; empty or duplicate labels are ignored.
    pub fn add_parallel(&mut self, label: &str) -> bool {
        push_unique(&mut self.config.parallels, label)
    }

    pub fn remove_parallel(&mut self, label: &str) -> bool {
        remove_label(&mut self.config.parallels, label)
    }

    /// Replaces both label lists and persists the config.
    ///
    /// # Errors
    /// - `EmptyConfigLists` when either list is empty; store unchanged.
    pub fn replace_config(
        &mut self,
        classes: Vec<String>,
        parallels: Vec<String>,
    ) -> StoreResult<()> {
        if classes.is_empty() || parallels.is_empty() {
            return Err(StoreError::EmptyConfigLists);
        }
        self.config.classes = classes;
        self.config.parallels = parallels;
        self.save_config()
    }
}

fn push_unique(labels: &mut Vec<String>, label: &str) -> bool {
    let label = label.trim();
    if label.is_empty() || labels.iter().any(|existing| existing == label) {
        return false;
    }
    labels.push(label.to_string());
    true
}

fn remove_label(labels: &mut Vec<String>, label: &str) -> bool {
    let before = labels.len();
    labels.retain(|existing| existing != label);
    labels.len() != before
}
