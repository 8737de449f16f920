//! Student and book filter predicates.
//!
//! # Responsibility
//! - Decide row visibility for the roster and catalog views.
//!
//! # Invariants
//! - Filters never reorder: results keep original store order.
//! - Substring matching is case-insensitive over the searched fields only.
//! - An empty query and an absent label filter are both "match all".

use crate::model::book::Book;
use crate::model::student::Student;

/// Roster view query. `None` label filters mean "all".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StudentFilter {
    pub class_label: Option<String>,
    pub parallel: Option<String>,
    /// Matched case-insensitively against the three name fields.
    pub name_query: String,
}

impl StudentFilter {
    /// Filter that keeps every student.
    pub fn all() -> Self {
        Self::default()
    }

    pub fn matches(&self, student: &Student) -> bool {
        if let Some(class_label) = self.class_label.as_deref() {
            if student.class_label != class_label {
                return false;
            }
        }
        if let Some(parallel) = self.parallel.as_deref() {
            if student.parallel != parallel {
                return false;
            }
        }
        if self.name_query.is_empty() {
            return true;
        }
        let query = self.name_query.to_lowercase();
        [
            &student.last_name,
            &student.first_name,
            &student.middle_name,
        ]
        .into_iter()
        .any(|field| field.to_lowercase().contains(&query))
    }
}

/// Visible roster subset, store order preserved.
pub fn filter_students<'a>(students: &'a [Student], filter: &StudentFilter) -> Vec<&'a Student> {
    students
        .iter()
        .filter(|student| filter.matches(student))
        .collect()
}

pub fn book_matches(book: &Book, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }
    let query = query.to_lowercase();
    book.title.to_lowercase().contains(&query) || book.author.to_lowercase().contains(&query)
}

/// Visible catalog subset, store order preserved.
pub fn filter_books<'a>(books: &'a [Book], query: &str) -> Vec<&'a Book> {
    books.iter().filter(|book| book_matches(book, query)).collect()
}

#[cfg(test)]
mod tests {
    use super::{filter_books, filter_students, StudentFilter};
    use crate::model::book::Book;
    use crate::model::student::Student;

    fn roster() -> Vec<Student> {
        vec![
            Student::new("Иванов", "Петр", "Сергеевич", "5", "А", Vec::new()),
            Student::new("Петрова", "Анна", "Ивановна", "5", "Б", Vec::new()),
            Student::new("Сидоров", "Иван", "Петрович", "9", "А", Vec::new()),
        ]
    }

    #[test]
    fn absent_filters_keep_everyone_in_order() {
        let students = roster();
        let visible = filter_students(&students, &StudentFilter::all());
        let names: Vec<&str> = visible.iter().map(|s| s.last_name.as_str()).collect();
        assert_eq!(names, vec!["Иванов", "Петрова", "Сидоров"]);
    }

    #[test]
    fn class_and_parallel_filters_compose() {
        let students = roster();
        let filter = StudentFilter {
            class_label: Some("5".to_string()),
            parallel: Some("А".to_string()),
            name_query: String::new(),
        };
        let visible = filter_students(&students, &filter);
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].last_name, "Иванов");
    }

    #[test]
    fn name_query_is_case_insensitive_over_all_three_fields() {
        let students = roster();
        let filter = StudentFilter {
            name_query: "иван".to_string(),
            ..StudentFilter::default()
        };
        // Matches Иванов (last), Ивановна (middle), Иван (first).
        assert_eq!(filter_students(&students, &filter).len(), 3);

        let upper = StudentFilter {
            name_query: "ИВАН".to_string(),
            ..StudentFilter::default()
        };
        assert_eq!(filter_students(&students, &upper).len(), 3);
    }

    #[test]
    fn name_query_composes_with_label_filters() {
        let students = roster();
        let filter = StudentFilter {
            class_label: Some("9".to_string()),
            parallel: None,
            name_query: "петрович".to_string(),
        };
        let visible = filter_students(&students, &filter);
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].last_name, "Сидоров");
    }

    #[test]
    fn book_query_matches_title_or_author() {
        let books = vec![
            Book::new("Дубровский", "Пушкин"),
            Book::new("Мцыри", "Лермонтов"),
        ];
        assert_eq!(filter_books(&books, "").len(), 2);
        assert_eq!(filter_books(&books, "пушкин").len(), 1);
        assert_eq!(filter_books(&books, "МЦЫРИ").len(), 1);
        assert!(filter_books(&books, "гоголь").is_empty());
    }
}
