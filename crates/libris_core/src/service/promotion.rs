//! End-of-year class promotion workflow.
//!
//! # Responsibility
//! - Advance every numeric class label by one, except ambiguous students.
//! - Collect ambiguous students into a worklist for manual resolution.
//! - Commit or cancel the resolution and persist the roster either way.
//!
//! # Invariants
//! - Non-numeric class labels are never touched and never ambiguous.
//! - Scan-phase increments are not rolled back by `cancel`.
//! - `commit` refuses to run while any ambiguous student is undecided.

use crate::model::student::{Student, StudentId};
use crate::repo::RepoError;
use crate::service::library::Library;
use log::info;
use std::collections::HashMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type PromotionResult<T> = Result<T, PromotionError>;

#[derive(Debug)]
pub enum PromotionError {
    /// Decision supplied for a student outside the worklist.
    UnknownStudent(StudentId),
    /// Commit attempted while decisions are missing.
    PendingDecisions { undecided: usize },
    /// Roster persisted incompletely; in-memory state is already updated.
    Persistence(RepoError),
}

impl Display for PromotionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownStudent(id) => write!(f, "student is not in the worklist: {id}"),
            Self::PendingDecisions { undecided } => {
                write!(f, "{undecided} ambiguous student(s) still undecided")
            }
            Self::Persistence(err) => write!(f, "{err}"),
        }
    }
}

impl Error for PromotionError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Persistence(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for PromotionError {
    fn from(value: RepoError) -> Self {
        Self::Persistence(value)
    }
}

/// Per-student resolution for the ambiguous worklist.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromotionDecision {
    /// Increment the class label; a no-op at the terminal class.
    Promote,
    /// Remove the student (and their held-book debt) at commit.
    Delete,
}

/// Tunables for the scan phase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromotionPolicy {
    /// Grade whose students always need a manual decision, e.g. the
    /// graduating-soon grade.
    pub exception_grade: String,
}

impl Default for PromotionPolicy {
    fn default() -> Self {
        Self {
            exception_grade: "9".to_string(),
        }
    }
}

/// Worklist entry shown to the operator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AmbiguousStudent {
    pub id: StudentId,
    pub full_name: String,
    pub class_label: String,
    /// `Promote` will not change the label when set.
    pub at_max_label: bool,
}

/// In-flight promotion between scan and commit.
///
/// Dropping the run without `commit` or `cancel` leaves scan increments in
/// memory but unpersisted.
#[derive(Debug)]
pub struct PromotionRun {
    max_label: Option<String>,
    ambiguous: Vec<AmbiguousStudent>,
    decisions: HashMap<StudentId, PromotionDecision>,
}

/// Scan phase: increments every unambiguous numeric class label in place
/// and returns the worklist of ambiguous students.
///
/// With an empty worklist the run can be committed immediately.
pub fn begin_promotion(library: &mut Library, policy: &PromotionPolicy) -> PromotionRun {
    let max_label = library.config().max_numeric_class().map(str::to_string);
    let mut ambiguous = Vec::new();

    for student in library.students_mut().iter_mut() {
        if student.class_label.parse::<u64>().is_err() {
            continue;
        }
        let at_max_label = max_label.as_deref() == Some(student.class_label.as_str());
        if at_max_label || student.class_label == policy.exception_grade {
            ambiguous.push(AmbiguousStudent {
                id: student.id,
                full_name: student.full_name(),
                class_label: student.class_label.clone(),
                at_max_label,
            });
        } else {
            increment_label(student);
        }
    }

    info!(
        "event=promotion_scan module=service status=ok ambiguous={} max_label={}",
        ambiguous.len(),
        max_label.as_deref().unwrap_or("-")
    );

    PromotionRun {
        max_label,
        ambiguous,
        decisions: HashMap::new(),
    }
}

impl PromotionRun {
    /// Worklist of students awaiting a manual decision.
    pub fn ambiguous(&self) -> &[AmbiguousStudent] {
        &self.ambiguous
    }

    /// Records a decision; a repeated call overrides the previous one.
    ///
    /// # Errors
    /// - `UnknownStudent` when `id` is not in the worklist.
    pub fn decide(&mut self, id: StudentId, decision: PromotionDecision) -> PromotionResult<()> {
        if !self.ambiguous.iter().any(|entry| entry.id == id) {
            return Err(PromotionError::UnknownStudent(id));
        }
        self.decisions.insert(id, decision);
        Ok(())
    }

    /// Ambiguous students without a decision yet.
    pub fn undecided(&self) -> usize {
        self.ambiguous
            .iter()
            .filter(|entry| !self.decisions.contains_key(&entry.id))
            .count()
    }

    /// Whether `commit` would be accepted.
    pub fn is_resolved(&self) -> bool {
        self.undecided() == 0
    }

    /// Applies all decisions, removes delete-flagged students and persists.
    ///
    /// A successful commit spends the run: the worklist is drained, so a
    /// repeated call persists again but mutates nothing.
    ///
    /// # Errors
    /// - `PendingDecisions` while the worklist is not fully decided; the
    ///   store and the run are left untouched in that case.
    pub fn commit(&mut self, library: &mut Library) -> PromotionResult<()> {
        let undecided = self.undecided();
        if undecided > 0 {
            return Err(PromotionError::PendingDecisions { undecided });
        }

        let mut to_delete = Vec::new();
        let mut promoted = 0usize;
        for entry in &self.ambiguous {
            match self.decisions.get(&entry.id) {
                Some(PromotionDecision::Promote) => {
                    let at_max = |label: &str| self.max_label.as_deref() == Some(label);
                    if let Some(student) = library
                        .students_mut()
                        .iter_mut()
                        .find(|student| student.id == entry.id)
                    {
                        if !at_max(&student.class_label) && increment_label(student) {
                            promoted += 1;
                        }
                    }
                }
                Some(PromotionDecision::Delete) => to_delete.push(entry.id),
                None => {}
            }
        }
        library
            .students_mut()
            .retain(|student| !to_delete.contains(&student.id));
        self.ambiguous.clear();
        self.decisions.clear();

        info!(
            "event=promotion_commit module=service status=ok promoted={} deleted={}",
            promoted,
            to_delete.len()
        );
        library.persist_students()?;
        Ok(())
    }

    /// Abandons manual resolution.
    ///
    /// Scan-phase increments stay applied and the roster is persisted;
    /// ambiguous students keep their original class.
    pub fn cancel(self, library: &mut Library) -> PromotionResult<()> {
        info!(
            "event=promotion_cancel module=service status=ok unresolved={}",
            self.undecided()
        );
        library.persist_students()?;
        Ok(())
    }
}

fn increment_label(student: &mut Student) -> bool {
    match student.class_label.parse::<u64>().ok().and_then(|value| value.checked_add(1)) {
        Some(next) => {
            student.class_label = next.to_string();
            true
        }
        None => false,
    }
}
