//! Matching event titles to courses in the catalog.

use crate::model::{Course, CourseId};

/// Catalog lookup by course name appearing inside an event title.
///
/// Entries are scanned in catalog order and the first hit wins. There is no
/// longest-match preference: with "Matemáticas" listed before "Matemáticas
/// Avanzadas", a title naming the advanced course resolves to the first one.
#[derive(Debug, Clone, Default)]
pub struct CourseMatcher {
    entries: Vec<(String, CourseId)>,
}

impl CourseMatcher {
    pub fn new(courses: &[Course]) -> Self {
        Self::from_names(courses.iter().map(|c| (c.name.as_str(), c.id)))
    }

    /// Build from `(name, id)` pairs, keeping their order.
    ///
    /// Blank names are dropped: an empty needle is contained in every title.
    pub fn from_names<'a>(names: impl IntoIterator<Item = (&'a str, CourseId)>) -> Self {
        let entries = names
            .into_iter()
            .filter(|(name, _)| !name.trim().is_empty())
            .map(|(name, id)| (name.to_lowercase(), id))
            .collect();

        CourseMatcher { entries }
    }

    pub fn match_summary(&self, summary: &str) -> Option<CourseId> {
        let summary = summary.to_lowercase();

        self.entries
            .iter()
            .find(|(name, _)| summary.contains(name.as_str()))
            .map(|(_, id)| *id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
