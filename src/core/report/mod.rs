//! Report generation module for training progress
//!
//! This module provides functionality to generate progress reports in various
//! formats (Markdown, HTML) covering points, badges, course completion, and
//! upcoming exam bookings.

pub mod formats;
pub mod visualization;

use crate::core::catalog::Catalog;
use crate::core::models::{Badge, Course, ExamStatus, UserProgress};
use crate::core::scheduling::ExamBook;
use chrono::NaiveDate;
use std::error::Error;
use std::path::Path;

pub use formats::{HtmlReporter, MarkdownReporter, ReportFormat};
pub use visualization::MermaidGenerator;

/// Data context for report generation
///
/// This struct aggregates all data needed to render a progress report,
/// providing a single source of truth for templates.
#[derive(Debug, Clone)]
pub struct ReportContext<'a> {
    /// Name of the person the report is about
    pub user_name: &'a str,
    /// Stored progress record
    pub progress: &'a UserProgress,
    /// Course and badge catalog
    pub catalog: &'a Catalog,
    /// Exam booking book
    pub book: &'a ExamBook,
    /// Date the report is generated on
    pub today: NaiveDate,
    /// Points needed per level
    pub points_per_level: u32,
}

impl<'a> ReportContext<'a> {
    /// Create a new report context
    #[must_use]
    pub const fn new(
        user_name: &'a str,
        progress: &'a UserProgress,
        catalog: &'a Catalog,
        book: &'a ExamBook,
        today: NaiveDate,
        points_per_level: u32,
    ) -> Self {
        Self {
            user_name,
            progress,
            catalog,
            book,
            today,
            points_per_level,
        }
    }

    /// Points still missing before the next level
    #[must_use]
    pub const fn points_to_next_level(&self) -> u32 {
        let quantum = if self.points_per_level == 0 {
            100
        } else {
            self.points_per_level
        };
        quantum - self.progress.points % quantum
    }

    /// How far into the current level the user is, as a percentage
    #[must_use]
    pub const fn level_percent(&self) -> u32 {
        let quantum = if self.points_per_level == 0 {
            100
        } else {
            self.points_per_level
        };
        (self.progress.points % quantum) * 100 / quantum
    }

    /// Catalog badges the user has earned, in catalog order
    #[must_use]
    pub fn earned_badges(&self) -> Vec<&'a Badge> {
        self.catalog
            .badges
            .iter()
            .filter(|b| self.progress.has_badge(&b.id))
            .collect()
    }

    /// The cheapest badge not yet earned
    #[must_use]
    pub fn next_badge(&self) -> Option<&'a Badge> {
        self.catalog
            .badges
            .iter()
            .filter(|b| !self.progress.has_badge(&b.id))
            .min_by_key(|b| b.points_required)
    }

    /// Completed courses resolved against the catalog
    ///
    /// Ids that no longer exist in the catalog are skipped.
    #[must_use]
    pub fn completed_courses(&self) -> Vec<&'a Course> {
        self.progress
            .completed_courses
            .iter()
            .filter_map(|id| self.catalog.course(id))
            .collect()
    }

    /// Share of catalog courses completed, as a percentage
    #[must_use]
    pub fn completion_percent(&self) -> u32 {
        let total = self.catalog.courses.len();
        if total == 0 {
            return 0;
        }
        let done = self.completed_courses().len();
        u32::try_from(done * 100 / total).unwrap_or(0)
    }

    /// Get course count
    #[must_use]
    pub fn course_count(&self) -> usize {
        self.catalog.courses.len()
    }
}

/// Portuguese label for an exam status, as shown in reports
#[must_use]
pub const fn status_label(status: ExamStatus) -> &'static str {
    match status {
        ExamStatus::Pending => "pendente",
        ExamStatus::Confirmed => "confirmado",
        ExamStatus::Completed => "realizado",
        ExamStatus::Cancelled => "cancelado",
    }
}

/// Trait for report generators
pub trait ReportGenerator {
    /// Generate a report to a file
    ///
    /// # Errors
    /// Returns an error if report generation or file writing fails
    fn generate(&self, ctx: &ReportContext, output_path: &Path) -> Result<(), Box<dyn Error>>;

    /// Generate report content as a string
    ///
    /// # Errors
    /// Returns an error if report generation fails
    fn render(&self, ctx: &ReportContext) -> Result<String, Box<dyn Error>>;
}
