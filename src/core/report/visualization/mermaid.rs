//! Mermaid chart generator for progress reports
//!
//! Generates Mermaid pie syntax that can be embedded in Markdown files and
//! rendered by GitHub, GitLab, and other Markdown viewers.

use crate::core::report::ReportContext;
use std::fmt::Write;

/// Generator for Mermaid chart syntax
pub struct MermaidGenerator;

impl MermaidGenerator {
    /// Generate a pie chart of points earned per completed course
    ///
    /// Slice labels are the course titles; slice values are the course
    /// point rewards. With no completed courses there is nothing to chart,
    /// and a plain Portuguese notice is returned instead.
    #[must_use]
    pub fn generate_points_pie(ctx: &ReportContext) -> String {
        let completed = ctx.completed_courses();
        if completed.is_empty() {
            return "Nenhum curso concluído ainda.\n".to_string();
        }

        let mut output = String::from("```mermaid\npie showData title Pontos por curso\n");
        for course in completed {
            let _ = writeln!(
                output,
                "    \"{}\" : {}",
                Self::sanitize_label(&course.title),
                course.points_reward
            );
        }
        output.push_str("```\n");
        output
    }

    /// Strip characters that would break out of a quoted Mermaid label
    fn sanitize_label(title: &str) -> String {
        title.replace('"', "'")
    }
}
