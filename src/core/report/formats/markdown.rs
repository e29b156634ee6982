//! Markdown report generator
//!
//! Generates progress reports in Markdown format with an embedded Mermaid
//! chart. These reports render well in GitHub, GitLab, and VS Code.

use crate::core::report::visualization::MermaidGenerator;
use crate::core::report::{status_label, ReportContext, ReportGenerator};
use std::error::Error;
use std::fmt::Write;
use std::fs;
use std::path::Path;

/// Embedded Markdown report template
const MARKDOWN_TEMPLATE: &str = include_str!("../templates/report.md");

/// Markdown report generator
pub struct MarkdownReporter;

impl MarkdownReporter {
    /// Create a new Markdown reporter
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Render the report using template substitution
    #[allow(clippy::unused_self)]
    fn render_template(&self, ctx: &ReportContext) -> String {
        let mut output = MARKDOWN_TEMPLATE.to_string();

        // Substitute header metadata
        output = output.replace("{{user_name}}", ctx.user_name);
        output = output.replace("{{date}}", &ctx.today.format("%d/%m/%Y").to_string());

        // Substitute summary figures
        output = output.replace("{{points}}", &ctx.progress.points.to_string());
        output = output.replace("{{level}}", &ctx.progress.level.to_string());
        output = output.replace(
            "{{points_to_next_level}}",
            &ctx.points_to_next_level().to_string(),
        );
        output = output.replace(
            "{{completed_count}}",
            &ctx.completed_courses().len().to_string(),
        );
        output = output.replace("{{course_count}}", &ctx.course_count().to_string());
        output = output.replace(
            "{{completion_percent}}",
            &ctx.completion_percent().to_string(),
        );
        output = output.replace("{{badge_count}}", &ctx.earned_badges().len().to_string());
        output = output.replace("{{badge_total}}", &ctx.catalog.badges.len().to_string());

        // Next badge line
        let next_badge = ctx.next_badge().map_or_else(
            || "Todos os badges conquistados!".to_string(),
            |b| format!("{} {} ({} pontos)", b.icon, b.name, b.points_required),
        );
        output = output.replace("{{next_badge}}", &next_badge);

        // Team position; 0 means the record was never ranked
        let team_ranking = if ctx.progress.team_ranking > 0 {
            format!("{}\u{00ba}", ctx.progress.team_ranking)
        } else {
            "-".to_string()
        };
        output = output.replace("{{team_ranking}}", &team_ranking);

        // Generate badge table
        let badge_table = Self::generate_badge_table(ctx);
        output = output.replace("{{badge_table}}", &badge_table);

        // Generate course table
        let course_table = Self::generate_course_table(ctx);
        output = output.replace("{{course_table}}", &course_table);

        // Generate exam table
        let exam_table = Self::generate_exam_table(ctx);
        output = output.replace("{{exam_table}}", &exam_table);

        // Generate Mermaid points chart
        let points_chart = MermaidGenerator::generate_points_pie(ctx);
        output = output.replace("{{points_chart}}", &points_chart);

        output
    }

    /// Generate the badge table
    fn generate_badge_table(ctx: &ReportContext) -> String {
        let mut table = String::new();

        table.push_str("| Badge | Descrição | Pontos | Situação |\n");
        table.push_str("|---|---|---|---|\n");

        for badge in &ctx.catalog.badges {
            let situation = if ctx.progress.has_badge(&badge.id) {
                "conquistado"
            } else {
                "pendente"
            };

            let _ = writeln!(
                table,
                "| {} {} | {} | {} | {situation} |",
                badge.icon, badge.name, badge.description, badge.points_required
            );
        }

        table
    }

    /// Generate the course table
    fn generate_course_table(ctx: &ReportContext) -> String {
        let mut table = String::new();

        table.push_str("| Curso | Carga horária | Pontos | Situação |\n");
        table.push_str("|---|---|---|---|\n");

        for course in &ctx.catalog.courses {
            let situation = if ctx.progress.has_completed(&course.id) {
                "concluído"
            } else {
                "pendente"
            };

            let _ = writeln!(
                table,
                "| {} | {} | {} | {situation} |",
                course.title, course.duration, course.points_reward
            );
        }

        table
    }

    /// Generate the upcoming exam table
    fn generate_exam_table(ctx: &ReportContext) -> String {
        let upcoming = ctx.book.upcoming(ctx.today);
        if upcoming.is_empty() {
            return "Nenhum exame agendado.\n".to_string();
        }

        let mut table = String::new();
        table.push_str("| Data | Horário | Curso | Situação |\n");
        table.push_str("|---|---|---|---|\n");

        for booking in upcoming {
            let course_title = ctx
                .catalog
                .course(&booking.course_id)
                .map_or(booking.course_id.as_str(), |c| c.title.as_str());

            let _ = writeln!(
                table,
                "| {} | {} | {course_title} | {} |",
                booking.date.format("%d/%m/%Y"),
                booking.time,
                status_label(booking.status)
            );
        }

        table
    }
}

impl Default for MarkdownReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for MarkdownReporter {
    fn generate(&self, ctx: &ReportContext, output_path: &Path) -> Result<(), Box<dyn Error>> {
        let report_content = self.render(ctx)?;
        fs::write(output_path, report_content)?;
        Ok(())
    }

    fn render(&self, ctx: &ReportContext) -> Result<String, Box<dyn Error>> {
        Ok(self.render_template(ctx))
    }
}
