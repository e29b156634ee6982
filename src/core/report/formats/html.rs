//! HTML report generator
//!
//! Generates progress reports in HTML format. The generated HTML is
//! self-contained with embedded CSS.

use crate::core::report::{status_label, ReportContext, ReportGenerator};
use std::error::Error;
use std::fmt::Write;
use std::fs;
use std::path::Path;

/// Embedded HTML report template
const HTML_TEMPLATE: &str = include_str!("../templates/report.html");

/// HTML report generator
pub struct HtmlReporter;

impl HtmlReporter {
    /// Create a new HTML reporter
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Render the report using template substitution
    #[allow(clippy::unused_self)]
    fn render_template(&self, ctx: &ReportContext) -> String {
        let mut output = HTML_TEMPLATE.to_string();

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
        output = output.replace("{{level_percent}}", &ctx.level_percent().to_string());
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

        // Generate badge rows
        let badge_rows = Self::generate_badge_rows(ctx);
        output = output.replace("{{badge_rows}}", &badge_rows);

        // Generate course rows
        let course_rows = Self::generate_course_rows(ctx);
        output = output.replace("{{course_rows}}", &course_rows);

        // Generate exam rows
        let exam_rows = Self::generate_exam_rows(ctx);
        output = output.replace("{{exam_rows}}", &exam_rows);

        // Generate points distribution bars
        let points_bars = Self::generate_points_bars(ctx);
        output = output.replace("{{points_bars}}", &points_bars);

        output
    }

    /// Generate the badge table rows
    fn generate_badge_rows(ctx: &ReportContext) -> String {
        let mut html = String::new();

        for badge in &ctx.catalog.badges {
            let (class, situation) = if ctx.progress.has_badge(&badge.id) {
                ("earned", "conquistado")
            } else {
                ("pending", "pendente")
            };

            let _ = writeln!(
                html,
                "<tr class=\"{class}\"><td>{} {}</td><td>{}</td><td>{}</td><td>{situation}</td></tr>",
                badge.icon, badge.name, badge.description, badge.points_required
            );
        }

        html
    }

    /// Generate the course table rows
    fn generate_course_rows(ctx: &ReportContext) -> String {
        let mut html = String::new();

        for course in &ctx.catalog.courses {
            let (class, situation) = if ctx.progress.has_completed(&course.id) {
                ("earned", "concluído")
            } else {
                ("pending", "pendente")
            };

            let _ = writeln!(
                html,
                "<tr class=\"{class}\"><td>{}</td><td>{}</td><td>{}</td><td>{situation}</td></tr>",
                course.title, course.duration, course.points_reward
            );
        }

        html
    }

    /// Generate the points-per-completed-course bars
    ///
    /// The widest bar is the highest reward among completed courses; the
    /// others scale against it. Pure markup and CSS so the report file stays
    /// self-contained.
    fn generate_points_bars(ctx: &ReportContext) -> String {
        let completed = ctx.completed_courses();
        if completed.is_empty() {
            return "<p>Nenhum curso concluído ainda.</p>\n".to_string();
        }

        let max_reward = completed
            .iter()
            .map(|c| c.points_reward)
            .max()
            .unwrap_or(1)
            .max(1);

        let mut html = String::new();
        for course in completed {
            let width = course.points_reward * 100 / max_reward;
            let _ = writeln!(
                html,
                "<div class=\"bar-row\"><span class=\"bar-label\">{}</span>\
                 <div class=\"bar\"><div class=\"bar-fill\" style=\"width: {width}%;\">{} pts</div></div></div>",
                course.title, course.points_reward
            );
        }

        html
    }

    /// Generate the upcoming exam table rows
    fn generate_exam_rows(ctx: &ReportContext) -> String {
        let upcoming = ctx.book.upcoming(ctx.today);
        if upcoming.is_empty() {
            return "<tr><td colspan=\"4\">Nenhum exame agendado.</td></tr>\n".to_string();
        }

        let mut html = String::new();
        for booking in upcoming {
            let course_title = ctx
                .catalog
                .course(&booking.course_id)
                .map_or(booking.course_id.as_str(), |c| c.title.as_str());

            let _ = writeln!(
                html,
                "<tr><td>{}</td><td>{}</td><td>{course_title}</td><td>{}</td></tr>",
                booking.date.format("%d/%m/%Y"),
                booking.time,
                status_label(booking.status)
            );
        }

        html
    }
}

impl Default for HtmlReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for HtmlReporter {
    fn generate(&self, ctx: &ReportContext, output_path: &Path) -> Result<(), Box<dyn Error>> {
        let report_content = self.render(ctx)?;
        fs::write(output_path, report_content)?;
        Ok(())
    }

    fn render(&self, ctx: &ReportContext) -> Result<String, Box<dyn Error>> {
        Ok(self.render_template(ctx))
    }
}
