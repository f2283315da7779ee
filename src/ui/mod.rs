//! Terminal rendering for analysis results.
//!
//! Sentinel metrics are hidden and the rank is coloured by tier. Everything
//! here is presentation only; results are never modified.

use comfy_table::{presets, Attribute, Cell, Color, ContentArrangement, Table};
use owo_colors::OwoColorize;
use std::io::IsTerminal;
use std::time::Duration;

use crate::models::{AnalysisResult, RankTier};

/// Get the current terminal width.
pub fn terminal_width() -> usize {
    terminal_size::terminal_size()
        .map(|(w, _)| w.0 as usize)
        .unwrap_or(100)
}

/// Check if stdout is a terminal.
pub fn is_terminal() -> bool {
    std::io::stdout().is_terminal()
}

/// Status icons for different operations.
pub fn status_icon(status: Status) -> &'static str {
    match status {
        Status::Success => "✓",
        Status::Error => "✗",
        Status::Warning => "⚠",
        Status::Info => "ℹ",
    }
}

/// Status types for colored output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Success,
    Error,
    Warning,
    Info,
}

/// Print a styled status line to stderr.
pub fn print_status(status: Status, msg: &str) {
    let icon = status_icon(status);
    match status {
        Status::Success => eprintln!("{} {}", icon.green().bold(), msg),
        Status::Error => eprintln!("{} {}", icon.red().bold(), msg),
        Status::Warning => eprintln!("{} {}", icon.yellow().bold(), msg),
        Status::Info => eprintln!("{} {}", icon.cyan().bold(), msg),
    }
}

/// Table colour for a rank tier. Tier 1 is green, 2 blue, 3 amber, 4 and
/// below red; unranked journals stay neutral.
pub fn rank_color(tier: RankTier) -> Color {
    match tier.level() {
        Some(1) => Color::Green,
        Some(2) => Color::Blue,
        Some(3) => Color::Yellow,
        Some(_) => Color::Red,
        None => Color::Grey,
    }
}

fn styled_rank(result: &AnalysisResult) -> String {
    let rank = result.rank.as_str();
    match result.rank_tier().level() {
        Some(1) => rank.green().bold().to_string(),
        Some(2) => rank.blue().bold().to_string(),
        Some(3) => rank.yellow().bold().to_string(),
        Some(_) => rank.red().bold().to_string(),
        None => rank.dimmed().to_string(),
    }
}

/// Render a result as a bordered table sized to `width` columns.
pub fn render_table(result: &AnalysisResult, width: usize) -> String {
    let mut table = Table::new();
    table
        .load_preset(presets::UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(width.min(u16::MAX as usize) as u16);

    table.set_header(vec![
        Cell::new(&result.journal_name).add_attribute(Attribute::Bold),
        Cell::new(format!("ISSN: {}", result.issn)),
    ]);

    table.add_row(vec![Cell::new("Indexing"), Cell::new(&result.indexing)]);
    table.add_row(vec![
        Cell::new("Rank"),
        Cell::new(&result.rank)
            .fg(rank_color(result.rank_tier()))
            .add_attribute(Attribute::Bold),
    ]);

    for (metric, value) in result.visible_metrics() {
        table.add_row(vec![Cell::new(metric.label()), Cell::new(value)]);
    }

    table.add_row(vec![
        Cell::new("Reputation"),
        Cell::new(&result.reputation_summary),
    ]);
    table.add_row(vec![
        Cell::new("Review time"),
        Cell::new(&result.review_time_estimation),
    ]);
    table.add_row(vec![
        Cell::new("Tips for authors"),
        Cell::new(&result.tips_for_authors),
    ]);

    table.to_string()
}

/// Render a result as plain text. `color` enables ANSI styling.
pub fn render_plain(result: &AnalysisResult, color: bool) -> String {
    let mut out = String::new();
    let heading = |title: &str| {
        if color {
            format!("━━━ {} ━━━", title).bold().cyan().to_string()
        } else {
            format!("--- {} ---", title)
        }
    };

    let name = if color {
        result.journal_name.bold().to_string()
    } else {
        result.journal_name.clone()
    };
    let rank = if color {
        styled_rank(result)
    } else {
        result.rank.clone()
    };

    out.push_str(&format!("{}\n", name));
    out.push_str(&format!("  ISSN:     {}\n", result.issn));
    out.push_str(&format!("  Indexing: {}\n", result.indexing));
    out.push_str(&format!("  Rank:     {}\n", rank));

    let metrics = result.visible_metrics();
    if !metrics.is_empty() {
        out.push('\n');
        out.push_str(&heading("Metrics"));
        out.push('\n');
        for (metric, value) in metrics {
            out.push_str(&format!("  {:<14} {}\n", format!("{}:", metric.label()), value));
            let about = if color {
                metric.description().dimmed().to_string()
            } else {
                metric.description().to_string()
            };
            out.push_str(&format!("  {:<14} {}\n", "", about));
        }
    }

    for (title, body) in [
        ("Reputation", &result.reputation_summary),
        ("Review time", &result.review_time_estimation),
        ("Tips for authors", &result.tips_for_authors),
    ] {
        out.push('\n');
        out.push_str(&heading(title));
        out.push('\n');
        out.push_str(body.trim_end());
        out.push('\n');
    }

    out
}

/// Loading spinner shown while waiting on the analysis service.
pub struct Spinner {
    pb: indicatif::ProgressBar,
}

impl Spinner {
    /// Create a new spinner with the given message.
    pub fn new(msg: &str) -> Self {
        let pb = indicatif::ProgressBar::new_spinner();
        pb.set_style(
            indicatif::ProgressStyle::with_template("{spinner:.cyan} {msg} {elapsed:.dim}")
                .unwrap_or_else(|_| indicatif::ProgressStyle::default_spinner())
                .tick_chars("⠁⠂⠄⡀⢀⠠⠐⠈ "),
        );
        pb.set_message(msg.to_string());
        pb.enable_steady_tick(Duration::from_millis(100));

        Self { pb }
    }

    /// A spinner that draws nothing, for quiet or non-TTY runs.
    pub fn hidden() -> Self {
        Self {
            pb: indicatif::ProgressBar::hidden(),
        }
    }

    /// Finish with success
    pub fn finish_with_success(&self, msg: &str) {
        self.pb.set_style(
            indicatif::ProgressStyle::with_template("{spinner:.green} {msg}")
                .unwrap_or_else(|_| indicatif::ProgressStyle::default_spinner())
                .tick_chars("✓✓"),
        );
        self.pb.finish_with_message(msg.to_string());
    }

    /// Finish with error
    pub fn finish_with_error(&self, msg: &str) {
        self.pb.set_style(
            indicatif::ProgressStyle::with_template("{spinner:.red} {msg}")
                .unwrap_or_else(|_| indicatif::ProgressStyle::default_spinner())
                .tick_chars("✗✗"),
        );
        self.pb.finish_with_message(msg.to_string());
    }
}
