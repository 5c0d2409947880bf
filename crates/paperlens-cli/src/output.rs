use std::io::Write;

use owo_colors::OwoColorize;
use paperlens_core::{ExtractedText, ResearchAnalysis, messages};

/// Whether to use colored output.
#[derive(Debug, Clone, Copy)]
pub struct ColorMode(pub bool);

impl ColorMode {
    pub fn enabled(&self) -> bool {
        self.0
    }
}

/// Shown in place of a field the service left out.
const ABSENT: &str = "\u{2014}";

fn print_heading(w: &mut dyn Write, title: &str, color: ColorMode) -> std::io::Result<()> {
    if color.enabled() {
        writeln!(w, "{}", title.bold().blue())
    } else {
        writeln!(w, "{}", title)
    }
}

fn print_paragraph(
    w: &mut dyn Write,
    title: &str,
    value: Option<&str>,
    color: ColorMode,
) -> std::io::Result<()> {
    print_heading(w, title, color)?;
    match value {
        Some(text) => writeln!(w, "  {}", text)?,
        None if color.enabled() => writeln!(w, "  {}", ABSENT.dimmed())?,
        None => writeln!(w, "  {}", ABSENT)?,
    }
    writeln!(w)
}

fn print_list(
    w: &mut dyn Write,
    title: &str,
    items: Option<&[String]>,
    color: ColorMode,
) -> std::io::Result<()> {
    print_heading(w, title, color)?;
    match items {
        Some(items) => {
            for item in items {
                writeln!(w, "  \u{2022} {}", item)?;
            }
        }
        None if color.enabled() => writeln!(w, "  {}", ABSENT.dimmed())?,
        None => writeln!(w, "  {}", ABSENT)?,
    }
    writeln!(w)
}

/// Print the six-section summary. List items keep the order received.
pub fn print_analysis(
    w: &mut dyn Write,
    file_name: &str,
    analysis: &ResearchAnalysis,
    color: ColorMode,
) -> std::io::Result<()> {
    if color.enabled() {
        writeln!(w, "{} {}", "==".dimmed(), file_name.bold())?;
    } else {
        writeln!(w, "== {}", file_name)?;
    }
    writeln!(w)?;

    print_list(
        w,
        messages::TITLE_OBJECTIVES,
        analysis.objectives.as_deref(),
        color,
    )?;
    print_paragraph(
        w,
        messages::TITLE_METHODOLOGY,
        analysis.methodology.as_deref(),
        color,
    )?;
    print_list(w, messages::TITLE_TOOLS, analysis.tools.as_deref(), color)?;
    print_paragraph(w, messages::TITLE_SAMPLE, analysis.sample.as_deref(), color)?;
    print_list(w, messages::TITLE_RESULTS, analysis.results.as_deref(), color)?;
    print_list(
        w,
        messages::TITLE_RECOMMENDATIONS,
        analysis.recommendations.as_deref(),
        color,
    )?;
    Ok(())
}

/// Print the text of an `extract` run, with a page summary.
pub fn print_extracted(
    w: &mut dyn Write,
    extracted: &ExtractedText,
    color: ColorMode,
) -> std::io::Result<()> {
    let summary = if extracted.is_truncated() {
        format!(
            "Read {} of {} pages ({} characters)",
            extracted.pages_read,
            extracted.total_pages,
            extracted.text.chars().count()
        )
    } else {
        format!(
            "Read {} pages ({} characters)",
            extracted.pages_read,
            extracted.text.chars().count()
        )
    };
    if color.enabled() {
        writeln!(w, "{}", summary.dimmed())?;
    } else {
        writeln!(w, "{}", summary)?;
    }
    writeln!(w)?;
    writeln!(w, "{}", extracted.text)
}
