use std::fmt::Write;

use chrono::NaiveDateTime;

use crate::analysis::{Analysis, Extremum};

const EARLIEST: &str = "Earliest:";
const LATEST: &str = "Latest:";
const HEADERS: [&str; 3] = ["Access", "Modification", "Metadata change"];

/// Seconds, plus fractional digits only when there are any.
pub fn format_timestamp(at: &NaiveDateTime) -> String {
    at.format("%Y-%m-%d %H:%M:%S%.f").to_string()
}

/// Box-drawn earliest/latest table, one column per timestamp kind.
/// Returns `None` when nothing was analyzed.
pub fn render_time_table(analysis: &Analysis) -> Option<String> {
    let columns = [
        (analysis.min_access.as_ref()?, analysis.max_access.as_ref()?),
        (
            analysis.min_modification.as_ref()?,
            analysis.max_modification.as_ref()?,
        ),
        (analysis.min_change.as_ref()?, analysis.max_change.as_ref()?),
    ];
    let cells: Vec<[String; 4]> = columns
        .iter()
        .map(|(min, max)| cell_strings(min, max))
        .collect();

    let label_width = EARLIEST.len().max(LATEST.len());
    let widths: Vec<usize> = cells
        .iter()
        .zip(HEADERS)
        .map(|(strings, header)| {
            strings
                .iter()
                .map(|s| s.chars().count())
                .chain(std::iter::once(header.len()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let mut lines = Vec::with_capacity(7);
    lines.push(row("", &HEADERS.map(String::from), &widths, label_width));
    lines.push(rule('━', '╋', '┿', &widths, label_width));
    lines.push(row(EARLIEST, &pick(&cells, 0), &widths, label_width));
    lines.push(row("", &pick(&cells, 1), &widths, label_width));
    lines.push(rule('─', '╂', '┼', &widths, label_width));
    lines.push(row(LATEST, &pick(&cells, 2), &widths, label_width));
    lines.push(row("", &pick(&cells, 3), &widths, label_width));

    Some(lines.join("\n"))
}

/// [earliest name, earliest time, latest name, latest time]
fn cell_strings(min: &Extremum, max: &Extremum) -> [String; 4] {
    [
        min.name.clone(),
        format_timestamp(&min.at),
        max.name.clone(),
        format_timestamp(&max.at),
    ]
}

fn pick(cells: &[[String; 4]], slot: usize) -> [String; 3] {
    [
        cells[0][slot].clone(),
        cells[1][slot].clone(),
        cells[2][slot].clone(),
    ]
}

fn pad(s: &str, width: usize) -> String {
    let fill = width.saturating_sub(s.chars().count());
    format!("{}{}", s, " ".repeat(fill))
}

fn row(label: &str, values: &[String; 3], widths: &[usize], label_width: usize) -> String {
    let mut line = format!("{:>label_width$} ┃ ", label);
    let padded: Vec<String> = values
        .iter()
        .zip(widths)
        .map(|(v, &w)| pad(v, w))
        .collect();
    line.push_str(&padded.join(" │ "));
    line.trim_end().to_string()
}

fn rule(line: char, cross: char, joint: char, widths: &[usize], label_width: usize) -> String {
    let segment = |n: usize| line.to_string().repeat(n);
    let inner: Vec<String> = widths.iter().map(|&w| segment(w + 2)).collect();
    format!(
        "{}{}{}",
        segment(label_width + 1),
        cross,
        inner.join(&joint.to_string())
    )
}

/// Full analysis report: file count, time table, convolution peak and unusual names.
pub fn render_report(analysis: &Analysis) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Number of files: {}", analysis.total);
    if let Some(table) = render_time_table(analysis) {
        let _ = writeln!(out, "{table}");
    }
    if let Some(peak) = &analysis.max_convolution {
        let _ = writeln!(
            out,
            "Maximum convolution detected: {} ({})",
            peak.convolution, peak.name
        );
    }
    let _ = writeln!(out, "Unusual file names ({}):", analysis.unusual.len());
    out.push_str(&analysis.unusual.join(", "));
    out
}
