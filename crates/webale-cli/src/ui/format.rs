//! Formatting for sizes, durations and the build summary.

use std::time::Duration;

use console::Term;
use owo_colors::OwoColorize;
use webale::BuildReport;

use super::{colors_enabled, is_quiet};

/// Format a byte count with the largest fitting unit.
///
/// ```
/// use webale_cli::ui::format_size;
///
/// assert_eq!(format_size(0), "0 B");
/// assert_eq!(format_size(1536), "1.50 KB");
/// ```
pub fn format_size(bytes: u64) -> String {
    const UNITS: &[&str] = &["B", "KB", "MB", "GB"];

    let mut size = bytes as f64;
    let mut unit_idx = 0;

    while size >= 1024.0 && unit_idx < UNITS.len() - 1 {
        size /= 1024.0;
        unit_idx += 1;
    }

    if unit_idx == 0 {
        format!("{} {}", bytes, UNITS[0])
    } else {
        format!("{:.2} {}", size, UNITS[unit_idx])
    }
}

/// Format a duration as `ms`, seconds, or `Xm Ys`.
///
/// ```
/// use std::time::Duration;
/// use webale_cli::ui::format_duration;
///
/// assert_eq!(format_duration(Duration::from_millis(50)), "50ms");
/// assert_eq!(format_duration(Duration::from_secs(90)), "1m 30s");
/// ```
pub fn format_duration(duration: Duration) -> String {
    let total_ms = duration.as_millis();

    if total_ms < 1000 {
        format!("{}ms", total_ms)
    } else if total_ms < 60_000 {
        format!("{:.2}s", duration.as_secs_f64())
    } else {
        let secs = duration.as_secs();
        format!("{}m {}s", secs / 60, secs % 60)
    }
}

/// Print a short summary of a finished build to stderr.
pub fn print_build_summary(report: &BuildReport) {
    if is_quiet() {
        return;
    }

    let width = (Term::stderr().size().1 as usize).clamp(20, 80);
    let rule = "─".repeat(width);
    let output = report.output.display().to_string();
    let size = format_size(report.bytes as u64);
    let duration = format_duration(report.duration);

    if colors_enabled() {
        eprintln!("{}", rule.dimmed());
        eprintln!("  {} {}", "▸".blue(), output.bold());
        eprintln!(
            "  {} modules, {} ({} mode) in {}",
            report.modules.to_string().green(),
            size.green(),
            report.mode,
            duration.green()
        );
        eprintln!("{}", rule.dimmed());
    } else {
        eprintln!("{rule}");
        eprintln!("  ▸ {output}");
        eprintln!(
            "  {} modules, {} ({} mode) in {}",
            report.modules, size, report.mode, duration
        );
        eprintln!("{rule}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(0), "0 B");
        assert_eq!(format_size(1023), "1023 B");
        assert_eq!(format_size(1024), "1.00 KB");
        assert_eq!(format_size(1_572_864), "1.50 MB");
        assert_eq!(format_size(2_147_483_648), "2.00 GB");
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(Duration::from_millis(0)), "0ms");
        assert_eq!(format_duration(Duration::from_millis(999)), "999ms");
        assert_eq!(format_duration(Duration::from_millis(1500)), "1.50s");
        assert_eq!(format_duration(Duration::from_secs(60)), "1m 0s");
        assert_eq!(format_duration(Duration::from_secs(125)), "2m 5s");
    }
}
