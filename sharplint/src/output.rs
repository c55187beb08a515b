use crate::analyzer::{AnalysisResult, AnalysisSummary, FileFixes, ParseError};
use crate::rules::Finding;
use crate::utils::normalize_display_path;
use colored::Colorize;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, Color, ContentArrangement, Table};
use std::io::Write;

/// Print the exclusion list in styled format.
///
/// # Errors
///
/// Returns an error if writing to the output fails.
pub fn print_exclusion_list(writer: &mut impl Write, folders: &[String]) -> std::io::Result<()> {
    if folders.is_empty() {
        let defaults = crate::constants::DEFAULT_EXCLUDE_FOLDERS();
        let mut sorted_defaults: Vec<&str> = defaults.iter().copied().collect();
        sorted_defaults.sort_unstable();
        writeln!(
            writer,
            "{} {}",
            "[OK] Using default exclusions only:".green(),
            sorted_defaults.join(", ").dimmed()
        )?;
    } else {
        writeln!(writer, "{} {}", "Excluding:".yellow().bold(), folders.join(", "))?;
    }
    Ok(())
}

/// Print the main header with box-drawing characters.
///
/// # Errors
///
/// Returns an error if writing to the output fails.
pub fn print_header(writer: &mut impl Write) -> std::io::Result<()> {
    writeln!(writer)?;
    writeln!(writer, "{}", "╔════════════════════════════════════════╗".cyan())?;
    writeln!(writer, "{}", "║  C# Lint Results                       ║".cyan().bold())?;
    writeln!(writer, "{}", "╚════════════════════════════════════════╝".cyan())?;
    writeln!(writer)?;
    Ok(())
}

/// Print analysis statistics (files and lines processed).
///
/// # Errors
///
/// Returns an error if writing to the output fails.
pub fn print_analysis_stats(
    writer: &mut impl Write,
    summary: &AnalysisSummary,
) -> std::io::Result<()> {
    writeln!(
        writer,
        "{}",
        format!(
            "Analyzed {} files ({} lines)",
            summary.total_files.to_string().bold(),
            summary.total_lines_analyzed.to_string().bold()
        )
        .dimmed()
    )?;
    Ok(())
}

/// Print summary with colored "pills".
///
/// # Errors
///
/// Returns an error if writing to the output fails.
pub fn print_summary_pills(
    writer: &mut impl Write,
    summary: &AnalysisSummary,
) -> std::io::Result<()> {
    fn pill(label: &str, count: usize) -> String {
        if count == 0 {
            format!("{}: {}", label, count.to_string().green())
        } else {
            format!("{}: {}", label, count.to_string().red().bold())
        }
    }

    writeln!(
        writer,
        "{}  {}  {}",
        pill("Findings", summary.findings_count),
        pill("Parse Errors", summary.parse_errors_count),
        format!(
            "Fixed: {} in {} files",
            summary.fixes_applied.to_string().cyan().bold(),
            summary.files_changed
        )
    )?;
    writeln!(writer)?;
    Ok(())
}

/// Helper to create a styled table
fn create_table(headers: Vec<&str>) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(headers);
    table
}

/// Helper to map severity string to Comfy Table Color
fn get_severity_color(severity: &str) -> Color {
    match severity.to_uppercase().as_str() {
        "ERROR" => Color::Red,
        "WARNING" => Color::Yellow,
        "INFO" => Color::Blue,
        _ => Color::White,
    }
}

/// Print a list of findings.
///
/// # Errors
///
/// Returns an error if writing to the output fails.
pub fn print_findings(
    writer: &mut impl Write,
    title: &str,
    findings: &[Finding],
) -> std::io::Result<()> {
    if findings.is_empty() {
        return Ok(());
    }

    writeln!(writer, "\n{}", title.bold().underline())?;

    let mut table = create_table(vec!["Rule ID", "Message", "Location", "Severity"]);

    for f in findings {
        let location = format!("{}:{}:{}", normalize_display_path(&f.file), f.line, f.col);
        let severity_color = get_severity_color(&f.severity);

        table.add_row(vec![
            Cell::new(&f.rule_id).add_attribute(Attribute::Dim),
            Cell::new(&f.message).add_attribute(Attribute::Bold),
            Cell::new(location),
            Cell::new(&f.severity).fg(severity_color),
        ]);
    }

    writeln!(writer, "{table}")?;
    Ok(())
}

/// Print the fixes applied per file.
///
/// # Errors
///
/// Returns an error if writing to the output fails.
pub fn print_fixes(writer: &mut impl Write, fixes: &[FileFixes]) -> std::io::Result<()> {
    if fixes.is_empty() {
        return Ok(());
    }

    writeln!(writer, "\n{}", "Fixes".bold().underline())?;

    let mut table = create_table(vec!["File", "Rule ID", "Target", "Status"]);

    for file in fixes {
        let status = if file.written {
            Cell::new("applied").fg(Color::Green)
        } else {
            Cell::new("dry run").fg(Color::Yellow)
        };
        for fix in &file.applied {
            table.add_row(vec![
                Cell::new(normalize_display_path(&file.file)).add_attribute(Attribute::Bold),
                Cell::new(fix.rule_id).add_attribute(Attribute::Dim),
                Cell::new(fix.arguments.join(", ")),
                status.clone(),
            ]);
        }
    }

    writeln!(writer, "{table}")?;
    Ok(())
}

/// Print a list of parse errors.
///
/// # Errors
///
/// Returns an error if writing to the output fails.
pub fn print_parse_errors(writer: &mut impl Write, errors: &[ParseError]) -> std::io::Result<()> {
    if errors.is_empty() {
        return Ok(());
    }

    writeln!(writer, "\n{}", "Parse Errors".bold().underline().red())?;

    let mut table = create_table(vec!["File", "Error"]);

    for e in errors {
        table.add_row(vec![
            Cell::new(normalize_display_path(&e.file)).add_attribute(Attribute::Bold),
            Cell::new(&e.error).fg(Color::Red),
        ]);
    }

    writeln!(writer, "{table}")?;
    Ok(())
}

/// Print the full report.
///
/// # Errors
///
/// Returns an error if writing to the writer fails.
pub fn print_report(writer: &mut impl Write, result: &AnalysisResult) -> std::io::Result<()> {
    print_header(writer)?;
    print_fixes(writer, &result.fixes)?;

    if result.findings.is_empty() && result.parse_errors.is_empty() {
        writeln!(writer, "{}", "✓ All clean! No issues found.".green())?;
    } else {
        print_findings(writer, "Findings", &result.findings)?;
        print_parse_errors(writer, &result.parse_errors)?;
    }

    writeln!(writer)?;
    print_summary_pills(writer, &result.analysis_summary)?;
    print_analysis_stats(writer, &result.analysis_summary)?;
    Ok(())
}

/// Print the report as pretty JSON.
///
/// # Errors
///
/// Returns an error if serialization or writing fails.
pub fn print_json(writer: &mut impl Write, result: &AnalysisResult) -> std::io::Result<()> {
    serde_json::to_writer_pretty(&mut *writer, result)?;
    writeln!(writer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fix::AppliedFix;
    use std::path::PathBuf;

    fn sample_result() -> AnalysisResult {
        AnalysisResult {
            findings: vec![Finding {
                rule_id: "SL-N001".to_owned(),
                category: "Naming".to_owned(),
                severity: "WARNING".to_owned(),
                message: "Boolean variable 'notA' is named with a negative prefix".to_owned(),
                file: PathBuf::from("./src/A.cs"),
                line: 3,
                col: 9,
            }],
            fixes: vec![FileFixes {
                file: PathBuf::from("src/B.cs"),
                applied: vec![AppliedFix {
                    rule_id: "SL-S001",
                    arguments: vec!["foo".to_owned()],
                }],
                written: false,
            }],
            parse_errors: Vec::new(),
            analysis_summary: AnalysisSummary {
                total_files: 2,
                total_lines_analyzed: 20,
                findings_count: 1,
                fixes_applied: 1,
                files_changed: 1,
                parse_errors_count: 0,
            },
        }
    }

    #[test]
    fn test_print_report_lists_findings_and_fixes() {
        colored::control::set_override(false);
        let mut buffer = Vec::new();
        print_report(&mut buffer, &sample_result()).unwrap();
        let output = String::from_utf8(buffer).unwrap();
        assert!(output.contains("src/A.cs:3:9"));
        assert!(output.contains("SL-N001"));
        assert!(output.contains("dry run"));
        assert!(output.contains("Analyzed 2 files (20 lines)"));
    }

    #[test]
    fn test_print_json_is_valid() {
        let mut buffer = Vec::new();
        print_json(&mut buffer, &sample_result()).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&buffer).unwrap();
        assert_eq!(value["analysis_summary"]["findings_count"], 1);
        assert_eq!(value["findings"][0]["rule_id"], "SL-N001");
        assert_eq!(value["fixes"][0]["applied"][0]["arguments"][0], "foo");
    }

    #[test]
    fn test_clean_report() {
        colored::control::set_override(false);
        let mut result = sample_result();
        result.findings.clear();
        let mut buffer = Vec::new();
        print_report(&mut buffer, &result).unwrap();
        assert!(String::from_utf8(buffer).unwrap().contains("All clean"));
    }
}
