use super::{RefreshReport, ReportRow};
use crate::Result;
use core::fmt::Write;
use owo_colors::OwoColorize;

pub fn generate<W: Write>(report: &RefreshReport, use_colors: bool, writer: &mut W) -> Result<()> {
    let summary = &report.summary;

    for project in &summary.skipped_projects {
        let line = format!("Skipped project `{project}`: it has not been analyzed yet");
        if use_colors {
            writeln!(writer, "{}", line.yellow())?;
        } else {
            writeln!(writer, "{line}")?;
        }
    }

    let headline = format!(
        "Refreshed {} component(s), wrote {} measure(s)",
        summary.visited_components, summary.written_measures
    );
    if use_colors {
        writeln!(writer, "{}", headline.green().bold())?;
    } else {
        writeln!(writer, "{headline}")?;
    }

    let mut current_component: Option<&str> = None;
    let max_metric_len = report.rows.iter().map(|r| r.metric.len()).max().unwrap_or(0);

    for row in &report.rows {
        if current_component != Some(row.component.as_str()) {
            writeln!(writer)?;
            if use_colors {
                writeln!(writer, "{}", row.component.bold())?;
            } else {
                writeln!(writer, "{}", row.component)?;
            }
            current_component = Some(row.component.as_str());
        }

        let variation = format_variation(row);
        if use_colors && !variation.is_empty() {
            writeln!(
                writer,
                "  {:<width$} : {} {}",
                row.metric,
                format_value(row),
                variation.cyan(),
                width = max_metric_len
            )?;
        } else {
            writeln!(
                writer,
                "  {:<width$} : {} {variation}",
                row.metric,
                format_value(row),
                width = max_metric_len
            )?;
        }
    }

    Ok(())
}

fn format_value(row: &ReportRow) -> String {
    match (&row.text_value, row.value) {
        (Some(text), _) => text.clone(),
        (None, Some(value)) => format_number(value),
        (None, None) => "n/a".to_string(),
    }
}

fn format_variation(row: &ReportRow) -> String {
    row.variation.map_or_else(String::new, |variation| {
        if variation >= 0.0 {
            format!("(+{})", format_number(variation))
        } else {
            format!("({})", format_number(variation))
        }
    })
}

fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{value:.0}")
    } else {
        format!("{value}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::ComponentId;
    use crate::engine::RefreshSummary;

    fn row(metric: &str, value: Option<f64>, text_value: Option<&str>, variation: Option<f64>) -> ReportRow {
        ReportRow {
            component: "proj:a.rs".to_string(),
            metric: metric.to_string(),
            value,
            text_value: text_value.map(str::to_string),
            variation,
        }
    }

    #[test]
    fn test_generate_plain() {
        let report = RefreshReport {
            summary: RefreshSummary {
                visited_components: 3,
                skipped_projects: vec![ComponentId::from("p2")],
                written_measures: 2,
            },
            rows: vec![
                row("bugs", Some(4.0), None, Some(-1.0)),
                row("sqale_rating", Some(2.0), Some("C"), None),
                row("new_bugs", None, None, Some(2.0)),
            ],
        };

        let mut output = String::new();
        generate(&report, false, &mut output).unwrap();

        assert!(output.contains("Skipped project `p2`"));
        assert!(output.contains("Refreshed 3 component(s), wrote 2 measure(s)"));
        assert!(output.contains("proj:a.rs\n"));
        assert!(output.contains("bugs         : 4 (-1)"));
        assert!(output.contains("sqale_rating : C"));
        assert!(output.contains("new_bugs     : n/a (+2)"));
        assert!(!output.contains('\u{1b}'));
    }

    #[test]
    fn test_generate_colored() {
        let report = RefreshReport {
            summary: RefreshSummary::default(),
            rows: vec![row("bugs", Some(1.5), None, Some(0.5))],
        };

        let mut output = String::new();
        generate(&report, true, &mut output).unwrap();
        assert!(output.contains('\u{1b}'));
        assert!(output.contains("1.5"));
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(3.0), "3");
        assert_eq!(format_number(-2.0), "-2");
        assert_eq!(format_number(12.3), "12.3");
    }
}
