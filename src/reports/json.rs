use super::RefreshReport;
use crate::Result;
use core::fmt::Write;
use serde_json::json;

pub fn generate<W: Write>(report: &RefreshReport, writer: &mut W) -> Result<()> {
    let measures: Vec<_> = report
        .rows
        .iter()
        .map(|row| {
            json!({
                "component": row.component,
                "metric": row.metric,
                "value": row.value,
                "text_value": row.text_value,
                "variation": row.variation,
            })
        })
        .collect();

    let output = json!({
        "summary": report.summary,
        "measures": measures,
    });

    write!(writer, "{}", serde_json::to_string_pretty(&output)?)?;
    Ok(())
}
