use super::common::{ColorMode, LogLevel, init_logging};
use crate::config::Config;
use crate::engine::LiveMeasureComputer;
use crate::formulas::IssueMetricFormulaFactory;
use crate::reports::{RefreshReport, generate_console, generate_json};
use crate::storage::{StateFile, acquire_state_lock};
use crate::{Host, Result};
use camino::{Utf8Path, Utf8PathBuf};
use clap::Parser;
use ohno::{IntoAppError, bail};
use std::fs;
use std::io::Write;

const LOG_TARGET: &str = "   refresh";

#[derive(Parser, Debug)]
pub struct RefreshArgs {
    /// Path to the JSON state file
    #[arg(long, short = 's', value_name = "PATH")]
    pub state: Utf8PathBuf,

    /// Key of a changed component, can be repeated
    #[arg(long = "component", value_name = "KEY", required = true)]
    pub components: Vec<String>,

    /// Path to configuration file [default: live-measures.toml next to the state file]
    #[arg(long, short = 'c', value_name = "PATH")]
    pub config: Option<Utf8PathBuf>,

    /// Also write the refreshed measures as JSON to this file
    #[arg(long, value_name = "PATH")]
    pub json: Option<Utf8PathBuf>,

    /// Compute and report without saving the state file
    #[arg(long)]
    pub dry_run: bool,

    /// Control when to use colored output
    #[arg(long, value_name = "WHEN", default_value = "auto")]
    pub color: ColorMode,

    /// Set the logging level for diagnostic output
    #[arg(long, value_name = "LEVEL", default_value = "none")]
    pub log_level: LogLevel,
}

/// Refresh the measures of the requested components and save the state file.
///
/// # Errors
///
/// Returns an error if the configuration or the state file cannot be loaded,
/// if a component key is unknown, if the refresh fails, or if the outputs
/// cannot be written. The state file is left untouched on failure.
pub fn refresh_measures<H: Host>(host: &mut H, args: &RefreshArgs) -> Result<()> {
    init_logging(args.log_level);

    let base_dir = args
        .state
        .parent()
        .filter(|p| !p.as_str().is_empty())
        .unwrap_or_else(|| Utf8Path::new("."));
    let config = Config::load(base_dir, args.config.as_deref())?;

    let _lock = acquire_state_lock(&args.state)?;
    let state = StateFile::load(&args.state)?;
    let keep_metrics = state.metrics.is_some();
    let mut loaded = state.into_loaded()?;

    let mut components = Vec::with_capacity(args.components.len());
    for key in &args.components {
        let Some(component) = loaded.tree.by_key(key) else {
            bail!("unknown component key `{key}`");
        };
        components.push(component.clone());
    }

    log::info!(target: LOG_TARGET, "Refreshing {} component(s) from '{}'", components.len(), args.state);

    let formulas = IssueMetricFormulaFactory::new();
    let summary = {
        let computer = LiveMeasureComputer::new(&loaded.tree, &loaded.catalog, &loaded.periods, &loaded.issues, &formulas, &config);
        let mut session = loaded.measures.session();
        computer.refresh(&mut session, &components)?
    };

    let report = RefreshReport::new(summary, &components, &loaded.catalog, &loaded.measures);

    let mut text = String::new();
    generate_console(&report, args.color.use_colors(), &mut text)?;
    host.output()
        .write_all(text.as_bytes())
        .into_app_err("writing the refresh report")?;

    if let Some(json_path) = &args.json {
        let mut json = String::new();
        generate_json(&report, &mut json)?;
        fs::write(json_path, json).into_app_err_with(|| format!("unable to write JSON report '{json_path}'"))?;
        log::info!(target: LOG_TARGET, "Wrote JSON report to '{json_path}'");
    }

    if args.dry_run {
        log::info!(target: LOG_TARGET, "Dry run, '{}' left unchanged", args.state);
        return Ok(());
    }

    loaded.into_state_file(keep_metrics).save(&args.state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::host::TestHost;
    use crate::components::{Component, ComponentId, Qualifier};
    use crate::periods::AnalysisPeriod;
    use chrono::{TimeZone, Utc};

    fn write_state(dir: &Utf8Path) -> Utf8PathBuf {
        let project = Component::project("p1", "proj");
        let file = Component::child_of(&project, "f1", "a.rs", Qualifier::File);
        let state = StateFile {
            components: vec![project, file],
            analyses: vec![AnalysisPeriod {
                project: ComponentId::from("p1"),
                analyzed_at: Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap(),
                leak_period_start: None,
            }],
            ..StateFile::default()
        };
        let path = dir.join("state.json");
        state.save(&path).unwrap();
        path
    }

    fn args(state: Utf8PathBuf, components: &[&str]) -> RefreshArgs {
        RefreshArgs {
            state,
            components: components.iter().map(ToString::to_string).collect(),
            config: None,
            json: None,
            dry_run: false,
            color: ColorMode::Never,
            log_level: LogLevel::None,
        }
    }

    #[test]
    fn test_refresh_writes_report_and_state() {
        let dir = tempfile::tempdir().unwrap();
        let dir = Utf8Path::from_path(dir.path()).unwrap();
        let state = write_state(dir);

        let mut host = TestHost::new();
        refresh_measures(&mut host, &args(state.clone(), &["proj:a.rs"])).unwrap();

        let output = host.output_str();
        assert!(output.starts_with("Refreshed 2 component(s)"), "{output}");
        assert!(output.contains("proj:a.rs"));

        let saved = StateFile::load(&state).unwrap();
        assert!(!saved.measures.is_empty());
        assert!(saved.metrics.is_none());
    }

    #[test]
    fn test_dry_run_leaves_state_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let dir = Utf8Path::from_path(dir.path()).unwrap();
        let state = write_state(dir);
        let before = fs::read_to_string(&state).unwrap();

        let mut refresh_args = args(state.clone(), &["proj"]);
        refresh_args.dry_run = true;
        refresh_args.json = Some(dir.join("report.json"));

        let mut host = TestHost::new();
        refresh_measures(&mut host, &refresh_args).unwrap();

        assert_eq!(fs::read_to_string(&state).unwrap(), before);
        let json: serde_json::Value = serde_json::from_str(&fs::read_to_string(dir.join("report.json")).unwrap()).unwrap();
        assert_eq!(json["summary"]["visited_components"], 1);
    }

    #[test]
    fn test_unknown_component_key() {
        let dir = tempfile::tempdir().unwrap();
        let dir = Utf8Path::from_path(dir.path()).unwrap();
        let state = write_state(dir);
        let before = fs::read_to_string(&state).unwrap();

        let mut host = TestHost::new();
        let err = refresh_measures(&mut host, &args(state.clone(), &["nope"])).unwrap_err();
        assert!(err.to_string().contains("unknown component key `nope`"));
        assert_eq!(fs::read_to_string(&state).unwrap(), before);
    }
}
