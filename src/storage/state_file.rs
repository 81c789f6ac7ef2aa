use super::MeasureDb;
use crate::Result;
use crate::components::{Component, InMemoryComponentTree};
use crate::facts::{Issue, IssueStore};
use crate::measures::PersistedMeasure;
use crate::metrics::{MetricCatalog, MetricDef};
use crate::periods::{AnalysisPeriod, InMemoryPeriods};
use camino::{Utf8Path, Utf8PathBuf};
use ohno::IntoAppError;
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, Write};

const LOG_TARGET: &str = "   storage";

/// The persisted state of a code base, as one JSON document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StateFile {
    #[serde(default)]
    pub components: Vec<Component>,

    /// Metric dictionary, the built-in one when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metrics: Option<Vec<MetricDef>>,

    #[serde(default)]
    pub analyses: Vec<AnalysisPeriod>,

    #[serde(default)]
    pub issues: Vec<Issue>,

    #[serde(default)]
    pub measures: Vec<PersistedMeasure>,
}

/// The collaborators of a refresh, built from a [`StateFile`].
#[derive(Debug)]
pub struct LoadedState {
    pub tree: InMemoryComponentTree,
    pub catalog: MetricCatalog,
    pub periods: InMemoryPeriods,
    pub issues: IssueStore,
    pub measures: MeasureDb,
}

impl StateFile {
    /// Read a state file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or parsed
    pub fn load(path: &Utf8Path) -> Result<Self> {
        let file = File::open(path).into_app_err_with(|| format!("opening state file '{path}'"))?;
        let state: Self =
            serde_json::from_reader(BufReader::new(file)).into_app_err_with(|| format!("parsing state file '{path}'"))?;

        log::debug!(
            target: LOG_TARGET,
            "Loaded '{path}': {} component(s), {} issue(s), {} measure(s)",
            state.components.len(),
            state.issues.len(),
            state.measures.len()
        );

        Ok(state)
    }

    /// Write the state file, replacing any previous version atomically
    ///
    /// The document is first written next to `path`, then renamed over it.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written or renamed
    pub fn save(&self, path: &Utf8Path) -> Result<()> {
        if let Some(parent) = path.parent()
            && !parent.as_str().is_empty()
        {
            fs::create_dir_all(parent).into_app_err_with(|| format!("unable to create directory '{parent}'"))?;
        }

        let temp_path = Utf8PathBuf::from(format!("{path}.tmp"));
        if let Err(e) = self.write_and_replace(&temp_path, path) {
            if let Err(remove_error) = fs::remove_file(&temp_path)
                && remove_error.kind() != io::ErrorKind::NotFound
            {
                log::warn!(target: LOG_TARGET, "Could not remove '{temp_path}': {remove_error}");
            }
            return Err(e);
        }

        log::debug!(target: LOG_TARGET, "Saved '{path}'");
        Ok(())
    }

    fn write_and_replace(&self, temp_path: &Utf8Path, path: &Utf8Path) -> Result<()> {
        let file = File::create(temp_path).into_app_err_with(|| format!("unable to create state file '{temp_path}'"))?;
        let mut writer = BufWriter::new(file);

        serde_json::to_writer_pretty(&mut writer, self).into_app_err_with(|| format!("unable to write state file '{temp_path}'"))?;
        writer
            .flush()
            .into_app_err_with(|| format!("unable to flush state file '{temp_path}'"))?;
        drop(writer);

        fs::rename(temp_path, path).into_app_err_with(|| format!("unable to replace state file '{path}'"))
    }

    /// Build the in-memory collaborators described by this state.
    ///
    /// # Errors
    ///
    /// Returns an error if the state is inconsistent: duplicate components or
    /// metrics, issues on unknown components, or invalid analysis periods.
    pub fn into_loaded(self) -> Result<LoadedState> {
        let mut tree = InMemoryComponentTree::new();
        for component in self.components {
            tree.insert(component)?;
        }

        let catalog = match self.metrics {
            Some(metrics) => {
                let mut catalog = MetricCatalog::new();
                for metric in metrics {
                    catalog.insert(metric)?;
                }
                catalog
            }
            None => MetricCatalog::core(),
        };

        let mut periods = InMemoryPeriods::new();
        for period in self.analyses {
            periods.insert(period)?;
        }

        let issues = IssueStore::index(&tree, self.issues)?;
        let measures = self.measures.into_iter().collect();

        Ok(LoadedState {
            tree,
            catalog,
            periods,
            issues,
            measures,
        })
    }
}

impl LoadedState {
    /// Turn the collaborators back into a state document.
    ///
    /// Components are sorted by id and measures by component and metric, so
    /// that saving the same state twice gives the same file.
    #[must_use]
    pub fn into_state_file(self, keep_metrics: bool) -> StateFile {
        let mut components: Vec<_> = self.tree.iter().cloned().collect();
        components.sort_by(|a, b| a.id.cmp(&b.id));

        let mut analyses: Vec<_> = self.periods.iter().cloned().collect();
        analyses.sort_by(|a, b| a.project.cmp(&b.project));

        StateFile {
            components,
            metrics: keep_metrics.then(|| self.catalog.sorted().into_iter().cloned().collect()),
            analyses,
            issues: self.issues.issues().to_vec(),
            measures: self.measures.iter().cloned().collect(),
        }
    }
}
