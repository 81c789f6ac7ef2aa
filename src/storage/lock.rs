use crate::Result;
use camino::{Utf8Path, Utf8PathBuf};
use fs4::fs_std::FileExt;
use ohno::IntoAppError;
use std::fs::{File, OpenOptions};

const LOG_TARGET: &str = "   storage";

/// Guard that releases the state lock when dropped
#[derive(Debug)]
pub struct StateLock {
    file: File,
    path: Utf8PathBuf,
}

impl StateLock {
    #[must_use]
    pub fn path(&self) -> &Utf8Path {
        &self.path
    }
}

impl Drop for StateLock {
    fn drop(&mut self) {
        if let Err(e) = FileExt::unlock(&self.file) {
            log::warn!(target: LOG_TARGET, "Could not unlock '{}': {e:#}", self.path);
        }
    }
}

/// Take the exclusive advisory lock guarding `state_path`.
///
/// The lock lives in a sibling file named after the state file with a
/// `.lock` suffix. Blocks until no other process holds it.
pub fn acquire_state_lock(state_path: &Utf8Path) -> Result<StateLock> {
    let path = Utf8PathBuf::from(format!("{state_path}.lock"));

    let file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(false)
        .open(&path)
        .into_app_err_with(|| format!("opening lock file '{path}'"))?;

    file.lock_exclusive()
        .into_app_err_with(|| format!("acquiring exclusive lock on '{path}'"))?;
    log::debug!(target: LOG_TARGET, "Acquired lock '{path}'");

    Ok(StateLock { file, path })
}
