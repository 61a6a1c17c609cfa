//! Handing finished documents to the host.
//!
//! The host accepts one import at a time. [`CommitSession`] serializes
//! every commit made through it; committers themselves need no locking.

use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use tracing::{debug, info, warn};

use crate::error::FormError;
use crate::ids::IdSource;
use crate::repair::{repair, RepairReport};
use crate::template::Template;

/// Imports a finished document under a form name, replacing any existing
/// form of that name.
pub trait FormCommitter {
    /// Deletes `form_name` if it exists, then imports `text` verbatim.
    fn commit(&mut self, form_name: &str, text: &str) -> Result<(), FormError>;
}

/// Rejects names that are empty or would escape a directory.
pub fn validate_form_name(form_name: &str) -> Result<(), FormError> {
    let trimmed = form_name.trim();
    if trimmed.is_empty()
        || trimmed != form_name
        || form_name == "."
        || form_name == ".."
        || form_name.contains(['/', '\\', '\0'])
    {
        return Err(FormError::InvalidFormName(form_name.to_string()));
    }
    Ok(())
}

/// Writes each form to `<dir>/<form_name>.txt`.
#[derive(Debug, Clone)]
pub struct DirectoryCommitter {
    dir: PathBuf,
}

impl DirectoryCommitter {
    /// Commits into `dir`, which is created on first use.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// The output directory.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Where `form_name` is written.
    #[must_use]
    pub fn path_for(&self, form_name: &str) -> PathBuf {
        self.dir.join(format!("{form_name}.txt"))
    }
}

impl FormCommitter for DirectoryCommitter {
    fn commit(&mut self, form_name: &str, text: &str) -> Result<(), FormError> {
        validate_form_name(form_name)?;
        std::fs::create_dir_all(&self.dir).map_err(|err| FormError::io(&self.dir, err))?;
        let path = self.path_for(form_name);
        if path.exists() {
            debug!(path = %path.display(), "removing existing form");
            std::fs::remove_file(&path).map_err(|err| FormError::io(&path, err))?;
        }
        std::fs::write(&path, text).map_err(|err| FormError::io(&path, err))?;
        info!(path = %path.display(), bytes = text.len(), "form committed");
        Ok(())
    }
}

/// Serializes commits to one committer.
#[derive(Debug)]
pub struct CommitSession<C> {
    committer: Mutex<C>,
}

impl<C: FormCommitter> CommitSession<C> {
    /// Wraps `committer` for shared use.
    #[must_use]
    pub fn new(committer: C) -> Self {
        Self {
            committer: Mutex::new(committer),
        }
    }

    /// Commits `text` as `form_name`. Concurrent callers wait their turn.
    pub fn commit(&self, form_name: &str, text: &str) -> Result<(), FormError> {
        validate_form_name(form_name)?;
        let mut committer = self.committer.lock();
        committer.commit(form_name, text)
    }

    /// Repairs `candidate` and commits the result as `form_name`.
    ///
    /// `origin` is the template the candidate was generated from, if any.
    /// Nothing is committed when the repair fails.
    pub fn repair_and_commit(
        &self,
        form_name: &str,
        candidate: &str,
        origin: Option<&Template>,
        ids: &mut dyn IdSource,
    ) -> Result<RepairReport, FormError> {
        validate_form_name(form_name)?;
        let repaired = repair(candidate, form_name, ids)?;
        if let Some(template) = origin {
            debug!(
                kind = %template.kind(),
                record_source = template.record_source(),
                "committing from template"
            );
            if let Some(child) = template.child_control() {
                if !repaired.report.control_names.iter().any(|name| name == child) {
                    warn!(child, "child form control missing from edited template");
                }
            }
        }
        self.commit(form_name, &repaired.text)?;
        Ok(repaired.report)
    }

    /// Returns the committer, ending the session.
    pub fn into_inner(self) -> C {
        self.committer.into_inner()
    }
}
