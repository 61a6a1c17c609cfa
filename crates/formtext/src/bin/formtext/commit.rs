//! `formtext commit`.

use std::path::{Path, PathBuf};

use formtext::commit::{CommitSession, DirectoryCommitter};
use formtext::config::FormsConfig;
use formtext::ids::RandomIds;
use formtext::template::strip_instructions;

use crate::files::read_input;
use crate::repair::print_report;
use crate::style;

const DEFAULT_FORMS_DIR: &str = "forms";

pub fn run_commit(
    config: &FormsConfig,
    name: &str,
    input: &Path,
    out_dir: Option<PathBuf>,
) -> anyhow::Result<()> {
    let candidate = read_input(Some(input))?;
    let dir = out_dir
        .or_else(|| config.output_dir.clone())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_FORMS_DIR));
    let committer = DirectoryCommitter::new(dir);
    let path = committer.path_for(name);
    let session = CommitSession::new(committer);
    let report = session.repair_and_commit(
        name,
        strip_instructions(&candidate),
        None,
        &mut RandomIds,
    )?;
    print_report(name, &report);
    eprintln!("{} {}", style::success("Committed"), path.display());
    Ok(())
}
