//! CLI definitions for formtext.

use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "formtext",
    version,
    about = "Generate and repair saved-as-text database form definitions",
    infer_subcommands = true,
    after_help = "Examples:\n  formtext generate --source Products --columns ProductID,ProductName > products.txt\n  formtext repair --name ProductsForm -i products.txt -o ready.txt\n  formtext commit --name ProductsForm -i products.txt --out-dir forms\n  formtext check -i ready.txt"
)]
pub struct Cli {
    /// Log each pass summary.
    #[arg(long, short, global = true)]
    pub verbose: bool,
    /// Config file (defaults to ./formtext.toml when present).
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Generate a form template for a record source.
    #[command(
        after_help = "Examples:\n  formtext generate --source People --columns ID,Name,Age\n  formtext generate --source Orders --schema schema.toml --kind main \\\n      --child-object Form.OrderLines --link-master OrderID --link-child OrderID"
    )]
    Generate {
        /// Table or saved query the form binds to.
        #[arg(long)]
        source: String,
        /// Column names, in order.
        #[arg(long, value_delimiter = ',', conflicts_with = "schema")]
        columns: Vec<String>,
        /// Schema file listing record sources and their columns.
        #[arg(long)]
        schema: Option<PathBuf>,
        /// Form kind: single, embedded, or main.
        #[arg(long, default_value = "single")]
        kind: String,
        /// Child form object for a main form, e.g. Form.OrderLines.
        #[arg(long)]
        child_object: Option<String>,
        /// Linking field on the main form's record source.
        #[arg(long)]
        link_master: Option<String>,
        /// Linking field on the child form's record source.
        #[arg(long)]
        link_child: Option<String>,
        /// Wrap the template in operator instructions.
        #[arg(long, action = ArgAction::SetTrue)]
        instructions: bool,
        /// Output file (stdout when omitted).
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
    /// Rebuild the NameMap and identifiers and set the form name.
    Repair {
        /// Final form name.
        #[arg(long)]
        name: String,
        /// Input file (stdin when omitted or `-`).
        #[arg(long, short)]
        input: Option<PathBuf>,
        /// Output file (stdout when omitted).
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
    /// Repair a document and write it to the forms directory.
    Commit {
        /// Final form name.
        #[arg(long)]
        name: String,
        /// Input file.
        #[arg(long, short)]
        input: PathBuf,
        /// Forms directory (overrides output.dir from the config).
        #[arg(long)]
        out_dir: Option<PathBuf>,
    },
    /// Report structural problems and the control names found.
    Check {
        /// Input file (stdin when omitted or `-`).
        #[arg(long, short)]
        input: Option<PathBuf>,
    },
}
