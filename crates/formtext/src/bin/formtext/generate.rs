//! `formtext generate`.

use std::path::PathBuf;

use anyhow::{bail, Context};
use formtext::config::FormsConfig;
use formtext::form::{FormKind, FormRequest};
use formtext::ids::RandomIds;
use formtext::schema::SchemaCatalog;
use formtext::template::generate_template;

use crate::files::write_output;
use crate::style;

pub struct GenerateArgs {
    pub source: String,
    pub columns: Vec<String>,
    pub schema: Option<PathBuf>,
    pub kind: String,
    pub child_object: Option<String>,
    pub link_master: Option<String>,
    pub link_child: Option<String>,
    pub instructions: bool,
    pub output: Option<PathBuf>,
}

pub fn run_generate(config: &FormsConfig, args: GenerateArgs) -> anyhow::Result<()> {
    let kind: FormKind = args.kind.parse()?;
    let request = FormRequest::new(
        &args.source,
        kind,
        args.child_object.as_deref(),
        args.link_master.as_deref(),
        args.link_child.as_deref(),
    )?;

    let catalog = if !args.columns.is_empty() {
        SchemaCatalog::new().with_source(&args.source, &args.columns)
    } else if let Some(path) = &args.schema {
        SchemaCatalog::load(path)
            .with_context(|| format!("failed to load schema {}", path.display()))?
    } else {
        bail!("either --columns or --schema is required");
    };

    let template = generate_template(&request, &catalog, &config.layout, &mut RandomIds)?;
    let text = if args.instructions {
        template.with_instructions()
    } else {
        template.text().to_string()
    };
    write_output(args.output.as_deref(), &text)?;
    if let Some(path) = &args.output {
        eprintln!(
            "{} {} template for {} -> {}",
            style::success("Generated"),
            template.kind(),
            style::accent(template.record_source()),
            path.display()
        );
    }
    Ok(())
}
