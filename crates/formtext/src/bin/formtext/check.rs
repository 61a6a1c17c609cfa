//! `formtext check`.

use std::path::Path;

use formtext_syntax::lines::name_lines;
use formtext_syntax::parser::parse;
use indexmap::IndexSet;

use crate::files::read_input;
use crate::style;

pub fn run_check(input: Option<&Path>) -> anyhow::Result<()> {
    let text = read_input(input)?;
    let parsed = parse(&text);
    for error in parsed.errors() {
        println!(
            "{}",
            style::error(format!("line {}: {error}", error.line_number(&text)))
        );
    }
    let names: IndexSet<_> = name_lines(&text).into_iter().map(|line| line.value).collect();
    if names.is_empty() {
        println!("{}", style::warning("no named controls; repair would fail"));
    }
    for name in &names {
        println!("{}", style::accent(name));
    }
    println!(
        "{} diagnostic(s), {} control name(s)",
        parsed.errors().len(),
        names.len()
    );
    Ok(())
}
