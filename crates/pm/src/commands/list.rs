//! `pm list` command handler

use anyhow::Result;
use pm_registry::ProjectRecord;
use tabled::{
    settings::{object::Columns, Modify, Style, Width},
    Table, Tabled,
};

use crate::output;
use crate::utils::open_registry;

#[derive(Tabled)]
struct ProjectRow {
    #[tabled(rename = "project name")]
    name: String,
    #[tabled(rename = "last sync")]
    last_sync: String,
    description: String,
}

impl From<ProjectRecord> for ProjectRow {
    fn from(record: ProjectRecord) -> Self {
        Self {
            last_sync: record.formatted_timestamp(),
            name: record.name,
            description: record.description,
        }
    }
}

/// Print every tracked project in registry order
pub(super) fn run() -> Result<()> {
    let registry = open_registry()?;

    let rows = registry
        .list()?
        .map(|record| record.map(ProjectRow::from))
        .collect::<pm_registry::Result<Vec<_>>>()?;

    if rows.is_empty() {
        output::info("No projects yet. Create one with: pm new <name> [description]");
        return Ok(());
    }

    let mut table = Table::new(rows);
    table.with(Style::sharp());
    table.with(Modify::new(Columns::new(2..3)).with(Width::wrap(60).keep_words(true))); // description

    println!("{}", table);
    Ok(())
}
