pub mod table;
pub mod json;

use serde::Serialize;

use crate::config::Config;
use crate::disk::{DiskAdvise, DiskDiff, DiskReport};
use crate::error::Result;

/// An aggregate view that can be shown as a table or as JSON.
pub trait View: Serialize {
    fn table(&self) -> String;
}

impl View for DiskReport {
    fn table(&self) -> String {
        table::render_report(self)
    }
}

impl View for DiskDiff {
    fn table(&self) -> String {
        table::render_diff(self)
    }
}

impl View for DiskAdvise {
    fn table(&self) -> String {
        table::render_advise(self)
    }
}

pub fn render<V: View>(view: &V, config: &Config) -> Result<String> {
    if config.json_output {
        let mut out = json::render(view)?;
        out.push('\n');
        Ok(out)
    } else {
        Ok(view.table())
    }
}

pub fn print<V: View>(view: &V, config: &Config) -> Result<()> {
    print!("{}", render(view, config)?);
    Ok(())
}
