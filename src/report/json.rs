//! JSON output for the aggregate views.
//!
//! Serializes report/diff/advise results for scripting and piping.

use serde::Serialize;

use crate::error::Result;

pub fn render<T: Serialize>(view: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(view)?)
}
