//! SheetSmith - character sheet form engine
//!
//! This crate is the *composition root*: it reads configuration, opens a
//! template and an optional persisted sheet, and runs them through a form
//! session.
//!
//! Usage: `sheetsmith [SCHEMA_PATH] [SHEET_PATH]`. Missing arguments fall
//! back to `SHEETSMITH_SCHEMA_PATH` and `SHEETSMITH_SHEET_PATH`.

mod run;

fn main() -> anyhow::Result<()> {
    run::run()
}
