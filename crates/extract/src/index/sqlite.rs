//! Dash `docSet.dsidx` reader.
//!
//! The `searchIndex` table is the only part of the database Dash defines:
//! `(id, name, type, path)`, where `path` is the content file plus a
//! fragment such as `index.html#//dash_ref_Branching/Entry/checkout/0`.

use std::path::Path;

use exn::ResultExt;
use rusqlite::{Connection, OpenFlags};

use super::percent_decode;
use crate::consts::DASH_REF_REGEX;
use crate::error::{ErrorKind, Result};
use crate::models::{IndexEntry, Locator};

const REQUIRED_COLUMNS: [&str; 3] = ["name", "type", "path"];
const CATEGORY_TYPE: &str = "Category";

struct Row {
    id: i64,
    name: Option<String>,
    kind: Option<String>,
    path: Option<String>,
}
impl Row {
    fn into_entry(self) -> IndexEntry {
        let fragment = self.path.as_deref().and_then(|path| path.split_once('#')).map(|(_, fragment)| fragment);
        let category = if self.kind.as_deref() == Some(CATEGORY_TYPE) {
            self.name.clone()
        } else {
            fragment
                .and_then(|fragment| DASH_REF_REGEX.captures(fragment))
                .and_then(|captures| captures.get(1))
                .map(|category| percent_decode(category.as_str()))
        };
        let locator = match fragment.filter(|fragment| !fragment.is_empty()) {
            Some(fragment) => Locator::Anchor(fragment.to_string()),
            None => Locator::Record(self.id),
        };
        IndexEntry::new(self.name.unwrap_or_default(), category, locator)
    }
}

pub(super) fn read(path: &Path) -> Result<Vec<IndexEntry>> {
    let corrupt = || ErrorKind::CorruptIndex(path.to_path_buf());
    let connection = Connection::open_with_flags(path, OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX)
        .or_raise(corrupt)?;
    connection.execute_batch("PRAGMA query_only=ON; PRAGMA temp_store=MEMORY;").or_raise(corrupt)?;

    let columns = table_columns(&connection, "searchIndex").or_raise(corrupt)?;
    if let Some(missing) = REQUIRED_COLUMNS.iter().find(|column| !columns.iter().any(|c| c.eq_ignore_ascii_case(column))) {
        tracing::debug!(column = *missing, "searchIndex table is missing a required column");
        exn::bail!(corrupt());
    }

    let mut statement = connection.prepare("SELECT rowid, name, type, path FROM searchIndex ORDER BY rowid").or_raise(corrupt)?;
    let rows = statement
        .query_map([], |row| {
            Ok(Row {
                id: row.get(0)?,
                name: row.get(1)?,
                kind: row.get(2)?,
                path: row.get(3)?,
            })
        })
        .or_raise(corrupt)?;
    let mut entries = Vec::new();
    for row in rows {
        entries.push(row.or_raise(corrupt)?.into_entry());
    }
    Ok(entries)
}

fn table_columns(connection: &Connection, table: &str) -> rusqlite::Result<Vec<String>> {
    let mut statement = connection.prepare("SELECT name FROM pragma_table_info(?1)")?;
    statement.query_map([table], |row| row.get(0))?.collect()
}
