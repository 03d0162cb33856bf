//! On-disk bundles for tests.

use std::fs;
use std::path::{Path, PathBuf};

use rusqlite::{Connection, params};

use crate::consts::{DOCSET_CONTENT, DOCSET_INDEX, MANIFEST_INDEX};

/// `(name, type, path)` rows of a Dash `searchIndex` table.
pub(crate) type Row<'a> = (&'a str, &'a str, &'a str);

pub(crate) const GIT_HTML: &str = r#"<!DOCTYPE html>
<html>
<head><meta charset="utf-8"><title>Git</title></head>
<body>
<h1>Git</h1>
<section class="category">
  <h2 id="//dash_ref/Category/Branching/1">Branching</h2>
  <table>
    <tr id="//dash_ref_Branching/Entry/checkout/0">
      <td class="description">
        <div class="name"><p><code>git checkout</code></p></div>
        <div class="notes"><p>Switch branches</p><pre class="highlight bash"><code>git checkout main</code></pre></div>
      </td>
    </tr>
    <tr id="//dash_ref_Branching/Entry/merge/0">
      <td class="description">
        <div class="name"><p><code>git merge</code></p></div>
        <div class="notes"><p>Join two branches</p><pre class="highlight bash"><code>git merge feature</code></pre></div>
      </td>
    </tr>
  </table>
</section>
<section class="category">
  <h2 id="//dash_ref/Category/Staging/1">Staging</h2>
  <table>
    <tr id="//dash_ref_Staging/Entry/add/0">
      <td class="description">
        <div class="name"><p><code>git add</code></p></div>
        <div class="notes"><p>Stage changes</p><pre class="highlight bash"><code>git add -p</code></pre></div>
      </td>
    </tr>
  </table>
</section>
</body>
</html>"#;

pub(crate) const GIT_ROWS: &[Row<'static>] = &[
    ("Branching", "Category", "index.html#//dash_ref/Category/Branching/1"),
    ("checkout", "Entry", "index.html#//dash_ref_Branching/Entry/checkout/0"),
    ("merge", "Entry", "index.html#//dash_ref_Branching/Entry/merge/0"),
    ("Staging", "Category", "index.html#//dash_ref/Category/Staging/1"),
    ("add", "Entry", "index.html#//dash_ref_Staging/Entry/add/0"),
];

/// Creates a `searchIndex` database the way Dash lays it out.
pub(crate) fn search_index(path: &Path, rows: &[Row<'_>]) {
    let connection = Connection::open(path).unwrap();
    connection
        .execute_batch(
            "CREATE TABLE searchIndex(id INTEGER PRIMARY KEY, name TEXT, type TEXT, path TEXT);
             CREATE UNIQUE INDEX anchor ON searchIndex (name, type, path);",
        )
        .unwrap();
    for (name, kind, path) in rows {
        connection
            .execute("INSERT OR IGNORE INTO searchIndex(name, type, path) VALUES (?1, ?2, ?3)", params![name, kind, path])
            .unwrap();
    }
}

/// Creates `<parent>/<display_name>.docset` and returns its path.
pub(crate) fn docset(parent: &Path, display_name: &str, html: &str, rows: &[Row<'_>]) -> PathBuf {
    let root = parent.join(format!("{display_name}.docset"));
    let content = root.join(DOCSET_CONTENT);
    fs::create_dir_all(content.parent().unwrap()).unwrap();
    fs::write(&content, html).unwrap();
    search_index(&root.join(DOCSET_INDEX), rows);
    root
}

pub(crate) fn git_docset(parent: &Path) -> PathBuf {
    docset(parent, "Git", GIT_HTML, GIT_ROWS)
}

/// Creates a flat bundle directory with a manifest and one content file.
pub(crate) fn flat(parent: &Path, name: &str, manifest: &str, (file, content): (&str, &str)) -> PathBuf {
    let root = parent.join(name);
    fs::create_dir_all(&root).unwrap();
    fs::write(root.join(MANIFEST_INDEX), manifest).unwrap();
    fs::write(root.join(file), content).unwrap();
    root
}
