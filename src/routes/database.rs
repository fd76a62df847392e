//! SQLite-backed route table.
//!
//! Expected schema:
//! ```sql
//! CREATE TABLE urls (path TEXT PRIMARY KEY, url TEXT NOT NULL);
//! ```

use std::path::Path;

use rusqlite::{params, Connection, OpenFlags};

use crate::routes::error::{LoadError, ParseError};
use crate::routes::table::{PathRoute, RouteTable};

/// Read every `(path, url)` row of `table` from the database at `path`.
///
/// The file is opened read-only, so a missing database is an error rather
/// than a freshly created empty file. `table` must already be a validated
/// SQL identifier.
pub fn load_database(path: &Path, table: &str) -> Result<RouteTable, LoadError> {
    let db_err = |source: rusqlite::Error| LoadError::Database {
        path: path.to_path_buf(),
        source,
    };

    let conn = Connection::open_with_flags(path, OpenFlags::SQLITE_OPEN_READ_ONLY).map_err(db_err)?;

    let mut stmt = conn
        .prepare(&format!("SELECT path, url FROM \"{table}\""))
        .map_err(db_err)?;

    let rows = stmt
        .query_map([], |row| Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?)))
        .map_err(db_err)?;

    let mut routes = Vec::new();
    for row in rows {
        let (route_path, url) = row.map_err(db_err)?;
        let route = PathRoute::new(route_path, url)
            .map_err(|e| ParseError::new("sqlite", path.display().to_string(), e))?;
        routes.push(route);
    }

    tracing::debug!(
        path = %path.display(),
        table = table,
        rows = routes.len(),
        "Database routes read"
    );

    Ok(RouteTable::from_routes(routes))
}
