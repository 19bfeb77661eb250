use rusqlite::{Connection, Result};

/// Initialize the key-value store schema
pub fn init_store_schema(conn: &Connection) -> Result<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS kv_schema_version (
            version INTEGER PRIMARY KEY,
            applied_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
        )",
        [],
    )?;

    let current_version: i32 = conn
        .query_row(
            "SELECT version FROM kv_schema_version ORDER BY version DESC LIMIT 1",
            [],
            |row| row.get(0),
        )
        .unwrap_or(0);

    if current_version < 1 {
        create_store_schema_v1(conn)?;
        conn.execute("INSERT INTO kv_schema_version (version) VALUES (1)", [])?;
    }

    Ok(())
}

/// Create key-value schema version 1
fn create_store_schema_v1(conn: &Connection) -> Result<()> {
    // Table: kv_nodes - one JSON document per normalized path
    conn.execute(
        "CREATE TABLE IF NOT EXISTS kv_nodes (
            path TEXT PRIMARY KEY,
            value TEXT NOT NULL,
            updated_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
        )",
        [],
    )?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_is_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        init_store_schema(&conn).unwrap();
        init_store_schema(&conn).unwrap();

        let versions: i32 = conn
            .query_row("SELECT COUNT(*) FROM kv_schema_version", [], |row| row.get(0))
            .unwrap();
        assert_eq!(versions, 1);
    }
}
