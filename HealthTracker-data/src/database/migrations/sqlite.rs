use rusqlite::Connection;
use tracing::info;

/// Run SQLite migrations
pub fn run_migrations(conn: &Connection) -> Result<(), String> {
    info!("Running SQLite migrations");

    create_key_value_table(conn)?;

    info!("SQLite migrations completed successfully");
    Ok(())
}

/// Create the namespaced key-value table
fn create_key_value_table(conn: &Connection) -> Result<(), String> {
    info!("Creating key_value_store table if not exists");

    conn.execute(
        "CREATE TABLE IF NOT EXISTS key_value_store (
            key TEXT PRIMARY KEY,
            value TEXT NOT NULL,
            updated_at TEXT NOT NULL
        )",
        [],
    )
    .map_err(|e| format!("Failed to create key_value_store table: {}", e))?;

    Ok(())
}
