//! Database image codec
//!
//! The live database is serialized to the raw SQLite file format, and that
//! byte image is stored on the medium as a JSON array of numbers.

use std::fs;

use rusqlite::backup::Progress;
use rusqlite::{Connection, DatabaseName};
use sha2::{Digest, Sha256};

use crate::db;
use crate::errors::{from_rusqlite, from_serde_json, image_corrupt, io_error, Result};
use crate::schema;

/// Every SQLite database file starts with this header
pub const SQLITE_HEADER: &[u8; 16] = b"SQLite format 3\0";

/// Serialize the main database of `conn` to its file image
pub fn serialize(conn: &Connection) -> Result<Vec<u8>> {
    let staging = tempfile::NamedTempFile::new().map_err(|e| io_error("stage_image", e))?;
    conn.backup(DatabaseName::Main, staging.path(), None)
        .map_err(from_rusqlite)?;
    fs::read(staging.path()).map_err(|e| io_error("read_staged_image", e))
}

/// Rebuild an in-memory database from a file image
///
/// Rejects anything that is not a readable SQLite image carrying every store
/// table. `storage_key` only labels the error.
pub fn restore(bytes: &[u8], storage_key: &str) -> Result<Connection> {
    if bytes.len() < SQLITE_HEADER.len() || !bytes.starts_with(SQLITE_HEADER) {
        return Err(image_corrupt(storage_key, "not a SQLite database image"));
    }

    let staging = tempfile::NamedTempFile::new().map_err(|e| io_error("stage_image", e))?;
    fs::write(staging.path(), bytes).map_err(|e| io_error("write_staged_image", e))?;

    let mut conn = db::open_in_memory()?;
    conn.restore(DatabaseName::Main, staging.path(), None::<fn(Progress)>)
        .map_err(|e| image_corrupt(storage_key, &format!("restore failed: {}", e)))?;

    let check: String = conn
        .query_row("PRAGMA quick_check", [], |row| row.get(0))
        .map_err(|e| {
            image_corrupt(storage_key, "integrity check failed").with_source(from_rusqlite(e))
        })?;
    if check != "ok" {
        return Err(image_corrupt(
            storage_key,
            &format!("integrity check failed: {}", check),
        ));
    }

    let missing = schema::missing_tables(&conn)
        .map_err(|e| image_corrupt(storage_key, "table listing failed").with_source(e))?;
    if !missing.is_empty() {
        return Err(image_corrupt(
            storage_key,
            &format!("missing tables: {}", missing.join(", ")),
        ));
    }

    Ok(conn)
}

/// Encode an image as the medium payload (JSON array of bytes)
pub fn encode(bytes: &[u8]) -> Result<String> {
    serde_json::to_string(bytes).map_err(|e| from_serde_json("encode_image", e))
}

/// Decode a medium payload back into image bytes
pub fn decode(payload: &str, storage_key: &str) -> Result<Vec<u8>> {
    serde_json::from_str::<Vec<u8>>(payload)
        .map_err(|e| image_corrupt(storage_key, &format!("payload is not a byte array: {}", e)))
}

/// SHA-256 of an image, hex encoded
pub fn digest(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}
