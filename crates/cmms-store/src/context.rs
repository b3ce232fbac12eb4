//! Persistence context
//!
//! Owns the live in-memory database and the medium its image is persisted
//! to. The process constructs one context, opens it, and lends it to the
//! accessors for each call.
//!
//! ## Lifecycle
//!
//! - `open()` restores the persisted image, or creates and seeds a fresh
//!   database when the medium has none. Opening an open context is a no-op.
//! - An unreadable image fails with `ImageCorrupt`; the error is kept as the
//!   context's `init_error()` and the context stays closed.
//! - `recover_fresh()` moves the unreadable payload aside and starts over
//!   from seed data. It only runs when asked for, directly or through
//!   `open_or_recover()` with `recover_on_corrupt` set.

use std::time::Instant;

use chrono::NaiveDate;
use cmms_core::errors::{ExError, ExErrorKind};
use cmms_core::{log_op_end, log_op_error, log_op_start, time};
use rusqlite::Connection;

use crate::config::StoreConfig;
use crate::db;
use crate::errors::{not_initialized, Result};
use crate::image;
use crate::medium::{FileMedium, StorageMedium};
use crate::schema;
use crate::seed;

/// How a call to `open` obtained its database
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenOutcome {
    /// Restored from the persisted image
    Restored,
    /// No image existed; schema and first-run data were created
    Seeded,
    /// An unreadable image was set aside and a seeded database replaced it
    Recovered,
    /// The context was already open
    AlreadyOpen,
}

impl OpenOutcome {
    pub fn as_str(self) -> &'static str {
        match self {
            OpenOutcome::Restored => "restored",
            OpenOutcome::Seeded => "seeded",
            OpenOutcome::Recovered => "recovered",
            OpenOutcome::AlreadyOpen => "already_open",
        }
    }
}

/// A downloadable copy of the database image
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapshotExport {
    /// `cmms-backup-<YYYY-MM-DD>.sqlite`
    pub file_name: String,
    pub bytes: Vec<u8>,
    /// SHA-256 of `bytes`, hex encoded
    pub digest: String,
}

pub struct PersistenceContext {
    medium: Box<dyn StorageMedium>,
    config: StoreConfig,
    conn: Option<Connection>,
    init_error: Option<ExError>,
}

impl PersistenceContext {
    /// Create a closed context over `medium`
    pub fn new<M: StorageMedium + 'static>(medium: M, config: StoreConfig) -> Self {
        Self {
            medium: Box::new(medium),
            config,
            conn: None,
            init_error: None,
        }
    }

    /// Create a closed context over a file medium rooted at `config.data_dir`
    pub fn from_config(config: StoreConfig) -> Self {
        let medium = FileMedium::new(&config.data_dir);
        Self::new(medium, config)
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    pub fn storage_key(&self) -> &str {
        &self.config.storage_key
    }

    pub fn is_open(&self) -> bool {
        self.conn.is_some()
    }

    /// The live connection, if the context is open
    pub fn connection(&self) -> Option<&Connection> {
        self.conn.as_ref()
    }

    /// Error from the last failed `open`, cleared by a successful one
    pub fn init_error(&self) -> Option<&ExError> {
        self.init_error.as_ref()
    }

    /// Open the context
    ///
    /// # Errors
    ///
    /// - `ImageCorrupt`: the persisted payload is not a usable database image
    /// - `Persistence` / `Io`: the engine or the medium failed
    pub fn open(&mut self) -> Result<OpenOutcome> {
        if self.conn.is_some() {
            tracing::debug!(storage_key = %self.config.storage_key, "context already open");
            return Ok(OpenOutcome::AlreadyOpen);
        }

        log_op_start!("open_store", storage_key = %self.config.storage_key);
        let start = Instant::now();

        match self.open_impl() {
            Ok((conn, outcome)) => {
                self.conn = Some(conn);
                self.init_error = None;
                log_op_end!(
                    "open_store",
                    duration_ms = start.elapsed().as_millis() as u64,
                    outcome = outcome.as_str()
                );
                Ok(outcome)
            }
            Err(e) => {
                log_op_error!(
                    "open_store",
                    e.clone(),
                    duration_ms = start.elapsed().as_millis() as u64
                );
                self.init_error = Some(e.clone());
                Err(e)
            }
        }
    }

    fn open_impl(&self) -> Result<(Connection, OpenOutcome)> {
        let key = &self.config.storage_key;
        match self.medium.get(key)? {
            Some(payload) => {
                let bytes = image::decode(&payload, key)?;
                let conn = image::restore(&bytes, key)?;
                db::configure(&conn)?;
                tracing::debug!(image_bytes = bytes.len(), "restored persisted image");
                Ok((conn, OpenOutcome::Restored))
            }
            None => {
                let conn = self.create_fresh()?;
                Ok((conn, OpenOutcome::Seeded))
            }
        }
    }

    /// Open, recovering from an unreadable image when configured to
    ///
    /// # Errors
    ///
    /// Same as `open`; `ImageCorrupt` only when `recover_on_corrupt` is off.
    pub fn open_or_recover(&mut self) -> Result<OpenOutcome> {
        match self.open() {
            Err(e) if e.kind() == ExErrorKind::ImageCorrupt && self.config.recover_on_corrupt => {
                self.recover_fresh()
            }
            other => other,
        }
    }

    /// Replace whatever is persisted with a fresh seeded database
    ///
    /// A payload already under the storage key is first copied to
    /// `<key>.corrupt-<timestamp>` on the same medium. An existing entry of
    /// that name is never overwritten; a `-<n>` suffix is added instead.
    ///
    /// # Errors
    ///
    /// Fails if the payload cannot be set aside or the new image cannot be
    /// written; the context is left closed in that case.
    pub fn recover_fresh(&mut self) -> Result<OpenOutcome> {
        log_op_start!("recover_store", storage_key = %self.config.storage_key);
        let start = Instant::now();
        self.conn = None;

        match self.recover_impl() {
            Ok(conn) => {
                self.conn = Some(conn);
                self.init_error = None;
                log_op_end!("recover_store", duration_ms = start.elapsed().as_millis() as u64);
                Ok(OpenOutcome::Recovered)
            }
            Err(e) => {
                log_op_error!(
                    "recover_store",
                    e.clone(),
                    duration_ms = start.elapsed().as_millis() as u64
                );
                Err(e)
            }
        }
    }

    fn recover_impl(&self) -> Result<Connection> {
        let key = &self.config.storage_key;
        if let Some(payload) = self.medium.get(key)? {
            let aside = self.free_aside_key(key)?;
            self.medium.set(&aside, &payload)?;
            tracing::warn!(
                storage_key = %key,
                corrupt_key = %aside,
                payload_len = payload.len(),
                "unreadable image set aside, starting from a fresh database"
            );
        }
        self.create_fresh()
    }

    fn free_aside_key(&self, key: &str) -> Result<String> {
        let base = format!("{}.corrupt-{}", key, time::now().format("%Y%m%dT%H%M%S%.3f"));
        let mut candidate = base.clone();
        let mut suffix = 1u32;
        while self.medium.get(&candidate)?.is_some() {
            candidate = format!("{}-{}", base, suffix);
            suffix += 1;
        }
        Ok(candidate)
    }

    fn create_fresh(&self) -> Result<Connection> {
        let mut conn = db::open_in_memory()?;
        schema::create_tables(&conn)?;
        seed::seed_first_run(&mut conn)?;
        write_image(self.medium.as_ref(), &self.config.storage_key, &conn)?;
        Ok(conn)
    }

    /// Drop the live database
    ///
    /// Nothing is flushed: every write already persisted its image.
    pub fn close(&mut self) {
        if self.conn.take().is_some() {
            tracing::debug!(storage_key = %self.config.storage_key, "context closed");
        }
    }

    /// Serialize the database and write it under the storage key
    ///
    /// # Errors
    ///
    /// `NotInitialized` on a closed context, otherwise engine or medium errors.
    pub fn persist(&self) -> Result<()> {
        let conn = self.conn.as_ref().ok_or_else(|| not_initialized("persist"))?;
        write_image(self.medium.as_ref(), &self.config.storage_key, conn)
    }

    /// Copy of the current image for download
    ///
    /// # Errors
    ///
    /// `NotInitialized` on a closed context, otherwise engine errors.
    pub fn export_snapshot(&self, today: NaiveDate) -> Result<SnapshotExport> {
        let conn = self
            .conn
            .as_ref()
            .ok_or_else(|| not_initialized("export_snapshot"))?;
        let bytes = image::serialize(conn)?;
        Ok(SnapshotExport {
            file_name: snapshot_file_name(today),
            digest: image::digest(&bytes),
            bytes,
        })
    }
}

fn write_image(medium: &dyn StorageMedium, key: &str, conn: &Connection) -> Result<()> {
    let bytes = image::serialize(conn)?;
    medium.set(key, &image::encode(&bytes)?)?;
    tracing::debug!(storage_key = %key, image_bytes = bytes.len(), "persisted image");
    Ok(())
}

pub fn snapshot_file_name(today: NaiveDate) -> String {
    format!("cmms-backup-{}.sqlite", time::format_date(today))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::medium::MemoryMedium;

    #[test]
    fn test_open_seeds_and_persists_when_medium_empty() {
        let medium = MemoryMedium::new();
        let mut ctx = PersistenceContext::new(medium.clone(), StoreConfig::default());

        assert_eq!(ctx.open().unwrap(), OpenOutcome::Seeded);
        assert!(ctx.is_open());
        assert!(medium.get("cmms_database").unwrap().is_some());
    }

    #[test]
    fn test_second_open_is_noop() {
        let mut ctx = PersistenceContext::new(MemoryMedium::new(), StoreConfig::default());
        ctx.open().unwrap();
        assert_eq!(ctx.open().unwrap(), OpenOutcome::AlreadyOpen);
    }

    #[test]
    fn test_persist_on_closed_context() {
        let ctx = PersistenceContext::new(MemoryMedium::new(), StoreConfig::default());
        let err = ctx.persist().unwrap_err();
        assert_eq!(err.kind(), ExErrorKind::NotInitialized);
    }

    #[test]
    fn test_snapshot_file_name() {
        let day = NaiveDate::from_ymd_opt(2024, 3, 7).unwrap();
        assert_eq!(snapshot_file_name(day), "cmms-backup-2024-03-07.sqlite");
    }
}
