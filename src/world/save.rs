//! Save slots.
//!
//! A snapshot is the player's persistent state encoded with `postcard`,
//! behind a version magic and a length header. Encounter stages are never
//! part of it.

use crate::errors::{PersistenceError, PersistenceResult};
use crate::world::player::Player;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Marks a file as a critter-adventure save of the current layout.
pub const SAVE_VERSION_MAGIC: u32 = 0xC217_0001;
const HEADER_LEN: usize = 8;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SaveSnapshot {
    pub player: Player,
}

impl SaveSnapshot {
    pub fn new(player: Player) -> Self {
        Self { player }
    }

    /// Layout: version magic (4 bytes LE), body length (4 bytes LE), body.
    pub fn to_bytes(&self) -> PersistenceResult<Vec<u8>> {
        let body =
            postcard::to_allocvec(self).map_err(|e| PersistenceError::Encode(e.to_string()))?;
        let body_len = u32::try_from(body.len())
            .map_err(|_| PersistenceError::Encode(format!("snapshot too large: {} bytes", body.len())))?;

        let mut bytes = Vec::with_capacity(HEADER_LEN + body.len());
        bytes.extend_from_slice(&SAVE_VERSION_MAGIC.to_le_bytes());
        bytes.extend_from_slice(&body_len.to_le_bytes());
        bytes.extend_from_slice(&body);
        Ok(bytes)
    }

    pub fn from_bytes(bytes: &[u8]) -> PersistenceResult<Self> {
        if bytes.len() < HEADER_LEN {
            return Err(PersistenceError::Decode(format!(
                "truncated header: {} bytes",
                bytes.len()
            )));
        }
        let (header, body) = bytes.split_at(HEADER_LEN);
        let magic = u32::from_le_bytes([header[0], header[1], header[2], header[3]]);
        if magic != SAVE_VERSION_MAGIC {
            return Err(PersistenceError::Decode(format!(
                "invalid save version: expected 0x{:08X}, got 0x{:08X}",
                SAVE_VERSION_MAGIC, magic
            )));
        }
        let body_len = u32::from_le_bytes([header[4], header[5], header[6], header[7]]) as usize;
        if body.len() != body_len {
            return Err(PersistenceError::Decode(format!(
                "expected {} body bytes, found {}",
                body_len,
                body.len()
            )));
        }
        postcard::from_bytes(body).map_err(|e| PersistenceError::Decode(e.to_string()))
    }
}

/// Storage for numbered save slots. Slot bounds are checked by the caller.
pub trait SaveStore {
    fn save(&mut self, slot: usize, snapshot: &SaveSnapshot) -> PersistenceResult<()>;

    /// `Ok(None)` for a slot that has never been written.
    fn load(&self, slot: usize) -> PersistenceResult<Option<SaveSnapshot>>;
}

/// One `slot-{n}.bin` file per slot under a directory.
#[derive(Debug, Clone)]
pub struct DirectorySaveStore {
    directory: PathBuf,
}

impl DirectorySaveStore {
    /// Use `directory` for save files, creating it if needed.
    pub fn new(directory: impl Into<PathBuf>) -> PersistenceResult<Self> {
        let directory = directory.into();
        fs::create_dir_all(&directory)
            .map_err(|e| PersistenceError::Io(format!("{}: {}", directory.display(), e)))?;
        Ok(Self { directory })
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    pub fn slot_path(&self, slot: usize) -> PathBuf {
        self.directory.join(format!("slot-{}.bin", slot))
    }
}

impl SaveStore for DirectorySaveStore {
    fn save(&mut self, slot: usize, snapshot: &SaveSnapshot) -> PersistenceResult<()> {
        let path = self.slot_path(slot);
        let bytes = snapshot.to_bytes()?;
        fs::write(&path, &bytes)
            .map_err(|e| PersistenceError::Io(format!("{}: {}", path.display(), e)))?;
        log::info!("Saved slot {} ({} bytes) to {}", slot, bytes.len(), path.display());
        Ok(())
    }

    fn load(&self, slot: usize) -> PersistenceResult<Option<SaveSnapshot>> {
        let path = self.slot_path(slot);
        if !path.exists() {
            return Ok(None);
        }
        let bytes =
            fs::read(&path).map_err(|e| PersistenceError::Io(format!("{}: {}", path.display(), e)))?;
        let snapshot = SaveSnapshot::from_bytes(&bytes)?;
        log::info!("Loaded slot {} from {}", slot, path.display());
        Ok(Some(snapshot))
    }
}

/// Keeps encoded snapshots in memory.
#[derive(Debug, Clone, Default)]
pub struct MemorySaveStore {
    slots: HashMap<usize, Vec<u8>>,
}

impl MemorySaveStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SaveStore for MemorySaveStore {
    fn save(&mut self, slot: usize, snapshot: &SaveSnapshot) -> PersistenceResult<()> {
        self.slots.insert(slot, snapshot.to_bytes()?);
        Ok(())
    }

    fn load(&self, slot: usize) -> PersistenceResult<Option<SaveSnapshot>> {
        self.slots
            .get(&slot)
            .map(|bytes| SaveSnapshot::from_bytes(bytes))
            .transpose()
    }
}
