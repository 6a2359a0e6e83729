//! # Device-Scoped Key Store
//!
//! Local persistence of key material per signature version, keyed by
//! `(owner, version)`. Key material is created at encryption time and
//! persists until explicitly overwritten or removed — overwriting an
//! entry makes the version it protected permanently undecryptable on this
//! device, so both are deliberate operations, never side effects.
//!
//! Key material never leaves the device: it is not part of the pointer
//! record and no API here transmits it.
//!
//! ## Concurrency
//!
//! Reads run concurrently. Writes are serialized per owner so a new
//! version's `put` cannot race a concurrent read of the previous
//! version's material.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use parking_lot::{Mutex, RwLock};
use petio_core::{OwnerAddress, VersionId};
use serde::{Deserialize, Serialize};

use crate::aead::{AssetNonce, VersionKey};
use crate::error::CryptoError;

/// Key and nonce for one encrypted signature version.
///
/// The key zeroizes on drop; `Debug` never prints key bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyMaterial {
    /// 256-bit AES key for this version.
    pub key: VersionKey,
    /// 96-bit nonce the version was encrypted with.
    pub nonce: AssetNonce,
}

/// On-disk representation: base64 strings, matching the key export format
/// the browser client used.
#[derive(Serialize, Deserialize)]
struct KeyMaterialWire {
    key: String,
    nonce: String,
}

impl Serialize for KeyMaterial {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        KeyMaterialWire {
            key: STANDARD.encode(self.key.as_bytes()),
            nonce: STANDARD.encode(self.nonce.as_bytes()),
        }
        .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for KeyMaterial {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let wire = KeyMaterialWire::deserialize(deserializer)?;
        let key_bytes = STANDARD
            .decode(&wire.key)
            .map_err(serde::de::Error::custom)?;
        let nonce_bytes = STANDARD
            .decode(&wire.nonce)
            .map_err(serde::de::Error::custom)?;
        Ok(KeyMaterial {
            key: VersionKey::from_slice(&key_bytes).map_err(serde::de::Error::custom)?,
            nonce: AssetNonce::from_slice(&nonce_bytes).map_err(serde::de::Error::custom)?,
        })
    }
}

/// Trait for key material storage backends.
///
/// Implementations MUST treat `put` on an existing entry as an explicit
/// overwrite requested by the caller, and MUST never transmit key
/// material off-device.
pub trait KeyStore: Send + Sync {
    /// Fetch the key material for an owner's version, if present.
    fn get(
        &self,
        owner: &OwnerAddress,
        version: VersionId,
    ) -> Result<Option<KeyMaterial>, CryptoError>;

    /// Store key material for an owner's version.
    ///
    /// Replaces any existing entry for that version — after which the
    /// bytes the old material protected cannot be decrypted on this
    /// device again.
    fn put(
        &self,
        owner: &OwnerAddress,
        version: VersionId,
        material: KeyMaterial,
    ) -> Result<(), CryptoError>;

    /// Remove the key material for an owner's version, if present.
    fn remove(&self, owner: &OwnerAddress, version: VersionId) -> Result<(), CryptoError>;
}

// ---------------------------------------------------------------------------
// MemoryKeyStore
// ---------------------------------------------------------------------------

/// HashMap-backed key store for tests and ephemeral sessions.
/// Material is lost when the process exits.
#[derive(Default)]
pub struct MemoryKeyStore {
    entries: RwLock<HashMap<(OwnerAddress, VersionId), KeyMaterial>>,
}

impl MemoryKeyStore {
    /// Create an empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyStore for MemoryKeyStore {
    fn get(
        &self,
        owner: &OwnerAddress,
        version: VersionId,
    ) -> Result<Option<KeyMaterial>, CryptoError> {
        Ok(self.entries.read().get(&(*owner, version)).cloned())
    }

    fn put(
        &self,
        owner: &OwnerAddress,
        version: VersionId,
        material: KeyMaterial,
    ) -> Result<(), CryptoError> {
        self.entries.write().insert((*owner, version), material);
        Ok(())
    }

    fn remove(&self, owner: &OwnerAddress, version: VersionId) -> Result<(), CryptoError> {
        self.entries.write().remove(&(*owner, version));
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// FileKeyStore
// ---------------------------------------------------------------------------

/// File-backed key store rooted at a device-local directory.
///
/// Layout: `{base_dir}/{owner}/keys.json`, one JSON document per owner
/// mapping version ids to key material. Files are replaced atomically via
/// a temp-file rename, so a reader never observes a partial write.
pub struct FileKeyStore {
    base_dir: PathBuf,
    write_locks: Mutex<HashMap<OwnerAddress, Arc<Mutex<()>>>>,
}

impl FileKeyStore {
    /// Create a store rooted at the given directory.
    ///
    /// The directory does not need to exist yet — it is created on the
    /// first `put`.
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
            write_locks: Mutex::new(HashMap::new()),
        }
    }

    /// Return the base directory path.
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    fn owner_file(&self, owner: &OwnerAddress) -> PathBuf {
        self.base_dir.join(owner.to_string()).join("keys.json")
    }

    fn owner_lock(&self, owner: &OwnerAddress) -> Arc<Mutex<()>> {
        self.write_locks
            .lock()
            .entry(*owner)
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }

    fn load(&self, owner: &OwnerAddress) -> Result<HashMap<String, KeyMaterial>, CryptoError> {
        let path = self.owner_file(owner);
        if !path.exists() {
            return Ok(HashMap::new());
        }
        let bytes = std::fs::read(&path)?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    fn store(
        &self,
        owner: &OwnerAddress,
        entries: &HashMap<String, KeyMaterial>,
    ) -> Result<(), CryptoError> {
        let path = self.owner_file(owner);
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir)?;
        }
        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, serde_json::to_vec_pretty(entries)?)?;
        std::fs::rename(&tmp, &path)?;
        Ok(())
    }
}

impl KeyStore for FileKeyStore {
    fn get(
        &self,
        owner: &OwnerAddress,
        version: VersionId,
    ) -> Result<Option<KeyMaterial>, CryptoError> {
        Ok(self.load(owner)?.remove(&version.value().to_string()))
    }

    fn put(
        &self,
        owner: &OwnerAddress,
        version: VersionId,
        material: KeyMaterial,
    ) -> Result<(), CryptoError> {
        let lock = self.owner_lock(owner);
        let _guard = lock.lock();
        let mut entries = self.load(owner)?;
        entries.insert(version.value().to_string(), material);
        self.store(owner, &entries)
    }

    fn remove(&self, owner: &OwnerAddress, version: VersionId) -> Result<(), CryptoError> {
        let lock = self.owner_lock(owner);
        let _guard = lock.lock();
        let mut entries = self.load(owner)?;
        if entries.remove(&version.value().to_string()).is_some() {
            self.store(owner, &entries)?;
        }
        Ok(())
    }
}
