//! # petio-crypto — Cryptographic Primitives for the Signature-Asset Core
//!
//! This crate provides the cryptographic building blocks used by the
//! retrieval and publish paths:
//!
//! - **Identifier codec** between the object store's external base64url
//!   string form and the fixed 32-byte binary form recorded on-chain.
//! - **AES-256-GCM** asset encryption with per-upload key and nonce
//!   generation.
//! - **Integrity verification** — Keccak-256 recomputation against the
//!   pointer's on-chain digest, reported as advisory status.
//! - **Key store** — device-scoped persistence of key material per
//!   signature version, file-backed or in-memory.
//!
//! ## Nonce Discipline
//!
//! A fresh key and nonce pair is generated for every upload and never
//! reused across versions. Nothing in this crate caches or re-derives
//! nonces; [`aead::generate_key()`] and [`aead::generate_nonce()`] are the
//! only sources.

pub mod aead;
pub mod codec;
pub mod error;
pub mod keystore;
pub mod verify;

// Re-export primary types.
pub use aead::{decrypt, encrypt, generate_key, generate_nonce, AssetNonce, VersionKey};
pub use codec::{decode_content_id, encode_content_id};
pub use error::CryptoError;
pub use keystore::{FileKeyStore, KeyMaterial, KeyStore, MemoryKeyStore};
pub use verify::{hash, verify, VerifyStatus};
