//! # petio-core — Foundational Types for the Petio Signature-Asset Core
//!
//! This crate provides the types shared by every layer of the workspace:
//!
//! - **Domain-primitive newtypes** for identifiers ([`OwnerAddress`],
//!   [`CampaignId`], [`VersionId`], [`TxHash`]) — you cannot pass a
//!   campaign id where a version id is expected.
//! - **Keccak-256 content digests** ([`ContentDigest`], [`keccak_digest()`])
//!   matching the on-chain hash so pointers and local recomputation agree
//!   bit-for-bit.
//! - **On-chain pointer records** ([`AssetPointer`], [`VersionHistory`])
//!   referencing off-chain signature assets and their encryption metadata.
//! - **Provenance types** ([`ProvenanceEvent`], [`SignatureRow`]) produced
//!   by event-log scans and campaign signature listings.
//!
//! Higher layers (`petio-crypto`, `petio-client`, `petio-asset`) build on
//! these types; this crate has no I/O and no async.

pub mod digest;
pub mod error;
pub mod event;
pub mod identity;
pub mod pointer;

// Re-export primary types.
pub use digest::{keccak_digest, ContentDigest};
pub use error::ValidationError;
pub use event::{ProvenanceEvent, SignatureRow};
pub use identity::{CampaignId, OwnerAddress, TxHash, VersionId};
pub use pointer::{AssetPointer, ContentId, EncryptionScheme, VersionHistory};
