//! # petio-asset — Signature Asset Orchestration
//!
//! Composes the codec, cipher, verifier, key store, and clients into the
//! flows the application actually runs:
//!
//! - [`retriever`] — fetch → verify → classify → decrypt for a single
//!   pointer.
//! - [`publish`] — the sealed upload path: fresh key material, ciphertext
//!   digest, pointer write, key store entry.
//! - [`export`] — campaign-wide signature export with bounded concurrency
//!   and row-level failure isolation.
//! - [`provenance`] — locating the transaction that produced a pointer.
//! - [`versions`] — paging an owner's version history out of the profile
//!   contract.
//!
//! Retrieval has no side effects beyond the gateway fetch: pointers and
//! key material are never mutated, so concurrent retrievals of different
//! pointers need no coordination and cancellation leaves no partial state.

pub mod classify;
pub mod export;
pub mod provenance;
pub mod publish;
pub mod retriever;
pub mod versions;

// Re-export primary types.
pub use classify::{classify, Classification};
pub use export::{export_campaign, ExportError, ExportOptions, ExportOutcome, ExportRow};
pub use provenance::find_signature_provenance;
pub use publish::{publish, seal, PublishError, SealedAsset};
pub use retriever::{AssetRetriever, RetrieveError, RetrievedAsset};
pub use versions::load_version_history;
