//! Sanctions Screening
//!
//! Fuzzy name matching against the SECO sanctions list.
//!
//! # Pipeline
//!
//! 1. **Snapshot**: the list is fetched from a [`SnapshotSource`] and cached
//!    on disk; a [`FreshnessPolicy`] decides when the cache is stale (24h)
//! 2. **Normalization**: names are lowercased, punctuation-split and
//!    whitespace-collapsed
//! 3. **Variants**: original order, reversed order, first+last in both orders
//! 4. **Matching**: exact variant hit, then Indel ratio, then partial ratio
//!    for entries with more than two tokens
//!
//! A failed list load is an [`Error`], never a "not sanctioned" answer.
//!
//! # Example
//!
//! ```no_run
//! use sanctions_screening::{SanctionsConfig, SanctionsMatcher};
//!
//! #[tokio::main]
//! async fn main() -> sanctions_screening::Result<()> {
//!     let matcher = SanctionsMatcher::from_config(&SanctionsConfig::default())?;
//!     let hits = matcher.search("John Smith").await?;
//!     println!("{} matches", hits.len());
//!     Ok(())
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, unused_qualifications)]

pub mod cache;
pub mod config;
pub mod error;
pub mod freshness;
pub mod fuzzy;
pub mod matcher;
pub mod normalize;
pub mod snapshot;
pub mod types;

pub use cache::{CachedSnapshot, SnapshotCache};
pub use config::SanctionsConfig;
pub use error::{Error, Result};
pub use freshness::{FreshnessPolicy, MaxAgePolicy};
pub use fuzzy::{partial_ratio, ratio};
pub use matcher::{SanctionsList, SanctionsMatcher, DEFAULT_THRESHOLD};
pub use normalize::{name_variants, normalize};
pub use snapshot::{parse_snapshot, HttpSnapshotSource, SnapshotSource};
pub use types::SanctionsEntry;
