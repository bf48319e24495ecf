//! Registry Clients
//!
//! Typed clients for the public Swiss registries consulted during KYC review.
//!
//! # Registries
//!
//! - **Zefix**: central business name index (company search)
//! - **FINMA**: register of supervised institutions and insurance intermediaries
//! - **SHAB**: Swiss Official Gazette of Commerce (publications)

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, unused_qualifications)]
//!
//! Every response body goes through a `parse_*` function; a body of the
//! wrong shape is an [`Error::Schema`], never a partially filled record.

pub mod config;
pub mod error;
pub mod finma;
mod http;
pub mod shab;
pub mod zefix;

pub use config::RegistryConfig;
pub use error::{Error, Result};
pub use finma::{parse_finma_search, FinmaClient, FinmaSearchResponse, FinmaSearchResult};
pub use shab::{
    parse_publication, parse_publication_page, Publication, PublicationPage, PublicationState,
    ShabClient, ShabQuery,
};
pub use zefix::{
    parse_company_search, CompanySearchResponse, CompanySearchResult, SearchOptions, ZefixClient,
};
