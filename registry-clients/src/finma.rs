//! FINMA register of supervised institutions and insurance intermediaries

use crate::http::{build_client, decode, join_url, success_body};
use crate::{config::RegistryConfig, Result};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info};

const API: &str = "FINMA";

/// Data source id of the intermediary register search
pub const SEARCH_DS: &str = "{33E1F240-35A3-46B2-ADC3-61F936C7E186}";

/// Default sort order of the register search
pub const DEFAULT_ORDER: u32 = 4;

/// One register entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct FinmaSearchResult {
    /// Register number
    pub registration_number: String,
    /// Registered name
    pub name: String,
    /// Legal seat
    pub legal_seat: String,
    /// Entry id
    pub id: String,
    /// Detail page link
    pub link: String,
    /// Display title
    #[serde(default)]
    pub title: Option<String>,
    /// Register category
    #[serde(default)]
    pub category: Option<String>,
    /// Last change (epoch)
    #[serde(default)]
    pub timestamp: i64,
    /// UI tab
    #[serde(default = "default_tab")]
    pub tab: String,
    /// UI panel
    #[serde(default = "default_panel")]
    pub panel: String,
}

fn default_tab() -> String {
    "tab1".to_string()
}

fn default_panel() -> String {
    "panel1".to_string()
}

/// Facet value with its hit count
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FacetValue {
    /// Value id
    pub id: String,
    /// Display name
    #[serde(rename = "Name")]
    pub name: String,
    /// Owning facet category
    pub category: String,
    /// Hits carrying this value
    #[serde(rename = "AggregateCount")]
    pub aggregate_count: u64,
    /// Currently selected as a filter
    #[serde(default)]
    pub selected: bool,
}

/// Search facet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Facet {
    /// Facet name
    pub name: String,
    /// Facet values
    pub values: Vec<FacetValue>,
}

/// Bankruptcy counters attached to every response
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BankruptcyInfo {
    /// Finished proceedings
    #[serde(rename = "Finishedcount", default)]
    pub finished_count: u64,
    /// Pending proceedings
    #[serde(rename = "Pendingcount", default)]
    pub pending_count: u64,
}

/// One page of register hits
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct FinmaSearchResponse {
    /// Hits on this page
    pub items: Vec<FinmaSearchResult>,
    /// Total hits
    pub count: u64,
    /// Echoed query
    #[serde(rename = "Searchstring")]
    pub search_string: String,
    /// Facets
    pub facets: Vec<Facet>,
    /// Next page, if any
    #[serde(default)]
    pub next_page_link: Option<String>,
    /// Last page, if any
    #[serde(default)]
    pub last_page_link: Option<String>,
    /// Page size
    pub results_per_page: u32,
    /// Page offset
    pub skip: u32,
    /// Hit cap
    pub max_result_count: u64,
    /// Bankruptcy counters
    pub bankruptcy: BankruptcyInfo,
}

/// Decode an `api/search/getresult` body
pub fn parse_finma_search(body: &[u8]) -> Result<FinmaSearchResponse> {
    decode(API, body)
}

fn search_form(query: &str, order: u32, skip: u32) -> Vec<(&'static str, String)> {
    let mut form = vec![
        ("ds", SEARCH_DS.to_string()),
        ("query", query.to_string()),
        ("Order", order.to_string()),
    ];
    if skip > 0 {
        form.push(("Skip", skip.to_string()));
    }
    form
}

/// FINMA register search client
#[derive(Debug, Clone)]
pub struct FinmaClient {
    client: Client,
    base_url: String,
}

impl FinmaClient {
    /// Client for a site root
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        Ok(Self {
            client: build_client(timeout)?,
            base_url: base_url.into(),
        })
    }

    /// Client configured from [`RegistryConfig`]
    pub fn from_config(config: &RegistryConfig) -> Result<Self> {
        Self::new(
            config.finma_base_url.clone(),
            Duration::from_secs(config.request_timeout_secs),
        )
    }

    /// Search the register; `skip` pages through the hits
    pub async fn search(&self, query: &str, order: u32, skip: u32) -> Result<FinmaSearchResponse> {
        info!("Searching FINMA register for {:?}", query);

        let response = self
            .client
            .post(join_url(&self.base_url, "en/api/search/getresult"))
            .form(&search_form(query, order, skip))
            .send()
            .await?;

        let body = success_body(API, "Register search", response).await?;
        let page = parse_finma_search(&body)?;
        debug!("FINMA returned {} of {} entries", page.items.len(), page.count);
        Ok(page)
    }
}
