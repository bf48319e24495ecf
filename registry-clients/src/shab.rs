//! SHAB, the Swiss Official Gazette of Commerce

use crate::http::{build_client, decode, join_url, success_body};
use crate::{config::RegistryConfig, Result};
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::time::Duration;
use tracing::{debug, info};

const API: &str = "SHAB";

/// Rubrics searched when none are given
pub const DEFAULT_RUBRICS: [&str; 16] = [
    "AB", "AW", "AZ", "BB", "BH", "EK", "ES", "FM", "HR", "KK", "LS", "NA", "SB", "SR", "UP", "UV",
];

/// Publication lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PublicationState {
    /// Live publication
    Published,
    /// Withdrawn publication
    Cancelled,
}

impl PublicationState {
    /// Wire name
    pub fn as_str(&self) -> &'static str {
        match self {
            PublicationState::Published => "PUBLISHED",
            PublicationState::Cancelled => "CANCELLED",
        }
    }
}

/// Cantonal registry office that issued a publication
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[allow(missing_docs)]
pub struct RegistrationOffice {
    pub id: String,
    pub display_name: String,
    pub street: String,
    pub street_number: String,
    pub swiss_zip_code: String,
    pub town: String,
    pub contains_post_office_box: bool,
    #[serde(default)]
    pub post_office_box: Option<Value>,
    #[serde(default)]
    pub municipality_id: Option<String>,
    #[serde(default)]
    pub uid: Option<String>,
}

/// Municipality a publication concerns
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[allow(missing_docs)]
pub struct Municipality {
    pub swiss_zip_code: u32,
    pub town: String,
    #[serde(default)]
    pub municipality_id: Option<String>,
}

/// Publication metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicationMeta {
    /// Publication UUID
    pub id: String,
    /// Created
    #[serde(with = "timestamp")]
    pub creation_date: DateTime<Utc>,
    /// Last updated
    #[serde(with = "timestamp")]
    pub update_date: DateTime<Utc>,
    /// Rubric code (`HR`, `KK`, ...)
    pub rubric: String,
    /// Sub-rubric code (`HR01`, ...)
    pub sub_rubric: String,
    /// Publication language
    pub language: String,
    /// Issuing office
    pub registration_office: RegistrationOffice,
    /// Publication number (`HR01-1005xxxxxx`)
    pub publication_number: String,
    /// `PUBLISHED` or `CANCELLED`
    pub publication_state: String,
    /// Publication date
    #[serde(with = "timestamp")]
    pub publication_date: DateTime<Utc>,
    /// Expiry date
    #[serde(default, with = "timestamp::option")]
    pub expiration_date: Option<DateTime<Utc>>,
    /// Tenant (`shab`, a cantonal gazette, ...)
    pub primary_tenant_code: String,
    /// Legal remedy text
    #[serde(default)]
    pub legal_remedy: Option<String>,
    /// Canton codes
    #[serde(default)]
    pub cantons: Vec<String>,
    /// Title per language
    #[serde(default)]
    pub title: BTreeMap<String, String>,
    /// Company UIDs concerned
    #[serde(default)]
    pub uid: Option<Vec<String>>,
    /// Municipalities concerned
    #[serde(default)]
    pub municipalities: Option<Vec<Municipality>>,
    /// Signed PDF available
    #[serde(default)]
    pub has_signed_pdf: Option<bool>,
}

impl PublicationMeta {
    /// English title, else German
    pub fn display_title(&self) -> Option<&str> {
        self.title
            .get("en")
            .or_else(|| self.title.get("de"))
            .map(String::as_str)
    }
}

/// Publication with optional content
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Publication {
    /// Metadata
    pub meta: PublicationMeta,
    /// Restricted metadata, usually absent
    #[serde(default)]
    pub private_meta: Option<Value>,
    /// Related links
    #[serde(default)]
    pub links: Vec<Value>,
    /// Attachments
    #[serde(default)]
    pub attachments: Vec<Value>,
    /// Content version
    #[serde(default)]
    pub version: Option<i64>,
    /// Structured content, present when requested
    #[serde(default)]
    pub content: Option<Value>,
    /// Has comments
    #[serde(default)]
    pub commented: bool,
}

/// Paging echo of a search
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageRequest {
    /// Sort orders applied
    #[serde(default)]
    pub sort_orders: Vec<Value>,
    /// Page number (0-based)
    pub page: u32,
    /// Page size
    pub size: u32,
}

/// One page of publications
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicationPage {
    /// Publications on this page
    pub content: Vec<Publication>,
    /// Total hits
    pub total: u64,
    /// Paging echo
    pub page_request: PageRequest,
}

/// Publication search parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShabQuery {
    /// Search keyword
    pub keyword: String,
    /// Page number (0-based)
    pub page: u32,
    /// Page size
    pub page_size: u32,
    /// Return structured content
    pub include_content: bool,
    /// States to include
    pub publication_states: Vec<PublicationState>,
    /// Rubrics to search
    pub rubrics: Vec<String>,
}

impl ShabQuery {
    /// Query with default paging, both states and all rubrics
    pub fn new(keyword: impl Into<String>) -> Self {
        Self {
            keyword: keyword.into(),
            page: 0,
            page_size: 100,
            include_content: false,
            publication_states: vec![PublicationState::Published, PublicationState::Cancelled],
            rubrics: DEFAULT_RUBRICS.iter().map(|r| r.to_string()).collect(),
        }
    }

    fn params(&self) -> Vec<(&'static str, String)> {
        let states: Vec<&str> = self.publication_states.iter().map(|s| s.as_str()).collect();
        vec![
            ("allowRubricSelection", "false".to_string()),
            ("includeContent", self.include_content.to_string()),
            ("keyword", self.keyword.clone()),
            ("pageRequest.page", self.page.to_string()),
            ("pageRequest.size", self.page_size.to_string()),
            ("publicationStates", states.join(",")),
            ("rubrics", self.rubrics.join(",")),
        ]
    }
}

/// Decode a `publications` search body
pub fn parse_publication_page(body: &[u8]) -> Result<PublicationPage> {
    decode(API, body)
}

/// Decode a `publications/{id}` body
pub fn parse_publication(body: &[u8]) -> Result<Publication> {
    decode(API, body)
}

/// SHAB publications client
#[derive(Debug, Clone)]
pub struct ShabClient {
    client: Client,
    base_url: String,
}

impl ShabClient {
    /// Client for an API root
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        Ok(Self {
            client: build_client(timeout)?,
            base_url: base_url.into(),
        })
    }

    /// Client configured from [`RegistryConfig`]
    pub fn from_config(config: &RegistryConfig) -> Result<Self> {
        Self::new(
            config.shab_base_url.clone(),
            Duration::from_secs(config.request_timeout_secs),
        )
    }

    /// Search publications
    pub async fn search(&self, query: &ShabQuery) -> Result<PublicationPage> {
        info!("Searching SHAB for {:?}", query.keyword);

        let response = self
            .client
            .get(join_url(&self.base_url, "publications"))
            .query(&query.params())
            .send()
            .await?;

        let body = success_body(API, "Publication search", response).await?;
        let page = parse_publication_page(&body)?;
        debug!("SHAB returned {} of {} publications", page.content.len(), page.total);
        Ok(page)
    }

    /// Fetch one publication; an unknown id is [`Error::NotFound`](crate::Error::NotFound)
    pub async fn get_publication(&self, id: &str) -> Result<Publication> {
        let response = self
            .client
            .get(join_url(&self.base_url, &format!("publications/{}", id)))
            .send()
            .await?;

        let body = success_body(API, &format!("Publication {}", id), response).await?;
        parse_publication(&body)
    }
}

/// SHAB timestamps come with or without an offset; naive ones are UTC.
mod timestamp {
    use chrono::{DateTime, NaiveDateTime, Utc};
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn parse(s: &str) -> Option<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(s)
            .map(|dt| dt.with_timezone(&Utc))
            .ok()
            .or_else(|| {
                NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f")
                    .ok()
                    .map(|naive| naive.and_utc())
            })
    }

    pub fn serialize<S: Serializer>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.to_rfc3339())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let s = String::deserialize(deserializer)?;
        parse(&s).ok_or_else(|| de::Error::custom(format!("invalid timestamp {:?}", s)))
    }

    pub mod option {
        use chrono::{DateTime, Utc};
        use serde::{de, Deserialize, Deserializer, Serializer};

        pub fn serialize<S: Serializer>(
            value: &Option<DateTime<Utc>>,
            serializer: S,
        ) -> Result<S::Ok, S::Error> {
            match value {
                Some(dt) => serializer.serialize_some(&dt.to_rfc3339()),
                None => serializer.serialize_none(),
            }
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<Option<DateTime<Utc>>, D::Error> {
            match Option::<String>::deserialize(deserializer)? {
                None => Ok(None),
                Some(s) if s.is_empty() => Ok(None),
                Some(s) => super::parse(&s)
                    .map(Some)
                    .ok_or_else(|| de::Error::custom(format!("invalid timestamp {:?}", s))),
            }
        }
    }
}
