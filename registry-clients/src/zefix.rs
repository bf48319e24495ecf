//! Zefix, the Swiss central business name index

use crate::http::{build_client, decode, join_url, success_body};
use crate::{config::RegistryConfig, Result};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info};

const API: &str = "Zefix";

/// One company hit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanySearchResult {
    /// Registered name
    pub name: String,
    /// Federal commercial registry id
    pub ehraid: i64,
    /// Raw UID (`CHE123456789`)
    pub uid: String,
    /// Display UID (`CHE-123.456.789`)
    pub uid_formatted: Option<String>,
    /// Legacy CH-id
    pub chid: Option<String>,
    /// Display CH-id
    pub chid_formatted: Option<String>,
    /// Municipality id of the legal seat
    pub legal_seat_id: i64,
    /// Legal seat
    pub legal_seat: String,
    /// Cantonal registry office id
    pub register_office_id: i64,
    /// Legal form id
    pub legal_form_id: i64,
    /// `EXISTIEREND`, `GELOESCHT`, ...
    pub status: String,
    /// Audit authority id
    pub rab_id: i64,
    /// Date of the last SHAB publication
    pub shab_date: String,
    /// Deletion date for removed companies
    pub delete_date: Option<String>,
    /// Link to the cantonal excerpt
    pub cantonal_excerpt_web: Option<String>,
}

/// One page of company hits
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanySearchResponse {
    /// Hits on this page
    pub list: Vec<CompanySearchResult>,
    /// Page offset
    pub offset: u32,
    /// Page size
    pub max_entries: u32,
    /// More pages follow
    pub has_more_results: bool,
    /// Last valid offset
    pub max_offset: u32,
}

/// Search parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchOptions {
    /// Result language (`en`, `de`, `fr`, `it`)
    pub language: String,
    /// Page size
    pub max_entries: u32,
    /// Page offset
    pub offset: u32,
    /// Include deleted companies
    pub include_deleted: bool,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            language: "en".to_string(),
            max_entries: 30,
            offset: 0,
            include_deleted: true,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SearchRequest<'a> {
    language_key: &'a str,
    max_entries: u32,
    offset: u32,
    name: &'a str,
    deleted_firms: bool,
}

/// Decode a `firm/search.json` body
pub fn parse_company_search(body: &[u8]) -> Result<CompanySearchResponse> {
    decode(API, body)
}

/// Zefix REST client
#[derive(Debug, Clone)]
pub struct ZefixClient {
    client: Client,
    base_url: String,
}

impl ZefixClient {
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
            config.zefix_base_url.clone(),
            Duration::from_secs(config.request_timeout_secs),
        )
    }

    /// Search companies by name
    pub async fn search(&self, name: &str, options: &SearchOptions) -> Result<CompanySearchResponse> {
        info!("Searching Zefix for {:?}", name);

        let request = SearchRequest {
            language_key: &options.language,
            max_entries: options.max_entries,
            offset: options.offset,
            name,
            deleted_firms: options.include_deleted,
        };

        let response = self
            .client
            .post(join_url(&self.base_url, "firm/search.json"))
            .json(&request)
            .send()
            .await?;

        let body = success_body(API, "Company search", response).await?;
        let page = parse_company_search(&body)?;
        debug!("Zefix returned {} companies", page.list.len());
        Ok(page)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    const PAGE: &str = r#"{
        "list": [{
            "name": "Test Company AG",
            "ehraid": 1234567,
            "uid": "CHE123456789",
            "uidFormatted": "CHE-123.456.789",
            "chid": "CH02030001234",
            "chidFormatted": "CH-020.3.000.123-4",
            "legalSeatId": 261,
            "legalSeat": "Zürich",
            "registerOfficeId": 20,
            "legalFormId": 3,
            "status": "EXISTIEREND",
            "rabId": 0,
            "shabDate": "2023-04-12",
            "deleteDate": null,
            "cantonalExcerptWeb": "https://zh.chregister.ch/cr-portal/auszug/auszug.xhtml?uid=CHE-123.456.789"
        }],
        "offset": 0,
        "maxEntries": 5,
        "hasMoreResults": true,
        "maxOffset": 12
    }"#;

    #[test]
    fn test_parse_company_search() {
        let page = parse_company_search(PAGE.as_bytes()).unwrap();
        assert_eq!(page.list.len(), 1);
        let company = &page.list[0];
        assert_eq!(company.name, "Test Company AG");
        assert_eq!(company.uid_formatted.as_deref(), Some("CHE-123.456.789"));
        assert_eq!(company.legal_seat, "Zürich");
        assert!(company.delete_date.is_none());
        assert!(page.has_more_results);
        assert_eq!(page.max_offset, 12);
    }

    #[test]
    fn test_missing_field_is_schema_error() {
        let err = parse_company_search(br#"{"list": [], "offset": 0}"#).unwrap_err();
        assert!(matches!(err, Error::Schema { api: "Zefix", .. }));
    }

    #[test]
    fn test_request_body_names() {
        let request = SearchRequest {
            language_key: "de",
            max_entries: 5,
            offset: 10,
            name: "Muster AG",
            deleted_firms: false,
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "languageKey": "de",
                "maxEntries": 5,
                "offset": 10,
                "name": "Muster AG",
                "deletedFirms": false
            })
        );
    }
}
