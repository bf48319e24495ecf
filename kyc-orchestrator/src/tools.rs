//! Tool surface for an agent or operator.
//!
//! Every tool returns the text shown to the caller and records a
//! [`PluginCall`](crate::call_log::PluginCall). Failures become text too;
//! a screening failure reads as an error, never as "No sanctions found".

use crate::{call_log::PluginType, context::KycContext};
use kyc_ledger::{Account, OwnerType};
use registry_clients::{shab::DEFAULT_RUBRICS, PublicationState, SearchOptions, ShabQuery};
use rust_decimal::Decimal;
use serde_json::{json, Value};
use tracing::warn;

/// Rubric searched when none is given (commercial register notices)
pub const DEFAULT_RUBRIC: &str = "HR";

/// Minimum company name length for a registry search
pub const MIN_COMPANY_QUERY_LEN: usize = 3;

/// Hits shown per registry search
pub const MAX_RESULTS: u32 = 5;

fn finish(ctx: &KycContext, plugin: PluginType, function: &str, input: Value, output: String) -> String {
    ctx.metrics().record_tool_call(plugin.as_str());
    ctx.calls().record(plugin, function, input, &output);
    output
}

fn failed(ctx: &KycContext, plugin: PluginType, function: &str, err: &dyn std::fmt::Display) {
    warn!("{}.{} failed: {}", plugin, function, err);
    ctx.metrics().record_tool_error(plugin.as_str());
}

/// Ledger tools
#[derive(Clone)]
pub struct BankTools {
    ctx: KycContext,
}

impl BankTools {
    /// Tools over a context
    pub fn new(ctx: KycContext) -> Self {
        Self { ctx }
    }

    /// Open an account with a zero balance; `account_type` is
    /// `"company"` or anything else for an individual
    pub fn create_account(&self, owner_name: &str, account_type: &str, uid: &str) -> String {
        let uid_arg = (!uid.is_empty()).then(|| uid.to_string());
        let account = self.ctx.ledger().create_account(
            owner_name,
            OwnerType::from_label(account_type),
            Decimal::ZERO,
            uid_arg,
        );

        let mut output = format!(
            "Account created:\nID: {}\nOwner: {}\nType: {}",
            account.account_id, account.owner.name, account.owner.owner_type
        );
        if let Some(reason) = &account.freeze_reason {
            output.push_str(&format!("\nStatus: frozen ({})", reason));
        }

        finish(
            &self.ctx,
            PluginType::Bank,
            "create_account",
            json!({"owner_name": owner_name, "account_type": account_type, "uid": uid}),
            output,
        )
    }

    /// Account details
    pub fn get_account(&self, owner_name: &str) -> String {
        let output = match self.ctx.ledger().get_account(owner_name) {
            Some(account) => format!(
                "Account Details:\nOwner: {}\nType: {}\nStatus: {}\nBalance: {}",
                account.owner.name, account.owner.owner_type, account.status, account.balance
            ),
            None => format!("No account found for owner {}", owner_name),
        };

        finish(
            &self.ctx,
            PluginType::Bank,
            "get_account",
            json!({"owner_name": owner_name}),
            output,
        )
    }

    /// Freeze an account
    pub fn freeze_account(&self, owner_name: &str, reason: &str) -> String {
        let output = if self.ctx.ledger().freeze_account(owner_name, reason) {
            format!("Account frozen for {}: {}", owner_name, reason)
        } else {
            format!("No account found for {}", owner_name)
        };

        finish(
            &self.ctx,
            PluginType::Bank,
            "freeze_account",
            json!({"owner_name": owner_name, "reason": reason}),
            output,
        )
    }

    /// Unfreeze an account
    pub fn unfreeze_account(&self, owner_name: &str) -> String {
        let output = if self.ctx.ledger().unfreeze_account(owner_name) {
            format!("Account unfrozen for {}", owner_name)
        } else {
            format!("No account found for {}", owner_name)
        };

        finish(
            &self.ctx,
            PluginType::Bank,
            "unfreeze_account",
            json!({"owner_name": owner_name}),
            output,
        )
    }

    /// One line per account, in creation order
    pub fn list_accounts(&self) -> String {
        let accounts = self.ctx.ledger().list_accounts();
        let output = if accounts.is_empty() {
            "No accounts".to_string()
        } else {
            let mut lines = vec![format!("{} accounts:", accounts.len())];
            lines.extend(accounts.iter().map(account_line));
            lines.join("\n")
        };

        finish(&self.ctx, PluginType::Bank, "list_accounts", json!({}), output)
    }
}

fn account_line(account: &Account) -> String {
    let mut line = format!(
        "- {} ({}): {}, balance {}",
        account.owner.name, account.owner.owner_type, account.status, account.balance
    );
    if let Some(reason) = &account.freeze_reason {
        line.push_str(&format!(" [{}]", reason));
    }
    line
}

/// Sanctions screening tools
#[derive(Clone)]
pub struct SanctionsTools {
    ctx: KycContext,
}

impl SanctionsTools {
    /// Tools over a context
    pub fn new(ctx: KycContext) -> Self {
        Self { ctx }
    }

    /// Screen a person or entity name
    pub async fn check_sanctions(&self, name: &str) -> String {
        let output = match self.ctx.matcher().search(name).await {
            Ok(matches) if matches.is_empty() => "No sanctions found".to_string(),
            Ok(matches) => {
                self.ctx.metrics().record_sanctions_hit();
                let lines: Vec<String> = matches.iter().map(|m| format!("- {}", m)).collect();
                format!("SANCTIONS FOUND:\n{}", lines.join("\n"))
            }
            Err(e) => {
                failed(&self.ctx, PluginType::Seco, "check_sanctions", &e);
                format!("Error checking sanctions list: {}", e)
            }
        };

        finish(
            &self.ctx,
            PluginType::Seco,
            "check_sanctions",
            json!({"name": name}),
            output,
        )
    }
}

/// Public registry tools
#[derive(Clone)]
pub struct RegistryTools {
    ctx: KycContext,
}

impl RegistryTools {
    /// Tools over a context
    pub fn new(ctx: KycContext) -> Self {
        Self { ctx }
    }

    /// Search the commercial registry (Zefix)
    pub async fn search_companies(&self, name: &str, include_deleted: bool) -> String {
        let input = json!({"name": name, "include_deleted": include_deleted});

        if name.chars().count() < MIN_COMPANY_QUERY_LEN {
            let output = format!(
                "Error: Company name must be at least {} characters",
                MIN_COMPANY_QUERY_LEN
            );
            return finish(&self.ctx, PluginType::Zefix, "search_companies", input, output);
        }

        let options = SearchOptions {
            max_entries: MAX_RESULTS,
            include_deleted,
            ..SearchOptions::default()
        };

        let output = match self.ctx.zefix().search(name, &options).await {
            Ok(page) if page.list.is_empty() => "No matching companies found".to_string(),
            Ok(page) => {
                let separator = "-".repeat(40);
                let mut lines = vec!["Found companies:".to_string()];
                for company in &page.list {
                    lines.push(separator.clone());
                    lines.push(format!("Name: {}", company.name));
                    if let Some(uid) = &company.uid_formatted {
                        lines.push(format!("UID: {}", uid));
                    }
                    lines.push(format!("Status: {}", company.status));
                    lines.push(format!("Location: {}", company.legal_seat));
                    if let Some(link) = &company.cantonal_excerpt_web {
                        lines.push(format!("Details: {}", link));
                    }
                }
                if page.has_more_results {
                    lines.push(separator);
                    lines.push(format!(
                        "Note: Additional results available ({} total)",
                        page.max_offset
                    ));
                }
                lines.join("\n")
            }
            Err(e) => {
                failed(&self.ctx, PluginType::Zefix, "search_companies", &e);
                format!("Error searching company registry: {}", e)
            }
        };

        finish(&self.ctx, PluginType::Zefix, "search_companies", input, output)
    }

    /// Search the FINMA register of insurance intermediaries
    pub async fn search_intermediaries(&self, query: &str) -> String {
        let input = json!({"query": query});

        if query.trim().is_empty() {
            return finish(
                &self.ctx,
                PluginType::Finma,
                "search_intermediaries",
                input,
                "No search query provided".to_string(),
            );
        }

        let order = registry_clients::finma::DEFAULT_ORDER;
        let output = match self.ctx.finma().search(query, order, 0).await {
            Ok(page) if page.items.is_empty() => "No insurance intermediaries found".to_string(),
            Ok(page) => {
                let mut lines = Vec::new();
                for item in page.items.iter().take(MAX_RESULTS as usize) {
                    lines.push(format!("Name: {}", item.name));
                    lines.push(format!("Registration: {}", item.registration_number));
                    lines.push(format!("Location: {}", item.legal_seat));
                    lines.push("---".to_string());
                }
                lines.join("\n")
            }
            Err(e) => {
                failed(&self.ctx, PluginType::Finma, "search_intermediaries", &e);
                format!("Error searching FINMA registry: {}", e)
            }
        };

        finish(&self.ctx, PluginType::Finma, "search_intermediaries", input, output)
    }

    /// Search published gazette notices.
    ///
    /// `rubric` defaults to [`DEFAULT_RUBRIC`]; an empty rubric searches all.
    pub async fn search_publications(&self, keyword: &str, rubric: Option<&str>) -> String {
        let rubric = rubric.unwrap_or(DEFAULT_RUBRIC);
        let input = json!({"keyword": keyword, "rubric": rubric});

        if keyword.trim().is_empty() {
            return finish(
                &self.ctx,
                PluginType::Shab,
                "search_publications",
                input,
                "Error: Search keyword is required".to_string(),
            );
        }

        let rubrics = if rubric.is_empty() {
            DEFAULT_RUBRICS.iter().map(|r| r.to_string()).collect()
        } else {
            vec![rubric.to_string()]
        };
        let query = ShabQuery {
            page_size: MAX_RESULTS,
            publication_states: vec![PublicationState::Published],
            rubrics,
            ..ShabQuery::new(keyword)
        };

        let output = match self.ctx.shab().search(&query).await {
            Ok(page) if page.content.is_empty() => format!("No publications found for '{}'", keyword),
            Ok(page) => {
                let mut lines = vec![format!("Publications for '{}':", keyword)];
                for publication in &page.content {
                    let meta = &publication.meta;
                    lines.push("=".repeat(40));
                    lines.push(format!("Title: {}", meta.display_title().unwrap_or("No title")));
                    lines.push(format!("Date: {}", meta.publication_date.format("%Y-%m-%d")));
                    lines.push(format!("Type: {}", meta.rubric));
                    if let Some(place) = meta.municipalities.as_ref().and_then(|m| m.first()) {
                        lines.push(format!("Location: {} ({})", place.town, place.swiss_zip_code));
                    }
                    if let Some(uid) = meta.uid.as_ref().and_then(|u| u.first()) {
                        lines.push(format!("UID: {}", uid));
                    }
                }
                let shown = page.content.len() as u64;
                if page.total > shown {
                    lines.push(format!("\nNote: {} more results available", page.total - shown));
                }
                lines.join("\n")
            }
            Err(e) => {
                failed(&self.ctx, PluginType::Shab, "search_publications", &e);
                format!("Error searching publications: {}", e)
            }
        };

        finish(&self.ctx, PluginType::Shab, "search_publications", input, output)
    }
}
