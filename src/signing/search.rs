use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::models::Company;

/// Case-insensitive substring match on the company name; empty text keeps everything.
pub fn filter_companies(companies: &[Company], text: &str) -> Vec<Company> {
    if text.is_empty() {
        return companies.to_vec();
    }
    let needle = text.to_lowercase();
    companies
        .iter()
        .filter(|c| c.company_name.to_lowercase().contains(&needle))
        .cloned()
        .collect()
}

/// One applied filter: the query it ran with and the matching companies.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterResult {
    pub query: String,
    pub companies: Vec<Company>,
}

/// Filters the company list once typing has paused for `quiet` time.
///
/// At most one timer is pending; every new query aborts it. Must be used
/// from within a tokio runtime.
pub struct DebouncedSearchFilter {
    companies: Arc<Vec<Company>>,
    quiet: Duration,
    pending: Option<JoinHandle<()>>,
    results: mpsc::UnboundedSender<FilterResult>,
}

impl DebouncedSearchFilter {
    pub fn new(
        companies: Vec<Company>,
        quiet: Duration,
    ) -> (Self, mpsc::UnboundedReceiver<FilterResult>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let filter = Self {
            companies: Arc::new(companies),
            quiet,
            pending: None,
            results: tx,
        };
        (filter, rx)
    }

    pub fn on_query_change(&mut self, text: impl Into<String>) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
        let query = text.into();
        let companies = Arc::clone(&self.companies);
        let results = self.results.clone();
        let quiet = self.quiet;
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(quiet).await;
            let matched = filter_companies(&companies, &query);
            log::debug!("Company search '{}' matched {} of {}", query, matched.len(), companies.len());
            let _ = results.send(FilterResult { query, companies: matched });
        }));
    }

    pub fn has_pending(&self) -> bool {
        self.pending.as_ref().is_some_and(|h| !h.is_finished())
    }

    pub fn companies(&self) -> &[Company] {
        &self.companies
    }
}

impl Drop for DebouncedSearchFilter {
    fn drop(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }
}
