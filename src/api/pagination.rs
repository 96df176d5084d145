//! Sequential page traversal
//!
//! Pages are requested one at a time with an incrementing `page` counter.
//! Traversal stops on a missing continuation marker, an empty page, or the
//! page cap, whichever comes first.

use log::debug;
use serde_json::Value;

use crate::api::classify::classify_unparseable;
use crate::api::client::{ApiClient, Params};
use crate::config::api;
use crate::error::ClientResult;

/// One fetched batch of records
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    pub records: Vec<Value>,
    /// Provider token or flag signalling more data
    pub next: Option<Value>,
}

impl Page {
    /// Decode a page from a list response body.
    ///
    /// Accepts a bare array of records, or an object holding records under
    /// one of [`api::RECORD_KEYS`] and a marker under one of
    /// [`api::CONTINUATION_KEYS`].
    pub fn from_body(body: Value) -> ClientResult<Self> {
        match body {
            Value::Array(records) => Self::checked(records, None, "array"),
            Value::Object(mut map) => {
                let records = api::RECORD_KEYS
                    .iter()
                    .find_map(|key| map.remove(*key))
                    .ok_or_else(|| {
                        unexpected(&Value::Object(map.clone()), "no records array in page")
                    })?;
                let records = match records {
                    Value::Array(records) => records,
                    other => return Err(unexpected(&other, "page records are not an array")),
                };
                let next = api::CONTINUATION_KEYS
                    .iter()
                    .find_map(|key| map.remove(*key))
                    .filter(is_continuation);
                Self::checked(records, next, "envelope")
            }
            other => Err(unexpected(&other, "page body is neither an array nor an object")),
        }
    }

    fn checked(records: Vec<Value>, next: Option<Value>, shape: &str) -> ClientResult<Self> {
        if let Some(bad) = records.iter().find(|r| !r.is_object()) {
            return Err(unexpected(bad, &format!("non-object record in {}", shape)));
        }
        Ok(Self { records, next })
    }

    /// Whether the provider signalled another page
    pub fn has_more(&self) -> bool {
        self.next.is_some()
    }
}

/// Null, `false` and the empty string all mean "no more pages"
fn is_continuation(marker: &Value) -> bool {
    match marker {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::String(s) => !s.is_empty(),
        _ => true,
    }
}

fn unexpected(body: &Value, reason: &str) -> crate::error::ClientError {
    classify_unparseable(&body.to_string(), reason)
}

/// Base params with page counter and size merged in, replacing same-named keys
fn page_params(base: &Params, page: u32, page_size: u32) -> Vec<(String, String)> {
    let mut params: Vec<(String, String)> = base
        .iter()
        .filter(|(k, _)| k != api::PAGE_PARAM && k != api::PAGE_SIZE_PARAM)
        .cloned()
        .collect();
    params.push((api::PAGE_PARAM.to_string(), page.to_string()));
    params.push((api::PAGE_SIZE_PARAM.to_string(), page_size.to_string()));
    params
}

impl ApiClient {
    /// Fetch and decode a single page
    pub async fn read_page(
        &self,
        endpoint: &str,
        params: &Params,
        page: u32,
        page_size: u32,
    ) -> ClientResult<Page> {
        let body = self
            .read(endpoint, &page_params(params, page, page_size))
            .await?;
        Page::from_body(body)
    }

    /// Collect every record of a paged endpoint, fetching at most `max_pages` pages.
    ///
    /// Records keep page order, then within-page order. The first failing page
    /// aborts the traversal; records from earlier pages are dropped.
    pub async fn collect_all(
        &self,
        endpoint: &str,
        params: &Params,
        page_size: u32,
        max_pages: u32,
    ) -> ClientResult<Vec<Value>> {
        let mut all_records = Vec::new();

        for page_num in 1..=max_pages {
            let page = self.read_page(endpoint, params, page_num, page_size).await?;
            let count = page.records.len();
            let has_more = page.has_more();
            all_records.extend(page.records);

            debug!(
                "Page {} of {} returned {} records (more: {})",
                page_num, endpoint, count, has_more
            );

            if count == 0 || !has_more {
                break;
            }
            if page_num == max_pages {
                debug!(
                    "Stopping {} at page cap {} with more pages available",
                    endpoint, max_pages
                );
            }
        }

        debug!("Fetched {} total records for {}", all_records.len(), endpoint);
        Ok(all_records)
    }
}
