//! Paginated transaction feed
//!
//! Accumulates cursor-paginated pages for one filter set. Every request gets a
//! ticket from a counter that never resets; only the reply carrying the most
//! recently issued ticket may touch the list, regardless of arrival order.
//!
//! Pages are appended as received. Overlapping pages would show duplicate
//! rows; the server is expected to return disjoint pages.

use crate::api::{BudgetClient, Transport};
use crate::error::{DashError, DashResult};
use crate::models::{TenantId, Transaction, TransactionFilters, TransactionId, TransactionPage};

/// Identity of a feed request
pub type Ticket = u64;

/// What the caller must fetch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    pub ticket: Ticket,
    pub filters: TransactionFilters,
    pub cursor: Option<String>,
}

impl PageRequest {
    pub fn is_first_page(&self) -> bool {
        self.cursor.is_none()
    }
}

/// Result of feeding a reply back into the feed
#[derive(Debug)]
pub enum ApplyOutcome {
    /// Page appended; carries the number of new rows
    Applied(usize),
    /// Reply belonged to a superseded request and was dropped
    Stale,
    /// The request failed; accumulated rows are kept
    Failed(DashError),
}

#[derive(Debug, Clone)]
pub struct TransactionFeed {
    filters: TransactionFilters,
    items: Vec<Transaction>,
    cursor: Option<String>,
    /// At least one page has arrived for the current filters
    loaded: bool,
    pending: Option<PageRequest>,
    last_ticket: Ticket,
    error: Option<String>,
}

impl TransactionFeed {
    pub fn new(filters: TransactionFilters) -> Self {
        Self {
            filters,
            items: Vec::new(),
            cursor: None,
            loaded: false,
            pending: None,
            last_ticket: 0,
            error: None,
        }
    }

    pub fn filters(&self) -> &TransactionFilters {
        &self.filters
    }

    pub fn items(&self) -> &[Transaction] {
        &self.items
    }

    pub fn items_mut(&mut self) -> &mut [Transaction] {
        &mut self.items
    }

    pub fn get(&self, id: &TransactionId) -> Option<&Transaction> {
        self.items.iter().find(|t| &t.id == id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn cursor(&self) -> Option<&str> {
        self.cursor.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.pending.is_some()
    }

    /// Loading the first page for the current filters
    pub fn is_loading_first(&self) -> bool {
        self.pending.as_ref().is_some_and(PageRequest::is_first_page)
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// All pages received
    pub fn is_complete(&self) -> bool {
        self.loaded && self.cursor.is_none()
    }

    pub fn has_more(&self) -> bool {
        self.loaded && self.cursor.is_some()
    }

    /// Loaded, nothing pending, and the server returned no rows at all
    pub fn is_empty_result(&self) -> bool {
        self.loaded && self.pending.is_none() && self.items.is_empty()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn pending_ticket(&self) -> Option<Ticket> {
        self.pending.as_ref().map(|p| p.ticket)
    }

    fn issue(&mut self, cursor: Option<String>) -> PageRequest {
        self.last_ticket += 1;
        let request = PageRequest {
            ticket: self.last_ticket,
            filters: self.filters.clone(),
            cursor,
        };
        self.pending = Some(request.clone());
        request
    }

    fn reset(&mut self) {
        self.items.clear();
        self.cursor = None;
        self.loaded = false;
        self.error = None;
        self.pending = None;
    }

    /// Switch filters. A change discards all rows and requests page one.
    ///
    /// Returns `None` when the filters are unchanged and a load is already
    /// underway or done.
    pub fn set_filters(&mut self, filters: TransactionFilters) -> Option<PageRequest> {
        if filters == self.filters && (self.loaded || self.pending.is_some()) {
            return None;
        }
        self.filters = filters;
        Some(self.refresh())
    }

    /// Drop everything and request page one for the current filters
    pub fn refresh(&mut self) -> PageRequest {
        self.reset();
        self.issue(None)
    }

    /// Request the next page, if there is one and nothing is in flight
    pub fn load_more(&mut self) -> Option<PageRequest> {
        if self.pending.is_some() {
            return None;
        }
        if !self.loaded {
            return Some(self.issue(None));
        }
        let cursor = self.cursor.clone()?;
        Some(self.issue(Some(cursor)))
    }

    /// Feed a reply back. Only the latest issued ticket is accepted.
    pub fn apply(&mut self, ticket: Ticket, result: DashResult<TransactionPage>) -> ApplyOutcome {
        match &self.pending {
            Some(pending) if pending.ticket == ticket => {}
            _ => {
                log::debug!(
                    "Dropping stale transactions reply (ticket {}, latest {})",
                    ticket,
                    self.last_ticket
                );
                return ApplyOutcome::Stale;
            }
        }
        self.pending = None;

        match result {
            Ok(page) => {
                let added = page.items.len();
                self.items.extend(page.items);
                self.cursor = page.cursor;
                self.loaded = true;
                self.error = None;
                log::debug!(
                    "Applied page of {} transactions (total {}, more: {})",
                    added,
                    self.items.len(),
                    self.cursor.is_some()
                );
                ApplyOutcome::Applied(added)
            }
            Err(e) => {
                log::warn!("Failed to load transactions: {}", e);
                self.error = Some(e.to_string());
                ApplyOutcome::Failed(e)
            }
        }
    }

    /// Fetch pages synchronously until the cursor runs out
    ///
    /// Stops after `max_pages` pages when given. Returns the number of pages
    /// fetched.
    pub fn load_all<T: Transport>(
        &mut self,
        client: &BudgetClient<T>,
        tenant: &TenantId,
        max_pages: Option<usize>,
    ) -> DashResult<usize> {
        let mut fetched = 0;
        let mut next = if self.loaded {
            self.load_more()
        } else {
            Some(self.refresh())
        };

        while let Some(request) = next {
            if max_pages.is_some_and(|max| fetched >= max) {
                self.pending = None;
                break;
            }
            let result =
                client.transactions_page(tenant, &request.filters, request.cursor.as_deref());
            fetched += 1;
            if let ApplyOutcome::Failed(e) = self.apply(request.ticket, result) {
                return Err(e);
            }
            next = self.load_more();
        }

        Ok(fetched)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::testing::ScriptedTransport;
    use crate::models::{Money, ReviewPeriod};
    use serde_json::json;

    fn filters() -> TransactionFilters {
        TransactionFilters::for_period(ReviewPeriod::new(2025, 4).unwrap())
    }

    fn tx(id: &str) -> Transaction {
        Transaction {
            id: TransactionId::new(id),
            date: "2025-04-01".into(),
            description: Some(format!("txn {}", id)),
            amount: Money::from_units(-10),
            currency: "INR".into(),
            category: Some("Food".into()),
            sub_category: None,
            tagged_by: None,
            confidence: None,
        }
    }

    fn page(ids: &[&str], cursor: Option<&str>) -> TransactionPage {
        TransactionPage {
            items: ids.iter().map(|id| tx(id)).collect(),
            cursor: cursor.map(String::from),
        }
    }

    fn ids(feed: &TransactionFeed) -> Vec<&str> {
        feed.items().iter().map(|t| t.id.as_str()).collect()
    }

    #[test]
    fn test_pages_concatenate_in_request_order() {
        let mut feed = TransactionFeed::new(filters());
        let first = feed.refresh();
        assert!(first.is_first_page());
        feed.apply(first.ticket, Ok(page(&["a", "b"], Some("c1"))));

        let second = feed.load_more().unwrap();
        assert_eq!(second.cursor.as_deref(), Some("c1"));
        feed.apply(second.ticket, Ok(page(&["c"], Some("c2"))));

        let third = feed.load_more().unwrap();
        feed.apply(third.ticket, Ok(page(&["d"], None)));

        assert_eq!(ids(&feed), vec!["a", "b", "c", "d"]);
        assert!(feed.is_complete());
        assert!(feed.load_more().is_none());
    }

    #[test]
    fn test_filter_change_resets_before_first_page() {
        let mut feed = TransactionFeed::new(filters());
        let first = feed.refresh();
        feed.apply(first.ticket, Ok(page(&["a"], Some("c1"))));

        let narrowed = filters().with_category(Some("Travel".into()));
        let request = feed.set_filters(narrowed.clone()).unwrap();

        assert!(feed.is_empty());
        assert!(feed.cursor().is_none());
        assert!(request.is_first_page());
        assert_eq!(request.filters, narrowed);
        assert!(feed.is_loading_first());
    }

    #[test]
    fn test_same_filters_do_not_refetch() {
        let mut feed = TransactionFeed::new(filters());
        let first = feed.refresh();
        assert!(feed.set_filters(filters()).is_none());
        feed.apply(first.ticket, Ok(page(&["a"], None)));
        assert!(feed.set_filters(filters()).is_none());
    }

    #[test]
    fn test_stale_reply_is_dropped() {
        let mut feed = TransactionFeed::new(filters());
        let old = feed.refresh();
        let new = feed
            .set_filters(filters().with_search(Some("rent".into())))
            .unwrap();
        assert!(new.ticket > old.ticket);

        feed.apply(new.ticket, Ok(page(&["rent-1"], None)));
        let outcome = feed.apply(old.ticket, Ok(page(&["old-1", "old-2"], Some("x"))));

        assert!(matches!(outcome, ApplyOutcome::Stale));
        assert_eq!(ids(&feed), vec!["rent-1"]);
        assert!(feed.is_complete());
    }

    #[test]
    fn test_stale_reply_arriving_first_is_dropped() {
        let mut feed = TransactionFeed::new(filters());
        let old = feed.refresh();
        let new = feed.refresh();

        assert!(matches!(
            feed.apply(old.ticket, Ok(page(&["old"], None))),
            ApplyOutcome::Stale
        ));
        assert!(feed.is_loading());
        feed.apply(new.ticket, Ok(page(&["new"], None)));
        assert_eq!(ids(&feed), vec!["new"]);
    }

    #[test]
    fn test_load_more_ignored_while_in_flight() {
        let mut feed = TransactionFeed::new(filters());
        let first = feed.refresh();
        assert!(feed.load_more().is_none());
        feed.apply(first.ticket, Ok(page(&["a"], Some("c1"))));

        let more = feed.load_more().unwrap();
        assert!(feed.load_more().is_none());
        assert_eq!(feed.pending_ticket(), Some(more.ticket));
    }

    #[test]
    fn test_failure_keeps_rows_and_allows_retry() {
        let mut feed = TransactionFeed::new(filters());
        let first = feed.refresh();
        feed.apply(first.ticket, Ok(page(&["a"], Some("c1"))));

        let more = feed.load_more().unwrap();
        let outcome = feed.apply(more.ticket, Err(DashError::Network("reset".into())));
        assert!(matches!(outcome, ApplyOutcome::Failed(_)));
        assert_eq!(ids(&feed), vec!["a"]);
        assert!(feed.error().is_some());

        let retry = feed.load_more().unwrap();
        assert_eq!(retry.cursor.as_deref(), Some("c1"));
    }

    #[test]
    fn test_empty_result() {
        let mut feed = TransactionFeed::new(filters());
        assert!(!feed.is_empty_result());
        let first = feed.refresh();
        feed.apply(first.ticket, Ok(page(&[], None)));
        assert!(feed.is_empty_result());
    }

    #[test]
    fn test_load_all_follows_cursor() {
        let transport = ScriptedTransport::new()
            .reply(json!({"transactions": {"items": [{"id": "a", "date": "2025-04-01", "amount": -1}], "cursor": "c1"}}))
            .reply(json!({"transactions": {"items": [{"id": "b", "date": "2025-04-02", "amount": -2}], "cursor": null}}));
        let client = BudgetClient::new(transport);
        let mut feed = TransactionFeed::new(filters());

        let pages = feed
            .load_all(&client, &TenantId::new("home"), None)
            .unwrap();
        assert_eq!(pages, 2);
        assert_eq!(ids(&feed), vec!["a", "b"]);

        let requests = client.transport().requests();
        assert!(requests[0].variables["cursor"].is_null());
        assert_eq!(requests[1].variables["cursor"], "c1");
    }

    #[test]
    fn test_load_all_respects_page_cap() {
        let transport = ScriptedTransport::new().reply(
            json!({"transactions": {"items": [{"id": "a", "date": "2025-04-01"}], "cursor": "c1"}}),
        );
        let client = BudgetClient::new(transport);
        let mut feed = TransactionFeed::new(filters());

        let pages = feed
            .load_all(&client, &TenantId::new("home"), Some(1))
            .unwrap();
        assert_eq!(pages, 1);
        assert!(feed.has_more());
        assert!(!feed.is_loading());
    }
}
