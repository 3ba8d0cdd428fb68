//! Optimistic reclassification
//!
//! A reclassification is shown locally as soon as it is requested: the row
//! gets the new category and `taggedBy = "user"`. The ledger remembers what
//! the row looked like before, so a failure can put it back.
//!
//! At most one request per transaction is in flight. Asking again while one
//! is outstanding queues the newer category (replacing any older queued one);
//! it is sent once the outstanding request settles. Every dispatched request
//! carries a sequence number, and a reply settles only the request with the
//! matching number.

use std::collections::HashMap;

use crate::error::{DashError, DashResult};
use crate::models::{ReclassifiedTransaction, TagState, Transaction, TransactionId};

/// A mutation the caller must send
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReclassifyRequest {
    pub id: TransactionId,
    pub category: String,
    pub seq: u64,
}

#[derive(Debug, Clone)]
struct InFlight {
    seq: u64,
    /// Row state before the optimistic write
    snapshot: TagState,
    /// What was written optimistically
    applied: TagState,
    queued: Option<String>,
}

/// What happened to a submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submitted {
    /// Applied locally; send this request now
    Dispatch(ReclassifyRequest),
    /// Another request for the row is outstanding; this one waits
    Queued,
}

#[derive(Debug)]
pub enum SettleOutcome {
    /// Server accepted; the row now holds the server's values
    Confirmed(ReclassifiedTransaction),
    /// Server rejected; the row was restored if nothing else touched it
    RolledBack(DashError),
    /// No request with this sequence number is outstanding for the id
    Unknown,
}

/// Result of settling one request
#[derive(Debug)]
pub struct Settlement {
    pub outcome: SettleOutcome,
    /// A queued request that is now in flight
    pub next: Option<ReclassifyRequest>,
}

#[derive(Debug, Default)]
pub struct ReclassifyLedger {
    in_flight: HashMap<TransactionId, InFlight>,
    last_seq: u64,
}

fn find<'a>(items: &'a mut [Transaction], id: &TransactionId) -> Option<&'a mut Transaction> {
    items.iter_mut().find(|t| &t.id == id)
}

impl ReclassifyLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_pending(&self, id: &TransactionId) -> bool {
        self.in_flight.contains_key(id)
    }

    pub fn pending_count(&self) -> usize {
        self.in_flight.len()
    }

    /// Apply a reclassification locally and decide whether to send it now
    pub fn submit(
        &mut self,
        items: &mut [Transaction],
        id: &TransactionId,
        category: &str,
    ) -> DashResult<Submitted> {
        let category = category.trim();
        if category.is_empty() {
            return Err(DashError::Validation("Category cannot be empty".into()));
        }

        if let Some(entry) = self.in_flight.get_mut(id) {
            log::debug!("Queueing reclassification of {} to {}", id, category);
            entry.queued = Some(category.to_string());
            return Ok(Submitted::Queued);
        }

        let item = find(items, id).ok_or_else(|| DashError::transaction_not_found(id.as_str()))?;
        Ok(Submitted::Dispatch(self.dispatch(item, category)))
    }

    fn dispatch(&mut self, item: &mut Transaction, category: &str) -> ReclassifyRequest {
        let snapshot = item.tag_state();
        let applied = TagState::user_tagged(category);
        item.apply_tag_state(&applied);

        self.last_seq += 1;
        let seq = self.last_seq;
        self.in_flight.insert(
            item.id.clone(),
            InFlight {
                seq,
                snapshot,
                applied,
                queued: None,
            },
        );

        ReclassifyRequest {
            id: item.id.clone(),
            category: category.to_string(),
            seq,
        }
    }

    /// The single settlement path for a finished request
    ///
    /// Success writes the server's category over the row and keeps the local
    /// provenance marker only when the server sent none. Failure restores the
    /// snapshot unless the row has changed since the optimistic write. Either
    /// way a queued request for the row is dispatched. A reply whose `seq`
    /// is not the one in flight for `id` leaves the ledger untouched.
    pub fn settle(
        &mut self,
        items: &mut [Transaction],
        id: &TransactionId,
        seq: u64,
        result: DashResult<ReclassifiedTransaction>,
    ) -> Settlement {
        let current = self.in_flight.get(id).is_some_and(|entry| entry.seq == seq);
        let Some(entry) = current.then(|| self.in_flight.remove(id)).flatten() else {
            log::debug!("Ignoring settlement #{} for {}: not in flight", seq, id);
            return Settlement {
                outcome: SettleOutcome::Unknown,
                next: None,
            };
        };

        let outcome = match result {
            Ok(server) => {
                if let Some(item) = find(items, id) {
                    let reconciled = TagState {
                        category: Some(server.category.clone()),
                        tagged_by: server
                            .tagged_by
                            .clone()
                            .or_else(|| entry.applied.tagged_by.clone()),
                    };
                    if reconciled != entry.applied {
                        log::debug!("Server reconciled {} to {:?}", id, reconciled);
                    }
                    item.apply_tag_state(&reconciled);
                }
                SettleOutcome::Confirmed(server)
            }
            Err(e) => {
                log::warn!("Reclassification of {} failed: {}", id, e);
                if let Some(item) = find(items, id) {
                    if item.tag_state() == entry.applied {
                        item.apply_tag_state(&entry.snapshot);
                    }
                }
                SettleOutcome::RolledBack(e)
            }
        };

        let next = entry.queued.and_then(|category| match find(items, id) {
            Some(item) => Some(self.dispatch(item, &category)),
            None => {
                log::warn!("Dropping queued reclassification of {}: row no longer loaded", id);
                None
            }
        });

        Settlement { outcome, next }
    }

    /// Forget every outstanding request, e.g. after switching tenants
    pub fn clear(&mut self) {
        self.in_flight.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Money, USER_TAGGED};

    fn rows() -> Vec<Transaction> {
        vec![Transaction {
            id: TransactionId::new("t1"),
            date: "2025-04-01".into(),
            description: Some("Uber".into()),
            amount: Money::from_units(-250),
            currency: "INR".into(),
            category: Some("Misc".into()),
            sub_category: None,
            tagged_by: Some("rules".into()),
            confidence: Some(0.4),
        }]
    }

    fn t1() -> TransactionId {
        TransactionId::new("t1")
    }

    fn confirmed(category: &str, tagged_by: Option<&str>) -> DashResult<ReclassifiedTransaction> {
        Ok(ReclassifiedTransaction {
            id: t1(),
            category: category.into(),
            tagged_by: tagged_by.map(String::from),
        })
    }

    #[test]
    fn test_optimistic_write_is_immediate() {
        let mut items = rows();
        let mut ledger = ReclassifyLedger::new();

        let submitted = ledger.submit(&mut items, &t1(), "Travel").unwrap();
        assert_eq!(
            submitted,
            Submitted::Dispatch(ReclassifyRequest {
                id: t1(),
                category: "Travel".into(),
                seq: 1,
            })
        );
        assert_eq!(items[0].category.as_deref(), Some("Travel"));
        assert_eq!(items[0].tagged_by.as_deref(), Some(USER_TAGGED));
        assert!(ledger.is_pending(&t1()));
    }

    #[test]
    fn test_failure_restores_previous_state() {
        let mut items = rows();
        let before = items[0].clone();
        let mut ledger = ReclassifyLedger::new();

        ledger.submit(&mut items, &t1(), "Travel").unwrap();
        let settlement = ledger.settle(&mut items, &t1(), 1, Err(DashError::Network("down".into())));

        assert!(matches!(settlement.outcome, SettleOutcome::RolledBack(_)));
        assert_eq!(items[0], before);
        assert!(!ledger.is_pending(&t1()));
    }

    #[test]
    fn test_server_values_win_on_success() {
        let mut items = rows();
        let mut ledger = ReclassifyLedger::new();

        ledger.submit(&mut items, &t1(), "travel").unwrap();
        ledger.settle(&mut items, &t1(), 1, confirmed("Travel", Some("user:asha")));

        assert_eq!(items[0].category.as_deref(), Some("Travel"));
        assert_eq!(items[0].tagged_by.as_deref(), Some("user:asha"));
        assert_eq!(items[0].date, "2025-04-01");
    }

    #[test]
    fn test_local_marker_kept_when_server_omits_it() {
        let mut items = rows();
        let mut ledger = ReclassifyLedger::new();

        ledger.submit(&mut items, &t1(), "Travel").unwrap();
        ledger.settle(&mut items, &t1(), 1, confirmed("Travel", None));
        assert_eq!(items[0].tagged_by.as_deref(), Some(USER_TAGGED));
    }

    #[test]
    fn test_second_request_is_queued_then_dispatched() {
        let mut items = rows();
        let mut ledger = ReclassifyLedger::new();

        ledger.submit(&mut items, &t1(), "Travel").unwrap();
        assert_eq!(
            ledger.submit(&mut items, &t1(), "Transport").unwrap(),
            Submitted::Queued
        );
        assert_eq!(
            ledger.submit(&mut items, &t1(), "Commute").unwrap(),
            Submitted::Queued
        );
        // queued value is not shown until dispatched
        assert_eq!(items[0].category.as_deref(), Some("Travel"));

        let settlement = ledger.settle(&mut items, &t1(), 1, confirmed("Travel", Some("user")));
        assert_eq!(
            settlement.next,
            Some(ReclassifyRequest {
                id: t1(),
                category: "Commute".into(),
                seq: 2,
            })
        );
        assert_eq!(items[0].category.as_deref(), Some("Commute"));
        assert!(ledger.is_pending(&t1()));
    }

    #[test]
    fn test_queued_failure_rolls_back_to_confirmed_value() {
        let mut items = rows();
        let mut ledger = ReclassifyLedger::new();

        ledger.submit(&mut items, &t1(), "Travel").unwrap();
        ledger.submit(&mut items, &t1(), "Commute").unwrap();
        ledger.settle(&mut items, &t1(), 1, confirmed("Travel", Some("user")));
        ledger.settle(&mut items, &t1(), 2, Err(DashError::Network("down".into())));

        assert_eq!(items[0].category.as_deref(), Some("Travel"));
        assert_eq!(items[0].tagged_by.as_deref(), Some("user"));
    }

    #[test]
    fn test_rollback_skips_rows_replaced_since() {
        let mut items = rows();
        let mut ledger = ReclassifyLedger::new();

        ledger.submit(&mut items, &t1(), "Travel").unwrap();
        items[0].category = Some("Groceries".into());
        items[0].tagged_by = Some("model".into());

        ledger.settle(&mut items, &t1(), 1, Err(DashError::Network("down".into())));
        assert_eq!(items[0].category.as_deref(), Some("Groceries"));
    }

    #[test]
    fn test_unknown_row_and_blank_category() {
        let mut items = rows();
        let mut ledger = ReclassifyLedger::new();

        let err = ledger
            .submit(&mut items, &TransactionId::new("nope"), "Travel")
            .unwrap_err();
        assert!(err.is_not_found());

        let err = ledger.submit(&mut items, &t1(), "   ").unwrap_err();
        assert!(err.is_validation());

        let settlement = ledger.settle(&mut items, &t1(), 1, confirmed("Travel", None));
        assert!(matches!(settlement.outcome, SettleOutcome::Unknown));
    }

    #[test]
    fn test_reply_for_other_request_is_ignored() {
        let mut items = rows();
        let mut ledger = ReclassifyLedger::new();

        ledger.submit(&mut items, &t1(), "Travel").unwrap();
        let settlement = ledger.settle(&mut items, &t1(), 7, Err(DashError::Network("down".into())));

        assert!(matches!(settlement.outcome, SettleOutcome::Unknown));
        assert!(settlement.next.is_none());
        assert!(ledger.is_pending(&t1()));
        assert_eq!(items[0].category.as_deref(), Some("Travel"));

        ledger.settle(&mut items, &t1(), 1, confirmed("Travel", Some("user")));
        assert!(!ledger.is_pending(&t1()));
    }
}
