//! In-memory order ledger.
//!
//! The only stateful component of the mock gateway. Orders created
//! through the place endpoint are recorded here so that modify, cancel,
//! and list calls return self-consistent identifiers and statuses for
//! the lifetime of the process. Nothing is persisted and nothing is
//! ever removed; cancellation is a status change, not a deletion.

use std::sync::{Mutex, MutexGuard, PoisonError};

use serde::{Deserialize, Serialize};

/// Lifecycle status of a mock order.
///
/// The real gateway has a richer status set, but the mock only needs to
/// round-trip the statuses it assigns itself:
/// `Submitted -> {Modified, Cancelled}`, `Modified -> Cancelled`, and
/// `Cancelled` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderStatus {
    /// Order accepted by the place endpoint.
    Submitted,
    /// Order updated by the modify endpoint.
    Modified,
    /// Order cancelled; terminal and idempotent.
    Cancelled,
}

impl OrderStatus {
    /// String form as serialized in gateway responses.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Submitted => "Submitted",
            Self::Modified => "Modified",
            Self::Cancelled => "Cancelled",
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A recorded order.
#[derive(Debug, Clone)]
pub struct Order {
    /// Gateway-assigned id, `ORDER{n}` with a process-lifetime counter.
    pub id: String,
    /// Account the order was placed against. Opaque, never validated.
    pub account: String,
    /// Current lifecycle status.
    pub status: OrderStatus,
    /// The request body that created (or last modified) the order.
    /// Opaque to the ledger; retained for echoing in list responses.
    pub raw_payload: serde_json::Value,
}

/// Append-only collection of orders guarded by a single lock.
///
/// One instance is created at process start and shared with every
/// handler through [`crate::server::AppState`]. The lock serializes id
/// allocation and status mutation, so concurrent place calls cannot
/// race on the sequence and concurrent modify/cancel calls on the same
/// id cannot interleave partially.
#[derive(Debug, Default)]
pub struct OrderLedger {
    inner: Mutex<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    orders: Vec<Order>,
    next_seq: u64,
}

impl OrderLedger {
    /// Create a new empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a new order and return its assigned id and status.
    ///
    /// Always succeeds; the ledger performs no validation. Ids are
    /// unique and strictly increasing in call order.
    pub fn place(&self, account: &str, payload: serde_json::Value) -> (String, OrderStatus) {
        let mut inner = self.locked();
        inner.next_seq += 1;
        let id = format!("ORDER{}", inner.next_seq);

        inner.orders.push(Order {
            id: id.clone(),
            account: account.to_string(),
            status: OrderStatus::Submitted,
            raw_payload: payload,
        });

        (id, OrderStatus::Submitted)
    }

    /// Apply a modification to an order and return the status to report.
    ///
    /// A known active order moves to `Modified` and takes the patch as
    /// its new payload. A cancelled order stays `Cancelled` (terminal)
    /// and re-reports it. An unknown id reports `Modified` without
    /// inserting anything, matching the real gateway contract the mock
    /// emulates; tests only exercise the happy path.
    pub fn modify(&self, order_id: &str, patch: serde_json::Value) -> OrderStatus {
        let mut inner = self.locked();
        match inner.orders.iter_mut().find(|o| o.id == order_id) {
            Some(order) if order.status == OrderStatus::Cancelled => OrderStatus::Cancelled,
            Some(order) => {
                order.status = OrderStatus::Modified;
                order.raw_payload = patch;
                OrderStatus::Modified
            }
            None => OrderStatus::Modified,
        }
    }

    /// Cancel an order.
    ///
    /// Idempotent: cancelling an already-cancelled or unknown id is a
    /// no-op that still reports `Cancelled`, so retried cancels from
    /// test harnesses never fail.
    pub fn cancel(&self, order_id: &str) -> OrderStatus {
        let mut inner = self.locked();
        if let Some(order) = inner.orders.iter_mut().find(|o| o.id == order_id) {
            order.status = OrderStatus::Cancelled;
        }
        OrderStatus::Cancelled
    }

    /// Snapshot of all orders in creation order.
    #[must_use]
    pub fn list(&self) -> Vec<Order> {
        self.locked().orders.clone()
    }

    /// Number of orders recorded so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.locked().orders.len()
    }

    /// Whether any order has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.locked().orders.is_empty()
    }

    /// Acquire the lock, ignoring poisoning.
    ///
    /// No code path panics while holding the lock, so a poisoned lock
    /// still guards a consistent ledger.
    fn locked(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn seq_of(id: &str) -> u64 {
        id.trim_start_matches("ORDER").parse().unwrap()
    }

    #[test]
    fn place_assigns_distinct_increasing_ids() {
        let ledger = OrderLedger::new();

        let ids: Vec<String> = (0..5)
            .map(|_| ledger.place("DU123456", json!({"conid": 265598})).0)
            .collect();

        for pair in ids.windows(2) {
            assert_ne!(pair[0], pair[1]);
            assert!(seq_of(&pair[0]) < seq_of(&pair[1]));
        }
        assert_eq!(ids[0], "ORDER1");
    }

    #[test]
    fn place_then_list_shows_submitted_order() {
        let ledger = OrderLedger::new();
        let (id, status) = ledger.place("DU123456", json!({"side": "BUY"}));

        assert_eq!(status, OrderStatus::Submitted);

        let orders = ledger.list();
        assert_eq!(orders.len(), 1);
        assert_eq!(orders[0].id, id);
        assert_eq!(orders[0].status, OrderStatus::Submitted);
        assert_eq!(orders[0].account, "DU123456");
        assert_eq!(orders[0].raw_payload["side"], "BUY");
    }

    #[test]
    fn modify_updates_status_and_payload() {
        let ledger = OrderLedger::new();
        let (id, _) = ledger.place("DU123456", json!({"price": 150.0}));

        let status = ledger.modify(&id, json!({"price": 151.0}));
        assert_eq!(status, OrderStatus::Modified);

        let orders = ledger.list();
        assert_eq!(orders[0].status, OrderStatus::Modified);
        assert_eq!(orders[0].raw_payload["price"], 151.0);
    }

    #[test]
    fn modify_unknown_id_reports_modified_without_inserting() {
        let ledger = OrderLedger::new();

        let status = ledger.modify("ORDER999", json!({}));

        assert_eq!(status, OrderStatus::Modified);
        assert!(ledger.is_empty());
    }

    #[test]
    fn cancel_is_idempotent() {
        let ledger = OrderLedger::new();
        let (id, _) = ledger.place("DU123456", json!({}));

        assert_eq!(ledger.cancel(&id), OrderStatus::Cancelled);
        assert_eq!(ledger.cancel(&id), OrderStatus::Cancelled);
        assert_eq!(ledger.list()[0].status, OrderStatus::Cancelled);
    }

    #[test]
    fn cancel_unknown_id_reports_cancelled() {
        let ledger = OrderLedger::new();

        assert_eq!(ledger.cancel("ORDER42"), OrderStatus::Cancelled);
        assert!(ledger.is_empty());
    }

    #[test]
    fn modify_then_cancel_ends_cancelled() {
        let ledger = OrderLedger::new();
        let (id, _) = ledger.place("DU123456", json!({}));

        ledger.modify(&id, json!({"qty": 200}));
        ledger.cancel(&id);

        assert_eq!(ledger.list()[0].status, OrderStatus::Cancelled);
    }

    #[test]
    fn cancelled_order_is_terminal_under_modify() {
        let ledger = OrderLedger::new();
        let (id, _) = ledger.place("DU123456", json!({}));

        ledger.cancel(&id);
        let status = ledger.modify(&id, json!({"qty": 200}));

        assert_eq!(status, OrderStatus::Cancelled);
        assert_eq!(ledger.list()[0].status, OrderStatus::Cancelled);
    }

    #[test]
    fn cancel_never_removes_orders() {
        let ledger = OrderLedger::new();
        let (first, _) = ledger.place("DU123456", json!({}));
        let (second, _) = ledger.place("DU123456", json!({}));

        ledger.cancel(&first);

        let orders = ledger.list();
        assert_eq!(orders.len(), 2);
        assert_eq!(orders[0].id, first);
        assert_eq!(orders[1].id, second);
    }

    #[test]
    fn concurrent_place_ids_stay_unique() {
        use std::collections::HashSet;
        use std::sync::Arc;

        let ledger = Arc::new(OrderLedger::new());
        let mut handles = Vec::new();

        for _ in 0..8 {
            let ledger = Arc::clone(&ledger);
            handles.push(std::thread::spawn(move || {
                (0..50)
                    .map(|_| ledger.place("DU123456", json!({})).0)
                    .collect::<Vec<_>>()
            }));
        }

        let mut seen = HashSet::new();
        for handle in handles {
            for id in handle.join().unwrap() {
                assert!(seen.insert(id), "duplicate order id issued");
            }
        }
        assert_eq!(ledger.len(), 400);
    }
}
