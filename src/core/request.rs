//! # Request Lifecycle
//!
//! Every container owns a `Lifecycle`: its loading/error flags plus the
//! bookkeeping that keeps a slow response from clobbering a newer one.
//!
//! ```text
//! begin()  → Ticket { seq: 7 }     pending:   loading = true, error = None
//! begin()  → Ticket { seq: 8 }     (same field, newer)
//! settle(8, Ok)   → applied        fulfilled
//! settle(7, Ok)   → discarded      seq 7 is no longer the latest for its field
//! ```
//!
//! Only replace-kind writes are discarded when stale. Patch-kind writes
//! (append, map-replace, filter) are applied against whatever the field holds
//! when they land, so ordering between them does not lose data. A patch that
//! succeeds also supersedes every replace issued before it on the same field:
//!
//! ```text
//! begin(fetch)  → seq 1 (replace)
//! begin(delete) → seq 2 (patch)
//! settle(2, Ok) → applied, latest = 2
//! settle(1, Ok) → discarded, would resurrect the deleted row
//! ```

use std::collections::HashMap;

use log::debug;

use crate::api::error::ErrorPayload;
use crate::core::operation::WriteKind;

/// The container a request belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    Session,
    Users,
    Tours,
    Bookings,
    Reviews,
}

/// The field within a container that a request writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Session,
    Items,
    Current,
    ByTour,
    ByUser,
    Export,
}

/// Identifies one in-flight request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket {
    pub resource: Resource,
    pub field: Field,
    pub kind: WriteKind,
    pub seq: u64,
}

#[derive(Debug, Default)]
pub struct Lifecycle {
    pub error: Option<ErrorPayload>,
    next_seq: u64,
    latest: HashMap<Field, u64>,
    in_flight: HashMap<u64, Field>,
}

impl Lifecycle {
    pub fn new() -> Self {
        Self::default()
    }

    /// True while any request for this container is outstanding.
    pub fn loading(&self) -> bool {
        !self.in_flight.is_empty()
    }

    /// True while a request writing `field` is outstanding.
    pub fn pending(&self, field: Field) -> bool {
        self.in_flight.values().any(|&f| f == field)
    }

    /// Pending transition: issues a ticket and clears the error.
    pub fn begin(&mut self, resource: Resource, field: Field, kind: WriteKind) -> Ticket {
        self.next_seq += 1;
        let seq = self.next_seq;
        self.in_flight.insert(seq, field);
        if kind == WriteKind::Replace {
            self.latest.insert(field, seq);
        }
        self.error = None;
        Ticket {
            resource,
            field,
            kind,
            seq,
        }
    }

    /// Fulfilled/rejected transition.
    ///
    /// Returns the value to apply, or `None` when the outcome was an error
    /// (recorded in `error`) or the ticket is stale (nothing recorded).
    pub fn settle<T>(&mut self, ticket: &Ticket, outcome: Result<T, ErrorPayload>) -> Option<T> {
        if self.in_flight.remove(&ticket.seq).is_none() {
            debug!("Ignoring unknown ticket {:?}", ticket);
            return None;
        }
        if self.is_stale(ticket) {
            debug!("Discarding stale response for {:?}", ticket);
            return None;
        }
        match outcome {
            Ok(value) => {
                if ticket.kind == WriteKind::Patch {
                    self.supersede(ticket.field, ticket.seq);
                }
                Some(value)
            }
            Err(payload) => {
                self.error = Some(payload);
                None
            }
        }
    }

    fn supersede(&mut self, field: Field, seq: u64) {
        let latest = self.latest.entry(field).or_insert(seq);
        *latest = (*latest).max(seq);
    }

    fn is_stale(&self, ticket: &Ticket) -> bool {
        ticket.kind == WriteKind::Replace
            && self
                .latest
                .get(&ticket.field)
                .is_some_and(|&latest| latest > ticket.seq)
    }

    /// Drops all tracking and the error (used when a container is reset).
    pub fn reset(&mut self) {
        self.error = None;
        self.latest.clear();
        self.in_flight.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn begin(lc: &mut Lifecycle, field: Field, kind: WriteKind) -> Ticket {
        lc.begin(Resource::Users, field, kind)
    }

    #[test]
    fn test_pending_sets_loading_and_clears_error() {
        let mut lc = Lifecycle::new();
        lc.error = Some("old".into());
        let t = begin(&mut lc, Field::Items, WriteKind::Replace);
        assert!(lc.loading());
        assert!(lc.error.is_none());
        assert_eq!(lc.settle(&t, Ok(1)), Some(1));
        assert!(!lc.loading());
    }

    #[test]
    fn test_rejected_records_error() {
        let mut lc = Lifecycle::new();
        let t = begin(&mut lc, Field::Items, WriteKind::Replace);
        let out: Option<()> = lc.settle(&t, Err("boom".into()));
        assert!(out.is_none());
        assert!(!lc.loading());
        assert_eq!(lc.error, Some(ErrorPayload::Message("boom".into())));
    }

    #[test]
    fn test_stale_replace_is_discarded() {
        let mut lc = Lifecycle::new();
        let older = begin(&mut lc, Field::Items, WriteKind::Replace);
        let newer = begin(&mut lc, Field::Items, WriteKind::Replace);

        assert_eq!(lc.settle(&newer, Ok("new")), Some("new"));
        assert!(lc.loading());
        assert_eq!(lc.settle(&older, Ok("old")), None);
        assert!(!lc.loading());
    }

    #[test]
    fn test_stale_error_is_not_recorded() {
        let mut lc = Lifecycle::new();
        let older = begin(&mut lc, Field::Items, WriteKind::Replace);
        let newer = begin(&mut lc, Field::Items, WriteKind::Replace);
        let _: Option<()> = lc.settle(&older, Err("late failure".into()));
        assert!(lc.error.is_none());
        assert_eq!(lc.settle(&newer, Ok(())), Some(()));
    }

    #[test]
    fn test_fields_are_tracked_independently() {
        let mut lc = Lifecycle::new();
        let items = begin(&mut lc, Field::Items, WriteKind::Replace);
        let current = begin(&mut lc, Field::Current, WriteKind::Replace);
        assert_eq!(lc.settle(&current, Ok(2)), Some(2));
        assert_eq!(lc.settle(&items, Ok(1)), Some(1));
    }

    #[test]
    fn test_patches_always_apply() {
        let mut lc = Lifecycle::new();
        let a = begin(&mut lc, Field::Items, WriteKind::Patch);
        let b = begin(&mut lc, Field::Items, WriteKind::Patch);
        assert_eq!(lc.settle(&b, Ok("b")), Some("b"));
        assert_eq!(lc.settle(&a, Ok("a")), Some("a"));
    }

    #[test]
    fn test_settled_patch_supersedes_older_replace() {
        let mut lc = Lifecycle::new();
        let fetch = begin(&mut lc, Field::Items, WriteKind::Replace);
        let delete = begin(&mut lc, Field::Items, WriteKind::Patch);
        assert_eq!(lc.settle(&delete, Ok("deleted")), Some("deleted"));
        assert_eq!(lc.settle(&fetch, Ok("old list")), None);
        assert!(!lc.loading());
    }

    #[test]
    fn test_replace_issued_after_patch_still_applies() {
        let mut lc = Lifecycle::new();
        let create = begin(&mut lc, Field::Items, WriteKind::Patch);
        let fetch = begin(&mut lc, Field::Items, WriteKind::Replace);
        assert_eq!(lc.settle(&create, Ok("created")), Some("created"));
        assert_eq!(lc.settle(&fetch, Ok("list")), Some("list"));
    }

    #[test]
    fn test_failed_patch_does_not_supersede() {
        let mut lc = Lifecycle::new();
        let fetch = begin(&mut lc, Field::Items, WriteKind::Replace);
        let delete = begin(&mut lc, Field::Items, WriteKind::Patch);
        let _: Option<()> = lc.settle(&delete, Err("nope".into()));
        assert_eq!(lc.settle(&fetch, Ok(())), Some(()));
    }

    #[test]
    fn test_pending_is_per_field() {
        let mut lc = Lifecycle::new();
        let current = begin(&mut lc, Field::Current, WriteKind::Replace);
        assert!(lc.pending(Field::Current));
        assert!(!lc.pending(Field::Items));
        lc.settle(&current, Ok(()));
        assert!(!lc.pending(Field::Current));
    }

    #[test]
    fn test_double_settle_ignored() {
        let mut lc = Lifecycle::new();
        let t = begin(&mut lc, Field::Items, WriteKind::Patch);
        assert_eq!(lc.settle(&t, Ok(1)), Some(1));
        assert_eq!(lc.settle(&t, Ok(1)), None);
    }
}
