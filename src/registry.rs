/*
    ABSTRACT: Definition of the single-thread handler registry datastructure:
    a nested mapping from event id to argument-type signature to an ordered
    bucket of registered listeners (see bound_fn.rs), plus the synchronous
    dispatch walk. The emitter facade (see emitter.rs) is a thin layer over
    this type.
*/
use crate::{
    bound_fn::BoundFn,
    types::{EventId, HandlerId, HandlerMap, Signature},
};
use ahash::AHashMap;
use std::any::TypeId;
use std::cell::{Cell, RefCell};
use tracing::{debug, trace};

/// One registration: the type-erased listener, its one-shot flag and its
/// identity. The `Box<dyn Any>` always holds the `BoundFn<A>` matching the
/// bucket's signature key.
pub(crate) struct HandlerEntry {
    pub(crate) callback: Box<dyn std::any::Any>,
    pub(crate) once: bool,
    pub(crate) id: HandlerId,
}

/// Single-thread datastructure responsible for storing listeners keyed by
/// (event id, unbound-argument signature) and dispatching emitted values to
/// every listener in the matching bucket, in registration order.
///
/// All methods take `&self`; internal state lives behind a `RefCell` whose
/// borrow is never held while a listener runs, so listeners may re-enter any
/// registry operation during dispatch.
///
/// Every operation is total: removing an absent listener and emitting into an
/// unregistered (event id, signature) pair are silent no-ops, not errors.
pub struct Registry {
    channels: RefCell<HandlerMap>,
    next_id: Cell<u64>,
}

impl Default for Registry {
    fn default() -> Self {
        Self {
            channels: RefCell::new(AHashMap::new()),
            next_id: Cell::new(1),
        }
    }
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends the given listener to the bucket keyed by `event_id` and the
    /// listener's signature, returning a fresh identity token.
    ///
    /// ### Notes
    /// - Duplicate registrations are legal; each is independently invocable
    ///   and removable through its own `HandlerId`.
    pub fn register<A: Signature>(
        &self,
        event_id: EventId,
        callback: BoundFn<A>,
        once: bool,
    ) -> HandlerId {
        let id = HandlerId(self.next_id.get());
        self.next_id.set(id.0 + 1);

        self.channels
            .borrow_mut()
            .entry(event_id)
            .or_default()
            .entry(TypeId::of::<A>())
            .or_default()
            .push(HandlerEntry {
                callback: Box::new(callback),
                once,
                id,
            });

        trace!(event_id, handler = id.0, once, "attached handler");
        id
    }

    /// Removes at most one entry across all signature buckets under
    /// `event_id` whose identity matches `id`.
    ///
    /// ### Returns
    /// - `bool`: `true` if an entry was removed, `false` if the id was absent
    ///   (indistinguishable from prior removal).
    pub fn remove_by_id(&self, event_id: EventId, id: HandlerId) -> bool {
        let mut channels = self.channels.borrow_mut();
        let mut removed_from = None;
        if let Some(signatures) = channels.get_mut(&event_id) {
            for (&signature, bucket) in signatures.iter_mut() {
                // Vec::remove, not swap_remove: buckets must keep registration order
                if let Some(idx) = bucket.iter().position(|entry| entry.id == id) {
                    bucket.remove(idx);
                    removed_from = Some(signature);
                    break;
                }
            }
        }
        match removed_from {
            Some(signature) => {
                prune(&mut channels, event_id, signature);
                trace!(event_id, handler = id.0, "detached handler");
                true
            }
            None => false,
        }
    }

    /// Removes the first entry (in registration order) of the bucket matching
    /// the listener's signature that compares equal to `listener`.
    pub fn remove_first_equal<A: Signature>(
        &self,
        event_id: EventId,
        listener: &BoundFn<A>,
    ) -> bool {
        let mut channels = self.channels.borrow_mut();
        let signature = TypeId::of::<A>();
        let removed = channels
            .get_mut(&event_id)
            .and_then(|signatures| signatures.get_mut(&signature))
            .and_then(|bucket| {
                bucket
                    .iter()
                    .position(|entry| entry_eq(entry, listener))
                    .map(|idx| {
                        bucket.remove(idx);
                    })
            })
            .is_some();
        if removed {
            prune(&mut channels, event_id, signature);
            trace!(event_id, "detached first equal handler");
        }
        removed
    }

    /// Removes every entry of the matching bucket that compares equal to
    /// `listener`, returning how many were removed.
    pub fn remove_all_equal<A: Signature>(&self, event_id: EventId, listener: &BoundFn<A>) -> usize {
        let mut channels = self.channels.borrow_mut();
        let signature = TypeId::of::<A>();
        let removed = match channels
            .get_mut(&event_id)
            .and_then(|signatures| signatures.get_mut(&signature))
        {
            Some(bucket) => {
                let before = bucket.len();
                bucket.retain(|entry| !entry_eq(entry, listener));
                before - bucket.len()
            }
            None => 0,
        };
        if removed > 0 {
            prune(&mut channels, event_id, signature);
            trace!(event_id, removed, "detached equal handlers");
        }
        removed
    }

    /// Removes all buckets, across every signature, for one event id.
    pub fn clear(&self, event_id: EventId) {
        if self.channels.borrow_mut().remove(&event_id).is_some() {
            debug!(event_id, "cleared event");
        }
    }

    /// Removes every event id's buckets.
    pub fn clear_all(&self) {
        self.channels.borrow_mut().clear();
        debug!("cleared all events");
    }

    /// Number of live registrations under `event_id`, across all signatures.
    pub fn handler_count(&self, event_id: EventId) -> usize {
        self.channels
            .borrow()
            .get(&event_id)
            .map_or(0, |signatures| signatures.values().map(Vec::len).sum())
    }

    /// Invokes, in registration order, every listener registered under
    /// `event_id` with the signature of `args`, giving each its own copy of
    /// the values. No matching bucket means no listeners run.
    ///
    /// ### Notes
    /// - The bucket is snapshotted (cheap clones of the shared listeners)
    ///   before any listener runs, and no internal borrow is held during the
    ///   calls, so listeners may re-enter the registry. A recurring listener
    ///   removed during the round is still called in that round; a listener
    ///   added during the round is not.
    /// - A one-shot entry is detached from the live bucket immediately before
    ///   its callback runs; if a re-entrant dispatch of the same bucket
    ///   already detached it, it is skipped. Either way it runs exactly once,
    ///   and a re-registration made from inside the callback survives.
    /// - A panicking listener aborts the rest of the round; the panic
    ///   propagates to the caller.
    pub fn dispatch<A: Signature>(&self, event_id: EventId, args: A) {
        let snapshot: Vec<(HandlerId, bool, BoundFn<A>)> = {
            let channels = self.channels.borrow();
            let bucket = match channels
                .get(&event_id)
                .and_then(|signatures| signatures.get(&TypeId::of::<A>()))
            {
                Some(bucket) => bucket,
                None => return,
            };
            bucket
                .iter()
                .map(|entry| {
                    let callback = entry
                        .callback
                        .downcast_ref::<BoundFn<A>>()
                        .expect("bucket holds only callbacks of its keyed signature");
                    (entry.id, entry.once, callback.clone())
                })
                .collect()
        };

        trace!(event_id, handlers = snapshot.len(), "dispatching");
        for (id, once, callback) in snapshot {
            if once && !self.remove_by_id(event_id, id) {
                // already claimed by a re-entrant dispatch of this bucket
                continue;
            }
            callback.call(args.clone());
        }
    }
}

fn entry_eq<A: Signature>(entry: &HandlerEntry, listener: &BoundFn<A>) -> bool {
    entry
        .callback
        .downcast_ref::<BoundFn<A>>()
        .map_or(false, |callback| callback == listener)
}

/// Drops the bucket and event entries again once they hold nothing, so
/// removal does not leave empty maps behind.
fn prune(channels: &mut HandlerMap, event_id: EventId, signature: TypeId) {
    if let Some(signatures) = channels.get_mut(&event_id) {
        if signatures.get(&signature).map_or(false, Vec::is_empty) {
            signatures.remove(&signature);
        }
        if signatures.is_empty() {
            channels.remove(&event_id);
        }
    }
}
