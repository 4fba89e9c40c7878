/*
    ABSTRACT: Definition of the single-thread emitter facade combining
    listener registration, removal and synchronous emission over a shared
    handler registry (see registry.rs). Emission derives the argument-type
    signature from the emitted values themselves.
*/
use crate::{
    bound_fn::BoundFn,
    registry::Registry,
    types::{EventId, HandlerId, Signature},
};
use std::rc::Rc;

/// A generic, single-thread event emitter: listeners subscribe to an integer
/// event id with `on`/`once`, and `emit` synchronously invokes, in
/// registration order, every listener whose unbound-argument signature
/// matches the types of the emitted values.
///
/// Cloning an `Emitter` is cheap and shares its registrations: every clone
/// observes the same handler map. This also lets an emitter handle travel
/// into a listener as a bound value, from where it may re-enter `emit`.
///
/// `emit` is intended for the object that embeds the emitter, not for
/// arbitrary external callers: embed the emitter privately, expose the
/// subscription surface, and keep publishing to yourself.
///
/// ### Example
///
/// ```rust
/// use evbind::{bound, BoundFn, Emitter, _1};
///
/// const VOLUME: i64 = 3;
///
/// fn on_volume(level: i32, max: i32) {
///     assert!(level <= max);
/// }
///
/// let player = Emitter::new();
/// let listener = BoundFn::bind(on_volume as fn(i32, i32), (_1, bound(11)));
///
/// let id = player.on(VOLUME, listener.clone());
/// player.emit(VOLUME, (7,));
///
/// // Either removal model works: the handle...
/// player.off(VOLUME, id);
/// // ...or an equal listener.
/// player.remove_handler(VOLUME, listener);
/// ```
pub struct Emitter {
    registry: Rc<Registry>,
}

impl Default for Emitter {
    fn default() -> Self {
        Self {
            registry: Rc::new(Registry::new()),
        }
    }
}

impl Clone for Emitter {
    fn clone(&self) -> Self {
        Self {
            registry: Rc::clone(&self.registry),
        }
    }
}

/// Two emitters are equal when they share one registry, i.e. one is a clone
/// of the other.
impl PartialEq for Emitter {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.registry, &other.registry)
    }
}

impl Emitter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attaches an event listener.
    ///
    /// ### Returns
    /// - `HandlerId`: the identity of this registration, usable with `off`
    ///   even when structurally equal listeners are attached more than once.
    pub fn on<A, L>(&self, event_id: EventId, listener: L) -> HandlerId
    where
        A: Signature,
        L: Into<BoundFn<A>>,
    {
        self.registry.register(event_id, listener.into(), false)
    }

    /// Attaches an event listener that detaches itself after its first
    /// invocation.
    pub fn once<A, L>(&self, event_id: EventId, listener: L) -> HandlerId
    where
        A: Signature,
        L: Into<BoundFn<A>>,
    {
        self.registry.register(event_id, listener.into(), true)
    }

    /// Detaches the registration identified by `id`.
    ///
    /// ### Notes
    /// - Removing an id that is absent (never attached, already fired as a
    ///   one-shot, or previously removed) is a no-op returning `false`.
    pub fn off(&self, event_id: EventId, id: HandlerId) -> bool {
        self.registry.remove_by_id(event_id, id)
    }

    /// Detaches the first listener equal to the given one.
    ///
    /// Equality ignores placeholder positions: a listener bound to the same
    /// callable and the same fixed values matches no matter which placeholder
    /// markers either side used.
    pub fn remove_handler<A, L>(&self, event_id: EventId, listener: L) -> bool
    where
        A: Signature,
        L: Into<BoundFn<A>>,
    {
        self.registry.remove_first_equal(event_id, &listener.into())
    }

    /// Detaches every listener equal to the given one, returning how many
    /// were removed.
    pub fn remove_handlers<A, L>(&self, event_id: EventId, listener: L) -> usize
    where
        A: Signature,
        L: Into<BoundFn<A>>,
    {
        self.registry.remove_all_equal(event_id, &listener.into())
    }

    /// Detaches every listener, of every signature, for one event id.
    pub fn remove_all(&self, event_id: EventId) {
        self.registry.clear(event_id)
    }

    /// Detaches every listener of every event id.
    pub fn clear(&self) {
        self.registry.clear_all()
    }

    /// Number of live registrations for `event_id`, across all signatures.
    pub fn handler_count(&self, event_id: EventId) -> usize {
        self.registry.handler_count(event_id)
    }

    /// Emits an event: invokes every listener registered under `event_id`
    /// whose signature matches the type of `args`, in registration order.
    ///
    /// ### Notes
    /// - The signature is derived from `args` itself; an emission typed to a
    ///   signature nobody registered under reaches zero listeners and is not
    ///   an error.
    /// - Listener panics propagate to the caller and abort the rest of the
    ///   round.
    pub fn emit<A: Signature>(&self, event_id: EventId, args: A) {
        self.registry.dispatch(event_id, args)
    }
}
