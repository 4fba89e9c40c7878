use crate::registry::HandlerEntry;
use ahash::AHashMap;
use std::any::TypeId;

/// Integer key identifying one logical event channel.
///
/// Any value is a legal, independent namespace; no registry of valid ids is
/// enforced.
pub type EventId = i64;

/// Opaque identity of one registration, returned by `Emitter::on` / `Emitter::once`.
///
/// Ids are allocated from a registry-wide monotonic 64-bit counter and never
/// reused, so a `HandlerId` stays an unambiguous removal handle even when two
/// registrations are structurally equal. Behavior on counter wraparound is
/// left unspecified (unreachable in practice).
#[derive(Debug, Eq, PartialEq, Hash, Clone, Copy)]
pub struct HandlerId(pub(crate) u64);

/// The argument-type signature a handler expects at emit time, expressed as a
/// tuple of the values supplied by `emit` (bound values excluded).
///
/// An emission only ever reaches handlers registered under the exact same
/// tuple type; there is no numeric widening or contravariant matching.
/// `Clone` is required because every handler in a bucket receives its own
/// copy of the emitted values.
pub trait Signature: Clone + 'static {}

impl Signature for () {}
impl<A0: Clone + 'static> Signature for (A0,) {}
impl<A0: Clone + 'static, A1: Clone + 'static> Signature for (A0, A1) {}
impl<A0: Clone + 'static, A1: Clone + 'static, A2: Clone + 'static> Signature for (A0, A1, A2) {}

pub(crate) type HandlerMap = AHashMap<EventId, AHashMap<TypeId, Vec<HandlerEntry>>>;
