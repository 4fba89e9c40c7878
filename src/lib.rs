/*
    ABSTRACT: Typed, single-thread event emitter. Listeners are functions or
    methods partially applied with bound values (see bound_fn.rs, slot.rs),
    stored per (event id, unbound-argument signature) in a handler registry
    (see registry.rs) and invoked synchronously, in registration order, by an
    emitter facade (see emitter.rs).
*/
mod bound_fn;
mod callable;
mod emitter;
mod registry;
mod slot;
mod types;

pub use bound_fn::BoundFn;
pub use callable::{Callable, Method};
pub use emitter::Emitter;
pub use registry::Registry;
pub use slot::{bound, ArgList, Bound, Placeholder, _1, _2, _3};
pub use types::{EventId, HandlerId, Signature};
