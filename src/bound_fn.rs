/*
    ABSTRACT: Definition of the type-erased bound function: a callable plus a
    tuple of bound values and placeholders (see slot.rs), exposed behind a
    uniform invocable-and-comparable interface parameterized only by the
    unbound argument signature. This is the unit the registry stores
    (see registry.rs).
*/
use crate::{
    callable::{Callable, Method},
    slot::ArgList,
    types::Signature,
};
use std::any::Any;
use std::rc::Rc;

/// Uniform interface over every concrete listener shape with the same
/// unbound signature. Equality goes through `Any` so that listeners backed by
/// different callables or slot patterns simply compare unequal.
pub(crate) trait Invocable<A> {
    fn invoke(&self, supplied: A);
    fn eq_invocable(&self, other: &dyn Invocable<A>) -> bool;
    fn as_any(&self) -> &dyn Any;
}

/// A free function pointer plus its declared argument list.
struct FreeFn<F, L> {
    fcn: F,
    args: L,
}

impl<A, F, L> Invocable<A> for FreeFn<F, L>
where
    A: Signature,
    L: ArgList<A>,
    F: Callable<L::Full>,
{
    fn invoke(&self, supplied: A) {
        self.fcn.invoke(self.args.fill(supplied));
    }

    fn eq_invocable(&self, other: &dyn Invocable<A>) -> bool {
        match other.as_any().downcast_ref::<Self>() {
            Some(that) => self.fcn.addr() == that.fcn.addr() && self.args.values_eq(&that.args),
            None => false,
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// A method pointer plus the receiver it will be invoked against.
///
/// The registration holds the receiver alive through the `Rc` until the
/// listener is removed; equality demands the same method on the same receiver
/// allocation.
struct MemberFn<Recv, F, L> {
    receiver: Rc<Recv>,
    method: F,
    args: L,
}

impl<A, Recv, F, L> Invocable<A> for MemberFn<Recv, F, L>
where
    A: Signature,
    Recv: 'static,
    L: ArgList<A>,
    F: Method<Recv, L::Full>,
{
    fn invoke(&self, supplied: A) {
        self.method.invoke(&self.receiver, self.args.fill(supplied));
    }

    fn eq_invocable(&self, other: &dyn Invocable<A>) -> bool {
        match other.as_any().downcast_ref::<Self>() {
            Some(that) => {
                Rc::ptr_eq(&self.receiver, &that.receiver)
                    && self.method.addr() == that.method.addr()
                    && self.args.values_eq(&that.args)
            }
            None => false,
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// A callback with some arguments fixed at bind time and the rest, typed by
/// the signature `A`, supplied at emit time.
///
/// `BoundFn` is the unit of registration: the emitter stores a clone of it
/// (a reference-count bump), keyed by `A`, and matches it for equality-based
/// removal. Two `BoundFn`s are equal iff they wrap the same callable (same
/// function pointer; for methods, also the same receiver) and every bound
/// position compares equal by value — placeholder positions are not state and
/// never participate.
///
/// ### Example
///
/// ```rust
/// use evbind::{bound, BoundFn, _1};
///
/// fn on_two(a: f64, b: i32) {
///     assert_eq!((a, b), (100.0, 8421));
/// }
///
/// // Fix `b` to 8421; only `a` remains unbound.
/// let listener = BoundFn::bind(on_two as fn(f64, i32), (_1, bound(8421)));
/// listener.call((100.0,));
/// ```
pub struct BoundFn<A> {
    inner: Rc<dyn Invocable<A>>,
}

impl<A: Signature> BoundFn<A> {
    /// Binds a free function to an argument list of `Bound` values and
    /// `Placeholder`s, one slot per parameter in parameter order.
    ///
    /// An argument list whose shape or types do not match the function's
    /// parameters, or whose placeholder positions do not yield `A`, fails to
    /// compile.
    pub fn bind<F, L>(fcn: F, args: L) -> Self
    where
        L: ArgList<A>,
        F: Callable<L::Full>,
    {
        BoundFn {
            inner: Rc::new(FreeFn { fcn, args }),
        }
    }

    /// Binds a method to a receiver and an argument list over the
    /// non-receiver parameters.
    ///
    /// The receiver is stored as an `Rc`, so it stays alive for as long as
    /// some registration (or caller-held clone) still references the
    /// listener.
    pub fn bind_method<Recv, F, L>(receiver: Rc<Recv>, method: F, args: L) -> Self
    where
        Recv: 'static,
        L: ArgList<A>,
        F: Method<Recv, L::Full>,
    {
        BoundFn {
            inner: Rc::new(MemberFn {
                receiver,
                method,
                args,
            }),
        }
    }

    /// Invokes the callback, splicing the supplied values into the
    /// placeholder positions. Panics raised by the callee propagate.
    pub fn call(&self, supplied: A) {
        self.inner.invoke(supplied);
    }
}

impl<A> Clone for BoundFn<A> {
    fn clone(&self) -> Self {
        BoundFn {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<A: Signature> PartialEq for BoundFn<A> {
    fn eq(&self, other: &Self) -> bool {
        self.inner.eq_invocable(other.inner.as_ref())
    }
}

/// A nullary function is already a complete listener; let it be passed to
/// `on` / `once` directly, without an explicit argument list.
impl<R: 'static> From<fn() -> R> for BoundFn<()> {
    fn from(fcn: fn() -> R) -> Self {
        BoundFn::bind(fcn, ())
    }
}
