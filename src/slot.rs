/*
    ABSTRACT: Definition of the argument slots a callback can be bound with
    (fixed values vs. emit-time placeholders, see bound_fn.rs) and the
    splicing/comparison over whole slot tuples used by the registry
    (see registry.rs) to match handlers for removal.
*/

/// Marks one argument position whose value is supplied at emit time.
///
/// The index is cosmetic, mirroring a bind facility's `_1`/`_2` markers:
/// substitution is positional (placeholders are filled left to right with the
/// emitted values, in original parameter order) and equality treats any two
/// placeholders as equal regardless of index.
#[derive(Debug, Clone, Copy)]
pub struct Placeholder(pub usize);

pub const _1: Placeholder = Placeholder(1);
pub const _2: Placeholder = Placeholder(2);
pub const _3: Placeholder = Placeholder(3);

/// One argument position fixed to a value at bind time.
///
/// Bound values are cloned into each invocation and compared with `==` when
/// two callbacks are tested for equality.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bound<T>(pub T);

/// Shorthand constructor for a `Bound` slot: `bind(f, (_1, bound(8421)))`.
pub fn bound<T>(value: T) -> Bound<T> {
    Bound(value)
}

/// A full declared argument list of a callback: a tuple mixing `Bound` and
/// `Placeholder` slots, one per parameter, in parameter order.
///
/// `A` is the unbound signature — the tuple of types at placeholder
/// positions. `Full` is the parameter tuple of the underlying callable after
/// splicing. Implemented for every slot pattern up to three parameters.
pub trait ArgList<A>: 'static {
    /// Parameter tuple of the underlying callable once placeholders are filled.
    type Full;

    /// Substitutes the supplied emit-time values into the placeholder
    /// positions, left to right, cloning bound values into the rest.
    fn fill(&self, supplied: A) -> Self::Full;

    /// Compares only the `Bound` positions; placeholder positions are not
    /// state and always compare equal.
    fn values_eq(&self, other: &Self) -> bool;
}

impl ArgList<()> for () {
    type Full = ();

    fn fill(&self, _: ()) -> Self::Full {}

    fn values_eq(&self, _: &Self) -> bool {
        true
    }
}

impl<T0> ArgList<()> for (Bound<T0>,)
where
    T0: Clone + PartialEq + 'static,
{
    type Full = (T0,);

    fn fill(&self, _: ()) -> Self::Full {
        let (Bound(v0),) = self;
        (v0.clone(),)
    }

    fn values_eq(&self, other: &Self) -> bool {
        (self.0).0 == (other.0).0
    }
}

impl<A0> ArgList<(A0,)> for (Placeholder,) {
    type Full = (A0,);

    fn fill(&self, supplied: (A0,)) -> Self::Full {
        supplied
    }

    fn values_eq(&self, _: &Self) -> bool {
        true
    }
}

impl<T0, T1> ArgList<()> for (Bound<T0>, Bound<T1>)
where
    T0: Clone + PartialEq + 'static,
    T1: Clone + PartialEq + 'static,
{
    type Full = (T0, T1);

    fn fill(&self, _: ()) -> Self::Full {
        let (Bound(v0), Bound(v1)) = self;
        (v0.clone(), v1.clone())
    }

    fn values_eq(&self, other: &Self) -> bool {
        (self.0).0 == (other.0).0 && (self.1).0 == (other.1).0
    }
}

impl<A0, T1> ArgList<(A0,)> for (Placeholder, Bound<T1>)
where
    T1: Clone + PartialEq + 'static,
{
    type Full = (A0, T1);

    fn fill(&self, (a0,): (A0,)) -> Self::Full {
        let (_, Bound(v1)) = self;
        (a0, v1.clone())
    }

    fn values_eq(&self, other: &Self) -> bool {
        (self.1).0 == (other.1).0
    }
}

impl<T0, A0> ArgList<(A0,)> for (Bound<T0>, Placeholder)
where
    T0: Clone + PartialEq + 'static,
{
    type Full = (T0, A0);

    fn fill(&self, (a0,): (A0,)) -> Self::Full {
        let (Bound(v0), _) = self;
        (v0.clone(), a0)
    }

    fn values_eq(&self, other: &Self) -> bool {
        (self.0).0 == (other.0).0
    }
}

impl<A0, A1> ArgList<(A0, A1)> for (Placeholder, Placeholder) {
    type Full = (A0, A1);

    fn fill(&self, supplied: (A0, A1)) -> Self::Full {
        supplied
    }

    fn values_eq(&self, _: &Self) -> bool {
        true
    }
}

impl<T0, T1, T2> ArgList<()> for (Bound<T0>, Bound<T1>, Bound<T2>)
where
    T0: Clone + PartialEq + 'static,
    T1: Clone + PartialEq + 'static,
    T2: Clone + PartialEq + 'static,
{
    type Full = (T0, T1, T2);

    fn fill(&self, _: ()) -> Self::Full {
        let (Bound(v0), Bound(v1), Bound(v2)) = self;
        (v0.clone(), v1.clone(), v2.clone())
    }

    fn values_eq(&self, other: &Self) -> bool {
        (self.0).0 == (other.0).0 && (self.1).0 == (other.1).0 && (self.2).0 == (other.2).0
    }
}

impl<A0, T1, T2> ArgList<(A0,)> for (Placeholder, Bound<T1>, Bound<T2>)
where
    T1: Clone + PartialEq + 'static,
    T2: Clone + PartialEq + 'static,
{
    type Full = (A0, T1, T2);

    fn fill(&self, (a0,): (A0,)) -> Self::Full {
        let (_, Bound(v1), Bound(v2)) = self;
        (a0, v1.clone(), v2.clone())
    }

    fn values_eq(&self, other: &Self) -> bool {
        (self.1).0 == (other.1).0 && (self.2).0 == (other.2).0
    }
}

impl<T0, A0, T2> ArgList<(A0,)> for (Bound<T0>, Placeholder, Bound<T2>)
where
    T0: Clone + PartialEq + 'static,
    T2: Clone + PartialEq + 'static,
{
    type Full = (T0, A0, T2);

    fn fill(&self, (a0,): (A0,)) -> Self::Full {
        let (Bound(v0), _, Bound(v2)) = self;
        (v0.clone(), a0, v2.clone())
    }

    fn values_eq(&self, other: &Self) -> bool {
        (self.0).0 == (other.0).0 && (self.2).0 == (other.2).0
    }
}

impl<T0, T1, A0> ArgList<(A0,)> for (Bound<T0>, Bound<T1>, Placeholder)
where
    T0: Clone + PartialEq + 'static,
    T1: Clone + PartialEq + 'static,
{
    type Full = (T0, T1, A0);

    fn fill(&self, (a0,): (A0,)) -> Self::Full {
        let (Bound(v0), Bound(v1), _) = self;
        (v0.clone(), v1.clone(), a0)
    }

    fn values_eq(&self, other: &Self) -> bool {
        (self.0).0 == (other.0).0 && (self.1).0 == (other.1).0
    }
}

impl<A0, A1, T2> ArgList<(A0, A1)> for (Placeholder, Placeholder, Bound<T2>)
where
    T2: Clone + PartialEq + 'static,
{
    type Full = (A0, A1, T2);

    fn fill(&self, (a0, a1): (A0, A1)) -> Self::Full {
        let (_, _, Bound(v2)) = self;
        (a0, a1, v2.clone())
    }

    fn values_eq(&self, other: &Self) -> bool {
        (self.2).0 == (other.2).0
    }
}

impl<A0, T1, A1> ArgList<(A0, A1)> for (Placeholder, Bound<T1>, Placeholder)
where
    T1: Clone + PartialEq + 'static,
{
    type Full = (A0, T1, A1);

    fn fill(&self, (a0, a1): (A0, A1)) -> Self::Full {
        let (_, Bound(v1), _) = self;
        (a0, v1.clone(), a1)
    }

    fn values_eq(&self, other: &Self) -> bool {
        (self.1).0 == (other.1).0
    }
}

impl<T0, A0, A1> ArgList<(A0, A1)> for (Bound<T0>, Placeholder, Placeholder)
where
    T0: Clone + PartialEq + 'static,
{
    type Full = (T0, A0, A1);

    fn fill(&self, (a0, a1): (A0, A1)) -> Self::Full {
        let (Bound(v0), _, _) = self;
        (v0.clone(), a0, a1)
    }

    fn values_eq(&self, other: &Self) -> bool {
        (self.0).0 == (other.0).0
    }
}

impl<A0, A1, A2> ArgList<(A0, A1, A2)> for (Placeholder, Placeholder, Placeholder) {
    type Full = (A0, A1, A2);

    fn fill(&self, supplied: (A0, A1, A2)) -> Self::Full {
        supplied
    }

    fn values_eq(&self, _: &Self) -> bool {
        true
    }
}

// TODO: arity 4+ patterns, if a consumer ever needs them
