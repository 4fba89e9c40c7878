/*
    ABSTRACT: Definition of the callables a listener can wrap: plain function
    pointers and method pointers paired with a shared receiver at call time
    (see bound_fn.rs). Besides invocation, a callable exposes its pointer
    address, which is the identity used when two listeners are compared.
*/

/// A plain function pointer taking the parameter tuple `Args`.
///
/// Return values are discarded; dispatch is fire-and-forget. Closures are
/// deliberately not callables — they have no comparable identity, and any
/// state a listener needs travels as a bound value instead.
pub trait Callable<Args>: 'static {
    fn invoke(&self, args: Args);

    /// Address of the function pointer, used as its identity.
    fn addr(&self) -> usize;
}

impl<R: 'static> Callable<()> for fn() -> R {
    fn invoke(&self, _: ()) {
        self();
    }

    fn addr(&self) -> usize {
        *self as usize
    }
}

impl<R: 'static, T0: 'static> Callable<(T0,)> for fn(T0) -> R {
    fn invoke(&self, (a0,): (T0,)) {
        self(a0);
    }

    fn addr(&self) -> usize {
        *self as usize
    }
}

impl<R: 'static, T0: 'static, T1: 'static> Callable<(T0, T1)> for fn(T0, T1) -> R {
    fn invoke(&self, (a0, a1): (T0, T1)) {
        self(a0, a1);
    }

    fn addr(&self) -> usize {
        *self as usize
    }
}

impl<R: 'static, T0: 'static, T1: 'static, T2: 'static> Callable<(T0, T1, T2)>
    for fn(T0, T1, T2) -> R
{
    fn invoke(&self, (a0, a1, a2): (T0, T1, T2)) {
        self(a0, a1, a2);
    }

    fn addr(&self) -> usize {
        *self as usize
    }
}

/// A method pointer: a function whose first parameter is `&Recv`, invoked
/// against a receiver supplied by the listener that stores it.
///
/// Receivers are shared references; a receiver that needs to mutate itself
/// does so through interior mutability.
pub trait Method<Recv, Args>: 'static {
    fn invoke(&self, receiver: &Recv, args: Args);

    /// Address of the method pointer, used as its identity.
    fn addr(&self) -> usize;
}

impl<Recv: 'static, R: 'static> Method<Recv, ()> for fn(&Recv) -> R {
    fn invoke(&self, receiver: &Recv, _: ()) {
        self(receiver);
    }

    fn addr(&self) -> usize {
        *self as usize
    }
}

impl<Recv: 'static, R: 'static, T0: 'static> Method<Recv, (T0,)> for fn(&Recv, T0) -> R {
    fn invoke(&self, receiver: &Recv, (a0,): (T0,)) {
        self(receiver, a0);
    }

    fn addr(&self) -> usize {
        *self as usize
    }
}

impl<Recv: 'static, R: 'static, T0: 'static, T1: 'static> Method<Recv, (T0, T1)>
    for fn(&Recv, T0, T1) -> R
{
    fn invoke(&self, receiver: &Recv, (a0, a1): (T0, T1)) {
        self(receiver, a0, a1);
    }

    fn addr(&self) -> usize {
        *self as usize
    }
}

impl<Recv: 'static, R: 'static, T0: 'static, T1: 'static, T2: 'static> Method<Recv, (T0, T1, T2)>
    for fn(&Recv, T0, T1, T2) -> R
{
    fn invoke(&self, receiver: &Recv, (a0, a1, a2): (T0, T1, T2)) {
        self(receiver, a0, a1, a2);
    }

    fn addr(&self) -> usize {
        *self as usize
    }
}
