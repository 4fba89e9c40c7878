//! Tests for the `Emitter` facade: signature matching, dispatch order,
//! one-shot semantics, removal models and bulk clears.

use evbind::{bound, BoundFn, Emitter, _1};
use std::cell::RefCell;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::rc::Rc;

type Log = Rc<RefCell<Vec<String>>>;

/// Helper: a shared call-log that listeners append to via a bound value.
fn make_log() -> Log {
    Rc::new(RefCell::new(Vec::new()))
}

fn tagged(log: Log, tag: &'static str) {
    log.borrow_mut().push(tag.to_string());
}

fn tagged_listener(log: &Log, tag: &'static str) -> BoundFn<()> {
    BoundFn::bind(
        tagged as fn(Log, &'static str),
        (bound(log.clone()), bound(tag)),
    )
}

// ============================================================================
// Signature matching
// ============================================================================

fn one_int(log: Log, v: i32) {
    log.borrow_mut().push(format!("i32:{v}"));
}

fn one_f64(log: Log, v: f64) {
    log.borrow_mut().push(format!("f64:{v:?}"));
}

#[test]
fn emission_only_reaches_the_matching_signature() {
    let e = Emitter::new();
    let log = make_log();

    e.on(
        7,
        BoundFn::bind(one_int as fn(Log, i32), (bound(log.clone()), _1)),
    );
    e.on(
        7,
        BoundFn::bind(one_f64 as fn(Log, f64), (bound(log.clone()), _1)),
    );

    e.emit(7, (5i32,));
    assert_eq!(*log.borrow(), vec!["i32:5"]);

    e.emit(7, (2.5f64,));
    assert_eq!(*log.borrow(), vec!["i32:5", "f64:2.5"]);
}

#[test]
fn emitting_an_unregistered_signature_or_event_is_a_no_op() {
    let e = Emitter::new();
    let log = make_log();

    e.on(
        7,
        BoundFn::bind(one_int as fn(Log, i32), (bound(log.clone()), _1)),
    );

    // Same event, signature nobody registered under.
    e.emit(7, (1i32, 2i32));
    // Event id nobody registered under at all.
    e.emit(404, (5i32,));

    assert!(log.borrow().is_empty());
}

#[test]
fn partially_bound_listener_mixes_fixed_and_supplied_values() {
    const NOTHING: i64 = 0;
    const TWO_THINGS: i64 = 2;

    fn on_none(log: Log) {
        log.borrow_mut().push("on_none".to_string());
    }

    fn on_two(log: Log, a: f64, b: i32) {
        log.borrow_mut().push(format!("on_two:{a:?}:{b}"));
    }

    let e = Emitter::new();
    let log = make_log();

    e.on(NOTHING, BoundFn::bind(on_none as fn(Log), (bound(log.clone()),)));
    e.on(
        TWO_THINGS,
        BoundFn::bind(
            on_two as fn(Log, f64, i32),
            (bound(log.clone()), _1, bound(8421)),
        ),
    );

    e.emit(NOTHING, ());
    // One unbound value; position 2 was fixed to 8421 at bind time.
    e.emit(TWO_THINGS, (100.0,));
    // Typed (i32, i32): reaches nothing.
    e.emit(TWO_THINGS, (1i32, 2i32));

    assert_eq!(*log.borrow(), vec!["on_none", "on_two:100.0:8421"]);
}

// ============================================================================
// Order and duplicates
// ============================================================================

#[test]
fn listeners_run_in_registration_order() {
    let e = Emitter::new();
    let log = make_log();

    e.on(5, tagged_listener(&log, "h1"));
    e.on(5, tagged_listener(&log, "h2"));
    e.on(5, tagged_listener(&log, "h3"));

    e.emit(5, ());

    assert_eq!(*log.borrow(), vec!["h1", "h2", "h3"]);
}

#[test]
fn duplicate_registrations_are_independent() {
    let e = Emitter::new();
    let log = make_log();

    let id1 = e.on(5, tagged_listener(&log, "dup"));
    let id2 = e.on(5, tagged_listener(&log, "dup"));
    assert_ne!(id1, id2);

    e.emit(5, ());
    assert_eq!(*log.borrow(), vec!["dup", "dup"]);

    // Removing one by handle leaves the other invocable.
    assert!(e.off(5, id1));
    e.emit(5, ());
    assert_eq!(*log.borrow(), vec!["dup", "dup", "dup"]);
}

// ============================================================================
// Handle-based removal
// ============================================================================

#[test]
fn off_removes_by_handle_and_double_off_is_safe() {
    let e = Emitter::new();
    let log = make_log();

    let id = e.on(5, tagged_listener(&log, "h"));
    assert!(e.off(5, id));
    // Second removal of the same id: indistinguishable from never-existed.
    assert!(!e.off(5, id));

    e.emit(5, ());
    assert!(log.borrow().is_empty());
}

// ============================================================================
// Equality-based removal
// ============================================================================

fn two_bound(log: Log, a: i32, b: i32) {
    log.borrow_mut().push(format!("{a}:{b}"));
}

#[test]
fn removal_by_equality_takes_the_first_equal_entry_only() {
    let e = Emitter::new();
    let log = make_log();
    let listener = |b: i32| {
        BoundFn::bind(
            two_bound as fn(Log, i32, i32),
            (bound(log.clone()), bound(1), bound(b)),
        )
    };

    e.on(21, listener(2));
    e.on(21, listener(2));
    assert_eq!(e.handler_count(21), 2);

    // A different fixed value matches nothing.
    assert!(!e.remove_handler(21, listener(3)));
    assert_eq!(e.handler_count(21), 2);

    assert!(e.remove_handler(21, listener(2)));
    assert_eq!(e.handler_count(21), 1);

    e.emit(21, ());
    assert_eq!(*log.borrow(), vec!["1:2"]);
}

#[test]
fn remove_handlers_takes_every_equal_entry() {
    let e = Emitter::new();
    let log = make_log();

    e.on(22, tagged_listener(&log, "same"));
    e.on(22, tagged_listener(&log, "same"));
    e.on(22, tagged_listener(&log, "same"));
    e.on(22, tagged_listener(&log, "other"));

    assert_eq!(e.remove_handlers(22, tagged_listener(&log, "same")), 3);
    assert_eq!(e.handler_count(22), 1);

    e.emit(22, ());
    assert_eq!(*log.borrow(), vec!["other"]);
}

// ============================================================================
// One-shot semantics
// ============================================================================

#[test]
fn once_fires_exactly_once() {
    let e = Emitter::new();
    let log = make_log();

    e.once(11, tagged_listener(&log, "once"));
    e.on(11, tagged_listener(&log, "always"));

    e.emit(11, ());
    e.emit(11, ());

    assert_eq!(*log.borrow(), vec!["once", "always", "always"]);
    assert_eq!(e.handler_count(11), 1);
}

fn reenter_once(em: Emitter, log: Log, v: i32) {
    log.borrow_mut().push(format!("once:{v}"));
    if v < 3 {
        em.emit(11, (v + 1,));
    }
}

#[test]
fn once_fires_exactly_once_under_reentrant_emit() {
    let e = Emitter::new();
    let log = make_log();

    e.once(
        11,
        BoundFn::bind(
            reenter_once as fn(Emitter, Log, i32),
            (bound(e.clone()), bound(log.clone()), _1),
        ),
    );

    e.emit(11, (0,));

    // The re-entrant emit found the entry already detached.
    assert_eq!(*log.borrow(), vec!["once:0"]);
    assert_eq!(e.handler_count(11), 0);
}

fn rearm(em: Emitter, log: Log, v: i32) {
    log.borrow_mut().push(format!("rearm:{v}"));
    let listener = BoundFn::bind(
        rearm as fn(Emitter, Log, i32),
        (bound(em.clone()), bound(log.clone()), _1),
    );
    em.once(13, listener);
}

#[test]
fn once_listener_may_re_register_itself() {
    let e = Emitter::new();
    let log = make_log();

    e.once(
        13,
        BoundFn::bind(
            rearm as fn(Emitter, Log, i32),
            (bound(e.clone()), bound(log.clone()), _1),
        ),
    );

    e.emit(13, (1,));
    assert_eq!(*log.borrow(), vec!["rearm:1"]);
    assert_eq!(e.handler_count(13), 1);

    e.emit(13, (2,));
    assert_eq!(*log.borrow(), vec!["rearm:1", "rearm:2"]);
}

// ============================================================================
// Self-modifying rounds (snapshot semantics)
// ============================================================================

fn remover(em: Emitter, log: Log) {
    log.borrow_mut().push("remover".to_string());
    let victim = BoundFn::bind(
        tagged as fn(Log, &'static str),
        (bound(log.clone()), bound("victim")),
    );
    em.remove_handler(17, victim);
}

#[test]
fn listener_removed_during_the_round_still_runs_in_it() {
    let e = Emitter::new();
    let log = make_log();

    e.on(
        17,
        BoundFn::bind(
            remover as fn(Emitter, Log),
            (bound(e.clone()), bound(log.clone())),
        ),
    );
    e.on(17, tagged_listener(&log, "victim"));

    e.emit(17, ());
    // The round was snapshotted before the remover ran.
    assert_eq!(*log.borrow(), vec!["remover", "victim"]);

    e.emit(17, ());
    assert_eq!(*log.borrow(), vec!["remover", "victim", "remover"]);
}

fn adder(em: Emitter, log: Log) {
    log.borrow_mut().push("adder".to_string());
    let late = BoundFn::bind(
        tagged as fn(Log, &'static str),
        (bound(log.clone()), bound("late")),
    );
    em.on(19, late);
}

#[test]
fn listener_added_during_the_round_waits_for_the_next_one() {
    let e = Emitter::new();
    let log = make_log();

    e.on(
        19,
        BoundFn::bind(
            adder as fn(Emitter, Log),
            (bound(e.clone()), bound(log.clone())),
        ),
    );

    e.emit(19, ());
    assert_eq!(*log.borrow(), vec!["adder"]);

    e.emit(19, ());
    assert_eq!(*log.borrow(), vec!["adder", "adder", "late"]);
}

// ============================================================================
// Bulk clears
// ============================================================================

#[test]
fn remove_all_clears_every_signature_of_one_event() {
    let e = Emitter::new();
    let log = make_log();

    e.on(7, tagged_listener(&log, "nullary"));
    e.on(
        7,
        BoundFn::bind(one_int as fn(Log, i32), (bound(log.clone()), _1)),
    );
    e.on(8, tagged_listener(&log, "other-event"));

    e.remove_all(7);
    assert_eq!(e.handler_count(7), 0);

    e.emit(7, ());
    e.emit(7, (1i32,));
    e.emit(8, ());

    assert_eq!(*log.borrow(), vec!["other-event"]);
}

#[test]
fn clear_leaves_every_event_unregistered() {
    let e = Emitter::new();
    let log = make_log();

    e.on(1, tagged_listener(&log, "a"));
    e.on(2, tagged_listener(&log, "b"));

    e.clear();
    e.emit(1, ());
    e.emit(2, ());

    assert!(log.borrow().is_empty());
    assert_eq!(e.handler_count(1), 0);
    assert_eq!(e.handler_count(2), 0);
}

// ============================================================================
// Shared registrations across clones
// ============================================================================

#[test]
fn clones_share_one_registry() {
    let e = Emitter::new();
    let e2 = e.clone();
    let log = make_log();

    assert!(e == e2);
    assert!(e != Emitter::new());

    e2.on(3, tagged_listener(&log, "via-clone"));
    e.emit(3, ());

    assert_eq!(*log.borrow(), vec!["via-clone"]);

    e.remove_all(3);
    assert_eq!(e2.handler_count(3), 0);
}

// ============================================================================
// Callee failure propagates (fail-fast)
// ============================================================================

fn explode() {
    panic!("listener failed");
}

#[test]
fn panicking_listener_aborts_the_round_and_propagates() {
    let e = Emitter::new();
    let log = make_log();

    e.on(9, explode as fn());
    e.on(9, tagged_listener(&log, "after"));

    let result = catch_unwind(AssertUnwindSafe(|| e.emit(9, ())));

    assert!(result.is_err(), "emit should propagate listener panics");
    assert!(
        log.borrow().is_empty(),
        "listeners after the failing one must not run"
    );

    // The registry stays usable afterwards.
    e.emit(10, ());
    assert_eq!(e.handler_count(9), 2);
}
