//! Dispatch tests: registration, matching and in-place event mutation.

use panglery::{
    Event, HookContext, HookSpec, Pangler, PanglerError, Value, fields,
    testing::{CountingHandler, RecordingHandler},
};
use std::sync::{
    Arc, Mutex,
    atomic::{AtomicBool, Ordering},
};

mod common;
use common::{Log, logged, logging_handler};

#[test]
fn test_basic_event() {
    let fired = Arc::new(AtomicBool::new(false));
    let mut pangler: Pangler = Pangler::new();

    let flag = Arc::clone(&fired);
    let _handler = pangler
        .hook(HookSpec::new().when("event", "test"))
        .unwrap()
        .wrap(move |_ctx: &HookContext<'_>, _args: &Event| {
            flag.store(true, Ordering::SeqCst);
        });

    pangler.trigger(fields! { event: "test" }).unwrap();
    assert!(fired.load(Ordering::SeqCst));
}

#[test]
fn test_basic_event_without_decorator() {
    let fired = Arc::new(AtomicBool::new(false));
    let mut pangler: Pangler = Pangler::new();

    let flag = Arc::clone(&fired);
    pangler
        .add_hook(
            HookSpec::new().when("event", "test"),
            move |_ctx: &HookContext<'_>, _args: &Event| flag.store(true, Ordering::SeqCst),
        )
        .unwrap();

    pangler.trigger(fields! { event: "test" }).unwrap();
    assert!(fired.load(Ordering::SeqCst));
}

#[test]
fn test_hooking_nothing_fails() {
    let mut pangler: Pangler = Pangler::new();
    let result = pangler.add_handler(HookSpec::new(), CountingHandler::new());
    assert!(matches!(result, Err(PanglerError::EmptyHook)));
    assert!(matches!(
        pangler.hook(HookSpec::new().returns(["foo"])),
        Err(PanglerError::EmptyHook)
    ));
}

#[test]
fn test_triggering_nothing_fails() {
    let counter = CountingHandler::new();
    let mut pangler: Pangler = Pangler::new();
    pangler
        .add_handler(HookSpec::new().needs(["x"]), counter.clone())
        .unwrap();

    let err = pangler.trigger(fields! {}).unwrap_err();
    assert!(matches!(err, PanglerError::EmptyTrigger));
    assert_eq!(err.to_string(), "tried to trigger nothing");
    assert_eq!(counter.count(), 0);
}

#[test]
fn test_needs_gate_invocation() {
    let recorder = RecordingHandler::new();
    let mut pangler: Pangler = Pangler::new();
    pangler
        .add_handler(HookSpec::new().needs(["x"]), recorder.clone())
        .unwrap();

    pangler.trigger([("x", 5)]).unwrap();
    pangler.trigger([("y", 5)]).unwrap();

    assert_eq!(recorder.calls(), vec![fields! { x: 5 }]);
}

#[test]
fn test_modified_value_reaches_later_hook() {
    let observed = Arc::new(Mutex::new(None));
    let mut pangler: Pangler = Pangler::new();

    pangler
        .add_hook(
            HookSpec::new().modifies(["foo"]),
            |_ctx: &HookContext<'_>, args: &Event| -> Result<Event, PanglerError> {
                let foo: i64 = args.value("foo")?;
                Ok(fields! { foo: foo * 2 })
            },
        )
        .unwrap();

    let sink = Arc::clone(&observed);
    pangler
        .add_hook(
            HookSpec::new().needs(["foo"]),
            move |_ctx: &HookContext<'_>, args: &Event| {
                *sink.lock().unwrap() = args.get("foo").cloned();
            },
        )
        .unwrap();

    pangler.trigger(fields! { foo: 3 }).unwrap();
    assert_eq!(*observed.lock().unwrap(), Some(Value::from(6)));
}

#[test]
fn test_earlier_hook_can_enable_later_hook() {
    let recorder = RecordingHandler::new();
    let mut pangler: Pangler = Pangler::new();
    pangler
        .add_handler(
            HookSpec::new().needs(["path"]).returns(["size"]),
            RecordingHandler::responding(fields! { size: 42 }),
        )
        .unwrap();
    pangler
        .add_handler(HookSpec::new().needs(["size"]), recorder.clone())
        .unwrap();

    pangler.trigger(fields! { size: 1 }).unwrap();
    pangler.trigger(fields! { path: "/tmp/a" }).unwrap();

    assert_eq!(
        recorder.calls(),
        vec![fields! { size: 1 }, fields! { size: 42 }]
    );
}

#[test]
fn test_hooks_are_not_matched_twice() {
    let counter = CountingHandler::new();
    let mut pangler: Pangler = Pangler::new();
    pangler
        .add_handler(HookSpec::new().needs(["x"]), counter.clone())
        .unwrap();
    pangler
        .add_handler(
            HookSpec::new().needs(["x"]),
            RecordingHandler::responding(fields! { x: 2 }),
        )
        .unwrap();

    pangler.trigger([("x", 1)]).unwrap();
    assert_eq!(counter.count(), 1);
}

#[test]
fn test_conditions_select_by_literal() {
    let log: Log = Arc::default();
    let mut pangler: Pangler = Pangler::new();
    pangler
        .add_hook(
            HookSpec::new().when("event", "test1"),
            logging_handler(&log, "test1"),
        )
        .unwrap();
    pangler
        .add_hook(
            HookSpec::new().when("event", "test2"),
            logging_handler(&log, "test2"),
        )
        .unwrap();
    pangler
        .add_hook(HookSpec::new().needs(["foo"]), logging_handler(&log, "foo"))
        .unwrap();

    pangler.trigger(fields! { event: "test1" }).unwrap();
    pangler.trigger(fields! { event: "test2" }).unwrap();
    pangler.trigger(fields! { event: "test3", foo: "bar" }).unwrap();

    assert_eq!(logged(&log), ["test1", "test2", "foo"]);
}

#[test]
fn test_integer_guard_matches_float_field() {
    let counter = CountingHandler::new();
    let mut pangler: Pangler = Pangler::new();
    pangler
        .add_handler(HookSpec::new().when("n", 2), counter.clone())
        .unwrap();

    pangler.trigger([("n", Value::from(2.0))]).unwrap();
    pangler.trigger([("n", Value::from(2))]).unwrap();
    pangler.trigger([("n", Value::from(2.1))]).unwrap();
    assert_eq!(counter.count(), 2);
}

#[test]
fn test_condition_keys_are_not_arguments() {
    let recorder = RecordingHandler::new();
    let mut pangler: Pangler = Pangler::new();
    pangler
        .add_handler(
            HookSpec::new().needs(["foo"]).when("event", "save"),
            recorder.clone(),
        )
        .unwrap();

    pangler
        .trigger(fields! { event: "save", foo: 1, unrelated: 2 })
        .unwrap();
    assert_eq!(recorder.calls(), vec![fields! { foo: 1 }]);
}

#[test]
fn test_combine_fires_both_in_order() {
    let log: Log = Arc::default();
    let mut p1: Pangler = Pangler::new();
    let mut p2: Pangler = Pangler::new();
    p1.add_hook(HookSpec::new().needs(["x"]), logging_handler(&log, "p1"))
        .unwrap();
    p2.add_hook(HookSpec::new().needs(["x"]), logging_handler(&log, "p2"))
        .unwrap();

    let combined = Pangler::new().combine([&p1, &p2]);
    combined.trigger([("x", 1)]).unwrap();

    assert_eq!(logged(&log), ["p1", "p2"]);
    assert_eq!((p1.len(), p2.len()), (1, 1));
}

#[test]
fn test_handler_error_propagates_unchanged() {
    let mut pangler: Pangler = Pangler::new();
    pangler
        .add_hook(
            HookSpec::new().needs(["x"]),
            |_ctx: &HookContext<'_>, _args: &Event| -> Result<(), std::io::Error> {
                Err(std::io::Error::new(std::io::ErrorKind::NotFound, "gone"))
            },
        )
        .unwrap();

    let inner = match pangler.trigger([("x", 1)]) {
        Err(PanglerError::Handler(inner)) => inner,
        other => panic!("expected a handler error, got {other:?}"),
    };
    let io = inner.downcast::<std::io::Error>().unwrap();
    assert_eq!(io.kind(), std::io::ErrorKind::NotFound);
}
