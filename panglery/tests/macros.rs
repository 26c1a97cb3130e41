//! `#[hook]` attribute tests.
#![cfg(feature = "macros")]

use panglery::{Event, HookContext, Pangler, PanglerError, fields, hook};
use std::sync::{
    Arc,
    atomic::{AtomicU32, Ordering},
};

mod common;
use common::Widget;

#[hook(modifies(foo), when(event = "double"))]
fn double(_ctx: &HookContext<'_>, args: &Event) -> Result<Event, PanglerError> {
    let foo: i64 = args.value("foo")?;
    Ok(fields! { foo: foo * 2 })
}

#[hook(needs(foo), returns("seen"))]
fn mark_seen(_ctx: &HookContext<'_>, _args: &Event) -> Event {
    fields! { seen: true }
}

#[hook(when(event = "flag", level = 3))]
fn raise_flag(ctx: &HookContext<'_, Widget>, _args: &Event) {
    if let Some(widget) = ctx.instance() {
        widget.flags.fetch_or(0b100, Ordering::SeqCst);
    }
}

#[test]
fn test_register_adds_hook_with_declared_contract() {
    let mut pangler: Pangler = Pangler::new();
    register_double(&mut pangler).unwrap();
    register_mark_seen(&mut pangler).unwrap();

    let hook = &pangler.hooks()[0];
    assert!(hook.needs().contains("foo"));
    assert!(hook.needs().contains("event"));
    assert!(hook.returns().contains("foo"));
    assert!(!hook.parameters().contains("event"));

    let mut event = fields! { event: "double", foo: 3 };
    pangler.dispatch(&mut event).unwrap();
    assert_eq!(event, fields! { event: "double", foo: 6, seen: true });
}

#[test]
fn test_condition_mismatch_skips_macro_hook() {
    let mut pangler: Pangler = Pangler::new();
    register_double(&mut pangler).unwrap();

    let mut event = fields! { event: "triple", foo: 3 };
    pangler.dispatch(&mut event).unwrap();
    assert_eq!(event.get("foo"), Some(&3.into()));
}

#[test]
fn test_register_infers_instance_type() {
    let mut prototype: Pangler<Widget> = Pangler::new();
    register_raise_flag(&mut prototype).unwrap();

    let widget = Arc::new(Widget {
        flags: AtomicU32::new(0b001),
    });
    let bound = prototype.bind(&widget);
    bound.trigger(fields! { event: "flag", level: 2 }).unwrap();
    assert_eq!(widget.flags(), 0b001);
    bound.trigger(fields! { event: "flag", level: 3 }).unwrap();
    assert_eq!(widget.flags(), 0b101);
}
