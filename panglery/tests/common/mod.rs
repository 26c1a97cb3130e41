#![allow(dead_code)]

use panglery::{Event, HookContext, HookSpec, Pangler};
use std::sync::{
    Arc, Mutex,
    atomic::{AtomicU32, Ordering},
};

// ============================================================================
// Test Instance Types
// ============================================================================

#[derive(Debug, Default)]
pub struct Widget {
    pub flags: AtomicU32,
}

impl Widget {
    pub fn flags(&self) -> u32 {
        self.flags.load(Ordering::SeqCst)
    }
}

// ============================================================================
// Test Hooks
// ============================================================================

pub type Log = Arc<Mutex<Vec<String>>>;

/// A handler that appends `name` to `log` whenever it fires.
pub fn logging_handler(
    log: &Log,
    name: &str,
) -> impl Fn(&HookContext<'_>, &Event) + Clone + Send + Sync + 'static {
    let log = Arc::clone(log);
    let name = name.to_owned();
    move |_ctx: &HookContext<'_>, _args: &Event| log.lock().unwrap().push(name.clone())
}

pub fn logged(log: &Log) -> Vec<String> {
    log.lock().unwrap().clone()
}

/// A widget pangler whose single hook sets `bit` on the bound widget when
/// `event == "flag"`.
pub fn flag_hooks(bit: u32) -> Pangler<Widget> {
    let mut pangler = Pangler::new();
    pangler
        .add_hook(
            HookSpec::new().when("event", "flag"),
            move |ctx: &HookContext<'_, Widget>, _args: &Event| {
                let widget = ctx.instance().expect("flag hooks run bound");
                widget.flags.fetch_or(bit, Ordering::SeqCst);
            },
        )
        .unwrap();
    pangler
}
