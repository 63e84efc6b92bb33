//! Host hooks threaded through long-running kernels.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};

static NEVER_CANCELLED: AtomicBool = AtomicBool::new(false);
static DISCARD: fn(&str) = |_| {};

/// Borrowed cancellation flag and progress-message sink.
///
/// The flag belongs to the host; kernels only ever read it. Messages are
/// delivered on the thread that called the kernel.
#[derive(Clone, Copy)]
pub struct ExecutionContext<'a> {
    cancel: &'a AtomicBool,
    messenger: &'a dyn Fn(&str),
}

impl<'a> ExecutionContext<'a> {
    pub fn new(cancel: &'a AtomicBool, messenger: &'a dyn Fn(&str)) -> Self {
        Self { cancel, messenger }
    }

    /// Context that is never cancelled and drops every message.
    pub fn detached() -> ExecutionContext<'static> {
        ExecutionContext {
            cancel: &NEVER_CANCELLED,
            messenger: &DISCARD,
        }
    }

    #[inline]
    pub fn is_cancelled(&self) -> bool {
        self.cancel.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn cancel_flag(&self) -> &'a AtomicBool {
        self.cancel
    }

    pub fn message(&self, text: &str) {
        (self.messenger)(text);
    }
}

impl fmt::Debug for ExecutionContext<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExecutionContext")
            .field("cancelled", &self.is_cancelled())
            .finish_non_exhaustive()
    }
}
