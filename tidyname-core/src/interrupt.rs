use std::sync::atomic::{AtomicBool, Ordering};

static PROMPT_ACTIVE: AtomicBool = AtomicBool::new(false);

/// Marks a `[y/N]` prompt as waiting for input while in scope, so a Ctrl-C
/// handler can exit cleanly instead of waiting for a batch to finish.
pub struct PromptGuard;

impl PromptGuard {
    pub fn activate() -> Self {
        PROMPT_ACTIVE.store(true, Ordering::SeqCst);
        Self
    }
}

impl Drop for PromptGuard {
    fn drop(&mut self) {
        PROMPT_ACTIVE.store(false, Ordering::SeqCst);
    }
}

pub fn prompt_active() -> bool {
    PROMPT_ACTIVE.load(Ordering::SeqCst)
}
