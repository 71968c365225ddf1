//! The two-phase handler-chain dispatcher.
//!
//! Pre-phase handlers run in registration order with snapshot/restore
//! semantics: a handler's in-place edits only survive when it returns
//! [`ChatOutcome::Modified`] or [`ChatOutcome::Consumed`]. Post-phase
//! handlers are a notification fan-out with no control over delivery.

use chatproc_api::{
    ChatContext, ChatHandlerRegistry, ChatOutcome, HandlerId, PostChatHandler, PreChatHandler,
};
use std::panic::{self, AssertUnwindSafe};
use tracing::error;

struct PreEntry {
    id: HandlerId,
    handler: Box<dyn PreChatHandler>,
}

struct PostEntry {
    id: HandlerId,
    handler: Box<dyn PostChatHandler>,
}

/// Owns the ordered pre- and post-phase handler registries.
///
/// One dispatcher is created per hosting session and lives for its whole
/// lifetime. Dispatch takes `&mut self`, so registration cannot race an
/// in-flight phase; there is no internal locking.
#[derive(Default)]
pub struct ChatDispatcher {
    pre: Vec<PreEntry>,
    post: Vec<PostEntry>,
}

impl ChatDispatcher {
    pub fn new() -> ChatDispatcher {
        Default::default()
    }

    /// Runs the pre-phase chain over `ctx`.
    ///
    /// Returns `Veto` if any handler vetoed, otherwise `Modified` if the
    /// committed context carries handler edits and `Unchanged` if it is
    /// field-for-field the input. A `Consumed` handler short-circuits the
    /// chain but reports as `Modified` to the caller, which only needs to
    /// know "deliver with these edits".
    ///
    /// A panicking handler is reported and treated as `Unchanged`.
    pub fn run_pre_phase(&mut self, ctx: &mut ChatContext) -> ChatOutcome {
        // Stable snapshot of the registry: handlers removed mid-phase are
        // skipped, handlers added mid-phase wait for the next message.
        let ids: Vec<HandlerId> = self.pre.iter().map(|entry| entry.id).collect();
        let mut modified = false;
        for id in ids {
            let Some(entry) = self.pre.iter_mut().find(|entry| entry.id == id) else {
                continue;
            };
            let snapshot = ctx.clone();
            let outcome =
                match panic::catch_unwind(AssertUnwindSafe(|| entry.handler.on_chat_pre(ctx))) {
                    Ok(outcome) => outcome,
                    Err(_) => {
                        error!("pre-phase chat handler {:?} panicked", id);
                        ChatOutcome::Unchanged
                    }
                };
            // The sender is not a handler-editable field.
            ctx.sender = snapshot.sender;
            match outcome {
                ChatOutcome::Veto => return ChatOutcome::Veto,
                ChatOutcome::Unchanged => *ctx = snapshot,
                ChatOutcome::Modified => modified = true,
                ChatOutcome::Consumed => return ChatOutcome::Modified,
            }
        }
        if modified {
            ChatOutcome::Modified
        } else {
            ChatOutcome::Unchanged
        }
    }

    /// Notifies all post-phase handlers with the final, already-committed
    /// context. A panicking handler is reported and does not prevent the
    /// remaining handlers from running.
    pub fn run_post_phase(&mut self, ctx: &ChatContext) {
        let ids: Vec<HandlerId> = self.post.iter().map(|entry| entry.id).collect();
        for id in ids {
            let Some(entry) = self.post.iter_mut().find(|entry| entry.id == id) else {
                continue;
            };
            if panic::catch_unwind(AssertUnwindSafe(|| entry.handler.on_chat_post(ctx))).is_err() {
                error!("post-phase chat handler {:?} panicked", id);
            }
        }
    }

    pub fn pre_len(&self) -> usize {
        self.pre.len()
    }

    pub fn post_len(&self) -> usize {
        self.post.len()
    }
}

impl ChatHandlerRegistry for ChatDispatcher {
    fn register_pre(&mut self, handler: Box<dyn PreChatHandler>) -> HandlerId {
        let id = HandlerId::next();
        self.pre.push(PreEntry { id, handler });
        id
    }

    fn deregister_pre(&mut self, id: HandlerId) {
        if let Some(pos) = self.pre.iter().position(|entry| entry.id == id) {
            self.pre.remove(pos);
        }
    }

    fn register_post(&mut self, handler: Box<dyn PostChatHandler>) -> HandlerId {
        let id = HandlerId::next();
        self.post.push(PostEntry { id, handler });
        id
    }

    fn deregister_post(&mut self, id: HandlerId) {
        if let Some(pos) = self.post.iter().position(|entry| entry.id == id) {
            self.post.remove(pos);
        }
    }
}
