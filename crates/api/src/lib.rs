//! The handler-facing API for the chat pipeline.
//!
//! External modules implement [`PreChatHandler`] and/or [`PostChatHandler`]
//! and register them through a [`ChatHandlerRegistry`]. Pre-phase handlers
//! run before a message is committed and can veto, modify, or consume it;
//! post-phase handlers are notified after delivery and have no control over
//! it.

#![deny(rust_2018_idioms)]

#[macro_use]
extern crate bitflags;

use std::sync::atomic::{AtomicU64, Ordering};

/// Opaque handle of a connected participant.
pub type PlayerId = u32;

/// Team affiliation of a participant.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Team {
    Red,
    Blue,
    Spectator,
    /// Not affiliated with any team.
    None,
}

bitflags! {
    /// Delivery attributes of a chat message.
    ///
    /// Consumers may carry additional bits; the pipeline preserves bits it
    /// does not know about.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct ChatFlags: u32 {
        /// The message is restricted to the sender's team.
        const TEAM = 0x01;
        /// The sender is not alive.
        const DEAD = 0x02;
    }
}

/// The mutable unit passed through the pre-phase chain.
///
/// Handlers receive exclusive mutable access and edit fields in place. Edits
/// only take effect when the handler returns [`ChatOutcome::Modified`] or
/// [`ChatOutcome::Consumed`]; on [`ChatOutcome::Unchanged`] the dispatcher
/// restores every field from its pre-invocation snapshot. The `sender` field
/// is restored after every handler regardless of outcome.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChatContext {
    pub sender: PlayerId,
    /// Display label for the sender.
    pub name: String,
    /// Message text.
    pub message: String,
    /// Participants who will receive the message. Unique membership is not
    /// enforced.
    pub recipients: Vec<PlayerId>,
    pub flags: ChatFlags,
}

/// Returned by every pre-phase handler and by the dispatcher itself.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChatOutcome {
    /// Reject the message entirely; it must not be delivered.
    Veto,
    /// The handler inspected but made no decision; any edits it performed
    /// are discarded.
    Unchanged,
    /// The handler's edits are authoritative and are carried forward to
    /// subsequent handlers.
    Modified,
    /// The handler's edits are authoritative and final; no further pre-phase
    /// handlers run, but delivery proceeds.
    Consumed,
}

/// A handler invoked before a message is committed.
pub trait PreChatHandler {
    fn on_chat_pre(&mut self, ctx: &mut ChatContext) -> ChatOutcome;
}

impl<F> PreChatHandler for F
where
    F: FnMut(&mut ChatContext) -> ChatOutcome,
{
    fn on_chat_pre(&mut self, ctx: &mut ChatContext) -> ChatOutcome {
        self(ctx)
    }
}

/// A handler notified after a message has been delivered.
///
/// The context is final at this point; edits here cannot affect delivery.
pub trait PostChatHandler {
    fn on_chat_post(&mut self, ctx: &ChatContext);
}

impl<F> PostChatHandler for F
where
    F: FnMut(&ChatContext),
{
    fn on_chat_post(&mut self, ctx: &ChatContext) {
        self(ctx)
    }
}

static HANDLER_ID_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Token identifying one handler registration.
///
/// Registering the same callable twice yields two distinct tokens, each
/// independently removable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct HandlerId(u64);

impl HandlerId {
    /// Allocates a fresh process-unique id.
    pub fn next() -> HandlerId {
        HandlerId(HANDLER_ID_COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

/// Registration surface for both handler phases.
///
/// Registration order is dispatch order. Deregistering a token that is not
/// currently registered is a no-op.
pub trait ChatHandlerRegistry {
    fn register_pre(&mut self, handler: Box<dyn PreChatHandler>) -> HandlerId;
    fn deregister_pre(&mut self, id: HandlerId);
    fn register_post(&mut self, handler: Box<dyn PostChatHandler>) -> HandlerId;
    fn deregister_post(&mut self, id: HandlerId);
}
