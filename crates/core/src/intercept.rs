//! The interception entry point.
//!
//! Owns the hook into the outbound chat user-message: classifies the
//! message, computes the recipient set, runs the pre-phase chain, rewrites
//! the event buffer, and notifies the post-phase chain.

use crate::config::ChatConfig;
use crate::directory::PlayerDirectory;
use crate::dispatch::ChatDispatcher;
use crate::event::SayTextEvent;
use crate::format;
use chatproc_api::{ChatContext, ChatFlags, ChatOutcome, PlayerId};
use tracing::debug;

/// Terminal state of one intercepted message.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Disposition {
    /// The event does not concern the pipeline; the transport delivers the
    /// original fields.
    Passthrough,
    /// Nothing is delivered.
    Suppressed,
    /// The event fields were rewritten in place; the transport must deliver
    /// the rewritten fields.
    Rewritten,
}

/// Intercepts chat user-messages and runs them through the handler chain.
pub struct ChatInterceptor<D> {
    dispatcher: ChatDispatcher,
    directory: D,
    config: ChatConfig,
}

impl<D: PlayerDirectory> ChatInterceptor<D> {
    pub fn new(directory: D, config: ChatConfig) -> ChatInterceptor<D> {
        ChatInterceptor {
            dispatcher: ChatDispatcher::new(),
            directory,
            config,
        }
    }

    pub fn dispatcher(&self) -> &ChatDispatcher {
        &self.dispatcher
    }

    /// The registration surface for external handlers.
    pub fn dispatcher_mut(&mut self) -> &mut ChatDispatcher {
        &mut self.dispatcher
    }

    pub fn directory(&self) -> &D {
        &self.directory
    }

    /// Processes one intercepted chat user-message, synchronously and
    /// exactly once. On [`Disposition::Rewritten`] the event's name,
    /// message, and channel fields carry the final values.
    pub fn on_say_text(&mut self, event: &mut dyn SayTextEvent) -> Disposition {
        let Ok(sender) = PlayerId::try_from(event.sender_index()) else {
            return Disposition::Passthrough;
        };
        let Some(player) = self.directory.player(sender) else {
            return Disposition::Passthrough;
        };
        if player.bot {
            return Disposition::Passthrough;
        }

        let message = event.message().to_string();
        if message.is_empty() {
            return Disposition::Suppressed;
        }

        let team_scoped = !event.channel().contains("All");
        let mut flags = ChatFlags::empty();
        if team_scoped {
            flags |= ChatFlags::TEAM;
        }
        if !player.alive {
            flags |= ChatFlags::DEAD;
        }

        let recipients = self.directory.connected(team_scoped.then_some(player.team));
        if recipients.is_empty() {
            debug!(sender, "chat message has no recipients");
            return Disposition::Suppressed;
        }

        let chat_sound = event.chat_sound();
        let mut ctx = ChatContext {
            sender,
            name: event.name().to_string(),
            message,
            recipients,
            flags,
        };

        if self.dispatcher.run_pre_phase(&mut ctx) == ChatOutcome::Veto {
            debug!(sender, "chat message vetoed");
            return Disposition::Suppressed;
        }

        let label = format::format_label(&self.config, player.team, ctx.flags, &ctx.name);
        let wire_text = format::format_wire_text(&self.config, &label, &ctx.message);
        ctx.name = label;

        event.set_name(&ctx.name);
        event.set_message(&ctx.message);
        event.set_channel(&wire_text);
        event.set_chat_sound(chat_sound);

        self.dispatcher.run_post_phase(&ctx);

        debug!(
            sender,
            recipients = ctx.recipients.len(),
            "chat message rewritten"
        );
        Disposition::Rewritten
    }
}
