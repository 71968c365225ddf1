//! Host-module lifecycle.
//!
//! The host constructs one [`ChatPlugin`] per session and hands out its
//! registration surface directly; there is no global named lookup.

use crate::config::ChatConfig;
use crate::directory::PlayerDirectory;
use crate::dispatch::ChatDispatcher;
use crate::event::SayTextEvent;
use crate::intercept::{ChatInterceptor, Disposition};
use tracing::info;

/// User-message id of the outbound chat line.
pub const SAY_TEXT_MESSAGE_ID: u32 = 118;

/// The transport's hook-registration boundary. After `hook_pre`, the
/// transport calls [`ChatPlugin::on_user_message`] for every outbound
/// message with that id before delivering it.
pub trait UserMessageHooks {
    fn hook_pre(&mut self, message_id: u32);
    fn unhook_pre(&mut self, message_id: u32);
}

/// Packages the interceptor with its load/unload lifecycle.
pub struct ChatPlugin<D> {
    interceptor: ChatInterceptor<D>,
}

impl<D: PlayerDirectory> ChatPlugin<D> {
    pub fn new(directory: D, config: ChatConfig) -> ChatPlugin<D> {
        ChatPlugin {
            interceptor: ChatInterceptor::new(directory, config),
        }
    }

    pub fn load(&mut self, hooks: &mut dyn UserMessageHooks) {
        hooks.hook_pre(SAY_TEXT_MESSAGE_ID);
        info!("chat pipeline hooked user message {}", SAY_TEXT_MESSAGE_ID);
    }

    pub fn unload(&mut self, hooks: &mut dyn UserMessageHooks) {
        hooks.unhook_pre(SAY_TEXT_MESSAGE_ID);
        info!("chat pipeline unhooked user message {}", SAY_TEXT_MESSAGE_ID);
    }

    /// The transport's callback for a hooked user message.
    pub fn on_user_message(&mut self, event: &mut dyn SayTextEvent) -> Disposition {
        self.interceptor.on_say_text(event)
    }

    /// The registration surface for external handlers.
    pub fn registry_mut(&mut self) -> &mut ChatDispatcher {
        self.interceptor.dispatcher_mut()
    }

    pub fn interceptor(&self) -> &ChatInterceptor<D> {
        &self.interceptor
    }
}
