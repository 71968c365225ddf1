//! The raw transport-event boundary.

/// Typed accessors over the outbound chat user-message.
///
/// The transport owns the buffer; the interceptor reads every field and
/// rewrites the name, message, and channel fields before reporting the
/// event as rewritten.
pub trait SayTextEvent {
    /// Entity index of the originating participant.
    fn sender_index(&self) -> i32;
    /// Display label for the sender.
    fn name(&self) -> &str;
    /// Message text.
    fn message(&self) -> &str;
    /// Channel name. Carries the fully formatted chat line after rewrite.
    fn channel(&self) -> &str;
    /// Whether the client plays an audio cue for this message.
    fn chat_sound(&self) -> bool;

    fn set_name(&mut self, name: &str);
    fn set_message(&mut self, message: &str);
    fn set_channel(&mut self, channel: &str);
    fn set_chat_sound(&mut self, chat_sound: bool);
}
