//! Label and wire-text composition.

use crate::config::ChatConfig;
use chatproc_api::{ChatFlags, Team};

/// The channel tag for a team-scoped message, or `None` for senders with no
/// team affiliation.
pub fn team_tag(config: &ChatConfig, team: Team) -> Option<&str> {
    match team {
        Team::Red => Some(&config.red_tag),
        Team::Blue => Some(&config.blue_tag),
        Team::Spectator => Some(&config.spectator_tag),
        Team::None => None,
    }
}

/// Builds the final display label: channel tag, the (possibly handler-edited)
/// name, and the dead suffix when the sender is not alive.
pub fn format_label(config: &ChatConfig, team: Team, flags: ChatFlags, name: &str) -> String {
    let tag = if flags.contains(ChatFlags::TEAM) {
        team_tag(config, team)
    } else {
        Some(config.all_tag.as_str())
    };
    let mut label = match tag {
        Some(tag) => format!("{} {}", tag, name),
        None => name.to_string(),
    };
    if flags.contains(ChatFlags::DEAD) {
        label = format!("{} {}", label, config.dead_tag);
    }
    label
}

/// Composes the final chat line from the configured template.
pub fn format_wire_text(config: &ChatConfig, label: &str, message: &str) -> String {
    config
        .chat_format
        .replace("{name}", label)
        .replace("{message}", message)
}
