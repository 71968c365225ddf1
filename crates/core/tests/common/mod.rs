use chatproc_api::{PlayerId, Team};
use chatproc_core::directory::{PlayerDirectory, PlayerSnapshot};
use chatproc_core::event::SayTextEvent;

/// In-memory stand-in for the host's participant directory.
pub struct FakeDirectory {
    players: Vec<(PlayerId, PlayerSnapshot)>,
}

impl FakeDirectory {
    pub fn new() -> FakeDirectory {
        FakeDirectory {
            players: Vec::new(),
        }
    }

    pub fn add(&mut self, id: PlayerId, name: &str, team: Team, alive: bool, bot: bool) {
        self.players.push((
            id,
            PlayerSnapshot {
                name: name.to_string(),
                team,
                alive,
                bot,
            },
        ));
    }
}

impl PlayerDirectory for FakeDirectory {
    fn player(&self, id: PlayerId) -> Option<PlayerSnapshot> {
        self.players
            .iter()
            .find(|(player_id, _)| *player_id == id)
            .map(|(_, snapshot)| snapshot.clone())
    }

    fn connected(&self, team: Option<Team>) -> Vec<PlayerId> {
        self.players
            .iter()
            .filter(|(_, player)| !player.bot && team.is_none_or(|team| player.team == team))
            .map(|(id, _)| *id)
            .collect()
    }
}

/// In-memory stand-in for the transport's chat user-message buffer.
#[derive(Clone, Debug)]
pub struct FakeEvent {
    pub sender_index: i32,
    pub name: String,
    pub message: String,
    pub channel: String,
    pub chat_sound: bool,
}

impl FakeEvent {
    pub fn say(sender_index: i32, name: &str, channel: &str, message: &str) -> FakeEvent {
        FakeEvent {
            sender_index,
            name: name.to_string(),
            message: message.to_string(),
            channel: channel.to_string(),
            chat_sound: true,
        }
    }
}

impl SayTextEvent for FakeEvent {
    fn sender_index(&self) -> i32 {
        self.sender_index
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn message(&self) -> &str {
        &self.message
    }

    fn channel(&self) -> &str {
        &self.channel
    }

    fn chat_sound(&self) -> bool {
        self.chat_sound
    }

    fn set_name(&mut self, name: &str) {
        self.name = name.to_string();
    }

    fn set_message(&mut self, message: &str) {
        self.message = message.to_string();
    }

    fn set_channel(&mut self, channel: &str) {
        self.channel = channel.to_string();
    }

    fn set_chat_sound(&mut self, chat_sound: bool) {
        self.chat_sound = chat_sound;
    }
}
