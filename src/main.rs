//! Demo host: wires the chat pipeline against an in-memory session and runs
//! chat lines from stdin through it. Stands in for the real transport.

use anyhow::Context;
use chatproc_api::{ChatContext, ChatHandlerRegistry, ChatOutcome, PlayerId, Team};
use chatproc_core::config::ChatConfig;
use chatproc_core::directory::{PlayerDirectory, PlayerSnapshot};
use chatproc_core::event::SayTextEvent;
use chatproc_core::intercept::Disposition;
use chatproc_core::plugin::{ChatPlugin, UserMessageHooks};
use clap::Parser;
use rustc_hash::FxHashMap;
use std::io::BufRead;
use tracing::info;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::fmt::writer::MakeWriterExt;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(about = "Runs chat lines from stdin through the interception pipeline")]
struct Args {
    /// Path to the config file.
    #[arg(long, default_value = "Config.toml")]
    config: String,
    /// Directory for the rolling logfile.
    #[arg(long, default_value = "./logs")]
    log_dir: String,
}

#[derive(Clone)]
struct Roster {
    players: FxHashMap<PlayerId, PlayerSnapshot>,
}

impl PlayerDirectory for Roster {
    fn player(&self, id: PlayerId) -> Option<PlayerSnapshot> {
        self.players.get(&id).cloned()
    }

    fn connected(&self, team: Option<Team>) -> Vec<PlayerId> {
        let mut ids: Vec<PlayerId> = self
            .players
            .iter()
            .filter(|(_, player)| !player.bot && team.is_none_or(|team| player.team == team))
            .map(|(id, _)| *id)
            .collect();
        ids.sort_unstable();
        ids
    }
}

struct LoggingHooks;

impl UserMessageHooks for LoggingHooks {
    fn hook_pre(&mut self, message_id: u32) {
        info!("transport hooked user message {} (pre)", message_id);
    }

    fn unhook_pre(&mut self, message_id: u32) {
        info!("transport unhooked user message {} (pre)", message_id);
    }
}

struct StdinEvent {
    sender_index: i32,
    name: String,
    message: String,
    channel: String,
    chat_sound: bool,
}

impl SayTextEvent for StdinEvent {
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

fn demo_roster() -> Roster {
    let mut players = FxHashMap::default();
    let mut add = |id: PlayerId, name: &str, team: Team, alive: bool, bot: bool| {
        players.insert(
            id,
            PlayerSnapshot {
                name: name.to_string(),
                team,
                alive,
                bot,
            },
        );
    };
    add(1, "Steve", Team::Red, true, false);
    add(2, "Ana", Team::Red, false, false);
    add(3, "Bez", Team::Blue, true, false);
    add(4, "Watcher", Team::Spectator, true, false);
    add(5, "RoboCop", Team::Blue, true, true);
    Roster { players }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Setup logging
    let logfile = tracing_appender::rolling::daily(&args.log_dir, "chatproc.log");
    let env_filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .with_env_var("CHATPROC_LOG")
        .from_env_lossy();
    tracing_subscriber::fmt()
        .with_writer(logfile.and(std::io::stderr))
        .with_env_filter(env_filter)
        .init();

    let config = ChatConfig::load(&args.config)
        .with_context(|| format!("failed to load {}", args.config))?;

    let roster = demo_roster();
    let mut plugin = ChatPlugin::new(roster.clone(), config);
    let mut hooks = LoggingHooks;
    plugin.load(&mut hooks);

    // Sample pre-phase handler: tags well-mannered messages.
    plugin
        .registry_mut()
        .register_pre(Box::new(|ctx: &mut ChatContext| {
            if ctx.message.contains("gg") {
                ctx.name = format!("[GG] {}", ctx.name);
                ChatOutcome::Modified
            } else {
                ChatOutcome::Unchanged
            }
        }));

    println!("chatproc demo session. Lines are: <sender-id> <all|team> <text>");
    for (id, player) in &roster.players {
        println!(
            "  {} = {} ({:?}{}{})",
            id,
            player.name,
            player.team,
            if player.alive { "" } else { ", dead" },
            if player.bot { ", bot" } else { "" },
        );
    }

    let stdin = std::io::stdin();
    for line in stdin.lock().lines() {
        let line = line.context("failed to read stdin")?;
        let mut parts = line.splitn(3, ' ');
        let (Some(sender), Some(channel), Some(text)) =
            (parts.next(), parts.next(), parts.next())
        else {
            println!("expected: <sender-id> <all|team> <text>");
            continue;
        };
        let Ok(sender_index) = sender.parse::<i32>() else {
            println!("bad sender id: {}", sender);
            continue;
        };

        let name = u32::try_from(sender_index)
            .ok()
            .and_then(|id| roster.player(id))
            .map(|player| player.name)
            .unwrap_or_default();
        let mut event = StdinEvent {
            sender_index,
            name,
            message: text.to_string(),
            channel: if channel.eq_ignore_ascii_case("all") {
                "Chat_All".to_string()
            } else {
                "Chat_Team".to_string()
            },
            chat_sound: true,
        };

        match plugin.on_user_message(&mut event) {
            Disposition::Passthrough => println!("-> passthrough"),
            Disposition::Suppressed => println!("-> suppressed"),
            Disposition::Rewritten => println!("-> {}", event.channel),
        }
    }

    plugin.unload(&mut hooks);
    Ok(())
}
