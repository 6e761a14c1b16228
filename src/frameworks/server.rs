// Framework bootstrap for the sandbox host runtime.

use crate::domain::state::{BlastEvent, DamageInfo, PlayerHurt};
use crate::domain::systems::resupply::GRENADE_ITEM;
use crate::frameworks::config;
use crate::interface_adapters::config_file::load_or_create;
use crate::interface_adapters::console::{ConsoleCommand, parse_command};
use crate::interface_adapters::sandbox::SandboxHost;
use crate::use_cases::{GrenadeBoostPlugin, HostEvent};

use std::{io::Result, path::PathBuf, sync::Arc, time::Duration};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::{Notify, mpsc, mpsc::error::TryRecvError};
use tracing::{info, warn};

fn init_runtime() {
    let _ = dotenvy::dotenv();

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let json = matches!(std::env::var("LOG_FORMAT").as_deref(), Ok("json"));
    if json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .json()
            .with_current_span(true)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .compact()
            .init();
    }

    std::panic::set_hook(Box::new(|info| {
        let backtrace = std::backtrace::Backtrace::capture();
        tracing::error!(%info, ?backtrace, "panic");
    }));
}

/// Settings for one sandbox session.
#[derive(Debug, Clone)]
pub struct SessionSettings {
    /// Fixed tick interval for the host loop.
    pub tick_interval: Duration,
    /// Config file re-read by the `reload` command.
    pub config_path: PathBuf,
}

/// Drives the plugin against the sandbox host at a fixed tick rate.
///
/// Each tick runs the plugin's deferred work first, then the commands that
/// arrived since the last tick, then player motion. The loop ends on `quit`,
/// when every command sender is dropped, or when `shutdown` fires; the plugin
/// is unloaded before the host is handed back.
pub async fn host_task(
    mut input_rx: mpsc::Receiver<ConsoleCommand>,
    mut plugin: GrenadeBoostPlugin,
    mut host: SandboxHost,
    settings: SessionSettings,
    shutdown: Arc<Notify>,
) -> (GrenadeBoostPlugin, SandboxHost) {
    let mut interval = tokio::time::interval(settings.tick_interval);
    let dt = settings.tick_interval.as_secs_f32();
    let mut next_blast_id: u64 = 1;

    'ticks: loop {
        tokio::select! {
            _ = shutdown.notified() => {
                info!("shutdown requested");
                break;
            }
            _ = interval.tick() => {}
        }

        plugin.on_tick(&mut host);

        loop {
            let command = match input_rx.try_recv() {
                Ok(command) => command,
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => break 'ticks,
            };
            if command == ConsoleCommand::Quit {
                break 'ticks;
            }
            handle_command(&mut plugin, &mut host, command, &mut next_blast_id, &settings);
        }

        host.integrate(dt);
    }

    plugin.unload(&mut host);
    (plugin, host)
}

fn handle_command(
    plugin: &mut GrenadeBoostPlugin,
    host: &mut SandboxHost,
    command: ConsoleCommand,
    next_blast_id: &mut u64,
    settings: &SessionSettings,
) {
    match command {
        ConsoleCommand::Spawn { id, team, position } => {
            host.spawn(id, team, position);
            info!(player_id = id, ?team, "player spawned");
        }
        ConsoleCommand::Kill { id } => {
            if !host.kill(id) {
                warn!(player_id = id, "unknown player");
            }
        }
        ConsoleCommand::Disconnect { id } => {
            if host.disconnect(id) {
                info!(player_id = id, "player left");
            }
        }
        ConsoleCommand::Move { id, position } => {
            if !host.teleport(id, position) {
                warn!(player_id = id, "unknown player");
            }
        }
        ConsoleCommand::RoundStart => {
            info!("round start");
            plugin.dispatch(host, HostEvent::RoundStart);
        }
        ConsoleCommand::Detonate { thrower, origin } => {
            host.take_item(thrower, GRENADE_ITEM);
            let blast = BlastEvent {
                id: *next_blast_id,
                thrower: Some(thrower),
                origin: Some(origin),
            };
            *next_blast_id += 1;
            plugin.dispatch(host, HostEvent::GrenadeDetonated(blast));
        }
        ConsoleCommand::Hurt {
            victim,
            attacker,
            weapon,
            health,
            armor,
        } => {
            // player_hurt fires after the host committed the damage.
            host.apply_damage(victim, health);
            let result = plugin.dispatch(
                host,
                HostEvent::PlayerHurt(PlayerHurt {
                    victim: Some(victim),
                    attacker,
                    weapon,
                    health_lost: health,
                    armor,
                }),
            );
            let remaining = host.player(victim).map(|p| p.health);
            info!(player_id = victim, ?remaining, ?result, "player hurt");
        }
        ConsoleCommand::Damage {
            victim,
            attacker,
            weapon_class,
            amount,
        } => {
            let mut damage = DamageInfo {
                victim,
                attacker,
                weapon_class,
                damage: amount,
            };
            let result = plugin.on_take_damage(&mut damage);
            let remaining = host.apply_damage(victim, damage.damage.round() as i32);
            info!(player_id = victim, dealt = damage.damage, ?remaining, ?result, "damage");
        }
        ConsoleCommand::Reload => match load_or_create(&settings.config_path) {
            Ok(cfg) => match plugin.on_config_parsed(cfg, host) {
                Ok(()) => info!("config reloaded"),
                Err(e) => warn!(error = %e, "config rejected, keeping previous"),
            },
            Err(e) => warn!(error = %e, "failed to reload config"),
        },
        ConsoleCommand::Status => {
            for p in host.players() {
                let s = &p.snapshot;
                info!(
                    player_id = s.id,
                    alive = s.alive,
                    on_ground = s.on_ground,
                    pos = ?s.position,
                    vel = ?s.velocity,
                    health = p.health,
                    weapons = ?p.weapons,
                    "player"
                );
            }
            for (name, value) in host.convars() {
                info!(convar = %name, %value, "convar");
            }
        }
        ConsoleCommand::Quit => {}
    }
}

async fn read_console(input_tx: mpsc::Sender<ConsoleCommand>) {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(e) => {
                warn!(error = %e, "stdin read failed");
                break;
            }
        };
        if line.trim().is_empty() {
            continue;
        }
        match parse_command(&line) {
            Ok(command) => {
                if input_tx.send(command).await.is_err() {
                    break;
                }
            }
            Err(e) => warn!(error = %e, "invalid command"),
        }
    }
}

pub async fn run_with_config() -> Result<()> {
    init_runtime();

    let config_path = config::config_path();
    let mut host = SandboxHost::default();
    let mut plugin = GrenadeBoostPlugin::new();

    let cfg = load_or_create(&config_path).map_err(|e| {
        std::io::Error::other(format!(
            "failed to load config {}: {e}",
            config_path.display()
        ))
    })?;
    plugin
        .on_config_parsed(cfg, &mut host)
        .map_err(|e| std::io::Error::other(format!("invalid config: {e}")))?;
    plugin.load();

    let (input_tx, input_rx) = mpsc::channel::<ConsoleCommand>(config::INPUT_CHANNEL_CAPACITY);
    tokio::spawn(read_console(input_tx));

    let shutdown = Arc::new(Notify::new());
    let ctrl_c = shutdown.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            ctrl_c.notify_one();
        }
    });

    let settings = SessionSettings {
        tick_interval: config::tick_interval(),
        config_path,
    };
    tracing::info!(tick_ms = settings.tick_interval.as_millis() as u64, "sandbox running");

    let (_plugin, host) = host_task(input_rx, plugin, host, settings, shutdown).await;
    for (name, value) in host.convars() {
        info!(convar = %name, %value, "final value");
    }
    Ok(())
}
