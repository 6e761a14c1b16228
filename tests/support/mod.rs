// Shared helpers for driving a sandbox session from integration tests.
use std::{path::PathBuf, sync::Arc, time::Duration};

use grenade_boost::GrenadeBoostPlugin;
use grenade_boost::domain::config::PluginConfig;
use grenade_boost::frameworks::server::{SessionSettings, host_task};
use grenade_boost::interface_adapters::console::{ConsoleCommand, parse_command};
use grenade_boost::interface_adapters::sandbox::SandboxHost;
use tokio::{
    sync::{Notify, mpsc},
    task::JoinHandle,
};

pub const TICK: Duration = Duration::from_millis(2);

// Handle to a running host loop.
pub struct Session {
    pub input_tx: mpsc::Sender<ConsoleCommand>,
    pub shutdown: Arc<Notify>,
    pub task: JoinHandle<(GrenadeBoostPlugin, SandboxHost)>,
}

impl Session {
    // Parse and queue console lines in order.
    pub async fn send(&self, lines: &[&str]) {
        for line in lines {
            let command = parse_command(line).expect("valid console line");
            self.input_tx.send(command).await.expect("host loop alive");
        }
    }

    // Let the loop run for a few ticks so deferred work gets a chance to fire.
    pub async fn settle(&self) {
        tokio::time::sleep(TICK * 10).await;
    }

    pub async fn finish(self) -> (GrenadeBoostPlugin, SandboxHost) {
        self.send(&["quit"]).await;
        self.task.await.expect("host loop panicked")
    }
}

// Start a host loop with the given config already applied.
pub fn start_session(config: PluginConfig) -> Session {
    let mut host = SandboxHost::default();
    let mut plugin = GrenadeBoostPlugin::new();
    plugin
        .on_config_parsed(config, &mut host)
        .expect("config accepted");

    let (input_tx, input_rx) = mpsc::channel(64);
    let shutdown = Arc::new(Notify::new());
    let settings = SessionSettings {
        tick_interval: TICK,
        config_path: PathBuf::from("unused.json"),
    };
    let task = tokio::spawn(host_task(
        input_rx,
        plugin,
        host,
        settings,
        shutdown.clone(),
    ));

    Session {
        input_tx,
        shutdown,
        task,
    }
}
