//! Engine runtime integration.
//!
//! Bridges the sync terminal loop with the async driver: the driver runs on
//! its own tokio runtime; the terminal side only sends commands and reads
//! the latest snapshot.

use anyhow::{Context, Result};
use log::warn;
use tokio::runtime::Runtime;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;

use crate::core::{GameSnapshot, GameState};
use crate::driver::Driver;
use crate::types::Command;

/// Capacity of the player command queue.
const COMMAND_QUEUE: usize = 64;

/// Running engine instance.
pub struct Engine {
    rt: Runtime,
    cmd_tx: mpsc::Sender<Command>,
    snapshots: watch::Receiver<GameSnapshot>,
    task: JoinHandle<GameSnapshot>,
}

impl Engine {
    /// Start a driver for `game` on a dedicated runtime.
    pub fn start(game: GameState) -> Result<Self> {
        let rt = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .thread_name("whack-engine")
            .enable_time()
            .build()
            .context("failed to create engine runtime")?;

        let (cmd_tx, cmd_rx) = mpsc::channel::<Command>(COMMAND_QUEUE);
        // The driver reads tokio's clock, so it must be created inside the runtime.
        let (driver, snapshots) = {
            let _guard = rt.enter();
            Driver::new(game)
        };
        let task = rt.spawn(driver.run(cmd_rx));

        Ok(Self {
            rt,
            cmd_tx,
            snapshots,
            task,
        })
    }

    /// Queue a command. Dropped (with a warning) if the queue is full.
    pub fn send(&self, command: Command) {
        if let Err(e) = self.cmd_tx.try_send(command) {
            warn!("command {} dropped: {}", command.as_str(), e);
        }
    }

    /// Latest published snapshot.
    pub fn snapshot(&self) -> GameSnapshot {
        self.snapshots.borrow().clone()
    }

    /// Copy the latest snapshot into `out` if it changed since the last call.
    pub fn snapshot_into(&mut self, out: &mut GameSnapshot) -> bool {
        match self.snapshots.has_changed() {
            Ok(true) => {
                out.clone_from(&self.snapshots.borrow_and_update());
                true
            }
            _ => false,
        }
    }

    /// Stop the driver and return the final snapshot.
    pub fn shutdown(self) -> Result<GameSnapshot> {
        let Self { rt, cmd_tx, task, .. } = self;
        drop(cmd_tx);
        let snap = rt.block_on(task).context("engine driver panicked")?;
        Ok(snap)
    }
}
