#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use rtodo::broadcast::{BroadcastChannel, MessageBus, Subscription};
use rtodo::core::TodoStore;
use rtodo::db::pool::DbPool;
use rtodo::errors::AppResult;
use rtodo::models::ChangeEvent;
use std::env;
use std::fs;
use std::path::PathBuf;
use std::sync::{Arc, Mutex, mpsc};

pub fn rtd() -> Command {
    let mut cmd = cargo_bin_cmd!("rtodo");
    cmd.env("NO_COLOR", "1");
    cmd
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_rtodo.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Create a temporary output file path inside tempdir and ensure it's removed
pub fn temp_out(name: &str, ext: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_out.{}", name, ext));
    let p = path.to_string_lossy().to_string();
    fs::remove_file(&p).ok();
    p
}

/// Bus that records every post and never delivers anything.
#[derive(Default)]
pub struct RecordingBus {
    posted: Mutex<Vec<(String, String)>>,
}

impl RecordingBus {
    pub fn messages(&self) -> Vec<String> {
        self.posted
            .lock()
            .unwrap()
            .iter()
            .map(|(_, m)| m.clone())
            .collect()
    }

    pub fn events(&self) -> Vec<ChangeEvent> {
        self.messages()
            .iter()
            .map(|m| ChangeEvent::from_message(m).expect("store posted a valid event"))
            .collect()
    }

    pub fn channels(&self) -> Vec<String> {
        self.posted
            .lock()
            .unwrap()
            .iter()
            .map(|(c, _)| c.clone())
            .collect()
    }
}

impl MessageBus for RecordingBus {
    fn post(&self, channel: &str, message: String) -> AppResult<()> {
        self.posted
            .lock()
            .unwrap()
            .push((channel.to_string(), message));
        Ok(())
    }

    fn subscribe(&self, channel: &str) -> AppResult<Subscription> {
        let (_tx, rx) = mpsc::channel();
        Ok(Subscription::new(channel, rx))
    }
}

/// In-memory store wired to a recording bus.
pub fn recorded_store() -> (TodoStore, Arc<RecordingBus>) {
    let bus = Arc::new(RecordingBus::default());
    let store = TodoStore::new(
        DbPool::in_memory(),
        BroadcastChannel::store_channel(bus.clone()),
    );
    (store, bus)
}

/// Last non-empty stdout line of a command (the id printed by `add`).
pub fn last_line(stdout: &[u8]) -> String {
    String::from_utf8_lossy(stdout)
        .lines()
        .rev()
        .find(|l| !l.trim().is_empty())
        .unwrap_or_default()
        .trim()
        .to_string()
}
