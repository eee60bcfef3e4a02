// Session persistence - tiny key/value stores backing progress and identity

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

/// Best-effort string storage keyed by short names. Implementations never
/// surface IO failures to callers; an unreadable value reads as absent and
/// a failed write leaves the previous value behind.
pub trait KeyValueStore: Send {
    fn load(&self, key: &str) -> Option<String>;
    fn save(&mut self, key: &str, value: &str);
    fn remove(&mut self, key: &str);
}

/// In-process store for headless runs and tests.
#[derive(Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn load(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn save(&mut self, key: &str, value: &str) {
        self.entries.insert(key.to_string(), value.to_string());
    }

    fn remove(&mut self, key: &str) {
        self.entries.remove(key);
    }
}

/// One file per key under a state directory, so records survive restarts
/// and stay greppable on disk.
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl KeyValueStore for JsonFileStore {
    fn load(&self, key: &str) -> Option<String> {
        fs::read_to_string(self.path_for(key)).ok()
    }

    fn save(&mut self, key: &str, value: &str) {
        if let Err(err) = fs::create_dir_all(&self.dir) {
            eprintln!("state dir {} unavailable: {err}", self.dir.display());
            return;
        }
        if let Err(err) = fs::write(self.path_for(key), value) {
            eprintln!("state write for '{key}' failed: {err}");
        }
    }

    fn remove(&mut self, key: &str) {
        let _ = fs::remove_file(self.path_for(key));
    }
}
