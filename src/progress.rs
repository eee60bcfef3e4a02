// Researcher progress - mycelium balance and the unlocked specimen list

use serde::{Deserialize, Serialize};

use crate::store::KeyValueStore;

const PROGRESS_KEY: &str = "progress";

/// The persisted shape of a researcher's progress.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressRecord {
    pub mycelium: u32,
    pub unlocked: Vec<String>,
}

impl Default for ProgressRecord {
    fn default() -> Self {
        Self {
            mycelium: 1250,
            unlocked: vec![
                "psilocybe-cubensis".to_string(),
                "amanita-muscaria".to_string(),
            ],
        }
    }
}

/// Progress ledger that writes through to its backing store after every
/// mutation, so a crash never loses more than the frame in flight.
pub struct ProgressStore {
    record: ProgressRecord,
    store: Box<dyn KeyValueStore>,
}

impl ProgressStore {
    /// Pick up where the researcher left off, or start a fresh ledger with
    /// the starter grant.
    pub fn open(store: Box<dyn KeyValueStore>) -> Self {
        let record = store
            .load(PROGRESS_KEY)
            .and_then(|raw| serde_json::from_str(&raw).ok())
            .unwrap_or_default();
        Self { record, store }
    }

    pub fn record(&self) -> &ProgressRecord {
        &self.record
    }

    pub fn mycelium(&self) -> u32 {
        self.record.mycelium
    }

    pub fn is_unlocked(&self, id: &str) -> bool {
        self.record.unlocked.iter().any(|u| u == id)
    }

    pub fn add(&mut self, amount: u32) {
        self.record.mycelium += amount;
        self.persist();
    }

    /// Deduct a cost if the balance covers it. Nothing changes on a
    /// shortfall.
    pub fn spend(&mut self, amount: u32) -> bool {
        if self.record.mycelium < amount {
            return false;
        }
        self.record.mycelium -= amount;
        self.persist();
        true
    }

    /// Add a specimen to the unlocked list. Returns false when it was
    /// already there.
    pub fn unlock(&mut self, id: &str) -> bool {
        if self.is_unlocked(id) {
            return false;
        }
        self.record.unlocked.push(id.to_string());
        self.persist();
        true
    }

    fn persist(&mut self) {
        if let Ok(raw) = serde_json::to_string(&self.record) {
            self.store.save(PROGRESS_KEY, &raw);
        }
    }
}
