//! In-memory store for agent memories and solution records.
//!
//! Every execution context owns one store. Records are append-only:
//! nothing is deleted or mutated once stored, and nothing survives the
//! process. Recall is deliberately simple — substring search over memory
//! content and a succeeded-only tail of recorded solutions.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ─────────────────────────────────────────────
// Records
// ─────────────────────────────────────────────

/// A stored free-text memory. Immutable once created.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct MemoryRecord {
    pub content: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub metadata: HashMap<String, serde_json::Value>,
}

/// A recorded problem/solution pair. Immutable once created.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct SolutionRecord {
    pub problem: String,
    pub solution: String,
    pub succeeded: bool,
    pub created_at: DateTime<Utc>,
}

// ─────────────────────────────────────────────
// MemoryStore
// ─────────────────────────────────────────────

/// Append-only record store owned by one execution context.
///
/// Interior mutexes keep the owning context shareable behind `Arc`; locks
/// are held only for the append or scan itself, never across an await.
#[derive(Debug, Default)]
pub struct MemoryStore {
    memories: Mutex<Vec<MemoryRecord>>,
    solutions: Mutex<Vec<SolutionRecord>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a memory with the current timestamp. Total: always succeeds.
    pub fn add_memory(
        &self,
        content: impl Into<String>,
        metadata: HashMap<String, serde_json::Value>,
    ) {
        self.memories().push(MemoryRecord {
            content: content.into(),
            created_at: Utc::now(),
            metadata,
        });
    }

    /// Append a solution record with the current timestamp.
    pub fn add_solution(
        &self,
        problem: impl Into<String>,
        solution: impl Into<String>,
        succeeded: bool,
    ) {
        self.solutions().push(SolutionRecord {
            problem: problem.into(),
            solution: solution.into(),
            succeeded,
            created_at: Utc::now(),
        });
    }

    /// Case-insensitive substring search over memory content.
    ///
    /// Returns at most `limit` matches, taken from the most recently added
    /// matching records, in insertion order. An empty query matches every
    /// record.
    pub fn search_memories(&self, query: &str, limit: usize) -> Vec<MemoryRecord> {
        let needle = query.to_lowercase();
        let memories = self.memories();
        let matches: Vec<&MemoryRecord> = memories
            .iter()
            .filter(|m| m.content.to_lowercase().contains(&needle))
            .collect();
        let start = matches.len().saturating_sub(limit);
        matches[start..].iter().map(|m| (*m).clone()).collect()
    }

    /// The last `limit` solution records with `succeeded = true`, in
    /// insertion order.
    pub fn get_recent_solutions(&self, limit: usize) -> Vec<SolutionRecord> {
        let solutions = self.solutions();
        let successes: Vec<&SolutionRecord> =
            solutions.iter().filter(|s| s.succeeded).collect();
        let start = successes.len().saturating_sub(limit);
        successes[start..].iter().map(|s| (*s).clone()).collect()
    }

    /// Number of stored memories.
    pub fn memory_count(&self) -> usize {
        self.memories().len()
    }

    /// Number of stored solution records (successful or not).
    pub fn solution_count(&self) -> usize {
        self.solutions().len()
    }

    // A poisoned lock still holds consistent data (appends are single
    // statements); recover the guard instead of propagating the panic.

    fn memories(&self) -> MutexGuard<'_, Vec<MemoryRecord>> {
        self.memories.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn solutions(&self) -> MutexGuard<'_, Vec<SolutionRecord>> {
        self.solutions.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
