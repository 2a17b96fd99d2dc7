//! Execution context — per-agent identity, logging, and memory ownership.
//!
//! Contexts form the delegation tree. The root agent is `"0"`; each
//! delegation creates a subordinate whose id extends the parent's with its
//! index (`"0.0"`, `"0.1"`, `"0.0.0"`, ...). Parents own their children for
//! the lifetime of the root; children keep a non-owning back-reference for
//! identity only, so the tree never cycles.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

use crate::memory::MemoryStore;

// ─────────────────────────────────────────────
// Log entries
// ─────────────────────────────────────────────

/// Severity of a context log entry.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Info,
    Warn,
    Error,
}

/// One append-only log record, owned by exactly one context.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct LogEntry {
    pub timestamp: DateTime<Utc>,
    pub level: LogLevel,
    pub message: String,
    pub agent_id: String,
}

// ─────────────────────────────────────────────
// ExecutionContext
// ─────────────────────────────────────────────

/// Identity, memory, and log scope of one agent instance.
///
/// Shared behind `Arc` between the driver and the tools bound to it; all
/// interior state is serialized per context with brief mutex sections.
#[derive(Debug)]
pub struct ExecutionContext {
    agent_id: String,
    parent: Option<Weak<ExecutionContext>>,
    memory: MemoryStore,
    logs: Mutex<Vec<LogEntry>>,
    subordinates: Mutex<Vec<Arc<ExecutionContext>>>,
}

impl ExecutionContext {
    /// Create the root context, agent id `"0"`, no parent.
    pub fn root() -> Arc<Self> {
        Arc::new(ExecutionContext {
            agent_id: "0".to_string(),
            parent: None,
            memory: MemoryStore::new(),
            logs: Mutex::new(Vec::new()),
            subordinates: Mutex::new(Vec::new()),
        })
    }

    /// This agent's hierarchical id.
    pub fn agent_id(&self) -> &str {
        &self.agent_id
    }

    /// Delegation depth: 0 for the root, 1 for its children, and so on.
    pub fn depth(&self) -> usize {
        self.agent_id.matches('.').count()
    }

    /// The parent context, if it is still alive.
    pub fn parent(&self) -> Option<Arc<ExecutionContext>> {
        self.parent.as_ref().and_then(Weak::upgrade)
    }

    /// This context's memory store.
    pub fn memory(&self) -> &MemoryStore {
        &self.memory
    }

    /// Record a log entry and emit it to the tracing subscriber.
    pub fn log(&self, message: impl Into<String>, level: LogLevel) {
        let message = message.into();
        match level {
            LogLevel::Info => info!(agent = %self.agent_id, "{}", message),
            LogLevel::Warn => warn!(agent = %self.agent_id, "{}", message),
            LogLevel::Error => error!(agent = %self.agent_id, "{}", message),
        }
        self.logs_guard().push(LogEntry {
            timestamp: Utc::now(),
            level,
            message,
            agent_id: self.agent_id.clone(),
        });
    }

    /// Snapshot of this context's log entries, oldest first.
    pub fn logs(&self) -> Vec<LogEntry> {
        self.logs_guard().clone()
    }

    /// Create a new subordinate context.
    ///
    /// The child's id is `"<parent id>.<index>"` where the index is its
    /// position in this context's subordinate list. Every call creates a
    /// distinct child; children are never pruned.
    pub fn create_subordinate(self: &Arc<Self>) -> Arc<ExecutionContext> {
        let mut subordinates = self.subordinates_guard();
        let child = Arc::new(ExecutionContext {
            agent_id: format!("{}.{}", self.agent_id, subordinates.len()),
            parent: Some(Arc::downgrade(self)),
            memory: MemoryStore::new(),
            logs: Mutex::new(Vec::new()),
            subordinates: Mutex::new(Vec::new()),
        });
        subordinates.push(Arc::clone(&child));
        info!(agent = %self.agent_id, subordinate = %child.agent_id, "created subordinate agent");
        child
    }

    /// Number of subordinates created so far.
    pub fn subordinate_count(&self) -> usize {
        self.subordinates_guard().len()
    }

    /// Snapshot of this context's subordinates, in creation order.
    pub fn subordinates(&self) -> Vec<Arc<ExecutionContext>> {
        self.subordinates_guard().clone()
    }

    // A poisoned lock still holds consistent data; recover the guard
    // instead of propagating the panic.

    fn logs_guard(&self) -> MutexGuard<'_, Vec<LogEntry>> {
        self.logs.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn subordinates_guard(&self) -> MutexGuard<'_, Vec<Arc<ExecutionContext>>> {
        self.subordinates
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_root_identity() {
        let root = ExecutionContext::root();
        assert_eq!(root.agent_id(), "0");
        assert!(root.parent().is_none());
        assert_eq!(root.depth(), 0);
    }

    #[test]
    fn test_subordinate_ids_follow_index() {
        let root = ExecutionContext::root();
        let first = root.create_subordinate();
        let second = root.create_subordinate();

        assert_eq!(first.agent_id(), "0.0");
        assert_eq!(second.agent_id(), "0.1");
        assert_eq!(root.subordinate_count(), 2);
    }

    #[test]
    fn test_nested_subordinate_ids() {
        let root = ExecutionContext::root();
        let child = root.create_subordinate();
        let grandchild = child.create_subordinate();

        assert_eq!(grandchild.agent_id(), "0.0.0");
        assert_eq!(grandchild.depth(), 2);
    }

    #[test]
    fn test_subordinate_parent_back_reference() {
        let root = ExecutionContext::root();
        let child = root.create_subordinate();

        let parent = child.parent().unwrap();
        assert_eq!(parent.agent_id(), "0");
    }

    #[test]
    fn test_create_subordinate_not_idempotent() {
        let root = ExecutionContext::root();
        let a = root.create_subordinate();
        let b = root.create_subordinate();
        assert_ne!(a.agent_id(), b.agent_id());
    }

    #[test]
    fn test_contexts_own_separate_memory() {
        let root = ExecutionContext::root();
        let child = root.create_subordinate();

        child.memory().add_memory("child fact", HashMap::new());
        assert_eq!(child.memory().memory_count(), 1);
        assert_eq!(root.memory().memory_count(), 0);
    }

    #[test]
    fn test_log_appends_entries() {
        let root = ExecutionContext::root();
        root.log("starting up", LogLevel::Info);
        root.log("something failed", LogLevel::Error);

        let logs = root.logs();
        assert_eq!(logs.len(), 2);
        assert_eq!(logs[0].message, "starting up");
        assert_eq!(logs[0].level, LogLevel::Info);
        assert_eq!(logs[0].agent_id, "0");
        assert_eq!(logs[1].level, LogLevel::Error);
    }

    #[test]
    fn test_log_levels_serialize_lowercase() {
        let entry = LogEntry {
            timestamp: Utc::now(),
            level: LogLevel::Warn,
            message: "m".to_string(),
            agent_id: "0".to_string(),
        };
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["level"], "warn");
    }

    #[test]
    fn test_subordinate_logs_carry_child_id() {
        let root = ExecutionContext::root();
        let child = root.create_subordinate();
        child.log("working", LogLevel::Info);

        assert_eq!(child.logs()[0].agent_id, "0.0");
        assert!(root.logs().is_empty());
    }
}
