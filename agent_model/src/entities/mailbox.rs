//! A ready-made agent that records everything delivered to it.

use serde_json::json;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use super::{CapabilityError, Component, Iterate, Receiver, Updatable};
use crate::message::{Message, Payload};

/// Default number of messages kept in a mailbox inbox.
pub const DEFAULT_INBOX_CAPACITY: usize = 100;

/// An agent with a bounded inbox, an update log, and an iteration counter.
///
/// Interior mutability lets the hub hold it behind a shared reference while
/// the owning collaborator keeps reading what arrived.
#[derive(Debug)]
pub struct MailboxAgent {
    name: String,
    inbox_capacity: usize,
    inbox: Mutex<VecDeque<Message>>,
    updates: Mutex<Vec<Payload>>,
    received_total: AtomicU64,
    iterations: AtomicU64,
}

impl MailboxAgent {
    /// Create a new agent with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            inbox_capacity: DEFAULT_INBOX_CAPACITY,
            inbox: Mutex::new(VecDeque::new()),
            updates: Mutex::new(Vec::new()),
            received_total: AtomicU64::new(0),
            iterations: AtomicU64::new(0),
        }
    }

    /// Set how many messages the inbox retains.
    pub fn with_inbox_capacity(mut self, capacity: usize) -> Self {
        self.inbox_capacity = capacity;
        self
    }

    /// Messages currently held in the inbox, oldest first.
    pub fn inbox(&self) -> Vec<Message> {
        lock(&self.inbox).iter().cloned().collect()
    }

    /// The most recently received message.
    pub fn last_message(&self) -> Option<Message> {
        lock(&self.inbox).back().cloned()
    }

    /// Total number of messages received, including ones evicted from the inbox.
    pub fn received_count(&self) -> u64 {
        self.received_total.load(Ordering::SeqCst)
    }

    /// Updates received, in arrival order.
    pub fn updates(&self) -> Vec<Payload> {
        lock(&self.updates).clone()
    }

    /// Number of completed iterations.
    pub fn iterations(&self) -> u64 {
        self.iterations.load(Ordering::SeqCst)
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl Component for MailboxAgent {
    fn name(&self) -> &str {
        &self.name
    }

    fn as_receiver(&self) -> Option<&dyn Receiver> {
        Some(self)
    }

    fn as_updatable(&self) -> Option<&dyn Updatable> {
        Some(self)
    }

    fn as_iterate(&self) -> Option<&dyn Iterate> {
        Some(self)
    }
}

impl Receiver for MailboxAgent {
    fn receive(&self, message: &Message) -> Result<(), CapabilityError> {
        let mut inbox = lock(&self.inbox);
        inbox.push_back(message.clone());
        while inbox.len() > self.inbox_capacity {
            inbox.pop_front();
        }
        self.received_total.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

impl Updatable for MailboxAgent {
    fn update(&self, payload: &Payload) -> Result<(), CapabilityError> {
        lock(&self.updates).push(payload.clone());
        Ok(())
    }
}

impl Iterate for MailboxAgent {
    fn step(&self) -> Result<Payload, CapabilityError> {
        let iteration = self.iterations.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(json!({ "agent": self.name, "iteration": iteration }))
    }
}
