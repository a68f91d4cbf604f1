//! Simulated live signal stream.
//!
//! There is no real ingestion pipeline; the stream fabricates plausible
//! signals so the signal log has something to show. The buffer keeps the
//! newest entries first and never grows past its capacity.

use std::collections::VecDeque;

use rand::seq::SliceRandom;
use rand::Rng;
use time::OffsetDateTime;

use crate::model::{ActorRole, ObjectType, Signal, SignalType, SourceSystem};

/// Number of entries the signal log keeps.
pub const SIGNAL_BUFFER_CAPACITY: usize = 50;

const ID_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const ID_LEN: usize = 9;

/// Generate one random signal stamped with `now`.
pub fn random_signal<R: Rng + ?Sized>(rng: &mut R, project_id: &str, now: OffsetDateTime) -> Signal {
    let id: String = (0..ID_LEN)
        .map(|_| ID_ALPHABET[rng.gen_range(0..ID_ALPHABET.len())] as char)
        .collect();
    Signal {
        id,
        signal_type: *SignalType::ALL.choose(rng).unwrap_or(&SignalType::DocEdit),
        source_system: *SourceSystem::ALL.choose(rng).unwrap_or(&SourceSystem::Custom),
        object_type: *ObjectType::ALL.choose(rng).unwrap_or(&ObjectType::Doc),
        object_id: format!("obj_{}", rng.gen_range(1000..10000)),
        actor_role: *ActorRole::ALL.choose(rng).unwrap_or(&ActorRole::Engineer),
        intensity: rng.gen::<f64>(),
        project_id: project_id.to_string(),
        timestamp: now,
    }
}

/// Bounded, newest-first buffer of signals.
#[derive(Debug, Clone)]
pub struct SignalStream {
    entries: VecDeque<Signal>,
    capacity: usize,
    project_id: String,
}

impl SignalStream {
    pub fn new(project_id: impl Into<String>) -> Self {
        Self::with_capacity(project_id, SIGNAL_BUFFER_CAPACITY)
    }

    pub fn with_capacity(project_id: impl Into<String>, capacity: usize) -> Self {
        SignalStream {
            entries: VecDeque::with_capacity(capacity),
            capacity,
            project_id: project_id.into(),
        }
    }

    /// Push a signal to the front, evicting the oldest entry when full.
    pub fn push(&mut self, signal: Signal) {
        if self.capacity == 0 {
            return;
        }
        self.entries.push_front(signal);
        self.entries.truncate(self.capacity);
    }

    /// Generate a signal, push it, and return a copy.
    pub fn tick<R: Rng + ?Sized>(&mut self, rng: &mut R, now: OffsetDateTime) -> Signal {
        let signal = random_signal(rng, &self.project_id, now);
        self.push(signal.clone());
        signal
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn entries(&self) -> impl Iterator<Item = &Signal> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Export the buffer as CSV, newest first.
    pub fn to_csv(&self) -> String {
        let mut out = String::from("id,timestamp,type,source,role,objectId\n");
        for s in &self.entries {
            let ts = s
                .timestamp
                .format(&time::format_description::well_known::Rfc3339)
                .unwrap_or_default();
            out.push_str(&format!(
                "{},{},{},{},{},{}\n",
                s.id, ts, s.signal_type, s.source_system, s.actor_role, s.object_id
            ));
        }
        out
    }
}
