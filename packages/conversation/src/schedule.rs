use std::time::Instant;

/// A state change waiting on its reveal deadline. Pacing lives here as
/// data instead of in timer callbacks, so tests can drive it with plain
/// `Instant` arithmetic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    RevealWelcome,
    Advance { index: usize },
    RevealQuestion { index: usize },
    SurfaceInput,
    Complete,
}

/// Deadline queue for pending transitions
#[derive(Debug, Default)]
pub struct Scheduler {
    pending: Vec<(Instant, u64, Transition)>,
    next_seq: u64,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a transition to fire once `deadline` has passed
    pub fn schedule_at(&mut self, deadline: Instant, transition: Transition) {
        self.pending.push((deadline, self.next_seq, transition));
        self.next_seq += 1;
    }

    /// Remove and return every transition whose deadline has passed, in
    /// deadline order (insertion order breaks ties)
    pub fn fire_due(&mut self, now: Instant) -> Vec<Transition> {
        let mut due = Vec::new();
        let mut index = 0;
        while index < self.pending.len() {
            if self.pending[index].0 <= now {
                due.push(self.pending.remove(index));
            } else {
                index += 1;
            }
        }
        due.sort_by(|a, b| a.0.cmp(&b.0).then(a.1.cmp(&b.1)));
        due.into_iter().map(|(_, _, transition)| transition).collect()
    }

    /// Drop every pending transition
    pub fn clear(&mut self) {
        self.pending.clear();
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
