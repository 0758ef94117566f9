//! Deferred-effect queue
//!
//! Pickup effects expire after a duration and the rare-pickup cascade
//! removes enemies one at a time. Both are modeled as queue entries keyed
//! by the virtual clock rather than host timers, so every mutation stays
//! on the step boundary. Each entry carries the world generation it was
//! scheduled under; after a restart the generation bumps and stale
//! entries drain as no-ops.

/// A deferred world mutation
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Effect {
    /// Restore the base row-spawn interval, re-enable enemy fire and
    /// switch the background back (end of a pickup effect)
    RestoreSpawnInterval,
    /// Remove the oldest live enemy; re-schedules itself while
    /// `remaining > 1` (the rare-pickup cascade)
    RemoveOneSwarmEnemy { remaining: u32 },
}

#[derive(Debug, Clone, Copy)]
struct Entry {
    due_ms: f64,
    generation: u32,
    effect: Effect,
}

/// Pending deferred effects, drained at the top of each step
#[derive(Debug, Default)]
pub struct Schedule {
    entries: Vec<Entry>,
}

impl Schedule {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, due_ms: f64, generation: u32, effect: Effect) {
        self.entries.push(Entry {
            due_ms,
            generation,
            effect,
        });
    }

    /// Remove and return every effect due at `now_ms`, ordered by due
    /// time. Entries from older generations are dropped silently.
    pub fn drain_due(&mut self, now_ms: f64, generation: u32) -> Vec<Effect> {
        let mut due: Vec<Entry> = Vec::new();
        self.entries.retain(|entry| {
            if entry.due_ms <= now_ms {
                if entry.generation == generation {
                    due.push(*entry);
                }
                false
            } else {
                true
            }
        });
        due.sort_by(|a, b| a.due_ms.partial_cmp(&b.due_ms).unwrap_or(std::cmp::Ordering::Equal));
        due.into_iter().map(|entry| entry.effect).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drains_only_due_entries() {
        let mut schedule = Schedule::new();
        schedule.push(100.0, 0, Effect::RestoreSpawnInterval);
        schedule.push(300.0, 0, Effect::RemoveOneSwarmEnemy { remaining: 2 });

        assert!(schedule.drain_due(50.0, 0).is_empty());
        assert_eq!(
            schedule.drain_due(100.0, 0),
            vec![Effect::RestoreSpawnInterval]
        );
        assert_eq!(schedule.len(), 1);
        assert_eq!(
            schedule.drain_due(1000.0, 0),
            vec![Effect::RemoveOneSwarmEnemy { remaining: 2 }]
        );
        assert!(schedule.is_empty());
    }

    #[test]
    fn due_entries_come_out_in_time_order() {
        let mut schedule = Schedule::new();
        schedule.push(200.0, 0, Effect::RemoveOneSwarmEnemy { remaining: 1 });
        schedule.push(100.0, 0, Effect::RestoreSpawnInterval);

        assert_eq!(
            schedule.drain_due(500.0, 0),
            vec![
                Effect::RestoreSpawnInterval,
                Effect::RemoveOneSwarmEnemy { remaining: 1 },
            ]
        );
    }

    #[test]
    fn stale_generation_entries_are_dropped() {
        let mut schedule = Schedule::new();
        schedule.push(100.0, 0, Effect::RestoreSpawnInterval);
        schedule.push(100.0, 1, Effect::RemoveOneSwarmEnemy { remaining: 3 });

        // Generation bumped to 1: the old restore must not fire.
        assert_eq!(
            schedule.drain_due(200.0, 1),
            vec![Effect::RemoveOneSwarmEnemy { remaining: 3 }]
        );
        assert!(schedule.is_empty());
    }
}
