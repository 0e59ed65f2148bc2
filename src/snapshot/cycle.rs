//! Cooperative measurement production with write preemption.
//!
//! ```text
//!          ┌──────────────────── restart on pending write ───────────────────┐
//!          ▼                                                                 │
//! Idle ─▶ Status ─▶ Latitude ─▶ Longitude ─▶ Speed ─▶ Commit ─▶ Idle         │
//!           │          │            │          │        │                    │
//!           └──────────┴────────────┴──────────┴────────┴────────────────────┘
//! ```
//!
//! Each call to [`ProductionCycle::step`] computes exactly one field and then
//! checks for pending writes. Bus events are serviced between steps, which
//! bounds write-acceptance latency to one field computation.

use crate::snapshot::{
    AccessPolicy, ReadySignal, SnapshotError,
    handle::ProducerHandle,
    source::{MeasurementSource, Measurements},
};

/// Where the production cycle currently is.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum CyclePhase {
    /// Between cycles; the next step starts a fresh one.
    #[default]
    Idle,
    Status,
    Latitude,
    Longitude,
    Speed,
}

/// Result of a single [`ProductionCycle::step`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// A field was computed; the cycle continues with the given phase.
    Computed(CyclePhase),
    /// A pending write was absorbed before the cycle began; nothing was lost.
    Absorbed,
    /// A pending write was absorbed; partial results were discarded.
    Restarted,
    /// All fields were committed to staging and the snapshot marked ready.
    Committed,
}

/// Counters kept across cycles.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CycleStats {
    pub committed: u32,
    /// Cycles abandoned part-way; writes absorbed at idle are not counted.
    pub restarted: u32,
}

/// Drives a [`MeasurementSource`] one field at a time.
#[derive(Debug)]
pub struct ProductionCycle<MS> {
    source: MS,
    phase: CyclePhase,
    partial: Measurements,
    stats: CycleStats,
}

impl<MS: MeasurementSource> ProductionCycle<MS> {
    pub fn new(source: MS) -> Self {
        Self {
            source,
            phase: CyclePhase::Idle,
            partial: Measurements::default(),
            stats: CycleStats::default(),
        }
    }

    pub fn phase(&self) -> CyclePhase {
        self.phase
    }

    pub fn stats(&self) -> CycleStats {
        self.stats
    }

    pub fn source(&self) -> &MS {
        &self.source
    }

    pub fn source_mut(&mut self) -> &mut MS {
        &mut self.source
    }

    /// Performs one field computation followed by a pending-write check.
    ///
    /// From [`CyclePhase::Idle`] pending writes are absorbed before the first
    /// field, and the cycle stays idle for that step. The check after the last field and the commit happen in one
    /// critical section, so a write can never slip in between them.
    pub fn step<AP, RS>(&mut self, producer: &ProducerHandle<AP, RS>) -> Result<StepOutcome, SnapshotError>
    where
        AP: AccessPolicy,
        RS: ReadySignal,
    {
        if self.phase == CyclePhase::Idle {
            if producer.absorb_pending()? {
                log::debug!("write absorbed at idle");
                return Ok(StepOutcome::Absorbed);
            }
            self.phase = CyclePhase::Status;
        }

        let next = match self.phase {
            CyclePhase::Idle | CyclePhase::Status => {
                self.partial.status = self.source.status();
                CyclePhase::Latitude
            }
            CyclePhase::Latitude => {
                self.partial.latitude = self.source.latitude();
                CyclePhase::Longitude
            }
            CyclePhase::Longitude => {
                self.partial.longitude = self.source.longitude();
                CyclePhase::Speed
            }
            CyclePhase::Speed => {
                self.partial.speed = self.source.speed();
                return self.finish(producer);
            }
        };

        if producer.absorb_pending()? {
            return Ok(self.restart());
        }
        self.phase = next;
        Ok(StepOutcome::Computed(next))
    }

    /// Steps until a cycle commits, calling `between` after every step.
    ///
    /// `between` is the yield point where bus events get serviced.
    pub fn run_cycle<AP, RS, F>(
        &mut self,
        producer: &ProducerHandle<AP, RS>,
        mut between: F,
    ) -> Result<Measurements, SnapshotError>
    where
        AP: AccessPolicy,
        RS: ReadySignal,
        F: FnMut(StepOutcome),
    {
        loop {
            let outcome = self.step(producer)?;
            between(outcome);
            if outcome == StepOutcome::Committed {
                return Ok(self.partial);
            }
        }
    }

    fn finish<AP, RS>(&mut self, producer: &ProducerHandle<AP, RS>) -> Result<StepOutcome, SnapshotError>
    where
        AP: AccessPolicy,
        RS: ReadySignal,
    {
        if !producer.try_commit(&self.partial)? {
            return Ok(self.restart());
        }
        self.phase = CyclePhase::Idle;
        self.stats.committed = self.stats.committed.wrapping_add(1);
        log::trace!("cycle committed: {:?}", self.partial);
        Ok(StepOutcome::Committed)
    }

    fn restart(&mut self) -> StepOutcome {
        self.phase = CyclePhase::Status;
        self.partial = Measurements::default();
        self.stats.restarted = self.stats.restarted.wrapping_add(1);
        log::debug!("cycle restarted after write");
        StepOutcome::Restarted
    }
}
