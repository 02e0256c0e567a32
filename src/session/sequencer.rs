use std::time::Duration;

use crate::{
    capture::{device::VideoSource, frame::capture_still, still::CapturedStill},
    effects::filter::FilterMode,
    foundation::error::{PhotoStripError, PhotoStripResult},
    session::record::{STILLS_PER_SESSION, Session},
};

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
/// Timing and retry policy for a capture run.
pub struct SequencerSettings {
    /// Countdown length before each shot, in ticks.
    pub countdown_secs: u8,
    /// Duration of one countdown tick.
    pub tick_ms: u64,
    /// Pause after a successful shot before the next countdown starts.
    pub between_shots_ms: u64,
    /// How long the UI should show the capture flash.
    pub flash_ms: u64,
    /// Delay before retrying a shot whose frame was not ready.
    pub not_ready_retry_ms: u64,
    /// Consecutive not-ready attempts tolerated on one slot before the run is aborted.
    pub max_not_ready_retries: u32,
}

impl Default for SequencerSettings {
    fn default() -> Self {
        Self {
            countdown_secs: 3,
            tick_ms: 1000,
            between_shots_ms: 500,
            flash_ms: 200,
            not_ready_retry_ms: 100,
            max_not_ready_retries: 20,
        }
    }
}

impl SequencerSettings {
    /// Reject settings that would stall or skip the countdown.
    pub fn validate(&self) -> PhotoStripResult<()> {
        if self.tick_ms == 0 {
            return Err(PhotoStripError::validation("sequencer tick_ms must be > 0"));
        }
        if self.max_not_ready_retries == 0 {
            return Err(PhotoStripError::validation(
                "sequencer max_not_ready_retries must be > 0",
            ));
        }
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// Where the sequencer is in a run.
pub enum SequencerState {
    /// No run in progress.
    Idle,
    /// Counting down to shot `slot` (zero-based). `remaining == 0` means "shoot now".
    Countdown {
        /// Shot being prepared.
        slot: usize,
        /// Ticks left before the shot.
        remaining: u8,
    },
    /// Four stills captured; a [`Session`] is available.
    Complete,
}

#[derive(Clone, Debug, PartialEq, Eq)]
/// Something the UI layer may want to show.
pub enum SequencerEvent {
    /// Countdown display for `slot`. `remaining == 0` is the final "!" frame; it is emitted in
    /// the same step as the shot it announces, right before [`SequencerEvent::Captured`].
    CountdownTick {
        /// Shot being prepared.
        slot: usize,
        /// Ticks left.
        remaining: u8,
    },
    /// A still was captured; flash the view for `flash`.
    Captured {
        /// Slot that was filled.
        slot: usize,
        /// Flash duration.
        flash: Duration,
    },
    /// The source was not ready; the same slot will be retried.
    FrameNotReady {
        /// Slot being retried.
        slot: usize,
        /// Consecutive failed attempts so far.
        attempt: u32,
    },
    /// All four stills captured.
    SessionComplete {
        /// Run identifier of the frozen session.
        run_id: u64,
    },
}

#[derive(Clone, Debug, PartialEq, Eq)]
/// Result of one [`Sequencer::tick`]: what happened and how long to wait before the next tick.
pub struct Step {
    /// Events produced by this tick, in order.
    pub events: Vec<SequencerEvent>,
    /// Delay before the next tick. Zero once the run is complete.
    pub wait: Duration,
}

/// Four-shot capture state machine: `Idle -> Countdown(0..=3) -> Complete`.
///
/// Single writer of the in-progress stills. The driver calls [`Sequencer::tick`] after
/// waiting [`Step::wait`]; the sequencer never sleeps itself.
#[derive(Debug)]
pub struct Sequencer {
    settings: SequencerSettings,
    state: SequencerState,
    filter: FilterMode,
    buffer: Vec<CapturedStill>,
    not_ready_attempts: u32,
    run_id: u64,
    session: Option<Session>,
}

impl Sequencer {
    /// Idle sequencer.
    pub fn new(settings: SequencerSettings) -> Self {
        Self {
            settings,
            state: SequencerState::Idle,
            filter: FilterMode::Identity,
            buffer: Vec::with_capacity(STILLS_PER_SESSION),
            not_ready_attempts: 0,
            run_id: 0,
            session: None,
        }
    }

    /// Current state.
    pub fn state(&self) -> SequencerState {
        self.state
    }

    /// Active settings.
    pub fn settings(&self) -> &SequencerSettings {
        &self.settings
    }

    /// Filter snapshot for the current (or last) run.
    pub fn filter(&self) -> FilterMode {
        self.filter
    }

    /// Stills captured so far in the current run.
    pub fn captured_count(&self) -> usize {
        match self.state {
            SequencerState::Complete => STILLS_PER_SESSION,
            _ => self.buffer.len(),
        }
    }

    /// Completed session, if the last run finished.
    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    /// Begin a new run from `Idle` or `Complete`, discarding any previous session.
    ///
    /// `filter` is frozen for all four shots.
    pub fn start(&mut self, filter: FilterMode) -> PhotoStripResult<()> {
        if let SequencerState::Countdown { .. } = self.state {
            return Err(PhotoStripError::validation(
                "capture sequence already running",
            ));
        }
        self.discard();
        self.run_id += 1;
        self.filter = filter;
        self.state = SequencerState::Countdown {
            slot: 0,
            remaining: self.settings.countdown_secs,
        };
        tracing::info!(run_id = self.run_id, filter = %filter, "capture run started");
        Ok(())
    }

    /// Abandon whatever is in progress (or completed) and return to `Idle`.
    pub fn retake(&mut self) {
        if self.state != SequencerState::Idle || self.session.is_some() {
            tracing::info!(
                run_id = self.run_id,
                discarded = self.captured_count(),
                "retake: discarding capture state"
            );
        }
        self.discard();
    }

    /// Advance one step.
    pub fn tick(&mut self, source: &mut dyn VideoSource) -> PhotoStripResult<Step> {
        let SequencerState::Countdown { slot, remaining } = self.state else {
            return Err(PhotoStripError::validation(
                "capture sequence is not running",
            ));
        };

        if remaining > 0 {
            self.state = SequencerState::Countdown {
                slot,
                remaining: remaining - 1,
            };
            return Ok(Step {
                events: vec![SequencerEvent::CountdownTick { slot, remaining }],
                wait: ms(self.settings.tick_ms),
            });
        }

        match capture_still(source, self.filter) {
            Ok(still) => self.accept(slot, still),
            Err(err) if err.is_retryable() => {
                self.not_ready_attempts += 1;
                let attempts = self.not_ready_attempts;
                if attempts > self.settings.max_not_ready_retries {
                    tracing::warn!(slot, attempts, "frame never became ready, aborting run");
                    self.discard();
                    return Err(PhotoStripError::CaptureAborted { slot, attempts });
                }
                tracing::warn!(slot, attempt = attempts, "frame not ready, retrying");
                Ok(Step {
                    events: vec![SequencerEvent::FrameNotReady {
                        slot,
                        attempt: attempts,
                    }],
                    wait: ms(self.settings.not_ready_retry_ms),
                })
            }
            Err(err) => {
                tracing::warn!(slot, error = %err, "capture failed, aborting run");
                self.discard();
                Err(err)
            }
        }
    }

    fn accept(&mut self, slot: usize, still: CapturedStill) -> PhotoStripResult<Step> {
        self.not_ready_attempts = 0;
        self.buffer.push(still);
        let mut events = vec![
            SequencerEvent::CountdownTick { slot, remaining: 0 },
            SequencerEvent::Captured {
                slot,
                flash: ms(self.settings.flash_ms),
            },
        ];

        if self.buffer.len() < STILLS_PER_SESSION {
            self.state = SequencerState::Countdown {
                slot: self.buffer.len(),
                remaining: self.settings.countdown_secs,
            };
            return Ok(Step {
                events,
                wait: ms(self.settings.between_shots_ms),
            });
        }

        let stills = std::mem::take(&mut self.buffer);
        let session = Session::freeze(self.run_id, self.filter, chrono::Local::now(), stills)?;
        self.session = Some(session);
        self.state = SequencerState::Complete;
        events.push(SequencerEvent::SessionComplete {
            run_id: self.run_id,
        });
        tracing::info!(run_id = self.run_id, "capture run complete");
        Ok(Step {
            events,
            wait: Duration::ZERO,
        })
    }

    fn discard(&mut self) {
        self.buffer.clear();
        self.session = None;
        self.not_ready_attempts = 0;
        self.state = SequencerState::Idle;
    }

    /// `"Photo N of 4"` while counting down.
    pub fn progress_label(&self) -> Option<String> {
        match self.state {
            SequencerState::Countdown { slot, .. } => {
                Some(format!("Photo {} of {STILLS_PER_SESSION}", slot + 1))
            }
            _ => None,
        }
    }

    /// Countdown value the next tick will announce: a digit, or `"!"` when the next tick shoots.
    pub fn countdown_label(&self) -> Option<String> {
        match self.state {
            SequencerState::Countdown { remaining: 0, .. } => Some("!".to_string()),
            SequencerState::Countdown { remaining, .. } => Some(remaining.to_string()),
            _ => None,
        }
    }
}

fn ms(v: u64) -> Duration {
    Duration::from_millis(v)
}

#[cfg(test)]
#[path = "../../tests/unit/session/sequencer.rs"]
mod tests;
