use std::time::Duration;

use crate::{
    capture::device::VideoSource,
    foundation::error::PhotoStripResult,
    session::sequencer::{Sequencer, SequencerEvent, SequencerState},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// Pacer verdict after a wait.
pub enum Flow {
    /// Keep going.
    Continue,
    /// Abort the run; all partial stills are discarded.
    Cancel,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// How [`run_sequence`] ended.
pub enum RunOutcome {
    /// Four stills captured; read them from [`Sequencer::session`].
    Complete,
    /// The pacer cancelled; the sequencer is back to `Idle`.
    Cancelled,
}

/// Scheduling seam for [`run_sequence`]: owns waiting, observes events, may cancel.
pub trait Pacer {
    /// Wait `d` before the next tick.
    fn wait(&mut self, d: Duration) -> Flow;

    /// Called for every event in order.
    fn observe(&mut self, _event: &SequencerEvent) {}
}

/// Sleeps the current thread for real.
#[derive(Clone, Copy, Debug, Default)]
pub struct ThreadPacer;

impl Pacer for ThreadPacer {
    fn wait(&mut self, d: Duration) -> Flow {
        if !d.is_zero() {
            std::thread::sleep(d);
        }
        Flow::Continue
    }
}

/// Never waits. Used for batch runs and tests.
#[derive(Clone, Copy, Debug, Default)]
pub struct InstantPacer;

impl Pacer for InstantPacer {
    fn wait(&mut self, _d: Duration) -> Flow {
        Flow::Continue
    }
}

/// Drive a started sequencer until the run completes, is cancelled, or fails.
///
/// Shots are strictly sequential: shot `n + 1` never starts before shot `n` is encoded.
/// On cancel the sequencer is reset with [`Sequencer::retake`] so no partial still survives.
pub fn run_sequence(
    seq: &mut Sequencer,
    source: &mut dyn VideoSource,
    pacer: &mut dyn Pacer,
) -> PhotoStripResult<RunOutcome> {
    loop {
        if seq.state() == SequencerState::Complete {
            return Ok(RunOutcome::Complete);
        }
        let step = seq.tick(source)?;
        for event in &step.events {
            pacer.observe(event);
        }
        if seq.state() == SequencerState::Complete {
            return Ok(RunOutcome::Complete);
        }
        if pacer.wait(step.wait) == Flow::Cancel {
            seq.retake();
            return Ok(RunOutcome::Cancelled);
        }
    }
}
