use super::*;
use crate::{
    capture::device::SolidColorSource,
    session::driver::{Flow, InstantPacer, Pacer, RunOutcome, run_sequence},
};

fn fast_settings() -> SequencerSettings {
    SequencerSettings {
        max_not_ready_retries: 3,
        ..SequencerSettings::default()
    }
}

fn gray_source() -> SolidColorSource {
    SolidColorSource::new(8, 6, [128, 128, 128, 255])
}

#[test]
fn first_slot_counts_down_then_captures() {
    let mut seq = Sequencer::new(SequencerSettings::default());
    let mut src = gray_source();
    seq.start(FilterMode::Identity).unwrap();

    let mut seen = Vec::new();
    let mut waits = Vec::new();
    for _ in 0..4 {
        let step = seq.tick(&mut src).unwrap();
        seen.extend(step.events);
        waits.push(step.wait);
    }

    assert_eq!(
        seen,
        vec![
            SequencerEvent::CountdownTick {
                slot: 0,
                remaining: 3
            },
            SequencerEvent::CountdownTick {
                slot: 0,
                remaining: 2
            },
            SequencerEvent::CountdownTick {
                slot: 0,
                remaining: 1
            },
            SequencerEvent::CountdownTick {
                slot: 0,
                remaining: 0
            },
            SequencerEvent::Captured {
                slot: 0,
                flash: Duration::from_millis(200)
            },
        ]
    );
    assert_eq!(
        waits,
        vec![
            Duration::from_secs(1),
            Duration::from_secs(1),
            Duration::from_secs(1),
            Duration::from_millis(500)
        ]
    );
    assert_eq!(
        seq.state(),
        SequencerState::Countdown {
            slot: 1,
            remaining: 3
        }
    );
    assert_eq!(seq.captured_count(), 1);
}

#[test]
fn full_run_freezes_four_stills() {
    let mut seq = Sequencer::new(SequencerSettings::default());
    let mut src = gray_source();
    seq.start(FilterMode::Identity).unwrap();

    let mut ticks = 0;
    let mut last = None;
    while seq.state() != SequencerState::Complete {
        last = Some(seq.tick(&mut src).unwrap());
        ticks += 1;
    }

    assert_eq!(ticks, 16);
    let last = last.unwrap();
    assert_eq!(last.wait, Duration::ZERO);
    assert!(last
        .events
        .contains(&SequencerEvent::SessionComplete { run_id: 1 }));

    let session = seq.session().unwrap();
    assert_eq!(session.stills().len(), STILLS_PER_SESSION);
    assert_eq!(session.run_id(), 1);
    assert_eq!(seq.captured_count(), 4);
}

#[test]
fn filter_is_frozen_at_start() {
    let mut seq = Sequencer::new(SequencerSettings::default());
    let mut src = SolidColorSource::new(2, 2, [10, 20, 30, 255]);
    seq.start(FilterMode::SepiaTone).unwrap();
    run_sequence(&mut seq, &mut src, &mut InstantPacer).unwrap();

    let session = seq.session().unwrap();
    assert_eq!(session.filter(), FilterMode::SepiaTone);
    for still in session.stills() {
        let img = still.decode().unwrap();
        assert!(img.pixels().all(|p| p.0 == [25, 22, 17, 255]));
    }
}

#[test]
fn start_while_counting_down_is_rejected() {
    let mut seq = Sequencer::new(SequencerSettings::default());
    seq.start(FilterMode::Identity).unwrap();
    assert!(matches!(
        seq.start(FilterMode::Identity),
        Err(PhotoStripError::Validation(_))
    ));
}

#[test]
fn tick_while_idle_is_rejected() {
    let mut seq = Sequencer::new(SequencerSettings::default());
    let mut src = gray_source();
    assert!(seq.tick(&mut src).is_err());
    assert_eq!(seq.state(), SequencerState::Idle);
}

#[test]
fn not_ready_frames_retry_the_same_slot() {
    let mut seq = Sequencer::new(fast_settings());
    let mut src = SolidColorSource::with_warmup(4, 4, [1, 2, 3, 255], 2);
    seq.start(FilterMode::Identity).unwrap();
    for _ in 0..3 {
        seq.tick(&mut src).unwrap();
    }

    let step = seq.tick(&mut src).unwrap();
    assert_eq!(
        step.events,
        vec![SequencerEvent::FrameNotReady {
            slot: 0,
            attempt: 1
        }]
    );
    assert_eq!(step.wait, Duration::from_millis(100));
    assert_eq!(seq.captured_count(), 0);

    let step = seq.tick(&mut src).unwrap();
    assert!(matches!(
        step.events[0],
        SequencerEvent::FrameNotReady { attempt: 2, .. }
    ));

    let step = seq.tick(&mut src).unwrap();
    assert!(matches!(step.events[1], SequencerEvent::Captured { slot: 0, .. }));
    assert_eq!(seq.captured_count(), 1);
}

#[test]
fn exhausted_retries_abort_and_discard() {
    let mut seq = Sequencer::new(fast_settings());
    let mut ok = gray_source();
    seq.start(FilterMode::Identity).unwrap();
    for _ in 0..4 {
        seq.tick(&mut ok).unwrap();
    }
    assert_eq!(seq.captured_count(), 1);

    let mut never = SolidColorSource::with_warmup(4, 4, [0, 0, 0, 255], u32::MAX);
    let err = run_sequence(&mut seq, &mut never, &mut InstantPacer).unwrap_err();
    assert!(matches!(
        err,
        PhotoStripError::CaptureAborted {
            slot: 1,
            attempts: 4
        }
    ));
    assert_eq!(seq.state(), SequencerState::Idle);
    assert_eq!(seq.captured_count(), 0);
    assert!(seq.session().is_none());
}

#[test]
fn retake_mid_run_discards_partial_stills() {
    let mut seq = Sequencer::new(SequencerSettings::default());
    let mut red = SolidColorSource::new(4, 4, [255, 0, 0, 255]);
    seq.start(FilterMode::Identity).unwrap();
    for _ in 0..8 {
        seq.tick(&mut red).unwrap();
    }
    assert_eq!(seq.captured_count(), 2);

    seq.retake();
    assert_eq!(seq.state(), SequencerState::Idle);
    assert_eq!(seq.captured_count(), 0);

    let mut gray = gray_source();
    seq.start(FilterMode::Identity).unwrap();
    run_sequence(&mut seq, &mut gray, &mut InstantPacer).unwrap();
    let session = seq.session().unwrap();
    assert_eq!(session.run_id(), 2);
    for still in session.stills() {
        let img = still.decode().unwrap();
        assert!(img.pixels().all(|p| p.0 == [128, 128, 128, 255]));
    }
}

#[test]
fn restart_after_complete_clears_previous_session() {
    let mut seq = Sequencer::new(SequencerSettings::default());
    let mut src = gray_source();
    seq.start(FilterMode::Identity).unwrap();
    run_sequence(&mut seq, &mut src, &mut InstantPacer).unwrap();
    assert!(seq.session().is_some());

    seq.start(FilterMode::Grayscale).unwrap();
    assert!(seq.session().is_none());
    assert_eq!(seq.captured_count(), 0);
}

struct CancelAfter {
    waits_left: usize,
    observed: usize,
}

impl Pacer for CancelAfter {
    fn wait(&mut self, _d: Duration) -> Flow {
        if self.waits_left == 0 {
            return Flow::Cancel;
        }
        self.waits_left -= 1;
        Flow::Continue
    }

    fn observe(&mut self, _event: &SequencerEvent) {
        self.observed += 1;
    }
}

#[test]
fn pacer_cancel_resets_to_idle() {
    let mut seq = Sequencer::new(SequencerSettings::default());
    let mut src = gray_source();
    seq.start(FilterMode::Identity).unwrap();

    let mut pacer = CancelAfter {
        waits_left: 6,
        observed: 0,
    };
    let outcome = run_sequence(&mut seq, &mut src, &mut pacer).unwrap();
    assert_eq!(outcome, RunOutcome::Cancelled);
    assert_eq!(pacer.observed, 8);
    assert_eq!(seq.state(), SequencerState::Idle);
    assert_eq!(seq.captured_count(), 0);
}

#[test]
fn labels_follow_countdown() {
    let mut seq = Sequencer::new(SequencerSettings::default());
    let mut src = gray_source();
    assert_eq!(seq.progress_label(), None);

    seq.start(FilterMode::Identity).unwrap();
    assert_eq!(seq.progress_label().as_deref(), Some("Photo 1 of 4"));
    assert_eq!(seq.countdown_label().as_deref(), Some("3"));
    for _ in 0..3 {
        seq.tick(&mut src).unwrap();
    }
    assert_eq!(seq.countdown_label().as_deref(), Some("!"));
    seq.tick(&mut src).unwrap();
    assert_eq!(seq.progress_label().as_deref(), Some("Photo 2 of 4"));
}

#[test]
fn every_shot_is_announced_by_the_final_countdown_tick() {
    let mut seq = Sequencer::new(SequencerSettings::default());
    let mut src = gray_source();
    seq.start(FilterMode::Identity).unwrap();

    let mut shots = 0;
    while seq.state() != SequencerState::Complete {
        let announced = seq.countdown_label();
        let step = seq.tick(&mut src).unwrap();
        let SequencerEvent::CountdownTick { slot, remaining } = step.events[0] else {
            panic!("step did not start with a countdown tick: {:?}", step.events);
        };
        let shown = if remaining == 0 {
            "!".to_string()
        } else {
            remaining.to_string()
        };
        assert_eq!(announced.as_deref(), Some(shown.as_str()));

        if remaining == 0 {
            assert_eq!(slot, shots);
            assert!(matches!(
                step.events[1],
                SequencerEvent::Captured { slot: s, .. } if s == slot
            ));
            shots += 1;
        } else {
            assert_eq!(step.events.len(), 1);
        }
    }
    assert_eq!(shots, STILLS_PER_SESSION);
}

#[test]
fn settings_validation() {
    assert!(SequencerSettings::default().validate().is_ok());
    let bad = SequencerSettings {
        tick_ms: 0,
        ..SequencerSettings::default()
    };
    assert!(bad.validate().is_err());
}

#[test]
fn freeze_rejects_wrong_counts() {
    let err = Session::freeze(1, FilterMode::Identity, chrono::Local::now(), vec![]).unwrap_err();
    assert!(matches!(err, PhotoStripError::IncompleteSession { got: 0 }));
}
