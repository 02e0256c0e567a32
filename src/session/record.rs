use chrono::{DateTime, Local};

use crate::{
    capture::still::CapturedStill,
    effects::filter::FilterMode,
    foundation::error::{PhotoStripError, PhotoStripResult},
};

/// Number of stills in every strip.
pub const STILLS_PER_SESSION: usize = 4;

#[derive(Clone, Debug)]
/// A completed capture run: exactly [`STILLS_PER_SESSION`] stills in capture order.
///
/// Frozen on creation. The sequencer is the only writer while a run is in progress; once a
/// `Session` exists the compositor only reads it.
pub struct Session {
    run_id: u64,
    filter: FilterMode,
    captured_at: DateTime<Local>,
    stills: Vec<CapturedStill>,
}

impl Session {
    /// Freeze a run. Anything other than exactly four stills is
    /// [`PhotoStripError::IncompleteSession`].
    pub fn freeze(
        run_id: u64,
        filter: FilterMode,
        captured_at: DateTime<Local>,
        stills: Vec<CapturedStill>,
    ) -> PhotoStripResult<Self> {
        if stills.len() != STILLS_PER_SESSION {
            return Err(PhotoStripError::IncompleteSession { got: stills.len() });
        }
        Ok(Self {
            run_id,
            filter,
            captured_at,
            stills,
        })
    }

    /// Identifier of the run that produced this session.
    pub fn run_id(&self) -> u64 {
        self.run_id
    }

    /// Filter every still was captured with.
    pub fn filter(&self) -> FilterMode {
        self.filter
    }

    /// When the last still was taken.
    pub fn captured_at(&self) -> DateTime<Local> {
        self.captured_at
    }

    /// Stills in capture order.
    pub fn stills(&self) -> &[CapturedStill] {
        &self.stills
    }
}
