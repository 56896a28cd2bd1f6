//! Cue scheduler for the preloader timeline.
//!
//! Instead of a cascade of one-shot timers, the scheduler holds a sorted list
//! of cues and releases each one the first time the frame clock passes its
//! offset. Cancelling drops every pending cue at once, which is how teardown
//! guarantees nothing fires into a dead host.

use crate::phase::{Phase, StillTimeline, Timeline};
use std::collections::VecDeque;
use std::time::Duration;

/// Host-visible events raised by the timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signal {
    /// The active phase changed.
    Phase(Phase),
    /// Show the greeting overlay.
    ShowText,
    /// Start fading the overlay out.
    FadeOut,
    /// The animation is finished. Raised at most once.
    Complete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Cue {
    at: Duration,
    signal: Signal,
}

/// Releases timeline signals as elapsed time passes their offsets.
#[derive(Debug, Clone)]
pub struct Scheduler {
    pending: VecDeque<Cue>,
    phase: Phase,
    cancelled: bool,
}

impl Scheduler {
    /// Full animated timeline.
    pub fn animated(timeline: &Timeline) -> Self {
        Self::from_cues(vec![
            Cue { at: timeline.converge_at, signal: Signal::Phase(Phase::Converge) },
            Cue { at: timeline.hold_at, signal: Signal::Phase(Phase::Hold) },
            Cue { at: timeline.hold_at, signal: Signal::ShowText },
            Cue { at: timeline.explode_at, signal: Signal::Phase(Phase::Explode) },
            Cue { at: timeline.fade_out_at, signal: Signal::FadeOut },
            Cue { at: timeline.complete_at, signal: Signal::Complete },
        ])
    }

    /// Reduced-motion timeline: text immediately, no phase changes.
    pub fn still(timeline: &StillTimeline) -> Self {
        Self::from_cues(vec![
            Cue { at: Duration::ZERO, signal: Signal::ShowText },
            Cue { at: timeline.fade_out_at, signal: Signal::FadeOut },
            Cue { at: timeline.complete_at, signal: Signal::Complete },
        ])
    }

    fn from_cues(mut cues: Vec<Cue>) -> Self {
        // stable: equal offsets keep declaration order
        cues.sort_by_key(|c| c.at);
        Self {
            pending: cues.into(),
            phase: Phase::Scatter,
            cancelled: false,
        }
    }

    /// Release every cue whose offset is at or before `elapsed`, in order.
    pub fn advance(&mut self, elapsed: Duration) -> Vec<Signal> {
        let mut fired = Vec::new();
        while let Some(cue) = self.pending.front() {
            if cue.at > elapsed {
                break;
            }
            let signal = cue.signal;
            self.pending.pop_front();
            if let Signal::Phase(phase) = signal {
                // forward only, even for a hand-built cue list
                if phase <= self.phase {
                    continue;
                }
                self.phase = phase;
            }
            fired.push(signal);
        }
        fired
    }

    /// Drop every pending cue. Later calls to `advance` release nothing.
    pub fn cancel(&mut self) {
        self.pending.clear();
        self.cancelled = true;
    }

    /// Phase as of the last `advance`.
    #[inline]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[inline]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    /// True once every cue has been released or cancelled.
    #[inline]
    pub fn is_idle(&self) -> bool {
        self.pending.is_empty()
    }

    /// Offset of the next pending cue.
    pub fn next_due(&self) -> Option<Duration> {
        self.pending.front().map(|c| c.at)
    }
}
