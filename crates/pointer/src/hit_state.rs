//! Previous/current hit bookkeeping and enter/exit transitions.

use crate::raycast::RayCastResult;
use serde::Serialize;

/// Feedback colour chosen for the tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorDecision {
    /// The pointer rests on a surface.
    Valid,
    /// Nothing within range.
    Invalid,
}

/// Transition produced by one [`HitStateTracker::update`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HitTransition {
    /// Colour to apply to the beam and cursor.
    pub color: ColorDecision,
    /// Hit that was entered this tick, if the struck collider changed.
    pub entered: Option<RayCastResult>,
    /// Previously held hit that was left this tick.
    pub exited: Option<RayCastResult>,
}

/// Hit reported this tick and at the end of the prior tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct HitState {
    /// Hit held after this tick's update.
    pub current: Option<RayCastResult>,
    /// Hit held at the end of the prior tick.
    pub previous: Option<RayCastResult>,
}

/// Owns [`HitState`] and diffs each new result against it.
#[derive(Debug, Default)]
pub struct HitStateTracker {
    state: HitState,
}

impl HitStateTracker {
    /// Tracker with no prior hit.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current bookkeeping.
    pub fn state(&self) -> &HitState {
        &self.state
    }

    /// Hit held after the latest update.
    pub fn current(&self) -> Option<&RayCastResult> {
        self.state.current.as_ref()
    }

    /// Hit committed by the last [`end_tick`](Self::end_tick).
    pub fn previous(&self) -> Option<&RayCastResult> {
        self.state.previous.as_ref()
    }

    /// Diff `result` against the prior tick and update `current`.
    ///
    /// Staying on the same collider refreshes `current` without re-firing
    /// enter. Moving to a different collider exits the old one first.
    pub fn update(&mut self, result: &RayCastResult) -> HitTransition {
        let mut current = self.state.previous;
        let mut exited = None;
        let mut color = ColorDecision::Invalid;

        let moved_off = current.is_some_and(|held| held.collider != result.collider);
        if !result.hit || moved_off {
            exited = current.take();
        }

        let mut entered = None;
        if result.hit {
            if current.is_none() {
                entered = Some(*result);
            }
            current = Some(*result);
            color = ColorDecision::Valid;
        }

        self.state.current = current;
        HitTransition {
            color,
            entered,
            exited,
        }
    }

    /// Commit the tick: `previous := current`.
    pub fn end_tick(&mut self) {
        self.state.previous = self.state.current;
    }

    /// Drop the uncommitted update: `current := previous`.
    pub fn discard_tick(&mut self) {
        self.state.current = self.state.previous;
    }
}
