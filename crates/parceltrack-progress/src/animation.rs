pub const DEFAULT_ANIMATION_DURATION_MS: f64 = 3_000.0;

/// Per-frame marker state owned by the caller's render loop.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AnimationState {
    pub displayed_percent: f64,
    pub elapsed_ms: f64,
}

impl AnimationState {
    /// Linear step toward `target_percent` over `duration_ms`.
    ///
    /// Each run interpolates up from 0; the previously displayed value does not
    /// seed it. `ProgressAnimator` with `AnimationStart::CarryForward` avoids that
    /// rewind.
    #[must_use]
    pub fn advance(
        self,
        target_percent: f64,
        elapsed_ms: f64,
        duration_ms: f64,
        delivered: bool,
    ) -> Self {
        Self {
            displayed_percent: interpolate(0.0, target_percent, elapsed_ms, duration_ms, delivered),
            elapsed_ms,
        }
    }

    #[must_use]
    pub fn advance_default(self, target_percent: f64, elapsed_ms: f64, delivered: bool) -> Self {
        self.advance(
            target_percent,
            elapsed_ms,
            DEFAULT_ANIMATION_DURATION_MS,
            delivered,
        )
    }
}

/// Where a new animation run starts from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AnimationStart {
    /// Restart from 0 on every run.
    #[default]
    Reset,
    /// Continue from the last displayed percent.
    CarryForward,
}

/// Drives successive animation runs for one progress marker.
///
/// The animator only does arithmetic; scheduling `tick` calls (and stopping
/// them when the view goes away) stays with the caller.
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressAnimator {
    start: AnimationStart,
    duration_ms: f64,
    from_percent: f64,
    target_percent: f64,
    delivered: bool,
    state: AnimationState,
}

impl ProgressAnimator {
    #[must_use]
    pub fn new(start: AnimationStart, duration_ms: f64) -> Self {
        Self {
            start,
            duration_ms,
            from_percent: 0.0,
            target_percent: 0.0,
            delivered: false,
            state: AnimationState::default(),
        }
    }

    /// Begins a new run toward `target_percent`.
    pub fn retarget(&mut self, target_percent: f64, delivered: bool) {
        self.from_percent = match self.start {
            AnimationStart::Reset => 0.0,
            AnimationStart::CarryForward => self.state.displayed_percent,
        };
        self.target_percent = target_percent;
        self.delivered = delivered;
        self.state = AnimationState {
            displayed_percent: self.from_percent,
            elapsed_ms: 0.0,
        };
    }

    /// Recomputes the displayed percent for `elapsed_ms` into the current run.
    pub fn tick(&mut self, elapsed_ms: f64) -> AnimationState {
        self.state = match self.start {
            AnimationStart::Reset => self.state.advance(
                self.target_percent,
                elapsed_ms,
                self.duration_ms,
                self.delivered,
            ),
            AnimationStart::CarryForward => AnimationState {
                displayed_percent: interpolate(
                    self.from_percent,
                    self.target_percent,
                    elapsed_ms,
                    self.duration_ms,
                    self.delivered,
                ),
                elapsed_ms,
            },
        };
        self.state
    }

    #[must_use]
    pub fn state(&self) -> AnimationState {
        self.state
    }

    #[must_use]
    pub fn duration_ms(&self) -> f64 {
        self.duration_ms
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.delivered || self.state.elapsed_ms >= self.duration_ms
    }
}

fn interpolate(
    from_percent: f64,
    target_percent: f64,
    elapsed_ms: f64,
    duration_ms: f64,
    delivered: bool,
) -> f64 {
    if delivered {
        return 100.0;
    }
    if elapsed_ms >= duration_ms {
        return target_percent;
    }

    let fraction = elapsed_ms / duration_ms;
    let fraction = if fraction < 0.0 { 0.0 } else { fraction };
    let displayed = from_percent + (target_percent - from_percent) * fraction;

    // Never step past the target, whichever direction the run is heading.
    if (from_percent <= target_percent && displayed > target_percent)
        || (from_percent > target_percent && displayed < target_percent)
    {
        target_percent
    } else {
        displayed
    }
}

#[cfg(test)]
mod tests {
    use super::{AnimationStart, AnimationState, ProgressAnimator, DEFAULT_ANIMATION_DURATION_MS};

    #[test]
    fn completed_run_lands_exactly_on_target() {
        let state = AnimationState::default().advance(65.0, 3_000.0, 3_000.0, false);
        assert_eq!(state.displayed_percent, 65.0);
        assert_eq!(state.elapsed_ms, 3_000.0);
    }

    #[test]
    fn halfway_run_shows_half_the_target() {
        let state = AnimationState::default().advance_default(80.0, 1_500.0, false);
        assert_eq!(state.displayed_percent, 40.0);
    }

    #[test]
    fn delivered_short_circuits_to_one_hundred() {
        let state = AnimationState::default().advance(40.0, 0.0, 3_000.0, true);
        assert_eq!(state.displayed_percent, 100.0);
    }

    #[test]
    fn reset_mode_ignores_previous_display() {
        let previous = AnimationState {
            displayed_percent: 70.0,
            elapsed_ms: 3_000.0,
        };
        let state = previous.advance(70.0, 0.0, 3_000.0, false);
        assert_eq!(state.displayed_percent, 0.0);
    }

    #[test]
    fn zero_duration_completes_immediately() {
        let state = AnimationState::default().advance(30.0, 0.0, 0.0, false);
        assert_eq!(state.displayed_percent, 30.0);
    }

    #[test]
    fn reset_animator_rewinds_on_retarget() {
        let mut animator = ProgressAnimator::new(AnimationStart::Reset, 1_000.0);
        animator.retarget(50.0, false);
        assert_eq!(animator.tick(1_000.0).displayed_percent, 50.0);
        assert!(animator.is_complete());

        animator.retarget(60.0, false);
        assert_eq!(animator.state().displayed_percent, 0.0);
        assert_eq!(animator.tick(500.0).displayed_percent, 30.0);
        assert!(!animator.is_complete());
    }

    #[test]
    fn carry_forward_animator_continues_from_last_display() {
        let mut animator = ProgressAnimator::new(AnimationStart::CarryForward, 1_000.0);
        animator.retarget(50.0, false);
        animator.tick(1_000.0);

        animator.retarget(60.0, false);
        assert_eq!(animator.state().displayed_percent, 50.0);
        assert_eq!(animator.tick(500.0).displayed_percent, 55.0);
        assert_eq!(animator.tick(1_000.0).displayed_percent, 60.0);
    }

    #[test]
    fn carry_forward_can_move_backwards_without_overshooting() {
        let mut animator = ProgressAnimator::new(AnimationStart::CarryForward, 1_000.0);
        animator.retarget(80.0, false);
        animator.tick(2_000.0);

        animator.retarget(20.0, false);
        let halfway = animator.tick(500.0).displayed_percent;
        assert_eq!(halfway, 50.0);
        assert!(animator.tick(999.0).displayed_percent >= 20.0);
        assert_eq!(animator.tick(1_000.0).displayed_percent, 20.0);
    }

    #[test]
    fn delivered_retarget_jumps_to_complete() {
        let mut animator =
            ProgressAnimator::new(AnimationStart::CarryForward, DEFAULT_ANIMATION_DURATION_MS);
        animator.retarget(100.0, true);
        assert_eq!(animator.tick(0.0).displayed_percent, 100.0);
        assert!(animator.is_complete());
    }
}
