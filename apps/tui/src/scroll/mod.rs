//! Scroll/transition controller.
//!
//! Converts wheel deltas and arrow-key navigation into a discrete active
//! section plus a continuous cross-fade progress. While the final section
//! is active, wheel input stops moving the page and feeds a bounded
//! accumulator instead: positive values reveal content inside the section,
//! negative values first resist (feedback band) and then commit a move
//! back one section.
//!
//! Time is injected as a `Duration` since session start. Delayed steps
//! (section commit, guard release) are queued timers tagged with a
//! generation counter and are checked against it when they fire.

mod config;
mod timers;

pub use config::{ScrollConfig, ScrollConfigError};
pub use timers::TimerQueue;

use std::time::Duration;

const OFFSET_EPSILON: f64 = 1e-6;

/// Observable controller state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollState {
    /// Page offset in the same units as the viewport height.
    pub raw_offset: f64,
    pub section_index: usize,
    /// Blend across the current section pair, 0 = lower, 1 = upper.
    pub transition_progress: f64,
    pub accumulated_delta: f64,
    /// Accumulator floored at 0 and capped at 1; drives in-section reveal.
    pub sub_scroll_progress: f64,
    pub is_transitioning: bool,
}

impl Default for ScrollState {
    fn default() -> Self {
        Self {
            raw_offset: 0.0,
            section_index: 0,
            transition_progress: 0.0,
            accumulated_delta: 0.0,
            sub_scroll_progress: 0.0,
            is_transitioning: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Phase {
    Idle {
        section: usize,
    },
    Transitioning {
        from: usize,
        to: usize,
        progress: f64,
    },
    SubScrolling {
        section: usize,
        sub_progress: f64,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavKey {
    Up,
    Down,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn FnMut(&ScrollState)>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TimerAction {
    Commit { target: usize },
    Settle,
}

/// Programmatic smooth scroll between two adjacent sections.
#[derive(Debug, Clone, Copy)]
struct ScrollAnimation {
    from: usize,
    to: usize,
    start_offset: f64,
    start_progress: f64,
    end_progress: f64,
    started: Duration,
    duration: Duration,
}

impl ScrollAnimation {
    fn fraction(&self, now: Duration) -> f64 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_sub(self.started).as_secs_f64();
        (elapsed / self.duration.as_secs_f64()).clamp(0.0, 1.0)
    }
}

fn ease_in_out(t: f64) -> f64 {
    t * t * 2.0f64.mul_add(-t, 3.0)
}

fn lerp(from: f64, to: f64, t: f64) -> f64 {
    (to - from).mul_add(t, from)
}

pub struct ScrollController {
    config: ScrollConfig,
    viewport_height: f64,
    state: ScrollState,
    // Re-entrancy guard, not part of the observable state.
    guard: bool,
    generation: u64,
    timers: TimerQueue<TimerAction>,
    animation: Option<ScrollAnimation>,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_subscription: u64,
    shut_down: bool,
}

impl std::fmt::Debug for ScrollController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScrollController")
            .field("config", &self.config)
            .field("viewport_height", &self.viewport_height)
            .field("state", &self.state)
            .field("guard", &self.guard)
            .field("generation", &self.generation)
            .field("pending_timers", &self.timers.len())
            .field("listeners", &self.listeners.len())
            .finish_non_exhaustive()
    }
}

impl ScrollController {
    pub fn new(config: ScrollConfig, viewport_height: f64) -> Self {
        let viewport_height = if viewport_height.is_finite() && viewport_height > 0.0 {
            viewport_height
        } else {
            0.0
        };
        Self {
            config,
            viewport_height,
            state: ScrollState::default(),
            guard: false,
            generation: 0,
            timers: TimerQueue::new(),
            animation: None,
            listeners: Vec::new(),
            next_subscription: 0,
            shut_down: false,
        }
    }

    pub const fn config(&self) -> &ScrollConfig {
        &self.config
    }

    pub const fn snapshot(&self) -> ScrollState {
        self.state
    }

    pub const fn viewport_height(&self) -> f64 {
        self.viewport_height
    }

    /// True while a programmatic scroll holds the re-entrancy guard.
    pub const fn is_guarded(&self) -> bool {
        self.guard
    }

    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    /// Continuous page position in sections, `None` for a degenerate viewport.
    pub fn progress(&self) -> Option<f64> {
        (self.viewport_height > 0.0).then(|| self.state.raw_offset / self.viewport_height)
    }

    /// Adjacent sections currently being blended by `transition_progress`.
    pub fn blend_pair(&self) -> (usize, usize) {
        if let Some(animation) = &self.animation {
            return (
                animation.from.min(animation.to),
                animation.from.max(animation.to),
            );
        }
        let lower = self.pair_floor();
        (lower, lower + 1)
    }

    pub fn phase(&self) -> Phase {
        let state = &self.state;
        let last = self.config.last_section();

        if state.is_transitioning {
            let (from, to) = if let Some(animation) = &self.animation {
                (animation.from, animation.to)
            } else if self.at_last_section() {
                (last, last.saturating_sub(1))
            } else {
                let (lower, upper) = self.blend_pair();
                if state.section_index == lower {
                    (lower, upper)
                } else {
                    (upper, lower)
                }
            };
            return Phase::Transitioning {
                from,
                to,
                progress: state.transition_progress,
            };
        }

        if self.at_last_section() && state.accumulated_delta != 0.0 {
            return Phase::SubScrolling {
                section: state.section_index,
                sub_progress: state.sub_scroll_progress,
            };
        }

        Phase::Idle {
            section: state.section_index,
        }
    }

    pub fn subscribe(&mut self, listener: impl FnMut(&ScrollState) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(existing, _)| *existing != id);
        self.listeners.len() != before
    }

    /// Updates the viewport, keeping the page position proportional.
    /// Non-positive heights are ignored.
    pub fn set_viewport_height(&mut self, height: f64) {
        if self.shut_down {
            return;
        }
        if !(height.is_finite() && height > 0.0) {
            log::debug!("Ignoring degenerate viewport height {height}");
            return;
        }

        let before = self.state;
        if self.viewport_height > 0.0 {
            let scale = height / self.viewport_height;
            self.state.raw_offset *= scale;
            if let Some(animation) = self.animation.as_mut() {
                animation.start_offset *= scale;
            }
        } else {
            self.state.raw_offset = self.state.section_index as f64 * height;
        }
        self.viewport_height = height;

        if !self.guard && !self.at_last_section() {
            self.apply_native_offset();
        }
        self.notify_if_changed(before);
    }

    /// Feeds one wheel event; positive deltas scroll forward.
    pub fn on_wheel(&mut self, delta: f64, now: Duration) {
        if self.shut_down || !delta.is_finite() {
            return;
        }
        self.tick(now);

        if self.viewport_height <= 0.0 {
            log::debug!("Wheel ignored: no viewport");
            return;
        }
        if self.guard {
            log::trace!("Wheel ignored while a transition is in flight");
            return;
        }

        let before = self.state;
        if self.at_last_section() {
            self.sub_scroll(delta, now);
        } else {
            self.native_scroll(delta);
        }
        self.notify_if_changed(before);
    }

    /// Arrow navigation, bypassing the accumulator. A page left between
    /// two sections is finished in the key's direction.
    pub fn on_key(&mut self, key: NavKey, now: Duration) {
        let target = if self.at_rest() {
            let current = self.state.section_index;
            match key {
                NavKey::Down => Some(current + 1).filter(|next| *next < self.config.section_count),
                NavKey::Up => current.checked_sub(1),
            }
        } else {
            let lower = self.pair_floor();
            match key {
                NavKey::Down => Some(lower + 1),
                NavKey::Up => Some(lower),
            }
        };
        if let Some(target) = target {
            self.scroll_to_section(target, now);
        }
    }

    /// Starts a programmatic smooth scroll to an adjacent section.
    /// Returns false when the request is dropped.
    pub fn scroll_to_section(&mut self, target: usize, now: Duration) -> bool {
        if self.shut_down {
            return false;
        }
        self.tick(now);

        let current = self.state.section_index;
        if self.viewport_height <= 0.0
            || target >= self.config.section_count
            || !self.is_adjacent_target(target)
        {
            log::debug!("Ignoring scroll from section {current} to {target}");
            return false;
        }

        let before = self.state;
        let started = self.begin_transition(target, now);
        self.notify_if_changed(before);
        started
    }

    /// Advances the programmatic scroll animation and fires due timers.
    pub fn tick(&mut self, now: Duration) {
        if self.shut_down {
            return;
        }
        let before = self.state;

        if let Some(animation) = self.animation {
            let eased = ease_in_out(animation.fraction(now));
            let end_offset = animation.to as f64 * self.viewport_height;
            self.state.raw_offset = lerp(animation.start_offset, end_offset, eased);
            self.state.transition_progress =
                lerp(animation.start_progress, animation.end_progress, eased);
        }

        while let Some((generation, action)) = self.timers.pop_due(now) {
            if generation != self.generation || !self.guard {
                log::trace!("Discarding stale timer {action:?} from generation {generation}");
                continue;
            }
            match action {
                TimerAction::Commit { target } => self.commit_section(target),
                TimerAction::Settle => self.settle(),
            }
        }

        self.notify_if_changed(before);
    }

    /// Invalidates pending timers and drops subscribers. Further input is
    /// ignored.
    pub fn shutdown(&mut self) {
        if self.shut_down {
            return;
        }
        self.shut_down = true;
        self.generation += 1;
        self.timers.clear();
        self.animation = None;
        self.guard = false;
        self.listeners.clear();
    }

    fn last_offset(&self) -> f64 {
        self.config.last_section() as f64 * self.viewport_height
    }

    fn at_last_section(&self) -> bool {
        self.viewport_height > 0.0 && self.state.raw_offset >= self.last_offset() - OFFSET_EPSILON
    }

    /// Page offset sits exactly on the active section.
    fn at_rest(&self) -> bool {
        let resting = self.state.section_index as f64 * self.viewport_height;
        (self.state.raw_offset - resting).abs() <= OFFSET_EPSILON
    }

    /// At rest the neighbours of the active section are reachable;
    /// between sections, either end of the current pair.
    fn is_adjacent_target(&self, target: usize) -> bool {
        if self.at_rest() {
            return target.abs_diff(self.state.section_index) == 1;
        }
        let lower = self.pair_floor();
        target == lower || target == lower + 1
    }

    fn pair_floor(&self) -> usize {
        let last = self.config.last_section();
        let progress = self.progress().unwrap_or(0.0).max(0.0);
        (progress.floor() as usize).min(last.saturating_sub(1))
    }

    fn native_scroll(&mut self, delta: f64) {
        self.state.raw_offset = (self.state.raw_offset + delta).clamp(0.0, self.last_offset());
        self.apply_native_offset();
    }

    /// Derives section and cross-fade from the page offset.
    fn apply_native_offset(&mut self) {
        let Some(progress) = self.progress() else {
            return;
        };
        let lower = self.pair_floor();
        let frac = progress - lower as f64;

        let point = self.config.transition_point;
        let range = self.config.transition_range;
        let band_start = point - range;
        let band_end = point + range;

        let (transition_progress, in_band) = if frac < band_start {
            (0.0, false)
        } else if frac > band_end {
            (1.0, false)
        } else {
            (((frac - band_start) / (2.0 * range)).clamp(0.0, 1.0), true)
        };

        self.state.transition_progress = transition_progress;
        self.state.is_transitioning = in_band;
        self.state.section_index = if frac >= point { lower + 1 } else { lower };
        if !self.at_last_section() {
            self.state.accumulated_delta = 0.0;
            self.state.sub_scroll_progress = 0.0;
        }
    }

    fn sub_scroll(&mut self, delta: f64, now: Duration) {
        let limit = self.config.accumulator_limit;
        let accumulated =
            delta.mul_add(self.config.sensitivity, self.state.accumulated_delta).clamp(-limit, limit);
        self.state.accumulated_delta = accumulated;

        let commit = self.config.commit_threshold;
        let feedback = self.config.feedback_threshold;

        if accumulated < commit {
            self.state.sub_scroll_progress = 0.0;
            let target = self.config.last_section().saturating_sub(1);
            log::debug!("Sub-scroll accumulator {accumulated:.3} crossed commit threshold");
            self.begin_transition(target, now);
        } else if accumulated < feedback {
            let depth = (feedback - accumulated) / (feedback - commit);
            self.state.sub_scroll_progress = 0.0;
            self.state.transition_progress = depth.mul_add(-self.config.feedback_strength, 1.0);
            self.state.is_transitioning = true;
        } else {
            self.state.sub_scroll_progress = accumulated.clamp(0.0, 1.0);
            self.state.transition_progress = 1.0;
            self.state.is_transitioning = false;
        }
    }

    fn begin_transition(&mut self, target: usize, now: Duration) -> bool {
        if self.guard {
            log::trace!("Transition to section {target} dropped: guard held");
            return false;
        }

        let target_offset = target as f64 * self.viewport_height;
        let forward = target_offset > self.state.raw_offset;
        let from = match self.state.section_index {
            current if current != target => current,
            _ if forward => target.saturating_sub(1),
            _ => target + 1,
        };
        let pair = (from.min(target), from.max(target));
        let start_progress = if self.blend_pair() == pair {
            self.state.transition_progress
        } else if forward {
            0.0
        } else {
            1.0
        };

        self.guard = true;
        self.generation += 1;
        self.state.is_transitioning = true;
        self.animation = Some(ScrollAnimation {
            from,
            to: target,
            start_offset: self.state.raw_offset,
            start_progress,
            end_progress: if forward { 1.0 } else { 0.0 },
            started: now,
            duration: self.config.commit_delay,
        });
        self.timers.schedule(
            now + self.config.commit_delay,
            self.generation,
            TimerAction::Commit { target },
        );
        self.timers
            .schedule(now + self.config.settle_delay, self.generation, TimerAction::Settle);

        log::debug!("Transition {from} -> {target} started (generation {})", self.generation);
        true
    }

    fn commit_section(&mut self, target: usize) {
        if let Some(animation) = self.animation.take() {
            self.state.transition_progress = animation.end_progress;
        }
        self.state.section_index = target;
        self.state.raw_offset = target as f64 * self.viewport_height;
        self.state.sub_scroll_progress = 0.0;
        log::debug!("Committed section {target}");
    }

    fn settle(&mut self) {
        self.guard = false;
        self.state.accumulated_delta = 0.0;
        self.state.sub_scroll_progress = 0.0;
        self.state.is_transitioning = false;
        self.apply_native_offset();
    }

    fn notify_if_changed(&mut self, before: ScrollState) {
        if self.state == before {
            return;
        }
        let state = self.state;
        for (_, listener) in &mut self.listeners {
            listener(&state);
        }
    }
}

impl Drop for ScrollController {
    fn drop(&mut self) {
        self.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    const VIEWPORT: f64 = 800.0;

    fn ms(millis: u64) -> Duration {
        Duration::from_millis(millis)
    }

    fn assert_close(actual: f64, expected: f64) {
        let diff = (actual - expected).abs();
        assert!(diff < 1e-9, "expected {expected}, got {actual}, diff {diff}");
    }

    fn controller() -> ScrollController {
        ScrollController::new(ScrollConfig::default(), VIEWPORT)
    }

    fn three_sections() -> ScrollController {
        let config = ScrollConfig {
            section_count: 3,
            ..ScrollConfig::default()
        };
        ScrollController::new(config, VIEWPORT)
    }

    /// Scrolls natively to the last section of a two-section controller.
    fn at_last_section() -> ScrollController {
        let mut controller = controller();
        controller.on_wheel(VIEWPORT, ms(0));
        assert_eq!(controller.snapshot().section_index, 1);
        controller
    }

    #[test]
    fn starts_idle_on_first_section() {
        let controller = controller();
        assert_eq!(controller.phase(), Phase::Idle { section: 0 });
        assert_eq!(controller.snapshot(), ScrollState::default());
    }

    #[test]
    fn progress_outside_band_snaps_to_zero_or_one() {
        let mut controller = three_sections();
        let mut now = 0;
        for _ in 0..160 {
            controller.on_wheel(10.0, ms(now));
            now += 1;
            let state = controller.snapshot();
            let frac = controller.progress().unwrap_or(0.0) - controller.blend_pair().0 as f64;
            if !(0.2..=0.8).contains(&frac) {
                assert!(
                    state.transition_progress == 0.0 || state.transition_progress == 1.0,
                    "leaked {} at frac {frac}",
                    state.transition_progress
                );
                assert!(!state.is_transitioning);
            }
        }
    }

    #[test]
    fn band_interpolates_linearly_and_flips_section_at_transition_point() {
        let mut controller = controller();

        controller.on_wheel(0.35 * VIEWPORT, ms(0));
        let state = controller.snapshot();
        assert_close(state.transition_progress, 0.25);
        assert!(state.is_transitioning);
        assert_eq!(state.section_index, 0);

        controller.on_wheel(0.2 * VIEWPORT, ms(1));
        let state = controller.snapshot();
        assert_close(state.transition_progress, 7.0 / 12.0);
        assert_eq!(state.section_index, 1);
        assert!(matches!(
            controller.phase(),
            Phase::Transitioning { from: 1, to: 0, .. }
        ));
    }

    #[test]
    fn progress_is_monotonic_through_band_both_ways() {
        let mut controller = controller();
        let mut last = 0.0;
        for step in 0..100 {
            controller.on_wheel(7.0, ms(step));
            let progress = controller.snapshot().transition_progress;
            assert!(progress >= last, "forward dip at step {step}");
            last = progress;
        }

        controller.on_wheel(-7.0, ms(100));
        let mut last = controller.snapshot().transition_progress;
        for step in 0..95 {
            controller.on_wheel(-7.0, ms(step + 101));
            let progress = controller.snapshot().transition_progress;
            assert!(progress <= last, "reverse rise at step {step}");
            last = progress;
        }
    }

    #[test]
    fn native_offset_is_clamped_to_page() {
        let mut controller = three_sections();
        controller.on_wheel(-500.0, ms(0));
        assert_close(controller.snapshot().raw_offset, 0.0);

        controller.on_wheel(10_000.0, ms(1));
        assert_close(controller.snapshot().raw_offset, 2.0 * VIEWPORT);
        assert_eq!(controller.snapshot().section_index, 2);
    }

    #[test]
    fn accumulator_stays_within_limit() {
        let mut controller = at_last_section();
        for (step, delta) in [5_000.0, 90_000.0, 1e9, 12.0].into_iter().enumerate() {
            controller.on_wheel(delta, ms(step as u64 + 1));
            let accumulated = controller.snapshot().accumulated_delta;
            assert!((-1.2..=1.2).contains(&accumulated));
        }
        assert_close(controller.snapshot().accumulated_delta, 1.2);
        assert_close(controller.snapshot().sub_scroll_progress, 1.0);
        assert!(matches!(controller.phase(), Phase::SubScrolling { section: 1, .. }));
    }

    #[test]
    fn forward_sub_scroll_does_not_move_page() {
        let mut controller = at_last_section();
        controller.on_wheel(500.0, ms(1));

        let state = controller.snapshot();
        assert_close(state.raw_offset, VIEWPORT);
        assert_close(state.accumulated_delta, 0.4);
        assert_close(state.sub_scroll_progress, 0.4);
        assert_close(state.transition_progress, 1.0);
        assert!(!state.is_transitioning);
    }

    #[test]
    fn feedback_band_shows_partial_progress_without_commit() {
        let mut controller = at_last_section();
        controller.on_wheel(-562.5, ms(1));

        let state = controller.snapshot();
        assert_close(state.accumulated_delta, -0.45);
        assert_close(state.transition_progress, 0.75);
        assert!(state.is_transitioning);
        assert_eq!(state.section_index, 1);
        assert!(!controller.is_guarded());
        assert!(matches!(
            controller.phase(),
            Phase::Transitioning { from: 1, to: 0, .. }
        ));
    }

    #[test]
    fn crossing_commit_threshold_commits_after_delays() {
        let mut controller = at_last_section();
        controller.on_wheel(-800.0, ms(100));

        assert!(controller.is_guarded());
        assert!(controller.snapshot().is_transitioning);
        assert_eq!(controller.snapshot().section_index, 1);

        controller.tick(ms(699));
        assert_eq!(controller.snapshot().section_index, 1);

        controller.tick(ms(700));
        assert_eq!(controller.snapshot().section_index, 0);
        assert!(controller.snapshot().is_transitioning);

        controller.tick(ms(1100));
        let state = controller.snapshot();
        assert!(!state.is_transitioning);
        assert!(!controller.is_guarded());
        assert_close(state.accumulated_delta, 0.0);
        assert_close(state.transition_progress, 0.0);
        assert_close(state.raw_offset, 0.0);
        assert_eq!(controller.phase(), Phase::Idle { section: 0 });
    }

    #[test]
    fn animation_moves_offset_toward_target() {
        let mut controller = at_last_section();
        controller.on_key(NavKey::Up, ms(0));
        controller.tick(ms(300));

        let state = controller.snapshot();
        assert!(state.raw_offset < VIEWPORT && state.raw_offset > 0.0);
        assert!(state.transition_progress < 1.0 && state.transition_progress > 0.0);
        assert_eq!(controller.blend_pair(), (0, 1));
    }

    #[test]
    fn keyboard_navigation_uses_commit_path() {
        let mut controller = controller();
        controller.on_key(NavKey::Down, ms(0));
        assert!(controller.is_guarded());
        assert_eq!(controller.pending_timers(), 2);

        controller.tick(ms(1000));
        let state = controller.snapshot();
        assert_eq!(state.section_index, 1);
        assert_close(state.transition_progress, 1.0);
        assert!(!state.is_transitioning);

        // Already at the last section: nothing further down.
        controller.on_key(NavKey::Down, ms(1001));
        assert!(!controller.is_guarded());
    }

    #[test]
    fn competing_triggers_commit_once() {
        let mut controller = at_last_section();
        let commits = Rc::new(RefCell::new(Vec::new()));
        let seen = Rc::clone(&commits);
        let mut last_section = controller.snapshot().section_index;
        controller.subscribe(move |state| {
            if state.section_index != last_section {
                last_section = state.section_index;
                seen.borrow_mut().push(state.section_index);
            }
        });

        controller.on_wheel(-800.0, ms(0));
        assert!(!controller.scroll_to_section(0, ms(10)));
        controller.on_key(NavKey::Up, ms(20));
        for step in 0..40_u64 {
            let delta = if step % 2 == 0 { -900.0 } else { 900.0 };
            controller.on_wheel(delta, ms(30 + step * 20));
        }
        controller.tick(ms(2000));

        assert_eq!(*commits.borrow(), vec![0]);
    }

    #[test]
    fn stale_timers_are_discarded_after_shutdown() {
        let mut controller = controller();
        let notifications = Rc::new(RefCell::new(0));
        let counter = Rc::clone(&notifications);
        controller.subscribe(move |_| *counter.borrow_mut() += 1);

        controller.on_key(NavKey::Down, ms(0));
        let before = *notifications.borrow();
        controller.shutdown();
        controller.tick(ms(5000));
        controller.on_wheel(100.0, ms(5001));

        assert_eq!(*notifications.borrow(), before);
        assert_eq!(controller.pending_timers(), 0);
        assert_eq!(controller.snapshot().section_index, 0);
    }

    #[test]
    fn unsubscribe_stops_notifications() {
        let mut controller = controller();
        let notifications = Rc::new(RefCell::new(0));
        let counter = Rc::clone(&notifications);
        let id = controller.subscribe(move |_| *counter.borrow_mut() += 1);

        controller.on_wheel(100.0, ms(0));
        assert!(controller.unsubscribe(id));
        assert!(!controller.unsubscribe(id));
        controller.on_wheel(100.0, ms(1));

        assert_eq!(*notifications.borrow(), 1);
    }

    #[test]
    fn degenerate_viewport_keeps_prior_state() {
        let mut controller = ScrollController::new(ScrollConfig::default(), 0.0);
        controller.on_wheel(400.0, ms(0));
        controller.on_key(NavKey::Down, ms(1));
        assert_eq!(controller.snapshot(), ScrollState::default());
        assert_eq!(controller.progress(), None);

        let mut controller = controller_with_offset(400.0);
        let before = controller.snapshot();
        controller.set_viewport_height(0.0);
        controller.set_viewport_height(f64::NAN);
        assert_eq!(controller.snapshot(), before);
    }

    #[test]
    fn resize_keeps_relative_position() {
        let mut controller = controller_with_offset(400.0);
        controller.set_viewport_height(400.0);
        let state = controller.snapshot();
        assert_close(state.raw_offset, 200.0);
        assert_close(state.transition_progress, 0.5);
    }

    #[test]
    fn keys_finish_a_half_scrolled_page() {
        let mut controller = controller_with_offset(0.6 * VIEWPORT);
        assert_eq!(controller.snapshot().section_index, 1);

        controller.on_key(NavKey::Down, ms(10));
        assert!(controller.is_guarded());
        controller.tick(ms(1100));
        let state = controller.snapshot();
        assert_eq!(state.section_index, 1);
        assert_close(state.raw_offset, VIEWPORT);
        assert_close(state.transition_progress, 1.0);
        assert!(!state.is_transitioning);

        let mut controller = controller_with_offset(0.6 * VIEWPORT);
        controller.on_key(NavKey::Up, ms(10));
        controller.tick(ms(1100));
        let state = controller.snapshot();
        assert_eq!(state.section_index, 0);
        assert_close(state.raw_offset, 0.0);
        assert_close(state.transition_progress, 0.0);
    }

    #[test]
    fn scroll_to_section_between_sections_accepts_pair_ends_only() {
        let mut controller = three_sections();
        controller.on_wheel(1.3 * VIEWPORT, ms(0));
        assert_eq!(controller.blend_pair(), (1, 2));

        assert!(!controller.scroll_to_section(0, ms(1)));
        assert!(controller.scroll_to_section(2, ms(2)));
        controller.tick(ms(1100));
        assert_eq!(controller.snapshot().section_index, 2);
        assert_close(controller.snapshot().raw_offset, 2.0 * VIEWPORT);
    }

    #[test]
    fn resize_during_animation_stays_on_the_page() {
        let mut controller = at_last_section();
        controller.on_key(NavKey::Up, ms(0));
        controller.tick(ms(300));
        let before = controller.progress().expect("viewport");

        controller.set_viewport_height(VIEWPORT / 2.0);
        assert_close(controller.progress().expect("viewport"), before);

        for step in 31..=60_u64 {
            controller.tick(ms(step * 10));
            let progress = controller.progress().expect("viewport");
            assert!((0.0..=before).contains(&progress), "progress {progress} left the page");
        }
        controller.tick(ms(1100));
        assert_eq!(controller.snapshot().section_index, 0);
        assert_close(controller.snapshot().raw_offset, 0.0);
    }

    fn controller_with_offset(offset: f64) -> ScrollController {
        let mut controller = controller();
        controller.on_wheel(offset, ms(0));
        controller
    }
}
