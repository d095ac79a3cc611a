//! Typewriter headline effect.
//!
//! A two-phase state machine driven by the timer queue: type the
//! current role string forward one character per step, pause at the
//! full word, erase one character per step, pause at empty, advance
//! to the next role modulo the list and repeat. The cycle never
//! terminates and cannot be restarted; the `started` guard makes the
//! reveal trigger idempotent.
//!
//! A missing host element stops the loop cold, exactly like the
//! missing-element no-op everywhere else on the page.

use std::time::Duration;

use crate::page::{ElementId, Page};
use crate::schedule::{TimerEvent, TimerQueue};

/// Delay between typed characters.
pub const TYPE_INTERVAL: Duration = Duration::from_millis(90);

/// Pause at a fully typed word before erasing begins.
pub const FULL_WORD_PAUSE: Duration = Duration::from_millis(1100);

/// Delay between erased characters.
pub const ERASE_INTERVAL: Duration = Duration::from_millis(45);

/// Pause at the empty display before the next word types.
pub const NEXT_WORD_PAUSE: Duration = Duration::from_millis(300);

/// Settle delay between the host's reveal and the first step.
pub const START_DELAY: Duration = Duration::from_millis(400);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Typing,
    Erasing,
}

#[derive(Debug)]
pub struct TypingEffect {
    host: Option<ElementId>,
    roles: Vec<String>,
    role_idx: usize,
    char_idx: usize,
    phase: Phase,
    started: bool,
}

impl TypingEffect {
    /// Bind to the display host. `roles` is the fixed cycle of
    /// strings; an empty list or absent host never starts.
    pub fn new(host: Option<ElementId>, roles: Vec<String>) -> Self {
        TypingEffect {
            host,
            roles,
            role_idx: 0,
            char_idx: 0,
            phase: Phase::Typing,
            started: false,
        }
    }

    pub fn started(&self) -> bool {
        self.started
    }

    /// Position in the role list. Exposed for the cycle invariants.
    pub fn role_index(&self) -> usize {
        self.role_idx
    }

    /// Character count of the longest role. The layout reserves this
    /// width so the line does not shift while typing.
    pub fn max_role_width(&self) -> usize {
        self.roles
            .iter()
            .map(|r| r.chars().count())
            .max()
            .unwrap_or(0)
    }

    /// Queue the first step, `START_DELAY` out. Subsequent calls are
    /// no-ops: the loop runs for the life of the page.
    pub fn start(&mut self, timers: &mut TimerQueue, now: Duration) {
        if self.started || self.host.is_none() || self.roles.is_empty() {
            return;
        }
        self.started = true;
        timers.schedule_after(now, START_DELAY, TimerEvent::TypingStep);
    }

    /// One step of the cycle. Each step performs at most one display
    /// mutation and schedules its successor.
    pub fn step(&mut self, page: &mut Page, timers: &mut TimerQueue, now: Duration) {
        let Some(host) = self.host else {
            return;
        };
        let Some(word) = self.roles.get(self.role_idx) else {
            return;
        };

        match self.phase {
            Phase::Typing => {
                if let Some(ch) = word.chars().nth(self.char_idx) {
                    page.push_text_char(host, ch);
                    self.char_idx += 1;
                    timers.schedule_after(now, TYPE_INTERVAL, TimerEvent::TypingStep);
                } else {
                    // Full word on display; hold it, then erase.
                    self.phase = Phase::Erasing;
                    timers.schedule_after(now, FULL_WORD_PAUSE, TimerEvent::TypingStep);
                }
            }
            Phase::Erasing => {
                if self.char_idx > 0 {
                    page.pop_text_char(host);
                    self.char_idx -= 1;
                    timers.schedule_after(now, ERASE_INTERVAL, TimerEvent::TypingStep);
                } else {
                    // Empty display; hold it, then type the next role.
                    self.role_idx = (self.role_idx + 1) % self.roles.len();
                    self.phase = Phase::Typing;
                    timers.schedule_after(now, NEXT_WORD_PAUSE, TimerEvent::TypingStep);
                }
            }
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture(roles: &[&str]) -> (Page, ElementId, TypingEffect, TimerQueue) {
        let mut page = Page::new();
        let host = page.create_in(page.body());
        page.add_class(host, "typing");
        let effect = TypingEffect::new(
            Some(host),
            roles.iter().map(|r| r.to_string()).collect(),
        );
        (page, host, effect, TimerQueue::new())
    }

    /// Jump the clock to the next deadline and run that step.
    /// Returns the fire time.
    fn run_next(
        page: &mut Page,
        effect: &mut TypingEffect,
        timers: &mut TimerQueue,
    ) -> Duration {
        let due = timers.next_due().expect("a step should be scheduled");
        let event = timers.pop_due(due).expect("deadline reached");
        assert_eq!(event, TimerEvent::TypingStep);
        effect.step(page, timers, due);
        due
    }

    #[test]
    fn start_schedules_the_first_step_after_the_settle_delay() {
        let (_page, _host, mut effect, mut timers) = fixture(&["A"]);
        effect.start(&mut timers, Duration::ZERO);
        assert!(effect.started());
        assert_eq!(timers.next_due(), Some(START_DELAY));
    }

    #[test]
    fn start_is_idempotent() {
        let (_page, _host, mut effect, mut timers) = fixture(&["A"]);
        effect.start(&mut timers, Duration::ZERO);
        effect.start(&mut timers, Duration::from_secs(9));

        assert_eq!(timers.pop_due(Duration::from_secs(10)), Some(TimerEvent::TypingStep));
        assert_eq!(timers.pop_due(Duration::from_secs(10)), None);
    }

    #[test]
    fn full_cycle_returns_to_empty_display_and_role_zero() {
        let (mut page, host, mut effect, mut timers) = fixture(&["A", "BB"]);
        effect.start(&mut timers, Duration::ZERO);

        // type "A", pause, erase "A", pause: 4 steps
        for _ in 0..4 {
            run_next(&mut page, &mut effect, &mut timers);
        }
        assert_eq!(page.text(host), "");
        assert_eq!(effect.role_index(), 1);

        // type "BB" (2), pause, erase "BB" (2), pause: 6 steps
        for _ in 0..6 {
            run_next(&mut page, &mut effect, &mut timers);
        }
        assert_eq!(page.text(host), "");
        assert_eq!(effect.role_index(), 0);

        // The loop keeps going.
        assert!(timers.next_due().is_some());
    }

    #[test]
    fn step_delays_match_the_phase_timing() {
        let (mut page, host, mut effect, mut timers) = fixture(&["AB"]);
        effect.start(&mut timers, Duration::ZERO);

        let t1 = run_next(&mut page, &mut effect, &mut timers);
        assert_eq!(t1, START_DELAY);
        assert_eq!(page.text(host), "A");
        assert_eq!(timers.next_due(), Some(t1 + TYPE_INTERVAL));

        let t2 = run_next(&mut page, &mut effect, &mut timers);
        assert_eq!(page.text(host), "AB");

        // Word complete: the next step only transitions, after the
        // full-word pause.
        let t3 = run_next(&mut page, &mut effect, &mut timers);
        assert_eq!(t3, t2 + TYPE_INTERVAL);
        assert_eq!(page.text(host), "AB");
        assert_eq!(timers.next_due(), Some(t3 + FULL_WORD_PAUSE));

        let t4 = run_next(&mut page, &mut effect, &mut timers);
        assert_eq!(page.text(host), "A");
        assert_eq!(timers.next_due(), Some(t4 + ERASE_INTERVAL));

        run_next(&mut page, &mut effect, &mut timers);
        assert_eq!(page.text(host), "");

        // Empty display: role advances after the empty pause.
        let t6 = run_next(&mut page, &mut effect, &mut timers);
        assert_eq!(timers.next_due(), Some(t6 + NEXT_WORD_PAUSE));
    }

    #[test]
    fn multibyte_roles_type_and_erase_cleanly() {
        let (mut page, host, mut effect, mut timers) = fixture(&["héllo"]);
        effect.start(&mut timers, Duration::ZERO);

        for _ in 0..5 {
            run_next(&mut page, &mut effect, &mut timers);
        }
        assert_eq!(page.text(host), "héllo");

        // transition step, then 5 erase steps
        for _ in 0..6 {
            run_next(&mut page, &mut effect, &mut timers);
        }
        assert_eq!(page.text(host), "");
    }

    #[test]
    fn missing_host_never_starts() {
        let mut timers = TimerQueue::new();
        let mut effect = TypingEffect::new(None, vec!["A".into()]);
        effect.start(&mut timers, Duration::ZERO);
        assert!(!effect.started());
        assert!(timers.is_empty());
    }

    #[test]
    fn empty_role_list_never_starts() {
        let mut page = Page::new();
        let host = page.create_in(page.body());
        let mut timers = TimerQueue::new();
        let mut effect = TypingEffect::new(Some(host), Vec::new());
        effect.start(&mut timers, Duration::ZERO);
        assert!(!effect.started());
        assert!(timers.is_empty());
    }

    #[test]
    fn max_role_width_counts_characters_not_bytes() {
        let (_page, _host, effect, _) = fixture(&["éé", "abc"]);
        assert_eq!(effect.max_role_width(), 3);
    }
}
