//! Presentation state for individual reminder rows.
//!
//! Checking a reminder fades and collapses its row, then asks the list to
//! remove it:
//!
//! ```text
//!   Idle --checked--> Animating --both tweens done--> Removed
//!    ^                    |
//!    +-----unchecked------+
//! ```
//!
//! Views never touch the list directly; they report [`ItemIntent`]s which the
//! owner feeds back into [`crate::reminder::ReminderList::apply`].

use crate::reminder::ReminderRecord;
use std::collections::HashMap;
use std::time::{Duration, Instant};

pub const DEFAULT_ANIMATION: Duration = Duration::from_millis(500);

/// What an item view asks of the list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemIntent {
    Toggle(u64),
    Remove(u64),
}

/// Visual parameters of a row at one instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ItemFrame {
    pub opacity: f32,
    /// Vertical scale, 1.0 is full height.
    pub scale: f32,
}

impl ItemFrame {
    pub const VISIBLE: Self = Self {
        opacity: 1.0,
        scale: 1.0,
    };
    pub const HIDDEN: Self = Self {
        opacity: 0.0,
        scale: 0.0,
    };
}

/// Linear interpolation between two values over a fixed duration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tween {
    pub from: f32,
    pub to: f32,
    pub duration: Duration,
}

impl Tween {
    pub fn new(from: f32, to: f32, duration: Duration) -> Self {
        Self { from, to, duration }
    }

    pub fn value_at(&self, elapsed: Duration) -> f32 {
        if self.is_done(elapsed) {
            return self.to;
        }
        let progress = elapsed.as_secs_f32() / self.duration.as_secs_f32();
        self.from + (self.to - self.from) * progress
    }

    pub fn is_done(&self, elapsed: Duration) -> bool {
        elapsed >= self.duration
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presentation {
    Idle,
    Animating { started: Instant },
    Removed,
}

/// Fade-and-collapse animation for one row.
#[derive(Debug, Clone)]
pub struct ItemAnimation {
    state: Presentation,
    opacity: Tween,
    scale: Tween,
}

impl ItemAnimation {
    pub fn new(duration: Duration) -> Self {
        Self {
            state: Presentation::Idle,
            opacity: Tween::new(1.0, 0.0, duration),
            scale: Tween::new(1.0, 0.0, duration),
        }
    }

    pub fn state(&self) -> Presentation {
        self.state
    }

    /// Follow the record's checked flag.
    ///
    /// Checking an idle row starts the animation; checking an animating row
    /// leaves it running. Unchecking mid-animation snaps back to idle.
    pub fn set_checked(&mut self, checked: bool, now: Instant) {
        self.state = match (self.state, checked) {
            (Presentation::Idle, true) => Presentation::Animating { started: now },
            (Presentation::Animating { .. }, false) => Presentation::Idle,
            (state, _) => state,
        };
    }

    /// Advance to `now`. Returns `true` exactly once, on the transition to
    /// [`Presentation::Removed`].
    pub fn advance(&mut self, now: Instant) -> bool {
        let Presentation::Animating { started } = self.state else {
            return false;
        };
        let elapsed = now.saturating_duration_since(started);
        if self.opacity.is_done(elapsed) && self.scale.is_done(elapsed) {
            self.state = Presentation::Removed;
            return true;
        }
        false
    }

    pub fn frame(&self, now: Instant) -> ItemFrame {
        match self.state {
            Presentation::Idle => ItemFrame::VISIBLE,
            Presentation::Removed => ItemFrame::HIDDEN,
            Presentation::Animating { started } => {
                let elapsed = now.saturating_duration_since(started);
                ItemFrame {
                    opacity: self.opacity.value_at(elapsed),
                    scale: self.scale.value_at(elapsed),
                }
            }
        }
    }
}

/// One presentation state per record, keyed by reminder id.
#[derive(Debug, Clone)]
pub struct ItemViews {
    duration: Duration,
    views: HashMap<u64, ItemAnimation>,
}

impl Default for ItemViews {
    fn default() -> Self {
        Self::new(DEFAULT_ANIMATION)
    }
}

impl ItemViews {
    pub fn new(duration: Duration) -> Self {
        Self {
            duration,
            views: HashMap::new(),
        }
    }

    /// Bring the views in line with a fresh snapshot of the list.
    pub fn reconcile(&mut self, snapshot: &[ReminderRecord], now: Instant) {
        let duration = self.duration;
        self.views
            .retain(|id, _| snapshot.iter().any(|record| record.id == *id));
        for record in snapshot {
            self.views
                .entry(record.id)
                .or_insert_with(|| ItemAnimation::new(duration))
                .set_checked(record.is_checked, now);
        }
    }

    /// Advance every animation, returning removal intents for rows that
    /// finished, ordered by id.
    pub fn tick(&mut self, now: Instant) -> Vec<ItemIntent> {
        let mut finished: Vec<u64> = self
            .views
            .iter_mut()
            .filter_map(|(id, view)| view.advance(now).then_some(*id))
            .collect();
        finished.sort_unstable();
        finished.into_iter().map(ItemIntent::Remove).collect()
    }

    pub fn frame(&self, id: u64, now: Instant) -> ItemFrame {
        self.views
            .get(&id)
            .map_or(ItemFrame::VISIBLE, |view| view.frame(now))
    }

    pub fn state(&self, id: u64) -> Option<Presentation> {
        self.views.get(&id).map(ItemAnimation::state)
    }

    /// The intent a row's checkbox reports.
    pub fn toggle_intent(&self, id: u64) -> ItemIntent {
        ItemIntent::Toggle(id)
    }

    pub fn is_animating(&self) -> bool {
        self.views
            .values()
            .any(|view| matches!(view.state(), Presentation::Animating { .. }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::NullNotifier;
    use crate::reminder::ReminderList;

    fn ms(millis: u64) -> Duration {
        Duration::from_millis(millis)
    }

    #[test]
    fn tween_interpolates_linearly() {
        let tween = Tween::new(1.0, 0.0, ms(500));
        assert_eq!(tween.value_at(ms(0)), 1.0);
        assert!((tween.value_at(ms(250)) - 0.5).abs() < 1e-4);
        assert_eq!(tween.value_at(ms(500)), 0.0);
        assert_eq!(tween.value_at(ms(900)), 0.0);
    }

    #[test]
    fn zero_duration_tween_is_done_immediately() {
        let tween = Tween::new(1.0, 0.0, Duration::ZERO);
        assert!(tween.is_done(Duration::ZERO));
        assert_eq!(tween.value_at(Duration::ZERO), 0.0);
    }

    #[test]
    fn animation_runs_idle_to_removed() {
        let start = Instant::now();
        let mut anim = ItemAnimation::new(ms(500));
        assert_eq!(anim.frame(start), ItemFrame::VISIBLE);

        anim.set_checked(true, start);
        assert!(matches!(anim.state(), Presentation::Animating { .. }));

        let mid = anim.frame(start + ms(250));
        assert!(mid.opacity > 0.0 && mid.opacity < 1.0);
        assert!(mid.scale > 0.0 && mid.scale < 1.0);
        assert!(!anim.advance(start + ms(250)));

        assert!(anim.advance(start + ms(500)));
        assert_eq!(anim.state(), Presentation::Removed);
        assert_eq!(anim.frame(start + ms(500)), ItemFrame::HIDDEN);
        // Removal is signalled only once.
        assert!(!anim.advance(start + ms(800)));
    }

    #[test]
    fn rechecking_does_not_restart_animation() {
        let start = Instant::now();
        let mut anim = ItemAnimation::new(ms(500));
        anim.set_checked(true, start);
        anim.set_checked(true, start + ms(400));
        assert!(anim.advance(start + ms(500)));
    }

    #[test]
    fn unchecking_mid_animation_restores_visibility() {
        let start = Instant::now();
        let mut anim = ItemAnimation::new(ms(500));
        anim.set_checked(true, start);
        anim.set_checked(false, start + ms(200));

        assert_eq!(anim.state(), Presentation::Idle);
        assert_eq!(anim.frame(start + ms(300)), ItemFrame::VISIBLE);
        assert!(!anim.advance(start + ms(1000)));
    }

    #[test]
    fn checked_record_disappears_after_animation() {
        let mut list = ReminderList::new(Box::new(NullNotifier), "Reminder");
        let keep = list.add("Keep me", "09:00");
        let done = list.add("Done", "10:00");
        let mut views = ItemViews::new(ms(500));
        let start = Instant::now();
        views.reconcile(&list.render(), start);

        list.apply(views.toggle_intent(done));
        views.reconcile(&list.render(), start);
        assert!(views.is_animating());

        assert!(views.tick(start + ms(100)).is_empty());
        assert_eq!(list.len(), 2);

        let intents = views.tick(start + ms(500));
        assert_eq!(intents, vec![ItemIntent::Remove(done)]);
        for intent in intents {
            list.apply(intent);
        }
        views.reconcile(&list.render(), start + ms(500));

        let snapshot = list.render();
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot[0].id, keep);
        assert!(!snapshot[0].is_checked);
        assert_eq!(views.state(done), None);
        assert_eq!(views.state(keep), Some(Presentation::Idle));
    }

    #[test]
    fn rapid_toggles_end_in_a_defined_state() {
        let mut list = ReminderList::new(Box::new(NullNotifier), "Reminder");
        let id = list.add("Flip", "09:00");
        let mut views = ItemViews::new(ms(500));
        let start = Instant::now();
        views.reconcile(&list.render(), start);

        // true -> false -> true inside one animation cycle
        for offset in [0, 100, 200] {
            list.toggle(id);
            views.reconcile(&list.render(), start + ms(offset));
        }
        assert!(list.get(id).unwrap().is_checked);

        // The last check restarted from idle at +200ms.
        assert!(views.tick(start + ms(600)).is_empty());
        let intents = views.tick(start + ms(700));
        assert_eq!(intents, vec![ItemIntent::Remove(id)]);
        intents.into_iter().for_each(|intent| list.apply(intent));
        assert!(list.is_empty());

        // true -> false ends fully visible.
        let other = list.add("Flop", "09:00");
        views.reconcile(&list.render(), start);
        list.toggle(other);
        views.reconcile(&list.render(), start);
        list.toggle(other);
        views.reconcile(&list.render(), start + ms(50));
        assert!(views.tick(start + ms(5000)).is_empty());
        assert_eq!(views.frame(other, start + ms(5000)), ItemFrame::VISIBLE);
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn unknown_rows_render_visible() {
        let views = ItemViews::default();
        assert_eq!(views.frame(42, Instant::now()), ItemFrame::VISIBLE);
    }
}
