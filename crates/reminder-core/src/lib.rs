//! # Reminder Core Library
//!
//! Everything behind the Today's Reminders screen that does not depend on a
//! particular front-end.
//!
//! ## Modules
//!
//! - `reminder`: reminder records and the list controller
//! - `item_view`: per-row fade/collapse animation and the intents rows report
//! - `notify`: fire-and-forget local notification scheduling
//! - `time_format`: parsing and 12h/24h display of reminder times
//! - `settings`: configuration management
//! - `theme`: UI theming system

pub mod item_view;
pub mod notify;
pub mod reminder;
pub mod settings;
pub mod theme;
pub mod time_format;

#[cfg(test)]
mod tests {
    use crate::item_view::{ItemIntent, ItemViews};
    use crate::notify::TokioNotifier;
    use crate::reminder::ReminderList;
    use std::time::{Duration, Instant};

    #[tokio::test]
    async fn test_add_check_off_and_notify() {
        let (notifier, mut events) = TokioNotifier::channel();
        let mut list = ReminderList::new(Box::new(notifier), "Reminder");
        let mut views = ItemViews::new(Duration::from_millis(100));

        let milk = list.add("Buy milk", "14:00");
        let bread = list.add("Buy bread", "14:30");
        let start = Instant::now();
        views.reconcile(&list.render(), start);

        list.apply(ItemIntent::Toggle(milk));
        views.reconcile(&list.render(), start);
        for intent in views.tick(start + Duration::from_millis(100)) {
            list.apply(intent);
        }
        views.reconcile(&list.render(), start + Duration::from_millis(100));

        let snapshot = list.render();
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot[0].id, bread);

        // Both notifications are pending on the runtime, not delivered.
        assert!(events.try_recv().is_err());
    }
}
