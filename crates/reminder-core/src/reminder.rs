//! Reminder records and the list controller that owns them.

use crate::item_view::ItemIntent;
use crate::notify::{next_local_occurrence, NotificationRequest, Notifier};
use crate::time_format::parse_time;
use chrono::{Local, NaiveTime, Utc};
use std::sync::Arc;
use tracing::{debug, info};

/// Ordered, read-only view of the list handed to the rendering layer.
pub type Snapshot = Arc<[ReminderRecord]>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReminderRecord {
    pub id: u64,
    pub text: String,
    /// Time as entered; see [`ReminderRecord::trigger_time`].
    pub time: String,
    pub is_checked: bool,
}

impl ReminderRecord {
    pub fn trigger_time(&self) -> Option<NaiveTime> {
        parse_time(&self.time)
    }
}

/// Pending contents of the entry form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Draft {
    pub text: String,
    pub time: String,
}

/// Result of a time-picker interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickerOutcome {
    Confirmed(NaiveTime),
    Cancelled,
}

/// Owns the reminder collection and the entry draft.
///
/// The collection is never mutated in place: every change builds a new
/// [`Snapshot`], so anything holding an older snapshot keeps seeing the list
/// as it was.
pub struct ReminderList {
    items: Snapshot,
    draft: Draft,
    last_id: u64,
    notification_title: String,
    notifier: Box<dyn Notifier>,
}

impl ReminderList {
    pub fn new(notifier: Box<dyn Notifier>, notification_title: impl Into<String>) -> Self {
        Self {
            items: Arc::from(Vec::new()),
            draft: Draft::default(),
            last_id: 0,
            notification_title: notification_title.into(),
            notifier,
        }
    }

    /// Append a reminder, schedule its notification and reset the draft.
    ///
    /// Nothing is rejected: empty text is kept, and a time that cannot be
    /// parsed still produces a record, just without a notification.
    pub fn add(&mut self, text: impl Into<String>, time: impl Into<String>) -> u64 {
        let record = ReminderRecord {
            id: self.next_id(),
            text: text.into(),
            time: time.into(),
            is_checked: false,
        };
        let id = record.id;

        self.schedule(&record);
        info!(id, text = %record.text, time = %record.time, "reminder added");

        self.items = self
            .items
            .iter()
            .cloned()
            .chain(std::iter::once(record))
            .collect();
        self.draft = Draft::default();
        id
    }

    /// [`ReminderList::add`] using the current draft.
    pub fn submit(&mut self) -> u64 {
        let Draft { text, time } = std::mem::take(&mut self.draft);
        self.add(text, time)
    }

    /// Flip the checked flag. Unknown ids are ignored.
    pub fn toggle(&mut self, id: u64) {
        if !self.contains(id) {
            debug!(id, "toggle ignored, no such reminder");
            return;
        }
        self.items = self
            .items
            .iter()
            .map(|record| {
                if record.id == id {
                    ReminderRecord {
                        is_checked: !record.is_checked,
                        ..record.clone()
                    }
                } else {
                    record.clone()
                }
            })
            .collect();
        debug!(id, "reminder toggled");
    }

    /// Drop a reminder. Unknown ids are ignored.
    pub fn remove(&mut self, id: u64) {
        if !self.contains(id) {
            debug!(id, "remove ignored, no such reminder");
            return;
        }
        self.items = self
            .items
            .iter()
            .filter(|record| record.id != id)
            .cloned()
            .collect();
        info!(id, "reminder removed");
    }

    /// Route an intent reported by an item view.
    pub fn apply(&mut self, intent: ItemIntent) {
        match intent {
            ItemIntent::Toggle(id) => self.toggle(id),
            ItemIntent::Remove(id) => self.remove(id),
        }
    }

    pub fn render(&self) -> Snapshot {
        Arc::clone(&self.items)
    }

    pub fn get(&self, id: u64) -> Option<&ReminderRecord> {
        self.items.iter().find(|record| record.id == id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn draft(&self) -> &Draft {
        &self.draft
    }

    pub fn set_draft_text(&mut self, text: impl Into<String>) {
        self.draft.text = text.into();
    }

    pub fn set_draft_time(&mut self, time: impl Into<String>) {
        self.draft.time = time.into();
    }

    /// Take a confirmed picker value; a cancelled picker keeps the pending time.
    pub fn apply_picker(&mut self, outcome: PickerOutcome) {
        if let PickerOutcome::Confirmed(time) = outcome {
            self.draft.time = time.format("%H:%M").to_string();
        }
    }

    fn contains(&self, id: u64) -> bool {
        self.items.iter().any(|record| record.id == id)
    }

    // Creation timestamp in milliseconds, bumped to stay strictly increasing.
    fn next_id(&mut self) -> u64 {
        let now = u64::try_from(Utc::now().timestamp_millis()).unwrap_or_default();
        self.last_id = now.max(self.last_id + 1);
        self.last_id
    }

    fn schedule(&self, record: &ReminderRecord) {
        let Some(time) = record.trigger_time() else {
            debug!(id = record.id, time = %record.time, "unparseable time, notification skipped");
            return;
        };
        let Some(trigger_at) = next_local_occurrence(time, Local::now()) else {
            debug!(id = record.id, "time does not exist today, notification skipped");
            return;
        };
        self.notifier.schedule(NotificationRequest {
            title: self.notification_title.clone(),
            body: record.text.clone(),
            trigger_at,
        });
    }
}
