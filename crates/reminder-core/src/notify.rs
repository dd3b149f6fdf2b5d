//! Local notification collaborator.
//!
//! The list controller hands a [`NotificationRequest`] to a [`Notifier`] and
//! never looks back: nothing is returned and delivery failures are only
//! logged. [`TokioNotifier`] delivers by sleeping on the runtime until the
//! trigger time and then emitting a [`NotificationEvent`] for the UI to toast.

use chrono::{DateTime, Duration as ChronoDuration, Local, NaiveDateTime, NaiveTime};
use tokio::sync::mpsc;
use tracing::{debug, info};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationRequest {
    pub title: String,
    pub body: String,
    pub trigger_at: DateTime<Local>,
}

/// A delivered notification, forwarded verbatim to the toast display.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NotificationEvent {
    pub title: Option<String>,
    pub body: Option<String>,
}

impl From<NotificationRequest> for NotificationEvent {
    fn from(request: NotificationRequest) -> Self {
        Self {
            title: Some(request.title),
            body: Some(request.body),
        }
    }
}

/// Fire-and-forget scheduling of a local notification.
pub trait Notifier {
    fn schedule(&self, request: NotificationRequest);
}

/// Discards every request. Used when notifications are unavailable.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullNotifier;

impl Notifier for NullNotifier {
    fn schedule(&self, request: NotificationRequest) {
        debug!(title = %request.title, "notifications disabled, dropping request");
    }
}

/// Schedules notifications as timer tasks on the ambient tokio runtime.
#[derive(Debug, Clone)]
pub struct TokioNotifier {
    events: mpsc::UnboundedSender<NotificationEvent>,
}

impl TokioNotifier {
    /// Create a notifier and the receiving end of its delivery stream.
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<NotificationEvent>) {
        let (events, rx) = mpsc::unbounded_channel();
        (Self { events }, rx)
    }
}

impl Notifier for TokioNotifier {
    fn schedule(&self, request: NotificationRequest) {
        let handle = match tokio::runtime::Handle::try_current() {
            Ok(handle) => handle,
            Err(err) => {
                debug!(%err, "no runtime available, notification not scheduled");
                return;
            }
        };

        // A trigger time already in the past fires immediately.
        let delay = (request.trigger_at - Local::now())
            .to_std()
            .unwrap_or_default();
        info!(
            title = %request.title,
            trigger_at = %request.trigger_at.format("%H:%M"),
            delay_secs = delay.as_secs(),
            "notification scheduled"
        );

        let events = self.events.clone();
        handle.spawn(async move {
            tokio::time::sleep(delay).await;
            if events.send(request.into()).is_err() {
                debug!("notification receiver closed, event dropped");
            }
        });
    }
}

/// The next moment at or after `now` whose clock reads `time`: today if
/// that is still ahead, otherwise tomorrow.
pub fn next_occurrence(time: NaiveTime, now: NaiveDateTime) -> NaiveDateTime {
    let today = now.date().and_time(time);
    if today > now {
        today
    } else {
        today + ChronoDuration::days(1)
    }
}

/// [`next_occurrence`] resolved in the local time zone. Returns `None` when
/// the wall-clock time does not exist on that day (DST gap).
pub fn next_local_occurrence(time: NaiveTime, now: DateTime<Local>) -> Option<DateTime<Local>> {
    next_occurrence(time, now.naive_local())
        .and_local_timezone(Local)
        .earliest()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::time::Duration;

    fn at(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 1)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    fn hm(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn next_occurrence_is_today_when_ahead() {
        assert_eq!(next_occurrence(hm(14, 0), at(9, 30)), at(14, 0));
    }

    #[test]
    fn next_occurrence_rolls_to_tomorrow_when_passed() {
        let next = next_occurrence(hm(8, 0), at(9, 30));
        assert_eq!(next, at(8, 0) + ChronoDuration::days(1));
        // The current minute counts as passed.
        let same = next_occurrence(hm(9, 30), at(9, 30));
        assert_eq!(same, at(9, 30) + ChronoDuration::days(1));
    }

    #[test]
    fn notification_event_carries_request_fields() {
        let event = NotificationEvent::from(NotificationRequest {
            title: "Reminder".into(),
            body: "Buy milk".into(),
            trigger_at: Local::now(),
        });
        assert_eq!(event.title.as_deref(), Some("Reminder"));
        assert_eq!(event.body.as_deref(), Some("Buy milk"));
    }

    #[tokio::test]
    async fn tokio_notifier_delivers_due_notification() {
        let (notifier, mut rx) = TokioNotifier::channel();
        notifier.schedule(NotificationRequest {
            title: "Reminder".into(),
            body: "Stretch".into(),
            trigger_at: Local::now(),
        });

        let event = tokio::time::timeout(Duration::from_secs(2), rx.recv())
            .await
            .expect("notification should arrive")
            .expect("channel open");
        assert_eq!(event.body.as_deref(), Some("Stretch"));
    }

    #[tokio::test]
    async fn tokio_notifier_swallows_closed_receiver() {
        let (notifier, rx) = TokioNotifier::channel();
        drop(rx);
        notifier.schedule(NotificationRequest {
            title: "Reminder".into(),
            body: "Nobody listens".into(),
            trigger_at: Local::now(),
        });
        tokio::time::sleep(Duration::from_millis(20)).await;
    }

    #[test]
    fn tokio_notifier_without_runtime_is_silent() {
        let (notifier, mut rx) = TokioNotifier::channel();
        notifier.schedule(NotificationRequest {
            title: "Reminder".into(),
            body: "No runtime".into(),
            trigger_at: Local::now(),
        });
        assert!(rx.try_recv().is_err());
    }
}
