use reminder_core::{
    notify::NotificationEvent,
    theme::{Element, Theme},
};
use ratatui::{
    prelude::{Alignment, Frame, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};
use std::time::{Duration, Instant};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub event: NotificationEvent,
    pub shown_at: Instant,
}

/// The most recent notification, shown until it expires or is replaced.
#[derive(Debug, Clone)]
pub struct ToastState {
    ttl: Duration,
    current: Option<Toast>,
}

impl ToastState {
    pub fn new(ttl: Duration) -> Self {
        Self { ttl, current: None }
    }

    pub fn show(&mut self, event: NotificationEvent, now: Instant) {
        self.current = Some(Toast {
            event,
            shown_at: now,
        });
    }

    pub fn visible(&self, now: Instant) -> Option<&Toast> {
        self.current
            .as_ref()
            .filter(|toast| now.saturating_duration_since(toast.shown_at) < self.ttl)
    }

    /// Drop an expired toast.
    pub fn expire(&mut self, now: Instant) {
        if self.visible(now).is_none() {
            self.current = None;
        }
    }
}

pub fn render_toast(frame: &mut Frame, area: Rect, theme: &Theme, toast: &Toast) {
    let title = toast.event.title.as_deref().unwrap_or("Reminder");
    let body = toast.event.body.as_deref().unwrap_or_default();

    let width = area.width.min(50);
    let toast_area = Rect::new(area.x + (area.width - width) / 2, area.y, width, area.height.min(4));

    let content = vec![
        Line::from(Span::styled(format!("🔔 {title}"), theme.ratatui_style(Element::Toast))),
        Line::from(Span::styled(body.to_string(), theme.ratatui_style(Element::Toast))),
    ];

    frame.render_widget(Clear, toast_area);
    frame.render_widget(
        Paragraph::new(content)
            .alignment(Alignment::Center)
            .style(theme.ratatui_style(Element::Toast))
            .block(
                Block::new()
                    .borders(Borders::ALL)
                    .style(theme.ratatui_style(Element::Toast)),
            ),
        toast_area,
    );
}
