use super::{
    footer::render_footer,
    header::render_header,
    reminder_list::{render_reminder_list, ListView},
    time_picker::{render_time_picker, TimePicker},
    toast::{render_toast, ToastState},
};
use anyhow::Result;
use chrono::{Local, NaiveTime, Timelike};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use reminder_core::{
    item_view::ItemViews,
    notify::{NotificationEvent, TokioNotifier},
    reminder::{PickerOutcome, ReminderList},
    settings::Settings,
    theme::{Element, Theme},
};
use ratatui::{
    prelude::{Backend, Constraint, Direction, Frame, Layout, Rect, Terminal},
    widgets::{Block, Borders},
};
use std::time::{Duration, Instant};
use tokio::sync::mpsc::UnboundedReceiver;
use tracing::{info, warn};

const IDLE_POLL: Duration = Duration::from_millis(50);
const ANIMATION_POLL: Duration = Duration::from_millis(16);

/// Which part of the screen receives keystrokes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Text,
    Time,
    List,
}

impl Focus {
    pub fn next(self) -> Self {
        match self {
            Self::Text => Self::Time,
            Self::Time => Self::List,
            Self::List => Self::Text,
        }
    }
}

pub struct App {
    should_quit: bool,
    theme: Theme,
    settings: Settings,
    reminders: ReminderList,
    views: ItemViews,
    notifications: UnboundedReceiver<NotificationEvent>,
    toast: ToastState,
    picker: Option<TimePicker>,
    focus: Focus,
    selected: usize,
}

impl App {
    pub fn new(settings: Settings) -> Self {
        let (notifier, notifications) = TokioNotifier::channel();
        Self::with_notifier(settings, notifier, notifications)
    }

    /// Build the app around an existing notifier and its delivery stream.
    pub fn with_notifier(
        settings: Settings,
        notifier: TokioNotifier,
        notifications: UnboundedReceiver<NotificationEvent>,
    ) -> Self {
        Self {
            should_quit: false,
            theme: Theme::new(settings.theme),
            reminders: ReminderList::new(Box::new(notifier), settings.notification_title.clone()),
            views: ItemViews::new(settings.animation()),
            notifications,
            toast: ToastState::new(settings.toast_duration()),
            picker: None,
            focus: Focus::default(),
            selected: 0,
            settings,
        }
    }

    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        while !self.should_quit() {
            let now = Instant::now();
            terminal.draw(|frame| self.render(frame, now))?;
            self.handle_events()?;

            let now = Instant::now();
            self.drain_notifications(now);
            self.tick(now);
        }
        info!("shutting down");
        Ok(())
    }

    pub fn render(&self, frame: &mut Frame, now: Instant) {
        let area = frame.size();
        frame.render_widget(
            Block::new()
                .borders(Borders::NONE)
                .style(self.theme.ratatui_style(Element::Background)),
            area,
        );

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(0),
                Constraint::Length(4),
            ])
            .split(area);

        let snapshot = self.reminders.render();
        render_header(frame, chunks[0], &self.theme, &self.settings, snapshot.len());

        let body = Layout::default()
            .horizontal_margin(2)
            .vertical_margin(1)
            .constraints([Constraint::Min(0)])
            .split(chunks[1])[0];
        render_reminder_list(
            frame,
            body,
            &self.theme,
            &ListView {
                records: &snapshot,
                views: &self.views,
                selected: (self.focus == Focus::List).then_some(self.selected),
                time_format: self.settings.time_format,
                now,
            },
        );

        render_footer(
            frame,
            chunks[2],
            &self.theme,
            self.reminders.draft(),
            self.focus,
            self.settings.time_format,
        );

        if let Some(picker) = &self.picker {
            render_time_picker(
                frame,
                centered(area, 36, 7),
                picker,
                self.settings.time_format,
                &self.theme,
            );
        }

        if let Some(toast) = self.toast.visible(now) {
            render_toast(frame, chunks[1], &self.theme, toast);
        }
    }

    fn handle_events(&mut self) -> Result<()> {
        let timeout = if self.views.is_animating() {
            ANIMATION_POLL
        } else {
            IDLE_POLL
        };
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    self.handle_key(key, Instant::now());
                }
            }
        }
        Ok(())
    }

    pub fn handle_key(&mut self, key: KeyEvent, now: Instant) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }

        if let Some(picker) = self.picker.as_mut() {
            if let Some(outcome) = picker.handle_key(key) {
                self.reminders.apply_picker(outcome);
                self.picker = None;
                if let PickerOutcome::Confirmed(time) = outcome {
                    info!(%time, "time picked");
                }
            }
            return;
        }

        match (self.focus, key.code) {
            (_, KeyCode::Tab) => self.focus = self.focus.next(),
            (_, KeyCode::BackTab) => self.focus = self.focus.next().next(),
            (Focus::Text | Focus::Time, KeyCode::Esc) => self.should_quit = true,
            (Focus::Text | Focus::Time, KeyCode::Enter) => {
                self.reminders.submit();
                self.focus = Focus::Text;
                self.sync(now);
            }
            (Focus::Text | Focus::Time, KeyCode::Char('p'))
                if key.modifiers.contains(KeyModifiers::CONTROL) =>
            {
                self.open_picker();
            }
            // Other chords are not text.
            (Focus::Text | Focus::Time, KeyCode::Char(_)) if !is_typing(key.modifiers) => {}
            (Focus::Text, KeyCode::Char(c)) => {
                let mut text = self.reminders.draft().text.clone();
                text.push(c);
                self.reminders.set_draft_text(text);
            }
            (Focus::Text, KeyCode::Backspace) => {
                let mut text = self.reminders.draft().text.clone();
                text.pop();
                self.reminders.set_draft_text(text);
            }
            (Focus::Time, KeyCode::Char(c)) => {
                let mut time = self.reminders.draft().time.clone();
                time.push(c);
                self.reminders.set_draft_time(time);
            }
            (Focus::Time, KeyCode::Backspace) => {
                let mut time = self.reminders.draft().time.clone();
                time.pop();
                self.reminders.set_draft_time(time);
            }
            (Focus::List, code) => self.handle_list_key(code, now),
            _ => {}
        }
    }

    fn handle_list_key(&mut self, code: KeyCode, now: Instant) {
        let snapshot = self.reminders.render();
        match code {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Up | KeyCode::Char('k') => self.selected = self.selected.saturating_sub(1),
            KeyCode::Down | KeyCode::Char('j') => {
                if self.selected + 1 < snapshot.len() {
                    self.selected += 1;
                }
            }
            KeyCode::Char(' ') | KeyCode::Enter => {
                if let Some(record) = snapshot.get(self.selected) {
                    self.reminders.apply(self.views.toggle_intent(record.id));
                    self.sync(now);
                }
            }
            KeyCode::Char('d') | KeyCode::Delete => {
                if let Some(record) = snapshot.get(self.selected) {
                    self.reminders.remove(record.id);
                    self.sync(now);
                }
            }
            KeyCode::Char('t') => {
                self.theme.toggle();
                self.settings.theme = self.theme.variant();
                self.persist_settings();
            }
            KeyCode::Char('f') => {
                self.settings.time_format = self.settings.time_format.toggle();
                self.persist_settings();
            }
            _ => {}
        }
    }

    fn open_picker(&mut self) {
        let seed = reminder_core::time_format::parse_time(&self.reminders.draft().time)
            .unwrap_or_else(current_minute);
        self.picker = Some(TimePicker::new(seed));
    }

    /// Forward delivered notifications to the toast.
    pub fn drain_notifications(&mut self, now: Instant) {
        while let Ok(event) = self.notifications.try_recv() {
            info!(title = ?event.title, body = ?event.body, "notification received");
            self.toast.show(event, now);
        }
        self.toast.expire(now);
    }

    /// Advance row animations and remove rows that finished fading.
    pub fn tick(&mut self, now: Instant) {
        let intents = self.views.tick(now);
        if intents.is_empty() {
            return;
        }
        for intent in intents {
            self.reminders.apply(intent);
        }
        self.sync(now);
    }

    fn sync(&mut self, now: Instant) {
        let snapshot = self.reminders.render();
        self.views.reconcile(&snapshot, now);
        self.selected = self.selected.min(snapshot.len().saturating_sub(1));
    }

    fn persist_settings(&self) {
        if let Err(err) = self.settings.save() {
            warn!(%err, "could not save settings");
        }
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }
}

fn is_typing(modifiers: KeyModifiers) -> bool {
    modifiers.difference(KeyModifiers::SHIFT).is_empty()
}

fn current_minute() -> NaiveTime {
    let now = Local::now().time();
    NaiveTime::from_hms_opt(now.hour(), now.minute(), 0).unwrap_or(now)
}

/// A `width` x `height` rectangle centered in `area`, shrunk to fit.
fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}
