use chrono::{NaiveTime, Timelike};
use crossterm::event::{KeyCode, KeyEvent};
use reminder_core::{
    reminder::PickerOutcome,
    theme::{Element, Theme},
    time_format::TimeFormat,
};
use ratatui::{
    prelude::{Alignment, Constraint, Direction, Frame, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PickerField {
    #[default]
    Hour,
    Minute,
}

/// Hour/minute stepper shown over the list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimePicker {
    hour: u32,
    minute: u32,
    field: PickerField,
}

impl TimePicker {
    pub fn new(seed: NaiveTime) -> Self {
        Self {
            hour: seed.hour(),
            minute: seed.minute(),
            field: PickerField::Hour,
        }
    }

    pub fn time(&self) -> NaiveTime {
        NaiveTime::from_hms_opt(self.hour, self.minute, 0).unwrap_or(NaiveTime::MIN)
    }

    pub fn field(&self) -> PickerField {
        self.field
    }

    /// Returns an outcome once the user confirms or cancels.
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<PickerOutcome> {
        match key.code {
            KeyCode::Enter => return Some(PickerOutcome::Confirmed(self.time())),
            KeyCode::Esc => return Some(PickerOutcome::Cancelled),
            KeyCode::Up | KeyCode::Char('k') => self.step(1),
            KeyCode::Down | KeyCode::Char('j') => self.step(-1),
            KeyCode::PageUp => self.step(10),
            KeyCode::PageDown => self.step(-10),
            KeyCode::Left | KeyCode::Right | KeyCode::Tab => {
                self.field = match self.field {
                    PickerField::Hour => PickerField::Minute,
                    PickerField::Minute => PickerField::Hour,
                };
            }
            _ => {}
        }
        None
    }

    fn step(&mut self, delta: i64) {
        match self.field {
            PickerField::Hour => self.hour = wrap(self.hour, delta, 24),
            PickerField::Minute => self.minute = wrap(self.minute, delta, 60),
        }
    }
}

fn wrap(value: u32, delta: i64, modulus: u32) -> u32 {
    (i64::from(value) + delta).rem_euclid(i64::from(modulus)) as u32
}

pub fn render_time_picker(
    frame: &mut Frame,
    area: Rect,
    picker: &TimePicker,
    format: TimeFormat,
    theme: &Theme,
) {
    let block = Block::new()
        .title(" Set time ")
        .borders(Borders::ALL)
        .style(theme.ratatui_style(Element::Warning));
    let inner = block.inner(area);
    frame.render_widget(Clear, area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(1), // HH : MM
            Constraint::Length(1), // formatted preview
            Constraint::Min(0),    // Spacer
            Constraint::Length(1), // Help
        ])
        .split(inner);

    let style_for = |field: PickerField| {
        if picker.field() == field {
            theme.highlight_style()
        } else {
            theme.text_style()
        }
    };

    let time = picker.time();
    let stepper = Line::from(vec![
        Span::styled(format!(" {:02} ", time.hour()), style_for(PickerField::Hour)),
        Span::styled(" : ", theme.text_style()),
        Span::styled(format!(" {:02} ", time.minute()), style_for(PickerField::Minute)),
    ])
    .alignment(Alignment::Center);
    frame.render_widget(Paragraph::new(stepper), chunks[0]);

    frame.render_widget(
        Paragraph::new(format.format(time))
            .style(theme.accent_style())
            .alignment(Alignment::Center),
        chunks[1],
    );

    frame.render_widget(
        Paragraph::new("↑↓ change  ←→ field  Enter ok  Esc cancel")
            .style(theme.ratatui_style(Element::Inactive))
            .alignment(Alignment::Center),
        chunks[3],
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn hm(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn steps_wrap_around() {
        let mut picker = TimePicker::new(hm(23, 59));
        picker.handle_key(press(KeyCode::Up));
        assert_eq!(picker.time(), hm(0, 59));

        picker.handle_key(press(KeyCode::Right));
        picker.handle_key(press(KeyCode::Up));
        assert_eq!(picker.time(), hm(0, 0));

        picker.handle_key(press(KeyCode::Down));
        assert_eq!(picker.time(), hm(0, 59));
    }

    #[test]
    fn enter_confirms_and_esc_cancels() {
        let mut picker = TimePicker::new(hm(14, 0));
        picker.handle_key(press(KeyCode::Right));
        picker.handle_key(press(KeyCode::PageUp));
        assert_eq!(
            picker.handle_key(press(KeyCode::Enter)),
            Some(PickerOutcome::Confirmed(hm(14, 10)))
        );
        assert_eq!(
            picker.handle_key(press(KeyCode::Esc)),
            Some(PickerOutcome::Cancelled)
        );
    }
}
