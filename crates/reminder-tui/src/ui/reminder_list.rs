use reminder_core::{
    item_view::{ItemFrame, ItemViews},
    reminder::ReminderRecord,
    theme::{Element, Theme},
    time_format::{format_time, TimeFormat},
};
use ratatui::{
    prelude::{Alignment, Frame, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use std::time::Instant;
use unicode_width::UnicodeWidthStr;

/// Rows taken by one card at full scale: border, label, time, border.
pub const CARD_HEIGHT: u16 = 4;
const CARD_GAP: u16 = 1;

pub struct ListView<'a> {
    pub records: &'a [ReminderRecord],
    pub views: &'a ItemViews,
    pub selected: Option<usize>,
    pub time_format: TimeFormat,
    pub now: Instant,
}

pub fn render_reminder_list(frame: &mut Frame, area: Rect, theme: &Theme, list: &ListView) {
    if list.records.is_empty() {
        frame.render_widget(
            Paragraph::new("No reminders yet. Write one below.")
                .alignment(Alignment::Center)
                .style(theme.ratatui_style(Element::Inactive)),
            area,
        );
        return;
    }

    let mut y = area.y;
    let bottom = area.y + area.height;
    let first = first_visible(list.selected.unwrap_or(0), area.height);

    for (index, record) in list.records.iter().enumerate().skip(first) {
        let frame_state = list.views.frame(record.id, list.now);
        let height = scaled_height(frame_state);
        if height == 0 {
            continue;
        }
        if y >= bottom {
            break;
        }

        let card = Rect::new(area.x, y, area.width, height.min(bottom - y));
        render_card(
            frame,
            card,
            theme,
            record,
            frame_state,
            list.selected == Some(index),
            list.time_format,
        );
        y = y.saturating_add(height + CARD_GAP);
    }
}

/// First card index to draw so that `selected` stays on screen.
pub fn first_visible(selected: usize, height: u16) -> usize {
    let per_screen = usize::from((height / (CARD_HEIGHT + CARD_GAP)).max(1));
    selected.saturating_sub(per_screen - 1)
}

/// Card height while collapsing; rounds so a nearly finished card vanishes.
pub fn scaled_height(frame: ItemFrame) -> u16 {
    (f32::from(CARD_HEIGHT) * frame.scale.clamp(0.0, 1.0)).round() as u16
}

fn render_card(
    frame: &mut Frame,
    area: Rect,
    theme: &Theme,
    record: &ReminderRecord,
    state: ItemFrame,
    selected: bool,
    time_format: TimeFormat,
) {
    let card_style = theme.faded(Element::Card, state.opacity);
    let border_style = if selected {
        theme.faded(Element::Accent, state.opacity)
    } else {
        card_style
    };

    let checkbox = if record.is_checked { "[x] " } else { "[ ] " };
    let marker = if selected { "› " } else { "  " };
    let label_width = usize::from(area.width.saturating_sub(2))
        .saturating_sub(marker.width() + checkbox.width());

    let lines = vec![
        Line::from(vec![
            Span::styled(marker, border_style),
            Span::styled(checkbox, card_style),
            Span::styled(truncate(&record.text, label_width), card_style),
        ]),
        Line::from(Span::styled(
            format!("      {}", format_time(&record.time, time_format)),
            theme.faded(Element::CardTime, state.opacity),
        )),
    ];

    frame.render_widget(
        Paragraph::new(lines).style(card_style).block(
            Block::new()
                .borders(Borders::ALL)
                .border_style(border_style)
                .style(card_style),
        ),
        area,
    );
}

/// Cut `text` to `width` display columns, marking the cut with an ellipsis.
pub fn truncate(text: &str, width: usize) -> String {
    if text.width() <= width {
        return text.to_string();
    }
    if width == 0 {
        return String::new();
    }

    let mut out = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let w = unicode_width::UnicodeWidthChar::width(ch).unwrap_or(0);
        if used + w > width - 1 {
            break;
        }
        out.push(ch);
        used += w;
    }
    out.push('…');
    out
}
