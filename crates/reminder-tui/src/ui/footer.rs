use crate::ui::app::Focus;
use reminder_core::{
    reminder::Draft,
    theme::{Element, Theme},
    time_format::{format_time, TimeFormat},
};
use ratatui::{
    prelude::{Alignment, Constraint, Direction, Frame, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

const TEXT_PLACEHOLDER: &str = "Write a reminder";
const TIME_PLACEHOLDER: &str = "Set time (e.g., 14:00)";

/// Entry form: reminder text, time, add button, then a line of key hints.
pub fn render_footer(
    frame: &mut Frame,
    area: Rect,
    theme: &Theme,
    draft: &Draft,
    focus: Focus,
    time_format: TimeFormat,
) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Length(1)])
        .split(area);

    let fields = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(10),
            Constraint::Length(28),
            Constraint::Length(5),
        ])
        .split(rows[0]);

    render_input(
        frame,
        fields[0],
        theme,
        &draft.text,
        TEXT_PLACEHOLDER,
        None,
        focus == Focus::Text,
    );

    // Live preview of how the typed time will display.
    let preview = (!draft.time.is_empty()).then(|| format_time(&draft.time, time_format));
    render_input(
        frame,
        fields[1],
        theme,
        &draft.time,
        TIME_PLACEHOLDER,
        preview,
        focus == Focus::Time,
    );

    frame.render_widget(
        Paragraph::new("+")
            .alignment(Alignment::Center)
            .style(theme.accent_style())
            .block(
                Block::new()
                    .borders(Borders::ALL)
                    .border_style(theme.accent_style()),
            ),
        fields[2],
    );

    frame.render_widget(
        Paragraph::new(hints(focus))
            .alignment(Alignment::Center)
            .style(theme.ratatui_style(Element::Inactive)),
        rows[1],
    );
}

fn render_input(
    frame: &mut Frame,
    area: Rect,
    theme: &Theme,
    value: &str,
    placeholder: &str,
    preview: Option<String>,
    focused: bool,
) {
    let border = if focused {
        theme.accent_style()
    } else {
        theme.border_style()
    };

    let mut spans = if value.is_empty() {
        vec![Span::styled(placeholder.to_string(), theme.ratatui_style(Element::Inactive))]
    } else {
        vec![Span::styled(value.to_string(), theme.ratatui_style(Element::Card))]
    };
    if focused {
        spans.push(Span::styled("_", theme.highlight_style()));
    }

    let mut block = Block::new()
        .borders(Borders::ALL)
        .border_style(border)
        .style(theme.ratatui_style(Element::Card));
    if let Some(preview) = preview {
        block = block.title(format!(" {preview} "));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
}

fn hints(focus: Focus) -> Line<'static> {
    let keys: &[(&str, &str)] = match focus {
        Focus::Text => &[("Enter", "add"), ("Ctrl+P", "picker"), ("Tab", "time"), ("Esc", "quit")],
        Focus::Time => &[("Enter", "add"), ("Ctrl+P", "picker"), ("Tab", "list"), ("Esc", "quit")],
        Focus::List => &[
            ("Space", "check"),
            ("D", "delete"),
            ("T", "theme"),
            ("F", "12h/24h"),
            ("Tab", "write"),
            ("Q", "quit"),
        ],
    };

    let mut spans = Vec::with_capacity(keys.len() * 3);
    for (i, (key, action)) in keys.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw(" | "));
        }
        spans.push(Span::raw(format!("[{key}]")));
        spans.push(Span::raw(format!(" {action}")));
    }
    Line::from(spans)
}
