use reminder_core::{
    settings::Settings,
    theme::{Element, Theme},
};
use ratatui::{
    prelude::{Alignment, Frame, Rect},
    text::{Line, Span},
    widgets::{block::Title, Block, Borders, Paragraph},
};

pub fn render_header(frame: &mut Frame, area: Rect, theme: &Theme, settings: &Settings, count: usize) {
    let title = Title::from(" Today's Reminders ⏰ ").alignment(Alignment::Left);

    let status = Line::from(vec![
        Span::styled(reminder_count(count), theme.title_style()),
        Span::styled(" :: ", theme.ratatui_style(Element::Inactive)),
        Span::styled(settings.time_format.to_string(), theme.accent_style()),
        Span::styled(" :: ", theme.ratatui_style(Element::Inactive)),
        Span::styled(theme.variant().to_string(), theme.accent_style()),
    ]);

    let header = Paragraph::new(status)
        .style(theme.text_style())
        .alignment(Alignment::Left)
        .block(
            Block::new()
                .borders(Borders::ALL)
                .title(title)
                .title_style(theme.title_style())
                .border_style(theme.border_style())
                .style(theme.text_style()),
        );

    frame.render_widget(header, area);
}

fn reminder_count(count: usize) -> String {
    match count {
        0 => "Nothing to remember".to_string(),
        1 => "1 reminder".to_string(),
        n => format!("{n} reminders"),
    }
}
