// ABOUTME: Confirmation dialog component for displaying yes/no prompts

use crate::app::state::AppState;
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

pub struct ConfirmationDialogComponent;

impl ConfirmationDialogComponent {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, state: &AppState) {
        if let Some(dialog) = &state.confirmation_dialog {
            let dialog_width = 60.min(area.width.saturating_sub(4));
            let dialog_height = 8;

            let dialog_area = Rect {
                x: (area.width.saturating_sub(dialog_width)) / 2,
                y: (area.height.saturating_sub(dialog_height)) / 2,
                width: dialog_width,
                height: dialog_height,
            };

            // Clear only the dialog area so the view behind stays visible
            frame.render_widget(Clear, dialog_area);

            let block = Block::default()
                .title(dialog.title.clone())
                .borders(Borders::ALL)
                .style(Style::default().bg(Color::Black));
            frame.render_widget(block, dialog_area);

            let inner_area = Rect {
                x: dialog_area.x + 1,
                y: dialog_area.y + 1,
                width: dialog_area.width - 2,
                height: dialog_area.height - 2,
            };

            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Min(1), Constraint::Length(2)])
                .split(inner_area);

            let message = Paragraph::new(dialog.message.clone())
                .wrap(Wrap { trim: true })
                .style(Style::default().fg(Color::White));
            frame.render_widget(message, chunks[0]);

            let button_chunks = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
                .split(chunks[1]);

            let yes_style = if dialog.selected_option {
                Style::default().fg(Color::Black).bg(Color::White)
            } else {
                Style::default().fg(Color::White)
            };
            let yes_button = Paragraph::new("Sí").style(yes_style).alignment(Alignment::Center);
            frame.render_widget(yes_button, button_chunks[0]);

            let no_style = if !dialog.selected_option {
                Style::default().fg(Color::Black).bg(Color::White)
            } else {
                Style::default().fg(Color::White)
            };
            let no_button = Paragraph::new("No").style(no_style).alignment(Alignment::Center);
            frame.render_widget(no_button, button_chunks[1]);
        }
    }
}

impl Default for ConfirmationDialogComponent {
    fn default() -> Self {
        Self::new()
    }
}
