// ABOUTME: Renderer for the driver registration wizard
// Tab progress header, per-tab field rows with error annotations,
// document checklist and the navigation footer

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
    Frame,
};

use super::state::{FieldId, WizardState, WizardTab};
use crate::models::DocumentKind;

const DARK_BG: Color = Color::Rgb(25, 25, 35);
const PANEL_BG: Color = Color::Rgb(30, 30, 40);
const SOFT_WHITE: Color = Color::Rgb(220, 220, 230);
const MUTED_GRAY: Color = Color::Rgb(120, 120, 140);
const SUBDUED_BORDER: Color = Color::Rgb(60, 60, 80);
const GOLD: Color = Color::Rgb(255, 215, 0);
const SELECTION_GREEN: Color = Color::Rgb(100, 200, 100);
const ERROR_RED: Color = Color::Rgb(220, 80, 80);

/// The driver registration wizard component.
pub struct DriverWizardComponent;

impl DriverWizardComponent {
    pub fn new() -> Self {
        Self
    }

    /// Main render function.
    pub fn render(&self, frame: &mut Frame, area: Rect, state: &WizardState) {
        frame.render_widget(Clear, area);
        frame.render_widget(Block::default().style(Style::default().bg(DARK_BG)), area);

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(4), // header with tab progress
                Constraint::Min(10),   // tab content
                Constraint::Length(3), // navigation footer
            ])
            .split(area);

        self.render_header(frame, layout[0], state);
        if state.current_tab == WizardTab::Documents {
            self.render_documents(frame, layout[1], state);
        } else {
            self.render_fields(frame, layout[1], state);
        }
        self.render_navigation(frame, layout[2], state);
    }

    fn render_header(&self, frame: &mut Frame, area: Rect, state: &WizardState) {
        let block = Block::default()
            .borders(Borders::BOTTOM)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(SUBDUED_BORDER))
            .style(Style::default().bg(PANEL_BG));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints([Constraint::Length(1), Constraint::Length(1)])
            .split(inner);

        let title = Paragraph::new(Line::from(Span::styled(
            "Registro de Conductores",
            Style::default().fg(GOLD).add_modifier(Modifier::BOLD),
        )))
        .alignment(Alignment::Center);
        frame.render_widget(title, rows[0]);

        let current = state.current_tab.number() - 1;
        let mut spans = Vec::new();
        for (idx, tab) in WizardTab::all().iter().enumerate() {
            let (icon, icon_style) = if idx < current {
                ("●", Style::default().fg(SELECTION_GREEN))
            } else if idx == current {
                ("◉", Style::default().fg(GOLD).add_modifier(Modifier::BOLD))
            } else {
                ("○", Style::default().fg(MUTED_GRAY))
            };
            spans.push(Span::styled(icon, icon_style));
            spans.push(Span::raw(" "));
            spans.push(Span::styled(
                tab.title(),
                if idx == current {
                    Style::default().fg(SOFT_WHITE)
                } else {
                    Style::default().fg(MUTED_GRAY)
                },
            ));
            if idx + 1 < WizardTab::all().len() {
                spans.push(Span::styled(" → ", Style::default().fg(SUBDUED_BORDER)));
            }
        }
        let progress = Paragraph::new(Line::from(spans)).alignment(Alignment::Center);
        frame.render_widget(progress, rows[1]);
    }

    fn render_fields(&self, frame: &mut Frame, area: Rect, state: &WizardState) {
        let block = Block::default()
            .title(format!(" {} ", state.current_tab.title()))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .style(Style::default().bg(PANEL_BG));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let mut lines: Vec<Line> = Vec::new();
        for (idx, field) in FieldId::in_tab(state.current_tab).iter().enumerate() {
            let focused = idx == state.focus;
            let marker = if focused { "> " } else { "  " };
            let required_mark = if field.required() { "*" } else { " " };
            let label_style = if focused {
                Style::default().fg(GOLD).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(MUTED_GRAY)
            };

            let shown = match field {
                FieldId::Password | FieldId::ConfirmPassword => {
                    "•".repeat(state.value(*field).len())
                }
                _ => state.value(*field).to_string(),
            };
            let value_style = if state.error(*field).is_some() {
                Style::default().fg(ERROR_RED)
            } else {
                Style::default().fg(SOFT_WHITE)
            };

            lines.push(Line::from(vec![
                Span::styled(marker, Style::default().fg(GOLD)),
                Span::styled(
                    format!("{}{:<27}", required_mark, field.label()),
                    label_style,
                ),
                Span::styled(shown, value_style),
            ]));

            if let Some(error) = state.error(*field) {
                lines.push(Line::from(Span::styled(
                    format!("     {error}"),
                    Style::default().fg(ERROR_RED),
                )));
            }
        }

        frame.render_widget(Paragraph::new(lines), inner);
    }

    fn render_documents(&self, frame: &mut Frame, area: Rect, state: &WizardState) {
        let block = Block::default()
            .title(" Documentos (máximo 5MB por archivo) ")
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .style(Style::default().bg(PANEL_BG));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(4), Constraint::Length(2)])
            .split(inner);

        let mut lines: Vec<Line> = Vec::new();
        for (idx, kind) in DocumentKind::all().iter().enumerate() {
            let focused = idx == state.focus;
            let marker = if focused { "> " } else { "  " };
            let required_mark = if kind.required() { "*" } else { " " };
            let label_style = if focused {
                Style::default().fg(GOLD).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(MUTED_GRAY)
            };

            let (status, status_style) = match state.documents.get(kind) {
                Some(path) => (
                    path.file_name()
                        .map(|n| n.to_string_lossy().into_owned())
                        .unwrap_or_else(|| path.display().to_string()),
                    Style::default().fg(SELECTION_GREEN),
                ),
                None => ("Sin archivo".to_string(), Style::default().fg(MUTED_GRAY)),
            };

            lines.push(Line::from(vec![
                Span::styled(marker, Style::default().fg(GOLD)),
                Span::styled(
                    format!("{}{:<36}", required_mark, kind.label()),
                    label_style,
                ),
                Span::styled(status, status_style),
            ]));

            if let Some(error) = state.document_error(*kind) {
                lines.push(Line::from(Span::styled(
                    format!("     {error}"),
                    Style::default().fg(ERROR_RED),
                )));
            }
        }
        frame.render_widget(Paragraph::new(lines), rows[0]);

        let input = Paragraph::new(Line::from(vec![
            Span::styled("Ruta del archivo: ", Style::default().fg(MUTED_GRAY)),
            Span::styled(
                state.document_input.clone(),
                Style::default().fg(SOFT_WHITE),
            ),
        ]));
        frame.render_widget(input, rows[1]);
    }

    fn render_navigation(&self, frame: &mut Frame, area: Rect, state: &WizardState) {
        let mut spans = Vec::new();

        if state.can_go_back() {
            spans.push(Span::styled(
                "[←] Anterior   ",
                Style::default().fg(SOFT_WHITE),
            ));
        }

        if state.is_final_tab() {
            let style = if state.submitting {
                Style::default().fg(MUTED_GRAY)
            } else {
                Style::default().fg(SELECTION_GREEN).add_modifier(Modifier::BOLD)
            };
            spans.push(Span::styled(
                format!("[Enter] {}", state.submit_label()),
                style,
            ));
        } else {
            spans.push(Span::styled(
                "[→] Siguiente",
                Style::default().fg(SOFT_WHITE),
            ));
        }

        spans.push(Span::styled(
            "   [Tab] Campo   [1-5] Pestaña   [Esc] Cancelar",
            Style::default().fg(MUTED_GRAY),
        ));

        let footer = Paragraph::new(Line::from(spans))
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::TOP)
                    .border_style(Style::default().fg(SUBDUED_BORDER)),
            );
        frame.render_widget(footer, area);
    }
}

impl Default for DriverWizardComponent {
    fn default() -> Self {
        Self::new()
    }
}
