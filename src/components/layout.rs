// ABOUTME: Top-level layout: dispatches rendering per view and draws the
// shared notification bar and the modal dialog overlay

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::app::state::{AppState, NotificationType, View};
use crate::components::client_registration::ClientRegistrationComponent;
use crate::components::confirmation_dialog::ConfirmationDialogComponent;
use crate::components::dashboard::DashboardComponent;
use crate::components::driver_wizard::DriverWizardComponent;

const MUTED_GRAY: Color = Color::Rgb(120, 120, 140);
const SOFT_WHITE: Color = Color::Rgb(220, 220, 230);
const GOLD: Color = Color::Rgb(255, 215, 0);

/// Owns the per-view renderers and draws the whole frame.
pub struct LayoutComponent {
    dashboard: DashboardComponent,
    client_form: ClientRegistrationComponent,
    wizard: DriverWizardComponent,
    dialog: ConfirmationDialogComponent,
}

impl LayoutComponent {
    pub fn new() -> Self {
        Self {
            dashboard: DashboardComponent::new(),
            client_form: ClientRegistrationComponent::new(),
            wizard: DriverWizardComponent::new(),
            dialog: ConfirmationDialogComponent::new(),
        }
    }

    /// Render one frame.
    pub fn render(&self, frame: &mut Frame, state: &AppState) {
        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(10), Constraint::Length(1)])
            .split(frame.size());

        match state.current_view {
            View::Dashboard => self.dashboard.render(frame, layout[0], &state.dashboard),
            View::ClientRegistration => {
                self.client_form.render(frame, layout[0], &state.client_form)
            }
            View::DriverRegistration => self.wizard.render(frame, layout[0], &state.wizard),
            View::Login => self.render_login(frame, layout[0]),
        }

        self.render_notification(frame, layout[1], state);
        self.dialog.render(frame, frame.size(), state);
    }

    fn render_login(&self, frame: &mut Frame, area: Rect) {
        let lines = vec![
            Line::default(),
            Line::from(Span::styled(
                "EVORY DRIVE",
                Style::default().fg(GOLD).add_modifier(Modifier::BOLD),
            )),
            Line::default(),
            Line::from(Span::styled(
                "Sesión finalizada. Inicie sesión en el portal para continuar.",
                Style::default().fg(SOFT_WHITE),
            )),
            Line::default(),
            Line::from(Span::styled(
                "[Enter] Volver al panel   [q] Salir",
                Style::default().fg(MUTED_GRAY),
            )),
        ];
        let login = Paragraph::new(lines).alignment(Alignment::Center);
        frame.render_widget(login, area);
    }

    /// The single-slot message region shared by every view.
    fn render_notification(&self, frame: &mut Frame, area: Rect, state: &AppState) {
        let Some(notification) = &state.notification else {
            let hints = match state.current_view {
                View::Dashboard => {
                    "[/] Buscar   [Tab] Pestaña   [c] Registrar cliente   [v] Registrar conductor   [q] Salir"
                }
                View::ClientRegistration | View::DriverRegistration => {
                    "[Esc] Cancelar el registro"
                }
                View::Login => "",
            };
            let bar = Paragraph::new(Span::styled(hints, Style::default().fg(MUTED_GRAY)));
            frame.render_widget(bar, area);
            return;
        };

        let (prefix, color) = match notification.notification_type {
            NotificationType::Success => ("✔ ", Color::Rgb(100, 200, 100)),
            NotificationType::Error => ("✘ ", Color::Rgb(220, 80, 80)),
            NotificationType::Warning => ("⚠ ", Color::Rgb(220, 180, 80)),
            NotificationType::Info => ("ℹ ", Color::Rgb(100, 149, 237)),
        };

        let bar = Paragraph::new(Line::from(vec![
            Span::styled(prefix, Style::default().fg(color)),
            Span::styled(
                notification.message.clone(),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            ),
        ]));
        frame.render_widget(bar, area);
    }
}

impl Default for LayoutComponent {
    fn default() -> Self {
        Self::new()
    }
}
