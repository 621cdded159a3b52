// ABOUTME: Company detail dashboard: metrics header, tab switching,
// client list with status toggle, and the report export form

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, List, ListItem, Paragraph, Wrap},
    Frame,
};

use crate::api::{ClientSummary, CompanyDetail, ReportKind};
use crate::components::company_search::CompanySearchState;
use crate::validation::parse_date;

/// Warning raised while the report range is inverted.
pub const MSG_REPORT_DATE_ORDER: &str =
    "La fecha de fin debe ser posterior a la fecha de inicio";

/// Tabs of the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DashboardTab {
    Clientes,
    Datos,
    Reportes,
}

impl DashboardTab {
    /// All tabs in display order.
    pub fn all() -> &'static [DashboardTab] {
        &[Self::Clientes, Self::Datos, Self::Reportes]
    }

    /// Tab title.
    pub fn title(&self) -> &'static str {
        match self {
            Self::Clientes => "Clientes",
            Self::Datos => "Datos de la Empresa",
            Self::Reportes => "Reportes",
        }
    }
}

/// Which part of the dashboard receives keystrokes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DashboardFocus {
    /// The company search box.
    Search,
    /// The active tab's content.
    Content,
}

/// State of the report export form.
#[derive(Debug, Default)]
pub struct ReportFormState {
    /// Selected report kind.
    pub kind: Option<ReportKind>,
    /// Start date, `YYYY-MM-DD`.
    pub fecha_inicio: String,
    /// End date, `YYYY-MM-DD`.
    pub fecha_fin: String,
    /// Focused row: 0 kind, 1 start, 2 end.
    pub focus: usize,
    /// Set while an export is in flight.
    pub exporting: bool,
}

impl ReportFormState {
    /// Cycle the report kind selector.
    pub fn cycle_kind(&mut self) {
        let kinds = ReportKind::all();
        self.kind = Some(match self.kind {
            None => kinds[0],
            Some(current) => {
                let idx = kinds.iter().position(|k| *k == current).unwrap_or(0);
                kinds[(idx + 1) % kinds.len()]
            }
        });
    }

    /// Append a character to the focused date field.
    pub fn input_char(&mut self, c: char) {
        match self.focus {
            1 => self.fecha_inicio.push(c),
            2 => self.fecha_fin.push(c),
            _ => {}
        }
    }

    /// Delete the last character of the focused date field.
    pub fn backspace(&mut self) {
        match self.focus {
            1 => {
                self.fecha_inicio.pop();
            }
            2 => {
                self.fecha_fin.pop();
            }
            _ => {}
        }
    }

    /// Move focus down one row.
    pub fn focus_next(&mut self) {
        if self.focus < 2 {
            self.focus += 1;
        }
    }

    /// Move focus up one row.
    pub fn focus_previous(&mut self) {
        self.focus = self.focus.saturating_sub(1);
    }

    /// Warning shown while the end date precedes the start date.
    pub fn date_order_warning(&self) -> Option<&'static str> {
        match (parse_date(&self.fecha_inicio), parse_date(&self.fecha_fin)) {
            (Some(start), Some(end)) if end < start => Some(MSG_REPORT_DATE_ORDER),
            _ => None,
        }
    }

    /// Whether the export control is enabled: kind and both dates present,
    /// parseable, and in order.
    pub fn is_ready(&self) -> bool {
        let Some(_) = self.kind else { return false };
        match (parse_date(&self.fecha_inicio), parse_date(&self.fecha_fin)) {
            (Some(start), Some(end)) => end >= start && !self.exporting,
            _ => false,
        }
    }
}

/// State of the company dashboard view.
#[derive(Debug)]
pub struct DashboardState {
    /// Company currently shown.
    pub company_id: Option<i64>,
    /// Cached company record with metrics.
    pub detail: Option<CompanyDetail>,
    /// Clients of the company.
    pub clients: Vec<ClientSummary>,
    /// Total client count reported by the backend.
    pub client_count: u64,
    /// Set while the client list is loading.
    pub clients_loading: bool,
    /// Selected row in the client list.
    pub selected_client: usize,
    /// Active tab.
    pub active_tab: DashboardTab,
    /// Debounced search box.
    pub search: CompanySearchState,
    /// Report export form.
    pub report: ReportFormState,
    /// Keyboard focus.
    pub focus: DashboardFocus,
}

impl DashboardState {
    pub fn new(search: CompanySearchState) -> Self {
        Self {
            company_id: None,
            detail: None,
            clients: Vec::new(),
            client_count: 0,
            clients_loading: false,
            selected_client: 0,
            active_tab: DashboardTab::Clientes,
            search,
            report: ReportFormState::default(),
            focus: DashboardFocus::Content,
        }
    }

    /// Replace the shown company and drop per-company state.
    pub fn load_company(&mut self, company_id: i64) {
        self.company_id = Some(company_id);
        self.detail = None;
        self.clients.clear();
        self.client_count = 0;
        self.selected_client = 0;
    }

    /// Store the loaded detail record.
    pub fn set_detail(&mut self, detail: CompanyDetail) {
        self.company_id = Some(detail.id);
        self.detail = Some(detail);
    }

    /// Store the loaded client list.
    pub fn set_clients(&mut self, count: u64, clients: Vec<ClientSummary>) {
        self.clients_loading = false;
        self.client_count = count;
        self.clients = clients;
        if self.selected_client >= self.clients.len() {
            self.selected_client = self.clients.len().saturating_sub(1);
        }
    }

    /// Switch tab; returns true when the client list must be reloaded.
    pub fn switch_tab(&mut self, tab: DashboardTab) -> bool {
        let reload = tab == DashboardTab::Clientes && self.active_tab != tab;
        self.active_tab = tab;
        reload
    }

    /// Move the client selection down.
    pub fn select_next_client(&mut self) {
        if !self.clients.is_empty() {
            self.selected_client = (self.selected_client + 1) % self.clients.len();
        }
    }

    /// Move the client selection up.
    pub fn select_previous_client(&mut self) {
        if !self.clients.is_empty() {
            self.selected_client = self
                .selected_client
                .checked_sub(1)
                .unwrap_or(self.clients.len() - 1);
        }
    }

    /// The highlighted client, if any.
    pub fn selected_client(&self) -> Option<&ClientSummary> {
        self.clients.get(self.selected_client)
    }
}

const PANEL_BG: Color = Color::Rgb(30, 30, 40);
const SOFT_WHITE: Color = Color::Rgb(220, 220, 230);
const MUTED_GRAY: Color = Color::Rgb(120, 120, 140);
const GOLD: Color = Color::Rgb(255, 215, 0);
const SELECTION_GREEN: Color = Color::Rgb(100, 200, 100);
const ERROR_RED: Color = Color::Rgb(220, 80, 80);
const WARNING_YELLOW: Color = Color::Rgb(220, 180, 80);
const CORNFLOWER_BLUE: Color = Color::Rgb(100, 149, 237);

/// Renderer for the dashboard view.
pub struct DashboardComponent;

impl DashboardComponent {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, state: &DashboardState) {
        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // search
                Constraint::Length(5), // metrics
                Constraint::Length(1), // tab bar
                Constraint::Min(5),    // tab content
            ])
            .split(area);

        self.render_search(frame, layout[0], state);
        self.render_metrics(frame, layout[1], state);
        self.render_tab_bar(frame, layout[2], state);
        match state.active_tab {
            DashboardTab::Clientes => self.render_clients(frame, layout[3], state),
            DashboardTab::Datos => self.render_company_data(frame, layout[3], state),
            DashboardTab::Reportes => self.render_reports(frame, layout[3], state),
        }

        if state.search.open {
            self.render_search_results(frame, layout[0], state);
        }
    }

    fn render_search(&self, frame: &mut Frame, area: Rect, state: &DashboardState) {
        let focused = state.focus == DashboardFocus::Search;
        let border = if focused { GOLD } else { Color::Rgb(60, 60, 80) };
        let block = Block::default()
            .title(" Buscar compañía ")
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(border));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let hint = if state.search.searching {
            "  buscando..."
        } else {
            ""
        };
        let input = Paragraph::new(Line::from(vec![
            Span::styled(state.search.input.clone(), Style::default().fg(SOFT_WHITE)),
            Span::styled(hint, Style::default().fg(MUTED_GRAY)),
        ]));
        frame.render_widget(input, inner);
    }

    fn render_search_results(&self, frame: &mut Frame, search_area: Rect, state: &DashboardState) {
        let height = (state.search.results.len() as u16 + 2).clamp(3, 10);
        let area = Rect {
            x: search_area.x,
            y: search_area.y + search_area.height,
            width: search_area.width,
            height,
        };
        frame.render_widget(Clear, area);

        let items: Vec<ListItem> = if state.search.results.is_empty() {
            vec![ListItem::new(Span::styled(
                "No se encontraron resultados",
                Style::default().fg(MUTED_GRAY),
            ))]
        } else {
            state
                .search
                .results
                .iter()
                .enumerate()
                .map(|(idx, company)| {
                    let style = if idx == state.search.selected {
                        Style::default().fg(Color::Black).bg(GOLD)
                    } else {
                        Style::default().fg(SOFT_WHITE)
                    };
                    ListItem::new(Line::from(Span::styled(
                        format!(
                            "{}  NIT: {} | {}",
                            company.nombre, company.nit, company.estado_cuenta
                        ),
                        style,
                    )))
                })
                .collect()
        };

        let list = List::new(items).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .style(Style::default().bg(PANEL_BG)),
        );
        frame.render_widget(list, area);
    }

    fn render_metrics(&self, frame: &mut Frame, area: Rect, state: &DashboardState) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(CORNFLOWER_BLUE));
        let inner = block.inner(area);

        let title = state
            .detail
            .as_ref()
            .map(|d| format!(" {} ", d.nombre))
            .unwrap_or_else(|| " Compañía ".to_string());
        frame.render_widget(block.title(title), area);

        let Some(detail) = &state.detail else {
            let loading = Paragraph::new("Cargando datos de la compañía...")
                .style(Style::default().fg(MUTED_GRAY))
                .alignment(Alignment::Center);
            frame.render_widget(loading, inner);
            return;
        };

        let metrics = &detail.metricas;
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(25),
                Constraint::Percentage(25),
                Constraint::Percentage(25),
                Constraint::Percentage(25),
            ])
            .split(inner);

        let cells = [
            ("Servicios realizados", metrics.servicios_realizados.to_string()),
            ("Empleados activos", metrics.empleados_activos.to_string()),
            ("Servicios del mes", metrics.servicios_mes.to_string()),
            (
                "vs mes anterior",
                format!(
                    "{}{}%",
                    if metrics.porcentaje_mes >= 0.0 { "▲ " } else { "▼ " },
                    metrics.porcentaje_mes.abs()
                ),
            ),
        ];

        for (idx, (label, value)) in cells.iter().enumerate() {
            let color = if idx == 3 {
                if metrics.porcentaje_mes >= 0.0 {
                    SELECTION_GREEN
                } else {
                    ERROR_RED
                }
            } else {
                SOFT_WHITE
            };
            let cell = Paragraph::new(vec![
                Line::from(Span::styled(
                    value.clone(),
                    Style::default().fg(color).add_modifier(Modifier::BOLD),
                )),
                Line::from(Span::styled(*label, Style::default().fg(MUTED_GRAY))),
            ])
            .alignment(Alignment::Center);
            frame.render_widget(cell, columns[idx]);
        }
    }

    fn render_tab_bar(&self, frame: &mut Frame, area: Rect, state: &DashboardState) {
        let mut spans = Vec::new();
        for (idx, tab) in DashboardTab::all().iter().enumerate() {
            let style = if *tab == state.active_tab {
                Style::default().fg(GOLD).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(MUTED_GRAY)
            };
            spans.push(Span::styled(format!(" {} ", tab.title()), style));
            if idx + 1 < DashboardTab::all().len() {
                spans.push(Span::styled("|", Style::default().fg(MUTED_GRAY)));
            }
        }
        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }

    fn render_clients(&self, frame: &mut Frame, area: Rect, state: &DashboardState) {
        let block = Block::default()
            .title(format!(" Clientes ({}) ", state.client_count))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        if state.clients_loading {
            let loading = Paragraph::new("Cargando clientes...")
                .style(Style::default().fg(MUTED_GRAY))
                .alignment(Alignment::Center);
            frame.render_widget(loading, inner);
            return;
        }

        if state.clients.is_empty() {
            let empty = Paragraph::new("No hay clientes registrados para esta compañía")
                .style(Style::default().fg(MUTED_GRAY))
                .alignment(Alignment::Center);
            frame.render_widget(empty, inner);
            return;
        }

        let items: Vec<ListItem> = state
            .clients
            .iter()
            .enumerate()
            .map(|(idx, client)| {
                let selected = idx == state.selected_client;
                let (status, status_color) = if client.activo {
                    ("Activo", SELECTION_GREEN)
                } else {
                    ("Inactivo", ERROR_RED)
                };
                let last_trip = client
                    .ultimo_viaje
                    .as_ref()
                    .map(|t| format!("{} - Último viaje", t.fecha))
                    .unwrap_or_else(|| "Sin viajes registrados".to_string());

                let name_style = if selected {
                    Style::default().fg(GOLD).add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(SOFT_WHITE)
                };
                let marker = if selected { "> " } else { "  " };

                ListItem::new(vec![
                    Line::from(vec![
                        Span::styled(marker, Style::default().fg(GOLD)),
                        Span::styled(client.nombre_completo.clone(), name_style),
                        Span::styled(
                            format!("  [{status}]"),
                            Style::default().fg(status_color),
                        ),
                    ]),
                    Line::from(Span::styled(
                        format!(
                            "    {} | {} | Viajes: {} | Calificación: {:.1} | {}",
                            client.numero_documento,
                            client.cargo.clone().unwrap_or_else(|| "Sin cargo".into()),
                            client.total_viajes,
                            client.calificacion_promedio,
                            last_trip
                        ),
                        Style::default().fg(MUTED_GRAY),
                    )),
                ])
            })
            .collect();

        frame.render_widget(List::new(items), inner);
    }

    fn render_company_data(&self, frame: &mut Frame, area: Rect, state: &DashboardState) {
        let block = Block::default()
            .title(" Datos de la Empresa ")
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let Some(detail) = &state.detail else {
            return;
        };

        let estado_color = match detail.estado_cuenta.as_str() {
            "Activa" => SELECTION_GREEN,
            "Suspendida" => WARNING_YELLOW,
            "Morosa" => ERROR_RED,
            _ => MUTED_GRAY,
        };

        let row = |label: &'static str, value: String| {
            Line::from(vec![
                Span::styled(format!("{label:<22}"), Style::default().fg(MUTED_GRAY)),
                Span::styled(value, Style::default().fg(SOFT_WHITE)),
            ])
        };

        let dash = |value: &str| {
            if value.is_empty() {
                "-".to_string()
            } else {
                value.to_string()
            }
        };

        let lines = vec![
            row("Razón social", dash(&detail.razon_social)),
            row("NIT", dash(&detail.nit)),
            row("Dirección", dash(&detail.direccion)),
            row("Teléfono", dash(&detail.telefono)),
            row("Email corporativo", dash(&detail.email_corporativo)),
            row("Persona de contacto", dash(&detail.persona_contacto)),
            row("Miembro desde", dash(&detail.fecha_membresia)),
            Line::from(vec![
                Span::styled(
                    format!("{:<22}", "Estado de la cuenta"),
                    Style::default().fg(MUTED_GRAY),
                ),
                Span::styled(
                    detail.estado_cuenta.clone(),
                    Style::default().fg(estado_color).add_modifier(Modifier::BOLD),
                ),
            ]),
        ];

        frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), inner);
    }

    fn render_reports(&self, frame: &mut Frame, area: Rect, state: &DashboardState) {
        let block = Block::default()
            .title(" Reportes ")
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let report = &state.report;
        let row = |idx: usize, label: &'static str, value: String| {
            let focused = report.focus == idx;
            let marker = if focused { "> " } else { "  " };
            let label_style = if focused {
                Style::default().fg(GOLD).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(MUTED_GRAY)
            };
            Line::from(vec![
                Span::styled(marker, Style::default().fg(GOLD)),
                Span::styled(format!("{label:<22}"), label_style),
                Span::styled(value, Style::default().fg(SOFT_WHITE)),
            ])
        };

        let mut lines = vec![
            row(
                0,
                "Tipo de reporte",
                report
                    .kind
                    .map(|k| k.to_string())
                    .unwrap_or_else(|| "Seleccione... ([Espacio] cambia)".to_string()),
            ),
            row(1, "Fecha de inicio", report.fecha_inicio.clone()),
            row(2, "Fecha de fin", report.fecha_fin.clone()),
            Line::default(),
        ];

        if let Some(kind) = report.kind {
            lines.push(Line::from(Span::styled(
                kind.description(),
                Style::default().fg(MUTED_GRAY),
            )));
            lines.push(Line::default());
        }

        if let Some(warning) = report.date_order_warning() {
            lines.push(Line::from(Span::styled(
                warning,
                Style::default().fg(WARNING_YELLOW),
            )));
        }

        let export_style = if report.exporting {
            Style::default().fg(MUTED_GRAY)
        } else if report.is_ready() {
            Style::default().fg(SELECTION_GREEN).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(MUTED_GRAY)
        };
        let export_label = if report.exporting {
            "Generando archivo Excel..."
        } else {
            "[Enter] Exportar a Excel"
        };
        lines.push(Line::from(Span::styled(export_label, export_style)));

        frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), inner);
    }
}

impl Default for DashboardComponent {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_report_form_gating() {
        let mut report = ReportFormState::default();
        assert!(!report.is_ready());

        report.cycle_kind();
        assert_eq!(report.kind, Some(ReportKind::Servicios));
        assert!(!report.is_ready());

        report.fecha_inicio = "2026-01-01".into();
        report.fecha_fin = "2026-01-31".into();
        assert!(report.is_ready());
        assert_eq!(report.date_order_warning(), None);
    }

    #[test]
    fn test_report_form_rejects_inverted_range() {
        let mut report = ReportFormState::default();
        report.cycle_kind();
        report.fecha_inicio = "2026-02-01".into();
        report.fecha_fin = "2026-01-01".into();
        assert!(!report.is_ready());
        assert_eq!(report.date_order_warning(), Some(MSG_REPORT_DATE_ORDER));
    }

    #[test]
    fn test_report_kind_cycles() {
        let mut report = ReportFormState::default();
        report.cycle_kind();
        report.cycle_kind();
        assert_eq!(report.kind, Some(ReportKind::Ingresos));
        report.cycle_kind();
        report.cycle_kind();
        assert_eq!(report.kind, Some(ReportKind::Servicios));
    }

    #[test]
    fn test_switch_tab_requests_client_reload() {
        let mut state = DashboardState::new(CompanySearchState::default());
        state.active_tab = DashboardTab::Datos;
        assert!(state.switch_tab(DashboardTab::Clientes));
        // already on Clientes: no reload
        assert!(!state.switch_tab(DashboardTab::Clientes));
        assert!(!state.switch_tab(DashboardTab::Reportes));
    }

    #[test]
    fn test_load_company_resets_per_company_state() {
        let mut state = DashboardState::new(CompanySearchState::default());
        state.client_count = 12;
        state.selected_client = 4;
        state.load_company(9);
        assert_eq!(state.company_id, Some(9));
        assert_eq!(state.client_count, 0);
        assert_eq!(state.selected_client, 0);
    }
}
