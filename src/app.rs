//! Application state and event handling.
//!
//! This module implements the Elm Architecture pattern for state management,
//! with a centralized App struct holding all application state: the active
//! view, the engagement book, the live relationship map and the report
//! drafting status.

use std::collections::HashSet;
use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;

use crate::data;
use crate::map::{BackOutcome, ClickOutcome, MapContext, MapState, ViewMode};
use crate::models::{ExpertProfile, ExpertRole, NodeKind, ProjectRecord};
use crate::particles::Backdrop;
use crate::report::{ReportCommand, ReportMessage};
use crate::ui;

/// Active view in the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    /// Engagement book
    Projects,
    /// Project relationship map (default)
    #[default]
    Map,
    /// Document drive
    Drive,
    /// Inbox
    Mail,
}

impl View {
    /// Move to the next view
    pub fn next(&self) -> Self {
        match self {
            View::Projects => View::Map,
            View::Map => View::Drive,
            View::Drive => View::Mail,
            View::Mail => View::Projects,
        }
    }

    /// Move to the previous view
    pub fn previous(&self) -> Self {
        match self {
            View::Projects => View::Mail,
            View::Map => View::Projects,
            View::Drive => View::Map,
            View::Mail => View::Drive,
        }
    }

    /// Get the display name of the view
    pub fn name(&self) -> &'static str {
        match self {
            View::Projects => "Projects",
            View::Map => "Map",
            View::Drive => "Drive",
            View::Mail => "Mail",
        }
    }
}

/// Error popup state
#[derive(Debug, Clone)]
pub struct ErrorPopup {
    pub title: String,
    pub message: String,
    pub shown_at: Instant,
    /// Auto-dismiss duration (None for manual dismiss)
    pub auto_dismiss: Option<Duration>,
}

impl ErrorPopup {
    pub fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            shown_at: Instant::now(),
            auto_dismiss: Some(Duration::from_secs(5)),
        }
    }

    pub fn should_dismiss(&self) -> bool {
        match self.auto_dismiss {
            Some(duration) => self.shown_at.elapsed() > duration,
            None => false,
        }
    }
}

/// Log entry for the message area
#[derive(Debug, Clone)]
pub struct LogEntry {
    pub timestamp: Instant,
    pub message: String,
    pub level: LogLevel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Info,
    Success,
    Warning,
    Error,
}

impl LogEntry {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            timestamp: Instant::now(),
            message: message.into(),
            level: LogLevel::Info,
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self {
            timestamp: Instant::now(),
            message: message.into(),
            level: LogLevel::Success,
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            timestamp: Instant::now(),
            message: message.into(),
            level: LogLevel::Warning,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            timestamp: Instant::now(),
            message: message.into(),
            level: LogLevel::Error,
        }
    }
}

/// A draft that came back from the report service
#[derive(Debug, Clone)]
pub struct DraftedReport {
    pub subject: String,
    pub body: String,
    /// Local wall-clock time the draft landed, for the popup header
    pub drafted_at: String,
}

/// One row of the flattened expert registry overlay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistryRow {
    /// Collapsible role heading
    Role(ExpertRole),
    /// Index into the expert pool
    Member(usize),
}

/// Expert registry ("the bench") overlay state
#[derive(Debug, Clone, Default)]
pub struct RegistryState {
    pub open: bool,
    pub expanded: HashSet<ExpertRole>,
    pub cursor: usize,
}

/// Main application state
#[derive(Debug)]
pub struct App {
    /// Whether the application should quit
    pub should_quit: bool,

    /// Currently active view
    pub view: View,

    /// The engagement book
    pub projects: Vec<ProjectRecord>,

    /// Index into `projects` of the open engagement; None shows the
    /// company overview on the map
    pub active_project: Option<usize>,

    /// Live relationship map state
    pub map: MapState,

    /// The bench
    pub expert_pool: Vec<ExpertProfile>,
    pub registry: RegistryState,

    /// List cursors
    pub project_cursor: usize,
    pub drive_cursor: usize,
    pub mail_cursor: usize,

    /// Background animation
    pub backdrop: Backdrop,

    /// Current error popup (if any)
    pub error_popup: Option<ErrorPopup>,

    /// Log messages
    pub logs: Vec<LogEntry>,
    max_logs: usize,

    /// Last drafted report and its popup state
    pub last_report: Option<DraftedReport>,
    pub show_report: bool,
    pub report_scroll: u16,
    pub drafting: bool,

    /// Drafting service reachability
    pub service_connected: bool,

    /// Show help overlay
    pub show_help: bool,

    /// Frame counter for animations
    pub frame_count: u64,

    /// Map canvas area from the last layout pass, for mouse hit testing
    pub map_area: Rect,
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

impl App {
    /// Create a new application instance showing the company overview
    pub fn new() -> Self {
        let mut app = Self {
            should_quit: false,
            view: View::Map,
            projects: data::project_book(),
            active_project: None,
            map: MapState::company(),
            expert_pool: data::expert_pool(),
            registry: RegistryState::default(),
            project_cursor: 0,
            drive_cursor: 0,
            mail_cursor: 0,
            backdrop: Backdrop::default(),
            error_popup: None,
            logs: Vec::new(),
            max_logs: 100,
            last_report: None,
            show_report: false,
            report_scroll: 0,
            drafting: false,
            service_connected: false,
            show_help: false,
            frame_count: 0,
            map_area: Rect::default(),
        };

        app.log(LogEntry::info("Tactical console initialized"));
        app.log(LogEntry::info("Probing drafting service..."));
        app
    }

    /// Add a log entry
    pub fn log(&mut self, entry: LogEntry) {
        self.logs.push(entry);
        if self.logs.len() > self.max_logs {
            self.logs.remove(0);
        }
    }

    /// Show an error popup
    pub fn show_error(&mut self, title: impl Into<String>, message: impl Into<String>) {
        let title = title.into();
        let message = message.into();
        self.log(LogEntry::error(format!("{}: {}", title, message)));
        self.error_popup = Some(ErrorPopup::new(title, message));
    }

    /// The open engagement, if any
    pub fn active_project(&self) -> Option<&ProjectRecord> {
        self.active_project.and_then(|i| self.projects.get(i))
    }

    /// Map canvas size in screen units, for the transform math
    pub fn canvas(&self) -> (f64, f64) {
        ui::canvas_size(self.map_area)
    }

    /// Open an engagement on the map
    pub fn open_project(&mut self, index: usize) {
        let Some(project) = self.projects.get(index) else {
            return;
        };
        let (id, name, engagement) = (project.id, project.name, project.engagement);
        self.active_project = Some(index);
        self.map = MapState::project(id, engagement);
        self.registry = RegistryState::default();
        self.view = View::Map;
        self.log(LogEntry::info(format!("Opened {name} strategy board")));
    }

    fn open_project_by_id(&mut self, project_id: &str) {
        if let Some(index) = self.projects.iter().position(|p| p.id == project_id) {
            self.open_project(index);
        }
    }

    /// Close the engagement and fall back to the company overview
    pub fn open_overview(&mut self) {
        self.active_project = None;
        self.map = MapState::company();
        self.registry = RegistryState::default();
        self.log(LogEntry::info("Showing company overview"));
    }

    // ============================================
    // Registry (bench) overlay
    // ============================================

    /// Flattened registry rows: role headings with members under the
    /// expanded ones. Roles with nobody on the bench are omitted.
    pub fn registry_rows(&self) -> Vec<RegistryRow> {
        let mut rows = Vec::new();
        for role in ExpertRole::all() {
            let members: Vec<usize> = self
                .expert_pool
                .iter()
                .enumerate()
                .filter(|(_, p)| p.role == *role)
                .map(|(i, _)| i)
                .collect();
            if members.is_empty() {
                continue;
            }
            rows.push(RegistryRow::Role(*role));
            if self.registry.expanded.contains(role) {
                rows.extend(members.into_iter().map(RegistryRow::Member));
            }
        }
        rows
    }

    fn open_registry(&mut self, reveal: Option<ExpertRole>) {
        self.registry.open = true;
        if let Some(role) = reveal {
            self.registry.expanded.insert(role);
            let rows = self.registry_rows();
            if let Some(pos) = rows.iter().position(|r| *r == RegistryRow::Role(role)) {
                self.registry.cursor = pos;
            }
        }
    }

    fn registry_activate(&mut self) {
        let rows = self.registry_rows();
        let Some(row) = rows.get(self.registry.cursor).copied() else {
            return;
        };
        match row {
            RegistryRow::Role(role) => {
                if !self.registry.expanded.remove(&role) {
                    self.registry.expanded.insert(role);
                }
            }
            RegistryRow::Member(index) => {
                let Some(profile) = self.expert_pool.get(index).cloned() else {
                    return;
                };
                if self.map.board_has(profile.name) {
                    self.log(LogEntry::warning(format!(
                        "{} is already fielded",
                        profile.name
                    )));
                    return;
                }
                match self.map.add_expert(&profile) {
                    Some(_) => self.log(LogEntry::success(format!(
                        "Fielded {} ({})",
                        profile.name, profile.role
                    ))),
                    None => self.log(LogEntry::warning(
                        "Experts can only be fielded on a strategy board",
                    )),
                }
            }
        }
    }

    // ============================================
    // Report drafting
    // ============================================

    /// Kick off a draft for the selected node (or the whole board)
    fn draft_report(&mut self) -> Option<ReportCommand> {
        let project = self.active_project()?.clone();
        if self.drafting {
            self.log(LogEntry::warning("A draft is already in progress"));
            return None;
        }
        let (subject, brief) = match self.map.selected_node() {
            Some(node) => (
                format!("{} Assessment", node.label),
                node.description
                    .clone()
                    .unwrap_or_else(|| node.label.clone()),
            ),
            None => (
                format!("{} Position Report", project.name),
                self.map.snapshot.label.clone(),
            ),
        };
        self.drafting = true;
        self.log(LogEntry::info(format!("Drafting \"{subject}\"...")));
        Some(ReportCommand::Draft {
            project,
            subject,
            brief,
        })
    }

    /// Handle messages from the drafting worker
    pub fn handle_report_message(&mut self, message: ReportMessage) {
        match message {
            ReportMessage::Drafted { subject, body } => {
                self.drafting = false;
                self.log(LogEntry::success(format!("Draft ready: {subject}")));
                self.last_report = Some(DraftedReport {
                    subject,
                    body,
                    drafted_at: chrono::Local::now().format("%H:%M").to_string(),
                });
                self.show_report = true;
                self.report_scroll = 0;
            }
            ReportMessage::Failed(error) => {
                self.drafting = false;
                self.show_error("Drafting failed", error);
            }
            ReportMessage::ConnectionStatus(connected) => {
                let was_connected = self.service_connected;
                self.service_connected = connected;
                if connected && !was_connected {
                    self.log(LogEntry::success("Drafting service online"));
                } else if !connected && was_connected {
                    self.log(LogEntry::warning("Drafting service unreachable"));
                }
            }
        }
    }

    // ============================================
    // Key handling
    // ============================================

    /// Handle key events and return an optional worker command
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<ReportCommand> {
        // Overlays swallow input first
        if self.error_popup.is_some() {
            if matches!(key.code, KeyCode::Esc | KeyCode::Enter | KeyCode::Char(' ')) {
                self.error_popup = None;
            }
            return None;
        }
        if self.show_help {
            if matches!(key.code, KeyCode::Esc | KeyCode::Char('?') | KeyCode::Enter) {
                self.show_help = false;
            }
            return None;
        }
        if self.show_report {
            match key.code {
                KeyCode::Esc | KeyCode::Char('q') => self.show_report = false,
                KeyCode::Char('j') | KeyCode::Down => {
                    self.report_scroll = self.report_scroll.saturating_add(1);
                }
                KeyCode::Char('k') | KeyCode::Up => {
                    self.report_scroll = self.report_scroll.saturating_sub(1);
                }
                _ => {}
            }
            return None;
        }
        if self.registry.open {
            self.handle_registry_key(key);
            return None;
        }

        // Global shortcuts
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') => {
                self.should_quit = true;
                return Some(ReportCommand::Shutdown);
            }
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true;
                return Some(ReportCommand::Shutdown);
            }
            KeyCode::Char('?') => {
                self.show_help = true;
                return None;
            }
            KeyCode::Char('p') => {
                self.backdrop.toggle_mode();
                let mode = self.backdrop.mode().name();
                self.log(LogEntry::info(format!("Backdrop: {mode}")));
                return None;
            }
            KeyCode::Tab => {
                self.view = self.view.next();
                return None;
            }
            KeyCode::BackTab => {
                self.view = self.view.previous();
                return None;
            }
            _ => {}
        }

        // View-specific shortcuts
        match self.view {
            View::Projects => self.handle_projects_key(key),
            View::Map => return self.handle_map_key(key),
            View::Drive => {
                let total = self
                    .active_project()
                    .map(|p| data::drive_entries(p.name).len())
                    .unwrap_or(0);
                self.handle_list_key(key, total, View::Drive);
            }
            View::Mail => {
                let total = self
                    .active_project()
                    .map(|p| data::inbox(p.name).len())
                    .unwrap_or(0);
                self.handle_list_key(key, total, View::Mail);
            }
        }

        None
    }

    fn handle_projects_key(&mut self, key: KeyEvent) {
        let total = self.projects.len();
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => {
                if total > 0 {
                    self.project_cursor = (self.project_cursor + 1) % total;
                }
            }
            KeyCode::Char('k') | KeyCode::Up => {
                if total > 0 {
                    self.project_cursor =
                        self.project_cursor.checked_sub(1).unwrap_or(total - 1);
                }
            }
            KeyCode::Char('g') => self.project_cursor = 0,
            KeyCode::Char('G') => self.project_cursor = total.saturating_sub(1),
            KeyCode::Enter => self.open_project(self.project_cursor),
            KeyCode::Char('o') => {
                self.open_overview();
                self.view = View::Map;
            }
            _ => {}
        }
    }

    fn handle_registry_key(&mut self, key: KeyEvent) {
        let total = self.registry_rows().len();
        match key.code {
            KeyCode::Esc | KeyCode::Char('r') => self.registry.open = false,
            KeyCode::Char('j') | KeyCode::Down => {
                if total > 0 {
                    self.registry.cursor = (self.registry.cursor + 1) % total;
                }
            }
            KeyCode::Char('k') | KeyCode::Up => {
                if total > 0 {
                    self.registry.cursor =
                        self.registry.cursor.checked_sub(1).unwrap_or(total - 1);
                }
            }
            KeyCode::Enter | KeyCode::Char(' ') => self.registry_activate(),
            _ => {}
        }
    }

    fn handle_map_key(&mut self, key: KeyEvent) -> Option<ReportCommand> {
        let canvas = self.canvas();
        match key.code {
            KeyCode::Char('+') | KeyCode::Char('=') => self.map.zoom_in(),
            KeyCode::Char('-') => self.map.zoom_out(),
            KeyCode::Char('h') | KeyCode::Left => self.map.transform.x += 40.0,
            KeyCode::Char('l') | KeyCode::Right => self.map.transform.x -= 40.0,
            KeyCode::Char('k') | KeyCode::Up => self.map.transform.y += 40.0,
            KeyCode::Char('j') | KeyCode::Down => self.map.transform.y -= 40.0,
            KeyCode::Char('n') => self.cycle_selection(1),
            KeyCode::Char('N') => self.cycle_selection(-1),
            KeyCode::Enter => {
                if let Some(id) = self.map.selected.clone() {
                    let outcome = self.map.node_click(&id, canvas);
                    self.apply_click_outcome(outcome);
                }
            }
            KeyCode::Char('e') | KeyCode::Char(' ') => {
                if let Some(id) = self.map.selected.clone() {
                    if self.map.view_mode == ViewMode::Detail && self.map.snapshot.has_children(&id)
                    {
                        self.map.toggle_expansion(&id);
                    }
                }
            }
            KeyCode::Char('r') => {
                if self.map.view_mode == ViewMode::Strategy
                    && matches!(self.map.context, MapContext::Project { .. })
                {
                    self.open_registry(None);
                }
            }
            KeyCode::Char('x') => self.recall_selected_expert(),
            KeyCode::Char('g') => return self.draft_report(),
            KeyCode::Char('b') | KeyCode::Backspace => match self.map.back(canvas) {
                BackOutcome::FocusCleared => {}
                BackOutcome::ReturnedToStrategy => {
                    self.log(LogEntry::info("Returned to strategy board"));
                }
                BackOutcome::ExitProject => {
                    if self.active_project.is_some() {
                        self.open_overview();
                    }
                }
            },
            KeyCode::Esc => {
                self.map.selected = None;
            }
            _ => {}
        }
        None
    }

    fn handle_list_key(&mut self, key: KeyEvent, total: usize, view: View) {
        if total == 0 {
            return;
        }
        let cursor = match view {
            View::Drive => &mut self.drive_cursor,
            View::Mail => &mut self.mail_cursor,
            _ => return,
        };
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => *cursor = (*cursor + 1) % total,
            KeyCode::Char('k') | KeyCode::Up => {
                *cursor = cursor.checked_sub(1).unwrap_or(total - 1);
            }
            KeyCode::Char('g') => *cursor = 0,
            KeyCode::Char('G') => *cursor = total.saturating_sub(1),
            _ => {}
        }
    }

    /// Cycle the map selection through the currently visible nodes
    fn cycle_selection(&mut self, step: i64) {
        let visible: Vec<String> = self
            .map
            .snapshot
            .nodes
            .iter()
            .filter(|n| self.map.is_visible(n))
            .map(|n| n.id.clone())
            .collect();
        if visible.is_empty() {
            return;
        }
        let current = self
            .map
            .selected
            .as_deref()
            .and_then(|id| visible.iter().position(|v| v == id));
        let next = match current {
            Some(i) => (i as i64 + step).rem_euclid(visible.len() as i64) as usize,
            None => 0,
        };
        self.map.selected = Some(visible[next].clone());
    }

    fn recall_selected_expert(&mut self) {
        let Some(node) = self.map.selected_node() else {
            return;
        };
        if node.kind != NodeKind::Expert {
            return;
        }
        if node.role == Some(ExpertRole::Oversight) {
            self.log(LogEntry::warning("Oversight stays on the board"));
            return;
        }
        let (id, name) = (node.id.clone(), node.label.clone());
        if self.map.recall_expert(&id) {
            self.log(LogEntry::info(format!("Recalled {name} to the bench")));
        }
    }

    fn apply_click_outcome(&mut self, outcome: ClickOutcome) {
        match outcome {
            ClickOutcome::EnteredProject(pid) => self.open_project_by_id(pid),
            ClickOutcome::EnteredAnatomy => {
                self.log(LogEntry::info("Entered project anatomy"));
            }
            ClickOutcome::OpenedRegistry(role) => self.open_registry(Some(role)),
            ClickOutcome::Selected | ClickOutcome::Focused | ClickOutcome::Ignored => {}
        }
    }

    // ============================================
    // Mouse handling
    // ============================================

    /// Handle mouse events on the map canvas
    pub fn handle_mouse(&mut self, mouse: MouseEvent) {
        if self.view != View::Map || self.registry.open || self.show_report || self.show_help {
            return;
        }
        let canvas = self.canvas();
        let point = ui::cell_to_screen(self.map_area, mouse.column, mouse.row);

        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                if let Some((sx, sy)) = point {
                    self.map.begin_drag(sx, sy);
                }
            }
            MouseEventKind::Drag(MouseButton::Left) => {
                // Keep panning even when the pointer strays off the canvas
                let (sx, sy) = point.unwrap_or_else(|| {
                    ui::cell_to_screen_unclamped(self.map_area, mouse.column, mouse.row)
                });
                self.map.drag_to(sx, sy);
            }
            MouseEventKind::Up(MouseButton::Left) => {
                self.map.end_drag();
                // A release only counts as a click if the press never
                // travelled past the drag threshold
                if let Some((sx, sy)) = point {
                    if !self.map.drag_moved() {
                        let hit = self.map.node_at(sx, sy).map(|n| n.id.clone());
                        match hit {
                            Some(id) => {
                                let outcome = self.map.node_click(&id, canvas);
                                self.apply_click_outcome(outcome);
                            }
                            None => self.map.background_click(canvas),
                        }
                    }
                }
            }
            MouseEventKind::ScrollUp => self.map.zoom_in(),
            MouseEventKind::ScrollDown => self.map.zoom_out(),
            _ => {}
        }
    }

    // ============================================
    // Frame tick
    // ============================================

    /// Update animations and cached layout (called every frame)
    pub fn tick(&mut self, width: u16, height: u16) {
        self.frame_count = self.frame_count.wrapping_add(1);
        self.backdrop.update(width, height);
        let sidebar = self
            .map
            .selected
            .is_some()
            .then_some(self.map.sidebar_side);
        self.map_area = ui::map_canvas_area(Rect::new(0, 0, width, height), sidebar);

        if let Some(ref popup) = self.error_popup {
            if popup.should_dismiss() {
                self.error_popup = None;
            }
        }
    }

    /// Get the status bar text
    pub fn status_text(&self) -> String {
        let connection = if self.service_connected {
            "Service online"
        } else {
            "Service offline"
        };
        let drafting = if self.drafting { " [Drafting...]" } else { "" };
        let context = match self.active_project() {
            Some(project) => project.name,
            None => "Company Overview",
        };

        format!(
            "{connection}{drafting} | {context} | {} | ?: Help | q: Quit",
            self.view.name()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: crossterm::event::KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    #[test]
    fn opening_a_project_switches_to_its_strategy_board() {
        let mut app = App::new();
        app.open_project(1); // Metro Phase 2
        assert_eq!(app.view, View::Map);
        assert!(matches!(app.map.context, MapContext::Project { .. }));
        assert!(app.map.snapshot.label.contains("Arbitration"));
    }

    #[test]
    fn back_from_strategy_returns_to_overview() {
        let mut app = App::new();
        app.open_project(0);
        app.handle_key(key(KeyCode::Char('b')));
        assert!(app.active_project.is_none());
        assert!(matches!(app.map.context, MapContext::Company));
    }

    #[test]
    fn view_cycle_wraps_both_ways() {
        let mut app = App::new();
        assert_eq!(app.view, View::Map);
        app.handle_key(key(KeyCode::Tab));
        assert_eq!(app.view, View::Drive);
        app.handle_key(key(KeyCode::BackTab));
        assert_eq!(app.view, View::Map);
    }

    #[test]
    fn quit_returns_shutdown_command() {
        let mut app = App::new();
        let cmd = app.handle_key(key(KeyCode::Char('q')));
        assert!(matches!(cmd, Some(ReportCommand::Shutdown)));
        assert!(app.should_quit);
    }

    #[test]
    fn registry_rows_skip_empty_roles() {
        let mut app = App::new();
        app.open_project(0);
        let rows = app.registry_rows();
        // Nobody on the bench carries the Oversight role
        assert!(!rows.contains(&RegistryRow::Role(ExpertRole::Oversight)));
        assert!(rows.contains(&RegistryRow::Role(ExpertRole::Quantum)));
        // Collapsed roles list no members
        assert!(rows.iter().all(|r| matches!(r, RegistryRow::Role(_))));
    }

    #[test]
    fn registry_assignment_swaps_the_fielded_expert() {
        let mut app = App::new();
        app.open_project(0);
        app.open_registry(Some(ExpertRole::Quantum));
        let rows = app.registry_rows();
        let baxter = app
            .expert_pool
            .iter()
            .position(|p| p.name == "William Baxter")
            .unwrap();
        app.registry.cursor = rows
            .iter()
            .position(|r| *r == RegistryRow::Member(baxter))
            .unwrap();
        app.registry_activate();
        assert!(app.map.board_has("William Baxter"));
        assert!(!app.map.board_has("Alan Clarke"));
    }

    #[test]
    fn draft_needs_an_open_project() {
        let mut app = App::new();
        assert!(app.draft_report().is_none());
        app.open_project(0);
        let cmd = app.draft_report();
        assert!(matches!(cmd, Some(ReportCommand::Draft { .. })));
        assert!(app.drafting);
        // A second draft is refused while one is in flight
        assert!(app.draft_report().is_none());
    }

    #[test]
    fn drafted_report_opens_the_popup() {
        let mut app = App::new();
        app.handle_report_message(ReportMessage::Drafted {
            subject: "Skyline Tower Position Report".to_string(),
            body: "1.0 EXECUTIVE SUMMARY".to_string(),
        });
        assert!(app.show_report);
        assert!(app.last_report.is_some());
        assert!(!app.drafting);
    }

    #[test]
    fn selection_cycle_skips_collapsed_nodes() {
        let mut app = App::new();
        app.open_project(0);
        app.map.switch_to_detail((1000.0, 800.0));
        let mut seen: Vec<String> = Vec::new();
        for _ in 0..app.map.snapshot.nodes.len() + 2 {
            app.cycle_selection(1);
            if let Some(id) = app.map.selected.clone() {
                if !seen.contains(&id) {
                    seen.push(id);
                }
            }
        }
        assert!(seen.iter().all(|id| {
            let node = app.map.snapshot.node(id).unwrap();
            app.map.is_visible(node)
        }));
    }

    #[test]
    fn oversight_cannot_be_recalled() {
        let mut app = App::new();
        app.open_project(0);
        app.map.selected = Some("expert_andrew".to_string());
        app.recall_selected_expert();
        assert!(app.map.board_has("Andrew Bowler"));
        app.map.selected = Some("expert_alan".to_string());
        app.recall_selected_expert();
        assert!(!app.map.board_has("Alan Clarke"));
    }
}
