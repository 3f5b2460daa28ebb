//! Calculator UI
//!
//! Two screens: the season level curve with the "will I make it" projector,
//! and the Hyperchrome pity calculator. Every keypress recomputes from
//! scratch; the engine is cheap enough that nothing is cached.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Clear, Gauge, Paragraph, Row, Table, Tabs},
};

use crate::data::SeasonData;
use crate::hyperchrome::{HyperchromeLevel, PityState};
use crate::progression::{cumulative_xp, project, requirements, xp_required_for_level, Projection};

/// XP step for the left/right keys (shift multiplies by ten)
const XP_STEP: u64 = 100;
/// Pity step in percent (shift multiplies by ten)
const PITY_STEP: f64 = 1.0;
/// Upper bound for the planned robberies input
const MAX_PLANNED_ROBBERIES: u32 = 9_999;
/// Width of the text bars in the requirements table
const BAR_WIDTH: usize = 20;

/// Calculator screens
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Season,
    Hyperchrome,
}

impl Tab {
    fn index(&self) -> usize {
        match self {
            Tab::Season => 0,
            Tab::Hyperchrome => 1,
        }
    }

    fn toggle(&self) -> Self {
        match self {
            Tab::Season => Tab::Hyperchrome,
            Tab::Hyperchrome => Tab::Season,
        }
    }
}

/// Where `now` falls relative to the season window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeasonStatus {
    NotStarted,
    Running,
    Ended,
}

/// Editable inputs on the season screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeasonField {
    Level,
    Xp,
    Days,
    Pass,
}

impl SeasonField {
    const ALL: [SeasonField; 4] = [SeasonField::Level, SeasonField::Xp, SeasonField::Days, SeasonField::Pass];
}

/// Editable inputs on the Hyperchrome screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PityField {
    Level,
    Pity,
    PrivateServer,
    Robberies,
}

impl PityField {
    const ALL: [PityField; 4] = [
        PityField::Level,
        PityField::Pity,
        PityField::PrivateServer,
        PityField::Robberies,
    ];
}

/// Move a selection up or down a fixed list, stopping at the ends
fn step_selection<T: Copy + PartialEq>(all: &[T], current: T, down: bool) -> T {
    let index = all.iter().position(|f| *f == current).unwrap_or(0);
    let next = if down {
        (index + 1).min(all.len() - 1)
    } else {
        index.saturating_sub(1)
    };
    all[next]
}

/// Main calculator state
pub struct App {
    /// Season and pity configuration
    data: SeasonData,
    /// Visible screen
    tab: Tab,
    /// Selected input on the season screen
    season_field: SeasonField,
    /// Selected input on the Hyperchrome screen
    pity_field: PityField,
    /// Player's current level
    current_level: u32,
    /// XP earned inside the current level's bar
    xp_in_level: u64,
    /// Days left in the season
    days_remaining: i64,
    /// Share of the season already played, 0-1
    season_elapsed: f64,
    /// Whether the season is upcoming, live or over
    season_status: SeasonStatus,
    /// Whether the player owns the season pass
    has_season_pass: bool,
    /// Hyperchrome calculator input
    pity: PityState,
    /// Robberies the player plans to do, for the pity preview
    planned_robberies: u32,
}

impl App {
    /// Create the calculator for `data`, with `now` in unix seconds
    pub fn new(data: SeasonData, now: i64) -> Self {
        let season = &data.season;
        let season_status = if !season.has_started(now) {
            SeasonStatus::NotStarted
        } else if season.has_ended(now) {
            SeasonStatus::Ended
        } else {
            SeasonStatus::Running
        };

        // Before the season opens the whole season is still ahead
        let days_remaining = season.days_remaining(now.max(season.start_time));
        let season_elapsed = season.elapsed_fraction(now);
        log::info!(
            "Season {} loaded ({:?}): {} days remaining, target level {}",
            season.number,
            season_status,
            days_remaining,
            season.rates.target_level
        );

        Self {
            data,
            tab: Tab::Season,
            season_field: SeasonField::Level,
            pity_field: PityField::Level,
            current_level: 1,
            xp_in_level: 0,
            days_remaining,
            season_elapsed,
            season_status,
            has_season_pass: false,
            pity: PityState::default(),
            planned_robberies: 0,
        }
    }

    pub fn tab(&self) -> Tab {
        self.tab
    }

    pub fn season_status(&self) -> SeasonStatus {
        self.season_status
    }

    /// Projection for the current inputs
    pub fn projection(&self) -> Projection {
        project(
            self.current_level,
            self.xp_in_level,
            self.days_remaining,
            &self.data.season.rates,
            self.has_season_pass,
        )
    }

    /// Robberies for the current Hyperchrome inputs
    pub fn robberies(&self) -> u32 {
        self.pity.robberies_to_level_up(&self.data.pity)
    }

    /// Pity meter after the planned robberies
    pub fn planned_pity(&self) -> f64 {
        self.data.pity.pity_after_robberies(
            self.pity.level,
            self.pity.pity_percent,
            self.planned_robberies,
            self.pity.is_private_server,
        )
    }

    /// Handle keyboard input, returns true if should quit
    pub fn handle_input(&mut self, key: KeyEvent) -> bool {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return true;
        }

        let big = key.modifiers.contains(KeyModifiers::SHIFT);

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => return true,
            KeyCode::Tab | KeyCode::BackTab => {
                self.tab = self.tab.toggle();
                log::debug!("Switched to {:?} tab", self.tab);
            }
            KeyCode::Up | KeyCode::Char('k') => self.move_selection(false),
            KeyCode::Down | KeyCode::Char('j') => self.move_selection(true),
            KeyCode::Left | KeyCode::Char('h') => self.adjust(-1, big),
            KeyCode::Right | KeyCode::Char('l') => self.adjust(1, big),
            KeyCode::Char(' ') | KeyCode::Enter => self.toggle(),
            _ => {}
        }

        false
    }

    fn move_selection(&mut self, down: bool) {
        match self.tab {
            Tab::Season => {
                self.season_field = step_selection(&SeasonField::ALL, self.season_field, down);
            }
            Tab::Hyperchrome => {
                self.pity_field = step_selection(&PityField::ALL, self.pity_field, down);
            }
        }
    }

    fn adjust(&mut self, direction: i64, big: bool) {
        let scale = if big { 10 } else { 1 };

        match self.tab {
            Tab::Season => match self.season_field {
                SeasonField::Level => {
                    let target = self.data.season.rates.target_level.max(1);
                    let next = i64::from(self.current_level) + direction;
                    self.current_level = next.clamp(1, i64::from(target)) as u32;
                    self.xp_in_level = self.xp_in_level.min(self.level_bar_size());
                }
                SeasonField::Xp => {
                    let step = XP_STEP * scale;
                    self.xp_in_level = if direction < 0 {
                        self.xp_in_level.saturating_sub(step)
                    } else {
                        (self.xp_in_level + step).min(self.level_bar_size())
                    };
                }
                SeasonField::Days => {
                    let step = if big { 7 } else { 1 };
                    self.days_remaining = (self.days_remaining + direction * step).max(0);
                }
                SeasonField::Pass => self.has_season_pass = !self.has_season_pass,
            },
            Tab::Hyperchrome => match self.pity_field {
                PityField::Level => {
                    let index = i64::from(self.pity.level.index()) + direction;
                    self.pity.level = HyperchromeLevel::from_index(index.clamp(0, 4) as u8);
                }
                PityField::Pity => {
                    let next = self.pity.pity_percent + direction as f64 * PITY_STEP * scale as f64;
                    self.pity = PityState::new(self.pity.level.index(), next, self.pity.is_private_server);
                }
                PityField::PrivateServer => self.pity.is_private_server = !self.pity.is_private_server,
                PityField::Robberies => {
                    let step = scale as u32;
                    self.planned_robberies = if direction < 0 {
                        self.planned_robberies.saturating_sub(step)
                    } else {
                        (self.planned_robberies + step).min(MAX_PLANNED_ROBBERIES)
                    };
                }
            },
        }
    }

    fn toggle(&mut self) {
        match (self.tab, self.season_field, self.pity_field) {
            (Tab::Season, SeasonField::Pass, _) => self.has_season_pass = !self.has_season_pass,
            (Tab::Hyperchrome, _, PityField::PrivateServer) => {
                self.pity.is_private_server = !self.pity.is_private_server;
            }
            _ => {}
        }
    }

    /// XP span of the current level's bar
    fn level_bar_size(&self) -> u64 {
        xp_required_for_level(self.current_level, &self.data.season.rates)
    }

    // =========================================================================
    // Rendering
    // =========================================================================

    pub fn render(&self, frame: &mut Frame) {
        frame.render_widget(Clear, frame.area());

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(8), Constraint::Length(1)])
            .split(frame.area());

        self.render_tabs(frame, chunks[0]);
        match self.tab {
            Tab::Season => self.render_season(frame, chunks[1]),
            Tab::Hyperchrome => self.render_hyperchrome(frame, chunks[1]),
        }

        let help = Paragraph::new(
            "[Tab] Switch  [↑/↓] Select  [←/→] Adjust (Shift: x10)  [Space] Toggle  [Q] Quit",
        )
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
        frame.render_widget(help, chunks[2]);
    }

    fn render_tabs(&self, frame: &mut Frame, area: Rect) {
        let season = &self.data.season;
        let title = if season.title.is_empty() {
            format!(" Season {} ", season.number)
        } else {
            format!(" {} ", season.title)
        };

        let tabs = Tabs::new(vec!["Season", "Hyperchrome"])
            .select(self.tab.index())
            .block(Block::default().borders(Borders::ALL).title(title))
            .highlight_style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD));
        frame.render_widget(tabs, area);
    }

    fn render_season(&self, frame: &mut Frame, area: Rect) {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(area);

        self.render_requirements(frame, columns[0]);

        let right = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(6), Constraint::Length(3), Constraint::Min(6)])
            .split(columns[1]);

        self.render_season_inputs(frame, right[0]);
        self.render_level_gauge(frame, right[1]);
        self.render_projection(frame, right[2]);
    }

    fn render_requirements(&self, frame: &mut Frame, area: Rect) {
        let rows = requirements(&self.data.season.rates).into_iter().map(|row| {
            let style = if row.level == self.current_level {
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };

            Row::new(vec![
                Cell::from(row.level.to_string()),
                Cell::from(format_xp(row.xp_required)),
                Cell::from(format_xp(row.total_xp)),
                Cell::from(text_bar(row.progress_percent, BAR_WIDTH)),
            ])
            .style(style)
        });

        let table = Table::new(
            rows,
            [
                Constraint::Length(5),
                Constraint::Length(10),
                Constraint::Length(10),
                Constraint::Min(BAR_WIDTH as u16),
            ],
        )
        .header(
            Row::new(vec!["Level", "XP", "Total", "Progress"])
                .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
        )
        .block(Block::default().borders(Borders::ALL).title(" Level Requirements "));

        frame.render_widget(table, area);
    }

    fn render_season_inputs(&self, frame: &mut Frame, area: Rect) {
        let fields = [
            (SeasonField::Level, "Current level", self.current_level.to_string()),
            (SeasonField::Xp, "XP in level", format_xp(self.xp_in_level)),
            (SeasonField::Days, "Days remaining", self.days_remaining.to_string()),
            (SeasonField::Pass, "Season pass", yes_no(self.has_season_pass).to_string()),
        ];

        let lines: Vec<Line> = fields
            .into_iter()
            .map(|(field, label, value)| input_line(field == self.season_field, label, value))
            .collect();

        let inputs = Paragraph::new(lines)
            .block(Block::default().borders(Borders::ALL).title(" Your Progress "));
        frame.render_widget(inputs, area);
    }

    fn render_level_gauge(&self, frame: &mut Frame, area: Rect) {
        let bar = self.level_bar_size();
        let ratio = if bar == 0 {
            1.0
        } else {
            (self.xp_in_level as f64 / bar as f64).clamp(0.0, 1.0)
        };

        let gauge = Gauge::default()
            .block(Block::default().borders(Borders::ALL).title(format!(" Level {} ", self.current_level)))
            .gauge_style(Style::default().fg(Color::Green))
            .ratio(ratio)
            .label(format!("{} / {}", format_xp(self.xp_in_level), format_xp(bar)));
        frame.render_widget(gauge, area);
    }

    fn render_projection(&self, frame: &mut Frame, area: Rect) {
        let rates = &self.data.season.rates;
        let projection = self.projection();
        let target_xp = cumulative_xp(rates.target_level, rates);

        let (verdict, color) = if projection.xp_still_needed == 0 {
            ("Target level reached!", Color::Green)
        } else if projection.reaches_target {
            ("You can make it", Color::Green)
        } else {
            ("Not at this pace", Color::Red)
        };

        let lines = vec![
            Line::from(Span::styled(verdict, Style::default().fg(color).add_modifier(Modifier::BOLD))),
            Line::from(""),
            Line::from(format!("Target: level {} ({} XP)", rates.target_level, format_xp(target_xp))),
            Line::from(format!("XP still needed: {}", format_xp(projection.xp_still_needed))),
            Line::from(format!(
                "Daily XP needed: {:.0} / {:.0} cap",
                projection.daily_xp_needed, projection.effective_daily_cap
            )),
            Line::from(format!("Days at cap: {}", format_days(projection.days_needed_at_cap))),
            self.season_status_line(),
        ];

        let panel = Paragraph::new(lines)
            .block(Block::default().borders(Borders::ALL).title(" Will I Make It? "));
        frame.render_widget(panel, area);
    }

    fn season_status_line(&self) -> Line<'static> {
        match self.season_status {
            SeasonStatus::NotStarted => Line::from(Span::styled(
                "Season has not started yet",
                Style::default().fg(Color::Yellow),
            )),
            SeasonStatus::Ended => Line::from(Span::styled(
                "Season has ended",
                Style::default().fg(Color::Red),
            )),
            SeasonStatus::Running => Line::from(Span::styled(
                format!("Season elapsed: {:.0}%", self.season_elapsed * 100.0),
                Style::default().fg(Color::DarkGray),
            )),
        }
    }

    fn render_hyperchrome(&self, frame: &mut Frame, area: Rect) {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(6), Constraint::Length(3), Constraint::Min(5)])
            .split(area);

        let fields = [
            (PityField::Level, "Hyperchrome level", self.pity.level.name().to_string()),
            (PityField::Pity, "Pity", format!("{:.0}%", self.pity.pity_percent)),
            (PityField::PrivateServer, "Private server", yes_no(self.pity.is_private_server).to_string()),
            (PityField::Robberies, "Planned robberies", self.planned_robberies.to_string()),
        ];
        let lines: Vec<Line> = fields
            .into_iter()
            .map(|(field, label, value)| input_line(field == self.pity_field, label, value))
            .collect();
        let inputs = Paragraph::new(lines)
            .block(Block::default().borders(Borders::ALL).title(" Hyperchrome "));
        frame.render_widget(inputs, rows[0]);

        let gauge = Gauge::default()
            .block(Block::default().borders(Borders::ALL).title(" Pity "))
            .gauge_style(Style::default().fg(Color::Magenta))
            .ratio((self.pity.pity_percent / 100.0).clamp(0.0, 1.0))
            .label(format!("{:.0}%", self.pity.pity_percent));
        frame.render_widget(gauge, rows[1]);

        let robberies = self.robberies();
        let next = match self.pity.level.next() {
            Some(level) => level.name().to_string(),
            None => "the next tier (already at max)".to_string(),
        };
        let mut lines = vec![
            Line::from(Span::styled(
                format!("{} robberies", robberies),
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            )),
            Line::from(format!("to reach {}", next)),
            Line::from(format!(
                "Pity after {} robberies: {:.0}%",
                self.planned_robberies,
                self.planned_pity()
            )),
        ];
        if self.pity.is_private_server {
            lines.push(Line::from(Span::styled(
                format!("Private server: x{} robberies", self.data.pity.private_server_multiplier),
                Style::default().fg(Color::DarkGray),
            )));
        }

        let result = Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL).title(" Robberies To Level Up "));
        frame.render_widget(result, rows[2]);
    }
}

fn input_line(selected: bool, label: &str, value: String) -> Line<'static> {
    let prefix = if selected { "> " } else { "  " };
    let style = if selected {
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::White)
    };

    Line::from(vec![
        Span::styled(format!("{}{:<18}", prefix, label), style),
        Span::styled(value, style),
    ])
}

fn yes_no(value: bool) -> &'static str {
    if value { "Yes" } else { "No" }
}

fn format_days(days: u64) -> String {
    if days == u64::MAX {
        "never".to_string()
    } else {
        days.to_string()
    }
}

/// Group digits in thousands, e.g. 37800 -> "37,800"
fn format_xp(xp: u64) -> String {
    let digits = xp.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Fixed-width text progress bar for table cells
fn text_bar(percent: f64, width: usize) -> String {
    let filled = (((percent.clamp(0.0, 100.0) / 100.0) * width as f64).round() as usize).min(width);
    format!("{}{}", "█".repeat(filled), "░".repeat(width.saturating_sub(filled)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::progression::SECONDS_PER_DAY;
    use ratatui::{Terminal, backend::TestBackend, buffer::Buffer};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn shift(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::SHIFT)
    }

    fn test_app() -> App {
        let data = SeasonData::default();
        let now = data.season.start_time;
        App::new(data, now)
    }

    fn buffer_text(buffer: &Buffer) -> String {
        buffer.content().iter().map(|cell| cell.symbol()).collect()
    }

    #[test]
    fn test_new_app_counts_days_from_now() {
        let app = test_app();
        assert_eq!(app.days_remaining, 30);
        assert_eq!(app.season_elapsed, 0.0);
        assert_eq!(app.season_status(), SeasonStatus::Running);
        assert_eq!(app.tab(), Tab::Season);
    }

    #[test]
    fn test_season_status_outside_the_window() {
        let data = SeasonData::default();
        let start = data.season.start_time;
        let end = data.season.end_time;

        let early = App::new(data.clone(), start - 5 * SECONDS_PER_DAY);
        assert_eq!(early.season_status(), SeasonStatus::NotStarted);
        assert_eq!(early.days_remaining, 30);

        let late = App::new(data, end + 1);
        assert_eq!(late.season_status(), SeasonStatus::Ended);
        assert_eq!(late.days_remaining, 0);
        assert!(!late.projection().reaches_target);

        let mut terminal = Terminal::new(TestBackend::new(110, 32)).unwrap();
        terminal.draw(|frame| early.render(frame)).unwrap();
        assert!(buffer_text(terminal.backend().buffer()).contains("Season has not started yet"));
        terminal.draw(|frame| late.render(frame)).unwrap();
        assert!(buffer_text(terminal.backend().buffer()).contains("Season has ended"));
    }

    #[test]
    fn test_quit_keys() {
        let mut app = test_app();
        assert!(app.handle_input(key(KeyCode::Char('q'))));
        assert!(app.handle_input(key(KeyCode::Esc)));
        assert!(app.handle_input(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)));
        assert!(!app.handle_input(key(KeyCode::Tab)));
    }

    #[test]
    fn test_level_input_stays_in_range() {
        let mut app = test_app();
        app.handle_input(key(KeyCode::Left));
        assert_eq!(app.current_level, 1);

        for _ in 0..50 {
            app.handle_input(key(KeyCode::Right));
        }
        assert_eq!(app.current_level, app.data.season.rates.target_level);
    }

    #[test]
    fn test_xp_input_capped_at_level_bar() {
        let mut app = test_app();
        app.handle_input(key(KeyCode::Right)); // level 2
        app.handle_input(key(KeyCode::Down)); // select XP
        for _ in 0..1_000 {
            app.handle_input(shift(KeyCode::Right));
        }
        assert_eq!(app.xp_in_level, app.level_bar_size());

        app.handle_input(key(KeyCode::Up));
        app.handle_input(key(KeyCode::Left)); // back to level 1, empty bar
        assert_eq!(app.xp_in_level, 0);
    }

    #[test]
    fn test_days_and_pass_inputs() {
        let mut app = test_app();
        app.handle_input(key(KeyCode::Down));
        app.handle_input(key(KeyCode::Down)); // days
        app.handle_input(shift(KeyCode::Left));
        assert_eq!(app.days_remaining, 23);
        for _ in 0..10 {
            app.handle_input(shift(KeyCode::Left));
        }
        assert_eq!(app.days_remaining, 0);

        app.handle_input(key(KeyCode::Down)); // pass
        app.handle_input(key(KeyCode::Char(' ')));
        assert!(app.has_season_pass);
        assert_eq!(app.projection().effective_daily_cap, app.data.season.rates.max_daily_xp_with_pass);
    }

    #[test]
    fn test_hyperchrome_inputs() {
        let mut app = test_app();
        app.handle_input(key(KeyCode::Tab));
        assert_eq!(app.tab(), Tab::Hyperchrome);
        assert_eq!(app.robberies(), app.data.pity.base_costs[0]);

        app.handle_input(key(KeyCode::Right)); // level 1
        app.handle_input(key(KeyCode::Right)); // level 2
        app.handle_input(key(KeyCode::Down)); // pity
        for _ in 0..5 {
            app.handle_input(shift(KeyCode::Right));
        }
        assert_eq!(app.pity.pity_percent, 50.0);

        app.handle_input(key(KeyCode::Down)); // private server
        app.handle_input(key(KeyCode::Enter));
        let base = f64::from(app.data.pity.base_costs[2]);
        assert_eq!(app.robberies(), (base * 0.5 * 1.5).ceil() as u32);

        for _ in 0..20 {
            app.handle_input(key(KeyCode::Up));
        }
        for _ in 0..20 {
            app.handle_input(key(KeyCode::Right));
        }
        assert_eq!(app.pity.level, HyperchromeLevel::Level4);
    }

    #[test]
    fn test_planned_robberies_preview() {
        let mut app = test_app();
        app.handle_input(key(KeyCode::Tab));
        for _ in 0..3 {
            app.handle_input(key(KeyCode::Down));
        }
        assert_eq!(app.pity_field, PityField::Robberies);

        app.handle_input(key(KeyCode::Left));
        assert_eq!(app.planned_robberies, 0);
        assert_eq!(app.planned_pity(), 0.0);

        // 10 of the 40 robberies a Level 0 meter takes
        app.handle_input(shift(KeyCode::Right));
        assert_eq!(app.planned_robberies, 10);
        assert_eq!(app.planned_pity(), 25.0);

        let mut terminal = Terminal::new(TestBackend::new(110, 32)).unwrap();
        terminal.draw(|frame| app.render(frame)).unwrap();
        assert!(buffer_text(terminal.backend().buffer()).contains("Pity after 10 robberies: 25%"));

        for _ in 0..10 {
            app.handle_input(shift(KeyCode::Right));
        }
        assert_eq!(app.planned_pity(), 100.0);
    }

    #[test]
    fn test_render_both_tabs() {
        let mut app = test_app();
        let mut terminal = Terminal::new(TestBackend::new(110, 32)).unwrap();

        terminal.draw(|frame| app.render(frame)).unwrap();
        let text = buffer_text(terminal.backend().buffer());
        assert!(text.contains("Level Requirements"), "season screen missing table");
        assert!(text.contains("Will I Make It?"));

        app.handle_input(key(KeyCode::Tab));
        terminal.draw(|frame| app.render(frame)).unwrap();
        let text = buffer_text(terminal.backend().buffer());
        assert!(text.contains("40 robberies"), "hyperchrome screen missing result");
    }

    #[test]
    fn test_render_tiny_terminal() {
        let app = test_app();
        let mut terminal = Terminal::new(TestBackend::new(20, 6)).unwrap();
        assert!(terminal.draw(|frame| app.render(frame)).is_ok());
    }

    #[test]
    fn test_format_helpers() {
        assert_eq!(format_xp(0), "0");
        assert_eq!(format_xp(999), "999");
        assert_eq!(format_xp(37_800), "37,800");
        assert_eq!(format_xp(1_234_567), "1,234,567");
        assert_eq!(text_bar(50.0, 4), "██░░");
        assert_eq!(text_bar(150.0, 2), "██");
        assert_eq!(text_bar(250.0, 3), "███");
        assert_eq!(text_bar(f64::NAN, 3), "░░░");
        assert_eq!(text_bar(100.0, 0), "");
        assert_eq!(format_days(u64::MAX), "never");
    }
}
