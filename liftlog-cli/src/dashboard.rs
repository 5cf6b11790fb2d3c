use anyhow::{Context, Result, anyhow};
use chrono::{Local, NaiveDate};
use crossterm::event::{self, KeyCode, KeyEventKind};
use ratatui::{
    DefaultTerminal, Frame,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{BarChart, Block, Borders, List, ListItem, ListState, Paragraph, Sparkline},
};

use liftlog::analytics::{
    DateRange, EntryFilter, Summary, daily_volume, exercise_names, top_exercises, volume_in_range,
};
use liftlog::{LoggedSet, Store};

use crate::display::{TABLE_HEADER, format_volume, table_row};

const HELP: &str =
    "j/k: navigate | a: add | d: delete selected | x: delete by id | f: filter | s: since | c: clear | q: quit";

const CHART_EXERCISES: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum InputMode {
    Normal,
    Adding,
    DeletingById,
    FilteringExercises,
    SettingSince,
}

impl InputMode {
    fn prompt(&self) -> &'static str {
        match self {
            InputMode::Normal => "Status",
            InputMode::Adding => "New set: DATE, EXERCISE, SETS, REPS, WEIGHT (date optional)",
            InputMode::DeletingById => "Delete log id",
            InputMode::FilteringExercises => "Exercises to show, comma separated (empty for all)",
            InputMode::SettingSince => "Show logs from date YYYY-MM-DD (empty for all)",
        }
    }
}

/// One line typed into the add prompt.
#[derive(Debug, PartialEq)]
struct EntryInput {
    date: NaiveDate,
    exercise: String,
    sets: u32,
    reps: u32,
    weight: f64,
}

fn parse_entry_line(line: &str, today: NaiveDate) -> Result<EntryInput> {
    let fields: Vec<&str> = line.split(',').map(str::trim).collect();
    let (date, rest) = match fields.as_slice() {
        [date, rest @ ..] if rest.len() == 4 => (
            date.parse::<NaiveDate>()
                .with_context(|| format!("bad date {:?}", date))?,
            rest,
        ),
        rest if rest.len() == 4 => (today, rest),
        _ => return Err(anyhow!("expected 4 or 5 comma separated fields")),
    };

    Ok(EntryInput {
        date,
        exercise: rest[0].to_string(),
        sets: rest[1]
            .parse()
            .with_context(|| format!("bad sets {:?}", rest[1]))?,
        reps: rest[2]
            .parse()
            .with_context(|| format!("bad reps {:?}", rest[2]))?,
        weight: rest[3]
            .parse()
            .with_context(|| format!("bad weight {:?}", rest[3]))?,
    })
}

struct Dashboard {
    store: Store,
    entries: Vec<LoggedSet>,
    visible: Vec<LoggedSet>,
    filter: EntryFilter,
    selected: usize,
    status_message: String,
    input_mode: InputMode,
    input_buffer: String,
    today: NaiveDate,
}

impl Dashboard {
    fn new(store: Store) -> Result<Self> {
        let mut dashboard = Self {
            store,
            entries: Vec::new(),
            visible: Vec::new(),
            filter: EntryFilter::new(),
            selected: 0,
            status_message: HELP.to_string(),
            input_mode: InputMode::Normal,
            input_buffer: String::new(),
            today: Local::now().date_naive(),
        };
        dashboard.refresh()?;
        Ok(dashboard)
    }

    /// Re-reads the store after any mutation.
    fn refresh(&mut self) -> Result<()> {
        self.entries = self.store.list_all()?;
        self.apply_filter();
        Ok(())
    }

    fn apply_filter(&mut self) {
        self.visible = self.filter.apply(&self.entries);
        if self.selected >= self.visible.len() {
            self.selected = self.visible.len().saturating_sub(1);
        }
    }

    fn scroll_down(&mut self) {
        if !self.visible.is_empty() && self.selected < self.visible.len() - 1 {
            self.selected += 1;
        }
    }

    fn scroll_up(&mut self) {
        if self.selected > 0 {
            self.selected -= 1;
        }
    }

    fn enter_mode(&mut self, mode: InputMode) {
        self.input_mode = mode;
        self.input_buffer.clear();
    }

    fn leave_input(&mut self) {
        self.input_mode = InputMode::Normal;
        self.input_buffer.clear();
    }

    fn submit(&mut self) -> Result<()> {
        let input = self.input_buffer.trim().to_string();
        match self.input_mode {
            InputMode::Normal => Ok(()),
            InputMode::Adding => self.add(&input),
            InputMode::DeletingById => {
                let id: i64 = input
                    .parse()
                    .with_context(|| format!("bad id {:?}", input))?;
                self.delete(id)
            }
            InputMode::FilteringExercises => {
                self.filter.exercises = input
                    .split(',')
                    .map(str::trim)
                    .filter(|name| !name.is_empty())
                    .map(str::to_string)
                    .collect();
                self.apply_filter();
                self.status_message = format!("Showing {} of {} logs", self.visible.len(), self.entries.len());
                Ok(())
            }
            InputMode::SettingSince => {
                self.filter.since = if input.is_empty() {
                    None
                } else {
                    Some(input.parse().with_context(|| format!("bad date {:?}", input))?)
                };
                self.apply_filter();
                self.status_message = format!("Showing {} of {} logs", self.visible.len(), self.entries.len());
                Ok(())
            }
        }
    }

    fn add(&mut self, line: &str) -> Result<()> {
        let input = parse_entry_line(line, self.today)?;
        let id = self
            .store
            .add(input.date, &input.exercise, input.sets, input.reps, input.weight)?;
        self.refresh()?;
        if let Some(pos) = self.visible.iter().position(|e| e.id == id) {
            self.selected = pos;
        }
        self.status_message = format!("Added log #{} ({})", id, input.exercise.trim());
        Ok(())
    }

    fn delete(&mut self, id: i64) -> Result<()> {
        if id < 1 {
            return Err(anyhow!("Enter a valid log id (non-zero)."));
        }
        self.store.delete(id)?;
        self.refresh()?;
        self.status_message = format!("Deleted log id {}", id);
        Ok(())
    }

    fn delete_selected(&mut self) -> Result<()> {
        match self.visible.get(self.selected).map(|e| e.id) {
            Some(id) => self.delete(id),
            None => Ok(()),
        }
    }

    fn footer_title(&self) -> String {
        match self.input_mode {
            InputMode::FilteringExercises => format!(
                "{} [{}]",
                self.input_mode.prompt(),
                exercise_names(&self.entries).join(", ")
            ),
            mode => mode.prompt().to_string(),
        }
    }

    fn clear_filters(&mut self) {
        self.filter = EntryFilter::new();
        self.apply_filter();
        self.status_message = HELP.to_string();
    }
}

pub fn run(mut terminal: DefaultTerminal, store: Store) -> Result<()> {
    let mut dashboard = Dashboard::new(store)?;

    loop {
        terminal.draw(|frame| render(frame, &dashboard))?;

        let event::Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }

        match dashboard.input_mode {
            InputMode::Normal => match key.code {
                KeyCode::Char('q') | KeyCode::Char('Q') => return Ok(()),
                KeyCode::Char('j') | KeyCode::Down => dashboard.scroll_down(),
                KeyCode::Char('k') | KeyCode::Up => dashboard.scroll_up(),
                KeyCode::Char('a') | KeyCode::Char('A') => dashboard.enter_mode(InputMode::Adding),
                KeyCode::Char('x') | KeyCode::Char('X') => {
                    dashboard.enter_mode(InputMode::DeletingById)
                }
                KeyCode::Char('f') | KeyCode::Char('F') => {
                    dashboard.enter_mode(InputMode::FilteringExercises)
                }
                KeyCode::Char('s') | KeyCode::Char('S') => {
                    dashboard.enter_mode(InputMode::SettingSince)
                }
                KeyCode::Char('c') | KeyCode::Char('C') => dashboard.clear_filters(),
                KeyCode::Char('d') | KeyCode::Char('D') => {
                    if let Err(e) = dashboard.delete_selected() {
                        dashboard.status_message = format!("Error deleting log: {}", e);
                    }
                }
                _ => {}
            },
            _ => match key.code {
                KeyCode::Enter => {
                    if let Err(e) = dashboard.submit() {
                        dashboard.status_message = format!("Error: {:#}", e);
                    }
                    dashboard.leave_input();
                }
                KeyCode::Esc => {
                    dashboard.leave_input();
                    dashboard.status_message = HELP.to_string();
                }
                KeyCode::Char(c) => dashboard.input_buffer.push(c),
                KeyCode::Backspace => {
                    dashboard.input_buffer.pop();
                }
                _ => {}
            },
        }
    }
}

fn render(frame: &mut Frame, dashboard: &Dashboard) {
    let chunks = Layout::vertical([
        Constraint::Length(3),
        Constraint::Length(3),
        Constraint::Min(8),
        Constraint::Length(3),
    ])
    .split(frame.area());

    let header = Paragraph::new("LiftLog - Workout Tracker")
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(header, chunks[0]);

    render_metrics(frame, chunks[1], dashboard);

    let body = Layout::horizontal([Constraint::Percentage(58), Constraint::Percentage(42)])
        .split(chunks[2]);
    render_logs(frame, body[0], dashboard);

    let charts = Layout::vertical([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(body[1]);
    render_daily_chart(frame, charts[0], &dashboard.visible);
    render_exercise_chart(frame, charts[1], &dashboard.visible);

    let footer = match dashboard.input_mode {
        InputMode::Normal => Paragraph::new(dashboard.status_message.as_str())
            .style(Style::default().fg(Color::White)),
        _ => Paragraph::new(dashboard.input_buffer.as_str()).style(Style::default().fg(Color::Yellow)),
    }
    .block(
        Block::default()
            .borders(Borders::ALL)
            .title(dashboard.footer_title()),
    );
    frame.render_widget(footer, chunks[3]);
}

fn render_metrics(frame: &mut Frame, area: Rect, dashboard: &Dashboard) {
    let summary = Summary::from_entries(&dashboard.entries);
    let most_recent = summary
        .most_recent
        .map(|d| d.to_string())
        .unwrap_or_else(|| "-".to_string());
    let last_week = volume_in_range(&dashboard.entries, DateRange::last_days(dashboard.today, 7));

    let text = format!(
        "Total volume: {} | Training days: {} | Entries: {} | Most recent: {} | Last 7 days: {}",
        format_volume(summary.total_volume),
        summary.training_days,
        summary.entry_count,
        most_recent,
        format_volume(last_week)
    );
    let metrics = Paragraph::new(text).block(Block::default().borders(Borders::ALL).title("Metrics"));
    frame.render_widget(metrics, area);
}

fn render_logs(frame: &mut Frame, area: Rect, dashboard: &Dashboard) {
    let title = if dashboard.filter.is_empty() {
        format!("Logs ({} total)", dashboard.entries.len())
    } else {
        format!("Logs ({} of {})", dashboard.visible.len(), dashboard.entries.len())
    };

    if dashboard.visible.is_empty() {
        let message = if dashboard.entries.is_empty() {
            "No workouts yet.\nPress 'a' to log your first set!"
        } else {
            "No logs match the filter.\nPress 'c' to clear it."
        };
        let empty = Paragraph::new(message)
            .style(Style::default().fg(Color::Gray))
            .block(Block::default().borders(Borders::ALL).title(title));
        frame.render_widget(empty, area);
        return;
    }

    let items: Vec<ListItem> = std::iter::once(
        ListItem::new(TABLE_HEADER).style(Style::default().add_modifier(Modifier::BOLD)),
    )
    .chain(dashboard.visible.iter().enumerate().map(|(idx, entry)| {
        let style = if idx == dashboard.selected {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };
        ListItem::new(table_row(entry)).style(style)
    }))
    .collect();

    let list = List::new(items).block(Block::default().borders(Borders::ALL).title(title));

    // +1 for the header row
    let mut list_state = ListState::default();
    list_state.select(Some(dashboard.selected + 1));

    frame.render_stateful_widget(list, area, &mut list_state);
}

fn render_daily_chart(frame: &mut Frame, area: Rect, entries: &[LoggedSet]) {
    let daily = daily_volume(entries);
    let values: Vec<u64> = daily
        .iter()
        .map(|d| d.total_volume.max(0.0).round() as u64)
        .collect();

    let title = match (daily.first(), daily.last()) {
        (Some(first), Some(last)) => format!("Daily volume {} .. {}", first.date, last.date),
        _ => "Daily volume".to_string(),
    };

    let sparkline = Sparkline::default()
        .block(Block::default().borders(Borders::ALL).title(title))
        .data(&values)
        .style(Style::default().fg(Color::Green));
    frame.render_widget(sparkline, area);
}

fn render_exercise_chart(frame: &mut Frame, area: Rect, entries: &[LoggedSet]) {
    let totals = top_exercises(entries, CHART_EXERCISES);
    let bars: Vec<(&str, u64)> = totals
        .iter()
        .map(|t| (t.exercise.as_str(), t.total_volume.max(0.0).round() as u64))
        .collect();

    let chart = BarChart::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Volume by exercise"),
        )
        .data(bars.as_slice())
        .bar_width(9)
        .bar_gap(1)
        .bar_style(Style::default().fg(Color::Cyan))
        .value_style(Style::default().fg(Color::Black).bg(Color::Cyan));
    frame.render_widget(chart, area);
}
