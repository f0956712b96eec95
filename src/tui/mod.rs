// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Callsheet-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Callsheet and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Terminal UI.
//!
//! Provides the interactive shell (ratatui + crossterm): search bar, the
//! grid/list/table result views, the editable scorecard, filters, voice
//! capture, and a built-in demo session.

use std::{
    error::Error,
    io,
    sync::Arc,
    time::{Duration, Instant},
};

use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    prelude::*,
    widgets::{
        Block, Borders, Cell as TableCell, Clear, List, ListItem, ListState, Paragraph,
        Row as TableRow, Table, TableState, Wrap,
    },
};
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};
use tracing::warn;

use crate::audio::{Recorder, RecordingSession};
use crate::client::{FetchError, Generation, RequestSequencer, ServiceClient};
use crate::format::{
    format_cell, format_date, format_json_cell, format_time, header_label, serialize_for_requery,
    PositionCard,
};
use crate::model::{fixtures, CellValue, RawRecord, Scorecard, Session, ViewMode};
use crate::ops::{self, OpOutcome, ScorecardOp};
use crate::reconcile::reconcile;

const FOCUS_COLOR: Color = Color::LightGreen;
const RECORDING_COLOR: Color = Color::LightRed;
const LOADING_COLOR: Color = Color::Yellow;
const MESSAGE_COLOR: Color = Color::Gray;
const FOOTER_KEY_COLOR: Color = Color::Cyan;
const FOOTER_BRAND_COLOR: Color = Color::White;
const FOOTER_BRAND: &str = "🅲 🅰 🅻 🅻 🆂 🅷 🅴 🅴 🆃 ";
const GRID_COLUMNS: usize = 3;
const CARD_HEIGHT: u16 = 7;
const TOAST_TTL: Duration = Duration::from_secs(4);

/// Runs the interactive terminal UI against the built-in demo session.
pub fn run_demo() -> Result<(), Box<dyn Error>> {
    run_with_session(demo_session(), None)
}

/// Runs the interactive terminal UI. With `services` the search, detail, and
/// voice exchanges go over the wire; without, the demo fixtures answer.
pub fn run_with_session(
    session: Session,
    services: Option<TuiServices>,
) -> Result<(), Box<dyn Error>> {
    let mut terminal = TerminalSession::new()?;
    let mut app = App::new(session, services);

    while !app.should_quit {
        app.poll_replies();
        terminal.draw(|frame| draw(frame, &mut app))?;

        if event::poll(Duration::from_millis(250))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    app.handle_key(key);
                }
                _ => {}
            }
        }
    }

    Ok(())
}

/// Handles the interactive session needs beyond pure state: a runtime to run
/// requests on, the shared HTTP client, and the audio recorder.
pub struct TuiServices {
    handle: tokio::runtime::Handle,
    client: Arc<ServiceClient>,
    recorder: Recorder,
}

impl TuiServices {
    pub fn new(
        handle: tokio::runtime::Handle,
        client: Arc<ServiceClient>,
        recorder: Recorder,
    ) -> Self {
        Self { handle, client, recorder }
    }
}

/// A session pre-filled from the demo fixtures, used by `--demo` and tests.
pub fn demo_session() -> Session {
    let mut session = Session::new("Two ushers and a security guard for Saturday");
    session.set_scorecard(reconcile(&fixtures::demo_response()));
    session.set_raw_records(fixtures::demo_records());
    session
}

fn draw(frame: &mut Frame<'_>, app: &mut App) {
    let area = frame.size();
    let message = app.session.message().map(str::to_owned);

    let mut constraints = vec![Constraint::Length(3)];
    if message.is_some() {
        constraints.push(Constraint::Length(3));
    }
    if app.filters_visible {
        constraints.push(Constraint::Length(3));
    }
    constraints.push(Constraint::Min(0));
    constraints.push(Constraint::Length(1));
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    let mut slot = 0;
    let search_area = chunks[slot];
    slot += 1;
    let message_area = message.as_ref().map(|_| {
        let picked = chunks[slot];
        slot += 1;
        picked
    });
    let filters_area = app.filters_visible.then(|| {
        let picked = chunks[slot];
        slot += 1;
        picked
    });
    let main_area = chunks[slot];
    slot += 1;
    let status_area = chunks[slot];

    draw_search_bar(frame, search_area, app);
    if let (Some(message_area), Some(message)) = (message_area, message.as_deref()) {
        draw_message(frame, message_area, message);
    }
    if let Some(filters_area) = filters_area {
        draw_filters(frame, filters_area, app);
    }

    let (results_area, scorecard_area) = if app.scorecard_visible {
        let panes = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(main_area);
        (panes[0], Some(panes[1]))
    } else {
        (main_area, None)
    };

    draw_results(frame, results_area, app);
    if let Some(scorecard_area) = scorecard_area {
        draw_scorecard(frame, scorecard_area, app);
    }

    let toast_snapshot = app.toast.as_ref().map(|toast| (toast.message.clone(), toast.expires_at));
    let toast_suffix = match toast_snapshot {
        Some((message, expires_at)) if expires_at > Instant::now() => format!(" | {message}"),
        Some(_) => {
            app.toast = None;
            String::new()
        }
        None => String::new(),
    };

    match &app.prompt {
        Some(prompt) if prompt.kind != PromptKind::Query => {
            let line = prompt_footer_line(prompt, &toast_suffix);
            frame.render_widget(Paragraph::new(line), status_area);
            let cursor_x = status_area
                .x
                .saturating_add(prompt.label().chars().count() as u16)
                .saturating_add(prompt.buffer.chars().count() as u16)
                .min(status_area.x.saturating_add(status_area.width.saturating_sub(1)));
            frame.set_cursor(cursor_x, status_area.y);
        }
        _ => {
            let status = Paragraph::new(footer_help_line(app, &toast_suffix));
            frame.render_widget(status, status_area);
            let brand = Paragraph::new(footer_brand_line()).alignment(Alignment::Right);
            frame.render_widget(brand, status_area);
        }
    }

    if app.detail_open {
        draw_detail_modal(frame, main_area, app);
    }
    if let Some(notice) = app.notice.clone() {
        draw_notice(frame, area, &notice);
    }
}

fn draw_search_bar(frame: &mut Frame<'_>, area: Rect, app: &App) {
    let mut title_spans = vec![Span::raw("─[/]─ Search ".to_owned())];
    if app.in_flight {
        title_spans.push(Span::styled(
            "… searching ".to_owned(),
            Style::default().fg(LOADING_COLOR),
        ));
    }
    if app.recording.is_some() {
        title_spans.push(Span::styled(
            "● REC ".to_owned(),
            Style::default().fg(RECORDING_COLOR),
        ));
    }

    let editing = matches!(&app.prompt, Some(prompt) if prompt.kind == PromptKind::Query);
    let content = if editing {
        app.prompt.as_ref().map(|prompt| prompt.buffer.clone()).unwrap_or_default()
    } else {
        app.session.query().to_owned()
    };
    let border_style = if editing {
        Style::default().fg(FOCUS_COLOR)
    } else {
        Style::default()
    };

    let search = Paragraph::new(content.clone()).block(
        Block::default()
            .borders(Borders::ALL)
            .title(Line::from(title_spans))
            .border_style(border_style),
    );
    frame.render_widget(search, area);

    if editing {
        let cursor_x = area
            .x
            .saturating_add(1)
            .saturating_add(content.chars().count() as u16)
            .min(area.x.saturating_add(area.width.saturating_sub(2)));
        frame.set_cursor(cursor_x, area.y.saturating_add(1));
    }
}

fn draw_message(frame: &mut Frame<'_>, area: Rect, message: &str) {
    let paragraph = Paragraph::new(message.to_owned())
        .style(Style::default().fg(MESSAGE_COLOR))
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title("─ Response "));
    frame.render_widget(paragraph, area);
}

fn draw_filters(frame: &mut Frame<'_>, area: Rect, app: &App) {
    let filters = &app.filters;
    let line = Line::from(vec![
        Span::raw(format!(
            "Date: {}  Position: {}  Hours: {}",
            if filters.date.is_empty() { "any" } else { filters.date.as_str() },
            if filters.position.is_empty() { "any" } else { filters.position.as_str() },
            filters.hours.map(HoursBucket::label).unwrap_or("any"),
        )),
        Span::styled(
            "   [D]ate [P]osition [H]ours [X] clear".to_owned(),
            Style::default().fg(FOOTER_KEY_COLOR),
        ),
    ]);
    let paragraph = Paragraph::new(line)
        .block(Block::default().borders(Borders::ALL).title(view_title("Filters", 'f', None)));
    frame.render_widget(paragraph, area);
}

fn draw_results(frame: &mut Frame<'_>, area: Rect, app: &mut App) {
    let focused = app.focus == Focus::Results;
    let border_style = if focused {
        Style::default().fg(FOCUS_COLOR)
    } else {
        Style::default()
    };
    let suffix = results_title_suffix(app);
    let title = view_title("Positions", view_key_char(app.session.view()), Some(&suffix));

    match app.session.view() {
        ViewMode::Table => draw_table_view(frame, area, app, title, border_style),
        ViewMode::List => draw_list_view(frame, area, app, title, border_style),
        ViewMode::Grid => draw_grid_view(frame, area, app, title, border_style),
    }
}

fn draw_table_view(
    frame: &mut Frame<'_>,
    area: Rect,
    app: &mut App,
    title: String,
    border_style: Style,
) {
    let block = Block::default().borders(Borders::ALL).title(title).border_style(border_style);
    let records = app.session.raw_records();
    if records.is_empty() {
        let empty = Paragraph::new("No data available").block(block);
        frame.render_widget(empty, area);
        return;
    }

    let headers = table_headers(records);
    let header_row = TableRow::new(
        headers
            .iter()
            .map(|header| {
                TableCell::from(header_label(header))
                    .style(Style::default().add_modifier(Modifier::BOLD))
            })
            .collect::<Vec<_>>(),
    );
    let rows = records
        .iter()
        .map(|record| {
            TableRow::new(
                headers
                    .iter()
                    .map(|header| {
                        let text = record
                            .get(header)
                            .map(|value| format_json_cell(header, value))
                            .unwrap_or_else(|| "-".to_owned());
                        TableCell::from(text)
                    })
                    .collect::<Vec<_>>(),
            )
        })
        .collect::<Vec<_>>();

    let widths = vec![Constraint::Min(12); headers.len()];
    let table = Table::new(rows, widths)
        .header(header_row)
        .block(block)
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED));

    app.table_state.select(Some(app.results_cursor.min(records.len().saturating_sub(1))));
    frame.render_stateful_widget(table, area, &mut app.table_state);
}

fn draw_list_view(
    frame: &mut Frame<'_>,
    area: Rect,
    app: &mut App,
    title: String,
    border_style: Style,
) {
    let block = Block::default().borders(Borders::ALL).title(title).border_style(border_style);
    if app.visible_cards.is_empty() {
        let empty = Paragraph::new("No positions yet — press / to search").block(block);
        frame.render_widget(empty, area);
        return;
    }

    let items = app
        .visible_cards
        .iter()
        .filter_map(|&index| app.cards.get(index))
        .map(|card| ListItem::new(list_card_lines(card)))
        .collect::<Vec<_>>();
    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED));

    app.results_state
        .select(Some(app.results_cursor.min(app.visible_cards.len().saturating_sub(1))));
    frame.render_stateful_widget(list, area, &mut app.results_state);
}

fn draw_grid_view(
    frame: &mut Frame<'_>,
    area: Rect,
    app: &App,
    title: String,
    border_style: Style,
) {
    let block = Block::default().borders(Borders::ALL).title(title).border_style(border_style);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if app.visible_cards.is_empty() {
        let empty = Paragraph::new("No positions yet — press / to search");
        frame.render_widget(empty, inner);
        return;
    }

    let total_rows = app.visible_cards.len().div_ceil(GRID_COLUMNS);
    let rows_fit = usize::from(inner.height / CARD_HEIGHT).max(1);
    let selected_row = app.results_cursor / GRID_COLUMNS;
    let scroll_top = (selected_row + 1).saturating_sub(rows_fit);

    let mut cursor_y = inner.y;
    for row in scroll_top..total_rows.min(scroll_top + rows_fit) {
        let row_area = Rect {
            x: inner.x,
            y: cursor_y,
            width: inner.width,
            height: CARD_HEIGHT.min(inner.y + inner.height - cursor_y),
        };
        cursor_y = cursor_y.saturating_add(CARD_HEIGHT);

        let cells = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(vec![
                Constraint::Ratio(1, GRID_COLUMNS as u32);
                GRID_COLUMNS
            ])
            .split(row_area);

        for column in 0..GRID_COLUMNS {
            let position = row * GRID_COLUMNS + column;
            let Some(&card_index) = app.visible_cards.get(position) else {
                continue;
            };
            let Some(card) = app.cards.get(card_index) else {
                continue;
            };
            let is_selected = position == app.results_cursor;
            let card_style = if is_selected && app.focus == Focus::Results {
                Style::default().fg(FOCUS_COLOR)
            } else {
                Style::default()
            };
            let widget = Paragraph::new(grid_card_lines(card))
                .wrap(Wrap { trim: true })
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .title(format!(" {} ", card.name()))
                        .border_style(card_style),
                );
            frame.render_widget(widget, cells[column]);
        }
    }
}

fn draw_scorecard(frame: &mut Frame<'_>, area: Rect, app: &App) {
    let focused = app.focus == Focus::Scorecard;
    let border_style = if focused {
        Style::default().fg(FOCUS_COLOR)
    } else {
        Style::default()
    };
    let scorecard = app.session.scorecard();
    let suffix = format!(
        "— {} rows × {} cols",
        scorecard.rows().len(),
        scorecard.columns().len()
    );
    let block = Block::default()
        .borders(Borders::ALL)
        .title(view_title("Scorecard", 's', Some(&suffix)))
        .border_style(border_style);

    if scorecard.is_empty() {
        let empty = Paragraph::new("No structured response to edit yet").block(block);
        frame.render_widget(empty, area);
        return;
    }

    let header_row = TableRow::new(
        scorecard
            .columns()
            .iter()
            .map(|column| {
                TableCell::from(header_label(column))
                    .style(Style::default().add_modifier(Modifier::BOLD))
            })
            .collect::<Vec<_>>(),
    );
    let rows = scorecard
        .rows()
        .iter()
        .enumerate()
        .map(|(row_index, row)| {
            TableRow::new(
                scorecard
                    .columns()
                    .iter()
                    .enumerate()
                    .map(|(column_index, column)| {
                        let mut cell = TableCell::from(format_cell(column, row.cell(column)));
                        if focused
                            && row_index == app.cursor_row
                            && column_index == app.cursor_col
                        {
                            cell = cell.style(Style::default().add_modifier(Modifier::REVERSED));
                        }
                        cell
                    })
                    .collect::<Vec<_>>(),
            )
        })
        .collect::<Vec<_>>();

    let widths = vec![Constraint::Min(10); scorecard.columns().len()];
    let table = Table::new(rows, widths).header(header_row).block(block);
    frame.render_widget(table, area);
}

fn draw_detail_modal(frame: &mut Frame<'_>, area: Rect, app: &App) {
    let Some(card) = app.detail_card() else {
        return;
    };
    let modal_area = centered_rect(area, 70, 80);
    frame.render_widget(Clear, modal_area);
    let detail = Paragraph::new(detail_lines(&card))
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" {} — Esc to close ", card.name()))
                .border_style(Style::default().fg(FOCUS_COLOR)),
        );
    frame.render_widget(detail, modal_area);
}

fn draw_notice(frame: &mut Frame<'_>, area: Rect, notice: &str) {
    let modal_area = centered_rect(area, 50, 20);
    frame.render_widget(Clear, modal_area);
    let paragraph = Paragraph::new(notice.to_owned())
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Notice — Esc to dismiss ")
                .border_style(Style::default().fg(Color::LightRed)),
        );
    frame.render_widget(paragraph, modal_area);
}

// Extracted chrome helpers: filters, card/detail text, titles, footer.
include!("chrome.rs");

#[derive(Debug, Clone)]
struct Toast {
    message: String,
    expires_at: Instant,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum PromptKind {
    Query,
    AddColumn,
    EditCell { row: usize, column: String },
    FilterDate,
    FilterPosition,
}

#[derive(Debug, Clone)]
struct Prompt {
    kind: PromptKind,
    buffer: String,
}

impl Prompt {
    fn label(&self) -> &'static str {
        match self.kind {
            PromptKind::Query => "Search: ",
            PromptKind::AddColumn => "Add column: ",
            PromptKind::EditCell { .. } => "Cell value: ",
            PromptKind::FilterDate => "Filter date (YYYY-MM-DD): ",
            PromptKind::FilterPosition => "Filter position: ",
        }
    }
}

/// One search/voice exchange outcome, tagged with its generation so stale
/// replies can be discarded.
#[derive(Debug)]
struct Reply {
    generation: Generation,
    kind: ReplyKind,
}

#[derive(Debug)]
enum ReplyKind {
    Search(SearchOutcome),
    Details(DetailOutcome),
    Voice(VoiceOutcome),
}

#[derive(Debug, Default)]
struct SearchOutcome {
    message: Option<String>,
    scorecard: Option<Scorecard>,
    records: Vec<RawRecord>,
    error: Option<String>,
}

#[derive(Debug, Default)]
struct DetailOutcome {
    records: Vec<RawRecord>,
    error: Option<String>,
    clear_scorecard: bool,
}

#[derive(Debug, Default)]
struct VoiceOutcome {
    transcription: String,
    scorecard: Option<Scorecard>,
    error: Option<String>,
}

async fn run_search(client: Arc<ServiceClient>, query: String) -> SearchOutcome {
    let mut outcome = SearchOutcome::default();

    match client.query(&query).await {
        Ok(reply) => {
            let (message, response) = reply.into_parts();
            outcome.message = message;
            outcome.scorecard = response.as_ref().map(reconcile);
        }
        Err(err) => {
            warn!(%err, "query failed");
            outcome.error = Some(err.user_message());
            return outcome;
        }
    }

    match client.event_details(&query).await {
        Ok(records) => outcome.records = records,
        Err(err) => {
            warn!(%err, "detail query failed");
            if matches!(err, FetchError::Service { .. }) {
                // Service-signaled errors short-circuit the whole result.
                outcome.scorecard = None;
            }
            outcome.error = Some(err.user_message());
        }
    }

    outcome
}

async fn run_details(client: Arc<ServiceClient>, term: String) -> DetailOutcome {
    match client.event_details(&term).await {
        Ok(records) => DetailOutcome { records, ..DetailOutcome::default() },
        Err(err) => {
            warn!(%err, "detail query failed");
            DetailOutcome {
                records: Vec::new(),
                clear_scorecard: matches!(err, FetchError::Service { .. }),
                error: Some(err.user_message()),
            }
        }
    }
}

async fn run_voice(client: Arc<ServiceClient>, audio: Vec<u8>) -> VoiceOutcome {
    match client.transcribe(audio).await {
        Ok(reply) => {
            let (transcription, response) = reply.into_parts();
            VoiceOutcome {
                transcription,
                scorecard: response.as_ref().map(reconcile),
                error: None,
            }
        }
        Err(err) => {
            warn!(%err, "voice upload failed");
            VoiceOutcome { error: Some(err.user_message()), ..VoiceOutcome::default() }
        }
    }
}

struct App {
    session: Session,
    services: Option<TuiServices>,
    cards: Vec<PositionCard>,
    visible_cards: Vec<usize>,
    filters: Filters,
    filters_visible: bool,
    focus: Focus,
    results_cursor: usize,
    results_state: ListState,
    table_state: TableState,
    cursor_row: usize,
    cursor_col: usize,
    scorecard_visible: bool,
    detail_open: bool,
    prompt: Option<Prompt>,
    notice: Option<String>,
    toast: Option<Toast>,
    sequencer: RequestSequencer,
    in_flight: bool,
    recording: Option<RecordingSession>,
    reply_tx: UnboundedSender<Reply>,
    reply_rx: UnboundedReceiver<Reply>,
    should_quit: bool,
}

impl App {
    fn new(session: Session, services: Option<TuiServices>) -> Self {
        let (reply_tx, reply_rx) = unbounded_channel();
        let mut app = Self {
            session,
            services,
            cards: Vec::new(),
            visible_cards: Vec::new(),
            filters: Filters::default(),
            filters_visible: false,
            focus: Focus::Results,
            results_cursor: 0,
            results_state: ListState::default(),
            table_state: TableState::default(),
            cursor_row: 0,
            cursor_col: 0,
            scorecard_visible: false,
            detail_open: false,
            prompt: None,
            notice: None,
            toast: None,
            sequencer: RequestSequencer::default(),
            in_flight: false,
            recording: None,
            reply_tx,
            reply_rx,
            should_quit: false,
        };
        app.rebuild_cards();
        app.scorecard_visible = !app.session.scorecard().is_empty();
        app
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if self.handle_key_code(key.code) {
            self.should_quit = true;
        }
    }

    fn handle_key_code(&mut self, code: KeyCode) -> bool {
        if self.notice.is_some() {
            if matches!(code, KeyCode::Esc | KeyCode::Enter) {
                self.notice = None;
            }
            return false;
        }

        if self.prompt.is_some() {
            self.handle_prompt_key(code);
            return false;
        }

        if self.detail_open {
            if matches!(code, KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q')) {
                self.detail_open = false;
            }
            return false;
        }

        match code {
            KeyCode::Char('q') => return true,
            KeyCode::Char('/') => self.open_prompt(PromptKind::Query),
            KeyCode::Char('v') => self.toggle_recording(),
            KeyCode::Char('1') => self.set_view(ViewMode::Grid),
            KeyCode::Char('2') => self.set_view(ViewMode::List),
            KeyCode::Char('3') => self.set_view(ViewMode::Table),
            KeyCode::Char('s') => self.toggle_scorecard_visible(),
            KeyCode::Char('f') => self.filters_visible = !self.filters_visible,
            KeyCode::Char('y') => self.yank_scorecard(),
            KeyCode::Char('D') => self.open_prompt(PromptKind::FilterDate),
            KeyCode::Char('P') => self.open_prompt(PromptKind::FilterPosition),
            KeyCode::Char('H') => self.cycle_hours_filter(),
            KeyCode::Char('X') => self.clear_filters(),
            KeyCode::Tab | KeyCode::BackTab => self.cycle_focus(),
            _ => match self.focus {
                Focus::Results => self.handle_results_key(code),
                Focus::Scorecard => self.handle_scorecard_key(code),
            },
        }

        false
    }

    fn handle_results_key(&mut self, code: KeyCode) {
        let horizontal_in_grid = self.session.view() == ViewMode::Grid;
        match code {
            KeyCode::Up | KeyCode::Char('k') => self.move_selection(-(self.vertical_step())),
            KeyCode::Down | KeyCode::Char('j') => self.move_selection(self.vertical_step()),
            KeyCode::Left | KeyCode::Char('h') if horizontal_in_grid => self.move_selection(-1),
            KeyCode::Right | KeyCode::Char('l') if horizontal_in_grid => self.move_selection(1),
            KeyCode::Home => self.results_cursor = 0,
            KeyCode::End => {
                self.results_cursor = self.result_count().saturating_sub(1);
            }
            KeyCode::Enter => self.open_detail(),
            _ => {}
        }
    }

    fn handle_scorecard_key(&mut self, code: KeyCode) {
        let scorecard = self.session.scorecard();
        let rows = scorecard.rows().len();
        let cols = scorecard.columns().len();
        match code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.cursor_row = self.cursor_row.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.cursor_row = (self.cursor_row + 1).min(rows.saturating_sub(1));
            }
            KeyCode::Left | KeyCode::Char('h') => {
                self.cursor_col = self.cursor_col.saturating_sub(1);
            }
            KeyCode::Right | KeyCode::Char('l') => {
                self.cursor_col = (self.cursor_col + 1).min(cols.saturating_sub(1));
            }
            KeyCode::Enter | KeyCode::Char('e') => self.open_cell_prompt(),
            KeyCode::Char('a') => self.apply_op(ScorecardOp::AddRow),
            KeyCode::Char('c') => self.open_prompt(PromptKind::AddColumn),
            KeyCode::Char('d') => self.remove_current_column(),
            KeyCode::Char('r') => self.requery_from_scorecard(),
            _ => {}
        }
    }

    fn handle_prompt_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Esc => self.prompt = None,
            KeyCode::Enter => self.commit_prompt(),
            KeyCode::Backspace => {
                if let Some(prompt) = &mut self.prompt {
                    prompt.buffer.pop();
                }
            }
            KeyCode::Char(ch) => {
                if let Some(prompt) = &mut self.prompt {
                    prompt.buffer.push(ch);
                }
            }
            _ => {}
        }
    }

    fn open_prompt(&mut self, kind: PromptKind) {
        let buffer = match &kind {
            PromptKind::Query => self.session.query().to_owned(),
            PromptKind::AddColumn => String::new(),
            PromptKind::EditCell { row, column } => self
                .session
                .scorecard()
                .rows()
                .get(*row)
                .map(|record| record.cell(column).to_string())
                .unwrap_or_default(),
            PromptKind::FilterDate => self.filters.date.clone(),
            PromptKind::FilterPosition => self.filters.position.clone(),
        };
        self.prompt = Some(Prompt { kind, buffer });
    }

    fn open_cell_prompt(&mut self) {
        let scorecard = self.session.scorecard();
        let Some(column) = scorecard.columns().names().get(self.cursor_col).cloned() else {
            return;
        };
        if self.cursor_row >= scorecard.rows().len() {
            return;
        }
        self.open_prompt(PromptKind::EditCell { row: self.cursor_row, column });
    }

    fn commit_prompt(&mut self) {
        let Some(prompt) = self.prompt.take() else {
            return;
        };
        match prompt.kind {
            PromptKind::Query => {
                let query = prompt.buffer.trim().to_owned();
                if query.is_empty() {
                    self.set_toast("Nothing to search for");
                } else {
                    self.dispatch_search(query);
                }
            }
            PromptKind::AddColumn => {
                self.apply_op(ScorecardOp::AddColumn { name: prompt.buffer });
            }
            PromptKind::EditCell { row, column } => {
                self.apply_op(ScorecardOp::EditCell {
                    row,
                    column,
                    value: CellValue::parse(&prompt.buffer),
                });
            }
            PromptKind::FilterDate => {
                self.filters.date = prompt.buffer.trim().to_owned();
                self.refresh_visible_cards();
            }
            PromptKind::FilterPosition => {
                self.filters.position = prompt.buffer.trim().to_owned();
                self.refresh_visible_cards();
            }
        }
    }

    fn cycle_focus(&mut self) {
        self.focus = match self.focus {
            Focus::Results if self.scorecard_visible => Focus::Scorecard,
            Focus::Results => Focus::Results,
            Focus::Scorecard => Focus::Results,
        };
    }

    fn set_view(&mut self, view: ViewMode) {
        self.session.set_view(view);
        self.clamp_results_cursor();
    }

    fn toggle_scorecard_visible(&mut self) {
        self.scorecard_visible = !self.scorecard_visible;
        if self.scorecard_visible {
            self.focus = Focus::Scorecard;
        } else {
            self.focus = Focus::Results;
        }
    }

    fn vertical_step(&self) -> i64 {
        match self.session.view() {
            ViewMode::Grid => GRID_COLUMNS as i64,
            ViewMode::List | ViewMode::Table => 1,
        }
    }

    fn result_count(&self) -> usize {
        match self.session.view() {
            ViewMode::Table => self.session.raw_records().len(),
            ViewMode::Grid | ViewMode::List => self.visible_cards.len(),
        }
    }

    fn move_selection(&mut self, delta: i64) {
        let count = self.result_count();
        if count == 0 {
            self.results_cursor = 0;
            return;
        }
        let current = self.results_cursor as i64;
        let next = (current + delta).clamp(0, count as i64 - 1);
        self.results_cursor = next as usize;
    }

    fn clamp_results_cursor(&mut self) {
        let count = self.result_count();
        if count == 0 {
            self.results_cursor = 0;
        } else if self.results_cursor >= count {
            self.results_cursor = count - 1;
        }
    }

    fn open_detail(&mut self) {
        let record_index = match self.session.view() {
            ViewMode::Table => Some(self.results_cursor),
            ViewMode::Grid | ViewMode::List => {
                self.visible_cards.get(self.results_cursor).copied()
            }
        };
        let Some(record_index) = record_index else {
            return;
        };
        if record_index >= self.session.raw_records().len() {
            return;
        }
        self.session.set_selected_record(Some(record_index));
        self.detail_open = true;
    }

    fn detail_card(&self) -> Option<PositionCard> {
        let index = self.session.selected_record()?;
        self.cards.get(index).cloned().or_else(|| {
            self.session.raw_records().get(index).map(PositionCard::from_record)
        })
    }

    fn rebuild_cards(&mut self) {
        self.cards = self
            .session
            .raw_records()
            .iter()
            .map(PositionCard::from_record)
            .collect();
        self.refresh_visible_cards();
    }

    fn refresh_visible_cards(&mut self) {
        self.visible_cards = self
            .cards
            .iter()
            .enumerate()
            .filter(|(_, card)| card_passes_filters(card, &self.filters))
            .map(|(index, _)| index)
            .collect();
        self.clamp_results_cursor();
    }

    fn cycle_hours_filter(&mut self) {
        self.filters.hours = HoursBucket::cycle(self.filters.hours);
        self.filters_visible = true;
        self.refresh_visible_cards();
    }

    fn clear_filters(&mut self) {
        self.filters = Filters::default();
        self.refresh_visible_cards();
    }

    fn apply_op(&mut self, op: ScorecardOp) {
        match ops::apply(self.session.scorecard_mut(), &op) {
            Ok(outcome) => {
                match &outcome {
                    OpOutcome::ColumnAdded { name } => self.set_toast(format!("Added column '{name}'")),
                    OpOutcome::ColumnRemoved { name } => {
                        self.set_toast(format!("Removed column '{name}'"))
                    }
                    OpOutcome::RowAdded { index } => {
                        self.cursor_row = *index;
                        self.set_toast("Added row");
                    }
                    OpOutcome::CellEdited { .. } => {}
                }
                self.clamp_scorecard_cursor();
            }
            Err(err) => self.notice = Some(err.to_string()),
        }
    }

    fn clamp_scorecard_cursor(&mut self) {
        let scorecard = self.session.scorecard();
        self.cursor_row = self.cursor_row.min(scorecard.rows().len().saturating_sub(1));
        self.cursor_col = self.cursor_col.min(scorecard.columns().len().saturating_sub(1));
    }

    fn remove_current_column(&mut self) {
        let Some(column) = self
            .session
            .scorecard()
            .columns()
            .names()
            .get(self.cursor_col)
            .cloned()
        else {
            return;
        };
        self.apply_op(ScorecardOp::RemoveColumn { name: column });
    }

    fn requery_from_scorecard(&mut self) {
        let blob = serialize_for_requery(self.session.scorecard());
        if blob.is_empty() {
            self.set_toast("Scorecard is empty");
            return;
        }
        self.dispatch_search(blob);
    }

    fn yank_scorecard(&mut self) {
        let blob = serialize_for_requery(self.session.scorecard());
        if blob.is_empty() {
            self.set_toast("Scorecard is empty");
            return;
        }
        match copy_to_clipboard(&blob) {
            Ok(message) => self.set_toast(message),
            Err(err) => self.set_toast(format!("Copy failed: {err}")),
        }
    }

    fn reset_session(&mut self, query: String) {
        let view = self.session.view();
        self.session = Session::new(query);
        self.session.set_view(view);
        self.cards.clear();
        self.visible_cards.clear();
        self.results_cursor = 0;
        self.cursor_row = 0;
        self.cursor_col = 0;
        self.detail_open = false;
        self.scorecard_visible = false;
        self.focus = Focus::Results;
    }

    fn dispatch_search(&mut self, query: String) {
        self.reset_session(query.clone());

        match &self.services {
            Some(services) => {
                let generation = self.sequencer.begin();
                self.in_flight = true;
                let client = services.client.clone();
                let reply_tx = self.reply_tx.clone();
                services.handle.spawn(async move {
                    let outcome = run_search(client, query).await;
                    let _ = reply_tx.send(Reply { generation, kind: ReplyKind::Search(outcome) });
                });
            }
            None => self.apply_demo_search(),
        }
    }

    fn dispatch_details(&mut self, term: String) {
        let Some(services) = &self.services else {
            return;
        };
        let generation = self.sequencer.begin();
        self.in_flight = true;
        let client = services.client.clone();
        let reply_tx = self.reply_tx.clone();
        services.handle.spawn(async move {
            let outcome = run_details(client, term).await;
            let _ = reply_tx.send(Reply { generation, kind: ReplyKind::Details(outcome) });
        });
    }

    fn dispatch_voice(&mut self, audio: Vec<u8>) {
        let Some(services) = &self.services else {
            return;
        };
        let generation = self.sequencer.begin();
        self.in_flight = true;
        let client = services.client.clone();
        let reply_tx = self.reply_tx.clone();
        services.handle.spawn(async move {
            let outcome = run_voice(client, audio).await;
            let _ = reply_tx.send(Reply { generation, kind: ReplyKind::Voice(outcome) });
        });
    }

    fn toggle_recording(&mut self) {
        if let Some(recording) = self.recording.take() {
            match recording.stop() {
                Ok(bytes) => {
                    self.set_toast("Uploading recording…");
                    self.dispatch_voice(bytes);
                }
                Err(err) => self.notice = Some(err.to_string()),
            }
            return;
        }

        let Some(services) = &self.services else {
            self.set_toast("Voice capture needs a live service");
            return;
        };
        match services.recorder.start() {
            Ok(recording) => {
                self.recording = Some(recording);
                self.set_toast("Recording — press v to stop");
            }
            Err(err) => self.notice = Some(err.to_string()),
        }
    }

    fn poll_replies(&mut self) {
        while let Ok(reply) = self.reply_rx.try_recv() {
            if !self.sequencer.is_current(reply.generation) {
                // A newer search superseded this reply; drop it.
                continue;
            }
            match reply.kind {
                ReplyKind::Search(outcome) => self.apply_search_outcome(outcome),
                ReplyKind::Details(outcome) => self.apply_detail_outcome(outcome),
                ReplyKind::Voice(outcome) => self.apply_voice_outcome(outcome),
            }
        }
    }

    fn apply_search_outcome(&mut self, outcome: SearchOutcome) {
        self.in_flight = false;
        self.session.set_message(outcome.error.or(outcome.message));
        if let Some(scorecard) = outcome.scorecard {
            self.session.set_scorecard(scorecard);
            self.scorecard_visible = !self.session.scorecard().is_empty();
            self.cursor_row = 0;
            self.cursor_col = 0;
        }
        self.session.set_raw_records(outcome.records);
        self.rebuild_cards();
    }

    fn apply_detail_outcome(&mut self, outcome: DetailOutcome) {
        self.in_flight = false;
        if let Some(error) = outcome.error {
            self.session.set_message(Some(error));
            if outcome.clear_scorecard {
                self.session.set_scorecard(Scorecard::default());
                self.scorecard_visible = false;
            }
        }
        self.session.set_raw_records(outcome.records);
        self.rebuild_cards();
    }

    fn apply_voice_outcome(&mut self, outcome: VoiceOutcome) {
        self.in_flight = false;
        if let Some(error) = outcome.error {
            self.session.set_message(Some(error));
            return;
        }

        if !outcome.transcription.is_empty() {
            self.reset_session(outcome.transcription.clone());
        }
        if let Some(scorecard) = outcome.scorecard {
            self.session.set_scorecard(scorecard);
            self.scorecard_visible = !self.session.scorecard().is_empty();
        }
        if !outcome.transcription.is_empty() {
            self.dispatch_details(outcome.transcription);
        }
    }

    fn apply_demo_search(&mut self) {
        self.session.set_scorecard(reconcile(&fixtures::demo_response()));
        self.session.set_raw_records(fixtures::demo_records());
        self.scorecard_visible = true;
        self.rebuild_cards();
        self.set_toast("Demo mode: canned results");
    }

    fn set_toast(&mut self, message: impl Into<String>) {
        self.toast = Some(Toast {
            message: message.into(),
            expires_at: Instant::now() + TOAST_TTL,
        });
    }
}

struct TerminalSession {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
}

impl TerminalSession {
    fn new() -> Result<Self, Box<dyn Error>> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;
        Ok(Self { terminal })
    }

    fn draw(&mut self, draw_fn: impl FnOnce(&mut Frame<'_>)) -> io::Result<()> {
        self.terminal.draw(draw_fn)?;
        Ok(())
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        teardown_terminal();
    }
}

fn teardown_terminal() {
    let _ = disable_raw_mode();
    let _ = execute!(io::stdout(), LeaveAlternateScreen);
}

fn copy_to_clipboard(text: &str) -> Result<&'static str, String> {
    use std::io::Write as _;
    let sequence = osc52_sequence(text);
    let mut stdout = io::stdout();
    stdout.write_all(sequence.as_bytes()).map_err(|err| err.to_string())?;
    stdout.flush().map_err(|err| err.to_string())?;
    Ok("Copied scorecard (OSC52)")
}

fn osc52_sequence(text: &str) -> String {
    use base64::engine::general_purpose::STANDARD;
    use base64::Engine as _;
    format!("\x1b]52;c;{}\x07", STANDARD.encode(text))
}
