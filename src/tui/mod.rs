// src/tui/mod.rs
use crate::portfolio::session::SessionState;
use crate::portfolio::tracker::PortfolioTracker;
use crate::types::{PortfolioReport, PortfolioRow, UiEvent};
use crate::utils::precision::{format_money, format_pct};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, List, ListItem, Paragraph, Row, Table, Wrap},
    Terminal,
};
use rust_decimal::Decimal;
use std::{io, time::Duration};
use tracing::error;

const MAX_LOGS: usize = 20;

type Term = Terminal<CrosstermBackend<io::Stdout>>;

pub struct App {
    pub currency: String,
    pub capital: Decimal,
    pub source_name: String,
    pub report: Option<PortfolioReport>,
    pub error: Option<String>,
    pub refreshing: bool,
    pub logs: Vec<String>,
}

impl App {
    pub fn new(currency: String, capital: Decimal, source_name: String) -> Self {
        Self {
            currency,
            capital,
            source_name,
            report: None,
            error: None,
            refreshing: false,
            logs: Vec::new(),
        }
    }

    pub fn on_event(&mut self, event: UiEvent) {
        match event {
            UiEvent::Refreshing => {
                self.refreshing = true;
            }
            UiEvent::Refreshed(report) => {
                self.refreshing = false;
                self.error = None;
                self.push_log(format!(
                    "Refreshed: value {} ({})",
                    format_money(report.summary.total_current_value, &self.currency, 0),
                    format_pct(report.summary.mean_pnl_pct)
                ));
                self.report = Some(report);
            }
            // A failed refresh must not leave the previous table on screen.
            UiEvent::Failed(msg) => {
                self.refreshing = false;
                self.report = None;
                self.push_log(format!("Refresh failed: {}", msg));
                self.error = Some(msg);
            }
            UiEvent::Log(msg) => self.push_log(msg),
        }
    }

    fn push_log(&mut self, msg: String) {
        let stamp = chrono::Local::now().format("%H:%M:%S");
        self.logs.push(format!("[{}] {}", stamp, msg));
        if self.logs.len() > MAX_LOGS {
            self.logs.remove(0);
        }
    }
}

pub async fn run(tracker: PortfolioTracker, currency: String) -> anyhow::Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(
        currency,
        tracker.capital(),
        tracker.source_name().to_string(),
    );
    let mut session = SessionState::default();

    let result = event_loop(&mut terminal, &mut app, &tracker, &mut session).await;

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

async fn event_loop(
    terminal: &mut Term,
    app: &mut App,
    tracker: &PortfolioTracker,
    session: &mut SessionState,
) -> anyhow::Result<()> {
    app.on_event(UiEvent::Log(format!(
        "Session started, buying at {} prices",
        app.source_name
    )));
    refresh(terminal, app, tracker, session).await?;

    loop {
        terminal.draw(|f| ui(f, app))?;

        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                match key.code {
                    KeyCode::Char('q') | KeyCode::Esc => break,
                    KeyCode::Char('r') => refresh(terminal, app, tracker, session).await?,
                    _ => {}
                }
            }
        }
    }

    Ok(())
}

/// Runs one full pipeline pass; key presses wait until it finishes.
async fn refresh(
    terminal: &mut Term,
    app: &mut App,
    tracker: &PortfolioTracker,
    session: &mut SessionState,
) -> anyhow::Result<()> {
    app.on_event(UiEvent::Refreshing);
    terminal.draw(|f| ui(f, app))?;

    let event = match tracker.refresh(session).await {
        Ok(report) => UiEvent::Refreshed(report),
        Err(e) => {
            error!("Refresh failed: {}", e);
            UiEvent::Failed(e.to_string())
        }
    };
    app.on_event(event);
    Ok(())
}

fn ui(f: &mut ratatui::Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints(
            [
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Min(6),
                Constraint::Length(8),
                Constraint::Length(1),
            ]
            .as_ref(),
        )
        .split(f.size());

    render_header(f, app, chunks[0]);
    render_metrics(f, app, chunks[1]);

    match (&app.report, &app.error) {
        (_, Some(err)) => render_error(f, err, chunks[2]),
        (Some(report), None) => render_table(f, app, report, chunks[2]),
        (None, None) => {
            let waiting = Paragraph::new("Fetching prices...")
                .block(Block::default().borders(Borders::ALL).title("Portfolio"));
            f.render_widget(waiting, chunks[2]);
        }
    }

    let logs: Vec<ListItem> = app
        .logs
        .iter()
        .rev()
        .map(|s| ListItem::new(Line::from(Span::raw(s))))
        .collect();
    let logs_list = List::new(logs).block(Block::default().borders(Borders::ALL).title("Activity"));
    f.render_widget(logs_list, chunks[3]);

    let footer = Paragraph::new(Line::from(vec![
        Span::styled("[r] Refresh live prices  [q] Quit", Style::default().fg(Color::Cyan)),
        Span::raw(format!(
            "  |  Live prices update every minute from {}. Refresh to update.",
            app.source_name
        )),
    ]));
    f.render_widget(footer, chunks[4]);
}

fn render_header(f: &mut ratatui::Frame, app: &App, area: Rect) {
    let bought_at = match &app.report {
        Some(report) => report.taken_at.format("%Y-%m-%d %H:%M:%S").to_string(),
        None => "not yet".to_string(),
    };
    let status = if app.refreshing {
        Span::styled(" | Refreshing...", Style::default().fg(Color::Yellow))
    } else {
        Span::raw("")
    };

    let header = Paragraph::new(Line::from(vec![
        Span::styled(
            "Live Portfolio Tracker (Demo)",
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw(" | Stocks bought at: "),
        Span::styled(bought_at, Style::default().fg(Color::Yellow)),
        status,
    ]))
    .block(Block::default().borders(Borders::ALL).title("Status"));
    f.render_widget(header, area);
}

fn render_metrics(f: &mut ratatui::Frame, app: &App, area: Rect) {
    let mut spans = vec![
        Span::raw("Total Virtual Capital: "),
        Span::styled(
            format_money(app.capital, &app.currency, 0),
            Style::default().add_modifier(Modifier::BOLD),
        ),
    ];

    if let Some(report) = &app.report {
        let summary = &report.summary;
        spans.extend([
            Span::raw("   Invested: "),
            Span::styled(
                format_money(summary.total_invested, &app.currency, 0),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::raw("   Current Value: "),
            Span::styled(
                format_money(summary.total_current_value, &app.currency, 0),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::raw("   Total P&L: "),
            Span::styled(
                format!(
                    "{} ({})",
                    format_money(summary.total_pnl_abs, &app.currency, 2),
                    format_pct(summary.mean_pnl_pct)
                ),
                pnl_style(summary.total_pnl_abs).add_modifier(Modifier::BOLD),
            ),
        ]);
    }

    let metrics =
        Paragraph::new(Line::from(spans)).block(Block::default().borders(Borders::ALL).title("Summary"));
    f.render_widget(metrics, area);
}

fn render_table(f: &mut ratatui::Frame, app: &App, report: &PortfolioReport, area: Rect) {
    let header = Row::new(
        [
            "Ticker",
            "Buy Price",
            "Quantity",
            "Invested",
            "Live Price",
            "Current Value",
            "P&L",
            "P&L (%)",
        ]
        .into_iter()
        .map(Cell::from),
    )
    .style(Style::default().add_modifier(Modifier::BOLD));

    let rows: Vec<Row> = report
        .rows
        .iter()
        .map(|row| table_row(row, &app.currency))
        .collect();

    let widths = [
        Constraint::Length(12),
        Constraint::Length(12),
        Constraint::Length(9),
        Constraint::Length(14),
        Constraint::Length(12),
        Constraint::Length(15),
        Constraint::Length(13),
        Constraint::Length(9),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .block(Block::default().borders(Borders::ALL).title("Portfolio"));
    f.render_widget(table, area);
}

fn table_row<'a>(row: &PortfolioRow, currency: &str) -> Row<'a> {
    let style = pnl_style(row.pnl_abs);
    Row::new(vec![
        Cell::from(row.allocation.symbol.clone()),
        Cell::from(format_money(row.allocation.buy_price, currency, 2)),
        Cell::from(row.allocation.quantity.to_string()),
        Cell::from(format_money(row.allocation.invested, currency, 2)),
        Cell::from(format_money(row.live_price, currency, 2)),
        Cell::from(format_money(row.current_value, currency, 2)),
        Cell::from(format_money(row.pnl_abs, currency, 2)).style(style),
        Cell::from(format_pct(row.pnl_pct)).style(style),
    ])
}

fn render_error(f: &mut ratatui::Frame, err: &str, area: Rect) {
    let text = vec![
        Line::from(Span::styled(
            "Could not refresh the portfolio",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::raw(err.to_string())),
        Line::from(Span::raw("Press [r] to try again.")),
    ];
    let panel = Paragraph::new(text)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title("Error"));
    f.render_widget(panel, area);
}

fn pnl_style(pnl: Decimal) -> Style {
    if pnl < Decimal::ZERO {
        Style::default().fg(Color::Red)
    } else {
        Style::default().fg(Color::Green)
    }
}
