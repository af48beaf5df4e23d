//! App state and main loop: input, pushed snapshots, cleanup requests and drawing.

use std::{
    io,
    time::{Duration, Instant},
};

use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    Terminal,
};
use tokio::sync::mpsc;
use tokio::time::sleep;
use tracing::{info, warn};

use crate::api::{ApiError, CleanupClient, CleanupResponse};
use crate::cleanup::CleanupController;
use crate::config::Endpoints;
use crate::dispatch::Dispatcher;
use crate::render::{ElementId, Panel, RenderTarget, Screen};
use crate::types::Snapshot;
use crate::ui::{
    cache::draw_cache,
    chart::draw_trend,
    cpu::{draw_cpu_card, draw_per_core_bars},
    disks::draw_disks,
    draw_hidden,
    header::draw_header,
    logs::draw_logs,
    mem::{draw_disk_card, draw_memory_card},
    net::draw_net,
    panel_key,
    processes::draw_processes,
    table::scroll_handle_key,
    theme::{CPU_LINE, MEM_LINE},
    toast::draw_toast,
};
use crate::ws;

const RECONNECT_DELAY: Duration = Duration::from_secs(2);
const TOAST_FOR: Duration = Duration::from_secs(5);
const TICK: Duration = Duration::from_millis(100);
const TABS: [&str; 3] = ["1 Overview", "2 Storage", "3 Activity"];

/// What the push task reports to the event loop.
#[derive(Debug)]
pub enum Push {
    Connected,
    Snapshot(Box<Snapshot>),
    Disconnected,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Link {
    Connecting,
    Live,
    Retrying,
}

pub struct App {
    screen: Screen,
    dispatcher: Dispatcher,
    cleanup: CleanupController,
    client: CleanupClient,
    endpoints: Endpoints,

    link: Link,
    toast_until: Option<Instant>,
    tab: usize,
    procs_scroll: usize,
    last_procs_area: Option<Rect>,

    cleanup_tx: mpsc::Sender<Result<CleanupResponse, ApiError>>,
    cleanup_rx: mpsc::Receiver<Result<CleanupResponse, ApiError>>,

    // Quit flag
    should_quit: bool,
}

impl App {
    pub fn new(endpoints: Endpoints, hidden: &[Panel]) -> anyhow::Result<Self> {
        let mut screen = Screen::new(hidden);
        let dispatcher = Dispatcher::new(&screen);
        let cleanup = CleanupController::new();
        cleanup.sync(&mut screen);
        let client = CleanupClient::new(endpoints.cleanup.clone())?;
        let (cleanup_tx, cleanup_rx) = mpsc::channel(4);
        Ok(Self {
            screen,
            dispatcher,
            cleanup,
            client,
            endpoints,
            link: Link::Connecting,
            toast_until: None,
            tab: 0,
            procs_scroll: 0,
            last_procs_area: None,
            cleanup_tx,
            cleanup_rx,
            should_quit: false,
        })
    }

    pub async fn run(&mut self) -> anyhow::Result<()> {
        let (push_tx, mut push_rx) = mpsc::channel(16);
        let pump = tokio::spawn(pump(self.endpoints.socket.to_string(), push_tx));

        // Terminal setup
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;
        terminal.clear()?;

        // Main loop
        let res = self.event_loop(&mut terminal, &mut push_rx).await;

        // Teardown
        pump.abort();
        disable_raw_mode()?;
        let backend = terminal.backend_mut();
        execute!(backend, LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        res
    }

    async fn event_loop<B: ratatui::backend::Backend>(
        &mut self,
        terminal: &mut Terminal<B>,
        push_rx: &mut mpsc::Receiver<Push>,
    ) -> anyhow::Result<()> {
        loop {
            // Input (non-blocking)
            while event::poll(Duration::from_millis(10))? {
                match event::read()? {
                    // Windows also reports releases
                    Event::Key(k) if k.kind == KeyEventKind::Press => self.handle_key(k),
                    _ => {}
                }
            }
            if self.should_quit {
                break;
            }

            // Every queued snapshot is applied in arrival order.
            while let Ok(push) = push_rx.try_recv() {
                self.apply_push(push);
            }
            while let Ok(outcome) = self.cleanup_rx.try_recv() {
                self.cleanup.finish(outcome, &mut self.screen);
                self.toast_until = Some(Instant::now() + TOAST_FOR);
            }
            if self.toast_until.is_some_and(|t| Instant::now() >= t) {
                self.screen.set_visible(ElementId::Toast, false);
                self.toast_until = None;
            }

            // Draw
            terminal.draw(|f| self.draw(f))?;

            // Tick rate
            sleep(TICK).await;
        }

        Ok(())
    }

    pub fn apply_push(&mut self, push: Push) {
        match push {
            Push::Connected => self.link = Link::Live,
            Push::Snapshot(s) => {
                self.link = Link::Live;
                self.dispatcher.on_snapshot(&s, &mut self.screen);
            }
            Push::Disconnected => self.link = Link::Retrying,
        }
    }

    fn handle_key(&mut self, k: KeyEvent) {
        match k.code {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Char(c @ '1'..='3') => self.tab = (c as usize) - ('1' as usize),
            KeyCode::Tab => self.tab = (self.tab + 1) % TABS.len(),
            KeyCode::Char('c') => self.start_cleanup(),
            KeyCode::Char('b') => self.cleanup.back(&mut self.screen),
            KeyCode::F(n) => {
                if let Some(panel) = Panel::ALL.into_iter().find(|p| panel_key(*p) == n) {
                    self.toggle_panel(panel);
                }
            }
            _ => {
                if let Some(p_area) = self.last_procs_area {
                    // page size = visible rows (inner height minus header = 1)
                    let page = p_area.height.saturating_sub(3).max(1) as usize;
                    scroll_handle_key(&mut self.procs_scroll, k, page);
                    let max = self
                        .screen
                        .rows(ElementId::ProcessTable)
                        .len()
                        .saturating_sub(page);
                    self.procs_scroll = self.procs_scroll.min(max);
                }
            }
        }
    }

    fn start_cleanup(&mut self) {
        if !self.screen.contains(ElementId::CleanButton) {
            return;
        }
        if !self.cleanup.begin(&mut self.screen) {
            info!("cache cleanup already in progress");
            return;
        }
        info!("requesting cache cleanup at {}", self.client.endpoint());
        let client = self.client.clone();
        let tx = self.cleanup_tx.clone();
        tokio::spawn(async move {
            let outcome = client.clean_cache().await;
            let _ = tx.send(outcome).await;
        });
    }

    fn toggle_panel(&mut self, panel: Panel) {
        if self.screen.is_attached(panel) {
            self.screen.detach(panel);
        } else {
            self.screen.attach(panel);
            if panel == Panel::Cache {
                self.cleanup.sync(&mut self.screen);
            }
        }
    }

    fn status(&self) -> String {
        let host = self.endpoints.socket.host_str().unwrap_or("?");
        match self.link {
            Link::Connecting => format!("connecting to {host}"),
            Link::Live => format!("live: {host}"),
            Link::Retrying => "disconnected, retrying...".into(),
        }
    }

    pub fn draw(&mut self, f: &mut ratatui::Frame<'_>) {
        let area = f.area();
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Min(0)])
            .split(area);

        draw_header(f, rows[0], &self.screen, &self.status(), &TABS, self.tab);
        match self.tab {
            0 => self.draw_overview(f, rows[1]),
            1 => self.draw_storage(f, rows[1]),
            _ => self.draw_activity(f, rows[1]),
        }
        draw_toast(f, area, &self.screen);
    }

    fn panel(
        &self,
        f: &mut ratatui::Frame<'_>,
        area: Rect,
        panel: Panel,
        draw: impl FnOnce(&mut ratatui::Frame<'_>, Rect, &Screen),
    ) {
        if self.screen.is_attached(panel) {
            draw(f, area, &self.screen);
        } else {
            draw_hidden(f, area, panel);
        }
    }

    fn draw_overview(&self, f: &mut ratatui::Frame<'_>, area: Rect) {
        // gauges, history charts, network + per-core
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(6),
                Constraint::Percentage(50),
                Constraint::Min(8),
            ])
            .split(area);
        let cards = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Ratio(1, 3); 3])
            .split(rows[0]);
        self.panel(f, cards[0], Panel::Cpu, draw_cpu_card);
        self.panel(f, cards[1], Panel::Memory, draw_memory_card);
        self.panel(f, cards[2], Panel::Disk, draw_disk_card);

        let charts = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50); 2])
            .split(rows[1]);
        self.panel(f, charts[0], Panel::Cpu, |f, a, s| {
            draw_trend(f, a, s, ElementId::CpuChart, "CPU Usage (%)", &[CPU_LINE])
        });
        self.panel(f, charts[1], Panel::Memory, |f, a, s| {
            draw_trend(f, a, s, ElementId::MemoryChart, "Memory Usage (%)", &[MEM_LINE])
        });

        let bottom = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(66), Constraint::Percentage(34)])
            .split(rows[2]);
        self.panel(f, bottom[0], Panel::Network, draw_net);
        self.panel(f, bottom[1], Panel::Cpu, draw_per_core_bars);
    }

    fn draw_storage(&self, f: &mut ratatui::Frame<'_>, area: Rect) {
        let height = volume_table_height(self.screen.rows(ElementId::DiskTable).len());
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(height), Constraint::Min(8)])
            .split(area);
        self.panel(f, rows[0], Panel::Disk, draw_disks);
        self.panel(f, rows[1], Panel::Cache, draw_cache);
    }

    fn draw_activity(&mut self, f: &mut ratatui::Frame<'_>, area: Rect) {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(area);
        // Cache for input handlers
        self.last_procs_area = Some(rows[0]);
        let scroll = self.procs_scroll;
        self.panel(f, rows[0], Panel::Processes, |f, a, s| draw_processes(f, a, s, scroll));
        self.panel(f, rows[1], Panel::Logs, |f, a, s| draw_logs(f, a, s, 0));
    }
}

// borders (2) + header (1)
fn volume_table_height(volumes: usize) -> u16 {
    u16::try_from(volumes).unwrap_or(u16::MAX).saturating_add(3)
}

/// Owns the socket: reconnects after `RECONNECT_DELAY` and forwards every snapshot.
async fn pump(url: String, tx: mpsc::Sender<Push>) {
    loop {
        match ws::connect(&url).await {
            Ok(mut stream) => {
                if tx.send(Push::Connected).await.is_err() {
                    return;
                }
                loop {
                    match ws::next_snapshot(&mut stream).await {
                        Ok(Some(s)) => {
                            if tx.send(Push::Snapshot(Box::new(s))).await.is_err() {
                                return;
                            }
                        }
                        Ok(None) => {
                            info!("server closed the channel");
                            break;
                        }
                        Err(e) => {
                            warn!("push channel error: {e}");
                            break;
                        }
                    }
                }
            }
            Err(e) => warn!("connect to {url} failed: {e}"),
        }
        if tx.send(Push::Disconnected).await.is_err() {
            return;
        }
        sleep(RECONNECT_DELAY).await;
    }
}
