//! Interactive simulator for the install-prompt controller.
//!
//! Plays the role of the host runtime: fires the native install signal,
//! forwards user actions, invokes captured handles, and renders the
//! controller's declarative view as terminal overlays. Useful for
//! eyeballing the policy without a browser.

use std::io;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Frame;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use install_nudge::{
    Command, Controller, DeferredInstall, EnvironmentInfo, EnvironmentSignals, FileCooldownStore,
    InstallError, InstallOutcome, MemoryCooldownStore, Msg, PromptConfig, Surface,
};

/// Canned user agents the simulator can cycle through.
const PROFILES: &[(&str, &str)] = &[
    (
        "Android / Chrome",
        "Mozilla/5.0 (Linux; Android 14; Pixel 8) AppleWebKit/537.36 \
         (KHTML, like Gecko) Chrome/120.0.0.0 Mobile Safari/537.36",
    ),
    (
        "iPhone / Safari",
        "Mozilla/5.0 (iPhone; CPU iPhone OS 17_0 like Mac OS X) AppleWebKit/605.1.15 \
         (KHTML, like Gecko) Version/17.0 Mobile/15E148 Safari/604.1",
    ),
    (
        "Windows / Edge",
        "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
         (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36 Edg/120.0.0.0",
    ),
    (
        "macOS / Safari",
        "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/605.1.15 \
         (KHTML, like Gecko) Version/17.0 Safari/605.1.15",
    ),
    (
        "Linux / Firefox",
        "Mozilla/5.0 (X11; Linux x86_64; rv:121.0) Gecko/20100101 Firefox/121.0",
    ),
    ("Unknown device", "CustomAgent/1.0"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SimOutcome {
    Accept,
    Decline,
    Fail,
}

impl SimOutcome {
    fn next(self) -> Self {
        match self {
            SimOutcome::Accept => SimOutcome::Decline,
            SimOutcome::Decline => SimOutcome::Fail,
            SimOutcome::Fail => SimOutcome::Accept,
        }
    }

    fn label(self) -> &'static str {
        match self {
            SimOutcome::Accept => "accept",
            SimOutcome::Decline => "decline",
            SimOutcome::Fail => "error",
        }
    }
}

/// Stand-in for a captured `beforeinstallprompt` handle.
#[derive(Debug)]
struct SimulatedInstall {
    outcome: SimOutcome,
}

impl DeferredInstall for SimulatedInstall {
    fn invoke(self: Box<Self>) -> Result<InstallOutcome, InstallError> {
        match self.outcome {
            SimOutcome::Accept => Ok(InstallOutcome::Accepted),
            SimOutcome::Decline => Ok(InstallOutcome::Declined),
            SimOutcome::Fail => Err(InstallError::Outcome(
                "simulated userChoice rejection".to_string(),
            )),
        }
    }
}

enum SimEvent {
    Input(Event),
    Tick,
}

fn main() -> Result<()> {
    // Initialize logging to file (never stdout)
    let log_dir = directories::ProjectDirs::from("", "", "install-nudge")
        .map(|d| d.data_dir().to_path_buf())
        .unwrap_or_else(|| std::path::PathBuf::from("/tmp"));
    std::fs::create_dir_all(&log_dir)?;

    let file_appender = tracing_appender::rolling::daily(&log_dir, "install-nudge.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_env_filter("install_nudge=info")
        .init();

    tracing::info!("nudge-sim starting");

    let config = PromptConfig::load()?;

    // Terminal setup
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run(&mut terminal, config);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(e) = result {
        eprintln!("nudge-sim error: {e:?}");
    }

    Ok(())
}

fn run(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, config: PromptConfig) -> Result<()> {
    let (tx, rx) = mpsc::channel::<SimEvent>();
    let mut sim = Sim::new(config);

    // Input thread — reads terminal events
    let tx_input = tx.clone();
    thread::spawn(move || {
        loop {
            if let Ok(evt) = event::read()
                && tx_input.send(SimEvent::Input(evt)).is_err()
            {
                break;
            }
        }
    });

    // Tick thread — 50ms periodic tick for deadline checks
    thread::spawn(move || {
        loop {
            thread::sleep(Duration::from_millis(50));
            if tx.send(SimEvent::Tick).is_err() {
                break;
            }
        }
    });

    // ── Main event loop ──
    loop {
        // Batch-drain all pending events
        let first = rx.recv()?;
        sim.handle_event(first)?;

        while let Ok(evt) = rx.try_recv() {
            sim.handle_event(evt)?;
        }

        if sim.should_quit {
            break;
        }

        terminal.draw(|f| sim.view(f))?;
    }

    Ok(())
}

struct Sim {
    controller: Controller,
    config: PromptConfig,
    profile: usize,
    standalone: bool,
    next_outcome: SimOutcome,
    should_quit: bool,
}

impl Sim {
    fn new(config: PromptConfig) -> Self {
        Self {
            controller: build_controller(&config, 0, false),
            config,
            profile: 0,
            standalone: false,
            next_outcome: SimOutcome::Accept,
            should_quit: false,
        }
    }

    /// Simulate a fresh page load: re-detect the environment, re-run
    /// the policy over the same durable store.
    fn reload(&mut self) {
        self.controller = build_controller(&self.config, self.profile, self.standalone);
    }

    fn handle_event(&mut self, evt: SimEvent) -> Result<()> {
        match evt {
            SimEvent::Tick => self.controller.update(Msg::Tick)?,
            SimEvent::Input(Event::Key(key)) => self.handle_key(key)?,
            SimEvent::Input(_) => {}
        }
        self.drain_commands()?;
        Ok(())
    }

    fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('b') => {
                self.controller
                    .update(Msg::InstallAvailable(Box::new(SimulatedInstall {
                        outcome: self.next_outcome,
                    })))?;
            }
            KeyCode::Char('o') => self.next_outcome = self.next_outcome.next(),
            KeyCode::Char('i') | KeyCode::Enter => self.controller.update(Msg::Accept)?,
            KeyCode::Char('l') => self.controller.update(Msg::Dismiss)?,
            KeyCode::Esc => self.controller.update(Msg::CloseInstructions)?,
            KeyCode::Char('u') => {
                self.profile = (self.profile + 1) % PROFILES.len();
                self.reload();
            }
            KeyCode::Char('s') => {
                self.standalone = !self.standalone;
                self.reload();
            }
            KeyCode::Char('r') => self.reload(),
            _ => {}
        }
        Ok(())
    }

    /// Play the host's part: invoke handed-over handles and report the
    /// outcome back as a message.
    fn drain_commands(&mut self) -> Result<()> {
        while let Some(Command::InvokeNative(handle)) = self.controller.next_command() {
            let outcome = handle.invoke();
            self.controller.update(Msg::NativeOutcome(outcome))?;
        }
        Ok(())
    }

    // ── Rendering ────────────────────────────────────────────────

    fn view(&self, frame: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // key hints
                Constraint::Min(1),    // body
                Constraint::Length(1), // status bar
            ])
            .split(frame.area());

        self.render_hints(frame, chunks[0]);
        self.render_body(frame, chunks[1]);
        self.render_status_bar(frame, chunks[2]);

        let view = self.controller.view();
        match view.surface {
            Surface::None => {}
            Surface::Modal(modal) => {
                let area = centered_rect(60, 50, frame.area());
                frame.render_widget(Clear, area);

                let lines = vec![
                    Line::from(Span::styled(
                        modal.headline,
                        Style::default()
                            .fg(Color::Cyan)
                            .add_modifier(Modifier::BOLD),
                    )),
                    Line::from(""),
                    Line::from(Span::styled(modal.body, Style::default().fg(Color::Gray))),
                    Line::from(""),
                    Line::from(vec![
                        Span::styled(
                            format!("[{} (i/Enter)]", modal.install_label),
                            Style::default()
                                .fg(Color::Black)
                                .bg(Color::Cyan)
                                .add_modifier(Modifier::BOLD),
                        ),
                        Span::raw("  "),
                        Span::styled(
                            format!("[{} (l)]", modal.later_label),
                            Style::default().fg(Color::DarkGray),
                        ),
                    ]),
                ];

                let widget = Paragraph::new(lines).wrap(Wrap { trim: true }).block(
                    Block::default()
                        .title(format!(" Install · {} ", modal.browser_name))
                        .borders(Borders::ALL)
                        .style(Style::default().bg(Color::Rgb(15, 15, 24))),
                );
                frame.render_widget(widget, area);
            }
            Surface::Instructions(steps) => {
                let area = centered_rect(60, 60, frame.area());
                frame.render_widget(Clear, area);

                let mut lines = vec![
                    Line::from(Span::styled(
                        steps.lead_in,
                        Style::default().fg(Color::Gray),
                    )),
                    Line::from(""),
                ];
                for (idx, step) in steps.steps.iter().enumerate() {
                    lines.push(Line::from(vec![
                        Span::styled(
                            format!(" {} ", idx + 1),
                            Style::default().fg(Color::Black).bg(Color::Cyan),
                        ),
                        Span::raw(" "),
                        Span::styled(*step, Style::default().fg(Color::Gray)),
                    ]));
                }
                lines.push(Line::from(""));
                lines.push(Line::from(Span::styled(
                    "Esc: close",
                    Style::default().fg(Color::DarkGray),
                )));

                let widget = Paragraph::new(lines).wrap(Wrap { trim: true }).block(
                    Block::default()
                        .title(format!(" {} ", steps.title))
                        .borders(Borders::ALL)
                        .style(Style::default().bg(Color::Rgb(15, 15, 24))),
                );
                frame.render_widget(widget, area);
            }
        }

        if let Some(toast) = view.toast {
            let area = frame.area();
            let width = 40.min(area.width);
            let toast_area = Rect::new(area.width.saturating_sub(width + 2), 1, width, 4);
            frame.render_widget(Clear, toast_area);

            let widget = Paragraph::new(vec![
                Line::from(Span::styled(
                    toast.title,
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD),
                )),
                Line::from(Span::styled(toast.body, Style::default().fg(Color::Gray))),
            ])
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .style(Style::default().bg(Color::Rgb(12, 24, 12))),
            );
            frame.render_widget(widget, toast_area);
        }
    }

    fn render_hints(&self, frame: &mut Frame, area: Rect) {
        let hints = Paragraph::new(Line::from(Span::styled(
            " b: fire install signal  o: cycle signal outcome  u: cycle device  \
             s: toggle standalone  r: reload page  q: quit ",
            Style::default()
                .bg(Color::Rgb(20, 20, 30))
                .fg(Color::DarkGray),
        )))
        .style(Style::default().bg(Color::Rgb(20, 20, 30)));
        frame.render_widget(hints, area);
    }

    fn render_body(&self, frame: &mut Frame, area: Rect) {
        let env = self.controller.environment();
        let (profile_label, user_agent) = PROFILES[self.profile];

        let lines = vec![
            Line::from(""),
            Line::from(Span::styled(
                "  nudge-sim — host runtime stand-in",
                Style::default()
                    .fg(Color::Magenta)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(format!("  device profile : {profile_label}")),
            Line::from(format!("  user agent     : {user_agent}")),
            Line::from(format!(
                "  detected       : {} / {}",
                env.platform.display_name(),
                env.browser.name()
            )),
            Line::from(format!("  standalone     : {}", env.is_standalone)),
            Line::from(format!(
                "  native handle  : {}",
                if self.controller.holds_native_handle() {
                    "held"
                } else {
                    "none"
                }
            )),
            Line::from(format!(
                "  next signal    : resolves \"{}\"",
                self.next_outcome.label()
            )),
        ];

        let body = Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .style(Style::default().fg(Color::Gray));
        frame.render_widget(body, area);
    }

    fn render_status_bar(&self, frame: &mut Frame, area: Rect) {
        let phase_span = Span::styled(
            format!(" {} ", self.controller.phase().label()),
            Style::default()
                .fg(Color::Black)
                .bg(Color::Magenta)
                .add_modifier(Modifier::BOLD),
        );
        let info = Span::styled(
            format!(
                " cooldown {}h · delay {}ms ",
                self.config.prompt.cooldown_hours, self.config.prompt.show_delay_ms
            ),
            Style::default().fg(Color::Gray).bg(Color::DarkGray),
        );

        let bar = Paragraph::new(Line::from(vec![phase_span, info]))
            .style(Style::default().bg(Color::DarkGray));
        frame.render_widget(bar, area);
    }
}

fn build_controller(config: &PromptConfig, profile: usize, standalone: bool) -> Controller {
    let mut signals = EnvironmentSignals::browser_tab(PROFILES[profile].1);
    signals.display_mode_standalone = standalone;
    let env = EnvironmentInfo::detect(&signals);

    let store: Box<dyn install_nudge::CooldownStore> = match FileCooldownStore::open_default() {
        Ok(store) => Box::new(store),
        Err(err) => {
            tracing::warn!("durable cooldown store unavailable, using memory: {err}");
            Box::new(MemoryCooldownStore::new())
        }
    };

    Controller::new(config.clone(), env, store)
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
