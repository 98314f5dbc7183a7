use std::io::stdout;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{self, DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use ratatui::DefaultTerminal;

use crate::app::{App, Message, Model, update};
use crate::protocol::ScrollDirection;
use crate::transport::GestureLink;

/// Longest the loop blocks on terminal input before checking the backend.
const INPUT_POLL_MS: u64 = 10;

/// Repeating scroll timer owned by the event loop.
///
/// Runs while the scroll direction is `Up` or `Down`, restarts whenever
/// the direction changes, and stops on `Stop`. Time is milliseconds since
/// loop start.
#[derive(Debug, Clone)]
pub struct ScrollTicker {
    interval_ms: u64,
    running: ScrollDirection,
    next_due_ms: Option<u64>,
}

impl ScrollTicker {
    pub fn new(interval_ms: u64) -> Self {
        Self {
            interval_ms: interval_ms.max(1),
            running: ScrollDirection::Stop,
            next_due_ms: None,
        }
    }

    pub const fn is_running(&self) -> bool {
        self.next_due_ms.is_some()
    }

    /// Follow the model's scroll direction.
    pub fn sync(&mut self, direction: ScrollDirection, now_ms: u64) {
        if direction == self.running {
            return;
        }
        self.running = direction;
        self.next_due_ms = match direction {
            ScrollDirection::Stop => None,
            ScrollDirection::Up | ScrollDirection::Down => {
                Some(now_ms.saturating_add(self.interval_ms))
            }
        };
    }

    /// Number of ticks that elapsed by `now_ms`, consuming them.
    pub fn take_due(&mut self, now_ms: u64) -> u32 {
        let Some(due) = self.next_due_ms else {
            return 0;
        };
        if now_ms < due {
            return 0;
        }
        let ticks = (now_ms - due) / self.interval_ms + 1;
        self.next_due_ms = Some(due + ticks * self.interval_ms);
        u32::try_from(ticks).unwrap_or(u32::MAX)
    }

    pub fn ms_until_due(&self, now_ms: u64) -> Option<u64> {
        self.next_due_ms.map(|due| due.saturating_sub(now_ms))
    }

    /// Drop the pending tick.
    pub const fn stop(&mut self) {
        self.running = ScrollDirection::Stop;
        self.next_due_ms = None;
    }
}

fn elapsed_ms(start: Instant) -> u64 {
    u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX)
}

fn apply(model: &mut Model, msg: Message) {
    *model = update(std::mem::take(model), msg);
}

impl App {
    /// Run the main event loop.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend URL is unusable, the terminal cannot
    /// be initialized, or drawing/input fails.
    pub fn run(&mut self) -> Result<()> {
        let link = GestureLink::connect(&self.backend_url)
            .with_context(|| format!("Cannot use gesture backend {}", self.backend_url))?;

        let mut terminal = ratatui::try_init().context(
            "Failed to initialize terminal: gesture-kiosk requires an interactive terminal",
        )?;
        execute!(stdout(), EnableMouseCapture)?;
        let size = terminal.size()?;

        let mut model = Model::new((size.width, size.height), &self.tuning)
            .with_start_page(self.start_page)
            .with_cursor_visible(self.cursor_visible);
        tracing::info!(
            url = %link.url(),
            page = model.page().title(),
            dwell_ms = model.dwell.dwell_ms(),
            "kiosk started"
        );

        let result = self.event_loop(&mut terminal, &mut model, &link);

        let _ = execute!(stdout(), DisableMouseCapture);
        ratatui::restore();
        drop(link);
        tracing::info!("kiosk stopped");

        result
    }

    fn event_loop(
        &self,
        terminal: &mut DefaultTerminal,
        model: &mut Model,
        link: &GestureLink,
    ) -> Result<()> {
        let start = Instant::now();
        let mut ticker = ScrollTicker::new(self.tuning.scroll_interval_ms);
        let mut needs_render = true;

        loop {
            let now_ms = elapsed_ms(start);

            if model.dwell.is_due(now_ms) {
                apply(model, Message::DwellTick(now_ms));
                needs_render = true;
            }

            for transport_event in link.drain() {
                apply(model, Self::transport_message(transport_event, now_ms));
                needs_render = true;
            }

            ticker.sync(model.scroll_direction, now_ms);
            let ticks = ticker.take_due(now_ms);
            if ticks > 0 {
                apply(model, Message::ScrollTick(ticks));
                needs_render = true;
            }

            if model.expire_toast(Instant::now()) {
                needs_render = true;
            }

            let poll_ms = if needs_render {
                0
            } else {
                [
                    Some(INPUT_POLL_MS),
                    ticker.ms_until_due(now_ms),
                    model
                        .dwell
                        .deadline_ms()
                        .map(|deadline| deadline.saturating_sub(now_ms)),
                ]
                .into_iter()
                .flatten()
                .min()
                .unwrap_or(INPUT_POLL_MS)
            };
            if event::poll(Duration::from_millis(poll_ms))? {
                if let Some(msg) = Self::handle_terminal_event(&event::read()?, model) {
                    apply(model, msg);
                    needs_render = true;
                }
                // Coalesce bursts (mouse moves, key repeat) into a single render.
                while event::poll(Duration::from_millis(0))? {
                    if let Some(msg) = Self::handle_terminal_event(&event::read()?, model) {
                        apply(model, msg);
                        needs_render = true;
                    }
                }
            }

            if needs_render {
                terminal.draw(|frame| crate::ui::render(model, frame))?;
                needs_render = false;
            }

            if model.should_quit {
                break;
            }
        }
        ticker.stop();
        Ok(())
    }
}
