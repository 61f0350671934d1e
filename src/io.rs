use std::io;
use std::io::Stdout;
use std::io::Write;
use std::ops::ControlFlow;
use std::time::Duration;
use std::time::Instant;

use crossterm::cursor;
use crossterm::event;
use crossterm::event::Event as CrossTermEvent;
use crossterm::event::KeyCode;
use crossterm::event::KeyEvent;
use crossterm::event::KeyEventKind;
use crossterm::event::KeyModifiers;
use crossterm::execute;
use crossterm::queue;
use crossterm::style;
use crossterm::terminal;
use tracing::info;

use crate::Axis;
use crate::camera::Camera;
use crate::coord::Coord;
use crate::events::Event;
use crate::render::Render;
use crate::simulation::Ticker;

/// How long to block on input while paused before polling again
const PAUSED_POLL: Duration = Duration::from_millis(500);

/// Converts a crossterm event into a simulation event
pub fn convert_event(event: CrossTermEvent) -> Option<Event> {
    match event {
        CrossTermEvent::Key(key_event) => match key_event {
            KeyEvent {
                code: KeyCode::Char('q'),
                kind: KeyEventKind::Press,
                ..
            }
            | KeyEvent {
                code: KeyCode::Char('c'),
                modifiers: KeyModifiers::CONTROL,
                kind: KeyEventKind::Press,
                ..
            } => Some(Event::Exit),
            KeyEvent {
                code: KeyCode::Char(' '),
                kind: KeyEventKind::Press,
                ..
            } => Some(Event::TogglePause),
            _ => None,
        },
        _ => None,
    }
}

/// Draws each generation as braille on the terminal, one dot per cell.
///
/// The terminal is switched to raw mode on creation and restored on drop.
pub struct Screen {
    stdout: Stdout,
    cam: Camera,

    /// Frames drawn so far
    frames: u64,
}

impl Screen {
    pub fn new(size: Axis) -> io::Result<Self> {
        let mut stdout = io::stdout();

        terminal::enable_raw_mode()?;
        execute!(stdout, terminal::EnterAlternateScreen, cursor::Hide)?;

        Ok(Self {
            stdout,
            cam: Camera::for_grid(size),
            frames: 0,
        })
    }
}

impl Drop for Screen {
    fn drop(&mut self) {
        // nothing sensible to do if the terminal cannot be restored
        let _ = execute!(self.stdout, cursor::Show, terminal::LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}

impl Render for Screen {
    fn render(&mut self, cells: &[Coord]) -> anyhow::Result<()> {
        self.cam.reset();
        self.cam.draw_cells(cells);
        let frame = self.cam.render();

        queue!(
            self.stdout,
            terminal::Clear(terminal::ClearType::All),
            cursor::MoveTo(0, 0)
        )?;

        for line in frame.lines() {
            queue!(self.stdout, style::Print(line), cursor::MoveToNextLine(1))?;
        }

        queue!(
            self.stdout,
            style::Print(format!(
                "generation {}  population {}  [space] pause  [q] quit",
                self.frames,
                cells.len()
            ))
        )?;

        self.stdout.flush()?;
        self.frames += 1;

        Ok(())
    }
}

/// Paces ticks by waiting on keyboard input for the length of the period.
#[derive(Default)]
pub struct Keyboard {
    paused: bool,
}

impl Ticker for Keyboard {
    fn wait(&mut self, period: Duration) -> anyhow::Result<ControlFlow<()>> {
        let deadline = Instant::now() + period;

        loop {
            let timeout = if self.paused {
                PAUSED_POLL
            } else {
                deadline.saturating_duration_since(Instant::now())
            };

            if !self.paused && timeout.is_zero() {
                return Ok(ControlFlow::Continue(()));
            }

            if !event::poll(timeout)? {
                continue;
            }

            match convert_event(event::read()?) {
                Some(Event::Exit) => return Ok(ControlFlow::Break(())),
                Some(Event::TogglePause) => {
                    self.paused = !self.paused;
                    info!(paused = self.paused, "Toggled pause");
                }
                None => {}
            }
        }
    }
}
