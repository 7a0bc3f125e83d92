//! Event Loop - blocking crossterm input loop
//!
//! Polls crossterm with a timeout bounded by the next timer deadline, routes
//! each event through [`Compositor::dispatch`], fires due timers and flushes
//! the surface once per iteration.

use std::time::{Duration, Instant};

use crossterm::event;

use super::{Compositor, Flow};
use crate::error::Result;
use crate::input;

/// Poll timeout when no timer is pending.
const IDLE_POLL: Duration = Duration::from_millis(250);

impl Compositor {
    /// Paint everything and process terminal input until CTRL_C.
    ///
    /// The terminal is restored before returning. With
    /// `exit_process_on_ctrl_c` set the process exits instead of returning.
    pub fn run(&mut self) -> Result<()> {
        self.terminal.capture_input()?;
        let result = self.run_until_exit();
        let released = self.terminal.release_input();

        result?;
        released?;

        if self.config.exit_process_on_ctrl_c {
            tracing::debug!("terminal restored, exiting process");
            std::process::exit(0);
        }
        Ok(())
    }

    fn run_until_exit(&mut self) -> Result<()> {
        self.paint(true)?;
        self.flush()?;

        loop {
            let timeout = self
                .next_deadline()
                .map(|due| due.saturating_duration_since(Instant::now()))
                .unwrap_or(IDLE_POLL);

            if event::poll(timeout)? {
                if let Some(input) = input::translate(event::read()?) {
                    if self.dispatch(input)? == Flow::Exit {
                        self.flush()?;
                        return Ok(());
                    }
                }
            }

            self.tick(Instant::now())?;
            self.flush()?;
        }
    }
}
