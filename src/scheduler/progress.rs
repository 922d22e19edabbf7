use std::io::{IsTerminal, Write};

use crossterm::{
    cursor, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{Clear, ClearType},
};

const SPINNER_FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];
const BAR_SIZE: usize = 30;

/// Completed-request progress on stderr. Purely observational.
#[derive(Debug, Clone, Copy)]
pub struct ProgressLine {
    enabled: bool,
    no_color: bool,
}

impl ProgressLine {
    #[must_use]
    pub const fn disabled() -> Self {
        Self {
            enabled: false,
            no_color: true,
        }
    }

    /// Draws only when stderr is a terminal.
    #[must_use]
    pub fn stderr(no_color: bool) -> Self {
        Self {
            enabled: std::io::stderr().is_terminal(),
            no_color,
        }
    }

    pub fn update(&self, completed: u64, total: u64) {
        if !self.enabled {
            return;
        }
        if let Err(err) = render_progress_line(completed, total, self.no_color) {
            tracing::debug!("Failed to draw progress line: {}", err);
        }
    }

    pub fn finish(&self) {
        if !self.enabled {
            return;
        }
        let mut out = std::io::stderr();
        if let Err(err) = out.write_all(b"\n").and_then(|()| out.flush()) {
            tracing::debug!("Failed to finish progress line: {}", err);
        }
    }
}

fn render_progress_line(completed: u64, total: u64, no_color: bool) -> Result<(), std::io::Error> {
    let (bar, percent, counts) = build_progress_parts(completed, total);

    let mut out = std::io::stderr();
    queue!(out, cursor::MoveToColumn(0), Clear(ClearType::CurrentLine))?;
    if no_color {
        queue!(out, Print(&bar), Print(&percent), Print(&counts))?;
    } else {
        queue!(
            out,
            Print(&bar),
            SetForegroundColor(Color::Cyan),
            Print(&percent),
            SetForegroundColor(Color::Yellow),
            Print(&counts),
            ResetColor
        )?;
    }
    out.flush()?;
    Ok(())
}

pub(crate) fn build_progress_parts(completed: u64, total: u64) -> (String, String, String) {
    let goal = u128::from(total.max(1));
    let current = u128::from(completed.min(total));

    let frame_index = usize::try_from(completed.checked_rem(10).unwrap_or(0)).unwrap_or(0);
    let frame = SPINNER_FRAMES.get(frame_index).copied().unwrap_or(" ");

    let size = u128::try_from(BAR_SIZE).unwrap_or(0);
    let filled = current
        .saturating_mul(size)
        .checked_div(goal)
        .and_then(|value| usize::try_from(value).ok())
        .unwrap_or(BAR_SIZE)
        .min(BAR_SIZE);
    let bar = format!(
        "{} Progress: [{}{}]",
        frame,
        "#".repeat(filled),
        "-".repeat(BAR_SIZE.saturating_sub(filled))
    );

    let percent_x100 = current
        .saturating_mul(10_000)
        .checked_div(goal)
        .unwrap_or(0);
    let percent = format!(
        " {}.{:02}%",
        percent_x100.checked_div(100).unwrap_or(0),
        percent_x100.checked_rem(100).unwrap_or(0)
    );
    let counts = format!(" ({}/{})", completed, total);

    (bar, percent, counts)
}
