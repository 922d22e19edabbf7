use std::io::IsTerminal;

use crossterm::style::{Color, Stylize};

const BANNER_LINES: [&str; 7] = [
    "██╗      ██████╗  █████╗ ██████╗ ███████╗████████╗ ██████╗ ██████╗ ███╗   ███╗",
    "██║     ██╔═══██╗██╔══██╗██╔══██╗██╔════╝╚══██╔══╝██╔═══██╗██╔══██╗████╗ ████║",
    "██║     ██║   ██║███████║██║  ██║███████╗   ██║   ██║   ██║██████╔╝██╔████╔██║",
    "██║     ██║   ██║██╔══██║██║  ██║╚════██║   ██║   ██║   ██║██╔══██╗██║╚██╔╝██║",
    "███████╗╚██████╔╝██║  ██║██████╔╝███████║   ██║   ╚██████╔╝██║  ██║██║ ╚═╝ ██║",
    "╚══════╝ ╚═════╝ ╚═╝  ╚═╝╚═════╝ ╚══════╝   ╚═╝    ╚═════╝ ╚═╝  ╚═╝╚═╝     ╚═╝",
    "                                                                              ",
];

const COLOR_START: (u8, u8, u8) = (0x00, 0xc8, 0xff);
const COLOR_MID: (u8, u8, u8) = (0x3a, 0x7b, 0xff);
const COLOR_END: (u8, u8, u8) = (0xa0, 0x4c, 0xff);
const SUBTITLE_RGB: (u8, u8, u8) = (0x00, 0xc8, 0xff);

pub(crate) fn print_cli_banner(no_color: bool) {
    let use_color = !no_color && std::io::stdout().is_terminal();
    let denom = BANNER_LINES.len().saturating_sub(1);
    for (idx, line) in BANNER_LINES.iter().enumerate() {
        if use_color {
            let (r, g, b) = tri_gradient_rgb(COLOR_START, COLOR_MID, COLOR_END, idx, denom);
            println!("{}", line.with(Color::Rgb { r, g, b }));
        } else {
            println!("{line}");
        }
    }

    let description = format!(
        "loadstorm v{} | {} | http load generator",
        env!("CARGO_PKG_VERSION"),
        env!("CARGO_PKG_LICENSE")
    );
    if use_color {
        println!(
            "{}",
            description.with(Color::Rgb {
                r: SUBTITLE_RGB.0,
                g: SUBTITLE_RGB.1,
                b: SUBTITLE_RGB.2
            })
        );
    } else {
        println!("{description}");
    }
}

fn gradient_rgb(start: (u8, u8, u8), end: (u8, u8, u8), idx: usize, denom: usize) -> (u8, u8, u8) {
    let denom = i32::try_from(denom.max(1)).unwrap_or(i32::MAX);
    let idx = i32::try_from(idx).unwrap_or(i32::MAX).min(denom);
    let lerp = |a: u8, b: u8| -> u8 {
        let a = i32::from(a);
        let b = i32::from(b);
        let value = b
            .checked_sub(a)
            .and_then(|delta| delta.checked_mul(idx))
            .and_then(|scaled| scaled.checked_div(denom))
            .and_then(|step| a.checked_add(step))
            .unwrap_or(a);
        u8::try_from(value.clamp(0, 255)).unwrap_or(0)
    };
    (
        lerp(start.0, end.0),
        lerp(start.1, end.1),
        lerp(start.2, end.2),
    )
}

fn tri_gradient_rgb(
    start: (u8, u8, u8),
    mid: (u8, u8, u8),
    end: (u8, u8, u8),
    idx: usize,
    denom: usize,
) -> (u8, u8, u8) {
    let denom = denom.max(1);
    let half = denom.checked_div(2).unwrap_or(0);
    if idx <= half {
        gradient_rgb(start, mid, idx, half)
    } else {
        gradient_rgb(
            mid,
            end,
            idx.saturating_sub(half),
            denom.saturating_sub(half),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gradient_hits_every_stop() -> Result<(), String> {
        let denom = BANNER_LINES.len().saturating_sub(1);
        let first = tri_gradient_rgb(COLOR_START, COLOR_MID, COLOR_END, 0, denom);
        let half = denom.checked_div(2).unwrap_or(0);
        let middle = tri_gradient_rgb(COLOR_START, COLOR_MID, COLOR_END, half, denom);
        let last = tri_gradient_rgb(COLOR_START, COLOR_MID, COLOR_END, denom, denom);
        if first != COLOR_START || middle != COLOR_MID || last != COLOR_END {
            return Err(format!(
                "Unexpected gradient stops: {:?} {:?} {:?}",
                first, middle, last
            ));
        }
        Ok(())
    }

    #[test]
    fn banner_lines_share_a_width() -> Result<(), String> {
        let widths: Vec<usize> = BANNER_LINES
            .iter()
            .map(|line| line.chars().count())
            .collect();
        if widths.windows(2).any(|pair| pair.first() != pair.get(1)) {
            return Err(format!("Ragged banner: {:?}", widths));
        }
        Ok(())
    }
}
