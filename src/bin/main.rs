//! Host preview of the scrolling layer.
//!
//! Drives a [`ScrollLayer`] at a fixed refresh rate, composites it into a
//! monochrome panel canvas and prints every repainted frame to the terminal.
//! Pass `--inverse` to draw dark text on a lit background.

use core::fmt::Write as _;
use std::{
    error::Error,
    io::{self, Write as _},
    thread,
    time::Duration,
};

use bitcanvas::Canvas;
use embedded_graphics_core::{
    Pixel,
    draw_target::DrawTarget,
    geometry::Point,
    pixelcolor::BinaryColor,
};
use heapless::String as HeaplessString;
use log::{LevelFilter, info};
use ticker_core::{
    LayerConfig, REPEAT_FOREVER, ScrollLayer, ScrollMode, ScrollStatus, TickResult,
    fonts::FONT_5X8_PROPORTIONAL,
};

const PANEL_WIDTH: u16 = 48;
const PANEL_HEIGHT: u16 = 8;
const REFRESH_HZ: u16 = 30;
const SCROLL_PPS: u16 = 15;
const FRAME: Duration = Duration::from_millis(1_000 / REFRESH_HZ as u64);
const MAX_PHASE_FRAMES: u32 = 2_000;
const MESSAGE: &str = "Hello, matrix! Scrolling since 1970...";
const CLOCK_SECONDS: u32 = 4;

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::new()
        .filter_level(LevelFilter::Info)
        .parse_default_env()
        .init();

    let inverse = std::env::args().any(|arg| arg == "--inverse");
    let (foreground, background) = if inverse {
        (BinaryColor::Off, BinaryColor::On)
    } else {
        (BinaryColor::On, BinaryColor::Off)
    };

    let config = LayerConfig {
        width: PANEL_WIDTH,
        height: PANEL_HEIGHT,
        refresh_rate_hz: REFRESH_HZ,
        pixels_per_second: SCROLL_PPS,
        ..LayerConfig::default()
    };
    let mut layer = ScrollLayer::new(config, &FONT_5X8_PROPORTIONAL, foreground, background)?;
    layer.enable_background(inverse);

    let mut panel = Canvas::new(PANEL_WIDTH, PANEL_HEIGHT);
    let mut out = io::stdout().lock();

    info!("preview: wrap pass");
    layer.start(MESSAGE, 1)?;
    run_until_stopped(&mut layer, &mut panel, &mut out)?;

    info!("preview: bounce");
    layer.set_mode(ScrollMode::BounceForward);
    layer.set_speed(SCROLL_PPS * 2);
    layer.start("<bounce>", 2)?;
    run_until_stopped(&mut layer, &mut panel, &mut out)?;

    info!("preview: clock");
    layer.set_mode(ScrollMode::Stopped);
    layer.set_start_offset_from_left(4);
    layer.start("00:00:00", REPEAT_FOREVER)?;

    let mut clock = HeaplessString::<8>::new();
    for second in 0..CLOCK_SECONDS {
        clock.clear();
        write!(clock, "00:00:{:02}", second)?;
        layer.update(&clock)?;

        for _ in 0..REFRESH_HZ {
            present_if_redrawn(&mut layer, &mut panel, &mut out)?;
            thread::sleep(FRAME);
        }
    }
    layer.stop();
    present_if_redrawn(&mut layer, &mut panel, &mut out)?;

    writeln!(out, "{}", "\n".repeat(PANEL_HEIGHT as usize))?;
    Ok(())
}

fn run_until_stopped(
    layer: &mut ScrollLayer<BinaryColor>,
    panel: &mut Canvas,
    out: &mut impl io::Write,
) -> io::Result<()> {
    for _ in 0..MAX_PHASE_FRAMES {
        present_if_redrawn(layer, panel, out)?;
        if layer.status() == ScrollStatus::Stopped {
            break;
        }
        thread::sleep(FRAME);
    }
    Ok(())
}

fn present_if_redrawn(
    layer: &mut ScrollLayer<BinaryColor>,
    panel: &mut Canvas,
    out: &mut impl io::Write,
) -> io::Result<()> {
    if layer.tick() == TickResult::Idle {
        return Ok(());
    }

    compose(layer, panel);
    print_panel(panel, out)
}

/// Builds one full refresh frame: lower layers first, then the ticker on top.
fn compose(layer: &ScrollLayer<BinaryColor>, panel: &mut Canvas) {
    let (width, height) = layer.hardware_size();
    let _ = panel.clear(BinaryColor::Off);

    let mut row = [BinaryColor::Off; PANEL_WIDTH as usize];
    for hy in 0..height {
        row.fill(BinaryColor::Off);
        layer.fill_refresh_row(hy, &mut row);

        let pixels = row
            .iter()
            .take(width as usize)
            .enumerate()
            .map(|(hx, color)| Pixel(Point::new(hx as i32, hy as i32), *color));
        let _ = panel.draw_iter(pixels);
    }
}

fn print_panel(panel: &Canvas, out: &mut impl io::Write) -> io::Result<()> {
    let height = panel.height() as usize;
    for y in 0..height {
        let line: String = (0..panel.width() as usize)
            .map(|x| if panel.test_pixel(x, y) { '#' } else { '.' })
            .collect();
        writeln!(out, "{line}")?;
    }

    // cursor back to the top of the frame for the next repaint
    write!(out, "\x1b[{height}A")?;
    out.flush()
}
