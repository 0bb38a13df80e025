//! Scrolling text layer: text, motion and the two canvases it paints.

use bitcanvas::Canvas;
use heapless::Vec;
use log::{debug, info, warn};

use crate::{
    config::{LayerConfig, Rotation, TickResult, Window},
    error::LayerError,
    font::{self, BitmapFont},
    motion::{self, Bounds, FrameDivider, Motion, ScrollMode, ScrollStatus},
};

mod raster;
mod sampler;

pub use sampler::Sample;

/// Longest text kept by a layer, in glyphs. Longer input is truncated.
pub const TEXT_CAPACITY: usize = 100;

/// Text resolved against one font.
struct ResolvedText {
    codes: Vec<u8, TEXT_CAPACITY>,
    slots: Vec<u16, TEXT_CAPACITY>,
    width: i32,
}

impl ResolvedText {
    fn from_chars<I>(font: &BitmapFont, chars: I) -> Result<Self, LayerError>
    where
        I: IntoIterator<Item = char>,
    {
        // collecting past capacity panics, so `take` is the only truncation point
        let codes = chars
            .into_iter()
            .take(TEXT_CAPACITY)
            .map(|c| font::char_code(font, c))
            .collect::<Result<Vec<u8, TEXT_CAPACITY>, _>>()?;

        Self::from_codes(font, codes)
    }

    fn from_codes(font: &BitmapFont, codes: Vec<u8, TEXT_CAPACITY>) -> Result<Self, LayerError> {
        let slots = codes
            .iter()
            .map(|&code| {
                font.glyph_slot(code)
                    .ok_or(LayerError::MissingGlyph(char::from(code)))
            })
            .collect::<Result<Vec<u16, TEXT_CAPACITY>, _>>()?;
        let sum: i32 = slots
            .iter()
            .map(|&slot| font.slot_width(slot) as i32)
            .sum();

        Ok(Self {
            codes,
            slots,
            width: sum - 1,
        })
    }
}

/// Scrolling text layer drawn into a pair of bit-packed canvases.
///
/// All methods run on the refresh thread; nothing here synchronizes.
pub struct ScrollLayer<C> {
    ink: Canvas,
    fill: Canvas,
    rotation: Rotation,
    font: &'static BitmapFont,
    codes: Vec<u8, TEXT_CAPACITY>,
    slots: Vec<u16, TEXT_CAPACITY>,
    text_width: i32,
    motion: Motion,
    bounds: Bounds,
    divider: FrameDivider,
    refresh_rate_hz: u16,
    pixels_per_second: u16,
    window: Window,
    top_offset: i32,
    left_offset: i32,
    foreground: C,
    background: C,
    draw_background: bool,
    major_change: bool,
    pending_redraw: bool,
}

impl<C: Copy> ScrollLayer<C> {
    /// Allocates both canvases and binds the initial font.
    pub fn new(
        config: LayerConfig,
        font: &'static BitmapFont,
        foreground: C,
        background: C,
    ) -> Result<Self, LayerError> {
        font.validate()?;

        debug!(
            "scroll: new canvas={}x{} rotation={:?} refresh_hz={} pps={}",
            config.width,
            config.height,
            config.rotation,
            config.refresh_rate_hz,
            config.pixels_per_second
        );

        Ok(Self {
            ink: Canvas::new(config.width, config.height),
            fill: Canvas::new(config.width, config.height),
            rotation: config.rotation,
            font,
            codes: Vec::new(),
            slots: Vec::new(),
            text_width: -1,
            motion: Motion {
                position: 0,
                mode: config.mode,
                counter: 0,
            },
            bounds: Bounds::default(),
            divider: FrameDivider::new(config.refresh_rate_hz, config.pixels_per_second),
            refresh_rate_hz: config.refresh_rate_hz,
            pixels_per_second: config.pixels_per_second,
            window: config.full_window(),
            top_offset: 0,
            left_offset: 0,
            foreground,
            background,
            draw_background: false,
            major_change: true,
            pending_redraw: false,
        })
    }

    /// Starts scrolling `text` for `repeats` passes.
    ///
    /// A negative count ([`crate::REPEAT_FOREVER`]) scrolls until [`Self::stop`];
    /// zero leaves the layer stopped.
    pub fn start(&mut self, text: &str, repeats: i32) -> Result<(), LayerError> {
        let resolved = self.resolve(text)?;
        self.install_text(resolved);
        self.motion.counter = repeats;
        self.set_min_max();
        self.divider.reset();
        self.pending_redraw = true;

        info!(
            "scroll: start len={} repeats={} width={} mode={:?}",
            self.codes.len(),
            repeats,
            self.text_width,
            self.motion.mode
        );
        Ok(())
    }

    /// Replaces the text without restarting position or repeat counter.
    pub fn update(&mut self, text: &str) -> Result<(), LayerError> {
        let resolved = self.resolve(text)?;
        self.install_text(resolved);

        // parked modes rest at the left offset; moving modes keep their column
        let position = self.motion.position;
        self.set_min_max();
        if self.motion.mode.is_moving() {
            self.motion.position = position.clamp(self.bounds.min, self.bounds.max);
        }
        self.pending_redraw = true;

        debug!(
            "scroll: update len={} width={} position={}",
            self.codes.len(),
            self.text_width,
            self.motion.position
        );
        Ok(())
    }

    /// Finishes the current pass on the next eligible tick.
    pub fn stop(&mut self) {
        if self.motion.counter == 0 {
            return;
        }

        match self.motion.mode {
            ScrollMode::Stopped | ScrollMode::Off => {
                self.motion.counter = 0;
                self.pending_redraw = true;
            }
            // bounce passes end exactly on the bound they are heading for
            ScrollMode::BounceReverse => {
                self.motion.counter = 1;
                self.motion.position = self.bounds.max - 1;
            }
            ScrollMode::BounceForward => {
                self.motion.counter = 1;
                self.motion.position = self.bounds.min + 1;
            }
            ScrollMode::WrapForward | ScrollMode::WrapForwardFromLeft => {
                self.motion.counter = 1;
                self.motion.position = self.bounds.min;
            }
        }

        info!("scroll: stop mode={:?}", self.motion.mode);
    }

    pub fn status(&self) -> ScrollStatus {
        ScrollStatus::from_counter(self.motion.counter)
    }

    pub fn set_mode(&mut self, mode: ScrollMode) {
        self.motion.mode = mode;
        self.set_min_max();
        self.pending_redraw = true;
        debug!("scroll: mode={:?}", mode);
    }

    /// Scroll speed in pixels per second; zero is treated as one.
    pub fn set_speed(&mut self, pixels_per_second: u16) {
        self.pixels_per_second = pixels_per_second;
        self.divider
            .set_rates(self.refresh_rate_hz, self.pixels_per_second);
    }

    pub fn set_refresh_rate(&mut self, refresh_rate_hz: u16) {
        self.refresh_rate_hz = refresh_rate_hz;
        self.divider
            .set_rates(self.refresh_rate_hz, self.pixels_per_second);
    }

    /// Switches fonts, re-resolving the current text.
    ///
    /// Rejected when the new font is malformed or lacks a glyph the text uses.
    pub fn set_font(&mut self, font: &'static BitmapFont) -> Result<(), LayerError> {
        if let Err(err) = font.validate() {
            warn!("scroll: rejected font err={}", err);
            return Err(err);
        }

        let resolved = ResolvedText::from_codes(font, self.codes.clone())
            .inspect_err(|err| warn!("scroll: rejected font err={}", err))?;

        self.font = font;
        self.install_text(resolved);
        self.major_change = true;
        self.set_min_max();
        self.pending_redraw = true;

        debug!(
            "scroll: font {}x{} width={}",
            font.width, font.height, self.text_width
        );
        Ok(())
    }

    /// Restricts drawing to a window of the canvas.
    pub fn set_window(&mut self, x: u16, y: u16, width: u16, height: u16) -> Result<(), LayerError> {
        let window = Window::new(x, y, width, height);
        if !window.fits(self.ink.width(), self.ink.height()) {
            warn!(
                "scroll: rejected window x={} y={} w={} h={} canvas={}x{}",
                x,
                y,
                width,
                height,
                self.ink.width(),
                self.ink.height()
            );
            return Err(LayerError::WindowOutOfBounds);
        }

        self.window = window;
        self.major_change = true;
        self.set_min_max();
        self.pending_redraw = true;

        debug!(
            "scroll: window x={} y={} w={} h={} bounds={}..={}",
            x, y, width, height, self.bounds.min, self.bounds.max
        );
        Ok(())
    }

    /// Moves the text top `offset` rows below the window top.
    pub fn set_offset_from_top(&mut self, offset: i32) {
        self.top_offset = offset;
        self.major_change = true;
        self.pending_redraw = true;
    }

    /// Column used by `Stopped` and as the first position of `WrapForwardFromLeft`.
    pub fn set_start_offset_from_left(&mut self, offset: i32) {
        self.left_offset = offset;
        if !self.motion.mode.is_moving() {
            self.motion.position = offset;
            self.pending_redraw = true;
        }
    }

    pub fn set_rotation(&mut self, rotation: Rotation) {
        self.rotation = rotation;
    }

    pub fn set_color(&mut self, foreground: C) {
        self.foreground = foreground;
    }

    pub fn set_back_color(&mut self, background: C) {
        self.background = background;
    }

    pub fn enable_background(&mut self, enabled: bool) {
        if self.draw_background != enabled {
            self.draw_background = enabled;
            self.major_change = true;
            self.pending_redraw = true;
        }
    }

    /// Advances motion for one refresh frame and repaints when the picture changed.
    pub fn tick(&mut self) -> TickResult {
        let stepped = self.motion.counter != 0 && self.divider.ready();

        if stepped {
            let step = motion::step(self.motion, self.bounds, self.left_offset);
            self.motion = step.motion;

            if step.completed_pass {
                debug!(
                    "scroll: pass complete mode={:?} remaining={}",
                    self.motion.mode, self.motion.counter
                );
            }
            if self.motion.counter == 0 {
                info!("scroll: finished position={}", self.motion.position);
            }
        }

        if stepped || core::mem::take(&mut self.pending_redraw) {
            self.redraw();
            TickResult::Redrawn
        } else {
            TickResult::Idle
        }
    }

    pub fn position(&self) -> i32 {
        self.motion.position
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn mode(&self) -> ScrollMode {
        self.motion.mode
    }

    /// Summed glyph width of the text, minus one.
    pub fn text_width(&self) -> i32 {
        self.text_width
    }

    /// Character codes of the current text.
    pub fn text(&self) -> &[u8] {
        &self.codes
    }

    pub fn window(&self) -> Window {
        self.window
    }

    pub fn font(&self) -> &'static BitmapFont {
        self.font
    }

    pub fn frames_per_step(&self) -> u32 {
        self.divider.frames_per_step()
    }

    pub fn ink(&self) -> &Canvas {
        &self.ink
    }

    pub fn fill(&self) -> &Canvas {
        &self.fill
    }

    fn resolve(&self, text: &str) -> Result<ResolvedText, LayerError> {
        ResolvedText::from_chars(self.font, text.chars())
            .inspect_err(|err| warn!("scroll: rejected text err={}", err))
    }

    fn install_text(&mut self, resolved: ResolvedText) {
        self.codes = resolved.codes;
        self.slots = resolved.slots;
        self.text_width = resolved.width;
    }

    fn set_min_max(&mut self) {
        let (bounds, position) = motion::bounds_for(
            self.motion.mode,
            self.window.x as i32,
            self.window.x_end() as i32,
            self.text_width,
            self.left_offset,
        );
        self.bounds = bounds;
        self.motion.position = position;
    }
}
