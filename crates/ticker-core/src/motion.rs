//! Scroll motion state machine.
//!
//! Every mode maps `(position, bounds, counter)` to its next value through the
//! pure [`step`] function, so motion can be exercised without a canvas.

/// Repeat count that never runs out.
pub const REPEAT_FOREVER: i32 = -1;

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum ScrollMode {
    /// Enter from the right edge, leave on the left, start over.
    #[default]
    WrapForward,
    /// Like `WrapForward`, but the first pass starts at the left start offset.
    WrapForwardFromLeft,
    /// Move left until the text has left the window, then turn around.
    BounceForward,
    /// Move right until the text reaches the right edge, then turn around.
    BounceReverse,
    /// Parked at the left start offset.
    Stopped,
    /// Nothing is drawn.
    Off,
}

impl ScrollMode {
    pub const fn is_moving(self) -> bool {
        !matches!(self, Self::Stopped | Self::Off)
    }
}

/// Repeat counter as reported to callers.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ScrollStatus {
    Stopped,
    Remaining(u32),
    Infinite,
}

impl ScrollStatus {
    pub const fn from_counter(counter: i32) -> Self {
        if counter == 0 {
            Self::Stopped
        } else if counter < 0 {
            Self::Infinite
        } else {
            Self::Remaining(counter as u32)
        }
    }

    /// `0` when stopped, remaining passes when running, `-1` when infinite.
    pub const fn code(self) -> i32 {
        match self {
            Self::Stopped => 0,
            Self::Remaining(n) => n as i32,
            Self::Infinite => REPEAT_FOREVER,
        }
    }
}

/// Scroll position limits, in canvas columns.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Bounds {
    pub min: i32,
    pub max: i32,
}

/// Position, mode and repeat counter advanced together.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Motion {
    pub position: i32,
    pub mode: ScrollMode,
    pub counter: i32,
}

/// Result of one motion step.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Step {
    pub motion: Motion,
    /// A traversal hit its bound during this step.
    pub completed_pass: bool,
}

/// Bounds and starting position for `mode`.
///
/// `text_width` is the summed glyph width minus one; `left_offset` is the
/// configured start column for `WrapForwardFromLeft` and the rest column of
/// the parked modes, whose bounds collapse to zero.
pub const fn bounds_for(
    mode: ScrollMode,
    x_start: i32,
    x_end: i32,
    text_width: i32,
    left_offset: i32,
) -> (Bounds, i32) {
    if !mode.is_moving() {
        return (Bounds { min: 0, max: 0 }, left_offset);
    }

    let bounds = Bounds {
        min: x_start - text_width,
        max: x_end,
    };
    let position = match mode {
        ScrollMode::BounceReverse => bounds.min,
        ScrollMode::WrapForwardFromLeft => left_offset,
        _ => bounds.max,
    };
    (bounds, position)
}

#[inline]
const fn spend(counter: i32) -> i32 {
    if counter > 0 { counter - 1 } else { counter }
}

/// Advances `motion` by one column.
///
/// A zero counter means motion is over and the state is returned unchanged.
pub const fn step(motion: Motion, bounds: Bounds, left_offset: i32) -> Step {
    let Motion {
        mut position,
        mut mode,
        mut counter,
    } = motion;
    let mut completed_pass = false;

    if counter == 0 {
        return Step {
            motion,
            completed_pass,
        };
    }

    match mode {
        ScrollMode::WrapForward | ScrollMode::WrapForwardFromLeft => {
            position -= 1;
            if position <= bounds.min {
                position = bounds.max;
                counter = spend(counter);
                completed_pass = true;
            }
        }
        ScrollMode::BounceForward => {
            position -= 1;
            if position <= bounds.min {
                position = bounds.min;
                mode = ScrollMode::BounceReverse;
                counter = spend(counter);
                completed_pass = true;
            }
        }
        ScrollMode::BounceReverse => {
            position += 1;
            if position >= bounds.max {
                position = bounds.max;
                mode = ScrollMode::BounceForward;
                counter = spend(counter);
                completed_pass = true;
            }
        }
        ScrollMode::Stopped | ScrollMode::Off => {
            position = left_offset;
        }
    }

    Step {
        motion: Motion {
            position,
            mode,
            counter,
        },
        completed_pass,
    }
}

/// Frames between two scroll steps for the given rates, at least one.
pub const fn frames_per_step(refresh_rate_hz: u16, pixels_per_second: u16) -> u32 {
    let pps = if pixels_per_second == 0 {
        1
    } else {
        pixels_per_second as u32
    };
    let frames = (refresh_rate_hz as u32 + pps / 2) / pps;
    if frames == 0 { 1 } else { frames }
}

/// Lets one refresh frame out of every `frames_per_step` through.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct FrameDivider {
    frames_per_step: u32,
    elapsed: u32,
}

impl FrameDivider {
    pub const fn new(refresh_rate_hz: u16, pixels_per_second: u16) -> Self {
        Self {
            frames_per_step: frames_per_step(refresh_rate_hz, pixels_per_second),
            elapsed: 0,
        }
    }

    pub const fn frames_per_step(&self) -> u32 {
        self.frames_per_step
    }

    pub fn set_rates(&mut self, refresh_rate_hz: u16, pixels_per_second: u16) {
        self.frames_per_step = frames_per_step(refresh_rate_hz, pixels_per_second);
        self.elapsed = self.elapsed.min(self.frames_per_step - 1);
    }

    pub fn reset(&mut self) {
        self.elapsed = 0;
    }

    /// Counts one frame; `true` when a step is due.
    pub fn ready(&mut self) -> bool {
        self.elapsed += 1;
        if self.elapsed < self.frames_per_step {
            return false;
        }

        self.elapsed = 0;
        true
    }
}
