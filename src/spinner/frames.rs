//! Built-in animation frame sets.
//!
//! A [`FrameSet`] is an ordered, non-empty list of short strings played back
//! in a loop. The built-ins are `const` so they cost nothing until used;
//! caller-supplied sets go through [`FrameSet::new`], which refuses empty
//! input.

use std::fmt;
use std::sync::Arc;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::SpinnerError;

/// Ordered, immutable, non-empty sequence of animation frames.
///
/// Cloning is cheap: built-ins are borrowed statics and custom sets share
/// their storage.
#[derive(Clone)]
pub struct FrameSet {
    frames: Frames,
}

#[derive(Clone)]
enum Frames {
    Static(&'static [&'static str]),
    Owned(Arc<[String]>),
}

impl FrameSet {
    /// Wrap a static list of frames.
    ///
    /// Evaluated in const context for the built-ins, so an empty list is a
    /// compile error there.
    pub const fn from_static(frames: &'static [&'static str]) -> Self {
        assert!(!frames.is_empty(), "frame set must contain at least one frame");
        Self {
            frames: Frames::Static(frames),
        }
    }

    /// Build a frame set from caller-supplied frames.
    pub fn new<I, S>(frames: I) -> Result<Self, SpinnerError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let frames: Vec<String> = frames.into_iter().map(Into::into).collect();
        if frames.is_empty() {
            return Err(SpinnerError::EmptyFrameSet);
        }
        Ok(Self {
            frames: Frames::Owned(frames.into()),
        })
    }

    /// Number of frames in the set. Never zero.
    pub fn len(&self) -> usize {
        match &self.frames {
            Frames::Static(frames) => frames.len(),
            Frames::Owned(frames) => frames.len(),
        }
    }

    /// Always false; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Frame shown on the given tick: index `tick % len`.
    pub fn frame(&self, tick: usize) -> &str {
        let idx = tick % self.len();
        match &self.frames {
            Frames::Static(frames) => frames[idx],
            Frames::Owned(frames) => frames[idx].as_str(),
        }
    }

    /// Iterate frames in playback order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        (0..self.len()).map(move |i| self.frame(i))
    }

    /// Copy the frames into an owned vector.
    pub fn to_vec(&self) -> Vec<String> {
        self.iter().map(str::to_string).collect()
    }
}

impl Default for FrameSet {
    fn default() -> Self {
        DOTS
    }
}

impl fmt::Debug for FrameSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl PartialEq for FrameSet {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl Eq for FrameSet {}

/// Braille pattern spinner (default)
pub const DOTS: FrameSet =
    FrameSet::from_static(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]);

/// Alternative braille pattern
pub const DOTS2: FrameSet = FrameSet::from_static(&["⣾", "⣽", "⣻", "⢿", "⡿", "⣟", "⣯", "⣷"]);

/// Braille pattern, reverse direction of `DOTS2`
pub const DOTS3: FrameSet = FrameSet::from_static(&["⣷", "⣯", "⣟", "⡿", "⢿", "⣻", "⣽", "⣾"]);

/// Classic rotating line
pub const LINE: FrameSet = FrameSet::from_static(&["-", "\\", "|", "/"]);

/// Directional arrows
pub const ARROW: FrameSet = FrameSet::from_static(&["←", "↖", "↑", "↗", "→", "↘", "↓", "↙"]);

/// Box drawing quadrants
pub const BOX: FrameSet = FrameSet::from_static(&["◰", "◳", "◲", "◱"]);

/// Quartered circle
pub const CIRCLE: FrameSet = FrameSet::from_static(&["◴", "◷", "◶", "◵"]);

/// Filling loading bar
pub const PROGRESS_BAR: FrameSet = FrameSet::from_static(&[
    "▱▱▱▱▱▱▱",
    "▰▱▱▱▱▱▱",
    "▰▰▱▱▱▱▱",
    "▰▰▰▱▱▱▱",
    "▰▰▰▰▱▱▱",
    "▰▰▰▰▰▱▱",
    "▰▰▰▰▰▰▱",
    "▰▰▰▰▰▰▰",
]);

/// Pacman eating a row of dots
pub const PACMAN: FrameSet = FrameSet::from_static(&[
    "ᗧ······",
    "ᗣ·····",
    " ᗧ····",
    " ᗣ···",
    "  ᗧ··",
    "  ᗣ·",
    "   ᗧ",
    "   ᗣ",
]);

/// Pacman chased by a ghost
pub const PACMAN_GHOST: FrameSet = FrameSet::from_static(&[
    "ᗧ····  ᗣ",
    " ᗧ···  ᗣ",
    " ᗣ···ᗣ ",
    "  ᗧ··ᗣ ",
    "  ᗣ·ᗣ  ",
    "   ᗧᗣ  ",
    "   ᗣ   ",
    "  ᗧ    ",
    " ᗧ     ",
    "ᗧ      ",
]);

/// Arc sweeping around a circle
pub const WAVE: FrameSet = FrameSet::from_static(&["◜", "◝", "◞", "◟"]);

/// Single braille dot bouncing around the cell
pub const BOUNCE: FrameSet = FrameSet::from_static(&["⠁", "⠂", "⠄", "⡀", "⢀", "⠠", "⠐", "⠈"]);

/// Shark fin crossing a tank and back
pub const SHARK: FrameSet = FrameSet::from_static(&[
    "▐|\\____________▌",
    "▐_|\\___________▌",
    "▐__|\\__________▌",
    "▐___|\\_________▌",
    "▐____|\\________▌",
    "▐_____|\\_______▌",
    "▐______|\\______▌",
    "▐_______|\\_____▌",
    "▐________|\\____▌",
    "▐_________|\\___▌",
    "▐__________|\\__▌",
    "▐___________|\\_▌",
    "▐____________|\\▌",
    "▐____________/|▌",
    "▐___________/|_▌",
    "▐__________/|__▌",
    "▐_________/|___▌",
    "▐________/|____▌",
    "▐_______/|_____▌",
    "▐______/|______▌",
    "▐_____/|_______▌",
    "▐____/|________▌",
    "▐___/|_________▌",
    "▐__/|__________▌",
    "▐_/|___________▌",
]);

/// Rotating globe
pub const EARTH: FrameSet = FrameSet::from_static(&["🌍", "🌎", "🌏"]);

/// Moon phases
pub const MOON: FrameSet = FrameSet::from_static(&["🌑", "🌒", "🌓", "🌔", "🌕", "🌖", "🌗", "🌘"]);

/// Clock hand sweeping the hours
pub const CLOCK: FrameSet = FrameSet::from_static(&[
    "🕐", "🕑", "🕒", "🕓", "🕔", "🕕", "🕖", "🕗", "🕘", "🕙", "🕚", "🕛",
]);

/// Colored hearts
pub const HEARTS: FrameSet = FrameSet::from_static(&["💛", "💙", "💜", "💚", "❤️"]);

/// Bar bouncing inside brackets
pub const BOUNCING_BAR: FrameSet = FrameSet::from_static(&[
    "[    ]",
    "[=   ]",
    "[==  ]",
    "[=== ]",
    "[ ===]",
    "[  ==]",
    "[   =]",
    "[    ]",
    "[   =]",
    "[  ==]",
    "[ ===]",
    "[====]",
    "[=== ]",
    "[==  ]",
    "[=   ]",
]);

/// Name of a built-in frame set, usable from CLI flags and config files.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum FrameStyle {
    #[default]
    Dots,
    Dots2,
    Dots3,
    Line,
    Arrow,
    #[serde(rename = "box")]
    #[value(name = "box")]
    BoxDrawing,
    Circle,
    ProgressBar,
    Pacman,
    PacmanGhost,
    Wave,
    Bounce,
    Shark,
    Earth,
    Moon,
    Clock,
    Hearts,
    BouncingBar,
}

impl FrameStyle {
    /// Every built-in style, in catalog order.
    pub const ALL: [FrameStyle; 18] = [
        FrameStyle::Dots,
        FrameStyle::Dots2,
        FrameStyle::Dots3,
        FrameStyle::Line,
        FrameStyle::Arrow,
        FrameStyle::BoxDrawing,
        FrameStyle::Circle,
        FrameStyle::ProgressBar,
        FrameStyle::Pacman,
        FrameStyle::PacmanGhost,
        FrameStyle::Wave,
        FrameStyle::Bounce,
        FrameStyle::Shark,
        FrameStyle::Earth,
        FrameStyle::Moon,
        FrameStyle::Clock,
        FrameStyle::Hearts,
        FrameStyle::BouncingBar,
    ];

    pub fn frames(self) -> FrameSet {
        match self {
            FrameStyle::Dots => DOTS,
            FrameStyle::Dots2 => DOTS2,
            FrameStyle::Dots3 => DOTS3,
            FrameStyle::Line => LINE,
            FrameStyle::Arrow => ARROW,
            FrameStyle::BoxDrawing => BOX,
            FrameStyle::Circle => CIRCLE,
            FrameStyle::ProgressBar => PROGRESS_BAR,
            FrameStyle::Pacman => PACMAN,
            FrameStyle::PacmanGhost => PACMAN_GHOST,
            FrameStyle::Wave => WAVE,
            FrameStyle::Bounce => BOUNCE,
            FrameStyle::Shark => SHARK,
            FrameStyle::Earth => EARTH,
            FrameStyle::Moon => MOON,
            FrameStyle::Clock => CLOCK,
            FrameStyle::Hearts => HEARTS,
            FrameStyle::BouncingBar => BOUNCING_BAR,
        }
    }

    /// Kebab-case name, as accepted on the command line and in config.
    pub fn name(self) -> &'static str {
        match self {
            FrameStyle::Dots => "dots",
            FrameStyle::Dots2 => "dots2",
            FrameStyle::Dots3 => "dots3",
            FrameStyle::Line => "line",
            FrameStyle::Arrow => "arrow",
            FrameStyle::BoxDrawing => "box",
            FrameStyle::Circle => "circle",
            FrameStyle::ProgressBar => "progress-bar",
            FrameStyle::Pacman => "pacman",
            FrameStyle::PacmanGhost => "pacman-ghost",
            FrameStyle::Wave => "wave",
            FrameStyle::Bounce => "bounce",
            FrameStyle::Shark => "shark",
            FrameStyle::Earth => "earth",
            FrameStyle::Moon => "moon",
            FrameStyle::Clock => "clock",
            FrameStyle::Hearts => "hearts",
            FrameStyle::BouncingBar => "bouncing-bar",
        }
    }
}

impl fmt::Display for FrameStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
