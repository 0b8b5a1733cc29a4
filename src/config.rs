use alloc::string::String;
use core::time::Duration;

/// Seconds between two fetches of the game state.
pub const DEFAULT_REFRESH_INTERVAL: Duration = Duration::from_secs(4);
/// Game units to terminal cells.
pub const DEFAULT_MAP_SCALE: f64 = 0.2;
/// Columns left free for the action menu, to the left of the map.
pub const MAP_LEFT_PADDING: u16 = 20;
pub const MAP_TOP_PADDING: u16 = 0;
pub const DEBUG_PANEL_WIDTH: u16 = 60;
pub const DEBUG_PANEL_HEIGHT: u16 = 20;
/// Largest map grid ever built, in cells from the center.
pub const MAX_GRID_RADIUS: i32 = 512;
/// Maximum number of characters an input field holds.
pub const FIELD_CAPACITY: usize = 16;

/// Terminal colors understood by every backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    Reset,
    Black,
    White,
    Red,
    Cyan,
    Magenta,
    Blue,
}

/// Foreground, background and attributes for one kind of cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tone {
    pub fg: Color,
    pub bg: Color,
    pub dim: bool,
    pub reverse: bool,
}

impl Tone {
    pub const fn new(fg: Color, bg: Color) -> Self {
        Tone { fg, bg, dim: false, reverse: false }
    }

    pub const fn dim(mut self) -> Self {
        self.dim = true;
        self
    }

    pub const fn reverse(mut self) -> Self {
        self.reverse = true;
        self
    }
}

/// Color table for every [`Style`](crate::Style) the UI draws with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub plain: Tone,
    pub highlight: Tone,
    pub ground: Tone,
    pub base: Tone,
    pub unit: Tone,
    pub target: Tone,
    pub destination: Tone,
    pub popup: Tone,
    pub field: Tone,
    pub cursor: Tone,
}

impl Default for Palette {
    fn default() -> Self {
        let plain = Tone::new(Color::Reset, Color::Reset);
        Palette {
            plain,
            highlight: plain.reverse(),
            ground: Tone::new(Color::White, Color::Black).dim(),
            base: Tone::new(Color::Magenta, Color::Black),
            unit: Tone::new(Color::Cyan, Color::Black),
            target: Tone::new(Color::Red, Color::Black),
            destination: Tone::new(Color::Cyan, Color::Black).dim(),
            popup: Tone::new(Color::Black, Color::Blue).dim(),
            field: Tone::new(Color::Black, Color::Blue).reverse(),
            cursor: Tone::new(Color::Blue, Color::White),
        }
    }
}

/// Everything the client needs to know at startup.
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    /// Base URL of the game server, without a trailing slash.
    pub base_url: String,
    pub refresh_interval: Duration,
    /// `None` waits for the server forever.
    pub request_timeout: Option<Duration>,
    pub map_scale: f64,
    pub map_left_padding: u16,
    pub map_top_padding: u16,
    pub debug_panel: bool,
    pub palette: Palette,
}

impl ClientConfig {
    pub fn new(base_url: &str) -> Self {
        ClientConfig {
            base_url: String::from(base_url.trim_end_matches('/')),
            refresh_interval: DEFAULT_REFRESH_INTERVAL,
            request_timeout: None,
            map_scale: DEFAULT_MAP_SCALE,
            map_left_padding: MAP_LEFT_PADDING,
            map_top_padding: MAP_TOP_PADDING,
            debug_panel: true,
            palette: Palette::default(),
        }
    }
}
