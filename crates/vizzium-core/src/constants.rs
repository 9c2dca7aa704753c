/// Character that switches the console from Normal into Command mode.
pub const COMMAND_PROMPT: char = ':';

/// Hotkey bound to `step` when no keymap is configured.
pub const DEFAULT_STEP_HOTKEY: char = 's';

/// Rows of the display not available to the memory view.
pub const DEFAULT_MEMORY_MARGIN: u16 = 4;

/// Width of the status panel as a percentage of the screen.
pub const DEFAULT_STATUS_WIDTH_PERCENT: u16 = 20;

/// Default size of the target's backing memory (4 KiB, mirrored).
pub const DEFAULT_MEMORY_SIZE: usize = 0x1000;

/// Command names every console registers.
pub const QUIT_COMMANDS: [&str; 2] = ["q", "quit"];
