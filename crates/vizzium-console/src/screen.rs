//! Retained display state.
//!
//! Commands and the debug view write into a `Screen`; the terminal adapter
//! turns it into a frame on every refresh. Nothing here touches the
//! terminal directly.

use std::fmt;

use vizzium_core::{RegisterPair, TargetSnapshot, COMMAND_PROMPT};

/// The single-line input/error region at the bottom of the screen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputLine {
    text: String,
    error: Option<String>,
    visible: bool,
}

impl InputLine {
    /// Show the prompt followed by `line`, dropping any error.
    pub fn prompt(&mut self, line: &str) {
        self.text.clear();
        self.text.push(COMMAND_PROMPT);
        self.text.push_str(line);
        self.error = None;
        self.visible = true;
    }

    /// Clear and hide the region.
    pub fn hide(&mut self) {
        self.text.clear();
        self.error = None;
        self.visible = false;
    }

    /// Replace the prompt with a highlighted message until the next redraw
    /// of the line.
    pub fn show_error(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
        self.visible = true;
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// What the region currently displays.
    pub fn displayed(&self) -> &str {
        match (&self.error, self.visible) {
            (Some(error), _) => error.as_str(),
            (None, true) => self.text.as_str(),
            (None, false) => "",
        }
    }
}

/// One line of the memory listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemoryRow {
    pub address: u16,
    pub value: u8,
    /// The program counter points at this address.
    pub current: bool,
}

impl fmt::Display for MemoryRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#06x}: {:#04x}", self.address, self.value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanelVisibility {
    /// CPU status panel.
    pub status: bool,
}

impl Default for PanelVisibility {
    fn default() -> Self {
        Self { status: true }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Screen {
    pub width: u16,
    pub height: u16,
    pub input: InputLine,
    pub cursor_visible: bool,
    pub memory: Vec<MemoryRow>,
    pub status: TargetSnapshot,
    pub panels: PanelVisibility,
}

impl Screen {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    pub fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
    }

    /// Row showing `address`, if it is inside the memory window.
    pub fn memory_row(&self, address: u16) -> Option<&MemoryRow> {
        self.memory.iter().find(|row| row.address == address)
    }

    /// Row emphasized as the current instruction.
    pub fn highlighted_row(&self) -> Option<&MemoryRow> {
        self.memory.iter().find(|row| row.current)
    }

    /// Status panel text, one entry per line; empty entries separate groups.
    pub fn status_lines(&self) -> Vec<String> {
        let s = &self.status;

        let mut lines = vec![
            format!("PC: {:#06x}", s.pc),
            format!("SP: {:#06x}", s.sp),
            String::new(),
        ];
        lines.extend(
            RegisterPair::BANKED
                .iter()
                .zip(s.primary)
                .map(|(pair, value)| format!("{pair}: {value:#06x}")),
        );
        lines.push(String::new());
        lines.extend(
            RegisterPair::BANKED
                .iter()
                .zip(s.shadow)
                .map(|(pair, value)| format!("{pair}': {value:#06x}")),
        );
        lines.push(String::new());
        lines.push(format!("{}: {:#06x}", RegisterPair::IX, s.ix));
        lines.push(format!("{}: {:#06x}", RegisterPair::IY, s.iy));
        lines.push(String::new());
        lines.push(format!("Cycles: {}", s.cycles));
        lines
    }
}
