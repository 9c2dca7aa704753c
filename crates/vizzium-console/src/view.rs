//! Debug view controller: keeps the memory listing and the CPU status panel
//! in step with the target.

use vizzium_core::{CommandError, Target, TargetSnapshot, DEFAULT_MEMORY_MARGIN};

use crate::screen::{MemoryRow, Screen};

#[derive(Debug, Clone)]
pub struct DebugView {
    /// Address the memory listing normally starts at.
    base_address: u16,
    /// Address the listing currently on screen starts at.
    shown_from: u16,
    /// Screen rows the memory listing leaves free.
    margin: u16,
}

impl Default for DebugView {
    fn default() -> Self {
        Self::new(0, DEFAULT_MEMORY_MARGIN)
    }
}

impl DebugView {
    pub fn new(base_address: u16, margin: u16) -> Self {
        Self {
            base_address,
            shown_from: base_address,
            margin,
        }
    }

    pub fn base_address(&self) -> u16 {
        self.base_address
    }

    pub fn set_base_address(&mut self, address: u16) {
        self.base_address = address;
    }

    /// Number of memory rows that fit on `screen`.
    pub fn window_len(&self, screen: &Screen) -> usize {
        usize::from(screen.height.saturating_sub(self.margin))
    }

    /// Re-render the memory listing from the base address.
    pub fn refresh_memory<T: Target + ?Sized>(&mut self, target: &T, screen: &mut Screen) {
        self.render_memory_from(target, screen, self.base_address);
    }

    /// Render the memory listing starting at `start` without moving the base
    /// address. Addresses wrap at the top of the 16-bit space.
    pub fn render_memory_from<T: Target + ?Sized>(
        &mut self,
        target: &T,
        screen: &mut Screen,
        start: u16,
    ) {
        let pc = target.program_counter();
        let rows = self.window_len(screen);

        screen.memory = (0..rows)
            .map(|offset| {
                let address = start.wrapping_add(offset as u16);
                MemoryRow {
                    address,
                    value: target.read(address),
                    current: address == pc,
                }
            })
            .collect();
        self.shown_from = start;
    }

    /// Re-render the listing from wherever it currently starts, e.g. after a
    /// resize.
    pub fn redraw_memory<T: Target + ?Sized>(&mut self, target: &T, screen: &mut Screen) {
        let start = self.shown_from;
        self.render_memory_from(target, screen, start);
    }

    pub fn refresh_status<T: Target + ?Sized>(&self, target: &T, screen: &mut Screen) {
        screen.status = TargetSnapshot::capture(target);
    }

    pub fn refresh_all<T: Target + ?Sized>(&mut self, target: &T, screen: &mut Screen) {
        self.refresh_memory(target, screen);
        self.refresh_status(target, screen);
    }

    /// Put a failed command's message on the input line.
    pub fn show_error(&self, screen: &mut Screen, error: &CommandError) {
        match error {
            CommandError::ResourceUnavailable { path, source } => {
                tracing::warn!(path = %path, error = %source, "Unable to open target image");
            }
            other => tracing::warn!(error = %other, "Command failed"),
        }
        screen.input.show_error(error.to_string());
    }
}
