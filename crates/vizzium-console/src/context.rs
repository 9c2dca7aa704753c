//! The state a command handler may touch.

use vizzium_core::{ConsoleControl, Target};

use crate::screen::Screen;
use crate::view::DebugView;

/// Console state shared with command handlers: the target, the view that
/// mirrors it and the screen both write into.
#[derive(Debug)]
pub struct DebugContext<T> {
    pub target: T,
    pub view: DebugView,
    pub screen: Screen,
    quit_requested: bool,
}

impl<T: Target> DebugContext<T> {
    pub fn new(target: T, view: DebugView, screen: Screen) -> Self {
        Self {
            target,
            view,
            screen,
            quit_requested: false,
        }
    }

    pub fn quit_requested(&self) -> bool {
        self.quit_requested
    }

    pub fn refresh_memory(&mut self) {
        self.view.refresh_memory(&self.target, &mut self.screen);
    }

    pub fn refresh_status(&mut self) {
        self.view.refresh_status(&self.target, &mut self.screen);
    }

    pub fn refresh_all(&mut self) {
        self.view.refresh_all(&self.target, &mut self.screen);
    }
}

impl<T> ConsoleControl for DebugContext<T> {
    fn request_quit(&mut self) {
        tracing::info!("Quit requested");
        self.quit_requested = true;
    }
}
