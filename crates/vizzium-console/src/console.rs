//! The console loop.
//!
//! `Console` owns the terminal, the target (inside its `DebugContext`), the
//! command registry and the mode machine. Each key read from the terminal is
//! handled to completion, including dispatch and redraw, before the next
//! read. After every dispatch the console returns to Normal mode and hides
//! the cursor, whatever the handler did.

use std::io;

use vizzium_core::{
    tokenize, CommandHistory, CommandRegistry, ConsoleControl, EditOutcome, Key, Mode,
    ModeMachine, Target, Transition, DEFAULT_MEMORY_MARGIN, DEFAULT_STEP_HOTKEY,
};

use crate::commands::register_target_commands;
use crate::context::DebugContext;
use crate::screen::Screen;
use crate::view::DebugView;

/// Terminal capability the console drives.
pub trait ConsoleTerminal {
    /// Block until the next key.
    fn read_key(&mut self) -> io::Result<Key>;

    /// Current size as `(width, height)`.
    fn size(&self) -> io::Result<(u16, u16)>;

    /// Present `screen`.
    fn draw(&mut self, screen: &Screen) -> io::Result<()>;
}

/// Maps the current command line to a completed one.
pub type Completer = Box<dyn Fn(&str) -> Option<String>>;

/// Settings the console needs at construction.
#[derive(Debug, Clone)]
pub struct ConsoleSettings {
    pub base_address: u16,
    pub memory_margin: u16,
    pub show_status_panel: bool,
    pub hotkeys: Vec<(char, String)>,
    pub tab_completion: bool,
}

impl Default for ConsoleSettings {
    fn default() -> Self {
        Self {
            base_address: 0,
            memory_margin: DEFAULT_MEMORY_MARGIN,
            show_status_panel: true,
            hotkeys: vec![(DEFAULT_STEP_HOTKEY, "step".to_string())],
            tab_completion: false,
        }
    }
}

pub struct Console<T, D> {
    terminal: D,
    context: DebugContext<T>,
    registry: CommandRegistry<DebugContext<T>>,
    modes: ModeMachine,
    completer: Option<Completer>,
}

impl<T: Target + 'static, D: ConsoleTerminal> Console<T, D> {
    /// Build a console with the base and target commands registered and the
    /// views rendered from the configured base address.
    pub fn new(target: T, terminal: D, settings: &ConsoleSettings) -> io::Result<Self> {
        let (width, height) = terminal.size()?;
        let mut screen = Screen::new(width, height);
        screen.panels.status = settings.show_status_panel;

        let view = DebugView::new(settings.base_address, settings.memory_margin);
        let mut context = DebugContext::new(target, view, screen);
        context.refresh_all();

        let mut registry = CommandRegistry::with_base_commands();
        register_target_commands(&mut registry);

        let mut modes = ModeMachine::new();
        for (key, command) in &settings.hotkeys {
            modes.bind_hotkey(*key, command.clone());
        }

        let mut console = Self {
            terminal,
            context,
            registry,
            modes,
            completer: None,
        };
        if settings.tab_completion {
            console.enable_command_completion();
        }
        Ok(console)
    }

    /// Read and handle keys until a quit is requested.
    pub fn run(&mut self) -> anyhow::Result<()> {
        tracing::info!(commands = self.registry.len(), "Console started");
        self.terminal.draw(&self.context.screen)?;

        while !self.context.quit_requested() {
            let key = self.terminal.read_key()?;
            self.handle_key(key)?;
        }

        tracing::info!(submitted = self.history().len(), "Console stopped");
        Ok(())
    }

    /// Handle one key and redraw if anything changed.
    pub fn handle_key(&mut self, key: Key) -> io::Result<()> {
        let screen = &mut self.context.screen;

        match self.modes.handle(key) {
            Transition::Ignored => return Ok(()),
            Transition::EnteredCommand => {
                screen.input.prompt("");
                screen.cursor_visible = true;
            }
            Transition::LineChanged => screen.input.prompt(self.modes.line()),
            Transition::Cancelled => {
                screen.input.hide();
                screen.cursor_visible = false;
            }
            Transition::Submitted(line) => {
                let tokens = tokenize(&line);
                self.execute(&tokens);
            }
            Transition::Hotkey(command) => self.execute(&[command]),
            Transition::CompletionRequested => {
                let Some(completer) = &self.completer else {
                    return Ok(());
                };
                let outcome = self.modes.editor_mut().complete(|line| completer(line));
                if outcome == EditOutcome::Unchanged {
                    return Ok(());
                }
                screen.input.prompt(self.modes.line());
            }
            Transition::Resized => {
                let (width, height) = self.terminal.size()?;
                screen.resize(width, height);
                let DebugContext { target, view, screen, .. } = &mut self.context;
                view.redraw_memory(target, screen);
            }
            Transition::Interrupted => self.context.request_quit(),
        }

        self.terminal.draw(&self.context.screen)
    }

    /// Dispatch `tokens` and apply the post-dispatch policy. Errors end up on
    /// the input line.
    pub fn execute(&mut self, tokens: &[String]) {
        self.context.screen.input.clear_error();

        if let Err(err) = self.registry.dispatch(&mut self.context, tokens) {
            let DebugContext { view, screen, .. } = &mut self.context;
            view.show_error(screen, &err);
        }

        self.modes.force_normal();
        self.context.screen.cursor_visible = false;
    }

    /// Install a Tab completer for the command line.
    pub fn set_completer<F>(&mut self, completer: F)
    where
        F: Fn(&str) -> Option<String> + 'static,
    {
        self.completer = Some(Box::new(completer));
    }

    /// Complete command names from the registry as it is now.
    pub fn enable_command_completion(&mut self) {
        let names = self.registry.names().into_iter().map(str::to_string).collect();
        self.set_completer(prefix_completer(names));
    }

    /// Registry, for consoles that add their own commands.
    pub fn registry_mut(&mut self) -> &mut CommandRegistry<DebugContext<T>> {
        &mut self.registry
    }

    pub fn context(&self) -> &DebugContext<T> {
        &self.context
    }

    pub fn context_mut(&mut self) -> &mut DebugContext<T> {
        &mut self.context
    }

    pub fn mode(&self) -> Mode {
        self.modes.mode()
    }

    pub fn line(&self) -> &str {
        self.modes.line()
    }

    pub fn history(&self) -> &CommandHistory {
        self.modes.editor().history()
    }

    pub fn terminal(&self) -> &D {
        &self.terminal
    }
}

/// Completes the command name when exactly one of `names` starts with it.
/// Lines that already contain arguments are left alone.
pub fn prefix_completer(names: Vec<String>) -> impl Fn(&str) -> Option<String> {
    move |line: &str| {
        if line.contains(' ') {
            return None;
        }
        let mut matches = names.iter().filter(|name| name.starts_with(line));
        match (matches.next(), matches.next()) {
            (Some(name), None) => Some(name.clone()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn completes_unique_prefix() {
        let complete = prefix_completer(names(&["showcpu", "step", "hidecpu"]));
        assert_eq!(complete("sh").as_deref(), Some("showcpu"));
        assert_eq!(complete("h").as_deref(), Some("hidecpu"));
    }

    #[test]
    fn ambiguous_or_unknown_prefix_is_not_completed() {
        let complete = prefix_completer(names(&["showcpu", "step"]));
        assert_eq!(complete("s"), None);
        assert_eq!(complete("x"), None);
        assert_eq!(complete("step 1"), None);
    }
}
