//! Command registry and dispatcher.
//!
//! A registry maps case-sensitive command names to handlers. Handlers are
//! opaque closures over a console context `C`, so a target-specific console
//! extends the base command set by registering more entries instead of
//! overriding anything. Registering an existing name replaces the previous
//! handler.

use std::collections::HashMap;
use std::fmt;

use crate::constants::QUIT_COMMANDS;
use crate::error::{CommandError, CommandResult};

/// Context capability every console provides to the base commands.
pub trait ConsoleControl {
    /// Ask the console loop to stop after the current key.
    fn request_quit(&mut self);
}

/// A command handler. Receives the full token list, name included.
pub type Handler<C> = Box<dyn Fn(&mut C, &[String]) -> CommandResult>;

pub struct CommandRegistry<C> {
    handlers: HashMap<String, Handler<C>>,
}

impl<C> Default for CommandRegistry<C> {
    fn default() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }
}

impl<C> CommandRegistry<C> {
    /// An empty registry, without even `quit`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `name` to `handler`. Returns `true` if an earlier binding was
    /// replaced.
    pub fn register<F>(&mut self, name: impl Into<String>, handler: F) -> bool
    where
        F: Fn(&mut C, &[String]) -> CommandResult + 'static,
    {
        let name = name.into();
        let replaced = self.handlers.insert(name.clone(), Box::new(handler)).is_some();
        if replaced {
            tracing::debug!(command = %name, "Command handler replaced");
        }
        replaced
    }

    /// Resolve `tokens[0]` and run its handler.
    ///
    /// An empty token list is reported as an unknown command with an empty
    /// name.
    pub fn dispatch(&self, ctx: &mut C, tokens: &[String]) -> CommandResult {
        let name = tokens.first().map(String::as_str).unwrap_or_default();
        match self.handlers.get(name) {
            Some(handler) => {
                tracing::debug!(command = %name, args = tokens.len().saturating_sub(1), "Dispatching command");
                handler(ctx, tokens)
            }
            None => Err(CommandError::UnknownCommand(name.to_string())),
        }
    }

    /// Registered names in sorted order.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.handlers.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl<C: ConsoleControl + 'static> CommandRegistry<C> {
    /// A registry holding the commands every console understands.
    pub fn with_base_commands() -> Self {
        let mut registry = Self::new();
        for name in QUIT_COMMANDS {
            registry.register(name, |ctx: &mut C, _tokens: &[String]| {
                ctx.request_quit();
                Ok(())
            });
        }
        registry
    }
}

impl<C> fmt::Debug for CommandRegistry<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandRegistry")
            .field("commands", &self.names())
            .finish()
    }
}
