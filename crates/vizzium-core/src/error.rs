use thiserror::Error;

/// Errors a dispatched command can surface on the console's error line.
///
/// None of these terminate the console; the dispatcher reports them and the
/// loop carries on with the next key.
#[derive(Error, Debug)]
pub enum CommandError {
    #[error("Command not recognized: {0}")]
    UnknownCommand(String),

    #[error("Missing argument ({0})")]
    MissingArgument(&'static str),

    #[error("Invalid argument ({what}): {value}")]
    InvalidArgument { what: &'static str, value: String },

    #[error("Unable to open the file")]
    ResourceUnavailable {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

pub type CommandResult = Result<(), CommandError>;
