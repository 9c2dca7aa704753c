//! Splitting of submitted command lines and parsing of numeric arguments.
//!
//! Tokens are separated by single spaces. Consecutive spaces therefore yield
//! empty tokens, while one trailing space is absorbed, so `"write 10 "`
//! tokenizes the same as `"write 10"`. An empty line yields no tokens.

use crate::error::CommandError;

/// Split a raw command line into tokens; token 0 is the command name.
pub fn tokenize(line: &str) -> Vec<String> {
    if line.is_empty() {
        return Vec::new();
    }

    let body = line.strip_suffix(' ').unwrap_or(line);
    body.split(' ').map(str::to_string).collect()
}

/// Parse a 16-bit address argument.
///
/// Accepts decimal (`4096`), `0x`-prefixed hex (`0x1000`) and `$`-prefixed
/// hex (`$1000`).
pub fn parse_address(token: &str, what: &'static str) -> Result<u16, CommandError> {
    let value = parse_number(token, what)?;
    u16::try_from(value).map_err(|_| invalid(what, token))
}

/// Parse an 8-bit value argument. Same notations as [`parse_address`].
pub fn parse_byte(token: &str, what: &'static str) -> Result<u8, CommandError> {
    let value = parse_number(token, what)?;
    u8::try_from(value).map_err(|_| invalid(what, token))
}

fn parse_number(token: &str, what: &'static str) -> Result<u32, CommandError> {
    let parsed = if let Some(hex) = token
        .strip_prefix("0x")
        .or_else(|| token.strip_prefix("0X"))
        .or_else(|| token.strip_prefix('$'))
    {
        u32::from_str_radix(hex, 16)
    } else {
        token.parse::<u32>()
    };

    parsed.map_err(|_| invalid(what, token))
}

fn invalid(what: &'static str, token: &str) -> CommandError {
    CommandError::InvalidArgument {
        what,
        value: token.to_string(),
    }
}
