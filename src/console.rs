/***************************************/
/*        3rd party libraries          */
/***************************************/
use std::str::FromStr;
use thiserror::Error;

/***************************************/
/*       Public data structures        */
/***************************************/

/// One line typed at the simulator console.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    PressCabin(i32),
    Call(i32),
    TogglePower,
    EmergencyStop,
    Status,
    Help,
    Quit,
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ParseError {
    #[error("empty command")]
    Empty,
    #[error("unknown command '{0}', type 'help' for a list")]
    Unknown(String),
    #[error("'{0}' needs a floor number")]
    MissingFloor(&'static str),
    #[error("'{0}' is not a floor number")]
    InvalidFloor(String),
    #[error("unexpected argument '{0}'")]
    TrailingArgument(String),
}

pub const HELP: &str = "\
commands:
  cabin <floor>   press a floor button inside the cabin (alias: press)
  call <floor>    call the elevator from a floor
  power           toggle power
  stop            emergency stop, cuts power
  status          print the elevator state as JSON
  help            show this list
  quit            exit";

/***************************************/
/*             Public API              */
/***************************************/
impl Command {
    pub fn parse(line: &str) -> Result<Command, ParseError> {
        let mut words = line.split_whitespace();
        let Some(name) = words.next() else {
            return Err(ParseError::Empty);
        };

        let command = match name.to_ascii_lowercase().as_str() {
            "cabin" | "press" => Command::PressCabin(parse_floor("cabin", words.next())?),
            "call" => Command::Call(parse_floor("call", words.next())?),
            "power" => Command::TogglePower,
            "stop" => Command::EmergencyStop,
            "status" => Command::Status,
            "help" | "?" => Command::Help,
            "quit" | "exit" => Command::Quit,
            _ => return Err(ParseError::Unknown(name.to_string())),
        };

        match words.next() {
            Some(extra) => Err(ParseError::TrailingArgument(extra.to_string())),
            None => Ok(command),
        }
    }
}

impl FromStr for Command {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Command::parse(s)
    }
}

fn parse_floor(command: &'static str, word: Option<&str>) -> Result<i32, ParseError> {
    let word = word.ok_or(ParseError::MissingFloor(command))?;
    word.parse::<i32>()
        .map_err(|_| ParseError::InvalidFloor(word.to_string()))
}

#[cfg(test)]
mod console_tests {
    use super::*;

    #[test]
    fn test_parse_commands() {
        assert_eq!(Command::parse("cabin 5"), Ok(Command::PressCabin(5)));
        assert_eq!(Command::parse("  PRESS   -1 "), Ok(Command::PressCabin(-1)));
        assert_eq!(Command::parse("call 3"), Ok(Command::Call(3)));
        assert_eq!(Command::parse("power"), Ok(Command::TogglePower));
        assert_eq!(Command::parse("stop"), Ok(Command::EmergencyStop));
        assert_eq!(Command::parse("status"), Ok(Command::Status));
        assert_eq!("quit".parse::<Command>(), Ok(Command::Quit));
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(Command::parse("   "), Err(ParseError::Empty));
        assert_eq!(
            Command::parse("jump 3"),
            Err(ParseError::Unknown("jump".to_string()))
        );
        assert_eq!(Command::parse("call"), Err(ParseError::MissingFloor("call")));
        assert_eq!(
            Command::parse("cabin five"),
            Err(ParseError::InvalidFloor("five".to_string()))
        );
        assert_eq!(
            Command::parse("power on"),
            Err(ParseError::TrailingArgument("on".to_string()))
        );
    }
}
