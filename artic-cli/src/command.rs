//! Commands typed at the prompt.

use std::str::FromStr;

use thiserror::Error;

pub const HELP: &str = "\
Navigation
  n, next            next page
  p, prev            previous page
  page N             go to page N
  first, last        first or last page
  refresh            reload the current page

Selection (row numbers are 1-based and refer to the current page)
  toggle R...        toggle the checkbox on rows R...
  select R...        select exactly rows R... on this page
  all, none          select all or no rows on this page
  row N              select row N only (keeps other selections)
  selected           list everything selected on every page
  clear              clear every selection

  <Enter>            redraw the table
  help               this text
  q, quit            exit";

/// A parsed prompt line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Next,
    Previous,
    First,
    Last,
    Page(u32),
    Refresh,
    Toggle(Vec<usize>),
    Select(Vec<usize>),
    All,
    None,
    Row(usize),
    Selected,
    Clear,
    Show,
    Help,
    Quit,
}

/// Prompt parse errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("unknown command `{0}`, type `help` for a list")]
    Unknown(String),
    #[error("`{0}` needs {1}")]
    MissingArgument(&'static str, &'static str),
    #[error("`{0}` is not a positive number")]
    InvalidNumber(String),
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let Some(name) = words.next() else {
            return Ok(Command::Show);
        };
        let args: Vec<&str> = words.collect();

        let command = match name.to_ascii_lowercase().as_str() {
            "n" | "next" => Command::Next,
            "p" | "prev" | "previous" => Command::Previous,
            "first" => Command::First,
            "last" => Command::Last,
            "page" | "g" => {
                let arg = args
                    .first()
                    .ok_or(CommandError::MissingArgument("page", "a page number"))?;
                Command::Page(positive(arg)?)
            }
            "refresh" | "r" => Command::Refresh,
            "toggle" | "t" => Command::Toggle(rows("toggle", &args)?),
            "select" | "s" => Command::Select(rows("select", &args)?),
            "all" => Command::All,
            "none" => Command::None,
            "row" => {
                let arg = args
                    .first()
                    .ok_or(CommandError::MissingArgument("row", "a row number"))?;
                Command::Row(number(arg)?)
            }
            "selected" | "ls" => Command::Selected,
            "clear" => Command::Clear,
            "help" | "h" | "?" => Command::Help,
            "q" | "quit" | "exit" => Command::Quit,
            other => return Err(CommandError::Unknown(other.to_string())),
        };
        Ok(command)
    }
}

/// Parses row numbers, accepting both `1 2 3` and `1,2,3`.
fn rows(name: &'static str, args: &[&str]) -> Result<Vec<usize>, CommandError> {
    let rows: Vec<usize> = args
        .iter()
        .flat_map(|arg| arg.split(','))
        .filter(|part| !part.is_empty())
        .map(number)
        .collect::<Result<_, _>>()?;

    if rows.is_empty() {
        return Err(CommandError::MissingArgument(name, "one or more row numbers"));
    }
    Ok(rows)
}

/// Row numbers are range-checked against the page later, so 0 passes here.
fn number(arg: &str) -> Result<usize, CommandError> {
    arg.parse()
        .map_err(|_| CommandError::InvalidNumber(arg.to_string()))
}

fn positive(arg: &str) -> Result<u32, CommandError> {
    match arg.parse::<u32>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(CommandError::InvalidNumber(arg.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_navigation() {
        assert_eq!("n".parse(), Ok(Command::Next));
        assert_eq!("PREV".parse(), Ok(Command::Previous));
        assert_eq!("page 7".parse(), Ok(Command::Page(7)));
        assert_eq!("".parse(), Ok(Command::Show));
        assert_eq!("   ".parse(), Ok(Command::Show));
    }

    #[test]
    fn test_row_lists() {
        assert_eq!("toggle 1 3".parse(), Ok(Command::Toggle(vec![1, 3])));
        assert_eq!("select 2,4, 6".parse(), Ok(Command::Select(vec![2, 4, 6])));
        assert_eq!("row 13".parse(), Ok(Command::Row(13)));
    }

    #[test]
    fn test_errors() {
        assert_eq!(
            "page".parse::<Command>(),
            Err(CommandError::MissingArgument("page", "a page number"))
        );
        assert_eq!(
            "page 0".parse::<Command>(),
            Err(CommandError::InvalidNumber("0".to_string()))
        );
        assert_eq!(
            "toggle x".parse::<Command>(),
            Err(CommandError::InvalidNumber("x".to_string()))
        );
        assert!(matches!(
            "select".parse::<Command>(),
            Err(CommandError::MissingArgument("select", _))
        ));
        assert_eq!(
            "frobnicate".parse::<Command>(),
            Err(CommandError::Unknown("frobnicate".to_string()))
        );
    }
}
