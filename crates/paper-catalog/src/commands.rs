//! Parsing of interactive commands.
//!
//! One line of input becomes one [`Command`]. Parse failures carry a usage
//! hint for the prompt, never an error state.

use crate::models::{SearchField, SortDirection, SortKey};

/// Command summary printed by `help` and on unknown input.
pub const USAGE: &str = "\
Commands:
  search <text>      filter by the selected field (empty clears)
  clear              clear the filter
  field <name>       title | authors | journal
  sort <key>         title | year | impact
  asc | desc         sort direction
  page <n>           jump to page n
  next | prev        page forward / back
  view <n>           show details for card n on this page
  download <n>       download the PDF for card n on this page
  help               show this summary
  quit               exit";

/// A user intent entered at the prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Set the free-text query.
    Search(String),
    /// Clear the free-text query.
    ClearSearch,
    /// Select the search field.
    Field(SearchField),
    /// Select the sort key.
    Sort(SortKey),
    /// Select the sort direction.
    Direction(SortDirection),
    /// Jump to a page.
    Page(usize),
    /// Next page.
    Next,
    /// Previous page.
    Prev,
    /// Show details for a card on the current page.
    View(usize),
    /// Download the file for a card on the current page.
    Download(usize),
    /// Print the command summary.
    Help,
    /// Exit the session.
    Quit,
}

impl Command {
    /// Parse one input line. `Err` carries a usage hint.
    pub fn parse(line: &str) -> Result<Self, String> {
        let trimmed = line.trim();
        let (head, rest) = trimmed
            .split_once(char::is_whitespace)
            .map_or((trimmed, ""), |(head, rest)| (head, rest.trim()));

        match head {
            "search" | "s" => {
                if rest.is_empty() {
                    Ok(Self::ClearSearch)
                } else {
                    Ok(Self::Search(rest.to_string()))
                }
            }
            "clear" => Ok(Self::ClearSearch),
            "field" | "f" => match rest {
                "title" => Ok(Self::Field(SearchField::Title)),
                "authors" | "author" => Ok(Self::Field(SearchField::Authors)),
                "journal" => Ok(Self::Field(SearchField::Journal)),
                _ => Err("usage: field title|authors|journal".to_string()),
            },
            "sort" => match rest {
                "title" => Ok(Self::Sort(SortKey::Title)),
                "year" => Ok(Self::Sort(SortKey::Year)),
                "impact" | "impact_factor" | "if" => Ok(Self::Sort(SortKey::ImpactFactor)),
                _ => Err("usage: sort title|year|impact".to_string()),
            },
            "asc" => Ok(Self::Direction(SortDirection::Asc)),
            "desc" => Ok(Self::Direction(SortDirection::Desc)),
            "page" => parse_number(rest, "usage: page <n>").map(Self::Page),
            "next" | "n" => Ok(Self::Next),
            "prev" | "p" => Ok(Self::Prev),
            "view" | "v" => parse_number(rest, "usage: view <n>").map(Self::View),
            "download" | "d" => parse_number(rest, "usage: download <n>").map(Self::Download),
            "help" | "h" | "?" => Ok(Self::Help),
            "quit" | "q" | "exit" => Ok(Self::Quit),
            other => Err(format!("unknown command '{other}' (try 'help')")),
        }
    }
}

fn parse_number(rest: &str, usage: &str) -> Result<usize, String> {
    rest.parse().map_err(|_| usage.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_keeps_spaces_in_query() {
        assert_eq!(
            Command::parse("search deep learning"),
            Ok(Command::Search("deep learning".to_string()))
        );
        assert_eq!(Command::parse("search"), Ok(Command::ClearSearch));
        assert_eq!(Command::parse("clear"), Ok(Command::ClearSearch));
    }

    #[test]
    fn test_field_and_sort_variants() {
        assert_eq!(Command::parse("field journal"), Ok(Command::Field(SearchField::Journal)));
        assert_eq!(Command::parse("field author"), Ok(Command::Field(SearchField::Authors)));
        assert_eq!(Command::parse("sort impact"), Ok(Command::Sort(SortKey::ImpactFactor)));
        assert_eq!(Command::parse("sort year"), Ok(Command::Sort(SortKey::Year)));
        assert!(Command::parse("sort sideways").is_err());
    }

    #[test]
    fn test_paging_commands() {
        assert_eq!(Command::parse("page 3"), Ok(Command::Page(3)));
        assert_eq!(Command::parse("next"), Ok(Command::Next));
        assert_eq!(Command::parse("p"), Ok(Command::Prev));
        assert!(Command::parse("page three").is_err());
    }

    #[test]
    fn test_view_download_and_quit() {
        assert_eq!(Command::parse("view 2"), Ok(Command::View(2)));
        assert_eq!(Command::parse("d 1"), Ok(Command::Download(1)));
        assert_eq!(Command::parse("quit"), Ok(Command::Quit));
        assert_eq!(Command::parse("  q  "), Ok(Command::Quit));
    }

    #[test]
    fn test_unknown_command_hints_at_help() {
        let err = Command::parse("frobnicate").unwrap_err();
        assert!(err.contains("help"));
    }
}
