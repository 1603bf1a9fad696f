use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::core::config::{parse_columns, parse_style};

/// Top-level CLI structure.
#[derive(Parser)]
#[command(
    name = "databar",
    about = "Spreadsheet-style data bars for numeric CSV tables"
)]
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Command,

    /// Emit per-group and timing diagnostics
    #[arg(long, global = true)]
    pub debug: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Write the table as HTML with bar overlays
    Html(TableArgs),
    /// Draw the table in the terminal
    Show(TableArgs),
    /// Show the bar palette
    Colors,
    /// Print example invocations
    Examples,
}

/// Comma separated column indices, e.g. `1,2`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Columns(pub Vec<usize>);

fn columns(s: &str) -> Result<Columns, crate::core::error::ConfigError> {
    parse_columns(s).map(Columns)
}

/// `databar html …` / `databar show …`
#[derive(Args, Debug)]
pub struct TableArgs {
    /// CSV path (use `-` for stdin)
    #[arg(value_name = "FILE", default_value = "-")]
    pub file: PathBuf,

    /// JSON configuration file; flags take precedence
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Columns sharing one range and colour (repeatable)
    #[arg(short, long = "group", value_name = "COLS", value_parser = columns)]
    pub groups: Vec<Columns>,

    /// Columns that get no bars at all
    #[arg(short, long, value_name = "COLS", value_parser = columns)]
    pub ignore: Vec<Columns>,

    /// Alpha of the positive bar colours, 0 to 1 [default: 0.4]
    #[arg(long)]
    pub opacity: Option<f64>,

    /// Style override `property=value` (repeatable)
    #[arg(long, value_name = "DECL", value_parser = parse_style)]
    pub css: Vec<(String, String)>,

    /// Fail when a column group holds no numbers instead of skipping it
    #[arg(long)]
    pub strict: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeated_groups_and_styles() {
        let cli = Cli::try_parse_from([
            "databar", "html", "t.csv", "-g", "1,2", "-g", "4,6", "-i", "2,3", "--css",
            "text-align=left", "--debug",
        ])
        .unwrap();
        assert!(cli.debug);
        let Command::Html(a) = cli.cmd else {
            panic!("expected html");
        };
        assert_eq!(a.groups, vec![Columns(vec![1, 2]), Columns(vec![4, 6])]);
        assert_eq!(a.ignore, vec![Columns(vec![2, 3])]);
        assert_eq!(a.css, vec![("text-align".to_owned(), "left".to_owned())]);
        assert_eq!(a.file, PathBuf::from("t.csv"));
    }

    #[test]
    fn stdin_is_the_default_input() {
        let cli = Cli::try_parse_from(["databar", "show"]).unwrap();
        let Command::Show(a) = cli.cmd else {
            panic!("expected show");
        };
        assert_eq!(a.file, PathBuf::from("-"));
        assert!(a.groups.is_empty());
    }

    #[test]
    fn bad_column_list_is_rejected() {
        assert!(Cli::try_parse_from(["databar", "html", "-g", "1,x"]).is_err());
    }
}
