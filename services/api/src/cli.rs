use crate::commands::{run_group, GroupArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use club_grouper::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Club Grouper",
    about = "Group free-text team names into club and category buckets",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Group the Name column of a CSV sheet and write the reports
    Group(GroupArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Group(args) => run_group(args),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn group_accepts_several_candidate_sheets() {
        let cli = Cli::try_parse_from([
            "club-grouper",
            "group",
            "--input",
            "Fixtures.csv",
            "--input",
            "Teams.csv",
            "--output",
            "grouped.csv",
        ])
        .expect("arguments parse");

        match cli.command {
            Some(Command::Group(args)) => {
                assert_eq!(args.input.len(), 2);
                assert!(args.duplicates_output.is_none());
            }
            other => panic!("expected group command, got {other:?}"),
        }
    }

    #[test]
    fn serve_is_the_default_command() {
        let cli = Cli::try_parse_from(["club-grouper"]).expect("arguments parse");
        assert!(cli.command.is_none());
    }
}
