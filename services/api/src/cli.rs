use crate::generate::{print_schema, run_generate, GenerateArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use oby_mapper::error::AppError;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(
    name = "OBY Mapper",
    about = "Map citizenship cases onto the OBY government submission format",
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
    /// Generate the OBY document for one case from a seed file
    Generate(GenerateArgs),
    /// Print the active OBY JSON schema
    Schema,
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
    /// JSON seed file for the in-memory case store (overrides OBY_SEED_PATH)
    #[arg(long)]
    pub(crate) seed: Option<PathBuf>,
}

pub(crate) async fn run() -> Result<ExitCode, AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await.map(|()| ExitCode::SUCCESS),
        Command::Generate(args) => run_generate(args).await,
        Command::Schema => print_schema().map(|()| ExitCode::SUCCESS),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serve_is_the_default_command() {
        let cli = Cli::try_parse_from(["oby-mapper-api"]).expect("parses");
        assert!(cli.command.is_none());
    }

    #[test]
    fn generate_requires_seed_and_case() {
        assert!(Cli::try_parse_from(["oby-mapper-api", "generate", "--case-id", "PL-1"]).is_err());

        let cli = Cli::try_parse_from([
            "oby-mapper-api",
            "generate",
            "--seed",
            "cases.json",
            "--case-id",
            "PL-1",
            "--compact",
        ])
        .expect("parses");
        match cli.command {
            Some(Command::Generate(args)) => {
                assert_eq!(args.seed, PathBuf::from("cases.json"));
                assert_eq!(args.case_id, "PL-1");
                assert!(args.compact);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
