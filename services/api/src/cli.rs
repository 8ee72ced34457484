use crate::demo::{run_assess, run_demo, AssessArgs, DemoArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use eudr_readiness::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "EUDR Readiness",
    about = "Score exporter questionnaires against the EU Deforestation Regulation and serve the scoring API",
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
    /// Score a questionnaire JSON file and print the readiness report
    Assess(AssessArgs),
    /// Walk through sample exporters, a portfolio summary, and a DDS draft
    Demo(DemoArgs),
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
        Command::Assess(args) => run_assess(args),
        Command::Demo(args) => run_demo(args),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serve_is_the_default_command() {
        let cli = Cli::try_parse_from(["eudr-readiness-api"]).expect("parses without args");
        assert!(cli.command.is_none());
    }

    #[test]
    fn assess_accepts_input_and_date() {
        let cli = Cli::try_parse_from([
            "eudr-readiness-api",
            "assess",
            "--input",
            "questionnaire.json",
            "--today",
            "2025-03-01",
            "--json",
        ])
        .expect("assess args parse");

        match cli.command {
            Some(Command::Assess(args)) => {
                assert_eq!(args.input.to_string_lossy(), "questionnaire.json");
                assert!(args.today.is_some());
                assert!(args.json);
            }
            other => panic!("expected assess command, got {other:?}"),
        }
    }

    #[test]
    fn rejects_malformed_dates() {
        let result = Cli::try_parse_from([
            "eudr-readiness-api",
            "demo",
            "--today",
            "March 1st",
        ]);
        assert!(result.is_err());
    }
}
