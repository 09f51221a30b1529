use crate::demo::{
    run_demo, run_pack_list, run_recommend, run_signal_pool, DemoArgs, PackListArgs,
    RecommendArgs, SignalPoolArgs,
};
use crate::server;
use clap::{Args, Parser, Subcommand};
use dialogue::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Dialogue",
    about = "Recommend service packs and assemble weekly signal pools for partner deals",
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
    /// Browse the service-pack catalog and score it against a deal
    Packs {
        #[command(subcommand)]
        command: PacksCommand,
    },
    /// Inspect merged account signals
    Signals {
        #[command(subcommand)]
        command: SignalsCommand,
    },
    /// Walk through a sample deal and its account signals
    Demo(DemoArgs),
}

#[derive(Subcommand, Debug)]
enum PacksCommand {
    /// List catalog packs, optionally filtered by tag
    List(PackListArgs),
    /// Rank packs for a deal context
    Recommend(RecommendArgs),
}

#[derive(Subcommand, Debug)]
enum SignalsCommand {
    /// Build the deduplicated signal pool for an account and week
    Pool(SignalPoolArgs),
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
        Command::Packs {
            command: PacksCommand::List(args),
        } => run_pack_list(args),
        Command::Packs {
            command: PacksCommand::Recommend(args),
        } => run_recommend(args),
        Command::Signals {
            command: SignalsCommand::Pool(args),
        } => run_signal_pool(args),
        Command::Demo(args) => run_demo(args),
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
    fn recommend_collects_repeated_capabilities() {
        let cli = Cli::try_parse_from([
            "dialogue",
            "packs",
            "recommend",
            "--mode",
            "Discovery / Qualification",
            "--capability",
            "Data Engineering=strong",
            "--capability",
            "AI Engineering=some",
            "--signal-tag",
            "rag_agents",
        ])
        .expect("arguments parse");

        match cli.command {
            Some(Command::Packs {
                command: PacksCommand::Recommend(args),
            }) => {
                assert_eq!(args.mode.as_deref(), Some("Discovery / Qualification"));
                assert_eq!(args.capability.len(), 2);
                assert_eq!(args.capability[1].0, "AI Engineering");
                assert_eq!(args.signal_tag, vec!["rag_agents".to_string()]);
            }
            other => panic!("expected packs recommend, got {other:?}"),
        }
    }

    #[test]
    fn malformed_inputs_are_rejected_at_parse_time() {
        assert!(Cli::try_parse_from([
            "dialogue",
            "packs",
            "recommend",
            "--capability",
            "Data Engineering",
        ])
        .is_err());
        assert!(Cli::try_parse_from([
            "dialogue",
            "signals",
            "pool",
            "--focus",
            "schindler",
            "--week-of",
            "Feb 10",
        ])
        .is_err());
    }
}
