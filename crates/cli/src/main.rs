use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use fixture_protocol::DEFAULT_PORT;

mod commands;
use commands::{execute_routes_command, execute_serve_command, parse_host, ServeArgs};

#[derive(Parser)]
#[command(name = "fixture-server")]
#[command(about = "Fixture Responder - canned JSON responses for HTTP test suites")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Serve the fixture table over HTTP (default)
    Serve(ServeCommandArgs),
    /// List the supported request paths
    Routes,
}

#[derive(Args)]
pub struct ServeCommandArgs {
    /// Address to listen on
    #[arg(long, default_value = "0.0.0.0")]
    pub host: String,
    /// Port to listen on
    #[arg(short, long, default_value_t = DEFAULT_PORT)]
    pub port: u16,
}

impl Default for ServeCommandArgs {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: DEFAULT_PORT,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Routes) => execute_routes_command(),
        Some(Commands::Serve(args)) => serve(args).await,
        None => serve(ServeCommandArgs::default()).await,
    }
}

async fn serve(args: ServeCommandArgs) -> Result<()> {
    let serve_args = ServeArgs {
        host: parse_host(&args.host)?,
        port: args.port,
    };
    execute_serve_command(serve_args).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_no_arguments_means_default_serve() {
        let cli = Cli::try_parse_from(["fixture-server"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_serve_defaults() {
        let cli = Cli::try_parse_from(["fixture-server", "serve"]).unwrap();
        match cli.command {
            Some(Commands::Serve(args)) => {
                assert_eq!(args.host, "0.0.0.0");
                assert_eq!(args.port, 52001);
            }
            _ => panic!("expected serve command"),
        }
    }

    #[test]
    fn test_serve_port_override() {
        let cli = Cli::try_parse_from(["fixture-server", "serve", "--port", "8080"]).unwrap();
        match cli.command {
            Some(Commands::Serve(args)) => assert_eq!(args.port, 8080),
            _ => panic!("expected serve command"),
        }
    }

    #[test]
    fn test_invalid_port_rejected() {
        assert!(Cli::try_parse_from(["fixture-server", "serve", "--port", "99999"]).is_err());
    }
}
