//! CLI argument definitions.
//!
//! Uses clap derive macros for type-safe argument parsing.

use clap::{Parser, Subcommand};

/// Booking API - rooms, reservations and availability over PostgreSQL
#[derive(Parser, Debug)]
#[command(name = "booking-api")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Ensure the schema, then start the HTTP server
    Serve(ServeArgs),

    /// Create missing tables and exit
    Schema,
}

/// Arguments for the serve command.
///
/// Unset values fall back to `SERVER_HOST` / `SERVER_PORT` from the config.
#[derive(Parser, Debug, Default)]
pub struct ServeArgs {
    /// Host to bind to
    #[arg(short = 'H', long)]
    pub host: Option<String>,

    /// Port to listen on
    #[arg(short, long)]
    pub port: Option<u16>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serve_overrides_are_optional() {
        let cli = Cli::try_parse_from(["booking-api", "serve"]).unwrap();

        match cli.command {
            Commands::Serve(args) => {
                assert!(args.host.is_none());
                assert!(args.port.is_none());
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn verbose_is_global() {
        let cli = Cli::try_parse_from(["booking-api", "schema", "-v"]).unwrap();

        assert!(cli.verbose);
        assert!(matches!(cli.command, Commands::Schema));
    }

    #[test]
    fn serve_parses_host_and_port() {
        let cli =
            Cli::try_parse_from(["booking-api", "serve", "-H", "127.0.0.1", "--port", "8080"])
                .unwrap();

        let Commands::Serve(args) = cli.command else {
            panic!("expected serve");
        };
        assert_eq!(args.host.as_deref(), Some("127.0.0.1"));
        assert_eq!(args.port, Some(8080));
    }
}
