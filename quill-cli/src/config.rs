//! Command-line configuration
//!
//! Every value can also come from the environment (or a `.env` file).

use std::net::SocketAddr;

use clap::Args;
use quill_server::db::DEFAULT_MAX_CONNECTIONS;
use quill_server::ServerConfig;

/// Database connection settings shared by every subcommand
#[derive(Args, Debug, Clone)]
pub struct DatabaseArgs {
    /// Postgres connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    pub database_url: String,

    /// Maximum pooled connections
    #[arg(long, env = "QUILL_MAX_CONNECTIONS", default_value_t = DEFAULT_MAX_CONNECTIONS)]
    pub max_connections: u32,
}

#[derive(Args, Debug, Clone)]
pub struct ServeArgs {
    #[command(flatten)]
    pub database: DatabaseArgs,

    /// Address to bind the HTTP server to
    #[arg(long, env = "QUILL_BIND", default_value = "127.0.0.1:3030")]
    pub bind: SocketAddr,

    /// Allow any CORS origin instead of localhost only
    #[arg(long, env = "QUILL_CORS_PERMISSIVE")]
    pub cors_permissive: bool,

    /// Skip applying pending migrations on startup
    #[arg(long)]
    pub no_migrate: bool,
}

impl ServeArgs {
    pub fn server_config(&self) -> ServerConfig {
        ServerConfig {
            bind_addr: self.bind,
            cors_permissive: self.cors_permissive,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser, Debug)]
    struct TestCli {
        #[command(flatten)]
        serve: ServeArgs,
    }

    #[test]
    fn serve_defaults() {
        let cli = TestCli::try_parse_from(["quill", "--database-url", "postgres://localhost/quill"])
            .unwrap();
        let config = cli.serve.server_config();

        assert_eq!(config.bind_addr, ServerConfig::default().bind_addr);
        assert!(!config.cors_permissive);
        assert_eq!(cli.serve.database.max_connections, DEFAULT_MAX_CONNECTIONS);
    }

    #[test]
    fn serve_overrides() {
        let cli = TestCli::try_parse_from([
            "quill",
            "--database-url",
            "postgres://localhost/quill",
            "--bind",
            "0.0.0.0:8080",
            "--cors-permissive",
            "--max-connections",
            "12",
        ])
        .unwrap();
        let config = cli.serve.server_config();

        assert_eq!(config.bind_addr.port(), 8080);
        assert!(config.cors_permissive);
        assert_eq!(cli.serve.database.max_connections, 12);
    }

    #[test]
    fn rejects_bad_bind_address() {
        let result = TestCli::try_parse_from([
            "quill",
            "--database-url",
            "postgres://localhost/quill",
            "--bind",
            "localhost",
        ]);
        assert!(result.is_err());
    }
}
