use clap::{Args as ClapArgs, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "taskmgr", version, about = "Shell task manager REST service")]
pub struct Args {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(ClapArgs, Debug, Clone, Default)]
pub struct ServeArgs {
    /// Bind address. Defaults to `http_server.host` from config.
    #[arg(long)]
    pub host: Option<String>,

    /// Bind port. Defaults to `http_server.port` from config.
    #[arg(long)]
    pub port: Option<u16>,
}

#[derive(ClapArgs, Debug, Clone)]
pub struct CheckArgs {
    /// Command line to validate, quoted as one argument.
    pub command: String,
}

#[derive(ClapArgs, Debug, Clone)]
pub struct InitArgs {
    /// Store provider to write into the generated config.
    #[arg(long, default_value = "memory")]
    pub store: String,

    /// Overwrite an existing config file.
    #[arg(long, default_value_t = false)]
    pub force: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the HTTP API.
    Serve(ServeArgs),
    /// Check a command against the safety rules.
    Check(CheckArgs),
    /// List commands known to pass the safety rules.
    Examples,
    /// Write a default config to ~/.taskmgr/config.toml.
    Init(InitArgs),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_serve_flags() {
        let args = Args::try_parse_from(["taskmgr", "serve", "--port", "9001"]).unwrap();
        match args.command {
            Commands::Serve(serve) => {
                assert_eq!(serve.port, Some(9001));
                assert!(serve.host.is_none());
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn test_parse_check_takes_one_argument() {
        let args = Args::try_parse_from(["taskmgr", "check", "ls -la"]).unwrap();
        assert!(matches!(args.command, Commands::Check(c) if c.command == "ls -la"));
    }

    #[test]
    fn test_subcommand_is_required() {
        assert!(Args::try_parse_from(["taskmgr"]).is_err());
    }
}
