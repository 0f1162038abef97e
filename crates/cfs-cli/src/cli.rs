use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "cfs",
    about = "contentfs: a content-addressed filesystem over hash-linked directories",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,

    /// TOML configuration file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Import a directory and print its root
    Import(ImportArgs),
    /// List a directory inside an imported tree
    Ls(LsArgs),
    /// Print a file, or an object by hash, from an imported tree
    Cat(CatArgs),
    /// List every object hash reachable from the root
    Hashes(SourceArgs),
    /// Import a directory and push it to an empty remote
    Push(PushArgs),
}

#[derive(Args)]
pub struct SourceArgs {
    /// Directory to import
    pub dir: PathBuf,
    /// Include entries whose name starts with '.'
    #[arg(long)]
    pub hidden: bool,
}

#[derive(Args)]
pub struct ImportArgs {
    #[command(flatten)]
    pub source: SourceArgs,
}

#[derive(Args)]
pub struct LsArgs {
    #[command(flatten)]
    pub source: SourceArgs,
    #[arg(default_value = "/")]
    pub path: String,
    /// Show the hash reference of each entry
    #[arg(short, long)]
    pub long: bool,
}

#[derive(Args)]
pub struct CatArgs {
    #[command(flatten)]
    pub source: SourceArgs,
    /// Path (starting with '/') or hash reference
    pub address: String,
}

#[derive(Args)]
pub struct PushArgs {
    #[command(flatten)]
    pub source: SourceArgs,
    /// Treat the remote as unable to report missing objects
    #[arg(long)]
    pub no_missing: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_import() {
        let cli = Cli::try_parse_from(["cfs", "import", "./site"]).unwrap();
        if let Command::Import(args) = cli.command {
            assert_eq!(args.source.dir, PathBuf::from("./site"));
            assert!(!args.source.hidden);
        } else { panic!("wrong command"); }
    }

    #[test]
    fn parse_ls_defaults_to_root() {
        let cli = Cli::try_parse_from(["cfs", "ls", "./site"]).unwrap();
        if let Command::Ls(args) = cli.command {
            assert_eq!(args.path, "/");
            assert!(!args.long);
        } else { panic!("wrong command"); }
    }

    #[test]
    fn parse_ls_long_with_path() {
        let cli = Cli::try_parse_from(["cfs", "ls", "-l", "./site", "/docs"]).unwrap();
        if let Command::Ls(args) = cli.command {
            assert_eq!(args.path, "/docs");
            assert!(args.long);
        } else { panic!("wrong command"); }
    }

    #[test]
    fn parse_cat() {
        let cli = Cli::try_parse_from(["cfs", "cat", "./site", "/index.html"]).unwrap();
        if let Command::Cat(args) = cli.command {
            assert_eq!(args.address, "/index.html");
        } else { panic!("wrong command"); }
    }

    #[test]
    fn parse_push_without_missing() {
        let cli = Cli::try_parse_from(["cfs", "push", "--no-missing", "--hidden", "./site"]).unwrap();
        if let Command::Push(args) = cli.command {
            assert!(args.no_missing);
            assert!(args.source.hidden);
        } else { panic!("wrong command"); }
    }

    #[test]
    fn parse_global_flags() {
        let cli = Cli::try_parse_from([
            "cfs", "hashes", "./site", "--format", "json", "-v", "--config", "cfs.toml",
        ])
        .unwrap();
        assert!(cli.verbose);
        assert_eq!(cli.format, OutputFormat::Json);
        assert_eq!(cli.config, Some(PathBuf::from("cfs.toml")));
        assert!(matches!(cli.command, Command::Hashes(_)));
    }

    #[test]
    fn cat_requires_address() {
        assert!(Cli::try_parse_from(["cfs", "cat", "./site"]).is_err());
    }
}
