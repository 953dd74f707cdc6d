use std::path::PathBuf;

use clap::{Parser, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "starfall")]
#[command(version = "0.1")]
#[command(about = "Animated starfield with a login screen and glowing welcome")]
pub struct Cli {
    /// Which starfield to run
    #[arg(long, value_enum, default_value_t = Variant::Interactive)]
    pub variant: Variant,

    /// Override the star count
    #[arg(long, value_name = "N")]
    pub stars: Option<usize>,

    /// Seed the star field and animation for reproducible runs
    #[arg(long, value_name = "N")]
    pub seed: Option<u64>,

    /// Initial window width in logical pixels
    #[arg(long, default_value_t = 1280.0)]
    pub width: f64,

    /// Initial window height in logical pixels
    #[arg(long, default_value_t = 720.0)]
    pub height: f64,

    /// Prefill the login email
    #[arg(long)]
    pub email: Option<String>,

    /// Link a Google account (F3) to this email
    #[arg(long, value_name = "EMAIL")]
    pub google_account: Option<String>,

    /// Pre-register an account; may be repeated
    #[arg(long = "account", value_name = "EMAIL:PASSWORD", value_parser = parse_account)]
    pub accounts: Vec<(String, String)>,

    /// TrueType/OpenType font for text (falls back to common system fonts)
    #[arg(long, value_name = "PATH")]
    pub font: Option<PathBuf>,

    /// Log filter, e.g. `debug` or `info,starfall_fx=trace` (overrides RUST_LOG)
    #[arg(long, value_name = "FILTER")]
    pub log: Option<String>,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
pub enum Variant {
    /// Pointer-reactive field behind the login form and welcome screen
    Interactive,
    /// Plain black background field without auth
    Standalone,
}

fn parse_account(s: &str) -> Result<(String, String), String> {
    let (email, password) = s
        .split_once(':')
        .ok_or_else(|| format!("expected EMAIL:PASSWORD, got `{s}`"))?;
    if email.is_empty() || password.is_empty() {
        return Err(format!("expected EMAIL:PASSWORD, got `{s}`"));
    }
    Ok((email.to_string(), password.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let cli = Cli::parse_from(["starfall"]);
        assert_eq!(cli.variant, Variant::Interactive);
        assert_eq!((cli.width, cli.height), (1280.0, 720.0));
        assert!(cli.accounts.is_empty());
    }

    #[test]
    fn repeated_accounts_and_variant() {
        let cli = Cli::parse_from([
            "starfall",
            "--variant",
            "standalone",
            "--account",
            "a@x.io:secret1",
            "--account",
            "b@x.io:pa:ss",
            "--seed",
            "7",
        ]);
        assert_eq!(cli.variant, Variant::Standalone);
        assert_eq!(cli.seed, Some(7));
        assert_eq!(
            cli.accounts,
            vec![
                ("a@x.io".to_string(), "secret1".to_string()),
                ("b@x.io".to_string(), "pa:ss".to_string()),
            ]
        );
    }

    #[test]
    fn malformed_account_is_rejected() {
        assert!(Cli::try_parse_from(["starfall", "--account", "nocolon"]).is_err());
        assert!(Cli::try_parse_from(["starfall", "--account", ":pw"]).is_err());
    }
}
