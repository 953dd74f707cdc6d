mod app;
mod caption;
mod cli;
mod glyphs;
mod logo;
mod overlay;

use std::rc::Rc;

use anyhow::{Context, Result};
use clap::Parser;

use starfall_auth::{AuthForm, FederatedProvider, MemoryAuthProvider};
use starfall_engine::device::GpuInit;
use starfall_engine::logging::{LoggingConfig, init_logging};
use starfall_engine::window::{Runtime, RuntimeConfig};
use starfall_fx::StarfieldConfig;

use crate::app::StarfallApp;
use crate::cli::{Cli, Variant};

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut logging = LoggingConfig::default();
    if let Some(filter) = &cli.log {
        logging = logging.with_filter(filter.clone());
    }
    init_logging(logging);

    let mut config = match cli.variant {
        Variant::Interactive => StarfieldConfig::interactive(),
        Variant::Standalone => StarfieldConfig::standalone(),
    };
    if let Some(n) = cli.stars {
        config = config.with_star_count(n);
    }
    if let Some(seed) = cli.seed {
        config = config.with_seed(seed);
    }

    let mut provider = MemoryAuthProvider::new();
    for (email, password) in &cli.accounts {
        provider = provider
            .with_account(email, password)
            .with_context(|| format!("registering --account {email}"))?;
    }
    if let Some(email) = &cli.google_account {
        provider = provider
            .link_federated(FederatedProvider::Google, email)
            .with_context(|| format!("linking --google-account {email}"))?;
    }

    let form = match &cli.email {
        Some(email) => AuthForm::new().with_email(email.clone()),
        None => AuthForm::new(),
    };

    let font = match glyphs::load_font(cli.font.as_deref()) {
        Ok(font) => Some(Rc::new(font)),
        Err(err) => {
            log::warn!("{err}; text will not be drawn");
            None
        }
    };

    log::info!(
        "starting {:?} starfield ({} stars, {} accounts)",
        cli.variant,
        config.star_count,
        provider.account_count()
    );

    let app = StarfallApp::new(config, cli.variant == Variant::Standalone, provider, form, font);

    Runtime::run(
        RuntimeConfig::default()
            .with_title("starfall")
            .with_size(cli.width, cli.height),
        GpuInit::default(),
        app,
    )
}
