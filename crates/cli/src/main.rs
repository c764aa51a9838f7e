//! usb-identity CLI: inspect and change the USB identity of a KVM appliance.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::EnvFilter;
use usb_identity_core::config::Config;
use usb_identity_core::http::HttpService;
use usb_identity_core::i18n::{Locale, Text};
use usb_identity_core::preset;
use usb_identity_core::store::{FileStore, DEFAULT_ROOT};
use usb_identity_core::{Field, IdentityService, IdentityState};

#[derive(Parser)]
#[command(
    name = "usb-identity",
    version,
    about = "Configure the USB identity a KVM appliance presents to its host"
)]
struct Cli {
    /// Configuration file (default: per-user config, then /etc).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Appliance base URL, overriding the configuration file.
    #[arg(long, global = true)]
    url: Option<String>,

    /// Session token, overriding the configuration file.
    #[arg(long, global = true)]
    token: Option<String>,

    /// Operate on the identity files directly (when running on the appliance).
    ///
    /// Bare `--local` uses /boot; pass another directory as `--local=DIR`.
    #[arg(
        long,
        global = true,
        value_name = "DIR",
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = DEFAULT_ROOT
    )]
    local: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the current identity and the matching preset.
    Show {
        /// Print as JSON.
        #[arg(long)]
        json: bool,
    },
    /// List known presets.
    Presets,
    /// Apply a preset: custom, default, logitech, microsoft, generic.
    Apply {
        /// Preset key.
        preset: String,
    },
    /// Change individual fields; unspecified fields keep their current value.
    Set {
        #[arg(long)]
        vid: Option<String>,
        #[arg(long)]
        pid: Option<String>,
        #[arg(long)]
        manufacturer: Option<String>,
        #[arg(long)]
        product: Option<String>,
    },
    /// Write a configuration file for the given --url/--token.
    InitConfig,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = match Config::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(_) if matches!(cli.command, Commands::InitConfig) => Config::default(),
        Err(e) => return Err(e.into()),
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.ui.log_level)),
        )
        .init();

    let locale = config.ui.locale;

    match &cli.command {
        Commands::Show { json } => {
            let service = open_service(&cli, &config)?;
            let state = load_state(service.as_ref())?;
            if *json {
                println!("{}", serde_json::to_string_pretty(state.identity())?);
            } else {
                print_state(&state);
            }
        }
        Commands::Presets => {
            for p in preset::presets() {
                if p.is_custom() {
                    println!("{:<10} {}", p.key, p.label(locale));
                } else {
                    println!(
                        "{:<10} {:<20} {}:{} \"{}\" \"{}\"",
                        p.key,
                        p.label(locale),
                        p.vid,
                        p.pid,
                        p.manufacturer,
                        p.product
                    );
                }
            }
        }
        Commands::Apply { preset: key } => {
            if preset::find_preset_by_key(key).is_none() {
                let valid: Vec<&str> = preset::presets().iter().map(|p| p.key).collect();
                bail!("Unknown preset '{key}'. Valid presets: {}", valid.join(", "));
            }
            let service = open_service(&cli, &config)?;
            let mut state = load_state(service.as_ref())?;
            state.select_preset(key);
            save(&mut state, service.as_ref(), locale)?;
        }
        Commands::Set {
            vid,
            pid,
            manufacturer,
            product,
        } => {
            let edits: Vec<(Field, &String)> = Field::ALL
                .into_iter()
                .zip([vid, pid, manufacturer, product])
                .filter_map(|(field, value)| value.as_ref().map(|v| (field, v)))
                .collect();
            if edits.is_empty() {
                bail!("Nothing to set. Pass at least one of --vid, --pid, --manufacturer, --product");
            }

            let service = open_service(&cli, &config)?;
            let mut state = load_state(service.as_ref())?;
            for (field, value) in edits {
                state.edit_field(field, value.as_str());
            }
            save(&mut state, service.as_ref(), locale)?;
        }
        Commands::InitConfig => init_config(&cli, config)?,
    }

    Ok(())
}

fn init_config(cli: &Cli, mut config: Config) -> Result<()> {
    if let Some(url) = &cli.url {
        config.device.base_url = url.clone();
    }
    if let Some(token) = &cli.token {
        config.device.token = Some(token.clone());
    }
    let path = cli.config.clone().unwrap_or_else(Config::default_path);
    config.save(&path)?;
    println!("Configuration written to {}", path.display());
    Ok(())
}

fn open_service(cli: &Cli, config: &Config) -> Result<Box<dyn IdentityService>> {
    if let Some(root) = &cli.local {
        return Ok(Box::new(FileStore::new(root)));
    }

    let base_url = cli.url.as_deref().unwrap_or(&config.device.base_url);
    let token = cli.token.clone().or_else(|| config.device.token.clone());
    let service = HttpService::new(
        base_url,
        token,
        Duration::from_secs(config.device.timeout_secs),
    )?;
    tracing::debug!(endpoint = service.endpoint(), "Using HTTP service");
    Ok(Box::new(service))
}

/// Fetch the current identity. Unlike the panel, the CLI refuses to go on
/// from defaults when the device cannot be read.
fn load_state(service: &dyn IdentityService) -> Result<IdentityState> {
    let identity = service
        .get_usb_identity()
        .context("Failed to load USB identity")?;
    let mut state = IdentityState::new();
    state.begin_load();
    state.finish_load(Ok(identity));
    Ok(state)
}

fn save(state: &mut IdentityState, service: &dyn IdentityService, locale: Locale) -> Result<()> {
    let Some(notice) = state.save_with(service, locale) else {
        bail!("A save is already in progress");
    };
    if notice.is_error() {
        bail!(notice.text);
    }
    println!("{}", notice.text);
    print_state(state);
    println!("{}", Text::RebootRequired.localize(locale));
    Ok(())
}

fn print_state(state: &IdentityState) {
    let identity = state.identity();
    println!("Preset:       {}", state.selected_preset_key());
    println!("VID:          {}", identity.vid);
    println!("PID:          {}", identity.pid);
    println!("Manufacturer: {}", identity.manufacturer);
    println!("Product:      {}", identity.product);
}
