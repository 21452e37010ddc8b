use std::{
    fs,
    io::{self, Read},
    path::{Path, PathBuf},
};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;

use skinvault::{
    browser::{csgotrader, steamcommunity},
    config::Config,
    models::price::{Currency, Market},
    normalize_with, parse_chunks,
    pricing::prices,
    store::{import_rows, save_payload, JsonFileStore, RecordStore},
    IdentityKey,
};

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Config file, defaults to the platform config directory.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Normalize saved inventory pages (`-` reads stdin).
    Normalize {
        file: PathBuf,
        #[arg(long)]
        identity: Option<IdentityArg>,
    },
    /// Fetch an inventory from steam and print the normalized rows.
    Fetch {
        #[arg(long)]
        steamid: Option<u64>,
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Normalize saved inventory pages and price them.
    Price { file: PathBuf },
    /// Validated records kept next to the config.
    Record {
        #[command(subcommand)]
        action: RecordAction,
    },
    /// Write the current (or default) config to the config path.
    Init,
}

#[derive(Subcommand, Debug)]
enum RecordAction {
    Add { key: String, json: String },
    /// Store every normalized row of saved inventory pages as a holding, keyed by market hash name.
    Import { file: PathBuf },
    Remove { key: String },
    List,
}

#[derive(clap::ValueEnum, Clone, Copy, Debug)]
enum IdentityArg {
    Triple,
    NameImage,
}

impl From<IdentityArg> for IdentityKey {
    fn from(arg: IdentityArg) -> Self {
        match arg {
            IdentityArg::Triple => IdentityKey::Triple,
            IdentityArg::NameImage => IdentityKey::NameImage,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Structured logging. Use `RUST_LOG=info` etc.
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let mut config = Config::load(args.config.as_deref())?;

    match args.command {
        Command::Normalize { file, identity } => {
            if let Some(id) = identity {
                config.identity = id.into();
            }
            let chunks = parse_chunks(&read_input(&file)?).context("reading inventory pages")?;
            print_json(&normalize_with(&chunks, &config.normalize_options()), None)?;
        }

        Command::Fetch { steamid, out } => {
            let steamid = steamid.or(config.steamid)
                .context("No steamid given and none in the config")?;
            config.steamid = Some(steamid);

            let client = Client::new();
            let chunks = steamcommunity::fetch_inventory(&client, &config, steamid).await?;
            let rows = normalize_with(&chunks, &config.normalize_options());
            print_json(&rows, out.as_deref())?;
        }

        Command::Price { file } => {
            let chunks = parse_chunks(&read_input(&file)?).context("reading inventory pages")?;
            let rows = normalize_with(&chunks, &config.normalize_options());

            // One shot process, every feed is fetched once. `PriceCache` is for long lived callers.
            let client = Client::new();
            let mut feeds: Vec<(Market, Value)> = Vec::new();
            for market in prices::unique_markets(&config.prefer_markets) {
                feeds.push((market, csgotrader::get_market_data(&client, market).await?));
            }

            let rate = usd_to(&client, config.currency).await?;
            print_json(&prices::price_rows(rows, &feeds, config.price_type, config.pricing_mode, rate), None)?;
        }

        Command::Init => {
            let path = match args.config.as_deref() {
                Some(p) => p.to_path_buf(),
                None => Config::default_path()?,
            };
            config.save(&path)?;
            println!("Wrote {}", path.display());
        }

        Command::Record { action } => {
            let mut store = JsonFileStore::open(records_path(args.config.as_deref())?)?;
            match action {
                RecordAction::Add { key, json } => {
                    let payload: Value = serde_json::from_str(&json).context("record is not JSON")?;
                    let record = save_payload(&mut store, &key, payload)?;
                    print_json(&record, None)?;
                }
                RecordAction::Import { file } => {
                    let chunks = parse_chunks(&read_input(&file)?).context("reading inventory pages")?;
                    let rows = normalize_with(&chunks, &config.normalize_options());
                    let imported = import_rows(&mut store, &rows)?;
                    println!("Imported {} of {} rows", imported, rows.len());
                }
                RecordAction::Remove { key } => {
                    if store.remove(&key)?.is_none() {
                        bail!("No record stored under {}", key);
                    }
                }
                RecordAction::List => {
                    for key in store.keys() {
                        if let Some(record) = store.get(&key) {
                            println!("{}\t{}", key, serde_json::to_string(record)?);
                        }
                    }
                }
            }
        }
    }

    Ok(())
}

async fn usd_to(client: &Client, currency: Currency) -> Result<f64> {
    if currency == Currency::USD {
        return Ok(1.0);
    }
    let rates = csgotrader::get_exchange_rates(client).await?;
    rates.get(currency.as_ref())
        .copied()
        .with_context(|| format!("No exchange rate for {}", currency))
}

fn records_path(config: Option<&Path>) -> Result<PathBuf> {
    let config_path = match config {
        Some(p) => p.to_path_buf(),
        None => Config::default_path()?,
    };
    Ok(config_path.with_file_name("records.json"))
}

fn read_input(file: &Path) -> Result<String> {
    if file == Path::new("-") {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf)?;
        return Ok(buf);
    }
    fs::read_to_string(file).with_context(|| format!("read {:?}", file))
}

fn print_json<T: Serialize + ?Sized>(value: &T, out: Option<&Path>) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    match out {
        Some(path) => fs::write(path, json).with_context(|| format!("write {:?}", path))?,
        None => println!("{}", json),
    }
    Ok(())
}
