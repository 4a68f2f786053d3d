//! Ledger status CLI, decodes device status words and inspects the status registry.
//!
//! See [ledger_status] for the registry used by this application.

use std::{fmt::Display, str::FromStr};

use clap::Parser;
use hex::ToHex;
use serde::Serialize;
use tracing::{debug, info, warn};
use tracing_subscriber::{filter::LevelFilter, EnvFilter, FmtSubscriber};

use ledger_status::{
    legacy_to_canonical, registry, split_response, Category, Range, StatusCode, StatusWord,
};

mod report;
use report::{CodeEntry, ResponseReport, StatusReport};

/// Ledger device status word decoder
#[derive(Clone, Debug, PartialEq, Parser)]
#[clap(name = "ledger-status", version)]
pub struct Args {
    #[clap(subcommand)]
    cmd: Command,

    /// Output JSON instead of text
    #[clap(long, global = true)]
    json: bool,

    /// Log level
    #[clap(long, default_value = "warn")]
    log_level: LevelFilter,
}

/// CLI subcommands
#[derive(Clone, Debug, PartialEq, Parser)]
pub enum Command {
    /// Decode a status word (decimal, or hex with a `0x` prefix)
    Decode {
        #[clap(value_parser=u16_parse_maybe_hex)]
        word: u16,
    },
    /// Decode the status word trailing a hex encoded response
    Response {
        /// Hex encoded response (payload + status word)
        data: ResponseData,
    },
    /// Compose a status code from a category (ie. `security/pin`) and identifier
    Compose {
        category: Category,

        #[clap(value_parser=u8_parse_maybe_hex)]
        id: u8,
    },
    /// Map a legacy status code to its canonical registry code
    Legacy {
        #[clap(value_parser=u16_parse_maybe_hex)]
        code: u16,
    },
    /// List defined status codes
    List {
        /// Only list codes within this range
        #[clap(long)]
        range: Option<Range>,
    },
    /// Check registry consistency
    Check,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ResponseData(Vec<u8>);

impl FromStr for ResponseData {
    type Err = hex::FromHexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let v = hex::decode(s.trim_start_matches("0x"))?;
        Ok(Self(v))
    }
}

fn u8_parse_maybe_hex(s: &str) -> Result<u8, std::num::ParseIntError> {
    if let Some(s) = s.strip_prefix("0x") {
        u8::from_str_radix(s, 16)
    } else {
        s.parse::<u8>()
    }
}

fn u16_parse_maybe_hex(s: &str) -> Result<u16, std::num::ParseIntError> {
    if let Some(s) = s.strip_prefix("0x") {
        u16::from_str_radix(s, 16)
    } else {
        s.parse::<u16>()
    }
}

fn main() -> anyhow::Result<()> {
    // Load command line arguments
    let args = Args::parse();

    // Setup logging
    let filter = EnvFilter::from_default_env().add_directive(args.log_level.into());

    let _ = FmtSubscriber::builder()
        .compact()
        .without_time()
        .with_writer(std::io::stderr)
        .with_max_level(args.log_level)
        .with_env_filter(filter)
        .try_init();

    debug!("args: {:?}", args);

    // Handle commands
    match args.cmd {
        Command::Decode { word } => {
            let sw = StatusWord::new(word);
            if sw.describe().is_unknown() && sw.legacy().is_none() {
                warn!("Status word {} is not defined in the registry", sw);
            } else if sw.code().map(|c| c.is_allocated()) == Some(false) {
                debug!("Status word {} decomposes but is not allocated", sw);
            }

            output(args.json, &StatusReport::new(sw))?;
        }
        Command::Response { data } => {
            let (payload, sw) = split_response(&data.0)?;
            debug!("Response payload {} bytes, status {}", payload.len(), sw);

            let r = ResponseReport {
                payload: payload.encode_hex::<String>(),
                status: StatusReport::new(sw),
            };

            output(args.json, &r)?;
        }
        Command::Compose { category, id } => {
            let c = StatusCode::try_compose(category, id)?;
            if !c.is_allocated() && !category.range().is_application() {
                warn!("Composed code {} is not allocated in the registry", c);
            }

            output(args.json, &StatusReport::new(c.into()))?;
        }
        Command::Legacy { code } => {
            let c = legacy_to_canonical(code)?;
            debug!("Legacy code 0x{:02x} maps to {}", code, c);

            output(args.json, &StatusReport::new(StatusWord::new(code)))?;
        }
        Command::List { range } => {
            let codes: Vec<_> = StatusCode::all()
                .filter(|c| match range {
                    Some(r) => c.value() & ledger_status::RANGE_MASK == r.base(),
                    None => true,
                })
                .map(CodeEntry::new)
                .collect();

            debug!("Listing {} codes", codes.len());

            if args.json {
                println!("{}", serde_json::to_string_pretty(&codes)?);
            } else {
                for c in &codes {
                    println!("{c}");
                }
            }
        }
        Command::Check => {
            registry::validate()?;

            let blocks = registry::blocks().count();
            let codes = StatusCode::all().count();
            info!("Registry check passed");

            println!("registry ok: {codes} codes in {blocks} blocks");
        }
    }

    Ok(())
}

/// Write an object as JSON or text
fn output<T: Serialize + Display>(json: bool, v: &T) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(v)?);
    } else {
        println!("{v}");
    }

    Ok(())
}
