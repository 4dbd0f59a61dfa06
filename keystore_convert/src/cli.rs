//! Command-line surface (spec.md §6): `-s/--src`, `-d/--dest`,
//! `-w/--password_dir`, `-m/--mode`, `-c`, `-n`, `-p`, `-r`, plus the
//! `-h/--help` and `-v/--version` clap provides automatically.

use account_manager::{Config, KdfFunction, NamingMode};
use clap::{App, Arg};
use std::path::PathBuf;
use std::str::FromStr;

const VERSION: &str = env!("CARGO_PKG_VERSION");

pub struct Args {
    pub config: Config,
    pub log_level: String,
}

pub fn parse() -> Args {
    let matches = App::new("keystore_convert")
        .version(VERSION)
        .version_short("v")
        .author("Sigma Prime <contact@sigmaprime.io>")
        .about("Batch-converts EIP-2335 BLS validator keystores under fresh salts, IVs and KDF parameters")
        .arg(
            Arg::with_name("src")
                .short("s")
                .long("src")
                .value_name("PATH")
                .help("Source directory of keystores")
                .required(true)
                .takes_value(true),
        )
        .arg(
            Arg::with_name("dest")
                .short("d")
                .long("dest")
                .value_name("PATH")
                .help("Destination directory (created if missing)")
                .required(true)
                .takes_value(true),
        )
        .arg(
            Arg::with_name("password_dir")
                .short("w")
                .long("password_dir")
                .value_name("PATH")
                .help("Directory of password files")
                .required(true)
                .takes_value(true),
        )
        .arg(
            Arg::with_name("mode")
                .short("m")
                .long("mode")
                .value_name("WEB3SIGNER|NIMBUS")
                .help("On-disk naming convention")
                .takes_value(true)
                .default_value("WEB3SIGNER"),
        )
        .arg(
            Arg::with_name("pbkdf2_count")
                .short("c")
                .value_name("INTEGER")
                .help("PBKDF2 iteration count for re-encryption")
                .takes_value(true)
                .default_value("1"),
        )
        .arg(
            Arg::with_name("scrypt_n")
                .short("n")
                .value_name("INTEGER")
                .help("scrypt N for re-encryption")
                .takes_value(true)
                .default_value("2"),
        )
        .arg(
            Arg::with_name("scrypt_p")
                .short("p")
                .value_name("INTEGER")
                .help("scrypt p for re-encryption")
                .takes_value(true)
                .default_value("1"),
        )
        .arg(
            Arg::with_name("scrypt_r")
                .short("r")
                .value_name("INTEGER")
                .help("scrypt r for re-encryption")
                .takes_value(true)
                .default_value("8"),
        )
        .arg(
            Arg::with_name("kdf")
                .long("kdf")
                .value_name("PBKDF2|SCRYPT")
                .help("KDF function used for re-encryption")
                .takes_value(true)
                .default_value("PBKDF2"),
        )
        .arg(
            Arg::with_name("log_level")
                .long("log-level")
                .value_name("LEVEL")
                .help("Logging verbosity: critical, error, warn, info, debug, trace")
                .takes_value(true)
                .default_value("info"),
        )
        .get_matches();

    let parse_u32 = |name: &str| -> u32 {
        matches
            .value_of(name)
            .expect("has default_value")
            .parse()
            .unwrap_or_else(|_| clap_exit(&format!("invalid integer for --{}", name)))
    };

    let kdf_function = match matches
        .value_of("kdf")
        .expect("has default_value")
        .to_ascii_uppercase()
        .as_str()
    {
        "PBKDF2" => KdfFunction::Pbkdf2,
        "SCRYPT" => KdfFunction::Scrypt,
        other => clap_exit(&format!("unknown --kdf value: {}", other)),
    };

    let mode = NamingMode::from_str(matches.value_of("mode").expect("has default_value"))
        .unwrap_or_else(|e| clap_exit(&e));

    let config = Config {
        src_dir: PathBuf::from(matches.value_of("src").expect("required")),
        dest_dir: PathBuf::from(matches.value_of("dest").expect("required")),
        password_dir: PathBuf::from(matches.value_of("password_dir").expect("required")),
        mode,
        kdf_function,
        pbkdf2_count: parse_u32("pbkdf2_count"),
        scrypt_n: parse_u32("scrypt_n"),
        scrypt_p: parse_u32("scrypt_p"),
        scrypt_r: parse_u32("scrypt_r"),
    };

    Args {
        config,
        log_level: matches.value_of("log_level").expect("has default_value").to_string(),
    }
}

fn clap_exit(msg: &str) -> ! {
    eprintln!("error: {}", msg);
    std::process::exit(1);
}
