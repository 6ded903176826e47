//! Base58 Vanity Address Miner CLI
//!
//! Usage:
//!   coin_vanity mine -p 1Kid                  # Bitcoin address starting with "1Kid"
//!   coin_vanity mine -p LTC -n 48 -k compressed
//!   coin_vanity mine -p 1A --combine add --public-key 04...
//!   coin_vanity mine -p rAb --ripple          # Ripple account ID
//!   coin_vanity burn -r 1BurnAddress
//!   coin_vanity price -p 1Kid -b 0.1

use std::process;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use tracing::{error, info, warn};
use tracing_subscriber::FmtSubscriber;

use coin_vanity::config::{BurnArgs, CheckArgs, Command, MineArgs, PriceArgs};
use coin_vanity::crypto::keypair::WIF_MAINNET;
use coin_vanity::crypto::{
    generate_proof_of_burn_address, generate_ripple_address, validate_address,
    validate_ripple_address, KeyForm, RippleAddress,
};
use coin_vanity::matcher::{bounty, lavishness, pattern_complexity, Combine};
use coin_vanity::{Config, Found, VanityResult, WorkerPool};

fn main() {
    let config = Config::parse();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(config.log_level)
        .with_target(false)
        .with_thread_names(true)
        .with_writer(std::io::stderr)
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to install logger: {}", e);
    }

    let code = match config.command {
        Command::Mine(args) => mine(&args),
        Command::Burn(args) => burn(&args),
        Command::Ripple => ripple(),
        Command::Price(args) => price(&args),
        Command::Check(args) => check(&args),
    };
    process::exit(code);
}

fn mine(args: &MineArgs) -> i32 {
    if let Err(e) = args.validate() {
        eprintln!("Configuration error: {}", e);
        return 1;
    }
    let (pattern, mode) = match (args.pattern(), args.mode()) {
        (Ok(pattern), Ok(mode)) => (pattern, mode),
        (Err(e), _) | (_, Err(e)) => {
            eprintln!("Configuration error: {}", e);
            return 1;
        }
    };

    let pool = match WorkerPool::new(args.worker_count(), pattern, mode, args.limits()) {
        Ok(pool) => pool,
        Err(e) => {
            error!("{}", e);
            return 1;
        }
    };
    ctrlc_handler(pool.stop_flag_clone());

    let pattern = pool.pattern();
    println!("Base58 Vanity Address Miner");
    println!("===========================");
    println!("Pattern:    {}", pattern.pattern());
    if args.ripple {
        println!("Network:    ripple");
    } else {
        println!("Network:    version byte {}", args.net_byte);
        println!("Key type:   {}", args.key_type);
    }
    if let Some(combine) = args.combine {
        println!("Combine:    {} with requester key", combine);
    }
    println!(
        "Difficulty: {} (~{} attempts)",
        pattern.difficulty_description(),
        format_number(pattern.estimated_difficulty())
    );
    println!("Workers:    {}", pool.num_workers());
    println!();

    println!("Searching... (Press Ctrl+C to stop)\n");

    let report_interval = Duration::from_secs(args.report_interval.max(1));
    let result = loop {
        if let Some(result) = pool.wait_for_result(report_interval) {
            break Some(result);
        }
        if pool.is_finished() {
            break pool.try_recv();
        }
        print_progress(&pool);
    };

    match &result {
        Some(result) => print_result(result, args.combine),
        None if pool.is_stopped() => println!("\nNo match found before the search was stopped."),
        None => println!("\nAttempt limit reached without a match."),
    }

    println!("\n--- Final Statistics ---");
    println!("Total keys generated: {}", format_number(pool.total_keys()));
    println!("Total matches found:  {}", pool.total_matches());
    println!("Time elapsed:         {:.2}s", pool.elapsed().as_secs_f64());
    println!(
        "Average speed:        {}/s",
        format_number(pool.keys_per_second() as u64)
    );

    pool.join();
    if result.is_some() {
        0
    } else {
        2
    }
}

fn print_result(result: &VanityResult, combine: Option<Combine>) {
    println!("=== Match ===");
    println!("Address:     {}", result.address);
    match &result.found {
        Found::Coin { key, form } => {
            let derived = key.derived(*form);
            if let Some(combine) = combine {
                println!("Partial Key: {}", key.private_key);
                println!(
                    "Combine the partial key with your private key ({}) to spend.",
                    combine
                );
            } else {
                println!("Private Key: {}", key.private_key);
                let wif = match form {
                    KeyForm::Compressed => key.wif_compressed(WIF_MAINNET),
                    KeyForm::Uncompressed => key.wif_uncompressed(WIF_MAINNET),
                };
                println!("WIF:         {}", wif);
            }
            println!("Public Key:  {}", derived.public_key_hex());
            let key_type = match form {
                KeyForm::Compressed => "compressed",
                KeyForm::Uncompressed => "uncompressed",
            };
            println!("Key Type:    {}", key_type);
        }
        Found::Ripple(account) => print_ripple(account),
    }
    println!("Worker:      {}", result.worker_id);
    println!("Attempt:     {}", format_number(result.attempts));
}

fn print_ripple(account: &RippleAddress) {
    println!("Account ID:  {}", account.account_id);
    println!("Master Seed: {}", account.master_seed);
    println!("Seed Hex:    {}", account.master_seed_hex);
    println!("Public Key:  {}", account.public_key);
}

fn burn(args: &BurnArgs) -> i32 {
    match generate_proof_of_burn_address(&args.root, args.padding) {
        Ok(address) => {
            info!(root = %args.root, "built proof-of-burn address");
            println!("{}", address);
            0
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    }
}

fn ripple() -> i32 {
    match generate_ripple_address() {
        Ok(account) => {
            print_ripple(&account);
            println!("Private Key: {}", account.private_key);
            0
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    }
}

fn price(args: &PriceArgs) -> i32 {
    if let Err(e) = args.validate() {
        eprintln!("Configuration error: {}", e);
        return 1;
    }
    let complexity = pattern_complexity(&args.pattern);
    println!("Pattern:    {}", args.pattern);
    println!("Complexity: {:.0}", complexity);
    if let Some(amount) = args.bounty {
        println!("Lavishness: {}", lavishness(amount, complexity));
    }
    if let Some(target) = args.lavishness {
        println!("Bounty:     {}", bounty(target, complexity));
    }
    0
}

fn check(args: &CheckArgs) -> i32 {
    let valid = if args.ripple {
        validate_ripple_address(&args.address)
    } else {
        validate_address(&args.address, args.net_byte)
    };
    if valid {
        println!("{}: valid", args.address);
        0
    } else {
        println!("{}: invalid", args.address);
        1
    }
}

fn print_progress(pool: &WorkerPool) {
    let keys = pool.total_keys();
    let rate = pool.keys_per_second();
    let elapsed = pool.elapsed().as_secs();

    println!(
        "[{:>4}s] Generated {} keys ({}/s)",
        elapsed,
        format_number(keys),
        format_number(rate as u64)
    );
}

fn format_number(n: u64) -> String {
    if n >= 1_000_000_000 {
        format!("{:.2}B", n as f64 / 1_000_000_000.0)
    } else if n >= 1_000_000 {
        format!("{:.2}M", n as f64 / 1_000_000.0)
    } else if n >= 1_000 {
        format!("{:.2}K", n as f64 / 1_000.0)
    } else {
        n.to_string()
    }
}

fn ctrlc_handler(stop_flag: Arc<AtomicBool>) {
    if let Err(e) = ctrlc::set_handler(move || {
        stop_flag.store(true, Ordering::Relaxed);
    }) {
        warn!("Error setting Ctrl-C handler: {}", e);
    }
}
