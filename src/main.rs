//! # Laurea CLI
//!
//! Usage:
//!   laurea "Jane Doe"
//!   laurea "Jane Doe" --assets ./assets -o ./out
//!   laurea "Jane Doe" --date 2024-03-15 --logo ./brand/logo.png

use std::path::PathBuf;
use std::process;

use chrono::NaiveDate;
use clap::Parser;

use laurea::{generate_to_file, AssetPaths, CertificateRequest};

#[derive(Parser, Debug)]
#[command(version, about = "Generate a decorative Certificate of Achievement PDF")]
struct Args {
    /// Recipient name printed on the certificate (may be empty)
    name: String,

    /// Asset directory holding regular.ttf, bold.ttf and the optional
    /// background.png / logo.png / signature.png
    #[arg(long, default_value = "assets")]
    assets: PathBuf,

    /// Override the regular font path
    #[arg(long)]
    regular_font: Option<PathBuf>,

    /// Override the bold font path
    #[arg(long)]
    bold_font: Option<PathBuf>,

    /// Override the background image (path or data URI)
    #[arg(long)]
    background: Option<String>,

    /// Override the logo image (path or data URI)
    #[arg(long)]
    logo: Option<String>,

    /// Override the signature image (path or data URI)
    #[arg(long)]
    signature: Option<String>,

    /// Directory the certificate.pdf artifact is written into
    #[arg(short, long, default_value = ".")]
    output: PathBuf,

    /// Pin the issue date (YYYY-MM-DD) instead of using today
    #[arg(long)]
    date: Option<NaiveDate>,
}

fn main() {
    let args = Args::parse();

    let mut paths = AssetPaths::from_dir(&args.assets);
    if let Some(p) = args.regular_font {
        paths.regular_font = p;
    }
    if let Some(p) = args.bold_font {
        paths.bold_font = p;
    }
    if args.background.is_some() {
        paths.background = args.background;
    }
    if args.logo.is_some() {
        paths.logo = args.logo;
    }
    if args.signature.is_some() {
        paths.signature = args.signature;
    }

    let request = match args.date {
        Some(date) => CertificateRequest::with_date(&args.name, date),
        None => CertificateRequest::new(&args.name),
    };

    match generate_to_file(&request, &paths, &args.output) {
        Ok(path) => {
            eprintln!("✓ Written {}", path.display());
        }
        Err(e) => {
            eprintln!("✗ {}", e);
            process::exit(1);
        }
    }
}
