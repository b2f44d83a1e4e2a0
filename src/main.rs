//! Main entry point for the stozip CLI application.
//!
//! This binary packs directory trees into store-only ZIP archives and
//! extracts or lists such archives.

use anyhow::Result;
use clap::Parser;
use std::path::{Path, PathBuf};
use tokio::fs;

use stozip::{pack_directory, Cli, Command, ZipReader};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Pack { dir, output } => pack(&dir, &output, cli.quiet).await,
        Command::Unpack {
            archive,
            dest,
            verify,
        } => unpack(&archive, dest, verify, cli.quiet).await,
        Command::List { archive, verbose } => list(&archive, verbose).await,
    }
}

/// Pack a directory tree into an archive.
async fn pack(dir: &Path, output: &Path, quiet: bool) -> Result<()> {
    let count = pack_directory(dir, output).await?;
    if !quiet {
        eprintln!("packed {} entries into {}", count, output.display());
    }
    Ok(())
}

/// Extract an archive into the destination directory.
async fn unpack(archive: &Path, dest: Option<PathBuf>, verify: bool, quiet: bool) -> Result<()> {
    let bytes = fs::read(archive).await?;
    let dest = dest.unwrap_or_else(|| PathBuf::from("."));

    let reader = ZipReader::new().verify_checksums(verify);
    let written = reader.extract(&bytes, &dest).await?;

    if !quiet {
        for path in &written {
            println!("  extracting: {}", path.display());
        }
        eprintln!("{} files written to {}", written.len(), dest.display());
    }
    Ok(())
}

/// List files in the archive.
///
/// Simple format prints one name per line; verbose format prints a table
/// with sizes and DOS timestamps plus a summary line.
async fn list(archive: &Path, verbose: bool) -> Result<()> {
    let bytes = fs::read(archive).await?;
    let entries = ZipReader::new().entries(&bytes)?;

    if !verbose {
        for entry in &entries {
            println!("{}", entry.file_name);
        }
        return Ok(());
    }

    println!("{:>10}  {:>10}  {:>5}  Name", "Length", "Date", "Time");
    println!("{}", "-".repeat(60));

    let mut total_size = 0u64;
    let mut file_count = 0usize;

    for entry in &entries {
        let (year, month, day) = entry.mod_date();
        let (hour, minute, _second) = entry.mod_time();

        println!(
            "{:>10}  {:04}-{:02}-{:02}  {:02}:{:02}  {}",
            entry.uncompressed_size, year, month, day, hour, minute, entry.file_name
        );

        if !entry.is_directory() {
            total_size += entry.uncompressed_size as u64;
            file_count += 1;
        }
    }

    println!("{}", "-".repeat(60));
    println!("{:>10}  {:>19}  {} files", total_size, "", file_count);

    Ok(())
}
