use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "stozip")]
#[command(version)]
#[command(about = "Pack and unpack store-only ZIP backup archives", long_about = None)]
#[command(after_help = "Examples:\n  \
  stozip pack photos -o backup.zip       pack the photos tree into backup.zip\n  \
  stozip unpack backup.zip -d restore    extract backup.zip into restore/\n  \
  stozip list -v backup.zip              show entries with sizes and timestamps")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Quiet mode (no progress messages)
    #[arg(short = 'q', global = true)]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Pack a directory tree into an archive
    Pack {
        /// Directory to pack
        #[arg(value_name = "DIR")]
        dir: PathBuf,

        /// Output archive path
        #[arg(short = 'o', long = "output", value_name = "ARCHIVE")]
        output: PathBuf,
    },

    /// Extract an archive into a directory
    Unpack {
        /// Archive file to extract
        #[arg(value_name = "ARCHIVE")]
        archive: PathBuf,

        /// Extract files into DIR (default: current directory)
        #[arg(short = 'd', value_name = "DIR")]
        dest: Option<PathBuf>,

        /// Verify each entry's CRC-32 before writing it
        #[arg(long)]
        verify: bool,
    },

    /// List archive contents
    List {
        /// Archive file to list
        #[arg(value_name = "ARCHIVE")]
        archive: PathBuf,

        /// Verbose table with sizes and timestamps
        #[arg(short = 'v')]
        verbose: bool,
    },
}
