use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use folder_sense::classify::{classify_role, resolve_cover};
use folder_sense::{
    album_name_for_song, FolderNameParser, LocalFileSystem, ScanConfig, ScanPipeline,
    SongNameParser,
};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(name = "folder-sense")]
#[command(about = "Classify music library folders and parse their names", long_about = None)]
struct Args {
    /// Verbose logging
    #[arg(short = 'v', long, global = true)]
    verbose: bool,

    /// Time budget for each name parse, in seconds
    #[arg(long, global = true, default_value = "5")]
    timeout_secs: u64,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Classify every folder below a library root
    Scan {
        /// Library root (e.g., ~/Music)
        root: String,

        /// Only descend this many levels below the root
        #[arg(long)]
        max_depth: Option<usize>,

        /// Don't parse song file names
        #[arg(long)]
        no_songs: bool,

        /// Print the full report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the role of a single folder
    Classify { dir: String },

    /// Parse a folder name into band, album and year
    FolderName { name: String },

    /// Parse a song file name into track, title and extension
    SongName { name: String },

    /// Print the cover image picked for an album folder
    Cover { dir: String },

    /// Print the album a song file belongs to
    AlbumOf { song: String },
}

fn expand(path: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(path).as_ref())
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let log_level = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let timeout = Duration::from_secs(args.timeout_secs);
    let fs = LocalFileSystem::new();

    match args.command {
        Command::Scan {
            root,
            max_depth,
            no_songs,
            json,
        } => {
            let mut config = ScanConfig::new(expand(&root)).with_match_timeout(timeout);
            if let Some(depth) = max_depth {
                config = config.with_max_depth(depth);
            }
            if no_songs {
                config = config.without_songs();
            }

            let report = ScanPipeline::new(config, &fs)
                .run()
                .with_context(|| format!("Failed to scan {}", root))?;

            if json {
                print_json(&report)?;
            } else {
                for folder in &report.folders {
                    match &folder.name {
                        Some(name) => println!(
                            "{:<16} {}  [{} | {} | {}]",
                            folder.role.name(),
                            folder.path.display(),
                            name.band,
                            name.album,
                            name.year
                        ),
                        None => println!("{:<16} {}", folder.role.name(), folder.path.display()),
                    }
                }
                log::info!("{} folders scanned", report.counts.total());
            }
        }

        Command::Classify { dir } => {
            let role = classify_role(&fs, &expand(&dir))
                .with_context(|| format!("Failed to classify {}", dir))?;
            println!("{}", role);
        }

        Command::FolderName { name } => {
            let info = FolderNameParser::new()
                .with_timeout(timeout)
                .parse(&name)
                .with_context(|| format!("Failed to parse folder name {:?}", name))?;
            print_json(&info)?;
        }

        Command::SongName { name } => {
            let info = SongNameParser::new()
                .with_timeout(timeout)
                .parse(&name)
                .with_context(|| format!("Failed to parse song name {:?}", name))?;
            print_json(&info)?;
        }

        Command::Cover { dir } => {
            let cover = resolve_cover(&fs, &expand(&dir))
                .with_context(|| format!("Failed to resolve cover of {}", dir))?;
            match cover {
                Some(entry) => println!("{}", entry.path.display()),
                None => log::info!("No cover image found"),
            }
        }

        Command::AlbumOf { song } => {
            let parser = FolderNameParser::new().with_timeout(timeout);
            let album = album_name_for_song(&fs, &parser, &expand(&song))
                .with_context(|| format!("Failed to name album of {}", song))?;
            match album {
                Some(name) => println!("{}", name),
                None => log::info!("{} isn't inside an album folder", song),
            }
        }
    }

    Ok(())
}
