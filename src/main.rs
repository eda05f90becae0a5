//! sonora-scoped
//!
//! Terminal host for the write-through engine: open one audio file, apply
//! the edits given on the command line, write it back.
//!
//! Files under any `--scoped-under` dir are treated as "not directly
//! writable". The first time one is written, the engine asks for access and
//! we ask the user which directory to grant. That answer is remembered in
//! the prefs file, so later runs go straight through.
//!
//! Logging goes through `env_logger`; try `RUST_LOG=debug`.

use std::error::Error;
use std::fs;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;

use sonora_scoped::{
    AudioTagFile, EngineConfig, FieldKey, GrantResponse, Host, Id3Codec, LocalDocumentTree,
    Notice, Preferences, WriteError, WriteOutcome, WriteThroughEngine,
};

#[derive(Debug, Parser)]
#[command(name = "sonora-scoped", version, about = "Write tag edits to an audio file")]
struct Cli {
    /// Audio file to edit (.mp3, .wav, .aif/.aiff)
    file: PathBuf,

    #[arg(long)]
    title: Option<String>,
    #[arg(long)]
    artist: Option<String>,
    #[arg(long)]
    album: Option<String>,
    #[arg(long)]
    album_artist: Option<String>,
    #[arg(long)]
    genre: Option<String>,
    #[arg(long)]
    year: Option<String>,
    /// "n" or "n/total"
    #[arg(long)]
    track: Option<String>,
    #[arg(long)]
    comment: Option<String>,

    /// Replace embedded artwork with this image
    #[arg(long, value_name = "IMAGE")]
    art: Option<PathBuf>,

    /// Re-encode the tag as ID3v2.4
    #[arg(long)]
    upgrade_id3v24: bool,

    /// Where the granted storage root is remembered
    #[arg(long, value_name = "JSON", default_value = "sonora-prefs.json")]
    prefs: PathBuf,

    /// Engine config (staging dir, temp prefix)
    #[arg(long, value_name = "JSON")]
    config: Option<PathBuf>,

    /// Treat files under DIR as scoped storage (repeatable)
    #[arg(long = "scoped-under", value_name = "DIR")]
    scoped_under: Vec<PathBuf>,
}

/// Prints notices, pretends to refresh the media index.
struct TerminalHost {
    scoped_under: Vec<PathBuf>,
}

impl Host for TerminalHost {
    fn needs_scoped_storage(&self, path: &Path) -> bool {
        self.scoped_under.iter().any(|dir| path.starts_with(dir))
    }

    fn request_tree_access(&mut self, target: &Path) {
        println!("{} is on scoped storage.", target.display());
    }

    fn notify(&mut self, notice: &Notice) {
        match notice {
            Notice::Written { path } => println!("Tags written to {}.", path.display()),
            Notice::Failed { path, reason } => {
                eprintln!("Write failed for {}: {reason}", path.display())
            }
        }
    }

    fn refresh_media_index(&mut self, path: &Path) {
        log::info!("media index refresh requested for {}", path.display());
    }
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    match run(cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<bool, Box<dyn Error>> {
    let prefs = Preferences::load(&cli.prefs)?;
    let config = match &cli.config {
        Some(path) => EngineConfig::from_file(path)?,
        None => EngineConfig::default(),
    };

    let scoped_under = cli
        .scoped_under
        .iter()
        .map(|d| fs::canonicalize(d).unwrap_or_else(|_| d.clone()))
        .collect();
    let host = TerminalHost { scoped_under };
    let mut engine =
        WriteThroughEngine::with_codec(LocalDocumentTree, host, prefs, Id3Codec, config);

    let path = fs::canonicalize(&cli.file)?;
    let mut file = AudioTagFile::open(path)?;
    apply_edits(&mut file, &cli)?;

    let outcome = match engine.write(&file) {
        WriteOutcome::Suspended => {
            let response = ask_for_root()?;
            engine
                .on_grant_result(response)
                .unwrap_or(WriteOutcome::Failed(WriteError::GrantDenied))
        }
        other => other,
    };

    Ok(outcome.is_completed())
}

fn apply_edits(file: &mut AudioTagFile, cli: &Cli) -> Result<(), WriteError> {
    let edits = [
        (FieldKey::Title, &cli.title),
        (FieldKey::Artist, &cli.artist),
        (FieldKey::Album, &cli.album),
        (FieldKey::AlbumArtist, &cli.album_artist),
        (FieldKey::Genre, &cli.genre),
        (FieldKey::Year, &cli.year),
        (FieldKey::Track, &cli.track),
        (FieldKey::Comment, &cli.comment),
    ];
    for (key, value) in edits {
        if let Some(v) = value {
            file.set_field(key, v)?;
        }
    }

    if let Some(image) = &cli.art {
        file.set_artwork(fs::read(image)?)?;
    }
    if cli.upgrade_id3v24 {
        file.upgrade_to_id3v24();
    }
    Ok(())
}

/// Stand-in for a document picker.
fn ask_for_root() -> io::Result<GrantResponse> {
    print!("Directory to grant access to (empty to deny): ");
    io::stdout().flush()?;

    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    let line = line.trim();
    let token = (!line.is_empty()).then(|| {
        let dir = fs::canonicalize(line).unwrap_or_else(|_| PathBuf::from(line));
        LocalDocumentTree::root_for(&dir).as_str().to_owned()
    });
    // blank answer = denied
    Ok(GrantResponse::from(token))
}
