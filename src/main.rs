//! polydraw command-line review loop.
//!
//! ```text
//! polydraw [CONFIG]
//! polydraw --write-config PATH
//! ```
//!
//! Commands are read from stdin, one per line. Single keys follow the
//! configured keybindings; pointer input is given as pixel coordinates.

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use polydraw::config::AppConfig;
use polydraw::format::{current_timestamp, polygon_file};
use polydraw::keybindings::{Key, KeyAction, KeyBindings};
use polydraw::message::Message;
use polydraw::preview::render_preview;
use polydraw::project::{ImageCatalog, ImageEntry, ensure_results_dir};
use polydraw::{Flow, PixelPoint, ReviewImage, ReviewSession};

type BoxError = Box<dyn std::error::Error>;

/// One parsed input line.
#[derive(Debug, PartialEq)]
enum Command {
    Send(Message),
    /// Rename with id and name still to be asked for
    PromptRename,
    Render,
    Info,
    Help,
    Unknown(String),
}

fn parse_point(x: Option<&str>, y: Option<&str>) -> Option<PixelPoint> {
    Some(PixelPoint::new(x?.parse().ok()?, y?.parse().ok()?))
}

fn parse_command(line: &str, keys: &KeyBindings) -> Command {
    let line = line.trim();
    let mut words = line.split_whitespace();
    let Some(head) = words.next() else {
        return Command::Unknown(String::new());
    };

    let key = match head {
        "\u{1b}" | "esc" => Some(Key::Escape),
        _ if head.chars().count() == 1 && words.clone().next().is_none() => {
            head.chars().next().map(Key::Char)
        }
        _ => None,
    };
    if let Some(action) = key.and_then(|key| keys.action_for_key(key)) {
        return match action {
            KeyAction::RenameRegion => Command::PromptRename,
            action => Message::from_action(action)
                .map(Command::Send)
                .unwrap_or_else(|| Command::Unknown(line.to_string())),
        };
    }

    let arg1 = words.next();
    let arg2 = words.next();
    let command = match head {
        "down" => parse_point(arg1, arg2).map(|p| Command::Send(Message::PointerDown(p))),
        "move" => parse_point(arg1, arg2).map(|p| Command::Send(Message::PointerMove(p))),
        "up" => Some(Command::Send(Message::PointerUp)),
        "rename" => match (arg1, arg2) {
            (Some(id), Some(name)) => Some(Command::Send(Message::RenameRegion {
                id: id.to_string(),
                name: name.to_string(),
            })),
            _ => None,
        },
        "delete" => arg1.map(|id| Command::Send(Message::DeleteRegion(id.to_string()))),
        "select" => arg1.map(|id| Command::Send(Message::SelectRegion(id.to_string()))),
        "render" => Some(Command::Render),
        "info" => Some(Command::Info),
        "help" | "?" => Some(Command::Help),
        "q" | "quit" => Some(Command::Send(Message::Quit)),
        _ => None,
    };
    command.unwrap_or_else(|| Command::Unknown(line.to_string()))
}

fn print_help(keys: &KeyBindings) {
    println!("Keys:");
    for line in keys.describe() {
        println!("  {}", line);
    }
    println!("Commands:");
    println!("  down X Y | move X Y | up     pointer input in image pixels");
    println!("  rename ID NAME | delete ID | select ID");
    println!("  render    write an annotated preview");
    println!("  info      print the current regions");
    println!("  q         save and quit");
}

fn prompt(
    lines: &mut impl Iterator<Item = io::Result<String>>,
    text: &str,
) -> io::Result<Option<String>> {
    print!("{}", text);
    io::stdout().flush()?;
    Ok(match lines.next().transpose()? {
        Some(line) => line.split_whitespace().next().map(str::to_string),
        None => None,
    })
}

fn write_preview(
    config: &AppConfig,
    entry: &ImageEntry,
    session: &ReviewSession,
) -> Result<PathBuf, BoxError> {
    let image = image::open(&entry.path)?.to_rgb8();
    let preview = render_preview(
        image,
        &entry.name,
        &current_timestamp(),
        session.collection(),
        &config.style,
    )?;

    let path = config.preview_dir().join(&entry.name).with_extension("png");
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    preview.save(&path)?;
    Ok(path)
}

fn run(config: &AppConfig) -> Result<(), BoxError> {
    log::info!("Source image : {:?}", config.source_image_dir);
    log::info!("Results      : {:?}", config.results_dir);
    ensure_results_dir(&config.results_dir)?;

    let catalog = ImageCatalog::from_folder_recursive(&config.source_image_dir)?;
    let mut images = Vec::with_capacity(catalog.len());
    // Entries aligned with the review list
    let mut entries = Vec::with_capacity(catalog.len());
    for entry in catalog.entries() {
        match entry.read_size() {
            Ok(size) => {
                images.push(ReviewImage::new(entry.name.clone(), size));
                entries.push(entry.clone());
            }
            Err(e) => log::warn!("Skipping unreadable image {:?}: {}", entry.path, e),
        }
    }

    let data_path = config.polygon_data_path();
    let (store, report) = polygon_file::load_or_empty(&data_path, &config.drawer);
    for warning in &report.warnings {
        log::warn!("{:?}: {}", warning.image, warning.message);
    }

    let Some(mut session) = ReviewSession::new(images, store, config.drawer.clone()) else {
        return Err(format!("No readable images in {:?}", config.source_image_dir).into());
    };

    print_help(&config.keys);
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        let image = session.current_image();
        print!("[{}/{}] {}> ", session.index() + 1, entries.len(), image.name);
        io::stdout().flush()?;

        let Some(line) = lines.next().transpose()? else {
            break;
        };
        match parse_command(&line, &config.keys) {
            Command::Send(message) => {
                if session.handle(message) == Flow::Quit {
                    break;
                }
            }
            Command::PromptRename => {
                let id = prompt(&mut lines, "Enter a region id: ")?;
                let name = prompt(&mut lines, "Enter a new name (no spaces): ")?;
                if let (Some(id), Some(name)) = (id, name) {
                    session.handle(Message::RenameRegion { id, name });
                }
            }
            Command::Render => match write_preview(config, &entries[session.index()], &session) {
                Ok(path) => println!("Wrote {}", path.display()),
                Err(e) => log::error!("Failed to write preview: {}", e),
            },
            Command::Info => println!("{}", session.collection().describe()),
            Command::Help => print_help(&config.keys),
            Command::Unknown(text) => {
                if !text.is_empty() {
                    println!("Unknown command: {} (type 'help')", text);
                }
            }
        }
    }

    let store = session.finish();
    polygon_file::save(&data_path, &config.app_name, &store)?;
    Ok(())
}

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().skip(1).collect();

    if args.first().map(String::as_str) == Some("--write-config") {
        let path = args
            .get(1)
            .map(PathBuf::from)
            .or_else(AppConfig::default_path);
        let Some(path) = path else {
            eprintln!("Could not determine a config path");
            return ExitCode::FAILURE;
        };
        return match AppConfig::default().save(&path) {
            Ok(()) => {
                println!("Wrote default configuration to {}", path.display());
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("Failed to write configuration: {}", e);
                ExitCode::FAILURE
            }
        };
    }

    let config = match AppConfig::resolve(args.first().map(Path::new)) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };

    env_logger::Builder::new()
        .filter_level(config.log_level.to_level_filter())
        .parse_default_env()
        .init();

    match run(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
