mod app;
mod config;
mod logging;
mod ticker;
mod ui;

use anyhow::{Context, Result};
use app::App;
use clap::builder::{BoolishValueParser, RangedU64ValueParser};
use clap::{ArgAction, Parser};
use crate::config::{snap_wpm, AppConfig};
use crossterm::{
    event::{
        self, DisableBracketedPaste, EnableBracketedPaste, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use readfast::text;
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(name = "readfast")]
#[command(version)]
#[command(about = "Read text one word at a time, fast", long_about = None)]
// disable the default flags so they can sit under "Flags" below
#[command(disable_help_flag = true)]
#[command(disable_version_flag = true)]
#[command(help_template = "\
{name} {version}
{about-section}
{usage-heading} {usage}

{all-args}
")]
struct Cli {
    /// Text file to read ("-" reads stdin). Starts with an empty editor if omitted
    file: Option<PathBuf>,

    /// Reading speed in words per minute (50 to 1000, rounded to steps of 50)
    #[arg(short, long, value_parser = RangedU64ValueParser::<u32>::new().range(50..=1000))]
    wpm: Option<u32>,

    /// Save this speed as the default for new sessions, then exit
    #[arg(long, value_name = "WPM", value_parser = RangedU64ValueParser::<u32>::new().range(50..=1000))]
    set_default_wpm: Option<u32>,

    /// Save whether pasted text has its markdown stripped, then exit
    #[arg(long, value_name = "BOOL", action = ArgAction::Set, value_parser = BoolishValueParser::new())]
    set_auto_strip: Option<bool>,

    /// Strip markdown from the loaded file before reading
    #[arg(short, long, default_value_t = false, help_heading = "Flags")]
    strip: bool,

    /// Print the words as a JSON array instead of opening the reader
    #[arg(long, default_value_t = false, help_heading = "Flags")]
    print_words: bool,

    /// Print help
    #[arg(short, long, action = ArgAction::Help, help_heading = "Flags")]
    help: Option<bool>,

    /// Print version
    #[arg(short = 'V', long, action = ArgAction::Version, help_heading = "Flags")]
    version: Option<bool>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init_tracing();

    if cli.set_default_wpm.is_some() || cli.set_auto_strip.is_some() {
        return save_defaults(&cli);
    }

    let app_config = AppConfig::load().unwrap_or_else(|e| {
        warn!("config load failed, using defaults: {e:?}");
        eprintln!(
            "Warning: Failed to load config, using defaults. Error: {}",
            e
        );
        AppConfig::default()
    });

    let mut input = match &cli.file {
        Some(path) => Some(read_input(path)?),
        None => None,
    };
    if cli.strip {
        input = input.map(|raw| text::strip(&raw));
    }

    if cli.print_words {
        let words = text::tokenize(input.as_deref().unwrap_or_default());
        println!("{}", serde_json::to_string_pretty(&words)?);
        return Ok(());
    }

    let initial_wpm = cli.wpm.map(snap_wpm).unwrap_or(app_config.reader.default_wpm);
    let mut app = App::new(&app_config, initial_wpm)?;
    if let Some(input) = input {
        app.load_text(input);
    }

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableBracketedPaste)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableBracketedPaste
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        println!("Error: {:?}", err);
    }

    info!("session ended");
    Ok(())
}

fn save_defaults(cli: &Cli) -> Result<()> {
    let mut app_config = AppConfig::load().context("Refusing to overwrite an unreadable config")?;
    if let Some(wpm) = cli.set_default_wpm {
        app_config.reader.default_wpm = snap_wpm(wpm);
    }
    if let Some(auto_strip) = cli.set_auto_strip {
        app_config.reader.auto_strip_on_paste = auto_strip;
    }
    app_config.save()?;

    println!(
        "Saved defaults: {} wpm, strip markdown on paste: {}",
        app_config.reader.default_wpm,
        if app_config.reader.auto_strip_on_paste { "on" } else { "off" }
    );
    Ok(())
}

fn read_input(path: &Path) -> Result<String> {
    let bytes = if path == Path::new("-") {
        let mut buf = Vec::new();
        io::stdin()
            .read_to_end(&mut buf)
            .context("Could not read text from stdin")?;
        buf
    } else {
        fs::read(path).with_context(|| format!("Could not read {}", path.display()))?
    };
    info!(bytes = bytes.len(), "read input");
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    let size = terminal.size()?;
    app.resize(size.width, size.height);

    loop {
        terminal.draw(|f| ui::render(f, app))?;

        if event::poll(app.poll_timeout(Instant::now()))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if app.reader.is_presented() {
                        on_reader_key(app, key);
                    } else {
                        on_editor_key(app, key);
                    }
                }
                Event::Paste(pasted) => {
                    if !app.reader.is_presented() {
                        app.on_paste(&pasted);
                    }
                }
                Event::Resize(w, h) => {
                    app.resize(w, h);
                }
                _ => {}
            }
        }

        app.update(Instant::now());

        if app.should_quit {
            return Ok(());
        }
    }
}

fn on_editor_key(app: &mut App, key: KeyEvent) {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Esc => app.quit(),
        KeyCode::Char('q') if ctrl => app.quit(),
        KeyCode::Char('r') if ctrl => app.start_reading(),
        KeyCode::Char('f') if ctrl => app.fix_formatting(),
        KeyCode::Char('g') if ctrl => app.get_started(),
        KeyCode::Char(_) if ctrl => {}
        KeyCode::Char(c) => app.on_char(c),
        KeyCode::Tab => app.on_char('\t'),
        KeyCode::Enter => app.on_char('\n'),
        KeyCode::Backspace => app.on_backspace(),
        _ => {}
    }
}

fn on_reader_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') if key.modifiers.contains(KeyModifiers::CONTROL) => app.quit(),
        KeyCode::Char(' ') => app.reader.toggle_play_pause(),
        KeyCode::Esc => app.reader.exit_presentation(),
        KeyCode::Left => app.reader.rewind(),
        KeyCode::Right => app.reader.forward(),
        KeyCode::Up | KeyCode::Char(']') => app.reader.speed_up(),
        KeyCode::Down | KeyCode::Char('[') => app.reader.speed_down(),
        KeyCode::Char('r') | KeyCode::Char('R') => app.reader.restart(),
        _ => {}
    }
}
