mod app;
mod brew;
mod config;
mod error;
mod theme;
mod ui;

use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use app::{App, Popup};
use brew::BrewCalculator;
use config::AppConfig;
use error::MountError;
use theme::Theme;

#[derive(Parser, Debug)]
#[command(name = "perfect-pour")]
#[command(version = "0.1.0")]
#[command(about = "Work out water per pour and total brew weight for pour-over coffee")]
struct Args {
    /// Grams of coffee grounds (non-numeric or negative values become 0)
    #[arg(short, long, allow_hyphen_values = true)]
    coffee: Option<String>,

    /// Number of pours, 1 to 5
    #[arg(short, long, allow_hyphen_values = true)]
    pours: Option<String>,

    /// Print the results as text and exit
    #[arg(long)]
    print: bool,

    /// Print the results as JSON and exit
    #[arg(long, conflicts_with = "print")]
    json: bool,

    /// Read config from this file instead of the default location
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    // Initialize logging (stderr shares the screen with the TUI; redirect it to keep logs)
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => AppConfig::load_from(path)?,
        None => AppConfig::load(),
    };

    let calculator = initial_calculator(&args, &config);

    // Handle CLI-only output
    if args.json {
        println!("{}", serde_json::to_string(&calculator.results())?);
        return Ok(());
    }

    if args.print {
        print_results(&calculator);
        return Ok(());
    }

    ui::init_theme(Theme::load(config.theme_file.as_deref()));

    run_tui(App::new(calculator), Duration::from_millis(config.tick_rate_ms)).map_err(|e| {
        tracing::error!("{:#}", e);
        e
    })
}

/// Startup values: built-in defaults, then config, then CLI flags.
/// Everything goes through the same setters as the input fields.
fn initial_calculator(args: &Args, config: &AppConfig) -> BrewCalculator {
    let mut calculator = BrewCalculator::default();

    let coffee = args
        .coffee
        .clone()
        .or_else(|| config.coffee_grams.map(|g| g.to_string()));
    if let Some(coffee) = coffee {
        calculator.set_coffee_grams(&coffee);
    }

    let pours = args
        .pours
        .clone()
        .or_else(|| config.pours.map(|p| p.to_string()));
    if let Some(pours) = pours {
        calculator.set_num_pours(&pours);
    }

    calculator
}

fn print_results(calculator: &BrewCalculator) {
    let results = calculator.results();
    println!("Coffee grounds:         {} g", results.coffee_grams);
    println!("Number of pours:        {}", results.num_pours.label());
    println!("Water per pour:         {} g", results.water_per_pour);
    println!("Final coffee quantity:  {} g", results.final_quantity);
}

/// Fail fast when there is no terminal to draw into, or it is too small
fn check_mount_target() -> Result<(), MountError> {
    if !io::stdout().is_tty() {
        return Err(MountError::NotATerminal);
    }
    let (width, height) = crossterm::terminal::size()?;
    check_terminal_size(width, height)
}

fn check_terminal_size(width: u16, height: u16) -> Result<(), MountError> {
    if width < ui::MIN_WIDTH || height < ui::MIN_HEIGHT {
        return Err(MountError::TooSmall {
            width,
            height,
            min_width: ui::MIN_WIDTH,
            min_height: ui::MIN_HEIGHT,
        });
    }
    Ok(())
}

fn run_tui(mut app: App, tick_rate: Duration) -> Result<()> {
    check_mount_target()?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    tracing::info!("Calculator mounted");

    // Main loop
    let result = run_app(&mut terminal, &mut app, tick_rate);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    tick_rate: Duration,
) -> Result<()> {
    loop {
        terminal.draw(|f| ui::draw(f, app))?;

        if event::poll(tick_rate)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    match key.code {
                        KeyCode::Char('q') if app.popup == Popup::None => return Ok(()),
                        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                            return Ok(())
                        }
                        _ => app.handle_key(key),
                    }
                }
            }
        }

        app.tick();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(extra: &[&str]) -> Args {
        let mut argv = vec!["perfect-pour"];
        argv.extend_from_slice(extra);
        Args::parse_from(argv)
    }

    #[test]
    fn test_cli_overrides_config() {
        let config = AppConfig {
            coffee_grams: Some(18),
            pours: Some(2),
            ..AppConfig::default()
        };

        let calc = initial_calculator(&args(&[]), &config);
        assert_eq!(calc.coffee_grams(), 18);
        assert_eq!(calc.num_pours().get(), 2);

        let calc = initial_calculator(&args(&["--coffee", "15", "--pours", "4"]), &config);
        assert_eq!(calc.water_per_pour(), 45);
        assert_eq!(calc.final_quantity(), 180);
    }

    #[test]
    fn test_cli_values_are_coerced() {
        let calc = initial_calculator(&args(&["--coffee", "-5", "--pours", "lots"]), &AppConfig::default());
        assert_eq!(calc.coffee_grams(), 0);
        assert_eq!(calc.num_pours().get(), 3);
    }

    #[test]
    fn test_defaults_without_overrides() {
        let calc = initial_calculator(&args(&[]), &AppConfig::default());
        assert_eq!(calc.results().final_quantity, 180);
    }

    #[test]
    fn test_print_and_json_conflict() {
        let parsed = Args::try_parse_from(["perfect-pour", "--print", "--json"]);
        assert!(parsed.is_err());
    }

    #[test]
    fn test_undersized_terminal_rejected() {
        assert!(check_terminal_size(ui::MIN_WIDTH, ui::MIN_HEIGHT).is_ok());
        let err = check_terminal_size(30, 10).unwrap_err();
        assert!(matches!(err, MountError::TooSmall { width: 30, height: 10, .. }));
    }
}
