use clap::{Parser, Subcommand};
use percent_ring::config::{self, Config};
use percent_ring::export;
use percent_ring::gui::app::{AppInit, AppModel};
use percent_ring::gui::theme::ThemeColors;
use percent_ring::sys::runtime;
use percent_ring::sys::server::SOCKET_PATH;
use relm4::RelmApp;
use std::io::Write;
use std::os::unix::net::UnixStream;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "percent-ring", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Read the configuration from this file instead of the default location
    #[arg(short = 'c', long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand, Debug, Clone)]
enum Commands {
    /// Open the interactive ring window (default)
    Show,
    /// Render the ring to a PNG or SVG file
    Render {
        /// Output file; the format follows the extension
        output: PathBuf,
        /// Override the configured value
        #[arg(short = 'v', long, allow_hyphen_values = true)]
        value: Option<f64>,
        /// Override the scale start angle, in degrees
        #[arg(long, allow_hyphen_values = true)]
        min_angle: Option<i32>,
        /// Override the scale end angle, in degrees
        #[arg(long, allow_hyphen_values = true)]
        max_angle: Option<i32>,
        /// Width and height of the image, in pixels
        #[arg(short = 's', long, default_value_t = 400)]
        size: i32,
    },
    /// Set the value of a running ring
    Set {
        #[arg(allow_hyphen_values = true)]
        value: f64,
    },
    /// Set the step size of a running ring
    Step { size: f64 },
    /// Ask a running ring to reload its configuration
    Reload,
    /// Write the default configuration file and print its path
    InitConfig,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command.clone().unwrap_or(Commands::Show) {
        Commands::Show => {
            show(cli.config);
            Ok(())
        }
        Commands::Render {
            output,
            value,
            min_angle,
            max_angle,
            size,
        } => {
            let mut config = load(cli.config.as_deref())?;
            if let Some(value) = value {
                config.gauge.value = value;
            }
            if let Some(min_angle) = min_angle {
                config.gauge.min_angle = min_angle;
            }
            if let Some(max_angle) = max_angle {
                config.gauge.max_angle = max_angle;
            }

            let state = config.gauge_state();
            let colors = ThemeColors::from_config(&config.theme);
            export::export(&output, &state, &colors, size)?;
            Ok(())
        }
        Commands::Set { value } => send_command(&format!("value {value}")),
        Commands::Step { size } => send_command(&format!("step {size}")),
        Commands::Reload => send_command("reload"),
        Commands::InitConfig => {
            let path = config::write_default_config()?;
            println!("{}", path.display());
            Ok(())
        }
    }
}

fn load(path: Option<&std::path::Path>) -> anyhow::Result<Config> {
    Ok(match path {
        Some(p) => config::load_config_from(p)?,
        None => config::load_config()?,
    })
}

fn show(config_path: Option<PathBuf>) {
    let config = config::load_or_default(config_path.as_deref());
    let state = config.gauge_state();

    let (tx, rx) = async_channel::bounded(32);

    // Start Background Services
    let watch_path = config_path.clone().or_else(|| config::get_config_path().ok());
    runtime::start_background_services(tx, watch_path);

    let app = RelmApp::new("org.percentring.PercentRing").with_args(Vec::new());

    app.run::<AppModel>(AppInit {
        state,
        theme: config.theme,
        config_path,
        events: rx,
    });
}

fn send_command(cmd: &str) -> anyhow::Result<()> {
    let mut stream = UnixStream::connect(SOCKET_PATH).map_err(|e| {
        anyhow::anyhow!(
            "Failed to connect to percent-ring at {}: {}. Is it running?",
            SOCKET_PATH,
            e
        )
    })?;

    writeln!(stream, "{}", cmd)?;
    Ok(())
}
