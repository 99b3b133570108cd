use clap::{Parser, Subcommand};
use image_viewer::config::{LogLevel, ViewerConfig};
use image_viewer::encode::Payload;
use image_viewer::host::{self, HostCommand};
use image_viewer::session::Session;
use image_viewer::{loader, output};
use std::io::BufRead;
use tracing::warn;

#[derive(Parser)]
#[command(name = "image-viewer")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Browse and adjust the images in the current directory")]
#[command(long_about = "\
Browse and adjust the images in the current directory

Every PNG and JPEG whose name contains \".png\" or \".jpg\" is loaded into
memory at startup. Adjustments are applied to the image on screen and are
cumulative; nothing is written back to disk.

Session commands (one per line on stdin, one payload per line on stdout):

  first              show the first image
  next               show the next image (wraps to the first)
  previous | prev    show the previous image (stops at the first)
  bright <n>         brighten by n - 50 percent
  sharpen <n>        sharpen with sigma n - 50
  close | quit       exit immediately

Payloads are base64 PNG (navigation) or JPEG (adjustments). \"-\" means
there is nothing to show.")]
struct Cli {
    /// JPEG quality for adjusted images (1-100)
    #[arg(long, global = true)]
    quality: Option<u32>,

    /// Show debug logs
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Only show warnings and errors
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Run an interactive viewing session over stdin (default)
    View,
    /// Load the current directory and list what was found
    List {
        /// Print the listing as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let log_level = LogLevel::from_flags(cli.verbose, cli.quiet);
    let config = ViewerConfig::from_args(cli.quality, log_level)?;

    tracing_subscriber::fmt()
        .with_max_level(config.log_level.as_tracing())
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    match cli.command.unwrap_or(Command::View) {
        Command::View => run_session(config)?,
        Command::List { json: true } => {
            let collection = loader::scan_and_load();
            println!("{}", output::listing_json(&collection)?);
        }
        Command::List { json: false } => {
            let (tx, rx) = std::sync::mpsc::channel();
            let printer = std::thread::spawn(move || {
                for event in rx {
                    for line in output::format_load_event(&event) {
                        println!("{}", line);
                    }
                }
            });
            let collection = loader::scan_and_load_with_events(Some(tx));
            printer.join().map_err(|_| "progress printer panicked")?;
            println!();
            output::print_listing(&collection);
        }
    }

    Ok(())
}

/// Read commands from stdin until EOF or `close`.
fn run_session(config: ViewerConfig) -> std::io::Result<()> {
    let mut session = Session::scan_and_load(config);

    for line in std::io::stdin().lock().lines() {
        let line = line?;
        match HostCommand::parse(&line) {
            Ok(Some(command)) => println!("{}", host::dispatch(&mut session, command)),
            Ok(None) => {}
            Err(e) => {
                warn!(error = %e, "ignoring command");
                println!("{}", Payload::Nothing);
            }
        }
    }
    Ok(())
}
