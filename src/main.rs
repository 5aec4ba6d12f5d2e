use album_import::imaging::RustBackend;
use album_import::importer::ImportContext;
use album_import::store::CsvStore;
use album_import::{config, driver, exif, output};
use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "album-import")]
#[command(about = "Import staged photo albums into a published gallery")]
#[command(long_about = "\
Import staged photo albums into a published gallery

Drop one directory per album into the staging root. Each photo is rendered
at every configured size plus a centered square, the source is deleted, and
the album's photo list is updated. Re-running is safe: photos already listed
are never duplicated.

Project layout (defaults):

  config.toml                          # Optional, see 'gen-config'
  public/assets/import-albums/         # Staging root
  │   └── trip/
  │       ├── IMG_1.jpg
  │       └── IMG_2.jpg
  public/assets/albums/                # Publish root
  │   └── trip/
  │       ├── IMG_1-sm.jpg             # ≤ 800px
  │       ├── IMG_1-md.jpg             # ≤ 2000px
  │       ├── IMG_1-lg.jpg             # ≤ 4000px
  │       ├── IMG_1-xl.jpg             # ≤ 6000px
  │       └── IMG_1-sq.jpg             # 640x640 centered square
  content/
      ├── albums-meta.csv              # id;name;description;cover;updated;urlFormat
      └── trip/index.csv               # photo;title;description;tags;extra

Run 'album-import gen-config' to generate a documented config.toml.")]
#[command(version)]
struct Cli {
    /// Project root holding config.toml and the configured directories
    #[arg(long, default_value = ".", global = true)]
    root: PathBuf,

    /// Increase log verbosity (-v info, -vv debug); RUST_LOG takes precedence
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(clap::Args, Clone, Default)]
struct ImportArgs {
    /// Create the staging root if it does not exist
    #[arg(long)]
    create_missing: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Import every staged album (the default)
    Import(ImportArgs),
    /// Print the EXIF tags of an image, filtered by category
    Exif {
        /// Image file to read
        file: PathBuf,
        /// Category to keep (repeatable); all configured categories by default
        #[arg(long = "category")]
        categories: Vec<String>,
    },
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "album_import=warn",
        1 => "album_import=info",
        _ => "album_import=debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command.unwrap_or(Command::Import(ImportArgs::default())) {
        Command::Import(args) => {
            let config = config::load_config(&cli.root)?;
            let backend = RustBackend::new();
            let store = CsvStore::new(config.content_dir(&cli.root));

            let (tx, rx) = std::sync::mpsc::channel();
            let printer = std::thread::spawn(move || {
                for event in rx {
                    for line in output::format_import_event(&event) {
                        println!("{}", line);
                    }
                }
            });

            let ctx = ImportContext::new(&backend, &config, &cli.root).with_events(tx);
            let result = driver::run_import(
                &ctx,
                &store,
                &config.import_dir(&cli.root),
                args.create_missing || config.import.create_if_missing,
            );
            // Closing the channel lets the printer drain and exit
            drop(ctx);
            printer.join().map_err(|_| "output thread panicked")?;

            output::print_summary(&result?);
        }
        Command::Exif { file, categories } => {
            let config = config::load_config(&cli.root)?;
            let selected = config.exif.select(&categories)?;
            let tags = exif::read_file_tags(&file)?;
            let kept = match exif::filter_by_categories(tags.as_ref(), &selected) {
                Some(kept) => serde_json::Value::Object(exif::named_tags(&kept)),
                None => serde_json::Value::Null,
            };
            println!("{}", serde_json::to_string_pretty(&kept)?);
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}
