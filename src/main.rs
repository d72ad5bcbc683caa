use clap::{Parser, Subcommand};
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use vn_gallery::config::{self, GalleryConfig};
use vn_gallery::gallery::Gallery;
use vn_gallery::imaging::FsHost;
use vn_gallery::navigation::Action;
use vn_gallery::output::{self, WarmReport};
use vn_gallery::presenter::Slot;
use vn_gallery::scan;
use vn_gallery::sizes::SizeCache;
use vn_gallery::types::Size;

/// Shared flags for commands that look at one page of a slide.
#[derive(clap::Args, Clone)]
struct PageArgs {
    /// Slide path from the root, slash-separated by slide name ("Chapter One/cg").
    /// Defaults to the first slide.
    #[arg(long)]
    slide: Option<String>,

    /// Page number, 1-based
    #[arg(long, default_value_t = 1)]
    page: usize,
}

#[derive(Parser)]
#[command(name = "vn-gallery")]
#[command(about = "Unlockable media gallery for visual novels")]
#[command(long_about = "\
Unlockable media gallery for visual novels

Your filesystem is the data source. Directories holding directories become
sliders, directories holding media become slides, and every image or video
becomes an unlockable item, ordered by numeric prefix.

Content structure:

  content/
  ├── gallery.toml                 # Gallery config (optional)
  ├── gallery/                     # Placeholders, size cache, video thumbnails
  │   ├── images/locked.png        # Shown for locked items
  │   ├── db/images.json           # Persisted image sizes
  │   └── thumbnails/…/op_thumbnail.jpg
  ├── 010-Chapter-One/             # Slider (has subdirs)
  │   ├── 010-cg/                  # Slide
  │   │   ├── 001-beach.png        # Item (tooltip \"beach\")
  │   │   ├── 002-night.png
  │   │   └── 002-night.ogg        # Song played with 002-night.png
  │   └── 020-movies/
  │       └── op.webm              # Video item
  └── extras/                      # Slide
      └── bonus.png

Unlock conditions come from [host] unlocked in gallery.toml.

Run 'vn-gallery gen-config' to generate a documented gallery.toml.")]
#[command(version)]
struct Cli {
    /// Content directory
    #[arg(long, default_value = "content", global = true)]
    source: PathBuf,

    /// Config file (defaults to gallery.toml in the content directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// More log output (-v info, -vv debug); RUST_LOG overrides
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the sliders, slides and items of the content directory
    Tree,
    /// Print the slots of one page of a slide
    Page(PageArgs),
    /// Click a slot of a page and print what the gallery would do
    Show {
        #[command(flatten)]
        page: PageArgs,
        /// Slot position on the page, 1-based
        slot: usize,
    },
    /// Record the size of every image in the size cache
    Warm {
        /// Worker threads for probing (defaults to all cores)
        #[arg(long)]
        jobs: Option<usize>,
    },
    /// Print a stock gallery.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Command::Tree => {
            let gallery = open_gallery(&cli.source, cli.config.as_deref())?;
            output::print_tree(&gallery);
        }
        Command::Page(args) => {
            let mut gallery = open_gallery(&cli.source, cli.config.as_deref())?;
            let slots = open_page(&mut gallery, &args)?;
            output::print_page(&gallery, &slots);
        }
        Command::Show { page, slot } => {
            let mut gallery = open_gallery(&cli.source, cli.config.as_deref())?;
            let slots = open_page(&mut gallery, &page)?;
            let action = match slot.checked_sub(1).and_then(|i| slots.get(i)) {
                Some(Slot::Button(button)) => button.action.clone(),
                Some(_) => return Err(format!("slot {slot} has no item").into()),
                None => return Err(format!("slot {slot} is not on the page").into()),
            };
            let effect = gallery.perform(action)?;
            output::print_effect(&effect);
        }
        Command::Warm { jobs } => {
            let config = load_config(&cli.source, cli.config.as_deref())?;
            init_thread_pool(jobs);
            let report = warm(&cli.source, &config)?;
            output::print_warm(&report);
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// `warn` by default, raised by each `-v`, with `RUST_LOG` taking precedence.
fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();
}

fn load_config(source: &Path, file: Option<&Path>) -> Result<GalleryConfig, config::ConfigError> {
    match file {
        Some(path) => config::load_config_file(path),
        None => config::load_config(source),
    }
}

fn open_gallery(
    source: &Path,
    config_file: Option<&Path>,
) -> Result<Gallery<FsHost>, Box<dyn std::error::Error>> {
    let config = load_config(source, config_file)?;
    let (gallery, summary) = scan::open(source, config)?;
    log::debug!("{} items in {} slides", summary.items, summary.slides);
    Ok(gallery)
}

/// Select the slide at `args.slide`, then the requested page, and build it.
fn open_page(
    gallery: &mut Gallery<FsHost>,
    args: &PageArgs,
) -> Result<Vec<Slot>, Box<dyn std::error::Error>> {
    if let Some(path) = &args.slide {
        gallery.to_first_slide();
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        for segment in &segments {
            gallery.change_slide(segment);
        }
        if segments.last().is_none_or(|last| !gallery.is_current(last)) {
            return Err(format!("no slide at '{path}'").into());
        }
    }
    if args.page > 1 {
        gallery.perform(Action::ChangePage(args.page - 1))?;
    }
    gallery.update()?;
    Ok(gallery.page_buttons()?)
}

/// Probe every uncached image in parallel and record the sizes.
fn warm(root: &Path, config: &GalleryConfig) -> Result<WarmReport, Box<dyn std::error::Error>> {
    let dirs = scan::scan(root, config)?;
    let images = scan::image_paths(&dirs);
    let mut cache = SizeCache::load(root.join(&config.cache_file));

    let missing: Vec<&String> = images
        .iter()
        .filter(|path| !cache.contains(path, false))
        .collect();
    let probed: Vec<_> = missing
        .par_iter()
        .map(|path| (*path, image::image_dimensions(root.join(path))))
        .collect();

    let mut report = WarmReport {
        images: images.len(),
        already_cached: images.len() - missing.len(),
        ..WarmReport::default()
    };
    for (path, result) in probed {
        match result {
            Ok((width, height)) => {
                cache.put(path, Size::new(width, height), false);
                report.probed += 1;
            }
            Err(e) => {
                log::warn!("cannot read size of {path}: {e}");
                report.failed += 1;
            }
        }
    }
    cache.write()?;
    Ok(report)
}

/// Size the rayon pool. Caps at the number of available CPU cores.
fn init_thread_pool(jobs: Option<usize>) {
    let cores = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);
    let threads = jobs.map_or(cores, |j| j.clamp(1, cores));
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build_global()
        .ok();
}
