use clap::{Parser, Subcommand};
use inkstone::{bibtex, config, context::BuildContext, highlight, output, posts, resolutions, tags};
use std::path::{Path, PathBuf};

/// Shared flag for commands that touch the resolution store.
#[derive(clap::Args, Clone)]
struct StoreArgs {
    /// Discard the existing store and re-measure every image
    #[arg(long)]
    rebuild: bool,
}

#[derive(Parser)]
#[command(name = "inkstone")]
#[command(about = "Build-step generators for a Jekyll-style static blog")]
#[command(long_about = "\
Build-step generators for a Jekyll-style static blog

Runs locally, before the site build, and writes its results into the site
source tree so they can be committed and consumed as plain data files:

  site/
  ├── _config.yml             # Tool settings share the site config
  ├── _data/resolutions.yml   # Image dimension store (generated)
  ├── _posts/                 # YYYY-MM-DD-slug.md, YAML front matter
  ├── tags/                   # Generated tag stub pages
  └── resources/images/       # Source images (flat)

Generators:
  resolutions   Measure new images, append to the dimension store
  tags          Write a stub page for every previously-unseen tag
  build         Both of the above, in order
  highlight     Expand ·emphasis· / ¡comment¡ markup in rendered HTML
  bibtex        Print a BibTeX entry for one post

Run 'inkstone gen-config' for a documented settings fragment.")]
#[command(version)]
struct Cli {
    /// Site source directory (the one containing _config.yml)
    #[arg(long, default_value = ".", global = true)]
    source: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Refresh the image dimension store
    Resolutions(StoreArgs),
    /// Synthesize tag stub pages from post front matter
    Tags,
    /// Run all per-build generators: resolutions, then tags
    Build(StoreArgs),
    /// Apply the inline escape highlighter to rendered HTML files
    Highlight {
        /// Directory of rendered HTML (processed recursively, in place)
        dir: PathBuf,
    },
    /// Print a BibTeX citation entry for a post
    Bibtex {
        /// Path to the post file (_posts/YYYY-MM-DD-slug.md)
        post: PathBuf,
    },
    /// Validate posts and report pending work without writing anything
    Check,
    /// Print a documented _config.yml settings fragment
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Command::Resolutions(store_args) => {
            let ctx = BuildContext::load(&cli.source)?;
            let outcome = resolutions::run(&ctx, store_args.rebuild)?;
            output::print_resolutions(&outcome, &ctx.resolutions_file());
        }
        Command::Tags => {
            let ctx = BuildContext::load(&cli.source)?;
            let posts = posts::scan_posts(&ctx.posts_dir())?;
            let stats = tags::synthesize(&ctx, &posts)?;
            output::print_tags(&stats, &ctx.tags_dir());
        }
        Command::Build(store_args) => {
            let ctx = BuildContext::load(&cli.source)?;

            println!("==> Resolutions: {}", ctx.images_dir().display());
            let outcome = resolutions::run(&ctx, store_args.rebuild)?;
            output::print_resolutions(&outcome, &ctx.resolutions_file());

            println!("==> Tag pages: {}", ctx.tags_dir().display());
            let posts = posts::scan_posts(&ctx.posts_dir())?;
            let stats = tags::synthesize(&ctx, &posts)?;
            output::print_tags(&stats, &ctx.tags_dir());

            println!("==> Build complete");
        }
        Command::Highlight { dir } => {
            let ctx = BuildContext::load(&cli.source)?;
            let highlighter = highlight::Highlighter::new(&ctx.config.highlighter_class_name)?;
            let stats = highlight::process_dir(&dir, &highlighter)?;
            output::print_highlight(&stats, &dir);
        }
        Command::Bibtex { post } => {
            let ctx = BuildContext::load(&cli.source)?;
            let post = posts::parse_post(&post)?;
            let url = post_url(&ctx.config.baseurl, &post.slug);
            let citation = bibtex::Citation {
                title: &post.title,
                url: &url,
                year: post.year(),
            };
            let accessed = chrono::Local::now().date_naive();
            println!("{}", bibtex::entry(&ctx.config.owner, &citation, accessed));
        }
        Command::Check => {
            let ctx = BuildContext::load(&cli.source)?;
            println!("==> Checking {}", ctx.source.display());
            let posts = posts::scan_posts(&ctx.posts_dir())?;
            let store = resolutions::load_store(&ctx.resolutions_file())?;
            let images = list_images(&ctx.images_dir())?;
            let uncovered = images.iter().filter(|n| !store.contains_key(*n)).count();
            output::print_check(&posts, images.len(), uncovered);
            println!("==> Content is valid");
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_yaml());
        }
    }

    Ok(())
}

/// Canonical URL of a post, for citation entries.
fn post_url(baseurl: &str, slug: &str) -> String {
    format!("{}/{}", baseurl.trim_end_matches('/'), slug)
}

/// Base names of the regular files in the image directory.
fn list_images(images_dir: &Path) -> std::io::Result<Vec<String>> {
    let entries = match std::fs::read_dir(images_dir) {
        Ok(rd) => rd,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(e),
    };
    Ok(entries
        .filter_map(|e| e.ok())
        .filter(|e| e.path().is_file())
        .map(|e| e.file_name().to_string_lossy().to_string())
        .collect())
}
