use clap::{Parser, Subcommand};
use ganglio_site::{config, head, output, routing, scan, translations};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::ParseError;

/// Filter used when `RUST_LOG` is unset or empty.
const DEFAULT_LOG_FILTER: &str = "ganglio_site=info";

#[derive(Parser)]
#[command(name = "ganglio-site")]
#[command(about = "Content validation and locale routing for a multilingual research site")]
#[command(long_about = "\
Content validation and locale routing for a multilingual research site

Articles, disease pages and references are plain files. Translations of the
same page share a path; the locale directory is not part of the slug.

Source structure:

  site/
  ├── site.toml                          # Site config (optional)
  ├── i18n/                              # UI strings, one bundle per locale
  │   ├── en.json
  │   └── sv.json
  └── content/
      ├── articles/
      │   ├── en/hypothesis/010-overview.md   # 010- = sort order
      │   └── sv/hypothesis/010-overview.md   # same slug = translation
      ├── diseases/
      │   └── en/narcolepsy.md
      └── references/
          └── ahmed-2015.yaml           # .json / .yaml / .yml

URLs: the default locale is served without a prefix (/about/), every other
locale under its code (/sv/about/).

Log verbosity follows RUST_LOG (e.g. RUST_LOG=ganglio_site=debug).

Run 'ganglio-site gen-config' to generate a documented site.toml.")]
#[command(version)]
struct Cli {
    /// Source root containing site.toml, the content directory and i18n bundles
    #[arg(long, default_value = ".", global = true)]
    source: PathBuf,

    /// Directory for intermediate files (manifest)
    #[arg(long, default_value = ".ganglio-site-temp", global = true)]
    temp_dir: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Scan and validate content into a manifest
    Scan,
    /// Validate content and translation bundles without writing anything
    Check,
    /// Show how a path or URL resolves and its equivalents in every locale
    Routes {
        /// Request path (/sv/about/) or full URL
        target: String,
        /// Also print the head links and language switcher as HTML
        #[arg(long)]
        html: bool,
    },
    /// Print a stock site.toml with all options documented
    GenConfig,
}

/// `RUST_LOG` replaces the default filter entirely when set.
fn log_filter(rust_log: Option<&str>) -> Result<EnvFilter, ParseError> {
    match rust_log.map(str::trim).filter(|spec| !spec.is_empty()) {
        Some(spec) => EnvFilter::try_new(spec),
        None => EnvFilter::try_new(DEFAULT_LOG_FILTER),
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let rust_log = std::env::var("RUST_LOG").ok();
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(rust_log.as_deref())?)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Scan => {
            let manifest = scan::scan(&cli.source)?;
            std::fs::create_dir_all(&cli.temp_dir)?;
            let manifest_path = cli.temp_dir.join("manifest.json");
            let json = serde_json::to_string_pretty(&manifest)?;
            std::fs::write(&manifest_path, json)?;
            output::print_scan_output(&manifest);
        }
        Command::Check => {
            let manifest = scan::scan(&cli.source)?;
            let bundles_dir = cli.source.join(&manifest.config.i18n.i18n_dir);
            let translations =
                translations::Translations::load(&bundles_dir, &manifest.locales)?;
            output::print_check_output(&manifest, &translations);
        }
        Command::Routes { target, html } => {
            let site_config = config::load_config(&cli.source)?;
            let registry = site_config.registry()?;
            output::print_routes_output(&registry, &site_config.site_url, &target);
            if html {
                let current = routing::resolve_locale_from_url(&registry, &target);
                let alternates = routing::alternates_for_url(&registry, &target);
                println!();
                println!(
                    "{}",
                    head::canonical_link(&alternates, current, &site_config.site_url).into_string()
                );
                println!(
                    "{}",
                    head::alternate_links(&alternates, &registry, &site_config.site_url)
                        .into_string()
                );
                println!(
                    "{}",
                    head::language_switcher(&alternates, &registry, current).into_string()
                );
            }
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}
