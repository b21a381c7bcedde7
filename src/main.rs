use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use taskcards::catalog::fetch::{CatalogSource, IngestReport, LocalSource, refresh_catalog};
use taskcards::catalog::MergeStats;
use taskcards::catalog::glabels::ingest_document;
use taskcards::config::Settings;
use taskcards::{Backlog, Error, Labels, TemplateCatalog};

#[derive(Parser)]
#[command(name = "taskcards", version, about = "Print taskboard cards on label sheets")]
struct Cli {
    /// Template store file [env: TASKCARDS_STORE]
    #[arg(long, global = true)]
    store: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Refresh the store from the glabels template catalog
    Fetch {
        /// Base URL of the catalog documents [env: TASKCARDS_TEMPLATE_URL]
        #[arg(long)]
        base_url: Option<String>,
        /// Read the documents from a local glabels templates directory instead
        #[arg(long, conflicts_with = "base_url")]
        from_dir: Option<PathBuf>,
    },
    /// Merge local glabels template files into the store
    Import {
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
    /// List the label templates in the store
    List,
    /// Show one label template
    Show { key: String },
    /// Render a backlog file to a PDF of cards
    Render {
        /// Backlog YAML file
        backlog: PathBuf,
        /// Output PDF
        #[arg(short, long)]
        output: PathBuf,
        /// Catalog key of the label sheet [env: TASKCARDS_CARD_SPEC]
        #[arg(short, long)]
        label: Option<String>,
        /// Label strings YAML file [env: TASKCARDS_LABELS]
        #[arg(long)]
        labels: Option<PathBuf>,
        /// Print story cards only
        #[arg(long)]
        no_tasks: bool,
    },
}

fn log_report(report: &IngestReport) {
    let totals = report.totals();
    log::info!(
        "Catalog refresh: {} new, {} replaced, {} unchanged, {} protected",
        totals.inserted,
        totals.replaced,
        totals.unchanged,
        totals.protected,
    );
    for (name, err) in report.failures() {
        eprintln!("warning: {name}: {err}");
    }
}

#[cfg(feature = "fetch")]
fn http_source(url: &str) -> Result<Box<dyn CatalogSource>, Error> {
    Ok(Box::new(taskcards::catalog::fetch::HttpSource::new(url)?))
}

#[cfg(not(feature = "fetch"))]
fn http_source(url: &str) -> Result<Box<dyn CatalogSource>, Error> {
    Err(Error::Fetch {
        source_name: url.to_string(),
        reason: "built without the `fetch` feature; use --from-dir".into(),
    })
}

fn run(cli: Cli) -> Result<(), Error> {
    let mut settings = Settings::from_env();
    if let Some(store) = cli.store {
        settings.store_path = store;
    }

    match cli.command {
        Command::Fetch { base_url, from_dir } => {
            if let Some(url) = base_url {
                settings.template_url = url;
            }
            let source: Box<dyn CatalogSource> = match from_dir {
                Some(dir) => Box::new(LocalSource::new(dir)),
                None => http_source(&settings.template_url)?,
            };
            let mut catalog = TemplateCatalog::load(&settings.store_path)?;
            let report = refresh_catalog(&mut catalog, source.as_ref(), &settings.store_path)?;
            log_report(&report);
        }
        Command::Import { files } => {
            let mut catalog = TemplateCatalog::load(&settings.store_path)?;
            let mut totals = MergeStats::default();
            for file in &files {
                let name = file.display().to_string();
                let bytes = std::fs::read(file)?;
                match ingest_document(&mut catalog, &name, &bytes) {
                    Ok(stats) => totals.absorb(stats),
                    Err(e) => eprintln!("warning: {e}"),
                }
            }
            catalog.persist(&settings.store_path)?;
            println!(
                "{} new, {} replaced, {} unchanged, {} protected",
                totals.inserted, totals.replaced, totals.unchanged, totals.protected
            );
        }
        Command::List => {
            let catalog = TemplateCatalog::load(&settings.store_path)?;
            for (key, t) in catalog.iter() {
                println!(
                    "{key:<40} {:<8} {}x{} {:.1}x{:.1}pt",
                    t.paper_size_name, t.across, t.down, t.width, t.height
                );
            }
        }
        Command::Show { key } => {
            let catalog = TemplateCatalog::load(&settings.store_path)?;
            let t = catalog.lookup(&key)?;
            println!("{key}");
            println!(
                "  paper:        {} ({:.2} x {:.2}pt)",
                t.paper_size_name, t.paper_width, t.paper_height
            );
            println!("  grid:         {} across x {} down", t.across, t.down);
            println!("  label:        {:.2} x {:.2}pt", t.width, t.height);
            println!(
                "  margins:      top {:.2}pt, left {:.2}pt",
                t.top_margin, t.left_margin
            );
            println!(
                "  pitch:        horizontal {:.2}pt, vertical {:.2}pt",
                t.horizontal_pitch, t.vertical_pitch
            );
            println!("  inner margin: {:.2}pt", t.inner_margin);
            println!("  source:       {:?}", t.source);
        }
        Command::Render {
            backlog,
            output,
            label,
            labels,
            no_tasks,
        } => {
            if label.is_some() {
                settings.card_spec = label;
            }
            if labels.is_some() {
                settings.labels_path = labels;
            }

            let mut catalog = TemplateCatalog::load(&settings.store_path)?;
            catalog.select(settings.card_spec.clone());
            let template = catalog.selected_default()?;

            let labels = match &settings.labels_path {
                Some(path) => Labels::load(path)?,
                None => Labels::default(),
            };
            let backlog = Backlog::load(&backlog)?;
            taskcards::render_cards_to_file(
                template,
                backlog.stories(),
                &backlog,
                &labels,
                !no_tasks,
                &output,
            )?;
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();
    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
