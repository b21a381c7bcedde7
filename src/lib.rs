pub mod backlog;
pub mod cards;
pub mod catalog;
pub mod config;
mod error;
mod fonts;
pub mod i18n;
pub mod model;
mod paper;
pub mod pdf;
pub mod units;

pub use backlog::{Backlog, WorkItemProvider};
pub use cards::CardDeck;
pub use catalog::TemplateCatalog;
pub use error::Error;
pub use fonts::{DEFAULT_FONT_SIZE, FontStyle, ascender, line_height, text_width};
pub use i18n::{Labels, Localizer};
pub use model::{CardKind, LabelTemplate, WorkItem};
pub use paper::paper_dimensions;
pub use pdf::{Canvas, PdfCanvas};

use std::path::Path;
use std::time::Instant;

/// Lay out a card for every story (and, with `include_tasks`, every task
/// before its story) and return the PDF bytes.
pub fn render_cards(
    template: &LabelTemplate,
    stories: &[WorkItem],
    provider: &dyn WorkItemProvider,
    labels: &dyn Localizer,
    include_tasks: bool,
) -> Vec<u8> {
    let t0 = Instant::now();

    let canvas = PdfCanvas::new(template.paper_width, template.paper_height);
    let mut deck = CardDeck::new(template, canvas, provider, labels);
    for story in stories {
        deck.add(story, include_tasks);
    }
    let cards = deck.cards_emitted();
    let canvas = deck.into_canvas();
    let pages = canvas.page_count();
    let t_layout = t0.elapsed();

    let bytes = canvas.finish();
    let t_total = t0.elapsed();

    log::info!(
        "Timing: layout={:.1}ms, assembly={:.1}ms ({} cards on {} pages, {} bytes)",
        t_layout.as_secs_f64() * 1000.0,
        (t_total - t_layout).as_secs_f64() * 1000.0,
        cards,
        pages,
        bytes.len(),
    );

    bytes
}

pub fn render_cards_to_file(
    template: &LabelTemplate,
    stories: &[WorkItem],
    provider: &dyn WorkItemProvider,
    labels: &dyn Localizer,
    include_tasks: bool,
    output: &Path,
) -> Result<(), Error> {
    let t0 = Instant::now();
    let bytes = render_cards(template, stories, provider, labels, include_tasks);
    std::fs::write(output, &bytes)?;
    log::info!(
        "Wrote {} in {:.1}ms",
        output.display(),
        t0.elapsed().as_secs_f64() * 1000.0,
    );
    Ok(())
}
