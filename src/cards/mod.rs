pub mod grid;
pub mod render;

use crate::backlog::WorkItemProvider;
use crate::i18n::Localizer;
use crate::model::{LabelTemplate, WorkItem};
use crate::pdf::Canvas;

use grid::{CellPlacement, GridLayout};
use render::{Card, render_card};

/// Lays out cards for one document. Placement depends only on how many
/// cards came before, so cards must be added in print order.
pub struct CardDeck<'a, C: Canvas> {
    grid: GridLayout<'a>,
    canvas: C,
    provider: &'a dyn WorkItemProvider,
    labels: &'a dyn Localizer,
}

impl<'a, C: Canvas> CardDeck<'a, C> {
    pub fn new(
        template: &'a LabelTemplate,
        canvas: C,
        provider: &'a dyn WorkItemProvider,
        labels: &'a dyn Localizer,
    ) -> Self {
        Self {
            grid: GridLayout::new(template),
            canvas,
            provider,
            labels,
        }
    }

    pub fn cards_emitted(&self) -> usize {
        self.grid.cards_emitted()
    }

    pub fn canvas(&self) -> &C {
        &self.canvas
    }

    pub fn into_canvas(self) -> C {
        self.canvas
    }

    /// Draw a single card in the next free cell.
    pub fn card(&mut self, card: &Card) -> CellPlacement {
        let cell = self.grid.next_cell();
        if cell.page_break {
            self.canvas.start_new_page();
        }
        log::trace!(
            "card {} ({:?} #{}) -> page {} row {} col {}",
            cell.index,
            card.kind,
            card.item.id,
            cell.page,
            cell.row,
            cell.col,
        );
        render_card(
            &mut self.canvas,
            self.grid.template(),
            cell.left,
            cell.top,
            card,
            self.labels,
        );
        cell
    }

    /// One card per direct child of `story` (when `include_children`), then
    /// one card for the story itself.
    pub fn add(&mut self, story: &WorkItem, include_children: bool) -> Vec<CellPlacement> {
        let mut cells = Vec::new();
        if include_children {
            for task in self.provider.children(story) {
                cells.push(self.card(&Card::task(&task, story)));
            }
        }
        cells.push(self.card(&Card::story(story)));
        cells
    }
}
