use crate::model::LabelTemplate;

/// Where the `index`-th card of a document lands.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CellPlacement {
    pub index: usize,
    pub page: usize, // 1-based
    pub row: u32,    // 1-based
    pub col: u32,    // 1-based
    /// A new page has to be started before drawing this card.
    pub page_break: bool,
    /// Top-left corner of the cell, bottom-left page origin.
    pub left: f32,
    pub top: f32,
}

/// Cards fill a sheet column by column: down the rows of column 1, then
/// column 2, and so on.
pub fn place_card(template: &LabelTemplate, index: usize) -> CellPlacement {
    let down = template.down.max(1) as usize;
    let across = template.across.max(1) as usize;

    let row = (index % down) as u32 + 1;
    let col = ((index / down) % across) as u32 + 1;
    let page = index / (down * across) + 1;

    let top =
        template.paper_height - (template.top_margin + template.vertical_pitch * (row - 1) as f32);
    let left = template.left_margin + template.horizontal_pitch * (col - 1) as f32;

    CellPlacement {
        index,
        page,
        row,
        col,
        page_break: row == 1 && col == 1 && index != 0,
        left,
        top,
    }
}

/// Card counter for one document. Every card, task or story, takes the
/// next cell.
pub struct GridLayout<'t> {
    template: &'t LabelTemplate,
    cards_emitted: usize,
}

impl<'t> GridLayout<'t> {
    pub fn new(template: &'t LabelTemplate) -> Self {
        Self {
            template,
            cards_emitted: 0,
        }
    }

    pub fn cards_emitted(&self) -> usize {
        self.cards_emitted
    }

    pub fn template(&self) -> &'t LabelTemplate {
        self.template
    }

    /// Placement for the next card; advances the counter by one.
    pub fn next_cell(&mut self) -> CellPlacement {
        let placement = place_card(self.template, self.cards_emitted);
        self.cards_emitted += 1;
        placement
    }
}
