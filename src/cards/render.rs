use crate::i18n::{LabelKey, Localizer};
use crate::model::{CardKind, LabelTemplate, Rect, WorkItem};
use crate::pdf::Canvas;
use crate::pdf::flow::{BoxOptions, RenderedBox, TextFlowBox};

const BORDER_WIDTH: f32 = 0.5;
const SCORE_FONT_SIZE: f32 = 12.0;
const SMALL_FONT_SIZE: f32 = 6.0;
const BODY_FONT_SIZE: f32 = 8.0;
const DIVIDER_GAP: f32 = 2.0;
const BODY_BOTTOM_RESERVE: f32 = 8.0;

/// One card to draw: the item itself plus the story it belongs to. For a
/// story card both are the same item.
#[derive(Clone, Copy, Debug)]
pub struct Card<'a> {
    pub kind: CardKind,
    pub item: &'a WorkItem,
    pub story: &'a WorkItem,
}

impl<'a> Card<'a> {
    pub fn task(task: &'a WorkItem, story: &'a WorkItem) -> Self {
        Self {
            kind: CardKind::Task,
            item: task,
            story,
        }
    }

    pub fn story(story: &'a WorkItem) -> Self {
        Self {
            kind: CardKind::Story,
            item: story,
            story,
        }
    }
}

impl CardKind {
    fn score(self, item: &WorkItem) -> Option<f32> {
        match self {
            CardKind::Task => item.estimated_hours,
            CardKind::Story => item.story_points,
        }
    }

    fn score_unit(self) -> LabelKey {
        match self {
            CardKind::Task => LabelKey::Hours,
            CardKind::Story => LabelKey::Points,
        }
    }

    fn parent_label(self, card: &Card, labels: &dyn Localizer) -> String {
        match self {
            CardKind::Task => card.story.subject.clone(),
            CardKind::Story => card
                .item
                .fixed_version
                .clone()
                .unwrap_or_else(|| labels.label(LabelKey::ProductBacklog)),
        }
    }
}

pub fn score_text(card: &Card, labels: &dyn Localizer) -> String {
    let value = card
        .kind
        .score(card.item)
        .map(|v| v.to_string())
        .unwrap_or_else(|| "?".to_string());
    format!("{value} {}", labels.label(card.kind.score_unit()))
}

/// `"Task #7 : Story #3 (2)"`: the item first, then each ancestor up to the
/// root, then the story's backlog position.
pub fn trail_text(card: &Card, labels: &dyn Localizer) -> String {
    let hops: Vec<String> = card
        .item
        .ancestry
        .iter()
        .rev()
        .map(|hop| format!("{} #{}", hop.tracker, hop.id))
        .collect();
    let position = card
        .story
        .position
        .map(|p| p.to_string())
        .unwrap_or_else(|| labels.label(LabelKey::NotPrioritized));
    format!("{} ({position})", hops.join(" : "))
}

pub fn category_text(item: &WorkItem, labels: &dyn Localizer) -> String {
    item.category
        .as_ref()
        .map(|name| format!("{}: {name}", labels.label(LabelKey::Category)))
        .unwrap_or_default()
}

/// Every text box of a drawn card, top to bottom.
#[derive(Clone, Debug)]
pub struct RenderedCard {
    pub outline: Rect,
    pub content: Rect,
    pub score: RenderedBox,
    pub trail: RenderedBox,
    pub parent: RenderedBox,
    pub title: RenderedBox,
    pub divider_y: f32,
    pub body: RenderedBox,
    pub category: RenderedBox,
}

/// Draw one card with its top-left corner at `(left, top)`.
pub fn render_card<C: Canvas + ?Sized>(
    canvas: &mut C,
    template: &LabelTemplate,
    left: f32,
    top: f32,
    card: &Card,
    labels: &dyn Localizer,
) -> RenderedCard {
    let outline = Rect::new(left, top - template.height, template.width, template.height);
    canvas.stroke_rect(outline, BORDER_WIDTH);
    let content = outline.inset(template.inner_margin);

    let mut flow = TextFlowBox::new(canvas, content);
    let width = flow.width();

    let (score, score_width) = flow.with_font_size(SCORE_FONT_SIZE, |f| {
        let text = score_text(card, labels);
        let score_width = f.width_of(&format!(" {text} "));
        let height = f.font_height();
        let rendered = f.place(&text, BoxOptions::new(score_width, height).at_x(width - score_width));
        (rendered, score_width)
    });

    // The trail shares the score's row.
    flow.reset_cursor();
    let trail = flow.with_font_size(SMALL_FONT_SIZE, |f| {
        let height = f.font_height();
        f.place(
            &trail_text(card, labels),
            BoxOptions::new(width - score_width, height).italic(),
        )
    });

    let parent = flow.with_font_size(SMALL_FONT_SIZE, |f| {
        let height = f.font_height();
        f.place(
            &card.kind.parent_label(card, labels),
            BoxOptions::new(width - score_width, height),
        )
    });

    let title_height = flow.font_height() * 2.0;
    let title = flow.place(&card.item.subject, BoxOptions::new(width, title_height));

    let divider_y = flow.cursor();
    flow.rule(DIVIDER_GAP, BORDER_WIDTH);

    let body = flow.with_font_size(BODY_FONT_SIZE, |f| {
        let text = card
            .item
            .description
            .as_deref()
            .filter(|d| !d.trim().is_empty())
            .unwrap_or(&card.item.subject);
        let height = f.cursor() - BODY_BOTTOM_RESERVE;
        f.place(text, BoxOptions::new(width, height))
    });

    let category = flow.with_font_size(SMALL_FONT_SIZE, |f| {
        let text = category_text(card.item, labels);
        let category_width = f.width_of(&format!(" {text} "));
        let height = f.font_height();
        f.place(
            &text,
            BoxOptions::new(category_width, height).at_x(width - category_width),
        )
    });

    RenderedCard {
        outline,
        content,
        score,
        trail,
        parent,
        title,
        divider_y,
        body,
        category,
    }
}
