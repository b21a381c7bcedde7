mod common;

use taskcards::backlog::{Backlog, NoChildren};
use taskcards::cards::render::{Card, category_text, render_card, score_text, trail_text};
use taskcards::config::Settings;
use taskcards::i18n::{LabelKey, Labels, Localizer};
use taskcards::model::{LabelGeometry, LabelTemplate, TemplateSource};
use taskcards::pdf::layout::ELLIPSIS;
use taskcards::{CardDeck, FontStyle, PdfCanvas, WorkItemProvider, line_height, render_cards};

use common::{FixedChildren, Op, RecordingCanvas, letter_template, story, task};

struct German;

impl Localizer for German {
    fn label(&self, key: LabelKey) -> String {
        match key {
            LabelKey::Hours => "Stunden",
            LabelKey::Points => "Punkte",
            LabelKey::Category => "Kategorie",
            LabelKey::NotPrioritized => "nicht priorisiert",
            LabelKey::ProductBacklog => "Produkt-Backlog",
        }
        .to_string()
    }
}

#[test]
fn story_with_two_tasks_fills_three_cells_on_one_page() {
    let template = letter_template(3, 2);
    let parent = story(3, "Checkout flow");
    let provider = FixedChildren(vec![
        task(10, &parent, "Payment form"),
        task(11, &parent, "Receipt email"),
    ]);
    let labels = Labels::default();

    let mut deck = CardDeck::new(&template, RecordingCanvas::default(), &provider, &labels);
    let cells = deck.add(&parent, true);

    let positions: Vec<(u32, u32)> = cells.iter().map(|c| (c.row, c.col)).collect();
    assert_eq!(positions, vec![(1, 1), (2, 1), (1, 2)]);
    assert!(cells.iter().all(|c| c.page == 1 && !c.page_break));
    assert_eq!(deck.cards_emitted(), 3);

    let canvas = deck.into_canvas();
    assert_eq!(canvas.page_breaks(), 0);
    let outlines = canvas
        .ops
        .iter()
        .filter(|op| matches!(op, Op::StrokeRect(_)))
        .count();
    assert_eq!(outlines, 3);

    // Tasks come before their story.
    let texts = canvas.texts();
    let first_task = texts.iter().position(|t| *t == "Payment form").unwrap();
    let second_task = texts.iter().position(|t| *t == "Receipt email").unwrap();
    let story_score = texts.iter().position(|t| *t == "3 points").unwrap();
    assert!(first_task < second_task);
    assert!(second_task < story_score);
    assert_eq!(texts.iter().filter(|t| **t == "2.5 hours").count(), 2);
}

#[test]
fn without_children_only_the_story_is_drawn() {
    let template = letter_template(3, 2);
    let parent = story(3, "Checkout flow");
    let provider = FixedChildren(vec![task(10, &parent, "Payment form")]);
    let labels = Labels::default();

    let mut deck = CardDeck::new(&template, RecordingCanvas::default(), &provider, &labels);
    assert_eq!(deck.add(&parent, false).len(), 1);
    assert!(!deck.canvas().texts().contains(&"Payment form"));
}

#[test]
fn full_sheet_starts_a_new_page() {
    let template = letter_template(1, 1);
    let labels = Labels::default();
    let mut deck = CardDeck::new(&template, PdfCanvas::new(612.0, 792.0), &NoChildren, &labels);
    let first = deck.add(&story(1, "One"), true);
    let second = deck.add(&story(2, "Two"), true);

    assert!(!first[0].page_break);
    assert!(second[0].page_break);
    assert_eq!(deck.canvas().page_count(), 2);
    assert!(deck.into_canvas().finish().starts_with(b"%PDF"));
}

#[test]
fn task_card_fields() {
    let parent = story(3, "Checkout flow");
    let item = task(10, &parent, "Payment form");
    let card = Card::task(&item, &parent);
    let labels = Labels::default();

    assert_eq!(score_text(&card, &labels), "2.5 hours");
    assert_eq!(trail_text(&card, &labels), "Task #10 : Story #3 : Epic #1 (1)");

    let template = letter_template(1, 1);
    let mut canvas = RecordingCanvas::default();
    let rendered = render_card(&mut canvas, &template, 18.0, 756.0, &card, &labels);

    assert_eq!(rendered.parent.text(), "Checkout flow");
    assert_eq!(rendered.title.text(), "Payment form");
    // No description: the body repeats the subject.
    assert_eq!(rendered.body.text(), "Payment form");
    assert_eq!(rendered.trail.style, FontStyle::Italic);
}

#[test]
fn story_card_fields_and_backlog_fallbacks() {
    let labels = Labels::default();
    let mut item = story(3, "Checkout flow");
    item.position = None;
    let card = Card::story(&item);

    assert_eq!(score_text(&card, &labels), "3 points");
    assert_eq!(
        trail_text(&card, &labels),
        "Story #3 : Epic #1 (not prioritized)"
    );

    let template = letter_template(1, 1);
    let mut canvas = RecordingCanvas::default();
    let rendered = render_card(&mut canvas, &template, 18.0, 756.0, &card, &labels);
    assert_eq!(rendered.parent.text(), "Product backlog");

    item.fixed_version = Some("Sprint 4".into());
    let card = Card::story(&item);
    let rendered = render_card(&mut canvas, &template, 18.0, 756.0, &card, &labels);
    assert_eq!(rendered.parent.text(), "Sprint 4");
}

#[test]
fn missing_score_prints_a_question_mark() {
    let labels = Labels::default();
    let mut item = story(3, "Checkout flow");
    item.story_points = None;
    assert_eq!(score_text(&Card::story(&item), &labels), "? points");
}

#[test]
fn empty_category_draws_an_empty_badge() {
    let labels = Labels::default();
    let item = story(3, "Checkout flow");
    assert_eq!(category_text(&item, &labels), "");

    let template = letter_template(1, 1);
    let mut canvas = RecordingCanvas::default();
    let rendered = render_card(&mut canvas, &template, 18.0, 756.0, &Card::story(&item), &labels);
    assert!(rendered.category.is_empty());
    assert!(!rendered.category.truncated);

    let mut filed = item.clone();
    filed.category = Some("Backend".into());
    assert_eq!(category_text(&filed, &labels), "Category: Backend");
    let rendered = render_card(&mut canvas, &template, 18.0, 756.0, &Card::story(&filed), &labels);
    assert_eq!(rendered.category.text(), "Category: Backend");
    // Right-anchored.
    let right_edge = rendered.category.at.0 + rendered.category.width;
    assert!((right_edge - rendered.content.width).abs() < 1e-3);
}

#[test]
fn card_geometry_follows_the_cursor_rules() {
    let labels = Labels::default();
    let item = story(3, "Checkout flow");
    let template = letter_template(1, 1);
    let mut canvas = RecordingCanvas::default();
    let r = render_card(&mut canvas, &template, 18.0, 756.0, &Card::story(&item), &labels);

    assert_eq!(r.outline.x, 18.0);
    assert_eq!(r.outline.top(), 756.0);
    assert_eq!(r.outline.width, template.width);

    let top = r.content.height;
    // Score and trail share the first row.
    assert_eq!(r.score.at.1, top);
    assert_eq!(r.trail.at.1, top);
    assert!((r.score.at.0 + r.score.width - r.content.width).abs() < 1e-3);
    assert!((r.trail.width + r.score.width - r.content.width).abs() < 1e-3);

    let after_trail = top - line_height(6.0) - 3.0;
    assert!((r.parent.at.1 - after_trail).abs() < 1e-3);
    let after_parent = after_trail - line_height(6.0) - 3.0;
    assert!((r.title.at.1 - after_parent).abs() < 1e-3);
    assert!((r.title.height - 2.0 * line_height(12.0)).abs() < 1e-3);

    let after_title = after_parent - r.title.height - 6.0;
    assert!((r.divider_y - after_title).abs() < 1e-3);
    assert!((r.body.at.1 - (after_title - 2.0)).abs() < 1e-3);
    assert!((r.body.height - (r.body.at.1 - 8.0)).abs() < 1e-3);
    assert_eq!(r.body.font_size, 8.0);
}

#[test]
fn body_on_a_one_inch_label_is_cut_visibly() {
    // 3 x 10 address labels, 2.625in x 1in.
    let template = LabelTemplate::new(
        "Letter",
        LabelGeometry {
            top_margin: 36.0,
            left_margin: 13.5,
            vertical_pitch: 72.0,
            horizontal_pitch: 198.0,
            width: 189.0,
            height: 72.0,
            across: 3,
            down: 10,
            inner_margin: None,
        },
        TemplateSource::Ingested,
    )
    .unwrap();
    let mut item = story(3, "Checkout flow");
    item.description = Some("Card payments, vouchers and the receipt email.".into());

    let labels = Labels::default();
    let mut canvas = RecordingCanvas::default();
    let r = render_card(&mut canvas, &template, 13.5, 756.0, &Card::story(&item), &labels);

    assert!(r.body.height < line_height(8.0));
    assert_eq!(r.body.lines, vec![ELLIPSIS.to_string()]);
    assert!(r.body.truncated);
    let drawn = canvas.ops.iter().any(|op| {
        matches!(op, Op::Text { text, size, .. } if *text == ELLIPSIS.to_string() && *size == 8.0)
    });
    assert!(drawn);
}

#[test]
fn labels_come_from_the_localizer() {
    let parent = story(3, "Checkout flow");
    let item = task(10, &parent, "Payment form");
    assert_eq!(score_text(&Card::task(&item, &parent), &German), "2.5 Stunden");

    let mut unplanned = parent.clone();
    unplanned.position = None;
    let card = Card::story(&unplanned);
    assert!(trail_text(&card, &German).ends_with("(nicht priorisiert)"));

    let template = letter_template(1, 1);
    let mut canvas = RecordingCanvas::default();
    let rendered = render_card(&mut canvas, &template, 18.0, 756.0, &card, &German);
    assert_eq!(rendered.parent.text(), "Produkt-Backlog");
}

#[test]
fn labels_file_overrides_some_keys() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("de.yaml");
    std::fs::write(&path, "label_hours: Stunden\n").unwrap();
    let labels = Labels::load(&path).unwrap();
    assert_eq!(labels.label(LabelKey::Hours), "Stunden");
    assert_eq!(labels.label(LabelKey::Points), "points");
}

#[test]
fn render_cards_produces_a_pdf() {
    let _ = env_logger::try_init();
    let template = letter_template(2, 2);
    let stories = vec![story(1, "One"), story(2, "Two")];
    let bytes = render_cards(&template, &stories, &NoChildren, &Labels::default(), true);
    assert!(bytes.starts_with(b"%PDF"));
}

#[test]
fn backlog_file_supplies_stories_and_tasks() {
    let yaml = r#"
stories:
  - id: 12
    subject: Checkout flow
    story_points: 5
    position: 1
    fixed_version: Sprint 4
    ancestors: [{ tracker: Epic, id: 3 }]
    tasks:
      - id: 40
        subject: Payment form
        estimated_hours: 2.5
      - id: 41
        subject: Receipt email
  - id: 13
    subject: Wishlist
"#;
    let backlog = Backlog::from_yaml_str(yaml).unwrap();
    let stories = backlog.stories();
    assert_eq!(stories.len(), 2);
    assert_eq!(stories[0].fixed_version.as_deref(), Some("Sprint 4"));

    let tasks = backlog.children(&stories[0]);
    assert_eq!(tasks.len(), 2);
    assert_eq!(tasks[0].estimated_hours, Some(2.5));
    assert!(backlog.children(&stories[1]).is_empty());

    let labels = Labels::default();
    assert_eq!(
        trail_text(&Card::task(&tasks[0], &stories[0]), &labels),
        "Task #40 : Story #12 : Epic #3 (1)"
    );
}

#[test]
fn settings_read_taskcards_variables() {
    let settings = Settings::from_lookup(|name| match name {
        "TASKCARDS_STORE" => Some("/tmp/cards.yaml".into()),
        "TASKCARDS_CARD_SPEC" => Some("Avery 5388".into()),
        _ => None,
    });
    assert_eq!(settings.store_path, std::path::PathBuf::from("/tmp/cards.yaml"));
    assert_eq!(settings.card_spec.as_deref(), Some("Avery 5388"));
    assert_eq!(settings.template_url, Settings::default().template_url);
    assert_eq!(settings.labels_path, None);
}
