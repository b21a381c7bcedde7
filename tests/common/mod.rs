#![allow(dead_code)]

use taskcards::model::{AncestryHop, LabelGeometry, LabelTemplate, Rect, TemplateSource, WorkItem};
use taskcards::{Canvas, FontStyle, WorkItemProvider};

#[derive(Clone, Debug, PartialEq)]
pub enum Op {
    NewPage,
    StrokeRect(Rect),
    Line((f32, f32), (f32, f32)),
    Text {
        text: String,
        x: f32,
        baseline: f32,
        style: FontStyle,
        size: f32,
    },
}

/// Canvas that records every drawing call.
#[derive(Default)]
pub struct RecordingCanvas {
    pub ops: Vec<Op>,
}

impl RecordingCanvas {
    pub fn page_breaks(&self) -> usize {
        self.ops.iter().filter(|op| **op == Op::NewPage).count()
    }

    pub fn texts(&self) -> Vec<&str> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                Op::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl Canvas for RecordingCanvas {
    fn start_new_page(&mut self) {
        self.ops.push(Op::NewPage);
    }

    fn stroke_rect(&mut self, rect: Rect, _line_width: f32) {
        self.ops.push(Op::StrokeRect(rect));
    }

    fn line(&mut self, from: (f32, f32), to: (f32, f32), _line_width: f32) {
        self.ops.push(Op::Line(from, to));
    }

    fn show_text(&mut self, text: &str, x: f32, baseline: f32, style: FontStyle, size: f32) {
        self.ops.push(Op::Text {
            text: text.to_string(),
            x,
            baseline,
            style,
            size,
        });
    }
}

pub fn geometry(across: u32, down: u32) -> LabelGeometry {
    LabelGeometry {
        top_margin: 36.0,
        left_margin: 18.0,
        vertical_pitch: 144.0,
        horizontal_pitch: 200.0,
        width: 190.0,
        height: 140.0,
        across,
        down,
        inner_margin: None,
    }
}

pub fn letter_template(across: u32, down: u32) -> LabelTemplate {
    LabelTemplate::new("Letter", geometry(across, down), TemplateSource::Ingested)
        .expect("valid template")
}

pub fn user_template(across: u32, down: u32) -> LabelTemplate {
    LabelTemplate::new("A4", geometry(across, down), TemplateSource::UserDefined)
        .expect("valid template")
}

pub fn story(id: u32, subject: &str) -> WorkItem {
    WorkItem {
        id,
        subject: subject.to_string(),
        story_points: Some(3.0),
        position: Some(1),
        ancestry: vec![
            AncestryHop {
                tracker: "Epic".into(),
                id: 1,
            },
            AncestryHop {
                tracker: "Story".into(),
                id,
            },
        ],
        ..WorkItem::default()
    }
}

pub fn task(id: u32, parent: &WorkItem, subject: &str) -> WorkItem {
    let mut ancestry = parent.ancestry.clone();
    ancestry.push(AncestryHop {
        tracker: "Task".into(),
        id,
    });
    WorkItem {
        id,
        subject: subject.to_string(),
        estimated_hours: Some(2.5),
        ancestry,
        ..WorkItem::default()
    }
}

/// Provider backed by a fixed child list, whatever the parent.
pub struct FixedChildren(pub Vec<WorkItem>);

impl WorkItemProvider for FixedChildren {
    fn children(&self, _parent: &WorkItem) -> Vec<WorkItem> {
        self.0.clone()
    }
}

pub const ACME_XML: &str = r#"<?xml version="1.0"?>
<!DOCTYPE Glabels-templates SYSTEM "glabels-3.0.dtd">
<Glabels-templates xmlns="http://glabels.org/xmlns/3.0/">
  <Template brand="Acme" part="001" size="US-Letter" _description="Index cards">
    <Meta category="card"/>
    <Label-rectangle id="0" width="3in" height="5in" round="0pt">
      <Markup-margin size="2mm"/>
      <Layout nx="2" ny="2" x0="0.5in" y0="0.5in" dx="4in" dy="5.25in"/>
    </Label-rectangle>
    <Alias brand="Acme" part="001-alt"/>
  </Template>
  <Template brand="Acme" part="002" size="A4">
    <Label-rectangle id="0" width="70mm" height="37mm">
      <Layout nx="3" ny="8" x0="0mm" y0="0mm" dx="70mm" dy="37mm"/>
    </Label-rectangle>
  </Template>
</Glabels-templates>
"#;

