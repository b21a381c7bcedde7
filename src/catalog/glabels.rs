//! glabels template catalog documents.
//!
//! ```xml
//! <Glabels-templates>
//!   <Template brand="Acme" part="001" size="A4">
//!     <Label-rectangle width="70mm" height="37mm">
//!       <Markup-margin size="1.5mm"/>
//!       <Layout nx="3" ny="8" x0="0mm" y0="0mm" dx="70mm" dy="37mm"/>
//!     </Label-rectangle>
//!     <Alias brand="Acme" part="001-alt"/>
//!   </Template>
//! </Glabels-templates>
//! ```
//!
//! Element names are matched without namespace so glabels 2 and 3 files
//! parse alike.

use roxmltree::Node;

use crate::catalog::{MergeStats, TemplateCatalog};
use crate::error::Error;
use crate::model::{LabelGeometry, LabelTemplate, TemplateSource};
use crate::units::parse_length;

const ROOT: &str = "Glabels-templates";
const DEFAULT_MARKUP_MARGIN: &str = "1mm";

#[derive(Clone, Debug, PartialEq)]
pub struct ParsedTemplate {
    pub key: String,
    pub aliases: Vec<String>,
    pub template: LabelTemplate,
}

/// glabels names US letter paper `US-Letter`.
pub fn normalize_paper_size(name: &str) -> &str {
    if name == "US-Letter" { "Letter" } else { name }
}

fn children_named<'a>(node: Node<'a, 'a>, name: &'a str) -> impl Iterator<Item = Node<'a, 'a>> {
    node.children()
        .filter(move |n| n.is_element() && n.tag_name().name() == name)
}

fn required_attr<'a>(
    node: Node<'a, 'a>,
    attr: &str,
    source_name: &str,
    context: &str,
) -> Result<&'a str, Error> {
    node.attribute(attr).ok_or_else(|| {
        Error::malformed(
            source_name,
            format!("{context}: <{}> missing '{attr}'", node.tag_name().name()),
        )
    })
}

fn length_attr(node: Node, attr: &str, source_name: &str, context: &str) -> Result<f32, Error> {
    let raw = required_attr(node, attr, source_name, context)?;
    parse_length(raw).map_err(|_| {
        Error::malformed(
            source_name,
            format!("{context}: {attr}='{raw}' is not a length"),
        )
    })
}

fn count_attr(node: Node, attr: &str, source_name: &str, context: &str) -> Result<u32, Error> {
    let raw = required_attr(node, attr, source_name, context)?;
    raw.trim().parse::<u32>().map_err(|_| {
        Error::malformed(
            source_name,
            format!("{context}: {attr}='{raw}' is not an integer"),
        )
    })
}

fn brand_part_key(node: Node, source_name: &str, context: &str) -> Result<String, Error> {
    let brand = required_attr(node, "brand", source_name, context)?;
    let part = required_attr(node, "part", source_name, context)?;
    Ok(format!("{brand} {part}"))
}

/// Read one `<Template>`. Returns `None` for templates that yield no label:
/// no layout, or a sheet size that is not a known physical paper size.
pub fn parse_template(node: Node, source_name: &str) -> Result<Option<ParsedTemplate>, Error> {
    let key = brand_part_key(node, source_name, "Template")?;
    let paper_size = normalize_paper_size(required_attr(node, "size", source_name, &key)?);

    let mut geometry = None;
    for rect in children_named(node, "Label-rectangle") {
        let margin = children_named(rect, "Markup-margin")
            .filter_map(|m| m.attribute("size"))
            .last()
            .unwrap_or(DEFAULT_MARKUP_MARGIN);
        let inner_margin = parse_length(margin).map_err(|_| {
            Error::malformed(source_name, format!("{key}: markup margin '{margin}' is not a length"))
        })?;
        let width = length_attr(rect, "width", source_name, &key)?;
        let height = length_attr(rect, "height", source_name, &key)?;

        // Later layouts replace earlier ones.
        for layout in children_named(rect, "Layout") {
            geometry = Some(LabelGeometry {
                across: count_attr(layout, "nx", source_name, &key)?,
                down: count_attr(layout, "ny", source_name, &key)?,
                left_margin: length_attr(layout, "x0", source_name, &key)?,
                top_margin: length_attr(layout, "y0", source_name, &key)?,
                horizontal_pitch: length_attr(layout, "dx", source_name, &key)?,
                vertical_pitch: length_attr(layout, "dy", source_name, &key)?,
                width,
                height,
                inner_margin: Some(inner_margin),
            });
        }
    }

    let Some(geometry) = geometry else {
        log::debug!("{source_name}: '{key}' has no rectangular layout, skipping");
        return Ok(None);
    };

    let template = match LabelTemplate::new(paper_size, geometry, TemplateSource::Ingested) {
        Ok(t) => t,
        Err(Error::UnsupportedPaperSize(size)) => {
            log::debug!("{source_name}: '{key}' uses paper size '{size}', skipping");
            return Ok(None);
        }
        Err(e) => return Err(Error::malformed(source_name, format!("{key}: {e}"))),
    };

    let aliases = children_named(node, "Alias")
        .map(|a| brand_part_key(a, source_name, &key))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Some(ParsedTemplate {
        key,
        aliases,
        template,
    }))
}

fn parse_document<'a>(text: &'a str, source_name: &str) -> Result<roxmltree::Document<'a>, Error> {
    let opts = roxmltree::ParsingOptions {
        allow_dtd: true,
        ..roxmltree::ParsingOptions::default()
    };
    let doc = roxmltree::Document::parse_with_options(text, opts)
        .map_err(|e| Error::malformed(source_name, e.to_string()))?;
    let root = doc.root_element().tag_name().name();
    if root != ROOT {
        return Err(Error::malformed(
            source_name,
            format!("root element is <{root}>, expected <{ROOT}>"),
        ));
    }
    Ok(doc)
}

/// Parse every template of a document without touching a catalog.
pub fn parse_templates(text: &str, source_name: &str) -> Result<Vec<ParsedTemplate>, Error> {
    let doc = parse_document(text, source_name)?;
    let mut templates = Vec::new();
    for node in children_named(doc.root_element(), "Template") {
        if let Some(parsed) = parse_template(node, source_name)? {
            templates.push(parsed);
        }
    }
    Ok(templates)
}

/// Parse a document and merge each template, then each of its aliases, as it
/// is read. A malformed template stops the document; entries merged before it
/// stay in the catalog.
pub fn ingest_document(
    catalog: &mut TemplateCatalog,
    source_name: &str,
    bytes: &[u8],
) -> Result<MergeStats, Error> {
    let text = std::str::from_utf8(bytes)
        .map_err(|e| Error::malformed(source_name, format!("not UTF-8: {e}")))?;
    let doc = parse_document(text, source_name)?;

    let mut stats = MergeStats::default();
    for node in children_named(doc.root_element(), "Template") {
        let Some(parsed) = parse_template(node, source_name)? else {
            continue;
        };
        stats.record(catalog.merge_entry(&parsed.key, parsed.template.clone()));
        for alias in &parsed.aliases {
            stats.record(catalog.merge_entry(alias, parsed.template.clone()));
        }
    }
    Ok(stats)
}
