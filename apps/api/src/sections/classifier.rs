//! Known sections first, in a fixed priority order, then every other top-level key in
//! the order the record lists it.
//!
//! Known sections carry a static kind. When the value actually has a different shape
//! the kind follows the shape instead, so a descriptor never lies about its payload.
//! The one reshaping rule is wrap-single-as-list: a lone object under `experience` or
//! `projects` becomes a one-element list.

use serde_json::{Map, Value};
use tracing::debug;

use crate::models::record::CanonicalRecord;
use crate::sections::contact::contact_block;
use crate::sections::descriptor::{SectionBody, SectionDescriptor, SectionKind};
use crate::sections::labels::humanize_key;
use crate::sections::presence::is_present;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KnownSection {
    Identity,
    Summary,
    Skills,
    Experience,
    Projects,
    Education,
    Achievements,
    Contact,
}

impl KnownSection {
    /// Render order.
    pub const PRIORITY: [KnownSection; 8] = [
        KnownSection::Identity,
        KnownSection::Summary,
        KnownSection::Skills,
        KnownSection::Experience,
        KnownSection::Projects,
        KnownSection::Education,
        KnownSection::Achievements,
        KnownSection::Contact,
    ];

    /// The section that owns a top-level key, if any.
    pub fn for_key(key: &str) -> Option<KnownSection> {
        match key {
            "name" | "title" => Some(KnownSection::Identity),
            "summary" => Some(KnownSection::Summary),
            "skills" => Some(KnownSection::Skills),
            "experience" => Some(KnownSection::Experience),
            "projects" => Some(KnownSection::Projects),
            "education" => Some(KnownSection::Education),
            "achievements" => Some(KnownSection::Achievements),
            "contact" => Some(KnownSection::Contact),
            _ => None,
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            KnownSection::Identity => "name",
            KnownSection::Summary => "summary",
            KnownSection::Skills => "skills",
            KnownSection::Experience => "experience",
            KnownSection::Projects => "projects",
            KnownSection::Education => "education",
            KnownSection::Achievements => "achievements",
            KnownSection::Contact => "contact",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            KnownSection::Identity => "Name",
            KnownSection::Summary => "About Me",
            KnownSection::Skills => "Skills",
            KnownSection::Experience => "Experience",
            KnownSection::Projects => "Projects",
            KnownSection::Education => "Education",
            KnownSection::Achievements => "Achievements",
            KnownSection::Contact => "Contact",
        }
    }

    pub fn kind(self) -> SectionKind {
        match self {
            KnownSection::Identity | KnownSection::Summary => SectionKind::Scalar,
            KnownSection::Skills | KnownSection::Achievements => SectionKind::ListOfScalars,
            KnownSection::Experience | KnownSection::Projects => SectionKind::ListOfObjects,
            KnownSection::Education => SectionKind::Object,
            KnownSection::Contact => SectionKind::ContactBlock,
        }
    }
}

pub fn classify(record: &CanonicalRecord) -> Vec<SectionDescriptor> {
    classify_object(&record.to_object())
}

/// Classifies any JSON object, known keys or not.
pub fn classify_object(record: &Map<String, Value>) -> Vec<SectionDescriptor> {
    let mut sections: Vec<SectionDescriptor> = KnownSection::PRIORITY
        .iter()
        .filter_map(|&section| known_descriptor(section, record))
        .collect();

    for (key, value) in record {
        if KnownSection::for_key(key).is_some() || !is_present(value) {
            continue;
        }
        match SectionBody::from_shape(value) {
            Some(body) => sections.push(SectionDescriptor::new(key, humanize_key(key), body)),
            None => debug!("Skipping '{key}': no render kind for this value"),
        }
    }

    sections
}

fn present<'a>(record: &'a Map<String, Value>, key: &str) -> Option<&'a Value> {
    record.get(key).filter(|v| is_present(v))
}

fn known_descriptor(section: KnownSection, record: &Map<String, Value>) -> Option<SectionDescriptor> {
    match section {
        KnownSection::Identity => identity_descriptor(record),
        KnownSection::Contact => contact_descriptor(record),
        _ => {
            let value = present(record, section.key())?;
            let body = body_for(section.kind(), value)?;
            Some(SectionDescriptor::new(section.key(), section.label(), body))
        }
    }
}

fn body_for(kind: SectionKind, value: &Value) -> Option<SectionBody> {
    match (kind, value) {
        (SectionKind::ListOfObjects, Value::Object(_)) => {
            Some(SectionBody::ListOfObjects(vec![value.clone()]))
        }
        _ => SectionBody::from_shape(value),
    }
}

/// `name` heads the identity section with `title` as its subtitle. A record with only
/// a title still gets an identity section, keyed by `title`.
fn identity_descriptor(record: &Map<String, Value>) -> Option<SectionDescriptor> {
    let label = KnownSection::Identity.label();
    let name = present(record, "name").and_then(SectionBody::from_shape);
    let title = present(record, "title");

    match (name, title) {
        (Some(body), title) => {
            let mut descriptor = SectionDescriptor::new("name", label, body);
            descriptor.subtitle = title.and_then(|t| {
                let text = scalar_text(t);
                if text.is_none() {
                    debug!("Skipping 'title' subtitle: not a string or number");
                }
                text
            });
            Some(descriptor)
        }
        (None, Some(title)) => {
            SectionBody::from_shape(title).map(|body| SectionDescriptor::new("title", label, body))
        }
        (None, None) => None,
    }
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn contact_descriptor(record: &Map<String, Value>) -> Option<SectionDescriptor> {
    let section = KnownSection::Contact;
    let value = present(record, section.key())?;
    let body = match value {
        Value::Object(entries) => {
            let block = contact_block(entries);
            if block.is_empty() {
                return None;
            }
            SectionBody::ContactBlock(block)
        }
        other => SectionBody::from_shape(other)?,
    };
    Some(SectionDescriptor::new(section.key(), section.label(), body))
}
