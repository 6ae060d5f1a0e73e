//! Contact block lookup table.
//!
//! Keys are matched case-insensitively against a closed set of channels. Anything else
//! falls into `Other`, which has its own icon and color. Adding a channel means adding a
//! variant, and every `match` below stops compiling until it is handled.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::sections::presence::is_present;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactChannel {
    Email,
    Phone,
    Linkedin,
    Github,
    Location,
    Website,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ContactIcon {
    Mail,
    Phone,
    Linkedin,
    Github,
    MapPin,
    ExternalLink,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ContactColor {
    #[serde(rename = "text-primary")]
    Primary,
    #[serde(rename = "text-success")]
    Success,
    #[serde(rename = "text-info")]
    Info,
    #[serde(rename = "text-dark")]
    Dark,
    #[serde(rename = "text-danger")]
    Danger,
    #[serde(rename = "text-warning")]
    Warning,
    #[serde(rename = "text-secondary")]
    Secondary,
}

impl ContactChannel {
    pub fn from_key(key: &str) -> Self {
        match key.to_ascii_lowercase().as_str() {
            "email" => ContactChannel::Email,
            "phone" => ContactChannel::Phone,
            "linkedin" => ContactChannel::Linkedin,
            "github" => ContactChannel::Github,
            "location" => ContactChannel::Location,
            "website" => ContactChannel::Website,
            _ => ContactChannel::Other,
        }
    }

    pub fn icon(self) -> ContactIcon {
        match self {
            ContactChannel::Email => ContactIcon::Mail,
            ContactChannel::Phone => ContactIcon::Phone,
            ContactChannel::Linkedin => ContactIcon::Linkedin,
            ContactChannel::Github => ContactIcon::Github,
            ContactChannel::Location => ContactIcon::MapPin,
            ContactChannel::Website | ContactChannel::Other => ContactIcon::ExternalLink,
        }
    }

    pub fn color(self) -> ContactColor {
        match self {
            ContactChannel::Email => ContactColor::Primary,
            ContactChannel::Phone => ContactColor::Success,
            ContactChannel::Linkedin => ContactColor::Info,
            ContactChannel::Github => ContactColor::Dark,
            ContactChannel::Location => ContactColor::Danger,
            ContactChannel::Website => ContactColor::Warning,
            ContactChannel::Other => ContactColor::Secondary,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContactEntry {
    pub key: String,
    pub value: Value,
    pub icon: ContactIcon,
    pub color: ContactColor,
}

/// Tags every present entry of a `contact` object, keeping the object's key order.
pub fn contact_block(contact: &Map<String, Value>) -> Vec<ContactEntry> {
    contact
        .iter()
        .filter(|(_, value)| is_present(value))
        .map(|(key, value)| {
            let channel = ContactChannel::from_key(key);
            ContactEntry {
                key: key.clone(),
                value: value.clone(),
                icon: channel.icon(),
                color: channel.color(),
            }
        })
        .collect()
}
