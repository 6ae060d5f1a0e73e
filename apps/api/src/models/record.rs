//! Canonical Record: the normalized, partially-typed shape of an extracted resume.
//!
//! Known keys are read into typed views when the AI returned them in the expected shape,
//! but every slot also keeps the JSON exactly as received, and that is what serializes.
//! A wrong-shaped known key stays in a `Raw` slot, and unknown top-level keys are kept
//! in `extra` in original order.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

const EDUCATION_KEYS: &[&str] = &["degree", "branch", "institution", "year"];
const EXPERIENCE_KEYS: &[&str] = &["job_title", "company"];

/// A known field as read from AI output.
#[derive(Debug, Clone, PartialEq)]
pub enum Slot<T> {
    /// Shape-compatible: the typed view plus the value it was read from.
    Typed { value: T, raw: Value },
    Raw(Value),
}

impl<T> Slot<T> {
    pub fn typed(&self) -> Option<&T> {
        match self {
            Slot::Typed { value, .. } => Some(value),
            Slot::Raw(_) => None,
        }
    }

    /// The JSON as the AI sent it, nulls and key order included.
    pub fn raw(&self) -> &Value {
        match self {
            Slot::Typed { raw, .. } | Slot::Raw(raw) => raw,
        }
    }
}

impl<T: DeserializeOwned> Slot<T> {
    pub fn from_value(raw: Value) -> Self {
        match T::deserialize(&raw) {
            Ok(value) => Slot::Typed { value, raw },
            Err(_) => Slot::Raw(raw),
        }
    }

    /// Keeps only `keys` in an object, or in each object of a list; re-reads the result.
    fn retain_keys(&self, keys: &[&str]) -> Self {
        let mut raw = self.raw().clone();
        match &mut raw {
            Value::Object(map) => map.retain(|k, _| keys.contains(&k.as_str())),
            Value::Array(items) => {
                for item in items {
                    if let Value::Object(map) = item {
                        map.retain(|k, _| keys.contains(&k.as_str()));
                    }
                }
            }
            _ => {}
        }
        Slot::from_value(raw)
    }
}

impl<'de, T: DeserializeOwned> Deserialize<'de> for Slot<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Value::deserialize(deserializer).map(Slot::from_value)
    }
}

impl<T> Serialize for Slot<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.raw().serialize(serializer)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Education {
    #[serde(default)]
    pub degree: Option<String>,
    #[serde(default)]
    pub branch: Option<String>,
    #[serde(default)]
    pub institution: Option<String>,
    /// Opaque: the AI returns this as a string or a number depending on the resume.
    #[serde(default)]
    pub year: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ExperienceEntry {
    #[serde(default)]
    pub job_title: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub start_date: Option<Value>,
    #[serde(default)]
    pub end_date: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Experience is singular or plural depending on what the AI felt like returning.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Experience {
    Many(Vec<ExperienceEntry>),
    One(ExperienceEntry),
}

impl Experience {
    /// Entries in list form; a lone entry is a one-element list.
    pub fn entries(&self) -> &[ExperienceEntry] {
        match self {
            Experience::Many(entries) => entries,
            Experience::One(entry) => std::slice::from_ref(entry),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CanonicalRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<Slot<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<Slot<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub education: Option<Slot<Education>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub experience: Option<Slot<Experience>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skills: Option<Slot<Vec<String>>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<Slot<String>>,
    /// Keys outside the known set, in the order the AI emitted them.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl CanonicalRecord {
    /// The record as an ordered JSON object: known keys first, then extras.
    pub fn to_object(&self) -> Map<String, Value> {
        match serde_json::to_value(self) {
            Ok(Value::Object(map)) => map,
            // Every field serializes to plain JSON; a struct always yields an object.
            _ => Map::new(),
        }
    }

    /// The subset of the record that survives persistence.
    ///
    /// Only `name, email, education{degree,branch,institution,year},
    /// experience{job_title,company}, skills, summary` are stored. Extra fields and
    /// experience dates are dropped. The key filter applies to what the AI sent, so a
    /// wrong-shaped `education` or `experience` object (or list of objects) is trimmed
    /// the same way as a typed one. Non-object values pass through untouched.
    pub fn persisted(&self) -> CanonicalRecord {
        CanonicalRecord {
            name: self.name.clone(),
            email: self.email.clone(),
            education: self.education.as_ref().map(|s| s.retain_keys(EDUCATION_KEYS)),
            experience: self.experience.as_ref().map(|s| s.retain_keys(EXPERIENCE_KEYS)),
            skills: self.skills.clone(),
            summary: self.summary.clone(),
            extra: Map::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: Value) -> CanonicalRecord {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_known_fields_land_in_typed_slots() {
        let r = record(json!({
            "name": "Jane Doe",
            "skills": ["Go", "Rust"],
            "education": {"degree": "BSc", "year": 2020}
        }));
        assert_eq!(r.name.as_ref().and_then(Slot::typed).map(String::as_str), Some("Jane Doe"));
        assert_eq!(
            r.skills.as_ref().and_then(Slot::typed),
            Some(&vec!["Go".to_string(), "Rust".to_string()])
        );
        let edu = r.education.as_ref().and_then(Slot::typed).unwrap();
        assert_eq!(edu.degree.as_deref(), Some("BSc"));
        assert_eq!(edu.year, Some(json!(2020)));
    }

    #[test]
    fn test_wrong_shaped_known_field_is_kept_raw() {
        let r = record(json!({"skills": "Go, Rust", "name": 42}));
        assert_eq!(r.skills, Some(Slot::Raw(json!("Go, Rust"))));
        assert_eq!(r.name, Some(Slot::Raw(json!(42))));
    }

    #[test]
    fn test_null_known_field_is_absent() {
        let r = record(json!({"summary": null}));
        assert!(r.summary.is_none());
        assert!(r.extra.is_empty());
    }

    #[test]
    fn test_extra_fields_keep_original_order() {
        let r = record(json!({
            "zeta": 1,
            "name": "A",
            "alpha": [1, 2],
            "middle": {"k": "v"}
        }));
        let keys: Vec<_> = r.extra.keys().cloned().collect();
        assert_eq!(keys, vec!["zeta", "alpha", "middle"]);
    }

    #[test]
    fn test_experience_single_and_list() {
        let one = record(json!({"experience": {"job_title": "Engineer", "company": "Acme"}}));
        let exp = one.experience.as_ref().and_then(Slot::typed).unwrap();
        assert!(matches!(exp, Experience::One(_)));
        assert_eq!(exp.entries().len(), 1);

        let many = record(json!({"experience": [{"company": "A"}, {"company": "B"}]}));
        let exp = many.experience.as_ref().and_then(Slot::typed).unwrap();
        let companies: Vec<_> = exp
            .entries()
            .iter()
            .map(|e| e.company.clone().unwrap())
            .collect();
        assert_eq!(companies, vec!["A", "B"]);
    }

    #[test]
    fn test_persisted_drops_extras_and_dates() {
        let r = record(json!({
            "name": "Jane",
            "certifications": ["AWS"],
            "education": {"degree": "BSc", "gpa": 3.9},
            "experience": {
                "job_title": "Engineer",
                "company": "Acme",
                "start_date": "2020",
                "end_date": "2022"
            }
        }));
        let stored = r.persisted();
        assert!(stored.extra.is_empty());
        let edu = stored.education.as_ref().and_then(Slot::typed).unwrap();
        assert!(edu.extra.is_empty());
        let exp = stored.experience.as_ref().and_then(Slot::typed).unwrap();
        assert_eq!(exp.entries()[0].start_date, None);
        assert_eq!(
            serde_json::to_value(&stored).unwrap(),
            json!({
                "name": "Jane",
                "education": {"degree": "BSc"},
                "experience": {"job_title": "Engineer", "company": "Acme"}
            })
        );
    }

    #[test]
    fn test_persisted_keeps_raw_slots() {
        let r = record(json!({"education": "BSc CS, 2020"}));
        assert_eq!(r.persisted().education, Some(Slot::Raw(json!("BSc CS, 2020"))));
    }

    #[test]
    fn test_persisted_trims_raw_object_lists_too() {
        // A numeric company keeps the list out of the typed view.
        let r = record(json!({
            "experience": [
                {"company": 5, "job_title": "Engineer", "start_date": "2020", "team": "core"},
                "freelance"
            ]
        }));
        assert!(matches!(r.experience, Some(Slot::Raw(_))));
        assert_eq!(
            serde_json::to_value(r.persisted()).unwrap(),
            json!({"experience": [{"company": 5, "job_title": "Engineer"}, "freelance"]})
        );
    }

    #[test]
    fn test_typed_slot_serializes_as_received() {
        let r = record(json!({
            "experience": {"company": "Acme", "job_title": "Engineer", "start_date": null}
        }));
        assert!(r.experience.as_ref().and_then(Slot::typed).is_some());
        let keys: Vec<_> = r.to_object()["experience"]
            .as_object()
            .unwrap()
            .keys()
            .cloned()
            .collect();
        assert_eq!(keys, vec!["company", "job_title", "start_date"]);
        assert_eq!(r.to_object()["experience"]["start_date"], Value::Null);
    }

    #[test]
    fn test_to_object_puts_known_keys_first() {
        let r = record(json!({"hobbies": ["chess"], "email": "j@x.com", "name": "J"}));
        let keys: Vec<_> = r.to_object().keys().cloned().collect();
        assert_eq!(keys, vec!["name", "email", "hobbies"]);
    }
}
