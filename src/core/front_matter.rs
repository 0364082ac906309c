//! Typed front matter record for gallery index pages
//!
//! Gallery pages share a small set of well-known keys. Those get typed fields;
//! everything else is carried in an insertion-ordered bag so a load/save cycle
//! never drops or reorders keys the tools do not understand.

use crate::config::PREFERRED_KEY_ORDER;
use crate::error::{GalleryError, Result};
use serde::{Deserialize, Deserializer, Serialize};
use serde_yaml::{Mapping, Value};
use std::path::PathBuf;

/// One entry of the `images` list.
///
/// `caption` and `copyright` keep whatever scalar the file holds, including an
/// explicit `null`; `None` means the key is absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageEntry {
    pub image_path: String,
    #[serde(
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub caption: Option<Value>,
    #[serde(
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub copyright: Option<Value>,
    /// Per-entry keys other than the three above, in file order
    #[serde(flatten)]
    pub extra: Mapping,
}

impl ImageEntry {
    /// Build the entry recorded for a newly processed image.
    ///
    /// A blank caption falls back to the filename and a blank copyright to
    /// `default_copyright`.
    pub fn for_upload(
        gallery: &str,
        filename: &str,
        caption: &str,
        copyright: &str,
        default_copyright: &str,
    ) -> Self {
        let caption = caption.trim();
        let copyright = copyright.trim();
        Self {
            image_path: crate::config::site_image_path(gallery, filename),
            caption: Some(Value::from(if caption.is_empty() {
                filename
            } else {
                caption
            })),
            copyright: Some(Value::from(if copyright.is_empty() {
                default_copyright
            } else {
                copyright
            })),
            extra: Mapping::new(),
        }
    }

    /// Caption as text; numbers and booleans are stringified
    pub fn caption(&self) -> Option<String> {
        self.caption.as_ref().and_then(scalar_text)
    }

    /// Copyright as text; numbers and booleans are stringified
    pub fn copyright(&self) -> Option<String> {
        self.copyright.as_ref().and_then(scalar_text)
    }

    /// Final segment of `image_path`
    pub fn file_name(&self) -> &str {
        self.image_path.rsplit('/').next().unwrap_or(&self.image_path)
    }
}

// Keeps `key: null` apart from a missing key.
fn present<'de, D>(deserializer: D) -> std::result::Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Front matter of a gallery page
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrontMatter {
    pub layout: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub active: Option<String>,
    pub header_img: Option<String>,
    pub album_title: Option<String>,
    pub images: Option<Vec<ImageEntry>>,
    extra: Mapping,
}

impl FrontMatter {
    /// Decode the raw text between the delimiters.
    ///
    /// An empty block yields an empty record. Anything other than a mapping
    /// is rejected.
    pub fn from_yaml_str(raw: &str) -> Result<Self> {
        let value: Value = serde_yaml::from_str(raw)?;
        Self::from_value(value)
    }

    /// Build the record from an already decoded YAML value
    pub fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Mapping(mapping) => Ok(Self::from_mapping(mapping)),
            Value::Null => Ok(Self::default()),
            other => Err(GalleryError::invalid_front_matter(
                PathBuf::new(),
                format!("expected a mapping, found {}", value_kind(&other)),
            )),
        }
    }

    /// Split a mapping into typed fields and passthrough keys.
    ///
    /// A recognized key whose value has an unexpected shape stays in the
    /// passthrough bag untouched.
    pub fn from_mapping(mapping: Mapping) -> Self {
        let mut fm = Self::default();
        for (key, value) in mapping {
            if key.as_str() == Some("images") && value.is_sequence() {
                match serde_yaml::from_value::<Vec<ImageEntry>>(value.clone()) {
                    Ok(images) => {
                        fm.images = Some(images);
                        continue;
                    }
                    Err(e) => log::debug!("keeping untyped images list: {}", e),
                }
            }
            let slot = match key.as_str() {
                Some("layout") => Some(&mut fm.layout),
                Some("title") => Some(&mut fm.title),
                Some("description") => Some(&mut fm.description),
                Some("active") => Some(&mut fm.active),
                Some("header-img") => Some(&mut fm.header_img),
                Some("album-title") => Some(&mut fm.album_title),
                _ => None,
            };
            match (slot, value) {
                (Some(slot), Value::String(s)) => *slot = Some(s),
                (_, value) => {
                    fm.extra.insert(key, value);
                }
            }
        }
        fm
    }

    /// Rebuild the mapping with the preferred keys first, then passthrough
    /// keys in the order they were read.
    pub fn to_mapping(&self) -> Result<Mapping> {
        let mut out = Mapping::new();
        for key in PREFERRED_KEY_ORDER {
            if let Some(value) = self.typed_value(key)? {
                out.insert(Value::from(*key), value);
            } else if let Some(value) = self.extra.get(*key) {
                out.insert(Value::from(*key), value.clone());
            }
        }
        for (key, value) in &self.extra {
            if !out.contains_key(key) {
                out.insert(key.clone(), value.clone());
            }
        }
        Ok(out)
    }

    /// Serialize to the text placed between the delimiters
    pub fn to_yaml_string(&self) -> Result<String> {
        let mapping = self.to_mapping()?;
        if mapping.is_empty() {
            return Ok(String::new());
        }
        Ok(serde_yaml::to_string(&Value::Mapping(mapping))?)
    }

    /// All keys, in the order they are written
    pub fn keys(&self) -> Vec<String> {
        self.to_mapping()
            .map(|m| {
                m.keys()
                    .map(|k| match k.as_str() {
                        Some(s) => s.to_string(),
                        None => serde_yaml::to_string(k)
                            .map(|s| s.trim_end().to_string())
                            .unwrap_or_default(),
                    })
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Look up a passthrough key
    pub fn extra(&self, key: &str) -> Option<&Value> {
        self.extra.get(key)
    }

    /// Set a passthrough key, keeping its position if it already exists
    pub fn set_extra(&mut self, key: impl Into<String>, value: Value) {
        self.extra.insert(Value::String(key.into()), value);
    }

    /// The `images` list, created empty when absent or blank.
    ///
    /// Fails when `images` holds something that is not a list of entries.
    pub fn images_mut(&mut self) -> Result<&mut Vec<ImageEntry>> {
        if self.images.is_none() {
            let problem = match self.extra.get("images") {
                None | Some(Value::Null) => None,
                Some(other) => Some(untyped_images_reason(other)),
            };
            if let Some(reason) = problem {
                return Err(GalleryError::invalid_front_matter(PathBuf::new(), reason));
            }
            self.remove_extra("images");
        }
        Ok(self.images.get_or_insert_with(Vec::new))
    }

    /// The raw `images` list when its entries could not be read as [`ImageEntry`]
    pub fn untyped_images_mut(&mut self) -> Option<&mut Vec<Value>> {
        if self.images.is_some() {
            return None;
        }
        self.extra
            .get_mut("images")
            .and_then(Value::as_sequence_mut)
    }

    /// Whether an `images` key exists but could not be read as entries
    pub fn has_untyped_images(&self) -> bool {
        self.images.is_none()
            && self
                .extra
                .get("images")
                .map(|v| !v.is_null())
                .unwrap_or(false)
    }

    fn remove_extra(&mut self, key: &str) {
        self.extra = std::mem::take(&mut self.extra)
            .into_iter()
            .filter(|(k, _)| k.as_str() != Some(key))
            .collect();
    }

    fn typed_value(&self, key: &str) -> Result<Option<Value>> {
        let text = match key {
            "layout" => &self.layout,
            "title" => &self.title,
            "description" => &self.description,
            "active" => &self.active,
            "header-img" => &self.header_img,
            "album-title" => &self.album_title,
            "images" => {
                return match &self.images {
                    Some(images) => Ok(Some(serde_yaml::to_value(images)?)),
                    None => Ok(None),
                };
            }
            _ => return Ok(None),
        };
        Ok(text.clone().map(Value::String))
    }
}

fn untyped_images_reason(value: &Value) -> String {
    match value {
        Value::Sequence(_) => match serde_yaml::from_value::<Vec<ImageEntry>>(value.clone()) {
            Err(e) => format!("`images` has an entry that cannot be read: {}", e),
            Ok(_) => "`images` could not be read".to_string(),
        },
        other => format!(
            "`images` must be a list of entries, found {}",
            value_kind(other)
        ),
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a list",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    }
}
