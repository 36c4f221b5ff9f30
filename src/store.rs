//! File-backed template persistence and the template catalog.

use chrono::{DateTime, Utc};
use folio_traits::{StoreError, TemplateStore};
use folio_types::{MergeField, MergeFieldId, Template, TemplateId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Setting under which the letterhead reference (a path or data URL) is kept.
pub const LETTERHEAD_SETTING: &str = "letterhead_url";

#[derive(Debug, Clone, Serialize, Deserialize)]
struct TemplateRecord {
    id: String,
    name: String,
    title: String,
    body: String,
    signature_left: String,
    signature_right: String,
    #[serde(default)]
    allowed_merge_field_ids: Vec<String>,
}

impl From<&Template> for TemplateRecord {
    fn from(t: &Template) -> Self {
        Self {
            id: t.id.as_str().to_string(),
            name: t.name.clone(),
            title: t.title.clone(),
            body: t.body.clone(),
            signature_left: t.signature_left.clone(),
            signature_right: t.signature_right.clone(),
            allowed_merge_field_ids: t
                .allowed_merge_field_ids
                .iter()
                .flatten()
                .map(|id| id.as_str().to_string())
                .collect(),
        }
    }
}

impl From<TemplateRecord> for Template {
    fn from(r: TemplateRecord) -> Self {
        let allowed: Vec<MergeFieldId> = r
            .allowed_merge_field_ids
            .into_iter()
            .map(MergeFieldId::from)
            .collect();
        Template {
            id: TemplateId::from(r.id),
            name: r.name,
            title: r.title,
            body: r.body,
            signature_left: r.signature_left,
            signature_right: r.signature_right,
            allowed_merge_field_ids: (!allowed.is_empty()).then_some(allowed),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct MergeFieldRecord {
    id: String,
    label: String,
    key: String,
}

impl From<&MergeField> for MergeFieldRecord {
    fn from(f: &MergeField) -> Self {
        Self {
            id: f.id.as_str().to_string(),
            label: f.label.clone(),
            key: f.key.clone(),
        }
    }
}

impl From<MergeFieldRecord> for MergeField {
    fn from(r: MergeFieldRecord) -> Self {
        MergeField {
            id: MergeFieldId::from(r.id),
            label: r.label,
            key: r.key,
        }
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct StoreDocument {
    #[serde(default)]
    templates: Vec<TemplateRecord>,
    #[serde(default)]
    merge_fields: Vec<MergeFieldRecord>,
    #[serde(default)]
    settings: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    updated_at: Option<DateTime<Utc>>,
}

/// Keeps templates, merge fields and settings in one JSON file.
///
/// Every call reads the file, and every change rewrites it through a
/// temporary sibling that is renamed into place. A missing file is an empty
/// store.
#[derive(Debug)]
pub struct JsonFileTemplateStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl JsonFileTemplateStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<StoreDocument, StoreError> {
        match fs::read_to_string(&self.path) {
            Ok(json) => serde_json::from_str(&json).map_err(|e| {
                StoreError::Corrupt(format!("{}: {}", self.path.display(), e))
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(StoreDocument::default()),
            Err(e) => Err(e.into()),
        }
    }

    fn persist(&self, document: &StoreDocument) -> Result<(), StoreError> {
        let json = serde_json::to_vec_pretty(document)
            .map_err(|e| StoreError::Backend(e.to_string()))?;
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        fs::create_dir_all(dir)?;
        let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
        tmp.write_all(&json)?;
        tmp.persist(&self.path).map_err(|e| StoreError::Io(e.error.to_string()))?;
        Ok(())
    }

    fn read<R>(&self, f: impl FnOnce(&StoreDocument) -> R) -> Result<R, StoreError> {
        let _guard = self
            .lock
            .lock()
            .map_err(|_| StoreError::Backend("template store lock poisoned".to_string()))?;
        Ok(f(&self.load()?))
    }

    fn update<R>(
        &self,
        f: impl FnOnce(&mut StoreDocument) -> Result<R, StoreError>,
    ) -> Result<R, StoreError> {
        let _guard = self
            .lock
            .lock()
            .map_err(|_| StoreError::Backend("template store lock poisoned".to_string()))?;
        let mut document = self.load()?;
        let result = f(&mut document)?;
        document.updated_at = Some(Utc::now());
        self.persist(&document)?;
        Ok(result)
    }
}

fn upsert<T>(items: &mut Vec<T>, item: T, same: impl Fn(&T) -> bool) {
    match items.iter_mut().find(|existing| same(existing)) {
        Some(existing) => *existing = item,
        None => items.push(item),
    }
}

impl TemplateStore for JsonFileTemplateStore {
    fn fetch_templates(&self) -> Result<Vec<Template>, StoreError> {
        self.read(|d| d.templates.iter().cloned().map(Template::from).collect())
    }

    fn save_template(&self, template: &Template) -> Result<(), StoreError> {
        let record = TemplateRecord::from(template);
        self.update(|d| {
            upsert(&mut d.templates, record, |r| r.id == template.id.as_str());
            Ok(())
        })
    }

    fn delete_template(&self, id: &TemplateId) -> Result<(), StoreError> {
        self.update(|d| {
            let before = d.templates.len();
            d.templates.retain(|r| r.id != id.as_str());
            if d.templates.len() == before {
                return Err(StoreError::TemplateNotFound(id.clone()));
            }
            Ok(())
        })
    }

    fn fetch_merge_fields(&self) -> Result<Vec<MergeField>, StoreError> {
        self.read(|d| d.merge_fields.iter().cloned().map(MergeField::from).collect())
    }

    fn save_merge_field(&self, field: &MergeField) -> Result<(), StoreError> {
        let record = MergeFieldRecord::from(field);
        self.update(|d| {
            upsert(&mut d.merge_fields, record, |r| r.id == field.id.as_str());
            Ok(())
        })
    }

    fn delete_merge_field(&self, id: &MergeFieldId) -> Result<(), StoreError> {
        self.update(|d| {
            let before = d.merge_fields.len();
            d.merge_fields.retain(|r| r.id != id.as_str());
            if d.merge_fields.len() == before {
                return Err(StoreError::MergeFieldNotFound(id.clone()));
            }
            Ok(())
        })
    }

    fn fetch_setting(&self, key: &str) -> Result<Option<String>, StoreError> {
        self.read(|d| d.settings.get(key).cloned())
    }

    fn save_setting(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.update(|d| {
            d.settings.insert(key.to_string(), value.to_string());
            Ok(())
        })
    }
}

/// Template management on top of any [`TemplateStore`].
#[derive(Debug)]
pub struct TemplateCatalog<S: TemplateStore> {
    store: S,
}

impl<S: TemplateStore> TemplateCatalog<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Stored templates, or the seeded amendment set when none are stored.
    pub fn templates(&self) -> Result<Vec<Template>, StoreError> {
        let stored = self.store.fetch_templates()?;
        if stored.is_empty() {
            log::debug!("Template store is empty, using the default templates");
            return Ok(Template::default_set());
        }
        Ok(stored)
    }

    pub fn template(&self, id: &TemplateId) -> Result<Template, StoreError> {
        self.templates()?
            .into_iter()
            .find(|t| &t.id == id)
            .ok_or_else(|| StoreError::TemplateNotFound(id.clone()))
    }

    pub fn save(&self, template: &Template) -> Result<(), StoreError> {
        self.store.save_template(template)
    }

    /// Deletes a template unless it is the only one left.
    ///
    /// While the store is still empty the offered templates are the default
    /// set, so deleting one of them persists the remaining defaults.
    pub fn delete(&self, id: &TemplateId) -> Result<(), StoreError> {
        let stored = self.store.fetch_templates()?;
        let seeded = stored.is_empty();
        let offered = if seeded { Template::default_set() } else { stored };
        if !offered.iter().any(|t| &t.id == id) {
            return Err(StoreError::TemplateNotFound(id.clone()));
        }
        if offered.len() <= 1 {
            return Err(StoreError::LastTemplate(id.clone()));
        }
        if !seeded {
            return self.store.delete_template(id);
        }

        log::debug!("Materializing the default templates without '{id}'");
        for template in offered.iter().filter(|t| &t.id != id) {
            self.store.save_template(template)?;
        }
        Ok(())
    }

    /// Merge fields the template exposes.
    pub fn merge_fields_for(&self, template: &Template) -> Result<Vec<MergeField>, StoreError> {
        let fields = self.store.fetch_merge_fields()?;
        Ok(template
            .visible_merge_fields(&fields)
            .into_iter()
            .cloned()
            .collect())
    }

    pub fn add_merge_field(&self, id: impl Into<MergeFieldId>, label: &str) -> Result<MergeField, StoreError> {
        let field = MergeField::from_label(id, label);
        self.store.save_merge_field(&field)?;
        Ok(field)
    }

    pub fn letterhead_reference(&self) -> Result<Option<String>, StoreError> {
        self.store.fetch_setting(LETTERHEAD_SETTING)
    }

    pub fn set_letterhead_reference(&self, reference: &str) -> Result<(), StoreError> {
        self.store.save_setting(LETTERHEAD_SETTING, reference)
    }
}
