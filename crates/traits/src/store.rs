//! Persistence seam for templates, merge fields and settings.
//!
//! Stores exchange the core records exactly as defined in `folio-types`.
//! Any storage-side naming convention is translated inside the store.

use folio_types::{MergeField, MergeFieldId, Template, TemplateId};
use std::collections::BTreeMap;
use std::fmt::Debug;
use std::sync::RwLock;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("Template not found: {0}")]
    TemplateNotFound(TemplateId),

    #[error("Merge field not found: {0}")]
    MergeFieldNotFound(MergeFieldId),

    #[error("Template '{0}' is the last one and cannot be deleted.")]
    LastTemplate(TemplateId),

    #[error("Stored data is malformed: {0}")]
    Corrupt(String),

    #[error("Storage backend failed: {0}")]
    Backend(String),

    #[error("I/O error: {0}")]
    Io(String),
}

impl From<std::io::Error> for StoreError {
    fn from(err: std::io::Error) -> Self {
        StoreError::Io(err.to_string())
    }
}

pub trait TemplateStore: Send + Sync + Debug {
    /// All templates in storage order.
    fn fetch_templates(&self) -> Result<Vec<Template>, StoreError>;

    /// Inserts the template, or replaces the stored one with the same id.
    fn save_template(&self, template: &Template) -> Result<(), StoreError>;

    fn delete_template(&self, id: &TemplateId) -> Result<(), StoreError>;

    fn fetch_merge_fields(&self) -> Result<Vec<MergeField>, StoreError>;

    /// Inserts the field, or replaces the stored one with the same id.
    fn save_merge_field(&self, field: &MergeField) -> Result<(), StoreError>;

    fn delete_merge_field(&self, id: &MergeFieldId) -> Result<(), StoreError>;

    /// Free-form application settings, e.g. the letterhead reference.
    fn fetch_setting(&self, key: &str) -> Result<Option<String>, StoreError>;

    fn save_setting(&self, key: &str, value: &str) -> Result<(), StoreError>;
}

#[derive(Debug, Default, Clone)]
struct Records {
    templates: Vec<Template>,
    merge_fields: Vec<MergeField>,
    settings: BTreeMap<String, String>,
}

/// Process-local store. Nothing survives the process.
#[derive(Debug, Default)]
pub struct InMemoryTemplateStore {
    records: RwLock<Records>,
}

fn upsert<T: Clone>(items: &mut Vec<T>, item: &T, same: impl Fn(&T) -> bool) {
    match items.iter_mut().find(|existing| same(existing)) {
        Some(existing) => *existing = item.clone(),
        None => items.push(item.clone()),
    }
}

impl InMemoryTemplateStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_templates(templates: Vec<Template>) -> Self {
        Self {
            records: RwLock::new(Records {
                templates,
                ..Records::default()
            }),
        }
    }

    fn read<R>(&self, f: impl FnOnce(&Records) -> R) -> Result<R, StoreError> {
        let records = self
            .records
            .read()
            .map_err(|_| StoreError::Backend("template store lock poisoned".to_string()))?;
        Ok(f(&records))
    }

    fn write<R>(&self, f: impl FnOnce(&mut Records) -> R) -> Result<R, StoreError> {
        let mut records = self
            .records
            .write()
            .map_err(|_| StoreError::Backend("template store lock poisoned".to_string()))?;
        Ok(f(&mut records))
    }
}

impl TemplateStore for InMemoryTemplateStore {
    fn fetch_templates(&self) -> Result<Vec<Template>, StoreError> {
        self.read(|r| r.templates.clone())
    }

    fn save_template(&self, template: &Template) -> Result<(), StoreError> {
        self.write(|r| upsert(&mut r.templates, template, |t| t.id == template.id))
    }

    fn delete_template(&self, id: &TemplateId) -> Result<(), StoreError> {
        self.write(|r| {
            let before = r.templates.len();
            r.templates.retain(|t| &t.id != id);
            before != r.templates.len()
        })?
        .then_some(())
        .ok_or_else(|| StoreError::TemplateNotFound(id.clone()))
    }

    fn fetch_merge_fields(&self) -> Result<Vec<MergeField>, StoreError> {
        self.read(|r| r.merge_fields.clone())
    }

    fn save_merge_field(&self, field: &MergeField) -> Result<(), StoreError> {
        self.write(|r| upsert(&mut r.merge_fields, field, |f| f.id == field.id))
    }

    fn delete_merge_field(&self, id: &MergeFieldId) -> Result<(), StoreError> {
        self.write(|r| {
            let before = r.merge_fields.len();
            r.merge_fields.retain(|f| &f.id != id);
            before != r.merge_fields.len()
        })?
        .then_some(())
        .ok_or_else(|| StoreError::MergeFieldNotFound(id.clone()))
    }

    fn fetch_setting(&self, key: &str) -> Result<Option<String>, StoreError> {
        self.read(|r| r.settings.get(key).cloned())
    }

    fn save_setting(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.write(|r| {
            r.settings.insert(key.to_string(), value.to_string());
        })
    }
}
