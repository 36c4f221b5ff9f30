use crate::ids::{MergeFieldId, TemplateId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Opening delimiter of a merge placeholder.
pub const PLACEHOLDER_OPEN: &str = "{{";
/// Closing delimiter of a merge placeholder.
pub const PLACEHOLDER_CLOSE: &str = "}}";

/// Operator-entered merge values, keyed by the full placeholder token
/// (`{{ClientName}}`). Scoped to a single generation.
pub type MergeFieldValues = BTreeMap<String, String>;

/// A document template. Title, body and both signature blocks may contain
/// merge placeholders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Template {
    pub id: TemplateId,
    pub name: String,
    pub title: String,
    pub body: String,
    pub signature_left: String,
    pub signature_right: String,
    /// Restricts which merge fields this template exposes. `None` or empty
    /// means every field is allowed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allowed_merge_field_ids: Option<Vec<MergeFieldId>>,
}

impl Template {
    /// The skeleton handed to the operator when they create a new template.
    pub fn blank(id: impl Into<TemplateId>) -> Self {
        Self {
            id: id.into(),
            name: "New Template".to_string(),
            title: "Document Title".to_string(),
            body: "Write the body of the document here...".to_string(),
            signature_left: "Left Signature\nPosition".to_string(),
            signature_right: "Right Signature\nPosition".to_string(),
            allowed_merge_field_ids: None,
        }
    }

    /// The amendment templates seeded when the store holds none.
    pub fn default_set() -> Vec<Template> {
        let manager = "Diego Felipe Quesada\nManager";
        let seed = |id: &str, name: &str, title: &str, body: &str, right: &str| Template {
            id: TemplateId::from(id),
            name: name.to_string(),
            title: title.to_string(),
            body: body.to_string(),
            signature_left: manager.to_string(),
            signature_right: right.to_string(),
            allowed_merge_field_ids: None,
        };

        vec![
            seed(
                "1",
                "Amendment - New Co-investor",
                "Amendment \u{2013} Jul 10, 2025",
                "The Co-Investor JOHANNA ANDREA CUELLAR is entering with $50,000 to participate as the beneficiary of the mortgages that are list below.\n\nHere is a summary of the composition of your portfolio:",
                "JOHANNA ANDREA CUELLAR\nCo-Investor",
            ),
            seed(
                "2",
                "Amendment - Addition",
                "Amendment \u{2013} Nov 12, 2025",
                "The Co-Investor VANESSA GARCIA has increased its value by $6,600.00 leaving its total investment to date at $135,750.00.\n\nBelow is a summary of the composition of your portfolio:",
                "VANESSA GARCIA\nCo-Investor",
            ),
            seed(
                "3",
                "Amendment - Extension",
                "Amendment \u{2013} Jul 10, 2025",
                "Due to the loan ML-023 from Projects and Services LLC has requested a 3-month extension, by mutual agreement, co-investor MAURICIO CHARRY and MYKAP have decided to maintain the position at a rate of 8.80%, leaving his total portfolio as shown below.",
                "MAURICIO CHARRY\nCo-Investor",
            ),
            seed(
                "4",
                "Amendment - Funds Return",
                "Amendment \u{2013} Jul 10, 2025",
                "Since GERARDO CHIRINOS loan ML-087, in which INVERSIONES TRES VELAS SAS held a participation, has made a payoff, the co-investor has been decided to request the return of his funds, which will be deposited into his bank account. This table provides a summary of your portfolio terms as of today.",
                "MAURICIO CHARRY\nCo-Investor",
            ),
        ]
    }

    pub fn allows_merge_field(&self, id: &MergeFieldId) -> bool {
        match &self.allowed_merge_field_ids {
            Some(ids) if !ids.is_empty() => ids.contains(id),
            _ => true,
        }
    }

    /// Adds the field to the allow list, or removes it if already present.
    pub fn toggle_merge_field(&mut self, id: &MergeFieldId) {
        let ids = self.allowed_merge_field_ids.get_or_insert_with(Vec::new);
        if let Some(pos) = ids.iter().position(|existing| existing == id) {
            ids.remove(pos);
        } else {
            ids.push(id.clone());
        }
    }

    /// The subset of `fields` this template exposes for value entry.
    pub fn visible_merge_fields<'a>(&self, fields: &'a [MergeField]) -> Vec<&'a MergeField> {
        fields
            .iter()
            .filter(|field| self.allows_merge_field(&field.id))
            .collect()
    }
}

/// An operator-defined placeholder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergeField {
    pub id: MergeFieldId,
    pub label: String,
    /// Full placeholder token, e.g. `{{ClientName}}`.
    pub key: String,
}

impl MergeField {
    /// Creates a field whose key is derived from the label: every character
    /// that is not an ASCII letter or digit is dropped and the rest wrapped
    /// in placeholder delimiters.
    pub fn from_label(id: impl Into<MergeFieldId>, label: impl Into<String>) -> Self {
        let label = label.into();
        let key = Self::key_for_label(&label);
        Self {
            id: id.into(),
            label,
            key,
        }
    }

    pub fn key_for_label(label: &str) -> String {
        let core: String = label.chars().filter(char::is_ascii_alphanumeric).collect();
        format!("{PLACEHOLDER_OPEN}{core}{PLACEHOLDER_CLOSE}")
    }
}
