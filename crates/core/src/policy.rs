//! Policy documents listed in the policy navigator.

use serde::{Deserialize, Serialize};

use crate::types::Date;

crate::open_enum! {
    /// File format of a stored policy document.
    pub enum DocumentType {
        Pdf => "pdf",
        Docx => "docx",
    }
}

crate::open_enum! {
    pub enum PolicyStatus {
        Active => "active",
        Archived => "archived",
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Policy {
    pub id: String,
    pub name: String,
    pub document_type: DocumentType,
    /// Free-form grouping such as `Financial` or `IT Security`.
    pub category: String,
    pub pages: u32,
    pub uploaded_at: Date,
    pub status: PolicyStatus,
}

/// Filter policies by a search query.
///
/// Case-insensitive substring match against the name or the category.
/// A blank query returns every policy.
pub fn search_policies<'a>(policies: &'a [Policy], query: &str) -> Vec<&'a Policy> {
    let needle = query.trim().to_lowercase();
    policies
        .iter()
        .filter(|p| {
            needle.is_empty()
                || p.name.to_lowercase().contains(&needle)
                || p.category.to_lowercase().contains(&needle)
        })
        .collect()
}
