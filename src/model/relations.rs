// src/model/relations.rs
//! The closed set of relation categories and the hydrated relation map.

use super::RelatedItem;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the five relation properties a content page links through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RelationLabel {
    Projets,
    Prestations,
    Contacts,
    Organisations,
    Wiki,
}

impl RelationLabel {
    /// Every label, in the order relations are fetched and serialized.
    pub const ALL: [RelationLabel; 5] = [
        RelationLabel::Projets,
        RelationLabel::Prestations,
        RelationLabel::Contacts,
        RelationLabel::Organisations,
        RelationLabel::Wiki,
    ];

    /// Name of the relation property in the content database.
    pub fn property_name(self) -> &'static str {
        match self {
            RelationLabel::Projets => "Projets",
            RelationLabel::Prestations => "Prestations",
            RelationLabel::Contacts => "Contacts",
            RelationLabel::Organisations => "Organisations",
            RelationLabel::Wiki => "Wiki",
        }
    }

    /// Key used for this relation in the serialized context.
    pub fn key(self) -> &'static str {
        match self {
            RelationLabel::Projets => "projets",
            RelationLabel::Prestations => "prestations",
            RelationLabel::Contacts => "contacts",
            RelationLabel::Organisations => "organisations",
            RelationLabel::Wiki => "wiki",
        }
    }
}

impl fmt::Display for RelationLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.property_name())
    }
}

/// Hydrated relations of a page, keyed by label in fetch order.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RelationSet(IndexMap<RelationLabel, Vec<RelatedItem>>);

impl RelationSet {
    /// A set with every label mapped to an empty sequence.
    pub fn empty() -> Self {
        Self(
            RelationLabel::ALL
                .iter()
                .map(|label| (*label, Vec::new()))
                .collect(),
        )
    }

    /// Records the items for `label`. A label already present keeps its position.
    pub fn insert(&mut self, label: RelationLabel, items: Vec<RelatedItem>) {
        self.0.insert(label, items);
    }

    /// Items for `label`; empty when the label was never recorded.
    pub fn get(&self, label: RelationLabel) -> &[RelatedItem] {
        self.0.get(&label).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn labels(&self) -> impl Iterator<Item = RelationLabel> + '_ {
        self.0.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (RelationLabel, &[RelatedItem])> {
        self.0.iter().map(|(label, items)| (*label, items.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of related pages across all labels.
    pub fn total_items(&self) -> usize {
        self.0.values().map(Vec::len).sum()
    }
}
