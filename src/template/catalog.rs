// src/template/catalog.rs

use crate::error::CatalogError;
use crate::template::{Exit, TemplateId};
use std::collections::{BTreeMap, BTreeSet};

/// A template id together with the exits its author declared it supports.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEntry {
    pub id: TemplateId,
    pub supported_exits: BTreeSet<Exit>,
}

impl CatalogEntry {
    pub fn new(id: impl Into<TemplateId>, exits: impl IntoIterator<Item = Exit>) -> Self {
        Self {
            id: id.into(),
            supported_exits: exits.into_iter().collect(),
        }
    }
}

/// Index from exit to the templates supporting it.
///
/// Built once from the registration list and never mutated afterwards;
/// changing the template list means building a new catalog.
#[derive(Debug, Clone)]
pub struct TemplateCatalog {
    templates: Vec<TemplateId>,
    by_exit: BTreeMap<Exit, BTreeSet<TemplateId>>,
}

impl TemplateCatalog {
    pub fn build(entries: impl IntoIterator<Item = CatalogEntry>) -> Result<Self, CatalogError> {
        let mut templates = Vec::new();
        let mut seen = BTreeSet::new();
        let mut by_exit: BTreeMap<Exit, BTreeSet<TemplateId>> =
            Exit::ALL.iter().map(|&exit| (exit, BTreeSet::new())).collect();

        for entry in entries {
            if !seen.insert(entry.id.clone()) {
                return Err(CatalogError::DuplicateTemplate(entry.id));
            }
            for exit in &entry.supported_exits {
                by_exit
                    .entry(*exit)
                    .or_default()
                    .insert(entry.id.clone());
            }
            templates.push(entry.id);
        }

        if templates.is_empty() {
            return Err(CatalogError::Empty);
        }

        log::debug!("Built template catalog with {} templates", templates.len());
        Ok(Self { templates, by_exit })
    }

    /// Every registered template, in registration order.
    pub fn templates(&self) -> &[TemplateId] {
        &self.templates
    }

    /// Templates supporting a single exit.
    pub fn supporting(&self, exit: Exit) -> Option<&BTreeSet<TemplateId>> {
        self.by_exit.get(&exit)
    }

    /// Templates supporting every exit in `required`.
    ///
    /// An empty requirement has no meaningful answer here; unconstrained
    /// cells must choose from [`TemplateCatalog::templates`] instead.
    pub fn query(&self, required: &BTreeSet<Exit>) -> BTreeSet<TemplateId> {
        debug_assert!(
            !required.is_empty(),
            "catalog queried with an empty exit requirement"
        );

        let mut exits = required.iter();
        let Some(first) = exits.next() else {
            return BTreeSet::new();
        };
        let mut result = self.by_exit.get(first).cloned().unwrap_or_default();
        for exit in exits {
            if result.is_empty() {
                break;
            }
            match self.by_exit.get(exit) {
                Some(candidates) => result.retain(|id| candidates.contains(id)),
                None => result.clear(),
            }
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn three_template_catalog() -> TemplateCatalog {
        TemplateCatalog::build(vec![
            CatalogEntry::new("up", [Exit::TopMiddle]),
            CatalogEntry::new("shaft", [Exit::BottomMiddle, Exit::TopMiddle]),
            CatalogEntry::new("closet", []),
        ])
        .unwrap()
    }

    fn ids(names: &[&str]) -> BTreeSet<TemplateId> {
        names.iter().map(|n| TemplateId::new(*n)).collect()
    }

    #[test]
    fn test_query_single_exit() {
        let catalog = three_template_catalog();
        let result = catalog.query(&BTreeSet::from([Exit::TopMiddle]));
        assert_eq!(result, ids(&["up", "shaft"]));
    }

    #[test]
    fn test_query_two_exits() {
        let catalog = three_template_catalog();
        let result = catalog.query(&BTreeSet::from([Exit::TopMiddle, Exit::BottomMiddle]));
        assert_eq!(result, ids(&["shaft"]));
    }

    #[test]
    fn test_query_unsupported_exit_is_empty() {
        let catalog = three_template_catalog();
        assert!(catalog.query(&BTreeSet::from([Exit::LeftTop])).is_empty());
        assert!(catalog
            .query(&BTreeSet::from([Exit::LeftTop, Exit::TopMiddle]))
            .is_empty());
    }

    #[test]
    fn test_query_is_intersection_of_single_queries() {
        let catalog = TemplateCatalog::build(vec![
            CatalogEntry::new("a", [Exit::TopLeft, Exit::LeftMiddle, Exit::RightTop]),
            CatalogEntry::new("b", [Exit::TopLeft, Exit::RightTop]),
            CatalogEntry::new("c", [Exit::LeftMiddle, Exit::RightTop]),
            CatalogEntry::new("d", Exit::ALL),
        ])
        .unwrap();

        for e1 in Exit::ALL {
            for e2 in Exit::ALL {
                let both = catalog.query(&BTreeSet::from([e1, e2]));
                let first = catalog.query(&BTreeSet::from([e1]));
                let second = catalog.query(&BTreeSet::from([e2]));
                let expected: BTreeSet<_> = first.intersection(&second).cloned().collect();
                assert_eq!(both, expected, "query({:?}, {:?})", e1, e2);
            }
        }
    }

    #[test]
    fn test_templates_keep_registration_order() {
        let catalog = three_template_catalog();
        let names: Vec<&str> = catalog.templates().iter().map(|t| t.as_str()).collect();
        assert_eq!(names, vec!["up", "shaft", "closet"]);
        assert!(catalog.supporting(Exit::LeftTop).unwrap().is_empty());
    }

    #[test]
    fn test_duplicate_and_empty_rejected() {
        let duplicate = TemplateCatalog::build(vec![
            CatalogEntry::new("a", [Exit::TopLeft]),
            CatalogEntry::new("a", [Exit::TopRight]),
        ]);
        assert_eq!(
            duplicate.unwrap_err(),
            CatalogError::DuplicateTemplate(TemplateId::new("a"))
        );
        assert_eq!(
            TemplateCatalog::build(Vec::new()).unwrap_err(),
            CatalogError::Empty
        );
    }
}
