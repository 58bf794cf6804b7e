//! Mailing lists available to an account

use std::collections::BTreeMap;

use serde::Serialize;

use core_kernel::MailingListId;

/// One selectable list
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MailingList {
    pub id: MailingListId,
    pub name: String,
}

/// Lists keyed by id, always iterated in ascending id order
///
/// Empty when the account has no lists or the lookup could not be made;
/// callers do not distinguish the two.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MailingLists(BTreeMap<MailingListId, String>);

impl MailingLists {
    /// Collects `(id, name)` pairs; a repeated id keeps the last name
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (MailingListId, String)>,
    {
        Self(pairs.into_iter().collect())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn name(&self, id: MailingListId) -> Option<&str> {
        self.0.get(&id).map(String::as_str)
    }

    pub fn contains(&self, id: MailingListId) -> bool {
        self.0.contains_key(&id)
    }

    pub fn ids(&self) -> impl Iterator<Item = MailingListId> + '_ {
        self.0.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = MailingList> + '_ {
        self.0.iter().map(|(id, name)| MailingList {
            id: *id,
            name: name.clone(),
        })
    }
}
