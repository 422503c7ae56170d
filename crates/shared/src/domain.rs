use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub i64);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

id_newtype!(ItemId);

/// A menu entry as stored by the collection endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub name: String,
    /// Collections may omit `image` and `description`; both default to empty.
    #[serde(default)]
    pub image: String,
    /// Decimal amount kept as the string the server sent, e.g. `"10.00"`.
    pub price: String,
    #[serde(default)]
    pub description: String,
    pub available: bool,
}

impl Item {
    /// Form fields of this item, used to prefill the edit form.
    pub fn draft(&self) -> ItemDraft {
        ItemDraft {
            name: self.name.clone(),
            image: self.image.clone(),
            price: self.price.clone(),
            description: self.description.clone(),
        }
    }
}

/// Fields a user fills in before the server assigns `id` and `available`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemDraft {
    pub name: String,
    #[serde(default)]
    pub image: String,
    pub price: String,
    #[serde(default)]
    pub description: String,
}

/// Request body for `POST /foods` and the server-side replacement payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewItem {
    pub name: String,
    #[serde(default)]
    pub image: String,
    pub price: String,
    #[serde(default)]
    pub description: String,
    pub available: bool,
}

impl NewItem {
    pub fn into_item(self, id: ItemId) -> Item {
        Item {
            id,
            name: self.name,
            image: self.image,
            price: self.price,
            description: self.description,
            available: self.available,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DraftError {
    #[error("name must not be empty")]
    EmptyName,
    #[error("price '{0}' is not a decimal amount like 10.00")]
    InvalidPrice(String),
}

impl ItemDraft {
    /// New items always start out available.
    pub fn into_new_item(self) -> NewItem {
        NewItem {
            name: self.name,
            image: self.image,
            price: self.price,
            description: self.description,
            available: true,
        }
    }

    pub fn into_item(self, id: ItemId, available: bool) -> Item {
        Item {
            id,
            name: self.name,
            image: self.image,
            price: self.price,
            description: self.description,
            available,
        }
    }

    /// Checks the same things the add/edit forms check before submitting.
    pub fn validate(&self) -> Result<(), DraftError> {
        if self.name.trim().is_empty() {
            return Err(DraftError::EmptyName);
        }
        if !is_decimal_amount(self.price.trim()) {
            return Err(DraftError::InvalidPrice(self.price.clone()));
        }
        Ok(())
    }
}

fn is_decimal_amount(raw: &str) -> bool {
    let (whole, fraction) = match raw.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (raw, None),
    };
    if whole.is_empty() || !whole.bytes().all(|b| b.is_ascii_digit()) {
        return false;
    }
    match fraction {
        None => true,
        Some(fraction) => {
            !fraction.is_empty()
                && fraction.len() <= 2
                && fraction.bytes().all(|b| b.is_ascii_digit())
        }
    }
}
