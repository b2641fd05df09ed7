//! Tracked items and the input used to create them

use crate::dates::{self, FormatError, iso_date};
use crate::shelf_life::{LifeUnit, compute_expiry};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Shelf life used when the caller does not give one
pub const DEFAULT_LIFE_VALUE: f64 = 7.0;
pub const DEFAULT_LIFE_UNIT: LifeUnit = LifeUnit::days;

/// A perishable or expiring thing being tracked
///
/// Items are immutable once created. The expiry date is computed when the
/// item is added and stored as-is; it is never recomputed from the other
/// fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    /// Opaque unique identifier
    pub id: String,
    /// Display name, never empty
    pub name: String,
    #[serde(with = "iso_date")]
    pub start_date: NaiveDate,
    #[serde(with = "iso_date")]
    pub expiry_date: NaiveDate,
    /// Magnitude of the shelf life
    pub life_value: f64,
    pub life_unit: LifeUnit,
    /// Free text, empty when not given
    #[serde(default)]
    pub note: String,
}

/// Generate a fresh item ID
pub fn create_id() -> String {
    uuid::Uuid::new_v4().simple().to_string()
}

/// Why an add request was turned down
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InputError {
    #[error("name is empty")]
    EmptyName,
    #[error(transparent)]
    StartDate(#[from] FormatError),
    #[error("life value {0} is not a positive number")]
    LifeValue(f64),
    #[error("{0}")]
    LifeUnit(String),
    #[error("expiry date is out of range")]
    OutOfRange,
}

/// Raw user input for a new item
///
/// Everything arrives as entered; [`NewItem::into_item`] validates it.
/// Omitted fields fall back to: start date = today, shelf life = 7 days.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewItem {
    pub name: String,
    pub start_date: Option<String>,
    pub life_value: Option<f64>,
    pub life_unit: Option<String>,
    pub note: Option<String>,
}

impl NewItem {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn start_date(mut self, start_date: impl Into<String>) -> Self {
        self.start_date = Some(start_date.into());
        self
    }

    pub fn life(mut self, value: f64, unit: impl Into<String>) -> Self {
        self.life_value = Some(value);
        self.life_unit = Some(unit.into());
        self
    }

    pub fn note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    /// Validate the input and build an item with the given ID
    pub fn into_item(self, id: String, today: NaiveDate) -> Result<Item, InputError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(InputError::EmptyName);
        }

        let start_date = match self.start_date.as_deref().map(str::trim) {
            Some(s) => dates::parse_calendar_date(s)?,
            None => today,
        };

        let life_value = self.life_value.unwrap_or(DEFAULT_LIFE_VALUE);
        if !life_value.is_finite() || life_value <= 0.0 {
            return Err(InputError::LifeValue(life_value));
        }

        let life_unit = match self.life_unit.as_deref() {
            Some(s) => s.trim().parse::<LifeUnit>().map_err(InputError::LifeUnit)?,
            None => DEFAULT_LIFE_UNIT,
        };

        let expiry_date =
            compute_expiry(start_date, life_value, life_unit).ok_or(InputError::OutOfRange)?;

        Ok(Item {
            id,
            name: name.to_string(),
            start_date,
            expiry_date,
            life_value,
            life_unit,
            note: self.note.map(|n| n.trim().to_string()).unwrap_or_default(),
        })
    }
}
