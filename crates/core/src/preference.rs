//! Per-type notification preference model.
//!
//! Each notification type has three user-configurable values: an on/off
//! switch, a delivery method, and a frequency. A type with no stored record
//! is not an error; the defaults apply (disabled, email, immediate).
//! [`PreferenceState`] tags whether the current value has ever been
//! acknowledged by the server, which is what decides between the create and
//! update paths on save.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::PreferenceId;

// ---------------------------------------------------------------------------
// DeliveryMethod / Frequency
// ---------------------------------------------------------------------------

/// How notifications for a type reach the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeliveryMethod {
    /// Delivered by email.
    Email,
    /// Delivered inside the application (notification bell).
    InApp,
}

impl DeliveryMethod {
    /// Wire value for this method (`"email"` / `"in_app"`).
    pub fn as_str(&self) -> &'static str {
        match self {
            DeliveryMethod::Email => "email",
            DeliveryMethod::InApp => "in_app",
        }
    }
}

impl fmt::Display for DeliveryMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DeliveryMethod {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "email" => Ok(DeliveryMethod::Email),
            "in_app" => Ok(DeliveryMethod::InApp),
            other => Err(CoreError::Validation(format!(
                "Invalid delivery method '{other}'. Must be one of: email, in_app"
            ))),
        }
    }
}

/// How often notifications for a type are sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Frequency {
    /// Sent as soon as the triggering event occurs.
    Immediate,
    /// Batched into a daily summary.
    Daily,
    /// Batched into a weekly summary.
    Weekly,
}

impl Frequency {
    /// Wire value for this frequency (`"immediate"` / `"daily"` / `"weekly"`).
    pub fn as_str(&self) -> &'static str {
        match self {
            Frequency::Immediate => "immediate",
            Frequency::Daily => "daily",
            Frequency::Weekly => "weekly",
        }
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Frequency {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "immediate" => Ok(Frequency::Immediate),
            "daily" => Ok(Frequency::Daily),
            "weekly" => Ok(Frequency::Weekly),
            other => Err(CoreError::Validation(format!(
                "Invalid frequency '{other}'. Must be one of: immediate, daily, weekly"
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// PreferenceFields
// ---------------------------------------------------------------------------

/// The three user-configurable values for one notification type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PreferenceFields {
    /// Whether notifications of this type are sent at all.
    pub is_enabled: bool,
    /// Delivery channel used while enabled.
    pub delivery_method: DeliveryMethod,
    /// Send frequency used while enabled.
    pub frequency: Frequency,
}

impl Default for PreferenceFields {
    /// Values assumed for a type with no stored record: disabled, email,
    /// immediate.
    fn default() -> Self {
        Self {
            is_enabled: false,
            delivery_method: DeliveryMethod::Email,
            frequency: Frequency::Immediate,
        }
    }
}

impl PreferenceFields {
    /// Baseline for a record's first save: enabled, email, immediate.
    ///
    /// The first touch of a type enables it: a toggle that was off is
    /// being switched on. Callers that want to create a record in the
    /// disabled state must say so explicitly in the update they merge on
    /// top of this baseline.
    pub fn create_baseline() -> Self {
        Self {
            is_enabled: true,
            ..Self::default()
        }
    }

    /// Return a copy with the update's populated fields applied.
    pub fn merged(&self, update: &PreferenceUpdate) -> Self {
        Self {
            is_enabled: update.is_enabled.unwrap_or(self.is_enabled),
            delivery_method: update.delivery_method.unwrap_or(self.delivery_method),
            frequency: update.frequency.unwrap_or(self.frequency),
        }
    }
}

// ---------------------------------------------------------------------------
// PreferenceUpdate
// ---------------------------------------------------------------------------

/// A partial preference edit: only populated fields change.
///
/// Doubles as the `PUT` request body; `None` fields are omitted so the
/// server only sees the touched values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreferenceUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delivery_method: Option<DeliveryMethod>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frequency: Option<Frequency>,
}

impl PreferenceUpdate {
    /// Update carrying only the on/off switch.
    pub fn enabled(value: bool) -> Self {
        Self {
            is_enabled: Some(value),
            ..Self::default()
        }
    }

    /// Update carrying only the delivery method.
    pub fn delivery_method(method: DeliveryMethod) -> Self {
        Self {
            delivery_method: Some(method),
            ..Self::default()
        }
    }

    /// Update carrying only the frequency.
    pub fn frequency(frequency: Frequency) -> Self {
        Self {
            frequency: Some(frequency),
            ..Self::default()
        }
    }

    /// `true` when no field is populated.
    pub fn is_empty(&self) -> bool {
        self.is_enabled.is_none() && self.delivery_method.is_none() && self.frequency.is_none()
    }
}

// ---------------------------------------------------------------------------
// PreferenceState
// ---------------------------------------------------------------------------

/// Save-state of one notification type's preference within a session.
///
/// The create/update decision on save is a match on this tag: a
/// [`Persisted`](PreferenceState::Persisted) value is updated in place
/// under its identifier, anything else is created first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PreferenceState {
    /// No stored record; the defaults apply.
    Default,
    /// Holds local values the server has not acknowledged under an
    /// identifier; the next save must create the server record.
    Unsaved(PreferenceFields),
    /// Acknowledged by the server under `id`; saves update in place.
    Persisted {
        id: PreferenceId,
        fields: PreferenceFields,
    },
}

impl PreferenceState {
    /// Effective values for rendering and merging. Synthesizes the
    /// defaults for [`Default`](PreferenceState::Default); never fails.
    pub fn fields(&self) -> PreferenceFields {
        match self {
            PreferenceState::Default => PreferenceFields::default(),
            PreferenceState::Unsaved(fields) => *fields,
            PreferenceState::Persisted { fields, .. } => *fields,
        }
    }

    /// Server identifier, present only once persisted.
    pub fn id(&self) -> Option<&str> {
        match self {
            PreferenceState::Persisted { id, .. } => Some(id),
            _ => None,
        }
    }

    /// `true` once the server has acknowledged this record with an id.
    pub fn is_persisted(&self) -> bool {
        matches!(self, PreferenceState::Persisted { .. })
    }

    /// Merge a partial update, preserving the tag and identifier.
    ///
    /// `Default` becomes `Unsaved` holding the defaults plus the update;
    /// `Persisted` keeps its id.
    pub fn merged(&self, update: &PreferenceUpdate) -> PreferenceState {
        match self {
            PreferenceState::Default => {
                PreferenceState::Unsaved(PreferenceFields::default().merged(update))
            }
            PreferenceState::Unsaved(fields) => PreferenceState::Unsaved(fields.merged(update)),
            PreferenceState::Persisted { id, fields } => PreferenceState::Persisted {
                id: id.clone(),
                fields: fields.merged(update),
            },
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
