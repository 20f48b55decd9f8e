#[cfg(test)]
#[path = "contact_test.rs"]
mod tests;

use std::fmt;

use chrono::DateTime;
use chrono::Datelike;
use chrono::Local;
use chrono::NaiveDate;
use serde::Deserializer;
use serde_derive::Deserialize;
use serde_derive::Serialize;

/// Values offered by the "Service intéressé" select. The empty entry means no
/// service was picked.
pub const SERVICE_OPTIONS: [&str; 10] = [
    "",
    "Marketing Digital",
    "Evacuation sanitaire",
    "voyage organisé",
    "Solutions digitales",
    "Développement Web",
    "Design Graphique",
    "Consultance",
    "Formation",
    "Autre",
];

const MONTHS_FR: [&str; 12] = [
    "janvier",
    "février",
    "mars",
    "avril",
    "mai",
    "juin",
    "juillet",
    "août",
    "septembre",
    "octobre",
    "novembre",
    "décembre",
];

/// Server assigned identifier. The API hands out either numbers or strings, so
/// the raw JSON value is kept and echoed back untouched.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContactId(serde_json::Value);

impl fmt::Display for ContactId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self.0 {
            serde_json::Value::String(id) => return write!(f, "{id}"),
            value => return write!(f, "{value}"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ContactField {
    NomComplet,
    Courriel,
    Entreprise,
    ServiceInteresse,
    Message,
}

impl ContactField {
    pub const ALL: [ContactField; 5] = [
        ContactField::NomComplet,
        ContactField::Courriel,
        ContactField::Entreprise,
        ContactField::ServiceInteresse,
        ContactField::Message,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ContactField::NomComplet => return "Nom complet *",
            ContactField::Courriel => return "Email *",
            ContactField::Entreprise => return "Entreprise",
            ContactField::ServiceInteresse => return "Service intéressé",
            ContactField::Message => return "Message",
        }
    }

    pub fn is_required(&self) -> bool {
        return matches!(self, ContactField::NomComplet | ContactField::Courriel);
    }
}

/// Some records carry `null` where a string is expected.
fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    let value: Option<String> = serde::de::Deserialize::deserialize(deserializer)?;
    return Ok(value.unwrap_or_default());
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub id: ContactId,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub nom_complet: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub courriel: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entreprise: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_interesse: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_creation: Option<String>,
    /// Keys this client does not edit. Sent back as is on update.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Contact {
    pub fn field(&self, field: ContactField) -> &str {
        let value = match field {
            ContactField::NomComplet => return &self.nom_complet,
            ContactField::Courriel => return &self.courriel,
            ContactField::Entreprise => &self.entreprise,
            ContactField::ServiceInteresse => &self.service_interesse,
            ContactField::Message => &self.message,
        };

        return value.as_deref().unwrap_or("");
    }

    /// Returns a copy of the contact with one field replaced.
    pub fn with_field(&self, field: ContactField, value: &str) -> Contact {
        let mut contact = self.clone();
        match field {
            ContactField::NomComplet => contact.nom_complet = value.to_string(),
            ContactField::Courriel => contact.courriel = value.to_string(),
            ContactField::Entreprise => contact.entreprise = Some(value.to_string()),
            ContactField::ServiceInteresse => {
                contact.service_interesse = Some(value.to_string());
            }
            ContactField::Message => contact.message = Some(value.to_string()),
        }

        return contact;
    }

    pub fn missing_required(&self) -> Option<ContactField> {
        return ContactField::ALL
            .into_iter()
            .find(|field| return field.is_required() && self.field(*field).trim().is_empty());
    }

    /// Upper case first letter of the name, used as the avatar.
    pub fn initial(&self) -> String {
        return self
            .nom_complet
            .chars()
            .next()
            .map(|c| return c.to_uppercase().to_string())
            .unwrap_or_default();
    }

    /// First 30 characters of the message followed by an ellipsis.
    pub fn message_preview(&self) -> String {
        let message = self.message.as_deref().unwrap_or_default();
        return format!("{}...", message.chars().take(30).collect::<String>());
    }

    pub fn created_at(&self) -> Option<DateTime<Local>> {
        let raw = self.date_creation.as_deref()?;
        if let Ok(date) = DateTime::parse_from_rfc3339(raw) {
            return Some(date.with_timezone(&Local));
        }

        let day = NaiveDate::parse_from_str(raw.get(..10)?, "%Y-%m-%d").ok()?;
        return day
            .and_hms_opt(0, 0, 0)?
            .and_local_timezone(Local)
            .earliest();
    }

    /// Creation day as `dd/mm/yyyy`, or `-` when the server did not send one.
    pub fn created_on_short(&self) -> String {
        if let Some(date) = self.created_at() {
            return date.format("%d/%m/%Y").to_string();
        }

        return "-".to_string();
    }

    /// Creation date spelled out in French, e.g. `2 janvier 2025 à 10:30`.
    pub fn created_on_long(&self) -> String {
        if let Some(date) = self.created_at() {
            let month = MONTHS_FR[date.month0() as usize];
            return format!(
                "{} {month} {} à {}",
                date.day(),
                date.year(),
                date.format("%H:%M")
            );
        }

        return "Non spécifié".to_string();
    }
}

/// New contact being typed in the add form. All five keys are always sent.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactDraft {
    pub nom_complet: String,
    pub courriel: String,
    pub entreprise: String,
    pub service_interesse: String,
    pub message: String,
}

impl ContactDraft {
    pub fn field(&self, field: ContactField) -> &str {
        match field {
            ContactField::NomComplet => return &self.nom_complet,
            ContactField::Courriel => return &self.courriel,
            ContactField::Entreprise => return &self.entreprise,
            ContactField::ServiceInteresse => return &self.service_interesse,
            ContactField::Message => return &self.message,
        }
    }

    /// Returns a copy of the draft with one field replaced.
    pub fn with_field(&self, field: ContactField, value: &str) -> ContactDraft {
        let mut draft = self.clone();
        match field {
            ContactField::NomComplet => draft.nom_complet = value.to_string(),
            ContactField::Courriel => draft.courriel = value.to_string(),
            ContactField::Entreprise => draft.entreprise = value.to_string(),
            ContactField::ServiceInteresse => draft.service_interesse = value.to_string(),
            ContactField::Message => draft.message = value.to_string(),
        }

        return draft;
    }

    pub fn missing_required(&self) -> Option<ContactField> {
        return ContactField::ALL
            .into_iter()
            .find(|field| return field.is_required() && self.field(*field).trim().is_empty());
    }
}

/// Steps through `SERVICE_OPTIONS` starting from `current`. Unknown values
/// restart from the empty option.
pub fn cycle_service(current: &str, forward: bool) -> &'static str {
    let len = SERVICE_OPTIONS.len();
    let idx = SERVICE_OPTIONS.iter().position(|option| return *option == current);

    let next = match (idx, forward) {
        (None, true) => 1,
        (None, false) => len - 1,
        (Some(idx), true) => (idx + 1) % len,
        (Some(idx), false) => (idx + len - 1) % len,
    };

    return SERVICE_OPTIONS[next];
}
