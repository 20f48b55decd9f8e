#[cfg(test)]
#[path = "stats_test.rs"]
mod tests;

use std::collections::HashSet;

use chrono::NaiveDate;

use crate::domain::models::Contact;

/// Figures shown in the dashboard cards.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Stats {
    pub total: usize,
    pub today: usize,
    pub companies: usize,
}

impl Stats {
    /// Contacts without a creation date count as created `today`. Blank and
    /// missing companies each count as one distinct value.
    pub fn from_contacts(contacts: &[Contact], today: NaiveDate) -> Stats {
        let created_today = contacts
            .iter()
            .filter(|contact| {
                if contact.date_creation.is_none() {
                    return true;
                }

                return contact
                    .created_at()
                    .map(|date| return date.date_naive() == today)
                    .unwrap_or(false);
            })
            .count();

        let companies = contacts
            .iter()
            .map(|contact| return contact.entreprise.as_deref())
            .collect::<HashSet<Option<&str>>>()
            .len();

        return Stats {
            total: contacts.len(),
            today: created_today,
            companies,
        };
    }
}
