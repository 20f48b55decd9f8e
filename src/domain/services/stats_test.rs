use anyhow::Result;
use chrono::NaiveDate;
use test_utils::contacts_fixture;

use super::Stats;
use crate::domain::models::Contact;

#[test]
fn it_has_no_stats_without_contacts() {
    let today = NaiveDate::from_ymd_opt(2025, 1, 2).unwrap();
    assert_eq!(Stats::from_contacts(&[], today), Stats::default());
}

#[test]
fn it_counts_contacts() -> Result<()> {
    let contacts: Vec<Contact> = serde_json::from_str(contacts_fixture())?;
    let today = NaiveDate::from_ymd_opt(2025, 1, 2).unwrap();

    let stats = Stats::from_contacts(&contacts, today);

    assert_eq!(stats.total, 3);
    // One dated today, one without any date.
    assert_eq!(stats.today, 2);
    // "Mekody", "Kody SARL" and a missing company.
    assert_eq!(stats.companies, 3);
    return Ok(());
}
