use anyhow::Result;
use test_utils::contacts_fixture;

use super::cycle_service;
use super::Contact;
use super::ContactDraft;
use super::ContactField;
use super::ContactId;

impl ContactId {
    pub fn new(value: serde_json::Value) -> ContactId {
        return ContactId(value);
    }
}

fn contact(json: &str) -> Result<Contact> {
    return Ok(serde_json::from_str(json)?);
}

#[test]
fn it_parses_numeric_and_string_ids() -> Result<()> {
    let contacts: Vec<Contact> = serde_json::from_str(contacts_fixture())?;

    assert_eq!(contacts.len(), 3);
    assert_eq!(contacts[0].id.to_string(), "1");
    assert_eq!(contacts[1].id.to_string(), "65a1f0c2e4b0a1b2c3d4e5f6");
    return Ok(());
}

#[test]
fn it_echoes_ids_back_untouched() -> Result<()> {
    let original = contact(r#"{"id": 42, "nom_complet": "A", "courriel": "a@x.com"}"#)?;
    let json = serde_json::to_value(&original)?;

    assert_eq!(json["id"], serde_json::json!(42));
    assert_eq!(original.id, ContactId::new(serde_json::json!(42)));
    return Ok(());
}

#[test]
fn it_tolerates_missing_optional_fields() -> Result<()> {
    let contact = contact(r#"{"id": 1, "nom_complet": "A", "courriel": "a@x.com", "entreprise": null}"#)?;

    assert_eq!(contact.field(ContactField::Entreprise), "");
    assert_eq!(contact.field(ContactField::ServiceInteresse), "");
    assert_eq!(contact.created_on_short(), "-");
    assert_eq!(contact.created_on_long(), "Non spécifié");
    return Ok(());
}

#[test]
fn it_replaces_a_single_field() -> Result<()> {
    let original = contact(r#"{"id": 1, "nom_complet": "A", "courriel": "a@x.com"}"#)?;
    let edited = original.with_field(ContactField::Entreprise, "Mekody");

    assert_eq!(original.entreprise, None);
    assert_eq!(edited.entreprise, Some("Mekody".to_string()));
    assert_eq!(edited.nom_complet, "A");
    assert_eq!(edited.id, original.id);
    return Ok(());
}

#[test]
fn it_reports_missing_required_fields() {
    let draft = ContactDraft::default().with_field(ContactField::NomComplet, "Awa");
    assert_eq!(draft.missing_required(), Some(ContactField::Courriel));

    let draft = draft.with_field(ContactField::Courriel, "awa@x.com");
    assert_eq!(draft.missing_required(), None);
}

#[test]
fn it_serializes_every_draft_key() -> Result<()> {
    let draft = ContactDraft::default().with_field(ContactField::NomComplet, "Awa");
    let json = serde_json::to_string(&draft)?;

    insta::assert_snapshot!(json, @r###"{"nom_complet":"Awa","courriel":"","entreprise":"","service_interesse":"","message":""}"###);
    return Ok(());
}

#[test]
fn it_formats_creation_dates() -> Result<()> {
    let contact = contact(
        r#"{"id": 1, "nom_complet": "A", "courriel": "a@x.com", "date_creation": "2025-01-02"}"#,
    )?;

    assert_eq!(contact.created_on_short(), "02/01/2025");
    insta::assert_snapshot!(contact.created_on_long(), @"2 janvier 2025 à 00:00");
    return Ok(());
}

#[test]
fn it_previews_messages() -> Result<()> {
    let contact = contact(
        r#"{"id": 1, "nom_complet": "awa", "courriel": "a@x.com", "message": "Bonjour, je souhaite un devis pour une formation"}"#,
    )?;

    assert_eq!(contact.initial(), "A");
    assert_eq!(contact.message_preview(), "Bonjour, je souhaite un devis ...");
    return Ok(());
}

#[test]
fn it_cycles_service_options() {
    assert_eq!(cycle_service("", true), "Marketing Digital");
    assert_eq!(cycle_service("", false), "Autre");
    assert_eq!(cycle_service("Autre", true), "");
    assert_eq!(cycle_service("Inconnu", true), "Marketing Digital");
}

#[test]
fn it_reads_null_names_and_emails_as_empty() -> Result<()> {
    let contacts: Vec<Contact> = serde_json::from_str(
        r#"[
            {"id": 1, "nom_complet": "A", "courriel": "a@x.com"},
            {"id": 2, "nom_complet": null, "courriel": null}
        ]"#,
    )?;

    assert_eq!(contacts.len(), 2);
    assert_eq!(contacts[1].nom_complet, "");
    assert_eq!(contacts[1].courriel, "");
    assert_eq!(contacts[1].initial(), "");
    assert_eq!(contacts[1].missing_required(), Some(ContactField::NomComplet));
    return Ok(());
}

#[test]
fn it_keeps_unknown_keys_through_an_edit() -> Result<()> {
    let original = contact(
        r#"{"id": 7, "nom_complet": "A", "courriel": "a@x.com", "entreprise": "Kody", "statut": "traite", "telephone": "+228 90"}"#,
    )?;
    let edited = original.with_field(ContactField::NomComplet, "B");

    assert_eq!(
        serde_json::to_value(&edited)?,
        serde_json::json!({
            "id": 7,
            "nom_complet": "B",
            "courriel": "a@x.com",
            "entreprise": "Kody",
            "statut": "traite",
            "telephone": "+228 90"
        })
    );
    return Ok(());
}
