use anyhow::Result;
use mockito::Matcher;
use serde_json::json;
use test_utils::contacts_fixture;

use super::MekodyApi;
use crate::domain::models::ApiError;
use crate::domain::models::Contact;
use crate::domain::models::ContactDraft;
use crate::domain::models::ContactField;
use crate::domain::models::ContactId;
use crate::domain::models::ContactsApi;
use crate::domain::models::LoginCredentials;

fn credentials() -> LoginCredentials {
    return LoginCredentials {
        courriel: "admin@mekody.com".to_string(),
        mot_de_passe: "secret".to_string(),
    };
}

#[tokio::test]
async fn it_logs_in() -> Result<()> {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/api/mekody/login")
        .match_body(Matcher::Json(json!({
            "courriel": "admin@mekody.com",
            "mot_de_passe": "secret"
        })))
        .with_status(200)
        .with_body(r#"{"success": true}"#)
        .create_async()
        .await;

    let api = MekodyApi::new(&server.url());
    api.login(&credentials()).await?;

    mock.assert_async().await;
    return Ok(());
}

#[tokio::test]
async fn it_keeps_the_server_message_on_rejection() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/api/mekody/login")
        .with_status(401)
        .with_body(r#"{"message": "Identifiants invalides"}"#)
        .create_async()
        .await;

    let api = MekodyApi::new(&server.url());
    let res = api.login(&credentials()).await;

    assert_eq!(
        res,
        Err(ApiError::Rejected {
            status: 401,
            message: Some("Identifiants invalides".to_string()),
        })
    );
    mock.assert_async().await;
}

#[tokio::test]
async fn it_tolerates_rejections_without_a_json_body() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("DELETE", "/api/contact/contact_mekody/1")
        .with_status(500)
        .with_body("Internal Server Error")
        .create_async()
        .await;

    let api = MekodyApi::new(&server.url());
    let res = api.delete_contact(&ContactId::new(json!(1))).await;

    assert_eq!(
        res,
        Err(ApiError::Rejected {
            status: 500,
            message: None,
        })
    );
    mock.assert_async().await;
}

#[tokio::test]
async fn it_lists_contacts() -> Result<()> {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/api/contact/contact_mekody")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(contacts_fixture())
        .create_async()
        .await;

    let api = MekodyApi::new(&server.url());
    let contacts = api.list_contacts().await?;

    assert_eq!(contacts.len(), 3);
    assert_eq!(contacts[0].nom_complet, "Awa Diallo");
    assert_eq!(contacts[2].entreprise, None);
    mock.assert_async().await;
    return Ok(());
}

#[tokio::test]
async fn it_treats_undecodable_lists_as_network_errors() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/api/contact/contact_mekody")
        .with_status(200)
        .with_body("<html></html>")
        .create_async()
        .await;

    let api = MekodyApi::new(&server.url());
    let res = api.list_contacts().await;

    assert!(matches!(res, Err(ApiError::Network(_))));
    mock.assert_async().await;
}

#[tokio::test]
async fn it_creates_contacts_with_every_key() -> Result<()> {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/api/contact/contact_mekody")
        .match_body(Matcher::Json(json!({
            "nom_complet": "Awa",
            "courriel": "awa@x.com",
            "entreprise": "",
            "service_interesse": "Formation",
            "message": ""
        })))
        .with_status(201)
        .create_async()
        .await;

    let draft = ContactDraft::default()
        .with_field(ContactField::NomComplet, "Awa")
        .with_field(ContactField::Courriel, "awa@x.com")
        .with_field(ContactField::ServiceInteresse, "Formation");

    let api = MekodyApi::new(&server.url());
    api.create_contact(&draft).await?;

    mock.assert_async().await;
    return Ok(());
}

#[tokio::test]
async fn it_puts_the_whole_record_under_its_id() -> Result<()> {
    let contacts: Vec<Contact> = serde_json::from_str(contacts_fixture())?;
    let contact = contacts[1].with_field(ContactField::Message, "Rappel");

    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("PUT", "/api/contact/contact_mekody/65a1f0c2e4b0a1b2c3d4e5f6")
        .match_body(Matcher::Json(json!({
            "id": "65a1f0c2e4b0a1b2c3d4e5f6",
            "nom_complet": "Kodjo Mensah",
            "courriel": "kodjo@kody.tg",
            "entreprise": "Kody SARL",
            "service_interesse": "Développement Web",
            "message": "Rappel",
            "date_creation": "2024-12-15T09:30:00.000Z"
        })))
        .with_status(200)
        .create_async()
        .await;

    let api = MekodyApi::new(&server.url());
    api.update_contact(&contact.id, &contact).await?;

    mock.assert_async().await;
    return Ok(());
}

#[tokio::test]
async fn it_puts_back_keys_it_does_not_edit() -> Result<()> {
    let contact: Contact = serde_json::from_str(
        r#"{"id": 7, "nom_complet": "A", "courriel": "a@x.com", "statut": "traite", "telephone": "+228 90"}"#,
    )?;
    let contact = contact.with_field(ContactField::Entreprise, "Kody");

    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("PUT", "/api/contact/contact_mekody/7")
        .match_body(Matcher::Json(json!({
            "id": 7,
            "nom_complet": "A",
            "courriel": "a@x.com",
            "entreprise": "Kody",
            "statut": "traite",
            "telephone": "+228 90"
        })))
        .with_status(200)
        .create_async()
        .await;

    let api = MekodyApi::new(&server.url());
    api.update_contact(&contact.id, &contact).await?;

    mock.assert_async().await;
    return Ok(());
}

#[tokio::test]
async fn it_deletes_by_id() -> Result<()> {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("DELETE", "/api/contact/contact_mekody/3")
        .with_status(204)
        .create_async()
        .await;

    let api = MekodyApi::new(&format!("{}/", server.url()));
    api.delete_contact(&ContactId::new(json!(3))).await?;

    mock.assert_async().await;
    return Ok(());
}

#[tokio::test]
async fn it_reports_unreachable_servers_as_network_errors() {
    let api = MekodyApi::new("http://127.0.0.1:1");
    let res = api.list_contacts().await;

    match res {
        Err(err) => assert!(err.is_network()),
        Ok(_) => panic!("expected a network error"),
    }
}
