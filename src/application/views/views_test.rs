use std::time::Duration;

use anyhow::Result;
use chrono::NaiveDate;
use ratatui::backend::TestBackend;
use ratatui::Terminal;
use test_utils::contacts_fixture;
use tokio::sync::mpsc;

use super::render_at;
use crate::domain::models::Contact;
use crate::domain::models::CredentialField;
use crate::domain::models::Event;
use crate::domain::models::Operation;
use crate::domain::services::AppState;

fn app_state(authenticated: bool) -> AppState {
    let (event_tx, _event_rx) = mpsc::unbounded_channel::<Event>();
    return AppState::new(authenticated, Duration::from_secs(3), event_tx);
}

fn draw(app_state: &AppState) -> Result<String> {
    let today = NaiveDate::from_ymd_opt(2025, 1, 2).unwrap_or_default();
    let mut terminal = Terminal::new(TestBackend::new(120, 36))?;
    terminal.draw(|frame| {
        render_at(frame, app_state, today);
    })?;

    let buffer = terminal.backend().buffer();
    let lines = buffer
        .content
        .chunks(buffer.area.width as usize)
        .map(|row| {
            return row.iter().map(|cell| return cell.symbol()).collect::<String>();
        })
        .collect::<Vec<String>>();

    return Ok(lines.join("\n"));
}

#[test]
fn it_renders_the_login_view() -> Result<()> {
    let mut app_state = app_state(false);
    app_state.set_login_field(CredentialField::MotDePasse, "secret");

    let screen = draw(&app_state)?;

    assert!(screen.contains("Mekody Admin"));
    assert!(screen.contains("Interface d'administration des contacts"));
    assert!(screen.contains("[ Se connecter ]"));
    assert!(screen.contains("••••••"));
    assert!(!screen.contains("secret"));
    assert!(!screen.contains("Gestion des demandes"));
    return Ok(());
}

#[test]
fn it_renders_pending_logins() -> Result<()> {
    let mut app_state = app_state(false);
    app_state.requests.begin(Operation::Login);

    let screen = draw(&app_state)?;

    assert!(screen.contains("[ Connexion... ]"));
    return Ok(());
}

#[test]
fn it_renders_one_row_per_contact() -> Result<()> {
    let mut app_state = app_state(true);
    app_state.contacts =
        serde_json::from_str(r#"[{"id": 1, "nom_complet": "A", "courriel": "a@x.com"}]"#)?;

    let screen = draw(&app_state)?;

    assert!(screen.contains("Gestion des demandes"));
    assert!(screen.contains(" A  A "));
    assert!(screen.contains("a@x.com"));
    assert!(screen.contains("Non spécifié"));
    assert!(!screen.contains("Aucun contact trouvé"));
    return Ok(());
}

#[test]
fn it_renders_the_empty_state() -> Result<()> {
    let app_state = app_state(true);

    let screen = draw(&app_state)?;

    assert!(screen.contains("Aucun contact trouvé"));
    assert!(screen.contains("Commencez par ajouter votre premier contact"));
    return Ok(());
}

#[test]
fn it_renders_the_loading_state() -> Result<()> {
    let mut app_state = app_state(true);
    app_state.requests.begin(Operation::List);

    let screen = draw(&app_state)?;

    assert!(screen.contains("Chargement des contacts..."));
    assert!(!screen.contains("Aucun contact trouvé"));
    return Ok(());
}

#[test]
fn it_renders_stats_and_dates() -> Result<()> {
    let mut app_state = app_state(true);
    app_state.contacts = serde_json::from_str::<Vec<Contact>>(contacts_fixture())?;

    let screen = draw(&app_state)?;

    assert!(screen.contains("demande total"));
    assert!(screen.contains("Aujourd'hui"));
    assert!(screen.contains("Entreprises"));
    assert!(screen.contains("02/01/2025"));
    assert!(screen.contains("Kody SARL"));
    return Ok(());
}

#[test]
fn it_renders_contact_details() -> Result<()> {
    let mut app_state = app_state(true);
    app_state.contacts = serde_json::from_str::<Vec<Contact>>(contacts_fixture())?;
    app_state.selected = 2;
    app_state.open_view();

    let screen = draw(&app_state)?;

    assert!(screen.contains("Détails du contact"));
    assert!(screen.contains("fatou@x.com"));
    assert!(screen.contains("Aucun message"));
    assert!(screen.contains("Non spécifié"));
    return Ok(());
}

#[test]
fn it_renders_the_delete_confirmation() -> Result<()> {
    let mut app_state = app_state(true);
    app_state.contacts = serde_json::from_str::<Vec<Contact>>(contacts_fixture())?;
    app_state.request_delete();

    let screen = draw(&app_state)?;

    assert!(screen.contains("Êtes-vous sûr de vouloir supprimer ce contact ?"));
    assert!(screen.contains("Awa Diallo"));
    return Ok(());
}

#[test]
fn it_renders_the_add_form() -> Result<()> {
    let mut app_state = app_state(true);
    app_state.open_add();

    let screen = draw(&app_state)?;

    assert!(screen.contains("Ajouter un contact"));
    assert!(screen.contains("Nom complet *"));
    assert!(screen.contains("Sélectionnez un service"));
    assert!(screen.contains("Ajouter le contact"));
    return Ok(());
}

#[tokio::test]
async fn it_stacks_notifications_over_any_view() -> Result<()> {
    let mut app_state = app_state(false);
    app_state.notifications.success("Déconnexion réussie");
    app_state.notifications.error("Erreur de connexion");

    let screen = draw(&app_state)?;

    assert!(screen.contains("✓ Déconnexion réussie"));
    assert!(screen.contains("✕ Erreur de connexion"));
    return Ok(());
}

#[test]
fn it_keeps_the_list_under_a_failed_refresh() -> Result<()> {
    let mut app_state = app_state(true);
    app_state.contacts = serde_json::from_str::<Vec<Contact>>(contacts_fixture())?;
    app_state
        .requests
        .fail(Operation::List, "Erreur lors du chargement des contacts");

    let screen = draw(&app_state)?;

    assert!(screen.contains("Erreur lors du chargement des contacts"));
    assert!(screen.contains("awa@mekody.com"));
    return Ok(());
}
