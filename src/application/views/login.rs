use ratatui::prelude::Alignment;
use ratatui::prelude::Constraint;
use ratatui::prelude::Direction;
use ratatui::prelude::Layout;
use ratatui::prelude::Rect;
use ratatui::style::Color;
use ratatui::style::Modifier;
use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::widgets::Block;
use ratatui::widgets::BorderType;
use ratatui::widgets::Borders;
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use super::centered;
use super::field;
use super::mask;
use super::ACCENT;
use super::MUTED;
use crate::domain::models::CredentialField;
use crate::domain::models::Operation;
use crate::domain::services::AppState;

fn placeholder(field: CredentialField) -> &'static str {
    match field {
        CredentialField::Courriel => return "votre@email.com",
        CredentialField::MotDePasse => return "Votre mot de passe",
    }
}

pub fn render(frame: &mut Frame, app_state: &AppState, area: Rect) {
    let card = centered(area, 52, 20);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(ACCENT));
    let inner = block.inner(card);
    frame.render_widget(block, card);

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints(vec![
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(inner);

    frame.render_widget(
        Paragraph::new(Line::styled(
            "Mekody Admin",
            Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
        ))
        .alignment(Alignment::Center),
        layout[0],
    );
    frame.render_widget(
        Paragraph::new("Interface d'administration des contacts").alignment(Alignment::Center),
        layout[1],
    );

    for (idx, credential_field) in CredentialField::ALL.into_iter().enumerate() {
        let rect = layout[3 + idx];
        if credential_field == app_state.login_form.focused() {
            frame.render_widget(&app_state.login_form.editor, rect);
            continue;
        }

        let mut value = app_state.credentials.field(credential_field).to_string();
        if credential_field == CredentialField::MotDePasse {
            value = mask(&value);
        }

        frame.render_widget(
            field(
                credential_field.label(),
                &value,
                placeholder(credential_field),
            ),
            rect,
        );
    }

    if let Some(hint) = &app_state.form_hint {
        frame.render_widget(
            Paragraph::new(Line::styled(hint.as_str(), Style::default().fg(Color::Red)))
                .alignment(Alignment::Center),
            layout[5],
        );
    }

    let mut button = "[ Se connecter ]";
    if app_state.requests.is_pending(Operation::Login) {
        button = "[ Connexion... ]";
    }
    frame.render_widget(
        Paragraph::new(Line::styled(
            button,
            Style::default().add_modifier(Modifier::BOLD),
        ))
        .alignment(Alignment::Center),
        layout[6],
    );

    frame.render_widget(
        Paragraph::new(Line::styled(
            "© 2025 Mekody - Tous droits réservés",
            Style::default().fg(MUTED),
        ))
        .alignment(Alignment::Center),
        layout[8],
    );
}
