use ratatui::prelude::Alignment;
use ratatui::prelude::Constraint;
use ratatui::prelude::Direction;
use ratatui::prelude::Layout;
use ratatui::prelude::Rect;
use ratatui::style::Color;
use ratatui::style::Modifier;
use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::text::Span;
use ratatui::widgets::Block;
use ratatui::widgets::BorderType;
use ratatui::widgets::Borders;
use ratatui::widgets::Clear;
use ratatui::widgets::Padding;
use ratatui::widgets::Paragraph;
use ratatui::widgets::Wrap;
use ratatui::Frame;

use super::centered;
use super::field;
use super::ACCENT;
use super::MUTED;
use crate::domain::models::Contact;
use crate::domain::models::ContactField;
use crate::domain::models::Modal;
use crate::domain::models::Operation;
use crate::domain::services::AppState;

fn modal_block(title: &str) -> Block {
    return Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(ACCENT))
        .title(Line::styled(
            format!(" {title} "),
            Style::default().add_modifier(Modifier::BOLD),
        ))
        .padding(Padding::new(1, 1, 0, 0));
}

fn actions_line<'a>(cancel: &'a str, submit_key: &'a str, submit: &'a str) -> Line<'a> {
    let key = Style::default().fg(ACCENT).add_modifier(Modifier::BOLD);
    return Line::from(vec![
        Span::styled("Esc", key),
        Span::raw(format!(" {cancel}   ")),
        Span::styled(submit_key, key),
        Span::raw(format!(" {submit}")),
    ]);
}

fn field_height(field: ContactField) -> u16 {
    if field == ContactField::Message {
        return 5;
    }

    return 3;
}

fn placeholder(field: ContactField) -> &'static str {
    match field {
        ContactField::Message => return "Message du contact...",
        ContactField::ServiceInteresse => return "Sélectionnez un service",
        _ => return "",
    }
}

fn render_form(frame: &mut Frame, app_state: &AppState, area: Rect, editing: Option<&Contact>) {
    let mut title = "Ajouter un contact";
    let mut submit = "Ajouter le contact";
    let mut operation = Operation::Create;
    if editing.is_some() {
        title = "Modifier le contact";
        submit = "Enregistrer les modifications";
        operation = Operation::Update;
    }

    if app_state.requests.is_pending(operation) {
        submit = match operation {
            Operation::Update => "Enregistrement...",
            _ => "Ajout en cours...",
        };
    }

    let mut constraints = ContactField::ALL
        .iter()
        .map(|field| return Constraint::Length(field_height(*field)))
        .collect::<Vec<Constraint>>();
    constraints.push(Constraint::Length(1));
    constraints.push(Constraint::Length(1));

    let height = ContactField::ALL
        .iter()
        .map(|field| return field_height(*field))
        .sum::<u16>()
        + 4;

    let rect = centered(area, 64, height);
    let block = modal_block(title);
    let inner = block.inner(rect);
    frame.render_widget(Clear, rect);
    frame.render_widget(block, rect);

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(inner);

    let focused = app_state.contact_form.focused();
    for (idx, contact_field) in ContactField::ALL.into_iter().enumerate() {
        let value = match editing {
            Some(contact) => contact.field(contact_field).to_string(),
            None => app_state.draft.field(contact_field).to_string(),
        };

        if contact_field == ContactField::ServiceInteresse {
            let mut border = BorderType::Plain;
            let mut text = value.clone();
            if text.is_empty() {
                text = placeholder(contact_field).to_string();
            }
            if focused == contact_field {
                border = BorderType::Double;
                text = format!("‹ {text} ›");
            }

            frame.render_widget(
                Paragraph::new(text).block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_type(border)
                        .title(contact_field.label())
                        .padding(Padding::new(1, 1, 0, 0)),
                ),
                layout[idx],
            );
            continue;
        }

        if focused == contact_field {
            frame.render_widget(&app_state.contact_form.editor, layout[idx]);
            continue;
        }

        frame.render_widget(
            field(contact_field.label(), &value, placeholder(contact_field)),
            layout[idx],
        );
    }

    let hint_idx = ContactField::ALL.len();
    if let Some(hint) = &app_state.form_hint {
        frame.render_widget(
            Paragraph::new(Line::styled(hint.as_str(), Style::default().fg(Color::Red))),
            layout[hint_idx],
        );
    }

    frame.render_widget(
        Paragraph::new(actions_line("Annuler", "Ctrl+S", submit)).alignment(Alignment::Right),
        layout[hint_idx + 1],
    );
}

fn detail<'a>(label: &'a str, value: String) -> Vec<Line<'a>> {
    return vec![
        Line::styled(label, Style::default().fg(MUTED)),
        Line::raw(value),
        Line::raw(""),
    ];
}

fn or_unspecified(value: Option<&str>) -> String {
    return value
        .filter(|value| return !value.is_empty())
        .unwrap_or("Non spécifié")
        .to_string();
}

fn render_view(frame: &mut Frame, contact: &Contact, area: Rect) {
    let rect = centered(area, 64, 22);
    let block = modal_block("Détails du contact");
    frame.render_widget(Clear, rect);

    let mut lines = vec![
        Line::from(vec![
            Span::styled(
                format!(" {} ", contact.initial()),
                Style::default().fg(Color::Black).bg(ACCENT),
            ),
            Span::raw(" "),
            Span::styled(
                contact.nom_complet.as_str(),
                Style::default().add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::raw(contact.courriel.as_str()),
        Line::raw(""),
    ];
    lines.extend(detail("Entreprise", or_unspecified(contact.entreprise.as_deref())));
    lines.extend(detail(
        "Service intéressé",
        or_unspecified(contact.service_interesse.as_deref()),
    ));
    lines.extend(detail("Date de création", contact.created_on_long()));
    lines.push(Line::styled("Message", Style::default().fg(MUTED)));

    let message = contact
        .message
        .as_deref()
        .filter(|message| return !message.is_empty())
        .unwrap_or("Aucun message");
    lines.extend(message.split('\n').map(|line| return Line::raw(line)));

    let close = Line::from(vec![
        Span::styled(
            "Entrée",
            Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
        ),
        Span::raw(" Fermer "),
    ]);

    frame.render_widget(
        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .block(block.title_bottom(close.right_aligned())),
        rect,
    );
}

fn render_confirm_delete(frame: &mut Frame, contact: &Contact, area: Rect) {
    let rect = centered(area, 56, 7);
    let key = Style::default().fg(ACCENT).add_modifier(Modifier::BOLD);
    frame.render_widget(Clear, rect);

    frame.render_widget(
        Paragraph::new(vec![
            Line::raw(""),
            Line::raw("Êtes-vous sûr de vouloir supprimer ce contact ?"),
            Line::styled(
                contact.nom_complet.as_str(),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Line::raw(""),
            Line::from(vec![
                Span::styled("o", key),
                Span::raw(" Oui   "),
                Span::styled("n", key),
                Span::raw(" Non"),
            ]),
        ])
        .alignment(Alignment::Center)
        .block(modal_block("Supprimer le contact")),
        rect,
    );
}

pub fn render(frame: &mut Frame, app_state: &AppState, area: Rect) {
    match &app_state.modal {
        Some(Modal::Add) => {
            render_form(frame, app_state, area, None);
        }
        Some(Modal::Edit(contact)) => {
            render_form(frame, app_state, area, Some(contact));
        }
        Some(Modal::View(contact)) => {
            render_view(frame, contact, area);
        }
        Some(Modal::ConfirmDelete(contact)) => {
            render_confirm_delete(frame, contact, area);
        }
        None => (),
    }
}
