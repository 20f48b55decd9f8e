use chrono::NaiveDate;
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
use ratatui::widgets::Cell;
use ratatui::widgets::Padding;
use ratatui::widgets::Paragraph;
use ratatui::widgets::Row;
use ratatui::widgets::Table;
use ratatui::widgets::TableState;
use ratatui::Frame;

use super::ACCENT;
use super::MUTED;
use crate::domain::models::Contact;
use crate::domain::models::Loading;
use crate::domain::models::Operation;
use crate::domain::models::RequestStatus;
use crate::domain::services::AppState;
use crate::domain::services::Stats;

fn key_hint<'a>(key: &'a str, label: &'a str) -> Vec<Span<'a>> {
    return vec![
        Span::styled(key, Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)),
        Span::raw(" "),
        Span::raw(label),
        Span::raw("   "),
    ];
}

fn render_sidebar(frame: &mut Frame, rect: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .padding(Padding::new(1, 1, 1, 0));
    let inner = block.inner(rect);
    frame.render_widget(block, rect);

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![
            Constraint::Length(2),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(inner);

    frame.render_widget(
        Paragraph::new(Line::styled(
            "Mekody",
            Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
        )),
        layout[0],
    );
    frame.render_widget(
        Paragraph::new(Line::styled(
            "▸ Les demandes",
            Style::default().add_modifier(Modifier::REVERSED),
        )),
        layout[1],
    );
    frame.render_widget(Paragraph::new(Line::from(key_hint("l", "Déconnexion"))), layout[2]);
}

fn render_header(frame: &mut Frame, rect: Rect) {
    let layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(vec![Constraint::Min(0), Constraint::Length(36)])
        .split(rect);

    frame.render_widget(
        Paragraph::new(Line::styled(
            "Gestion des demandes",
            Style::default().add_modifier(Modifier::BOLD),
        ))
        .block(Block::default().padding(Padding::new(1, 0, 1, 0))),
        layout[0],
    );

    let mut hints = key_hint("n", "Nouveau Contact");
    hints.extend(key_hint("r", "Actualiser"));
    frame.render_widget(
        Paragraph::new(Line::from(hints))
            .alignment(Alignment::Right)
            .block(Block::default().padding(Padding::new(0, 0, 1, 0))),
        layout[1],
    );
}

fn render_stats(frame: &mut Frame, rect: Rect, stats: Stats) {
    let layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(vec![
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
        ])
        .split(rect);

    let cards = [
        (stats.total, "demande total"),
        (stats.today, "Aujourd'hui"),
        (stats.companies, "Entreprises"),
    ];

    for (idx, (value, label)) in cards.into_iter().enumerate() {
        frame.render_widget(
            Paragraph::new(vec![
                Line::styled(
                    value.to_string(),
                    Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
                ),
                Line::styled(label, Style::default().fg(MUTED)),
            ])
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .padding(Padding::new(1, 1, 0, 0)),
            ),
            layout[idx],
        );
    }
}

fn contact_row(contact: &Contact) -> Row {
    let avatar = Span::styled(
        format!(" {} ", contact.initial()),
        Style::default().fg(Color::Black).bg(ACCENT),
    );

    let entreprise = contact
        .entreprise
        .clone()
        .filter(|e| return !e.is_empty())
        .unwrap_or_else(|| return "-".to_string());
    let service = contact
        .service_interesse
        .clone()
        .filter(|s| return !s.is_empty())
        .unwrap_or_else(|| return "Non spécifié".to_string());

    return Row::new(vec![
        Cell::from(Line::from(vec![
            avatar,
            Span::raw(" "),
            Span::raw(contact.nom_complet.clone()),
        ])),
        Cell::from(contact.courriel.clone()),
        Cell::from(entreprise),
        Cell::from(service),
        Cell::from(contact.created_on_short()),
    ]);
}

fn render_table(frame: &mut Frame, app_state: &AppState, rect: Rect) {
    let header = Row::new(vec!["Nom complet", "Email", "Entreprise", "Service", "Date"])
        .style(Style::default().fg(MUTED).add_modifier(Modifier::BOLD))
        .bottom_margin(1);

    let rows = app_state
        .contacts
        .iter()
        .map(|contact| return contact_row(contact))
        .collect::<Vec<Row>>();

    let table = Table::new(
        rows,
        [
            Constraint::Percentage(26),
            Constraint::Percentage(26),
            Constraint::Percentage(18),
            Constraint::Percentage(18),
            Constraint::Length(10),
        ],
    )
    .header(header)
    .row_highlight_style(Style::default().add_modifier(Modifier::REVERSED))
    .highlight_symbol("▶ ");

    let mut state = TableState::default().with_selected(Some(app_state.selected));
    frame.render_stateful_widget(table, rect, &mut state);
}

fn render_empty(frame: &mut Frame, rect: Rect) {
    let mut action = key_hint("n", "Ajouter un contact");
    action.pop();

    frame.render_widget(
        Paragraph::new(vec![
            Line::raw(""),
            Line::styled(
                "Aucun contact trouvé",
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Line::styled(
                "Commencez par ajouter votre premier contact",
                Style::default().fg(MUTED),
            ),
            Line::raw(""),
            Line::from(action),
        ])
        .alignment(Alignment::Center),
        rect,
    );
}

fn render_contacts_card(frame: &mut Frame, app_state: &AppState, rect: Rect) {
    let mut footer = key_hint("↑↓", "Sélectionner");
    footer.extend(key_hint("Entrée", "Voir"));
    footer.extend(key_hint("e", "Modifier"));
    footer.extend(key_hint("d", "Supprimer"));
    footer.extend(key_hint("q", "Quitter"));

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .title(Line::styled(
            " Liste des demandes ",
            Style::default().add_modifier(Modifier::BOLD),
        ))
        .title_bottom(Line::from(footer))
        .padding(Padding::new(1, 1, 0, 0));
    let inner = block.inner(rect);
    frame.render_widget(block, rect);

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![Constraint::Length(1), Constraint::Length(1), Constraint::Min(0)])
        .split(inner);

    // Not wired to anything yet.
    frame.render_widget(
        Paragraph::new(Line::styled(
            "[ Rechercher... ]",
            Style::default().fg(MUTED),
        ))
        .alignment(Alignment::Right),
        layout[0],
    );

    // The previous list stays visible under a failed refresh.
    if let RequestStatus::Error(message) = app_state.requests.get(Operation::List) {
        frame.render_widget(
            Paragraph::new(Line::styled(message, Style::default().fg(Color::Red))),
            layout[1],
        );
    }

    if app_state.requests.is_pending(Operation::List) {
        Loading::new("Chargement des contacts...").render(frame, layout[2]);
    } else if app_state.contacts.is_empty() {
        render_empty(frame, layout[2]);
    } else {
        render_table(frame, app_state, layout[2]);
    }
}

pub fn render(frame: &mut Frame, app_state: &AppState, area: Rect, today: NaiveDate) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(vec![Constraint::Length(22), Constraint::Min(0)])
        .split(area);

    render_sidebar(frame, columns[0]);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![
            Constraint::Length(3),
            Constraint::Length(4),
            Constraint::Min(0),
        ])
        .split(columns[1]);

    render_header(frame, rows[0]);
    render_stats(frame, rows[1], Stats::from_contacts(&app_state.contacts, today));
    render_contacts_card(frame, app_state, rows[2]);
}
