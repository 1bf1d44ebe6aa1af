use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};
use tui_dispatch::{
    Component, DataResource, EventContext, EventKind, HandlerResponse, RenderContext,
};
use tui_dispatch_components::style::BorderStyle;
use tui_dispatch_components::{
    centered_rect, BaseStyle, Padding, SelectList, SelectListBehavior, SelectListProps,
    SelectListStyle, SelectionStyle, StatusBar, StatusBarHint, StatusBarItem, StatusBarProps,
    StatusBarSection, StatusBarStyle,
};

use pokedex_explorer::action::Action;
use pokedex_explorer::state::{
    AppState, FocusArea, PokemonDetails, PokemonProfile, PokemonStat,
};
use pokedex_explorer::store::MAX_SELECTED_TYPES;
use pokedex_explorer::type_style::{self, TypeStyle};

const BG_BASE: Color = Color::Rgb(12, 18, 28);
const BG_PANEL: Color = Color::Rgb(20, 32, 46);
const BG_PANEL_ALT: Color = Color::Rgb(26, 40, 58);
const BG_HIGHLIGHT: Color = Color::Rgb(28, 92, 110);
const TEXT_MAIN: Color = Color::Rgb(232, 242, 244);
const TEXT_DIM: Color = Color::Rgb(176, 195, 207);
const ACCENT_TEAL: Color = Color::Rgb(72, 204, 184);
const ACCENT_GOLD: Color = Color::Rgb(228, 176, 88);
const ACCENT_RED: Color = Color::Rgb(232, 96, 96);
const SPINNER: [&str; 4] = ["|", "/", "-", "\\"];

pub struct PokeUi {
    dex_list: SelectList,
    suggestion_list: SelectList,
    status_bar: StatusBar,
}

impl PokeUi {
    pub fn new() -> Self {
        Self {
            dex_list: SelectList::new(),
            suggestion_list: SelectList::new(),
            status_bar: StatusBar::new(),
        }
    }

    pub fn render(
        &mut self,
        frame: &mut Frame,
        area: Rect,
        state: &AppState,
        _render_ctx: RenderContext,
        event_ctx: &mut EventContext<crate::PokeComponentId>,
    ) {
        let base = Block::default().style(Style::default().bg(BG_BASE));
        frame.render_widget(base, area);
        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(4),
                Constraint::Min(10),
                Constraint::Length(3),
            ])
            .split(area);

        render_filter_bar(frame, layout[0], state, event_ctx);
        let body = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
            .split(layout[1]);
        render_list(frame, body[0], state, event_ctx, &mut self.dex_list);
        render_detail(frame, body[1], state, event_ctx);
        render_footer(frame, layout[2], state, &mut self.status_bar);

        if state.search.active {
            let modal_area = centered_rect(60, 12, area);
            event_ctx.set_component_area(crate::PokeComponentId::Search, modal_area);
            render_search(frame, modal_area, state, &mut self.suggestion_list);
        } else {
            event_ctx
                .component_areas
                .remove(&crate::PokeComponentId::Search);
        }
    }

    pub fn handle_filter_event(
        &mut self,
        event: &EventKind,
        _state: &AppState,
    ) -> HandlerResponse<Action> {
        let actions = match event {
            EventKind::Key(key) => match key.code {
                crossterm::event::KeyCode::Left | crossterm::event::KeyCode::Char('h') => {
                    vec![Action::FilterCursorMove(-1)]
                }
                crossterm::event::KeyCode::Right | crossterm::event::KeyCode::Char('l') => {
                    vec![Action::FilterCursorMove(1)]
                }
                crossterm::event::KeyCode::Enter | crossterm::event::KeyCode::Char(' ') => {
                    vec![Action::FilterToggleCursor]
                }
                _ => vec![],
            },
            EventKind::Scroll { delta, .. } => vec![Action::FilterCursorMove(*delta as i16)],
            _ => vec![],
        };
        handler_response(actions)
    }

    pub fn handle_list_event(
        &mut self,
        event: &EventKind,
        state: &AppState,
    ) -> HandlerResponse<Action> {
        let actions = match event {
            EventKind::Key(key) => match key.code {
                crossterm::event::KeyCode::Enter => vec![Action::DetailOpenSelected],
                crossterm::event::KeyCode::Char('g') => vec![Action::SelectionJumpTop],
                crossterm::event::KeyCode::Char('G') => vec![Action::SelectionJumpBottom],
                crossterm::event::KeyCode::Char('r') => vec![Action::PageFetchInitial],
                crossterm::event::KeyCode::Char('n') => vec![Action::PageFetchNext],
                _ => {
                    let items = dex_items(state);
                    let props = SelectListProps {
                        items: &items,
                        count: items.len(),
                        selected: state.selected_index.min(items.len().saturating_sub(1)),
                        is_focused: true,
                        style: dex_list_style(),
                        behavior: SelectListBehavior {
                            show_scrollbar: true,
                            wrap_navigation: false,
                        },
                        on_select: Action::DexSelect,
                        render_item: &|item| item.clone(),
                    };
                    let actions: Vec<_> = self
                        .dex_list
                        .handle_event(event, props)
                        .into_iter()
                        .collect();
                    return handler_response(actions);
                }
            },
            EventKind::Scroll { delta, .. } => vec![Action::SelectionMove((*delta * 3) as i16)],
            _ => vec![],
        };
        handler_response(actions)
    }

    pub fn handle_detail_event(
        &mut self,
        event: &EventKind,
        _state: &AppState,
    ) -> HandlerResponse<Action> {
        let actions = match event {
            EventKind::Key(key) => match key.code {
                crossterm::event::KeyCode::Esc | crossterm::event::KeyCode::Backspace => {
                    vec![Action::DetailClose]
                }
                _ => vec![],
            },
            _ => vec![],
        };
        handler_response(actions)
    }

    pub fn handle_search_event(
        &mut self,
        event: &EventKind,
        _state: &AppState,
    ) -> HandlerResponse<Action> {
        let actions = match event {
            EventKind::Key(key) => match key.code {
                crossterm::event::KeyCode::Esc => vec![Action::SearchCancel],
                crossterm::event::KeyCode::Enter => vec![Action::SearchSubmit],
                crossterm::event::KeyCode::Backspace => vec![Action::SearchBackspace],
                crossterm::event::KeyCode::Up => vec![Action::SearchSuggestionMove(-1)],
                crossterm::event::KeyCode::Down => vec![Action::SearchSuggestionMove(1)],
                crossterm::event::KeyCode::Char(ch) => vec![Action::SearchInput(ch)],
                _ => vec![],
            },
            EventKind::Scroll { delta, .. } => vec![Action::SearchSuggestionMove(*delta as i16)],
            _ => vec![],
        };
        handler_response(actions)
    }
}

fn handler_response(actions: Vec<Action>) -> HandlerResponse<Action> {
    if actions.is_empty() {
        HandlerResponse::ignored()
    } else {
        HandlerResponse {
            actions,
            consumed: true,
            needs_render: false,
        }
    }
}

fn render_filter_bar(
    frame: &mut Frame,
    area: Rect,
    state: &AppState,
    event_ctx: &mut EventContext<crate::PokeComponentId>,
) {
    event_ctx.set_component_area(crate::PokeComponentId::FilterBar, area);
    let cursor_visible = state.focus == FocusArea::FilterBar;
    let mut chips = Vec::new();
    for (index, style) in type_style::all().iter().enumerate() {
        let selected = state.dex.selected_types.iter().any(|tag| tag == style.tag);
        let mut chip = if selected {
            Style::default()
                .bg(style.color)
                .fg(BG_BASE)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(style.color)
        };
        if cursor_visible && index == state.type_cursor {
            chip = chip.add_modifier(Modifier::REVERSED | Modifier::UNDERLINED);
        }
        chips.push(Span::styled(format!(" {} {} ", style.glyph, style.tag), chip));
    }

    let title = if state.dex.selected_types.is_empty() {
        "TYPES: ALL".to_string()
    } else {
        format!(
            "TYPES {}/{MAX_SELECTED_TYPES}: {}",
            state.dex.selected_types.len(),
            state
                .dex
                .selected_types
                .iter()
                .map(|tag| tag.to_ascii_uppercase())
                .collect::<Vec<_>>()
                .join(" + ")
        )
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .style(Style::default().bg(BG_PANEL).fg(TEXT_MAIN))
        .border_style(focus_border(state, FocusArea::FilterBar))
        .title(title);
    let paragraph = Paragraph::new(Line::from(chips))
        .block(block)
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, area);
}

fn render_list(
    frame: &mut Frame,
    area: Rect,
    state: &AppState,
    event_ctx: &mut EventContext<crate::PokeComponentId>,
    dex_list: &mut SelectList,
) {
    event_ctx.set_component_area(crate::PokeComponentId::DexList, area);
    let block = Block::default()
        .borders(Borders::ALL)
        .title(list_title(state))
        .style(Style::default().bg(BG_PANEL).fg(TEXT_MAIN))
        .border_style(focus_border(state, FocusArea::DexList));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if state.dex.pokemon_list.is_empty() {
        let text = if state.dex.loading {
            format!("{} Loading...", spinner(state))
        } else {
            "Nothing to show.".to_string()
        };
        frame.render_widget(
            Paragraph::new(text).style(Style::default().fg(TEXT_DIM)),
            inner,
        );
        return;
    }

    let items = dex_items(state);
    let props = SelectListProps {
        items: &items,
        count: items.len(),
        selected: state.selected_index.min(items.len().saturating_sub(1)),
        is_focused: state.focus == FocusArea::DexList,
        style: dex_list_style(),
        behavior: SelectListBehavior {
            show_scrollbar: true,
            wrap_navigation: false,
        },
        on_select: Action::DexSelect,
        render_item: &|item| item.clone(),
    };
    dex_list.render(frame, inner, props);
}

fn list_title(state: &AppState) -> String {
    let shown = state.dex.pokemon_list.len();
    let mut title = if state.dex.selected_types.is_empty() {
        format!("DEX {shown}")
    } else {
        format!("DEX {shown}/{}", state.dex.filtered_pokemon.len())
    };
    if state.dex.loading || state.dex.is_loading_more {
        title.push(' ');
        title.push_str(spinner(state));
    }
    title
}

fn render_detail(
    frame: &mut Frame,
    area: Rect,
    state: &AppState,
    event_ctx: &mut EventContext<crate::PokeComponentId>,
) {
    event_ctx.set_component_area(crate::PokeComponentId::Detail, area);
    let accent = state
        .current_profile()
        .map(|profile| type_style::style_for(profile.details.primary_type()).accent[0]);
    let border = match accent {
        Some(color) if state.focus == FocusArea::Detail => Style::default()
            .fg(color)
            .add_modifier(Modifier::BOLD),
        _ => focus_border(state, FocusArea::Detail),
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .title("DATA")
        .style(Style::default().bg(BG_PANEL).fg(TEXT_MAIN))
        .border_style(border);

    let text = match state.detail.as_ref() {
        None => match state.selected_pokemon() {
            Some(details) => summary_text(details),
            None => Text::from("Select a Pokemon."),
        },
        Some(view) => match &view.profile {
            DataResource::Loaded(profile) => profile_text(profile),
            DataResource::Loading => Text::from(format!(
                "{} Loading {}...",
                spinner(state),
                format_name(&view.name)
            )),
            DataResource::Failed(error) => not_found_text(error),
            DataResource::Empty => Text::default(),
        },
    };
    frame.render_widget(
        Paragraph::new(text)
            .block(block)
            .wrap(Wrap { trim: true })
            .style(Style::default().bg(BG_PANEL_ALT).fg(TEXT_MAIN)),
        area,
    );
}

fn summary_text(details: &PokemonDetails) -> Text<'static> {
    let style = type_style::style_for(details.primary_type());
    let mut lines = vec![
        title_line(&details.name, details.id, style),
        type_line(&details.types),
        Line::from(format!(
            "Height: {:.1} m  Weight: {:.1} kg",
            f64::from(details.height) / 10.0,
            f64::from(details.weight) / 10.0
        )),
        Line::from(" "),
    ];
    lines.extend(details.stats.iter().map(|stat| Line::from(render_stat(stat))));
    lines.push(Line::from(" "));
    lines.push(Line::from(Span::styled(
        "Enter for the full profile",
        Style::default().fg(TEXT_DIM),
    )));
    Text::from(lines)
}

fn profile_text(profile: &PokemonProfile) -> Text<'static> {
    let details = &profile.details;
    let species = &profile.species;
    let style = type_style::style_for(details.primary_type());

    let mut lines = vec![title_line(&details.name, details.id, style)];
    if let Some(genus) = species.genus.as_ref() {
        lines.push(Line::from(Span::styled(
            genus.clone(),
            Style::default().fg(TEXT_DIM),
        )));
    }
    lines.push(type_line(&details.types));

    let mut facts = vec![Span::raw(format!(
        "Region: {}",
        profile
            .region
            .map(|region| region.label())
            .unwrap_or("Unknown")
    ))];
    if let Some(rarity) = species.rarity {
        facts.push(Span::raw("  "));
        facts.push(Span::styled(
            rarity.label().to_string(),
            Style::default()
                .fg(ACCENT_GOLD)
                .add_modifier(Modifier::BOLD),
        ));
    }
    lines.push(Line::from(facts));
    lines.push(Line::from(format!(
        "Height: {:.1} m  Weight: {:.1} kg  Base XP: {}",
        f64::from(details.height) / 10.0,
        f64::from(details.weight) / 10.0,
        details
            .base_experience
            .map(|xp| xp.to_string())
            .unwrap_or_else(|| "--".to_string())
    )));

    let abilities = details
        .abilities
        .iter()
        .map(|ability| {
            if ability.is_hidden {
                format!("{} (hidden)", format_name(&ability.name))
            } else {
                format_name(&ability.name)
            }
        })
        .collect::<Vec<_>>()
        .join(", ");
    lines.push(Line::from(format!("Abilities: {abilities}")));
    lines.push(Line::from(format!("Moves: {}", details.moves.len())));

    if let Some(flavor) = species.flavor_text.as_ref() {
        lines.push(Line::from(" "));
        lines.push(Line::from(Span::styled(
            flavor.clone(),
            Style::default().add_modifier(Modifier::ITALIC),
        )));
    }

    lines.push(Line::from(" "));
    lines.extend(details.stats.iter().map(|stat| Line::from(render_stat(stat))));

    if let Some(artwork) = details.sprites.artwork() {
        lines.push(Line::from(" "));
        lines.push(Line::from(Span::styled(
            format!("Artwork: {artwork}"),
            Style::default().fg(TEXT_DIM),
        )));
    }
    Text::from(lines)
}

fn not_found_text(error: &str) -> Text<'static> {
    Text::from(vec![
        Line::from(Span::styled(
            "Pokemon not found",
            Style::default().fg(ACCENT_RED).add_modifier(Modifier::BOLD),
        )),
        Line::from(error.to_string()),
        Line::from(" "),
        Line::from(Span::styled(
            "Esc to go back to the list",
            Style::default().fg(TEXT_DIM),
        )),
    ])
}

/// Name and number, colored across the type's gradient.
fn title_line(name: &str, id: u32, style: &TypeStyle) -> Line<'static> {
    let title = format!("{} {}  #{:04}", style.glyph, name.to_ascii_uppercase(), id);
    let chars: Vec<char> = title.chars().collect();
    let band = chars.len().div_ceil(style.gradient.len()).max(1);
    let spans = chars
        .chunks(band)
        .zip(style.gradient.iter())
        .map(|(chunk, color)| {
            Span::styled(
                chunk.iter().collect::<String>(),
                Style::default().fg(*color).add_modifier(Modifier::BOLD),
            )
        })
        .collect::<Vec<_>>();
    Line::from(spans)
}

fn type_line(types: &[String]) -> Line<'static> {
    let mut spans = vec![Span::raw("Type: ")];
    for (index, tag) in types.iter().enumerate() {
        if index > 0 {
            spans.push(Span::raw(" / "));
        }
        let style = type_style::style_for(tag);
        spans.push(Span::styled(
            format!("{} {}", style.glyph, tag),
            Style::default().fg(style.color).add_modifier(Modifier::BOLD),
        ));
    }
    Line::from(spans)
}

fn render_search(
    frame: &mut Frame,
    area: Rect,
    state: &AppState,
    suggestion_list: &mut SelectList,
) {
    frame.render_widget(Clear, area);
    let title = if state.search.query.is_empty() {
        "POPULAR"
    } else {
        "SUGGESTIONS"
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!("SEARCH /{}_", state.search.query))
        .style(Style::default().bg(BG_PANEL).fg(TEXT_MAIN))
        .border_style(Style::default().fg(ACCENT_TEAL));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(1)])
        .split(inner);
    let header = if state.name_index_loading && !state.search.query.is_empty() {
        format!("{title} (index loading...)")
    } else {
        title.to_string()
    };
    frame.render_widget(
        Paragraph::new(header).style(Style::default().fg(ACCENT_GOLD)),
        layout[0],
    );

    let items: Vec<Line<'static>> = state
        .suggestions()
        .into_iter()
        .map(|suggestion| match suggestion.dex_number {
            Some(number) => {
                Line::from(format!("#{number:04} {}", format_name(&suggestion.name)))
            }
            None => Line::from(format_name(&suggestion.name)),
        })
        .collect();
    if items.is_empty() {
        frame.render_widget(
            Paragraph::new("No matches found").style(Style::default().fg(TEXT_DIM)),
            layout[1],
        );
        return;
    }
    let props = SelectListProps {
        items: &items,
        count: items.len(),
        selected: state.search.selected.min(items.len().saturating_sub(1)),
        is_focused: true,
        style: dex_list_style(),
        behavior: SelectListBehavior {
            show_scrollbar: true,
            wrap_navigation: false,
        },
        on_select: Action::SearchSuggestionSelect,
        render_item: &|item| item.clone(),
    };
    suggestion_list.render(frame, layout[1], props);
}

fn render_footer(frame: &mut Frame, area: Rect, state: &AppState, status_bar: &mut StatusBar) {
    let status = state.message.clone().unwrap_or_else(|| {
        if state.dex.loading {
            "Loading pokedex...".to_string()
        } else if state.dex.is_loading_more {
            "Loading more...".to_string()
        } else if state
            .detail
            .as_ref()
            .is_some_and(|view| view.profile.is_loading())
        {
            "Loading profile...".to_string()
        } else if state.name_index_loading {
            "Loading search index...".to_string()
        } else {
            "".to_string()
        }
    });
    let left_hints = status_hints(state);
    let center_hints = vec![
        StatusBarHint::new("Tab", "Focus"),
        StatusBarHint::new("/", "Search"),
        StatusBarHint::new("c", "Clear types"),
        StatusBarHint::new("q", "Quit"),
    ];
    let status_span = Span::styled(status.as_str(), Style::default().fg(ACCENT_GOLD));
    let status_items = [StatusBarItem::span(status_span)];

    let style = StatusBarStyle {
        base: BaseStyle {
            border: Some(BorderStyle {
                borders: Borders::ALL,
                style: Style::default().fg(TEXT_DIM),
                focused_style: Some(Style::default().fg(ACCENT_TEAL)),
            }),
            padding: Padding::xy(1, 0),
            bg: Some(BG_PANEL),
            fg: Some(TEXT_MAIN),
        },
        text: Style::default().fg(TEXT_DIM),
        hint_key: Style::default()
            .fg(ACCENT_TEAL)
            .add_modifier(Modifier::BOLD),
        hint_label: Style::default().fg(TEXT_DIM),
        separator: Style::default().fg(TEXT_DIM),
    };

    let props = StatusBarProps {
        left: StatusBarSection::hints(&left_hints).with_separator("  "),
        center: StatusBarSection::hints(&center_hints).with_separator("  "),
        right: StatusBarSection::items(&status_items).with_separator("  "),
        style,
        is_focused: false,
    };
    Component::<Action>::render(status_bar, frame, area, props);
}

fn status_hints(state: &AppState) -> Vec<StatusBarHint<'static>> {
    if state.search.active {
        return vec![
            StatusBarHint::new("Enter", "Open"),
            StatusBarHint::new("Up/Down", "Pick"),
            StatusBarHint::new("Esc", "Cancel"),
        ];
    }
    match state.focus {
        FocusArea::FilterBar => vec![
            StatusBarHint::new("h/l", "Type"),
            StatusBarHint::new("Space", "Toggle"),
        ],
        FocusArea::DexList => vec![
            StatusBarHint::new("j/k", "Move"),
            StatusBarHint::new("Enter", "Profile"),
            StatusBarHint::new("r", "Reload"),
        ],
        FocusArea::Detail => vec![StatusBarHint::new("Esc", "Back")],
    }
}

fn dex_items(state: &AppState) -> Vec<Line<'static>> {
    state
        .dex
        .pokemon_list
        .iter()
        .map(|details| {
            let color = type_style::style_for(details.primary_type()).color;
            let region = details
                .region()
                .map(|region| region.label())
                .unwrap_or("Unknown");
            Line::from(vec![
                Span::raw(format!("#{:04} ", details.id)),
                Span::styled(
                    format!("{:<14}", format_name(&details.name)),
                    Style::default().fg(color),
                ),
                Span::styled(format!(" {region}"), Style::default().fg(TEXT_DIM)),
            ])
        })
        .collect()
}

fn dex_list_style() -> SelectListStyle {
    SelectListStyle {
        base: BaseStyle {
            border: None,
            padding: Padding::xy(1, 0),
            bg: None,
            fg: Some(TEXT_MAIN),
        },
        selection: SelectionStyle {
            style: Some(
                Style::default()
                    .bg(BG_HIGHLIGHT)
                    .fg(TEXT_MAIN)
                    .add_modifier(Modifier::BOLD),
            ),
            marker: None,
            disabled: false,
        },
        ..SelectListStyle::default()
    }
}

fn spinner(state: &AppState) -> &'static str {
    SPINNER[(state.tick % SPINNER.len() as u64) as usize]
}

fn format_name(name: &str) -> String {
    name.split('-')
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => format!("{}{}", first.to_ascii_uppercase(), chars.as_str()),
                None => "".to_string(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn render_stat(stat: &PokemonStat) -> String {
    let label = shorten_stat(&stat.name);
    let bar_len = (stat.base_value as usize / 10).clamp(1, 20);
    let bar = "#".repeat(bar_len);
    format!("{label:>4} {value:>3} {bar}", value = stat.base_value)
}

fn shorten_stat(name: &str) -> String {
    match name {
        "hp" => " HP".to_string(),
        "attack" => "ATK".to_string(),
        "defense" => "DEF".to_string(),
        "special-attack" => "SAT".to_string(),
        "special-defense" => "SDF".to_string(),
        "speed" => "SPD".to_string(),
        _ => name.to_ascii_uppercase(),
    }
}

fn focus_border(state: &AppState, area: FocusArea) -> Style {
    if state.focus == area {
        Style::default()
            .fg(ACCENT_TEAL)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(TEXT_DIM)
    }
}
