//! UI rendering for the wizard.

use crate::app::App;
use curso_content::{decode_data_uri, source_host};
use curso_core::{ChartDataPoint, QuizQuestion};
use curso_wizard::{CourseViewer, RichLine, ViewerTab, WizardStep, render_rich_text};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{
        Bar, BarChart, BarGroup, Block, Borders, Clear, List, ListItem, ListState, Paragraph,
        Tabs, Wrap,
    },
};

const TABS: [ViewerTab; 3] = [ViewerTab::Content, ViewerTab::Data, ViewerTab::Quiz];

const BAR_SCALE: f64 = 1000.0;

fn accent() -> Style {
    Style::default()
        .fg(Color::Magenta)
        .add_modifier(Modifier::BOLD)
}

fn dim() -> Style {
    Style::default().fg(Color::DarkGray)
}

/// Draw the main UI.
#[tracing::instrument(skip_all)]
pub fn draw(f: &mut Frame, app: &App) {
    let sources = visible_sources(app);
    let footer_height = if sources.is_empty() { 0 } else { 3 };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),             // Header
            Constraint::Min(0),                // Main content
            Constraint::Length(footer_height), // Sources
            Constraint::Length(3),             // Status bar
        ])
        .split(f.area());

    draw_header(f, app, chunks[0]);

    match app.wizard.step() {
        WizardStep::Input => draw_input_view(f, app, chunks[1]),
        WizardStep::Pillars => draw_pillars_view(f, app, chunks[1]),
        WizardStep::Variations => draw_variations_view(f, app, chunks[1]),
        WizardStep::Course => draw_course_view(f, app, chunks[1]),
    }

    if !sources.is_empty() {
        draw_sources(f, &sources, chunks[2]);
    }
    draw_status_bar(f, app, chunks[3]);

    if app.wizard.is_loading() {
        draw_loading_overlay(f, app);
    }
    if let Some(alert) = &app.alert {
        draw_alert(f, alert);
    }
}

fn visible_sources(app: &App) -> Vec<String> {
    let sources = match &app.viewer {
        Some(viewer) => viewer.course().sources(),
        None => app.wizard.sources(),
    };
    sources
        .iter()
        .map(|url| source_host(url).unwrap_or_else(|| url.clone()))
        .collect()
}

/// Draw the header.
#[tracing::instrument(skip_all)]
fn draw_header(f: &mut Frame, app: &App, area: Rect) {
    let title = match (app.wizard.step(), &app.viewer) {
        (WizardStep::Course, Some(viewer)) => viewer.course().title().clone(),
        (WizardStep::Input, _) => "CursoAPP".to_string(),
        _ => format!("CursoAPP - {}", app.wizard.topic()),
    };
    let header = Paragraph::new(title)
        .block(Block::default().borders(Borders::ALL))
        .style(accent())
        .alignment(Alignment::Center);
    f.render_widget(header, area);
}

/// Draw the status bar with help text.
#[tracing::instrument(skip_all)]
fn draw_status_bar(f: &mut Frame, app: &App, area: Rect) {
    let help_text = if app.wizard.is_loading() {
        "Esc: Cancelar | Ctrl+C: Salir"
    } else {
        match app.wizard.step() {
            WizardStep::Input => "Enter: Generar pilares | Esc: Salir",
            WizardStep::Pillars | WizardStep::Variations => {
                "↑↓: Navegar | Enter: Elegir | Esc: Volver | N: Nuevo tema | Q: Salir"
            }
            WizardStep::Course => match app.viewer.as_ref().map(|v| *v.active_tab()) {
                Some(ViewerTab::Content) => {
                    "Tab: Pestaña | ↑↓: Módulo | 1-9: Responder repaso | I: Imagen | Esc: Volver a variaciones"
                }
                Some(ViewerTab::Quiz) => {
                    "Tab: Pestaña | ↑↓: Pregunta | 1-9: Responder | Enter: Ver Resultados | R: Reintentar"
                }
                _ => "Tab: Pestaña | Esc: Volver a variaciones | N: Nuevo tema | Q: Salir",
            },
        }
    };

    let status_text = format!("{} | {}", app.status_message, help_text);
    let status = Paragraph::new(status_text)
        .block(Block::default().borders(Borders::ALL))
        .style(Style::default().fg(Color::Gray));
    f.render_widget(status, area);
}

fn draw_sources(f: &mut Frame, hosts: &[String], area: Rect) {
    let mut spans = vec![Span::styled("Fuentes: ", Style::default().add_modifier(Modifier::BOLD))];
    for (i, host) in hosts.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(" · ", dim()));
        }
        spans.push(Span::styled(host.clone(), Style::default().fg(Color::Blue)));
    }
    let footer = Paragraph::new(Line::from(spans))
        .block(Block::default().borders(Borders::ALL))
        .wrap(Wrap { trim: true });
    f.render_widget(footer, area);
}

/// Draw the topic entry.
#[tracing::instrument(skip_all)]
fn draw_input_view(f: &mut Frame, app: &App, area: Rect) {
    let area = centered_rect(70, 60, area);
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(2),
            Constraint::Min(0),
        ])
        .split(area);

    let intro = Paragraph::new(
        "Tu coach inteligente para transformar una idea simple en una estrategia de formación completa.",
    )
    .alignment(Alignment::Center)
    .wrap(Wrap { trim: true });
    f.render_widget(intro, chunks[0]);

    let input = if app.input.is_empty() {
        Line::from(Span::styled(
            "Ej: Marketing Digital, Cocina Vegana, Liderazgo...",
            dim(),
        ))
    } else {
        Line::from(vec![Span::raw(app.input.clone()), Span::styled("▏", accent())])
    };
    let input = Paragraph::new(input).block(
        Block::default()
            .borders(Borders::ALL)
            .title("¿Sobre qué quieres enseñar?"),
    );
    f.render_widget(input, chunks[1]);

    let footer = Paragraph::new(Span::styled("Powered by Gemini & Google Search", dim()))
        .alignment(Alignment::Center);
    f.render_widget(footer, chunks[2]);
}

fn choice_list<'a>(items: Vec<ListItem<'a>>, title: String) -> List<'a> {
    List::new(items)
        .block(Block::default().borders(Borders::ALL).title(title))
        .highlight_style(
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ")
}

fn two_line_item<'a>(index: usize, title: &str, detail: &str) -> ListItem<'a> {
    ListItem::new(Text::from(vec![
        Line::from(vec![
            Span::styled(format!("{:>2}. ", index + 1), dim()),
            Span::styled(title.to_string(), Style::default().add_modifier(Modifier::BOLD)),
        ]),
        Line::from(Span::styled(format!("    {}", detail), dim())),
    ]))
}

/// Draw the pillar choice.
#[tracing::instrument(skip_all)]
fn draw_pillars_view(f: &mut Frame, app: &App, area: Rect) {
    let items: Vec<ListItem> = app
        .wizard
        .pillars()
        .iter()
        .enumerate()
        .map(|(i, p)| two_line_item(i, p.title(), p.description()))
        .collect();
    let title = format!("Pilares temáticos para \"{}\"", app.wizard.topic());
    let mut state = ListState::default().with_selected(Some(app.pillar_index));
    f.render_stateful_widget(choice_list(items, title), area, &mut state);
}

/// Draw the variation choice.
#[tracing::instrument(skip_all)]
fn draw_variations_view(f: &mut Frame, app: &App, area: Rect) {
    let items: Vec<ListItem> = app
        .wizard
        .variations()
        .iter()
        .enumerate()
        .map(|(i, v)| two_line_item(i, v.title(), v.focus()))
        .collect();
    let pillar = app
        .wizard
        .selected_pillar()
        .as_ref()
        .map(|p| p.title().as_str())
        .unwrap_or_default();
    let title = format!("Lecciones para el pilar \"{}\"", pillar);
    let mut state = ListState::default().with_selected(Some(app.variation_index));
    f.render_stateful_widget(choice_list(items, title), area, &mut state);
}

/// Draw the finished course.
#[tracing::instrument(skip_all)]
fn draw_course_view(f: &mut Frame, app: &App, area: Rect) {
    let Some(viewer) = &app.viewer else {
        return;
    };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Min(0),
        ])
        .split(area);

    let subtitle = Paragraph::new(Span::styled(viewer.course().subtitle().clone(), dim()))
        .alignment(Alignment::Center);
    f.render_widget(subtitle, chunks[0]);

    let tabs = Tabs::new(TABS.iter().map(|t| t.to_string()))
        .select(viewer.active_tab().index())
        .block(Block::default().borders(Borders::ALL))
        .highlight_style(accent().add_modifier(Modifier::UNDERLINED));
    f.render_widget(tabs, chunks[1]);

    match viewer.active_tab() {
        ViewerTab::Content => draw_content_tab(f, viewer, chunks[2]),
        ViewerTab::Data => draw_data_tab(f, viewer, chunks[2]),
        ViewerTab::Quiz => draw_quiz_tab(f, viewer, app.quiz_cursor, chunks[2]),
    }
}

fn styled_lines(lines: Vec<RichLine>) -> Vec<Line<'static>> {
    lines
        .into_iter()
        .map(|segments| {
            Line::from(
                segments
                    .into_iter()
                    .map(|s| {
                        if s.bold {
                            Span::styled(s.text, Style::default().add_modifier(Modifier::BOLD))
                        } else {
                            Span::raw(s.text)
                        }
                    })
                    .collect::<Vec<_>>(),
            )
        })
        .collect()
}

fn draw_content_tab(f: &mut Frame, viewer: &CourseViewer, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(28), Constraint::Percentage(72)])
        .split(area);

    let items: Vec<ListItem> = viewer
        .course()
        .modules()
        .iter()
        .enumerate()
        .map(|(i, m)| ListItem::new(format!("{}. {}", i + 1, m.title())))
        .collect();
    let mut state = ListState::default().with_selected(Some(*viewer.active_module()));
    f.render_stateful_widget(
        choice_list(items, "Estructura del Curso".to_string()),
        chunks[0],
        &mut state,
    );

    let Some(module) = viewer.current_module() else {
        return;
    };
    let index = *viewer.active_module();

    let mut lines = vec![Line::from(Span::styled(module.title().clone(), accent()))];
    let image_line = match viewer.module_images().get(index).cloned().flatten() {
        Some(uri) => {
            let size = decode_data_uri(&uri).map(|img| img.bytes.len()).unwrap_or(0);
            format!("Imagen: {} ({} KB)", module.image_keyword(), size / 1024)
        }
        None => format!("Imagen: {} (pulsa I para generarla)", module.image_keyword()),
    };
    lines.push(Line::from(Span::styled(image_line, dim())));
    lines.push(Line::default());
    lines.extend(styled_lines(render_rich_text(module.content())));

    if !module.key_points().is_empty() {
        lines.push(Line::default());
        lines.push(Line::from(Span::styled(
            "Puntos clave",
            Style::default().add_modifier(Modifier::BOLD),
        )));
        for point in module.key_points() {
            lines.push(Line::from(format!("  • {}", point)));
        }
    }

    if let Some(mini) = module.mini_quiz() {
        let result = viewer.mini_quiz_results().get(index).copied().flatten();
        lines.push(Line::default());
        lines.push(Line::from(Span::styled(
            format!("Repaso: {}", mini.question().question()),
            Style::default().add_modifier(Modifier::BOLD),
        )));
        for (i, option) in mini.question().options().iter().enumerate() {
            let style = match result {
                Some(_) if mini.question().correct_answer_index().get() == i => {
                    Style::default().fg(Color::Green)
                }
                Some(r) if r.chosen().get() == i => Style::default().fg(Color::Red),
                _ => Style::default(),
            };
            lines.push(Line::from(Span::styled(format!("  {}) {}", i + 1, option), style)));
        }
        if let Some(r) = result {
            let verdict = if *r.correct() { "¡Correcto!" } else { "No es correcto." };
            lines.push(Line::from(Span::styled(verdict, accent())));
            if let Some(explanation) = mini.explanation() {
                lines.push(Line::from(explanation.clone()));
            }
        }
    }

    let body = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL))
        .wrap(Wrap { trim: false });
    f.render_widget(body, chunks[1]);
}

/// Bar heights on a common scale, the largest value mapping to `BAR_SCALE`.
///
/// Negative values draw as empty bars; their labels still show the real number.
fn bar_values(points: &[ChartDataPoint]) -> Vec<u64> {
    let max = points
        .iter()
        .map(|p| p.value().abs())
        .fold(0.0_f64, f64::max);
    points
        .iter()
        .map(|p| {
            if max > 0.0 {
                (p.value().max(0.0) / max * BAR_SCALE).round() as u64
            } else {
                0
            }
        })
        .collect()
}

fn draw_data_tab(f: &mut Frame, viewer: &CourseViewer, area: Rect) {
    let course = viewer.course();
    let title = if course.chart_title().trim().is_empty() {
        "Datos Relevantes".to_string()
    } else {
        course.chart_title().clone()
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(area);

    let colors = [Color::Magenta, Color::Cyan, Color::Yellow, Color::Green, Color::Blue];
    let heights = bar_values(course.chart_data());
    let bars: Vec<Bar> = course
        .chart_data()
        .iter()
        .zip(heights)
        .enumerate()
        .map(|(i, (point, height))| {
            Bar::default()
                .value(height)
                .text_value(format!("{}", point.value()))
                .label(Line::from(point.label().clone()))
                .style(Style::default().fg(colors[i % colors.len()]))
        })
        .collect();

    let chart = BarChart::default()
        .block(Block::default().borders(Borders::ALL).title(title))
        .bar_width(9)
        .bar_gap(2)
        .data(BarGroup::default().bars(&bars));
    f.render_widget(chart, chunks[0]);

    let caption = Paragraph::new(Span::styled(
        "Fuente: Datos agregados vía Google Search",
        dim(),
    ))
    .alignment(Alignment::Center);
    f.render_widget(caption, chunks[1]);
}

fn question_lines(
    number: usize,
    question: &QuizQuestion,
    answer: Option<usize>,
    revealed: bool,
    focused: bool,
) -> Vec<Line<'static>> {
    let heading = Style::default().add_modifier(Modifier::BOLD);
    let heading = if focused { heading.fg(Color::Cyan) } else { heading };
    let mut lines = vec![Line::from(Span::styled(
        format!("{}{}. {}", if focused { "> " } else { "  " }, number, question.question()),
        heading,
    ))];

    let correct = question.correct_answer_index().get();
    for (i, option) in question.options().iter().enumerate() {
        let selected = answer == Some(i);
        let (marker, style) = if revealed {
            if i == correct {
                ("✓", Style::default().fg(Color::Green).add_modifier(Modifier::BOLD))
            } else if selected {
                ("✗", Style::default().fg(Color::Red))
            } else {
                (" ", dim())
            }
        } else if selected {
            ("•", Style::default().fg(Color::Cyan))
        } else {
            (" ", Style::default())
        };
        lines.push(Line::from(Span::styled(
            format!("    [{}] {}) {}", marker, i + 1, option),
            style,
        )));
    }
    lines.push(Line::default());
    lines
}

fn draw_quiz_tab(f: &mut Frame, viewer: &CourseViewer, cursor: usize, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(4)])
        .split(area);

    let mut lines = vec![
        Line::from(Span::styled("Pon a prueba tu conocimiento", accent())),
        Line::default(),
    ];
    for (i, (question, answer)) in viewer
        .course()
        .quiz()
        .iter()
        .zip(viewer.answers())
        .enumerate()
    {
        lines.extend(question_lines(
            i + 1,
            question,
            answer.map(|a| a.get()),
            *viewer.revealed(),
            i == cursor,
        ));
    }
    let questions = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL))
        .wrap(Wrap { trim: false });
    f.render_widget(questions, chunks[0]);

    let summary = if *viewer.revealed() {
        vec![
            Line::from(Span::styled(
                format!(
                    "Tu Puntuación: {} / {}",
                    viewer.score(),
                    viewer.course().quiz().len()
                ),
                accent(),
            )),
            Line::from(viewer.score_message()),
        ]
    } else if viewer.can_reveal() {
        vec![Line::from("Pulsa Enter para ver resultados")]
    } else {
        vec![Line::from(Span::styled(
            "Responde todas las preguntas para ver resultados",
            dim(),
        ))]
    };
    let summary = Paragraph::new(summary)
        .block(Block::default().borders(Borders::ALL))
        .alignment(Alignment::Center);
    f.render_widget(summary, chunks[1]);
}

/// Draw the blocking overlay shown while a request runs.
fn draw_loading_overlay(f: &mut Frame, app: &App) {
    let area = centered_rect(60, 30, f.area());
    let text = vec![
        Line::from(Span::styled("Trabajando en tu estrategia...", accent())),
        Line::default(),
        Line::from(app.wizard.step().loading_message()),
        Line::default(),
        Line::from(Span::styled("Esc: cancelar", dim())),
    ];
    let overlay = Paragraph::new(text)
        .block(Block::default().borders(Borders::ALL))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    f.render_widget(Clear, area);
    f.render_widget(overlay, area);
}

/// Draw a modal alert.
fn draw_alert(f: &mut Frame, message: &str) {
    let area = centered_rect(50, 25, f.area());
    let text = vec![
        Line::from(message.to_string()),
        Line::default(),
        Line::from(Span::styled("Pulsa cualquier tecla", dim())),
    ];
    let alert = Paragraph::new(text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Error")
                .border_style(Style::default().fg(Color::Red)),
        )
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    f.render_widget(Clear, area);
    f.render_widget(alert, area);
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}
