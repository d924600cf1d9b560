//! UI rendering module.
//!
//! All TUI rendering lives here: the view tabs, the relationship map canvas
//! with its node sidebar and registry overlay, the drive and inbox lists,
//! the log feed and the modal popups.
//!
//! The map canvas owns the conversion between terminal cells and the map's
//! screen units; the layout helpers at the bottom are shared with the mouse
//! handler so hit testing always agrees with what was drawn.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Margin, Rect},
    style::{Modifier, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::{
        canvas::{self, Canvas},
        Block, Borders, Clear, List, ListItem, Paragraph, Tabs, Wrap,
    },
    Frame,
};

use crate::app::{App, LogLevel, RegistryRow, View};
use crate::data::{self, DocKind, MailPriority};
use crate::map::{MapContext, MapState, SidebarSide, ViewMode};
use crate::models::{MapNode, NodeKind, ProjectStatus};
use crate::particles::BackdropWidget;
use crate::sidebar::{self, FileKind, UpdatePriority, WorkStatus};
use crate::theme::{colors, role_color, styles};

/// Screen units per terminal cell. Cells are roughly twice as tall as wide,
/// so the map keeps its aspect ratio on the braille canvas.
pub const CELL_WIDTH: f64 = 8.0;
pub const CELL_HEIGHT: f64 = 16.0;

/// Render the entire UI
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();

    // Fill background with theme color
    let bg_block = Block::default().style(Style::default().bg(colors::BG_DEEP));
    frame.render_widget(bg_block, area);
    frame.render_widget(BackdropWidget::new(&app.backdrop), area);

    let chunks = shell_chunks(area);
    render_tabs(frame, app, chunks[0]);
    match app.view {
        View::Projects => render_projects_view(frame, app, chunks[1]),
        View::Map => render_map_view(frame, app, chunks[1]),
        View::Drive => render_drive_view(frame, app, chunks[1]),
        View::Mail => render_mail_view(frame, app, chunks[1]),
    }
    render_logs(frame, app, chunks[2]);

    if app.registry.open {
        render_registry_overlay(frame, app, area);
    }
    if app.show_report {
        render_report_popup(frame, app, area);
    }
    if app.error_popup.is_some() {
        render_error_popup(frame, app, area);
    }
    if app.show_help {
        render_help_overlay(frame, area);
    }
}

/// Render the view tab bar
fn render_tabs(frame: &mut Frame, app: &App, area: Rect) {
    let titles: Vec<Line> = [View::Projects, View::Map, View::Drive, View::Mail]
        .iter()
        .map(|view| {
            let style = if *view == app.view {
                styles::tab_active()
            } else {
                styles::tab_inactive()
            };
            Line::from(Span::styled(format!(" {} ", view.name()), style))
        })
        .collect();

    let tabs = Tabs::new(titles)
        .block(
            Block::default()
                .title(" CaseMap Tactical Console ")
                .title_style(styles::title())
                .borders(Borders::ALL)
                .border_style(styles::border())
                .style(Style::default().bg(colors::BG_PANEL)),
        )
        .select(match app.view {
            View::Projects => 0,
            View::Map => 1,
            View::Drive => 2,
            View::Mail => 3,
        })
        .style(styles::text())
        .highlight_style(styles::tab_active())
        .divider(Span::styled(" | ", styles::border_dim()));

    frame.render_widget(tabs, area);
}

// ============================================
// Projects view
// ============================================

fn status_style(status: ProjectStatus) -> Style {
    match status {
        ProjectStatus::Active => styles::info(),
        ProjectStatus::OnHold => styles::warning(),
        ProjectStatus::Completed => styles::success(),
    }
}

fn progress_bar(progress: u16, width: usize) -> String {
    let filled = (progress as usize * width) / 100;
    format!(
        "[{}{}] {:>3}%",
        "█".repeat(filled),
        "░".repeat(width.saturating_sub(filled)),
        progress
    )
}

fn render_projects_view(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .title(" Engagement Book ")
        .title_style(styles::title_accent())
        .title_bottom(Line::from(Span::styled(
            " enter: open board  o: company overview ",
            styles::text_hint(),
        )))
        .borders(Borders::ALL)
        .border_style(styles::border())
        .style(Style::default().bg(colors::BG_PANEL));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let items: Vec<ListItem> = app
        .projects
        .iter()
        .enumerate()
        .map(|(i, project)| {
            let selected = i == app.project_cursor;
            let marker = if selected { "▸ " } else { "  " };
            let name_style = if selected {
                styles::title()
            } else {
                styles::text()
            };
            let header = Line::from(vec![
                Span::styled(marker, styles::tab_active()),
                Span::styled(format!("{:<22}", project.name), name_style),
                Span::styled(format!("{:<26}", project.location), styles::text_muted()),
                Span::styled(
                    format!("{:<12}", project.engagement.to_string()),
                    styles::info(),
                ),
                Span::styled(project.status.to_string(), status_style(project.status)),
            ]);
            let detail = Line::from(vec![
                Span::raw("    "),
                Span::styled(progress_bar(project.progress, 20), styles::text_muted()),
                Span::raw("  "),
                Span::styled(project.expertise.join(" · "), styles::text_hint()),
            ]);
            ListItem::new(vec![header, detail, Line::default()])
        })
        .collect();

    frame.render_widget(List::new(items), inner.inner(Margin::new(1, 1)));
}

// ============================================
// Map view
// ============================================

fn render_map_view(frame: &mut Frame, app: &App, area: Rect) {
    let sidebar = app
        .map
        .selected
        .is_some()
        .then_some(app.map.sidebar_side);
    let (canvas_area, sidebar_area) = map_chunks(area, sidebar);

    render_map_canvas(frame, app, canvas_area);
    if let Some(sidebar_area) = sidebar_area {
        render_node_sidebar(frame, app, sidebar_area);
    }
}

fn map_title(app: &App) -> String {
    let mode = match (&app.map.context, app.map.view_mode) {
        (MapContext::Company, _) => "COMPANY OPERATIONS",
        (_, ViewMode::Strategy) => "STRATEGY HUB",
        (_, ViewMode::Detail) if app.map.focused.is_some() => "FOCUSED CLUSTER",
        (_, ViewMode::Detail) => "DEEP DIVE",
    };
    match &app.map.snapshot.subtitle {
        Some(subtitle) => format!(" {} · {} — {} ", app.map.snapshot.label, subtitle, mode),
        None => format!(" {} — {} ", app.map.snapshot.label, mode),
    }
}

fn render_map_canvas(frame: &mut Frame, app: &App, area: Rect) {
    let hints = match app.map.view_mode {
        ViewMode::Strategy => " drag: pan  wheel: zoom  n/enter: select/open  r: bench  b: back ",
        ViewMode::Detail => " e: expand branch  n/enter: select/open  g: draft report  b: back ",
    };
    let border_style = if app.map.is_dragging() {
        styles::border_focused()
    } else {
        styles::border()
    };
    let block = Block::default()
        .title(map_title(app))
        .title_style(styles::title_accent())
        .title_bottom(Line::from(Span::styled(hints, styles::text_hint())))
        .borders(Borders::ALL)
        .border_style(border_style)
        .style(Style::default().bg(colors::BG_DEEP));
    let inner = block.inner(area);
    let (w, h) = canvas_size(inner);

    let canvas_widget = Canvas::default()
        .block(block)
        .x_bounds([0.0, w])
        .y_bounds([0.0, h])
        .marker(Marker::Braille)
        .paint(|ctx| paint_map(ctx, &app.map, (w, h)));
    frame.render_widget(canvas_widget, area);

    // Zoom readout in the bottom border
    let zoom = format!(" zoom {:.1}x ", app.map.transform.k);
    let x = area.x + area.width.saturating_sub(zoom.len() as u16 + 2);
    let y = area.y + area.height.saturating_sub(1);
    if area.height > 0 {
        frame
            .buffer_mut()
            .set_string(x, y, &zoom, styles::text_muted());
    }
}

fn paint_map(ctx: &mut canvas::Context, map: &MapState, size: (f64, f64)) {
    let (w, h) = size;
    let transform = map.transform;
    // Canvas y grows upward; the board grows downward
    let to_canvas = move |x: f64, y: f64| {
        let (sx, sy) = transform.apply(x, y);
        (sx, h - sy)
    };

    // Structural edges. Endpoints that do not resolve are skipped outright.
    for conn in &map.snapshot.connections {
        let (Some(a), Some(b)) = (map.snapshot.node(&conn.from), map.snapshot.node(&conn.to))
        else {
            continue;
        };
        if !map.is_visible(a) || !map.is_visible(b) {
            continue;
        }
        let dimmed = map.focused.as_deref().is_some_and(|f| !conn.touches(f));
        let color = if dimmed {
            colors::EDGE_DIMMED
        } else {
            colors::EDGE
        };
        let (x1, y1) = to_canvas(a.x, a.y);
        let (x2, y2) = to_canvas(b.x, b.y);
        ctx.draw(&canvas::Line { x1, y1, x2, y2, color });
    }

    // Allocation links: expert -> workstream, strategy boards only
    if map.view_mode == ViewMode::Strategy {
        for expert in map.snapshot.nodes.iter().filter(|n| n.is_expert()) {
            let Some(target) = expert
                .allocated_to
                .as_deref()
                .and_then(|id| map.snapshot.node(id))
            else {
                continue;
            };
            let (x1, y1) = to_canvas(expert.x, expert.y);
            let (x2, y2) = to_canvas(target.x, target.y);
            ctx.draw(&canvas::Line {
                x1,
                y1,
                x2,
                y2,
                color: colors::EDGE_ALLOCATION,
            });
        }
    }

    ctx.layer();

    for node in &map.snapshot.nodes {
        if !map.is_visible(node) {
            continue;
        }
        let (cx, cy) = to_canvas(node.x, node.y);
        if cx < -120.0 || cx > w + 120.0 || cy < -60.0 || cy > h + 60.0 {
            continue;
        }
        paint_node(ctx, map, node, (cx, cy));
    }
}

/// Print a label centered on a canvas x position
fn print_centered(ctx: &mut canvas::Context, cx: f64, cy: f64, text: String, style: Style) {
    let x = cx - text.chars().count() as f64 * CELL_WIDTH / 2.0;
    ctx.print(x, cy, Line::from(Span::styled(text, style)));
}

fn paint_node(ctx: &mut canvas::Context, map: &MapState, node: &MapNode, at: (f64, f64)) {
    let (cx, cy) = at;
    let k = map.transform.k;
    let dimmed = map.is_dimmed(node);
    let selected = map.selected.as_deref() == Some(node.id.as_str());

    let frame_color = |base| {
        if dimmed {
            colors::EDGE_DIMMED
        } else if selected {
            colors::SIGNAL_BLUE
        } else {
            base
        }
    };
    let label_style = if dimmed {
        styles::text_hint()
    } else if selected {
        styles::title().fg(colors::SIGNAL_BLUE)
    } else {
        styles::text()
    };

    match node.kind {
        NodeKind::Root => {
            let base = match map.view_mode {
                ViewMode::Strategy => colors::VERMILION,
                ViewMode::Detail => colors::SIGNAL_BLUE,
            };
            ctx.draw(&canvas::Rectangle {
                x: cx - 95.0 * k,
                y: cy - 32.0 * k,
                width: 190.0 * k,
                height: 64.0 * k,
                color: frame_color(base),
            });
            print_centered(ctx, cx, cy, node.label.to_uppercase(), label_style);
            if map.view_mode == ViewMode::Strategy
                && matches!(map.context, MapContext::Project { .. })
            {
                print_centered(
                    ctx,
                    cx,
                    cy - CELL_HEIGHT,
                    "enter to open anatomy".to_string(),
                    styles::text_hint(),
                );
            }
        }
        NodeKind::Category => {
            ctx.draw(&canvas::Rectangle {
                x: cx - 85.0 * k,
                y: cy - 26.0 * k,
                width: 170.0 * k,
                height: 52.0 * k,
                color: frame_color(colors::BORDER),
            });
            let mut label = node.label.clone();
            if map.view_mode == ViewMode::Detail && map.snapshot.has_children(&node.id) {
                label = format!(
                    "{} {}",
                    label,
                    if map.is_expanded(&node.id) { "▾" } else { "▸" }
                );
            }
            print_centered(ctx, cx, cy, label, label_style);
            if let Some(expert) = &node.assigned_expert {
                let style = if dimmed {
                    styles::text_hint()
                } else {
                    styles::success()
                };
                print_centered(
                    ctx,
                    cx,
                    cy - CELL_HEIGHT,
                    format!("◉ {} · {}", expert.name, expert.role),
                    style,
                );
            }
        }
        NodeKind::Project => {
            ctx.draw(&canvas::Rectangle {
                x: cx - 85.0 * k,
                y: cy - 26.0 * k,
                width: 170.0 * k,
                height: 52.0 * k,
                color: frame_color(colors::INDIGO),
            });
            print_centered(ctx, cx, cy, node.label.clone(), label_style);
            print_centered(
                ctx,
                cx,
                cy - CELL_HEIGHT,
                "enter to open".to_string(),
                styles::text_hint(),
            );
        }
        NodeKind::Expert => {
            let accent = node.role.map(role_color).unwrap_or(colors::FG_MUTED);
            ctx.draw(&canvas::Circle {
                x: cx,
                y: cy + 14.0 * k,
                radius: 18.0 * k,
                color: frame_color(accent),
            });
            let monogram = node.monogram.as_deref().unwrap_or("··");
            print_centered(
                ctx,
                cx,
                cy + 14.0 * k,
                monogram.to_string(),
                label_style,
            );
            print_centered(ctx, cx, cy - CELL_HEIGHT, node.label.clone(), label_style);
            if let Some(role) = node.role {
                let style = if dimmed {
                    styles::text_hint()
                } else {
                    Style::default().fg(accent)
                };
                print_centered(
                    ctx,
                    cx,
                    cy - 2.0 * CELL_HEIGHT,
                    role.to_string().to_uppercase(),
                    style,
                );
            }
        }
        NodeKind::Item => {
            print_centered(ctx, cx, cy, format!("• {}", node.label), label_style);
        }
        NodeKind::Warning => {
            let style = if dimmed {
                styles::text_hint()
            } else if selected {
                label_style
            } else {
                styles::warning()
            };
            print_centered(ctx, cx, cy, format!("⚠ {}", node.label), style);
        }
    }
}

// ============================================
// Node sidebar
// ============================================

fn render_node_sidebar(frame: &mut Frame, app: &App, area: Rect) {
    let Some(node) = app.map.selected_node() else {
        return;
    };
    let payload = sidebar::resolve(node, &app.map.snapshot);

    let title = match node.kind {
        NodeKind::Root => " Project Intelligence ",
        _ => " Node Detail ",
    };
    let block = Block::default()
        .title(title)
        .title_style(styles::title_accent())
        .title_bottom(Line::from(Span::styled(
            " esc: close  x: recall  g: draft ",
            styles::text_hint(),
        )))
        .borders(Borders::ALL)
        .border_style(styles::border_focused())
        .style(Style::default().bg(colors::BG_PANEL));
    let inner = block.inner(area);
    frame.render_widget(Clear, area);
    frame.render_widget(block, area);

    let mut lines: Vec<Line> = vec![
        Line::from(Span::styled(
            node.label.to_uppercase(),
            styles::title(),
        )),
    ];
    if let Some(expert) = &node.assigned_expert {
        lines.push(Line::from(vec![
            Span::styled(format!("◉ {} ", expert.name), styles::success()),
            Span::styled(expert.role.clone(), styles::text_muted()),
        ]));
    }
    if let Some(description) = &node.description {
        lines.push(Line::from(Span::styled(
            description.clone(),
            styles::text_muted(),
        )));
    }
    lines.push(Line::default());

    // Latest update card
    let update = &payload.latest_update;
    let priority = match update.priority {
        UpdatePriority::High => Span::styled(" HIGH ", styles::error()),
        UpdatePriority::Normal => Span::styled(" ", styles::text_hint()),
    };
    lines.push(Line::from(Span::styled(
        "LATEST UPDATE",
        styles::text_hint().add_modifier(Modifier::BOLD),
    )));
    lines.push(Line::from(vec![
        Span::styled(format!("[{}] ", update.monogram), styles::info()),
        Span::styled(update.from.clone(), styles::text()),
        Span::styled(format!("  {}", update.date), styles::text_hint()),
        priority,
    ]));
    lines.push(Line::from(Span::styled(
        update.subject.clone(),
        styles::title(),
    )));
    lines.push(Line::from(Span::styled(
        format!("\"{}\"", update.preview),
        styles::text_muted(),
    )));
    lines.push(Line::default());

    // Child workstream rollup, parents only
    if let Some(rollup) = &payload.child_rollup {
        lines.push(Line::from(Span::styled(
            "SUB-WORKSTREAMS",
            styles::text_hint().add_modifier(Modifier::BOLD),
        )));
        for child in rollup {
            let status_style = match child.status {
                WorkStatus::OnTrack => styles::success(),
                WorkStatus::Processing => styles::info(),
                WorkStatus::Flagged => styles::error(),
            };
            lines.push(Line::from(vec![
                Span::styled(format!("{:<18}", child.label), styles::text()),
                Span::styled(progress_bar(child.completion as u16, 10), styles::text_muted()),
                Span::raw(" "),
                Span::styled(child.status.label(), status_style),
            ]));
        }
        lines.push(Line::default());
    }

    // Attached documents
    lines.push(Line::from(Span::styled(
        "DOCUMENTS",
        styles::text_hint().add_modifier(Modifier::BOLD),
    )));
    for file in &payload.documents {
        let (icon, icon_style) = match file.kind {
            FileKind::Pdf => ("▙", styles::error()),
            FileKind::Xls => ("▦", styles::success()),
        };
        lines.push(Line::from(vec![
            Span::styled(format!("{icon} "), icon_style),
            Span::styled(file.name.clone(), styles::text()),
            Span::styled(format!("  {} · {}", file.size, file.date), styles::text_hint()),
        ]));
    }

    frame.render_widget(
        Paragraph::new(lines).wrap(Wrap { trim: false }),
        inner.inner(Margin::new(1, 1)),
    );
}

// ============================================
// Registry overlay
// ============================================

fn render_registry_overlay(frame: &mut Frame, app: &App, area: Rect) {
    let width = 46.min(area.width.saturating_sub(4));
    let height = (app.registry_rows().len() as u16 + 6).min(area.height.saturating_sub(4));
    let overlay = Rect::new(area.x + 2, area.y + 3, width, height);

    let block = Block::default()
        .title(" Expert Registry ")
        .title_style(styles::title_accent())
        .title_bottom(Line::from(Span::styled(
            " enter: field/fold  esc: close ",
            styles::text_hint(),
        )))
        .borders(Borders::ALL)
        .border_style(styles::border_focused())
        .style(styles::modal_content_bg());
    let inner = block.inner(overlay);
    frame.render_widget(Clear, overlay);
    frame.render_widget(block, overlay);

    let rows = app.registry_rows();
    let items: Vec<ListItem> = rows
        .iter()
        .enumerate()
        .map(|(i, row)| {
            let cursor = i == app.registry.cursor;
            let line = match row {
                RegistryRow::Role(role) => {
                    let chevron = if app.registry.expanded.contains(role) {
                        "▾"
                    } else {
                        "▸"
                    };
                    Line::from(Span::styled(
                        format!("{chevron} {}", role.registry_title()),
                        if cursor {
                            styles::title().fg(role_color(*role))
                        } else {
                            Style::default()
                                .fg(role_color(*role))
                                .add_modifier(Modifier::BOLD)
                        },
                    ))
                }
                RegistryRow::Member(index) => {
                    let profile = &app.expert_pool[*index];
                    let fielded = app.map.board_has(profile.name);
                    let base = if fielded {
                        styles::text_hint()
                    } else if cursor {
                        styles::selected()
                    } else {
                        styles::text()
                    };
                    Line::from(vec![
                        Span::styled(format!("  [{}] ", profile.monogram), base),
                        Span::styled(format!("{:<18}", profile.name), base),
                        Span::styled(format!("{:>3}", profile.rating), styles::text_muted()),
                        Span::styled(
                            if fielded { "  fielded" } else { "" },
                            styles::text_hint(),
                        ),
                    ])
                }
            };
            ListItem::new(line)
        })
        .collect();

    frame.render_widget(List::new(items), inner.inner(Margin::new(1, 1)));
}

// ============================================
// Drive view
// ============================================

fn render_empty_state(frame: &mut Frame, area: Rect, title: &str, hint: &str) {
    let block = Block::default()
        .title(title.to_string())
        .title_style(styles::title_accent())
        .borders(Borders::ALL)
        .border_style(styles::border())
        .style(Style::default().bg(colors::BG_PANEL));
    let inner = block.inner(area);
    frame.render_widget(block, area);
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(hint.to_string(), styles::text_hint())))
            .alignment(Alignment::Center),
        inner.inner(Margin::new(2, 2)),
    );
}

fn render_drive_view(frame: &mut Frame, app: &App, area: Rect) {
    let Some(project) = app.active_project() else {
        render_empty_state(
            frame,
            area,
            " Document Drive ",
            "Open a project to browse its drive",
        );
        return;
    };

    let block = Block::default()
        .title(format!(" Document Drive — {} ", project.name))
        .title_style(styles::title_accent())
        .borders(Borders::ALL)
        .border_style(styles::border())
        .style(Style::default().bg(colors::BG_PANEL));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let entries = data::drive_entries(project.name);
    let items: Vec<ListItem> = entries
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            let selected = i == app.drive_cursor;
            let indent = "  ".repeat(entry.depth as usize);
            let (icon, icon_style) = match entry.kind {
                DocKind::Folder => ("▸", styles::warning()),
                DocKind::Pdf => ("▙", styles::error()),
                DocKind::Xls => ("▦", styles::success()),
                DocKind::Doc => ("▤", styles::info()),
                DocKind::Img => ("▨", styles::info()),
            };
            let name_style = if selected {
                styles::selected()
            } else if entry.kind == DocKind::Folder {
                styles::title()
            } else {
                styles::text()
            };
            ListItem::new(Line::from(vec![
                Span::raw(indent),
                Span::styled(format!("{icon} "), icon_style),
                Span::styled(format!("{:<40}", entry.name), name_style),
                Span::styled(format!("{:>8}  ", entry.size), styles::text_muted()),
                Span::styled(entry.date, styles::text_hint()),
            ]))
        })
        .collect();

    frame.render_widget(List::new(items), inner.inner(Margin::new(1, 1)));
}

// ============================================
// Mail view
// ============================================

fn render_mail_view(frame: &mut Frame, app: &App, area: Rect) {
    let Some(project) = app.active_project() else {
        render_empty_state(frame, area, " Inbox ", "Open a project to read its inbox");
        return;
    };

    let block = Block::default()
        .title(format!(" Inbox — {} ", project.name))
        .title_style(styles::title_accent())
        .borders(Borders::ALL)
        .border_style(styles::border())
        .style(Style::default().bg(colors::BG_PANEL));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let messages = data::inbox(project.name);
    let items: Vec<ListItem> = messages
        .iter()
        .enumerate()
        .map(|(i, mail)| {
            let selected = i == app.mail_cursor;
            let sender_style = if selected {
                styles::selected()
            } else if mail.unread {
                styles::title()
            } else {
                styles::text_muted()
            };
            let priority = match mail.priority {
                MailPriority::High => Span::styled("! ", styles::error()),
                MailPriority::Normal => Span::raw("  "),
            };
            let header = Line::from(vec![
                priority,
                Span::styled(format!("{:<18}", mail.from), sender_style),
                Span::styled(mail.subject.clone(), styles::text()),
                Span::styled(format!("  {}", mail.date), styles::text_hint()),
            ]);
            let preview = Line::from(vec![
                Span::raw("    "),
                Span::styled(mail.preview, styles::text_hint()),
            ]);
            ListItem::new(vec![header, preview])
        })
        .collect();

    frame.render_widget(List::new(items), inner.inner(Margin::new(1, 1)));
}

// ============================================
// Log feed
// ============================================

const SPINNER: [char; 4] = ['◐', '◓', '◑', '◒'];

fn render_logs(frame: &mut Frame, app: &App, area: Rect) {
    let spinner = if app.drafting {
        format!("{} ", SPINNER[(app.frame_count / 4) as usize % SPINNER.len()])
    } else {
        String::new()
    };
    let block = Block::default()
        .title(" Activity ")
        .title_style(styles::title())
        .title_bottom(Line::from(Span::styled(
            format!(" {spinner}{} ", app.status_text()),
            styles::text_muted(),
        )))
        .borders(Borders::ALL)
        .border_style(styles::border_dim())
        .style(Style::default().bg(colors::BG_PANEL));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let visible = inner.height as usize;
    let items: Vec<ListItem> = app
        .logs
        .iter()
        .rev()
        .take(visible.max(1))
        .rev()
        .map(|entry| {
            let (icon, style) = match entry.level {
                LogLevel::Info => ("·", styles::text_muted()),
                LogLevel::Success => ("✓", styles::success()),
                LogLevel::Warning => ("!", styles::warning()),
                LogLevel::Error => ("✗", styles::error()),
            };
            let elapsed = entry.timestamp.elapsed().as_secs();
            let age = if elapsed < 60 {
                format!("{elapsed:>3}s")
            } else {
                format!("{:>3}m", elapsed / 60)
            };
            ListItem::new(Line::from(vec![
                Span::styled(format!(" {icon} "), style),
                Span::styled(entry.message.clone(), style),
                Span::styled(format!("  {age}"), styles::text_hint()),
            ]))
        })
        .collect();

    frame.render_widget(List::new(items), inner);
}

// ============================================
// Popups
// ============================================

/// Centered rect sized as a percentage of the containing area
fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);
    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1]);
    horizontal[1]
}

fn render_report_popup(frame: &mut Frame, app: &App, area: Rect) {
    let Some(report) = &app.last_report else {
        return;
    };
    let popup = centered_rect(72, 80, area);
    let block = Block::default()
        .title(format!(" Draft — {} · {} ", report.subject, report.drafted_at))
        .title_style(styles::title_accent())
        .title_bottom(Line::from(Span::styled(
            " j/k: scroll  esc: close ",
            styles::text_hint(),
        )))
        .borders(Borders::ALL)
        .border_style(styles::border_focused())
        .style(styles::modal_content_bg());
    let inner = block.inner(popup);
    frame.render_widget(Clear, popup);
    frame.render_widget(block, popup);

    frame.render_widget(
        Paragraph::new(report.body.clone())
            .style(styles::text())
            .wrap(Wrap { trim: false })
            .scroll((app.report_scroll, 0)),
        inner.inner(Margin::new(1, 1)),
    );
}

fn render_error_popup(frame: &mut Frame, app: &App, area: Rect) {
    let Some(popup_state) = &app.error_popup else {
        return;
    };
    let popup = centered_rect(50, 30, area);
    let block = Block::default()
        .title(format!(" {} ", popup_state.title))
        .title_style(styles::error().add_modifier(Modifier::BOLD))
        .borders(Borders::ALL)
        .border_style(styles::error())
        .style(styles::modal_content_bg());
    let inner = block.inner(popup);
    frame.render_widget(Clear, popup);
    frame.render_widget(block, popup);

    let text = vec![
        Line::default(),
        Line::from(Span::styled(popup_state.message.clone(), styles::text())),
        Line::default(),
        Line::from(Span::styled("press esc to dismiss", styles::text_hint())),
    ];
    frame.render_widget(
        Paragraph::new(text)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
        inner,
    );
}

fn render_help_overlay(frame: &mut Frame, area: Rect) {
    let popup = centered_rect(56, 70, area);
    let block = Block::default()
        .title(" Help ")
        .title_style(styles::title_accent())
        .borders(Borders::ALL)
        .border_style(styles::border_focused())
        .style(styles::modal_content_bg());
    let inner = block.inner(popup);
    frame.render_widget(Clear, popup);
    frame.render_widget(block, popup);

    let entry = |keys: &'static str, what: &'static str| {
        Line::from(vec![
            Span::styled(format!("  {keys:<14}"), styles::info()),
            Span::styled(what, styles::text()),
        ])
    };
    let section = |label: &'static str| {
        Line::from(Span::styled(
            label,
            styles::title_accent(),
        ))
    };
    let text = vec![
        section("Global"),
        entry("tab / S-tab", "cycle views"),
        entry("?", "toggle this help"),
        entry("p", "toggle backdrop"),
        entry("q", "quit"),
        Line::default(),
        section("Projects"),
        entry("j/k, enter", "navigate, open strategy board"),
        entry("o", "company overview"),
        Line::default(),
        section("Map"),
        entry("drag / wheel", "pan / zoom"),
        entry("+/-", "zoom"),
        entry("h/j/k/l", "pan"),
        entry("n/N, enter", "cycle nodes, open"),
        entry("e / space", "expand or collapse a branch"),
        entry("r", "expert registry (strategy)"),
        entry("x", "recall selected expert"),
        entry("g", "draft a report"),
        entry("b / bksp", "back: focus, strategy, overview"),
    ];
    frame.render_widget(Paragraph::new(text), inner.inner(Margin::new(1, 1)));
}

// ============================================
// Shared layout, also used by the mouse handler
// ============================================

fn shell_chunks(area: Rect) -> std::rc::Rc<[Rect]> {
    Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),  // Tab bar
            Constraint::Min(10),    // Main content
            Constraint::Length(6),  // Log feed
        ])
        .split(area)
}

/// Split the map content area into canvas and (optionally) the node sidebar
fn map_chunks(content: Rect, sidebar: Option<SidebarSide>) -> (Rect, Option<Rect>) {
    match sidebar {
        None => (content, None),
        Some(SidebarSide::Right) => {
            let chunks = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Min(0), Constraint::Length(40)])
                .split(content);
            (chunks[0], Some(chunks[1]))
        }
        Some(SidebarSide::Left) => {
            let chunks = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Length(40), Constraint::Min(0)])
                .split(content);
            (chunks[1], Some(chunks[0]))
        }
    }
}

/// The map canvas drawing area (inside the border) for a given terminal size
pub fn map_canvas_area(area: Rect, sidebar: Option<SidebarSide>) -> Rect {
    let content = shell_chunks(area)[1];
    let (canvas_outer, _) = map_chunks(content, sidebar);
    canvas_outer.inner(Margin::new(1, 1))
}

/// Size of the canvas in screen units
pub fn canvas_size(inner: Rect) -> (f64, f64) {
    (
        inner.width as f64 * CELL_WIDTH,
        inner.height as f64 * CELL_HEIGHT,
    )
}

/// Terminal cell -> screen units, if the cell is on the canvas
pub fn cell_to_screen(inner: Rect, column: u16, row: u16) -> Option<(f64, f64)> {
    if column < inner.x
        || column >= inner.x + inner.width
        || row < inner.y
        || row >= inner.y + inner.height
    {
        return None;
    }
    Some(cell_to_screen_unclamped(inner, column, row))
}

/// Terminal cell -> screen units without bounds checking, for drags that
/// stray off the canvas
pub fn cell_to_screen_unclamped(inner: Rect, column: u16, row: u16) -> (f64, f64) {
    (
        (column as f64 - inner.x as f64 + 0.5) * CELL_WIDTH,
        (row as f64 - inner.y as f64 + 0.5) * CELL_HEIGHT,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canvas_area_matches_between_layout_and_hit_testing() {
        let area = Rect::new(0, 0, 120, 40);
        let inner = map_canvas_area(area, None);
        // Inside the shell: below the tab bar, above the log feed, inside
        // the canvas border
        assert_eq!(inner.y, 4);
        assert_eq!(inner.height, 40 - 3 - 6 - 2);
        assert_eq!(inner.width, 120 - 2);

        let with_sidebar = map_canvas_area(area, Some(SidebarSide::Right));
        assert_eq!(with_sidebar.width, 120 - 40 - 2);
        let left_sidebar = map_canvas_area(area, Some(SidebarSide::Left));
        assert_eq!(left_sidebar.x, 41);
    }

    #[test]
    fn cell_conversion_round_trips_through_bounds() {
        let inner = Rect::new(1, 4, 100, 30);
        assert!(cell_to_screen(inner, 0, 10).is_none());
        assert!(cell_to_screen(inner, 50, 2).is_none());
        let (sx, sy) = cell_to_screen(inner, 1, 4).unwrap();
        assert!((sx - CELL_WIDTH / 2.0).abs() < 1e-9);
        assert!((sy - CELL_HEIGHT / 2.0).abs() < 1e-9);

        let (w, h) = canvas_size(inner);
        let (ex, ey) = cell_to_screen(inner, 100, 33).unwrap();
        assert!(ex < w && ey < h);
    }

    #[test]
    fn progress_bar_is_stable_at_the_extremes() {
        assert_eq!(progress_bar(0, 10), "[░░░░░░░░░░]   0%");
        assert_eq!(progress_bar(100, 10), "[██████████] 100%");
    }
}
