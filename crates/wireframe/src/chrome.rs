//! Foreground chrome drawn over the wireframe: the section panel and the
//! clickable navigation bar.

use std::process::{Command, Stdio};

use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Clear, Paragraph},
};
use wireframe_config::{ChromeConfig, LinkConfig};
use wireframe_core::{Theme, Visibility};

/// Where an opened link should go.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkTarget {
    SameTab,
    NewTab,
}

/// What a navigation item does when clicked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationAction {
    ToggleVisibility,
    ToggleTheme,
    Open { url: String, target: LinkTarget },
}

/// A clickable entry of the navigation bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavItem {
    /// Keyboard shortcut shown next to the label.
    pub key: Option<char>,
    pub label: String,
    pub action: NavigationAction,
}

impl NavItem {
    fn spans(&self, accent: Color, muted: Color) -> Vec<Span<'static>> {
        match self.key {
            Some(key) => vec![
                key.to_string().bold().fg(accent),
                Span::styled(format!(" {}", self.label), Style::new().fg(muted)),
            ],
            None => vec![Span::styled(format!("↗ {}", self.label), Style::new().fg(accent))],
        }
    }

    fn width(&self) -> u16 {
        self.spans(Color::Reset, Color::Reset)
            .iter()
            .map(|span| span.width() as u16)
            .sum()
    }
}

impl From<&LinkConfig> for NavItem {
    fn from(link: &LinkConfig) -> Self {
        let target = if link.same_tab {
            LinkTarget::SameTab
        } else {
            LinkTarget::NewTab
        };
        Self {
            key: None,
            label: link.label.clone(),
            action: NavigationAction::Open {
                url: link.url.clone(),
                target,
            },
        }
    }
}

/// Colours for the chrome and canvas background.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub background: Color,
    pub text: Color,
    pub muted: Color,
}

impl Palette {
    pub fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Dark => Palette {
                background: Color::Rgb(18, 18, 18),
                text: Color::Rgb(230, 230, 230),
                muted: Color::DarkGray,
            },
            Theme::Light => Palette {
                background: Color::Rgb(244, 244, 240),
                text: Color::Rgb(28, 28, 28),
                muted: Color::Gray,
            },
        }
    }
}

const SEPARATOR: &str = "   ";

/// Shortcuts listed after the navigation items. Not clickable.
const KEY_HINTS: [(&str, &str); 3] = [("d", "debug"), ("a", "add"), ("q", "quit")];

/// Section panel and navigation bar state.
#[derive(Debug)]
pub struct Chrome {
    title: String,
    subtitle: String,
    theme: Theme,
    visibility: Visibility,
    items: Vec<NavItem>,
    /// Screen rectangles of `items` from the last render.
    hitboxes: Vec<Rect>,
}

impl Chrome {
    pub fn new(config: &ChromeConfig, theme: Theme) -> Self {
        let mut items = vec![
            NavItem {
                key: Some('t'),
                label: "theme".to_string(),
                action: NavigationAction::ToggleTheme,
            },
            NavItem {
                key: Some('v'),
                label: "section".to_string(),
                action: NavigationAction::ToggleVisibility,
            },
        ];
        items.extend(config.links.iter().map(NavItem::from));

        Self {
            title: config.title.clone(),
            subtitle: config.subtitle.clone(),
            theme,
            visibility: config.visibility,
            items,
            hitboxes: Vec::new(),
        }
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    pub fn items(&self) -> &[NavItem] {
        &self.items
    }

    pub fn palette(&self) -> Palette {
        Palette::for_theme(self.theme)
    }

    /// Flip the theme and return the new one.
    pub fn toggle_theme(&mut self) -> Theme {
        self.theme = self.theme.toggle();
        self.theme
    }

    pub fn toggle_visibility(&mut self) -> Visibility {
        self.visibility = self.visibility.toggle();
        self.visibility
    }

    /// The action of the navigation item under a terminal cell, if any.
    pub fn hit_test(&self, column: u16, row: u16) -> Option<NavigationAction> {
        let position = ratatui::layout::Position::new(column, row);
        self.hitboxes
            .iter()
            .position(|hitbox| hitbox.contains(position))
            .and_then(|index| self.items.get(index))
            .map(|item| item.action.clone())
    }

    /// Draw the section panel (when visible) and the navigation bar.
    pub fn render(&mut self, frame: &mut Frame, accent: Color, point_count: usize) {
        let area = frame.area();
        let palette = self.palette();

        let [_, nav] = Layout::vertical([Constraint::Fill(1), Constraint::Length(1)]).areas(area);

        if self.visibility.is_visible() {
            self.render_section(frame, area, palette, accent, point_count);
        }
        self.render_nav(frame, nav, palette, accent);
    }

    fn render_section(&self, frame: &mut Frame, area: Rect, palette: Palette, accent: Color, point_count: usize) {
        let status = format!("{point_count} points");
        let content_width = [self.title.len(), self.subtitle.len(), status.len()]
            .into_iter()
            .max()
            .unwrap_or(0) as u16;

        let [_, row, _] = Layout::vertical([
            Constraint::Fill(1),
            Constraint::Length(5),
            Constraint::Fill(1),
        ])
        .areas(area);
        let [_, panel, _] = Layout::horizontal([
            Constraint::Fill(1),
            Constraint::Length(content_width + 4),
            Constraint::Fill(1),
        ])
        .areas(row);

        let lines = vec![
            Line::from(self.title.clone().bold().fg(accent)).centered(),
            Line::from(Span::styled(self.subtitle.clone(), Style::new().fg(palette.text))).centered(),
            Line::from(Span::styled(status, Style::new().fg(palette.muted))).centered(),
        ];

        frame.render_widget(Clear, panel);
        frame.render_widget(
            Paragraph::new(lines).block(
                Block::bordered()
                    .border_style(Style::new().fg(palette.muted))
                    .style(Style::new().bg(palette.background)),
            ),
            panel,
        );
    }

    fn render_nav(&mut self, frame: &mut Frame, nav: Rect, palette: Palette, accent: Color) {
        let separator_width = SEPARATOR.len() as u16;
        let hints: Vec<Span> = KEY_HINTS
            .iter()
            .flat_map(|(key, label)| {
                [
                    Span::raw(SEPARATOR),
                    key.bold().fg(accent),
                    Span::styled(format!(" {label}"), Style::new().fg(palette.muted)),
                ]
            })
            .collect();
        let hints_width: u16 = hints.iter().map(|span| span.width() as u16).sum();

        let items_width: u16 = self.items.iter().map(NavItem::width).sum::<u16>()
            + separator_width * self.items.len().saturating_sub(1) as u16;
        let total = items_width + hints_width;
        let start = nav.x + nav.width.saturating_sub(total) / 2;

        self.hitboxes.clear();
        let mut spans = Vec::new();
        let mut x = start;
        for (index, item) in self.items.iter().enumerate() {
            if index > 0 {
                spans.push(Span::raw(SEPARATOR));
                x = x.saturating_add(separator_width);
            }
            let width = item.width();
            self.hitboxes.push(Rect::new(x, nav.y, width, nav.height.min(1)).intersection(nav));
            spans.extend(item.spans(accent, palette.muted));
            x = x.saturating_add(width);
        }
        spans.extend(hints);

        let bar = Rect::new(start, nav.y, total.min(nav.width), nav.height);
        frame.render_widget(Line::from(spans), bar);
    }
}

/// Open `url` with the platform opener. Failures are logged, never fatal.
pub fn open_url(url: &str, target: LinkTarget) {
    let mut command = opener(url);
    command.stdin(Stdio::null()).stdout(Stdio::null()).stderr(Stdio::null());
    match command.spawn() {
        Ok(mut child) => {
            tracing::info!(url, ?target, "opened link");
            // reap the opener so it does not linger as a zombie
            std::thread::spawn(move || {
                let _ = child.wait();
            });
        }
        Err(err) => tracing::warn!(url, %err, "failed to open link"),
    }
}

#[cfg(target_os = "macos")]
fn opener(url: &str) -> Command {
    let mut command = Command::new("open");
    command.arg(url);
    command
}

#[cfg(target_os = "windows")]
fn opener(url: &str) -> Command {
    let mut command = Command::new("cmd");
    command.args(["/C", "start", "", url]);
    command
}

#[cfg(not(any(target_os = "macos", target_os = "windows")))]
fn opener(url: &str) -> Command {
    let mut command = Command::new("xdg-open");
    command.arg(url);
    command
}
