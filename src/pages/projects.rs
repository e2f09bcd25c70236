//! Project cards

use macroquad::prelude::*;
use crate::ui::{
    chars_per_line, draw_rounded_rect, draw_wrapped, line_height, wrap_text, Rect, UiContext, ACCENT_ALT, ACCENT_COLOR,
    PANEL_BG, PANEL_BORDER, TEXT_COLOR, TEXT_DIM,
};
use super::{draw_heading, ScrollView};

#[derive(Debug, Clone, Copy)]
pub struct Project {
    pub title: &'static str,
    pub description: &'static str,
    pub tech: &'static [&'static str],
    pub features: &'static [&'static str],
    pub highlight: &'static str,
}

pub const PROJECTS: [Project; 4] = [
    Project {
        title: "AI Mock Interview Platform",
        description: "Intelligent interview preparation system with real-time feedback",
        tech: &["Express.js", "Gemini AI", "React.js", "MongoDB"],
        features: &[
            "AI-powered question generation based on job role",
            "Real-time speech recognition and analysis",
            "Performance scoring with detailed feedback",
            "Mock interview session recording and playback",
        ],
        highlight: "Leverages Google's Gemini AI for natural conversation flow",
    },
    Project {
        title: "Vehicle Auction & Bidding Platform",
        description: "Real-time bidding system for vehicle auctions",
        tech: &["NestJS", "Node.js", "Next.js", "PostgreSQL", "Prisma ORM", "Firebase"],
        features: &[
            "Live bidding with WebSocket real-time updates",
            "Automated auction scheduling and notifications",
            "Image upload and management via Firebase Storage",
            "User authentication and role-based access",
            "Transaction history and invoice generation",
        ],
        highlight: "Handles concurrent bidding with optimistic locking",
    },
    Project {
        title: "SaaS Company Management System",
        description: "Enterprise-grade management platform with full deployment",
        tech: &["Next.js", "NestJS", "Supabase", "Ubuntu Server", "Monitoring Tools"],
        features: &[
            "Multi-tenant architecture with role hierarchies",
            "Real-time dashboard with analytics",
            "Automated deployment pipeline",
            "Server monitoring and health checks",
            "API rate limiting and security layers",
        ],
        highlight: "Production-ready with CI/CD and server monitoring",
    },
    Project {
        title: "User Vlogging System",
        description: "Video content management platform for creators",
        tech: &["NestJS", "Node.js", "Next.js", "PostgreSQL", "Prisma ORM"],
        features: &[
            "Video upload with compression and transcoding",
            "Social features: likes, comments, subscriptions",
            "Content recommendation algorithm",
            "Creator analytics dashboard",
            "Search and filtering system",
        ],
        highlight: "Optimized video delivery with CDN integration",
    },
];

const CARD_GAP: f32 = 24.0;
const CARD_PAD: f32 = 20.0;
const MIN_CARD_WIDTH: f32 = 380.0;
const BADGE_FONT: f32 = 13.0;
const BADGE_HEIGHT: f32 = 24.0;
const BODY_FONT: f32 = 15.0;

/// Number of card columns that fit in `width`
pub fn column_count(width: f32) -> usize {
    (((width + CARD_GAP) / (MIN_CARD_WIDTH + CARD_GAP)) as usize).clamp(1, 2)
}

/// Lay badges left to right, wrapping; returns each badge rect relative to (0, 0)
fn layout_badges(tech: &[&str], max_w: f32) -> Vec<Rect> {
    let mut rects = Vec::with_capacity(tech.len());
    let (mut x, mut y) = (0.0, 0.0);
    for t in tech {
        let w = measure_text(t, None, BADGE_FONT as u16, 1.0).width + 16.0;
        if x > 0.0 && x + w > max_w {
            x = 0.0;
            y += BADGE_HEIGHT + 6.0;
        }
        rects.push(Rect::new(x, y, w, BADGE_HEIGHT));
        x += w + 6.0;
    }
    rects
}

fn lines(text: &str, w: f32, font_size: f32) -> f32 {
    wrap_text(text, chars_per_line(w, font_size)).len() as f32 * line_height(font_size)
}

fn card_height(project: &Project, width: f32) -> f32 {
    let inner = width - CARD_PAD * 2.0;
    let badges = layout_badges(project.tech, inner);
    let badges_h = badges.last().map_or(0.0, |r| r.bottom());
    let features_h: f32 = project.features.iter().map(|f| lines(f, inner - 18.0, BODY_FONT)).sum();
    let highlight_h = lines(&highlight_text(project), inner - 24.0, BODY_FONT) + 24.0;

    CARD_PAD + 30.0 + lines(project.description, inner, BODY_FONT) + 10.0 + badges_h + 16.0 + features_h + 12.0
        + highlight_h + CARD_PAD
}

fn highlight_text(project: &Project) -> String {
    format!("Key Innovation: {}", project.highlight)
}

fn draw_card(project: &Project, rect: Rect) {
    draw_rounded_rect(rect.x, rect.y, rect.w, rect.h, 8.0, PANEL_BG);
    draw_rectangle_lines(rect.x, rect.y, rect.w, rect.h, 1.0, PANEL_BORDER);
    draw_rectangle(rect.x, rect.y, 3.0, rect.h, ACCENT_COLOR);

    let x = rect.x + CARD_PAD;
    let inner = rect.w - CARD_PAD * 2.0;
    let mut y = rect.y + CARD_PAD + 20.0;

    draw_text(project.title, x, y, 22.0, TEXT_COLOR);
    y = draw_wrapped(project.description, x, y + 10.0 + BODY_FONT, inner, BODY_FONT, TEXT_DIM) - BODY_FONT + 10.0;

    let badges = layout_badges(project.tech, inner);
    for (t, b) in project.tech.iter().zip(&badges) {
        let br = Rect::new(x + b.x, y + b.y, b.w, b.h);
        draw_rounded_rect(br.x, br.y, br.w, br.h, 4.0, Color::new(ACCENT_COLOR.r, ACCENT_COLOR.g, ACCENT_COLOR.b, 0.3));
        draw_text(t, br.x + 8.0, br.y + 16.0, BADGE_FONT, TEXT_COLOR);
    }
    y += badges.last().map_or(0.0, |r| r.bottom()) + 16.0;

    for feature in project.features {
        draw_text(">", x, y + BODY_FONT, BODY_FONT, ACCENT_ALT);
        y = draw_wrapped(feature, x + 18.0, y + BODY_FONT, inner - 18.0, BODY_FONT, TEXT_COLOR) - BODY_FONT;
    }
    y += 12.0;

    let text = highlight_text(project);
    let box_h = lines(&text, inner - 24.0, BODY_FONT) + 24.0;
    draw_rounded_rect(x, y, inner, box_h, 6.0, Color::new(ACCENT_ALT.r, ACCENT_ALT.g, ACCENT_ALT.b, 0.15));
    draw_rectangle(x, y, 3.0, box_h, ACCENT_ALT);
    draw_wrapped(&text, x + 12.0, y + 12.0 + BODY_FONT, inner - 24.0, BODY_FONT, TEXT_COLOR);
}

#[derive(Default)]
pub struct ProjectsPage {
    scroll: ScrollView,
}

impl ProjectsPage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn draw(&mut self, ctx: &mut UiContext, rect: Rect) {
        let area = rect.pad(24.0);
        let columns = column_count(area.w);
        let card_w = (area.w - CARD_GAP * (columns as f32 - 1.0)) / columns as f32;

        // Row heights follow the tallest card in the row
        let row_heights: Vec<f32> = PROJECTS
            .chunks(columns)
            .map(|row| row.iter().map(|p| card_height(p, card_w)).fold(0.0, f32::max))
            .collect();
        let heading_h = 76.0;
        let content_h = heading_h + row_heights.iter().map(|h| h + CARD_GAP).sum::<f32>() + 48.0;
        self.scroll.handle(ctx, rect, content_h);

        let mut y = draw_heading("My Projects", area, area.y - self.scroll.offset);
        for (row, h) in PROJECTS.chunks(columns).zip(&row_heights) {
            for (i, project) in row.iter().enumerate() {
                let x = area.x + i as f32 * (card_w + CARD_GAP);
                let card = Rect::new(x, y, card_w, *h);
                if card.bottom() >= rect.y && card.y <= rect.bottom() {
                    draw_card(project, card);
                }
            }
            y += h + CARD_GAP;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_projects() {
        assert_eq!(PROJECTS.len(), 4);
        assert_eq!(PROJECTS[0].title, "AI Mock Interview Platform");
        assert_eq!(PROJECTS[1].tech.len(), 6);
        assert!(PROJECTS.iter().all(|p| !p.features.is_empty() && !p.highlight.is_empty()));
    }

    #[test]
    fn test_column_count() {
        assert_eq!(column_count(300.0), 1);
        assert_eq!(column_count(700.0), 1);
        assert_eq!(column_count(784.0), 2);
        assert_eq!(column_count(3000.0), 2);
    }
}
