//! Football, drifting and terminal sections
//!
//! Each section is a banner followed by a list of content blocks. Blocks are
//! laid out by one function that either measures or draws, so scroll height
//! always matches what ends up on screen.

use macroquad::prelude::*;
use crate::ui::{
    chars_per_line, draw_rounded_rect, line_height, wrap_text, Rect, UiContext, ACCENT_ALT, ACCENT_COLOR, PANEL_BG,
    PANEL_BORDER, TEXT_COLOR, TEXT_DIM,
};
use super::{draw_heading, ScrollView};

const TERMINAL_GREEN: Color = Color::new(0.0, 1.0, 0.25, 1.0);
const TERMINAL_BG: Color = Color::new(0.0, 0.02, 0.0, 1.0);

pub enum Block {
    Title(&'static str),
    Subtitle(&'static str),
    Paragraph(&'static str),
    /// Bold lead followed by its explanation
    Points(&'static [(&'static str, &'static str)]),
    Quote(&'static str),
    /// Label / value pairs
    Stats(&'static [(&'static str, &'static str)]),
    /// Prompt line, then output lines; the last line is highlighted
    Terminal(&'static str, &'static [&'static str]),
    /// Skill name and percentage
    Skills(&'static [(&'static str, u8)]),
    Bullets(&'static [&'static str]),
}

pub struct Banner {
    pub text: &'static str,
    pub caption: Option<&'static str>,
    pub from: Color,
    pub to: Color,
    pub text_color: Color,
}

pub struct Section {
    pub banner: Banner,
    pub blocks: &'static [Block],
}

pub const SECTIONS: [Section; 3] = [
    Section {
        banner: Banner {
            text: "MIDFIELD MAESTRO",
            caption: None,
            from: Color::new(0.10, 0.48, 0.54, 1.0),
            to: Color::new(0.42, 0.18, 0.62, 1.0),
            text_color: WHITE,
        },
        blocks: &[
            Block::Title("The Architect, Not The Finisher"),
            Block::Paragraph(
                "In football, I find my truest self in the midfield - not hunting glory in the spotlight, but \
                 orchestrating it from the shadows. While strikers chase headlines with goals, I chase perfection \
                 in the through-ball that splits the defense.",
            ),
            Block::Subtitle("My Playing Philosophy"),
            Block::Points(&[
                ("Vision Over Vanity:", "I see passes others do not, creating chances for glory"),
                ("Control the Tempo:", "The heartbeat of the team flows through my positioning"),
                ("Sacrifice for Success:", "Running miles to win the ball back"),
                ("The Real Skill Wears a Mask:", "Let them celebrate the goal - I know who created it"),
            ]),
            Block::Quote(
                "I want to be the one who creates heroes. The true skill lies in making others shine while \
                 mastering the art that no one sees.",
            ),
            Block::Stats(&[
                ("Favorite Position", "Central/Attacking Midfielder"),
                ("Play Style", "Playmaker / Deep-Lying Creator"),
                ("Inspiration", "Luka Modric, Kevin De Bruyne"),
            ]),
        ],
    },
    Section {
        banner: Banner {
            text: "TOKYO DRIFT",
            caption: None,
            from: Color::new(1.0, 0.27, 0.0, 1.0),
            to: Color::new(0.55, 0.23, 0.38, 1.0),
            text_color: WHITE,
        },
        blocks: &[
            Block::Title("Rear-Wheel Drive Philosophy"),
            Block::Paragraph(
                "There is something raw and honest about rear-wheel drive. No electronic nannies holding your hand. \
                 Just you, the throttle, and the physics of controlled chaos. Drifting is about mastering the edge \
                 where control meets surrender.",
            ),
            Block::Subtitle("Why Drifting Resonates"),
            Block::Points(&[
                (
                    "The Purist Choice",
                    "Rear-wheel drive demands skill. Every input matters. No hiding behind technology - just raw \
                     driver ability.",
                ),
                (
                    "Controlled Chaos",
                    "The beauty of a perfect drift: the car dancing on the edge of grip, yet completely under control.",
                ),
                (
                    "Tokyo Spirit",
                    "Inspired by the Tokyo drift scene - where mountain passes become canvases for tire smoke \
                     masterpieces.",
                ),
                (
                    "The Connection",
                    "The connection between man and machine. Feeling the weight transfer, anticipating traction, \
                     steering with throttle.",
                ),
            ]),
            Block::Quote(
                "In drifting, perfection is about dancing with chaos and making it look intentional. Every drift is \
                 a conversation between rubber and asphalt.",
            ),
            Block::Subtitle("Dream Machines"),
            Block::Points(&[
                ("Mazda RX-7 FD:", "Rotary soul, perfect balance"),
                ("Nissan Silvia S15:", "The drift king weapon"),
                ("Toyota AE86:", "Where the legend began"),
                ("BMW E46 M3:", "European precision with sideways attitude"),
            ]),
        ],
    },
    Section {
        banner: Banner {
            text: "sudo su",
            caption: Some("Access Granted"),
            from: BLACK,
            to: BLACK,
            text_color: TERMINAL_GREEN,
        },
        blocks: &[
            Block::Title("$ sudo su -"),
            Block::Subtitle("Living in the Terminal"),
            Block::Terminal(
                "ihsan@localhost:~$",
                &[
                    "> Initializing mindset...",
                    "> Loading curiosity.dll",
                    "> Mounting /dev/persistence",
                    "> System compromised. Access granted.",
                ],
            ),
            Block::Paragraph(
                "There is a unique thrill in understanding systems at their core. Hacking is about seeing beyond \
                 the interface, understanding the logic that powers digital life.",
            ),
            Block::Subtitle("The Hacker Mindset"),
            Block::Points(&[
                (
                    "Insatiable Curiosity",
                    "Every system is a puzzle. I dissect technology, understand it, and make it bend to my will.",
                ),
                (
                    "Security Obsession",
                    "I study vulnerabilities not to exploit, but to fortify. The best defense is understanding the \
                     offense.",
                ),
                (
                    "Terminal Mastery",
                    "The terminal is home. Bash scripts, Python automation - this is where real power lives.",
                ),
                (
                    "Problem Solver",
                    "Every bug is a challenge. I hunt errors down, dissect their causes, and emerge with solutions.",
                ),
            ]),
            Block::Subtitle("$ cat skills.txt"),
            Block::Skills(&[
                ("Network Penetration Testing", 80),
                ("Linux System Administration", 90),
                ("Python Automation & Scripting", 85),
                ("Cybersecurity Fundamentals", 75),
                ("Reverse Engineering", 60),
            ]),
            Block::Quote(
                "root@mindset:~# In the terminal, I am a conductor orchestrating digital symphonies. I speak the \
                 system language and make it dance.",
            ),
            Block::Subtitle("Current Focus Areas"),
            Block::Bullets(&[
                "OWASP Top 10 vulnerabilities and mitigation",
                "Container security and Docker hardening",
                "Web application penetration testing",
                "Wireless network security and packet analysis",
                "Ethical hacking certifications (CEH, OSCP track)",
            ]),
        ],
    },
];

const BANNER_HEIGHT: f32 = 160.0;
const SECTION_PAD: f32 = 28.0;
const SECTION_GAP: f32 = 40.0;
const BODY_FONT: f32 = 16.0;
const SKILL_CELLS: usize = 10;

/// Filled cells out of ten for a skill level
pub fn skill_cells(percent: u8) -> usize {
    (percent.min(100) as usize) / (100 / SKILL_CELLS)
}

fn draw_banner(banner: &Banner, rect: Rect) {
    // Left-to-right gradient in vertical strips
    let strips = 48;
    let strip_w = rect.w / strips as f32;
    for i in 0..strips {
        let t = i as f32 / (strips - 1) as f32;
        let c = Color::new(
            banner.from.r + (banner.to.r - banner.from.r) * t,
            banner.from.g + (banner.to.g - banner.from.g) * t,
            banner.from.b + (banner.to.b - banner.from.b) * t,
            1.0,
        );
        draw_rectangle(rect.x + i as f32 * strip_w, rect.y, strip_w + 1.0, rect.h, c);
    }

    let size = 44.0;
    let dims = measure_text(banner.text, None, size as u16, 1.0);
    let text_y = if banner.caption.is_some() { rect.y + rect.h * 0.42 } else { rect.center_y() + dims.height * 0.5 };
    draw_text(banner.text, rect.center_x() - dims.width * 0.5, text_y, size, banner.text_color);
    if let Some(caption) = banner.caption {
        let dims = measure_text(caption, None, 22, 1.0);
        draw_text(caption, rect.center_x() - dims.width * 0.5, rect.y + rect.h * 0.68, 22.0, banner.text_color);
    }
}

/// Draw `text` wrapped to `w` when `draw` is set; returns the y below it either way
fn text_block(text: &str, x: f32, y: f32, w: f32, font_size: f32, color: Color, draw: bool) -> f32 {
    let line_h = line_height(font_size);
    let mut y = y;
    for line in wrap_text(text, chars_per_line(w, font_size)) {
        if draw {
            draw_text(&line, x, y + font_size, font_size, color);
        }
        y += line_h;
    }
    y
}

/// Lay out one block at `y`, drawing it if `draw` is set; returns the y below it
fn layout_block(block: &Block, x: f32, y: f32, w: f32, draw: bool) -> f32 {
    match block {
        Block::Title(text) => text_block(text, x, y, w, 28.0, ACCENT_COLOR, draw) + 12.0,
        Block::Subtitle(text) => text_block(text, x, y + 8.0, w, 20.0, ACCENT_ALT, draw) + 8.0,
        Block::Paragraph(text) => text_block(text, x, y, w, BODY_FONT, TEXT_COLOR, draw) + 12.0,
        Block::Points(points) => {
            let mut y = y;
            for (lead, body) in points.iter() {
                y = text_block(lead, x + 14.0, y, w - 14.0, BODY_FONT, ACCENT_ALT, draw);
                y = text_block(body, x + 14.0, y, w - 14.0, BODY_FONT, TEXT_DIM, draw) + 8.0;
            }
            y + 4.0
        }
        Block::Quote(text) => {
            let inner_y = y + 14.0;
            let end = text_block(text, x + 20.0, inner_y, w - 40.0, BODY_FONT, TEXT_COLOR, false) + 14.0;
            if draw {
                draw_rounded_rect(x, y, w, end - y, 6.0, Color::new(ACCENT_COLOR.r, ACCENT_COLOR.g, ACCENT_COLOR.b, 0.15));
                draw_rectangle(x, y, 3.0, end - y, ACCENT_COLOR);
                text_block(text, x + 20.0, inner_y, w - 40.0, BODY_FONT, TEXT_COLOR, true);
            }
            end + 16.0
        }
        Block::Stats(stats) => {
            let mut y = y;
            for (label, value) in stats.iter() {
                if draw {
                    draw_text(label, x, y + 14.0, 14.0, TEXT_DIM);
                }
                y = text_block(value, x, y + 18.0, w, 18.0, TEXT_COLOR, draw) + 8.0;
            }
            y + 8.0
        }
        Block::Terminal(prompt, lines) => {
            let line_h = line_height(BODY_FONT);
            let header_h = 28.0;
            let h = header_h + 12.0 + lines.len() as f32 * line_h + 12.0;
            if draw {
                draw_rectangle(x, y, w, h, TERMINAL_BG);
                draw_rectangle(x, y, w, header_h, PANEL_BORDER);
                draw_rectangle_lines(x, y, w, h, 1.0, PANEL_BORDER);
                draw_text(prompt, x + 12.0, y + 19.0, 14.0, TEXT_COLOR);
                let mut ly = y + header_h + 12.0;
                for (i, line) in lines.iter().enumerate() {
                    let color = if i + 1 == lines.len() { TERMINAL_GREEN } else { TEXT_DIM };
                    draw_text(line, x + 12.0, ly + BODY_FONT, BODY_FONT, color);
                    ly += line_h;
                }
            }
            y + h + 16.0
        }
        Block::Skills(skills) => {
            let row_h = 26.0;
            if draw {
                let cell = 12.0;
                let bar_w = SKILL_CELLS as f32 * (cell + 2.0);
                let bar_x = x + w - bar_w - 48.0;
                for (i, (name, percent)) in skills.iter().enumerate() {
                    let ry = y + i as f32 * row_h;
                    draw_text(">", x, ry + 16.0, BODY_FONT, TERMINAL_GREEN);
                    draw_text(name, x + 16.0, ry + 16.0, BODY_FONT, TEXT_COLOR);
                    let filled = skill_cells(*percent);
                    for c in 0..SKILL_CELLS {
                        let color = if c < filled { TERMINAL_GREEN } else { PANEL_BORDER };
                        draw_rectangle(bar_x + c as f32 * (cell + 2.0), ry + 5.0, cell, cell, color);
                    }
                    draw_text(&format!("{}%", percent), bar_x + bar_w + 8.0, ry + 16.0, 14.0, TERMINAL_GREEN);
                }
            }
            y + skills.len() as f32 * row_h + 12.0
        }
        Block::Bullets(items) => {
            let mut y = y;
            for item in items.iter() {
                if draw {
                    draw_text("-", x, y + BODY_FONT, BODY_FONT, ACCENT_ALT);
                }
                y = text_block(item, x + 16.0, y, w - 16.0, BODY_FONT, TEXT_COLOR, draw) + 4.0;
            }
            y + 8.0
        }
    }
}

fn layout_section(section: &Section, rect_x: f32, y: f32, w: f32, draw: bool) -> f32 {
    let inner_x = rect_x + SECTION_PAD;
    let inner_w = w - SECTION_PAD * 2.0;
    let mut by = y + BANNER_HEIGHT + SECTION_PAD;
    for block in section.blocks {
        by = layout_block(block, inner_x, by, inner_w, draw);
    }
    by + SECTION_PAD
}

#[derive(Default)]
pub struct PassionPage {
    scroll: ScrollView,
}

impl PassionPage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn draw(&mut self, ctx: &mut UiContext, rect: Rect) {
        let w = (rect.w - 48.0).min(900.0);
        let x = rect.center_x() - w * 0.5;

        let heights: Vec<f32> = SECTIONS.iter().map(|s| layout_section(s, x, 0.0, w, false)).collect();
        let content_h = 76.0 + 24.0 + heights.iter().map(|h| h + SECTION_GAP).sum::<f32>();
        self.scroll.handle(ctx, rect, content_h);

        let mut y = draw_heading("My Passions", rect, rect.y + 24.0 - self.scroll.offset);
        for (section, h) in SECTIONS.iter().zip(&heights) {
            let card = Rect::new(x, y, w, *h);
            if card.bottom() >= rect.y && card.y <= rect.bottom() {
                draw_rounded_rect(card.x, card.y, card.w, card.h, 8.0, PANEL_BG);
                draw_rectangle_lines(card.x, card.y, card.w, card.h, 1.0, PANEL_BORDER);
                draw_banner(&section.banner, Rect::new(card.x, card.y, card.w, BANNER_HEIGHT));
                layout_section(section, x, y, w, true);
            }
            y += h + SECTION_GAP;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skill_cells() {
        assert_eq!(skill_cells(80), 8);
        assert_eq!(skill_cells(90), 9);
        assert_eq!(skill_cells(85), 8);
        assert_eq!(skill_cells(60), 6);
        assert_eq!(skill_cells(0), 0);
        assert_eq!(skill_cells(250), 10);
    }

    #[test]
    fn test_sections() {
        assert_eq!(SECTIONS.len(), 3);
        assert!(matches!(SECTIONS[0].blocks[0], Block::Title("The Architect, Not The Finisher")));
        assert!(matches!(SECTIONS[1].blocks[0], Block::Title("Rear-Wheel Drive Philosophy")));
        assert!(matches!(SECTIONS[2].blocks[0], Block::Title("$ sudo su -")));
    }

    #[test]
    fn test_fixed_blocks_measure_without_text() {
        let skills = Block::Skills(&[("a", 10), ("b", 20)]);
        assert_eq!(layout_block(&skills, 0.0, 100.0, 500.0, false), 100.0 + 2.0 * 26.0 + 12.0);
    }
}
