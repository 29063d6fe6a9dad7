use crate::fonts::{Face, FontSet};
use crate::model::Message;

const SUBJECT_SIZE: f32 = 14.0;
const SENDER_SIZE: f32 = 11.0;
const META_SIZE: f32 = 9.0;
const BODY_SIZE: f32 = 10.0;

const LINE_RATIO: f32 = 1.35;
const MESSAGE_GAP: f32 = 16.0;
const META_BODY_GAP: f32 = 8.0;
const RULE_GAP: f32 = 12.0;
const BOTTOM_PAD: f32 = 10.0;

const META_GRAY: f32 = 0.45;

/// One drawable item of the laid-out thread. `y` grows downward from the top
/// of the rendered stream; the renderer flips into PDF coordinates.
pub(super) enum Element {
    Text {
        x: f32,
        baseline_y: f32,
        face: Face,
        size: f32,
        gray: f32,
        text: String,
    },
    Rule {
        y: f32,
        width: f32,
    },
}

/// The full thread rendered once as a continuous vertical flow, plus its
/// total extent. `total_height` is in the same unit (points) as the page
/// content-area constant, so the paginator can consume it directly.
pub(super) struct ThreadLayout {
    pub(super) elements: Vec<Element>,
    pub(super) total_height: f32,
}

fn line_height(size: f32) -> f32 {
    size * LINE_RATIO
}

/// Greedy word wrap against the approximate Helvetica metrics. A word wider
/// than the full line is placed anyway and overflows; the clip window bounds
/// it like an overflowing cell in the on-screen view.
fn wrap_text(text: &str, fonts: &FontSet, face: Face, size: f32, max_width: f32) -> Vec<String> {
    let entry = &fonts[&face];
    let space_w = entry.space_width(size);

    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut current_w = 0.0f32;

    for word in text.split_whitespace() {
        let ww = entry.word_width(word, size);
        if !current.is_empty() && current_w + space_w + ww > max_width {
            lines.push(std::mem::take(&mut current));
            current_w = 0.0;
        }
        if current.is_empty() {
            current_w = ww;
        } else {
            current.push(' ');
            current_w += space_w + ww;
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        lines.push(current);
    }
    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

struct Cursor<'a> {
    fonts: &'a FontSet,
    width: f32,
    y: f32,
    elements: Vec<Element>,
}

impl Cursor<'_> {
    fn text_line(&mut self, x: f32, face: Face, size: f32, gray: f32, text: String) {
        let lh = line_height(size);
        self.y += lh;
        self.elements.push(Element::Text {
            x,
            baseline_y: self.y - size * 0.25,
            face,
            size,
            gray,
            text,
        });
    }

    fn wrapped(&mut self, text: &str, face: Face, size: f32, gray: f32) {
        for line in wrap_text(text, self.fonts, face, size, self.width) {
            self.text_line(0.0, face, size, gray, line);
        }
    }

    fn rule(&mut self) {
        self.y += RULE_GAP;
        self.elements.push(Element::Rule {
            y: self.y,
            width: self.width,
        });
    }
}

/// Lay out the composed thread exactly as the visible webmail view shows it:
/// a subject header, then per message a bold sender line with the display
/// timestamp right-aligned, muted To:/Cc: lines, the body, and a separator
/// rule. This is the single measurement pass the paginator relies on; it
/// must be re-run whenever the profile changes.
pub(super) fn layout_thread(subject: &str, messages: &[Message], fonts: &FontSet, width: f32) -> ThreadLayout {
    let mut cur = Cursor {
        fonts,
        width,
        y: 0.0,
        elements: Vec::new(),
    };

    cur.wrapped(subject, Face::Bold, SUBJECT_SIZE, 0.0);
    cur.rule();

    for message in messages {
        cur.y += MESSAGE_GAP;

        // Sender line, timestamp right-aligned (and oblique) on the same
        // baseline.
        let ts_w = fonts[&Face::Oblique].word_width(&message.timestamp, META_SIZE);
        cur.text_line(0.0, Face::Bold, SENDER_SIZE, 0.0, message.from_name.clone());
        let sender_baseline = cur.y - SENDER_SIZE * 0.25;
        cur.elements.push(Element::Text {
            x: (width - ts_w).max(0.0),
            baseline_y: sender_baseline,
            face: Face::Oblique,
            size: META_SIZE,
            gray: META_GRAY,
            text: message.timestamp.clone(),
        });

        cur.wrapped(
            &format!("From: {}", crate::model::mailbox(&message.from_name, &message.from_email)),
            Face::Regular,
            META_SIZE,
            META_GRAY,
        );
        cur.wrapped(&format!("To: {}", message.to.join(", ")), Face::Regular, META_SIZE, META_GRAY);
        if !message.cc.is_empty() {
            cur.wrapped(&format!("Cc: {}", message.cc.join(", ")), Face::Regular, META_SIZE, META_GRAY);
        }

        cur.y += META_BODY_GAP;
        for body_line in message.body.lines() {
            if body_line.trim().is_empty() {
                cur.y += line_height(BODY_SIZE) * 0.5;
            } else {
                cur.wrapped(body_line, Face::Regular, BODY_SIZE, 0.0);
            }
        }

        cur.rule();
    }

    cur.y += BOTTOM_PAD;

    log::debug!("thread layout: {} elements, {:.1}pt total", cur.elements.len(), cur.y);

    ThreadLayout {
        elements: cur.elements,
        total_height: cur.y,
    }
}
