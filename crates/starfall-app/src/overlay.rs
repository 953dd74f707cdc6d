//! Static text overlay for the auth view.

use std::rc::Rc;

use starfall_auth::{AuthForm, FormField};
use starfall_engine::coords::{Rect, Vec2, Viewport};
use starfall_engine::paint::Color;
use starfall_engine::scene::{DrawList, ZIndex};

use crate::glyphs::GlyphDots;

const LINE_GAP: f32 = 14.0;
const PANEL_PAD: f32 = 28.0;

#[derive(Debug, Copy, Clone, PartialEq)]
enum Tone {
    Heading,
    Body,
    Hint,
    Error,
}

impl Tone {
    fn px(self) -> f32 {
        match self {
            Tone::Heading => 34.0,
            _ => 18.0,
        }
    }

    fn color(self) -> Color {
        match self {
            Tone::Heading => Color::from_hex(0xffffff),
            Tone::Body => Color::from_hex(0xdfe8ff),
            Tone::Hint => Color::from_rgba_u8(0, 200, 255, 0.85),
            Tone::Error => Color::from_hex(0xff6b6b),
        }
    }
}

struct Line {
    text: String,
    tone: Tone,
    dots: GlyphDots,
}

/// Lines describing the form, re-rasterized only when their text changes.
pub struct StatusOverlay {
    font: Option<Rc<fontdue::Font>>,
    lines: Vec<Line>,
}

impl StatusOverlay {
    pub fn new(font: Option<Rc<fontdue::Font>>) -> Self {
        Self { font, lines: Vec::new() }
    }

    /// The text lines shown for `form`, top to bottom.
    fn describe(form: &AuthForm) -> Vec<(String, Tone)> {
        let caret = |field: FormField| if form.focus() == field { ("> ", "_") } else { ("  ", "") };

        let (em, ec) = caret(FormField::Email);
        let (pm, pc) = caret(FormField::Password);

        let mut lines = vec![
            (form.heading().to_string(), Tone::Heading),
            (format!("{em}Email: {}{ec}", form.email()), Tone::Body),
            (format!("{pm}Password: {}{pc}", form.masked_password()), Tone::Body),
            (format!("[Enter] {}", form.heading()), Tone::Hint),
            ("[F3] Continue with Google".to_string(), Tone::Hint),
        ];
        if let Some(err) = form.error() {
            lines.push((err.to_string(), Tone::Error));
        }
        lines.push((format!("[F2] {}", form.switch_prompt()), Tone::Hint));
        lines
    }

    pub fn update(&mut self, form: &AuthForm) {
        let Some(font) = &self.font else { return };
        let wanted = Self::describe(form);

        self.lines.truncate(wanted.len());
        for (i, (text, tone)) in wanted.into_iter().enumerate() {
            let unchanged = self.lines.get(i).is_some_and(|l| l.text == text && l.tone == tone);
            if unchanged {
                continue;
            }
            let dots = GlyphDots::rasterize(font, &text, tone.px(), 1.0);
            let line = Line { text, tone, dots };
            if i < self.lines.len() {
                self.lines[i] = line;
            } else {
                self.lines.push(line);
            }
        }
    }

    /// Paints a translucent panel and the lines, centered in `viewport`.
    pub fn paint(&self, list: &mut DrawList, viewport: Viewport) {
        if self.lines.is_empty() {
            return;
        }

        let width = self.lines.iter().map(|l| l.dots.size().x).fold(0.0, f32::max);
        let height: f32 = self.lines.iter().map(|l| l.dots.size().y + LINE_GAP).sum::<f32>() - LINE_GAP;

        let panel = Rect::centered(
            viewport.center(),
            Vec2::new(width + PANEL_PAD * 2.0, height + PANEL_PAD * 2.0),
        );
        list.push_solid_rect(ZIndex::OVERLAY, panel, Color::from_rgba_u8(8, 10, 24, 0.72));

        let mut y = panel.origin.y + PANEL_PAD;
        for line in &self.lines {
            let size = line.dots.size();
            let x = viewport.center().x - size.x / 2.0;
            line.dots.paint_flat(list, ZIndex::OVERLAY, Vec2::new(x, y), line.tone.color());
            y += size.y + LINE_GAP;
        }
    }
}
