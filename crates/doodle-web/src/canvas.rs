use std::collections::HashMap;
use doodle_engine::{Anchor, Color, ImageHandle, ImageLoader, LoadError, Renderer, TextStyle};
use glam::Vec2;
use wasm_bindgen::JsValue;
use web_sys::{CanvasRenderingContext2d, Document, HtmlImageElement};

/// `Renderer` on top of a Canvas 2D context.
///
/// Images are plain `<img>` elements created on first use and shared by every
/// sprite that names the same path. Decoding happens asynchronously in the
/// browser; until an image is ready it simply isn't drawn.
pub struct CanvasRenderer {
    ctx: CanvasRenderingContext2d,
    document: Option<Document>,
    size: Vec2,
    background: String,
    images: Vec<HtmlImageElement>,
    by_path: HashMap<String, ImageHandle>,
}

impl CanvasRenderer {
    pub fn new(ctx: CanvasRenderingContext2d, size: Vec2, background: &Color) -> Self {
        Self {
            ctx,
            document: None,
            size,
            background: background.to_string(),
            images: Vec::new(),
            by_path: HashMap::new(),
        }
    }

    /// Document whose title follows `set_title`.
    pub fn with_document(mut self, document: Document) -> Self {
        self.document = Some(document);
        self
    }

    fn fill(&self, color: &Color) {
        self.ctx.set_fill_style_str(&color.to_string());
    }

    fn stroke(&self, color: &Color, width: f32) {
        self.ctx.set_stroke_style_str(&color.to_string());
        self.ctx.set_line_width(width as f64);
    }
}

/// Canvas `textAlign` / `textBaseline` for an anchor.
fn text_alignment(anchor: Anchor) -> (&'static str, &'static str) {
    let align = match anchor {
        Anchor::Left | Anchor::TopLeft | Anchor::BottomLeft => "left",
        Anchor::Right | Anchor::TopRight | Anchor::BottomRight => "right",
        _ => "center",
    };
    let baseline = match anchor {
        Anchor::Top | Anchor::TopLeft | Anchor::TopRight => "top",
        Anchor::Bottom | Anchor::BottomLeft | Anchor::BottomRight => "bottom",
        _ => "middle",
    };
    (align, baseline)
}

fn report(op: &str, result: Result<(), JsValue>) {
    if let Err(err) = result {
        log::warn!("canvas {} failed: {:?}", op, err);
    }
}

impl Renderer for CanvasRenderer {
    fn backend(&self) -> &'static str {
        "canvas2d"
    }

    fn clear(&mut self) {
        self.ctx.set_fill_style_str(&self.background);
        self.ctx
            .fill_rect(0.0, 0.0, self.size.x as f64, self.size.y as f64);
    }

    fn draw_line(&mut self, from: Vec2, to: Vec2, color: &Color, width: f32) {
        self.stroke(color, width);
        self.ctx.begin_path();
        self.ctx.move_to(from.x as f64, from.y as f64);
        self.ctx.line_to(to.x as f64, to.y as f64);
        self.ctx.stroke();
    }

    fn draw_rect(&mut self, pos: Vec2, size: Vec2, color: &Color, filled: bool) {
        let (x, y, w, h) = (pos.x as f64, pos.y as f64, size.x as f64, size.y as f64);
        if filled {
            self.fill(color);
            self.ctx.fill_rect(x, y, w, h);
        } else {
            self.stroke(color, 1.0);
            self.ctx.stroke_rect(x, y, w, h);
        }
    }

    fn draw_oval(&mut self, center: Vec2, radii: Vec2, color: &Color, filled: bool) {
        self.ctx.begin_path();
        report(
            "ellipse",
            self.ctx.ellipse(
                center.x as f64,
                center.y as f64,
                radii.x.max(0.0) as f64,
                radii.y.max(0.0) as f64,
                0.0,
                0.0,
                std::f64::consts::TAU,
            ),
        );
        if filled {
            self.fill(color);
            self.ctx.fill();
        } else {
            self.stroke(color, 1.0);
            self.ctx.stroke();
        }
    }

    fn draw_polygon(&mut self, points: &[Vec2], color: &Color) {
        let Some((first, rest)) = points.split_first() else {
            return;
        };
        self.fill(color);
        self.ctx.begin_path();
        self.ctx.move_to(first.x as f64, first.y as f64);
        for p in rest {
            self.ctx.line_to(p.x as f64, p.y as f64);
        }
        self.ctx.close_path();
        self.ctx.fill();
    }

    fn draw_image(&mut self, pos: Vec2, size: Vec2, image: ImageHandle) {
        let Some(img) = self.images.get(image.0 as usize) else {
            return;
        };
        if !img.complete() || img.natural_width() == 0 {
            return;
        }
        report(
            "drawImage",
            self.ctx.draw_image_with_html_image_element_and_dw_and_dh(
                img,
                pos.x as f64,
                pos.y as f64,
                size.x as f64,
                size.y as f64,
            ),
        );
    }

    fn draw_text(&mut self, pos: Vec2, text: &str, style: &TextStyle) {
        let (align, baseline) = text_alignment(style.anchor);
        self.fill(&style.color);
        self.ctx.set_font(&format!("{}px {}", style.size, style.font));
        self.ctx.set_text_align(align);
        self.ctx.set_text_baseline(baseline);
        report("fillText", self.ctx.fill_text(text, pos.x as f64, pos.y as f64));
    }

    fn set_title(&mut self, title: &str) {
        if let Some(document) = &self.document {
            document.set_title(title);
        }
    }

    fn release(&mut self) {
        self.images.clear();
        self.by_path.clear();
        log::info!("canvas renderer released");
    }
}

impl ImageLoader for CanvasRenderer {
    fn load_image(&mut self, path: &str, _size: Vec2) -> Result<ImageHandle, LoadError> {
        if let Some(handle) = self.by_path.get(path) {
            return Ok(*handle);
        }
        let img = HtmlImageElement::new().map_err(|err| LoadError::Backend {
            path: path.to_string(),
            details: format!("{:?}", err),
        })?;
        img.set_src(path);

        let handle = ImageHandle(self.images.len() as u32);
        self.images.push(img);
        self.by_path.insert(path.to_string(), handle);
        Ok(handle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_alignment_follows_anchor() {
        assert_eq!(text_alignment(Anchor::Center), ("center", "middle"));
        assert_eq!(text_alignment(Anchor::TopLeft), ("left", "top"));
        assert_eq!(text_alignment(Anchor::Right), ("right", "middle"));
        assert_eq!(text_alignment(Anchor::Bottom), ("center", "bottom"));
    }
}
