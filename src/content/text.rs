use std::sync::Arc;

use anyhow::Context;

use crate::{
    content::bitmap::Bitmap,
    foundation::error::{ConfettiError, ConfettiResult},
};

/// Guard against pathological allocations from huge glyph sizes or strings.
const MAX_TEXT_DIM: u32 = 4096;

/// Line metrics and advance of one string in the face the text will be drawn with.
#[derive(Clone, Copy, Debug, PartialEq)]
struct LineExtent {
    advance: f64,
    ascent: f64,
    descent: f64,
    line_gap: f64,
}

impl LineExtent {
    fn height(&self) -> f64 {
        self.ascent + self.descent + self.line_gap
    }
}

/// Render `text` at `size` into a bitmap sized to its natural layout extent.
///
/// The width is the sum of glyph advances and the height is the face's ascent + descent + line
/// gap, so equal-size strings share one height. Returns `Ok(Bitmap::empty())` for an empty string
/// or when the host has no usable font.
pub(crate) fn rasterize_text(
    fontdb: &Arc<usvg::fontdb::Database>,
    family: &str,
    text: &str,
    size: f64,
) -> ConfettiResult<Bitmap> {
    if !size.is_finite() || size <= 0.0 {
        return Err(ConfettiError::validation("text size must be finite and > 0"));
    }
    if text.is_empty() {
        return Ok(Bitmap::empty());
    }

    let families = [
        family_for(family),
        usvg::fontdb::Family::SansSerif,
        usvg::fontdb::Family::Serif,
    ];
    let Some(face) = resolve_face(fontdb, &families, 400, usvg::fontdb::Style::Normal) else {
        return Ok(Bitmap::empty());
    };
    let Some(extent) = measure_line(fontdb, face, text, size) else {
        tracing::warn!(family, "font face could not be parsed; text sprite left empty");
        return Ok(Bitmap::empty());
    };

    let (origin_x, baseline) = (size, size * 2.0);
    let chars = text.chars().count() as f64;
    let canvas_w = (size * (chars + 2.0) * 2.0).ceil();
    let canvas_h = (size * 4.0).ceil();
    let svg = format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{canvas_w}" height="{canvas_h}"><text x="{origin_x}" y="{baseline}" font-size="{size}" font-family="{family}" fill="black" xml:space="preserve">{body}</text></svg>"#,
        family = escape_xml(family),
        body = escape_xml(text),
    );

    let opts = usvg::Options {
        fontdb: Arc::clone(fontdb),
        font_resolver: make_font_resolver(),
        ..Default::default()
    };
    let tree = usvg::Tree::from_str(&svg, &opts).context("parse text sprite svg")?;

    // Glyphs drawn from a fallback face carry no advance in the measured face.
    let mut right = origin_x + extent.advance;
    if !tree.root().children().is_empty() {
        right = right.max(tree.root().abs_bounding_box().right() as f64);
    }
    let w = (right - origin_x).ceil().max(0.0) as u32;
    let h = extent.height().ceil().max(0.0) as u32;
    if w == 0 || h == 0 {
        return Ok(Bitmap::empty());
    }
    if w > MAX_TEXT_DIM || h > MAX_TEXT_DIM {
        return Err(ConfettiError::render(format!(
            "text sprite too large: {w}x{h} (max {MAX_TEXT_DIM}x{MAX_TEXT_DIM})"
        )));
    }

    let mut pixmap = resvg::tiny_skia::Pixmap::new(w, h)
        .ok_or_else(|| ConfettiError::render("failed to allocate text pixmap"))?;
    let top = baseline - extent.ascent;
    let xform = resvg::tiny_skia::Transform::from_translate(-origin_x as f32, -top as f32);
    resvg::render(&tree, xform, &mut pixmap.as_mut());

    Bitmap::from_premul_rgba8(w, h, pixmap.data().to_vec())
}

/// Advance and vertical metrics of `text` in face `id`, scaled to `size`.
///
/// Characters the face has no glyph for are measured with its `.notdef` glyph.
fn measure_line(
    fontdb: &usvg::fontdb::Database,
    id: usvg::fontdb::ID,
    text: &str,
    size: f64,
) -> Option<LineExtent> {
    fontdb
        .with_face_data(id, |data, index| {
            let face = ttf_parser::Face::parse(data, index).ok()?;
            let units = f64::from(face.units_per_em());
            if units <= 0.0 {
                return None;
            }
            let scale = size / units;
            let advance: u32 = text
                .chars()
                .map(|c| {
                    let glyph = face.glyph_index(c).unwrap_or(ttf_parser::GlyphId(0));
                    u32::from(face.glyph_hor_advance(glyph).unwrap_or(0))
                })
                .sum();
            Some(LineExtent {
                advance: f64::from(advance) * scale,
                ascent: f64::from(face.ascender()) * scale,
                descent: -f64::from(face.descender()) * scale,
                line_gap: f64::from(face.line_gap()).max(0.0) * scale,
            })
        })
        .flatten()
}

/// Load the host's system fonts once; shared by every text sprite of a rasterizer.
pub(crate) fn system_fontdb() -> Arc<usvg::fontdb::Database> {
    let mut db = usvg::fontdb::Database::new();
    db.load_system_fonts();
    tracing::debug!(faces = db.len(), "loaded system font database");
    Arc::new(db)
}

fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            c => out.push(c),
        }
    }
    out
}

fn family_for(name: &str) -> usvg::fontdb::Family<'_> {
    match name {
        "serif" => usvg::fontdb::Family::Serif,
        "sans-serif" => usvg::fontdb::Family::SansSerif,
        "cursive" => usvg::fontdb::Family::Cursive,
        "fantasy" => usvg::fontdb::Family::Fantasy,
        "monospace" => usvg::fontdb::Family::Monospace,
        other => usvg::fontdb::Family::Name(other),
    }
}

/// Best face for `families` in order, or any face at all. `None` only for an empty database.
fn resolve_face(
    fontdb: &usvg::fontdb::Database,
    families: &[usvg::fontdb::Family<'_>],
    weight: u16,
    style: usvg::fontdb::Style,
) -> Option<usvg::fontdb::ID> {
    let query = usvg::fontdb::Query {
        families,
        weight: usvg::fontdb::Weight(weight),
        stretch: usvg::fontdb::Stretch::Normal,
        style,
    };
    fontdb
        .query(&query)
        .or_else(|| fontdb.faces().next().map(|f| f.id))
}

fn make_font_resolver() -> usvg::FontResolver<'static> {
    use usvg::FontResolver;

    FontResolver {
        select_font: Box::new(|font, fontdb| {
            let mut families = Vec::<usvg::fontdb::Family<'_>>::new();
            for family in font.families() {
                families.push(match family {
                    usvg::FontFamily::Serif => usvg::fontdb::Family::Serif,
                    usvg::FontFamily::SansSerif => usvg::fontdb::Family::SansSerif,
                    usvg::FontFamily::Cursive => usvg::fontdb::Family::Cursive,
                    usvg::FontFamily::Fantasy => usvg::fontdb::Family::Fantasy,
                    usvg::FontFamily::Monospace => usvg::fontdb::Family::Monospace,
                    usvg::FontFamily::Named(s) => usvg::fontdb::Family::Name(s),
                });
            }
            families.push(usvg::fontdb::Family::SansSerif);
            families.push(usvg::fontdb::Family::Serif);

            let style = match font.style() {
                usvg::FontStyle::Normal => usvg::fontdb::Style::Normal,
                usvg::FontStyle::Italic => usvg::fontdb::Style::Italic,
                usvg::FontStyle::Oblique => usvg::fontdb::Style::Oblique,
            };
            resolve_face(fontdb, &families, font.weight(), style)
        }),
        select_fallback: FontResolver::default_fallback_selector(),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/content/text.rs"]
mod tests;
