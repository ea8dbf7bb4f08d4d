//! PNG rasterization of the SVG wheel with a bundled font.

use crate::rendering::svg::RenderError;
use resvg::tiny_skia::{Pixmap, Transform};
use resvg::usvg::{fontdb, Options, Tree};
use std::sync::{Arc, OnceLock};

/// Family name of the bundled face; covers the zodiac and planet glyphs.
pub const CHART_FONT_FAMILY: &str = "DejaVu Sans";

static CHART_FONT: &[u8] = include_bytes!("../../../../assets/fonts/DejaVuSans.ttf");

static FONT_DB: OnceLock<Arc<fontdb::Database>> = OnceLock::new();

fn font_db() -> Arc<fontdb::Database> {
    FONT_DB
        .get_or_init(|| {
            let mut db = fontdb::Database::new();
            db.load_font_data(CHART_FONT.to_vec());
            // Unknown families resolve to the generic serif face
            db.set_serif_family(CHART_FONT_FAMILY);
            db.set_sans_serif_family(CHART_FONT_FAMILY);
            log::debug!("Loaded {} bundled font face(s)", db.len());
            Arc::new(db)
        })
        .clone()
}

/// Draw an SVG document onto a `width` x `height` canvas and encode it as PNG.
///
/// Only the bundled face is visible to the text layout, so the output does
/// not depend on the fonts installed on the host.
pub fn rasterize(svg: &str, width: u32, height: u32) -> Result<Vec<u8>, RenderError> {
    let mut options = Options::default();
    options.font_family = CHART_FONT_FAMILY.to_string();
    options.fontdb = font_db();

    let tree = Tree::from_str(svg, &options)?;
    let mut pixmap = Pixmap::new(width, height).ok_or(RenderError::Canvas { width, height })?;

    let size = tree.size();
    let transform = Transform::from_scale(
        width as f32 / size.width(),
        height as f32 / size.height(),
    );
    resvg::render(&tree, transform, &mut pixmap.as_mut());

    pixmap
        .encode_png()
        .map_err(|e| RenderError::Encode(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SQUARE: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" width="8" height="8"><rect width="8" height="8" fill="rgb(255,0,0)"/></svg>"#;

    #[test]
    fn test_bundled_font_is_registered() {
        let db = font_db();
        assert!(db
            .faces()
            .any(|face| face.families.iter().any(|(name, _)| name.as_str() == CHART_FONT_FAMILY)));
    }

    #[test]
    fn test_bundled_font_covers_chart_glyphs() {
        use crate::ephemeris::Body;
        use crate::zodiac::labels::{body_glyph, sign_glyph};

        let face = ttf_parser::Face::parse(CHART_FONT, 0).unwrap();
        let glyphs = (0..12u8)
            .map(sign_glyph)
            .chain(Body::ALL.into_iter().map(body_glyph))
            .chain(["ASC", "0123456789°"]);
        for text in glyphs {
            for c in text.chars() {
                assert!(face.glyph_index(c).is_some(), "no glyph for {:?}", c);
            }
        }
    }

    #[test]
    fn test_generic_families_resolve_to_bundled_face() {
        let db = font_db();
        let query = fontdb::Query {
            families: &[fontdb::Family::Name("No Such Family"), fontdb::Family::Serif],
            ..fontdb::Query::default()
        };
        assert!(db.query(&query).is_some());
    }

    #[test]
    fn test_rasterize_writes_png_of_requested_size() {
        let png = rasterize(SQUARE, 16, 16).unwrap();
        assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");
        assert_eq!(u32::from_be_bytes([png[16], png[17], png[18], png[19]]), 16);
        assert_eq!(u32::from_be_bytes([png[20], png[21], png[22], png[23]]), 16);
    }

    #[test]
    fn test_malformed_svg_is_rejected() {
        assert!(matches!(rasterize("<svg", 8, 8), Err(RenderError::Svg(_))));
    }

    #[test]
    fn test_zero_sized_canvas_is_rejected() {
        assert!(matches!(
            rasterize(SQUARE, 0, 8),
            Err(RenderError::Canvas { width: 0, height: 8 })
        ));
    }
}
