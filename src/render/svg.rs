use std::fmt::Write as _;
use std::io::Write;

use crate::error::Result;
use crate::render::scene::Scene;
use crate::render::Surface;

fn escape(s: &str) -> String {
    s.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}

/// Render a scene as a standalone SVG document.
pub fn to_svg(scene: &Scene) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = writeln!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
        w = scene.width,
        h = scene.height
    );
    let _ = writeln!(
        out,
        r#"  <rect width="100%" height="100%" fill="{}"/>"#,
        scene.background.hex()
    );
    for c in &scene.keys {
        let _ = writeln!(
            out,
            r#"  <circle cx="{}" cy="{}" r="{}" fill="{}"/>"#,
            c.center.x,
            c.center.y,
            c.radius,
            c.fill.hex()
        );
        let _ = writeln!(
            out,
            r#"  <text x="{}" y="{}" fill="white" font-size="24" text-anchor="middle" dominant-baseline="central">{}</text>"#,
            c.center.x,
            c.center.y,
            escape(&c.label)
        );
    }
    for l in &scene.edges {
        let _ = writeln!(
            out,
            r#"  <line x1="{}" y1="{}" x2="{}" y2="{}" stroke="{}" stroke-width="{}"/>"#,
            l.from.x,
            l.from.y,
            l.to.x,
            l.to.y,
            l.color.hex(),
            l.width
        );
    }
    let t = &scene.caption;
    let _ = writeln!(
        out,
        r#"  <text x="{}" y="{}" fill="{}" font-size="{}">{}</text>"#,
        t.at.x,
        t.at.y,
        t.color.hex(),
        t.size,
        escape(&t.content)
    );
    out.push_str("</svg>\n");
    out
}

/// Writes one SVG document per presented frame.
pub struct SvgSurface<W: Write> {
    out: W,
}

impl<W: Write> SvgSurface<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Surface for SvgSurface<W> {
    fn present(&mut self, scene: &Scene, _frame: u64) -> Result<()> {
        self.out.write_all(to_svg(scene).as_bytes())?;
        self.out.flush()?;
        Ok(())
    }
}
