use std::fmt::Write as _;

use crate::core::{PatternTile, TileAccent};
use crate::error::{ChartError, ChartResult};
use crate::render::{
    BarPrimitive, Color, LinePrimitive, Paint, RenderFrame, Renderer,
    TextHAlign, TextPrimitive,
};

/// Renderer that serializes frames into standalone SVG documents.
///
/// `scale` multiplies the document's `width`/`height` while the `viewBox` keeps
/// frame coordinates, which is what raster export pipelines expect.
#[derive(Debug, Clone)]
pub struct SvgRenderer {
    scale: f64,
    last_document: String,
}

impl Default for SvgRenderer {
    fn default() -> Self {
        Self {
            scale: 1.0,
            last_document: String::new(),
        }
    }
}

impl SvgRenderer {
    pub fn with_scale(scale: f64) -> ChartResult<Self> {
        if !scale.is_finite() || scale <= 0.0 {
            return Err(ChartError::InvalidData(
                "svg export scale must be finite and > 0".to_owned(),
            ));
        }
        Ok(Self {
            scale,
            last_document: String::new(),
        })
    }

    #[must_use]
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Document produced by the most recent `render` call.
    #[must_use]
    pub fn last_document(&self) -> &str {
        &self.last_document
    }

    #[must_use]
    pub fn into_document(self) -> String {
        self.last_document
    }
}

impl Renderer for SvgRenderer {
    fn render(&mut self, frame: &RenderFrame) -> ChartResult<()> {
        frame.validate()?;
        self.last_document = frame_to_svg(frame, self.scale);
        Ok(())
    }
}

/// Serializes `frame` as an SVG document.
#[must_use]
pub fn frame_to_svg(frame: &RenderFrame, scale: f64) -> String {
    let width = f64::from(frame.viewport.width);
    let height = f64::from(frame.viewport.height);
    let mut out = String::new();

    let _ = writeln!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}" viewBox="0 0 {} {}">"#,
        fmt_num(width * scale),
        fmt_num(height * scale),
        fmt_num(width),
        fmt_num(height),
    );

    if !frame.patterns.is_empty() {
        out.push_str("<defs>\n");
        for (id, tile) in &frame.patterns {
            write_pattern(&mut out, id, tile);
        }
        out.push_str("</defs>\n");
    }

    if let Some(background) = frame.background {
        let _ = write!(
            out,
            r#"<rect x="0" y="0" width="{}" height="{}""#,
            fmt_num(width),
            fmt_num(height)
        );
        write_color_attr(&mut out, "fill", background);
        out.push_str("/>\n");
    }

    for line in &frame.grid_lines {
        write_line(&mut out, line);
    }
    for bar in &frame.bars {
        write_bar(&mut out, bar);
    }
    for line in &frame.lines {
        write_line(&mut out, line);
    }
    for text in &frame.texts {
        write_text(&mut out, text);
    }

    out.push_str("</svg>\n");
    out
}

fn write_pattern(out: &mut String, id: &str, tile: &PatternTile) {
    let size = fmt_num(tile.size);
    let _ = writeln!(
        out,
        r#"<pattern id="{}" width="{size}" height="{size}" patternUnits="userSpaceOnUse">"#,
        escape_xml(id)
    );
    let _ = write!(out, r#"<rect width="{size}" height="{size}""#);
    write_color_attr(out, "fill", tile.background);
    out.push_str("/>\n");
    for accent in &tile.accents {
        match *accent {
            TileAccent::Line {
                x1,
                y1,
                x2,
                y2,
                width,
            } => {
                let _ = write!(
                    out,
                    r#"<line x1="{}" y1="{}" x2="{}" y2="{}" stroke-width="{}""#,
                    fmt_num(x1),
                    fmt_num(y1),
                    fmt_num(x2),
                    fmt_num(y2),
                    fmt_num(width)
                );
                write_color_attr(out, "stroke", tile.accent_color);
            }
            TileAccent::Dot { cx, cy, radius } => {
                let _ = write!(
                    out,
                    r#"<circle cx="{}" cy="{}" r="{}""#,
                    fmt_num(cx),
                    fmt_num(cy),
                    fmt_num(radius)
                );
                write_color_attr(out, "fill", tile.accent_color);
            }
        }
        let _ = write!(out, r#" opacity="{}"/>"#, fmt_num(tile.accent_opacity));
        out.push('\n');
    }
    out.push_str("</pattern>\n");
}

fn write_bar(out: &mut String, bar: &BarPrimitive) {
    let (fill, opacity, border_width, border_color) = match bar {
        BarPrimitive::Rect(rect) => {
            let _ = write!(
                out,
                r#"<rect x="{}" y="{}" width="{}" height="{}""#,
                fmt_num(rect.x),
                fmt_num(rect.y),
                fmt_num(rect.width),
                fmt_num(rect.height)
            );
            (&rect.fill, rect.opacity, rect.border_width, rect.border_color)
        }
        BarPrimitive::Path(path) => {
            let _ = write!(out, r#"<path d="{}""#, path.svg_data());
            (&path.fill, path.opacity, path.border_width, path.border_color)
        }
    };
    match fill {
        Paint::Solid(color) => write_color_attr(out, "fill", *color),
        Paint::Pattern(id) => {
            let _ = write!(out, r#" fill="url(#{})""#, escape_xml(id));
        }
    }
    if opacity < 1.0 {
        let _ = write!(out, r#" opacity="{}""#, fmt_num(opacity));
    }
    if border_width > 0.0 {
        write_color_attr(out, "stroke", border_color);
        let _ = write!(out, r#" stroke-width="{}""#, fmt_num(border_width));
    }
    out.push_str("/>\n");
}

fn write_line(out: &mut String, line: &LinePrimitive) {
    let _ = write!(
        out,
        r#"<line x1="{}" y1="{}" x2="{}" y2="{}" stroke-width="{}""#,
        fmt_num(line.x1),
        fmt_num(line.y1),
        fmt_num(line.x2),
        fmt_num(line.y2),
        fmt_num(line.stroke_width)
    );
    write_color_attr(out, "stroke", line.color);
    out.push_str("/>\n");
}

fn write_text(out: &mut String, text: &TextPrimitive) {
    let anchor = match text.h_align {
        TextHAlign::Left => "start",
        TextHAlign::Center => "middle",
        TextHAlign::Right => "end",
    };
    let _ = write!(
        out,
        r#"<text x="{}" y="{}" font-size="{}" text-anchor="{anchor}" dominant-baseline="middle""#,
        fmt_num(text.x),
        fmt_num(text.y),
        fmt_num(text.font_size_px)
    );
    if text.rotation_deg != 0.0 {
        let _ = write!(
            out,
            r#" transform="rotate({} {} {})""#,
            fmt_num(text.rotation_deg),
            fmt_num(text.x),
            fmt_num(text.y)
        );
    }
    write_color_attr(out, "fill", text.color);
    out.push('>');
    out.push_str(&escape_xml(&text.text));
    out.push_str("</text>\n");
}

fn write_color_attr(out: &mut String, name: &str, color: Color) {
    let _ = write!(out, r#" {name}="{}""#, color.to_hex());
    if color.alpha < 1.0 {
        let _ = write!(out, r#" {name}-opacity="{}""#, fmt_num(color.alpha));
    }
}

fn fmt_num(value: f64) -> String {
    let rounded = (value * 100.0).round() / 100.0;
    if rounded == 0.0 {
        return "0".to_owned();
    }
    let text = format!("{rounded:.2}");
    text.trim_end_matches('0').trim_end_matches('.').to_owned()
}

fn escape_xml(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}
