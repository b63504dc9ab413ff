/// ASCII drawing surface for terminal previews
use crossterm::{
    style::{Color, Print, ResetColor, SetForegroundColor},
    QueueableCommand,
};
use nalgebra::Point2;
use orthodraw_core::primitive::{DashPattern, HAlign, VAlign};
use orthodraw_core::surface::{dash_segments, tessellate_circle};
use orthodraw_core::{Bounds, Label, OutputFormat, RenderError, Style, Surface};
use std::io::Write;
use std::path::Path;

/// A terminal cell is roughly twice as tall as it is wide
const CELL_ASPECT: f64 = 2.0;

/// Text always wins over line work
const TEXT_PRIORITY: f32 = f32::INFINITY;

const CIRCLE_STEPS: usize = 48;

/// Cell mapping computed from the drawing bounds
#[derive(Debug, Clone, Copy)]
struct Grid {
    min: Point2<f64>,
    max_y: f64,
    cols_per_unit: f64,
    rows_per_unit: f64,
    offset: (f64, f64),
}

impl Grid {
    fn cell(&self, p: &Point2<f64>) -> (f64, f64) {
        (
            self.offset.0 + (p.x - self.min.x) * self.cols_per_unit,
            self.offset.1 + (self.max_y - p.y) * self.rows_per_unit,
        )
    }
}

/// Character-cell surface; heavier strokes overwrite lighter ones
pub struct AsciiSurface {
    width: usize,
    height: usize,
    priority_buffer: Vec<f32>,
    char_buffer: Vec<char>,
    color_buffer: Vec<Color>,
    aspect_equal: bool,
    grid: Option<Grid>,
}

impl AsciiSurface {
    pub fn new(width: usize, height: usize) -> Self {
        let size = width * height;
        Self {
            width,
            height,
            priority_buffer: vec![f32::NEG_INFINITY; size],
            char_buffer: vec![' '; size],
            color_buffer: vec![Color::Reset; size],
            aspect_equal: false,
            grid: None,
        }
    }

    pub fn size(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    pub fn clear(&mut self) {
        for i in 0..self.char_buffer.len() {
            self.priority_buffer[i] = f32::NEG_INFINITY;
            self.char_buffer[i] = ' ';
            self.color_buffer[i] = Color::Reset;
        }
        self.grid = None;
        self.aspect_equal = false;
    }

    fn grid(&self) -> Result<Grid, RenderError> {
        self.grid.ok_or(RenderError::BoundsNotSet)
    }

    fn plot(&mut self, x: i64, y: i64, c: char, priority: f32, color: Color) {
        if x < 0 || y < 0 || x >= self.width as i64 || y >= self.height as i64 {
            return;
        }
        let idx = y as usize * self.width + x as usize;
        if priority >= self.priority_buffer[idx] {
            self.priority_buffer[idx] = priority;
            self.char_buffer[idx] = c;
            self.color_buffer[idx] = color;
        }
    }

    /// Walk a segment cell by cell (DDA)
    fn rasterize_segment(&mut self, a: (f64, f64), b: (f64, f64), style: &Style) {
        let (dx, dy) = (b.0 - a.0, b.1 - a.1);
        let steps = dx.abs().max(dy.abs()).ceil().max(1.0) as usize;
        let character = stroke_char(dx, dy);
        let color = stroke_color(style);
        let priority = style.line_width as f32;

        for i in 0..=steps {
            let t = i as f64 / steps as f64;
            let x = (a.0 + dx * t).floor() as i64;
            let y = (a.1 + dy * t).floor() as i64;
            self.plot(x, y, character, priority, color);
        }
    }

    /// Plain characters, trailing spaces trimmed
    pub fn to_text(&self) -> String {
        let mut out = String::with_capacity((self.width + 1) * self.height);
        for row in self.char_buffer.chunks(self.width.max(1)) {
            let line: String = row.iter().collect();
            out.push_str(line.trim_end());
            out.push('\n');
        }
        out
    }

    pub fn draw<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        let mut current = None;
        for y in 0..self.height {
            for x in 0..self.width {
                let idx = y * self.width + x;
                let color = self.color_buffer[idx];
                if current != Some(color) {
                    writer.queue(SetForegroundColor(color))?;
                    current = Some(color);
                }
                writer.queue(Print(self.char_buffer[idx]))?;
            }
            writer.queue(Print('\n'))?;
        }
        writer.queue(ResetColor)?;
        Ok(())
    }
}

impl Surface for AsciiSurface {
    fn set_aspect_equal(&mut self) {
        self.aspect_equal = true;
    }

    fn set_bounds(&mut self, bounds: Bounds) -> Result<(), RenderError> {
        let degenerate = bounds.is_empty() || bounds.width() <= 0.0 || bounds.height() <= 0.0;
        if self.width == 0 || self.height == 0 || degenerate {
            return Err(RenderError::EmptyCanvas);
        }

        let (cols, rows) = (self.width as f64, self.height as f64);
        let mut cols_per_unit = cols / bounds.width();
        let mut rows_per_unit = rows / bounds.height();
        if self.aspect_equal {
            cols_per_unit = cols_per_unit.min(rows_per_unit * CELL_ASPECT);
            rows_per_unit = cols_per_unit / CELL_ASPECT;
        }

        self.grid = Some(Grid {
            min: bounds.min,
            max_y: bounds.max.y,
            cols_per_unit,
            rows_per_unit,
            offset: (
                (cols - bounds.width() * cols_per_unit) / 2.0,
                (rows - bounds.height() * rows_per_unit) / 2.0,
            ),
        });
        Ok(())
    }

    fn draw_line(&mut self, points: &[Point2<f64>], style: &Style) -> Result<(), RenderError> {
        let grid = self.grid()?;
        for [a, b] in dash_segments(points, style.dash) {
            self.rasterize_segment(grid.cell(&a), grid.cell(&b), style);
        }
        Ok(())
    }

    fn draw_circle(
        &mut self,
        center: Point2<f64>,
        radius: f64,
        style: &Style,
    ) -> Result<(), RenderError> {
        let points = tessellate_circle(center, radius, CIRCLE_STEPS);
        self.draw_line(&points, style)
    }

    fn draw_text(&mut self, label: &Label) -> Result<(), RenderError> {
        let grid = self.grid()?;
        let (col, row) = grid.cell(&label.position);
        let (col, row) = (col.floor() as i64, row.floor() as i64);
        let chars: Vec<char> = label.text.chars().collect();
        let len = chars.len() as i64;

        if label.is_vertical() {
            // Reads bottom to top.
            let bottom = match label.anchor.v {
                VAlign::Bottom => row,
                VAlign::Center => row + len / 2,
                VAlign::Top => row + len - 1,
            };
            let x = match label.anchor.h {
                HAlign::Left => col + 1,
                HAlign::Center => col,
                HAlign::Right => col - 1,
            };
            for (i, c) in chars.into_iter().enumerate() {
                self.plot(x, bottom - i as i64, c, TEXT_PRIORITY, Color::Yellow);
            }
        } else {
            let start = match label.anchor.h {
                HAlign::Left => col,
                HAlign::Center => col - len / 2,
                HAlign::Right => col - len,
            };
            let y = match label.anchor.v {
                VAlign::Top => row + 1,
                VAlign::Center => row,
                VAlign::Bottom => row - 1,
            };
            for (i, c) in chars.into_iter().enumerate() {
                self.plot(start + i as i64, y, c, TEXT_PRIORITY, Color::Yellow);
            }
        }
        Ok(())
    }

    fn save(&mut self, path: &Path, format: OutputFormat, _dpi: u32) -> Result<(), RenderError> {
        match format {
            OutputFormat::Text => {
                std::fs::write(path, self.to_text())?;
                log::info!("wrote {}", path.display());
                Ok(())
            }
            other => Err(RenderError::UnsupportedFormat(other)),
        }
    }
}

/// Character matching the direction of a stroke in cell space
fn stroke_char(dx: f64, dy: f64) -> char {
    let (ax, ay) = (dx.abs(), dy.abs());
    if ay <= ax * 0.5 {
        '-'
    } else if ax <= ay * 0.5 {
        '|'
    } else if (dx > 0.0) == (dy > 0.0) {
        // Cell rows grow downwards.
        '\\'
    } else {
        '/'
    }
}

fn stroke_color(style: &Style) -> Color {
    match style.dash {
        DashPattern::Solid if style.line_width >= 1.5 => Color::White,
        DashPattern::Solid => Color::Cyan,
        DashPattern::Dashed => Color::Grey,
        DashPattern::DashDot => Color::Green,
        DashPattern::Dotted => Color::DarkGrey,
    }
}
