//! Seam to the external rendering collaborator

use super::plan::{AxisSpec, BarSpec, CategoryAxis, LegendEntry, LineRole, Point, Stroke};

/// Drawing primitives a host renderer (SVG, canvas, GUI) must provide.
///
/// Renderers never compute geometry; every coordinate arrives in pixel space
/// relative to the plot area origin.
pub trait Renderer {
    /// Drop everything drawn so far
    fn clear(&mut self);

    /// Straight poly-line through `points`
    fn draw_line(&mut self, role: LineRole, points: &[Point], stroke: &Stroke);

    /// Axis ticks and labels for a linear scale
    fn draw_axis(&mut self, axis: &AxisSpec);

    /// Colored rectangle plus text
    fn draw_legend_row(&mut self, entry: &LegendEntry);

    /// Filled rectangle
    fn draw_bar(&mut self, bar: &BarSpec);

    /// One labeled tick per category
    fn draw_category_axis(&mut self, axis: &CategoryAxis);
}

/// A primitive call received by [`CommandRecorder`]
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Line {
        role: LineRole,
        points: Vec<Point>,
        stroke: Stroke,
    },
    Axis(AxisSpec),
    LegendRow(LegendEntry),
    Bar(BarSpec),
    CategoryAxis(CategoryAxis),
}

/// Renderer that keeps the current frame as a list of commands.
///
/// Useful for headless hosts and for inspecting what a plan draws.
#[derive(Debug, Clone, Default)]
pub struct CommandRecorder {
    commands: Vec<DrawCommand>,
    clears: usize,
}

impl CommandRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Commands drawn since the last clear
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// How many times the output was cleared
    pub fn clear_count(&self) -> usize {
        self.clears
    }

    pub fn is_blank(&self) -> bool {
        self.commands.is_empty()
    }
}

impl Renderer for CommandRecorder {
    fn clear(&mut self) {
        self.commands.clear();
        self.clears += 1;
    }

    fn draw_line(&mut self, role: LineRole, points: &[Point], stroke: &Stroke) {
        self.commands.push(DrawCommand::Line {
            role,
            points: points.to_vec(),
            stroke: stroke.clone(),
        });
    }

    fn draw_axis(&mut self, axis: &AxisSpec) {
        self.commands.push(DrawCommand::Axis(axis.clone()));
    }

    fn draw_legend_row(&mut self, entry: &LegendEntry) {
        self.commands.push(DrawCommand::LegendRow(entry.clone()));
    }

    fn draw_bar(&mut self, bar: &BarSpec) {
        self.commands.push(DrawCommand::Bar(bar.clone()));
    }

    fn draw_category_axis(&mut self, axis: &CategoryAxis) {
        self.commands.push(DrawCommand::CategoryAxis(axis.clone()));
    }
}
