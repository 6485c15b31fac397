use bevy::math::DVec2;
use bevy::prelude::*;
use bevy::sprite::Anchor;
use bevy_vector_shapes::prelude::*;

use crate::sim::Simulation;
use crate::sim::frame::plot_y;

#[derive(Clone)]
pub struct AngleGraphParams {
    /// Position on screen (top-left corner)
    pub position: Vec2,
    /// Size of the graph widget, one history sample per horizontal unit
    pub size: Vec2,
    /// Series colors for the first and second link
    pub angle1_color: Color,
    pub angle2_color: Color,
    /// Color of gridlines and the frame
    pub grid_color: Color,
    /// Spacing of horizontal gridlines (radians)
    pub gridline_spacing: f64,
    /// Vertical pixels per radian, shared with the plot series
    pub pixels_per_radian: f64,
    /// Label for the graph
    pub label: String,
    pub text_color: Color,
    pub font_size: f32,
}

impl Default for AngleGraphParams {
    fn default() -> Self {
        Self {
            position: Vec2::new(240.0, 330.0),
            size: Vec2::new(400.0, 200.0),
            angle1_color: Color::srgb_u8(0x00, 0xff, 0xff),
            angle2_color: Color::srgb_u8(0xff, 0x66, 0xcc),
            grid_color: Color::srgba(0.5, 0.5, 0.5, 0.5),
            gridline_spacing: 1.0,
            pixels_per_radian: 20.0,
            label: "Angle history".to_string(),
            text_color: Color::srgba(0.9, 0.9, 0.9, 1.0),
            font_size: 14.0,
        }
    }
}

#[derive(Component)]
pub struct AngleGraph {
    pub params: AngleGraphParams,
}

impl AngleGraph {
    /// Convert graph coordinates (origin top-left, +y down) to screen coordinates
    fn to_screen(&self, point: DVec2) -> Vec3 {
        Vec3::new(
            self.params.position.x + point.x as f32,
            self.params.position.y - point.y as f32,
            0.1,
        )
    }

    /// Gridline heights (graph coordinates) that fall inside the widget.
    fn gridlines(&self) -> Vec<f64> {
        let height = self.params.size.y as f64;
        let spacing = self.params.gridline_spacing;
        let scale = self.params.pixels_per_radian;
        if !(spacing > 0.0 && scale > 0.0) {
            return Vec::new();
        }

        // Visible angle range is [-(h/2)/scale, (h/2)/scale]
        let half_range = height / 2.0 / scale;
        let first = (-half_range / spacing).ceil() as i64;
        let last = (half_range / spacing).floor() as i64;
        (first..=last)
            .map(|k| plot_y(k as f64 * spacing, height, scale))
            .collect()
    }
}

/// Clip a series segment to the rows `0..=height` of the widget. Segments
/// lying wholly above or below it, or with a non-finite end, are dropped.
fn clip_segment(a: DVec2, b: DVec2, height: f64) -> Option<(DVec2, DVec2)> {
    if !(a.is_finite() && b.is_finite()) {
        return None;
    }
    if (a.y < 0.0 && b.y < 0.0) || (a.y > height && b.y > height) {
        return None;
    }

    // Move `p` along the segment towards `q` until it sits on the edge it crossed
    let clip = |p: DVec2, q: DVec2| {
        let y = p.y.clamp(0.0, height);
        if y == p.y {
            return p;
        }
        let t = (y - p.y) / (q.y - p.y);
        DVec2::new(p.x + (q.x - p.x) * t, y)
    };
    Some((clip(a, b), clip(b, a)))
}

/// System to draw both angle series over the history window
pub fn draw_angle_graph(
    mut painter: ShapePainter,
    query: Query<&AngleGraph>,
    sim: Res<Simulation>,
) {
    let frame = sim.frame();

    for graph in query.iter() {
        let pos = graph.params.position;
        let size = graph.params.size;

        // Frame
        let base = painter.transform;
        painter.set_color(graph.params.grid_color);
        painter.thickness = 1.0;
        painter.hollow = true;
        painter.translate(Vec3::new(pos.x + size.x / 2.0, pos.y - size.y / 2.0, 0.0));
        painter.rect(size);
        painter.transform = base;
        painter.hollow = false;

        // Horizontal gridlines at whole multiples of the spacing
        painter.thickness = 0.25;
        for y in graph.gridlines() {
            painter.line(
                graph.to_screen(DVec2::new(0.0, y)),
                graph.to_screen(DVec2::new(size.x as f64, y)),
            );
        }

        painter.thickness = 2.0;
        let height = size.y as f64;
        for (series, color) in [
            (&frame.angle1_series, graph.params.angle1_color),
            (&frame.angle2_series, graph.params.angle2_color),
        ] {
            painter.set_color(color);
            for pair in series.windows(2) {
                if let Some((a, b)) = clip_segment(pair[0], pair[1], height) {
                    painter.line(graph.to_screen(a), graph.to_screen(b));
                }
            }
        }
    }
}

/// Spawn a graph widget entity with its title label
pub fn spawn_angle_graph(
    commands: &mut Commands,
    params: AngleGraphParams,
) -> Entity {
    let title = (
        Text2d::new(&params.label),
        TextFont {
            font_size: params.font_size,
            ..default()
        },
        TextColor(params.text_color),
        Transform::from_translation(Vec3::new(params.position.x + 5.0, params.position.y + 20.0, 0.2)),
        Anchor::TOP_LEFT,
    );

    commands.spawn(title);
    commands.spawn((
        AngleGraph { params },
        Name::new("AngleGraph"),
    )).id()
}
