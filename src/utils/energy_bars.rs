use bevy::prelude::*;
use bevy::sprite::Anchor;
use bevy_vector_shapes::prelude::*;

use crate::sim::Simulation;

#[derive(Clone)]
pub struct EnergyChartParams {
    /// Position on screen (top-left corner)
    pub position: Vec2,
    pub size: Vec2,
    /// Left edge of each bar, measured from the chart's left edge
    pub kinetic_x: f32,
    pub potential_x: f32,
    pub bar_width: f32,
    pub kinetic_color: Color,
    pub potential_color: Color,
    pub text_color: Color,
    pub font_size: f32,
}

impl Default for EnergyChartParams {
    fn default() -> Self {
        Self {
            position: Vec2::new(240.0, 60.0),
            size: Vec2::new(260.0, 200.0),
            kinetic_x: 60.0,
            potential_x: 160.0,
            bar_width: 40.0,
            kinetic_color: Color::srgb_u8(0xe6, 0x39, 0x46),
            potential_color: Color::srgb_u8(0x1d, 0x8c, 0xf8),
            text_color: Color::srgba(0.9, 0.9, 0.9, 1.0),
            font_size: 14.0,
        }
    }
}

#[derive(Component)]
pub struct EnergyChart {
    pub params: EnergyChartParams,
}

impl EnergyChart {
    /// Center of a bar of the given height whose left edge sits at `left`.
    /// Bars grow upward from the chart bottom.
    fn bar_center(&self, left: f32, height: f32) -> Vec3 {
        let bottom = self.params.position.y - self.params.size.y;
        Vec3::new(
            self.params.position.x + left + self.params.bar_width / 2.0,
            bottom + height / 2.0,
            0.0,
        )
    }
}

pub fn draw_energy_chart(
    mut painter: ShapePainter,
    query: Query<&EnergyChart>,
    sim: Res<Simulation>,
) {
    let frame = sim.frame();

    for chart in query.iter() {
        let base = painter.transform;
        painter.hollow = false;

        for (left, height, color) in [
            (chart.params.kinetic_x, frame.kinetic_bar as f32, chart.params.kinetic_color),
            (chart.params.potential_x, frame.potential_bar as f32, chart.params.potential_color),
        ] {
            // NaN or empty bars draw nothing
            if !(height > 0.0 && height.is_finite()) {
                continue;
            }
            painter.transform = base;
            painter.set_color(color);
            painter.translate(chart.bar_center(left, height));
            painter.rect(Vec2::new(chart.params.bar_width, height));
        }

        painter.transform = base;
    }
}

pub fn spawn_energy_chart(
    commands: &mut Commands,
    params: EnergyChartParams,
) -> Entity {
    let label_y = params.position.y - params.size.y - 4.0;
    for (text, left) in [("KE", params.kinetic_x), ("PE", params.potential_x)] {
        commands.spawn((
            Text2d::new(text),
            TextFont {
                font_size: params.font_size,
                ..default()
            },
            TextColor(params.text_color),
            Transform::from_translation(Vec3::new(
                params.position.x + left + params.bar_width / 2.0,
                label_y,
                0.2,
            )),
            Anchor::TOP_CENTER,
        ));
    }

    commands.spawn((
        EnergyChart { params },
        Name::new("EnergyChart"),
    )).id()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bars_rise_from_chart_bottom() {
        let chart = EnergyChart {
            params: EnergyChartParams {
                position: Vec2::new(100.0, 50.0),
                size: Vec2::new(260.0, 200.0),
                ..default()
            },
        };
        // bottom edge at 50 - 200 = -150
        assert_eq!(chart.bar_center(60.0, 80.0), Vec3::new(180.0, -110.0, 0.0));
    }
}
