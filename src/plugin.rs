use bevy::math::DVec2;
use bevy::prelude::*;
use bevy::{
    core_pipeline::tonemapping::{DebandDither, Tonemapping},
    post_process::bloom::Bloom,
};
use bevy_vector_shapes::prelude::*;
use log::{error, info};

use crate::controls::{self, HELP_TEXT, IntroOverlay};
use crate::sim::config::SimConfig;
use crate::sim::frame::{ClearMode, FrameOutput};
use crate::sim::{Simulation, StepPolicy};
use crate::utils::energy_bars::{EnergyChartParams, draw_energy_chart, spawn_energy_chart};
use crate::utils::graph::{AngleGraphParams, draw_angle_graph, spawn_angle_graph};
use crate::utils::mesh_ribbon::{MeshRibbon, MeshRibbonParams, spawn_mesh_ribbon, update_ribbon_mesh};

const ARM_COLOR: Color = Color::WHITE;
const BOB_COLOR: Color = Color::srgb(0.902, 0.224, 0.275); // #e63946
const PIVOT_COLOR: Color = Color::srgb(0.56, 0.57, 0.64);
const TRAIL_COLOR: Color = Color::srgb(0.9, 0.9, 1.0);

/// Top-left corners, in world space, of the three panels.
#[derive(Resource, Debug, Clone)]
pub struct Layout {
    pub canvas: Vec2,
    pub graph: Vec2,
    pub energy: Vec2,
}

impl Layout {
    /// Panels side by side: the pendulum canvas on the left, the graph and
    /// the energy chart stacked to its right, centred on the world origin.
    pub fn for_config(config: &SimConfig) -> Self {
        let (canvas_w, canvas_h) = (config.canvas_size.0 as f32, config.canvas_size.1 as f32);
        let (graph_w, graph_h) = (config.graph_size.0 as f32, config.graph_size.1 as f32);
        let energy_w = config.energy_size.0 as f32;
        let gap = 40.0;

        let total_w = canvas_w + gap + graph_w.max(energy_w);
        let left = -total_w / 2.0;
        let top = canvas_h / 2.0;
        let column = left + canvas_w + gap;

        Self {
            canvas: Vec2::new(left, top),
            graph: Vec2::new(column, top - gap),
            energy: Vec2::new(column, top - gap - graph_h - 2.0 * gap),
        }
    }

    /// Canvas coordinates (origin top-left, +y down) to world coordinates.
    pub fn canvas_to_world(&self, point: DVec2, z: f32) -> Vec3 {
        Vec3::new(self.canvas.x + point.x as f32, self.canvas.y - point.y as f32, z)
    }
}

#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Readout {
    Angle1,
    Angle2,
    Energy,
}

#[derive(Component)]
pub struct IntroPanel;

/// Which bob a fading trail follows.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trail {
    Bob1,
    Bob2,
}

impl Trail {
    fn name(self) -> &'static str {
        match self {
            Trail::Bob1 => "bob1_trail",
            Trail::Bob2 => "bob2_trail",
        }
    }

    /// Canvas position the trail follows this frame.
    fn target(self, frame: &FrameOutput) -> DVec2 {
        match self {
            Trail::Bob1 => frame.joint1,
            Trail::Bob2 => frame.joint2,
        }
    }
}

pub struct PendulumPlugin {
    pub config: SimConfig,
    pub step_policy: Option<StepPolicy>,
}

impl Default for PendulumPlugin {
    fn default() -> Self {
        Self {
            config: SimConfig::default(),
            step_policy: None,
        }
    }
}

impl Plugin for PendulumPlugin {
    fn build(&self, app: &mut App) {
        let config = match self.config.validate() {
            Ok(()) => self.config.clone(),
            Err(err) => {
                error!("invalid configuration, using defaults: {err}");
                SimConfig::default()
            }
        };
        let layout = Layout::for_config(&config);

        let mut sim = Simulation::new(config);
        if let Some(policy) = self.step_policy {
            sim = sim.with_step_policy(policy);
        }
        info!("starting double pendulum with {:?}, step {:?}", sim.params(), sim.step_policy());

        app.insert_resource(sim)
            .insert_resource(layout)
            .init_resource::<IntroOverlay>()
            .add_systems(Startup, setup)
            .add_systems(
                Update,
                (
                    controls::handle_keyboard,
                    tick_simulation,
                    (
                        draw_pendulum,
                        draw_angle_graph,
                        draw_energy_chart,
                        update_readouts,
                        update_trail,
                        sync_intro,
                    ),
                )
                    .chain(),
            );
    }
}

fn setup(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<ColorMaterial>>,
    sim: Res<Simulation>,
    layout: Res<Layout>,
) {
    commands.spawn((
        Camera2d,
        Camera {
            clear_color: ClearColorConfig::Custom(Color::BLACK),
            ..default()
        },
        Tonemapping::TonyMcMapface,
        Bloom::default(),
        DebandDither::Enabled,
    ));

    let config = sim.config();

    for trail in [Trail::Bob1, Trail::Bob2] {
        let ribbon = spawn_mesh_ribbon(&mut commands, &mut meshes, &mut materials, trail.name().to_string(), MeshRibbonParams {
            width: 2.0,
            color: TRAIL_COLOR,
            fade_per_frame: config.trace_fade_alpha as f32,
        });
        commands.entity(ribbon).insert(trail);
    }

    spawn_angle_graph(&mut commands, AngleGraphParams {
        position: layout.graph,
        size: Vec2::new(config.graph_size.0 as f32, config.graph_size.1 as f32),
        pixels_per_radian: config.graph_pixels_per_radian,
        ..default()
    });

    spawn_energy_chart(&mut commands, EnergyChartParams {
        position: layout.energy,
        size: Vec2::new(config.energy_size.0 as f32, config.energy_size.1 as f32),
        ..default()
    });

    // Readouts and key help, top-left of the window
    commands
        .spawn(Node {
            position_type: PositionType::Absolute,
            left: Val::Px(12.0),
            top: Val::Px(12.0),
            flex_direction: FlexDirection::Column,
            row_gap: Val::Px(4.0),
            ..default()
        })
        .with_children(|parent| {
            for readout in [Readout::Angle1, Readout::Angle2, Readout::Energy] {
                parent.spawn((
                    Text::new(""),
                    TextFont { font_size: 16.0, ..default() },
                    TextColor(Color::WHITE),
                    readout,
                ));
            }
            parent.spawn((
                Text::new(HELP_TEXT),
                TextFont { font_size: 12.0, ..default() },
                TextColor(Color::srgba(0.7, 0.7, 0.7, 1.0)),
            ));
        });

    commands
        .spawn((
            Node {
                position_type: PositionType::Absolute,
                left: Val::Percent(30.0),
                top: Val::Percent(35.0),
                width: Val::Percent(40.0),
                padding: UiRect::all(Val::Px(24.0)),
                flex_direction: FlexDirection::Column,
                row_gap: Val::Px(12.0),
                ..default()
            },
            BackgroundColor(Color::srgba(0.08, 0.08, 0.12, 0.92)),
            IntroPanel,
        ))
        .with_children(|parent| {
            parent.spawn((
                Text::new("Double Pendulum"),
                TextFont { font_size: 28.0, ..default() },
                TextColor(Color::WHITE),
            ));
            parent.spawn((
                Text::new(
                    "Two rigid links swinging under gravity. Tiny changes in the start \
                     grow into completely different motion.\n\n\
                     Adjust lengths, masses and gravity with the keys listed top-left, \
                     press C for a fading trail and Space to reset.\n\n\
                     Press Enter to start.",
                ),
                TextFont { font_size: 16.0, ..default() },
                TextColor(Color::srgba(0.85, 0.85, 0.85, 1.0)),
            ));
        });
}

fn tick_simulation(time: Res<Time>, mut sim: ResMut<Simulation>) {
    sim.tick(time.delta());
}

fn draw_pendulum(mut painter: ShapePainter, sim: Res<Simulation>, layout: Res<Layout>) {
    let frame = sim.frame();

    // --- desired stacking (back → front) ---
    // 1) rods (z = 0.0)
    // 2) pivot circle (z = +0.001)
    // 3) bob circles (z = +0.002)
    let pivot = layout.canvas_to_world(frame.anchor, 0.0);
    let bob1_pos = layout.canvas_to_world(frame.joint1, 0.0);
    let bob2_pos = layout.canvas_to_world(frame.joint2, 0.0);

    let base = painter.transform;

    // --- rods ---
    painter.transform = base;
    painter.thickness = 2.0;
    painter.set_color(ARM_COLOR);
    painter.line(pivot, bob1_pos);
    painter.line(bob1_pos, bob2_pos);

    // --- pivot ---
    let mut t = base;
    t.translation.z += 0.001;
    painter.transform = t;
    painter.hollow = false;
    painter.set_color(PIVOT_COLOR);
    painter.translate(pivot);
    painter.circle(4.0);

    // --- bobs, radius follows mass ---
    for (pos, radius) in [(bob1_pos, frame.bob_radii.0), (bob2_pos, frame.bob_radii.1)] {
        let mut t = base;
        t.translation.z += 0.002;
        painter.transform = t;
        painter.translate(pos);
        painter.set_color(BOB_COLOR);
        painter.circle(radius.max(0.0) as f32);
    }

    painter.transform = base;
}

fn update_readouts(sim: Res<Simulation>, mut query: Query<(&mut Text, &Readout)>) {
    let frame = sim.frame();
    for (mut text, readout) in query.iter_mut() {
        let source = match readout {
            Readout::Angle1 => &frame.angle1_text,
            Readout::Angle2 => &frame.angle2_text,
            Readout::Energy => &frame.energy_text,
        };
        if text.0 != *source {
            text.0.clone_from(source);
        }
    }
}

/// Feeds the fading trails in trace mode and wipes them when trace is off.
fn update_trail(
    sim: Res<Simulation>,
    layout: Res<Layout>,
    mut query: Query<(&mut MeshRibbon, &Trail)>,
    mut meshes: ResMut<Assets<Mesh>>,
) {
    let frame = sim.frame();
    for (mut ribbon, trail) in query.iter_mut() {
        match frame.clear_mode {
            ClearMode::Fade { .. } => {
                let pos = layout.canvas_to_world(trail.target(frame), 0.0);
                if pos.is_finite() {
                    ribbon.push(pos);
                }
            }
            ClearMode::Clear => {
                if ribbon.positions.is_empty() {
                    continue;
                }
                ribbon.clear();
            }
        }
        update_ribbon_mesh(&ribbon, &mut meshes);
    }
}

fn sync_intro(intro: Res<IntroOverlay>, mut query: Query<&mut Visibility, With<IntroPanel>>) {
    if !intro.is_changed() {
        return;
    }
    for mut visibility in query.iter_mut() {
        *visibility = if intro.is_visible() {
            Visibility::Inherited
        } else {
            Visibility::Hidden
        };
    }
}
