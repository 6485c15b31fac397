use bevy::prelude::*;
use bevy::window::PresentMode;
use bevy_vector_shapes::prelude::*;

use pendulum_viz::PendulumPlugin;
use pendulum_viz::sim::config::SimConfig;

#[cfg(feature = "fps_overlay")]
use bevy::dev_tools::fps_overlay::FpsOverlayPlugin;

fn main() {
    let mut app = App::new();

    app
        // Force VSync: one simulation step per displayed frame
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Double Pendulum".into(),
                present_mode: PresentMode::AutoVsync,

                #[cfg(target_arch = "wasm32")]
                canvas: Some("#bevy".into()),
                // Keep the WebGL canvas exactly as big as its parent
                #[cfg(target_arch = "wasm32")]
                fit_canvas_to_parent: true,

                resizable: true,
                ..default()
            }),
            ..default()
        }))
        .add_plugins(Shape2dPlugin::default())
        .insert_resource(ClearColor(Color::BLACK))
        .add_plugins(PendulumPlugin {
            config: SimConfig::default(),
            step_policy: None,
        });

    #[cfg(feature = "fps_overlay")]
    app.add_plugins(FpsOverlayPlugin::default());

    app.run();
}
