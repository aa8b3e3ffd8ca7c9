mod systems;

use anyhow::ensure;
use bevy::prelude::*;
use bevy::window::WindowResolution;
use bevy_egui::{EguiPlugin, EguiPrimaryContextPass};
use clap::{Parser, ValueEnum};
use particle_sandbox::{Bounds, ForceModel, Simulation};

use crate::systems::*;

/// Rate of the fixed simulation tick.
const FRAME_DT: f64 = 1.0 / 60.0;

/// Command-line names for [`ForceModel`].
#[derive(Clone, Copy, Debug, ValueEnum)]
enum ModelArg {
    /// Uniform downward field with wall bounces.
    Uniform,
    /// Pairwise Newtonian attraction.
    Gravity,
}

impl From<ModelArg> for ForceModel {
    fn from(arg: ModelArg) -> Self {
        match arg {
            ModelArg::Uniform => ForceModel::UniformField,
            ModelArg::Gravity => ForceModel::PairwiseGravity,
        }
    }
}

#[derive(Parser, Debug)]
#[command(about = "Interactive 2D particle and gravity sandbox")]
struct Args {
    /// Force model driving the bodies.
    #[arg(long, value_enum, default_value_t = ModelArg::Uniform)]
    model: ModelArg,
    /// Initial window width in logical pixels.
    #[arg(long, default_value_t = 1200)]
    width: u32,
    /// Initial window height in logical pixels.
    #[arg(long, default_value_t = 800)]
    height: u32,
    /// Seed for spawn randomness.
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    ensure!(
        args.width > 0 && args.height > 0,
        "window size must be positive, got {}x{}",
        args.width,
        args.height
    );

    let model = ForceModel::from(args.model);
    let bounds = Bounds::new(args.width as f64, args.height as f64);
    let simulation = match args.seed {
        Some(seed) => Simulation::with_seed(model, bounds, seed),
        None => Simulation::new(model, bounds),
    };

    let title = match model {
        ForceModel::UniformField => "Particle Sandbox",
        ForceModel::PairwiseGravity => "Gravity Sandbox",
    };

    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: title.into(),
                resolution: WindowResolution::new(args.width, args.height),
                ..default()
            }),
            ..default()
        }))
        .add_plugins(EguiPlugin::default())
        .insert_resource(ClearColor(Color::BLACK))
        .insert_resource(simulation)
        .init_resource::<DragGesture>()
        .init_resource::<UiState>()
        .add_systems(EguiPrimaryContextPass, ui_controls)
        .add_systems(Startup, setup_scene)
        .add_systems(
            Update,
            (
                sync_bounds_to_window,
                keyboard_shortcuts,
                handle_drag,
                handle_touch_drag,
                draw_simulation,
            )
                .chain(),
        )
        .add_systems(FixedUpdate, step_simulation)
        .insert_resource(Time::<Fixed>::from_seconds(FRAME_DT))
        .run();

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn model_flag_selects_force_model() {
        let args = Args::try_parse_from(["particle-sandbox", "--model", "gravity"])
            .expect("valid arguments");
        assert_eq!(ForceModel::from(args.model), ForceModel::PairwiseGravity);

        let args = Args::try_parse_from(["particle-sandbox"]).expect("valid arguments");
        assert_eq!(ForceModel::from(args.model), ForceModel::UniformField);
        assert_eq!((args.width, args.height), (1200, 800));
    }
}
