use bevy::prelude::*;
use bevy_egui::EguiContexts;
use bevy_egui::egui;
use particle_sandbox::{ForceModel, GravityPreset, Simulation};

use crate::systems::UiState;

pub fn ui_controls(
    mut contexts: EguiContexts,
    mut sim: ResMut<Simulation>,
    mut ui_state: ResMut<UiState>,
    mut frames_rendered: Local<usize>,
) {
    if *frames_rendered < 5 {
        *frames_rendered += 1;
        return;
    }

    let Ok(ctx) = contexts.ctx_mut() else {
        return;
    };

    let model = sim.model();
    egui::Window::new("Simulation Controls")
        .default_pos(egui::pos2(10.0, 10.0))
        .max_size([320.0, 420.0])
        .vscroll(true)
        .show(ctx, |ui| {
            ui.heading("Spawning");
            let mass_label = match model {
                ForceModel::UniformField => "Mass",
                ForceModel::PairwiseGravity => "Mass (×10²⁴)",
            };
            ui.add(egui::Slider::new(&mut sim.spawn.mass, 1.0..=100.0).text(mass_label));
            if model == ForceModel::UniformField {
                ui.add(egui::Slider::new(&mut sim.spawn.velocity, 0.0..=20.0).text("Velocity"));
            }
            if ui.button("Spawn Body").clicked() {
                // Rejections are already logged by the simulation.
                let _ = sim.spawn_at_center();
            }

            ui.separator();
            ui.heading("Physics");
            match model {
                ForceModel::UniformField => {
                    ui.add(egui::Slider::new(&mut sim.params.gravity, 0.0..=20.0).text("Gravity"));
                    ui.add(egui::Slider::new(&mut sim.params.bounce, 0.0..=1.0).text("Bounce"));
                    ui.add(
                        egui::Slider::new(&mut sim.params.air_resistance, 0.0..=0.1)
                            .text("Air Resistance"),
                    );
                }
                ForceModel::PairwiseGravity => {
                    ui.add(
                        egui::Slider::new(&mut sim.params.time_scale, 0.1..=5.0)
                            .text("Time Scale"),
                    );
                    let mut preset = sim.gravity_preset();
                    egui::ComboBox::from_label("Gravity Preset")
                        .selected_text(preset.name())
                        .show_ui(ui, |ui| {
                            for option in GravityPreset::ALL {
                                ui.selectable_value(&mut preset, option, option.name());
                            }
                        });
                    if preset != sim.gravity_preset() {
                        sim.apply_gravity_preset(preset);
                    }
                }
            }

            ui.separator();
            ui.heading("Display");
            let mut show_trails = sim.display().show_trails;
            if ui.checkbox(&mut show_trails, "Show Trails (T)").changed() {
                sim.set_show_trails(show_trails);
            }
            let mut show_vectors = sim.display().show_vectors;
            if ui.checkbox(&mut show_vectors, "Show Vectors (V)").changed() {
                sim.set_show_vectors(show_vectors);
            }
            let mut show_grid = sim.display().show_grid;
            if ui.checkbox(&mut show_grid, "Show Grid (G)").changed() {
                sim.set_show_grid(show_grid);
            }

            ui.separator();
            ui.heading("Controls");
            ui.horizontal(|ui| {
                let label = if sim.is_paused() { "Resume" } else { "Pause" };
                if ui.button(label).clicked() {
                    sim.toggle_pause();
                }
                if ui.button("Reset").clicked() {
                    sim.reset();
                }
                if ui.button("Help").clicked() {
                    ui_state.show_help = !ui_state.show_help;
                }
            });
            ui.label(format!("Bodies: {}", sim.bodies().len()));
        });

    egui::Window::new("Help")
        .open(&mut ui_state.show_help)
        .default_pos(egui::pos2(360.0, 10.0))
        .show(ctx, |ui| {
            ui.label("Drag with the left mouse button to launch a body.");
            ui.label("Space: pause / resume");
            ui.label("R: reset");
            ui.label("T / V / G: trails, vectors, grid");
            ui.label("H: toggle this panel");
        });
}
