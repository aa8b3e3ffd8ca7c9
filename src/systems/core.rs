use bevy::input::touch::Touches;
use bevy::log::debug;
use bevy::math::DVec2;
use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use bevy_egui::input::EguiWantsInput;
use particle_sandbox::Simulation;
use particle_sandbox::render::{self, Canvas, Paint};

/// Drag gesture in progress, in canvas coordinates.
///
/// Fed by the mouse or by a single touch; `touch_id` is set while a touch owns it.
#[derive(Resource, Default)]
pub struct DragGesture {
    pub start: Option<DVec2>,
    pub current: Option<DVec2>,
    pub touch_id: Option<u64>,
}

impl DragGesture {
    pub fn begin(&mut self, point: DVec2) {
        self.start = Some(point);
        self.current = Some(point);
    }

    pub fn is_active(&self) -> bool {
        self.start.is_some()
    }

    pub fn update(&mut self, point: DVec2) {
        if self.is_active() {
            self.current = Some(point);
        }
    }

    /// Ends the gesture at `end`, returning the drag to spawn from.
    pub fn finish(&mut self, end: DVec2) -> Option<(DVec2, DVec2)> {
        let start = self.start;
        self.cancel();
        start.map(|start| (start, end))
    }

    pub fn cancel(&mut self) {
        self.start = None;
        self.current = None;
        self.touch_id = None;
    }
}

/// Panel visibility toggled from the keyboard.
#[derive(Resource, Default)]
pub struct UiState {
    pub show_help: bool,
}

/// Sets up the camera. The canvas origin maps to the window's top-left corner.
pub fn setup_scene(mut commands: Commands) {
    commands.spawn(Camera2d);
}

/// Fixed tick: advances the simulation by one step.
pub fn step_simulation(mut sim: ResMut<Simulation>) {
    sim.step();
}

/// Keeps the walls on the window edges.
pub fn sync_bounds_to_window(
    windows: Query<&Window, With<PrimaryWindow>>,
    mut sim: ResMut<Simulation>,
) {
    let Ok(window) = windows.single() else {
        return;
    };
    let (width, height) = (window.width() as f64, window.height() as f64);
    let bounds = sim.bounds();
    if bounds.width != width || bounds.height != height {
        sim.resize(width, height);
    }
}

/// Keyboard shortcuts handled by [`keyboard_shortcuts`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Shortcut {
    Pause,
    Reset,
    Help,
    Trails,
    Vectors,
    Grid,
}

impl Shortcut {
    const BINDINGS: [(KeyCode, Shortcut); 6] = [
        (KeyCode::Space, Shortcut::Pause),
        (KeyCode::KeyR, Shortcut::Reset),
        (KeyCode::KeyH, Shortcut::Help),
        (KeyCode::KeyT, Shortcut::Trails),
        (KeyCode::KeyV, Shortcut::Vectors),
        (KeyCode::KeyG, Shortcut::Grid),
    ];

    pub fn apply(self, sim: &mut Simulation, ui_state: &mut UiState) {
        match self {
            Shortcut::Pause => {
                sim.toggle_pause();
            }
            Shortcut::Reset => sim.reset(),
            Shortcut::Help => ui_state.show_help = !ui_state.show_help,
            Shortcut::Trails => {
                let show = !sim.display().show_trails;
                sim.set_show_trails(show);
            }
            Shortcut::Vectors => {
                let show = !sim.display().show_vectors;
                sim.set_show_vectors(show);
            }
            Shortcut::Grid => {
                let show = !sim.display().show_grid;
                sim.set_show_grid(show);
            }
        }
    }
}

/// Applies keyboard shortcuts unless egui has keyboard focus.
pub fn keyboard_shortcuts(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut sim: ResMut<Simulation>,
    mut ui_state: ResMut<UiState>,
    egui_input: Res<EguiWantsInput>,
) {
    if egui_input.wants_any_keyboard_input() {
        return;
    }

    for (key, shortcut) in Shortcut::BINDINGS {
        if keyboard.just_pressed(key) {
            shortcut.apply(&mut sim, &mut ui_state);
        }
    }
}

/// Turns a left-button drag into a spawn. Leaving the window cancels the drag.
pub fn handle_drag(
    mouse: Res<ButtonInput<MouseButton>>,
    windows: Query<&Window, With<PrimaryWindow>>,
    mut drag: ResMut<DragGesture>,
    mut sim: ResMut<Simulation>,
    egui_input: Res<EguiWantsInput>,
) {
    if drag.touch_id.is_some() {
        return;
    }
    let Ok(window) = windows.single() else {
        return;
    };
    let Some(cursor) = window.cursor_position() else {
        drag.cancel();
        return;
    };
    let cursor = cursor.as_dvec2();

    if mouse.just_pressed(MouseButton::Left) && !egui_input.wants_any_pointer_input() {
        drag.begin(cursor);
    }

    if mouse.just_released(MouseButton::Left) {
        spawn_from_drag(&mut sim, drag.finish(cursor));
    } else {
        drag.update(cursor);
    }
}

/// Same gesture for touch screens. The first finger down owns the drag.
pub fn handle_touch_drag(
    touches: Res<Touches>,
    mut drag: ResMut<DragGesture>,
    mut sim: ResMut<Simulation>,
    egui_input: Res<EguiWantsInput>,
) {
    if !drag.is_active()
        && !egui_input.wants_any_pointer_input()
        && let Some(touch) = touches.iter_just_pressed().next()
    {
        drag.begin(touch.position().as_dvec2());
        drag.touch_id = Some(touch.id());
    }

    let Some(id) = drag.touch_id else {
        return;
    };

    if touches.iter_just_canceled().any(|touch| touch.id() == id) {
        drag.cancel();
    } else if let Some(touch) = touches.iter_just_released().find(|touch| touch.id() == id) {
        spawn_from_drag(&mut sim, drag.finish(touch.position().as_dvec2()));
    } else if let Some(touch) = touches.get_pressed(id) {
        drag.update(touch.position().as_dvec2());
    }
}

fn spawn_from_drag(sim: &mut Simulation, gesture: Option<(DVec2, DVec2)>) {
    if let Some((start, end)) = gesture
        && let Ok(index) = sim.spawn(start, Some(end))
    {
        debug!("drag spawned body {index}");
    }
}

/// Draws the simulation and any drag preview with gizmos.
pub fn draw_simulation(
    mut gizmos: Gizmos,
    sim: Res<Simulation>,
    drag: Res<DragGesture>,
    windows: Query<&Window, With<PrimaryWindow>>,
) {
    let Ok(window) = windows.single() else {
        return;
    };
    let mut canvas = GizmoCanvas {
        gizmos: &mut gizmos,
        half_size: window.size() / 2.0,
    };

    render::render(&sim, &mut canvas);

    if let (Some(start), Some(current)) = (drag.start, drag.current) {
        render::render_drag(&sim, start, current, &mut canvas);
    }
}

/// Canvas backed by Bevy gizmos, centred on a camera at the origin.
struct GizmoCanvas<'a, 'w, 's> {
    gizmos: &'a mut Gizmos<'w, 's>,
    half_size: Vec2,
}

impl Canvas for GizmoCanvas<'_, '_, '_> {
    fn circle(&mut self, center: DVec2, radius: f64, paint: Paint) {
        let center = canvas_to_world(center, self.half_size);
        self.gizmos.circle_2d(
            Isometry2d::from_translation(center),
            radius as f32,
            paint_color(paint),
        );
    }

    fn line(&mut self, from: DVec2, to: DVec2, paint: Paint) {
        self.gizmos.line_2d(
            canvas_to_world(from, self.half_size),
            canvas_to_world(to, self.half_size),
            paint_color(paint),
        );
    }

    fn polyline(&mut self, points: &[DVec2], paint: Paint) {
        let half_size = self.half_size;
        self.gizmos.linestrip_2d(
            points.iter().map(|p| canvas_to_world(*p, half_size)),
            paint_color(paint),
        );
    }
}

/// Canvas coordinates (top-left origin, `y` down) to world space.
pub fn canvas_to_world(point: DVec2, half_size: Vec2) -> Vec2 {
    Vec2::new(point.x as f32 - half_size.x, half_size.y - point.y as f32)
}

fn paint_color(paint: Paint) -> Color {
    match paint {
        Paint::Body(c) => Color::hsl(c.hue, c.saturation, c.lightness),
        Paint::Trail(c) => Color::hsla(c.hue, c.saturation, c.lightness, 0.25),
        Paint::Vector => Color::srgba(1.0, 1.0, 1.0, 0.5),
        Paint::Grid => Color::srgba_u8(124, 77, 255, 26),
        Paint::DragLine => Color::srgba_u8(124, 77, 255, 128),
        Paint::Preview => Color::srgba_u8(124, 77, 255, 51),
    }
}
