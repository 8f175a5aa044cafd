/// Frame renderer.
///
/// Issues the immediate-mode draw calls for one frame against a [`Canvas`].
/// The host owns the real canvas and the frame loop; here a frame is a pure
/// function of (scene, frame index), so the same sequence can be recorded,
/// encoded into a flat buffer for the JS side, or inspected in tests.

use std::ops::{Deref, DerefMut};

use super::scene::{SceneConfig, SceneState};
use super::types::{Rgb, Vec3D};
use crate::math::math3d::TransformStack;

/// Immediate-mode drawing API provided by the host.
pub trait Canvas {
    fn background(&mut self, gray: f64);
    fn ambient_light(&mut self, gray: f64);
    fn point_light(&mut self, color: Rgb, position: Vec3D);
    fn rotate_y(&mut self, angle: f64);
    fn push(&mut self);
    fn pop(&mut self);
    fn translate(&mut self, offset: Vec3D);
    fn ambient_material(&mut self, color: Rgb);
    fn specular_material(&mut self, gray: f64);
    fn shininess(&mut self, value: f64);
    /// Axis-aligned cube of edge `size` centered at the local origin.
    fn draw_box(&mut self, size: f64);
}

/// Saved transform scope: `push` on creation, `pop` on drop.
pub struct TransformGuard<'a, C: Canvas + ?Sized> {
    canvas: &'a mut C,
}

impl<'a, C: Canvas + ?Sized> TransformGuard<'a, C> {
    pub fn new(canvas: &'a mut C) -> Self {
        canvas.push();
        Self { canvas }
    }
}

impl<C: Canvas + ?Sized> Deref for TransformGuard<'_, C> {
    type Target = C;

    fn deref(&self) -> &C {
        self.canvas
    }
}

impl<C: Canvas + ?Sized> DerefMut for TransformGuard<'_, C> {
    fn deref_mut(&mut self) -> &mut C {
        self.canvas
    }
}

impl<C: Canvas + ?Sized> Drop for TransformGuard<'_, C> {
    fn drop(&mut self) {
        self.canvas.pop();
    }
}

/// Global Y rotation for `frame_index`.
#[inline]
pub fn rotation_angle(config: &SceneConfig, frame_index: u32) -> f64 {
    frame_index as f64 * config.rotation_speed
}

/// Orbiting point light position for `frame_index`, in the XZ plane.
pub fn light_position(config: &SceneConfig, frame_index: u32) -> Vec3D {
    let angle = frame_index as f64 * config.light_orbit_speed;
    let (s, c) = angle.sin_cos();
    Vec3D::new(config.light_orbit_radius * c, 0.0, config.light_orbit_radius * s)
}

/// Draw one frame.
pub fn render_frame<C: Canvas + ?Sized>(scene: &SceneState, frame_index: u32, canvas: &mut C) {
    let config = scene.config();

    canvas.background(config.background);
    canvas.ambient_light(config.ambient_light);
    canvas.point_light(Rgb::WHITE, light_position(config, frame_index));
    canvas.rotate_y(rotation_angle(config, frame_index));

    let size = scene.cube_size();
    for pos in scene.positions() {
        let mut scope = TransformGuard::new(canvas);
        scope.translate(*pos);
        scope.ambient_material(scene.cube_color(pos.z));
        scope.specular_material(config.specular);
        scope.shininess(config.shininess);
        scope.draw_box(size);
    }
}

/// Cube centers in world space after the frame's global rotation.
pub fn world_positions(scene: &SceneState, frame_index: u32) -> Vec<Vec3D> {
    let mut stack = TransformStack::new();
    stack.rotate_y(rotation_angle(scene.config(), frame_index));
    scene
        .positions()
        .iter()
        .map(|pos| {
            stack.push();
            stack.translate(pos);
            let world = stack.apply(&Vec3D::ORIGIN);
            stack.pop();
            world
        })
        .collect()
}

// ─── Command recording ───────────────────────────────────────

/// One recorded canvas call.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DrawCommand {
    Background(f64),
    AmbientLight(f64),
    PointLight { color: Rgb, position: Vec3D },
    RotateY(f64),
    Push,
    Translate(Vec3D),
    AmbientMaterial(Rgb),
    SpecularMaterial(f64),
    Shininess(f64),
    Box(f64),
    Pop,
}

/// Canvas that records every call instead of drawing.
#[derive(Clone, Debug, Default)]
pub struct CommandRecorder {
    pub commands: Vec<DrawCommand>,
}

impl CommandRecorder {
    pub fn with_capacity(n: usize) -> Self {
        Self { commands: Vec::with_capacity(n) }
    }
}

impl Canvas for CommandRecorder {
    fn background(&mut self, gray: f64) {
        self.commands.push(DrawCommand::Background(gray));
    }

    fn ambient_light(&mut self, gray: f64) {
        self.commands.push(DrawCommand::AmbientLight(gray));
    }

    fn point_light(&mut self, color: Rgb, position: Vec3D) {
        self.commands.push(DrawCommand::PointLight { color, position });
    }

    fn rotate_y(&mut self, angle: f64) {
        self.commands.push(DrawCommand::RotateY(angle));
    }

    fn push(&mut self) {
        self.commands.push(DrawCommand::Push);
    }

    fn pop(&mut self) {
        self.commands.push(DrawCommand::Pop);
    }

    fn translate(&mut self, offset: Vec3D) {
        self.commands.push(DrawCommand::Translate(offset));
    }

    fn ambient_material(&mut self, color: Rgb) {
        self.commands.push(DrawCommand::AmbientMaterial(color));
    }

    fn specular_material(&mut self, gray: f64) {
        self.commands.push(DrawCommand::SpecularMaterial(gray));
    }

    fn shininess(&mut self, value: f64) {
        self.commands.push(DrawCommand::Shininess(value));
    }

    fn draw_box(&mut self, size: f64) {
        self.commands.push(DrawCommand::Box(size));
    }
}

/// Commands issued per frame before the cube loop.
pub const FRAME_PREAMBLE: usize = 4;

/// Commands issued per cube.
pub const COMMANDS_PER_CUBE: usize = 7;

/// Record a full frame.
pub fn record_frame(scene: &SceneState, frame_index: u32) -> Vec<DrawCommand> {
    let mut recorder =
        CommandRecorder::with_capacity(FRAME_PREAMBLE + scene.positions().len() * COMMANDS_PER_CUBE);
    render_frame(scene, frame_index, &mut recorder);
    recorder.commands
}

// ─── Host buffer encoding ────────────────────────────────────

/// Floats written per frame before the cube loop.
pub const PREAMBLE_FLOATS: usize = 13;

/// Floats written per cube.
pub const FLOATS_PER_CUBE: usize = 16;

/// Canvas that writes each call straight into the flat buffer the JS host
/// replays.
///
/// Layout: a sequence of `[opcode, args...]` records.
///   0  background        [gray]
///   1  ambientLight      [gray]
///   2  pointLight        [r, g, b, x, y, z]
///   3  rotateY           [angle]
///   4  push              []
///   5  translate         [x, y, z]
///   6  ambientMaterial   [r, g, b]
///   7  specularMaterial  [gray]
///   8  shininess         [value]
///   9  box               [size]
///   10 pop               []
#[derive(Clone, Debug, Default)]
pub struct CommandBuffer {
    pub data: Vec<f64>,
}

impl CommandBuffer {
    pub fn with_capacity(n: usize) -> Self {
        Self { data: Vec::with_capacity(n) }
    }

    #[inline]
    fn record(&mut self, opcode: u8, args: &[f64]) {
        self.data.push(opcode as f64);
        self.data.extend_from_slice(args);
    }
}

impl Canvas for CommandBuffer {
    fn background(&mut self, gray: f64) {
        self.record(0, &[gray]);
    }

    fn ambient_light(&mut self, gray: f64) {
        self.record(1, &[gray]);
    }

    fn point_light(&mut self, color: Rgb, position: Vec3D) {
        self.record(2, &[color.r, color.g, color.b, position.x, position.y, position.z]);
    }

    fn rotate_y(&mut self, angle: f64) {
        self.record(3, &[angle]);
    }

    fn push(&mut self) {
        self.record(4, &[]);
    }

    fn translate(&mut self, offset: Vec3D) {
        self.record(5, &[offset.x, offset.y, offset.z]);
    }

    fn ambient_material(&mut self, color: Rgb) {
        self.record(6, &[color.r, color.g, color.b]);
    }

    fn specular_material(&mut self, gray: f64) {
        self.record(7, &[gray]);
    }

    fn shininess(&mut self, value: f64) {
        self.record(8, &[value]);
    }

    fn draw_box(&mut self, size: f64) {
        self.record(9, &[size]);
    }

    fn pop(&mut self) {
        self.record(10, &[]);
    }
}

/// Encode a full frame for the host without an intermediate command list.
pub fn encode_frame(scene: &SceneState, frame_index: u32) -> Vec<f64> {
    let mut buffer =
        CommandBuffer::with_capacity(PREAMBLE_FLOATS + scene.positions().len() * FLOATS_PER_CUBE);
    render_frame(scene, frame_index, &mut buffer);
    buffer.data
}
