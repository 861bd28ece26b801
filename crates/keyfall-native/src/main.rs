mod midi_in;
mod render;

use keyfall_core::{
    Camera, DemoPlayer, FluidState, KeyDimensions, KeyboardState, NoteLifecycle, NoteMessage,
    GLOW_COLOR, LASER_EMISSIVE, LASER_THICKNESS, LASER_Y, LIT_EMISSIVE, NOTE_ROUNDNESS,
    WHITE_KEY_COUNT, WHITE_KEY_WIDTH,
};
use render::{GpuState, InstanceData, WashParams};
use std::time::Instant;
use winit::{
    event::{ElementState, Event, MouseButton, WindowEvent},
    event_loop::EventLoop,
    keyboard::Key,
    window::WindowBuilder,
};

const DEMO_SEED: u64 = 42;

fn main() {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .init();

    let preferred_port = std::env::var("KEYFALL_MIDI_PORT").ok();
    let midi = match midi_in::connect(preferred_port.as_deref()) {
        Ok(handle) => Some(handle),
        Err(e) => {
            log::warn!("MIDI input unavailable ({e}); running the demo player");
            None
        }
    };
    let mut demo = midi.is_none().then(|| DemoPlayer::default_duet(DEMO_SEED));

    let dims = KeyDimensions::default();
    let mut keyboard = KeyboardState::new(dims);
    let mut lifecycle = NoteLifecycle::new(dims);
    let mut fluid = FluidState::new();

    let event_loop = EventLoop::new().expect("event loop");
    let window = WindowBuilder::new()
        .with_title("Keyfall")
        .build(&event_loop)
        .expect("window");

    let size = window.inner_size();
    let mut camera = Camera::keyboard_view(size.width as f32 / size.height.max(1) as f32);
    let mut state = pollster::block_on(GpuState::new(&window)).expect("gpu");

    let mut last_frame = Instant::now();
    let mut events: Vec<NoteMessage> = Vec::new();
    let mut cursor_uv = [0.5f32, 0.5f32];

    event_loop
        .run(move |event, elwt| match event {
            Event::WindowEvent { event, .. } => match event {
                WindowEvent::Resized(size) => {
                    state.resize(size.width, size.height);
                    camera.aspect = size.width as f32 / size.height.max(1) as f32;
                }
                WindowEvent::CloseRequested => elwt.exit(),
                WindowEvent::CursorMoved { position, .. } => {
                    let size = state.window.inner_size();
                    cursor_uv = [
                        (position.x as f32 / size.width.max(1) as f32).clamp(0.0, 1.0),
                        (position.y as f32 / size.height.max(1) as f32).clamp(0.0, 1.0),
                    ];
                    fluid.pointer_target(cursor_uv);
                }
                WindowEvent::MouseInput {
                    state: ElementState::Pressed,
                    button: MouseButton::Left,
                    ..
                } => fluid.tap(cursor_uv, 1.0),
                WindowEvent::KeyboardInput { event, .. }
                    if event.state == ElementState::Pressed =>
                {
                    if let Key::Character(ch) = &event.logical_key {
                        if ch == "0" {
                            camera = Camera::keyboard_view(camera.aspect);
                        }
                    }
                }
                _ => {}
            },
            Event::AboutToWait => {
                let now = Instant::now();
                let dt = now - last_frame;
                last_frame = now;

                // Input events, strictly in arrival order, before the frame tick
                events.clear();
                if let Some(handle) = &midi {
                    events.extend(handle.rx.try_iter());
                } else if let Some(player) = &mut demo {
                    player.tick(dt, &mut events);
                }
                for ev in &events {
                    match *ev {
                        NoteMessage::NoteOn { note, velocity } => {
                            keyboard.highlight_on(note);
                            lifecycle.note_on(note, velocity);
                        }
                        NoteMessage::NoteOff { note } => {
                            keyboard.highlight_off(note);
                            lifecycle.note_off(note);
                        }
                    }
                }

                lifecycle.advance(dt);
                fluid.step(dt.as_secs_f32());

                let instances = build_instances(&keyboard, &lifecycle);
                let wash = wash_params(&fluid);
                match state.render(&camera, &instances, &wash, dt.as_secs_f32()) {
                    Ok(_) => state.window.request_redraw(),
                    Err(wgpu::SurfaceError::Lost) => {
                        let size = state.window.inner_size();
                        state.resize(size.width, size.height);
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => elwt.exit(),
                    Err(_) => {}
                }
            }
            _ => {}
        })
        .unwrap();
}

/// Emit this frame's instances in painter order: white keys, black keys,
/// the laser bar, then the note bars.
fn build_instances(keyboard: &KeyboardState, lifecycle: &NoteLifecycle) -> Vec<InstanceData> {
    let mut out = Vec::with_capacity(keyboard.keys().len() + lifecycle.len() + 1);
    for black_pass in [false, true] {
        for key in keyboard.keys().iter().filter(|k| k.placement.black == black_pass) {
            out.push(InstanceData {
                pos: key.placement.position.to_array(),
                scale: [key.placement.size.x, key.placement.size.y],
                color: [key.color[0], key.color[1], key.color[2], 1.0],
                emissive: key.emissive,
                roundness: 0.0,
            });
        }
    }

    let laser_width = WHITE_KEY_WIDTH * WHITE_KEY_COUNT as f32 - 0.001;
    out.push(InstanceData {
        pos: [0.0, LASER_Y, 0.03],
        scale: [laser_width, LASER_THICKNESS],
        color: [GLOW_COLOR[0], GLOW_COLOR[1], GLOW_COLOR[2], 1.0],
        emissive: LASER_EMISSIVE,
        roundness: 0.0,
    });

    for bar in lifecycle.active().iter().chain(lifecycle.falling()) {
        let emissive = LIT_EMISSIVE * (0.5 + 0.5 * bar.velocity as f32 / 127.0);
        out.push(InstanceData {
            pos: [bar.x, bar.y, 0.02],
            scale: [bar.width, bar.height],
            color: [GLOW_COLOR[0], GLOW_COLOR[1], GLOW_COLOR[2], 1.0],
            emissive,
            roundness: NOTE_ROUNDNESS,
        });
    }
    out
}

fn wash_params(fluid: &FluidState) -> WashParams {
    let mut impulses = [[0.0f32; 4]; 4];
    for (slot, imp) in impulses.iter_mut().zip(fluid.impulses()) {
        *slot = [imp.uv[0], imp.uv[1], imp.strength, imp.age_sec];
    }
    WashParams {
        center: fluid.center(),
        velocity: fluid.velocity(),
        energy: fluid.energy(),
        impulses,
    }
}
