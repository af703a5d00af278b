//! Bounce Walk entry point
//!
//! Headless host for both demo cores. It owns the state, drives the frame
//! loop and logs what a renderer would draw.
//!
//! Usage: `bounce-walk [settings.json]`

use glam::Vec2;

use bounce_walk::Settings;
use bounce_walk::camera::{CameraState, CommandOutcome, TerrainHeight, keys};
use bounce_walk::sim::{BodySet, tick};

const COLLISION_FRAMES: u32 = 600;

fn main() {
    env_logger::init();
    log::info!("Bounce Walk (headless) starting...");

    let settings = match std::env::args().nth(1) {
        Some(path) => match Settings::load(&path) {
            Ok(settings) => settings,
            Err(e) => {
                log::error!("{}", e);
                std::process::exit(1);
            }
        },
        None => Settings::default(),
    };

    if let Err(e) = run_collisions(&settings) {
        log::error!("Collision demo failed: {}", e);
        std::process::exit(1);
    }
    if let Err(e) = run_walkabout(&settings) {
        log::error!("Walkabout demo failed: {}", e);
        std::process::exit(1);
    }
}

fn run_collisions(settings: &Settings) -> Result<(), bounce_walk::ConstructionError> {
    let collision = &settings.collision;
    let mut set = BodySet::spawn(&collision.spawn_config(), collision.seed)?;
    let energy_start = set.total_kinetic_energy();

    let mut total_contacts = 0;
    for frame in 0..COLLISION_FRAMES {
        let contacts = tick(&mut set);
        total_contacts += contacts;
        if contacts > 0 {
            log::debug!("frame {}: {} contacts", frame, contacts);
        }
    }

    log::info!(
        "{} frames, {} contacts, kinetic energy {:.1} -> {:.1}",
        COLLISION_FRAMES,
        total_contacts,
        energy_start,
        set.total_kinetic_energy()
    );
    for (i, body) in set.bodies().iter().enumerate() {
        log::info!(
            "body {:2}: r={:5.1} pos=({:6.1}, {:6.1})",
            i,
            body.radius(),
            body.pos.x,
            body.pos.y
        );
    }
    Ok(())
}

fn run_walkabout(settings: &Settings) -> Result<(), bounce_walk::ConstructionError> {
    let walkabout = &settings.walkabout;
    let terrain = walkabout.terrain.rolling_hills()?;
    let config = &walkabout.camera;
    let mut camera = CameraState::with_config(&terrain, Vec2::ZERO, walkabout.eye_offset, config);

    // Scripted session: look around a little, walk, turn, walk back, quit
    let mut script: Vec<i32> = Vec::new();
    script.extend([keys::W; 20]);
    script.extend([keys::D; 15]);
    script.extend([keys::APOSTROPHE; 5]);
    script.extend([keys::W; 20]);
    script.push(keys::P);
    script.extend([keys::S; 10]);
    script.push(keys::ESCAPE);

    let pointer_path = (0..script.len()).map(|i| {
        let t = i as f32 * 0.1;
        Vec2::new(400.0 + t.sin() * 30.0, 300.0 + t.cos() * 10.0)
    });

    for (frame, (key, pointer)) in script.into_iter().zip(pointer_path).enumerate() {
        camera.apply_pointer_position(pointer, config);

        let Some(command) = walkabout.keys.command_for(key) else {
            continue;
        };
        match camera.apply_command(&terrain, command, config) {
            CommandOutcome::Continue => {}
            CommandOutcome::Screenshot => log::info!("frame {}: screenshot requested", frame),
            CommandOutcome::Quit => {
                log::info!("frame {}: quit", frame);
                break;
            }
        }

        let view = camera.view();
        log::debug!(
            "frame {}: avatar {:?} eye {:?} tilt {:.1} yaw {:.1}",
            frame,
            view.avatar,
            view.eye,
            view.tilt,
            view.yaw
        );
    }

    let view = camera.view();
    let ground = terrain.height_at(camera.avatar.x, camera.avatar.y);
    log::info!(
        "Walkabout ended at {:?} (ground {:.2}), eye {:?}",
        view.avatar,
        ground,
        view.eye
    );
    Ok(())
}
