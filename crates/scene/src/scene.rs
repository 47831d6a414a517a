//! Scene lifecycle: generate once at mount, animate per frame, unsubscribe at unmount.

use crate::assets::SceneAssets;
use crate::config::SceneConfig;
use crate::profile::{CameraRig, LightRig};
use anyhow::{Context, Result};
use engine_core::{
    Albedo, Emissive, Entity, FrameHandle, FrameScheduler, Ornament, PointLight, Primitive, Star,
    Time, Transform, Trunk, World,
};
use procgen::{apply_spin, BoxParams, FallingSnow, SnowFall};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::cell::RefCell;
use std::ops::Range;
use std::rc::Rc;

/// Per-frame fall distance range for snowflakes.
pub const SNOW_SPEED: Range<f32> = 0.02..0.06;

const ORNAMENT_SEGMENTS: u32 = 16;
const ORNAMENT_GLOW: f32 = 1.2;
const ORNAMENT_LIGHT_INTENSITY: f32 = 0.2;
const ORNAMENT_LIGHT_DISTANCE: f32 = 1.0;

/// Slot the snow animator writes through. Empty until a field is attached.
pub type SnowSlot = Rc<RefCell<Option<FallingSnow>>>;

/// A mounted Christmas tree scene.
pub struct TreeScene {
    config: SceneConfig,
    assets: SceneAssets,
    world: Rc<RefCell<World>>,
    snow: SnowSlot,
    star: Entity,
    lights: LightRig,
    scheduler: FrameScheduler,
    handles: Vec<FrameHandle>,
    time: Time,
}

impl TreeScene {
    /// Generate every population and subscribe the animators.
    pub fn mount(config: SceneConfig) -> Result<Self> {
        config.validate().context("invalid scene config")?;

        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let assets = SceneAssets::generate(&config, &mut rng).context("failed to generate tree")?;
        let snow = FallingSnow::build(
            config.falling_snow_count,
            &mut rng,
            &BoxParams::FALLING_SNOW,
            SNOW_SPEED,
        )
        .context("failed to generate falling snow")?;

        let lights = LightRig::default();
        let mut world = World::new();
        let star = spawn_decorations(&mut world, &assets, &lights);

        let mut scene = Self {
            config,
            assets,
            world: Rc::new(RefCell::new(world)),
            snow: Rc::new(RefCell::new(Some(snow))),
            star,
            lights,
            scheduler: FrameScheduler::new(),
            handles: Vec::new(),
            time: Time::new(),
        };
        scene.subscribe();

        log::info!(
            "Tree mounted: {} points, {} ornaments, {} flakes, {} ribbon triangles ({:?} profile)",
            scene.assets.point_count(),
            scene.assets.ornaments.len(),
            scene.config.falling_snow_count,
            scene.assets.ribbon.mesh.triangle_count(),
            scene.config.profile,
        );
        Ok(scene)
    }

    fn subscribe(&mut self) {
        let rule = SnowFall::default();
        let snow = Rc::clone(&self.snow);
        self.handles.push(self.scheduler.register(move |_| {
            // A slot borrowed elsewhere counts as not attached this frame.
            if let Ok(mut slot) = snow.try_borrow_mut() {
                rule.step(slot.as_mut());
            }
        }));

        let spin = self.assets.star.spin();
        let world = Rc::clone(&self.world);
        let star = self.star;
        self.handles.push(self.scheduler.register(move |tick| {
            if let Ok(world) = world.try_borrow() {
                if let Ok(mut transform) = world.get::<&mut Transform>(star) {
                    apply_spin(&mut transform, &spin, tick.elapsed);
                }
            }
        }));
    }

    /// Present one frame at `elapsed` seconds since mount.
    pub fn on_frame(&mut self, elapsed: f64) {
        self.time.advance_to(elapsed);
        self.scheduler.tick(self.time.elapsed_seconds());
    }

    /// Unsubscribe every animator. Generated buffers stay readable, but no
    /// longer change. Safe to call more than once.
    pub fn unmount(&mut self) {
        if self.handles.is_empty() {
            return;
        }
        for handle in self.handles.drain(..) {
            self.scheduler.unregister(handle);
        }
        log::info!("Tree unmounted after {} frames", self.time.frame_count());
    }

    pub fn is_mounted(&self) -> bool {
        !self.handles.is_empty() && self.handles.iter().all(|&h| self.scheduler.is_registered(h))
    }

    /// Whether the falling snow moved since the last call. The renderer
    /// re-uploads the snow positions when this returns true.
    pub fn take_snow_dirty(&mut self) -> bool {
        self.snow
            .borrow_mut()
            .as_mut()
            .is_some_and(|snow| snow.field_mut().take_dirty())
    }

    /// Remove the falling snow from the animator's reach.
    pub fn detach_snow(&mut self) -> Option<FallingSnow> {
        self.snow.borrow_mut().take()
    }

    pub fn attach_snow(&mut self, snow: FallingSnow) {
        *self.snow.borrow_mut() = Some(snow);
    }

    /// Read the falling snow, if attached.
    pub fn with_snow<T>(&self, f: impl FnOnce(&FallingSnow) -> T) -> Option<T> {
        self.snow.borrow().as_ref().map(f)
    }

    pub fn assets(&self) -> &SceneAssets {
        &self.assets
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    pub fn camera(&self) -> CameraRig {
        self.config.profile.camera()
    }

    pub fn lights(&self) -> &LightRig {
        &self.lights
    }

    pub fn time(&self) -> &Time {
        &self.time
    }

    pub fn star_entity(&self) -> Entity {
        self.star
    }

    /// Current star rotation about the vertical axis.
    pub fn star_yaw(&self) -> Option<f32> {
        let world = self.world.borrow();
        let yaw = world.get::<&Transform>(self.star).ok().map(|t| t.yaw());
        yaw
    }

    pub fn ornament_count(&self) -> usize {
        self.world.borrow().query::<&Ornament>().iter().count()
    }

    /// Run `f` against the decoration world.
    pub fn with_world<T>(&self, f: impl FnOnce(&World) -> T) -> T {
        f(&self.world.borrow())
    }
}

impl Drop for TreeScene {
    fn drop(&mut self) {
        self.unmount();
    }
}

fn spawn_decorations(world: &mut World, assets: &SceneAssets, lights: &LightRig) -> Entity {
    let star = &assets.star;
    let star_entity = world.spawn((
        Transform::from_position(star.position),
        Star,
        star.spin(),
        Primitive::Octahedron {
            radius: star.radius,
        },
        Albedo(star.color),
        Emissive {
            color: star.emissive,
            intensity: star.emissive_intensity,
        },
        PointLight::new(star.light_color, star.light_intensity, star.light_distance),
    ));

    for ornament in &assets.ornaments {
        world.spawn((
            Transform::from_position(ornament.position),
            Ornament,
            Primitive::Sphere {
                radius: assets.ornament_size,
                segments: ORNAMENT_SEGMENTS,
            },
            Albedo(ornament.color),
            Emissive {
                color: ornament.color,
                intensity: ORNAMENT_GLOW,
            },
            PointLight::new(
                ornament.color,
                ORNAMENT_LIGHT_INTENSITY,
                ORNAMENT_LIGHT_DISTANCE,
            ),
        ));
    }

    let trunk = &assets.trunk;
    world.spawn((
        Transform::from_position(trunk.center),
        Trunk,
        Primitive::Cylinder {
            radius_top: trunk.radius_top,
            radius_bottom: trunk.radius_bottom,
            height: trunk.height,
            radial_segments: trunk.radial_segments,
        },
        Albedo(trunk.color),
    ));

    for &(position, color, intensity, distance) in &lights.fills {
        world.spawn((
            Transform::from_position(position),
            PointLight::new(color, intensity, distance),
        ));
    }

    star_entity
}
