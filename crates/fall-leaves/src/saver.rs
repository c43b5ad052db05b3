//! The screensaver module and the hooks the host drives it through.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use fall_leaves_core::{FieldSettings, Size};
use fall_leaves_field::LeafField;
use fall_leaves_render::{Compositor, LeafSprites, Rgba, Surface};
use tracing::info;

/// Shown in the info line.
pub const MODULE_NAME: &str = "Fall Leaves";
pub const MODULE_INFO: &str = "by David Couzelis";

/// Entry points a host calls on a screensaver module.
pub trait ScreenSaver {
    /// Prepare to animate a view of `view` pixels.
    fn start(&mut self, view: Size) -> color_eyre::Result<()>;

    /// Release everything created by [`ScreenSaver::start`].
    fn stop(&mut self);

    /// Advance one tick and present the resulting frame.
    fn draw(&mut self, surface: &mut dyn Surface, frame: u64);

    /// How often the host should call [`ScreenSaver::draw`].
    fn tick_interval(&self) -> Duration;
}

/// State that only exists while the saver runs.
#[derive(Debug)]
struct Running {
    field: LeafField<LeafSprites>,
    compositor: Compositor,
}

/// Falling leaves over a plain background.
#[derive(Debug)]
pub struct FallLeaves {
    settings: FieldSettings,
    background: Rgba,
    seed: Option<u64>,
    running: Option<Running>,
}

impl FallLeaves {
    pub fn new(settings: FieldSettings, background: Rgba, seed: Option<u64>) -> Self {
        Self {
            settings,
            background,
            seed,
            running: None,
        }
    }

    /// View size of the current run, if started.
    pub fn view(&self) -> Option<Size> {
        self.running.as_ref().map(|running| running.field.view())
    }

    pub fn is_running(&self) -> bool {
        self.running.is_some()
    }
}

impl ScreenSaver for FallLeaves {
    fn start(&mut self, view: Size) -> color_eyre::Result<()> {
        self.stop();
        self.settings.validate()?;

        let compositor = Compositor::new(view, self.background)?;
        let seed = self.seed.unwrap_or_else(time_seed);
        let field = LeafField::new(view, self.settings.clone(), LeafSprites::new(), seed);

        info!(width = view.width, height = view.height, seed, "screensaver started");
        self.running = Some(Running { field, compositor });
        Ok(())
    }

    fn stop(&mut self) {
        if let Some(running) = self.running.take() {
            info!(
                frames = running.compositor.frames(),
                sprites = running.field.sprites().issued(),
                "screensaver stopped"
            );
        }
    }

    fn draw(&mut self, surface: &mut dyn Surface, frame: u64) {
        let Some(Running { field, compositor }) = self.running.as_mut() else {
            return;
        };
        let replaced = field.tick();
        compositor.render_frame(field, surface);
        tracing::trace!(frame, replaced, "tick");
    }

    fn tick_interval(&self) -> Duration {
        self.settings.tick_interval()
    }
}

/// Seed from the wall clock so each run looks different.
fn time_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}
