//! Watch application lifecycle
//!
//! The host (firmware main loop or a test) owns a [`WatchApp`] and calls the
//! [`WatchLifecycle`] methods as events arrive. All calls happen on one
//! thread, in the order the host delivers them.

use crate::{
    battery::BatteryProvider,
    locale::{Translate, Untranslated},
    text::DisplayText,
    time::{TimeError, TimeSnapshot},
    ui::{OutputSurface, RenderContext, RenderMode, SurfaceError, WatchRenderer},
};

/// Callbacks delivered by the host runtime.
pub trait WatchLifecycle {
    type Surface: OutputSurface;

    /// Application start. Binds the output surface and draws the first frame.
    fn on_create(
        &mut self,
        surface: Result<Self::Surface, SurfaceError>,
        now: Result<TimeSnapshot, TimeError>,
    );

    /// Launch request
    fn on_app_control(&mut self) {}

    /// The watch face became invisible
    fn on_pause(&mut self);

    /// The watch face became visible
    fn on_resume(&mut self);

    /// Release all resources
    fn on_terminate(&mut self);

    /// Timer tick carrying the current time
    fn on_tick(&mut self, snapshot: &TimeSnapshot, mode: RenderMode);

    /// Called each second while visible
    fn on_active_tick(&mut self, snapshot: &TimeSnapshot) {
        self.on_tick(snapshot, RenderMode::Active);
    }

    /// Called each minute in ambient mode
    fn on_ambient_tick(&mut self, snapshot: &TimeSnapshot) {
        self.on_tick(snapshot, RenderMode::Ambient);
    }

    fn on_ambient_changed(&mut self, ambient: bool);

    fn on_language_changed(&mut self, _language: &str) {}

    fn on_region_changed(&mut self, _region: &str) {}
}

/// Watch face application: a renderer plus its render context.
pub struct WatchApp<S, B, L = Untranslated> {
    renderer: WatchRenderer<B, L>,
    ctx: RenderContext<S>,
    visible: bool,
    last_text: Option<DisplayText>,
}

impl<S, B, L> WatchApp<S, B, L>
where
    S: OutputSurface,
    B: BatteryProvider,
    L: Translate,
{
    pub fn new(renderer: WatchRenderer<B, L>) -> Self {
        Self {
            renderer,
            ctx: RenderContext::unbound(),
            visible: true,
            last_text: None,
        }
    }

    pub fn context(&self) -> &RenderContext<S> {
        &self.ctx
    }

    pub fn renderer_mut(&mut self) -> &mut WatchRenderer<B, L> {
        &mut self.renderer
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Text of the most recent frame
    pub fn last_text(&self) -> Option<&DisplayText> {
        self.last_text.as_ref()
    }

    fn render(&mut self, snapshot: &TimeSnapshot, mode: RenderMode) {
        let text = self.renderer.render_into(&mut self.ctx, snapshot, mode);
        self.last_text = Some(text);
    }
}

impl<S, B, L> WatchLifecycle for WatchApp<S, B, L>
where
    S: OutputSurface,
    B: BatteryProvider,
    L: Translate,
{
    type Surface = S;

    fn on_create(&mut self, surface: Result<S, SurfaceError>, now: Result<TimeSnapshot, TimeError>) {
        match surface {
            Ok(surface) => self.ctx.bind(surface),
            Err(err) => log_error!("Failed to get output surface ({})", err),
        }

        match now {
            Ok(snapshot) => self.render(&snapshot, RenderMode::Active),
            Err(err) => log_error!("Failed to get current time ({})", err),
        }
        log_info!("Watch face created");
    }

    fn on_app_control(&mut self) {
        log_debug!("Launch request");
    }

    fn on_pause(&mut self) {
        self.visible = false;
        log_info!("Watch face paused");
    }

    fn on_resume(&mut self) {
        self.visible = true;
        log_info!("Watch face resumed");
    }

    fn on_terminate(&mut self) {
        // Dropping the surface releases it
        let _ = self.ctx.release();
        log_info!("Watch face terminated");
    }

    fn on_tick(&mut self, snapshot: &TimeSnapshot, mode: RenderMode) {
        if !self.visible {
            log_debug!("Tick while paused, ignoring");
            return;
        }
        self.render(snapshot, mode);
    }

    fn on_ambient_changed(&mut self, ambient: bool) {
        let mode = RenderMode::from_ambient(ambient);
        log_info!("Ambient mode {}", if ambient { "on" } else { "off" });
        self.ctx.set_mode(mode);
    }

    fn on_language_changed(&mut self, language: &str) {
        log_info!("Language changed to {}", language);
        self.renderer.locale_mut().set_language(language);
    }

    fn on_region_changed(&mut self, region: &str) {
        log_info!("Region format changed to {}", region);
    }
}
