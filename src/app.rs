#![cfg(feature = "std")]

use crate::api::{CommandSink, StateSource};
use crate::common::Key;
use crate::config::{ClientConfig, DEBUG_PANEL_HEIGHT, DEBUG_PANEL_WIDTH};
use crate::domain::Snapshot;
use crate::form::{FormOutcome, FormValues, InputForm};
use crate::map::MapRenderer;
use crate::menu::{Action, ActionMenu};
use crate::protocol::Outcome;
use crate::scene::{Canvas, Layer, LayerHandle, Scene, Style};
use crate::terminal::{KeySource, Renderer};
use log::{debug, info, warn};
use std::time::{Duration, Instant};

/// `true` when nothing has been fetched yet or the last fetch is older than
/// `interval`.
pub fn refresh_due(last: Option<Instant>, now: Instant, interval: Duration) -> bool {
    match last {
        None => true,
        Some(at) => now.saturating_duration_since(at) > interval,
    }
}

/// The client's main loop: refreshes state on a timer, redraws every
/// iteration, and dispatches one key at a time.
pub struct App<S, T> {
    config: ClientConfig,
    server: S,
    terminal: T,
    menu: ActionMenu,
    map: MapRenderer,
    scene: Scene,
    menu_layer: LayerHandle,
    map_layer: LayerHandle,
    debug_layer: Option<LayerHandle>,
    snapshot: Option<Snapshot>,
    last_refresh: Option<Instant>,
    last_outcome: Option<Outcome>,
}

impl<S, T> App<S, T>
where
    S: StateSource + CommandSink,
    T: Renderer + KeySource,
{
    pub fn new(config: ClientConfig, server: S, terminal: T) -> Self {
        let mut scene = Scene::new();
        let menu_layer = scene.insert(Layer::new(0, 0, Canvas::new(0, 0)));
        let map_layer = scene.insert(Layer::new(
            config.map_left_padding,
            config.map_top_padding,
            Canvas::new(0, 0),
        ));
        let debug_layer = config
            .debug_panel
            .then(|| scene.insert(Layer::new(0, 0, Canvas::new(0, 0))));
        Self {
            map: MapRenderer::new(config.map_scale),
            config,
            server,
            terminal,
            menu: ActionMenu::default(),
            scene,
            menu_layer,
            map_layer,
            debug_layer,
            snapshot: None,
            last_refresh: None,
            last_outcome: None,
        }
    }

    pub fn snapshot(&self) -> Option<&Snapshot> {
        self.snapshot.as_ref()
    }

    pub fn last_outcome(&self) -> Option<&Outcome> {
        self.last_outcome.as_ref()
    }

    pub fn menu(&self) -> &ActionMenu {
        &self.menu
    }

    pub fn server(&self) -> &S {
        &self.server
    }

    pub fn terminal(&self) -> &T {
        &self.terminal
    }

    /// Runs until the player quits. Any server or terminal failure ends the
    /// loop with that error.
    pub async fn run(&mut self) -> anyhow::Result<()> {
        loop {
            if refresh_due(self.last_refresh, Instant::now(), self.config.refresh_interval) {
                self.refresh().await?;
            }
            self.draw()?;

            let key = self.terminal.next_key()?;
            match key {
                Key::Up => self.menu.move_up(),
                Key::Down => self.menu.move_down(),
                Key::Enter => self.invoke_selected().await?,
                k if k.is_quit() => break,
                _ => {}
            }
        }
        info!("quit");
        Ok(())
    }

    pub async fn refresh(&mut self) -> anyhow::Result<()> {
        let snapshot = self.server.fetch_snapshot().await?;
        debug!(
            "snapshot: {} units, {} targets",
            snapshot.units.len(),
            snapshot.targets.len()
        );
        self.snapshot = Some(snapshot);
        self.last_refresh = Some(Instant::now());
        Ok(())
    }

    /// Runs the selected menu entry: collect its form (if any), then send its
    /// one request.
    async fn invoke_selected(&mut self) -> anyhow::Result<()> {
        let action = self.menu.selected();
        let values = match action.form() {
            Some(form) => match self.collect(form)? {
                Some(values) => Some(values),
                None => {
                    info!("{} cancelled", action.label());
                    return Ok(());
                }
            },
            None => None,
        };
        self.last_outcome = Some(self.perform(action, values.as_ref()).await?);
        Ok(())
    }

    async fn perform(&mut self, action: Action, values: Option<&FormValues>) -> anyhow::Result<Outcome> {
        match action.request(values) {
            Ok(request) => {
                info!("{}: {}", action.label(), request);
                Ok(Outcome::Response(self.server.submit(request).await?))
            }
            Err(err) => {
                warn!("{} not sent: {}", action.label(), err);
                Ok(Outcome::Rejected(err.to_string()))
            }
        }
    }

    /// Hands the keyboard to `form` until it is submitted or cancelled. The
    /// popup is retired from the scene either way.
    fn collect(&mut self, mut form: InputForm) -> anyhow::Result<Option<FormValues>> {
        let layer = self.popup_layer(&form)?;
        let popup = self.scene.insert(layer);
        let result = self.edit(&mut form, popup);
        self.scene.retire(popup)?;
        result
    }

    fn edit(&mut self, form: &mut InputForm, popup: LayerHandle) -> anyhow::Result<Option<FormValues>> {
        loop {
            let layer = self.popup_layer(form)?;
            self.scene.replace(popup, layer)?;
            self.present()?;
            match form.handle_key(self.terminal.next_key()?) {
                FormOutcome::Pending => continue,
                FormOutcome::Submitted(values) => return Ok(Some(values)),
                FormOutcome::Cancelled => return Ok(None),
            }
        }
    }

    /// The form centred on screen.
    fn popup_layer(&self, form: &InputForm) -> anyhow::Result<Layer> {
        let (width, height) = self.terminal.size()?;
        let canvas = form.render();
        let x = width.saturating_sub(canvas.width()) / 2;
        let y = height.saturating_sub(canvas.height()) / 2;
        Ok(Layer::new(x, y, canvas))
    }

    /// Redraws menu, map and debug panel from the last snapshot, stale or
    /// not.
    fn draw(&mut self) -> anyhow::Result<()> {
        let (width, height) = self.terminal.size()?;

        let menu = self.menu.render(self.config.map_left_padding);
        self.scene.replace(self.menu_layer, Layer::new(0, 0, menu))?;

        if let Some(snapshot) = &self.snapshot {
            let rows = height.saturating_sub(self.config.map_top_padding);
            let visible = i32::from(rows.saturating_sub(1) / 2);
            let map = self.map.with_max_radius(visible).render(snapshot).to_canvas();
            self.scene.replace(
                self.map_layer,
                Layer::new(self.config.map_left_padding, self.config.map_top_padding, map),
            )?;
        }

        if let Some(handle) = self.debug_layer {
            let panel = self.debug_panel();
            let x = width.saturating_sub(DEBUG_PANEL_WIDTH + 1);
            self.scene.replace(handle, Layer::new(x, 0, panel))?;
        }
        self.present()
    }

    fn debug_panel(&self) -> Canvas {
        let Some(outcome) = &self.last_outcome else {
            return Canvas::new(0, 0);
        };
        let mut panel = Canvas::new(DEBUG_PANEL_WIDTH, DEBUG_PANEL_HEIGHT);
        for (row, line) in outcome.lines().iter().take(DEBUG_PANEL_HEIGHT as usize).enumerate() {
            panel.put_str(0, row as u16, line, Style::Plain);
        }
        panel
    }

    fn present(&mut self) -> anyhow::Result<()> {
        let (width, height) = self.terminal.size()?;
        let frame = self.scene.compose(width, height);
        self.terminal.present(&frame)
    }
}
