//! The frame sequence controller.
//!
//! Owns the catalog, play head and input processor, shares the preloader
//! with background window-preload tasks, and pushes the current frame to
//! the display sink once per tick.

use std::rc::Rc;

use futures::FutureExt;

use super::catalog::FrameCatalog;
use super::command::ScrubCommand;
use super::playhead::Playhead;
use super::resolver::resolve_base_path;
use crate::error::ScrubError;
use crate::input::{InputEvent, InputProcessor};
use crate::loader::{FrameLoader, Preloader};
use crate::options::Options;
use crate::runtime::TaskSpawner;
use crate::sink::{FrameAnnotator, FrameSink};

/// Inertial image-sequence scrubber.
///
/// Built once by [`init`](Self::init); afterwards the host calls
/// [`tick`](Self::tick) once per animation frame and forwards input through
/// [`handle_event`](Self::handle_event). Input only changes velocity and the
/// autoplay flag; the position advances exclusively in `tick`.
pub struct ScrubController<L: FrameLoader, S, A> {
    options: Options,
    catalog: Rc<FrameCatalog>,
    preloader: Rc<Preloader<L>>,
    playhead: Playhead,
    input: InputProcessor,
    sink: S,
    annotator: A,
    spawner: Rc<dyn TaskSpawner>,
}

impl<L, S, A> ScrubController<L, S, A>
where
    L: FrameLoader + 'static,
    S: FrameSink<L::Handle>,
    A: FrameAnnotator,
{
    /// Resolve the base path, build the catalog, preload the initial batch
    /// and show the first frame.
    ///
    /// On failure the sink receives [`ScrubError::diagnostic`] and the
    /// error is returned; there is no retry.
    pub async fn init(
        options: Options,
        loader: L,
        mut sink: S,
        annotator: A,
        spawner: Rc<dyn TaskSpawner>,
    ) -> Result<Self, ScrubError> {
        sink.set_loading(true);

        let (catalog, preloader) = match Self::prepare(&options, loader).await {
            Ok(prepared) => prepared,
            Err(e) => {
                log::error!("initialization failed: {e}");
                sink.show_error(&e.diagnostic());
                return Err(e);
            }
        };
        log::info!(
            "sequence ready: {} frames under {}",
            catalog.len(),
            catalog.base_path()
        );

        let mut playhead = Playhead::new(catalog.last_frame());
        playhead.set_playing(options.playback.autoplay);
        sink.set_loading(false);

        let mut controller = Self {
            input: InputProcessor::new(&options),
            options,
            catalog,
            preloader,
            playhead,
            sink,
            annotator,
            spawner,
        };
        controller.render();
        Ok(controller)
    }

    async fn prepare(
        options: &Options,
        loader: L,
    ) -> Result<(Rc<FrameCatalog>, Rc<Preloader<L>>), ScrubError> {
        options.validate()?;
        let preloader = Rc::new(Preloader::new(loader, options.preload.window));
        let base = resolve_base_path(&preloader, &options.catalog).await?;
        let catalog = Rc::new(FrameCatalog::build(
            &base,
            &options.catalog.template,
            options.catalog.last_frame,
        ));
        let _ = preloader
            .preload_initial_batch(&catalog, options.preload.initial_batch)
            .await;
        Ok((catalog, preloader))
    }

    /// Advance the play head one tick, show the resulting frame and
    /// schedule a look-ahead preload. Returns the displayed frame.
    pub fn tick(&mut self) -> usize {
        let frame = self.playhead.step(&self.options.playback);
        self.render();
        self.schedule_window_preload(frame);
        frame
    }

    /// Apply one command from input or a programmatic caller.
    pub fn execute(&mut self, cmd: ScrubCommand) {
        match cmd {
            ScrubCommand::Impulse { velocity } => self.playhead.push(velocity),
            ScrubCommand::TogglePlayback => {
                self.playhead.toggle_playing();
                log::debug!("autoplay {}", if self.playhead.is_playing() { "on" } else { "off" });
            }
            ScrubCommand::Pause => self.playhead.set_playing(false),
        }
    }

    /// Feed one raw input event through the input processor.
    ///
    /// Returns `true` when the host must suppress the event's default
    /// action (wheel and page scroll).
    pub fn handle_event(&mut self, event: &InputEvent) -> bool {
        if let Some(cmd) = self.input.handle_event(event) {
            self.execute(cmd);
        }
        event.claims_default()
    }

    fn render(&mut self) {
        let index = self.playhead.current_frame();
        let Some(id) = self.catalog.get(index) else {
            return;
        };
        let image = self.preloader.cached(id);
        self.sink.show_frame(index, id, image.as_ref());
        self.annotator.annotate(index);
    }

    fn schedule_window_preload(&self, frame: usize) {
        if self.preloader.window_in_flight() {
            return;
        }
        let preloader = Rc::clone(&self.preloader);
        let catalog = Rc::clone(&self.catalog);
        self.spawner.spawn(
            async move {
                let _ = preloader.preload_window(&catalog, frame).await;
            }
            .boxed_local(),
        );
    }

    /// Play head state.
    pub fn playhead(&self) -> &Playhead {
        &self.playhead
    }

    /// The frame catalog.
    pub fn catalog(&self) -> &FrameCatalog {
        &self.catalog
    }

    /// The shared preloader and its cache.
    pub fn preloader(&self) -> &Preloader<L> {
        &self.preloader
    }

    /// The input processor (key bindings, drag state).
    pub fn input(&self) -> &InputProcessor {
        &self.input
    }

    /// Mutable access to the input processor for rebinding keys.
    pub fn input_mut(&mut self) -> &mut InputProcessor {
        &mut self.input
    }

    /// Options the controller was built with.
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// The display sink.
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Mutable access to the display sink.
    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }
}
