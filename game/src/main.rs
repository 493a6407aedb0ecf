use std::marker::PhantomData;
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use engine::app::{AppConfig, AppContext, GameApp, PointerFrame, run_game};
use engine::graphics::{Renderer2d, SurfaceSize};
use engine::render::draw_view_tree;
use engine::view_tree::ViewTree;
use log::{info, warn};
use rand::SeedableRng;
use rand::rngs::StdRng;
use winit::dpi::PhysicalSize;

use game::controller::GameController;
use game::rodio_output::RodioOutput;
use game::session::Session;
use game::settings::{PlayerSettings, SettingsStore};
use game::tone::{SilentOutput, ToneEmitter, ToneOutput};
use game::view::{SimonAction, build_view};

#[derive(Parser, Debug)]
#[command(name = "simon", about = "Repeat the growing sequence of lights and tones")]
struct Args {
    /// Seed for the clue sequence (random when omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// Settings file (defaults to SIMON_SETTINGS_PATH or the user config dir)
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Run without opening an audio device
    #[arg(long)]
    mute: bool,
}

struct SimonApp<O> {
    volume: f32,
    seed: Option<u64>,
    _output: PhantomData<O>,
}

impl<O> SimonApp<O> {
    fn new(volume: f32, seed: Option<u64>) -> Self {
        Self {
            volume,
            seed,
            _output: PhantomData,
        }
    }
}

impl<O: ToneOutput + Default + 'static> GameApp for SimonApp<O> {
    type State = Session<O, StdRng>;
    type Action = SimonAction;

    fn init_state(&mut self, _ctx: &mut AppContext) -> Self::State {
        let rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        // The output opens its device lazily, on the first tone.
        let tone = ToneEmitter::new(O::default()).with_volume(self.volume);
        Session::new(GameController::new(tone, rng))
    }

    fn build_view(&self, state: &Self::State, size: SurfaceSize) -> ViewTree<Self::Action> {
        build_view(state.game(), state.notice(), size)
    }

    fn update_state(
        &mut self,
        state: &mut Self::State,
        pointer: PointerFrame<Self::Action>,
        dt: Duration,
    ) {
        state.handle_pointer(&pointer);
        // Long stalls (window drag, breakpoint) would otherwise replay a burst of clues at once.
        state.tick(dt.min(Duration::from_millis(250)));
    }

    fn render(&mut self, view: &ViewTree<Self::Action>, renderer: &mut dyn Renderer2d) {
        draw_view_tree(renderer, view);
    }
}

fn app_config(settings: &PlayerSettings) -> AppConfig {
    AppConfig {
        title: "Simon".to_string(),
        desired_size: PhysicalSize::new(settings.video.width, settings.video.height),
        clamp_to_monitor: true,
        vsync: settings.video.vsync,
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args = Args::parse();

    let store = match args.settings {
        Some(path) => SettingsStore::new(path),
        None => SettingsStore::from_env(),
    };
    let settings = store.load();
    info!("settings: {}", store.path().display());
    if !store.path().exists() {
        // Leave an editable file behind on first run.
        if let Err(err) = store.save(&settings) {
            warn!("could not write default settings: {err}");
        }
    }

    let config = app_config(&settings);
    let volume = settings.audio.effective_volume();

    if args.mute || settings.audio.muted {
        info!("audio muted");
        run_game(config, SimonApp::<SilentOutput>::new(volume, args.seed))
    } else {
        run_game(config, SimonApp::<RodioOutput>::new(volume, args.seed))
    }
}
