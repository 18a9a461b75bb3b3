use std::{
    path::PathBuf,
    sync::mpsc::{self, Receiver, TryRecvError},
    thread,
    time::Duration,
};

use eframe::egui::{self, Color32, RichText, Slider, TextureHandle, TextureOptions};
use pipeflow_core::{Snapshot, snapshot};
use pipeflow_physics::{
    Classification, FlowError, FlowParameters, RegimeClassifier,
    controls::{self, Control, ControlValues},
    particles::{Animation, FRAME_COUNT, FRAME_INTERVAL},
    streamlines::{StreamlinePlot, render_streamlines},
};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::{
    asset::load_reference_image,
    banner::regime_banner,
    export::{ExportError, GifSettings, write_gif},
    plots,
};

const TITLE: &str = "Laminar vs. Turbulent Flow Visualization";

const INTRODUCTION: &str = "Explore the differences between laminar and turbulent flow by \
    adjusting parameters like velocity, viscosity, and pipe diameter. Learn how the Reynolds \
    number predicts flow behavior!";

const EXPLANATION: &str = "The Reynolds number (Re) is a dimensionless quantity that predicts \
    the flow regime in fluid dynamics. It is calculated using the formula:";

const FORMULA: &str = "Re = ρ v L / μ";

const SYMBOLS: [&str; 4] = [
    "ρ: Fluid density (kg/m³)",
    "v: Flow velocity (m/s)",
    "L: Pipe diameter (m)",
    "μ: Fluid viscosity (Pa·s)",
];

const INTERPRETATION: [(&str, &str); 3] = [
    ("Laminar Flow", "Re < 2000 (Smooth and orderly flow)"),
    ("Transitional Flow", "2000 < Re < 4000 (Mix of laminar and turbulent)"),
    ("Turbulent Flow", "Re > 4000 (Chaotic and irregular flow)"),
];

const ANIMATION_HINT: &str = "Observe the movement of particles to distinguish between \
    laminar and turbulent flow. The movement dynamically changes based on the Reynolds number.";

/// Everything the dashboard needs from its environment.
#[derive(Debug, Clone)]
pub struct DashboardOptions {
    /// Image shown next to the explanation, if any.
    pub reference_image: Option<PathBuf>,
    /// Where the particle animation GIF is written.
    pub animation_path: PathBuf,
    pub gif: GifSettings,
    /// Seed for all randomness; `None` seeds from the thread RNG.
    pub seed: Option<u64>,
    /// Starting position of every control.
    pub initial: ControlValues,
}

impl Default for DashboardOptions {
    fn default() -> Self {
        Self {
            reference_image: None,
            animation_path: PathBuf::from("particle_animation.gif"),
            gif: GifSettings::default(),
            seed: None,
            initial: ControlValues::default(),
        }
    }
}

/// Everything derived from one set of control values.
struct View {
    flow: Snapshot<FlowParameters, Classification>,
    streamlines: StreamlinePlot,
    animation: Animation,
}

enum ReferenceImage {
    NotConfigured,
    Unloaded(PathBuf),
    Loaded(TextureHandle),
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum ExportStatus {
    /// Waiting for the pointer to be released before exporting.
    Pending,
    /// A worker thread is encoding the GIF.
    Running,
    Written(PathBuf),
    Failed(String),
    /// There is no valid view to export.
    Unavailable,
}

impl ExportStatus {
    fn for_view(view: &Result<View, FlowError>) -> Self {
        if view.is_ok() {
            Self::Pending
        } else {
            Self::Unavailable
        }
    }
}

/// Receives the outcome of an in-flight export.
type ExportJob = Receiver<Result<PathBuf, ExportError>>;

/// The interactive regime explorer.
pub struct Dashboard {
    options: DashboardOptions,
    controls: ControlValues,
    rng: ChaCha8Rng,
    /// Control values the current view was computed from.
    computed_for: ControlValues,
    view: Result<View, FlowError>,
    /// `egui` time, in seconds, at which the current animation started.
    started_at: f64,
    export: ExportStatus,
    /// Dropped on recompute, which discards the stale result.
    export_job: Option<ExportJob>,
    reference: ReferenceImage,
}

impl Dashboard {
    /// Creates the dashboard and computes its first view.
    #[must_use]
    pub fn new(options: DashboardOptions) -> Self {
        let mut rng = match options.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_rng(&mut rand::rng()),
        };
        let controls = options.initial.snapped();
        let reference = options
            .reference_image
            .clone()
            .map_or(ReferenceImage::NotConfigured, ReferenceImage::Unloaded);

        let view = build_view(controls, &mut rng);
        let dashboard = Self {
            export: ExportStatus::for_view(&view),
            view,
            options,
            controls,
            rng,
            computed_for: controls,
            started_at: 0.0,
            export_job: None,
            reference,
        };
        dashboard.log_view();
        dashboard
    }

    /// Rebuilds the view from the current control values.
    ///
    /// Every recompute starts a fresh particle set; nothing carries over from
    /// the previous run.
    fn recompute(&mut self, now: f64) {
        self.computed_for = self.controls;
        self.started_at = now;
        self.export_job = None;
        self.view = build_view(self.controls, &mut self.rng);
        self.export = ExportStatus::for_view(&self.view);
        self.log_view();
    }

    fn log_view(&self) {
        match &self.view {
            Ok(view) => log::debug!(
                "computed view: Re = {}, {}",
                view.flow.output.reynolds,
                view.flow.output.regime
            ),
            Err(error) => log::error!("cannot compute flow: {error}"),
        }
    }

    /// Starts writing the current animation to disk on a worker thread.
    ///
    /// The worker asks `ctx` for a repaint once the file is written.
    fn start_export(&mut self, ctx: &egui::Context) {
        let Ok(view) = &self.view else {
            self.export = ExportStatus::Unavailable;
            return;
        };

        let animation = view.animation.clone();
        let path = self.options.animation_path.clone();
        let settings = self.options.gif;
        let ctx = ctx.clone();
        let (sender, receiver) = mpsc::channel();

        thread::spawn(move || {
            let result = write_gif(&animation, &path, settings).map(|()| path);
            // The receiver is gone if the view was recomputed in the meantime.
            if sender.send(result).is_ok() {
                ctx.request_repaint();
            }
        });

        self.export_job = Some(receiver);
        self.export = ExportStatus::Running;
    }

    /// Collects the result of the running export, if it has finished.
    fn poll_export(&mut self) {
        let Some(job) = &self.export_job else {
            return;
        };

        let result = match job.try_recv() {
            Ok(result) => result,
            Err(TryRecvError::Empty) => return,
            Err(TryRecvError::Disconnected) => {
                log::error!("animation export stopped without a result");
                self.export_job = None;
                self.export = ExportStatus::Failed("animation export stopped".to_string());
                return;
            }
        };

        self.export_job = None;
        self.export = match result {
            Ok(path) => ExportStatus::Written(path),
            Err(error) => {
                log::error!("{error}");
                ExportStatus::Failed(error.to_string())
            }
        };
    }

    fn load_reference(&mut self, ctx: &egui::Context) {
        let ReferenceImage::Unloaded(path) = &self.reference else {
            return;
        };

        self.reference = match load_reference_image(path) {
            Ok(image) => {
                log::info!("loaded reference image {}", path.display());
                ReferenceImage::Loaded(ctx.load_texture(
                    "reference-image",
                    image,
                    TextureOptions::LINEAR,
                ))
            }
            Err(error) => {
                log::warn!("{error}");
                ReferenceImage::Failed(error.to_string())
            }
        };
    }

    /// Draws one frame and schedules the next.
    fn show(&mut self, ctx: &egui::Context) {
        let now = ctx.input(|i| i.time);
        self.load_reference(ctx);
        self.poll_export();

        egui::SidePanel::left("controls")
            .resizable(false)
            .show(ctx, |ui| self.side_panel(ui));

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| self.page(ui, now));
        });

        if self.controls != self.computed_for {
            self.recompute(now);
            ctx.request_repaint();
        }

        // Encoding while a slider is still being dragged would redo the GIF
        // on every intermediate value.
        if self.export == ExportStatus::Pending && !ctx.input(|i| i.pointer.any_down()) {
            self.start_export(ctx);
        }

        ctx.request_repaint_after(FRAME_INTERVAL);
    }

    fn side_panel(&mut self, ui: &mut egui::Ui) {
        ui.heading("Adjust Flow Parameters");
        ui.add_space(8.0);

        float_slider(ui, &mut self.controls.velocity, &controls::VELOCITY);
        float_slider(ui, &mut self.controls.viscosity, &controls::VISCOSITY);
        float_slider(ui, &mut self.controls.density, &controls::DENSITY);
        float_slider(ui, &mut self.controls.diameter, &controls::DIAMETER);

        ui.add_space(8.0);
        if let Ok(view) = &self.view {
            ui.horizontal(|ui| {
                ui.label(RichText::new("Reynolds Number:").strong());
                ui.label(view.flow.output.reynolds.to_string());
            });
        }
    }

    fn page(&mut self, ui: &mut egui::Ui, now: f64) {
        ui.heading(TITLE);
        ui.label(INTRODUCTION);
        ui.add_space(8.0);

        match &self.view {
            Ok(view) => regime_banner(view.flow.output.regime).show(ui),
            Err(error) => {
                ui.colored_label(Color32::RED, error.to_string());
            }
        }

        ui.add_space(12.0);
        self.explanation(ui);

        ui.add_space(12.0);
        ui.heading("Flow Visualization");
        if let Ok(view) = &self.view {
            plots::streamlines(ui, &view.streamlines);
        }

        ui.add_space(12.0);
        ui.heading("Particle Movement Animation");
        ui.label(ANIMATION_HINT);
        usize_slider(ui, &mut self.controls.particle_count, &controls::PARTICLE_COUNT);
        u32_slider(ui, &mut self.controls.animation_speed, &controls::ANIMATION_SPEED);

        if let Ok(view) = &self.view {
            let elapsed = Duration::from_secs_f64((now - self.started_at).max(0.0));
            plots::particles(ui, view.animation.frame_at(elapsed));
            ui.small(view.animation.caption());
        }

        match &self.export {
            ExportStatus::Pending | ExportStatus::Running => {
                ui.small("Saving animation…");
            }
            ExportStatus::Written(path) => {
                ui.small(format!("Saved to {}", path.display()));
            }
            ExportStatus::Failed(message) => {
                ui.colored_label(Color32::RED, message);
            }
            ExportStatus::Unavailable => {}
        }
    }

    fn explanation(&self, ui: &mut egui::Ui) {
        ui.heading("What is the Reynolds Number?");
        ui.label(EXPLANATION);
        ui.label(RichText::new(FORMULA).monospace().size(18.0));
        ui.label("where:");
        for symbol in SYMBOLS {
            ui.label(format!("• {symbol}"));
        }

        ui.add_space(6.0);
        ui.label(RichText::new("Interpretation of Reynolds Number:").strong());
        for (regime, range) in INTERPRETATION {
            ui.horizontal_wrapped(|ui| {
                ui.label("•");
                ui.label(RichText::new(regime).strong());
                ui.label(format!(": {range}"));
            });
        }

        match &self.reference {
            ReferenceImage::NotConfigured | ReferenceImage::Unloaded(_) => {}
            ReferenceImage::Loaded(texture) => {
                ui.add_space(6.0);
                ui.add(egui::Image::new(texture).max_width(ui.available_width()));
                ui.small("Flow regimes based on Reynolds Number");
            }
            ReferenceImage::Failed(message) => {
                ui.colored_label(Color32::RED, message);
            }
        }
    }
}

impl eframe::App for Dashboard {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.show(ctx);
    }
}

fn build_view(controls: ControlValues, rng: &mut ChaCha8Rng) -> Result<View, FlowError> {
    let params = controls.flow_parameters()?;
    let Ok(flow) = snapshot(&RegimeClassifier, params);

    let streamlines = render_streamlines(flow.output.regime, rng);
    let animation = Animation::record(
        flow.output,
        controls.particle_count,
        controls.animation_speed,
        FRAME_COUNT,
        rng,
    );

    Ok(View {
        flow,
        streamlines,
        animation,
    })
}

fn float_slider(ui: &mut egui::Ui, value: &mut f64, control: &Control<f64>) {
    ui.add(
        Slider::new(value, control.range())
            .step_by(control.step)
            .text(control.label),
    );
}

fn usize_slider(ui: &mut egui::Ui, value: &mut usize, control: &Control<usize>) {
    ui.add(
        Slider::new(value, control.range())
            .integer()
            .text(control.label),
    );
}

fn u32_slider(ui: &mut egui::Ui, value: &mut u32, control: &Control<u32>) {
    ui.add(
        Slider::new(value, control.range())
            .integer()
            .text(control.label),
    );
}

/// Opens the dashboard in a native window and blocks until it is closed.
///
/// # Errors
///
/// Returns an error if the native window cannot be created.
pub fn run(options: DashboardOptions) -> Result<(), eframe::Error> {
    let native = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(TITLE)
            .with_inner_size([1100.0, 900.0]),
        ..Default::default()
    };

    eframe::run_native(
        TITLE,
        native,
        Box::new(|_cc| Ok(Box::new(Dashboard::new(options)))),
    )
}
