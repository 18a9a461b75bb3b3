use eframe::egui::{self, Color32, RichText};
use egui_plot::{Line, Plot, PlotPoints, Points};
use pipeflow_physics::{
    particles::{AnimationFrame, PIPE_HEIGHT, PIPE_LENGTH},
    streamlines::{Rgb, StreamlinePlot},
};

const PLOT_HEIGHT: f32 = 320.0;
const PARTICLE_RADIUS: f32 = 4.0;

fn color(Rgb(r, g, b): Rgb) -> Color32 {
    Color32::from_rgb(r, g, b)
}

/// Draws the streamline plot.
pub(crate) fn streamlines(ui: &mut egui::Ui, plot: &StreamlinePlot) {
    ui.label(RichText::new(plot.title).strong());

    let stroke = color(plot.style.color);
    Plot::new("streamlines")
        .height(PLOT_HEIGHT)
        .x_axis_label(plot.x_label)
        .y_axis_label(plot.y_label)
        .show_grid(true)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            for curve in &plot.curves {
                let points: PlotPoints = curve.points.iter().copied().collect();
                plot_ui.line(Line::new(points).color(stroke).width(plot.style.width));
            }
        });
}

/// Draws one frame of the particle animation inside fixed pipe bounds.
pub(crate) fn particles(ui: &mut egui::Ui, frame: Option<&AnimationFrame>) {
    Plot::new("particles")
        .height(PLOT_HEIGHT)
        .include_x(0.0)
        .include_x(PIPE_LENGTH)
        .include_y(0.0)
        .include_y(PIPE_HEIGHT)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            if let Some(frame) = frame {
                let points: PlotPoints = frame.particles.points().into_iter().collect();
                plot_ui.points(
                    Points::new(points)
                        .radius(PARTICLE_RADIUS)
                        .color(Color32::BLUE)
                        .filled(true),
                );
            }
        });
}
