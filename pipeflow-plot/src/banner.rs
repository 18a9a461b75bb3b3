use eframe::egui::{self, Color32, RichText};
use pipeflow_physics::FlowRegime;

/// Visual severity of a banner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Warning,
    Error,
}

impl Severity {
    /// Background and text colors.
    fn colors(self) -> (Color32, Color32) {
        match self {
            Self::Success => (
                Color32::from_rgb(220, 243, 226),
                Color32::from_rgb(23, 114, 69),
            ),
            Self::Warning => (
                Color32::from_rgb(255, 244, 206),
                Color32::from_rgb(146, 108, 5),
            ),
            Self::Error => (
                Color32::from_rgb(253, 226, 226),
                Color32::from_rgb(158, 28, 35),
            ),
        }
    }
}

/// A one-line status message with an emphasized middle part.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Banner {
    pub severity: Severity,
    pub prefix: &'static str,
    pub emphasis: String,
    pub suffix: &'static str,
}

impl Banner {
    /// The message as plain text.
    #[must_use]
    pub fn text(&self) -> String {
        format!("{}{}{}", self.prefix, self.emphasis, self.suffix)
    }

    /// Draws the banner across the available width.
    pub fn show(&self, ui: &mut egui::Ui) {
        let (fill, text) = self.severity.colors();
        egui::Frame::default()
            .fill(fill)
            .inner_margin(8.0)
            .show(ui, |ui| {
                ui.set_width(ui.available_width());
                ui.horizontal_wrapped(|ui| {
                    ui.spacing_mut().item_spacing.x = 0.0;
                    ui.label(RichText::new(self.prefix).color(text));
                    ui.label(RichText::new(&self.emphasis).color(text).strong());
                    ui.label(RichText::new(self.suffix).color(text));
                });
            });
    }
}

/// The banner announcing a flow regime.
#[must_use]
pub fn regime_banner(regime: FlowRegime) -> Banner {
    let emphasis = regime.to_string();
    match regime {
        FlowRegime::Laminar => Banner {
            severity: Severity::Success,
            prefix: "The flow is ",
            emphasis,
            suffix: " (Re < 2000).",
        },
        FlowRegime::Transitional => Banner {
            severity: Severity::Warning,
            prefix: "The flow is in the ",
            emphasis,
            suffix: " regime (2000 < Re < 4000).",
        },
        FlowRegime::Turbulent => Banner {
            severity: Severity::Error,
            prefix: "The flow is ",
            emphasis,
            suffix: " (Re > 4000).",
        },
    }
}
