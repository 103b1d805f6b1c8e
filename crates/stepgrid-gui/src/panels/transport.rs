//! Transport controls with the grid's output meter

use egui::{Color32, Rect, RichText, Sense, Stroke, Ui, Vec2};
use stepgrid_services::HostTransport;

/// Actions that can be triggered from transport
pub enum TransportAction {
    None,
    SaveState,
    ReloadState,
}

pub struct TransportPanel {
    bpm_text: String,
}

impl TransportPanel {
    pub fn new(bpm: f64) -> Self {
        Self {
            bpm_text: format!("{:.1}", bpm),
        }
    }

    pub fn ui(
        &mut self,
        ui: &mut Ui,
        host: &HostTransport,
        sample_rate: u32,
        output_name: &str,
        value: f32,
    ) -> TransportAction {
        let mut action = TransportAction::None;

        ui.horizontal(|ui| {
            ui.spacing_mut().item_spacing.x = 8.0;

            let is_playing = host.is_playing();

            // Play/Pause
            let play_text = if is_playing { "\u{23F8}" } else { "\u{25B6}" };
            if ui.button(RichText::new(play_text).size(20.0)).clicked() {
                if is_playing {
                    host.pause();
                } else {
                    host.play();
                }
            }

            // Stop
            if ui.button(RichText::new("\u{23F9}").size(20.0)).clicked() {
                host.stop();
            }

            ui.separator();

            // Position as bar.beat.step of the four-quarter cycle
            let quarters = host.musical_time().max(0.0);
            let bar = (quarters / 4.0) as u64 + 1;
            let beat = (quarters % 4.0) as u32 + 1;
            let step = ((quarters.fract() * 100.0) as u32).min(99);
            ui.monospace(format!("{:>3}.{}.{:02}", bar, beat, step));

            ui.separator();

            ui.label("BPM:");
            let response = ui.add(
                egui::TextEdit::singleline(&mut self.bpm_text)
                    .desired_width(50.0)
            );
            if response.lost_focus() {
                match self.bpm_text.parse::<f64>() {
                    Ok(bpm) if bpm.is_finite() => host.set_bpm(bpm.clamp(20.0, 300.0)),
                    _ => tracing::warn!("Ignoring invalid BPM '{}'", self.bpm_text),
                }
                self.bpm_text = format!("{:.1}", host.bpm());
            }

            ui.separator();

            self.draw_meter(ui, value);
            ui.monospace(format!("{:.3}", value));

            ui.separator();

            if ui.button("Save").on_hover_text("Save the grid state").clicked() {
                action = TransportAction::SaveState;
            }
            if ui.button("Revert").on_hover_text("Reload the saved grid state").clicked() {
                action = TransportAction::ReloadState;
            }

            // Status on right
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.label(if is_playing { "Playing" } else { "Stopped" });
                ui.separator();
                ui.label(format!("{} {}Hz", output_name, sample_rate));
            });
        });

        action
    }

    fn draw_meter(&self, ui: &mut Ui, value: f32) {
        let meter_width = 120.0;
        let meter_height = 14.0;

        let (response, painter) = ui.allocate_painter(
            Vec2::new(meter_width + 2.0, meter_height + 2.0),
            Sense::hover(),
        );

        let meter_rect = Rect::from_min_size(
            response.rect.min + Vec2::new(1.0, 1.0),
            Vec2::new(meter_width, meter_height),
        );

        painter.rect_filled(meter_rect, 2.0, Color32::from_gray(25));

        let width = value.clamp(0.0, 1.0) * meter_width;
        if width > 0.0 {
            painter.rect_filled(
                Rect::from_min_size(meter_rect.min, Vec2::new(width, meter_height)),
                2.0,
                Color32::from_rgb(50, 160, 50),
            );
        }

        painter.rect_stroke(
            meter_rect,
            2.0,
            Stroke::new(1.0, Color32::from_gray(50)),
            egui::StrokeKind::Outside,
        );
    }
}
