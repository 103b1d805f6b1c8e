//! Main application state

mod audio_ops;
mod config;
mod state_ops;

use std::sync::Arc;

use eframe::CreationContext;
use egui::Context;
use stepgrid_services::{
    message_channel, GridControl, GridController, HostTransport, MessageReceiver, TracingListener,
};

use audio_ops::{start_output, HostOutput};
use config::{load_config, AppConfig};

use crate::panels::{GridColors, StepGridAction, StepGridPanel, TransportAction, TransportPanel};

/// Automation tag reported by the controller's timer edits
const CONTROLLER_TAG: u32 = 0;
/// Tag reported by pointer edits on the grid panel
const CONTROL_TAG: u32 = 1;

pub struct StepGridApp {
    config: AppConfig,
    control: GridControl,
    messages: MessageReceiver,
    host: Arc<HostTransport>,
    output: Option<HostOutput>,

    // Panels
    transport_panel: TransportPanel,
    grid_panel: StepGridPanel,
}

impl StepGridApp {
    pub fn new(_cc: &CreationContext<'_>) -> Self {
        let config = load_config();

        let controller = GridController::new(CONTROLLER_TAG, &config.grid)
            .with_listener(Box::new(TracingListener));
        let control = GridControl::new(CONTROL_TAG, controller, config.grid.snap_range);

        let (sender, messages) = message_channel(config.host.message_capacity);
        let host = Arc::new(HostTransport::new(config.host.bpm));
        let value = control.controller().shared_value();
        let output = start_output(&config.host, &host, &sender, &value);

        let colors = GridColors::from_rgb(config.theme.left_color, config.theme.right_color);

        let mut app = Self {
            transport_panel: TransportPanel::new(config.host.bpm),
            grid_panel: StepGridPanel::new(colors),
            config,
            control,
            messages,
            host,
            output,
        };
        app.load_state();
        app
    }
}

impl eframe::App for StepGridApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        // 1. Latest host position, then one timer tick
        self.control.controller_mut().notify_pending(&self.messages);
        if let Err(e) = self.control.tick() {
            tracing::error!("Grid tick failed: {}", e);
        }

        // 2. Transport bar
        let (sample_rate, output_name) = self
            .output
            .as_ref()
            .map_or((0, "No output"), |o| (o.sample_rate(), o.name()));
        let value = self.control.controller().value();
        let transport_action = egui::TopBottomPanel::top("transport").show(ctx, |ui| {
            self.transport_panel.ui(ui, &self.host, sample_rate, output_name, value)
        }).inner;

        match transport_action {
            TransportAction::SaveState => self.save_state(),
            TransportAction::ReloadState => self.load_state(),
            TransportAction::None => {}
        }

        // 3. Grid
        let grid_action = egui::CentralPanel::default()
            .show(ctx, |ui| self.grid_panel.ui(ui, &mut self.control))
            .inner;

        match grid_action {
            StepGridAction::Resized(command) => {
                let grid = self.control.controller().grid();
                tracing::info!(
                    ?command,
                    bars = grid.bar_count(),
                    splits = grid.split_count(),
                    "Grid resized"
                );
            }
            StepGridAction::EditFinished | StepGridAction::None => {}
        }

        // The timer tick runs once per frame
        ctx.request_repaint();
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        self.stop_output();
        self.save_state();
        self.save_settings();
    }
}
