use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use stepgrid_core::Result;

use super::config::{save_config, state_path};
use super::StepGridApp;

impl StepGridApp {
    /// Restore the saved grid. A missing file keeps the defaults.
    pub(super) fn load_state(&mut self) {
        let path = state_path();
        if !path.exists() {
            tracing::debug!("No saved grid state at {}", path.display());
            return;
        }
        if let Err(e) = self.read_state_file(&path) {
            tracing::warn!("Failed to load grid state from {}: {}", path.display(), e);
        }
    }

    pub(super) fn save_state(&self) {
        let path = state_path();
        match self.write_state_file(&path) {
            Ok(()) => tracing::info!("Saved grid state to {}", path.display()),
            Err(e) => tracing::error!("Failed to save grid state to {}: {}", path.display(), e),
        }
    }

    pub(super) fn save_settings(&mut self) {
        self.config.host.bpm = self.host.bpm();
        save_config(&self.config);
    }

    fn read_state_file(&mut self, path: &Path) -> Result<()> {
        let mut reader = BufReader::new(File::open(path)?);
        self.control.controller_mut().set_state(&mut reader)
    }

    fn write_state_file(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let mut writer = BufWriter::new(File::create(path)?);
        self.control.controller().get_state(&mut writer)?;
        writer.flush()?;
        Ok(())
    }
}
