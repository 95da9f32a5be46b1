use std::path::PathBuf;
use std::process::Command;

use anyhow::{bail, Context, Result};

use super::plot::StatChart;

/// Displays a stat chart somewhere the user can see it.
pub trait ChartRenderer {
    fn render(&mut self, chart: &StatChart) -> Result<()>;
}

/// Opens the chart in a child `pokedex chart` process and waits for the
/// window to close. A native event loop can only be created once per process,
/// so the interactive shell never opens windows itself.
#[derive(Debug, Clone)]
pub struct ProcessChartRenderer {
    program: PathBuf,
}

impl ProcessChartRenderer {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Re-launch the running executable.
    pub fn current_exe() -> Result<Self> {
        let program = std::env::current_exe().context("locating the pokedex executable")?;
        Ok(Self::new(program))
    }

    pub fn command(&self, chart: &StatChart) -> Command {
        let values = chart
            .values()
            .iter()
            .map(|v| v.to_string())
            .collect::<Vec<_>>()
            .join(",");
        let mut cmd = Command::new(&self.program);
        cmd.arg("chart")
            .arg("--title")
            .arg(&chart.title)
            .arg("--values")
            .arg(values);
        cmd
    }
}

impl ChartRenderer for ProcessChartRenderer {
    fn render(&mut self, chart: &StatChart) -> Result<()> {
        log::debug!("Launching chart window for {}", chart.title);
        let status = self
            .command(chart)
            .status()
            .with_context(|| format!("launching {}", self.program.display()))?;
        if !status.success() {
            bail!("chart window exited with {status}");
        }
        Ok(())
    }
}
