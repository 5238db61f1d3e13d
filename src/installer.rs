//! Installer module
//!
//! The installation step runs after the menu has closed. It receives the plan
//! and the selected applications; how it installs them is up to the
//! implementation. [`DryRunInstaller`] only reports what would happen.

use std::io::Write;
use tracing::info;

use crate::error::Result;
use crate::manifest::Application;
use crate::plan::InstallationPlan;

/// Consumer of a finished installation plan
pub trait Installer {
    /// Install everything in `plan`; `apps` lists the same applications in
    /// catalog order for per-application reporting
    fn install(&mut self, apps: &[&Application], plan: &InstallationPlan) -> Result<()>;
}

/// Writes the installation report without running any package manager
pub struct DryRunInstaller<W: Write> {
    out: W,
}

impl<W: Write> DryRunInstaller<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Installer for DryRunInstaller<W> {
    fn install(&mut self, apps: &[&Application], plan: &InstallationPlan) -> Result<()> {
        if apps.is_empty() {
            writeln!(self.out, "No applications selected. Exiting.")?;
            return Ok(());
        }

        writeln!(self.out, "\n--- Installing the following applications (stub):\n")?;
        for app in apps {
            info!(id = %app.id, install = %app.install, "Installing (dry run)");
            writeln!(self.out, "Installing {}... [stub]", app.name)?;
        }

        writeln!(self.out, "\n--- Installation Summary (stub) ---")?;
        for line in plan.summary_lines() {
            writeln!(self.out, "{line}")?;
        }

        writeln!(self.out, "\nTotal applications: {}", apps.len())?;
        writeln!(self.out, "Done!")?;
        self.out.flush()?;
        Ok(())
    }
}

/// Writes the plan as pretty JSON for other tools to consume
pub struct JsonPlanWriter<W: Write> {
    out: W,
}

impl<W: Write> JsonPlanWriter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Installer for JsonPlanWriter<W> {
    fn install(&mut self, _apps: &[&Application], plan: &InstallationPlan) -> Result<()> {
        writeln!(self.out, "{}", plan.to_json()?)?;
        self.out.flush()?;
        Ok(())
    }
}
