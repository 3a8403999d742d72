//! Backend commands queued from UI to backend worker.

use client_core::SelectedFile;

pub enum BackendCommand {
    ProbeHealth,
    Analyze { file: SelectedFile },
}

impl BackendCommand {
    pub fn name(&self) -> &'static str {
        match self {
            Self::ProbeHealth => "probe_health",
            Self::Analyze { .. } => "analyze",
        }
    }
}
