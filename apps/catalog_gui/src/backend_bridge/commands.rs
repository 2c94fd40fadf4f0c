//! Backend commands queued from UI to backend worker.

pub enum BackendCommand {
    LoadCatalog,
    /// `key` is a record id or a script title.
    LoadScript {
        key: String,
    },
    FetchLogo {
        url: String,
    },
}

impl BackendCommand {
    pub fn name(&self) -> &'static str {
        match self {
            BackendCommand::LoadCatalog => "load_catalog",
            BackendCommand::LoadScript { .. } => "load_script",
            BackendCommand::FetchLogo { .. } => "fetch_logo",
        }
    }
}
