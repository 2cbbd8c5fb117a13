//! nginx control — implements `WebServer` by shelling out to the nginx binary.

use std::process::Output;

use anyhow::Result;

use crate::application::ports::{CommandRunner, WebServer};

pub struct NginxControl<R: CommandRunner> {
    runner: R,
    binary: String,
}

impl<R: CommandRunner> NginxControl<R> {
    #[must_use]
    pub fn new(runner: R, binary: impl Into<String>) -> Self {
        Self {
            runner,
            binary: binary.into(),
        }
    }
}

impl<R: CommandRunner> WebServer for NginxControl<R> {
    async fn test_config(&self) -> Result<Output> {
        self.runner.run(&self.binary, &["-t"]).await
    }

    async fn signal_reload(&self) -> Result<Output> {
        self.runner.run(&self.binary, &["-s", "reload"]).await
    }
}
