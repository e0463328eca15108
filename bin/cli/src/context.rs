use std::time::Duration;

use anyhow::Context;
use mutation::Executor;
use stackit_client::{
  StackitClient, entities::config::cli::CliConfig, wait::WaitOptions,
};

use crate::printer::Printer;

/// Everything a command needs from the process setup.
/// Built once in `main`, passed by reference.
pub struct CliContext {
  pub config: CliConfig,
  pub printer: Printer,
  pub assume_yes: bool,
}

impl CliContext {
  pub fn new(config: CliConfig, assume_yes: bool) -> CliContext {
    let printer = Printer::new(config.output_format, config.table_borders);
    CliContext {
      config,
      printer,
      assume_yes,
    }
  }

  pub fn client(&self) -> anyhow::Result<StackitClient> {
    StackitClient::new(
      self.config.access_token.clone(),
      self.config.endpoints.clone(),
    )
    .context("Failed to initialize STACKIT client")
  }

  pub fn region(&self) -> &str {
    &self.config.region
  }

  pub fn wait_options(&self) -> WaitOptions {
    WaitOptions {
      interval: Duration::from_secs(self.config.wait_interval_secs),
      timeout: Duration::from_secs(self.config.wait_timeout_secs),
    }
  }

  pub fn executor(&self) -> Executor<'_, Printer> {
    Executor::new(&self.printer)
      .assume_yes(self.assume_yes)
      .async_mode(self.config.async_mode)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn wait_options_from_config() {
    let ctx = CliContext::new(
      CliConfig {
        wait_interval_secs: 1,
        wait_timeout_secs: 60,
        ..Default::default()
      },
      true,
    );
    let options = ctx.wait_options();
    assert_eq!(options.interval, Duration::from_secs(1));
    assert_eq!(options.timeout, Duration::from_secs(60));
  }
}
