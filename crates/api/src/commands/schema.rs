//! Schema provisioning for development and test databases

use std::time::Instant;

use dbsweep_domain::Result;

use crate::context::AppContext;
use crate::utils::logging::log_command_execution;

/// Create the inspected tables if they do not exist yet.
pub fn init_schema(ctx: &AppContext) -> Result<()> {
    let command_name = "database::init_schema";
    let start = Instant::now();

    let result = ctx.install_schema();

    log_command_execution(command_name, start.elapsed(), result.is_ok());
    result
}
