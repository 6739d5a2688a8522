use super::{core_err, workdir, EXIT_SUCCESS};
use podcompose_runtime::show_logs;

pub fn run(args: &[String]) -> Result<u8, String> {
    let cwd = workdir()?;
    show_logs(&cwd, args).map_err(core_err)?;
    Ok(EXIT_SUCCESS)
}
