use super::{prepare, workdir, Context, EXIT_SUCCESS};
use podcompose_core::PrepareOutcome;

pub fn run(ctx: &Context, force: bool) -> Result<u8, String> {
    let cwd = workdir()?;
    if prepare(ctx, &cwd, force)? == PrepareOutcome::Written {
        println!("wrote {}", ctx.manifest.display());
    }
    Ok(EXIT_SUCCESS)
}
