use super::{core_err, load_spec, prepare, workdir, Context, EXIT_SUCCESS};
use podcompose_core::run_args;

pub fn run(ctx: &Context, interactive: bool) -> Result<u8, String> {
    let cwd = workdir()?;
    prepare(ctx, &cwd, false)?;
    let spec = load_spec(ctx)?;
    let args = run_args(&spec, &ctx.manifest, interactive, ctx.verbose).to_args(&cwd);
    ctx.rkt.run(&args).map_err(core_err)?;
    Ok(EXIT_SUCCESS)
}
