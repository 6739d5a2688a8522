use super::{core_err, load_spec, prepare, service_unit, workdir, Context, EXIT_SUCCESS};
use podcompose_core::run_args;

pub fn run(ctx: &Context) -> Result<u8, String> {
    let cwd = workdir()?;
    prepare(ctx, &cwd, false)?;
    let spec = load_spec(ctx)?;
    let unit = service_unit(&spec)?;
    // A unit has no terminal to attach to.
    let args = run_args(&spec, &ctx.manifest, false, ctx.verbose).to_args(&cwd);
    unit.start(ctx.rkt.binary(), &args).map_err(core_err)?;
    println!("started {}", unit.service());
    Ok(EXIT_SUCCESS)
}
