use super::{core_err, load_spec, prepare, service_unit, workdir, Context, EXIT_SUCCESS};

pub fn run(ctx: &Context) -> Result<u8, String> {
    let cwd = workdir()?;
    prepare(ctx, &cwd, false)?;
    let spec = load_spec(ctx)?;
    let unit = service_unit(&spec)?;
    unit.restart().map_err(core_err)?;
    println!("restarted {}", unit.service());
    Ok(EXIT_SUCCESS)
}
