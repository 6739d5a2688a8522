use super::{core_err, load_spec, service_unit, Context, EXIT_SUCCESS};

pub fn run(ctx: &Context) -> Result<u8, String> {
    let spec = load_spec(ctx)?;
    service_unit(&spec)?.status().map_err(core_err)?;
    Ok(EXIT_SUCCESS)
}
