use super::{load_spec, service_unit, Context, EXIT_SUCCESS};

pub fn run(ctx: &Context) -> Result<u8, String> {
    let spec = load_spec(ctx)?;
    let unit = service_unit(&spec)?;
    unit.stop();
    println!("stopped {}", unit.service());
    Ok(EXIT_SUCCESS)
}
