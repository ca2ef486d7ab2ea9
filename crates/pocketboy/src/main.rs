use std::io::Write;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let options = match pocketboy::parse_args(std::env::args().skip(1)) {
        Ok(options) => options,
        Err(err) => {
            eprintln!("{err}\n{}", pocketboy::USAGE);
            std::process::exit(1);
        }
    };
    log::info!("Playing ROM path: '{}'", options.cartridge.display());

    let report = pocketboy::run(&options)?;
    if let Some(pc) = report.breakpoint_hit {
        println!("Stopped at breakpoint 0x{pc:04X} after {} frames", report.frames);
    }

    let mut stdout = std::io::stdout().lock();
    stdout.write_all(&report.serial)?;
    stdout.flush()?;
    Ok(())
}
