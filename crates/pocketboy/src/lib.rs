use std::path::PathBuf;

use anyhow::{anyhow, bail, Context, Result};
use pocketboy_gb::{FrameOutcome, GameBoy};
use typed_builder::TypedBuilder;

pub const USAGE: &str =
    "usage: pocketboy <cartridge> [--boot <bootrom>] [--frames N] [--break HEX] [--dump <out.rgb>]";

#[derive(Debug, Clone, PartialEq, Eq, TypedBuilder)]
pub struct RunOptions {
    #[builder(setter(into))]
    pub cartridge: PathBuf,
    /// Without a boot ROM the DMG post-boot state is applied instead.
    #[builder(default, setter(into))]
    pub boot_rom: Option<PathBuf>,
    #[builder(default = 1)]
    pub frames: u32,
    #[builder(default)]
    pub breakpoint: Option<u16>,
    /// Raw RGB24 dump of the last screen.
    #[builder(default, setter(into))]
    pub dump: Option<PathBuf>,
}

/// What happened during [`run`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    pub frames: u32,
    pub cycles: u64,
    /// PC the run stopped on, if the breakpoint was hit.
    pub breakpoint_hit: Option<u16>,
    pub serial: Vec<u8>,
}

impl RunReport {
    pub fn serial_text(&self) -> String {
        String::from_utf8_lossy(&self.serial).into_owned()
    }
}

/// Parse runner arguments, program name excluded.
pub fn parse_args<I>(args: I) -> Result<RunOptions>
where
    I: IntoIterator<Item = String>,
{
    let mut cartridge = None;
    let mut boot_rom = None;
    let mut frames = 1;
    let mut breakpoint = None;
    let mut dump = None;

    let mut args = args.into_iter();
    while let Some(arg) = args.next() {
        let mut value = |flag: &str| {
            args.next()
                .ok_or_else(|| anyhow!("missing value for {flag}"))
        };
        match arg.as_str() {
            "--boot" => boot_rom = Some(PathBuf::from(value("--boot")?)),
            "--frames" => {
                let raw = value("--frames")?;
                frames = raw
                    .parse()
                    .with_context(|| format!("invalid frame count '{raw}'"))?;
            }
            "--break" => breakpoint = Some(parse_hex(&value("--break")?)?),
            "--dump" => dump = Some(PathBuf::from(value("--dump")?)),
            flag if flag.starts_with("--") => bail!("unknown option '{flag}'"),
            path => {
                if cartridge.is_some() {
                    bail!("unexpected argument '{path}'");
                }
                cartridge = Some(PathBuf::from(path));
            }
        }
    }

    let cartridge = cartridge.ok_or_else(|| anyhow!("no cartridge given"))?;
    Ok(RunOptions::builder()
        .cartridge(cartridge)
        .boot_rom(boot_rom)
        .frames(frames)
        .breakpoint(breakpoint)
        .dump(dump)
        .build())
}

fn parse_hex(raw: &str) -> Result<u16> {
    let digits = raw
        .strip_prefix("0x")
        .or_else(|| raw.strip_prefix("0X"))
        .or_else(|| raw.strip_prefix('$'))
        .unwrap_or(raw);
    u16::from_str_radix(digits, 16).with_context(|| format!("invalid breakpoint address '{raw}'"))
}

/// Load the ROMs, run up to `options.frames` frames and write the
/// optional screen dump.
pub fn run(options: &RunOptions) -> Result<RunReport> {
    let cartridge = std::fs::read(&options.cartridge).with_context(|| {
        format!(
            "failed to read cartridge '{}'",
            options.cartridge.display()
        )
    })?;
    let boot_rom = options
        .boot_rom
        .as_ref()
        .map(|path| {
            std::fs::read(path)
                .with_context(|| format!("failed to read boot ROM '{}'", path.display()))
        })
        .transpose()?;

    let mut gb = GameBoy::new();
    gb.load_cartridge(&cartridge);
    match boot_rom {
        Some(bytes) => gb.load_bootstrap(&bytes),
        None => gb.skip_bootstrap(),
    }
    gb.set_breakpoint(options.breakpoint);

    let mut report = RunReport {
        frames: 0,
        cycles: 0,
        breakpoint_hit: None,
        serial: Vec::new(),
    };
    while report.frames < options.frames {
        match gb.step_frame()? {
            FrameOutcome::FrameComplete { cycles } => {
                report.frames += 1;
                report.cycles += cycles;
                log::trace!("Frame {} done in {} cycles", report.frames, cycles);
            }
            FrameOutcome::Breakpoint { pc, cycles } => {
                report.cycles += cycles;
                report.breakpoint_hit = Some(pc);
                log::info!("Breakpoint at PC=0x{pc:04X}");
                if let Some(inst) = gb.disassemble_at(pc) {
                    log::info!("  {:04X}: {:<9} {}", pc, inst.bytes_to_string(), inst);
                }
                break;
            }
        }
    }

    if let Some(path) = &options.dump {
        let screen = gb.screen_buffer();
        std::fs::write(path, screen.as_bytes())
            .with_context(|| format!("failed to write screen dump '{}'", path.display()))?;
        log::info!(
            "Wrote {}x{} RGB24 dump to '{}'",
            screen.width(),
            screen.height(),
            path.display()
        );
    }

    report.serial = gb.mmu().serial_output().to_vec();
    Ok(report)
}
