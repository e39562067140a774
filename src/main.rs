mod bus;
mod cpu;
mod disasm;
mod opcode;
mod savestate;

use std::env;
use std::fs;
use std::process;

use log::{error, info};

use bus::{CpuBus, Memory};
use cpu::Cpu;
use savestate::Snapshot;

const DEFAULT_ORG: u16 = 0x8000;
const DEFAULT_STEPS: u64 = 1_000_000;

fn parse_addr(arg: &str) -> Result<u16, String> {
    let digits = arg.trim_start_matches("0x").trim_start_matches('$');
    u16::from_str_radix(digits, 16).map_err(|e| format!("Bad address '{}': {}", arg, e))
}

struct Options {
    image: Option<String>,
    org: u16,
    entry: Option<u16>,
    steps: u64,
    trace: bool,
    snapshot_in: Option<String>,
    snapshot_out: Option<String>,
}

fn usage(program: &str) {
    eprintln!(
        "Usage: {} [--org ADDR] [--entry ADDR] [--steps N] [--trace] \
         [--snapshot-in FILE] [--snapshot-out FILE] <image>",
        program
    );
    eprintln!("  --org ADDR        load address of the image (hex, default ${:04X})", DEFAULT_ORG);
    eprintln!("  --entry ADDR      start execution at ADDR instead of the reset vector");
    eprintln!("  --steps N         instruction budget (default {})", DEFAULT_STEPS);
    eprintln!("  --trace           print each instruction with registers");
    eprintln!("  --snapshot-in     resume from a snapshot instead of resetting");
    eprintln!("  --snapshot-out    write a snapshot when the run ends");
}

fn parse_args(args: &[String]) -> Result<Options, String> {
    let mut options = Options {
        image: None,
        org: DEFAULT_ORG,
        entry: None,
        steps: DEFAULT_STEPS,
        trace: false,
        snapshot_in: None,
        snapshot_out: None,
    };

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--org" => {
                let value = args.get(i + 1).ok_or("--org needs an address")?;
                options.org = parse_addr(value)?;
                i += 2;
            }
            "--entry" => {
                let value = args.get(i + 1).ok_or("--entry needs an address")?;
                options.entry = Some(parse_addr(value)?);
                i += 2;
            }
            "--steps" => {
                let value = args.get(i + 1).ok_or("--steps needs a count")?;
                options.steps = value
                    .parse()
                    .map_err(|e| format!("Bad step count '{}': {}", value, e))?;
                i += 2;
            }
            "--trace" => {
                options.trace = true;
                i += 1;
            }
            "--snapshot-in" => {
                options.snapshot_in = Some(args.get(i + 1).ok_or("--snapshot-in needs a file")?.clone());
                i += 2;
            }
            "--snapshot-out" => {
                options.snapshot_out = Some(args.get(i + 1).ok_or("--snapshot-out needs a file")?.clone());
                i += 2;
            }
            other if other.starts_with("--") => {
                return Err(format!("Unknown flag '{}'", other));
            }
            other => {
                if options.image.is_some() {
                    return Err("More than one image given".to_string());
                }
                options.image = Some(other.to_string());
                i += 1;
            }
        }
    }
    Ok(options)
}

fn trace_line(cpu: &Cpu, memory: &mut Memory) -> String {
    let window = [
        memory.read(cpu.pc),
        memory.read(cpu.pc.wrapping_add(1)),
        memory.read(cpu.pc.wrapping_add(2)),
    ];
    format!(
        "{:<32} A:{:02X} X:{:02X} Y:{:02X} SP:{:02X} P:{:02X}",
        disasm::disassemble(window, cpu.pc),
        cpu.a,
        cpu.x,
        cpu.y,
        cpu.sp,
        cpu.status.bits()
    )
}

fn run(options: &Options) -> Result<(), String> {
    let mut cpu = Cpu::new();
    let mut memory = Memory::new();

    if let Some(ref path) = options.snapshot_in {
        let snapshot = Snapshot::load_from_file(path)?;
        snapshot.restore(&mut cpu, &mut memory)?;
        info!("resumed from snapshot {} at PC ${:04X}", path, cpu.pc);
    } else {
        let path = options
            .image
            .as_ref()
            .ok_or("No image given (and no --snapshot-in)")?;
        let image = fs::read(path).map_err(|e| format!("Failed to read '{}': {}", path, e))?;
        memory.load(&image, options.org);
        info!("loaded {} bytes at ${:04X}", image.len(), options.org);

        cpu.reset(&mut memory);
        if let Some(entry) = options.entry {
            cpu.pc = entry;
        }
        info!("starting execution at ${:04X}", cpu.pc);
    }

    let mut executed = 0u64;
    while executed < options.steps {
        if options.trace {
            println!("{}", trace_line(&cpu, &mut memory));
        }
        if let Err(e) = cpu.step(&mut memory) {
            error!("{}", e);
            return Err(e.to_string());
        }
        executed += 1;
    }
    info!("instruction budget of {} exhausted at PC ${:04X}", options.steps, cpu.pc);

    if let Some(ref path) = options.snapshot_out {
        Snapshot::capture(&cpu, &memory).save_to_file(path)?;
        info!("snapshot written to {}", path);
    }
    Ok(())
}

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 2 || args.iter().any(|a| a == "--help" || a == "-h") {
        usage(&args[0]);
        return;
    }

    let options = match parse_args(&args) {
        Ok(options) => options,
        Err(e) => {
            eprintln!("{}", e);
            usage(&args[0]);
            process::exit(2);
        }
    };

    if let Err(e) = run(&options) {
        eprintln!("{}", e);
        process::exit(1);
    }
}
