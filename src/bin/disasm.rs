//! Standalone disassembly listing tool: loads a raw image and prints one
//! line per instruction.

#[path = "../disasm.rs"]
mod disasm;
#[path = "../opcode.rs"]
mod opcode;

use std::env;
use std::fs;
use std::process;

fn parse_addr(arg: &str) -> Result<u16, String> {
    let digits = arg.trim_start_matches("0x").trim_start_matches('$');
    u16::from_str_radix(digits, 16).map_err(|e| format!("Bad address '{}': {}", arg, e))
}

fn parse_args(args: &[String]) -> Result<(String, u16, Option<u16>, usize), String> {
    let mut org: u16 = 0x8000;
    let mut start: Option<u16> = None;
    let mut count: usize = 32;
    let mut image_path: Option<String> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--org" => {
                let value = args.get(i + 1).ok_or("--org needs an address")?;
                org = parse_addr(value)?;
                i += 2;
            }
            "--start" => {
                let value = args.get(i + 1).ok_or("--start needs an address")?;
                start = Some(parse_addr(value)?);
                i += 2;
            }
            "--count" => {
                let value = args.get(i + 1).ok_or("--count needs a number")?;
                count = value
                    .parse()
                    .map_err(|e| format!("Bad count '{}': {}", value, e))?;
                i += 2;
            }
            other if other.starts_with("--") => {
                return Err(format!("Unknown flag '{}'", other));
            }
            other => {
                if image_path.is_some() {
                    return Err("More than one image given".to_string());
                }
                image_path = Some(other.to_string());
                i += 1;
            }
        }
    }

    let path = image_path.ok_or("No image given")?;
    Ok((path, org, start, count))
}

fn main() {
    let args: Vec<String> = env::args().collect();
    if args.len() < 2 || args.iter().any(|a| a == "--help" || a == "-h") {
        eprintln!(
            "Usage: {} [--org ADDR] [--start ADDR] [--count N] <image>",
            args[0]
        );
        return;
    }

    let (path, org, start, count) = match parse_args(&args) {
        Ok(parsed) => parsed,
        Err(e) => {
            eprintln!("{}", e);
            process::exit(2);
        }
    };

    let image = match fs::read(&path) {
        Ok(image) => image,
        Err(e) => {
            eprintln!("Failed to read '{}': {}", path, e);
            process::exit(1);
        }
    };

    let mut ram = [0u8; 0x10000];
    let room = ram.len() - org as usize;
    let len = image.len().min(room);
    ram[org as usize..org as usize + len].copy_from_slice(&image[..len]);

    let mut addr = start.unwrap_or(org);
    for _ in 0..count {
        let window = [
            ram[addr as usize],
            ram[addr.wrapping_add(1) as usize],
            ram[addr.wrapping_add(2) as usize],
        ];
        println!("{}", disasm::disassemble(window, addr));
        // Undecodable bytes take one slot, like a .DB directive
        let step = match opcode::decode(window[0]) {
            Some(op) => 1 + op.mode.operand_len(),
            None => 1,
        };
        addr = addr.wrapping_add(step);
    }
}
