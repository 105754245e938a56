//! Pack and unpack binary records from the command line.
//!
//! Usage:
//!   packer pack FORMAT [VALUE ...] [--raw] [-o FILE]
//!   packer unpack FORMAT [FILE|-] [--hex TEXT] [--start N]
//!   packer records FORMAT [FILE|-] [--hex TEXT]
//!   packer size FORMAT
//!
//! `pack` prints the result as hex unless --raw (bytes to stdout) or -o is given.
//! `unpack` and `records` read FILE, stdin when FILE is `-` or missing, or the --hex text.
//!
//! Set RUST_LOG=binpacker=trace to log every directive as it runs.

use anyhow::{bail, Context};
use binpacker::dump::{format_value, hex_string, parse_hex, values_from_text};
use binpacker::{fixed_size, pack, unpack, unpack_records};
use std::io::{self, Read, Write};

const USAGE: &str = "usage:
  packer pack FORMAT [VALUE ...] [--raw] [-o FILE]
  packer unpack FORMAT [FILE|-] [--hex TEXT] [--start N]
  packer records FORMAT [FILE|-] [--hex TEXT]
  packer size FORMAT";

fn take_flag(args: &mut Vec<String>, names: &[&str]) -> bool {
    if let Some(pos) = args.iter().position(|a| names.contains(&a.as_str())) {
        args.remove(pos);
        true
    } else {
        false
    }
}

fn take_option(args: &mut Vec<String>, names: &[&str]) -> anyhow::Result<Option<String>> {
    let pos = match args.iter().position(|a| names.contains(&a.as_str())) {
        Some(p) => p,
        None => return Ok(None),
    };
    if pos + 1 >= args.len() {
        bail!("{} needs a value", args[pos]);
    }
    let value = args.remove(pos + 1);
    args.remove(pos);
    Ok(Some(value))
}

fn read_input(hex: Option<String>, path: Option<&String>) -> anyhow::Result<Vec<u8>> {
    if let Some(h) = hex {
        return Ok(parse_hex(&h)?);
    }
    match path.map(String::as_str) {
        None | Some("-") => {
            let mut data = Vec::new();
            io::stdin().read_to_end(&mut data)?;
            Ok(data)
        }
        Some(p) => std::fs::read(p).with_context(|| format!("{}: read failed", p)),
    }
}

fn format_arg(args: &[String]) -> anyhow::Result<&str> {
    match args.first() {
        Some(f) => Ok(f),
        None => bail!("missing FORMAT\n{}", USAGE),
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let mut args: Vec<String> = std::env::args().skip(1).collect();
    if args.is_empty() {
        eprintln!("{}", USAGE);
        std::process::exit(2);
    }
    let command = args.remove(0);

    match command.as_str() {
        "pack" => {
            let raw = take_flag(&mut args, &["--raw", "-r"]);
            let output = take_option(&mut args, &["--output", "-o"])?;
            let format = format_arg(&args)?;
            let values = values_from_text(format, &args[1..])?;
            let bytes = pack(format, &values)?;
            if let Some(path) = output {
                std::fs::write(&path, &bytes).with_context(|| format!("{}: write failed", path))?;
                eprintln!("{}: {} byte(s)", path, bytes.len());
            } else if raw {
                io::stdout().write_all(&bytes)?;
            } else {
                println!("{}", hex_string(&bytes));
            }
        }
        "unpack" => {
            let hex = take_option(&mut args, &["--hex", "-x"])?;
            let start = take_option(&mut args, &["--start", "-s"])?
                .map(|s| {
                    s.parse::<usize>()
                        .with_context(|| format!("--start: bad position {:?}", s))
                })
                .transpose()?;
            let format = format_arg(&args)?;
            let data = read_input(hex, args.get(1))?;
            let (next, values) = unpack(format, &data, start)?;
            println!("next: {}", next);
            for (i, v) in values.iter().enumerate() {
                println!("{}: {}", i + 1, format_value(v));
            }
        }
        "records" => {
            let hex = take_option(&mut args, &["--hex", "-x"])?;
            let format = format_arg(&args)?;
            let data = read_input(hex, args.get(1))?;
            let records = unpack_records(format, &data)?;
            for r in &records {
                let values: Vec<String> = r.values.iter().map(format_value).collect();
                println!("[{}..{}) {}", r.byte_range.0, r.byte_range.1, values.join(", "));
            }
            eprintln!("records: {}", records.len());
        }
        "size" => {
            let format = format_arg(&args)?;
            match fixed_size(format)? {
                Some(n) => println!("{}", n),
                None => println!("variable"),
            }
        }
        "help" | "--help" | "-h" => println!("{}", USAGE),
        other => bail!("unknown command '{}'\n{}", other, USAGE),
    }
    Ok(())
}
