#[cfg(feature = "demo")]
use std::{env, error::Error, ffi::OsString};

#[cfg(feature = "demo")]
use lz77_rs::*;

#[cfg(feature = "demo")]
fn main() -> Result<(), Box<dyn Error>> {
    use log::{info, LevelFilter};
    use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};

    TermLogger::init(
        LevelFilter::Debug,
        Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    )?;

    let args: Vec<OsString> = env::args_os().collect();

    if args.len() < 4 {
        println!("Usage: {} c|d input output", args[0].to_string_lossy());
        return Ok(());
    }

    let mode = &args[1];
    let inp_fn = &args[2];
    let outp_fn = &args[3];

    let inp = std::fs::read(inp_fn)?;
    let outp = match mode.to_str() {
        Some("c") => compress_to_vec(&inp),
        Some("d") => decompress_to_vec(&inp, Some(inp.len() * 2))?,
        _ => {
            println!("Invalid mode {}", mode.to_string_lossy());
            return Ok(());
        }
    };

    info!("{} bytes in, {} bytes out", inp.len(), outp.len());
    std::fs::write(outp_fn, &outp)?;

    Ok(())
}

#[cfg(not(feature = "demo"))]
fn main() {
    println!("Demo requires demo feature");
}
