extern crate clap;
extern crate env_logger;
#[macro_use]
extern crate log;
extern crate chipbox;
extern crate shlex;

use std::env;
use std::io::Write;

use chipbox::prelude::*;
use clap::Parser;
use color_eyre::eyre::Result;

//------------------------------------------------------------------------------
fn main() {
    env_logger::builder().format_timestamp_nanos().init();
    if let Err(err) = color_eyre::install() {
        warn!("failed to install the error report handler: {err}");
    }

    match real_main() {
        Ok(exit_code) => std::process::exit(exit_code),
        Err(err) => {
            // if downstream pipe is closed, exit silently
            if err
                .downcast_ref::<std::io::Error>()
                .is_some_and(|e| e.kind() == std::io::ErrorKind::BrokenPipe)
            {
                std::process::exit(0)
            }
            eprintln!("{err:?}");
            std::process::exit(2)
        }
    }
}

fn parse_args() -> ChipBoxOptions {
    let mut args = Vec::new();

    args.push(env::args().next().unwrap_or_else(|| String::from("chipbox")));
    args.extend(
        env::var("CHIPBOX_DEFAULT_OPTIONS")
            .ok()
            .and_then(|val| shlex::split(&val))
            .unwrap_or_default(),
    );
    args.extend(env::args().skip(1));

    ChipBoxOptions::parse_from(args).build()
}

fn real_main() -> Result<i32> {
    let opts = parse_args();
    let output_ending = if opts.print0 { "\0" } else { "\n" };

    //------------------------------------------------------------------------------
    // catalog
    let catalog = match &opts.catalog {
        Some(path) => Catalog::from_file(path)?,
        None => Catalog::regions(),
    };

    //------------------------------------------------------------------------------
    let output = ChipBox::run_with(opts, catalog)?;
    if output.is_abort {
        return Ok(130);
    }

    //------------------------------------------------------------------------------
    // output
    let mut stdout = std::io::stdout().lock();
    for item in output.selected.iter() {
        write!(stdout, "{item}{output_ending}")?;
    }
    stdout.flush()?;

    Ok(if output.selected.is_empty() { 1 } else { 0 })
}
