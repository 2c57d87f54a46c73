//! Interactive rip shell
//!
//! Mirrors the live-process command surface: `ripanims`, `ripmodels`,
//! `ripimages`, `ripsounds`, `exit`. All four rip commands discover their
//! targets by walking the game's in-memory asset pools, which requires an
//! attached process - the process-attach/wait loop is explicitly out of
//! scope here, so each rip command reports that constraint rather than
//! silently doing nothing. Bulk, process-free extraction of an archive's
//! full contents is available as the other CLI mode (see
//! [`crate::commands::extract`]).

use std::io::{self, Write};

use anyhow::Result;

/// Run the shell until `exit` is typed or stdin closes.
pub fn run() -> Result<()> {
    println!("codol-rs interactive shell ('exit' to quit)");

    let stdin = io::stdin();
    loop {
        print!("> ");
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.read_line(&mut line)? == 0 {
            break;
        }

        let mut words = line.split_whitespace();
        let Some(command) = words.next() else {
            continue;
        };
        let args: Vec<&str> = words.collect();

        match command {
            "exit" => break,
            "ripanims" | "ripmodels" | "ripimages" | "ripsounds" => {
                report_needs_process(command, &args)
            }
            other => println!("unknown command: {other}"),
        }
    }

    Ok(())
}

fn report_needs_process(command: &str, args: &[&str]) {
    println!(
        "{command} {}: requires an attached game process, which this build does not provide",
        args.join(" ")
    );
}
