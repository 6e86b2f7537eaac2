use clap::{Arg, ArgAction, Command, ValueHint};
use clap_complete::{generate_to, shells::*};
use std::env;
use std::io::Error;

// Mirror of build_cli() in src/main.rs, minus the help texts.
// Build scripts can't access src/ modules.
fn input_arg() -> Arg {
    Arg::new("input")
        .required(true)
        .index(1)
        .value_hint(ValueHint::FilePath)
}

fn output_arg() -> Arg {
    Arg::new("output")
        .short('o')
        .long("output")
        .value_hint(ValueHint::FilePath)
}

fn main() -> Result<(), Error> {
    let outdir = match env::var_os("OUT_DIR") {
        None => return Ok(()),
        Some(outdir) => outdir,
    };

    let mut cmd = Command::new("edconv")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Convert lesson content between Markdown and Ed-XML")
        .subcommand_required(true)
        .arg(
            Arg::new("config")
                .long("config")
                .value_hint(ValueHint::FilePath)
                .global(true),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .action(ArgAction::Count)
                .global(true),
        )
        .subcommand(
            Command::new("render-ed")
                .about("Convert a Markdown file to Ed-XML")
                .arg(input_arg())
                .arg(output_arg())
                .arg(Arg::new("offline").long("offline").action(ArgAction::SetTrue)),
        )
        .subcommand(
            Command::new("render-md")
                .about("Convert an Ed-XML file to Markdown")
                .arg(input_arg())
                .arg(output_arg())
                .arg(
                    Arg::new("assets")
                        .long("assets")
                        .value_hint(ValueHint::DirPath),
                )
                .arg(
                    Arg::new("no-download")
                        .long("no-download")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("inspect")
                .about("Print the Ed document tree of an Ed-XML file")
                .arg(input_arg()),
        );

    generate_to(Bash, &mut cmd, "edconv", &outdir)?;
    generate_to(Zsh, &mut cmd, "edconv", &outdir)?;
    generate_to(Fish, &mut cmd, "edconv", &outdir)?;

    println!("cargo:warning=Shell completions generated in {outdir:?}");

    Ok(())
}
