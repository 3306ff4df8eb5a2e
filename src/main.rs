use std::process::ExitCode;

use clap::Parser;
use log::error;

use mandelzoom::{
    app::{self, TargetKind},
    config::{Cli, Command, Target},
    Result,
};

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Animate(args) => {
            let kind = match args.target {
                Target::Shader => TargetKind::Shader,
                Target::Cpu => TargetKind::Buffer {
                    threads: args.threads(),
                },
            };
            app::run(args.animation_config()?, kind, args.window_size()?)
        }
        Command::Render(args) => args.still()?.save(&args.output),
    }
}

fn main() -> ExitCode {
    env_logger::init();

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{}", err);
            ExitCode::FAILURE
        }
    }
}
