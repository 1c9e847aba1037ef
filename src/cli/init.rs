use std::io::Write;
use std::path::Path;

use super::{Cli, Result};

use oxgit::repo::OnDisk;

use clap::{App, Arg, ArgMatches, SubCommand};

pub(crate) fn subcommand<'a, 'b>() -> App<'a, 'b> {
    SubCommand::with_name("init")
        .about("Create an empty repository")
        .arg(
            Arg::with_name("directory")
                .default_value(".")
                .help("Where to create the repository"),
        )
}

pub(crate) fn run(cli: &mut Cli, args: &ArgMatches) -> Result {
    let dir = args.value_of("directory").unwrap();
    let path = Path::new(dir);

    OnDisk::init(path)?;

    writeln!(
        cli,
        "Initialized empty repository in {}",
        path.display()
    )?;

    Ok(())
}
