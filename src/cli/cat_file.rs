use std::io::Write;

use super::{find_repo, Cli, Result};

use oxgit::object::{Id, Kind};

use clap::{App, Arg, ArgMatches, SubCommand};

pub(crate) fn subcommand<'a, 'b>() -> App<'a, 'b> {
    SubCommand::with_name("cat-file")
        .about("Provide content of repository objects")
        .arg(
            Arg::with_name("type")
                .required(true)
                .help("The expected type of the object"),
        )
        .arg(
            Arg::with_name("object")
                .required(true)
                .help("The object to display, as a 40-digit hex ID"),
        )
}

pub(crate) fn run(cli: &mut Cli, args: &ArgMatches) -> Result {
    let kind: Kind = args.value_of("type").unwrap().parse()?;
    let id: Id = args.value_of("object").unwrap().parse()?;

    let repo = find_repo::from_current_dir()?;
    let (found, payload) = repo.store().get(&id)?;

    if found != kind {
        return Err(format!("object {} is a {}, not a {}", id, found, kind).into());
    }

    cli.write_all(&payload)?;

    Ok(())
}
