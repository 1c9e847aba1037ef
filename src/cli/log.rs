use std::io::Write;

use super::{find_repo, Cli, Result};

use oxgit::object::Id;
use oxgit::repo::History;

use clap::{App, Arg, ArgMatches, SubCommand};

pub(crate) fn subcommand<'a, 'b>() -> App<'a, 'b> {
    SubCommand::with_name("log")
        .about("Display the ancestry of a commit as a Graphviz digraph")
        .arg(
            Arg::with_name("commit")
                .required(true)
                .help("The commit to start at, as a 40-digit hex ID"),
        )
}

pub(crate) fn run(cli: &mut Cli, args: &ArgMatches) -> Result {
    let start: Id = args.value_of("commit").unwrap().parse()?;

    let repo = find_repo::from_current_dir()?;
    let store = repo.store();

    writeln!(cli, "digraph log {{")?;

    for edge in History::walk(&store, start) {
        let (child, parent) = edge?;
        writeln!(cli, "  c_{} -> c_{};", child, parent)?;
    }

    writeln!(cli, "}}")?;

    Ok(())
}
