use std::io::Write;

use super::{find_repo, Cli, Result};

use oxgit::object::{Id, Object};

use clap::{App, Arg, ArgMatches, SubCommand};

pub(crate) fn subcommand<'a, 'b>() -> App<'a, 'b> {
    SubCommand::with_name("ls-tree")
        .about("List the contents of a tree object")
        .arg(
            Arg::with_name("tree")
                .required(true)
                .help("The tree to list, as a 40-digit hex ID"),
        )
}

pub(crate) fn run(cli: &mut Cli, args: &ArgMatches) -> Result {
    let id: Id = args.value_of("tree").unwrap().parse()?;

    let repo = find_repo::from_current_dir()?;
    let store = repo.store();

    let entries = match store.get_object(&id)? {
        Object::Tree(entries) => entries,
        other => {
            return Err(format!("object {} is a {}, not a tree", id, other.kind()).into());
        }
    };

    for entry in entries {
        // The entry alone doesn't know what it points at; ask the store.
        let (kind, _) = store.get(&entry.id)?;

        writeln!(
            cli,
            "{} {} {}\t{}",
            String::from_utf8_lossy(&entry.mode),
            kind,
            entry.id,
            String::from_utf8_lossy(&entry.name)
        )?;
    }

    Ok(())
}
