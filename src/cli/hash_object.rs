use std::error::Error;
use std::fs;
use std::io::Write;

use super::{find_repo, Cli, Result};

use oxgit::object::Kind;
use oxgit::repo::object_id;

use clap::{App, Arg, ArgMatches, SubCommand};

pub(crate) fn subcommand<'a, 'b>() -> App<'a, 'b> {
    SubCommand::with_name("hash-object")
        .about("Compute object ID and optionally create an object from a file")
        .arg(
            Arg::with_name("t")
                .short("t")
                .value_name("type")
                .help("Specify the type (default 'blob')"),
        )
        .arg(
            Arg::with_name("w")
                .short("w")
                .help("Actually write the object into the object database"),
        )
        .arg(
            Arg::with_name("stdin")
                .long("stdin")
                .help("Read the object from standard input instead of from a file"),
        )
        .arg(Arg::with_name("file"))
}

pub(crate) fn run(cli: &mut Cli, args: &ArgMatches) -> Result {
    let kind = match args.value_of("t") {
        Some(t) => t.parse::<Kind>()?,
        None => Kind::Blob,
    };

    let payload = payload_from_args(cli, args)?;

    let id = if args.is_present("w") {
        let repo = find_repo::from_current_dir()?;
        repo.store().put(kind, &payload, true)?
    } else {
        // Dry run: report the ID without touching any store.
        object_id(kind, &payload)
    };

    writeln!(cli, "{}", id)?;

    Ok(())
}

fn payload_from_args(
    cli: &mut Cli,
    args: &ArgMatches,
) -> std::result::Result<Vec<u8>, Box<dyn Error>> {
    let stdin = args.is_present("stdin");
    let file = args.value_of("file");

    match (file, stdin) {
        (Some(path), false) => Ok(fs::read(path)?),
        (None, true) => {
            let mut payload = Vec::new();
            cli.stdin.read_to_end(&mut payload)?;
            Ok(payload)
        }
        _ => Err("content source must be either --stdin or a file path".into()),
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use crate::Cli;

    #[test]
    fn known_id_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doc.txt");
        fs::write(&path, "what is up, doc?").unwrap();

        let stdout =
            Cli::run_with_args(vec!["oxgit", "hash-object", path.to_str().unwrap()]).unwrap();

        assert_eq!(stdout, b"bd9dbf5aae1a3862dd1526723246b20206e5fc37\n".to_vec());
    }

    #[test]
    fn known_id_from_stdin() {
        let stdout = Cli::run_with_stdin_and_args(
            b"what is up, doc?".to_vec(),
            vec!["oxgit", "hash-object", "--stdin"],
        )
        .unwrap();

        assert_eq!(stdout, b"bd9dbf5aae1a3862dd1526723246b20206e5fc37\n".to_vec());
    }

    #[test]
    fn commit_type_hashes_differently() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("payload");
        fs::write(&path, "\nmessage only").unwrap();

        let as_blob =
            Cli::run_with_args(vec!["oxgit", "hash-object", path.to_str().unwrap()]).unwrap();
        let as_commit = Cli::run_with_args(vec![
            "oxgit",
            "hash-object",
            "-t",
            "commit",
            path.to_str().unwrap(),
        ])
        .unwrap();

        assert_ne!(as_blob, as_commit);
    }

    #[test]
    fn rejects_unknown_type() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("payload");
        fs::write(&path, "x").unwrap();

        let err = Cli::run_with_args(vec![
            "oxgit",
            "hash-object",
            "-t",
            "tag",
            path.to_str().unwrap(),
        ])
        .unwrap_err();

        assert!(err.to_string().contains("unknown object kind `tag`"));
    }

    #[test]
    fn rejects_missing_source() {
        let err = Cli::run_with_args(vec!["oxgit", "hash-object"]).unwrap_err();
        assert!(err.to_string().contains("content source"));
    }
}
