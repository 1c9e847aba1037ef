//! Command-line shell over the oxgit object store.
//!
//! Commands are an explicit table here, outside the core: the library knows
//! nothing about argument parsing or dispatch.

#![deny(warnings)]

use std::error::Error;
use std::io::{self, Read, Write};
use std::process;

use clap::{crate_version, App, AppSettings, ArgMatches};

mod cat_file;
mod find_repo;
mod hash_object;
mod init;
mod log;
mod ls_tree;

pub(crate) type Result = std::result::Result<(), Box<dyn Error>>;

pub(crate) fn app<'a, 'b>() -> App<'a, 'b> {
    App::new("oxgit")
        .version(crate_version!())
        .setting(AppSettings::SubcommandRequiredElseHelp)
        .setting(AppSettings::VersionlessSubcommands)
        .subcommand(init::subcommand())
        .subcommand(hash_object::subcommand())
        .subcommand(cat_file::subcommand())
        .subcommand(log::subcommand())
        .subcommand(ls_tree::subcommand())
}

pub(crate) struct Cli<'a> {
    pub arg_matches: ArgMatches<'a>,
    pub stdin: &'a mut dyn Read,
    pub stdout: &'a mut dyn Write,
}

impl<'a> Cli<'a> {
    pub fn run(&mut self) -> Result {
        let matches = self.arg_matches.clone();
        // ^^ Need an independent copy of matches so we can still pass
        // the Cli struct through to subcommand imps.

        match matches.subcommand() {
            ("init", Some(m)) => init::run(self, m),
            ("hash-object", Some(m)) => hash_object::run(self, m),
            ("cat-file", Some(m)) => cat_file::run(self, m),
            ("log", Some(m)) => log::run(self, m),
            ("ls-tree", Some(m)) => ls_tree::run(self, m),
            _ => unreachable!(),
            // unreachable: Should have exited out with appropriate help or
            // error message if no subcommand was given.
        }
    }

    #[cfg(test)]
    pub fn run_with_stdin_and_args<I, T>(
        stdin: Vec<u8>,
        args: I,
    ) -> std::result::Result<Vec<u8>, Box<dyn Error>>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        let mut stdin = std::io::Cursor::new(stdin);
        let mut stdout = Vec::new();

        Cli {
            arg_matches: app().get_matches_from_safe(args)?,
            stdin: &mut stdin,
            stdout: &mut stdout,
        }
        .run()?;

        Ok(stdout)
    }

    #[cfg(test)]
    pub fn run_with_args<I, T>(args: I) -> std::result::Result<Vec<u8>, Box<dyn Error>>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Cli::run_with_stdin_and_args(Vec::new(), args)
    }
}

impl<'a> Write for Cli<'a> {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.stdout.write(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.stdout.flush()
    }
}

fn main() {
    let arg_matches = app().get_matches();

    let mut stdin = io::stdin();
    let mut stdout = io::stdout();

    let mut cli = Cli {
        arg_matches,
        stdin: &mut stdin,
        stdout: &mut stdout,
    };

    if let Err(err) = cli.run() {
        eprintln!("oxgit: {}", err);
        process::exit(1);
    }
}
