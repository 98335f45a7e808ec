use std::{
    fs,
    io::{stdin, stdout, Read, Write},
};

use clap::{value_parser, Arg, ArgAction, Command};

use moss::{parse_declarations, parse_with_file_name, Options};

fn cli() -> Command {
    Command::new("moss")
        .version(env!("CARGO_PKG_VERSION"))
        .about("A LESS parser written purely in Rust")
        .arg(
            Arg::new("STDIN")
                .action(ArgAction::SetTrue)
                .long("stdin")
                .help("Read the stylesheet from stdin"),
        )
        .arg(
            Arg::new("DECLARATIONS")
                .action(ArgAction::SetTrue)
                .short('d')
                .long("declarations")
                .help("Parse the input as a list of declarations, as in a style attribute"),
        )
        .arg(
            Arg::new("QUIET")
                .action(ArgAction::SetTrue)
                .short('q')
                .long("quiet")
                .help("Don't print warnings."),
        )
        .arg(
            Arg::new("INPUT")
                .value_parser(value_parser!(String))
                .required_unless_present("STDIN")
                .help("LESS file"),
        )
}

fn main() -> std::io::Result<()> {
    let matches = cli().get_matches();

    let options = &Options::default().quiet(matches.get_flag("QUIET"));

    let (input, file_name) = if let Some(name) = matches.get_one::<String>("INPUT") {
        (fs::read_to_string(name)?, name.clone())
    } else {
        let mut buffer = String::new();
        stdin().read_to_string(&mut buffer)?;
        (buffer, "stdin".to_owned())
    };

    let result = if matches.get_flag("DECLARATIONS") {
        parse_declarations(input, options)
    } else {
        parse_with_file_name(input, &file_name, options)
    };

    let output = result.unwrap_or_else(|e| {
        eprintln!("{}", e);
        std::process::exit(1)
    });

    writeln!(stdout(), "{:#?}", output.stylesheet)?;
    Ok(())
}
