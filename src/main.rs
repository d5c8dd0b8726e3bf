use glint_runtime::prelude::*;
use glint_runtime::syntax::source::SourceFile;
use std::fmt;
use std::io::{self, Read};
use std::path::PathBuf;
use std::process;
use std::str::FromStr;
use structopt::StructOpt;

mod logger;

#[derive(Debug, StructOpt)]
#[structopt(name = "glint", about = "Render a Glint template")]
struct Options {
    /// Template source to render. Read from stdin if neither this nor --file
    /// is given.
    #[structopt(conflicts_with = "file")]
    template: Option<String>,

    /// Read the template from a file
    #[structopt(short, long, parse(from_os_str))]
    file: Option<PathBuf>,

    /// Set a global variable, e.g. `--set player.name=Steve`
    #[structopt(short, long = "set", number_of_values = 1)]
    set: Vec<Binding>,

    /// Set a variable in a scope that only lives for this render
    #[structopt(long = "scoped", number_of_values = 1)]
    scoped: Vec<Binding>,

    /// Hide a global variable from this render
    #[structopt(long = "unset", number_of_values = 1)]
    unset: Vec<String>,

    /// Do not register the standard library
    #[structopt(long)]
    no_stdlib: bool,

    /// Enable verbose logging, repeat for more detail
    #[structopt(short, long, parse(from_occurrences))]
    verbose: usize,

    /// Disable all logging
    #[structopt(short, long)]
    quiet: bool,
}

/// A `name=value` pair given on the command line.
#[derive(Debug)]
struct Binding {
    name: String,
    value: Value,
}

impl FromStr for Binding {
    type Err = BindingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (name, value) = s.split_once('=').ok_or_else(|| BindingError(s.to_owned()))?;

        if name.is_empty() {
            return Err(BindingError(s.to_owned()));
        }

        let value = match value {
            "true" => Value::TRUE,
            "false" => Value::FALSE,
            value if is_number(value) => value
                .parse::<f64>()
                .map(Value::from)
                .unwrap_or_else(|_| Value::from(value)),
            value => Value::from(value),
        };

        Ok(Self {
            name: name.to_owned(),
            value,
        })
    }
}

/// Returns true if the value is written the way numbers are written in
/// templates: an optional minus sign, digits, and an optional fraction.
fn is_number(value: &str) -> bool {
    let digits = value.strip_prefix('-').unwrap_or(value);
    let (whole, fraction) = match digits.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (digits, None),
    };
    let all_digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());

    all_digits(whole) && fraction.map_or(true, all_digits)
}

#[derive(Debug)]
struct BindingError(String);

impl fmt::Display for BindingError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "expected name=value, got '{}'", self.0)
    }
}

fn main() {
    logger::init();
    log_panics::init();

    let options = Options::from_args();

    if options.quiet {
        logger::quiet();
    } else {
        logger::verbose(options.verbose);
    }

    process::exit(match run(options) {
        Ok(()) => exitcode::OK,
        Err(code) => code,
    });
}

fn run(options: Options) -> Result<(), exitcode::ExitCode> {
    let file = match (options.template, options.file) {
        (Some(source), _) => SourceFile::named("<argument>", source),
        (None, Some(path)) => SourceFile::open(&path).map_err(|e| {
            log::error!("failed to read {}: {}", path.display(), e);
            exitcode::NOINPUT
        })?,
        (None, None) => {
            let mut source = String::new();
            io::stdin().read_to_string(&mut source).map_err(|e| {
                log::error!("failed to read stdin: {}", e);
                exitcode::IOERR
            })?;
            SourceFile::named("<stdin>", source)
        }
    };

    let mut builder = Runtime::builder();
    if !options.no_stdlib {
        builder = builder.with_stdlib();
    }
    for binding in options.set {
        builder = builder.global(binding.name, binding.value);
    }
    let runtime = builder.build();

    let template = runtime.compile(file).map_err(|e| {
        log::error!("{}", e);
        exitcode::DATAERR
    })?;

    let scope = runtime.scope();

    for binding in options.scoped {
        scope.set(&binding.name, binding.value).map_err(|e| {
            log::error!("{}", e);
            exitcode::USAGE
        })?;
    }

    for name in options.unset {
        if scope.remove(&name).map_err(|e| {
            log::error!("{}", e);
            exitcode::USAGE
        })?.is_none() {
            log::warn!("cannot unset '{}', it is not defined", name);
        }
    }

    let output = runtime.run_in(&template, &scope).map_err(|e| {
        log::error!("{}", e);
        exitcode::SOFTWARE
    })?;

    scope.close();

    println!("{}", output);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_bindings() {
        let binding = "player.name=Steve".parse::<Binding>().unwrap();
        assert_eq!(binding.name, "player.name");
        assert_eq!(binding.value, "Steve");

        assert_eq!("level=12".parse::<Binding>().unwrap().value, 12.0);
        assert_eq!("online=true".parse::<Binding>().unwrap().value, true);
        assert_eq!("empty=".parse::<Binding>().unwrap().value, "");
        assert_eq!("eq=a=b".parse::<Binding>().unwrap().value, "a=b");
        assert_eq!("level=-2.5".parse::<Binding>().unwrap().value, -2.5);

        for text in ["Nan", "nan", "inf", "-Infinity", "1e3", "1.", ".5", "+1"] {
            assert_eq!(format!("x={}", text).parse::<Binding>().unwrap().value, text);
        }

        assert!("novalue".parse::<Binding>().is_err());
        assert!("=value".parse::<Binding>().is_err());
    }
}
