use std::io::{self, BufRead, Write};
use std::process::ExitCode;

use clap::Parser;
use extended_timestamp::{
    DesignatorCase, ParseOptions, ParsedTimestamp, TimestampResult, TrailingInput,
};

/// Converts extended ISO-8601 timestamps into Unix epoch seconds.
///
/// Each result is printed as `<input>\t<value>`. Inputs that fail are
/// printed as `<input>\terror: <message>` and make the process exit with a
/// non-zero status.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Timestamps to convert. Lines are read from stdin when none are given.
    #[arg(allow_hyphen_values = true)]
    timestamps: Vec<String>,

    /// Seconds added to every result.
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    offset: i64,

    /// Accept lowercase designators, ignore everything after the seconds
    /// and require a four digit year.
    #[arg(long)]
    lenient: bool,

    /// Accepted case of the `T` and `Z` designators: `upper` or `any`.
    #[arg(long)]
    designators: Option<DesignatorCase>,

    /// Handling of input after the seconds field: `reject` or `ignore`.
    #[arg(long)]
    trailing: Option<TrailingInput>,

    /// Minimum number of year digits.
    #[arg(long)]
    min_year_digits: Option<u8>,

    /// Print epoch nanoseconds, including the fraction, instead of seconds.
    #[arg(long, conflicts_with = "offset")]
    nanos: bool,
}

impl Args {
    fn options(&self) -> ParseOptions {
        let mut options = if self.lenient {
            ParseOptions::LENIENT
        } else {
            ParseOptions::STRICT
        };
        if let Some(designators) = self.designators {
            options = options.with_designators(designators);
        }
        if let Some(trailing) = self.trailing {
            options = options.with_trailing(trailing);
        }
        if let Some(digits) = self.min_year_digits {
            options = options.with_min_year_digits(digits);
        }
        options
    }

    fn convert(&self, source: &str) -> TimestampResult<String> {
        let timestamp = ParsedTimestamp::parse_with(source, self.options())?;
        if self.nanos {
            return Ok(timestamp.to_epoch_nanoseconds()?.to_string());
        }
        Ok(timestamp.to_epoch_seconds(self.offset)?.to_string())
    }
}

impl Args {
    /// Converts one input and writes its result line.
    ///
    /// Returns whether the input was converted.
    fn report<W: Write>(&self, input: &[u8], out: &mut W) -> io::Result<bool> {
        let Ok(source) = core::str::from_utf8(input) else {
            log::debug!("input {input:?} is not valid UTF-8");
            writeln!(out, "{}\terror: invalid UTF-8", String::from_utf8_lossy(input))?;
            return Ok(false);
        };
        match self.convert(source) {
            Ok(value) => {
                writeln!(out, "{source}\t{value}")?;
                Ok(true)
            }
            Err(err) => {
                log::debug!("{source:?} failed with {:?}", err.message_enum());
                writeln!(out, "{source}\terror: {err}")?;
                Ok(false)
            }
        }
    }

    /// Reports every input and returns the number of failures.
    fn run<I, W>(&self, inputs: I, out: &mut W) -> io::Result<usize>
    where
        I: IntoIterator<Item = io::Result<Vec<u8>>>,
        W: Write,
    {
        let mut failures = 0;
        for input in inputs {
            if !self.report(&input?, out)? {
                failures += 1;
            }
        }
        Ok(failures)
    }
}

/// Splits stdin into lines, dropping only the `\n` or `\r\n` terminator.
///
/// Blank lines are skipped.
fn stdin_lines<R: BufRead>(reader: R) -> impl Iterator<Item = io::Result<Vec<u8>>> {
    reader
        .split(b'\n')
        .map(|line| {
            line.map(|mut line| {
                if line.last() == Some(&b'\r') {
                    line.pop();
                }
                line
            })
        })
        .filter(|line| !matches!(line, Ok(line) if line.is_empty()))
}

fn main() -> io::Result<ExitCode> {
    env_logger::init();
    let args = Args::parse();
    log::debug!("parsing with {:?}", args.options());

    let mut stdout = io::stdout().lock();
    let failures = if args.timestamps.is_empty() {
        args.run(stdin_lines(io::stdin().lock()), &mut stdout)?
    } else {
        let inputs = args
            .timestamps
            .iter()
            .map(|timestamp| Ok(timestamp.as_bytes().to_vec()));
        args.run(inputs, &mut stdout)?
    };

    if failures > 0 {
        log::info!("{failures} inputs failed");
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}
