use std::time::Duration;
use crate::sync::DEFAULT_POLL_INTERVAL;

const MIN_POLL_MICROS: u64 = 1;
const MAX_POLL_MICROS: u64 = 10_000;

#[derive(Debug, Clone)]
pub struct Options {
    pub save_log: bool,
    pub print_help: bool,
    pub poll_interval: Duration,
    pub work_dir: String,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            save_log: false,
            print_help: false,
            poll_interval: DEFAULT_POLL_INTERVAL,
            work_dir: String::from("."),
        }
    }
}

impl Options {
    pub fn parse() -> Self {
        let work_dir = std::env::current_exe()
            .ok()
            .and_then(|p| p.parent().map(|d| d.to_string_lossy().into_owned()))
            .unwrap_or_else(|| String::from("."));
        Self::parse_from(std::env::args().skip(1), work_dir)
    }

    pub fn parse_from<I>(args: I, work_dir: String) -> Self
        where I: IntoIterator<Item = String>
    {
        let mut opts = Self { work_dir, ..Default::default() };
        let mut args = args.into_iter();
        while let Some(arg) = args.next() {
            match &arg {
                s if s.eq_ignore_ascii_case("-v") => opts.save_log = true,
                s if s.eq_ignore_ascii_case("-p") => {
                    match args.next().and_then(|v| Self::parse_poll_micros(&v)) {
                        Some(micros) => opts.poll_interval = Duration::from_micros(micros),
                        None => opts.print_help = true,
                    }
                },
                _ => opts.print_help = true,
            }
        }
        opts
    }

    fn parse_poll_micros(value: &str) -> Option<u64> {
        value
            .trim()
            .parse::<u64>()
            .ok()
            .filter(|v| (MIN_POLL_MICROS..=MAX_POLL_MICROS).contains(v))
    }

    pub fn help() -> String {
        format!(
            "parameters:\n\
            -v [save logs to file]\n\
            -p <microseconds> [blank-end polling interval, {}..={}, default {}]",
            MIN_POLL_MICROS,
            MAX_POLL_MICROS,
            DEFAULT_POLL_INTERVAL.as_micros(),
        )
    }
}
