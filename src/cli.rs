use clap::Parser;
use std::ffi::OsString;

pub const DEFAULT_CONFIG: &str = "repos.ini";
pub const DEFAULT_TARGET: &str = "fedora-rawhide-x86_64";
pub const DEFAULT_API_URL: &str = "https://copr.fedorainfracloud.org";
pub const DEFAULT_DOWNLOAD_URL: &str = "https://download.copr.fedorainfracloud.org";

#[derive(Parser, Debug)]
#[command(name = "copr2url", version)]
#[command(about = "Print download links for the latest successful Copr builds", long_about = None)]
pub struct Cli {
    /// Repo list (INI, one section per repo; `.toml` files are read as TOML)
    #[arg(default_value = DEFAULT_CONFIG)]
    pub config: String,

    /// Chroot to look in, e.g. fedora-41-aarch64
    #[arg(default_value = DEFAULT_TARGET)]
    pub target: String,

    /// Print a JSON array instead of one link per line
    #[arg(long)]
    pub json: bool,

    /// Show debug output on stderr
    #[arg(short, long)]
    pub verbose: bool,

    /// Override the Copr API URL
    #[arg(long, default_value = DEFAULT_API_URL)]
    pub api_url: String,

    /// Override the Copr results download URL
    #[arg(long, default_value = DEFAULT_DOWNLOAD_URL)]
    pub download_url: String,

    /// Package archive extension to look for
    #[arg(long, default_value = "rpm")]
    pub extension: String,

    /// Arguments dropped before parsing, so they can be logged once logging is up.
    #[arg(skip)]
    pub ignored: Vec<String>,
}

/// Long flags we understand. The bool says whether the flag takes a value.
const KNOWN_LONG: &[(&str, bool)] = &[
    ("--json", false),
    ("--verbose", false),
    ("--help", false),
    ("--version", false),
    ("--api-url", true),
    ("--download-url", true),
    ("--extension", true),
];

const KNOWN_SHORT: &[&str] = &["-v", "-h", "-V"];

/// CONFIG and TARGET. Anything past these is dropped.
const MAX_POSITIONALS: usize = 2;

impl Cli {
    /// Parses args, silently dropping anything we don't understand: unknown
    /// flags, values glued onto switches (`--json=1`) and extra positionals.
    pub fn parse_lenient<I, T>(args: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString>,
    {
        let (kept, ignored) = strip_unknown_args(args);
        let mut cli = Self::parse_from(kept);
        cli.ignored = ignored;
        cli
    }
}

fn strip_unknown_args<I, T>(args: I) -> (Vec<OsString>, Vec<String>)
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let mut kept: Vec<OsString> = Vec::new();
    let mut ignored = Vec::new();
    let mut positionals = 0;
    let mut iter = args.into_iter().map(Into::<OsString>::into);

    // argv[0]
    if let Some(bin) = iter.next() {
        kept.push(bin);
    }

    let mut after_double_dash = false;
    while let Some(arg) = iter.next() {
        let text = arg.to_string_lossy().into_owned();

        let is_flag = !after_double_dash && text.starts_with('-') && text != "-";
        if !is_flag {
            if positionals < MAX_POSITIONALS {
                positionals += 1;
                kept.push(arg);
            } else {
                ignored.push(text);
            }
            continue;
        }

        if text == "--" {
            after_double_dash = true;
            kept.push(arg);
            continue;
        }

        if !text.starts_with("--") {
            if KNOWN_SHORT.contains(&text.as_str()) {
                kept.push(arg);
            } else {
                ignored.push(text);
            }
            continue;
        }

        let (name, inline_value) = match text.split_once('=') {
            Some((name, _)) => (name, true),
            None => (text.as_str(), false),
        };
        match KNOWN_LONG.iter().find(|(flag, _)| *flag == name) {
            Some((_, false)) if inline_value => ignored.push(text),
            Some((_, false)) => kept.push(arg),
            Some((_, true)) if inline_value => kept.push(arg),
            Some((_, true)) => match iter.next() {
                Some(value) => {
                    kept.push(arg);
                    kept.push(value);
                }
                // Value flag at the very end with nothing to take.
                None => ignored.push(text),
            },
            None => ignored.push(text),
        }
    }

    (kept, ignored)
}
