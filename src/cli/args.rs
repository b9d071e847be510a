// ============================================================
// Layer 1 — Argument Normalisation
// ============================================================
// `-cf` is accepted as the short form of --context-file. clap
// only supports single-character short flags (it would read
// `-cf` as `-c f`), so it is rewritten before parsing.

use std::ffi::OsString;

const CONTEXT_FILE_SHORT: &str = "-cf";
const CONTEXT_FILE_LONG: &str = "--context-file";

pub fn normalize_args<I>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = OsString>,
{
    args.into_iter()
        .map(|arg| match arg.to_str() {
            Some(CONTEXT_FILE_SHORT) => OsString::from(CONTEXT_FILE_LONG),
            Some(s) => match s.strip_prefix("-cf=") {
                Some(value) => OsString::from(format!("{CONTEXT_FILE_LONG}={value}")),
                None => arg,
            },
            None => arg,
        })
        .collect()
}
