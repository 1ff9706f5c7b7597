//! Share capability with a runtime-selected fallback chain.
//!
//! One polymorphic interface, two variants: hand the link to the platform's
//! native opener, or copy it to the clipboard when no opener exists. The
//! variant is picked once at call time by probing for available programs,
//! so callers never branch on platform themselves. Fire-and-forget: failures
//! are logged, never propagated into the pipeline.

use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Stdio};

pub trait Share {
    fn name(&self) -> &'static str;

    fn share(&self, title: &str, text: &str, url: &str);
}

const OPENER_PROGRAMS: [&str; 2] = ["xdg-open", "open"];
const CLIPBOARD_PROGRAMS: [&str; 3] = ["wl-copy", "xclip", "pbcopy"];

/// Native share: hand the URL to the platform opener.
pub struct OpenerShare {
    program: PathBuf,
}

/// Fallback: pipe the share text to a clipboard utility.
pub struct ClipboardShare {
    program: PathBuf,
}

impl Share for OpenerShare {
    fn name(&self) -> &'static str {
        "opener"
    }

    fn share(&self, title: &str, _text: &str, url: &str) {
        match Command::new(&self.program)
            .arg(url)
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
        {
            Ok(_) => tracing::debug!(%title, "handed look to platform opener"),
            Err(err) => tracing::warn!("share via opener failed: {err}"),
        }
    }
}

impl Share for ClipboardShare {
    fn name(&self) -> &'static str {
        "clipboard"
    }

    fn share(&self, title: &str, text: &str, url: &str) {
        let payload = format!("{title}\n{text}\n{url}");
        let mut command = Command::new(&self.program);
        // xclip copies to the primary selection unless told otherwise.
        if self.program.file_name().is_some_and(|n| n == "xclip") {
            command.args(["-selection", "clipboard"]);
        }
        let spawned = command
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn();

        match spawned {
            Ok(mut child) => {
                if let Some(stdin) = child.stdin.as_mut()
                    && let Err(err) = stdin.write_all(payload.as_bytes())
                {
                    tracing::warn!("share via clipboard failed: {err}");
                    return;
                }
                drop(child.stdin.take());
                let _ = child.wait();
                tracing::debug!(%title, "copied look link to clipboard");
            }
            Err(err) => tracing::warn!("share via clipboard failed: {err}"),
        }
    }
}

fn find_program(candidates: &[&str]) -> Option<PathBuf> {
    let path_var = std::env::var_os("PATH")?;
    for candidate in candidates {
        for dir in std::env::split_paths(&path_var) {
            let full = dir.join(candidate);
            if full.is_file() {
                return Some(full);
            }
        }
    }
    None
}

/// Probe once and return the best available variant, or `None` when the
/// environment offers neither (the caller then just prints the link).
pub fn detect() -> Option<Box<dyn Share>> {
    if let Some(program) = find_program(&OPENER_PROGRAMS) {
        return Some(Box::new(OpenerShare { program }));
    }
    if let Some(program) = find_program(&CLIPBOARD_PROGRAMS) {
        return Some(Box::new(ClipboardShare { program }));
    }
    None
}
