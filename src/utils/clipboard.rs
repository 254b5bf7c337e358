use std::io::Write;
use std::process::{Command, Stdio};

/// An external program that reads the text to copy from stdin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClipboardTool {
    pub program: &'static str,
    pub args: &'static [&'static str],
}

#[cfg(target_os = "macos")]
const PLATFORM_TOOLS: &[ClipboardTool] = &[ClipboardTool {
    program: "pbcopy",
    args: &[],
}];

#[cfg(target_os = "windows")]
const PLATFORM_TOOLS: &[ClipboardTool] = &[ClipboardTool {
    program: "cmd",
    args: &["/C", "clip"],
}];

#[cfg(not(any(target_os = "macos", target_os = "windows")))]
const PLATFORM_TOOLS: &[ClipboardTool] = &[
    ClipboardTool {
        program: "wl-copy",
        args: &[],
    },
    ClipboardTool {
        program: "xclip",
        args: &["-selection", "clipboard"],
    },
    ClipboardTool {
        program: "xsel",
        args: &["--clipboard", "--input"],
    },
];

/// Copies `text` with the first clipboard tool available on this platform.
pub fn copy_to_clipboard(text: &str) -> Result<(), String> {
    copy_with(PLATFORM_TOOLS, text)
}

/// Tries `tools` in order; the error names every tool that was attempted.
pub fn copy_with(tools: &[ClipboardTool], text: &str) -> Result<(), String> {
    let mut attempted = Vec::with_capacity(tools.len());
    for tool in tools {
        if run_with_stdin(tool, text).is_ok() {
            return Ok(());
        }
        attempted.push(tool.program);
    }
    Err(format!(
        "no clipboard tool worked (tried {})",
        attempted.join(", ")
    ))
}

fn run_with_stdin(tool: &ClipboardTool, input: &str) -> Result<(), String> {
    let mut child = Command::new(tool.program)
        .args(tool.args)
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map_err(|err| format!("`{}` not available: {err}", tool.program))?;

    // Dropping stdin closes the pipe so the tool sees end of input.
    let written = match child.stdin.take() {
        Some(mut stdin) => stdin.write_all(input.as_bytes()),
        None => Ok(()),
    };

    // The child is reaped even when the write failed.
    let status = child.wait();
    written.map_err(|err| format!("writing to `{}` failed: {err}", tool.program))?;
    match status {
        Ok(status) if status.success() => Ok(()),
        Ok(status) => Err(format!("`{}` exited with {status}", tool.program)),
        Err(err) => Err(format!("`{}` failed: {err}", tool.program)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_tools_are_listed_in_the_error() {
        let tools = [
            ClipboardTool {
                program: "edubridge-no-such-clipboard-a",
                args: &[],
            },
            ClipboardTool {
                program: "edubridge-no-such-clipboard-b",
                args: &[],
            },
        ];
        let err = copy_with(&tools, "text").expect_err("no tool exists");
        assert!(err.contains("edubridge-no-such-clipboard-a"));
        assert!(err.contains("edubridge-no-such-clipboard-b"));
    }

    #[cfg(unix)]
    #[test]
    fn first_working_tool_wins() {
        let tools = [
            ClipboardTool {
                program: "edubridge-no-such-clipboard",
                args: &[],
            },
            ClipboardTool {
                program: "cat",
                args: &[],
            },
        ];
        assert_eq!(copy_with(&tools, "hello"), Ok(()));
    }

    #[cfg(unix)]
    #[test]
    fn tool_that_stops_reading_is_waited_for() {
        let tool = ClipboardTool {
            program: "sh",
            args: &["-c", "exec 0<&-; sleep 0.3; exit 3"],
        };
        let input = "x".repeat(1 << 20);
        let started = std::time::Instant::now();
        let err = run_with_stdin(&tool, &input).expect_err("pipe closed early");
        assert!(err.contains("writing to `sh` failed"), "{err}");
        assert!(started.elapsed() >= std::time::Duration::from_millis(250));
    }
}
