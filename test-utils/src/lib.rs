use std::{
    error::Error,
    io,
    path::Path,
    process::{Command, Output},
    str,
};

pub struct Expected<'a> {
    pub stdout: &'a str,
    pub stderr: &'a str,
}

impl<'a> Expected<'a> {
    fn assert_matches(self, output: &Output) -> Result<(), Box<dyn Error>> {
        assert_eq!(str::from_utf8(&output.stdout)?, self.stdout);
        assert_eq!(str::from_utf8(&output.stderr)?, self.stderr);
        Ok(())
    }
}

fn run_interpreter(bin: &Path, src_path: &Path) -> Result<Output, io::Error> {
    Command::new(bin).arg("--in").arg(src_path).output()
}

/// Interprets the source file with the given binary and asserts both the
/// exact output and a clean exit.
pub fn check_interpretation(
    bin: &Path,
    src_path: &Path,
    expected: Expected,
) -> Result<(), Box<dyn Error>> {
    let output = run_interpreter(bin, src_path)?;

    expected.assert_matches(&output)?;
    assert!(
        output.status.success(),
        "interpreter exited with status {:?}",
        output.status.code()
    );

    Ok(())
}

/// Asserts that interpreting the source file fails at startup.
pub fn check_failing_startup(bin: &Path, src_path: &Path) -> Result<(), Box<dyn Error>> {
    let output = run_interpreter(bin, src_path)?;

    assert!(
        !output.status.success(),
        "interpreter should exit non-zero for {src_path:?}"
    );

    Ok(())
}
