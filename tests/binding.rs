use std::{error::Error, path::Path};

use test_utils::{check_interpretation, Expected};

const SRC_PATH: &str = "./tests/programs/binding.scm";
const EXPECTED: Expected = Expected {
    stdout: "()\n1\n#t\n",
    stderr: "",
};

#[test]
fn interpret_binding() -> Result<(), Box<dyn Error>> {
    check_interpretation(
        Path::new(env!("CARGO_BIN_EXE_scam")),
        Path::new(SRC_PATH),
        EXPECTED,
    )
}
