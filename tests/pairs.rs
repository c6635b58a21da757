use std::{error::Error, path::Path};

use test_utils::{check_interpretation, Expected};

const SRC_PATH: &str = "./tests/programs/pairs.scm";
const EXPECTED: Expected = Expected {
    stdout: "(1 . 2)\n1\n2\n#t\n#t\n(a b c)\n",
    stderr: "",
};

#[test]
fn interpret_pairs() -> Result<(), Box<dyn Error>> {
    check_interpretation(
        Path::new(env!("CARGO_BIN_EXE_scam")),
        Path::new(SRC_PATH),
        EXPECTED,
    )
}
