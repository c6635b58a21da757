use std::{error::Error, path::Path};

use test_utils::{check_interpretation, Expected};

const SRC_PATH: &str = "./tests/programs/exceptions.scm";
const EXPECTED: Expected = Expected {
    stdout: "Exception in /: Divide by zero\n\
             Exception in car: 2 is not a pair\n\
             Exception in car: 2 is not a pair\n\
             Exception in lookup: Variable undefined-symbol is not bound\n\
             3\n",
    stderr: "",
};

#[test]
fn interpret_exceptions() -> Result<(), Box<dyn Error>> {
    check_interpretation(
        Path::new(env!("CARGO_BIN_EXE_scam")),
        Path::new(SRC_PATH),
        EXPECTED,
    )
}
