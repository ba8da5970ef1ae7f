//! The `__run_splice__` entry point — what the re-exec'd child actually
//! runs. Reads the Transformer and input bytes from the two paths the
//! parent passed, applies the splice program, and writes the result to
//! stdout per spec.md §6.3's stable I/O contract.

use std::io::Write;
use std::path::Path;

use tracewright_core::Transformer;

use crate::interpreter;

/// `args` are the positional arguments *after* the `__run_splice__`
/// marker: `[transformer_json_path, input_path]`. Returns the process
/// exit code; never panics on malformed input (spec.md §4.C7: a crashing
/// interpretation must not be mistaken for a process crash the parent
/// can't account for).
pub fn run(args: &[String]) -> i32 {
    let [transformer_path, input_path] = args else {
        eprintln!("__run_splice__ expects exactly two arguments: <transformer_json_path> <input_path>");
        return 2;
    };

    match run_inner(Path::new(transformer_path), Path::new(input_path)) {
        Ok(output) => {
            let stdout = std::io::stdout();
            let mut handle = stdout.lock();
            if handle.write_all(&output).is_err() {
                return 1;
            }
            0
        }
        Err(message) => {
            eprintln!("{message}");
            1
        }
    }
}

fn run_inner(transformer_path: &Path, input_path: &Path) -> Result<Vec<u8>, String> {
    let transformer_bytes = std::fs::read(transformer_path).map_err(|e| format!("failed to read transformer: {e}"))?;
    let transformer: Transformer =
        serde_json::from_slice(&transformer_bytes).map_err(|e| format!("malformed transformer JSON: {e}"))?;
    let input = std::fs::read(input_path).map_err(|e| format!("failed to read input: {e}"))?;
    interpreter::apply(&transformer, &input).map_err(|e| e.to_string())
}
