//! Not a user-facing CLI (spec.md §1 Non-goals). This binary exists only
//! so `ProcessSandboxExecutor` (tracewright-sandbox::executor) can re-exec
//! itself with the hidden `__run_splice__` marker and run the splice-DSL
//! interpreter in a genuinely isolated child process (spec.md §4.C7).

use tracewright_sandbox::SPLICE_MARKER;

fn main() {
    let mut args = std::env::args();
    let _program = args.next();

    match args.next() {
        Some(marker) if marker == SPLICE_MARKER => {
            let rest: Vec<String> = args.collect();
            std::process::exit(tracewright_sandbox::worker::run(&rest));
        }
        _ => {
            eprintln!("tracewright: this binary only hosts the internal sandbox worker and is not a CLI");
            std::process::exit(2);
        }
    }
}
