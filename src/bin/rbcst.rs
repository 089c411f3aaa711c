// rbcst command-line entry point: normalizes recorded Ripper event streams.
// Usage: rbcst print <EVENTS> | rbcst check <EVENTS> <EXPECTED> | rbcst test [DIR]

fn main() {
    rbcst::cli::run();
}
