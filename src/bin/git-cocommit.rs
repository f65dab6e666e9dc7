/// Entry point for the `git-cocommit` binary.
///
/// Delegates to the CLI entry function and exits the process with the
/// returned exit code. Errors are printed as `Error: <message>` on stderr
/// and exit with status code 1.
fn main() {
    match cocommit::cli::entry() {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("{}", cocommit::cli::render_error(&e));
            std::process::exit(1);
        }
    }
}
